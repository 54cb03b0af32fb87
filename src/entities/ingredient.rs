//! Ingredient row - one stocked perishable per row.
//!
//! Complex fields (the tag set) are JSON-encoded strings; the sync adapter
//! owns the mapping to and from the domain model.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ingredient database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ingredients")]
pub struct Model {
    /// UUID string assigned by the adapter on create
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name (e.g. "Chicken Breast")
    pub name: String,
    /// Primary category token (e.g. "Protein")
    pub category: String,
    /// Stocked amount, non-negative
    pub quantity: f64,
    /// Inventory unit token (e.g. "kg")
    pub unit: String,
    /// Calendar date the item expires
    pub expiry_date: chrono::NaiveDate,
    /// Calendar date the item entered the inventory
    pub added_date: chrono::NaiveDate,
    /// JSON array of lowercase tags
    pub tags: String,
    /// Creation instant; snapshot feeds order by this, descending
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
