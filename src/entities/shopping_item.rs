//! Shopping list row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Shopping item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shopping_items")]
pub struct Model {
    /// UUID string assigned by the adapter on create
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub quantity: f64,
    /// Free-text unit; not constrained to the inventory vocabulary
    pub unit: String,
    /// Free-text category
    pub category: String,
    /// Checked off on the shopping trip
    pub completed: bool,
    /// Creation instant; snapshot feeds order by this, descending
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
