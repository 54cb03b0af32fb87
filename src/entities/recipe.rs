//! User-created recipe row. Builtin recipes never reach this table; the
//! catalog lives in code and is prepended by the store on replacement.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Recipe database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    /// UUID string assigned by the adapter on create
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    /// JSON array of free-text ingredient references
    pub ingredients: String,
    /// JSON array of ordered instruction steps
    pub instructions: String,
    /// Preparation minutes
    pub prep_time: i32,
    /// Cooking minutes
    pub cook_time: i32,
    pub servings: i32,
    /// JSON object with the five nutrition fields
    pub nutrition: String,
    /// JSON array of descriptive tags
    pub tags: String,
    /// Optional image reference
    pub image: Option<String>,
    /// Always true for persisted rows; kept for wire-format parity
    pub is_user_created: bool,
    /// Creation instant; snapshot feeds order by this, descending
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
