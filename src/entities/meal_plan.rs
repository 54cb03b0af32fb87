//! Meal plan row. Embeds a full JSON snapshot of the recipe rather than a
//! foreign key, so later recipe edits never rewrite plan history.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Meal plan database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "meal_plans")]
pub struct Model {
    /// UUID string assigned by the adapter on create
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// The calendar date this plan is scheduled for; snapshot feeds order
    /// by this, ascending
    pub date: chrono::NaiveDate,
    /// JSON snapshot of the full recipe at planning time
    pub recipe: String,
    /// Servings override for this plan
    pub servings: i32,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
