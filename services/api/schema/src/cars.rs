use sea_orm::entity::prelude::*;

/// A car listed in the catalog.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub make: String,
    #[sea_orm(column_name = "model")]
    pub model_name: String,
    pub year: i32,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub mileage: i32,
    pub color: String,
    pub fuel_type: String,
    pub transmission: String,
    #[sea_orm(column_type = "Double")]
    pub engine_size: f64,
    pub horsepower: i32,
    pub body_type: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub image_url: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
