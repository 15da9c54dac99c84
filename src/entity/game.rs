use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,
    pub logo_url: String,

    #[sea_orm(has_many, via = "instructor_game")]
    pub instructors: HasMany<super::instructor::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
