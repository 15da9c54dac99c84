use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "instructor_game")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub instructor_id: i32,
    #[sea_orm(primary_key)]
    pub game_id: i32,
    #[sea_orm(belongs_to, from = "instructor_id", to = "id")]
    pub instructor: Option<super::instructor::Entity>,
    #[sea_orm(belongs_to, from = "game_id", to = "id")]
    pub game: Option<super::game::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
