use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "instructor")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub nickname: String,
    pub profile_img_url: Option<String>,
    /// e.g. "Head Coach"
    pub current_title: Option<String>,
    pub sgea_logo_img_url: Option<String>,
    pub content: Option<String>,

    #[sea_orm(has_many)]
    pub career_histories: HasMany<super::career_history::Entity>,

    #[sea_orm(has_many, via = "instructor_game")]
    pub games: HasMany<super::game::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
