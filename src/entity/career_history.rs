use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "career_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub instructor_id: i32,
    #[sea_orm(belongs_to, from = "instructor_id", to = "id")]
    pub instructor: HasOne<super::instructor::Entity>,

    /// e.g. "2018", "2022-2023"
    pub period: String,
    pub organization_name: String,
    pub role_type: Option<String>,
    pub logo_img_url: Option<String>,
}

impl ActiveModelBehavior for ActiveModel {}
