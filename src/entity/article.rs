use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "article")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// One of: NEWS, EVENT, RECRUIT
    pub category: String,
    pub title: String,
    pub sub_title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String, // in Markdown
    pub thumbnail_url: Option<String>,

    pub posted_at: Date,
    /// NULL for open-ended events.
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,

    pub is_popup: bool,
    /// Popup ordering; lower sorts first.
    #[sea_orm(default_value = 99)]
    pub priority: i32,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
