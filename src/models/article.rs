use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Priority assigned to popup articles that do not specify one.
pub const DEFAULT_PRIORITY: i32 = 99;

/// Article category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArticleCategory {
    News,
    Event,
    Recruit,
}

impl ArticleCategory {
    pub const ALL: &'static [ArticleCategory] = &[Self::News, Self::Event, Self::Recruit];

    /// Returns the string representation stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::News => "NEWS",
            Self::Event => "EVENT",
            Self::Recruit => "RECRUIT",
        }
    }
}

impl fmt::Display for ArticleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEWS" => Ok(Self::News),
            "EVENT" => Ok(Self::Event),
            "RECRUIT" => Ok(Self::Recruit),
            other => Err(format!(
                "Unknown category '{}'. Valid values: {}",
                other,
                Self::ALL
                    .iter()
                    .map(|c| c.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

/// Request body for creating an article. Full updates reuse this shape and
/// overwrite every scalar field.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateArticleRequest {
    #[schema(example = "EVENT")]
    pub category: ArticleCategory,
    #[schema(example = "Academy launch special event")]
    pub title: String,
    #[schema(example = "Free trial lessons and long-term enrollment discounts")]
    pub sub_title: String,
    /// Markdown source.
    #[schema(example = "## Details\nCome join us.")]
    pub content: String,
    pub thumbnail_url: Option<String>,
    #[schema(example = "2025-11-06")]
    pub posted_at: NaiveDate,
    /// NULL means open-ended.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_popup: bool,
    /// Popup ordering; lower sorts first. Defaults to 99.
    pub priority: Option<i32>,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct ArticleListQuery {
    /// Filter by category; absent returns all articles.
    pub category: Option<String>,
}

/// List item without the heavy Markdown content field.
#[derive(Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct ArticleListItem {
    pub id: i32,
    pub category: String,
    pub title: String,
    pub sub_title: String,
    pub thumbnail_url: Option<String>,
    pub posted_at: NaiveDate,
    pub is_popup: bool,
    pub priority: i32,
}

/// Detail response carrying the Markdown rendered to sanitized HTML.
/// The HTML is produced on the fly and never persisted.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ArticleDetailResponse {
    pub id: i32,
    pub category: String,
    pub title: String,
    pub sub_title: String,
    pub thumbnail_url: Option<String>,
    pub posted_at: NaiveDate,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub safe_html_content: String,
    pub is_popup: bool,
    pub priority: i32,
}

impl ArticleDetailResponse {
    pub fn new(m: crate::entity::article::Model, safe_html_content: String) -> Self {
        Self {
            id: m.id,
            category: m.category,
            title: m.title,
            sub_title: m.sub_title,
            thumbnail_url: m.thumbnail_url,
            posted_at: m.posted_at,
            start_date: m.start_date,
            end_date: m.end_date,
            safe_html_content,
            is_popup: m.is_popup,
            priority: m.priority,
        }
    }
}

pub fn validate_create_article(req: &CreateArticleRequest) -> Result<(), AppError> {
    let title = req.title.trim();
    if title.is_empty() || title.chars().count() > 256 {
        return Err(AppError::Validation("Title must be 1-256 characters".into()));
    }
    let sub_title = req.sub_title.trim();
    if sub_title.is_empty() || sub_title.chars().count() > 256 {
        return Err(AppError::Validation(
            "Subtitle must be 1-256 characters".into(),
        ));
    }
    if req.content.trim().is_empty() || req.content.len() > 1_000_000 {
        return Err(AppError::Validation(
            "Content must be non-empty and at most 1MB".into(),
        ));
    }
    if let Some(priority) = req.priority
        && priority < 0
    {
        return Err(AppError::Validation("Priority must be >= 0".into()));
    }
    Ok(())
}
