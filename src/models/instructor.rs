use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Request body for creating an instructor with its career history and game
/// tags. Full-replace updates (PUT) reuse this shape: the existing child
/// collections are dropped and the supplied ones inserted.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateInstructorRequest {
    #[schema(example = "Jaewon Seo")]
    pub name: String,
    #[schema(example = "Rexi")]
    pub nickname: String,
    pub profile_img_url: Option<String>,
    #[schema(example = "Head Coach")]
    pub current_title: Option<String>,
    pub sgea_logo_img_url: Option<String>,
    pub content: Option<String>,
    #[serde(default)]
    pub careers: Vec<CareerHistoryRequest>,
    /// Game names; each must exist in the seeded game catalog.
    #[serde(default)]
    #[schema(example = json!(["Valorant"]))]
    pub game_names: Vec<String>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CareerHistoryRequest {
    #[schema(example = "2022-2023")]
    pub period: String,
    #[schema(example = "SkyFoxes")]
    pub organization_name: String,
    #[schema(example = "Head Coach")]
    pub role_type: Option<String>,
    pub logo_img_url: Option<String>,
}

/// Partial update: only the scalar identity fields can be patched.
#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateInstructorRequest {
    pub name: Option<String>,
    pub current_title: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CareerHistoryResponse {
    pub id: i32,
    pub period: String,
    pub organization_name: String,
    pub role_type: Option<String>,
    pub logo_img_url: Option<String>,
}

impl From<crate::entity::career_history::Model> for CareerHistoryResponse {
    fn from(m: crate::entity::career_history::Model) -> Self {
        Self {
            id: m.id,
            period: m.period,
            organization_name: m.organization_name,
            role_type: m.role_type,
            logo_img_url: m.logo_img_url,
        }
    }
}

#[derive(Serialize, Clone, utoipa::ToSchema)]
pub struct GameResponse {
    pub id: i32,
    pub name: String,
    pub logo_url: String,
}

impl From<crate::entity::game::Model> for GameResponse {
    fn from(m: crate::entity::game::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            logo_url: m.logo_url,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct InstructorDetailResponse {
    pub id: i32,
    pub name: String,
    pub nickname: String,
    pub profile_img_url: Option<String>,
    pub current_title: Option<String>,
    pub sgea_logo_img_url: Option<String>,
    pub content: Option<String>,
    /// Career entries in stable display order.
    pub careers: Vec<CareerHistoryResponse>,
    pub games: Vec<GameResponse>,
    pub created_at: DateTime<Utc>,
}

/// List item with games eager-loaded; career entries are detail-only.
#[derive(Serialize, utoipa::ToSchema)]
pub struct InstructorListItem {
    pub id: i32,
    pub name: String,
    pub nickname: String,
    pub profile_img_url: Option<String>,
    pub current_title: Option<String>,
    pub games: Vec<GameResponse>,
}

pub fn validate_create_instructor(req: &CreateInstructorRequest) -> Result<(), AppError> {
    let name = req.name.trim();
    if name.is_empty() || name.chars().count() > 64 {
        return Err(AppError::Validation("Name must be 1-64 characters".into()));
    }
    let nickname = req.nickname.trim();
    if nickname.is_empty() || nickname.chars().count() > 64 {
        return Err(AppError::Validation(
            "Nickname must be 1-64 characters".into(),
        ));
    }
    for career in &req.careers {
        if career.period.trim().is_empty() {
            return Err(AppError::Validation(
                "Career period must not be empty".into(),
            ));
        }
        if career.organization_name.trim().is_empty() {
            return Err(AppError::Validation(
                "Career organization name must not be empty".into(),
            ));
        }
    }
    for game_name in &req.game_names {
        if game_name.trim().is_empty() {
            return Err(AppError::Validation("Game name must not be empty".into()));
        }
    }
    Ok(())
}

pub fn validate_update_instructor(req: &UpdateInstructorRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > 64 {
            return Err(AppError::Validation("Name must be 1-64 characters".into()));
        }
    }
    if let Some(ref title) = req.current_title
        && title.chars().count() > 256
    {
        return Err(AppError::Validation(
            "Title must be at most 256 characters".into(),
        ));
    }
    Ok(())
}
