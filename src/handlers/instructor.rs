use std::collections::{HashMap, HashSet};

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{career_history, game, instructor, instructor_game};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::instructor::{
    CareerHistoryResponse, CreateInstructorRequest, GameResponse, InstructorDetailResponse,
    InstructorListItem, UpdateInstructorRequest, validate_create_instructor,
    validate_update_instructor,
};
use crate::seed::ADMIN_ROLE;
use crate::state::AppState;
use crate::storage::delete_by_url;

#[utoipa::path(
    post,
    path = "/",
    tag = "Instructors",
    operation_id = "createInstructor",
    summary = "Create an instructor",
    description = "Creates an instructor together with its career history entries and game \
        tags in one transaction. Every game name must exist in the seeded catalog. \
        Requires the admin role.",
    request_body = CreateInstructorRequest,
    responses(
        (status = 201, description = "Instructor created", body = InstructorDetailResponse),
        (status = 400, description = "Validation error, e.g. unknown game (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(name = %payload.name))]
pub async fn create_instructor(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateInstructorRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_role(ADMIN_ROLE)?;
    validate_create_instructor(&payload)?;

    let txn = state.db.begin().await?;

    let new_instructor = instructor::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        nickname: Set(payload.nickname.trim().to_string()),
        profile_img_url: Set(payload.profile_img_url.clone()),
        current_title: Set(payload.current_title.clone()),
        sgea_logo_img_url: Set(payload.sgea_logo_img_url.clone()),
        content: Set(payload.content.clone()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let model = new_instructor.insert(&txn).await?;

    insert_children(&txn, model.id, &payload).await?;

    txn.commit().await?;

    let detail = load_detail(&state.db, model).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Instructors",
    operation_id = "listInstructors",
    summary = "List instructors",
    description = "Returns all instructors with their game tags eager-loaded in a constant \
        number of queries. Public.",
    responses(
        (status = 200, description = "List of instructors", body = [InstructorListItem]),
    ),
)]
#[instrument(skip(state))]
pub async fn list_instructors(
    State(state): State<AppState>,
) -> Result<Json<Vec<InstructorListItem>>, AppError> {
    let instructors = instructor::Entity::find()
        .order_by_asc(instructor::Column::Id)
        .all(&state.db)
        .await?;

    let ids: Vec<i32> = instructors.iter().map(|i| i.id).collect();
    let mut games_by_instructor = games_for(&state.db, &ids).await?;

    let items = instructors
        .into_iter()
        .map(|m| InstructorListItem {
            games: games_by_instructor.remove(&m.id).unwrap_or_default(),
            id: m.id,
            name: m.name,
            nickname: m.nickname,
            profile_img_url: m.profile_img_url,
            current_title: m.current_title,
        })
        .collect();

    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Instructors",
    operation_id = "getInstructor",
    summary = "Get an instructor by ID",
    description = "Returns the instructor with career entries (stable display order) and \
        game tags. Public.",
    params(("id" = i32, Path, description = "Instructor ID")),
    responses(
        (status = 200, description = "Instructor details", body = InstructorDetailResponse),
        (status = 404, description = "Instructor not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_instructor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<InstructorDetailResponse>, AppError> {
    let model = find_instructor(&state.db, id).await?;
    let detail = load_detail(&state.db, model).await?;

    Ok(Json(detail))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Instructors",
    operation_id = "updateInstructor",
    summary = "Update instructor identity fields",
    description = "Partially updates the instructor's name and/or current title; omitted \
        fields are left untouched. Requires the admin role.",
    params(("id" = i32, Path, description = "Instructor ID")),
    request_body = UpdateInstructorRequest,
    responses(
        (status = 200, description = "Instructor updated", body = InstructorDetailResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Instructor not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_instructor(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateInstructorRequest>,
) -> Result<Json<InstructorDetailResponse>, AppError> {
    auth_user.require_role(ADMIN_ROLE)?;
    validate_update_instructor(&payload)?;

    let model = find_instructor(&state.db, id).await?;

    let mut active: instructor::ActiveModel = model.into();
    if let Some(name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(title) = payload.current_title {
        active.current_title = Set(Some(title));
    }

    let updated = active.update(&state.db).await?;
    let detail = load_detail(&state.db, updated).await?;

    Ok(Json(detail))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Instructors",
    operation_id = "replaceInstructor",
    summary = "Replace an instructor",
    description = "Overwrites the instructor's scalar fields and fully replaces both child \
        collections: existing career entries and game tags are deleted and the supplied \
        sets inserted, all in one transaction. Requires the admin role.",
    params(("id" = i32, Path, description = "Instructor ID")),
    request_body = CreateInstructorRequest,
    responses(
        (status = 200, description = "Instructor replaced", body = InstructorDetailResponse),
        (status = 400, description = "Validation error, e.g. unknown game (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Instructor not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn replace_instructor(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<CreateInstructorRequest>,
) -> Result<Json<InstructorDetailResponse>, AppError> {
    auth_user.require_role(ADMIN_ROLE)?;
    validate_create_instructor(&payload)?;

    let model = find_instructor(&state.db, id).await?;

    let txn = state.db.begin().await?;

    let mut active: instructor::ActiveModel = model.into();
    active.name = Set(payload.name.trim().to_string());
    active.nickname = Set(payload.nickname.trim().to_string());
    active.profile_img_url = Set(payload.profile_img_url.clone());
    active.current_title = Set(payload.current_title.clone());
    active.sgea_logo_img_url = Set(payload.sgea_logo_img_url.clone());
    active.content = Set(payload.content.clone());
    let updated = active.update(&txn).await?;

    delete_children(&txn, id).await?;
    insert_children(&txn, id, &payload).await?;

    txn.commit().await?;

    let detail = load_detail(&state.db, updated).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Instructors",
    operation_id = "deleteInstructor",
    summary = "Delete an instructor",
    description = "Deletes the instructor and its career/game children in one transaction, \
        then best-effort deletes the blob-stored images the rows referenced. Blob \
        deletion failures are logged and never undo the database delete. Requires the \
        admin role.",
    params(("id" = i32, Path, description = "Instructor ID")),
    responses(
        (status = 204, description = "Instructor deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Instructor not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_instructor(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_role(ADMIN_ROLE)?;

    let model = find_instructor(&state.db, id).await?;

    // Collect referenced image URLs before the rows disappear.
    let careers = career_history::Entity::find()
        .filter(career_history::Column::InstructorId.eq(id))
        .all(&state.db)
        .await?;

    let mut image_urls: Vec<String> = Vec::new();
    image_urls.extend(model.profile_img_url.clone());
    image_urls.extend(model.sgea_logo_img_url.clone());
    image_urls.extend(careers.into_iter().filter_map(|c| c.logo_img_url));

    let txn = state.db.begin().await?;
    delete_children(&txn, id).await?;
    instructor::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    // Outside the transaction boundary: an orphaned blob is self-healing,
    // an orphaned DB row is not.
    for url in &image_urls {
        delete_by_url(&*state.store, Some(url)).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn find_instructor<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<instructor::Model, AppError> {
    instructor::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Instructor not found".into()))
}

/// Insert career and game children for an instructor.
async fn insert_children<C: ConnectionTrait>(
    db: &C,
    instructor_id: i32,
    payload: &CreateInstructorRequest,
) -> Result<(), AppError> {
    for career in &payload.careers {
        let model = career_history::ActiveModel {
            instructor_id: Set(instructor_id),
            period: Set(career.period.trim().to_string()),
            organization_name: Set(career.organization_name.trim().to_string()),
            role_type: Set(career.role_type.clone()),
            logo_img_url: Set(career.logo_img_url.clone()),
            ..Default::default()
        };
        model.insert(db).await?;
    }

    let mut seen_game_ids = HashSet::new();
    for game_name in &payload.game_names {
        let game_name = game_name.trim();
        let game = game::Entity::find()
            .filter(game::Column::Name.eq(game_name))
            .one(db)
            .await?
            .ok_or_else(|| AppError::Validation(format!("Unknown game: {game_name}")))?;

        if !seen_game_ids.insert(game.id) {
            continue;
        }

        let link = instructor_game::ActiveModel {
            instructor_id: Set(instructor_id),
            game_id: Set(game.id),
            ..Default::default()
        };
        link.insert(db).await?;
    }

    Ok(())
}

/// Delete both child collections of an instructor.
async fn delete_children<C: ConnectionTrait>(db: &C, instructor_id: i32) -> Result<(), AppError> {
    instructor_game::Entity::delete_many()
        .filter(instructor_game::Column::InstructorId.eq(instructor_id))
        .exec(db)
        .await?;
    career_history::Entity::delete_many()
        .filter(career_history::Column::InstructorId.eq(instructor_id))
        .exec(db)
        .await?;
    Ok(())
}

/// Load the full detail response for an instructor model.
async fn load_detail(
    db: &DatabaseConnection,
    model: instructor::Model,
) -> Result<InstructorDetailResponse, AppError> {
    let careers = career_history::Entity::find()
        .filter(career_history::Column::InstructorId.eq(model.id))
        .order_by_asc(career_history::Column::Id)
        .all(db)
        .await?;

    let mut games_by_instructor = games_for(db, &[model.id]).await?;

    Ok(InstructorDetailResponse {
        careers: careers.into_iter().map(CareerHistoryResponse::from).collect(),
        games: games_by_instructor.remove(&model.id).unwrap_or_default(),
        id: model.id,
        name: model.name,
        nickname: model.nickname,
        profile_img_url: model.profile_img_url,
        current_title: model.current_title,
        sgea_logo_img_url: model.sgea_logo_img_url,
        content: model.content,
        created_at: model.created_at,
    })
}

/// Batch-load game tags for a set of instructors: one query for the links,
/// one for the games, grouped in memory.
async fn games_for(
    db: &DatabaseConnection,
    instructor_ids: &[i32],
) -> Result<HashMap<i32, Vec<GameResponse>>, AppError> {
    if instructor_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let links = instructor_game::Entity::find()
        .filter(instructor_game::Column::InstructorId.is_in(instructor_ids.to_vec()))
        .all(db)
        .await?;

    let game_ids: HashSet<i32> = links.iter().map(|l| l.game_id).collect();
    let games: HashMap<i32, GameResponse> = game::Entity::find()
        .filter(game::Column::Id.is_in(game_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|g| (g.id, GameResponse::from(g)))
        .collect();

    let mut grouped: HashMap<i32, Vec<GameResponse>> = HashMap::new();
    for link in links {
        if let Some(game) = games.get(&link.game_id) {
            grouped
                .entry(link.instructor_id)
                .or_default()
                .push(game.clone());
        }
    }

    Ok(grouped)
}
