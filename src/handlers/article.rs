use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::article;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::article::{
    ArticleCategory, ArticleDetailResponse, ArticleListItem, ArticleListQuery,
    CreateArticleRequest, DEFAULT_PRIORITY, validate_create_article,
};
use crate::seed::ADMIN_ROLE;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Articles",
    operation_id = "createArticle",
    summary = "Create an article",
    description = "Creates a news/event/recruit post. Requires the admin role.",
    request_body = CreateArticleRequest,
    responses(
        (status = 201, description = "Article created", body = ArticleDetailResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(title = %payload.title))]
pub async fn create_article(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateArticleRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_role(ADMIN_ROLE)?;
    validate_create_article(&payload)?;

    let new_article = article::ActiveModel {
        category: Set(payload.category.as_str().to_string()),
        title: Set(payload.title.trim().to_string()),
        sub_title: Set(payload.sub_title.trim().to_string()),
        content: Set(payload.content),
        thumbnail_url: Set(payload.thumbnail_url),
        posted_at: Set(payload.posted_at),
        start_date: Set(payload.start_date),
        end_date: Set(payload.end_date),
        is_popup: Set(payload.is_popup),
        priority: Set(payload.priority.unwrap_or(DEFAULT_PRIORITY)),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_article.insert(&state.db).await?;
    let safe_html = state.markdown.render(&model.content);

    Ok((
        StatusCode::CREATED,
        Json(ArticleDetailResponse::new(model, safe_html)),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Articles",
    operation_id = "listArticles",
    summary = "List articles",
    description = "Returns articles ordered by posted_at descending. An optional `category` \
        query parameter restricts the listing; absent means all categories. Content is \
        omitted from list items. Public.",
    params(ArticleListQuery),
    responses(
        (status = 200, description = "List of articles", body = [ArticleListItem]),
        (status = 400, description = "Unknown category (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ArticleListQuery>,
) -> Result<Json<Vec<ArticleListItem>>, AppError> {
    let mut select = article::Entity::find();

    if let Some(ref raw) = query.category {
        let category =
            ArticleCategory::from_str(raw.trim()).map_err(AppError::Validation)?;
        select = select.filter(article::Column::Category.eq(category.as_str()));
    }

    let data = list_items(select.order_by_desc(article::Column::PostedAt), &state.db).await?;

    Ok(Json(data))
}

#[utoipa::path(
    get,
    path = "/popups",
    tag = "Articles",
    operation_id = "listPopupArticles",
    summary = "List popup articles",
    description = "Returns popup-flagged articles ordered by priority ascending, then \
        posted_at descending. Public.",
    responses(
        (status = 200, description = "List of popup articles", body = [ArticleListItem]),
    ),
)]
#[instrument(skip(state))]
pub async fn list_popup_articles(
    State(state): State<AppState>,
) -> Result<Json<Vec<ArticleListItem>>, AppError> {
    let select = article::Entity::find()
        .filter(article::Column::IsPopup.eq(true))
        .order_by_asc(article::Column::Priority)
        .order_by_desc(article::Column::PostedAt);

    let data = list_items(select, &state.db).await?;

    Ok(Json(data))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Articles",
    operation_id = "getArticle",
    summary = "Get an article by ID",
    description = "Returns the article with its Markdown content rendered to sanitized \
        HTML. The HTML is produced on the fly and never persisted. Public.",
    params(("id" = i32, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Article details", body = ArticleDetailResponse),
        (status = 404, description = "Article not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ArticleDetailResponse>, AppError> {
    let model = find_article(&state.db, id).await?;
    let safe_html = state.markdown.render(&model.content);

    Ok(Json(ArticleDetailResponse::new(model, safe_html)))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Articles",
    operation_id = "updateArticle",
    summary = "Update an article",
    description = "Overwrites every scalar field of the article. Requires the admin role.",
    params(("id" = i32, Path, description = "Article ID")),
    request_body = CreateArticleRequest,
    responses(
        (status = 200, description = "Article updated", body = ArticleDetailResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Article not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_article(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<CreateArticleRequest>,
) -> Result<Json<ArticleDetailResponse>, AppError> {
    auth_user.require_role(ADMIN_ROLE)?;
    validate_create_article(&payload)?;

    let model = find_article(&state.db, id).await?;

    let mut active: article::ActiveModel = model.into();
    active.category = Set(payload.category.as_str().to_string());
    active.title = Set(payload.title.trim().to_string());
    active.sub_title = Set(payload.sub_title.trim().to_string());
    active.content = Set(payload.content);
    active.thumbnail_url = Set(payload.thumbnail_url);
    active.posted_at = Set(payload.posted_at);
    active.start_date = Set(payload.start_date);
    active.end_date = Set(payload.end_date);
    active.is_popup = Set(payload.is_popup);
    active.priority = Set(payload.priority.unwrap_or(DEFAULT_PRIORITY));

    let updated = active.update(&state.db).await?;
    let safe_html = state.markdown.render(&updated.content);

    Ok(Json(ArticleDetailResponse::new(updated, safe_html)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Articles",
    operation_id = "deleteArticle",
    summary = "Delete an article",
    description = "Hard-deletes the article. Requires the admin role.",
    params(("id" = i32, Path, description = "Article ID")),
    responses(
        (status = 204, description = "Article deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Article not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_article(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_role(ADMIN_ROLE)?;

    let result = article::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Article not found".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn find_article<C: ConnectionTrait>(db: &C, id: i32) -> Result<article::Model, AppError> {
    article::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Article not found".into()))
}

/// Run a listing select with the content column omitted.
async fn list_items(
    select: Select<article::Entity>,
    db: &DatabaseConnection,
) -> Result<Vec<ArticleListItem>, AppError> {
    let data = select
        .select_only()
        .column(article::Column::Id)
        .column(article::Column::Category)
        .column(article::Column::Title)
        .column(article::Column::SubTitle)
        .column(article::Column::ThumbnailUrl)
        .column(article::Column::PostedAt)
        .column(article::Column::IsPopup)
        .column(article::Column::Priority)
        .into_model::<ArticleListItem>()
        .all(db)
        .await?;

    Ok(data)
}
