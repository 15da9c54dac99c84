use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/admin", admin_routes())
        .nest("/articles", article_routes())
        .nest("/instructors", instructor_routes())
        .nest("/image", image_routes())
        .nest("/google-form", relay_routes())
}

fn admin_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::admin::login))
}

fn article_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::article::list_articles,
            handlers::article::create_article
        ))
        .routes(routes!(handlers::article::list_popup_articles))
        .routes(routes!(
            handlers::article::get_article,
            handlers::article::update_article,
            handlers::article::delete_article
        ))
}

fn instructor_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::instructor::list_instructors,
            handlers::instructor::create_instructor
        ))
        .routes(routes!(
            handlers::instructor::get_instructor,
            handlers::instructor::update_instructor,
            handlers::instructor::replace_instructor,
            handlers::instructor::delete_instructor
        ))
}

fn image_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::image::upload_image))
        .layer(handlers::image::image_upload_body_limit())
}

fn relay_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::relay::submit_application))
}
