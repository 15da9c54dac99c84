use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::markdown::MarkdownRenderer;
use crate::storage::ObjectStore;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub store: Arc<dyn ObjectStore>,
    pub markdown: Arc<MarkdownRenderer>,
    pub http: reqwest::Client,
    pub config: AppConfig,
}
