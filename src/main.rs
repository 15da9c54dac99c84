use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use aws_config::{BehaviorVersion, Region};
use tracing::{Level, info};

use coreclass::config::AppConfig;
use coreclass::jobs::orphan_sweep;
use coreclass::markdown::MarkdownRenderer;
use coreclass::state::AppState;
use coreclass::storage::{ObjectStore, s3::S3ObjectStore};
use coreclass::{build_router, database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = database::init_db(&config.database.url).await?;
    seed::seed_games(&db).await?;
    seed::seed_admin(&db, &config.auth.admin_username, &config.auth.admin_password).await?;

    let aws_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.storage.region.clone()))
        .load()
        .await;
    let store: Arc<dyn ObjectStore> = Arc::new(S3ObjectStore::new(
        aws_sdk_s3::Client::new(&aws_config),
        config.storage.bucket.clone(),
    ));

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.relay.timeout_secs))
        .build()?;

    let state = AppState {
        db: db.clone(),
        store: store.clone(),
        markdown: Arc::new(MarkdownRenderer::new()),
        http,
        config,
    };

    tokio::spawn(orphan_sweep::run_orphan_sweeper(
        db,
        store,
        state.config.storage.clone(),
    ));

    let addr = SocketAddr::new(
        state.config.server.host.parse()?,
        state.config.server.port,
    );
    let app = build_router(state);

    info!("Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
