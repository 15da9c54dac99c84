use std::collections::HashSet;
use std::sync::{Arc, LazyLock};
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect};
use tracing::{error, info, warn};

use crate::config::StorageConfig;
use crate::entity::{article, career_history, game, instructor};
use crate::storage::{ObjectStore, StorageError};
use crate::utils::object_url::object_key_from_url;

/// Pattern matching inline URLs in Markdown bodies. Deliberately permissive:
/// over-matching only ever adds keys to the live set, which can only protect
/// objects from deletion.
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https://[^\s)"]+"#).expect("valid URL pattern"));

/// Run the orphan sweeper as a background task.
///
/// Sleeps until the configured off-peak UTC hour, then sweeps every 24
/// hours. Runs cannot overlap: the loop awaits each sweep before the next
/// tick is processed.
pub async fn run_orphan_sweeper(
    db: DatabaseConnection,
    store: Arc<dyn ObjectStore>,
    config: StorageConfig,
) {
    let startup_delay = delay_until_hour(Utc::now(), config.sweep_hour_utc);

    info!(
        sweep_hour_utc = config.sweep_hour_utc,
        first_run_in_secs = startup_delay.as_secs(),
        "Starting orphan sweeper"
    );

    tokio::time::sleep(startup_delay).await;

    let mut interval = tokio::time::interval(StdDuration::from_secs(24 * 60 * 60));

    loop {
        interval.tick().await;

        if let Err(e) = sweep_once(&db, &*store, &config).await {
            error!(error = %e, "Orphan sweep failed");
        }
    }
}

/// Execute one full sweep: build the live set, then walk the store.
pub async fn sweep_once(
    db: &DatabaseConnection,
    store: &dyn ObjectStore,
    config: &StorageConfig,
) -> anyhow::Result<()> {
    info!("Orphan sweep started");

    let live = collect_live_keys(db).await?;
    info!(live_keys = live.len(), "Collected live object keys");

    let cutoff = Utc::now() - Duration::seconds(config.grace_secs);
    let stats = sweep_store(store, &live, cutoff).await?;

    info!(
        scanned = stats.scanned,
        deleted = stats.deleted,
        failed = stats.failed,
        "Orphan sweep finished"
    );

    Ok(())
}

#[derive(Debug, Default)]
pub struct SweepStats {
    pub scanned: u64,
    pub deleted: u64,
    pub failed: u64,
}

/// Build the set of storage keys referenced by any tracked content:
/// URL-valued columns across instructors, career histories, articles, and
/// the seeded game catalog, plus every URL embedded in article Markdown
/// bodies (inline content images have no dedicated column).
///
/// Key derivation goes through `object_key_from_url`, the same function the
/// gateway's delete path uses.
pub async fn collect_live_keys(db: &DatabaseConnection) -> Result<HashSet<String>, sea_orm::DbErr> {
    let mut live = HashSet::new();

    let profile_urls: Vec<String> = instructor::Entity::find()
        .select_only()
        .column(instructor::Column::ProfileImgUrl)
        .filter(instructor::Column::ProfileImgUrl.is_not_null())
        .into_tuple()
        .all(db)
        .await?;
    add_keys(&mut live, &profile_urls);

    let org_logo_urls: Vec<String> = instructor::Entity::find()
        .select_only()
        .column(instructor::Column::SgeaLogoImgUrl)
        .filter(instructor::Column::SgeaLogoImgUrl.is_not_null())
        .into_tuple()
        .all(db)
        .await?;
    add_keys(&mut live, &org_logo_urls);

    let career_logo_urls: Vec<String> = career_history::Entity::find()
        .select_only()
        .column(career_history::Column::LogoImgUrl)
        .filter(career_history::Column::LogoImgUrl.is_not_null())
        .into_tuple()
        .all(db)
        .await?;
    add_keys(&mut live, &career_logo_urls);

    let thumbnail_urls: Vec<String> = article::Entity::find()
        .select_only()
        .column(article::Column::ThumbnailUrl)
        .filter(article::Column::ThumbnailUrl.is_not_null())
        .into_tuple()
        .all(db)
        .await?;
    add_keys(&mut live, &thumbnail_urls);

    let game_logo_urls: Vec<String> = game::Entity::find()
        .select_only()
        .column(game::Column::LogoUrl)
        .into_tuple()
        .all(db)
        .await?;
    add_keys(&mut live, &game_logo_urls);

    let contents: Vec<String> = article::Entity::find()
        .select_only()
        .column(article::Column::Content)
        .into_tuple()
        .all(db)
        .await?;
    for content in &contents {
        for key in extract_markdown_keys(content) {
            live.insert(key);
        }
    }

    Ok(live)
}

/// Walk the full object listing page by page and delete every object that
/// is unreferenced AND older than `cutoff`. Per-object failures are logged
/// and do not abort the sweep.
pub async fn sweep_store(
    store: &dyn ObjectStore,
    live: &HashSet<String>,
    cutoff: DateTime<Utc>,
) -> Result<SweepStats, StorageError> {
    let mut stats = SweepStats::default();
    let mut token = None;

    loop {
        let page = store.list_page(token).await?;

        for obj in &page.objects {
            stats.scanned += 1;

            if live.contains(&obj.key) || obj.last_modified >= cutoff {
                continue;
            }

            info!(key = %obj.key, "Deleting orphan object");
            match store.delete(&obj.key).await {
                Ok(()) => stats.deleted += 1,
                Err(e) => {
                    warn!(key = %obj.key, error = %e, "Failed to delete orphan object");
                    stats.failed += 1;
                }
            }
        }

        match page.next_token {
            Some(t) => token = Some(t),
            None => break,
        }
    }

    Ok(stats)
}

/// Extract storage keys from every URL embedded in a Markdown body.
fn extract_markdown_keys(content: &str) -> Vec<String> {
    URL_RE
        .find_iter(content)
        .filter_map(|m| object_key_from_url(m.as_str()))
        .collect()
}

fn add_keys(live: &mut HashSet<String>, urls: &[String]) {
    for url in urls {
        if let Some(key) = object_key_from_url(url) {
            live.insert(key);
        }
    }
}

/// Duration from `now` until the next occurrence of `hour` (UTC).
fn delay_until_hour(now: DateTime<Utc>, hour: u32) -> StdDuration {
    let today_run = now
        .date_naive()
        .and_hms_opt(hour.min(23), 0, 0)
        .expect("hour in range")
        .and_utc();

    let next = if today_run > now {
        today_run
    } else {
        today_run + Duration::days(1)
    };

    (next - now).to_std().unwrap_or_default()
}
