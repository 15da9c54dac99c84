use sea_orm::*;
use tracing::info;

use crate::entity::{admin, game};
use crate::utils::hash;

/// Authority string held by the seeded admin account.
pub const ADMIN_ROLE: &str = "ROLE_ADMIN";

/// Static game catalog seeded on startup. Instructor creation only accepts
/// names present here; the orphan sweep treats these logo URLs as live.
pub const DEFAULT_GAMES: &[(&str, &str)] = &[
    (
        "Overwatch 2",
        "https://second-generation-upload-bucket.s3.ap-northeast-2.amazonaws.com/overwatch2_logo.png",
    ),
    (
        "Valorant",
        "https://second-generation-upload-bucket.s3.ap-northeast-2.amazonaws.com/valorant_logo.png",
    ),
];

/// Seed the `game` table with the static catalog.
pub async fn seed_games(db: &DatabaseConnection) -> Result<(), DbErr> {
    let mut games_inserted = 0u32;
    for &(name, logo_url) in DEFAULT_GAMES {
        let model = game::ActiveModel {
            name: Set(name.to_string()),
            logo_url: Set(logo_url.to_string()),
            ..Default::default()
        };

        let result = game::Entity::insert(model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(game::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(_) => games_inserted += 1,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if games_inserted > 0 {
        info!("Seeded {} new games", games_inserted);
    }

    Ok(())
}

/// Create the admin account if it does not exist yet.
pub async fn seed_admin(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> anyhow::Result<()> {
    let existing = admin::Entity::find()
        .filter(admin::Column::Username.eq(username))
        .one(db)
        .await?;

    if existing.is_some() {
        info!("Admin account '{}' already exists", username);
        return Ok(());
    }

    let password_hash = hash::hash_password(password)
        .map_err(|e| anyhow::anyhow!("Password hash error: {}", e))?;

    let model = admin::ActiveModel {
        username: Set(username.to_string()),
        password: Set(password_hash),
        role: Set(ADMIN_ROLE.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    model.insert(db).await?;

    info!("Seeded admin account '{}'", username);
    Ok(())
}
