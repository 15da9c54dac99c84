use chrono::{Duration, Utc};
use serde_json::json;

use coreclass::jobs::orphan_sweep::{collect_live_keys, sweep_store};
use coreclass::storage::ObjectStore;

use crate::common::{PUBLIC_BASE_URL, TestApp, routes};

#[tokio::test]
async fn sweep_deletes_aged_orphans_and_protects_every_reference_source() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let two_days_ago = Utc::now() - Duration::days(2);

    // Objects referenced from tracked columns and content.
    for key in [
        "uuid_thumb.png",
        "uuid_inline.png",
        "uuid_profile.png",
        "uuid_career.png",
        "valorant_logo.png", // referenced only by the seeded game catalog
        "orphan_old.png",
        "orphan_new.png",
    ] {
        app.store.put(key, vec![0u8], "image/png").await.unwrap();
        app.store.backdate(key, two_days_ago);
    }
    // A fresh upload not yet linked to any row must survive via the grace window.
    app.store.backdate("orphan_new.png", Utc::now());

    let res = app
        .post_with_token(
            routes::ARTICLES,
            &json!({
                "category": "NEWS",
                "title": "With images",
                "sub_title": "Sub",
                "content": format!(
                    "Intro ![inline]({PUBLIC_BASE_URL}/uuid_inline.png) outro"
                ),
                "thumbnail_url": format!("{PUBLIC_BASE_URL}/uuid_thumb.png"),
                "posted_at": "2025-01-01",
            }),
            &token,
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);

    let res = app
        .post_with_token(
            routes::INSTRUCTORS,
            &json!({
                "name": "Jaewon Seo",
                "nickname": "Rexi",
                "profile_img_url": format!("{PUBLIC_BASE_URL}/uuid_profile.png"),
                "careers": [
                    {
                        "period": "2018",
                        "organization_name": "SkyFoxes",
                        "logo_img_url": format!("{PUBLIC_BASE_URL}/uuid_career.png"),
                    },
                ],
                "game_names": ["Valorant"],
            }),
            &token,
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);

    let live = collect_live_keys(&app.db).await.unwrap();
    let cutoff = Utc::now() - Duration::seconds(app.config.storage.grace_secs);
    let stats = sweep_store(&*app.store, &live, cutoff).await.unwrap();

    assert_eq!(stats.scanned, 7);
    assert_eq!(stats.deleted, 1);
    assert_eq!(stats.failed, 0);

    // The only deleted object is the aged, unreferenced one.
    assert!(!app.store.contains("orphan_old.png"));

    // Column references, Markdown body references, the seeded game catalog,
    // and young objects are all protected.
    for key in [
        "uuid_thumb.png",
        "uuid_inline.png",
        "uuid_profile.png",
        "uuid_career.png",
        "valorant_logo.png",
        "orphan_new.png",
    ] {
        assert!(app.store.contains(key), "expected {key} to survive");
    }
}

#[tokio::test]
async fn live_set_follows_content_updates() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let id = app
        .post_with_token(
            routes::ARTICLES,
            &json!({
                "category": "NEWS",
                "title": "Post",
                "sub_title": "Sub",
                "content": format!("![a]({PUBLIC_BASE_URL}/uuid_before.png)"),
                "posted_at": "2025-01-01",
            }),
            &token,
        )
        .await
        .id();

    let live = collect_live_keys(&app.db).await.unwrap();
    assert!(live.contains("uuid_before.png"));

    // Rewriting the body swaps which inline image is protected.
    let res = app
        .put_with_token(
            &routes::article(id),
            &json!({
                "category": "NEWS",
                "title": "Post",
                "sub_title": "Sub",
                "content": format!("![a]({PUBLIC_BASE_URL}/uuid_after.png)"),
                "posted_at": "2025-01-01",
            }),
            &token,
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);

    let live = collect_live_keys(&app.db).await.unwrap();
    assert!(!live.contains("uuid_before.png"));
    assert!(live.contains("uuid_after.png"));
}
