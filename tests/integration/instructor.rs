use serde_json::json;

use coreclass::storage::ObjectStore;

use crate::common::{TestApp, routes};

fn full_body() -> serde_json::Value {
    json!({
        "name": "Jaewon Seo",
        "nickname": "Rexi",
        "profile_img_url": null,
        "current_title": "Head Coach",
        "careers": [
            {"period": "2018", "organization_name": "SkyFoxes", "role_type": "Coach"},
            {"period": "2022-2023", "organization_name": "Falcons", "role_type": "Head Coach"},
        ],
        "game_names": ["Valorant", "Overwatch 2"],
    })
}

mod create_and_detail {
    use super::*;

    #[tokio::test]
    async fn create_then_fetch_returns_all_children() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_instructor(&token, &full_body()).await;

        let res = app.get(&routes::instructor(id)).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["name"], "Jaewon Seo");
        assert_eq!(res.body["nickname"], "Rexi");

        // Careers keep insertion order.
        let careers = res.body["careers"].as_array().unwrap();
        assert_eq!(careers.len(), 2);
        assert_eq!(careers[0]["organization_name"], "SkyFoxes");
        assert_eq!(careers[1]["organization_name"], "Falcons");

        // Games are order-insensitive.
        let mut games: Vec<&str> = res.body["games"].as_array().unwrap().iter()
            .map(|g| g["name"].as_str().unwrap())
            .collect();
        games.sort();
        assert_eq!(games, vec!["Overwatch 2", "Valorant"]);
    }

    #[tokio::test]
    async fn unknown_game_fails_creation_and_persists_nothing() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let mut body = full_body();
        body["game_names"] = json!(["Valorant", "League of Legends"]);

        let res = app.post_with_token(routes::INSTRUCTORS, &body, &token).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert!(res.body["message"].as_str().unwrap().contains("League of Legends"));

        // The transaction rolled back: no instructor row survives.
        let res = app.get(routes::INSTRUCTORS).await;
        assert_eq!(res.body.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn duplicate_game_tags_collapse_to_one() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let mut body = full_body();
        body["game_names"] = json!(["Valorant", "Valorant"]);
        let id = app.create_instructor(&token, &body).await;

        let res = app.get(&routes::instructor(id)).await;
        assert_eq!(res.body["games"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_instructor_returns_404() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::instructor(999_999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn list_includes_games_for_every_instructor() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        app.create_instructor(&token, &full_body()).await;

        let mut second = full_body();
        second["name"] = json!("Second Coach");
        second["nickname"] = json!("Duo");
        second["game_names"] = json!(["Valorant"]);
        app.create_instructor(&token, &second).await;

        let res = app.get(routes::INSTRUCTORS).await;

        assert_eq!(res.status, 200);
        let items = res.body.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["games"].as_array().unwrap().len(), 2);
        assert_eq!(items[1]["games"].as_array().unwrap().len(), 1);
        // Career entries are detail-only.
        assert!(items[0].get("careers").is_none());
    }
}

mod updates {
    use super::*;

    #[tokio::test]
    async fn patch_updates_only_identity_fields() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_instructor(&token, &full_body()).await;

        let res = app
            .patch_with_token(
                &routes::instructor(id),
                &json!({"name": "Renamed", "current_title": "Lead Coach"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["name"], "Renamed");
        assert_eq!(res.body["current_title"], "Lead Coach");
        // Children are untouched by a patch.
        assert_eq!(res.body["careers"].as_array().unwrap().len(), 2);
        assert_eq!(res.body["games"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn put_fully_replaces_child_collections() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_instructor(&token, &full_body()).await;

        let res = app
            .put_with_token(
                &routes::instructor(id),
                &json!({
                    "name": "Jaewon Seo",
                    "nickname": "Rexi",
                    "current_title": "Director",
                    "careers": [
                        {"period": "2024", "organization_name": "NewOrg", "role_type": "Director"},
                    ],
                    "game_names": ["Overwatch 2"],
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);

        let res = app.get(&routes::instructor(id)).await;
        let careers = res.body["careers"].as_array().unwrap();
        assert_eq!(careers.len(), 1);
        assert_eq!(careers[0]["organization_name"], "NewOrg");

        let games = res.body["games"].as_array().unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0]["name"], "Overwatch 2");
    }

    #[tokio::test]
    async fn put_with_unknown_game_leaves_old_children_intact() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_instructor(&token, &full_body()).await;

        let mut body = full_body();
        body["game_names"] = json!(["Chess"]);
        let res = app.put_with_token(&routes::instructor(id), &body, &token).await;
        assert_eq!(res.status, 400);

        // Replacement is transactional: the original sets survive.
        let res = app.get(&routes::instructor(id)).await;
        assert_eq!(res.body["careers"].as_array().unwrap().len(), 2);
        assert_eq!(res.body["games"].as_array().unwrap().len(), 2);
    }
}

mod deletion {
    use super::*;

    #[tokio::test]
    async fn delete_cascades_children_and_removes_stored_images() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        // Stage blobs that the instructor rows will reference.
        app.store
            .put("uuid_profile.png", vec![1], "image/png")
            .await
            .unwrap();
        app.store
            .put("uuid_career_logo.png", vec![2], "image/png")
            .await
            .unwrap();

        let body = json!({
            "name": "Jaewon Seo",
            "nickname": "Rexi",
            "profile_img_url": format!("{}/uuid_profile.png", crate::common::PUBLIC_BASE_URL),
            "careers": [
                {
                    "period": "2018",
                    "organization_name": "SkyFoxes",
                    "logo_img_url": format!("{}/uuid_career_logo.png", crate::common::PUBLIC_BASE_URL),
                },
            ],
            "game_names": ["Valorant"],
        });
        let id = app.create_instructor(&token, &body).await;

        let res = app.delete_with_token(&routes::instructor(id), &token).await;
        assert_eq!(res.status, 204);

        let res = app.get(&routes::instructor(id)).await;
        assert_eq!(res.status, 404);

        // Referenced blobs were best-effort deleted after the DB commit.
        assert!(!app.store.contains("uuid_profile.png"));
        assert!(!app.store.contains("uuid_career_logo.png"));
    }

    #[tokio::test]
    async fn delete_of_missing_instructor_returns_404() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app.delete_with_token(&routes::instructor(999_999), &token).await;

        assert_eq!(res.status, 404);
    }
}
