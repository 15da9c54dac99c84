use serde_json::json;

use crate::common::{TestApp, routes};

mod listing {
    use super::*;

    #[tokio::test]
    async fn lists_all_articles_newest_first() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        app.create_article(&token, "Oldest", "2025-01-01").await;
        app.create_article(&token, "Newest", "2025-03-01").await;
        app.create_article(&token, "Middle", "2025-02-01").await;

        let res = app.get(routes::ARTICLES).await;

        assert_eq!(res.status, 200);
        let titles: Vec<&str> = res.body.as_array().unwrap().iter()
            .map(|a| a["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
    }

    #[tokio::test]
    async fn category_filter_returns_only_that_category_in_order() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        app.create_article(&token, "News post", "2025-01-01").await;

        let res = app
            .post_with_token(
                routes::ARTICLES,
                &json!({
                    "category": "EVENT",
                    "title": "Event post",
                    "sub_title": "Sub",
                    "content": "Body",
                    "posted_at": "2025-02-01",
                }),
                &token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let res = app.get(&format!("{}?category=EVENT", routes::ARTICLES)).await;

        assert_eq!(res.status, 200);
        let items = res.body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "Event post");
        assert_eq!(items[0]["category"], "EVENT");
    }

    #[tokio::test]
    async fn unknown_category_filter_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app.get(&format!("{}?category=SPORTS", routes::ARTICLES)).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn list_items_omit_the_content_field() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        app.create_article(&token, "Post", "2025-01-01").await;

        let res = app.get(routes::ARTICLES).await;
        let items = res.body.as_array().unwrap();
        assert!(items[0].get("content").is_none());
        assert!(items[0].get("safe_html_content").is_none());
    }
}

mod popups {
    use super::*;

    async fn create_popup(app: &TestApp, token: &str, title: &str, priority: i32, posted_at: &str) {
        let res = app
            .post_with_token(
                routes::ARTICLES,
                &json!({
                    "category": "EVENT",
                    "title": title,
                    "sub_title": "Sub",
                    "content": "Body",
                    "posted_at": posted_at,
                    "is_popup": true,
                    "priority": priority,
                }),
                token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
    }

    #[tokio::test]
    async fn popups_are_ordered_by_priority_then_recency() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        // Not a popup; must not appear.
        app.create_article(&token, "Plain", "2025-06-01").await;

        create_popup(&app, &token, "Low priority", 5, "2025-01-01").await;
        create_popup(&app, &token, "Top old", 1, "2025-01-01").await;
        create_popup(&app, &token, "Top new", 1, "2025-02-01").await;

        let res = app.get(routes::ARTICLE_POPUPS).await;

        assert_eq!(res.status, 200);
        let titles: Vec<&str> = res.body.as_array().unwrap().iter()
            .map(|a| a["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Top new", "Top old", "Low priority"]);
    }

    #[tokio::test]
    async fn priority_defaults_to_99() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::ARTICLES,
                &json!({
                    "category": "EVENT",
                    "title": "Popup",
                    "sub_title": "Sub",
                    "content": "Body",
                    "posted_at": "2025-01-01",
                    "is_popup": true,
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["priority"], 99);
    }
}

mod detail {
    use super::*;

    #[tokio::test]
    async fn renders_markdown_and_strips_script() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::ARTICLES,
                &json!({
                    "category": "NEWS",
                    "title": "Render test",
                    "sub_title": "Sub",
                    "content": "# Title\n* item\n<script>alert(1)</script>",
                    "posted_at": "2025-01-01",
                }),
                &token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        let id = res.id();

        let res = app.get(&routes::article(id)).await;

        assert_eq!(res.status, 200);
        let html = res.body["safe_html_content"].as_str().unwrap();
        assert!(html.contains("<h1>"));
        assert!(html.contains("<li>"));
        assert!(!html.contains("<script"));
    }

    #[tokio::test]
    async fn missing_article_returns_404() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::article(999_999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod update_and_delete {
    use super::*;

    #[tokio::test]
    async fn put_overwrites_all_scalar_fields() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_article(&token, "Before", "2025-01-01").await;

        let res = app
            .put_with_token(
                &routes::article(id),
                &json!({
                    "category": "RECRUIT",
                    "title": "After",
                    "sub_title": "New sub",
                    "content": "New body",
                    "thumbnail_url": "https://cdn.example.com/thumb.png",
                    "posted_at": "2025-05-05",
                    "start_date": "2025-05-10",
                    "end_date": "2025-05-20",
                    "is_popup": true,
                    "priority": 3,
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["category"], "RECRUIT");
        assert_eq!(res.body["title"], "After");
        assert_eq!(res.body["thumbnail_url"], "https://cdn.example.com/thumb.png");
        assert_eq!(res.body["start_date"], "2025-05-10");
        assert_eq!(res.body["is_popup"], true);
        assert_eq!(res.body["priority"], 3);
    }

    #[tokio::test]
    async fn update_of_missing_article_returns_404() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .put_with_token(
                &routes::article(999_999),
                &json!({
                    "category": "NEWS",
                    "title": "T",
                    "sub_title": "S",
                    "content": "C",
                    "posted_at": "2025-01-01",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn delete_removes_the_article() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_article(&token, "Doomed", "2025-01-01").await;

        let res = app.delete_with_token(&routes::article(id), &token).await;
        assert_eq!(res.status, 204);

        let res = app.get(&routes::article(id)).await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn delete_of_missing_article_returns_404() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app.delete_with_token(&routes::article(999_999), &token).await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn validation_rejects_blank_content() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::ARTICLES,
                &json!({
                    "category": "NEWS",
                    "title": "T",
                    "sub_title": "S",
                    "content": "   ",
                    "posted_at": "2025-01-01",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}
