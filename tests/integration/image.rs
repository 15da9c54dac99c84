use crate::common::{PUBLIC_BASE_URL, TestApp, routes};

#[tokio::test]
async fn upload_stores_the_file_and_returns_a_public_url() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let res = app
        .upload_with_token(routes::IMAGE_UPLOAD, "team photo.png", vec![1, 2, 3], &token)
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert!(res.text.starts_with(PUBLIC_BASE_URL), "url: {}", res.text);

    // One stored object whose key keeps the readable filename suffix.
    let keys = app.store.keys();
    assert_eq!(keys.len(), 1);
    assert!(keys[0].ends_with("_team photo.png"), "key: {}", keys[0]);
    assert_eq!(app.store.get(&keys[0]), Some(vec![1, 2, 3]));

    // The returned URL resolves back to the stored key.
    let derived = coreclass::utils::object_url::object_key_from_url(&res.text).unwrap();
    assert_eq!(derived, keys[0]);
}

#[tokio::test]
async fn two_uploads_of_the_same_filename_get_distinct_keys() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let first = app
        .upload_with_token(routes::IMAGE_UPLOAD, "logo.png", vec![1], &token)
        .await;
    let second = app
        .upload_with_token(routes::IMAGE_UPLOAD, "logo.png", vec![2], &token)
        .await;

    assert_eq!(first.status, 200);
    assert_eq!(second.status, 200);
    assert_ne!(first.text, second.text);
    assert_eq!(app.store.len(), 2);
}

#[tokio::test]
async fn empty_file_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let res = app
        .upload_with_token(routes::IMAGE_UPLOAD, "empty.png", vec![], &token)
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn filenames_with_path_components_are_rejected() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let res = app
        .upload_with_token(routes::IMAGE_UPLOAD, "../escape.png", vec![1], &token)
        .await;

    assert_eq!(res.status, 400);
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn upload_without_token_returns_401() {
    let app = TestApp::spawn().await;

    let part = reqwest::multipart::Part::bytes(vec![1, 2, 3])
        .file_name("photo.png")
        .mime_str("image/png")
        .unwrap();
    let form = reqwest::multipart::Form::new().part("file", part);

    let res = app
        .client
        .post(format!("http://{}{}", app.addr, routes::IMAGE_UPLOAD))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 401);
    assert!(app.store.is_empty());
}
