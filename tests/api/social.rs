use crate::helpers::spawn_app;
use crate::helpers::spawn_app_with_social;

/// Links from the document are exposed; unknown platforms are not.
#[tokio::test]
async fn social_links_loaded() {
    let app = spawn_app_with_social(
        r#"{"socialMedia": {"enabled": true, "links": {"twitter": "https://twitter.com/acme"}}}"#,
    )
    .await;

    assert_eq!(
        app.social().link_for("twitter"),
        Some("https://twitter.com/acme")
    );
    assert_eq!(app.social().link_for("youtube"), None);
}

/// No document at the configured path: the app still starts, links disabled.
#[tokio::test]
async fn social_document_missing() {
    let app = spawn_app().await;

    assert_eq!(app.social().link_for("twitter"), None);
    assert!(app.social().active_links().is_empty());
}

/// A malformed document is treated like a missing one.
#[tokio::test]
async fn social_document_malformed() {
    let app = spawn_app_with_social("{ this is not json").await;

    assert_eq!(app.social().link_for("twitter"), None);
    assert!(app.social().active_links().is_empty());
}
