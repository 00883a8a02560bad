//! End-to-end wiring: config file → adapters → stores → HTTP.

use std::io::Write;

use archives_xfer_lib::build_app_state;
use mockito::{Matcher, Server};
use tempfile::{NamedTempFile, TempDir};
use xfer_app::{AdminEntry, FetchOutcome};

fn write_config(base_url: &str, credential_path: &std::path::Path) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "[server]\nbase_url = \"{base_url}\"\n\n[errors]\nclear_after_ms = 2000\n\n[auth]\ncredential_path = \"{}\"\n",
        credential_path.display()
    )
    .unwrap();
    file
}

#[tokio::test]
async fn credential_from_file_unlocks_admin_calls() {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", "/api/admin/accessions")
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .match_header("cookie", "archives_xfer_api_session=tok|ada@virginia.edu")
        .with_status(200)
        .with_body(r#"{"total":1,"filteredTotal":0,"page":1,"pageSize":50,"accessions":[
            {"id":7,"accessionID":"c9abc","submitter":"Ada Lovelace","description":"Papers",
             "type":"new","genres":"Letters","digital":true,"physical":false,"submittedAt":null}]}"#)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let credential_path = dir.path().join("credential.json");
    std::fs::write(
        &credential_path,
        r#"{"archives_xfer_user":"{\"id\":3,\"firstName\":\"Ada\",\"email\":\"ada@virginia.edu\"}",
            "archives_xfer_api_session":"tok|ada@virginia.edu"}"#,
    )
    .unwrap();
    let config_file = write_config(&server.url(), &credential_path);

    let config = xfer_infra::load_config(config_file.path()).unwrap();
    let state = build_app_state(&config).unwrap();

    assert_eq!(
        state.auth.enter_admin("/admin").await.unwrap(),
        AdminEntry::Proceed
    );
    assert!(!credential_path.exists());
    assert_eq!(state.session.login_name().await, "Ada (ada@virginia.edu)");

    assert_eq!(state.admin.fetch_page().await, FetchOutcome::Applied);
    list.assert_async().await;
    assert_eq!(state.admin.accessions().await.len(), 1);
}

#[tokio::test]
async fn without_credential_admin_entry_redirects() {
    let server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let config_file = write_config(&server.url(), &dir.path().join("absent.json"));

    let config = xfer_infra::load_config(config_file.path()).unwrap();
    let state = build_app_state(&config).unwrap();

    match state.auth.enter_admin("/admin").await.unwrap() {
        AdminEntry::Redirect(url) => {
            assert_eq!(url.as_str(), format!("{}/authenticate?page=admin", server.url()))
        }
        AdminEntry::Proceed => panic!("expected a redirect"),
    }
}

#[tokio::test]
async fn reference_failure_reaches_the_error_channel() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/genres")
        .with_status(200)
        .with_body(r#"[{"id":1,"name":"Letters"}]"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/media-carriers")
        .with_status(502)
        .create_async()
        .await;
    for path in ["/api/transfer-methods", "/api/types"] {
        server
            .mock("GET", path)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;
    }
    let dir = TempDir::new().unwrap();
    let config_file = write_config(&server.url(), &dir.path().join("absent.json"));
    let state = build_app_state(&xfer_infra::load_config(config_file.path()).unwrap()).unwrap();

    state.submission.load_reference_data().await;

    let data = state.submission.reference_data().await;
    assert_eq!(data.genres.len(), 1);
    assert!(data.media_carriers.is_empty());
    assert_eq!(
        state.errors.message().as_deref(),
        Some("Internal Error: Unable to get media carriers")
    );
}
