mod common;

use common::{setup_ready_server, MODEL_BYTES};
use meshcapade::{ExportFormat, MeshcapadeClient, MeshcapadeError};
use std::fs;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_export_and_download_round_trip() {
    let server = setup_ready_server("abc-123").await;
    let client =
        MeshcapadeClient::new_with_url("test_api_token".to_string(), &server.uri()).unwrap();

    let job = client
        .start_export("abc-123", ExportFormat::Glb)
        .await
        .unwrap();
    let status = client.wait_until_ready(&job).await.unwrap();
    let download_url = status.download_url.unwrap();

    let dest_dir = tempfile::tempdir().unwrap();
    let dest = dest_dir.path().join("abc-123.glb");
    let written = client.download(&download_url, &dest).await.unwrap();

    assert_eq!(written, dest);
    assert_eq!(fs::read(&written).unwrap(), MODEL_BYTES);
}

#[tokio::test]
async fn test_download_creates_parent_directories() {
    let server = setup_ready_server("abc-123").await;
    let client =
        MeshcapadeClient::new_with_url("test_api_token".to_string(), &server.uri()).unwrap();

    let download_url = format!("{}/exports/abc-123.glb", server.uri());
    let dest_dir = tempfile::tempdir().unwrap();
    let dest = dest_dir.path().join("nested/output/abc-123.glb");

    client.download(&download_url, &dest).await.unwrap();

    assert_eq!(fs::read(&dest).unwrap(), MODEL_BYTES);
}

#[tokio::test]
async fn test_download_surfaces_stale_reference() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exports/gone.glb"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client =
        MeshcapadeClient::new_with_url("test_api_token".to_string(), &server.uri()).unwrap();

    let download_url = format!("{}/exports/gone.glb", server.uri());
    let dest_dir = tempfile::tempdir().unwrap();
    let dest = dest_dir.path().join("gone.glb");
    let err = client.download(&download_url, &dest).await.unwrap_err();

    assert!(matches!(
        err,
        MeshcapadeError::ApiError { status, .. } if status == reqwest::StatusCode::NOT_FOUND
    ));
    // No file is written on a failed download.
    assert!(!dest.exists());
}
