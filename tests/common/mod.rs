use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub const MODEL_BYTES: &[u8] = b"glTF dummy model data";

/// Builds the JSON:API envelope the export endpoint answers with.
pub fn export_document(state: &str, download_url: Option<&str>) -> serde_json::Value {
    let url = match download_url {
        Some(path) => json!({ "path": path }),
        None => serde_json::Value::Null,
    };

    json!({
        "data": {
            "id": "export-1",
            "type": "export",
            "attributes": {
                "state": state,
                "url": url
            }
        }
    })
}

/// Starts a server whose export endpoint immediately reports READY and whose
/// download endpoint serves [`MODEL_BYTES`].
#[allow(dead_code)]
pub async fn setup_ready_server(asset_id: &str) -> MockServer {
    let server = MockServer::start().await;
    let download_url = format!("{}/exports/{}.glb", server.uri(), asset_id);

    Mock::given(method("POST"))
        .and(path(format!("/avatars/{}/export", asset_id)))
        .and(header("authorization", "Bearer test_api_token"))
        .and(body_json(json!({ "format": "GLB", "anim": "scan" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(export_document("READY", Some(&download_url))),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/exports/{}.glb", asset_id)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(MODEL_BYTES))
        .mount(&server)
        .await;

    server
}
