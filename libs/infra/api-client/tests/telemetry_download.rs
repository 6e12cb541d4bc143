// [libs/infra/api-client/tests/telemetry_download.rs]
//! Download + gzip-normalization + atomic rename coverage (spec §4.2, §4.8).

use skirmish_domain_models::CredentialSpec;
use skirmish_infra_api_client::{ApiClient, CredentialPool};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pool() -> CredentialPool {
    CredentialPool::new(vec![CredentialSpec {
        secret: "test-key".to_string(),
        rpm_limit: 100,
    }])
}

#[tokio::test]
async fn already_gzipped_body_is_stored_as_is() {
    let server = MockServer::start().await;
    let mut gz_body = Vec::new();
    {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;
        let mut encoder = GzEncoder::new(&mut gz_body, Compression::default());
        encoder.write_all(b"{\"events\":[]}").unwrap();
        encoder.finish().unwrap();
    }

    Mock::given(method("GET"))
        .and(path("/telemetry/already-gz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(gz_body.clone()))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), pool());
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("raw.json.gz");

    let size = client
        .download_telemetry(&format!("{}/telemetry/already-gz", server.uri()), &dest)
        .await
        .unwrap();

    assert!(dest.exists());
    assert_eq!(size, gz_body.len() as u64);
    let stored = std::fs::read(&dest).unwrap();
    assert_eq!(&stored[..2], &[0x1F, 0x8B]);
}

#[tokio::test]
async fn plain_body_is_recompressed_before_storing() {
    let server = MockServer::start().await;
    let plain_body = br#"{"events":[]}"#.to_vec();

    Mock::given(method("GET"))
        .and(path("/telemetry/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(plain_body))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), pool());
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("raw.json.gz");

    client
        .download_telemetry(&format!("{}/telemetry/plain", server.uri()), &dest)
        .await
        .unwrap();

    let stored = std::fs::read(&dest).unwrap();
    assert_eq!(&stored[..2], &[0x1F, 0x8B], "plain body must be gzip-wrapped");
}

#[tokio::test]
async fn not_found_surfaces_as_typed_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/telemetry/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), pool());
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("raw.json.gz");

    let result = client
        .download_telemetry(&format!("{}/telemetry/missing", server.uri()), &dest)
        .await;

    assert!(matches!(result, Err(skirmish_infra_api_client::ClientError::NotFound)));
}
