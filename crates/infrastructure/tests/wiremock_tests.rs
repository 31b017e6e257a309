//! Integration tests for infrastructure crate
//!
//! Tests cover:
//! - Source adapter against a mock upstream
//! - S3 blob store adapter against a mock S3-compatible endpoint
//! - A full ingestion run wired with both adapters

use std::sync::Arc;

use application::ports::{BlobStorePort, SourcePort};
use application::{IngestService, IngestSettings};
use bytes::Bytes;
use chrono::{TimeZone, Utc};
use infrastructure::{OpenMeteoSourceAdapter, S3BlobStoreAdapter, StorageConfig};
use integration_openmeteo::OpenMeteoConfig;
use secrecy::SecretString;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BUCKET: &str = "energy-env-raw";

fn source_adapter() -> OpenMeteoSourceAdapter {
    OpenMeteoSourceAdapter::with_config(OpenMeteoConfig {
        timeout_secs: 5,
        ..Default::default()
    })
    .expect("adapter creation should succeed")
}

fn store_adapter(mock_server: &MockServer) -> S3BlobStoreAdapter {
    S3BlobStoreAdapter::new(StorageConfig {
        region: "auto".to_string(),
        endpoint: mock_server.uri(),
        access_key: Some("GOOG1TESTKEY".to_string()),
        secret_key: Some(SecretString::from("test-secret")),
        path_style: true,
    })
}

// ============================================================================
// Source Adapter Tests
// ============================================================================

mod source_adapter_tests {
    use super::*;

    #[tokio::test]
    async fn fetch_returns_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/air-quality"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"hourly": {}}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let url = format!("{}/v1/air-quality", mock_server.uri());
        let body = source_adapter().fetch(&url).await.unwrap();

        assert_eq!(body, Bytes::from_static(br#"{"hourly": {}}"#));
    }

    #[tokio::test]
    async fn non_success_status_is_fetch_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&mock_server)
            .await;

        let err = source_adapter()
            .fetch(&mock_server.uri())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "FetchError");
        assert!(err.to_string().contains("502"));
    }
}

// ============================================================================
// S3 Blob Store Adapter Tests
// ============================================================================

mod blob_store_adapter_tests {
    use super::*;

    #[tokio::test]
    async fn put_object_sends_path_style_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/energy-env-raw/raw/2024/01/05/openmeteo_20240105T101112Z.csv"))
            .and(header("content-type", "text/csv"))
            .and(body_string("time,pm10\n2024-01-01T00:00,5\n"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = store_adapter(&mock_server)
            .put_object(
                BUCKET,
                "raw/2024/01/05/openmeteo_20240105T101112Z.csv",
                Bytes::from_static(b"time,pm10\n2024-01-01T00:00,5\n"),
                "text/csv",
            )
            .await;

        assert!(result.is_ok(), "Expected success, got: {result:?}");
    }

    #[tokio::test]
    async fn rejected_upload_is_storage_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(
                ResponseTemplate::new(403).set_body_string("<Error><Code>AccessDenied</Code></Error>"),
            )
            .mount(&mock_server)
            .await;

        let err = store_adapter(&mock_server)
            .put_object(BUCKET, "raw/x.csv", Bytes::from_static(b"time\n"), "text/csv")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "StorageError");
        assert!(err.to_string().contains("403"));
    }
}

// ============================================================================
// End-to-end Ingestion Tests
// ============================================================================

mod ingestion_tests {
    use super::*;

    fn service(mock_server: &MockServer) -> IngestService {
        let source: Arc<dyn SourcePort> = Arc::new(source_adapter());
        let store: Arc<dyn BlobStorePort> = Arc::new(store_adapter(mock_server));
        IngestService::new(
            source,
            store,
            IngestSettings::new(BUCKET, format!("{}/v1/air-quality", mock_server.uri())),
        )
    }

    #[tokio::test]
    async fn run_fetches_transforms_and_uploads() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/air-quality"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "latitude": 48.86,
                "hourly": {
                    "time": ["2024-01-05T00:00", "2024-01-05T01:00"],
                    "pm10": [12.5, 11.0],
                    "ozone": [40]
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/energy-env-raw/raw/2024/01/05/openmeteo_20240105T101112Z.csv"))
            .and(body_string(
                "time,pm10,ozone\n2024-01-05T00:00,12.5,40\n2024-01-05T01:00,11.0,\n",
            ))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let at = Utc.with_ymd_and_hms(2024, 1, 5, 10, 11, 12).unwrap();
        let receipt = service(&mock_server).ingest_at(at).await.unwrap();

        assert_eq!(
            receipt.location(),
            "energy-env-raw/raw/2024/01/05/openmeteo_20240105T101112Z.csv"
        );
        assert_eq!(receipt.rows, 2);
    }

    #[tokio::test]
    async fn upstream_failure_skips_upload() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let err = service(&mock_server).ingest().await.unwrap_err();
        assert_eq!(err.kind(), "FetchError");
    }
}
