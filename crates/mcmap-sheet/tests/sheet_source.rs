//! Integration tests for `SheetSource` caching and the empty fallback.

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mcmap_core::StatusClass;
use mcmap_sheet::{Column, SheetCache, SheetClient, SheetError, SheetSource};

const TSV: &str = "Nom Établissement\tVille\tStatut\tCA\tLatitude\tLongitude\n\
Clinique A\tLyon\tRésilié\t1 200,50 €\t45.76\t4.83\n\
Centre B\tParis\tClient fidèle\tabc\t48.85\t2.35\n";

fn source(url: String, ttl: Duration) -> SheetSource {
    let client = SheetClient::new(5, "mcmap-test/0.1", 0, 0).expect("client");
    SheetSource::new(client, url, SheetCache::new(ttl))
}

#[tokio::test]
async fn load_normalizes_and_reports_columns() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sheet.tsv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TSV))
        .mount(&server)
        .await;

    let source = source(format!("{}/sheet.tsv", server.uri()), Duration::from_secs(300));
    let dataset = source.load().await.expect("load");

    assert!(dataset.fetched_at.is_some());
    assert_eq!(dataset.establishments.len(), 2);
    assert_eq!(
        dataset.establishments[0].status_class,
        StatusClass::Terminated
    );
    assert_eq!(dataset.establishments[1].status_class, StatusClass::Client);
    assert!(dataset.columns.missing.contains(&Column::Services));
    assert!(!dataset.columns.missing.contains(&Column::Status));
}

#[tokio::test]
async fn fresh_cache_serves_without_refetching() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sheet.tsv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TSV))
        .expect(1)
        .mount(&server)
        .await;

    let source = source(format!("{}/sheet.tsv", server.uri()), Duration::from_secs(300));
    let first = source.load().await.expect("first load");
    let second = source.load().await.expect("second load");
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn invalidate_forces_a_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sheet.tsv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TSV))
        .expect(2)
        .mount(&server)
        .await;

    let source = source(format!("{}/sheet.tsv", server.uri()), Duration::from_secs(300));
    let first = source.load().await.expect("first load");
    source.invalidate().await;
    let second = source.load().await.expect("second load");
    assert!(!Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn zero_ttl_refetches_every_time() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sheet.tsv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TSV))
        .expect(2)
        .mount(&server)
        .await;

    let source = source(format!("{}/sheet.tsv", server.uri()), Duration::ZERO);
    source.load().await.expect("first load");
    source.load().await.expect("second load");
}

#[tokio::test]
async fn load_or_empty_degrades_to_empty_dataset_with_warning() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sheet.tsv"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = source(format!("{}/sheet.tsv", server.uri()), Duration::from_secs(300));
    let loaded = source.load_or_empty().await;

    assert!(loaded.dataset.establishments.is_empty());
    assert!(loaded.dataset.fetched_at.is_none());
    let warning = loaded.warning.expect("warning on failure");
    assert!(warning.contains("sheet not found"), "warning: {warning}");
}

#[tokio::test]
async fn warning_does_not_leak_the_publish_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/spreadsheets/d/e/2PACX-SECRET/pub"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/spreadsheets/d/e/2PACX-SECRET/pub?output=tsv", server.uri());
    let source = source(url, Duration::from_secs(300));
    let warning = source.load_or_empty().await.warning.expect("warning on failure");

    assert!(!warning.contains("2PACX-SECRET"), "warning: {warning}");
    assert!(!warning.contains(&server.uri()), "warning: {warning}");
    assert!(warning.contains("HTTP 404"), "warning: {warning}");
}

#[tokio::test]
async fn concurrent_callers_share_one_failed_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sheet.tsv"))
        .respond_with(ResponseTemplate::new(503).set_delay(Duration::from_millis(300)))
        .expect(2)
        .mount(&server)
        .await;

    let client = SheetClient::new(5, "mcmap-test/0.1", 1, 0).expect("client");
    let source = SheetSource::new(
        client,
        format!("{}/sheet.tsv", server.uri()),
        SheetCache::new(Duration::from_secs(300)),
    );

    let (a, b, c, d) = tokio::join!(
        source.load_or_empty(),
        source.load_or_empty(),
        source.load_or_empty(),
        source.load_or_empty(),
    );
    for loaded in [a, b, c, d] {
        assert!(loaded.dataset.establishments.is_empty());
        let warning = loaded.warning.expect("warning on failure");
        assert!(warning.contains("HTTP status 503"), "warning: {warning}");
    }
}

#[tokio::test]
async fn remembered_failure_skips_the_host_until_invalidated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sheet.tsv"))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sheet.tsv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TSV))
        .expect(1)
        .mount(&server)
        .await;

    let source = source(format!("{}/sheet.tsv", server.uri()), Duration::from_secs(300));
    assert!(matches!(
        source.load().await,
        Err(SheetError::NotFound { .. })
    ));
    assert!(matches!(
        source.load().await,
        Err(SheetError::RecentlyFailed { .. })
    ));

    source.invalidate().await;
    let dataset = source.load().await.expect("load after invalidate");
    assert_eq!(dataset.establishments.len(), 2);
}

#[tokio::test]
async fn load_or_empty_has_no_warning_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sheet.tsv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TSV))
        .mount(&server)
        .await;

    let source = source(format!("{}/sheet.tsv", server.uri()), Duration::from_secs(300));
    let loaded = source.load_or_empty().await;
    assert!(loaded.warning.is_none());
    assert_eq!(loaded.dataset.establishments.len(), 2);
}
