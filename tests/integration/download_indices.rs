//! Integration tests for batch index downloads against a mock endpoint
//!
//! Unmatched requests get wiremock's default 404, which the fetcher reports as
//! an empty table, so only the URL variants mounted here return data.

use index_history_downloader::downloader::{BatchDownloader, DownloadError, TimestampZone};
use index_history_downloader::fetcher::{FetcherError, YahooHttpClient};
use index_history_downloader::EXPECTED_COLUMNS;
use reqwest::Client;
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const START: &str = "2020-01-01";
const END: &str = "2020-12-31";
const START_TS: &str = "1577836800";
const END_TS: &str = "1609372800";

const HEADER: &str = "Date,Open,High,Low,Close,Adj Close,Volume";

/// CSV body with `rows` daily rows whose close is `close`
fn csv_body(rows: usize, close: &str) -> String {
    let mut body = format!("{HEADER}\n");
    for day in 1..=rows {
        body.push_str(&format!(
            "2020-01-{day:02},100.0,110.0,90.0,{close},{close},1000\n"
        ));
    }
    body
}

async fn mount_csv(server: &MockServer, identifier: &str, body: String, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/v7/finance/download/{identifier}")))
        .and(query_param("period1", START_TS))
        .and(query_param("period2", END_TS))
        .and(query_param("interval", "1d"))
        .and(query_param("events", "history"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn downloader(server: &MockServer) -> BatchDownloader {
    BatchDownloader::new(Box::new(YahooHttpClient::with_client(
        Client::new(),
        server.uri(),
    )))
}

#[tokio::test]
async fn test_download_single_index() {
    let server = MockServer::start().await;
    mount_csv(&server, "%5EDJI", csv_body(3, "105.0"), 1).await;

    let tables = downloader(&server)
        .download(START, END, &["DJI"])
        .await
        .unwrap();

    assert_eq!(tables.len(), 1);
    let dji = &tables["dji"];
    assert_eq!(dji.len(), 3);
    assert!(dji.has_columns(&EXPECTED_COLUMNS));
}

#[tokio::test]
async fn test_fallback_uses_verbatim_table() {
    let server = MockServer::start().await;
    mount_csv(&server, "BTC-USD", csv_body(5, "7200.17"), 1).await;

    let tables = downloader(&server)
        .download(START, END, &["BTC-USD"])
        .await
        .unwrap();

    let btc = &tables["btc_usd"];
    assert_eq!(btc.len(), 5);
    assert_eq!(btc.column("Close").unwrap()[0], "7200.17");

    let requests = server.received_requests().await.unwrap();
    let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
    assert_eq!(
        paths,
        vec!["/v7/finance/download/%5EBTC-USD", "/v7/finance/download/BTC-USD"]
    );
}

#[tokio::test]
async fn test_header_only_response_triggers_fallback() {
    let server = MockServer::start().await;
    mount_csv(&server, "%5EDAX", format!("{HEADER}\n"), 1).await;
    mount_csv(&server, "DAX", csv_body(2, "13385.93"), 1).await;

    let tables = downloader(&server)
        .download(START, END, &["DAX"])
        .await
        .unwrap();

    assert_eq!(tables["dax"].len(), 2);
}

#[tokio::test]
async fn test_both_variants_empty_names_index() {
    let server = MockServer::start().await;

    let err = downloader(&server)
        .download(START, END, &["BOGUS-INVALID"])
        .await
        .unwrap_err();

    match &err {
        DownloadError::DownloadFailed { index } => assert_eq!(index, "BOGUS-INVALID"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_fail_fast_never_requests_later_indices() {
    let server = MockServer::start().await;
    mount_csv(&server, "%5EDJI", csv_body(2, "105.0"), 1).await;
    mount_csv(&server, "%5EDAX", csv_body(2, "105.0"), 0).await;
    mount_csv(&server, "DAX", csv_body(2, "105.0"), 0).await;

    let err = downloader(&server)
        .download(START, END, &["DJI", "BOGUS-INVALID", "DAX"])
        .await
        .unwrap_err();

    assert!(err.to_string().contains("BOGUS-INVALID"));
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_batch_order_independence() {
    let server = MockServer::start().await;
    mount_csv(&server, "%5EDJI", csv_body(2, "28868.80"), 2).await;
    mount_csv(&server, "%5EN225", csv_body(4, "23204.86"), 2).await;

    let forward = downloader(&server)
        .download(START, END, &["DJI", "N225"])
        .await
        .unwrap();
    let backward = downloader(&server)
        .download(START, END, &["N225", "DJI"])
        .await
        .unwrap();

    assert_eq!(forward.keys().collect::<Vec<_>>(), vec!["dji", "n225"]);
    assert_eq!(forward, backward);
}

#[tokio::test]
async fn test_invalid_arguments_issue_no_requests() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_string(csv_body(1, "1.0")))
        .expect(0)
        .mount(&server)
        .await;

    let downloader = downloader(&server);

    for indices in [vec!["DJI", ""], vec!["DJI/../x"], vec!["DJI", "N 225"]] {
        let err = downloader.download(START, END, &indices).await.unwrap_err();
        assert!(
            matches!(err, DownloadError::InvalidArgument(_)),
            "{indices:?}: {err}"
        );
    }

    let err = downloader
        .download("2020-13-01", END, &["DJI"])
        .await
        .unwrap_err();
    assert!(matches!(err, DownloadError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_malformed_body_propagates_parse_error() {
    let server = MockServer::start().await;
    mount_csv(&server, "%5EHSI", format!("{HEADER}\n2020-01-02,1,2\n"), 1).await;

    let err = downloader(&server)
        .download(START, END, &["HSI"])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DownloadError::FetcherError(FetcherError::ParseError(_))
    ));
}

#[tokio::test]
async fn test_network_error_propagates() {
    // Reserve a port, then release it so nothing is listening there
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let uri = format!("http://127.0.0.1:{port}");

    let downloader =
        BatchDownloader::new(Box::new(YahooHttpClient::with_client(Client::new(), uri)));
    let err = downloader.download(START, END, &["DJI"]).await.unwrap_err();

    assert!(matches!(
        err,
        DownloadError::FetcherError(FetcherError::NetworkError(_))
    ));
}

#[tokio::test]
async fn test_local_timezone_shifts_timestamps_by_host_offset() {
    use chrono::{Local, NaiveDate, TimeZone};

    let server = MockServer::start().await;
    let midnight = NaiveDate::from_ymd_opt(2020, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let local_start = Local
        .from_local_datetime(&midnight)
        .earliest()
        .unwrap()
        .timestamp();

    Mock::given(method("GET"))
        .and(path("/v7/finance/download/%5EDJI"))
        .and(query_param("period1", local_start.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(csv_body(1, "1.0")))
        .expect(1)
        .mount(&server)
        .await;

    let tables = downloader(&server)
        .with_timestamp_zone(TimestampZone::Local)
        .download(START, END, &["DJI"])
        .await
        .unwrap();

    assert_eq!(tables["dji"].len(), 1);
}

#[tokio::test]
async fn test_caret_prefixed_index_falls_back_to_verbatim() {
    let server = MockServer::start().await;
    mount_csv(&server, "^GSPC", csv_body(3, "3257.85"), 1).await;

    let tables = downloader(&server)
        .download(START, END, &["^GSPC"])
        .await
        .unwrap();

    assert_eq!(tables["^gspc"].len(), 3);
    let requests = server.received_requests().await.unwrap();
    let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
    assert_eq!(
        paths,
        vec!["/v7/finance/download/%5E%5EGSPC", "/v7/finance/download/^GSPC"]
    );
}

#[tokio::test]
async fn test_repeated_index_is_downloaded_again() {
    let server = MockServer::start().await;
    mount_csv(&server, "%5EDJI", csv_body(2, "28868.80"), 2).await;

    let tables = downloader(&server)
        .download(START, END, &["DJI", "DJI"])
        .await
        .unwrap();

    assert_eq!(tables.len(), 1);
    assert_eq!(tables["dji"].len(), 2);
}
