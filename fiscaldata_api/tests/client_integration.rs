use fiscaldata_api::{Client, DatasetQuery, Error, PaginatedResponse, RawRecord};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[tokio::test]
async fn get_avg_interest_rates_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("avg_interest_rates.json");

    Mock::given(method("GET"))
        .and(path("/v2/accounting/od/avg_interest_rates"))
        .and(query_param("page[number]", "1"))
        .and(query_param("page[size]", "10000"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_avg_interest_rates(&DatasetQuery::default()).await;
    assert!(result.is_ok());

    let page: PaginatedResponse<RawRecord> = serde_json::from_str(&result.unwrap()).unwrap();
    assert_eq!(page.data.len(), 4);
    assert_eq!(
        page.data[0].get("security_desc").and_then(|v| v.as_str()),
        Some("Treasury Bills")
    );
}

#[tokio::test]
async fn get_debt_outstanding_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("mspd_table_1.json");

    Mock::given(method("GET"))
        .and(path("/v1/debt/mspd/mspd_table_1"))
        .and(query_param("page[number]", "1"))
        .and(query_param("page[size]", "10000"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_debt_outstanding(&DatasetQuery::default()).await;
    assert!(result.is_ok());

    let page: PaginatedResponse<RawRecord> = serde_json::from_str(&result.unwrap()).unwrap();
    assert_eq!(page.data.len(), 15);
    assert_eq!(
        page.data[1]
            .get("security_class_desc")
            .and_then(|v| v.as_str()),
        Some("Total Marketable")
    );
}

#[tokio::test]
async fn get_debt_limit_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("mspd_table_2.json");

    Mock::given(method("GET"))
        .and(path("/v1/debt/mspd/mspd_table_2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_debt_limit(&DatasetQuery::default()).await;
    assert!(result.is_ok());

    let page: PaginatedResponse<RawRecord> = serde_json::from_str(&result.unwrap()).unwrap();
    assert_eq!(page.data.len(), 15);
    assert_eq!(
        page.data[3]
            .get("debt_limit_class1_desc")
            .and_then(|v| v.as_str()),
        Some("Statutory Debt Limit")
    );
}

#[tokio::test]
async fn fetch_server_error_surfaces_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/accounting/od/avg_interest_rates"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_avg_interest_rates(&DatasetQuery::default()).await;

    match result {
        Err(Error::HttpStatus { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.contains("Internal Server Error"));
        }
        other => panic!("expected HttpStatus error, got {:?}", other.map(|_| "ok")),
    }
}

#[tokio::test]
async fn fetch_server_error_truncates_long_body() {
    let mock_server = MockServer::start().await;
    // 2001 bytes: the two-byte 'é' straddles the 2000-byte truncation cut.
    let long_body = format!("{}é", "a".repeat(1999));

    Mock::given(method("GET"))
        .and(path("/v2/accounting/od/avg_interest_rates"))
        .respond_with(ResponseTemplate::new(500).set_body_string(long_body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_avg_interest_rates(&DatasetQuery::default()).await;

    match result {
        Err(Error::HttpStatus { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.starts_with("aaa"));
            assert!(body.ends_with("...[truncated]"));
            assert!(!body.contains('é'));
        }
        other => panic!("expected HttpStatus error, got {:?}", other.map(|_| "ok")),
    }
}

#[tokio::test]
async fn fetch_empty_body_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/debt/mspd/mspd_table_1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("  \n"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_debt_outstanding(&DatasetQuery::default()).await;
    assert!(matches!(result, Err(Error::EmptyResponse)));
}

#[tokio::test]
async fn fetch_rejects_empty_endpoint_path() {
    let client = Client::new();

    let result = client.fetch("", &DatasetQuery::default()).await;
    assert!(matches!(result, Err(Error::InvalidEndpoint(_))));

    let result = client.fetch("///", &DatasetQuery::default()).await;
    assert!(matches!(result, Err(Error::InvalidEndpoint(_))));
}

#[tokio::test]
async fn fetch_passes_filters_through() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("avg_interest_rates.json");

    Mock::given(method("GET"))
        .and(path("/v2/accounting/od/avg_interest_rates"))
        .and(query_param("filter", "record_calendar_year:gte:2001"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let query = DatasetQuery::default().with_filter(fiscaldata_api::FieldFilter::gte(
        "record_calendar_year",
        "2001",
    ));
    let result = client.get_avg_interest_rates(&query).await;
    assert!(result.is_ok());
}
