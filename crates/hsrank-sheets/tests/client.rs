//! Integration tests for `SheetsClient` using wiremock HTTP mocks.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hsrank_sheets::{SheetsClient, SheetsError};

fn test_client(base_url: &str) -> SheetsClient {
    SheetsClient::with_static_token(base_url, "test-token", "sheet1", 30)
        .expect("client construction should not fail")
}

fn metadata_body() -> serde_json::Value {
    json!({
        "sheets": [
            { "properties": { "sheetId": 0, "title": "홈쇼핑TOP100", "index": 0 } },
            { "properties": { "sheetId": 11, "title": "9/10", "index": 1 } },
            { "properties": { "sheetId": 12, "title": "9/10-2", "index": 2 } }
        ]
    })
}

async fn mount_metadata(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet1"))
        .and(query_param("fields", "sheets.properties"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(metadata_body()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn list_sheets_returns_tab_properties() {
    let server = MockServer::start().await;
    mount_metadata(&server).await;

    let sheets = test_client(&server.uri()).list_sheets().await.unwrap();
    assert_eq!(sheets.len(), 3);
    assert_eq!(sheets[0].title, "홈쇼핑TOP100");
    assert_eq!(sheets[1].sheet_id, 11);
}

#[tokio::test]
async fn sheet_id_finds_tab_by_title() {
    let server = MockServer::start().await;
    mount_metadata(&server).await;

    let client = test_client(&server.uri());
    assert_eq!(client.sheet_id("9/10-2").await.unwrap(), Some(12));
    assert_eq!(client.sheet_id("없는탭").await.unwrap(), None);
}

#[tokio::test]
async fn ensure_sheet_reuses_an_existing_tab() {
    let server = MockServer::start().await;
    mount_metadata(&server).await;
    // No batchUpdate mock mounted: creating would 404 and fail the test.

    let id = test_client(&server.uri())
        .ensure_sheet("홈쇼핑TOP100", 2, 8)
        .await
        .unwrap();
    assert_eq!(id, 0);
}

#[tokio::test]
async fn ensure_sheet_creates_a_missing_tab() {
    let server = MockServer::start().await;
    mount_metadata(&server).await;
    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/sheet1:batchUpdate"))
        .and(body_partial_json(json!({
            "requests": [ { "addSheet": { "properties": { "title": "9/11" } } } ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "replies": [ { "addSheet": { "properties": { "sheetId": 99, "title": "9/11" } } } ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let id = test_client(&server.uri())
        .ensure_sheet("9/11", 2, 8)
        .await
        .unwrap();
    assert_eq!(id, 99);
}

#[tokio::test]
async fn update_values_writes_raw_rows() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path_regex(r"^/v4/spreadsheets/sheet1/values/.+$"))
        .and(query_param("valueInputOption", "RAW"))
        .and(body_partial_json(json!({
            "majorDimension": "ROWS",
            "values": [["랭킹", "방송정보"], ["1", "안마의자"]]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "updatedCells": 4 })))
        .expect(1)
        .mount(&server)
        .await;

    let values = vec![
        vec!["랭킹".to_owned(), "방송정보".to_owned()],
        vec!["1".to_owned(), "안마의자".to_owned()],
    ];
    test_client(&server.uri())
        .update_values("9/10", &values)
        .await
        .unwrap();
}

#[tokio::test]
async fn clear_values_posts_to_the_clear_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/v4/spreadsheets/sheet1/values/.+:clear$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server.uri()).clear_values("9/10").await.unwrap();
}

#[tokio::test]
async fn get_values_stringifies_numeric_cells() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/v4/spreadsheets/sheet1/values/.+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "'9/10'!A1:C2",
            "values": [["랭킹", "매출액"], [1, "3억500만"]]
        })))
        .mount(&server)
        .await;

    let values = test_client(&server.uri()).get_values("9/10").await.unwrap();
    assert_eq!(values[0], vec!["랭킹", "매출액"]);
    assert_eq!(values[1], vec!["1", "3억500만"]);
}

#[tokio::test]
async fn get_values_of_an_empty_tab_is_an_empty_grid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/v4/spreadsheets/sheet1/values/.+$"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "range": "'9/10'!A1:Z1000" })),
        )
        .mount(&server)
        .await;

    let values = test_client(&server.uri()).get_values("9/10").await.unwrap();
    assert!(values.is_empty());
}

#[tokio::test]
async fn api_errors_surface_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet1"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "The caller does not have permission" }
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri()).list_sheets().await.unwrap_err();
    match err {
        SheetsError::Api { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "The caller does not have permission");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn move_to_front_reindexes_known_tabs_and_skips_unknown() {
    let server = MockServer::start().await;
    mount_metadata(&server).await;
    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/sheet1:batchUpdate"))
        .and(body_partial_json(json!({
            "requests": [
                { "updateSheetProperties": { "properties": { "sheetId": 12, "index": 0 }, "fields": "index" } },
                { "updateSheetProperties": { "properties": { "sheetId": 0, "index": 1 }, "fields": "index" } }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "replies": [] })))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server.uri())
        .move_to_front(&["9/10-2", "없는탭", "홈쇼핑TOP100"])
        .await
        .unwrap();
}
