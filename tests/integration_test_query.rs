mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::{json, Value};

fn names(body: &Value) -> Vec<String> {
    body.as_array().unwrap().iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect()
}

async fn seed(app: &TestApp, token: &str) {
    app.create_conference(token, json!({
        "name": "Medicon", "city": "London", "topics": ["Medical Innovations", "Health"],
        "startDate": "2025-06-01", "endDate": "2025-06-02", "maxAttendees": 100
    })).await;
    app.create_conference(token, json!({
        "name": "Berlin Summit", "city": "Berlin", "topics": ["Programming Languages"],
        "startDate": "2025-04-10", "endDate": "2025-04-11", "maxAttendees": 500
    })).await;
    app.create_conference(token, json!({
        "name": "Appcon", "city": "London", "topics": ["Web", "Programming Languages"],
        "startDate": "2025-11-20", "endDate": "2025-11-21", "maxAttendees": 20
    })).await;
}

async fn query(app: &TestApp, token: &str, filters: Value) -> (StatusCode, Value) {
    let res = app.request("POST", "/api/v1/conferences/query", Some(token), Some(json!({ "filters": filters }))).await;
    let status = res.status();
    (status, parse_body(res).await)
}

#[tokio::test]
async fn test_no_filters_returns_everything_by_name() {
    let app = TestApp::new().await;
    let token = app.token("ada");
    seed(&app, &token).await;

    let (status, body) = query(&app, &token, json!([])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Appcon", "Berlin Summit", "Medicon"]);
    assert_eq!(body[0]["organizerDisplayName"], "ada");
}

#[tokio::test]
async fn test_equality_filters() {
    let app = TestApp::new().await;
    let token = app.token("ada");
    seed(&app, &token).await;

    let (_, body) = query(&app, &token, json!([
        { "field": "CITY", "operator": "EQ", "value": "London" }
    ])).await;
    assert_eq!(names(&body), vec!["Appcon", "Medicon"]);

    let (_, body) = query(&app, &token, json!([
        { "field": "CITY", "operator": "EQ", "value": "London" },
        { "field": "TOPIC", "operator": "EQ", "value": "Medical Innovations" },
        { "field": "MONTH", "operator": "EQ", "value": "6" }
    ])).await;
    assert_eq!(names(&body), vec!["Medicon"]);

    let (_, body) = query(&app, &token, json!([
        { "field": "TOPIC", "operator": "EQ", "value": "Programming Languages" }
    ])).await;
    assert_eq!(names(&body), vec!["Appcon", "Berlin Summit"]);
}

#[tokio::test]
async fn test_inequality_field_leads_ordering() {
    let app = TestApp::new().await;
    let token = app.token("ada");
    seed(&app, &token).await;

    let (status, body) = query(&app, &token, json!([
        { "field": "MAX_ATTENDEES", "operator": "GT", "value": "10" },
        { "field": "MAX_ATTENDEES", "operator": "LTEQ", "value": "500" }
    ])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Appcon", "Medicon", "Berlin Summit"]);

    let (_, body) = query(&app, &token, json!([
        { "field": "MONTH", "operator": "GTEQ", "value": "5" }
    ])).await;
    assert_eq!(names(&body), vec!["Medicon", "Appcon"]);

    let (_, body) = query(&app, &token, json!([
        { "field": "CITY", "operator": "NE", "value": "London" }
    ])).await;
    assert_eq!(names(&body), vec!["Berlin Summit"]);
}

#[tokio::test]
async fn test_invalid_filters_are_rejected() {
    let app = TestApp::new().await;
    let token = app.token("ada");
    seed(&app, &token).await;

    let (status, body) = query(&app, &token, json!([
        { "field": "MONTH", "operator": "GT", "value": "3" },
        { "field": "CITY", "operator": "EQ", "value": "Paris" },
        { "field": "MAX_ATTENDEES", "operator": "LT", "value": "100" }
    ])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Inequality filter is allowed on only one field");

    let (status, _) = query(&app, &token, json!([
        { "field": "COUNTRY", "operator": "EQ", "value": "UK" }
    ])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = query(&app, &token, json!([
        { "field": "CITY", "operator": "LIKE", "value": "Lon" }
    ])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = query(&app, &token, json!([
        { "field": "MONTH", "operator": "EQ", "value": "June" }
    ])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_by_fill_percentage() {
    let app = TestApp::new().await;
    let ada = app.token("ada");

    let half = app.create_conference(&ada, json!({ "name": "Half", "maxAttendees": 2 })).await;
    app.create_conference(&ada, json!({ "name": "Empty", "maxAttendees": 10 })).await;

    let uri = format!("/api/v1/conferences/{}/registration", half["id"].as_str().unwrap());
    let res = app.request("POST", &uri, Some(&app.token("bob")), None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.request("GET", "/api/v1/conferences/by-fill?operator=GTEQ&value=50", Some(&ada), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(names(&parse_body(res).await), vec!["Half"]);

    let res = app.request("GET", "/api/v1/conferences/by-fill?operator=LT&value=50", Some(&ada), None).await;
    assert_eq!(names(&parse_body(res).await), vec!["Empty"]);

    let res = app.request("GET", "/api/v1/conferences/by-fill?operator=ABOUT&value=50", Some(&ada), None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.request("GET", "/api/v1/conferences/by-fill?operator=GT&value=half", Some(&ada), None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_ties_on_inequality_field_break_by_name() {
    let app = TestApp::new().await;
    let token = app.token("ada");

    app.create_conference(&token, json!({ "name": "Zed Fest", "maxAttendees": 50 })).await;
    app.create_conference(&token, json!({ "name": "Acme Days", "maxAttendees": 50 })).await;
    app.create_conference(&token, json!({ "name": "Big Meet", "maxAttendees": 80 })).await;
    app.create_conference(&token, json!({ "name": "Mini Meet", "maxAttendees": 10 })).await;

    let (status, body) = query(&app, &token, json!([
        { "field": "MAX_ATTENDEES", "operator": "GTEQ", "value": "50" }
    ])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Acme Days", "Zed Fest", "Big Meet"]);
}

#[tokio::test]
async fn test_topic_inequality_matches_any_topic_and_orders_by_smallest() {
    let app = TestApp::new().await;
    let token = app.token("ada");

    app.create_conference(&token, json!({ "name": "Only Web", "topics": ["Web"] })).await;
    app.create_conference(&token, json!({ "name": "Mixed", "topics": ["Web", "Async"] })).await;
    app.create_conference(&token, json!({ "name": "Data", "topics": ["Databases"] })).await;
    app.create_conference(&token, json!({ "name": "Zebra", "topics": ["Embedded", "Cloud"] })).await;

    let (status, body) = query(&app, &token, json!([
        { "field": "TOPIC", "operator": "NE", "value": "Web" }
    ])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Mixed", "Zebra", "Data"]);

    let (status, body) = query(&app, &token, json!([
        { "field": "TOPIC", "operator": "GT", "value": "W" }
    ])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Mixed", "Only Web"]);
}
