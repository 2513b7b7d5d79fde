mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

async fn seats(app: &TestApp, id: &str) -> i64 {
    let res = app.request("GET", &format!("/api/v1/conferences/{}", id), Some(&app.token("observer")), None).await;
    parse_body(res).await["seatsAvailable"].as_i64().unwrap()
}

#[tokio::test]
async fn test_register_twice_conflicts() {
    let app = TestApp::new().await;
    let conf = app.create_conference(&app.token("ada"), json!({ "name": "RustConf", "maxAttendees": 10 })).await;
    let uri = format!("/api/v1/conferences/{}/registration", conf["id"].as_str().unwrap());
    let bob = app.token("bob");

    let res = app.request("POST", &uri, Some(&bob), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await, json!({ "data": true }));

    let res = app.request("POST", &uri, Some(&bob), None).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(parse_body(res).await["error"], "You have already registered for this conference");

    assert_eq!(seats(&app, conf["id"].as_str().unwrap()).await, 9);
}

#[tokio::test]
async fn test_sold_out_conference_conflicts() {
    let app = TestApp::new().await;
    let conf = app.create_conference(&app.token("ada"), json!({ "name": "Closed", "maxAttendees": 0 })).await;
    let uri = format!("/api/v1/conferences/{}/registration", conf["id"].as_str().unwrap());

    let res = app.request("POST", &uri, Some(&app.token("bob")), None).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(parse_body(res).await["error"], "There are no seats available");
}

#[tokio::test]
async fn test_last_seat_goes_to_exactly_one_caller() {
    let app = TestApp::new().await;
    let conf = app.create_conference(&app.token("ada"), json!({ "name": "Tiny", "maxAttendees": 1 })).await;
    let id = conf["id"].as_str().unwrap();
    let uri = format!("/api/v1/conferences/{}/registration", id);

    let (bob, carol) = (app.token("bob"), app.token("carol"));
    // Make sure both profiles exist so the race is on the seat alone
    app.request("GET", "/api/v1/profile", Some(&bob), None).await;
    app.request("GET", "/api/v1/profile", Some(&carol), None).await;

    let (first, second) = tokio::join!(
        app.request("POST", &uri, Some(&bob), None),
        app.request("POST", &uri, Some(&carol), None),
    );

    let mut statuses = vec![first.status(), second.status()];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::CONFLICT]);
    assert_eq!(seats(&app, id).await, 0);

    let attendees: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM conference_attendees WHERE conference_id = ?")
        .bind(id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(attendees, 1);
}

#[tokio::test]
async fn test_unregister_returns_the_seat() {
    let app = TestApp::new().await;
    let conf = app.create_conference(&app.token("ada"), json!({ "name": "RustConf", "maxAttendees": 4 })).await;
    let id = conf["id"].as_str().unwrap();
    let uri = format!("/api/v1/conferences/{}/registration", id);
    let bob = app.token("bob");

    assert_eq!(seats(&app, id).await, 4);

    let res = app.request("POST", &uri, Some(&bob), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(seats(&app, id).await, 3);

    let res = app.request("DELETE", &uri, Some(&bob), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await, json!({ "data": true }));
    assert_eq!(seats(&app, id).await, 4);

    let res = app.request("DELETE", &uri, Some(&bob), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await, json!({ "data": false }));
    assert_eq!(seats(&app, id).await, 4);

    // Registering again after leaving is allowed
    let res = app.request("POST", &uri, Some(&bob), None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.request("GET", "/api/v1/profile", Some(&bob), None).await;
    let profile = parse_body(res).await;
    assert_eq!(profile["conferenceKeysToAttend"], json!([id]));
}

#[tokio::test]
async fn test_unknown_conference_is_not_found() {
    let app = TestApp::new().await;
    let bob = app.token("bob");

    let res = app.request("POST", "/api/v1/conferences/missing/registration", Some(&bob), None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.request("DELETE", "/api/v1/conferences/missing/registration", Some(&bob), None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
