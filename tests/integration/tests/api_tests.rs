//! API Integration Tests
//!
//! Each test spawns the server on a loopback port over the in-memory
//! backend, so no external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, comment, event, family, item, member, news,
    reaction, CommentBody, Counts, Created, ReactionBody, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn create(server: &TestServer, token: &str, path: &str, body: &Value) -> String {
    let response = server.post_admin(path, token, body).await.unwrap();
    let created: Created = assert_json(response, StatusCode::CREATED).await.unwrap();
    created.id
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready_reports_backend() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["backend"], "memory");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
async fn test_session_defaults_to_guest() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/auth/session").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["role"], "guest");
    assert_eq!(body["viewer_id"], "guest");
}

#[tokio::test]
async fn test_login_and_session() {
    let server = TestServer::start().await.unwrap();
    let token = server.admin_token().await.unwrap();

    let response = server
        .request(reqwest::Method::GET, "/auth/session")
        .bearer_auth(&token)
        .header("x-viewer-id", "kim")
        .send()
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["role"], "admin");
    assert_eq!(body["subject"], "admin");
    assert_eq!(body["viewer_id"], "kim");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post(
            "/auth/login",
            &json!({ "username": "admin", "password": "not-it" }),
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post_admin("/events", "not-a-jwt", &event("Picnic", "2026-06-01"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_guest_cannot_mutate() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post("/events", &event("Picnic", "2026-06-01"))
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "ADMIN_REQUIRED")
        .await
        .unwrap();

    let response = server.post("/families", &family("Lee")).await.unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "ADMIN_REQUIRED")
        .await
        .unwrap();
}

// ============================================================================
// Family Tree Tests
// ============================================================================

#[tokio::test]
async fn test_empty_family_tree() {
    let server = TestServer::start().await.unwrap();
    let token = server.admin_token().await.unwrap();
    let family_id = create(&server, &token, "/families", &family("Lee")).await;

    let response = server
        .get(&format!("/families/{family_id}/tree"))
        .await
        .unwrap();
    let tree: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(tree["status"], "empty");
    assert_eq!(tree["size"], 0);
    assert!(tree.get("root").is_none());
}

#[tokio::test]
async fn test_dangling_member_after_parent_delete() {
    let server = TestServer::start().await.unwrap();
    let token = server.admin_token().await.unwrap();
    let family_id = create(&server, &token, "/families", &family("Lee")).await;
    let members = format!("/families/{family_id}/members");

    let jordan = create(&server, &token, &members, &member("Jordan", None)).await;
    let sam = create(&server, &token, &members, &member("Sam", Some(&jordan))).await;
    let avery = create(&server, &token, &members, &member("Avery", Some(&sam))).await;

    let response = server
        .get(&format!("/families/{family_id}/tree"))
        .await
        .unwrap();
    let tree: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(tree["status"], "ready");
    assert_eq!(tree["size"], 3);
    assert_eq!(tree["root"]["name"], "Jordan");
    assert_eq!(tree["root"]["children"][0]["name"], "Sam");
    assert_eq!(tree["root"]["children"][0]["children"][0]["name"], "Avery");

    let response = server
        .delete_admin(&format!("{members}/{sam}"), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Avery keeps a parent_id nobody answers to and drops out of the tree
    let response = server
        .get(&format!("/families/{family_id}/tree"))
        .await
        .unwrap();
    let tree: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(tree["size"], 1);
    assert!(tree["root"].get("children").is_none());

    let response = server
        .get(&format!("{members}/{avery}/subtree"))
        .await
        .unwrap();
    let subtree: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(subtree["node"]["name"], "Avery");
    assert_eq!(subtree["descendant_count"], 0);

    // The stranded member can still be edited without re-parenting
    let response = server
        .patch_admin(
            &format!("{members}/{avery}"),
            &token,
            &json!({ "note": "Moved away" }),
        )
        .await
        .unwrap();
    let updated: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated["note"], "Moved away");
    assert_eq!(updated["parent_id"], sam.as_str());
}

#[tokio::test]
async fn test_second_root_rejected() {
    let server = TestServer::start().await.unwrap();
    let token = server.admin_token().await.unwrap();
    let family_id = create(&server, &token, "/families", &family("Lee")).await;
    let members = format!("/families/{family_id}/members");

    create(&server, &token, &members, &member("Jordan", None)).await;

    let response = server
        .post_admin(&members, &token, &member("Riley", None))
        .await
        .unwrap();
    assert_error(response, StatusCode::CONFLICT, "SECOND_ROOT")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_cycle_creating_update_rejected() {
    let server = TestServer::start().await.unwrap();
    let token = server.admin_token().await.unwrap();
    let family_id = create(&server, &token, "/families", &family("Lee")).await;
    let members = format!("/families/{family_id}/members");

    let jordan = create(&server, &token, &members, &member("Jordan", None)).await;
    let sam = create(&server, &token, &members, &member("Sam", Some(&jordan))).await;

    let response = server
        .patch_admin(
            &format!("{members}/{jordan}"),
            &token,
            &json!({ "parent_id": sam }),
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "CYCLE_DETECTED")
        .await
        .unwrap();

    // Nothing was written
    let response = server
        .get(&format!("{members}/{jordan}"))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body["parent_id"].is_null());
}

#[tokio::test]
async fn test_member_update_clears_field() {
    let server = TestServer::start().await.unwrap();
    let token = server.admin_token().await.unwrap();
    let family_id = create(&server, &token, "/families", &family("Lee")).await;
    let members = format!("/families/{family_id}/members");

    let response = server
        .post_admin(
            &members,
            &token,
            &json!({ "name": "Jordan", "note": "Eldest", "birth_year": 1950 }),
        )
        .await
        .unwrap();
    let created: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    let jordan = created["id"].as_str().unwrap().to_string();

    let response = server
        .patch_admin(
            &format!("{members}/{jordan}"),
            &token,
            &json!({ "note": null }),
        )
        .await
        .unwrap();
    let updated: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(updated.get("note").map_or(true, Value::is_null));
    assert_eq!(updated["birth_year"], 1950);
}

#[tokio::test]
async fn test_member_update_validated_like_create() {
    let server = TestServer::start().await.unwrap();
    let token = server.admin_token().await.unwrap();
    let family_id = create(&server, &token, "/families", &family("Lee")).await;
    let members = format!("/families/{family_id}/members");
    let jordan = create(&server, &token, &members, &member("Jordan", None)).await;

    let response = server
        .patch_admin(
            &format!("{members}/{jordan}"),
            &token,
            &json!({ "birth_year": 0 }),
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unknown_family_and_bad_path() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .get("/families/00000000-0000-4000-8000-000000000000/tree")
        .await
        .unwrap();
    assert_error(response, StatusCode::NOT_FOUND, "UNKNOWN_FAMILY")
        .await
        .unwrap();

    let response = server.get("/families/not-a-uuid/tree").await.unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_PATH_PARAMETER")
        .await
        .unwrap();
}

// ============================================================================
// Events and News Tests
// ============================================================================

#[tokio::test]
async fn test_event_lifecycle() {
    let server = TestServer::start().await.unwrap();
    let token = server.admin_token().await.unwrap();
    let event_id = create(&server, &token, "/events", &event("Reunion", "2026-07-04")).await;

    let response = server
        .patch_admin(
            &format!("/events/{event_id}"),
            &token,
            &json!({ "location": "Lakeside" }),
        )
        .await
        .unwrap();
    let updated: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated["location"], "Lakeside");
    assert_eq!(updated["event_date"], "2026-07-04");
    assert_eq!(updated["reactions"]["like"], 0);

    let response = server
        .delete_admin(&format!("/events/{event_id}"), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&format!("/events/{event_id}")).await.unwrap();
    assert_error(response, StatusCode::NOT_FOUND, "UNKNOWN_ITEM")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_news_listed_newest_first() {
    let server = TestServer::start().await.unwrap();
    let token = server.admin_token().await.unwrap();
    create(&server, &token, "/news", &news("Spring", "2026-03-01")).await;
    create(&server, &token, "/news", &news("Summer", "2026-06-01")).await;

    let response = server.get("/news").await.unwrap();
    let listed: Vec<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    let titles: Vec<&str> = listed.iter().filter_map(|n| n["title"].as_str()).collect();
    assert_eq!(titles, vec!["Summer", "Spring"]);
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let server = TestServer::start().await.unwrap();
    let token = server.admin_token().await.unwrap();

    let response = server
        .post_admin(
            "/events",
            &token,
            &json!({ "title": "Reunion", "event_date": "July 4th" }),
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_BODY")
        .await
        .unwrap();
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_reaction_toggle_and_switch() {
    let server = TestServer::start().await.unwrap();
    let token = server.admin_token().await.unwrap();
    let event_id = create(&server, &token, "/events", &event("Reunion", "2026-07-04")).await;

    let response = server
        .put_as_viewer("/reactions", "sam", &reaction("event", &event_id, "like"))
        .await
        .unwrap();
    let added: ReactionBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(added.change["action"], "added");
    assert_eq!(added.reaction_type.as_deref(), Some("like"));
    assert_eq!(added.reactions.like, 1);
    assert_eq!(added.item_id, event_id);
    assert_eq!(added.item_type, "event");

    let response = server
        .put_as_viewer("/reactions", "sam", &reaction("event", &event_id, "heart"))
        .await
        .unwrap();
    let switched: ReactionBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(switched.change["action"], "switched");
    assert_eq!(switched.reactions.like, 0);
    assert_eq!(switched.reactions.heart, 1);

    let response = server
        .put_as_viewer("/reactions", "sam", &reaction("event", &event_id, "heart"))
        .await
        .unwrap();
    let removed: ReactionBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(removed.change["action"], "removed");
    assert_eq!(removed.reaction_type, None);
    assert_eq!(removed.reactions, Counts::default());

    let response = server
        .get_as_viewer(
            &format!("/reactions/me?item_type=event&item_id={event_id}"),
            "sam",
        )
        .await
        .unwrap();
    let mine: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mine["viewer_id"], "sam");
    assert!(mine["reaction_type"].is_null());
}

#[tokio::test]
async fn test_reaction_validation() {
    let server = TestServer::start().await.unwrap();
    let token = server.admin_token().await.unwrap();
    let event_id = create(&server, &token, "/events", &event("Reunion", "2026-07-04")).await;

    let response = server
        .put_as_viewer("/reactions", "sam", &reaction("event", &event_id, "angry"))
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_REACTION_KIND")
        .await
        .unwrap();

    let response = server
        .put_as_viewer("/reactions", "sam", &reaction("photo", &event_id, "like"))
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_ITEM_TYPE")
        .await
        .unwrap();

    let response = server
        .put_as_viewer("/reactions", "sam", &reaction("news", &event_id, "like"))
        .await
        .unwrap();
    assert_error(response, StatusCode::NOT_FOUND, "UNKNOWN_ITEM")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_concurrent_viewers_counted_once_each() {
    let server = TestServer::start().await.unwrap();
    let token = server.admin_token().await.unwrap();
    let event_id = create(&server, &token, "/events", &event("Reunion", "2026-07-04")).await;

    let body = reaction("event", &event_id, "celebrate");
    let requests = (0..8).map(|i| {
        let viewer = format!("viewer-{i}");
        let body = &body;
        let server = &server;
        async move { server.put_as_viewer("/reactions", &viewer, body).await }
    });
    for response in futures::future::join_all(requests).await {
        assert_status(response.unwrap(), StatusCode::OK).await.unwrap();
    }

    let response = server.get(&format!("/events/{event_id}")).await.unwrap();
    let fetched: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched["reactions"]["celebrate"], 8);

    let response = server
        .post_admin("/reactions/recount", &token, &item("event", &event_id))
        .await
        .unwrap();
    let recount: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(recount["reactions"]["celebrate"], 8);
}

#[tokio::test]
async fn test_recount_requires_admin() {
    let server = TestServer::start().await.unwrap();
    let token = server.admin_token().await.unwrap();
    let event_id = create(&server, &token, "/events", &event("Reunion", "2026-07-04")).await;

    let response = server
        .post("/reactions/recount", &item("event", &event_id))
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "ADMIN_REQUIRED")
        .await
        .unwrap();
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_thread() {
    let server = TestServer::start().await.unwrap();
    let token = server.admin_token().await.unwrap();
    let news_id = create(&server, &token, "/news", &news("Garden", "2026-05-02")).await;

    for text in ["First!", "Lovely photos"] {
        let response = server
            .post("/comments", &comment("news", &news_id, "Sam", text))
            .await
            .unwrap();
        let created: CommentBody = assert_json(response, StatusCode::CREATED).await.unwrap();
        assert_eq!(created.item_id, news_id);
        assert_eq!(created.item_type, "news");
        assert_eq!(created.author, "Sam");
        assert_eq!(created.reactions, Counts::default());
        assert_eq!(created.created_date.len(), "2026-01-01".len());
    }

    let response = server
        .get(&format!("/comments?item_type=news&item_id={news_id}"))
        .await
        .unwrap();
    let thread: Vec<CommentBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(thread.len(), 2);
    assert!(thread.iter().any(|c| c.text == "First!"));

    // Same id, other item type: separate thread
    let response = server
        .get(&format!("/comments?item_type=event&item_id={news_id}"))
        .await
        .unwrap();
    let other: Vec<CommentBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(other.is_empty());
}

#[tokio::test]
async fn test_blank_comment_rejected() {
    let server = TestServer::start().await.unwrap();
    let token = server.admin_token().await.unwrap();
    let event_id = create(&server, &token, "/events", &event("Reunion", "2026-07-04")).await;

    let response = server
        .post("/comments", &comment("event", &event_id, "Sam", "   "))
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        .await
        .unwrap();

    let response = server
        .post("/comments", &comment("comment", &event_id, "Sam", "Nested"))
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_ITEM_TYPE")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_react_to_comment_then_delete() {
    let server = TestServer::start().await.unwrap();
    let token = server.admin_token().await.unwrap();
    let event_id = create(&server, &token, "/events", &event("Reunion", "2026-07-04")).await;

    let response = server
        .post("/comments", &comment("event", &event_id, "Sam", "See you there"))
        .await
        .unwrap();
    let created: CommentBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .put_as_viewer("/reactions", "kim", &reaction("comment", &created.id, "smile"))
        .await
        .unwrap();
    let applied: ReactionBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(applied.reactions.smile, 1);

    let path = format!("/comments/{}", created.id);
    let response = server
        .request(reqwest::Method::DELETE, &path)
        .send()
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "ADMIN_REQUIRED")
        .await
        .unwrap();

    let response = server.delete_admin(&path, &token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.delete_admin(&path, &token).await.unwrap();
    assert_error(response, StatusCode::NOT_FOUND, "UNKNOWN_COMMENT")
        .await
        .unwrap();
}
