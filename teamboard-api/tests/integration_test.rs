/// Integration tests for the Teamboard API
///
/// These tests verify the full system end-to-end against PostgreSQL:
/// - Project and task lifecycle, including the delete cascade
/// - URL/body consistency when creating tasks
/// - Membership add/remove rules
/// - Users, unique e-mail, and the one-to-one profile
/// - Task listing filters and pagination
///
/// Requires DATABASE_URL (defaults to the local teamboard_test database).

mod common;

use axum::http::StatusCode;
use common::{unique_email, TestContext};
use serde_json::json;

const MISSING_ID: i32 = i32::MAX;

#[tokio::test]
async fn test_project_task_lifecycle() {
    let ctx = TestContext::new().await.unwrap();

    let (status, project) = ctx.post("/projects", json!({"name": "X"})).await;
    assert_eq!(status, StatusCode::CREATED);
    let project_id = project["id"].as_i64().unwrap();
    assert_eq!(
        project,
        json!({"id": project_id, "name": "X", "description": null})
    );

    let (status, task) = ctx
        .post(
            &format!("/tasks/projects/{}/tasks", project_id),
            json!({"title": "T", "project_id": project_id}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let task_id = task["id"].as_i64().unwrap();
    assert_eq!(
        task,
        json!({
            "id": task_id,
            "title": "T",
            "status": "TODO",
            "due_date": null,
            "project_id": project_id
        })
    );

    let (status, body) = ctx.delete(&format!("/projects/{}", project_id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, body) = ctx.get(&format!("/tasks/{}", task_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, _) = ctx.get(&format!("/projects/{}", project_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_project_includes_tasks() {
    let ctx = TestContext::new().await.unwrap();
    let project_id = ctx.create_project("With tasks").await;

    let first = ctx.create_task(project_id, "first").await;
    let second = ctx.create_task(project_id, "second").await;

    let (status, body) = ctx.get(&format!("/projects/{}", project_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "With tasks");

    let ids: Vec<i64> = body["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![first, second]);
}

#[tokio::test]
async fn test_project_partial_update() {
    let ctx = TestContext::new().await.unwrap();

    let (_, project) = ctx
        .post("/projects", json!({"name": "Before", "description": "kept"}))
        .await;
    let id = project["id"].as_i64().unwrap();

    let (status, body) = ctx
        .put(&format!("/projects/{}", id), json!({"name": "After"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "After");
    assert_eq!(body["description"], "kept");

    let (status, _) = ctx
        .put(&format!("/projects/{}", MISSING_ID), json!({"name": "Nope"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_task_project_mismatch_is_rejected() {
    let ctx = TestContext::new().await.unwrap();
    let project_id = ctx.create_project("Target").await;
    let other_id = ctx.create_project("Other").await;

    let (status, body) = ctx
        .post(
            &format!("/tasks/projects/{}/tasks", project_id),
            json!({"title": "T", "project_id": other_id}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    for id in [project_id, other_id] {
        let (_, project) = ctx.get(&format!("/projects/{}", id)).await;
        assert_eq!(project["tasks"], json!([]));
    }
}

#[tokio::test]
async fn test_task_for_missing_project_is_not_found() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .post(
            &format!("/tasks/projects/{}/tasks", MISSING_ID),
            json!({"title": "T", "project_id": MISSING_ID}),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        format!("Project with ID {} not found", MISSING_ID)
    );
}

#[tokio::test]
async fn test_task_update_and_delete() {
    let ctx = TestContext::new().await.unwrap();
    let project_id = ctx.create_project("Updates").await;
    let task_id = ctx.create_task(project_id, "Write docs").await;

    let (status, body) = ctx
        .put(
            &format!("/tasks/{}", task_id),
            json!({"status": "DONE", "due_date": "2025-03-01"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "DONE");
    assert_eq!(body["due_date"], "2025-03-01");
    assert_eq!(body["title"], "Write docs");

    let (status, _) = ctx.delete(&format!("/tasks/{}", task_id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = ctx.delete(&format!("/tasks/{}", task_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_task_listing_filter() {
    let ctx = TestContext::new().await.unwrap();
    let mine = ctx.create_project("Mine").await;
    let theirs = ctx.create_project("Theirs").await;

    let my_task = ctx.create_task(mine, "mine").await;
    let their_task = ctx.create_task(theirs, "theirs").await;

    let (status, body) = ctx.get(&format!("/tasks?project_id={}", mine)).await;
    assert_eq!(status, StatusCode::OK);
    let tasks = body.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], my_task);

    // Empty filter means all projects
    let (status, body) = ctx.get("/tasks?project_id=&limit=1000").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert!(ids.contains(&my_task));
    assert!(ids.contains(&their_task));
}

#[tokio::test]
async fn test_project_list_pagination() {
    let ctx = TestContext::new().await.unwrap();
    ctx.create_project("Page one").await;
    ctx.create_project("Page two").await;

    let (status, body) = ctx.get("/projects?limit=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = ctx.get("/projects/?skip=0&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_membership_rules() {
    let ctx = TestContext::new().await.unwrap();
    let project_id = ctx.create_project("Team").await;
    let user_id = ctx.create_user("Ada").await;
    let uri = format!("/projects/{}/users/{}", project_id, user_id);

    let (status, body) = ctx.request("POST", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "message": format!("User {} added to project {}", user_id, project_id),
            "project_id": project_id,
            "user_id": user_id
        })
    );

    // Second add is rejected and changes nothing
    let (status, _) = ctx.request("POST", &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, members) = ctx.get(&format!("/projects/{}/users", project_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(members["users_count"], 1);
    assert_eq!(members["project_name"], "Team");
    assert_eq!(members["users"][0]["id"], user_id);

    let (status, projects) = ctx.get(&format!("/users/{}/projects", user_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(projects[0]["id"], project_id);

    let (status, body) = ctx.delete(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        format!("User {} removed from project {}", user_id, project_id)
    );

    let (status, _) = ctx.delete(&uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_membership_requires_existing_entities() {
    let ctx = TestContext::new().await.unwrap();
    let project_id = ctx.create_project("Lonely").await;
    let user_id = ctx.create_user("Bob").await;

    let (status, body) = ctx
        .request(
            "POST",
            &format!("/projects/{}/users/{}", project_id, MISSING_ID),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], format!("User with ID {} not found", MISSING_ID));

    let (status, _) = ctx
        .request(
            "POST",
            &format!("/projects/{}/users/{}", MISSING_ID, user_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx.get(&format!("/projects/{}/users", MISSING_ID)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_email_is_unique() {
    let ctx = TestContext::new().await.unwrap();
    let email = unique_email();

    let (status, _) = ctx
        .post("/users", json!({"name": "First", "email": email}))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = ctx
        .post("/users", json!({"name": "Second", "email": email}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    let other_id = ctx.create_user("Other").await;
    let (status, _) = ctx
        .put(&format!("/users/{}", other_id), json!({"email": email}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Re-sending one's own address is not a conflict
    let (status, own) = ctx.get(&format!("/users/{}", other_id)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = ctx
        .put(
            &format!("/users/{}", other_id),
            json!({"email": own["email"], "name": "Renamed"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_profile_lifecycle() {
    let ctx = TestContext::new().await.unwrap();
    let user_id = ctx.create_user("Grace").await;
    let uri = format!("/users/{}/profile", user_id);

    let (status, user) = ctx.get(&format!("/users/{}", user_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(user["profile"].is_null());

    let (status, _) = ctx.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, profile) = ctx.post(&uri, json!({"bio": "Admiral"})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(profile["user_id"], user_id);
    assert_eq!(profile["bio"], "Admiral");
    assert!(profile["phone_number"].is_null());

    let (status, _) = ctx.post(&uri, json!({"bio": "Again"})).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, profile) = ctx.put(&uri, json!({"phone_number": "555-0100"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["bio"], "Admiral");
    assert_eq!(profile["phone_number"], "555-0100");

    let (status, user) = ctx.get(&format!("/users/{}", user_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["profile"]["phone_number"], "555-0100");

    let (status, _) = ctx.delete(&uri).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = ctx.put(&uri, json!({"bio": "Gone"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_user_cascades() {
    let ctx = TestContext::new().await.unwrap();
    let project_id = ctx.create_project("Survives").await;
    let user_id = ctx.create_user("Leaving").await;

    ctx.post(&format!("/users/{}/profile", user_id), json!({"bio": "bye"}))
        .await;
    ctx.request(
        "POST",
        &format!("/projects/{}/users/{}", project_id, user_id),
        None,
    )
    .await;

    let (status, _) = ctx.delete(&format!("/users/{}", user_id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = ctx.get(&format!("/users/{}", user_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, members) = ctx.get(&format!("/projects/{}/users", project_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(members["users_count"], 0);

    let (status, _) = ctx.delete(&format!("/users/{}", user_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_reports_connected_database() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}
