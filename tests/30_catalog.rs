mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

async fn create_platform(app: &axum::Router, name: &str, manufacturer: &str) -> Value {
    let (status, body) = common::api(
        app,
        Method::POST,
        "/api/platforms",
        Some(&json!({ "name": name, "manufacturer": manufacturer })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn create_assigns_key_and_equal_timestamps() -> Result<()> {
    let app = common::test_app();

    let created = create_platform(&app, "PlayStation", "Sony").await;

    assert_eq!(created["name"], "PlayStation");
    assert_eq!(created["manufacturer"], "Sony");
    Uuid::parse_str(created["id"].as_str().unwrap())?;
    assert_eq!(created["createdAt"], created["updatedAt"]);
    Ok(())
}

#[tokio::test]
async fn create_then_fetch_round_trips() -> Result<()> {
    let app = common::test_app();

    let created = create_platform(&app, "PlayStation", "Sony").await;
    let id = created["id"].as_str().unwrap();

    let (status, fetched) =
        common::api(&app, Method::GET, &format!("/api/platforms/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    Ok(())
}

#[tokio::test]
async fn malformed_id_and_unknown_id_are_distinct() -> Result<()> {
    let app = common::test_app();

    let (status, body) =
        common::api(&app, Method::GET, "/api/platforms/not-a-valid-id", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid platform ID");

    let unassigned = Uuid::new_v4();
    let (status, body) =
        common::api(&app, Method::GET, &format!("/api/platforms/{}", unassigned), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Platform not found");
    Ok(())
}

#[tokio::test]
async fn empty_update_is_rejected_before_storage() -> Result<()> {
    let app = common::test_app();

    let created = create_platform(&app, "PlayStation", "Sony").await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = common::api(
        &app,
        Method::PUT,
        &format!("/api/platforms/{}", id),
        Some(&json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "At least one field (name or manufacturer) must be provided for update"
    );

    // Entity is untouched
    let (_, fetched) =
        common::api(&app, Method::GET, &format!("/api/platforms/{}", id), None).await;
    assert_eq!(fetched, created);
    Ok(())
}

#[tokio::test]
async fn partial_update_returns_post_update_snapshot() -> Result<()> {
    let app = common::test_app();

    let created = create_platform(&app, "PlayStation", "Sony").await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = common::api(
        &app,
        Method::PUT,
        &format!("/api/platforms/{}", id),
        Some(&json!({ "manufacturer": "Sony Interactive Entertainment" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["manufacturer"], "Sony Interactive Entertainment");
    assert_eq!(updated["name"], "PlayStation");
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_ne!(updated["updatedAt"], created["updatedAt"]);
    Ok(())
}

#[tokio::test]
async fn delete_returns_entity_then_not_found() -> Result<()> {
    let app = common::test_app();

    let created = create_platform(&app, "Dreamcast", "Sega").await;
    let id = created["id"].as_str().unwrap();

    let (status, deleted) =
        common::api(&app, Method::DELETE, &format!("/api/platforms/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, created);

    let (status, _) =
        common::api(&app, Method::DELETE, &format!("/api/platforms/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn validation_failures_report_every_field() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::api(
        &app,
        Method::POST,
        "/api/platforms",
        Some(&json!({ "name": "x" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");

    let errors = body["errors"].as_array().unwrap();
    assert!(errors.iter().any(|e| e["field"] == "name"
        && e["message"] == "Must be at least 2 characters long"));
    assert!(errors
        .iter()
        .any(|e| e["field"] == "manufacturer" && e["message"] == "This field is required"));
    Ok(())
}

#[tokio::test]
async fn malformed_json_body_is_a_generic_400() -> Result<()> {
    let app = common::test_app();

    let request = common::build_request(
        Method::POST,
        "/api/platforms",
        None,
        &[("X-API-Key", common::API_KEY), ("Content-Type", "application/json")],
    );
    let request = request.map(|_| axum::body::Body::from("{not json"));
    let (status, body, _) = common::send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid request body");
    Ok(())
}

#[tokio::test]
async fn name_search_is_case_insensitive_substring() -> Result<()> {
    let app = common::test_app();

    create_platform(&app, "Nintendo", "Nintendo").await;
    create_platform(&app, "Sega", "Sega").await;

    for needle in ["nintendo", "TEND"] {
        let (status, body) = common::api(
            &app,
            Method::GET,
            &format!("/api/platforms?name={}", needle),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let found = body.as_array().unwrap();
        assert_eq!(found.len(), 1, "needle {:?}", needle);
        assert_eq!(found[0]["name"], "Nintendo");
    }

    // An empty filter returns the full collection
    let (_, body) = common::api(&app, Method::GET, "/api/platforms?name=", None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn games_carry_reference_lists_and_score_bounds() -> Result<()> {
    let app = common::test_app();

    let platform = create_platform(&app, "PlayStation", "Sony").await;
    let platform_id = platform["id"].as_str().unwrap();

    let game = json!({
        "title": "Shadow of the Colossus",
        "description": "Climb very large colossi.",
        "releaseDate": "2005-10-18T00:00:00Z",
        "platforms": [platform_id],
        "genres": [Uuid::new_v4()],
        "developers": [Uuid::new_v4()],
        "publishers": [Uuid::new_v4()],
        "coverImage": "https://example.com/sotc.jpg",
        "metacriticScore": 91.0,
    });

    let (status, created) = common::api(&app, Method::POST, "/api/games", Some(&game)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["platforms"][0], platform_id);
    assert_eq!(created["metacriticScore"], 91.0);
    assert!(created.get("usersScore").is_none());

    // Score above the bound fails with the numeric message
    let mut out_of_range = game.clone();
    out_of_range["metacriticScore"] = json!(101);
    let (status, body) = common::api(&app, Method::POST, "/api/games", Some(&out_of_range)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().unwrap();
    assert!(errors
        .iter()
        .any(|e| e["field"] == "metacriticScore" && e["message"] == "Must not exceed 100"));

    // Empty reference list fails the element-count bound
    let mut no_platforms = game.clone();
    no_platforms["platforms"] = json!([]);
    let (status, body) = common::api(&app, Method::POST, "/api/games", Some(&no_platforms)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().unwrap();
    assert!(errors
        .iter()
        .any(|e| e["field"] == "platforms" && e["message"] == "Must be at least 1"));
    Ok(())
}

#[tokio::test]
async fn games_search_matches_title() -> Result<()> {
    let app = common::test_app();

    let game = |title: &str| {
        json!({
            "title": title,
            "description": "d",
            "releaseDate": "2017-03-03T00:00:00Z",
            "platforms": [Uuid::new_v4()],
            "genres": [Uuid::new_v4()],
            "developers": [Uuid::new_v4()],
            "publishers": [Uuid::new_v4()],
            "coverImage": "cover.jpg",
        })
    };

    common::api(&app, Method::POST, "/api/games", Some(&game("Breath of the Wild"))).await;
    common::api(&app, Method::POST, "/api/games", Some(&game("Doom"))).await;

    let (status, body) =
        common::api(&app, Method::GET, "/api/games?title=wild", None).await;
    assert_eq!(status, StatusCode::OK);
    let found = body.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["title"], "Breath of the Wild");
    Ok(())
}

#[tokio::test]
async fn every_catalog_resource_serves_the_same_surface() -> Result<()> {
    let app = common::test_app();

    for (collection, body) in [
        ("genres", json!({ "name": "Platformer" })),
        ("developers", json!({ "name": "Team Ico" })),
        ("publishers", json!({ "name": "Annapurna Interactive" })),
    ] {
        let uri = format!("/api/{}", collection);
        let (status, created) = common::api(&app, Method::POST, &uri, Some(&body)).await;
        assert_eq!(status, StatusCode::CREATED, "create {}", collection);

        let id = created["id"].as_str().unwrap();
        let (status, updated) = common::api(
            &app,
            Method::PUT,
            &format!("{}/{}", uri, id),
            Some(&json!({ "name": "Renamed" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "update {}", collection);
        assert_eq!(updated["name"], "Renamed");

        let (status, _) =
            common::api(&app, Method::DELETE, &format!("{}/{}", uri, id), None).await;
        assert_eq!(status, StatusCode::OK, "delete {}", collection);
    }
    Ok(())
}
