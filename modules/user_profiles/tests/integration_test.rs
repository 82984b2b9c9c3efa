//! End-to-end tests over the full HTTP stack with the in-memory store.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use api_ingress::{ApiIngress, ApiIngressConfig};
use user_profiles::contract::error::UserProfilesError;
use user_profiles::contract::model::ProfileData;
use user_profiles::{UserProfiles, UserProfilesConfig};

async fn module() -> UserProfiles {
    UserProfiles::in_memory(&UserProfilesConfig::default())
        .await
        .unwrap()
}

fn app(module: &UserProfiles) -> Router {
    ApiIngress::new(ApiIngressConfig::default())
        .build_router(module.register_rest(Router::new()), Some(module.openapi()))
        .unwrap()
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn welcome_message() {
    let app = app(&module().await);
    let (status, body) = call(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Welcome User Micro Service"}));
}

#[tokio::test]
async fn profile_lifecycle_over_http() {
    let app = app(&module().await);

    let (status, body) = call(
        &app,
        "POST",
        "/users",
        Some(json!({"firstname": "Ana", "msisdn": "555"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "User succesfully created");
    assert_eq!(body["message"]["msisdn"], "555");
    assert!(body["message"]["last_update"].is_string());
    let id = body["message"]["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    let (status, body) = call(&app, "GET", "/users/555", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"]["firstname"], "Ana");

    let (status, body) = call(
        &app,
        "PATCH",
        "/users/555",
        Some(json!({"firstname": "Ana", "lastname": "Lee", "msisdn": "555"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "user record successfully updated");
    assert_eq!(body["data"]["lastname"], "Lee");
    assert_eq!(body["data"]["id"], id.as_str());
    assert!(body["data"]["inserted_at"].is_string());

    let (_, body) = call(&app, "GET", "/users/555", None).await;
    assert_eq!(body["response"]["lastname"], "Lee");

    let (status, body) = call(&app, "DELETE", "/users/555", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"response": "user record successfully deleted"}));

    let (status, body) = call(&app, "GET", "/users/555", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "PROFILES_NOT_FOUND");
    assert_eq!(body["instance"], "/users/555");
}

#[tokio::test]
async fn list_is_empty_array_then_every_profile() {
    let app = app(&module().await);

    let (status, body) = call(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"response": []}));

    for msisdn in ["1", "2", "3"] {
        call(&app, "POST", "/users", Some(json!({ "msisdn": msisdn }))).await;
    }
    let (_, body) = call(&app, "GET", "/users", None).await;
    let mut got: Vec<&str> = body["response"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["msisdn"].as_str().unwrap())
        .collect();
    got.sort_unstable();
    assert_eq!(got, ["1", "2", "3"]);
}

#[tokio::test]
async fn duplicate_msisdn_is_conflict_and_not_stored() {
    let m = module().await;
    let app = app(&m);

    call(&app, "POST", "/users", Some(json!({"msisdn": "555"}))).await;
    let (status, body) = call(
        &app,
        "POST",
        "/users",
        Some(json!({"firstname": "Bob", "msisdn": "555"})),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "PROFILES_MSISDN_CONFLICT");
    assert_eq!(m.service().list_profiles().await.unwrap().len(), 1);
}

#[tokio::test]
async fn profiles_without_msisdn_coexist() {
    let m = module().await;
    let app = app(&m);

    for name in ["Ana", "Bob"] {
        let (status, _) = call(&app, "POST", "/users", Some(json!({ "firstname": name }))).await;
        assert_eq!(status, StatusCode::OK);
    }
    assert_eq!(m.service().list_profiles().await.unwrap().len(), 2);
}

#[tokio::test]
async fn update_replaces_whole_document() {
    let app = app(&module().await);
    call(
        &app,
        "POST",
        "/users",
        Some(json!({"firstname": "Ana", "lastname": "Lee", "age": 31, "msisdn": "555"})),
    )
    .await;

    let (status, body) = call(&app, "PATCH", "/users/555", Some(json!({"msisdn": "555"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["firstname"], "");
    assert_eq!(body["data"]["lastname"], "");
    assert_eq!(body["data"]["age"], 0);
}

#[tokio::test]
async fn update_without_msisdn_clears_it() {
    let m = module().await;
    let app = app(&m);
    let (_, created) = call(&app, "POST", "/users", Some(json!({"msisdn": "555"}))).await;

    let (status, body) = call(
        &app,
        "PATCH",
        "/users/555",
        Some(json!({"firstname": "Ana", "lastname": "Lee"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], created["message"]["id"]);
    assert_eq!(body["data"]["lastname"], "Lee");
    assert_eq!(body["data"]["msisdn"], "");

    let (status, _) = call(&app, "GET", "/users/555", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(m.service().list_profiles().await.unwrap().len(), 1);
}

#[tokio::test]
async fn blank_msisdn_is_rejected_on_create() {
    let m = module().await;
    let app = app(&m);

    let (status, body) = call(
        &app,
        "POST",
        "/users",
        Some(json!({"firstname": "Ana", "msisdn": " "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "PROFILES_VALIDATION");
    assert_eq!(body["instance"], "/users");
    assert!(m.service().list_profiles().await.unwrap().is_empty());
}

#[tokio::test]
async fn client_supplied_id_is_ignored() {
    let app = app(&module().await);

    let (_, created) = call(
        &app,
        "POST",
        "/users",
        Some(json!({"id": "not-mine", "msisdn": "555"})),
    )
    .await;
    let id = created["message"]["id"].as_str().unwrap().to_string();
    assert_ne!(id, "not-mine");

    let (_, updated) = call(
        &app,
        "PATCH",
        "/users/555",
        Some(json!({"id": "other", "msisdn": "555"})),
    )
    .await;
    assert_eq!(updated["data"]["id"], id.as_str());
}

#[tokio::test]
async fn update_errors() {
    let app = app(&module().await);
    call(&app, "POST", "/users", Some(json!({"msisdn": "555"}))).await;
    call(&app, "POST", "/users", Some(json!({"msisdn": "777"}))).await;

    let (status, body) = call(&app, "PATCH", "/users/999", Some(json!({"msisdn": "999"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "PROFILES_NOT_FOUND");

    let (status, body) = call(
        &app,
        "PATCH",
        "/users/555",
        Some(json!({"firstname": "x", "msisdn": " "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "PROFILES_VALIDATION");
    assert_eq!(body["errors"][0]["pointer"], "/body/msisdn");

    let (status, body) = call(&app, "PATCH", "/users/555", Some(json!({"msisdn": "777"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "PROFILES_MSISDN_CONFLICT");
}

#[tokio::test]
async fn bad_bodies_are_rejected() {
    let app = app(&module().await);

    let (status, body) = call(&app, "POST", "/users", Some(json!({"age": "old"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_JSON_BODY");

    // delete insists on a profile body even though it is not used
    call(&app, "POST", "/users", Some(json!({"msisdn": "555"}))).await;
    let (status, _) = call(&app, "DELETE", "/users/555", None).await;
    assert!(status.is_client_error());
    let (status, _) = call(&app, "GET", "/users/555", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn delete_missing_profile_is_not_found() {
    let app = app(&module().await);
    let (status, body) = call(&app, "DELETE", "/users/404", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "PROFILES_NOT_FOUND");
}

#[tokio::test]
async fn blank_path_msisdn_is_validation_error() {
    let app = app(&module().await);
    let (status, body) = call(&app, "GET", "/users/%20", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "PROFILES_VALIDATION");
}

#[tokio::test]
async fn openapi_served_by_ingress() {
    let app = app(&module().await);
    let (status, doc) = call(&app, "GET", "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/users/{msisdn}"]["patch"].is_object());
}

#[tokio::test]
async fn local_client_maps_errors() {
    let m = module().await;
    let client = m.client();

    let created = client
        .create_profile(ProfileData {
            firstname: "Ana".into(),
            msisdn: "555".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(client.get_profile("555").await.unwrap().id, created.id);
    assert_eq!(client.list_profiles().await.unwrap().len(), 1);

    let dup = client
        .create_profile(ProfileData {
            msisdn: "555".into(),
            ..Default::default()
        })
        .await;
    assert_eq!(dup, Err(UserProfilesError::conflict("555")));

    client.delete_profile("555").await.unwrap();
    assert_eq!(
        client.get_profile("555").await,
        Err(UserProfilesError::not_found("555"))
    );
    assert!(matches!(
        client.update_profile("", ProfileData::default()).await,
        Err(UserProfilesError::Validation { .. })
    ));
}
