use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use items_core::{config::DatabaseConfig, create_app, initialize_state, AppConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn setup_app() -> Router {
    let config = AppConfig {
        database: DatabaseConfig::in_memory(),
        ..AppConfig::default()
    };
    let state = initialize_state(&config).await.unwrap();
    create_app(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_model_s_scenario() {
    let app = setup_app().await;

    let model_s = json!({
        "name": "Model S",
        "description": "red sedan",
        "price": 50000,
        "car": "Tesla"
    });

    let created = send(&app, Method::POST, "/items/1", Some(model_s)).await;
    assert_eq!(created.status(), StatusCode::OK);

    let fetched = send(&app, Method::GET, "/items/1", None).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(
        body_json(fetched).await,
        json!({
            "id": 1,
            "name": "Model S",
            "description": "red sedan",
            "price": 50000,
            "car": "Tesla"
        })
    );

    let red = send(&app, Method::GET, "/items/filter/?color=red", None).await;
    assert_eq!(red.status(), StatusCode::OK);
    let red = body_json(red).await;
    assert_eq!(red.as_array().unwrap().len(), 1);
    assert_eq!(red[0]["id"], 1);

    let bmw = send(&app, Method::GET, "/items/filter/?car_name=BMW", None).await;
    assert_eq!(bmw.status(), StatusCode::OK);
    assert_eq!(body_json(bmw).await, json!([]));
}

#[tokio::test]
async fn test_item_lifecycle() {
    let app = setup_app().await;

    let created = send(
        &app,
        Method::POST,
        "/items/7",
        Some(json!({"name": "X5", "description": "black suv", "price": 60000, "car": "BMW"})),
    )
    .await;
    let created = body_json(created).await;
    assert_eq!(created["message"], "Item created");
    assert_eq!(created["data"]["name"], "X5");

    let updated = send(&app, Method::PUT, "/items/7", Some(json!({"name": "X7"}))).await;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated = body_json(updated).await;
    assert_eq!(updated["message"], "Item updated");
    assert_eq!(
        updated["data"],
        json!({"id": 7, "name": "X7", "description": null, "price": null, "car": null})
    );

    let listed = body_json(send(&app, Method::GET, "/items", None).await).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["name"], "X7");

    let deleted = send(&app, Method::DELETE, "/items/7", None).await;
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(body_json(deleted).await, json!({"message": "Item deleted"}));

    let missing = send(&app, Method::GET, "/items/7", None).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_filter_combinations() {
    let app = setup_app().await;

    for (id, body) in [
        (1, json!({"name": "Model S", "description": "red sedan", "price": 50000, "car": "Tesla"})),
        (2, json!({"name": "Model Y", "description": "red crossover", "price": 45000, "car": "Tesla"})),
        (3, json!({"name": "M3", "description": "red coupe", "price": 50000, "car": "BMW"})),
    ] {
        let response = send(&app, Method::POST, &format!("/items/{}", id), Some(body)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let all = body_json(send(&app, Method::GET, "/items/filter/", None).await).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let exact = body_json(
        send(
            &app,
            Method::GET,
            "/items/filter/?car_name=Tesla&color=red&price=50000",
            None,
        )
        .await,
    )
    .await;
    assert_eq!(exact.as_array().unwrap().len(), 1);
    assert_eq!(exact[0]["id"], 1);
}

#[tokio::test]
async fn test_register_and_login() {
    let app = setup_app().await;
    let credentials = json!({"username": "alice", "password": "hunter2"});

    let registered = send(&app, Method::POST, "/register", Some(credentials.clone())).await;
    assert_eq!(registered.status(), StatusCode::OK);
    assert_eq!(
        body_json(registered).await,
        json!({"message": "User registered successfully", "username": "alice"})
    );

    let again = send(&app, Method::POST, "/register", Some(credentials.clone())).await;
    assert_eq!(again.status(), StatusCode::BAD_REQUEST);

    let login = send(&app, Method::POST, "/login", Some(credentials)).await;
    assert_eq!(login.status(), StatusCode::OK);
    assert_eq!(
        body_json(login).await,
        json!({"message": "Login successful", "user": "alice"})
    );

    let bad = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({"username": "alice", "password": "wrong"})),
    )
    .await;
    assert_eq!(bad.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(bad).await["detail"], "Invalid username or password");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app().await;

    let response = send(&app, Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "healthy");
}
