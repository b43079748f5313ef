use std::time::Duration;

use axum::Router;
use axum::http::{Method, StatusCode, header};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{appointments, auth, health, pets, users};
use crate::state::AppState;

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(users::router())
        .merge(pets::router())
        .merge(appointments::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use vetclinic_auth::AuthConfig;
    use vetclinic_db::{DbConfig, DbManager, run_migrations};

    async fn test_app() -> Router {
        let manager = DbManager::connect(&DbConfig {
            url: Some("mem://".into()),
            namespace: "test".into(),
            database: "test".into(),
            ..Default::default()
        })
        .await
        .unwrap();
        let db = manager.client();
        run_migrations(&db).await.unwrap();

        let auth = AuthConfig {
            jwt_secret: "router-test-secret".into(),
            ..Default::default()
        };
        create_app(AppState::new(db, auth), Duration::from_secs(10))
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn signup_and_login(app: &Router) -> String {
        let (status, _) = send(
            app,
            "POST",
            "/users",
            None,
            Some(json!({"name": "A", "email": "a@x.com", "password": "p"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            app,
            "POST",
            "/auth/login",
            None,
            Some(json!({"email": "a@x.com", "password": "p"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["access_token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_is_public() {
        let app = test_app().await;
        let (status, body) = send(&app, "GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn signup_never_returns_the_password_hash() {
        let app = test_app().await;
        let (status, body) = send(
            &app,
            "POST",
            "/users",
            None,
            Some(json!({"name": "A", "email": "a@x.com", "password": "p"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["email"], "a@x.com");
        assert!(body.get("password_hash").is_none());
        assert!(body.get("password").is_none());
    }

    #[tokio::test]
    async fn duplicate_signup_is_409() {
        let app = test_app().await;
        signup_and_login(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/users",
            None,
            Some(json!({"name": "B", "email": "a@x.com", "password": "q"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "email_conflict");
    }

    #[tokio::test]
    async fn invalid_signup_is_400() {
        let app = test_app().await;
        let (status, body) = send(
            &app,
            "POST",
            "/users",
            None,
            Some(json!({"name": "", "email": "not-an-email", "password": "p"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn protected_routes_require_a_token() {
        let app = test_app().await;

        let (status, _) = send(&app, "GET", "/pets", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, "GET", "/appointments", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_password_is_401() {
        let app = test_app().await;
        signup_and_login(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/auth/login",
            None,
            Some(json!({"email": "a@x.com", "password": "wrong"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "invalid_credentials");
    }

    #[tokio::test]
    async fn register_pet_and_read_profile() {
        let app = test_app().await;
        let token = signup_and_login(&app).await;

        let (status, pet) = send(
            &app,
            "POST",
            "/pets",
            Some(&token),
            Some(json!({"name": "Rex", "species": "dog", "age": 3, "weight": 12})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(pet["weight"], 12.0);
        assert_eq!(pet["userId"], 1);

        let (status, profile) = send(&app, "GET", "/auth/profile", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(profile["pets"][0]["name"], "Rex");
    }

    #[tokio::test]
    async fn oversized_pet_weight_is_400_and_not_stored() {
        let app = test_app().await;
        let token = signup_and_login(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/pets",
            Some(&token),
            Some(json!({"name": "Rex", "species": "dog", "age": 3, "weight": 1e300})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");

        let (status, pets) = send(&app, "GET", "/pets", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(pets.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn appointment_for_missing_pet_is_404() {
        let app = test_app().await;
        let token = signup_and_login(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/appointments",
            Some(&token),
            Some(json!({"date": "2025-03-10", "service": "checkup", "petId": 99})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body["message"],
            "Pet with ID 99 not found. Cannot create appointment."
        );
    }

    #[tokio::test]
    async fn appointments_filter_by_service() {
        let app = test_app().await;
        let token = signup_and_login(&app).await;
        send(
            &app,
            "POST",
            "/pets",
            Some(&token),
            Some(json!({"name": "Rex", "species": "dog", "age": 3, "weight": 12})),
        )
        .await;

        for service in ["vaccination", "grooming"] {
            let (status, _) = send(
                &app,
                "POST",
                "/appointments",
                Some(&token),
                Some(json!({"date": "2025-03-10", "service": service, "petId": 1})),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(
            &app,
            "GET",
            "/appointments?service=grooming",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["service"], "grooming");
        assert_eq!(list[0]["pet"]["name"], "Rex");

        let (status, _) = send(
            &app,
            "GET",
            "/appointments?petId=abc",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn password_update_is_rejected() {
        let app = test_app().await;
        let token = signup_and_login(&app).await;

        let (status, body) = send(
            &app,
            "PATCH",
            "/users/1",
            Some(&token),
            Some(json!({"password": "new"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "password_immutable");
    }

    #[tokio::test]
    async fn non_numeric_id_is_400_and_missing_id_is_404() {
        let app = test_app().await;
        let token = signup_and_login(&app).await;

        let (status, _) = send(&app, "GET", "/pets/abc", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, "DELETE", "/pets/42", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }
}
