//! Login endpoint
//!
//! Exchanges a username and password for a bearer token through whichever
//! [`TokenProvider`](crate::domain::auth::TokenProvider) the state carries.

use axum::{extract::State, routing::post, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiErrorType, Json};
use crate::domain::auth::Credentials;

/// Detail for a request that did not carry both fields
pub const NO_CREDENTIALS: &str = "No credentials were found.";

/// Detail for credentials that did not resolve to a token
pub const INCORRECT_CREDENTIALS: &str = "The credentials were incorrect.";

/// Error code for a `username` or `password` that is neither a string nor null
pub const INVALID_CREDENTIALS_SHAPE: &str = "invalid_credentials_shape";

pub fn create_auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Login request body
///
/// Both fields may be absent or null; that is reported as missing
/// credentials rather than as a malformed body.
#[derive(Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[hidden]"))
            .finish()
    }
}

impl LoginRequest {
    /// Read the request out of a JSON object
    ///
    /// A field of the wrong type is reported with code `invalid_credentials_shape`,
    /// distinct from the extractor's `json_parse_error`.
    pub fn from_body(body: Map<String, Value>) -> Result<Self, ApiError> {
        serde_json::from_value(Value::Object(body)).map_err(|e| {
            ApiError::new(
                axum::http::StatusCode::UNPROCESSABLE_ENTITY,
                ApiErrorType::InvalidRequestError,
                format!("Invalid credentials field: {}", e),
            )
            .with_code(INVALID_CREDENTIALS_SHAPE)
        })
    }

    pub fn into_credentials(self) -> Option<Credentials> {
        Credentials::from_parts(self.username, self.password)
    }
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Exchange credentials for a token
///
/// POST /auth/login
///
/// - 200 `{"token": "..."}` when the provider returns a token
/// - 401 when credentials are missing or do not resolve to a token
/// - 4xx for a body that is not a JSON object
/// - 500 when the provider fails; never reported as a 401
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Some(credentials) = LoginRequest::from_body(body)?.into_credentials() else {
        warn!("Login attempt without credentials");
        return Err(ApiError::unauthorized(NO_CREDENTIALS));
    };

    let provider = state.token_provider.provider_name();
    debug!(provider, username = %credentials.username(), "Requesting token");

    let token = state
        .token_provider
        .get_token(credentials.username(), credentials.password())
        .await
        .map_err(|e| {
            error!(provider, error = %e, "Token provider failed");
            ApiError::internal("Unable to process login at this time")
        })?;

    match token {
        Some(token) => {
            info!(provider, username = %credentials.username(), "Token issued");
            Ok(Json(TokenResponse {
                token: token.into_inner(),
            }))
        }
        None => {
            warn!(provider, username = %credentials.username(), "Login failed");
            Err(ApiError::unauthorized(INCORRECT_CREDENTIALS))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use tower::ServiceExt;

    use crate::api::create_router;
    use crate::domain::auth::MockTokenProvider;
    use crate::domain::token::{AuthToken, Token};
    use crate::domain::user::{MockUserRepository, User, UserId};
    use crate::domain::DomainError;
    use crate::infrastructure::auth::StoreTokenProvider;
    use crate::infrastructure::token::InMemoryTokenRepository;
    use crate::infrastructure::user::{
        Argon2Hasher, InMemoryUserRepository, PasswordHasher, UserCredentialStore,
    };

    /// Provider that accepts alice/correct and answers with tok_123
    fn alice_provider(times: usize) -> MockTokenProvider {
        let mut provider = MockTokenProvider::new();
        provider.expect_provider_name().return_const("mock");
        provider
            .expect_get_token()
            .times(times)
            .returning(|username, password| {
                if username == "alice" && password == "correct" {
                    Ok(Some(Token::new("tok_123")))
                } else {
                    Ok(None)
                }
            });
        provider
    }

    fn app_with(provider: MockTokenProvider) -> Router {
        create_router(AppState::new(
            Arc::new(provider),
            Arc::new(MockUserRepository::new()),
        ))
    }

    async fn post_login(app: Router, body: &str) -> Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_login_success() {
        let app = app_with(alice_provider(1));

        let response = post_login(app, r#"{"username": "alice", "password": "correct"}"#).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::json!({"token": "tok_123"}));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let app = app_with(alice_provider(1));

        let response = post_login(app, r#"{"username": "alice", "password": "wrong"}"#).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(response).await;
        assert_eq!(body["detail"], INCORRECT_CREDENTIALS);
        assert_eq!(body["type"], "authentication_error");
    }

    #[tokio::test]
    async fn test_login_empty_body_object() {
        let app = app_with(alice_provider(0));

        let response = post_login(app, "{}").await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["detail"], NO_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_login_missing_password() {
        let app = app_with(alice_provider(0));

        let response = post_login(app, r#"{"username": "alice"}"#).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["detail"], NO_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_login_empty_or_null_fields() {
        for body in [
            r#"{"username": "", "password": "correct"}"#,
            r#"{"username": "alice", "password": ""}"#,
            r#"{"username": null, "password": "correct"}"#,
        ] {
            let response = post_login(app_with(alice_provider(0)), body).await;

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(json_body(response).await["detail"], NO_CREDENTIALS);
        }
    }

    #[tokio::test]
    async fn test_login_malformed_json() {
        let app = app_with(alice_provider(0));

        let response = post_login(app, "{not json").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["code"], "json_parse_error");
    }

    #[tokio::test]
    async fn test_login_body_not_an_object() {
        for body in [r#"["alice", "correct"]"#, r#""alice""#] {
            let response = post_login(app_with(alice_provider(0)), body).await;

            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(json_body(response).await["code"], "json_parse_error");
        }
    }

    #[tokio::test]
    async fn test_login_non_string_field() {
        let app = app_with(alice_provider(0));

        let response = post_login(app, r#"{"username": 42, "password": "correct"}"#).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["type"], "invalid_request_error");
        assert_eq!(body["code"], INVALID_CREDENTIALS_SHAPE);
    }

    #[tokio::test]
    async fn test_login_provider_failure_is_server_error() {
        let mut provider = MockTokenProvider::new();
        provider.expect_provider_name().return_const("mock");
        provider
            .expect_get_token()
            .times(1)
            .returning(|_, _| Err(DomainError::storage("token store unavailable")));

        let response = post_login(
            app_with(provider),
            r#"{"username": "alice", "password": "correct"}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["type"], "server_error");
        assert_ne!(body["detail"], INCORRECT_CREDENTIALS);
        assert!(!body["detail"].as_str().unwrap().contains("token store"));
    }

    #[tokio::test]
    async fn test_login_ignores_extra_fields() {
        let app = app_with(alice_provider(1));

        let response = post_login(
            app,
            r#"{"username": "alice", "password": "correct", "remember": true}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_with_store_provider_is_idempotent() {
        let hasher = Arc::new(Argon2Hasher::new());
        let alice = UserId::new("alice").unwrap();
        let users = Arc::new(InMemoryUserRepository::with_users(vec![User::new(
            alice.clone(),
            "alice",
            hasher.hash("correct-horse").unwrap(),
        )]));
        let tokens = Arc::new(InMemoryTokenRepository::with_tokens(vec![AuthToken::new(
            Token::new("tok_123"),
            alice,
        )]));
        let provider = StoreTokenProvider::new(
            Arc::new(UserCredentialStore::new(users.clone(), hasher)),
            tokens,
        );
        let app = create_router(AppState::new(Arc::new(provider), users));

        for _ in 0..2 {
            let response = post_login(
                app.clone(),
                r#"{"username": "alice", "password": "correct-horse"}"#,
            )
            .await;

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(json_body(response).await["token"], "tok_123");
        }

        let response = post_login(app, r#"{"username": "alice", "password": "wrong"}"#).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_login_request_debug_hides_password() {
        let request = LoginRequest {
            username: Some("alice".to_string()),
            password: Some("hunter22".to_string()),
        };

        assert!(!format!("{:?}", request).contains("hunter22"));
    }
}
