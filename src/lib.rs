//! Token Auth
//!
//! Username/password login that answers with a bearer token. The token comes
//! from a pluggable [`TokenProvider`](domain::auth::TokenProvider):
//! - `store`: the token provisioned for the user in the token store (default)
//! - `jwt`: a freshly signed JWT

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{bail, Context};
use api::state::AppState;
use config::{ProviderKind, SeedUser, StorageBackend};
use domain::auth::{CredentialStore, TokenProvider};
use domain::token::{AuthToken, Token, TokenRepository};
use domain::user::UserRepository;
use infrastructure::{
    auth::{JwtConfig, JwtTokenProvider, StoreTokenProvider},
    storage,
    token::{InMemoryTokenRepository, PostgresTokenRepository, TokenGenerator},
    user::{
        Argon2Hasher, CreateUserRequest, InMemoryUserRepository, PasswordHasher,
        PostgresUserRepository, UserCredentialStore, UserService,
    },
};
use tracing::{debug, info};

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let (user_repository, token_repository) = create_repositories(config).await?;
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher::new());

    provision_users(
        &config.auth.users,
        &UserService::new(user_repository.clone(), password_hasher.clone()),
        token_repository.as_ref(),
    )
    .await?;

    let credential_store: Arc<dyn CredentialStore> = Arc::new(UserCredentialStore::new(
        user_repository.clone(),
        password_hasher,
    ));

    let token_provider: Arc<dyn TokenProvider> = match config.auth.provider {
        ProviderKind::Store => Arc::new(StoreTokenProvider::new(credential_store, token_repository)),
        ProviderKind::Jwt => {
            let secret = config
                .auth
                .jwt
                .secret
                .clone()
                .filter(|s| !s.is_empty())
                .context("auth.jwt.secret is required when auth.provider is jwt")?;

            Arc::new(
                JwtTokenProvider::new(
                    credential_store,
                    JwtConfig::new(secret, config.auth.jwt.expiration_hours),
                )
                .context("Invalid auth.jwt settings")?,
            )
        }
    };

    info!(
        provider = token_provider.provider_name(),
        "Token provider initialized"
    );

    Ok(AppState::new(token_provider, user_repository))
}

async fn create_repositories(
    config: &AppConfig,
) -> anyhow::Result<(Arc<dyn UserRepository>, Arc<dyn TokenRepository>)> {
    match config.storage.backend {
        StorageBackend::InMemory => {
            info!("Using in-memory storage");
            Ok((
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryTokenRepository::new()),
            ))
        }
        StorageBackend::Postgres => {
            let database_url = config
                .storage
                .resolve_database_url()
                .context("storage.database_url or DATABASE_URL is required for postgres storage")?;

            let pool = storage::connect_and_migrate(&database_url).await?;

            Ok((
                Arc::new(PostgresUserRepository::new(pool.clone())),
                Arc::new(PostgresTokenRepository::new(pool)),
            ))
        }
    }
}

/// Make sure every configured account exists and holds a token
///
/// Existing accounts keep their password and the token they already hold, so
/// restarts against a persistent store keep handed-out tokens. An account
/// left without a token by an interrupted start gets one on the next start.
async fn provision_users(
    users: &[SeedUser],
    user_service: &UserService,
    tokens: &dyn TokenRepository,
) -> anyhow::Result<()> {
    check_seed_tokens(users)?;

    let generator = TokenGenerator::default();

    for seed in users {
        let user = match user_service.get_by_username(&seed.username).await? {
            Some(user) => user,
            None => {
                let user = user_service
                    .create(CreateUserRequest {
                        id: seed.id.clone(),
                        username: seed.username.clone(),
                        password: seed.password.clone(),
                    })
                    .await
                    .with_context(|| format!("Failed to provision user '{}'", seed.username))?;

                info!(user_id = %user.id(), username = %user.username(), "User provisioned");
                user
            }
        };

        if tokens.find_token_for_user(user.id()).await?.is_some() {
            debug!(username = %user.username(), "User already holds a token");
            continue;
        }

        let token = match &seed.token {
            Some(token) => Token::new(token.clone()),
            None => generator.generate(),
        };

        tokens
            .create(AuthToken::new(token, user.id().clone()))
            .await
            .with_context(|| format!("Failed to provision token for '{}'", seed.username))?;

        info!(user_id = %user.id(), "Token provisioned");
    }

    Ok(())
}

/// Reject configured tokens that are empty or shared before anything is written
fn check_seed_tokens(users: &[SeedUser]) -> anyhow::Result<()> {
    let mut seen = HashSet::new();

    for seed in users {
        let Some(token) = seed.token.as_deref() else {
            continue;
        };

        if token.is_empty() {
            bail!("auth.users: token for '{}' must not be empty", seed.username);
        }

        if !seen.insert(token) {
            bail!(
                "auth.users: token for '{}' is already configured for another user",
                seed.username
            );
        }
    }

    Ok(())
}
