//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuthConfig, JwtSettings, LogFormat, LoggingConfig, ProviderKind, SeedUser,
    ServerConfig, StorageBackend, StorageConfig,
};
