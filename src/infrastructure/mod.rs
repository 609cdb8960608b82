//! Infrastructure layer - storage, hashing and token provider implementations

pub mod auth;
pub mod logging;
pub mod storage;
pub mod token;
pub mod user;
