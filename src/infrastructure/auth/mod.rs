//! Token provider implementations
//!
//! [`StoreTokenProvider`] is the default; [`JwtTokenProvider`] mints signed
//! tokens instead of reading provisioned ones.

mod jwt;
mod store_provider;

pub use jwt::{JwtClaims, JwtConfig, JwtTokenProvider, MAX_EXPIRATION_HOURS};
pub use store_provider::StoreTokenProvider;
