//! User domain
//!
//! Accounts held by the credential store. The token flow only ever sees a
//! [`UserId`] coming out of a successful credential check.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserId, UserStatus};
pub use repository::UserRepository;
pub use validation::{
    validate_password, validate_user_id, validate_username, UserValidationError,
};

#[cfg(test)]
pub use repository::mock::MockUserRepository;
