//! Hash-password command

use clap::Args;

use crate::infrastructure::user::{Argon2Hasher, PasswordHasher};

#[derive(Args, Debug)]
pub struct HashPasswordArgs {
    /// Plain-text password to hash
    pub password: String,
}

/// Print the Argon2 hash of the given password to stdout
pub fn run(args: HashPasswordArgs) -> anyhow::Result<()> {
    let hash = Argon2Hasher::new().hash(&args.password)?;
    println!("{}", hash);

    Ok(())
}
