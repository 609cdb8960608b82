//! Command line entry points
//!
//! - `serve`: run the login API
//! - `hash-password`: print an Argon2 hash for provisioning accounts by hand

pub mod hash_password;
pub mod serve;

use clap::{Parser, Subcommand};

/// Token authentication service
#[derive(Parser)]
#[command(name = "token-auth")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Hash a password with Argon2 and print the PHC string
    HashPassword(hash_password::HashPasswordArgs),
}
