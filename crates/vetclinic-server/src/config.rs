//! Command-line and environment configuration.

use std::time::Duration;

use clap::Parser;
use vetclinic_auth::AuthConfig;
use vetclinic_db::DbConfig;

/// Vet clinic backend: users, pets and appointments over HTTP.
#[derive(Parser, Debug, Clone)]
#[command(name = "vetclinic")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT")]
    pub port: u16,

    /// Full database endpoint (e.g. `ws://db:8000` or `mem://`);
    /// overrides the host and port below
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    #[arg(long, default_value = "127.0.0.1", env = "DATABASE_HOST")]
    pub database_host: String,

    #[arg(long, default_value = "8000", env = "DATABASE_PORT")]
    pub database_port: u16,

    #[arg(long, default_value = "root", env = "DATABASE_USER")]
    pub database_user: String,

    #[arg(long, default_value = "root", env = "DATABASE_PASSWORD", hide_env_values = true)]
    pub database_password: String,

    #[arg(long, default_value = "vetclinic", env = "DATABASE_NAMESPACE")]
    pub database_namespace: String,

    #[arg(long, default_value = "main", env = "DATABASE_NAME")]
    pub database_name: String,

    /// Secret used to sign access tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    #[arg(long, default_value = "vetclinic", env = "JWT_ISSUER")]
    pub jwt_issuer: String,

    /// Access token lifetime in seconds
    #[arg(long, default_value = "3600", env = "JWT_LIFETIME_SECS")]
    pub jwt_lifetime_secs: u64,

    /// Optional server-side secret mixed into password hashes
    #[arg(long, env = "PASSWORD_PEPPER", hide_env_values = true)]
    pub password_pepper: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "10", env = "REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: u64,
}

impl Cli {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            host: self.database_host.clone(),
            port: self.database_port,
            username: self.database_user.clone(),
            password: self.database_password.clone(),
            namespace: self.database_namespace.clone(),
            database: self.database_name.clone(),
            url: self.database_url.clone(),
        }
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            jwt_secret: self.jwt_secret.clone(),
            jwt_issuer: self.jwt_issuer.clone(),
            access_token_lifetime_secs: self.jwt_lifetime_secs,
            pepper: self.password_pepper.clone(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
