//! Authentication service: login and profile lookup.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use vetclinic_core::error::VetResult;
use vetclinic_core::models::user::UserProfile;
use vetclinic_core::repository::UserRepository;
use vetclinic_core::validation::{FieldCheck, Rule, Validate};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Input for the login flow.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl Validate for LoginInput {
    fn checks(&self) -> Vec<FieldCheck<'_>> {
        vec![
            FieldCheck::text("email", &self.email, &[Rule::NotEmpty, Rule::Email]),
            FieldCheck::text("password", &self.password, &[Rule::NotEmpty]),
        ]
    }
}

/// Successful login result.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutput {
    /// Signed JWT access token.
    pub access_token: String,
}

/// Authentication service.
///
/// Generic over the user repository so that the auth layer has no
/// dependency on the database crate.
pub struct AuthService<U: UserRepository> {
    user_repo: U,
    config: AuthConfig,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(user_repo: U, config: AuthConfig) -> Self {
        Self { user_repo, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Authenticate with email + password and issue an access token.
    ///
    /// Unknown emails and wrong passwords fail identically.
    pub async fn login(&self, input: LoginInput) -> VetResult<LoginOutput> {
        let Some(user) = self.user_repo.find_by_email(&input.email).await? else {
            warn!("Login rejected: unknown email");
            return Err(AuthError::InvalidCredentials.into());
        };

        if let Err(err) = password::ensure_password(
            &input.password,
            &user.password_hash,
            self.config.pepper.as_deref(),
        ) {
            warn!(user_id = user.id, "Login rejected: password mismatch");
            return Err(err.into());
        }

        let access_token = token::issue_access_token(user.id, &user.email, &self.config)?;
        info!(user_id = user.id, "User logged in");

        Ok(LoginOutput { access_token })
    }

    /// Profile of the authenticated user, including their pets.
    pub async fn get_profile(&self, user_id: i64) -> VetResult<UserProfile> {
        self.user_repo.find_one(user_id).await
    }
}
