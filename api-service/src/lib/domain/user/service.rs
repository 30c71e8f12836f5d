use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Registration;
use crate::domain::user::models::UserProfile;
use crate::domain::user::similarity;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for identity operations.
///
/// Holds no user state between calls; every request reads the store afresh.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hasher and token issuer
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<Registration, UserError> {
        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())
            .map_err(|e| UserError::Internal(format!("Password hashing failed: {}", e)))?;

        let new_user = NewUser {
            username: command.username,
            password_hash,
            first_name: command.first_name,
            last_name: command.last_name,
            created_at: Utc::now(),
        };

        let user_id = self.repository.create(&new_user).await?;

        let token = self
            .authenticator
            .issue_token(user_id)
            .map_err(|e| UserError::Internal(format!("Token generation failed: {}", e)))?;

        tracing::info!(
            user_id = %user_id,
            username = %new_user.username,
            "User registered"
        );

        Ok(Registration { user_id, token })
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, UserError> {
        let user = self
            .repository
            .find_by_username(&command.username)
            .await?
            .ok_or_else(|| UserError::NotFoundByUsername(command.username.to_string()))?;

        let result = self
            .authenticator
            .authenticate(command.password.expose(), &user.password_hash, user.id)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
                AuthenticationError::JwtError(err) => {
                    UserError::Internal(format!("Token generation failed: {}", err))
                }
            })?;

        tracing::debug!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome {
            token: result.access_token,
            profile: UserProfile::from(&user),
        })
    }

    async fn list_users(&self) -> Result<Vec<UserProfile>, UserError> {
        let users = self.repository.list_all().await?;
        Ok(users.iter().map(UserProfile::from).collect())
    }

    async fn find_similar_usernames(
        &self,
        candidate: Option<&str>,
    ) -> Result<Vec<Vec<String>>, UserError> {
        let usernames = self.repository.list_usernames().await?;

        let groups = match candidate {
            Some(candidate) => {
                let matches = similarity::similar_to(candidate, &usernames);
                if matches.is_empty() {
                    Vec::new()
                } else {
                    vec![matches]
                }
            }
            None => similarity::group_similar(&usernames),
        };

        Ok(groups)
    }
}
