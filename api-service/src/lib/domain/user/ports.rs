use async_trait::async_trait;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Registration;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;

/// Identity operations: registration, login and user listing.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Hash the password, persist the user and issue a token for it.
    ///
    /// # Errors
    /// * `DatabaseError` - Insert failed, including a taken username
    /// * `Internal` - Hashing or token signing failed
    async fn register(&self, command: RegisterUserCommand) -> Result<Registration, UserError>;

    /// Verify credentials and issue a token.
    ///
    /// # Errors
    /// * `NotFoundByUsername` - No user has this username
    /// * `InvalidCredentials` - User exists but the password does not match
    /// * `DatabaseError` - Lookup failed
    /// * `Internal` - Token signing failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, UserError>;

    /// Retrieve every user's public profile in insertion order.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_users(&self) -> Result<Vec<UserProfile>, UserError>;

    /// Group stored usernames that are near-duplicates of each other.
    ///
    /// With a `candidate`, returns at most one group: the stored usernames
    /// similar to it.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_similar_usernames(
        &self,
        candidate: Option<&str>,
    ) -> Result<Vec<Vec<String>>, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user and return its store-assigned id.
    ///
    /// # Errors
    /// * `DatabaseError` - Insert failed (a duplicate username is one cause)
    async fn create(&self, user: &NewUser) -> Result<UserId, UserError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve all users ordered by id.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<User>, UserError>;

    /// Retrieve all usernames ordered by id.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_usernames(&self) -> Result<Vec<String>, UserError>;

    /// Number of stored users.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn count(&self) -> Result<i64, UserError>;
}
