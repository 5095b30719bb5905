use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AccountRecord;
use crate::account::models::AccountStatus;
use crate::account::models::AccountUpdate;
use crate::account::models::CreateAccountCommand;
use crate::account::models::EmailAddress;
use crate::account::models::LoginCommand;
use crate::account::models::LoginOutcome;
use crate::account::models::RegisterAccountCommand;
use crate::account::models::Role;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account with role `user` and status `active`.
    ///
    /// # Errors
    /// * `AlreadyExists` - Email is already registered
    /// * `Password` - Password is empty or could not be hashed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError>;

    /// Create an account with an explicit role.
    ///
    /// # Errors
    /// * `AlreadyExists` - Email is already registered
    /// * `Password` - Password is empty or could not be hashed
    /// * `DatabaseError` - Database operation failed
    async fn create_account(&self, command: CreateAccountCommand) -> Result<Account, AccountError>;

    /// Create or overwrite accounts keyed by email.
    ///
    /// # Returns
    /// The seeded accounts, in input order
    ///
    /// # Errors
    /// * `Password` - A password is empty or could not be hashed
    /// * `DatabaseError` - Database operation failed
    async fn seed_accounts(
        &self,
        commands: Vec<CreateAccountCommand>,
    ) -> Result<Vec<Account>, AccountError>;

    /// Check credentials and issue a token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `Deactivated` - Credentials are correct but the account is inactive
    /// * `Password` - Stored hash is unusable
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AccountError>;

    /// Retrieve account by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError>;

    /// Retrieve every account.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError>;

    /// Activate or deactivate `target` on behalf of `actor`.
    ///
    /// # Errors
    /// * `NotFound` - Target does not exist
    /// * `Forbidden` - Actor targets itself, or the target outranks the actor
    /// * `Conflict` - Target is already in the requested status
    /// * `DatabaseError` - Database operation failed
    async fn change_status(
        &self,
        actor: &Account,
        target: &AccountId,
        status: AccountStatus,
    ) -> Result<Account, AccountError>;

    /// Change the role of `target` on behalf of `actor`.
    ///
    /// # Errors
    /// * `NotFound` - Target does not exist
    /// * `Forbidden` - Target is inactive, outranks the actor, or the role outranks the actor
    /// * `DatabaseError` - Database operation failed
    async fn change_role(
        &self,
        actor: &Account,
        target: &AccountId,
        role: Role,
    ) -> Result<Account, AccountError>;

    /// Permanently delete an account.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_account(&self, id: &AccountId) -> Result<(), AccountError>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `AlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, record: AccountRecord) -> Result<Account, AccountError>;

    /// Retrieve account by identifier, without its password hash.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve account and password hash by email.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<AccountRecord>, AccountError>;

    /// Retrieve all accounts, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Account>, AccountError>;

    /// Apply a partial update.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, id: &AccountId, update: AccountUpdate)
        -> Result<Account, AccountError>;

    /// Set the status unless the account already holds it. The check and the
    /// write are one atomic step.
    ///
    /// # Returns
    /// `None` when the account is already in `status`
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_status(
        &self,
        id: &AccountId,
        status: AccountStatus,
    ) -> Result<Option<Account>, AccountError>;

    /// Remove account from storage.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &AccountId) -> Result<(), AccountError>;

    /// Insert the record, or overwrite names, role and password hash of the
    /// account already holding its email. Identity and creation time of an
    /// existing account are kept.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn upsert_by_email(&self, record: AccountRecord) -> Result<Account, AccountError>;
}
