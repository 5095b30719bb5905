use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

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
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;
use crate::domain::auth::policy;
use crate::domain::auth::policy::PolicyViolation;

/// Domain service implementation for account operations.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn new_record(&self, command: CreateAccountCommand) -> Result<AccountRecord, AccountError> {
        let password_hash = self.authenticator.hash_password(&command.password)?;
        let now = Utc::now();

        Ok(AccountRecord {
            account: Account {
                id: AccountId::new(),
                first_name: command.first_name,
                last_name: command.last_name,
                email: command.email,
                role: command.role,
                status: AccountStatus::Active,
                created_at: now,
                updated_at: now,
            },
            password_hash,
        })
    }

    async fn find_existing(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError> {
        self.create_account(command.with_role(Role::User)).await
    }

    async fn create_account(&self, command: CreateAccountCommand) -> Result<Account, AccountError> {
        if self.repository.find_by_email(&command.email).await?.is_some() {
            return Err(AccountError::AlreadyExists(command.email.to_string()));
        }

        let record = self.new_record(command)?;
        let account = self.repository.create(record).await?;

        tracing::info!(
            account_id = %account.id,
            role = %account.role,
            "Account created"
        );

        Ok(account)
    }

    async fn seed_accounts(
        &self,
        commands: Vec<CreateAccountCommand>,
    ) -> Result<Vec<Account>, AccountError> {
        let mut seeded = Vec::with_capacity(commands.len());

        for command in commands {
            let record = self.new_record(command)?;
            let account = self.repository.upsert_by_email(record).await?;
            tracing::info!(
                account_id = %account.id,
                email = %account.email,
                role = %account.role,
                "Account seeded"
            );
            seeded.push(account);
        }

        Ok(seeded)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AccountError> {
        let email =
            EmailAddress::new(command.email).map_err(|_| AccountError::InvalidCredentials)?;

        let record = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !self
            .authenticator
            .verify_password(&command.password, &record.password_hash)?
        {
            return Err(AccountError::InvalidCredentials);
        }

        if !record.account.is_active() {
            tracing::warn!(account_id = %record.account.id, "Login refused for deactivated account");
            return Err(AccountError::Deactivated);
        }

        let token = self
            .authenticator
            .issue_token(&record.account.id.to_string())
            .map_err(|e| AccountError::Unknown(format!("Token generation failed: {}", e)))?;

        tracing::info!(account_id = %record.account.id, "Account logged in");

        Ok(LoginOutcome {
            account: record.account,
            token,
        })
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.find_existing(id).await
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError> {
        self.repository.list_all().await
    }

    async fn change_status(
        &self,
        actor: &Account,
        target: &AccountId,
        status: AccountStatus,
    ) -> Result<Account, AccountError> {
        let account = self.find_existing(target).await?;

        policy::ensure_not_self(actor, &account)?;
        policy::ensure_not_outranked(actor, &account)?;
        policy::ensure_status_transition(account.status, status)?;

        let updated = self
            .repository
            .update_status(target, status)
            .await?
            .ok_or_else(|| AccountError::from(PolicyViolation::already_in(status)))?;

        tracing::info!(
            actor_id = %actor.id,
            account_id = %updated.id,
            status = %updated.status,
            "Account status changed"
        );

        Ok(updated)
    }

    async fn change_role(
        &self,
        actor: &Account,
        target: &AccountId,
        role: Role,
    ) -> Result<Account, AccountError> {
        let account = self.find_existing(target).await?;

        policy::ensure_active_target(&account)?;
        policy::ensure_not_outranked(actor, &account)?;
        policy::ensure_can_grant(actor, role)?;

        let updated = self
            .repository
            .update(target, AccountUpdate::role(role))
            .await?;

        tracing::info!(
            actor_id = %actor.id,
            account_id = %updated.id,
            role = %updated.role,
            "Account role changed"
        );

        Ok(updated)
    }

    async fn delete_account(&self, id: &AccountId) -> Result<(), AccountError> {
        self.repository.delete(id).await?;

        tracing::info!(account_id = %id, "Account deleted");

        Ok(())
    }
}
