use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AccountRecord;
use crate::account::models::AccountStatus;
use crate::account::models::AccountUpdate;
use crate::account::models::EmailAddress;
use crate::account::models::PersonName;
use crate::account::ports::AccountRepository;

const ACCOUNT_COLUMNS: &str =
    "id, first_name, last_name, email, password_hash, role, status, created_at, updated_at";

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &PgRow) -> Result<AccountRecord, AccountError> {
        let id: Uuid = Self::column(row, "id")?;
        let first_name: String = Self::column(row, "first_name")?;
        let last_name: String = Self::column(row, "last_name")?;
        let email: String = Self::column(row, "email")?;
        let role: String = Self::column(row, "role")?;
        let status: String = Self::column(row, "status")?;
        let created_at: DateTime<Utc> = Self::column(row, "created_at")?;
        let updated_at: DateTime<Utc> = Self::column(row, "updated_at")?;

        Ok(AccountRecord {
            account: Account {
                id: AccountId(id),
                first_name: PersonName::new(first_name)?,
                last_name: PersonName::new(last_name)?,
                email: EmailAddress::new(email)?,
                role: role.parse()?,
                status: status.parse()?,
                created_at,
                updated_at,
            },
            password_hash: Self::column(row, "password_hash")?,
        })
    }

    fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, AccountError>
    where
        T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
    {
        row.try_get(name)
            .map_err(|e| AccountError::DatabaseError(e.to_string()))
    }

    fn map_write_error(e: sqlx::Error, email: &EmailAddress) -> AccountError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() && db_err.constraint() == Some("accounts_email_key") {
                return AccountError::AlreadyExists(email.to_string());
            }
        }
        AccountError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, record: AccountRecord) -> Result<Account, AccountError> {
        let account = &record.account;

        sqlx::query(
            r#"
            INSERT INTO accounts
                (id, first_name, last_name, email, password_hash, role, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(account.id.0)
        .bind(account.first_name.as_str())
        .bind(account.last_name.as_str())
        .bind(account.email.as_str())
        .bind(&record.password_hash)
        .bind(account.role.as_str())
        .bind(account.status.as_str())
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &account.email))?;

        Ok(record.account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM accounts WHERE id = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.as_ref()
            .map(|r| Self::row_to_record(r).map(|record| record.account))
            .transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<AccountRecord>, AccountError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM accounts WHERE email = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM accounts ORDER BY created_at DESC",
            ACCOUNT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        rows.iter()
            .map(|r| Self::row_to_record(r).map(|record| record.account))
            .collect()
    }

    async fn update(
        &self,
        id: &AccountId,
        update: AccountUpdate,
    ) -> Result<Account, AccountError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE accounts
            SET role = COALESCE($2, role),
                status = COALESCE($3, status),
                updated_at = $4
            WHERE id = $1
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        ))
        .bind(id.0)
        .bind(update.role.map(|role| role.as_str()))
        .bind(update.status.map(|status| status.as_str()))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => Ok(Self::row_to_record(&r)?.account),
            None => Err(AccountError::NotFound(id.to_string())),
        }
    }

    async fn update_status(
        &self,
        id: &AccountId,
        status: AccountStatus,
    ) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE accounts
            SET status = $2, updated_at = $3
            WHERE id = $1 AND status <> $2
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        ))
        .bind(id.0)
        .bind(status.as_str())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        if let Some(r) = row {
            return Ok(Some(Self::row_to_record(&r)?.account));
        }

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM accounts WHERE id = $1)")
                .bind(id.0)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        if exists {
            Ok(None)
        } else {
            Err(AccountError::NotFound(id.to_string()))
        }
    }

    async fn delete(&self, id: &AccountId) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"
            DELETE FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn upsert_by_email(&self, record: AccountRecord) -> Result<Account, AccountError> {
        let account = &record.account;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO accounts
                (id, first_name, last_name, email, password_hash, role, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT ON CONSTRAINT accounts_email_key DO UPDATE
            SET first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                password_hash = EXCLUDED.password_hash,
                role = EXCLUDED.role,
                updated_at = EXCLUDED.updated_at
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        ))
        .bind(account.id.0)
        .bind(account.first_name.as_str())
        .bind(account.last_name.as_str())
        .bind(account.email.as_str())
        .bind(&record.password_hash)
        .bind(account.role.as_str())
        .bind(account.status.as_str())
        .bind(account.created_at)
        .bind(account.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(Self::row_to_record(&row)?.account)
    }
}
