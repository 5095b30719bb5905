#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::HashParams;
use auth::PasswordHasher;
use auth::TokenService;
use blog_service::account::errors::AccountError;
use blog_service::account::models::Account;
use blog_service::account::models::AccountId;
use blog_service::account::models::AccountRecord;
use blog_service::account::models::AccountStatus;
use blog_service::account::models::AccountUpdate;
use blog_service::account::models::CreateAccountCommand;
use blog_service::account::models::EmailAddress;
use blog_service::account::models::PersonName;
use blog_service::account::models::Role;
use blog_service::account::ports::AccountRepository;
use blog_service::account::ports::AccountServicePort;
use blog_service::account::service::AccountService;
use blog_service::domain::auth::gate::AuthGate;
use blog_service::inbound::http::router::create_router;
use blog_service::post::errors::PostError;
use blog_service::post::models::record_view;
use blog_service::post::models::Post;
use blog_service::post::models::PostAuthor;
use blog_service::post::models::PostDetails;
use blog_service::post::models::PostFilter;
use blog_service::post::models::PostId;
use blog_service::post::ports::PostRepository;
use blog_service::post::service::PostService;
use chrono::Duration;
use chrono::Utc;
use tokio::sync::RwLock;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_PASSWORD: &str = "pass_word!";

/// Account storage kept in process memory.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    records: RwLock<HashMap<AccountId, AccountRecord>>,
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, record: AccountRecord) -> Result<Account, AccountError> {
        let mut records = self.records.write().await;

        if records
            .values()
            .any(|existing| existing.account.email == record.account.email)
        {
            return Err(AccountError::AlreadyExists(
                record.account.email.to_string(),
            ));
        }

        let account = record.account.clone();
        records.insert(account.id, record);
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        Ok(self
            .records
            .read()
            .await
            .get(id)
            .map(|record| record.account.clone()))
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<AccountRecord>, AccountError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .find(|record| &record.account.email == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        let mut accounts: Vec<Account> = self
            .records
            .read()
            .await
            .values()
            .map(|record| record.account.clone())
            .collect();
        accounts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(accounts)
    }

    async fn update(
        &self,
        id: &AccountId,
        update: AccountUpdate,
    ) -> Result<Account, AccountError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(id)
            .ok_or_else(|| AccountError::NotFound(id.to_string()))?;

        update.apply(&mut record.account, Utc::now());
        Ok(record.account.clone())
    }

    async fn update_status(
        &self,
        id: &AccountId,
        status: AccountStatus,
    ) -> Result<Option<Account>, AccountError> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(id)
            .ok_or_else(|| AccountError::NotFound(id.to_string()))?;

        if record.account.status == status {
            return Ok(None);
        }

        AccountUpdate::status(status).apply(&mut record.account, Utc::now());
        Ok(Some(record.account.clone()))
    }

    async fn delete(&self, id: &AccountId) -> Result<(), AccountError> {
        self.records
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AccountError::NotFound(id.to_string()))
    }

    async fn upsert_by_email(&self, record: AccountRecord) -> Result<Account, AccountError> {
        let mut records = self.records.write().await;

        if let Some(existing) = records
            .values_mut()
            .find(|existing| existing.account.email == record.account.email)
        {
            existing.account.first_name = record.account.first_name;
            existing.account.last_name = record.account.last_name;
            existing.account.role = record.account.role;
            existing.account.updated_at = record.account.updated_at;
            existing.password_hash = record.password_hash;
            return Ok(existing.account.clone());
        }

        let account = record.account.clone();
        records.insert(account.id, record);
        Ok(account)
    }
}

/// Post storage kept in process memory. Authors are read from the shared
/// account storage, and posts whose author is gone are left out.
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<PostId, Post>>,
    accounts: Arc<InMemoryAccountRepository>,
}

impl InMemoryPostRepository {
    pub fn new(accounts: Arc<InMemoryAccountRepository>) -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
            accounts,
        }
    }

    async fn with_author(&self, post: Post) -> Result<Option<PostDetails>, PostError> {
        let author = self
            .accounts
            .find_by_id(&post.author_id)
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(author.map(|account| PostDetails {
            post,
            author: PostAuthor::from(&account),
        }))
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: Post) -> Result<Post, PostError> {
        self.posts.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError> {
        Ok(self.posts.read().await.get(id).cloned())
    }

    async fn list_all(&self, filter: &PostFilter) -> Result<Vec<PostDetails>, PostError> {
        let mut posts: Vec<Post> = self
            .posts
            .read()
            .await
            .values()
            .filter(|post| filter.matches(post))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut listed = Vec::with_capacity(posts.len());
        for post in posts {
            if let Some(details) = self.with_author(post).await? {
                listed.push(details);
            }
        }
        Ok(listed)
    }

    async fn increment_views(&self, id: &PostId) -> Result<PostDetails, PostError> {
        let viewed = {
            let mut posts = self.posts.write().await;
            let stored = posts
                .get_mut(id)
                .ok_or_else(|| PostError::NotFound(id.to_string()))?;
            *stored = record_view(stored.clone());
            stored.clone()
        };

        self.with_author(viewed)
            .await?
            .ok_or_else(|| PostError::NotFound(id.to_string()))
    }

    async fn update(&self, post: Post) -> Result<Post, PostError> {
        let mut posts = self.posts.write().await;
        match posts.get_mut(&post.id) {
            Some(stored) => {
                *stored = Post {
                    views: stored.views,
                    ..post
                };
                Ok(stored.clone())
            }
            None => Err(PostError::NotFound(post.id.to_string())),
        }
    }

    async fn delete(&self, id: &PostId) -> Result<(), PostError> {
        self.posts
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| PostError::NotFound(id.to_string()))
    }
}

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub accounts: Arc<InMemoryAccountRepository>,
    pub account_service: Arc<AccountService<InMemoryAccountRepository>>,
    pub authenticator: Arc<Authenticator>,
}

pub fn test_authenticator() -> Authenticator {
    let hasher = PasswordHasher::with_params(HashParams {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .expect("Invalid test hash parameters");
    Authenticator::new(hasher, TokenService::new(TEST_SECRET, Duration::hours(24)))
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let accounts = Arc::new(InMemoryAccountRepository::default());
        let posts = Arc::new(InMemoryPostRepository::new(Arc::clone(&accounts)));
        let authenticator = Arc::new(test_authenticator());

        let account_service = Arc::new(AccountService::new(
            Arc::clone(&accounts),
            Arc::clone(&authenticator),
        ));
        let post_service = Arc::new(PostService::new(posts));
        let auth_gate = Arc::new(AuthGate::new(
            Arc::clone(&authenticator),
            Arc::clone(&accounts),
        ));

        let router = create_router(account_service.clone(), post_service, auth_gate);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            accounts,
            account_service,
            authenticator,
        }
    }

    /// Create an account directly through the service, bypassing registration.
    pub async fn create_account(&self, email: &str, role: Role) -> Account {
        self.account_service
            .create_account(CreateAccountCommand {
                first_name: PersonName::new("Test".to_string()).unwrap(),
                last_name: PersonName::new(role.to_string()).unwrap(),
                email: EmailAddress::new(email.to_string()).unwrap(),
                password: TEST_PASSWORD.to_string(),
                role,
            })
            .await
            .expect("Failed to create account")
    }

    /// Create an account and a valid token for it.
    pub async fn signed_in(&self, email: &str, role: Role) -> (Account, String) {
        let account = self.create_account(email, role).await;
        let token = self
            .authenticator
            .issue_token(&account.id.to_string())
            .expect("Failed to issue token");
        (account, token)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }
}
