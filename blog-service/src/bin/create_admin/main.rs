//! Create an account with an explicit role, bypassing public registration.

use std::sync::Arc;

use blog_service::account::models::CreateAccountCommand;
use blog_service::account::models::EmailAddress;
use blog_service::account::models::PersonName;
use blog_service::account::models::Role;
use blog_service::account::ports::AccountServicePort;
use blog_service::account::service::AccountService;
use blog_service::config::Config;
use blog_service::outbound::repositories::PostgresAccountRepository;
use clap::Parser;
use clap::ValueEnum;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Role granted to the new account
#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    User,
    Moderator,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::User => Role::User,
            RoleArg::Moderator => Role::Moderator,
            RoleArg::Admin => Role::Admin,
        }
    }
}

/// Create a privileged blog account
#[derive(Parser, Debug)]
#[command(name = "create-admin")]
#[command(version)]
struct Cli {
    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    #[arg(long)]
    email: String,

    /// Plain text password; prefer the environment variable over the flag
    #[arg(long, env = "CREATE_ADMIN_PASSWORD", hide_env_values = true)]
    password: String,

    #[arg(long, value_enum, default_value = "admin")]
    role: RoleArg,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_service=info,create_admin=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let command = CreateAccountCommand {
        first_name: PersonName::new(cli.first_name)?,
        last_name: PersonName::new(cli.last_name)?,
        email: EmailAddress::new(cli.email)?,
        password: cli.password,
        role: cli.role.into(),
    };

    let pg_pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await?;
    sqlx::migrate!("./migrations").run(&pg_pool).await?;

    let account_service = AccountService::new(
        Arc::new(PostgresAccountRepository::new(pg_pool)),
        Arc::new(config.authenticator()?),
    );

    let account = account_service.create_account(command).await?;

    tracing::info!(
        account_id = %account.id,
        email = %account.email,
        role = %account.role,
        "Account created"
    );

    Ok(())
}
