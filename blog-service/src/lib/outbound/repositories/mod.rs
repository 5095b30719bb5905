pub mod account;
pub mod post;

pub use account::PostgresAccountRepository;
pub use post::PostgresPostRepository;
