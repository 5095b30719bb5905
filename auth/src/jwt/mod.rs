pub mod claims;
pub mod errors;
pub mod handler;
pub mod service;

pub use claims::Claims;
pub use errors::TokenError;
pub use handler::JwtHandler;
pub use service::TokenService;
