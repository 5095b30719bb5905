use std::sync::Arc;

use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::account::models::Account;
use crate::account::models::Role;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::AuthGatePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type holding the account resolved from the bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount(pub Account);

/// Roles a route accepts, bundled with the gate that checks them.
#[derive(Clone)]
pub struct RoleRequirement {
    auth_gate: Arc<dyn AuthGatePort>,
    allowed_roles: &'static [Role],
}

impl RoleRequirement {
    pub fn new(auth_gate: Arc<dyn AuthGatePort>, allowed_roles: &'static [Role]) -> Self {
        Self {
            auth_gate,
            allowed_roles,
        }
    }
}

/// Middleware that resolves the bearer token to a live account and adds it to
/// request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers());

    let account = state.auth_gate.authenticate(token.as_deref()).await?;

    req.extensions_mut().insert(AuthenticatedAccount(account));

    Ok(next.run(req).await)
}

/// Middleware that checks the authenticated account against the route's roles.
///
/// Must run after [`authenticate`].
pub async fn require_roles(
    State(requirement): State<RoleRequirement>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let AuthenticatedAccount(account) = req
        .extensions()
        .get::<AuthenticatedAccount>()
        .ok_or(AuthError::NoTokenProvided)?;

    requirement
        .auth_gate
        .authorize(account, requirement.allowed_roles)?;

    Ok(next.run(req).await)
}

/// Token carried as `Authorization: Bearer <token>`. Any other shape counts as
/// no token.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
