use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::accounts::change_role;
use super::handlers::accounts::change_status;
use super::handlers::accounts::delete_account;
use super::handlers::accounts::get_profile;
use super::handlers::accounts::list_accounts;
use super::handlers::accounts::login;
use super::handlers::accounts::register;
use super::handlers::posts::create_post;
use super::handlers::posts::delete_post;
use super::handlers::posts::get_post;
use super::handlers::posts::list_posts;
use super::handlers::posts::update_post;
use super::handlers::ApiError;
use super::handlers::ApiSuccess;
use super::middleware::authenticate;
use super::middleware::require_roles;
use super::middleware::RoleRequirement;
use crate::account::models::Role;
use crate::account::ports::AccountServicePort;
use crate::domain::auth::policy::ADMIN_ONLY;
use crate::domain::auth::policy::ANY_ROLE;
use crate::domain::auth::policy::STAFF;
use crate::domain::auth::ports::AuthGatePort;
use crate::post::ports::PostServicePort;

/// Application state shared by handlers and middleware.
///
/// Services are held behind their ports so the same router serves Postgres in
/// production and in-memory adapters in tests.
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub post_service: Arc<dyn PostServicePort>,
    pub auth_gate: Arc<dyn AuthGatePort>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    post_service: Arc<dyn PostServicePort>,
    auth_gate: Arc<dyn AuthGatePort>,
) -> Router {
    let state = AppState {
        account_service,
        post_service,
        auth_gate,
    };

    let requirement = |allowed: &'static [Role]| {
        RoleRequirement::new(Arc::clone(&state.auth_gate), allowed)
    };

    let public_routes = Router::new()
        .route("/", get(index))
        .route("/api/users/register", post(register))
        .route("/api/users/login", post(login))
        .route("/api/posts", get(list_posts))
        .route("/api/posts/:post_id", get(get_post));

    let member_routes = Router::new()
        .route("/api/users/profile", get(get_profile))
        .route_layer(middleware::from_fn_with_state(
            requirement(ANY_ROLE),
            require_roles,
        ));

    let staff_routes = Router::new()
        .route("/api/users", get(list_accounts))
        .route("/api/users/:user_id/change-status", put(change_status))
        .route("/api/users/:user_id/change-role", put(change_role))
        .route_layer(middleware::from_fn_with_state(
            requirement(STAFF),
            require_roles,
        ));

    let admin_routes = Router::new()
        .route("/api/users/:user_id", delete(delete_account))
        .route_layer(middleware::from_fn_with_state(
            requirement(ADMIN_ONLY),
            require_roles,
        ));

    let author_routes = Router::new()
        .route("/api/posts", post(create_post))
        .route("/api/posts/:post_id", put(update_post).delete(delete_post));

    // Role checks are layered first so authentication wraps them and runs before.
    let protected_routes = Router::new()
        .merge(member_routes)
        .merge(staff_routes)
        .merge(admin_routes)
        .merge(author_routes)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn index() -> ApiSuccess<&'static str> {
    ApiSuccess::new(StatusCode::OK, "Blog API is running")
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
