//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{auth, comments, events, families, health, news, reactions};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes, kept outside the rate limiter
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(family_routes())
        .merge(event_routes())
        .merge(news_routes())
        .merge(comment_routes())
        .merge(reaction_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/session", get(auth::session))
}

fn family_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/families",
            get(families::list_families).post(families::create_family),
        )
        .route(
            "/families/:family_id",
            get(families::get_family).delete(families::delete_family),
        )
        .route("/families/:family_id/tree", get(families::get_tree))
        .route("/families/:family_id/forest", get(families::get_forest))
        .route(
            "/families/:family_id/members",
            get(families::list_members).post(families::add_member),
        )
        .route(
            "/families/:family_id/members/:node_id",
            get(families::get_member)
                .patch(families::update_member)
                .delete(families::delete_member),
        )
        .route(
            "/families/:family_id/members/:node_id/subtree",
            get(families::get_subtree),
        )
}

fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(events::list_events).post(events::create_event))
        .route(
            "/events/:event_id",
            get(events::get_event)
                .patch(events::update_event)
                .delete(events::delete_event),
        )
}

fn news_routes() -> Router<AppState> {
    Router::new()
        .route("/news", get(news::list_news).post(news::create_news))
        .route(
            "/news/:news_id",
            get(news::get_news)
                .patch(news::update_news)
                .delete(news::delete_news),
        )
}

fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/comments",
            get(comments::list_comments).post(comments::add_comment),
        )
        .route(
            "/comments/:comment_id",
            delete(comments::delete_comment),
        )
}

fn reaction_routes() -> Router<AppState> {
    Router::new()
        .route("/reactions", put(reactions::apply_reaction))
        .route("/reactions/me", get(reactions::my_reaction))
        .route("/reactions/recount", post(reactions::recount))
}
