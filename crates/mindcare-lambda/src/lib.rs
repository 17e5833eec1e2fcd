//! mindcare-lambda
//!
//! HTTP boundary for the student, counsellor and admin dashboards.
//! Authentication and role checks happen here; the domain crates below
//! never see an unauthenticated request.

pub mod config;
pub mod error;
pub mod extract;
pub mod followup;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::middleware as axum_mw;
use axum::routing::{get, patch, post, put};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route("/signup", post(routes::profile::signup))
        .route("/profile", get(routes::profile::get_profile))
        .route("/profile", put(routes::profile::update_profile))
        .route("/counsellors", get(routes::counsellors::list_counsellors))
        .route("/chat", get(routes::chat::list_messages))
        .route("/chat", post(routes::chat::send_message))
        .route("/assessments", get(routes::assessments::list_assessments))
        .route("/assessments", post(routes::assessments::submit_assessment))
        .route("/appointments", get(routes::appointments::list_appointments))
        .route("/appointments", post(routes::appointments::book_appointment))
        .route(
            "/appointments/{id}/status",
            patch(routes::appointments::update_status),
        )
        .route("/forum", get(routes::forum::list_posts))
        .route("/forum", post(routes::forum::create_post))
        .route("/forum/{id}/replies", post(routes::forum::reply_to_post))
        .route("/analytics", get(routes::analytics::get_analytics))
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        // Health (no auth)
        .route("/health", get(routes::health::health_check))
        // Instruments (no auth, public questionnaire definitions)
        .route("/instruments", get(routes::instruments::list_instruments))
        .route(
            "/instruments/{id}",
            get(routes::instruments::get_instrument_detail),
        )
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(axum_mw::from_fn(middleware::audit::audit_log)),
        )
        .with_state(state)
}
