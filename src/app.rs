//! Application Assembly
//! Mission: Shared state and the full route table

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::{api as auth_api, require_admin, AdminStore, TokenService};
use crate::content::{api as content_api, ContentStore};
use crate::notifications::{api as notifications_api, NotificationStore};

/// Everything the handlers need, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub admins: Arc<AdminStore>,
    pub tokens: Arc<TokenService>,
    pub notifications: Arc<NotificationStore>,
    pub content: Arc<ContentStore>,
}

/// Assemble the router: public reads, the login route, and the
/// admin surface behind the authorization gate.
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/", get(content_api::root))
        .route("/api/profile", get(content_api::get_profile))
        .route("/api/skills", get(content_api::get_skills))
        .route("/api/projects", get(content_api::get_projects))
        .route("/api/education", get(content_api::get_education))
        .route("/api/experience", get(content_api::get_experience))
        .route(
            "/api/learning-journey",
            get(content_api::get_learning_journey),
        )
        .route(
            "/api/contact-section",
            get(content_api::get_contact_section),
        )
        .route("/api/footer", get(content_api::get_footer))
        .route("/api/contact", post(content_api::submit_contact))
        .route("/api/admin/login", post(auth_api::login));

    let protected_routes = Router::new()
        .route("/api/admin/verify", get(auth_api::verify))
        .route("/api/admin/me", get(auth_api::me))
        .route("/api/admin/logout-notify", post(auth_api::logout_notify))
        .route(
            "/api/admin/users",
            get(auth_api::list_admins).post(auth_api::create_admin),
        )
        .route("/api/admin/users/:username", delete(auth_api::delete_admin))
        .route(
            "/api/admin/notifications",
            get(notifications_api::list_notifications)
                .delete(notifications_api::clear_all),
        )
        .route(
            "/api/admin/notifications/mark-read",
            post(notifications_api::mark_all_read),
        )
        .route(
            "/api/admin/notifications/:id/read",
            put(notifications_api::mark_one_read),
        )
        .route("/api/admin/profile", put(content_api::update_profile))
        .route(
            "/api/admin/skills/:category",
            put(content_api::update_skills).delete(content_api::delete_skills_category),
        )
        .route("/api/admin/projects", post(content_api::create_project))
        .route(
            "/api/admin/projects/:id",
            put(content_api::update_project).delete(content_api::delete_project),
        )
        .route("/api/admin/education", post(content_api::create_education))
        .route(
            "/api/admin/education/:id",
            put(content_api::update_education).delete(content_api::delete_education),
        )
        .route("/api/admin/experience", post(content_api::create_experience))
        .route(
            "/api/admin/experience/:id",
            put(content_api::update_experience).delete(content_api::delete_experience),
        )
        .route(
            "/api/admin/learning-journey",
            post(content_api::create_learning_phase),
        )
        .route(
            "/api/admin/learning-journey/:id",
            put(content_api::update_learning_phase).delete(content_api::delete_learning_phase),
        )
        .route(
            "/api/admin/contact-section",
            put(content_api::update_contact_section),
        )
        .route("/api/admin/footer", put(content_api::update_footer))
        .route("/api/admin/messages", get(content_api::get_contact_messages))
        .route(
            "/api/admin/messages/:id/read",
            put(content_api::mark_message_read),
        )
        .route(
            "/api/admin/messages/:id",
            delete(content_api::delete_contact_message),
        )
        .route(
            "/api/admin/dashboard-summary",
            get(content_api::dashboard_summary),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
