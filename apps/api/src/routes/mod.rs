pub mod ai;
pub mod document;
pub mod health;
pub mod saves;
pub mod session;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::models::{Education, Experience, Skill};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document
        .route(
            "/api/v1/document",
            get(document::handle_get_document).put(document::handle_replace_document),
        )
        .route(
            "/api/v1/document/personal",
            patch(document::handle_set_personal),
        )
        .route("/api/v1/document/undo", post(document::handle_undo))
        .route(
            "/api/v1/document/experience",
            post(document::handle_add_entry::<Experience>),
        )
        .route(
            "/api/v1/document/experience/:id",
            patch(document::handle_update_entry::<Experience>)
                .delete(document::handle_remove_entry::<Experience>),
        )
        .route(
            "/api/v1/document/experience/:id/description",
            post(ai::handle_generate_description),
        )
        .route(
            "/api/v1/document/education",
            post(document::handle_add_entry::<Education>),
        )
        .route(
            "/api/v1/document/education/:id",
            patch(document::handle_update_entry::<Education>)
                .delete(document::handle_remove_entry::<Education>),
        )
        .route(
            "/api/v1/document/skills",
            post(document::handle_add_entry::<Skill>),
        )
        .route(
            "/api/v1/document/skills/:id",
            patch(document::handle_update_entry::<Skill>)
                .delete(document::handle_remove_entry::<Skill>),
        )
        // Language, layout, output
        .route("/api/v1/language", put(session::handle_set_language))
        .route("/api/v1/variant", put(session::handle_set_variant))
        .route("/api/v1/render", get(session::handle_render))
        .route("/api/v1/render/html", get(session::handle_render_html))
        .route("/api/v1/export", get(session::handle_export))
        // AI tools
        .route("/api/v1/ai/summary", post(ai::handle_generate_summary))
        .route("/api/v1/ai/score", post(ai::handle_score))
        .route("/api/v1/ai/cover-letter", post(ai::handle_cover_letter))
        // Named saves
        .route(
            "/api/v1/saves",
            get(saves::handle_list_saves).post(saves::handle_save),
        )
        .route("/api/v1/saves/:name/load", post(saves::handle_load_save))
        .route(
            "/api/v1/saves/:name",
            axum::routing::delete(saves::handle_delete_save),
        )
        .with_state(state)
}
