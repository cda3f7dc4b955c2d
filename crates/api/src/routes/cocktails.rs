use axum::routing::get;
use axum::Router;

use crate::handlers::cocktails;
use crate::state::AppState;

/// Routes mounted at `/cocktails`.
///
/// ```text
/// GET /        -> list_cocktails
/// GET /{id}    -> get_cocktail
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cocktails::list_cocktails))
        .route("/{id}", get(cocktails::get_cocktail))
}
