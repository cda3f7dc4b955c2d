use axum::routing::get;
use axum::Router;

use crate::handlers::lookups;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/occasions", get(lookups::list_occasions))
        .route("/difficulties", get(lookups::list_difficulties))
        .route("/alcohol-levels", get(lookups::list_alcohol_levels))
}
