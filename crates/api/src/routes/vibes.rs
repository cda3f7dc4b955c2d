use axum::routing::get;
use axum::Router;

use crate::handlers::vibes;
use crate::state::AppState;

/// Routes mounted at `/vibes`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(vibes::list_vibes))
}
