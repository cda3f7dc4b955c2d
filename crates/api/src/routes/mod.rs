pub mod cocktails;
pub mod health;
pub mod lookups;
pub mod vibes;

use axum::Router;

use crate::state::AppState;

/// Build the catalog route tree.
///
/// ```text
/// /vibes                       list (optionally ranked by occasion)
/// /cocktails                   filtered, paginated list
/// /cocktails/{id}              detail
/// /occasions                   lookup list
/// /difficulties                lookup list
/// /alcohol-levels              lookup list
/// ```
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .nest("/vibes", vibes::router())
        .nest("/cocktails", cocktails::router())
        .merge(lookups::router())
}
