//! Handlers for the vibe listing.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use vibesip_core::ranking::rank_by_counts;
use vibesip_db::models::vibe::VibeResponse;
use vibesip_db::repositories::VibeRepo;

use crate::error::AppResult;
use crate::query::{ValidatedQuery, VibeListParams};
use crate::state::AppState;

/// GET /vibes
///
/// Vibes in name order. With `?occasion=<id>`, vibes that share cocktails
/// with that occasion are moved to the front, most shared first.
pub async fn list_vibes(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<VibeListParams>,
) -> AppResult<impl IntoResponse> {
    let mut vibes = VibeRepo::list_all(&state.pool).await?;

    if let Some(occasion_id) = params.occasion() {
        let counts = VibeRepo::occasion_counts(&state.pool, occasion_id).await?;
        vibes = rank_by_counts(vibes, &counts, |v| v.id.as_str());
    }

    let body: Vec<VibeResponse> = vibes.into_iter().map(VibeResponse::from).collect();
    Ok(Json(body))
}
