use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use vibesip_db::repositories::LookupRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /occasions
pub async fn list_occasions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(Json(LookupRepo::list_occasions(&state.pool).await?))
}

/// GET /difficulties
pub async fn list_difficulties(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(Json(LookupRepo::list_difficulties(&state.pool).await?))
}

/// GET /alcohol-levels
pub async fn list_alcohol_levels(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(Json(LookupRepo::list_alcohol_levels(&state.pool).await?))
}
