//! Handlers for cocktail listing and detail.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use vibesip_core::error::CoreError;
use vibesip_db::models::cocktail::CocktailDetail;
use vibesip_db::repositories::CocktailRepo;

use crate::error::{AppError, AppResult};
use crate::query::{CocktailListParams, ValidatedQuery};
use crate::response::Page;
use crate::state::AppState;

/// GET /cocktails
///
/// Filtered by any of `vibe`, `occasion`, `difficulty` and `alcohol`, ordered
/// by rank then name, and paginated. `total` counts every match regardless of
/// the requested page.
pub async fn list_cocktails(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<CocktailListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = params.filter();
    let pagination = params.pagination()?;

    let items = CocktailRepo::list(&state.pool, &filter, pagination).await?;
    let total = CocktailRepo::count(&state.pool, &filter).await?;

    tracing::debug!(?filter, page = pagination.page, total, "Listed cocktails");

    Ok(Json(Page::new(items, pagination, total)))
}

/// GET /cocktails/{id}
pub async fn get_cocktail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let cocktail = CocktailRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Cocktail",
                id: id.clone(),
            })
        })?;

    let vibe_ids = CocktailRepo::vibe_ids(&state.pool, &id).await?;
    let occasion_ids = CocktailRepo::occasion_ids(&state.pool, &id).await?;

    Ok(Json(CocktailDetail::new(cocktail, vibe_ids, occasion_ids)))
}
