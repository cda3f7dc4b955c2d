//! Query-string parameter types and the validating extractor.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use validator::Validate;

use vibesip_core::pagination::{Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};
use vibesip_db::models::cocktail::CocktailFilter;

use crate::error::AppError;

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Parameters for `GET /cocktails`.
#[derive(Debug, Deserialize, Validate)]
pub struct CocktailListParams {
    pub vibe: Option<String>,
    pub occasion: Option<String>,
    pub difficulty: Option<String>,
    pub alcohol: Option<String>,
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: i64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1))]
    pub limit: i64,
}

impl CocktailListParams {
    pub fn filter(&self) -> CocktailFilter {
        CocktailFilter::new(
            self.vibe.clone(),
            self.occasion.clone(),
            self.difficulty.clone(),
            self.alcohol.clone(),
        )
    }

    pub fn pagination(&self) -> Result<Pagination, AppError> {
        Pagination::new(self.page, self.limit).ok_or_else(|| {
            AppError::Unprocessable("page and limit must be at least 1".into())
        })
    }
}

/// Parameters for `GET /vibes`.
#[derive(Debug, Deserialize, Validate)]
pub struct VibeListParams {
    pub occasion: Option<String>,
}

impl VibeListParams {
    /// The occasion to rank by, if a non-empty one was given.
    pub fn occasion(&self) -> Option<&str> {
        self.occasion.as_deref().filter(|s| !s.is_empty())
    }
}

/// Extracts `T` from the query string and runs its `validator` rules.
///
/// Both malformed input and failed validation reject with 422.
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Unprocessable(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}
