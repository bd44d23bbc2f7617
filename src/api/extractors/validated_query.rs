//! Validated query extractor - Combines query-string parsing with validation.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use std::{fmt, str::FromStr};

use serde::{
    de::{self, DeserializeOwned},
    Deserialize, Deserializer,
};
use validator::Validate;

use crate::errors::AppError;

/// Query string extractor that validates the parsed parameters.
///
/// # Example
///
/// ```rust,ignore
/// use serde::Deserialize;
/// use validator::Validate;
/// use storefront_api::api::extractors::ValidatedQuery;
///
/// #[derive(Deserialize, Validate)]
/// struct ListQuery {
///     #[validate(range(min = 1))]
///     page: Option<u64>,
/// }
///
/// async fn list(ValidatedQuery(query): ValidatedQuery<ListQuery>) {
///     // query.page is at least 1 when present
/// }
/// ```
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::bad_request(format_validation_errors(&e)))?;

        Ok(ValidatedQuery(value))
    }
}

/// Parse an optional query value, reading `key=` as if the key were absent.
///
/// Use with `#[serde(default, deserialize_with = "empty_as_none")]`.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.is_empty() => raw.parse().map(Some).map_err(de::Error::custom),
        _ => Ok(None),
    }
}

/// Format validation errors into a user-friendly string
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();

    messages.sort();
    messages.join(", ")
}
