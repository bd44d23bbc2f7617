//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use validator::Validate;

use super::reply;
use crate::api::extractors::{empty_as_none, JsonBody, ValidatedQuery};
use crate::api::AppState;
use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, DEFAULT_SORT_FIELD};
use crate::domain::{CreateUserDto, UpdateUserDto, User, UserRole};
use crate::types::{PaginationParams, SortOrder};

const NOT_FOUND: &str = "User not found";

/// Query string accepted by `GET /api/users`.
///
/// The first filter present wins: `search`, then `role`, then
/// `active=true`; otherwise a page of users is returned. An empty
/// value such as `?search=` counts as absent.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub role: Option<UserRole>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub active: Option<bool>,
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u64>,
    #[validate(range(min = 1, message = "limit must be at least 1"))]
    pub limit: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl UserListQuery {
    fn pagination(&self) -> PaginationParams {
        PaginationParams::new(
            self.page.unwrap_or(DEFAULT_PAGE_NUMBER),
            self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )
        .sorted(
            self.sort_by.as_deref().unwrap_or(DEFAULT_SORT_FIELD),
            self.sort_order.unwrap_or(SortOrder::Desc),
        )
    }
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/deactivate", post(deactivate_user))
        .route("/:id/activate", post(activate_user))
}

/// Search, filter or page through users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive match on name or email"),
        ("role" = Option<UserRole>, Query, description = "Only users with this role"),
        ("active" = Option<bool>, Query, description = "`true` lists active users"),
        ("page" = Option<u64>, Query, description = "Page number, from 1"),
        ("limit" = Option<u64>, Query, description = "Page size"),
        ("sortBy" = Option<String>, Query, description = "Sort field, default createdAt"),
        ("sortOrder" = Option<SortOrder>, Query, description = "asc or desc, default desc")
    ),
    responses(
        (status = 200, description = "Users in the response envelope", body = [User]),
        (status = 400, description = "Invalid query")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<UserListQuery>,
) -> Response {
    let users = &state.user_service;

    if let Some(term) = &query.search {
        return reply(users.search_users(term).await, StatusCode::OK, NOT_FOUND).into_response();
    }
    if let Some(role) = query.role {
        return reply(users.get_users_by_role(role).await, StatusCode::OK, NOT_FOUND)
            .into_response();
    }
    if query.active == Some(true) {
        return reply(users.get_active_users().await, StatusCode::OK, NOT_FOUND).into_response();
    }

    reply(
        users.get_all_users(query.pagination()).await,
        StatusCode::OK,
        NOT_FOUND,
    )
    .into_response()
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Validation error or email already in use")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUserDto>,
) -> Response {
    let response = state.user_service.create_user(payload).await;
    reply(response, StatusCode::CREATED, NOT_FOUND).into_response()
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let response = state.user_service.get_user_by_id(&id).await;
    reply(response, StatusCode::OK, NOT_FOUND).into_response()
}

/// Update user fields
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Validation error or email already in use"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateUserDto>,
) -> Response {
    let response = state.user_service.update_user(&id, payload).await;
    reply(response, StatusCode::OK, NOT_FOUND).into_response()
}

/// Delete user (admins cannot be deleted)
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Admin users cannot be deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let response = state.user_service.delete_user(&id).await;
    reply(response, StatusCode::OK, NOT_FOUND).into_response()
}

#[utoipa::path(
    post,
    path = "/api/users/{id}/deactivate",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deactivated", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn deactivate_user(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let response = state.user_service.deactivate_user(&id).await;
    reply(response, StatusCode::OK, NOT_FOUND).into_response()
}

#[utoipa::path(
    post,
    path = "/api/users/{id}/activate",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User activated", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn activate_user(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let response = state.user_service.activate_user(&id).await;
    reply(response, StatusCode::OK, NOT_FOUND).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{extract::Query, http::Uri};

    use super::*;

    #[test]
    fn test_list_defaults() {
        let params = UserListQuery::default().pagination();

        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 10);
        assert_eq!(params.sort_by.as_deref(), Some("createdAt"));
        assert_eq!(params.sort_order, Some(SortOrder::Desc));
    }

    #[test]
    fn test_zero_page_is_invalid() {
        let query = UserListQuery {
            page: Some(0),
            ..Default::default()
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_empty_filters_are_absent() {
        let uri: Uri = "/api/users?search=&role=&active=".parse().unwrap();
        let Query(query) = Query::<UserListQuery>::try_from_uri(&uri).unwrap();

        assert_eq!(query.search, None);
        assert_eq!(query.role, None);
        assert_eq!(query.active, None);
    }

    #[test]
    fn test_role_filter_is_parsed() {
        let uri: Uri = "/api/users?role=moderator&active=true".parse().unwrap();
        let Query(query) = Query::<UserListQuery>::try_from_uri(&uri).unwrap();

        assert_eq!(query.role, Some(UserRole::Moderator));
        assert_eq!(query.active, Some(true));

        let unknown: Uri = "/api/users?role=root".parse().unwrap();
        assert!(Query::<UserListQuery>::try_from_uri(&unknown).is_err());
    }
}
