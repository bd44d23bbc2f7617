//! User service - Handles user-related business logic.
//!
//! Validates input, applies the user rules and folds every outcome into
//! an `ApiResponse` envelope.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::USER_ENTITY;
use crate::domain::{validation, CreateUserDto, UpdateUserDto, User, UserCounts, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{QueryOptions, UserRepository};
use crate::types::{ApiResponse, PaginatedResponse, PaginationParams};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Validate email then name, and create the user
    async fn create_user(&self, dto: CreateUserDto) -> ApiResponse<User>;

    async fn get_user_by_id(&self, id: &str) -> ApiResponse<User>;

    /// One page of users, sorted by `sortBy`/`sortOrder` when given
    async fn get_all_users(&self, params: PaginationParams)
        -> ApiResponse<PaginatedResponse<User>>;

    /// Validate only the supplied fields, then merge them
    async fn update_user(&self, id: &str, dto: UpdateUserDto) -> ApiResponse<User>;

    /// Remove a user. Admins cannot be deleted.
    async fn delete_user(&self, id: &str) -> ApiResponse<bool>;

    async fn search_users(&self, term: &str) -> ApiResponse<Vec<User>>;

    async fn get_users_by_role(&self, role: UserRole) -> ApiResponse<Vec<User>>;

    async fn get_active_users(&self) -> ApiResponse<Vec<User>>;

    async fn deactivate_user(&self, id: &str) -> ApiResponse<User>;

    async fn activate_user(&self, id: &str) -> ApiResponse<User>;

    /// Total and active user counts
    async fn get_user_counts(&self) -> ApiResponse<UserCounts>;
}

/// Concrete implementation of UserService over a repository.
pub struct UserManager<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> UserManager<R> {
    /// Create new user service instance
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    async fn try_create(&self, dto: CreateUserDto) -> AppResult<User> {
        validation::email(&dto.email)?;
        validation::user_name(&dto.name)?;

        self.repo.create_user(dto).await
    }

    async fn try_get(&self, id: &str) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found(USER_ENTITY)
    }

    async fn try_update(&self, id: &str, dto: UpdateUserDto) -> AppResult<User> {
        if let Some(email) = &dto.email {
            validation::email(email)?;
        }
        if let Some(name) = &dto.name {
            validation::user_name(name)?;
        }

        self.repo
            .update_user(id, dto)
            .await?
            .ok_or_not_found(USER_ENTITY)
    }

    async fn try_delete(&self, id: &str) -> AppResult<bool> {
        let user = self.try_get(id).await?;
        if user.is_admin() {
            return Err(AppError::rule("Admin users cannot be deleted"));
        }

        let deleted = self.repo.delete(id).await?;
        if deleted {
            tracing::info!(user_id = %id, "User deleted");
        }
        Ok(deleted)
    }

    async fn try_search(&self, term: &str) -> AppResult<Vec<User>> {
        let term = validation::search_term(term)?;
        self.repo.search_users(term).await
    }

    async fn try_counts(&self) -> AppResult<UserCounts> {
        let total = self.repo.count(QueryOptions::new()).await?;
        let active = self
            .repo
            .count(QueryOptions::new().filter("isActive", true))
            .await?;

        Ok(UserCounts { total, active })
    }
}

#[async_trait]
impl<R: UserRepository + 'static> UserService for UserManager<R> {
    async fn create_user(&self, dto: CreateUserDto) -> ApiResponse<User> {
        ApiResponse::from_result(self.try_create(dto).await, "Failed to create user")
            .on_success("User created successfully")
    }

    async fn get_user_by_id(&self, id: &str) -> ApiResponse<User> {
        ApiResponse::from_result(self.try_get(id).await, "Failed to retrieve user")
    }

    async fn get_all_users(
        &self,
        params: PaginationParams,
    ) -> ApiResponse<PaginatedResponse<User>> {
        let options = QueryOptions::new().sorted_by(&params);
        let result = self.repo.find_with_pagination(params, options).await;

        ApiResponse::from_result(result, "Failed to retrieve users")
    }

    async fn update_user(&self, id: &str, dto: UpdateUserDto) -> ApiResponse<User> {
        ApiResponse::from_result(self.try_update(id, dto).await, "Failed to update user")
            .on_success("User updated successfully")
    }

    async fn delete_user(&self, id: &str) -> ApiResponse<bool> {
        ApiResponse::from_result(self.try_delete(id).await, "Failed to delete user")
            .on_success("User deleted successfully")
    }

    async fn search_users(&self, term: &str) -> ApiResponse<Vec<User>> {
        ApiResponse::from_result(self.try_search(term).await, "Failed to search users")
    }

    async fn get_users_by_role(&self, role: UserRole) -> ApiResponse<Vec<User>> {
        ApiResponse::from_result(
            self.repo.find_by_role(role).await,
            "Failed to retrieve users by role",
        )
    }

    async fn get_active_users(&self) -> ApiResponse<Vec<User>> {
        ApiResponse::from_result(
            self.repo.find_active_users().await,
            "Failed to retrieve active users",
        )
    }

    async fn deactivate_user(&self, id: &str) -> ApiResponse<User> {
        let result = self
            .repo
            .deactivate_user(id)
            .await
            .and_then(|user| user.ok_or_not_found(USER_ENTITY));

        ApiResponse::from_result(result, "Failed to deactivate user")
            .on_success("User deactivated successfully")
    }

    async fn activate_user(&self, id: &str) -> ApiResponse<User> {
        let result = self
            .repo
            .activate_user(id)
            .await
            .and_then(|user| user.ok_or_not_found(USER_ENTITY));

        ApiResponse::from_result(result, "Failed to activate user")
            .on_success("User activated successfully")
    }

    async fn get_user_counts(&self) -> ApiResponse<UserCounts> {
        ApiResponse::from_result(self.try_counts().await, "Failed to retrieve user statistics")
    }
}
