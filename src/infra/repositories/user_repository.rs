//! User repository over the in-memory store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::base::{Entity, InMemoryStore};
use super::query::{FieldValue, QueryOptions};
use super::seed;
use crate::config::USERS_TABLE;
use crate::domain::{CreateUserDto, NewUser, UpdateUserDto, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::types::{PaginatedResponse, PaginationParams};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

impl Entity for User {
    type Draft = NewUser;
    type Changes = UpdateUserDto;

    fn from_draft(id: String, now: DateTime<Utc>, draft: NewUser) -> Self {
        Self {
            id,
            email: draft.email,
            name: draft.name,
            role: draft.role,
            is_active: draft.is_active,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, changes: UpdateUserDto) {
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(role) = changes.role {
            self.role = role;
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.clone().into()),
            "email" => Some(self.email.clone().into()),
            "name" => Some(self.name.clone().into()),
            "role" => Some(self.role.as_str().into()),
            "isActive" => Some(self.is_active.into()),
            "createdAt" => Some(self.created_at.into()),
            "updatedAt" => Some(self.updated_at.into()),
            _ => None,
        }
    }
}

/// User repository trait for dependency injection.
///
/// Absent records are `Ok(None)`; only a broken store produces `Err`,
/// apart from the email uniqueness rule on writes.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    async fn find_all(&self, options: QueryOptions) -> AppResult<Vec<User>>;

    async fn find_with_pagination(
        &self,
        params: PaginationParams,
        options: QueryOptions,
    ) -> AppResult<PaginatedResponse<User>>;

    async fn count(&self, options: QueryOptions) -> AppResult<u64>;

    async fn exists(&self, id: &str) -> AppResult<bool>;

    /// Exact, case-sensitive email match
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_by_role(&self, role: UserRole) -> AppResult<Vec<User>>;

    async fn find_active_users(&self) -> AppResult<Vec<User>>;

    /// Case-insensitive substring match on name or email
    async fn search_users(&self, term: &str) -> AppResult<Vec<User>>;

    /// Create a user, rejecting an email that is already taken
    async fn create_user(&self, dto: CreateUserDto) -> AppResult<User>;

    /// Merge changes, rejecting an email taken by another user
    async fn update_user(&self, id: &str, dto: UpdateUserDto) -> AppResult<Option<User>>;

    async fn activate_user(&self, id: &str) -> AppResult<Option<User>>;

    async fn deactivate_user(&self, id: &str) -> AppResult<Option<User>>;

    /// Physically remove the user. `false` if absent.
    async fn delete(&self, id: &str) -> AppResult<bool>;
}

/// In-memory implementation of UserRepository
#[derive(Debug)]
pub struct UserStore {
    store: InMemoryStore<User>,
}

impl UserStore {
    /// Empty repository
    pub fn new() -> Self {
        Self {
            store: InMemoryStore::new(USERS_TABLE),
        }
    }

    /// Repository holding the three sample users
    pub fn seeded() -> Self {
        Self {
            store: InMemoryStore::with_records(USERS_TABLE, seed::users()),
        }
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

fn email_taken(records: &[User], email: &str, except: Option<&str>) -> AppResult<()> {
    let taken = records
        .iter()
        .any(|u| u.email == email && Some(u.id.as_str()) != except);

    if taken {
        Err(AppError::conflict("User with this email"))
    } else {
        Ok(())
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        self.store.find_by_id(id)
    }

    async fn find_all(&self, options: QueryOptions) -> AppResult<Vec<User>> {
        self.store.find_all(&options)
    }

    async fn find_with_pagination(
        &self,
        params: PaginationParams,
        options: QueryOptions,
    ) -> AppResult<PaginatedResponse<User>> {
        self.store.find_with_pagination(&params, &options)
    }

    async fn count(&self, options: QueryOptions) -> AppResult<u64> {
        Ok(self.store.count(&options)? as u64)
    }

    async fn exists(&self, id: &str) -> AppResult<bool> {
        self.store.exists(id)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.store.find_one(|u| u.email == email)
    }

    async fn find_by_role(&self, role: UserRole) -> AppResult<Vec<User>> {
        self.store
            .find_all(&QueryOptions::new().filter("role", role.as_str()))
    }

    async fn find_active_users(&self) -> AppResult<Vec<User>> {
        self.store
            .find_all(&QueryOptions::new().filter("isActive", true))
    }

    async fn search_users(&self, term: &str) -> AppResult<Vec<User>> {
        let needle = term.to_lowercase();
        let found = self.store.find_matching(|u| {
            u.name.to_lowercase().contains(&needle) || u.email.to_lowercase().contains(&needle)
        })?;

        tracing::debug!(term, count = found.len(), "Searched users");
        Ok(found)
    }

    async fn create_user(&self, dto: CreateUserDto) -> AppResult<User> {
        let draft = NewUser::from(dto);
        let email = draft.email.clone();

        self.store
            .create_checked(draft, |records| email_taken(records, &email, None))
    }

    async fn update_user(&self, id: &str, dto: UpdateUserDto) -> AppResult<Option<User>> {
        self.store.update_with(id, |records, current| {
            if let Some(email) = &dto.email {
                email_taken(records, email, Some(current.id.as_str()))?;
            }
            Ok(dto)
        })
    }

    async fn activate_user(&self, id: &str) -> AppResult<Option<User>> {
        self.store.update(id, UpdateUserDto::active(true))
    }

    async fn deactivate_user(&self, id: &str) -> AppResult<Option<User>> {
        self.store.update(id, UpdateUserDto::active(false))
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        self.store.delete(id)
    }
}
