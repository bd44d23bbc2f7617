//! User service tests against the seeded in-memory repository.

use std::sync::Arc;

use storefront_api::domain::{CreateUserDto, UpdateUserDto, UserRole};
use storefront_api::infra::{UserRepository, UserStore};
use storefront_api::services::{UserManager, UserService};
use storefront_api::types::{PaginationParams, SortOrder};

fn service() -> (Arc<UserStore>, UserManager<UserStore>) {
    let repo = Arc::new(UserStore::seeded());
    (repo.clone(), UserManager::new(repo))
}

fn dto(email: &str, name: &str) -> CreateUserDto {
    CreateUserDto {
        email: email.to_string(),
        name: name.to_string(),
        role: Some(UserRole::Moderator),
    }
}

#[tokio::test]
async fn test_deleting_seeded_admin_is_rejected() {
    let (repo, service) = service();

    let response = service.delete_user("1").await;

    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("Admin users cannot be deleted"));
    assert!(repo.exists("1").await.unwrap());
}

#[tokio::test]
async fn test_deleting_regular_user() {
    let (repo, service) = service();

    let response = service.delete_user("2").await;

    assert!(response.success);
    assert_eq!(response.data, Some(true));
    assert_eq!(response.message.as_deref(), Some("User deleted successfully"));
    assert!(repo.find_by_id("2").await.unwrap().is_none());

    let again = service.delete_user("2").await;
    assert!(again.failed_with("User not found"));
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let (_, service) = service();

    let response = service.create_user(dto("admin@example.com", "Copy Cat")).await;

    assert!(response.failed_with("User with this email already exists"));
}

#[tokio::test]
async fn test_invalid_email_fails_validation() {
    let (repo, service) = service();

    let response = service.create_user(dto("not-an-email", "Valid Name")).await;

    assert!(response.failed_with("Invalid email format"));
    assert!(repo.find_by_email("not-an-email").await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_user_keeps_requested_role() {
    let (_, service) = service();

    let response = service.create_user(dto("mod@example.com", "Mod")).await;

    assert!(response.success);
    assert_eq!(response.message.as_deref(), Some("User created successfully"));
    let user = response.data.unwrap();
    assert_eq!(user.role, UserRole::Moderator);
    assert!(user.is_active);
}

#[tokio::test]
async fn test_update_unknown_user() {
    let (_, service) = service();

    let response = service
        .update_user("404", UpdateUserDto::active(false))
        .await;

    assert!(response.failed_with("User not found"));
}

#[tokio::test]
async fn test_update_unknown_user_with_taken_email() {
    let (_, service) = service();

    let response = service
        .update_user(
            "404",
            UpdateUserDto {
                email: Some("admin@example.com".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(response.failed_with("User not found"));
}

#[tokio::test]
async fn test_deactivate_then_activate() {
    let (_, service) = service();

    let response = service.deactivate_user("3").await;
    assert_eq!(response.message.as_deref(), Some("User deactivated successfully"));
    assert_eq!(service.get_active_users().await.data.map(|u| u.len()), Some(2));

    let response = service.activate_user("3").await;
    assert_eq!(response.message.as_deref(), Some("User activated successfully"));
    assert_eq!(response.data.map(|u| u.is_active), Some(true));
}

#[tokio::test]
async fn test_get_all_users_sorted_by_name() {
    let (_, service) = service();

    let response = service
        .get_all_users(PaginationParams::new(1, 2).sorted("name", SortOrder::Asc))
        .await;

    let page = response.data.unwrap();
    let names: Vec<&str> = page.data.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Admin User", "Jane Smith"]);
    assert_eq!(page.pagination.total, 3);
    assert_eq!(page.pagination.pages, 2);
}

#[tokio::test]
async fn test_search_and_role_queries() {
    let (_, service) = service();

    let response = service.search_users("  jane ").await;
    assert_eq!(response.data.map(|u| u.len()), Some(1));

    let response = service.get_users_by_role(UserRole::Admin).await;
    assert_eq!(
        response.data.map(|u| u.into_iter().map(|u| u.id).collect::<Vec<_>>()),
        Some(vec!["1".to_string()])
    );
}
