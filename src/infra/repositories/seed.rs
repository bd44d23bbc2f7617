//! Fixed sample records loaded when a store is built with seeding on.

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{Product, User, UserRole};

fn january(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn user(id: &str, email: &str, name: &str, role: UserRole, day: u32) -> User {
    User {
        id: id.to_string(),
        email: email.to_string(),
        name: name.to_string(),
        role,
        is_active: true,
        created_at: january(day),
        updated_at: january(day),
    }
}

fn product(
    id: &str,
    name: &str,
    description: &str,
    price: f64,
    category_id: &str,
    stock: i64,
    day: u32,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        category_id: category_id.to_string(),
        stock,
        is_available: stock > 0,
        created_at: january(day),
        updated_at: january(day),
    }
}

pub fn users() -> Vec<User> {
    vec![
        user("1", "admin@example.com", "Admin User", UserRole::Admin, 1),
        user("2", "john@example.com", "John Doe", UserRole::User, 2),
        user("3", "jane@example.com", "Jane Smith", UserRole::Moderator, 3),
    ]
}

pub fn products() -> Vec<Product> {
    vec![
        product(
            "1",
            "Laptop Pro",
            "High-performance laptop for professionals",
            1299.99,
            "cat1",
            50,
            1,
        ),
        product(
            "2",
            "Wireless Mouse",
            "Ergonomic wireless mouse",
            29.99,
            "cat2",
            100,
            2,
        ),
        product(
            "3",
            "Mechanical Keyboard",
            "RGB mechanical gaming keyboard",
            149.99,
            "cat2",
            25,
            3,
        ),
    ]
}
