//! User directory table.
//!
//! Renders the users of the public placeholder API as an HTML table.

use askama::Template;
use serde::{Deserialize, Serialize};

/// Public user API queried by default
pub const DEFAULT_USERS_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// Postal address of a user
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    /// Street name
    pub street: String,
    /// Apartment or suite
    pub suite: String,
    /// City
    pub city: String,
    /// Postal code
    pub zipcode: String,
}

/// Employer of a user
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    /// Company name
    pub name: String,
    /// Slogan
    #[serde(rename = "catchPhrase")]
    pub catch_phrase: String,
}

/// A user record
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Identifier
    pub id: u64,
    /// Full name
    pub name: String,
    /// Login name
    pub username: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: String,
    /// Personal website
    pub website: String,
    /// Postal address
    pub address: Address,
    /// Employer
    pub company: Company,
}

#[derive(Template)]
#[template(path = "users_table.html")]
struct UserTable<'a> {
    users: &'a [User],
}

/// Renders `users` as an HTML table; an empty list renders a notice instead
///
/// # Errors
///
/// Returns the template error if rendering fails.
pub fn render_user_table(users: &[User]) -> Result<String, askama::Error> {
    UserTable { users }.render()
}
