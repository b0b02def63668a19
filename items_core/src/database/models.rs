use serde::{Deserialize, Serialize};

/// A row of the `items` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DbItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub car: Option<String>,
}

/// A row of the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DbUser {
    pub id: i64,
    pub username: String,
    pub password: String,
}
