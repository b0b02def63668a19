//! Registration and login payloads

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of both `POST /register` and `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Credentials {
    #[validate(length(min = 1, max = 50, message = "Username must be between 1 and 50 characters"))]
    pub username: String,

    #[validate(length(min = 1, max = 255, message = "Password must be between 1 and 255 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub username: String,
}

impl RegisterResponse {
    pub fn new(username: String) -> Self {
        Self {
            message: "User registered successfully".to_string(),
            username,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: String,
}

impl LoginResponse {
    pub fn new(user: String) -> Self {
        Self {
            message: "Login successful".to_string(),
            user,
        }
    }
}
