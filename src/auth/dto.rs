use serde::{Deserialize, Serialize};

/// Request body for user creation.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub user_name: String,
    pub passcode: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub user_name: String,
    pub passcode: String,
}

/// Request body for token refresh.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response returned after a successful login or refresh.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub user_id: i64,
    pub access_token: String,
    pub refresh_token: String,
}
