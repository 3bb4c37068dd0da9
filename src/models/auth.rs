use serde::{Deserialize, Serialize};

/// Cuerpo (form-urlencoded) de POST /auth/token
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Cuerpo JSON de POST /auth/register
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub organization_name: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct UserPublic {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub organization_id: i64,
    pub is_active: bool,
}
