use serde::{Deserialize, Serialize};

use crate::model::{Card, User};

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Composed login body. Whichever list is non-empty is present; the common
/// case carries both.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_list: Option<Vec<User>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_list: Option<Vec<Card>>,
}
