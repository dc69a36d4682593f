use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User record. Ids are caller-assigned, not generated by the store.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub contact_number: String,
}

/// Card status. Issuance always starts a card as `Active`; after that any
/// status is reachable from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "card_status")]
pub enum CardStatus {
    #[serde(rename = "ACTIVE")]
    #[sqlx(rename = "ACTIVE")]
    Active,
    #[serde(rename = "INACTIVE")]
    #[sqlx(rename = "INACTIVE")]
    Inactive,
    #[serde(rename = "ON_HOLD")]
    #[sqlx(rename = "ON_HOLD")]
    OnHold,
}

impl Default for CardStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// Card record keyed by `card_number`. `user_id` points at the owning user
/// and `master_id` groups sub-cards under a master user; neither is required
/// to reference an existing user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub card_number: String,
    pub user_id: i64,
    pub master_id: i64,
    pub card_holder_name: String,
    #[serde(default)]
    pub status: CardStatus,
    pub spending_limit: f64,
    pub expiry_date: String,
}
