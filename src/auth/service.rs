use tracing::info;

use crate::auth::dto::LoginResponse;
use crate::auth::token::TokenCodec;
use crate::cards::service::CardService;
use crate::error::Result;
use crate::users::service::UserService;

/// Orchestrates the login handshake: credential check, token mint and
/// self-verification, then aggregation of the user's visible records.
#[derive(Clone)]
pub struct LoginService {
    users: UserService,
    cards: CardService,
    codec: TokenCodec,
}

impl LoginService {
    pub fn new(users: UserService, cards: CardService, codec: TokenCodec) -> Self {
        Self {
            users,
            cards,
            codec,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let user = self.users.verify_credentials(email, password).await?;

        // The token is round-tripped through the codec and its email claim
        // drives the lookups below; the token itself never reaches the
        // caller.
        let issued = self.codec.issue(&user)?;
        let claims = self.codec.decode(&issued.token)?;

        let user = self.users.get_by_email(&claims.email).await?;
        let user_list = self.users.list_by_id(user.user_id).await?;
        let card_list = self.cards.cards_for_user(user.user_id).await?;

        let response = if card_list.is_empty() {
            LoginResponse {
                user_list: Some(user_list),
                card_list: None,
            }
        } else if user_list.is_empty() {
            LoginResponse {
                user_list: None,
                card_list: Some(card_list),
            }
        } else {
            LoginResponse {
                user_list: Some(user_list),
                card_list: Some(card_list),
            }
        };

        info!(user_id = %user.user_id, "user logged in");
        Ok(response)
    }
}
