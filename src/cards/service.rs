use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{Card, CardStatus};
use crate::store::CardStore;

/// Strict `MM/yyyy` check: two-digit month 01-12, slash, exactly four digits.
pub(crate) fn validate_expiry_date(expiry: &str) -> Result<()> {
    lazy_static! {
        static ref EXPIRY_RE: Regex = Regex::new(r"^(0[1-9]|1[0-2])/\d{4}$").unwrap();
    }
    if EXPIRY_RE.is_match(expiry) {
        Ok(())
    } else {
        Err(Error::InvalidExpiryDate)
    }
}

/// Card issuance, lookups, status transitions and the ownership aggregation
/// used by login.
#[derive(Clone)]
pub struct CardService {
    store: Arc<dyn CardStore>,
    // The store is only atomic per call, so the check-then-act sequences in
    // issue/update/set_status are serialized here.
    write_lock: Arc<Mutex<()>>,
}

impl CardService {
    pub fn new(store: Arc<dyn CardStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Issues a new card. The requested status is ignored: a fresh card is
    /// always `ACTIVE`.
    pub async fn issue(&self, mut card: Card) -> Result<Card> {
        let _guard = self.write_lock.lock().await;
        if self.store.exists(&card.card_number).await? {
            return Err(Error::CardAlreadyExists);
        }
        validate_expiry_date(&card.expiry_date)?;
        card.status = CardStatus::Active;
        let stored = self.store.put(card.card_number.clone(), card).await?;
        debug!(card_number = %stored.card_number, "card issued");
        Ok(stored)
    }

    pub async fn get(&self, card_number: &str) -> Result<Card> {
        self.store
            .get(&card_number.to_string())
            .await?
            .ok_or(Error::CardNotFound)
    }

    pub async fn get_all(&self) -> Result<Vec<Card>> {
        Ok(self.store.list().await?)
    }

    /// The card set visible to a user: every card grouped under them as
    /// master, then their own card appended last. A user without a card of
    /// their own sees nothing, even when sub-cards reference them.
    pub async fn cards_for_user(&self, user_id: i64) -> Result<Vec<Card>> {
        let Some(own) = self.store.find_by_owner(user_id).await? else {
            return Ok(Vec::new());
        };
        let mut cards = self.store.find_by_master(user_id).await?;
        cards.push(own);
        Ok(cards)
    }

    /// Full replace of the stored record. The payload's card number is
    /// overwritten with the path key; status and ownership fields are taken
    /// from the payload as-is.
    pub async fn update(&self, card_number: &str, mut details: Card) -> Result<Card> {
        let key = card_number.to_string();
        let _guard = self.write_lock.lock().await;
        if !self.store.exists(&key).await? {
            return Err(Error::CardNotFound);
        }
        validate_expiry_date(&details.expiry_date)?;
        details.card_number = key.clone();
        let stored = self.store.put(key, details).await?;
        debug!(card_number = %stored.card_number, "card updated");
        Ok(stored)
    }

    pub async fn delete(&self, card_number: &str) -> Result<Card> {
        let removed = self
            .store
            .delete(&card_number.to_string())
            .await?
            .ok_or(Error::CardNotFound)?;
        debug!(card_number = %removed.card_number, "card deleted");
        Ok(removed)
    }

    /// Unconditional status transition; any status is reachable from any
    /// other and re-applying a status is a no-op.
    pub async fn set_status(&self, card_number: &str, status: CardStatus) -> Result<Card> {
        let key = card_number.to_string();
        let _guard = self.write_lock.lock().await;
        let mut card = self.store.get(&key).await?.ok_or(Error::CardNotFound)?;
        card.status = status;
        let stored = self.store.put(key, card).await?;
        debug!(card_number = %stored.card_number, status = ?stored.status, "card status set");
        Ok(stored)
    }
}
