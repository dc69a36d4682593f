use async_trait::async_trait;
use sqlx::PgPool;

use crate::model::{Card, User};

use super::{CardStore, RecordStore, UserStore};

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<i64, User> for PgUserStore {
    async fn exists(&self, key: &i64) -> anyhow::Result<bool> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT user_id FROM users WHERE user_id = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    async fn get(&self, key: &i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, password, contact_number
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn put(&self, key: i64, value: User) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (user_id, name, email, password, contact_number)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE
            SET name = EXCLUDED.name,
                email = EXCLUDED.email,
                password = EXCLUDED.password,
                contact_number = EXCLUDED.contact_number
            RETURNING user_id, name, email, password, contact_number
            "#,
        )
        .bind(key)
        .bind(&value.name)
        .bind(&value.email)
        .bind(&value.password)
        .bind(&value.contact_number)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn delete(&self, key: &i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            DELETE FROM users
            WHERE user_id = $1
            RETURNING user_id, name, email, password, contact_number
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, password, contact_number
            FROM users
            ORDER BY user_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, password, contact_number
            FROM users
            WHERE email = $1
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, password, contact_number
            FROM users
            WHERE email = $1 AND password = $2
            LIMIT 1
            "#,
        )
        .bind(email)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

#[derive(Clone)]
pub struct PgCardStore {
    pool: PgPool,
}

impl PgCardStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<String, Card> for PgCardStore {
    async fn exists(&self, key: &String) -> anyhow::Result<bool> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT card_number FROM cards WHERE card_number = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.is_some())
    }

    async fn get(&self, key: &String) -> anyhow::Result<Option<Card>> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            SELECT card_number, user_id, master_id, card_holder_name,
                   status, spending_limit, expiry_date
            FROM cards
            WHERE card_number = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(card)
    }

    async fn put(&self, key: String, value: Card) -> anyhow::Result<Card> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            INSERT INTO cards (card_number, user_id, master_id, card_holder_name,
                               status, spending_limit, expiry_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (card_number) DO UPDATE
            SET user_id = EXCLUDED.user_id,
                master_id = EXCLUDED.master_id,
                card_holder_name = EXCLUDED.card_holder_name,
                status = EXCLUDED.status,
                spending_limit = EXCLUDED.spending_limit,
                expiry_date = EXCLUDED.expiry_date
            RETURNING card_number, user_id, master_id, card_holder_name,
                      status, spending_limit, expiry_date
            "#,
        )
        .bind(&key)
        .bind(value.user_id)
        .bind(value.master_id)
        .bind(&value.card_holder_name)
        .bind(value.status)
        .bind(value.spending_limit)
        .bind(&value.expiry_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(card)
    }

    async fn delete(&self, key: &String) -> anyhow::Result<Option<Card>> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            DELETE FROM cards
            WHERE card_number = $1
            RETURNING card_number, user_id, master_id, card_holder_name,
                      status, spending_limit, expiry_date
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(card)
    }

    async fn list(&self) -> anyhow::Result<Vec<Card>> {
        let cards = sqlx::query_as::<_, Card>(
            r#"
            SELECT card_number, user_id, master_id, card_holder_name,
                   status, spending_limit, expiry_date
            FROM cards
            ORDER BY card_number
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(cards)
    }
}

#[async_trait]
impl CardStore for PgCardStore {
    async fn find_by_owner(&self, user_id: i64) -> anyhow::Result<Option<Card>> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            SELECT card_number, user_id, master_id, card_holder_name,
                   status, spending_limit, expiry_date
            FROM cards
            WHERE user_id = $1
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(card)
    }

    async fn find_by_master(&self, master_id: i64) -> anyhow::Result<Vec<Card>> {
        let cards = sqlx::query_as::<_, Card>(
            r#"
            SELECT card_number, user_id, master_id, card_holder_name,
                   status, spending_limit, expiry_date
            FROM cards
            WHERE master_id = $1
            ORDER BY card_number
            "#,
        )
        .bind(master_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(cards)
    }
}
