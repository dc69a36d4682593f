use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    /// Informational message handed back alongside a freshly issued token.
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            message: std::env::var("JWT_TOKEN_MESSAGE")
                .unwrap_or_else(|_| "Token generated successfully".into()),
        };
        Ok(Self { database_url, jwt })
    }
}
