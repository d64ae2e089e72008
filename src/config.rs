use anyhow::Context;

pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
}

impl Config {
    // Missing DATABASE_URL or JWT_SECRET aborts startup; there is no
    // compiled-in fallback secret.
    pub fn from_env() -> anyhow::Result<Config> {
        let database_url = dotenv::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = dotenv::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        let bind_addr = dotenv::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        Ok(Config {
            database_url,
            jwt_secret,
            bind_addr,
        })
    }
}
