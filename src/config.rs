use std::net::{IpAddr, SocketAddr};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: IpAddr,
    pub server_port: u16,
    pub environment: Environment,
    pub log_level: String,
    pub jwt_secret: String,
    pub jwt_access_expiration_secs: u64,
    pub frontend_url: String,
    /// Lowest draw in `1..=10` that the simulated gateway approves.
    pub payment_success_threshold: u8,
}

/// Deployment environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required: `DATABASE_URL`, `JWT_SECRET`
    /// Optional with defaults: `SERVER_HOST`, `SERVER_PORT` (or `PORT`), `ENVIRONMENT`,
    /// `LOG_LEVEL`, `JWT_ACCESS_EXPIRATION_SECS`, `FRONTEND_URL`, `PAYMENT_SUCCESS_THRESHOLD`
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or an optional one
    /// holds a value that does not parse.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let environment = match std::env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .as_str()
        {
            "production" => Environment::Production,
            "staging" => Environment::Staging,
            _ => Environment::Development,
        };

        let server_port = std::env::var("PORT")
            .or_else(|_| std::env::var("SERVER_PORT"))
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("SERVER_PORT / PORT must be a valid u16"))?;

        let default_host = if environment == Environment::Production {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };

        let server_host = std::env::var("SERVER_HOST")
            .unwrap_or_else(|_| default_host.to_string())
            .parse::<IpAddr>()
            .map_err(|_| anyhow::anyhow!("SERVER_HOST must be a valid IP address"))?;

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?;

        let jwt_access_expiration_secs = parse_token_lifetime(
            &std::env::var("JWT_ACCESS_EXPIRATION_SECS").unwrap_or_else(|_| "86400".to_string()),
        )?;

        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());

        let payment_success_threshold = parse_success_threshold(
            &std::env::var("PAYMENT_SUCCESS_THRESHOLD").unwrap_or_else(|_| "3".to_string()),
        )?;

        Ok(Self {
            database_url,
            server_host,
            server_port,
            environment,
            log_level,
            jwt_secret,
            jwt_access_expiration_secs,
            frontend_url,
            payment_success_threshold,
        })
    }

    /// Build the socket address for the server to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server_host, self.server_port)
    }
}

/// Longest accepted access token lifetime: one year.
const MAX_TOKEN_LIFETIME_SECS: u64 = 365 * 24 * 60 * 60;

fn parse_token_lifetime(raw: &str) -> anyhow::Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(value @ 1..=MAX_TOKEN_LIFETIME_SECS) => Ok(value),
        _ => Err(anyhow::anyhow!(
            "JWT_ACCESS_EXPIRATION_SECS must be between 1 and {MAX_TOKEN_LIFETIME_SECS} seconds"
        )),
    }
}

fn parse_success_threshold(raw: &str) -> anyhow::Result<u8> {
    match raw.trim().parse::<u8>() {
        Ok(value @ 1..=11) => Ok(value),
        _ => Err(anyhow::anyhow!(
            "PAYMENT_SUCCESS_THRESHOLD must be an integer between 1 and 11"
        )),
    }
}
