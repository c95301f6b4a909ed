use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3050";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("{name} has an invalid value `{value}`")]
    Invalid { name: &'static str, value: String },
}

/// Process settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// No URL means logs are kept in memory only.
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let bind_addr = parse_or("BIND_ADDR", lookup("BIND_ADDR"), DEFAULT_BIND_ADDR)?;
        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => parse("DB_MAX_CONNECTIONS", raw)?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
        })
    }
}

fn parse_or(
    name: &'static str,
    raw: Option<String>,
    default: &str,
) -> Result<SocketAddr, SettingsError> {
    parse(name, raw.unwrap_or_else(|| default.to_string()))
}

fn parse<T: std::str::FromStr>(name: &'static str, raw: String) -> Result<T, SettingsError> {
    raw.trim()
        .parse()
        .map_err(|_| SettingsError::Invalid { name, value: raw })
}
