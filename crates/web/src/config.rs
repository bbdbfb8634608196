use anyhow::{Context, Result};
use importer::ImportPolicy;
use importer::csv_import::DEFAULT_MAX_BYTES;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub api_keys: String,
    pub import_policy: ImportPolicy,
    pub import_max_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let import_policy = match lookup("IMPORT_POLICY") {
            Some(value) => value
                .parse::<ImportPolicy>()
                .map_err(anyhow::Error::msg)
                .context("Invalid IMPORT_POLICY")?,
            None => ImportPolicy::default(),
        };

        let import_max_bytes = match lookup("IMPORT_MAX_BYTES") {
            Some(value) => value
                .parse::<usize>()
                .context("IMPORT_MAX_BYTES must be a number")?,
            None => DEFAULT_MAX_BYTES as usize,
        };

        Ok(Self {
            host: lookup("HOST").context("Cannot load HOST env variable")?,
            port: lookup("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: lookup("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            api_keys: lookup("API_KEYS").unwrap_or_default(),
            import_policy,
            import_max_bytes,
        })
    }
}
