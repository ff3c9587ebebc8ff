use crate::payload::DEFAULT_MAX_MEMO_LEN;
use crate::AuthorizationError;

use config::{Config, Environment};
use dotenv::dotenv;
use sypher_ring::MAX_RING_SIZE;

pub const ENV_PREFIX: &str = "SYPHER";

#[derive(serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AuthorizerSettings {
    pub min_ring_size: usize,
    pub max_ring_size: usize,
    pub require_proof: bool,
    pub max_memo_len: usize,
}

impl Default for AuthorizerSettings {
    fn default() -> Self {
        Self {
            min_ring_size: 2,
            max_ring_size: 1024,
            require_proof: false,
            max_memo_len: DEFAULT_MAX_MEMO_LEN,
        }
    }
}

impl AuthorizerSettings {
    /// Defaults, overridden by a `.env` file when one exists and then by
    /// `SYPHER_*` environment variables.
    pub fn load() -> Result<Self, AuthorizationError> {
        if dotenv().is_err() {
            log::debug!("no .env file loaded");
        }
        Self::from_env(ENV_PREFIX)
    }

    pub fn from_env(prefix: &str) -> Result<Self, AuthorizationError> {
        let defaults = Self::default();
        let conf = Config::builder()
            .set_default("min_ring_size", defaults.min_ring_size as i64)?
            .set_default("max_ring_size", defaults.max_ring_size as i64)?
            .set_default("require_proof", defaults.require_proof)?
            .set_default("max_memo_len", defaults.max_memo_len as i64)?
            .add_source(Environment::with_prefix(prefix).try_parsing(true))
            .build()?;

        let settings: Self = conf.try_deserialize()?;
        settings.validate()?;
        log::debug!("loaded authorizer settings: {:?}", settings);
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AuthorizationError> {
        if self.min_ring_size < 2 {
            return Err(AuthorizationError::Config("min_ring_size is below 2".to_owned()));
        }
        if self.min_ring_size > self.max_ring_size {
            return Err(AuthorizationError::Config(format!(
                "min_ring_size {} exceeds max_ring_size {}",
                self.min_ring_size, self.max_ring_size
            )));
        }
        if self.max_ring_size > MAX_RING_SIZE {
            return Err(AuthorizationError::Config(format!(
                "max_ring_size is limited to {}",
                MAX_RING_SIZE
            )));
        }
        Ok(())
    }

    pub fn allows_ring_size(&self, size: usize) -> bool {
        (self.min_ring_size..=self.max_ring_size).contains(&size)
    }
}
