//! Server configuration.
//!
//! Sources, later overriding earlier:
//! 1. Bundled defaults (`defaults.toml` compiled into the binary)
//! 2. `./mediaqr.toml`, or the file given with `--config`
//! 3. `MEDIAQR_*` environment variables
//!
//! `DATABASE_URL` fills `database_url` when no other source sets it.

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use derive_getters::Getters;
use mediaqr_core::DEFAULT_SHORT_CODE_LENGTH;
use mediaqr_error::{ConfigError, ConfigErrorKind, MediaQrResult};
use mediaqr_service::ServiceSettings;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../defaults.toml");

/// Accepted short-code lengths.
pub const SHORT_CODE_LENGTHS: RangeInclusive<usize> = 4..=32;

/// Where records are kept.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local map; contents are lost on restart
    #[default]
    Memory,
    /// PostgreSQL table, requires the `postgres` feature
    Postgres,
}

/// Immutable server configuration, built once at start-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(default, setter(into))]
pub struct MediaQrConfig {
    /// Socket address to listen on
    bind_address: String,
    /// Largest accepted upload in bytes
    max_file_size: u64,
    /// Capacity reported by the storage endpoint, in bytes
    storage_capacity_bytes: u64,
    /// Symbols per generated short code
    short_code_length: usize,
    /// Insert attempts per upload before giving up
    allocation_attempts: u32,
    /// Origins allowed by CORS
    allowed_origins: Vec<String>,
    /// Record store
    backend: StorageBackend,
    /// PostgreSQL connection string
    database_url: Option<String>,
    /// Maximum pooled database connections
    database_pool_size: u32,
    /// Mount `DELETE /api/v1/cleanup/all`
    enable_cleanup: bool,
    /// Fallback filter when `RUST_LOG` is unset
    log_level: String,
    /// Emit JSON log lines
    json_logs: bool,
}

impl Default for MediaQrConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            max_file_size: mediaqr_core::DEFAULT_MAX_FILE_SIZE,
            storage_capacity_bytes: mediaqr_service::DEFAULT_STORAGE_CAPACITY_BYTES,
            short_code_length: DEFAULT_SHORT_CODE_LENGTH,
            allocation_attempts: mediaqr_service::DEFAULT_ALLOCATION_ATTEMPTS,
            allowed_origins: vec!["http://localhost:5173".to_string()],
            backend: StorageBackend::Memory,
            database_url: None,
            database_pool_size: 10,
            enable_cleanup: false,
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl MediaQrConfig {
    /// Load from every source and validate.
    ///
    /// With `path`, that file replaces `./mediaqr.toml` and must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read, a value has the wrong
    /// type, or validation fails.
    #[instrument]
    pub fn load(path: Option<&Path>) -> MediaQrResult<Self> {
        debug!("Loading configuration");

        let builder = match path {
            Some(path) => defaults().add_source(File::from(path)),
            None => defaults().add_source(File::with_name("mediaqr").required(false)),
        };
        let builder = builder.add_source(
            Environment::with_prefix("MEDIAQR")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("allowed_origins"),
        );

        let mut loaded = build(builder)?;
        if loaded.database_url.is_none() {
            loaded.database_url = std::env::var("DATABASE_URL").ok();
        }
        loaded.validate()?;
        Ok(loaded)
    }

    /// Layer an inline TOML document over the bundled defaults and validate.
    ///
    /// The environment is not consulted.
    pub fn from_toml(document: &str) -> MediaQrResult<Self> {
        let loaded = build(defaults().add_source(File::from_str(document, FileFormat::Toml)))?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject values the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_file_size == 0 {
            return Err(ConfigError::invalid("max_file_size", "must be greater than zero"));
        }
        if self.storage_capacity_bytes == 0 {
            return Err(ConfigError::invalid(
                "storage_capacity_bytes",
                "must be greater than zero",
            ));
        }
        if self.allocation_attempts == 0 {
            return Err(ConfigError::invalid(
                "allocation_attempts",
                "must be at least one",
            ));
        }
        if !SHORT_CODE_LENGTHS.contains(&self.short_code_length) {
            return Err(ConfigError::invalid(
                "short_code_length",
                format!(
                    "{} is outside {}..={}",
                    self.short_code_length,
                    SHORT_CODE_LENGTHS.start(),
                    SHORT_CODE_LENGTHS.end()
                ),
            ));
        }
        if self.backend == StorageBackend::Postgres {
            if self.database_url.as_deref().is_none_or(str::is_empty) {
                return Err(ConfigError::invalid(
                    "database_url",
                    "required for the postgres backend",
                ));
            }
            if self.database_pool_size == 0 {
                return Err(ConfigError::invalid(
                    "database_pool_size",
                    "must be greater than zero",
                ));
            }
        }
        Ok(())
    }

    /// Replace the listen address, as the `--bind` flag does.
    pub fn with_bind_address(mut self, bind_address: impl Into<String>) -> Self {
        self.bind_address = bind_address.into();
        self
    }

    /// Service tunables derived from this configuration.
    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings::new(
            self.max_file_size,
            self.short_code_length,
            self.allocation_attempts,
            self.storage_capacity_bytes,
        )
    }
}

fn defaults() -> ConfigBuilder<DefaultState> {
    Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
}

fn build(builder: ConfigBuilder<DefaultState>) -> MediaQrResult<MediaQrConfig> {
    let loaded = builder
        .build()
        .map_err(|e| ConfigError::new(ConfigErrorKind::Load(e.to_string())))?
        .try_deserialize()
        .map_err(|e| ConfigError::new(ConfigErrorKind::Parse(e.to_string())))?;
    Ok(loaded)
}
