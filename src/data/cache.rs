//! Local chain caching
//!
//! Caches raw option chains on disk so repeated lookups of the same
//! expiration skip the network and a session can be replayed offline.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::yahoo::YahooClient;
use crate::core::{OpcResult, QuoteChain};

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache directory
    pub cache_dir: PathBuf,
    /// Maximum age before refresh (in minutes)
    pub max_age_minutes: i64,
    /// Whether to use cache
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("./data/cache"),
            max_age_minutes: 15,
            enabled: true,
        }
    }
}

/// Chain cache manager
pub struct ChainCache {
    config: CacheConfig,
}

impl ChainCache {
    pub fn new(config: CacheConfig) -> OpcResult<Self> {
        if config.enabled && !config.cache_dir.exists() {
            fs::create_dir_all(&config.cache_dir)?;
        }

        Ok(Self { config })
    }

    fn cache_path(&self, symbol: &str, expiry: NaiveDate) -> PathBuf {
        self.config
            .cache_dir
            .join(format!("{}_{}_chain.json", symbol, expiry.format("%Y%m%d")))
    }

    /// Check if cache is valid (exists and not expired)
    pub fn is_valid(&self, symbol: &str, expiry: NaiveDate) -> bool {
        if !self.config.enabled {
            return false;
        }

        let path = self.cache_path(symbol, expiry);
        let modified = fs::metadata(&path).and_then(|m| m.modified());
        match modified {
            Ok(modified) => {
                let modified: DateTime<Utc> = modified.into();
                Utc::now() - modified < Duration::minutes(self.config.max_age_minutes)
            }
            Err(_) => false,
        }
    }

    /// Save a raw chain to cache
    pub fn save_chain(&self, chain: &QuoteChain) -> OpcResult<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let path = self.cache_path(&chain.underlying, chain.expiry);
        write_chain(&path, chain)?;

        tracing::info!("Cached {} {} chain at {:?}", chain.underlying, chain.expiry, path);
        Ok(())
    }

    /// Load a raw chain from cache, `None` if missing or stale
    pub fn load_chain(&self, symbol: &str, expiry: NaiveDate) -> OpcResult<Option<QuoteChain>> {
        if !self.is_valid(symbol, expiry) {
            return Ok(None);
        }

        let chain = read_chain(self.cache_path(symbol, expiry))?;
        tracing::info!("Loaded {} {} chain from cache", symbol, expiry);
        Ok(Some(chain))
    }

    /// Clear cache for a symbol
    pub fn clear(&self, symbol: &str) -> OpcResult<()> {
        if !self.config.cache_dir.exists() {
            return Ok(());
        }

        let prefix = format!("{}_", symbol);
        for entry in fs::read_dir(&self.config.cache_dir)? {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().to_string();

            if file_name.starts_with(&prefix) && file_name.ends_with("_chain.json") {
                fs::remove_file(entry.path())?;
            }
        }

        Ok(())
    }
}

/// Read a chain snapshot from a JSON file
pub fn read_chain(path: impl AsRef<Path>) -> OpcResult<QuoteChain> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Write a chain snapshot as pretty JSON
pub fn write_chain(path: impl AsRef<Path>, chain: &QuoteChain) -> OpcResult<()> {
    let json = serde_json::to_string_pretty(chain)?;
    fs::write(path, json)?;
    Ok(())
}

/// Cached data fetcher - combines cache with live fetching
pub struct CachedFetcher {
    cache: ChainCache,
    client: YahooClient,
}

impl CachedFetcher {
    pub fn new(config: CacheConfig) -> OpcResult<Self> {
        Ok(Self {
            cache: ChainCache::new(config)?,
            client: YahooClient::new()?,
        })
    }

    pub fn expirations(&self, symbol: &str) -> OpcResult<Vec<NaiveDate>> {
        self.client.get_expirations(symbol)
    }

    /// Get a raw chain (from cache or fetch)
    pub fn get_chain(&self, symbol: &str, expiry: NaiveDate) -> OpcResult<QuoteChain> {
        if let Some(chain) = self.cache.load_chain(symbol, expiry)? {
            return Ok(chain);
        }

        tracing::info!("Fetching fresh {} {} chain", symbol, expiry);
        let chain = self.client.get_option_chain(symbol, expiry)?;
        self.cache.save_chain(&chain)?;

        Ok(chain)
    }
}
