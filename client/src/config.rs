//! Run configuration and the disk-backed program-id store.
//!
//! Program deployment is handled by external tooling; the store memoizes the deployed addresses
//! between runs so the harness never depends on process-wide globals.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::logs::log_warning;

pub const LENDING_PROGRAM_KEY: &str = "lending_program_id";
pub const TOKEN_PROGRAM_KEY: &str = "token_program_id";

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8899";

/// A flat key-value file of string entries, persisted as JSON.
///
/// Accessed once per run; a missing file, a missing key, or malformed content are all treated as
/// a cache miss so the caller regenerates the entry. Malformed content is logged rather than
/// silently discarded.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Store {
    #[serde(skip)]
    path: PathBuf,
    #[serde(flatten)]
    entries: BTreeMap<String, String>,
}

impl Store {
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let mut store = match std::fs::read_to_string(path.as_ref()) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(store) => store,
                Err(error) => {
                    log_warning(
                        "Store",
                        format!(
                            "discarding malformed {}: {error}",
                            path.as_ref().display()
                        ),
                    );
                    Store::default()
                }
            },
            Err(_) => Store::default(),
        };
        store.path = path.as_ref().to_path_buf();
        store
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the entry parsed as a base58 key. An unparseable entry is a miss.
    pub fn get_pubkey(&self, key: &str) -> Option<Pubkey> {
        let raw = self.get(key)?;
        match raw.parse() {
            Ok(pubkey) => Some(pubkey),
            Err(_) => {
                log_warning("Store", format!("entry '{key}' is not a valid key: {raw}"));
                None
            }
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) {
        self.entries.insert(key.into(), value.to_string());
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let raw = serde_json::to_string_pretty(self).context("Failed to serialize the store")?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write the store to {}", self.path.display()))
    }
}

/// Explicit configuration threaded through every provisioning operation, constructed once by the
/// top-level caller.
#[derive(Clone, Debug)]
pub struct ProvisionConfig {
    pub rpc_url: String,
    /// The deployed lending program that owns reserve accounts.
    pub lending_program: Pubkey,
    /// The token program that owns the mints and token accounts.
    pub token_program: Pubkey,
}

impl ProvisionConfig {
    /// Resolves a configuration from cached program ids.
    ///
    /// The token program falls back to the well-known SPL token program when uncached; the
    /// lending program has no meaningful default and must have been deployed and stored.
    pub fn from_store(store: &Store) -> anyhow::Result<Self> {
        let lending_program = store.get_pubkey(LENDING_PROGRAM_KEY).with_context(|| {
            format!(
                "No cached lending program id; deploy it and store it under '{LENDING_PROGRAM_KEY}'"
            )
        })?;
        let token_program = store
            .get_pubkey(TOKEN_PROGRAM_KEY)
            .unwrap_or_else(spl_token_interface::id);

        Ok(ProvisionConfig {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            lending_program,
            token_program,
        })
    }

    pub fn write_to_store(&self, store: &mut Store) {
        store.set(LENDING_PROGRAM_KEY, self.lending_program);
        store.set(TOKEN_PROGRAM_KEY, self.token_program);
    }
}
