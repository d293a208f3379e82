use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cart::{ZeroQuantity, DEFAULT_STORAGE_KEY};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub cart: CartSettings,
}

/// Where and under which key the cart is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for file-backed storage (default: platform data dir).
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Key the item sequence is stored under (default: "@goMarket:products").
    #[serde(default = "default_storage_key")]
    pub key: String,
}

/// Cart behaviour knobs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartSettings {
    /// What decrementing a line to zero does: "keep" or "remove".
    #[serde(default)]
    pub on_zero: ZeroQuantity,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            key: default_storage_key(),
        }
    }
}

impl StorageConfig {
    /// The configured data dir, or `~/.local/share/gomarket-cart` (platform
    /// equivalent via `dirs::data_dir()`), or `./gomarket-cart` as last resort.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("gomarket-cart")
        })
    }
}
