//! Lookup and persistence seam for shop configurations.
//!
//! The command layer only sees the `ShopConfigurationDao` trait. The bundled
//! implementation keeps one JSON document per shop on disk; a platform
//! integration can provide its own backend instead.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::{ShopConfiguration, ShopId};
use crate::error::{DeployError, Result};

pub trait ShopConfigurationDao: Send + Sync {
    /// Load the configuration of one shop. Fails if the shop is unknown.
    fn get(&self, shop_id: ShopId) -> Result<ShopConfiguration>;

    /// Load all shop configurations, keyed by shop id in ascending order.
    fn get_all(&self) -> Result<BTreeMap<ShopId, ShopConfiguration>>;

    /// Persist the configuration of one shop, creating it if needed.
    fn save(&self, shop_id: ShopId, configuration: &ShopConfiguration) -> Result<()>;
}

/// File-backed DAO storing one pretty-printed JSON document per shop under
/// `<base_dir>/shops/<id>.json`.
pub struct FileShopConfigurationDao {
    shops_dir: PathBuf,
}

impl FileShopConfigurationDao {
    /// Create a DAO rooted at the platform-specific data directory.
    pub fn new() -> Result<Self> {
        let base_dir = directories::ProjectDirs::from("", "", "shop-deploy-tools")
            .context("Failed to resolve project directories")?;
        Ok(Self::with_base_dir(base_dir.data_dir()))
    }

    /// Create a DAO rooted at an explicit directory. Used by the
    /// `--config-dir` CLI flag and by tests.
    pub fn with_base_dir(base_dir: impl AsRef<Path>) -> Self {
        Self {
            shops_dir: base_dir.as_ref().join("shops"),
        }
    }

    pub fn shops_dir(&self) -> &Path {
        &self.shops_dir
    }

    fn shop_file(&self, shop_id: ShopId) -> PathBuf {
        self.shops_dir.join(format!("{shop_id}.json"))
    }

    /// All shop ids present in the store, ascending. Files that do not look
    /// like `<id>.json` are ignored.
    pub fn list_shop_ids(&self) -> Result<Vec<ShopId>> {
        if !self.shops_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.shops_dir).map_err(|e| {
            DeployError::io_error(
                "list shop configurations",
                Some(self.shops_dir.display().to_string()),
                e,
            )
        })?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                DeployError::io_error(
                    "list shop configurations",
                    Some(self.shops_dir.display().to_string()),
                    e,
                )
            })?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if let Ok(id) = stem.parse::<ShopId>() {
                    ids.push(id);
                }
            }
        }

        ids.sort();
        Ok(ids)
    }

    fn read_shop_file(&self, shop_id: ShopId, path: &Path) -> Result<ShopConfiguration> {
        let contents = fs::read_to_string(path).map_err(|e| {
            DeployError::io_error(
                format!("read configuration of shop {shop_id}"),
                Some(path.display().to_string()),
                e,
            )
        })?;

        serde_json::from_str(&contents)
            .map_err(|e| DeployError::config_error(path.display().to_string(), e.to_string()))
    }
}

impl ShopConfigurationDao for FileShopConfigurationDao {
    fn get(&self, shop_id: ShopId) -> Result<ShopConfiguration> {
        let path = self.shop_file(shop_id);
        if !path.exists() {
            return Err(DeployError::shop_not_found(
                shop_id,
                self.list_shop_ids().unwrap_or_default(),
            ));
        }

        self.read_shop_file(shop_id, &path)
    }

    fn get_all(&self) -> Result<BTreeMap<ShopId, ShopConfiguration>> {
        let mut configurations = BTreeMap::new();
        for shop_id in self.list_shop_ids()? {
            let path = self.shop_file(shop_id);
            configurations.insert(shop_id, self.read_shop_file(shop_id, &path)?);
        }
        Ok(configurations)
    }

    fn save(&self, shop_id: ShopId, configuration: &ShopConfiguration) -> Result<()> {
        fs::create_dir_all(&self.shops_dir).map_err(|e| {
            DeployError::io_error(
                "create shop configuration directory",
                Some(self.shops_dir.display().to_string()),
                e,
            )
        })?;

        let path = self.shop_file(shop_id);
        let contents = serde_json::to_string_pretty(configuration)
            .map_err(|e| DeployError::config_error(path.display().to_string(), e.to_string()))?;

        fs::write(&path, contents).map_err(|e| {
            DeployError::io_error(
                format!("write configuration of shop {shop_id}"),
                Some(path.display().to_string()),
                e,
            )
        })?;

        Ok(())
    }
}
