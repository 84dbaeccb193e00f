//! Data objects for per-shop module configuration.
//!
//! A shop owns an ordered list of module configurations. Each entry names a
//! module, carries the desired `activated` state, and may declare lifecycle
//! hook commands that the activation service runs on state changes.

pub mod dao;

pub use dao::{FileShopConfigurationDao, ShopConfigurationDao};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Identifier of one shop tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopId(pub u32);

impl fmt::Display for ShopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ShopId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id: u32 = s
            .parse()
            .map_err(|_| format!("invalid shop id '{s}': expected a positive integer"))?;
        if id == 0 {
            return Err("shop id must be greater than zero".to_string());
        }
        Ok(ShopId(id))
    }
}

/// A command executed when a module changes activation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookCommand {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Lifecycle hooks of a module. Both are optional; a missing hook means the
/// state change needs no work beyond bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleEvents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_activate: Option<HookCommand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_deactivate: Option<HookCommand>,
}

/// Declarative configuration of one module within a shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleConfiguration {
    pub id: String,
    pub activated: bool,
    #[serde(default)]
    pub events: ModuleEvents,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

impl ModuleConfiguration {
    pub fn new(id: impl Into<String>, activated: bool) -> Self {
        Self {
            id: id.into(),
            activated,
            events: ModuleEvents::default(),
            source: None,
        }
    }

    pub fn with_on_activate(mut self, hook: HookCommand) -> Self {
        self.events.on_activate = Some(hook);
        self
    }

    pub fn with_on_deactivate(mut self, hook: HookCommand) -> Self {
        self.events.on_deactivate = Some(hook);
        self
    }
}

/// Ordered set of module configurations for one shop. Modules are deployed
/// in the order they appear here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopConfiguration {
    #[serde(default)]
    pub modules: Vec<ModuleConfiguration>,
}

impl ShopConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_module(&mut self, module: ModuleConfiguration) {
        self.modules.push(module);
    }

    pub fn module(&self, module_id: &str) -> Option<&ModuleConfiguration> {
        self.modules.iter().find(|m| m.id == module_id)
    }
}
