pub mod activation;
pub mod config;
pub mod deploy;
pub mod error;
pub mod list;
pub mod logging;

pub use activation::{HookActivationService, ModuleActivationService};
pub use config::{
    FileShopConfigurationDao, HookCommand, ModuleConfiguration, ShopConfiguration,
    ShopConfigurationDao, ShopId,
};
pub use deploy::{DeployConfigurationsCommand, DeploySummary};
pub use error::{DeployError, Result};
