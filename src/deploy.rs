//! Deploys declarative module configurations: every module marked
//! `activated=true` is activated, every other module is deactivated.
//!
//! A failure while deploying one module is reported and counted but never
//! stops the remaining modules or shops. The caller turns a non-zero
//! failure count into the process exit code.

use colored::Colorize;
use std::sync::Arc;

use crate::activation::ModuleActivationService;
use crate::config::{ModuleConfiguration, ShopConfiguration, ShopConfigurationDao, ShopId};
use crate::error::DeployError;

/// Outcome of one deploy run, aggregated across all processed shops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeploySummary {
    pub activated: usize,
    pub deactivated: usize,
    pub failed: usize,
}

impl DeploySummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

pub struct DeployConfigurationsCommand {
    dao: Arc<dyn ShopConfigurationDao>,
    activation_service: Arc<dyn ModuleActivationService>,
}

impl DeployConfigurationsCommand {
    pub fn new(
        dao: Arc<dyn ShopConfigurationDao>,
        activation_service: Arc<dyn ModuleActivationService>,
    ) -> Self {
        Self {
            dao,
            activation_service,
        }
    }

    /// Deploy one shop, or every configured shop when no id is given.
    ///
    /// Failing to resolve the shop set is a hard error. Per-module failures
    /// are only reflected in the returned summary.
    pub fn execute(&self, shop_id: Option<ShopId>) -> Result<DeploySummary, DeployError> {
        let mut summary = DeploySummary::default();

        match shop_id {
            Some(shop_id) => {
                let configuration = self.dao.get(shop_id)?;
                self.deploy_shop(shop_id, &configuration, &mut summary);
            }
            None => {
                for (shop_id, configuration) in self.dao.get_all()? {
                    self.deploy_shop(shop_id, &configuration, &mut summary);
                }
            }
        }

        Ok(summary)
    }

    fn deploy_shop(
        &self,
        shop_id: ShopId,
        configuration: &ShopConfiguration,
        summary: &mut DeploySummary,
    ) {
        println!(
            "{} Deploying modules for shop {}:",
            "→".green(),
            shop_id.to_string().cyan()
        );

        for module in &configuration.modules {
            if module.activated {
                self.activate_module(module, shop_id, summary);
            } else {
                self.deactivate_module(module, shop_id, summary);
            }
        }
    }

    fn activate_module(
        &self,
        module: &ModuleConfiguration,
        shop_id: ShopId,
        summary: &mut DeploySummary,
    ) {
        println!("  Activating {}", module.id.cyan());

        match self.activation_service.activate(&module.id, shop_id) {
            Ok(()) => {
                summary.activated += 1;
                crate::logging::log_module_operation(&module.id, shop_id.0, "activate", true);
            }
            Err(err) => self.report_failure(&module.id, shop_id, err, summary),
        }
    }

    fn deactivate_module(
        &self,
        module: &ModuleConfiguration,
        shop_id: ShopId,
        summary: &mut DeploySummary,
    ) {
        println!("  Deactivating {}", module.id.cyan());

        match self.activation_service.deactivate(&module.id, shop_id) {
            Ok(()) => {
                summary.deactivated += 1;
                crate::logging::log_module_operation(&module.id, shop_id.0, "deactivate", true);
            }
            Err(err) => self.report_failure(&module.id, shop_id, err, summary),
        }
    }

    fn report_failure(
        &self,
        module_id: &str,
        shop_id: ShopId,
        err: DeployError,
        summary: &mut DeploySummary,
    ) {
        summary.failed += 1;
        crate::logging::log_module_operation(module_id, shop_id.0, "deploy", false);
        eprintln!(
            "{} An error occurred deploying {}: {}",
            "✗".red().bold(),
            module_id.yellow(),
            err
        );
    }
}
