//! Module activation seam.
//!
//! The deploy command only talks to the `ModuleActivationService` trait. The
//! bundled `HookActivationService` implements a state change by running the
//! module's declared lifecycle hook command as a child process; the host
//! platform can plug in its own service instead.

use std::process::Command;
use std::sync::Arc;

use crate::config::{HookCommand, ModuleConfiguration, ShopConfigurationDao, ShopId};
use crate::error::{DeployError, Result};

pub trait ModuleActivationService: Send + Sync {
    fn activate(&self, module_id: &str, shop_id: ShopId) -> Result<()>;

    fn deactivate(&self, module_id: &str, shop_id: ShopId) -> Result<()>;
}

enum Hook {
    OnActivate,
    OnDeactivate,
}

impl Hook {
    fn name(&self) -> &'static str {
        match self {
            Hook::OnActivate => "on_activate",
            Hook::OnDeactivate => "on_deactivate",
        }
    }
}

/// Activation service that executes the module's lifecycle hook commands.
/// A module without the relevant hook needs no work, so the state change
/// succeeds as a no-op.
pub struct HookActivationService {
    dao: Arc<dyn ShopConfigurationDao>,
}

impl HookActivationService {
    pub fn new(dao: Arc<dyn ShopConfigurationDao>) -> Self {
        Self { dao }
    }

    fn run_hook(&self, module_id: &str, shop_id: ShopId, hook: Hook) -> Result<()> {
        let configuration = self.dao.get(shop_id)?;
        let module = configuration
            .module(module_id)
            .ok_or_else(|| DeployError::module_not_found(module_id, shop_id))?;

        let command = match hook {
            Hook::OnActivate => &module.events.on_activate,
            Hook::OnDeactivate => &module.events.on_deactivate,
        };

        match command {
            Some(command) => execute_hook(module, shop_id, hook.name(), command),
            None => {
                tracing::debug!(
                    module = module_id,
                    shop = shop_id.0,
                    hook = hook.name(),
                    "No hook declared, nothing to run"
                );
                Ok(())
            }
        }
    }
}

fn execute_hook(
    module: &ModuleConfiguration,
    shop_id: ShopId,
    hook_name: &str,
    hook: &HookCommand,
) -> Result<()> {
    // Bare command names must be resolvable through PATH; anything with a
    // path separator is taken as-is and left to the OS to reject.
    if !hook.command.contains(std::path::MAIN_SEPARATOR)
        && !hook.command.contains('/')
        && which::which(&hook.command).is_err()
    {
        return Err(DeployError::hook_failed(
            &module.id,
            hook_name,
            format!("command not found: {}", hook.command),
        ));
    }

    tracing::debug!(
        module = %module.id,
        shop = shop_id.0,
        hook = hook_name,
        command = %hook.command,
        "Running lifecycle hook"
    );

    let mut cmd = Command::new(&hook.command);
    cmd.args(&hook.args);
    cmd.env("SHOP_ID", shop_id.to_string());
    cmd.env("MODULE_ID", &module.id);
    if let Some(source) = &module.source {
        cmd.env("MODULE_SOURCE", source);
    }

    let status = cmd.status().map_err(|e| {
        DeployError::hook_failed(
            &module.id,
            hook_name,
            format!("failed to execute {}: {e}", hook.command),
        )
    })?;

    if !status.success() {
        let exit_code = status.code().unwrap_or(-1);
        return Err(DeployError::hook_failed(
            &module.id,
            hook_name,
            format!("{} exited with status {exit_code}", hook.command),
        ));
    }

    Ok(())
}

impl ModuleActivationService for HookActivationService {
    fn activate(&self, module_id: &str, shop_id: ShopId) -> Result<()> {
        self.run_hook(module_id, shop_id, Hook::OnActivate)
    }

    fn deactivate(&self, module_id: &str, shop_id: ShopId) -> Result<()> {
        self.run_hook(module_id, shop_id, Hook::OnDeactivate)
    }
}
