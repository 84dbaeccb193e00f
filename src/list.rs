//! Read-only overview of the configuration store: which shops exist and
//! which activation state each module is configured to reach.

use colored::Colorize;
use std::sync::Arc;

use crate::config::{ShopConfiguration, ShopConfigurationDao, ShopId};
use crate::error::Result;

pub struct ListCommand {
    dao: Arc<dyn ShopConfigurationDao>,
    verbose: bool,
}

impl ListCommand {
    pub fn new(dao: Arc<dyn ShopConfigurationDao>, verbose: bool) -> Self {
        Self { dao, verbose }
    }

    pub fn execute(&self, shop_id: Option<ShopId>) -> Result<()> {
        println!("{}", "Shop module configurations".blue().bold());
        println!();

        let shops = match shop_id {
            Some(shop_id) => vec![(shop_id, self.dao.get(shop_id)?)],
            None => self.dao.get_all()?.into_iter().collect(),
        };

        if shops.is_empty() {
            println!("No shops configured yet.");
            println!();
            println!("To add one, create a shop configuration and run:");
            println!("  {}", "shop-deploy deploy-configurations".cyan());
            return Ok(());
        }

        let mut total_modules = 0;
        for (shop_id, configuration) in &shops {
            self.print_shop(*shop_id, configuration);
            total_modules += configuration.modules.len();
        }

        println!(
            "Total: {} shop(s), {} module(s)",
            shops.len().to_string().green(),
            total_modules.to_string().green()
        );

        Ok(())
    }

    fn print_shop(&self, shop_id: ShopId, configuration: &ShopConfiguration) {
        println!("{} Shop {}", "→".green(), shop_id.to_string().cyan().bold());

        if configuration.modules.is_empty() {
            println!("  (no modules configured)");
            println!();
            return;
        }

        for module in &configuration.modules {
            let state = if module.activated {
                "activated".green()
            } else {
                "deactivated".dimmed()
            };
            println!("  • {}: {}", module.id.yellow(), state);

            if self.verbose {
                if let Some(hook) = &module.events.on_activate {
                    println!("      on_activate: {} {}", hook.command, hook.args.join(" "));
                }
                if let Some(hook) = &module.events.on_deactivate {
                    println!(
                        "      on_deactivate: {} {}",
                        hook.command,
                        hook.args.join(" ")
                    );
                }
            }
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FileShopConfigurationDao, ModuleConfiguration};
    use tempfile::TempDir;

    fn command_in(temp: &TempDir, verbose: bool) -> (ListCommand, Arc<FileShopConfigurationDao>) {
        let dao = Arc::new(FileShopConfigurationDao::with_base_dir(temp.path()));
        (
            ListCommand::new(Arc::clone(&dao) as Arc<dyn ShopConfigurationDao>, verbose),
            dao,
        )
    }

    #[test]
    fn test_list_on_empty_store_succeeds() {
        let temp = TempDir::new().unwrap();
        let (command, _dao) = command_in(&temp, false);

        assert!(command.execute(None).is_ok());
    }

    #[test]
    fn test_list_all_shops() {
        let temp = TempDir::new().unwrap();
        let (command, dao) = command_in(&temp, true);

        let mut shop = ShopConfiguration::new();
        shop.add_module(ModuleConfiguration::new("newsletter", true));
        dao.save(ShopId(1), &shop).unwrap();
        dao.save(ShopId(2), &ShopConfiguration::new()).unwrap();

        assert!(command.execute(None).is_ok());
    }

    #[test]
    fn test_list_unknown_shop_fails() {
        let temp = TempDir::new().unwrap();
        let (command, _dao) = command_in(&temp, false);

        assert!(command.execute(Some(ShopId(7))).is_err());
    }
}
