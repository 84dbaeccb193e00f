use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use shop_deploy_tools::activation::{HookActivationService, ModuleActivationService};
use shop_deploy_tools::config::{FileShopConfigurationDao, ShopConfigurationDao, ShopId};
use shop_deploy_tools::deploy::DeployConfigurationsCommand;
use shop_deploy_tools::error::Result;
use shop_deploy_tools::list::ListCommand;
use shop_deploy_tools::logging;

#[derive(Parser)]
#[command(name = "shop-deploy")]
#[command(version = "0.1.0")]
#[command(about = "Deploy declarative module configurations for shop tenants", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, help = "Enable verbose output", global = true)]
    verbose: bool,

    #[arg(
        long,
        value_name = "DIR",
        help = "Directory holding the shop configuration store",
        global = true
    )]
    config_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "deploy-configurations",
        about = "Activate all modules with activated=true and deactivate the rest"
    )]
    DeployConfigurations {
        #[arg(help = "Id of a shop; all shops when omitted")]
        shop_id: Option<ShopId>,
    },

    #[command(about = "List shops and the desired state of their modules")]
    List {
        #[arg(help = "Id of a shop; all shops when omitted")]
        shop_id: Option<ShopId>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if logging::init_logging(cli.verbose).is_err() && cli.verbose {
        eprintln!("{}", "Logging was already initialized".dimmed());
    }

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(true)` when the run succeeded, `Ok(false)` when at least one
/// module operation failed, and `Err` for hard errors.
fn run(cli: &Cli) -> Result<bool> {
    let dao = build_dao(cli)?;

    match &cli.command {
        Commands::DeployConfigurations { shop_id } => {
            let activation_service: Arc<dyn ModuleActivationService> =
                Arc::new(HookActivationService::new(Arc::clone(&dao)));
            let command = DeployConfigurationsCommand::new(dao, activation_service);

            let summary = command.execute(*shop_id)?;
            logging::log_deploy_summary(summary.activated, summary.deactivated, summary.failed);

            if summary.is_success() {
                println!(
                    "{} Deployed: {} activated, {} deactivated",
                    "✓".green().bold(),
                    summary.activated,
                    summary.deactivated
                );
            } else {
                eprintln!(
                    "{} Deployment finished with {} failure(s)",
                    "✗".red().bold(),
                    summary.failed.to_string().red()
                );
            }

            Ok(summary.is_success())
        }
        Commands::List { shop_id } => {
            let command = ListCommand::new(dao, cli.verbose);
            command.execute(*shop_id)?;
            Ok(true)
        }
    }
}

fn build_dao(cli: &Cli) -> Result<Arc<dyn ShopConfigurationDao>> {
    let dao = match &cli.config_dir {
        Some(dir) => FileShopConfigurationDao::with_base_dir(dir),
        None => FileShopConfigurationDao::new()?,
    };

    if cli.verbose {
        eprintln!(
            "{} Using configuration store: {}",
            "ℹ".blue(),
            dao.shops_dir().display()
        );
    }

    Ok(Arc::new(dao))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_shop_id_argument_parsing() {
        let cli = Cli::parse_from(["shop-deploy", "deploy-configurations", "3"]);
        match cli.command {
            Commands::DeployConfigurations { shop_id } => assert_eq!(shop_id, Some(ShopId(3))),
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn test_shop_id_argument_is_optional() {
        let cli = Cli::parse_from(["shop-deploy", "deploy-configurations"]);
        match cli.command {
            Commands::DeployConfigurations { shop_id } => assert_eq!(shop_id, None),
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn test_invalid_shop_id_is_rejected() {
        assert!(Cli::try_parse_from(["shop-deploy", "deploy-configurations", "0"]).is_err());
        assert!(Cli::try_parse_from(["shop-deploy", "deploy-configurations", "abc"]).is_err());
    }
}
