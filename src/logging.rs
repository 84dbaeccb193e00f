use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured logging based on verbosity level
pub fn init_logging(verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("shop_deploy_tools=debug,info"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("shop_deploy_tools=info,warn,error"))
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    if verbose {
        tracing::info!("Verbose logging enabled");
    }

    Ok(())
}

/// Log one module activation or deactivation
pub fn log_module_operation(module: &str, shop: u32, operation: &str, success: bool) {
    if success {
        tracing::info!(
            module = module,
            shop = shop,
            operation = operation,
            "Module operation completed"
        );
    } else {
        tracing::error!(
            module = module,
            shop = shop,
            operation = operation,
            "Module operation failed"
        );
    }
}

/// Log the aggregate outcome of a deploy run
pub fn log_deploy_summary(activated: usize, deactivated: usize, failed: usize) {
    tracing::info!(
        activated = activated,
        deactivated = deactivated,
        failed = failed,
        "Deployment finished"
    );
}
