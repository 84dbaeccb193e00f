use colored::Colorize;
use std::fmt;

use crate::config::ShopId;

#[derive(Debug)]
pub enum DeployError {
    ShopNotFound {
        shop_id: ShopId,
        available_shops: Vec<ShopId>,
    },
    ModuleNotFound {
        module_id: String,
        shop_id: ShopId,
    },
    ConfigError {
        path: String,
        message: String,
    },
    HookFailed {
        module_id: String,
        hook: String,
        message: String,
    },
    IoError {
        operation: String,
        path: Option<String>,
        source: std::io::Error,
    },
    Other(anyhow::Error),
}

impl DeployError {
    pub fn shop_not_found(shop_id: ShopId, available_shops: Vec<ShopId>) -> Self {
        Self::ShopNotFound {
            shop_id,
            available_shops,
        }
    }

    pub fn module_not_found(module_id: impl Into<String>, shop_id: ShopId) -> Self {
        Self::ModuleNotFound {
            module_id: module_id.into(),
            shop_id,
        }
    }

    pub fn config_error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn hook_failed(
        module_id: impl Into<String>,
        hook: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::HookFailed {
            module_id: module_id.into(),
            hook: hook.into(),
            message: message.into(),
        }
    }

    pub fn io_error(
        operation: impl Into<String>,
        path: Option<String>,
        source: std::io::Error,
    ) -> Self {
        Self::IoError {
            operation: operation.into(),
            path,
            source,
        }
    }
}

impl fmt::Display for DeployError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShopNotFound {
                shop_id,
                available_shops,
            } => {
                writeln!(
                    f,
                    "{} Shop not found: {}",
                    "✗".red().bold(),
                    shop_id.to_string().yellow()
                )?;
                if available_shops.is_empty() {
                    writeln!(f, "  {} No shops are configured yet", "→".blue())?;
                } else {
                    writeln!(f, "{}", "Configured shops:".green())?;
                    for shop in available_shops {
                        writeln!(f, "  {} {}", "•".blue(), shop)?;
                    }
                }
                Ok(())
            }
            Self::ModuleNotFound { module_id, shop_id } => {
                writeln!(
                    f,
                    "{} Module not found: {}",
                    "✗".red().bold(),
                    module_id.yellow()
                )?;
                writeln!(f, "  {} Shop: {}", "→".blue(), shop_id)?;
                Ok(())
            }
            Self::ConfigError { path, message } => {
                writeln!(f, "{} Configuration error", "✗".red().bold())?;
                writeln!(f, "  {} Path: {}", "→".blue(), path.yellow())?;
                writeln!(f, "  {} Error: {}", "→".blue(), message)?;
                Ok(())
            }
            Self::HookFailed {
                module_id,
                hook,
                message,
            } => {
                writeln!(
                    f,
                    "{} Lifecycle hook failed for module: {}",
                    "✗".red().bold(),
                    module_id.yellow()
                )?;
                writeln!(f, "  {} Hook: {}", "→".blue(), hook)?;
                writeln!(f, "  {} Error: {}", "→".blue(), message)?;
                Ok(())
            }
            Self::IoError {
                operation,
                path,
                source,
            } => {
                writeln!(
                    f,
                    "{} I/O error during: {}",
                    "✗".red().bold(),
                    operation.yellow()
                )?;
                if let Some(path) = path {
                    writeln!(f, "  {} Path: {}", "→".blue(), path)?;
                }
                writeln!(f, "  {} Error: {}", "→".blue(), source)?;
                Ok(())
            }
            Self::Other(err) => write!(f, "{} {}", "✗".red().bold(), err),
        }
    }
}

impl std::error::Error for DeployError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError { source, .. } => Some(source),
            Self::Other(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DeployError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            operation: "unknown".to_string(),
            path: None,
            source: err,
        }
    }
}

impl From<anyhow::Error> for DeployError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err)
    }
}

pub type Result<T> = std::result::Result<T, DeployError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shop_not_found_lists_available_shops() {
        let err = DeployError::shop_not_found(ShopId(5), vec![ShopId(1), ShopId(2)]);
        let message = err.to_string();

        assert!(message.contains("Shop not found: 5"));
        assert!(message.contains("1"));
        assert!(message.contains("2"));
    }

    #[test]
    fn test_shop_not_found_with_empty_store() {
        let err = DeployError::shop_not_found(ShopId(1), vec![]);
        assert!(err.to_string().contains("No shops are configured yet"));
    }

    #[test]
    fn test_hook_failed_names_module_and_hook() {
        let err = DeployError::hook_failed("newsletter", "on_activate", "exit status 1");
        let message = err.to_string();

        assert!(message.contains("newsletter"));
        assert!(message.contains("on_activate"));
        assert!(message.contains("exit status 1"));
    }

    #[test]
    fn test_io_error_source_is_preserved() {
        use std::error::Error;

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = DeployError::io_error("read shop configuration", None, io);

        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DeployError = io.into();

        match err {
            DeployError::IoError { operation, .. } => assert_eq!(operation, "unknown"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
