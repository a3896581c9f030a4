//! Runtime configuration built from arguments and the environment.

use crate::args::ParsedArgs;
use scolex_core::{CollisionPolicy, RegistryConfig};

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV: &str = "SCOLEX_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";

/// Settings for one run of the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Options for the registry the run interns into.
    pub registry: RegistryConfig,
    /// Tracing filter directive.
    pub log_filter: String,
}

impl CliConfig {
    /// Build configuration from parsed arguments and the process environment.
    pub fn from_args(args: &ParsedArgs) -> Self {
        Self::from_parts(args, std::env::var(LOG_ENV).ok())
    }

    fn from_parts(args: &ParsedArgs, log_env: Option<String>) -> Self {
        let policy = if args.verify_symbols {
            CollisionPolicy::VerifyContent
        } else {
            CollisionPolicy::HashOnly
        };

        Self {
            registry: RegistryConfig::default().with_policy(policy),
            log_filter: log_env
                .filter(|filter| !filter.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}
