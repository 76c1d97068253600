//! Contract configuration

use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use core_kernel::CoreError;
use domain_claims::{AccessPolicy, AuthorizationGate, CoverageAmountPolicy, Operation, DEFAULT_ROLE_ATTRIBUTE};

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Contract configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ContractConfig {
    /// Identity attribute carrying the caller's role
    #[validate(length(min = 1))]
    pub role_attribute: String,
    /// Log filter directive, e.g. `info` or `domain_claims=debug`
    #[validate(custom(function = "validate_log_filter"))]
    pub log_level: String,
    pub log_format: LogFormat,
    /// Per-operation role allow-lists
    pub access: AccessPolicy,
    /// Constraint on amounts passed to `establishCoverage`
    pub coverage_amount: CoverageAmountPolicy,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            role_attribute: DEFAULT_ROLE_ATTRIBUTE.to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
            access: AccessPolicy::default(),
            coverage_amount: CoverageAmountPolicy::default(),
        }
    }
}

fn validate_log_filter(level: &str) -> Result<(), ValidationError> {
    tracing_subscriber::EnvFilter::try_new(level)
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_log_filter"))
}

impl ContractConfig {
    /// Loads configuration from `CLAIMS__*` environment variables
    ///
    /// A `.env` file in the working directory is read first when present.
    /// Nested keys use `__` (`CLAIMS__ACCESS__REJECT_CLAIM=claimsAdjuster`) and
    /// role lists are comma separated.
    pub fn from_env() -> Result<Self, CoreError> {
        dotenvy::dotenv().ok();

        let mut environment = config::Environment::with_prefix("CLAIMS")
            .prefix_separator("__")
            .separator("__")
            .list_separator(",")
            .try_parsing(true);
        for operation in Operation::ALL {
            environment = environment.with_list_parse_key(&access_key(operation));
        }

        let built = config::Config::builder()
            .add_source(environment)
            .build()
            .map_err(config_error)?;
        Self::finish(built)
    }

    /// Loads configuration from a file; the format follows the extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let built = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .build()
            .map_err(config_error)?;
        Self::finish(built)
    }

    /// Loads configuration from a TOML document
    pub fn from_toml_str(toml: &str) -> Result<Self, CoreError> {
        let built = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .map_err(config_error)?;
        Self::finish(built)
    }

    fn finish(built: config::Config) -> Result<Self, CoreError> {
        let config: Self = built.try_deserialize().map_err(config_error)?;
        config
            .validate()
            .map_err(|e| CoreError::configuration(e.to_string()))?;
        Ok(config)
    }

    /// Authorization gate described by this configuration
    pub fn gate(&self) -> AuthorizationGate {
        AuthorizationGate::new(self.access.clone()).with_role_attribute(self.role_attribute.clone())
    }
}

fn access_key(operation: Operation) -> String {
    let field = match operation {
        Operation::FileClaim => "file_claim",
        Operation::GetClaim => "get_claim",
        Operation::RejectClaim => "reject_claim",
        Operation::EstablishCoverage => "establish_coverage",
        Operation::CloseClaim => "close_claim",
    };
    format!("access.{field}")
}

fn config_error(err: config::ConfigError) -> CoreError {
    CoreError::configuration(err.to_string())
}
