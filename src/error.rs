use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::{SymbolCode, TenantId};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Authorization faults. Fatal: no mutation is applied.
#[derive(Error, Debug, Clone)]
pub enum AuthError {
    #[error("tenant '{tenant}' is outside the reserved namespace '{suffix}'")]
    NamespaceRequired { tenant: TenantId, suffix: String },

    #[error("tenant '{tenant}' must not belong to the reserved namespace '{suffix}'")]
    NamespaceForbidden { tenant: TenantId, suffix: String },

    #[error("operator authority required to {action}")]
    OperatorRequired { action: &'static str },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Administrative erase found nothing to remove in any deletable kind.
    #[error("tenant '{tenant}' has no record in any erasable kind")]
    NothingToErase { tenant: TenantId },

    /// A listed currency reported a zero reserve on the quote leg.
    #[error("zero {symbol} reserve while computing spot price for tenant '{tenant}'")]
    ZeroReserve { tenant: TenantId, symbol: SymbolCode },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure inside an external collaborator (liquidity venue, store backend).
    #[error("collaborator error: {0}")]
    Collaborator(String),
}

pub type Result<T> = std::result::Result<T, Error>;
