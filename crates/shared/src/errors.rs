//! Error types for the TFHE code generator
//!
//! Every failure is tagged with the pipeline stage that produced it. All of
//! them are fatal: the driver aborts the run before any file is written.

use thiserror::Error;

/// Result alias used across the workspace
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Top-level error, one variant per pipeline stage
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("resolve: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("partition: {0}")]
    Partition(#[from] PartitionError),

    #[error("emit: {0}")]
    Emit(#[from] EmitError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed operator catalog or pricing table
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate operator identifier '{name}'")]
    DuplicateOperator { name: String },

    #[error("operator '{name}' declares no supported widths")]
    NoSupportedWidths { name: String },

    #[error("operator '{name}' has an invalid promotion rule: {reason}")]
    InvalidPromotion { name: String, reason: String },

    #[error("operator '{name}' has inconsistent flags: {reason}")]
    InvalidFlags { name: String, reason: String },

    #[error("pricing entry '{name}' does not match any catalog operator")]
    UnknownPricedOperator { name: String },

    #[error("failed to parse {what}: {reason}")]
    Parse { what: String, reason: String },
}

/// Catalog that validates but cannot be expanded into overloads
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolutionError {
    #[error(
        "operator '{operator}' mixes scalars but has no promotion rule for {narrow} -> {wide}"
    )]
    MissingPromotion {
        operator: String,
        narrow: String,
        wide: String,
    },
}

/// Invalid partitioning parameters, rejected at call time
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PartitionError {
    #[error("shard capacity must be at least 1")]
    ZeroCapacity,

    #[error("number of test splits must be at least 1")]
    ZeroSplits,
}

/// Emitter or write-phase failure
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("artifact path '{path}' is emitted twice")]
    DuplicatePath { path: String },

    #[error("artifact path '{path}' must be relative")]
    AbsolutePath { path: String },

    #[error("{artifact}: {reason}")]
    Template { artifact: String, reason: String },

    #[error("failed to create '{path}': {reason}")]
    FileCreation { path: String, reason: String },

    #[error("failed to write '{path}': {reason}")]
    FileWrite { path: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_prefix_in_messages() {
        let err: CodegenError = CatalogError::DuplicateOperator {
            name: "add".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "catalog: duplicate operator identifier 'add'");

        let err: CodegenError = PartitionError::ZeroSplits.into();
        assert!(err.to_string().starts_with("partition: "));

        let err: CodegenError = ResolutionError::MissingPromotion {
            operator: "shl".to_string(),
            narrow: "8".to_string(),
            wide: "16".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "resolve: operator 'shl' mixes scalars but has no promotion rule for 8 -> 16"
        );
    }
}
