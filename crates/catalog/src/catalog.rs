//! Operator catalog loading and validation
//!
//! The catalog is read from TOML, either the bundled `data/operators.toml` or
//! a user-supplied file. Every source goes through `Catalog::new`, which
//! rejects duplicate identifiers, operators without widths and inconsistent
//! flags before anything downstream runs.

use crate::bitwidth::BitWidth;
use crate::operator::Operator;
use serde::Deserialize;
use shared::errors::{CatalogError, CodegenResult};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../data/operators.toml");

/// On-disk catalog format: a list of `[[operator]]` tables
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(rename = "operator", default)]
    operators: Vec<Operator>,
}

/// Validated, ordered operator list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    operators: Vec<Operator>,
}

impl Catalog {
    /// Validate an operator list, keeping declaration order
    pub fn new(operators: Vec<Operator>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for op in &operators {
            if !seen.insert(op.name.as_str()) {
                return Err(CatalogError::DuplicateOperator {
                    name: op.name.clone(),
                });
            }
            op.validate()?;
        }
        tracing::debug!(operators = operators.len(), "catalog validated");
        Ok(Self { operators })
    }

    /// The operator set shipped with the generator
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Parse and validate a TOML catalog
    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(source).map_err(|e| CatalogError::Parse {
            what: "operator catalog".to_string(),
            reason: e.to_string(),
        })?;
        Self::new(file.operators)
    }

    /// Read, parse and validate a TOML catalog file
    pub fn from_path(path: &Path) -> CodegenResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&source)?)
    }

    /// Operators in declaration order; this order seeds all numbering
    pub fn list_operators(&self) -> &[Operator] {
        &self.operators
    }

    pub fn operator(&self, name: &str) -> Option<&Operator> {
        self.operators.iter().find(|op| op.name == name)
    }

    /// Whether `op` supports `width`; unknown operators support nothing
    pub fn is_supported(&self, op: &str, width: BitWidth) -> bool {
        self.operator(op).is_some_and(|o| o.supports_width(width))
    }

    /// Union of every declared width, ascending
    pub fn widths(&self) -> Vec<BitWidth> {
        self.operators
            .iter()
            .flat_map(|op| op.widths.iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}
