//! Per-operator price table
//!
//! Prices are opaque to the generator: they are read from JSON, checked
//! against the catalog and passed through to the payment emitter.

use crate::bitwidth::BitWidth;
use crate::catalog::Catalog;
use serde::Deserialize;
use shared::errors::{CatalogError, CodegenResult};
use std::collections::BTreeMap;
use std::path::Path;

const BUILTIN_PRICES: &str = include_str!("../data/operators_prices.json");

/// Prices of one operator, keyed by operand width
///
/// Binary operators use `scalar` / `non_scalar`; unary operators use `types`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperatorPrice {
    #[serde(default)]
    pub scalar: BTreeMap<BitWidth, u64>,
    #[serde(default)]
    pub non_scalar: BTreeMap<BitWidth, u64>,
    #[serde(default)]
    pub types: BTreeMap<BitWidth, u64>,
}

impl OperatorPrice {
    pub fn is_empty(&self) -> bool {
        self.scalar.is_empty() && self.non_scalar.is_empty() && self.types.is_empty()
    }
}

/// Price table keyed by operator identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct PricingTable {
    entries: BTreeMap<String, OperatorPrice>,
}

impl PricingTable {
    /// The price table shipped with the generator
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_PRICES)
    }

    pub fn from_json_str(source: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(source).map_err(|e| CatalogError::Parse {
            what: "pricing table".to_string(),
            reason: e.to_string(),
        })
    }

    pub fn from_path(path: &Path) -> CodegenResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Ok(Self::from_json_str(&source)?)
    }

    /// Every priced operator must exist in the catalog
    pub fn validate_against(&self, catalog: &Catalog) -> Result<(), CatalogError> {
        for name in self.entries.keys() {
            if catalog.operator(name).is_none() {
                return Err(CatalogError::UnknownPricedOperator { name: name.clone() });
            }
        }
        Ok(())
    }

    pub fn get(&self, operator: &str) -> Option<&OperatorPrice> {
        self.entries.get(operator)
    }

    /// Entries in identifier order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OperatorPrice)> {
        self.entries.iter().map(|(name, price)| (name.as_str(), price))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
