//! Generation configuration
//!
//! Resolves CLI arguments into a `GenerationConfig`: where inputs are read
//! from (bundled defaults unless overridden) and how the overload set is
//! partitioned.

use anyhow::Context;
use catalog::{Catalog, PricingTable};
use clap::Args;
use overloads::{DEFAULT_NUM_SPLITS, DEFAULT_SHARD_CAPACITY, PlanConfig};
use std::path::{Path, PathBuf};

/// Executor contract read by the event pass, relative to the output root
pub const DEFAULT_EXECUTOR: &str = "lib/TFHEExecutor.sol";

/// Arguments of the `generate` command
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Output root; artifacts land under lib/, payment/, contracts/tests/ and test/
    #[arg(long, short, default_value = ".")]
    pub output: PathBuf,

    /// Operator catalog (TOML); defaults to the bundled catalog
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Operator price table (JSON); defaults to the bundled prices
    #[arg(long)]
    pub prices: Option<PathBuf>,

    /// Executor contract to derive the event-emitting variant from
    ///
    /// Defaults to <output>/lib/TFHEExecutor.sol.
    #[arg(long)]
    pub executor: Option<PathBuf>,

    /// Maximum number of overloads per generated test contract
    #[arg(long, default_value_t = DEFAULT_SHARD_CAPACITY)]
    pub shard_capacity: usize,

    /// Number of generated host test files
    #[arg(long, default_value_t = DEFAULT_NUM_SPLITS)]
    pub num_splits: usize,

    /// Print per-operator overload counts and shard/split sizes
    #[arg(long, short)]
    pub verbose: bool,
}

/// Fully resolved settings for one generation run
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub output: PathBuf,
    pub catalog: Option<PathBuf>,
    pub prices: Option<PathBuf>,
    pub executor: PathBuf,
    pub plan: PlanConfig,
    pub verbose: bool,
}

impl GenerationConfig {
    /// Create the configuration from CLI arguments
    pub fn from_cli_args(args: GenerateArgs) -> Self {
        let executor = args
            .executor
            .unwrap_or_else(|| args.output.join(DEFAULT_EXECUTOR));
        Self {
            output: args.output,
            catalog: args.catalog,
            prices: args.prices,
            executor,
            plan: PlanConfig {
                shard_capacity: args.shard_capacity,
                num_splits: args.num_splits,
            },
            verbose: args.verbose,
        }
    }

    /// Defaults for everything, writing to `output`
    pub fn with_output(output: &Path) -> Self {
        Self {
            output: output.to_path_buf(),
            catalog: None,
            prices: None,
            executor: output.join(DEFAULT_EXECUTOR),
            plan: PlanConfig::default(),
            verbose: false,
        }
    }

    pub fn load_catalog(&self) -> anyhow::Result<Catalog> {
        match &self.catalog {
            Some(path) => Catalog::from_path(path)
                .with_context(|| format!("failed to load catalog '{}'", path.display())),
            None => Ok(Catalog::builtin()?),
        }
    }

    pub fn load_pricing(&self) -> anyhow::Result<PricingTable> {
        match &self.prices {
            Some(path) => PricingTable::from_path(path)
                .with_context(|| format!("failed to load prices '{}'", path.display())),
            None => Ok(PricingTable::builtin()?),
        }
    }

    pub fn read_executor(&self) -> anyhow::Result<String> {
        std::fs::read_to_string(&self.executor).with_context(|| {
            format!(
                "failed to read executor contract '{}'",
                self.executor.display()
            )
        })
    }

    /// How `lib/TFHEExecutor.events.sol` imports the executor
    ///
    /// The executor is expected to sit next to the generated file in `lib/`.
    pub fn executor_import(&self) -> String {
        let file = self
            .executor
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| "TFHEExecutor.sol".to_string());
        format!("./{file}")
    }
}
