//! The generation pipeline
//!
//! catalog + prices -> `GenerationPlan` -> every registered artifact group ->
//! one `ArtifactSet` -> disk. Nothing is written unless every stage before
//! the write phase succeeded.

use crate::config::GenerationConfig;
use executor_events::ExecutorEvents;
use fhe_payment::PaymentContracts;
use input_verifier::InputVerifiers;
use overloads::GenerationPlan;
use shared::{ArtifactGroup, ArtifactSet, CodegenResult};
use std::path::PathBuf;
use testgen::TestSuites;
use tfhe_lib::TfheLibrary;

pub type BoxedGroup = Box<dyn ArtifactGroup<GenerationPlan>>;

/// Artifact group registry, in emission order
///
/// To add a new artifact family, implement `ArtifactGroup` in its own crate
/// and add it here.
pub fn get_artifact_groups(executor_source: String, executor_import: String) -> Vec<BoxedGroup> {
    vec![
        Box::new(TfheLibrary),
        Box::new(PaymentContracts),
        Box::new(InputVerifiers),
        Box::new(ExecutorEvents::new(executor_source, executor_import)),
        Box::new(TestSuites),
    ]
}

/// Run every group against the plan and collect the results
pub fn build_artifacts(plan: &GenerationPlan, groups: &[BoxedGroup]) -> CodegenResult<ArtifactSet> {
    let mut set = ArtifactSet::new();
    for group in groups {
        let artifacts = group.generate(plan)?;
        tracing::debug!(group = group.name(), files = artifacts.len(), "generated artifacts");
        set.extend(artifacts)?;
    }
    Ok(set)
}

/// What a successful run produced
#[derive(Debug)]
pub struct GenerationSummary {
    pub overloads: usize,
    pub shards: usize,
    pub splits: usize,
    pub written: Vec<PathBuf>,
}

fn print_plan_details(plan: &GenerationPlan) {
    println!("\n=== Overloads per operator ===");
    for op in plan.catalog.list_operators() {
        let count = plan
            .overloads
            .iter()
            .filter(|o| o.operator == op.name)
            .count();
        println!("{:<8} = {count}", op.name);
    }
    println!("\n=== Shards ===");
    for shard in &plan.shards {
        println!("TFHETestSuite{:<4} = {} overloads", shard.shard_number, shard.len());
    }
    println!("\n=== Test splits ===");
    for split in &plan.splits {
        println!(
            "tfheOperations{:<3} = {} overloads, shards {:?}",
            split.split_number,
            split.len(),
            split.shard_numbers()
        );
    }
    println!();
}

/// Generate and write every artifact
pub fn generate_all(config: &GenerationConfig) -> anyhow::Result<GenerationSummary> {
    println!("📋 Loading operator catalog...");
    let catalog = config.load_catalog()?;
    let pricing = config.load_pricing()?;
    println!(
        "✅ Loaded {} operators ({} priced)",
        catalog.len(),
        pricing.len()
    );

    let executor_source = config.read_executor()?;
    println!("✅ Loaded executor: {}", config.executor.display());

    println!("⚙️  Resolving overloads...");
    let plan = GenerationPlan::build(catalog, pricing, config.plan)?;
    println!(
        "✅ {} overloads in {} shards (capacity {}), {} test splits",
        plan.overloads.len(),
        plan.shards.len(),
        config.plan.shard_capacity,
        plan.splits.len()
    );
    if config.verbose {
        print_plan_details(&plan);
    }

    println!("📄 Rendering artifacts...");
    let groups = get_artifact_groups(executor_source, config.executor_import());
    let artifacts = build_artifacts(&plan, &groups)?;

    println!("💾 Writing {} files...", artifacts.len());
    let written = artifacts.write_all(&config.output)?;

    Ok(GenerationSummary {
        overloads: plan.overloads.len(),
        shards: plan.shards.len(),
        splits: plan.splits.len(),
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const EXECUTOR: &str = r#"// SPDX-License-Identifier: BSD-3-Clause-Clear
pragma solidity ^0.8.24;

contract TFHEExecutor {
    function fheAdd(uint256 lhs, uint256 rhs, bytes1 scalarByte) public virtual returns (uint256 result) {
        result = lhs;
    }

    function fheNot(uint256 ct) public virtual returns (uint256 result) {
        result = ct;
    }
}
"#;

    fn workspace() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("lib")).unwrap();
        fs::write(dir.path().join("lib/TFHEExecutor.sol"), EXECUTOR).unwrap();
        dir
    }

    fn files_under(root: &Path, dir: &str) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(root.join(dir))
            .map(|entries| {
                entries
                    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    #[test]
    fn test_full_run_writes_every_artifact() {
        let dir = workspace();
        let config = GenerationConfig::with_output(dir.path());
        let summary = generate_all(&config).unwrap();

        for path in [
            "lib/Impl.sol",
            "lib/TFHE.sol",
            "lib/FHEPayment.sol",
            "lib/InputVerifier.native.sol",
            "lib/InputVerifier.coprocessor.sol",
            "lib/TFHEExecutor.events.sol",
            "payment/Payment.sol",
            "contracts/tests/TFHETestSuite1.sol",
            "test/tfheOperations/tfheOperations1.ts",
            "test/tfheOperations/tfheOperations12.ts",
        ] {
            assert!(dir.path().join(path).is_file(), "missing {path}");
        }
        assert_eq!(summary.splits, 12);
        assert_eq!(files_under(dir.path(), "contracts/tests").len(), summary.shards);
        assert_eq!(files_under(dir.path(), "test/tfheOperations").len(), 12);
        assert_eq!(summary.written.len(), 7 + summary.shards + 12);

        let events = fs::read_to_string(dir.path().join("lib/TFHEExecutor.events.sol")).unwrap();
        assert!(events.contains("contract TFHEExecutorWithEvents is TFHEExecutor {"));
        assert!(events.contains("emit FheNot(ct, result);"));
    }

    #[test]
    fn test_runs_are_byte_identical() {
        let first = workspace();
        let second = workspace();
        generate_all(&GenerationConfig::with_output(first.path())).unwrap();
        generate_all(&GenerationConfig::with_output(second.path())).unwrap();
        for path in ["lib/TFHE.sol", "contracts/tests/TFHETestSuite1.sol", "test/tfheOperations/tfheOperations5.ts"] {
            assert_eq!(
                fs::read_to_string(first.path().join(path)).unwrap(),
                fs::read_to_string(second.path().join(path)).unwrap(),
                "{path} differs"
            );
        }
    }

    #[test]
    fn test_failure_writes_nothing() {
        let dir = workspace();
        let catalog = dir.path().join("bad.toml");
        fs::write(
            &catalog,
            "[[operator]]\nname = \"add\"\narity = \"binary\"\nwidths = []\n",
        )
        .unwrap();
        let config = GenerationConfig {
            catalog: Some(catalog),
            ..GenerationConfig::with_output(dir.path())
        };
        let err = generate_all(&config).unwrap_err();
        assert!(format!("{err:#}").contains("catalog: "));
        assert!(!dir.path().join("lib/TFHE.sol").exists());
    }

    #[test]
    fn test_partition_error_is_reported_before_writing() {
        let dir = workspace();
        let mut config = GenerationConfig::with_output(dir.path());
        config.plan.num_splits = 0;
        let err = generate_all(&config).unwrap_err();
        assert_eq!(err.to_string(), "partition: number of test splits must be at least 1");
        assert!(!dir.path().join("lib").join("Impl.sol").exists());
    }

    #[test]
    fn test_missing_executor_aborts() {
        let dir = TempDir::new().unwrap();
        let err = generate_all(&GenerationConfig::with_output(dir.path())).unwrap_err();
        assert!(format!("{err:#}").contains("TFHEExecutor.sol"));
        assert!(files_under(dir.path(), "lib").is_empty());
    }

    #[test]
    fn test_builtin_artifacts_use_solidity_plaintext_types() {
        let plan = GenerationPlan::build(
            catalog::Catalog::builtin().unwrap(),
            catalog::PricingTable::builtin().unwrap(),
            overloads::PlanConfig::default(),
        )
        .unwrap();
        let groups = get_artifact_groups(EXECUTOR.to_string(), "./TFHEExecutor.sol".to_string());
        let set = build_artifacts(&plan, &groups).unwrap();

        // A bare `uint4` token, as opposed to the encrypted `euint4`
        let declares_uint4 = |content: &str| {
            content.match_indices("uint4").any(|(i, _)| {
                let before = content[..i].chars().next_back();
                let after = content[i + "uint4".len()..].chars().next();
                !matches!(before, Some(c) if c.is_ascii_alphanumeric() || c == '_')
                    && !matches!(after, Some(c) if c.is_ascii_alphanumeric() || c == '_')
            })
        };
        assert!(!set.is_empty());
        for artifact in set.iter() {
            assert!(
                !declares_uint4(&artifact.content),
                "{} declares Solidity type uint4",
                artifact.path.display()
            );
        }
        let tfhe = &set.get("lib/TFHE.sol").unwrap().content;
        assert!(tfhe.contains("function add(euint4 a, uint8 b) internal returns (euint4) {"));
        assert!(tfhe.contains("function sub(uint8 a, euint4 b) internal returns (euint4) {"));
    }

    #[test]
    fn test_registry_names_are_unique() {
        let groups = get_artifact_groups(String::new(), String::new());
        let mut names: Vec<&str> = groups.iter().map(|g| g.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), groups.len());
    }
}
