//! Host-side TypeScript test drivers, one per test split
//!
//! Every test vector becomes one mocha case that encrypts the encrypted
//! operands, calls the overload's entry point on its shard contract and
//! compares the decrypted result with the reference value.

use crate::contract::{operand_name, result_variable, suite_contract_name};
use catalog::{BitWidth, Catalog};
use itertools::Itertools;
use num_bigint::BigUint;
use overloads::splits::SplitEntry;
use overloads::{OperandKind, Shard, TestSplit, TestSplitter, TestVector, test_vectors};
use shared::errors::PartitionError;
use shared::{CodegenResult, SourceTemplate};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// A split together with what is needed to render it
pub struct SplitContext<'a> {
    pub catalog: &'a Catalog,
    pub split: &'a TestSplit,
    /// Position of the split's first overload in the overload set
    pub first_index: usize,
}

pub struct HostTestTemplate;

fn ts_value(width: BitWidth, value: &BigUint) -> String {
    match width {
        BitWidth::Bool => (value.bits() != 0).to_string(),
        _ => format!("{value}n"),
    }
}

fn decrypt_function(width: BitWidth) -> String {
    match width {
        BitWidth::Bool => "decryptBool".to_string(),
        w => format!("decrypt{}", w.bits()),
    }
}

fn input_function(width: BitWidth) -> String {
    match width {
        BitWidth::Bool => "addBool".to_string(),
        w => format!("add{}", w.bits()),
    }
}

fn contract_field(shard_number: usize) -> String {
    format!("contract{shard_number}")
}

fn test_case(entry: &SplitEntry, vector: &TestVector, case_number: usize) -> String {
    let overload = &entry.overload;
    let contract = contract_field(entry.shard_number);

    let shown_inputs = overload
        .operands
        .iter()
        .zip(&vector.inputs)
        .map(|(o, v)| match o.width() {
            BitWidth::Bool => (v.bits() != 0).to_string(),
            _ => v.to_string(),
        })
        .join(", ");

    let mut encrypted = 0usize;
    let mut adds = Vec::new();
    let mut args = Vec::new();
    for (operand, value) in overload.operands.iter().zip(&vector.inputs) {
        match operand {
            OperandKind::Encrypted(w) => {
                adds.push(format!("input.{}({});", input_function(*w), ts_value(*w, value)));
                args.push(format!("encryptedAmount.handles[{encrypted}]"));
                encrypted += 1;
            }
            OperandKind::Scalar(w) => args.push(ts_value(*w, value)),
        }
    }
    args.push("encryptedAmount.inputProof".to_string());

    let result = overload.result.width();
    let check = match &vector.expected {
        Some(expected) => format!("expect(res).to.equal({});", ts_value(result, expected)),
        None => "expect(res).to.not.be.undefined;".to_string(),
    };

    format!(
        r#"  it('test operator "{op}" overload ({operands}) => {result_ty} test {case_number} ({shown_inputs})', async function () {{
    const input = this.instance.createEncryptedInput(this.{contract}Address, this.signers.alice.address);
{adds}
    const encryptedAmount = await input.encrypt();
    const tx = await this.{contract}.{function}(
{args}
    );
    await tx.wait();
    const res = await {decrypt}(await this.{contract}.{variable}());
    {check}
  }});"#,
        op = overload.operator,
        operands = overload.operands.iter().join(", "),
        result_ty = overload.result,
        adds = adds.iter().map(|l| format!("    {l}")).join("\n"),
        function = overload.function_name(),
        args = args.iter().map(|a| format!("      {a},")).join("\n"),
        decrypt = decrypt_function(result),
        variable = result_variable(result),
    )
}

fn fixture(shard_number: usize) -> String {
    let name = suite_contract_name(shard_number);
    format!(
        r#"async function deployTfheTestFixture{shard_number}(): Promise<{name}> {{
  const signers = await getSigners();
  const admin = signers.alice;

  const contractFactory = await ethers.getContractFactory('{name}');
  const contract = await contractFactory.connect(admin).deploy(getFHEVMConfig());
  await contract.waitForDeployment();

  return contract;
}}"#
    )
}

fn deployment(shard_number: usize) -> String {
    let field = contract_field(shard_number);
    format!(
        "    const {field} = await deployTfheTestFixture{shard_number}();\n    this.{field}Address = await {field}.getAddress();\n    this.{field} = {field};"
    )
}

/// Source of the host test driver for one split
pub fn render_split(catalog: &Catalog, split: &TestSplit, first_index: usize) -> String {
    let shard_numbers = split.shard_numbers();

    let cases = split
        .entries
        .iter()
        .enumerate()
        .flat_map(|(offset, entry)| {
            let semantics = catalog
                .operator(&entry.overload.operator)
                .and_then(|op| op.semantics);
            test_vectors(&entry.overload, semantics, first_index + offset)
                .into_iter()
                .enumerate()
                .map(|(i, vector)| test_case(entry, &vector, i + 1))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let decrypts: BTreeSet<BitWidth> = split
        .entries
        .iter()
        .map(|e| e.overload.result.width())
        .collect();

    let mut imports = vec![
        "import { expect } from 'chai';".to_string(),
        "import { ethers } from 'hardhat';".to_string(),
        String::new(),
    ];
    imports.extend(shard_numbers.iter().map(|&n| {
        let name = suite_contract_name(n);
        format!("import type {{ {name} }} from '../../types/contracts/tests/{name}';")
    }));
    if !decrypts.is_empty() {
        imports.push(format!(
            "import {{ {} }} from '../decrypt';",
            decrypts.iter().map(|w| decrypt_function(*w)).join(", ")
        ));
    }
    imports.push("import { createInstance, getFHEVMConfig } from '../instance';".to_string());
    imports.push("import { getSigners, initSigners } from '../signers';".to_string());

    let mut sections = vec![imports.join("\n")];
    sections.extend(shard_numbers.iter().map(|&n| fixture(n)));

    let mut before = vec!["    await initSigners(1);\n    this.signers = await getSigners();".to_string()];
    before.extend(shard_numbers.iter().map(|&n| deployment(n)));
    before.push("    this.instance = await createInstance();".to_string());

    let mut body = vec![format!(
        "  before(async function () {{\n{}\n  }});",
        before.join("\n\n")
    )];
    body.extend(cases);

    sections.push(format!(
        "describe('TFHE operations {}', function () {{\n{}\n}});",
        split.split_number,
        body.join("\n\n")
    ));

    format!("{}\n", sections.join("\n\n"))
}

/// Render every split in order, numbering overloads across splits
pub fn render_splits(catalog: &Catalog, splits: &[TestSplit]) -> Vec<String> {
    let mut first_index = 0;
    splits
        .iter()
        .map(|split| {
            let source = render_split(catalog, split, first_index);
            first_index += split.len();
            source
        })
        .collect()
}

/// Redistribute the shards' overloads into `num_splits` host test drivers
///
/// Always returns exactly `num_splits` sources; splits without overloads
/// still render as valid, test-free files.
pub fn generate_test_code(
    catalog: &Catalog,
    shards: &[Shard],
    num_splits: usize,
) -> Result<Vec<String>, PartitionError> {
    let splits = TestSplitter::new(num_splits)?.generate_test_splits(shards);
    Ok(render_splits(catalog, &splits))
}

impl<'a> SourceTemplate<SplitContext<'a>> for HostTestTemplate {
    fn path(&self, ctx: &SplitContext<'a>) -> PathBuf {
        PathBuf::from("test/tfheOperations")
            .join(format!("tfheOperations{}.ts", ctx.split.split_number))
    }

    fn render(&self, ctx: &SplitContext<'a>) -> CodegenResult<String> {
        Ok(render_split(ctx.catalog, ctx.split, ctx.first_index))
    }
}
