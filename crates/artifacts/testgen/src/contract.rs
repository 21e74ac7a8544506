//! Per-shard Solidity test contracts

use catalog::BitWidth;
use itertools::Itertools;
use overloads::{OperandKind, Overload, Shard};
use shared::utils::{indent, solidity_header};
use shared::{CodegenResult, SourceTemplate};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Name of the test contract generated for `shard_number`
pub fn suite_contract_name(shard_number: usize) -> String {
    format!("TFHETestSuite{shard_number}")
}

/// Public variable holding the last result of type `width`
pub fn result_variable(width: BitWidth) -> String {
    format!("res{}", width.type_suffix())
}

/// Parameter name of the operand at `position` (`a`, `b`)
pub(crate) fn operand_name(position: usize) -> char {
    (b'a' + position as u8) as char
}

fn entry_point(overload: &Overload) -> String {
    let params = overload
        .operands
        .iter()
        .enumerate()
        .map(|(i, o)| match o {
            OperandKind::Encrypted(_) => format!("einput {}", operand_name(i)),
            OperandKind::Scalar(w) => format!("{} {}", w.plaintext_type(), operand_name(i)),
        })
        .chain(std::iter::once("bytes calldata inputProof".to_string()))
        .join(", ");

    let conversions = overload
        .operands
        .iter()
        .enumerate()
        .map(|(i, o)| {
            let name = operand_name(i);
            match o {
                OperandKind::Encrypted(w) => format!(
                    "    {} {name}Proc = TFHE.{}({name}, inputProof);",
                    w.encrypted_type(),
                    w.cast_function()
                ),
                OperandKind::Scalar(w) => format!("    {} {name}Proc = {name};", w.plaintext_type()),
            }
        })
        .join("\n");

    let args = (0..overload.operands.len())
        .map(|i| format!("{}Proc", operand_name(i)))
        .join(", ");
    let result_width = overload.result.width();

    format!(
        "function {function}({params}) public {{\n{conversions}\n    {result_ty} result = TFHE.{op}({args});\n    TFHE.allowThis(result);\n    {var} = result;\n}}",
        function = overload.function_name(),
        result_ty = result_width.encrypted_type(),
        op = overload.operator,
        var = result_variable(result_width),
    )
}

/// Source of the test contract for one shard
pub fn generate_smart_contract(shard: &Shard) -> String {
    let result_widths: BTreeSet<BitWidth> =
        shard.overloads.iter().map(|o| o.result.width()).collect();
    let variables = result_widths
        .iter()
        .map(|w| format!("{} public {};", w.encrypted_type(), result_variable(*w)))
        .join("\n");
    let functions = shard.overloads.iter().map(entry_point).join("\n\n");

    format!(
        r#"{header}
contract {name} {{
{variables}

    constructor(Impl.FHEVMConfigStruct memory fhevmConfig) {{
        TFHE.setFHEVM(fhevmConfig);
    }}

{functions}
}}
"#,
        header = solidity_header(&["../../lib/TFHE.sol"]),
        name = suite_contract_name(shard.shard_number),
        variables = indent(&variables, 1),
        functions = indent(&functions, 1),
    )
}

pub struct SuiteContractTemplate;

impl SourceTemplate<Shard> for SuiteContractTemplate {
    fn path(&self, shard: &Shard) -> PathBuf {
        PathBuf::from("contracts/tests").join(format!("{}.sol", suite_contract_name(shard.shard_number)))
    }

    fn render(&self, shard: &Shard) -> CodegenResult<String> {
        Ok(generate_smart_contract(shard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shard() -> Shard {
        Shard {
            shard_number: 3,
            overloads: vec![
                Overload::new(
                    "add",
                    vec![
                        OperandKind::Encrypted(BitWidth::W8),
                        OperandKind::Encrypted(BitWidth::W16),
                    ],
                    OperandKind::Encrypted(BitWidth::W16),
                ),
                Overload::new(
                    "sub",
                    vec![
                        OperandKind::Scalar(BitWidth::W8),
                        OperandKind::Encrypted(BitWidth::W8),
                    ],
                    OperandKind::Encrypted(BitWidth::W8),
                ),
                Overload::new(
                    "eq",
                    vec![
                        OperandKind::Encrypted(BitWidth::Bool),
                        OperandKind::Scalar(BitWidth::Bool),
                    ],
                    OperandKind::Encrypted(BitWidth::Bool),
                ),
                Overload::new(
                    "not",
                    vec![OperandKind::Encrypted(BitWidth::W8)],
                    OperandKind::Encrypted(BitWidth::W8),
                ),
            ],
        }
    }

    #[test]
    fn test_contract_declares_result_variables() {
        let source = generate_smart_contract(&shard());
        assert!(source.contains("import \"../../lib/TFHE.sol\";"));
        assert!(source.contains("contract TFHETestSuite3 {"));
        assert!(source.contains(
            "    ebool public resEbool;\n    euint8 public resEuint8;\n    euint16 public resEuint16;\n"
        ));
    }

    #[test]
    fn test_encrypted_entry_point() {
        let source = generate_smart_contract(&shard());
        assert!(source.contains(
            "    function add_euint8_euint16(einput a, einput b, bytes calldata inputProof) public {\n        euint8 aProc = TFHE.asEuint8(a, inputProof);\n        euint16 bProc = TFHE.asEuint16(b, inputProof);\n        euint16 result = TFHE.add(aProc, bProc);\n        TFHE.allowThis(result);\n        resEuint16 = result;\n    }"
        ));
    }

    #[test]
    fn test_scalar_entry_points() {
        let source = generate_smart_contract(&shard());
        assert!(source.contains(
            "    function sub_uint8_euint8(uint8 a, einput b, bytes calldata inputProof) public {\n        uint8 aProc = a;\n"
        ));
        assert!(source.contains("    function eq_ebool_bool(einput a, bool b, bytes calldata inputProof) public {"));
        assert!(source.contains("        resEbool = result;"));
        assert!(source.contains(
            "    function not_euint8(einput a, bytes calldata inputProof) public {\n        euint8 aProc = TFHE.asEuint8(a, inputProof);\n        euint8 result = TFHE.not(aProc);"
        ));
    }

    #[test]
    fn test_template_path() {
        assert_eq!(
            SuiteContractTemplate.path(&shard()),
            PathBuf::from("contracts/tests/TFHETestSuite3.sol")
        );
    }
}
