//! `lib/FHEPayment.sol` generation

use catalog::{Arity, BitWidth, Operator, OperatorPrice};
use itertools::Itertools;
use overloads::GenerationPlan;
use shared::utils::{capitalize, indent, solidity_header};
use shared::{CodegenResult, SourceTemplate};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Gas an entire block may spend on FHE operations
pub const FHE_GAS_BLOCK_LIMIT: u64 = 10_000_000;

pub struct FhePaymentTemplate;

/// `if (operandType == N) { ... } else if ...` over the priced widths
fn type_branches(prices: &BTreeMap<BitWidth, u64>) -> String {
    if prices.is_empty() {
        return "revert UnsupportedOperation();".to_string();
    }
    let branches = prices
        .iter()
        .map(|(width, price)| {
            format!(
                "if (operandType == {}) {{\n    updateFunding(payer, {price});\n}}",
                width.type_code()
            )
        })
        .join(" else ");
    format!("{branches} else {{\n    revert UnsupportedOperation();\n}}")
}

/// One `payFor<Op>` entry point
///
/// `operandType` is the type code of the encrypted operand the executor
/// received, so comparisons are priced by their input width rather than by
/// their `ebool` result.
fn pay_function(op: &Operator, price: &OperatorPrice) -> String {
    let name = format!("payFor{}", capitalize(&op.executor_function()));
    match op.arity {
        Arity::Unary => format!(
            "function {name}(address payer, uint8 operandType) external onlyTFHEExecutor {{\n{}\n}}",
            indent(&type_branches(&price.types), 1)
        ),
        Arity::Binary => {
            let non_scalar = if price.non_scalar.is_empty() {
                "revert OnlyScalarOperationsAreSupported();".to_string()
            } else {
                type_branches(&price.non_scalar)
            };
            format!(
                "function {name}(address payer, uint8 operandType, bytes1 scalarByte) external onlyTFHEExecutor {{\n    if (scalarByte == 0x01) {{\n{}\n    }} else {{\n{}\n    }}\n}}",
                indent(&type_branches(&price.scalar), 2),
                indent(&non_scalar, 2)
            )
        }
    }
}

impl SourceTemplate<GenerationPlan> for FhePaymentTemplate {
    fn path(&self, _plan: &GenerationPlan) -> PathBuf {
        PathBuf::from("lib/FHEPayment.sol")
    }

    fn render(&self, plan: &GenerationPlan) -> CodegenResult<String> {
        let functions = plan
            .catalog
            .list_operators()
            .iter()
            .filter_map(|op| match plan.pricing.get(&op.name) {
                Some(price) => Some(pay_function(op, price)),
                None => {
                    tracing::debug!(operator = %op.name, "operator has no price, no payment function");
                    None
                }
            })
            .join("\n\n");

        Ok(format!(
            r#"{header}
contract FHEPayment {{
    error AccountNotEnoughFunded();
    error CallerMustBeTFHEExecutorContract();
    error FHEGasBlockLimitExceeded();
    error OnlyScalarOperationsAreSupported();
    error UnsupportedOperation();
    error WithdrawalFailed();

    address public constant tfheExecutorAddress = tfheExecutorAdd;
    uint256 private constant FHE_GAS_BLOCKLIMIT = {block_limit};

    uint256 private lastBlock;
    uint256 private currentBlockConsumption;
    mapping(address => uint256) private depositsETH;

    modifier onlyTFHEExecutor() {{
        if (msg.sender != tfheExecutorAddress) revert CallerMustBeTFHEExecutorContract();
        _;
    }}

    function depositETH(address account) external payable {{
        depositsETH[account] += msg.value;
    }}

    function withdrawETH(uint256 amount, address receiver) external {{
        if (depositsETH[msg.sender] < amount) revert AccountNotEnoughFunded();
        depositsETH[msg.sender] -= amount;
        (bool success, ) = receiver.call{{value: amount}}("");
        if (!success) revert WithdrawalFailed();
    }}

    function getAvailableDepositsETH(address account) external view returns (uint256) {{
        return depositsETH[account];
    }}

    function updateFunding(address payer, uint256 paidAmountGas) internal {{
        uint256 paidAmountWei = paidAmountGas * block.basefee;
        if (depositsETH[payer] < paidAmountWei) revert AccountNotEnoughFunded();
        depositsETH[payer] -= paidAmountWei;
        checkFHEGasBlockLimit(paidAmountGas);
    }}

    function checkFHEGasBlockLimit(uint256 paidAmountGas) internal {{
        if (block.number != lastBlock) {{
            lastBlock = block.number;
            currentBlockConsumption = 0;
        }}
        currentBlockConsumption += paidAmountGas;
        if (currentBlockConsumption >= FHE_GAS_BLOCKLIMIT) revert FHEGasBlockLimitExceeded();
    }}

{functions}
}}
"#,
            header = solidity_header(&["../addresses/TFHEExecutorAddress.sol"]),
            block_limit = FHE_GAS_BLOCK_LIMIT,
            functions = indent(&functions, 1),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Catalog, PricingTable, ReturnKind};
    use overloads::PlanConfig;

    fn plan(prices: &str) -> GenerationPlan {
        let catalog = Catalog::new(vec![
            Operator::binary("add", [BitWidth::W8, BitWidth::W16]).scalar(),
            Operator::binary("div", [BitWidth::W8]).scalar_only().no_left_scalar(),
            Operator::unary("not", [BitWidth::Bool, BitWidth::W8]),
        ])
        .unwrap();
        let pricing = PricingTable::from_json_str(prices).unwrap();
        GenerationPlan::build(catalog, pricing, PlanConfig::default()).unwrap()
    }

    const PRICES: &str = r#"{
        "add": { "scalar": { "8": 100, "16": 200 }, "non_scalar": { "8": 110, "16": 210 } },
        "div": { "scalar": { "8": 300 } },
        "not": { "types": { "bool": 30, "8": 40 } }
    }"#;

    #[test]
    fn test_binary_price_selection() {
        let source = FhePaymentTemplate.render(&plan(PRICES)).unwrap();
        assert!(source.contains(
            "    function payForFheAdd(address payer, uint8 operandType, bytes1 scalarByte) external onlyTFHEExecutor {\n        if (scalarByte == 0x01) {\n            if (operandType == 2) {\n                updateFunding(payer, 100);\n            } else if (operandType == 3) {\n                updateFunding(payer, 200);\n            } else {\n                revert UnsupportedOperation();\n            }\n        } else {\n            if (operandType == 2) {\n                updateFunding(payer, 110);"
        ));
    }

    #[test]
    fn test_scalar_only_operator_rejects_encrypted_operands() {
        let source = FhePaymentTemplate.render(&plan(PRICES)).unwrap();
        assert!(source.contains("                updateFunding(payer, 300);"));
        assert!(source.contains("        } else {\n            revert OnlyScalarOperationsAreSupported();\n        }"));
    }

    #[test]
    fn test_unary_prices_by_type() {
        let source = FhePaymentTemplate.render(&plan(PRICES)).unwrap();
        assert!(source.contains(
            "    function payForFheNot(address payer, uint8 operandType) external onlyTFHEExecutor {\n        if (operandType == 0) {\n            updateFunding(payer, 30);\n        } else if (operandType == 2) {\n            updateFunding(payer, 40);\n        } else {\n            revert UnsupportedOperation();\n        }\n    }"
        ));
    }

    #[test]
    fn test_comparison_is_priced_by_operand_type() {
        let catalog = Catalog::new(vec![
            Operator::binary("eq", [BitWidth::W8])
                .commutative()
                .scalar()
                .returns(ReturnKind::Bool),
        ])
        .unwrap();
        let pricing =
            PricingTable::from_json_str(r#"{ "eq": { "scalar": { "8": 50 }, "non_scalar": { "8": 60 } } }"#)
                .unwrap();
        let plan = GenerationPlan::build(catalog, pricing, PlanConfig::default()).unwrap();
        let source = FhePaymentTemplate.render(&plan).unwrap();
        assert!(source.contains(
            "            if (operandType == 2) {\n                updateFunding(payer, 50);"
        ));
        assert!(!source.contains("operandType == 0"));
    }

    #[test]
    fn test_unpriced_operators_are_skipped() {
        let source = FhePaymentTemplate.render(&plan(r#"{ "not": { "types": { "8": 40 } } }"#)).unwrap();
        assert!(source.contains("payForFheNot"));
        assert!(!source.contains("payForFheAdd"));
        assert!(!source.contains("payForFheDiv"));
    }

    #[test]
    fn test_builtin_prices_cover_every_operator() {
        let plan = GenerationPlan::build(
            Catalog::builtin().unwrap(),
            PricingTable::builtin().unwrap(),
            PlanConfig::default(),
        )
        .unwrap();
        let source = FhePaymentTemplate.render(&plan).unwrap();
        for op in plan.catalog.list_operators() {
            let name = format!("function payFor{}(", capitalize(&op.executor_function()));
            assert!(source.contains(&name), "missing {name}");
        }
    }
}
