//! `Impl.sol` generation
//!
//! One internal function per operator, forwarding to the executor with the
//! scalar flag folded into a single byte.

use catalog::{Arity, Operator};
use overloads::GenerationPlan;
use shared::utils::{indent, solidity_header};
use shared::{CodegenResult, SourceTemplate};
use std::path::PathBuf;

pub struct ImplTemplate;

fn executor_declaration(op: &Operator) -> String {
    match op.arity {
        Arity::Binary => format!(
            "function {}(uint256 lhs, uint256 rhs, bytes1 scalarByte) external returns (uint256 result);",
            op.executor_function()
        ),
        Arity::Unary => format!(
            "function {}(uint256 ct) external returns (uint256 result);",
            op.executor_function()
        ),
    }
}

fn impl_function(op: &Operator) -> String {
    match op.arity {
        Arity::Binary => format!(
            r#"function {name}(uint256 lhs, uint256 rhs, bool scalar) internal returns (uint256 result) {{
    bytes1 scalarByte = scalar ? bytes1(0x01) : bytes1(0x00);
    FHEVMConfigStruct storage $ = getFHEVMConfig();
    result = ITFHEExecutor($.TFHEExecutorAddress).{exec}(lhs, rhs, scalarByte);
}}"#,
            name = op.name,
            exec = op.executor_function()
        ),
        Arity::Unary => format!(
            r#"function {name}(uint256 ct) internal returns (uint256 result) {{
    FHEVMConfigStruct storage $ = getFHEVMConfig();
    result = ITFHEExecutor($.TFHEExecutorAddress).{exec}(ct);
}}"#,
            name = op.name,
            exec = op.executor_function()
        ),
    }
}

impl SourceTemplate<GenerationPlan> for ImplTemplate {
    fn path(&self, _plan: &GenerationPlan) -> PathBuf {
        PathBuf::from("lib/Impl.sol")
    }

    fn render(&self, plan: &GenerationPlan) -> CodegenResult<String> {
        let operators = plan.catalog.list_operators();

        let declarations = operators
            .iter()
            .map(executor_declaration)
            .collect::<Vec<_>>()
            .join("\n");
        let functions = operators
            .iter()
            .map(impl_function)
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(format!(
            r#"{header}
interface ITFHEExecutor {{
{declarations}
    function verifyCiphertext(
        bytes32 inputHandle,
        address callerAddress,
        bytes memory inputProof,
        bytes1 inputType
    ) external returns (uint256 result);
    function cast(uint256 ct, bytes1 toType) external returns (uint256 result);
    function trivialEncrypt(uint256 ct, bytes1 toType) external returns (uint256 result);
}}

interface IACL {{
    function allowTransient(uint256 ciphertext, address account) external;
    function allow(uint256 handle, address account) external;
    function isAllowed(uint256 handle, address account) external view returns (bool);
}}

library Impl {{
    struct FHEVMConfigStruct {{
        address ACLAddress;
        address TFHEExecutorAddress;
        address FHEPaymentAddress;
        address KMSVerifierAddress;
    }}

    /// keccak256(abi.encode(uint256(keccak256("fhevm.storage.FHEVMConfig")) - 1)) & ~bytes32(uint256(0xff))
    bytes32 private constant FHEVMConfigLocation = 0xed8d60e34876f751cc8b014c560745351147d9de11b9347c854e881b128ea600;

    function getFHEVMConfig() internal pure returns (FHEVMConfigStruct storage $) {{
        assembly {{
            $.slot := FHEVMConfigLocation
        }}
    }}

    function setFHEVM(FHEVMConfigStruct memory fhevmConfig) internal {{
        FHEVMConfigStruct storage $ = getFHEVMConfig();
        $.ACLAddress = fhevmConfig.ACLAddress;
        $.TFHEExecutorAddress = fhevmConfig.TFHEExecutorAddress;
        $.FHEPaymentAddress = fhevmConfig.FHEPaymentAddress;
        $.KMSVerifierAddress = fhevmConfig.KMSVerifierAddress;
    }}

{functions}

    function cast(uint256 ct, uint8 toType) internal returns (uint256 result) {{
        FHEVMConfigStruct storage $ = getFHEVMConfig();
        result = ITFHEExecutor($.TFHEExecutorAddress).cast(ct, bytes1(toType));
    }}

    function trivialEncrypt(uint256 value, uint8 toType) internal returns (uint256 result) {{
        FHEVMConfigStruct storage $ = getFHEVMConfig();
        result = ITFHEExecutor($.TFHEExecutorAddress).trivialEncrypt(value, bytes1(toType));
    }}

    function verify(bytes32 inputHandle, bytes memory inputProof, uint8 toType) internal returns (uint256 result) {{
        FHEVMConfigStruct storage $ = getFHEVMConfig();
        result = ITFHEExecutor($.TFHEExecutorAddress).verifyCiphertext(
            inputHandle,
            msg.sender,
            inputProof,
            bytes1(toType)
        );
        IACL($.ACLAddress).allowTransient(result, msg.sender);
    }}

    function allowTransient(uint256 handle, address account) internal {{
        FHEVMConfigStruct storage $ = getFHEVMConfig();
        IACL($.ACLAddress).allowTransient(handle, account);
    }}

    function allow(uint256 handle, address account) internal {{
        FHEVMConfigStruct storage $ = getFHEVMConfig();
        IACL($.ACLAddress).allow(handle, account);
    }}

    function isAllowed(uint256 handle, address account) internal view returns (bool) {{
        FHEVMConfigStruct storage $ = getFHEVMConfig();
        return IACL($.ACLAddress).isAllowed(handle, account);
    }}
}}
"#,
            header = solidity_header(&[]),
            declarations = indent(&declarations, 1),
            functions = indent(&functions, 1),
        ))
    }
}
