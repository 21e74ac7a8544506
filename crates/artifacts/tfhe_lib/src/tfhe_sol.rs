//! `TFHE.sol` generation
//!
//! The library declares one user-defined value type per encrypted width,
//! the conversion and access-control helpers for each of them, and one
//! function per resolved overload in overload-set order.

use catalog::BitWidth;
use itertools::Itertools;
use overloads::{GenerationPlan, OperandKind, Overload};
use shared::utils::{indent, solidity_header};
use shared::{CodegenResult, SourceTemplate};
use std::path::PathBuf;

pub struct TfheTemplate;

/// Trivial encryption of zero, substituted for uninitialized handles
fn zero_of(width: BitWidth) -> String {
    match width {
        BitWidth::Bool => "asEbool(false)".to_string(),
        w => format!("{}(0)", w.cast_function()),
    }
}

/// Parameter name for the operand at `position`
fn param_name(overload: &Overload, position: usize) -> &'static str {
    if overload.is_unary() {
        "value"
    } else if position == 0 {
        "a"
    } else {
        "b"
    }
}

fn type_declarations(widths: &[BitWidth]) -> String {
    widths
        .iter()
        .map(|w| format!("type {} is uint256;", w.encrypted_type()))
        .chain(std::iter::once("type einput is bytes32;".to_string()))
        .join("\n")
}

fn type_constants(widths: &[BitWidth]) -> String {
    widths
        .iter()
        .map(|w| {
            format!(
                "uint8 internal constant {} = {};",
                w.type_constant(),
                w.type_code()
            )
        })
        .join("\n")
}

/// Helpers generated once per encrypted width
fn width_helpers(width: BitWidth, widths: &[BitWidth]) -> String {
    let ty = width.encrypted_type();
    let cast = width.cast_function();
    let code = width.type_constant();

    let mut parts = vec![format!(
        r#"// Return true if the encrypted value is initialized and false otherwise.
function isInitialized({ty} v) internal pure returns (bool) {{
    return {ty}.unwrap(v) != 0;
}}

// Convert an inputHandle with corresponding inputProof to an encrypted {ty}.
function {cast}(einput inputHandle, bytes memory inputProof) internal returns ({ty}) {{
    return {ty}.wrap(Impl.verify(einput.unwrap(inputHandle), inputProof, Common.{code}));
}}"#
    )];

    parts.push(match width {
        BitWidth::Bool => format!(
            r#"// Convert a plaintext boolean to an encrypted boolean.
function asEbool(bool value) internal returns (ebool) {{
    uint256 sValue = 0;
    if (value) {{
        sValue = 1;
    }}
    return ebool.wrap(Impl.trivialEncrypt(sValue, Common.{code}));
}}"#
        ),
        _ => format!(
            r#"// Convert a plaintext value to an encrypted {ty} integer.
function {cast}(uint256 value) internal returns ({ty}) {{
    return {ty}.wrap(Impl.trivialEncrypt(value, Common.{code}));
}}"#
        ),
    });

    for &from in widths.iter().filter(|&&w| w != width) {
        let from_ty = from.encrypted_type();
        parts.push(format!(
            r#"// Cast an encrypted {from_ty} to an encrypted {ty}.
function {cast}({from_ty} value) internal returns ({ty}) {{
    return {ty}.wrap(Impl.cast({from_ty}.unwrap(value), Common.{code}));
}}"#
        ));
    }

    parts.push(format!(
        r#"function allow({ty} value, address account) internal {{
    Impl.allow({ty}.unwrap(value), account);
}}

function allowThis({ty} value) internal {{
    Impl.allow({ty}.unwrap(value), address(this));
}}

function allowTransient({ty} value, address account) internal {{
    Impl.allowTransient({ty}.unwrap(value), account);
}}

function isAllowed({ty} value, address account) internal view returns (bool) {{
    return Impl.isAllowed({ty}.unwrap(value), account);
}}

function isSenderAllowed({ty} value) internal view returns (bool) {{
    return Impl.isAllowed({ty}.unwrap(value), msg.sender);
}}"#
    ));

    parts.join("\n\n")
}

/// Expression handing one operand to `Impl`, promoted to `promoted` if needed.
/// A left scalar is trivially encrypted; a right scalar is passed as plaintext.
fn operand_expression(operand: OperandKind, name: &str, position: usize, promoted: BitWidth) -> String {
    let promoted_ty = promoted.encrypted_type();
    match operand {
        OperandKind::Encrypted(w) if w == promoted => format!("{promoted_ty}.unwrap({name})"),
        OperandKind::Encrypted(_) => format!(
            "{promoted_ty}.unwrap({}({name}))",
            promoted.cast_function()
        ),
        OperandKind::Scalar(BitWidth::Bool) if position == 0 => {
            format!("{promoted_ty}.unwrap(asEbool({name}))")
        }
        OperandKind::Scalar(_) if position == 0 => format!(
            "{promoted_ty}.unwrap({}(uint256({name})))",
            promoted.cast_function()
        ),
        OperandKind::Scalar(BitWidth::Bool) => format!("({name} ? uint256(1) : uint256(0))"),
        OperandKind::Scalar(_) => format!("uint256({name})"),
    }
}

/// Library function for one overload
fn overload_function(overload: &Overload) -> String {
    let result_ty = overload.result.solidity_type();
    let promoted = overload.promoted_width();

    let params = overload
        .operands
        .iter()
        .enumerate()
        .map(|(i, o)| format!("{} {}", o.solidity_type(), param_name(overload, i)))
        .join(", ");

    let init = overload
        .operands
        .iter()
        .enumerate()
        .filter_map(|(i, o)| match o {
            OperandKind::Encrypted(w) => {
                let name = param_name(overload, i);
                Some(format!(
                    "    if (!isInitialized({name})) {{\n        {name} = {};\n    }}\n",
                    zero_of(*w)
                ))
            }
            OperandKind::Scalar(_) => None,
        })
        .join("");

    let args = overload
        .operands
        .iter()
        .enumerate()
        .map(|(i, o)| operand_expression(*o, param_name(overload, i), i, promoted))
        .join(", ");

    // A scalar on the right is sent as plaintext; on the left it was encrypted
    let scalar_flag = match overload.rhs() {
        Some(rhs) => {
            if rhs.is_scalar() {
                ", true"
            } else {
                ", false"
            }
        }
        None => "",
    };

    let comment = if overload.is_unary() {
        format!("// Evaluate {}(value) and return the result.", overload.operator)
    } else {
        format!("// Evaluate {}(a, b) and return the result.", overload.operator)
    };

    format!(
        "{comment}\nfunction {op}({params}) internal returns ({result_ty}) {{\n{init}    return {result_ty}.wrap(Impl.{op}({args}{scalar_flag}));\n}}",
        op = overload.operator,
    )
}

impl SourceTemplate<GenerationPlan> for TfheTemplate {
    fn path(&self, _plan: &GenerationPlan) -> PathBuf {
        PathBuf::from("lib/TFHE.sol")
    }

    fn render(&self, plan: &GenerationPlan) -> CodegenResult<String> {
        let widths = plan.catalog.widths();

        let helpers = widths
            .iter()
            .map(|&w| width_helpers(w, &widths))
            .join("\n\n");
        let functions = plan.overloads.iter().map(overload_function).join("\n\n");

        Ok(format!(
            r#"{header}
{types}

/**
 * @title   Common
 * @notice  Type codes of the encrypted types, as stored in ciphertext handles.
 */
library Common {{
{constants}
}}

/**
 * @title   TFHE
 * @notice  Encrypted arithmetic over the supported integer widths.
 */
library TFHE {{
    function setFHEVM(Impl.FHEVMConfigStruct memory fhevmConfig) internal {{
        Impl.setFHEVM(fhevmConfig);
    }}

{helpers}

{functions}
}}
"#,
            header = solidity_header(&["./Impl.sol"]),
            types = type_declarations(&widths),
            constants = indent(&type_constants(&widths), 1),
            helpers = indent(&helpers, 1),
            functions = indent(&functions, 1),
        ))
    }
}
