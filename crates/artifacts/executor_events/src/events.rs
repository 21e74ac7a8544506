//! Rendering of the event-emitting executor

use crate::parser::{ExecutorFunction, parse_executor};
use itertools::Itertools;
use shared::EmitError;
use shared::utils::{capitalize, indent, solidity_header};

fn event_declaration(function: &ExecutorFunction) -> String {
    let fields = function
        .params
        .iter()
        .chain(&function.returns)
        .map(|p| format!("{} {}", p.event_type(), p.name))
        .join(", ");
    format!("event {}({fields});", capitalize(&function.name))
}

fn override_function(function: &ExecutorFunction) -> String {
    let params = function
        .params
        .iter()
        .map(|p| format!("{} {}", p.ty, p.name))
        .join(", ");
    let args = function.params.iter().map(|p| p.name.as_str()).join(", ");
    let mutability = if function.payable { " payable" } else { "" };
    let returns = if function.returns.is_empty() {
        String::new()
    } else {
        format!(
            " returns ({})",
            function
                .returns
                .iter()
                .map(|p| format!("{} {}", p.ty, p.name))
                .join(", ")
        )
    };

    let call = format!("super.{}({args})", function.name);
    let call = match function.returns.as_slice() {
        [] => format!("{call};"),
        [single] => format!("{} = {call};", single.name),
        many => format!("({}) = {call};", many.iter().map(|p| p.name.as_str()).join(", ")),
    };
    let emitted = function
        .params
        .iter()
        .chain(&function.returns)
        .map(|p| p.name.as_str())
        .join(", ");

    format!(
        "function {name}({params}) public{mutability} override{returns} {{\n    {call}\n    emit {event}({emitted});\n}}",
        name = function.name,
        event = capitalize(&function.name),
    )
}

/// Derive `<Contract>WithEvents` from the executor at `import_path`
///
/// Every public virtual state-changing function of the executor is
/// overridden to call the original and emit an event with its arguments and
/// return values.
pub fn add_tfhe_executor_events(source: &str, import_path: &str) -> Result<String, EmitError> {
    let contract = parse_executor(source)?;

    let events = contract.functions.iter().map(event_declaration).join("\n");
    let overrides = contract
        .functions
        .iter()
        .map(override_function)
        .join("\n\n");

    let mut body = Vec::new();
    if !events.is_empty() {
        body.push(indent(&events, 1));
    }
    if !overrides.is_empty() {
        body.push(indent(&overrides, 1));
    }

    Ok(format!(
        "{header}\ncontract {name}WithEvents is {name} {{\n{body}\n}}\n",
        header = solidity_header(&[import_path]),
        name = contract.name,
        body = body.join("\n\n"),
    ))
}
