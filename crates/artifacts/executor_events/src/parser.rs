//! Regex-based discovery of an executor contract's entry points
//!
//! Only declarations are inspected; function bodies are skipped by brace
//! matching. Comments are stripped first so commented-out code is ignored.

use regex::Regex;
use shared::EmitError;
use std::sync::OnceLock;

/// Artifact name used in errors raised while scanning the executor
pub const EVENTS_ARTIFACT: &str = "lib/TFHEExecutor.events.sol";

static COMMENT_REGEX: OnceLock<Regex> = OnceLock::new();
static CONTRACT_REGEX: OnceLock<Regex> = OnceLock::new();
static FUNCTION_REGEX: OnceLock<Regex> = OnceLock::new();
static RETURNS_REGEX: OnceLock<Regex> = OnceLock::new();

/// Line and block comments
fn comment_regex() -> &'static Regex {
    COMMENT_REGEX.get_or_init(|| {
        Regex::new(r"(?s)/\*.*?\*/|//[^\n]*").expect("Failed to compile comment regex")
    })
}

/// `[abstract] contract Name [is Base, ...] {`
fn contract_regex() -> &'static Regex {
    CONTRACT_REGEX.get_or_init(|| {
        Regex::new(r"\bcontract\s+(\w+)[^{;]*\{").expect("Failed to compile contract regex")
    })
}

/// `function name(params) attributes {` or `;`
///
/// Captures the name, the raw parameter list and everything between the
/// closing parenthesis and the body (visibility, mutability, modifiers,
/// `returns (...)`).
fn function_regex() -> &'static Regex {
    FUNCTION_REGEX.get_or_init(|| {
        Regex::new(r"\bfunction\s+(\w+)\s*\(([^)]*)\)([^{;]*)[{;]")
            .expect("Failed to compile function regex")
    })
}

fn returns_regex() -> &'static Regex {
    RETURNS_REGEX.get_or_init(|| {
        Regex::new(r"\breturns\s*\(([^)]*)\)").expect("Failed to compile returns regex")
    })
}

fn scan_error(reason: impl Into<String>) -> EmitError {
    EmitError::Template {
        artifact: EVENTS_ARTIFACT.to_string(),
        reason: reason.into(),
    }
}

const DATA_LOCATIONS: [&str; 3] = ["memory", "calldata", "storage"];

/// One declared parameter or return value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Type including its data location (`bytes memory`)
    pub ty: String,
    pub name: String,
}

impl Parameter {
    /// Type as it may appear in an event declaration
    pub fn event_type(&self) -> String {
        self.ty
            .split_whitespace()
            .filter(|t| !DATA_LOCATIONS.contains(t))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A public, virtual, state-changing entry point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorFunction {
    pub name: String,
    pub params: Vec<Parameter>,
    pub returns: Vec<Parameter>,
    pub payable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorContract {
    pub name: String,
    pub functions: Vec<ExecutorFunction>,
}

/// Parse a comma separated declaration list, naming unnamed entries
fn parse_parameters(list: &str, unnamed: impl Fn(usize, usize) -> String) -> Vec<Parameter> {
    let entries: Vec<&str> = list
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .collect();
    let count = entries.len();

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let tokens: Vec<&str> = entry.split_whitespace().collect();
            match tokens.split_last() {
                Some((last, rest))
                    if !rest.is_empty() && !DATA_LOCATIONS.contains(last) =>
                {
                    Parameter {
                        ty: rest.join(" "),
                        name: last.to_string(),
                    }
                }
                _ => Parameter {
                    ty: tokens.join(" "),
                    name: unnamed(i, count),
                },
            }
        })
        .collect()
}

fn has_word(attributes: &str, word: &str) -> bool {
    attributes
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .any(|t| t == word)
}

/// Byte offset of the brace closing the one at `open`
fn matching_brace(source: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, c) in source[open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Find the first contract of `source` and its overridable entry points
///
/// View and pure functions are ignored, as are internal and private ones.
/// Public or external state-changing functions that cannot be overridden
/// (not `virtual`, or `external` so `super` cannot reach them) are skipped
/// with a warning.
pub fn parse_executor(source: &str) -> Result<ExecutorContract, EmitError> {
    let source = comment_regex().replace_all(source, "");

    let contract = contract_regex()
        .captures(&source)
        .ok_or_else(|| scan_error("no contract declaration found in executor source"))?;
    let name = contract[1].to_string();
    let open = contract
        .get(0)
        .map(|m| m.end() - 1)
        .ok_or_else(|| scan_error("no contract declaration found in executor source"))?;
    let close = matching_brace(&source, open)
        .ok_or_else(|| scan_error(format!("unbalanced braces in contract '{name}'")))?;
    let body = &source[open + 1..close];

    let mut functions = Vec::new();
    for caps in function_regex().captures_iter(body) {
        let function = caps[1].to_string();
        let attributes = returns_regex().replace(&caps[3], "");

        let public = has_word(&attributes, "public");
        let external = has_word(&attributes, "external");
        if !(public || external) {
            continue;
        }
        if has_word(&attributes, "view") || has_word(&attributes, "pure") {
            tracing::debug!(function = %function, "skipping read-only function");
            continue;
        }
        if !has_word(&attributes, "virtual") {
            tracing::warn!(function = %function, "function is not virtual, no event emitted");
            continue;
        }
        if external {
            tracing::warn!(function = %function, "external function cannot be wrapped through super, no event emitted");
            continue;
        }

        let params = parse_parameters(&caps[2], |i, _| format!("arg{i}"));
        let returns = returns_regex()
            .captures(&caps[3])
            .map(|r| {
                parse_parameters(&r[1], |i, count| {
                    if count == 1 {
                        "result".to_string()
                    } else {
                        format!("result{i}")
                    }
                })
            })
            .unwrap_or_default();

        functions.push(ExecutorFunction {
            name: function,
            params,
            returns,
            payable: has_word(&attributes, "payable"),
        });
    }

    tracing::debug!(contract = %name, functions = functions.len(), "scanned executor");
    Ok(ExecutorContract { name, functions })
}
