//! Text helpers shared by the Solidity and TypeScript emitters

use itertools::Itertools;

/// License line at the top of every generated Solidity file
pub const SOLIDITY_LICENSE: &str = "// SPDX-License-Identifier: BSD-3-Clause-Clear";

/// Compiler pragma used by every generated Solidity file
pub const SOLIDITY_PRAGMA: &str = "pragma solidity ^0.8.24;";

/// Number of spaces per indentation level
pub const INDENT: usize = 4;

/// License, pragma and import lines for a generated Solidity file
pub fn solidity_header(imports: &[&str]) -> String {
    let mut out = format!("{SOLIDITY_LICENSE}\n{SOLIDITY_PRAGMA}\n");
    if !imports.is_empty() {
        out.push('\n');
        for import in imports {
            out.push_str(&format!("import \"{import}\";\n"));
        }
    }
    out
}

/// Upper-case the first character (`add` -> `Add`)
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Indent every non-empty line of `text` by `level` indentation steps
pub fn indent(text: &str, level: usize) -> String {
    let pad = " ".repeat(level * INDENT);
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .join("\n")
}
