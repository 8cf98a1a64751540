//! Small helpers shared by the TypeScript emitters.

use std::fmt::Write as _;
use std::path::{Component, Path};

/// Quote `input` as a single-quoted TypeScript string literal.
#[must_use]
pub fn ts_string(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 2);
    out.push('\'');
    for c in input.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Make text safe inside a `/** ... */` block.
#[must_use]
pub fn doc_text(input: &str) -> String {
    input.replace("*/", "*\\/")
}

/// Module specifier importing `target` (a path without extension) from a file in `from_dir`.
///
/// Both paths are taken relative to the same root. The result always starts
/// with `./` or `../` and uses forward slashes.
#[must_use]
pub fn relative_import(from_dir: &Path, target: &Path) -> String {
    let from = normal_parts(from_dir);
    let to = normal_parts(target);
    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    parts.extend(std::iter::repeat_n("..".to_string(), from.len() - common));
    parts.extend(to[common..].iter().cloned());

    let joined = parts.join("/");
    if joined.starts_with("..") {
        joined
    } else {
        format!("./{joined}")
    }
}

fn normal_parts(path: &Path) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::ParentDir => {
                parts.pop();
            }
            _ => {}
        }
    }
    parts
}
