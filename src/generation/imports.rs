//! Adds missing imports to generated Python modules
//!
//! The `openworld-sdk` templates emit model and client modules without their
//! import headers. This pass scans every module in the generated package and
//! inserts an import line for each known symbol, or sibling-module class, a
//! module references but does not define.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, info};

use crate::core::{Error, Result};

/// Symbols with a fixed import, in the order their lines are emitted
const KNOWN_IMPORTS: &[(&str, &str)] = &[
    ("List", "from typing import List"),
    ("Optional", "from typing import Optional"),
    ("Union", "from typing import Union"),
    ("field", "from dataclasses import field"),
    ("dataclass", "from dataclasses import dataclass"),
    ("dataclass_json", "from dataclasses_json import dataclass_json"),
    ("config", "from dataclasses_json import config"),
    ("datetime", "from datetime import datetime"),
    ("platform", "import platform"),
    ("header", "from openworld.sdk.core.constant import header"),
];

struct ImportRule {
    symbol: String,
    line: String,
    pattern: Regex,
}

impl ImportRule {
    fn new(symbol: &str, line: String) -> Result<Self> {
        let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(symbol)))
            .map_err(|e| Error::post_process(format!("Invalid symbol '{symbol}': {e}")))?;
        Ok(Self {
            symbol: symbol.to_string(),
            line,
            pattern,
        })
    }
}

struct Module {
    path: PathBuf,
    contents: String,
    classes: Vec<String>,
}

/// Insert missing imports into every `*.py` file directly inside
/// `package_dir`. Returns the files that were changed.
pub fn add_missing_imports(package_dir: &Path) -> Result<Vec<PathBuf>> {
    let class_re = Regex::new(r"(?m)^class\s+([A-Za-z_][A-Za-z0-9_]*)")
        .map_err(|e| Error::post_process(e.to_string()))?;

    let modules = read_modules(package_dir, &class_re)?;
    let rules = build_rules(&modules)?;

    let mut changed = Vec::new();
    for module in &modules {
        let missing: Vec<&str> = rules
            .iter()
            .filter(|rule| !module.classes.contains(&rule.symbol))
            .filter(|rule| !has_line(&module.contents, &rule.line))
            .filter(|rule| rule.pattern.is_match(&module.contents))
            .map(|rule| rule.line.as_str())
            .collect();

        if missing.is_empty() {
            continue;
        }

        debug!(
            module = %module.path.display(),
            imports = ?missing,
            "Adding imports"
        );
        fs::write(&module.path, insert_imports(&module.contents, &missing))?;
        changed.push(module.path.clone());
    }

    info!(
        package = %package_dir.display(),
        modules = modules.len(),
        changed = changed.len(),
        "Added missing imports"
    );
    Ok(changed)
}

fn has_line(contents: &str, line: &str) -> bool {
    contents.lines().any(|l| l.trim_end() == line)
}

/// Place the import block after any leading `from __future__` imports,
/// separated from the body by one blank line.
fn insert_imports(contents: &str, imports: &[&str]) -> String {
    let mut split = 0;
    for line in contents.split_inclusive('\n') {
        if !line.starts_with("from __future__ ") {
            break;
        }
        split += line.len();
    }

    let (future, body) = contents.split_at(split);
    let block = imports.join("\n");
    if future.is_empty() {
        return format!("{block}\n\n{body}");
    }

    let newline = if future.ends_with('\n') { "" } else { "\n" };
    format!(
        "{future}{newline}{block}\n\n{}",
        body.trim_start_matches('\n')
    )
}

fn read_modules(package_dir: &Path, class_re: &Regex) -> Result<Vec<Module>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(package_dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "py") {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .into_iter()
        .map(|path| -> Result<Module> {
            let contents = fs::read_to_string(&path)?;
            let classes = class_re
                .captures_iter(&contents)
                .map(|caps| caps[1].to_string())
                .collect();
            Ok(Module {
                path,
                contents,
                classes,
            })
        })
        .collect()
}

/// Known imports first, then one rule per class defined in the package.
/// A class shadowing a known symbol replaces that symbol's import line.
fn build_rules(modules: &[Module]) -> Result<Vec<ImportRule>> {
    let mut entries: Vec<(String, String)> = KNOWN_IMPORTS
        .iter()
        .map(|(symbol, line)| (symbol.to_string(), line.to_string()))
        .collect();

    for module in modules {
        let Some(stem) = module.path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        for class in &module.classes {
            let line = format!("from .{stem} import {class}");
            match entries.iter_mut().find(|(symbol, _)| symbol == class) {
                Some(entry) => entry.1 = line,
                None => entries.push((class.clone(), line)),
            }
        }
    }

    entries
        .into_iter()
        .map(|(symbol, line)| ImportRule::new(&symbol, line))
        .collect()
}
