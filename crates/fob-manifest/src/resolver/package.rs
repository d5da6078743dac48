//! Package metadata for bare specifier resolution.
//!
//! Only the entry-point fields are read (`module`, `main`, or whatever the
//! configuration lists). Dependency tables, `exports` maps and scripts are
//! ignored.

use std::path::Path;

use serde_json::Value;

use crate::runtime::Runtime;

/// Package metadata file name.
pub const PACKAGE_JSON: &str = "package.json";

/// Maximum accepted size for package metadata (10 MB).
const MAX_PACKAGE_JSON_SIZE: u64 = 10 * 1024 * 1024;

/// Parsed package metadata.
#[derive(Debug, Clone)]
pub struct PackageManifest {
    pub name: Option<String>,
    fields: Value,
}

impl PackageManifest {
    /// Parse package metadata from JSON text.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let fields: Value = serde_json::from_str(text)?;
        let name = fields
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string);
        Ok(Self { name, fields })
    }

    /// Load `dir/package.json`. Missing, oversized or malformed files yield `None`.
    pub async fn load(dir: &Path, runtime: &dyn Runtime) -> Option<Self> {
        let path = dir.join(PACKAGE_JSON);
        let metadata = runtime.metadata(&path).await.ok()?;
        if !metadata.is_file || metadata.size > MAX_PACKAGE_JSON_SIZE {
            return None;
        }
        let bytes = runtime.read_file(&path).await.ok()?;
        let text = String::from_utf8(bytes).ok()?;
        Self::parse(&text).ok()
    }

    /// Non-empty string entry points among `main_fields`, in field order.
    pub fn entry_points<'a>(&'a self, main_fields: &'a [String]) -> impl Iterator<Item = &'a str> {
        main_fields.iter().filter_map(|field| {
            self.fields
                .get(field.as_str())
                .and_then(Value::as_str)
                .filter(|target| !target.is_empty())
        })
    }
}

/// Split a bare specifier into package name and optional subpath.
///
/// ```text
/// "react"               -> ("react", None)
/// "lodash/fp/map"       -> ("lodash", Some("fp/map"))
/// "@scope/pkg/sub"      -> ("@scope/pkg", Some("sub"))
/// "@scope"              -> invalid
/// ```
pub fn split_bare_specifier(specifier: &str) -> Option<(&str, Option<&str>)> {
    if specifier.is_empty() {
        return None;
    }

    let name_end = if specifier.starts_with('@') {
        let scope_end = specifier.find('/')?;
        match specifier[scope_end + 1..].find('/') {
            Some(idx) => scope_end + 1 + idx,
            None => specifier.len(),
        }
    } else {
        specifier.find('/').unwrap_or(specifier.len())
    };

    let name = &specifier[..name_end];
    if name.is_empty() || name.ends_with('/') {
        return None;
    }

    let subpath = specifier[name_end..]
        .strip_prefix('/')
        .filter(|rest| !rest.is_empty());
    Some((name, subpath))
}
