//! Path alias handling for module resolution (e.g., "@" → "./src").

use indexmap::IndexMap;

/// Rewrite `specifier` through the first matching alias.
///
/// An alias matches the specifier exactly or as a path prefix (`@/Button`
/// matches `@`, `@scope/pkg` does not). The result is relative to the base
/// directory unless the target is absolute.
pub fn resolve_path_alias(specifier: &str, aliases: &IndexMap<String, String>) -> Option<String> {
    for (alias, target) in aliases {
        let alias = alias.trim_end_matches('/');
        let rest = if specifier == alias {
            ""
        } else if let Some(rest) = specifier
            .strip_prefix(alias)
            .and_then(|rest| rest.strip_prefix('/'))
        {
            rest
        } else {
            continue;
        };

        let target = target.trim_end_matches('/');
        let resolved = if target.starts_with('/') || target.starts_with('.') {
            if rest.is_empty() {
                target.to_string()
            } else {
                format!("{target}/{rest}")
            }
        } else if rest.is_empty() {
            format!("./{target}")
        } else {
            format!("./{target}/{rest}")
        };

        return Some(resolved);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(a, t)| (a.to_string(), t.to_string()))
            .collect()
    }

    #[test]
    fn test_prefix_alias() {
        let map = aliases(&[("@", "./src")]);
        assert_eq!(
            resolve_path_alias("@/components/Button", &map).as_deref(),
            Some("./src/components/Button")
        );
    }

    #[test]
    fn test_exact_alias_and_bare_target() {
        let map = aliases(&[("~utils", "src/utils")]);
        assert_eq!(
            resolve_path_alias("~utils", &map).as_deref(),
            Some("./src/utils")
        );
    }

    #[test]
    fn test_scoped_package_is_not_an_alias_match() {
        let map = aliases(&[("@", "./src")]);
        assert_eq!(resolve_path_alias("@scope/pkg", &map), None);
        assert_eq!(resolve_path_alias("./local", &map), None);
    }

    #[test]
    fn test_first_declared_alias_wins() {
        let map = aliases(&[("@/ui", "./src/design"), ("@", "./src")]);
        assert_eq!(
            resolve_path_alias("@/ui/Button", &map).as_deref(),
            Some("./src/design/Button")
        );
    }
}
