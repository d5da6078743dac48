//! Import specifier extraction.
//!
//! Parses one file with the TSX grammar (a superset covering TypeScript and
//! JSX) and collects the module specifier of every top-level value import
//! declaration, in source order.

use oxc_allocator::Allocator;
use oxc_ast::ast::Statement;
use oxc_parser::{Parser, ParserReturn};
use oxc_span::SourceType;

use crate::error::ExtractError;

/// Extract value import specifiers from `source`.
///
/// Whole-statement `import type` declarations are skipped. A statement mixing
/// value and type bindings (`import { a, type B } from './x'`) counts as a
/// value import. Duplicates are kept.
///
/// # Errors
///
/// Returns [`ExtractError::Parse`] if the parser reports any diagnostic.
/// Callers in the traversal treat this as "no imports".
///
/// # Example
///
/// ```rust
/// use fob_manifest::extract::extract_imports;
///
/// let specifiers = extract_imports(
///     "import Test from './Test';\nimport type { Foo } from './types';",
/// )
/// .unwrap();
/// assert_eq!(specifiers, vec!["./Test"]);
/// ```
pub fn extract_imports(source: &str) -> Result<Vec<String>, ExtractError> {
    let allocator = Allocator::default();
    let ParserReturn {
        program,
        errors,
        panicked,
        ..
    } = Parser::new(&allocator, source, SourceType::tsx()).parse();

    if let Some(error) = errors.first() {
        return Err(ExtractError::Parse {
            message: error.to_string(),
        });
    }
    if panicked {
        return Err(ExtractError::Parse {
            message: "parser aborted".to_string(),
        });
    }

    let specifiers = program
        .body
        .iter()
        .filter_map(|stmt| match stmt {
            Statement::ImportDeclaration(decl) if !decl.import_kind.is_type() => {
                Some(decl.source.value.to_string())
            }
            _ => None,
        })
        .collect();

    Ok(specifiers)
}
