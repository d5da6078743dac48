//! Traversal over the native runtime.

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use super::test_helpers::{create_page_project, create_test_project};
use crate::config::ManifestConfig;
use crate::module::ModuleNode;
use crate::runtime::native::NativeRuntime;
use crate::traverse::build_tree;

async fn tree(root: &Path, entry: &str) -> ModuleNode {
    let config = ManifestConfig {
        base: Some(root.to_path_buf()),
        ..ManifestConfig::default()
    };
    build_tree(
        &root.join(entry),
        Arc::new(config),
        Arc::new(NativeRuntime::new()),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_page_tree_excludes_type_imports() {
    let temp = TempDir::new().unwrap();
    let root = create_page_project(&temp);

    let page = tree(&root, "src/app/page.tsx").await;

    assert_eq!(page.request, "src/app/page.tsx");
    assert_eq!(page.imports.len(), 1);
    let test = &page.imports[0];
    assert_eq!(test.path, root.join("src/app/Test.tsx"));
    assert_eq!(test.request, "./Test");
    assert_eq!(test.imports.len(), 1);
    assert_eq!(test.imports[0].path, root.join("src/app/Another.tsx"));
    assert!(page.find(&root.join("src/app/types.ts")).is_none());
}

#[tokio::test]
async fn test_concurrent_siblings_keep_source_order() {
    let temp = TempDir::new().unwrap();
    let mut files: Vec<(String, String)> = (0..12)
        .map(|i| (format!("src/m{i}.ts"), format!("export const v{i} = {i};\n")))
        .collect();
    let entry: String = (0..12)
        .rev()
        .map(|i| format!("import v{i} from './m{i}';\n"))
        .collect();
    files.push(("src/entry.ts".to_string(), entry));
    let borrowed: Vec<(&str, &str)> = files
        .iter()
        .map(|(p, c)| (p.as_str(), c.as_str()))
        .collect();
    let root = create_test_project(&temp, &borrowed);

    let entry = tree(&root, "src/entry.ts").await;
    let requests: Vec<_> = entry.imports.iter().map(|n| n.request.clone()).collect();
    let expected: Vec<_> = (0..12).rev().map(|i| format!("./m{i}")).collect();
    assert_eq!(requests, expected);
}

#[tokio::test]
async fn test_package_dependency_is_a_leaf() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("src/index.ts", "import { h } from 'preact';\n"),
            (
                "node_modules/preact/package.json",
                r#"{"name": "preact", "module": "dist/preact.mjs", "main": "dist/preact.js"}"#,
            ),
            ("node_modules/preact/dist/preact.js", "module.exports = {};\n"),
            (
                "node_modules/preact/dist/preact.mjs",
                "import './internal.mjs';\nexport const h = 1;\n",
            ),
            ("node_modules/preact/dist/internal.mjs", ""),
        ],
    );

    let index = tree(&root, "src/index.ts").await;
    // `.mjs` is not a configured extension, so the resolved target is filtered
    assert!(index.imports.is_empty());

    let config = ManifestConfig {
        base: Some(root.clone()),
        extensions: [".ts", ".mjs", ".js"].into_iter().map(String::from).collect(),
        ..ManifestConfig::default()
    };
    let index = build_tree(
        &root.join("src/index.ts"),
        Arc::new(config),
        Arc::new(NativeRuntime::new()),
    )
    .await
    .unwrap();
    assert_eq!(index.imports.len(), 1);
    assert_eq!(
        index.imports[0].path,
        root.join("node_modules/preact/dist/preact.mjs")
    );
    assert!(index.imports[0].imports.is_empty());
}

#[tokio::test]
async fn test_relative_entry_with_dot_segments() {
    let temp = TempDir::new().unwrap();
    let root = create_page_project(&temp);

    let page = tree(&root, "src/app/../app/./page.tsx").await;
    assert_eq!(page.path, root.join("src/app/page.tsx"));
    assert_eq!(page.request, "src/app/page.tsx");
}
