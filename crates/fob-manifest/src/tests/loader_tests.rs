//! Loader transforms against real files.

use std::borrow::Cow;
use std::path::PathBuf;

use serde_json::Value;
use tempfile::TempDir;

use super::test_helpers::{create_page_project, create_test_project, loader_for};
use crate::config::{ManifestConfig, ManifestFormat};
use crate::error::{LoaderError, TraverseError};
use crate::inject::find_marker;

fn injected_json(code: &str) -> Value {
    let start = code.find("/* inject */ ").unwrap() + "/* inject */ ".len();
    let end = code[start..].find(";\n").unwrap() + start;
    serde_json::from_str(&code[start..end]).unwrap()
}

#[tokio::test]
async fn test_transform_injects_nested_manifest() {
    let temp = TempDir::new().unwrap();
    let root = create_page_project(&temp);
    let page = root.join("src/app/page.tsx");
    let source = std::fs::read_to_string(&page).unwrap();

    let loader = loader_for(&root, ManifestConfig::default());
    let mut deps: Vec<PathBuf> = Vec::new();
    let output = loader.transform(&source, &page, &mut deps).await.unwrap();

    let manifest = injected_json(&output.code);
    let modules = manifest["modules"].as_array().unwrap();
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0]["request"], "src/app/page.tsx");
    assert_eq!(modules[0]["imports"][0]["request"], "./Test");
    assert_eq!(modules[0]["imports"][0]["imports"][0]["request"], "./Another");
    assert!(!output.code.contains("types.ts"));

    assert_eq!(
        deps,
        vec![
            page.clone(),
            root.join("src/app/Test.tsx"),
            root.join("src/app/Another.tsx"),
        ]
    );

    let map: Value = serde_json::from_str(output.map.as_deref().unwrap()).unwrap();
    assert_eq!(map["version"], 3);
}

#[tokio::test]
async fn test_text_outside_marker_is_untouched() {
    let temp = TempDir::new().unwrap();
    let root = create_page_project(&temp);
    let page = root.join("src/app/page.tsx");
    let source = std::fs::read_to_string(&page).unwrap();
    let span = find_marker(&source).unwrap();

    let loader = loader_for(&root, ManifestConfig::default());
    let output = loader
        .transform(&source, &page, &mut Vec::new())
        .await
        .unwrap();

    assert!(output.code.starts_with(&source[..span.start]));
    assert!(output.code.ends_with(&source[span.end..]));
}

#[tokio::test]
async fn test_transform_without_marker_is_passthrough() {
    let temp = TempDir::new().unwrap();
    let root = create_page_project(&temp);
    let test = root.join("src/app/Test.tsx");
    let source = std::fs::read_to_string(&test).unwrap();

    let loader = loader_for(&root, ManifestConfig::default());
    let mut deps: Vec<PathBuf> = Vec::new();
    let output = loader.transform(&source, &test, &mut deps).await.unwrap();

    assert!(matches!(output.code, Cow::Borrowed(code) if std::ptr::eq(code, source.as_str())));
    assert!(output.map.is_none());
    assert!(deps.is_empty());
}

#[tokio::test]
async fn test_missing_dependency_shrinks_manifest() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            (
                "src/page.tsx",
                "import Missing from './DoesNotExist';\nimport Test from './Test';\nexport const m = /* inject */ {};\n",
            ),
            ("src/Test.tsx", "export default 1;\n"),
        ],
    );
    let page = root.join("src/page.tsx");
    let source = std::fs::read_to_string(&page).unwrap();

    let loader = loader_for(&root, ManifestConfig::default());
    let output = loader
        .transform(&source, &page, &mut Vec::new())
        .await
        .unwrap();

    let manifest = injected_json(&output.code);
    let imports = manifest["modules"][0]["imports"].as_array().unwrap();
    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0]["request"], "./Test");
}

#[tokio::test]
async fn test_flat_format_and_line_counts() {
    let temp = TempDir::new().unwrap();
    let root = create_page_project(&temp);
    let page = root.join("src/app/page.tsx");
    let source = std::fs::read_to_string(&page).unwrap();

    let flat = loader_for(
        &root,
        ManifestConfig {
            format: ManifestFormat::Flat,
            sourcemap: false,
            ..ManifestConfig::default()
        },
    );
    let output = flat
        .transform(&source, &page, &mut Vec::new())
        .await
        .unwrap();
    assert!(output.map.is_none());
    let manifest = injected_json(&output.code);
    let requests: Vec<_> = manifest["modules"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["request"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(requests, vec!["src/app/page.tsx", "./Test", "./Another"]);
    assert!(manifest["modules"][0].get("imports").is_none());

    let counted = loader_for(
        &root,
        ManifestConfig {
            line_counts: true,
            ..ManifestConfig::default()
        },
    );
    let manifest = counted.build_manifest(&page).await.unwrap();
    let root_node = manifest.root().unwrap();
    assert_eq!(root_node.lines, Some(source.lines().count()));
}

#[tokio::test]
async fn test_module_limit_surfaces_as_loader_error() {
    let temp = TempDir::new().unwrap();
    let root = create_page_project(&temp);
    let page = root.join("src/app/page.tsx");
    let source = std::fs::read_to_string(&page).unwrap();

    let loader = loader_for(
        &root,
        ManifestConfig {
            max_modules: 1,
            ..ManifestConfig::default()
        },
    );
    let mut deps: Vec<PathBuf> = Vec::new();
    let err = loader.transform(&source, &page, &mut deps).await.unwrap_err();

    assert!(matches!(
        err,
        LoaderError::Traverse {
            source: TraverseError::TooManyModules { .. },
            ..
        }
    ));
    assert!(deps.is_empty());
}

#[tokio::test]
async fn test_transform_is_idempotent_over_unchanged_tree() {
    let temp = TempDir::new().unwrap();
    let root = create_page_project(&temp);
    let page = root.join("src/app/page.tsx");
    let source = std::fs::read_to_string(&page).unwrap();
    let loader = loader_for(&root, ManifestConfig::default());

    let first = loader
        .transform(&source, &page, &mut Vec::new())
        .await
        .unwrap();
    let second = loader
        .transform(&source, &page, &mut Vec::new())
        .await
        .unwrap();
    assert_eq!(first.code, second.code);
    assert_eq!(first.map, second.map);
}
