//! Shared test utilities for manifest tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use crate::config::ManifestConfig;
use crate::loader::ManifestLoader;
use crate::runtime::native::NativeRuntime;

/// Create a test project with the given files.
///
/// # Arguments
/// * `temp` - Temporary directory
/// * `files` - Array of (path, content) tuples
///
/// # Returns
/// The root path of the created project
pub fn create_test_project(temp: &TempDir, files: &[(&str, &str)]) -> PathBuf {
    let root = temp.path().to_path_buf();

    for (path, content) in files {
        let file_path = root.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|_| panic!("Failed to create parent directory for {path}"));
        }
        fs::write(&file_path, content).unwrap_or_else(|_| panic!("Failed to write file {path}"));
    }

    root
}

/// The page/Test/Another project used by most scenarios.
pub fn create_page_project(temp: &TempDir) -> PathBuf {
    create_test_project(
        temp,
        &[
            (
                "src/app/page.tsx",
                r#"import Test from './Test';
import type { Foo } from './types';

export const manifest = /* inject */ {};

export default function Page() {
    return <Test />;
}
"#,
            ),
            (
                "src/app/Test.tsx",
                r#"import Another from './Another';
export default function Test() {
    return <Another />;
}
"#,
            ),
            (
                "src/app/Another.tsx",
                "export default function Another() {\n    return null;\n}\n",
            ),
            ("src/app/types.ts", "export type Foo = { id: string };\n"),
        ],
    )
}

/// A loader over the real filesystem with `base` set to `root`.
pub fn loader_for(root: &Path, config: ManifestConfig) -> ManifestLoader {
    let config = ManifestConfig {
        base: Some(root.to_path_buf()),
        ..config
    };
    ManifestLoader::new(config, Arc::new(NativeRuntime::new()))
}
