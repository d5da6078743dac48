//! Cross-module tests over a real temporary directory.

mod loader_tests;
mod test_helpers;
mod traversal_tests;
