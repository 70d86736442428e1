//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version string shown by `--version`.
pub fn version_line() -> String {
    format!("flapper {} ({}, {})", PKG_VERSION, BUILD_DATE, BUILD_COMMIT)
}
