//! Configuration and data directory paths
//!
//! Uses XDG directories via `dirs` crate with fallbacks.
//!
//! Platform-specific locations:
//! - Linux: `~/.cache/sg-batches/`
//! - macOS: `~/Library/Caches/sg-batches/`
//! - Windows: `%LOCALAPPDATA%\sg-batches\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "sg-batches";

/// Get the application cache directory
/// Returns ~/.cache/sg-batches/ on Linux, ~/Library/Caches/sg-batches/ on macOS
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_dir_exists() {
        let dir = cache_dir().unwrap();
        assert!(dir.exists());
        assert!(dir.ends_with(APP_NAME));
    }
}
