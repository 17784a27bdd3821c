//! Asset paths and load failures
//!
//! Textures and sounds are loaded by the host's collaborators. A missing asset
//! is never fatal: callers log it and fall back to a placeholder.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetLoadError {
    #[error("asset not found: {}", .0.display())]
    Missing(PathBuf),
    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
}

/// Unwrap a load result, logging failures and substituting `placeholder`
pub fn or_placeholder<T>(result: Result<T, AssetLoadError>, placeholder: T) -> T {
    result.unwrap_or_else(|e| {
        log::warn!("{}, using placeholder", e);
        placeholder
    })
}

/// Well-known asset locations under the assets directory
pub struct AssetPaths<'a> {
    pub root: &'a Path,
}

impl<'a> AssetPaths<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    pub fn model(&self, name: &str) -> PathBuf {
        self.root.join("models").join(name)
    }

    pub fn sound(&self, name: &str) -> PathBuf {
        self.root.join("audio").join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_placeholder() {
        assert_eq!(or_placeholder(Ok(3), 0), 3);
        let missing: Result<u32, _> = Err(AssetLoadError::Missing(PathBuf::from("x.png")));
        assert_eq!(or_placeholder(missing, 0), 0);
    }

    #[test]
    fn test_paths() {
        let paths = AssetPaths::new(Path::new("assets"));
        assert_eq!(paths.model("player1.png"), Path::new("assets/models/player1.png"));
        assert_eq!(paths.sound("death.wav"), Path::new("assets/audio/death.wav"));
    }
}
