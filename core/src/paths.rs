//! Virtual-path to real-path resolution

use crate::error::{Result, SessionError};
use std::path::{Path, PathBuf};

/// Maps canonical paths under the virtual root onto the real documents root.
///
/// Performs no filesystem access; opening the resolved path is the opener
/// collaborator's job.
#[derive(Debug, Clone)]
pub struct PathResolver {
    virtual_root: String,
    documents_root: PathBuf,
}

impl PathResolver {
    /// Create a resolver for the given virtual root and documents root
    pub fn new(virtual_root: impl Into<String>, documents_root: impl AsRef<Path>) -> Self {
        Self {
            virtual_root: virtual_root.into(),
            documents_root: documents_root.as_ref().to_path_buf(),
        }
    }

    /// Resolve a canonical path to a real filesystem path.
    ///
    /// Canonical paths always carry the virtual-root prefix by construction;
    /// a path without it is refused rather than silently mis-joined.
    pub fn resolve(&self, canonical: &str) -> Result<PathBuf> {
        let rest = canonical
            .strip_prefix(&self.virtual_root)
            .filter(|rest| rest.is_empty() || rest.starts_with('/'))
            .ok_or_else(|| SessionError::InvalidPath {
                path: canonical.to_string(),
            })?;

        Ok(self.documents_root.join(rest.trim_start_matches('/')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn resolver() -> PathResolver {
        PathResolver::new("/data", "/home/user/Documents")
    }

    #[test]
    fn strips_virtual_root_and_joins() {
        let real = resolver().resolve("/data/reports/feb.pdf").unwrap();
        assert_eq!(real, PathBuf::from("/home/user/Documents/reports/feb.pdf"));
    }

    #[test]
    fn rejects_path_outside_virtual_root() {
        let err = resolver().resolve("/other/reports/feb.pdf").unwrap_err();
        assert!(matches!(
            err,
            Error::Session(SessionError::InvalidPath { .. })
        ));
    }

    #[test]
    fn rejects_prefix_without_separator() {
        // "/database/x" shares the prefix bytes but is a different tree.
        let err = resolver().resolve("/database/x.txt").unwrap_err();
        assert!(matches!(
            err,
            Error::Session(SessionError::InvalidPath { .. })
        ));
    }

    #[test]
    fn bare_virtual_root_resolves_to_documents_root() {
        let real = resolver().resolve("/data").unwrap();
        assert_eq!(real, PathBuf::from("/home/user/Documents"));
    }
}
