//! Desktop file opener

use finda_core::error::{Result, SessionError};
use finda_core::session::FileOpener;
use std::path::Path;
use tracing::debug;

/// Opens files with the platform's default application
pub struct SystemOpener;

impl FileOpener for SystemOpener {
    fn open(&self, path: &Path) -> Result<()> {
        debug!("dispatching {} to the default application", path.display());
        open::that_detached(path).map_err(|e| {
            SessionError::OpenFailure {
                message: e.to_string(),
            }
            .into()
        })
    }
}
