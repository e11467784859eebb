// Thu Oct 15 2026 - Alex

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SymbolError {
    #[error("Failed to read symbol file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Symbol file not found: {0:?}")]
    NotFound(PathBuf),
}
