use std::{io, path::PathBuf};

use thiserror::Error;

use crate::front_matter::FrontMatterError;

#[derive(Error, Debug)]
pub(crate) enum WonderError {
    #[error("invalid slug: {slug:?}")]
    InvalidSlug { slug: String },

    #[error("wonder not found: {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read {path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed document {path:?}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
}

impl WonderError {
    pub fn from_io(path: PathBuf, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Unreadable { path, source: err },
        }
    }
}
