use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can end a listing early.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot open directory '{}': {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot access '{}': {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no user name for uid {0}")]
    UnknownUser(u32),

    #[error("no group name for gid {0}")]
    UnknownGroup(u32),

    #[error("modification time of '{}' is out of range", name.to_string_lossy())]
    Timestamp { name: OsString },

    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
}
