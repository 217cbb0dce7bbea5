use chrono::{DateTime, Local, TimeZone};
use libc::{S_IRGRP, S_IROTH, S_IRUSR, S_IWGRP, S_IWOTH, S_IWUSR, S_IXGRP, S_IXOTH, S_IXUSR};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::Path;
use std::time::SystemTime;

use crate::error::{Error, Result};

/// Enum to represent directories, symbolic links or anything else
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Dir,
    Symlink,
    File,
}

impl From<fs::FileType> for FileType {
    fn from(file_type: fs::FileType) -> Self {
        if file_type.is_dir() {
            Self::Dir
        } else if file_type.is_symlink() {
            Self::Symlink
        } else {
            Self::File
        }
    }
}

impl FileType {
    /// Leading character of the permission string.
    #[must_use]
    pub const fn marker(self) -> char {
        match self {
            Self::Dir => 'd',
            Self::Symlink => 'l',
            Self::File => '-',
        }
    }
}

/// Snapshot of one directory entry, taken once at scan time
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: OsString,
    pub r#type: FileType,
    pub mode: u32,
    pub links: u64,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    pub modified: SystemTime,
}

impl Entry {
    /// Gets the 10 character permission string, e.g. `drwxr-xr-x`
    pub fn get_permissions(&self) -> String {
        format!("{}{}", self.r#type.marker(), parse_permissions(self.mode))
    }

    /// Gets num of links
    pub fn get_links(&self) -> String {
        self.links.to_string()
    }

    pub fn get_size(&self) -> String {
        self.size.to_string()
    }

    pub fn get_name(&self) -> String {
        self.name.to_string_lossy().into_owned()
    }

    /// Modification time in local time, `None` when chrono cannot represent it
    pub fn get_modified_time(&self) -> Option<DateTime<Local>> {
        let (secs, nsecs) = match self.modified.duration_since(SystemTime::UNIX_EPOCH) {
            Ok(after) => (i64::try_from(after.as_secs()).ok()?, after.subsec_nanos()),
            Err(before) => {
                let before = before.duration();
                let secs = i64::try_from(before.as_secs()).ok()?;
                match before.subsec_nanos() {
                    0 => (-secs, 0),
                    nanos => (-secs - 1, 1_000_000_000 - nanos),
                }
            }
        };
        Local.timestamp_opt(secs, nsecs).single()
    }
}

/// Lists the names inside `dir_path`, sorted.
///
/// Hidden names are dropped unless `show_hidden` is set, in which case `.`
/// and `..` are added as well.
pub fn scan_dir(dir_path: &Path, show_hidden: bool) -> Result<Vec<OsString>> {
    let read_err = |source| Error::ReadDir {
        path: dir_path.to_path_buf(),
        source,
    };

    let mut names = fs::read_dir(dir_path)
        .map_err(read_err)?
        .map(|entry_result| entry_result.map(|entry| entry.file_name()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(read_err)?;

    if show_hidden {
        names.push(OsString::from("."));
        names.push(OsString::from(".."));
    } else {
        names.retain(|name| !is_hidden(name));
    }

    names.sort();
    Ok(names)
}

/// Reads the metadata of `name` inside `dir_path` without following symlinks.
pub fn stat_entry(dir_path: &Path, name: OsString) -> Result<Entry> {
    let path = dir_path.join(&name);
    let stat_err = |source| Error::Stat {
        path: path.clone(),
        source,
    };

    let metadata = fs::symlink_metadata(&path).map_err(stat_err)?;
    let modified = metadata.modified().map_err(stat_err)?;
    log::trace!("stat {}: mode {:o}", path.display(), metadata.mode());

    Ok(Entry {
        name,
        r#type: metadata.file_type().into(),
        mode: metadata.mode(),
        links: metadata.nlink(),
        uid: metadata.uid(),
        gid: metadata.gid(),
        size: metadata.len(),
        modified,
    })
}

// Checks if given name is 'hidden' (starts with '.')
fn is_hidden(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}

/// Renders the low nine mode bits as `rwxr-xr-x`
pub fn parse_permissions(mode: u32) -> String {
    let user = triplet(mode, S_IRUSR, S_IWUSR, S_IXUSR);
    let group = triplet(mode, S_IRGRP, S_IWGRP, S_IXGRP);
    let other = triplet(mode, S_IROTH, S_IWOTH, S_IXOTH);
    [user, group, other].concat()
}

#[allow(clippy::useless_conversion, reason = "mode_t is narrower than u32 on some targets")]
fn triplet(
    mode: u32,
    read: libc::mode_t,
    write: libc::mode_t,
    execute: libc::mode_t,
) -> &'static str {
    let bits = (
        mode & u32::from(read),
        mode & u32::from(write),
        mode & u32::from(execute),
    );
    match bits {
        (0, 0, 0) => "---",
        (_, 0, 0) => "r--",
        (0, _, 0) => "-w-",
        (0, 0, _) => "--x",
        (_, 0, _) => "r-x",
        (_, _, 0) => "rw-",
        (0, _, _) => "-wx",
        (_, _, _) => "rwx",
    }
}
