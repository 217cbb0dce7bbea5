use clap::{ArgAction, Parser};

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::display::Column;

#[allow(
    clippy::struct_excessive_bools,
    reason = "this is not a state machine, but a set of flags"
)]
#[derive(Parser, Debug)]
#[command(about = "The classic ls command", disable_help_flag = true)]
pub struct Flags {
    /// show this help message
    #[arg(long, action(ArgAction::Help))]
    pub help: Option<bool>,

    /// Show hidden files
    #[arg(short = 'a', long = "all")]
    pub show_hidden: bool,

    /// Show detailed list
    #[arg(short = 'l', long = "long")]
    pub long: bool,

    /// Show file permissions
    #[arg(short = 'p', long = "permissions")]
    pub permissions: bool,

    /// Show linked hard links
    #[arg(long = "linked_hard_links")]
    pub links: bool,

    /// Show file user
    #[arg(short = 'u', long = "user")]
    pub owner: bool,

    /// Show file group
    #[arg(short = 'g', long = "group")]
    pub group: bool,

    /// Show file size
    #[arg(short = 's', long = "size")]
    pub size: bool,

    /// Show last modified time
    #[arg(long = "modifiedtime")]
    pub modified: bool,

    /// directory to list
    #[arg(default_value = ".")]
    pub directory: PathBuf,
}

impl Flags {
    /// Parse from `std::env::args_os()`, exit with usage on error.
    pub fn from_args() -> Self {
        Self::parse_from(normalize_args(env::args_os()))
    }

    /// Parse from an explicit argument list, returning clap's error instead of exiting.
    pub fn try_from_iter<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }
}

/// Rewrites the two-letter short flags `-hl` and `-mt` into their long forms.
///
/// clap only knows single-character shorts, and would otherwise read `-hl` as
/// the cluster `-h -l`. Tokens after `--` are left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut past_separator = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if past_separator {
                return arg;
            }
            match arg.to_str() {
                Some("--") => {
                    past_separator = true;
                    arg
                }
                Some("-hl") => OsString::from("--linked_hard_links"),
                Some("-mt") => OsString::from("--modifiedtime"),
                _ => arg,
            }
        })
        .collect()
}

/// Options for one run, resolved from [`Flags`].
#[allow(
    clippy::struct_excessive_bools,
    reason = "one switch per column"
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub directory: PathBuf,
    pub show_hidden: bool,
    pub long: bool,
    pub permissions: bool,
    pub links: bool,
    pub owner: bool,
    pub group: bool,
    pub size: bool,
    pub modified: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            show_hidden: false,
            long: false,
            permissions: false,
            links: false,
            owner: false,
            group: false,
            size: false,
            modified: false,
        }
    }
}

impl From<Flags> for Config {
    fn from(flags: Flags) -> Self {
        Self {
            directory: flags.directory,
            show_hidden: flags.show_hidden,
            long: flags.long,
            permissions: flags.permissions,
            links: flags.links,
            owner: flags.owner,
            group: flags.group,
            size: flags.size,
            modified: flags.modified,
        }
    }
}

impl Config {
    /// Active metadata columns in display order. The name column is implied.
    pub fn columns(&self) -> Vec<Column> {
        Column::selected(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(args: &[&str]) -> Config {
        let mut argv = vec!["lscols"];
        argv.extend_from_slice(args);
        Flags::try_from_iter(argv).unwrap().into()
    }

    #[test]
    fn rewrites_two_letter_shorts() {
        let args = normalize_args(["lscols", "-hl", "dir", "-mt", "-l"]);
        assert_eq!(
            args,
            vec!["lscols", "--linked_hard_links", "dir", "--modifiedtime", "-l"]
                .into_iter()
                .map(OsString::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn leaves_tokens_after_separator() {
        let args = normalize_args(["lscols", "--", "-hl"]);
        assert_eq!(args[2], OsString::from("-hl"));
    }

    #[test]
    fn defaults_to_current_directory() {
        assert_eq!(config(&[]), Config::default());
    }

    #[test]
    fn selective_columns_keep_fixed_order() {
        let config = config(&["-mt", "-s", "-p", "somewhere"]);
        assert_eq!(config.directory, PathBuf::from("somewhere"));
        assert_eq!(
            config.columns(),
            vec![Column::Permissions, Column::Size, Column::Modified]
        );
    }

    #[test]
    fn long_selects_every_column() {
        assert_eq!(
            config(&["-l", "-s"]).columns(),
            vec![
                Column::Permissions,
                Column::Links,
                Column::Owner,
                Column::Group,
                Column::Size,
                Column::Modified,
            ]
        );
    }
}
