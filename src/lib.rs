pub mod cli;
pub mod display;
pub mod entry;
pub mod error;
pub mod identity;

use std::io::Write;

pub use crate::cli::{Config, Flags};
pub use crate::display::{Clock, FixedClock, SystemClock};
pub use crate::error::{Error, Result};
pub use crate::identity::{IdentityResolver, StaticIdentity, SystemIdentity};

/// Lists `config.directory` into `writer`.
///
/// The `total items` line is written before any entry is inspected, so it
/// stays in the output even when a later entry fails.
pub fn run(
    config: &Config,
    ids: &dyn IdentityResolver,
    clock: &dyn Clock,
    writer: &mut impl Write,
) -> Result<()> {
    let names = entry::scan_dir(&config.directory, config.show_hidden)?;
    log::debug!("{} entries in {}", names.len(), config.directory.display());
    writeln!(writer, "total items: {}", names.len())?;

    let columns = config.columns();
    log::debug!("columns: {columns:?}");
    let now = clock.now();

    let rows = names
        .into_iter()
        .map(|name| {
            let entry = entry::stat_entry(&config.directory, name)?;
            display::build_row(&entry, &columns, ids, now)
        })
        .collect::<Result<Vec<_>>>()?;

    display::print_rows(writer, &rows)
}
