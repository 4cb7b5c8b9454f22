//! `glint themes` and `glint langs` command implementations.

use std::io::{self, Write};

use glint_highlight::{bundled_languages, bundled_themes};

use crate::error::CliError;

pub(crate) fn list_themes() -> Result<(), CliError> {
    write_names(&mut io::stdout().lock(), bundled_themes())
}

pub(crate) fn list_langs() -> Result<(), CliError> {
    let mut langs = bundled_languages();
    langs.sort_unstable_by_key(|name| name.to_lowercase());
    write_names(&mut io::stdout().lock(), langs)
}

/// Write one name per line.
fn write_names(out: &mut impl Write, names: Vec<String>) -> Result<(), CliError> {
    for name in names {
        writeln!(out, "{name}")?;
    }
    out.flush()?;
    Ok(())
}
