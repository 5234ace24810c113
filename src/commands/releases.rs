use anyhow::Result;
use log::debug;
use serde::Serialize;
use std::io::Write;

use crate::catalog::CatalogEntry;

use super::OutputFormat;

#[derive(Serialize)]
struct ReleaseOutput<'a> {
    release: &'a str,
    range: String,
    platforms: usize,
    defaults: usize,
}

impl<'a> From<&'a CatalogEntry> for ReleaseOutput<'a> {
    fn from(entry: &'a CatalogEntry) -> Self {
        Self {
            release: entry.snapshot.release(),
            range: entry.range.to_string(),
            platforms: entry.snapshot.len(),
            defaults: entry.snapshot.defaults().count(),
        }
    }
}

/// List the release ladder: each platform set and the versions it covers.
#[tracing::instrument(skip_all)]
pub fn releases<W: Write>(
    ladder: &[CatalogEntry],
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    debug!("Listing {} release(s)", ladder.len());
    let rows: Vec<ReleaseOutput> = ladder.iter().map(ReleaseOutput::from).collect();

    match format {
        OutputFormat::Text => {
            for row in rows {
                writeln!(
                    out,
                    "{:<6} {:<20} {} platform(s), {} default",
                    row.release, row.range, row.platforms, row.defaults
                )?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &rows)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
