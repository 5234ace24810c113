use anyhow::Result;
use log::debug;
use serde::Serialize;
use std::io::Write;

use crate::catalog::Catalog;
use crate::platform::Platform;

use super::{OutputFormat, snapshot_for};

#[derive(Serialize)]
struct SnapshotOutput<'a> {
    release: &'a str,
    platforms: Vec<&'a Platform>,
}

/// List every platform the toolchain supports, defaults marked.
#[tracing::instrument(skip(catalog, out))]
pub fn platforms<C, W>(
    catalog: &C,
    toolchain: Option<&str>,
    format: OutputFormat,
    out: &mut W,
) -> Result<()>
where
    C: Catalog + ?Sized,
    W: Write,
{
    let snapshot = snapshot_for(catalog, toolchain);
    debug!(
        "Listing {} platform(s) of release {}",
        snapshot.len(),
        snapshot.release()
    );

    let mut sorted: Vec<&Platform> = snapshot.iter().collect();
    sorted.sort();

    match format {
        OutputFormat::Text => {
            for platform in sorted {
                if platform.is_default() {
                    writeln!(out, "{} (default)", platform)?;
                } else {
                    writeln!(out, "{}", platform)?;
                }
            }
        }
        OutputFormat::Json => {
            let output = SnapshotOutput {
                release: snapshot.release(),
                platforms: sorted,
            };
            serde_json::to_writer_pretty(&mut *out, &output)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
