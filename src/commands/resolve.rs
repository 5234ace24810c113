use anyhow::{Context, Result};
use log::debug;
use std::io::Write;

use crate::catalog::Catalog;
use crate::filter::FilterRequest;

use super::{OutputFormat, snapshot_for};

/// Build a filter request from repeated `--os`, `--arch` and `--osarch`
/// values, in the order they were given.
pub fn build_request(os: &[String], arch: &[String], os_arch: &[String]) -> Result<FilterRequest> {
    let mut request = FilterRequest::new();

    for value in os {
        request
            .add_os(value)
            .with_context(|| format!("Invalid --os value {:?}", value))?;
    }
    for value in arch {
        request
            .add_arch(value)
            .with_context(|| format!("Invalid --arch value {:?}", value))?;
    }
    for value in os_arch {
        request
            .add_os_arch(value)
            .with_context(|| format!("Invalid --osarch value {:?}", value))?;
    }

    Ok(request)
}

/// Print the platforms selected by `request`, sorted.
#[tracing::instrument(skip(catalog, out))]
pub fn resolve<C, W>(
    catalog: &C,
    toolchain: Option<&str>,
    request: &FilterRequest,
    format: OutputFormat,
    out: &mut W,
) -> Result<()>
where
    C: Catalog + ?Sized,
    W: Write,
{
    let snapshot = snapshot_for(catalog, toolchain);
    debug!("Resolving filters against release {}", snapshot.release());

    let targets = request.platforms(&snapshot).into_sorted_vec();

    match format {
        OutputFormat::Text => {
            if targets.is_empty() {
                writeln!(out, "No platforms to build.")?;
            }
            for platform in &targets {
                writeln!(out, "{}", platform)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &targets)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
