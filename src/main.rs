use anyhow::Result;
use clap::Parser;
use crossplat::catalog::HistoricalCatalog;
use crossplat::commands::{self, OutputFormat};
use std::io;

/// crossplat - cross-build target resolver
///
/// Decide which OS/arch pairs a Go toolchain release can build for, narrowed
/// by OS, architecture and pair filters. Prefix a filter with '!' to exclude.
///
/// Examples:
///   crossplat --toolchain go1.21.3 resolve --os "linux darwin" --arch "!386"
///   crossplat resolve --osarch "linux/amd64 windows/arm64"
#[derive(Parser, Debug)]
#[command(author, version = env!("CROSSPLAT_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Toolchain version, as reported by `go version` (defaults to the newest known)
    #[arg(long, short = 't', value_name = "VERSION", global = true)]
    pub toolchain: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List every platform the toolchain supports
    Platforms,

    /// List the known releases and the toolchain versions each one covers
    Releases,

    /// Print the platforms selected by the given filters
    Resolve(ResolveArgs),
}

#[derive(clap::Args, Debug)]
pub struct ResolveArgs {
    /// Space-separated operating systems to build for
    #[arg(long, value_name = "LIST")]
    pub os: Vec<String>,

    /// Space-separated architectures to build for
    #[arg(long, value_name = "LIST")]
    pub arch: Vec<String>,

    /// Space-separated os/arch pairs to build for
    #[arg(long = "osarch", value_name = "LIST")]
    pub os_arch: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let catalog = HistoricalCatalog::builtin();
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Platforms => {
            commands::platforms(catalog, cli.toolchain.as_deref(), cli.format, &mut out)?
        }
        Commands::Releases => commands::releases(catalog.releases(), cli.format, &mut out)?,
        Commands::Resolve(args) => {
            let request = commands::build_request(&args.os, &args.arch, &args.os_arch)?;
            commands::resolve(
                catalog,
                cli.toolchain.as_deref(),
                &request,
                cli.format,
                &mut out,
            )?
        }
    }
    Ok(())
}
