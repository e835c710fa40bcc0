use std::fs::File;
use std::io::{BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use env_logger::Env;

// Use modules from the library instead of redefining them
use geomark::input::FileOrStdin;
use geomark::resolver::DEFAULT_API_BASE;
use geomark::{Extractor, Resolver};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Input list with one address or domain per line. Use "-" to read
    /// from stdin
    #[clap(
        short,
        long,
        value_name = "FILE",
        default_value = "ip.txt",
        value_hint = clap::ValueHint::FilePath
    )]
    input: Utf8PathBuf,

    /// Output file, overwritten on every run
    #[clap(
        short,
        long,
        value_name = "FILE",
        default_value = "addressesapi.txt",
        value_hint = clap::ValueHint::FilePath
    )]
    output: Utf8PathBuf,

    /// Port assigned to entries without an inline #port annotation
    #[clap(short, long, default_value_t = 443)]
    port: u16,

    /// Base URL of the geolocation service
    #[clap(
        long,
        value_name = "URL",
        env = "GEOMARK_API_BASE",
        default_value = DEFAULT_API_BASE
    )]
    api_base: String,
}

fn main() -> ExitCode {
    // Use a separate run function to handle the actual work
    let err = match run_main() {
        Ok(()) => return ExitCode::SUCCESS,
        Err(err) => err,
    };

    writeln!(&mut std::io::stderr(), "{:#}", err).ok();
    ExitCode::FAILURE
}

fn run_main() -> Result<()> {
    // Lookup summaries go to stderr at info level unless RUST_LOG says
    // otherwise
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    run(args)
}

fn run(args: Args) -> Result<()> {
    let extractor = Extractor::new(args.port.to_string())?;

    let input = FileOrStdin::from_path(args.input);
    let entries = extractor
        .extract(input.reader()?)
        .with_context(|| format!("failed to read {}", input))?;

    let resolver = Resolver::new(args.api_base)?;

    // Truncate-then-write: a re-run fully replaces the previous output
    let file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output))?;
    let mut out = BufWriter::new(file);

    for entry in &entries {
        let Some(record) = resolver.resolve(&entry.address) else {
            continue;
        };
        // Unresolved country drops the whole line, never a partial write
        if let Some(line) = record.annotation(&entry.port) {
            writeln!(out, "{line}").with_context(|| format!("failed to write {}", args.output))?;
        }
    }
    out.flush()
        .with_context(|| format!("failed to write {}", args.output))?;

    println!("location check complete");
    Ok(())
}
