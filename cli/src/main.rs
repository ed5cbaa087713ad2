use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use itertools::Itertools;
use parquet_diff::{compare, read_directory, DiffResult, ParquetFile};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Inspect a partitioned parquet dataset and report partition-structure
/// and schema differences between its files.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Root directory of the parquet dataset to analyze
    path: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> DiffResult<()> {
    let files = read_directory(&cli.path)?;
    if files.is_empty() {
        info!("no parquet files found");
        return Ok(());
    }

    let partition_count = files.iter().map(ParquetFile::partitions).unique().count();
    info!(
        "found {partition_count} partitions and {} parquet files",
        files.len()
    );
    info!(
        "total rows: {}",
        files.iter().map(ParquetFile::num_rows).sum::<u64>()
    );

    let mut out = io::stdout().lock();
    report_partitions(&files, &mut out)?;
    report_schemas(&files, &mut out)?;
    Ok(())
}

fn report_partitions(files: &[ParquetFile], out: &mut impl Write) -> io::Result<()> {
    let divergent = compare::find_divergent_partitions(files);
    if divergent.is_empty() {
        return writeln!(out, "✅ All parquet partitions have the same structure.");
    }
    writeln!(out, "❌ Conflicting partition structures found.")?;
    for partitions in divergent {
        writeln!(out, "{partitions}")?;
    }
    Ok(())
}

fn report_schemas(files: &[ParquetFile], out: &mut impl Write) -> io::Result<()> {
    let diffs = compare::find_schema_differences(files);
    if diffs.is_empty() {
        writeln!(out, "✅ All parquet partitions have the same schema.")?;
        return files[0].schema().write_tree(out);
    }
    writeln!(out, "🟨 Parquet schema differences found.")?;
    writeln!(out, "Reference schema:")?;
    files[0].schema().write_tree(out)?;
    for diff in &diffs {
        diff.write_report(out)?;
    }
    Ok(())
}
