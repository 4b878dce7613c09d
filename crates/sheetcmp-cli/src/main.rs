//! sheetcmp CLI
//!
//! Command-line tool for comparing a production and a development table
//! export and writing a highlighted differences workbook.

use chrono::Local;
use clap::{Parser, Subcommand};
use sheetcmp_core::{
    compare_and_write, load_and_clean, resolve_filter_set, write_default_config, RowFilterSet,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheetcmp")]
#[command(about = "Compare production and development table exports", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two exports and write the differences workbook
    Compare {
        /// Production export (xlsx or csv)
        #[arg(long)]
        prod: PathBuf,

        /// Development export (xlsx or csv)
        #[arg(long)]
        dev: PathBuf,

        /// Platform label used in the default output filename
        #[arg(short, long)]
        label: Option<String>,

        /// Excluded-rows config file
        #[arg(short, long, default_value = "config.json")]
        config: PathBuf,

        /// Explicit output path (overrides --output-dir and the
        /// generated filename)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory for the generated output file
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,
    },

    /// Load one export, apply the filters and print the cleaned table
    Show {
        /// Export file to inspect (xlsx or csv)
        #[arg(short, long)]
        file: PathBuf,

        /// Excluded-rows config file
        #[arg(short, long, default_value = "config.json")]
        config: PathBuf,

        /// Maximum number of rows to display
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Write the default excluded-rows config for review
    InitConfig {
        /// Destination for the config file
        #[arg(short, long, default_value = "config.json")]
        config: PathBuf,

        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> sheetcmp_core::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compare {
            prod,
            dev,
            label,
            config,
            output,
            output_dir,
        } => cmd_compare(&prod, &dev, label, &config, output, &output_dir),
        Commands::Show {
            file,
            config,
            limit,
        } => cmd_show(&file, &config, limit),
        Commands::InitConfig { config, force } => cmd_init_config(&config, force),
    }
}

fn cmd_compare(
    prod: &PathBuf,
    dev: &PathBuf,
    label: Option<String>,
    config: &PathBuf,
    output: Option<PathBuf>,
    output_dir: &PathBuf,
) -> sheetcmp_core::Result<()> {
    let filter = load_filter_or_stop(config)?;

    let destination = match output {
        Some(path) => path,
        None => {
            let today = Local::now().format("%d_%m_%y");
            let label = label
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| "platform".to_string());
            output_dir.join(format!("{}_comparison_output_{}.xlsx", label, today))
        }
    };

    let result = compare_and_write(prod, dev, &filter, &destination)?;

    if result.narrowed {
        println!(
            "Note: the two exports have different column counts; both were \
             narrowed to their first and last column before comparing. The \
             sampled columns are matched by position only."
        );
    }
    println!(
        "Compared {} rows, {} cells differ.",
        result.differences.row_count(),
        result.changed_count()
    );
    println!("Comparison complete. Output saved to {}", destination.display());

    Ok(())
}

fn cmd_show(file: &PathBuf, config: &PathBuf, limit: Option<usize>) -> sheetcmp_core::Result<()> {
    let filter = load_filter_or_stop(config)?;
    let table = load_and_clean(file, &filter)?;

    println!("File: {}", file.display());
    println!("Rows: {}", table.row_count());
    println!("Columns: {}", table.column_count());
    println!();

    let row_limit = limit.unwrap_or(table.row_count());
    for row in table.rows.iter().take(row_limit) {
        let values: Vec<String> = row.cells.iter().map(|c| c.to_string_value()).collect();
        println!("{}\t{}", row.label, values.join("\t"));
    }

    if table.row_count() > row_limit {
        println!("... ({} more rows)", table.row_count() - row_limit);
    }

    Ok(())
}

fn cmd_init_config(config: &PathBuf, force: bool) -> sheetcmp_core::Result<()> {
    if config.exists() && !force {
        eprintln!(
            "Config {} already exists. Use --force to overwrite.",
            config.display()
        );
        std::process::exit(1);
    }

    write_default_config(config)?;
    println!("Wrote default excluded-rows config to {}", config.display());
    println!();
    println!("Review the list, then run:");
    println!("  sheetcmp compare --prod <prod.xlsx> --dev <dev.xlsx>");

    Ok(())
}

/// Resolve the filter set; on first run report the bootstrapped config
/// and stop without comparing
fn load_filter_or_stop(config: &PathBuf) -> sheetcmp_core::Result<RowFilterSet> {
    match resolve_filter_set(config) {
        Ok(filter) => Ok(filter),
        Err(e @ sheetcmp_core::Error::ConfigMissing { .. }) => {
            println!("{}", e);
            std::process::exit(2);
        }
        Err(e) => Err(e),
    }
}
