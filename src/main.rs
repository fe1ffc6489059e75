use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use serde::Serialize;

use fastmaths::pitch::Note;
use fastmaths::table::{DEFAULT_LOG_TABLE_SIZE, DEFAULT_POW_TABLE_SIZE};
use fastmaths::{accuracy, registry, sweep, ApproxTable, TableConfig, TableFamily};

mod wav;

fn parse_duration(s: &str) -> Result<Duration, std::num::ParseIntError> {
    let ms: u64 = s.parse()?;
    Ok(Duration::from_millis(ms))
}

/// Inspect and exercise table-driven fast pow/log approximations
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Table resolution flags shared by the commands that evaluate
#[derive(clap::Args, Debug)]
struct TableArgs {
    /// Number of samples in the log2 table
    #[arg(long, default_value_t = DEFAULT_LOG_TABLE_SIZE)]
    log_size: usize,

    /// Number of samples in the exp2 table
    #[arg(long, default_value_t = DEFAULT_POW_TABLE_SIZE)]
    pow_size: usize,

    /// JSON table configuration, overrides --log-size and --pow-size
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Measure the approximation error of a pair of tables
    Accuracy {
        #[command(flatten)]
        tables: TableArgs,

        /// Evaluations per function
        #[arg(long, default_value_t = 100_000)]
        samples: usize,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a generated table
    Table {
        /// Table family, "log" or "pow"
        family: TableFamily,

        /// Number of samples (2^k + 1 keeps indexing exact)
        size: usize,

        /// Output format
        #[arg(long, value_enum, default_value_t = TableFormat::Rust)]
        format: TableFormat,
    },
    /// Render an exponential sine sweep to a WAV file
    Sweep {
        /// Output WAV path
        output: PathBuf,

        /// Starting MIDI note
        #[arg(long, default_value_t = 36.0)]
        start_note: f32,

        /// Final MIDI note
        #[arg(long, default_value_t = 96.0)]
        end_note: f32,

        /// Sweep duration in milliseconds
        #[arg(long, default_value = "2000", value_parser = parse_duration)]
        duration: Duration,

        /// Sample rate in Hz
        #[arg(long, default_value_t = 48000)]
        sample_rate: u32,

        #[command(flatten)]
        tables: TableArgs,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum TableFormat {
    /// A Rust `static` array
    Rust,
    /// A JSON document
    Json,
}

#[derive(Serialize)]
struct TableDump<'a> {
    family: TableFamily,
    size: usize,
    samples: &'a [f32],
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match args.command {
        Commands::Accuracy {
            tables,
            samples,
            json,
        } => {
            install_tables(&tables)?;
            let maths = registry().maths()?;
            let report = accuracy::measure(&maths, samples);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("log table:  {} samples", report.log_table_size);
                println!("pow table:  {} samples", report.pow_table_size);
                println!("max |log2 error|:     {:.3e}", report.max_log2_error);
                println!("max exp2 rel. error:  {:.3e}", report.max_exp2_error);
                println!("max pow rel. error:   {:.3e}", report.max_pow_error);
            }
        }
        Commands::Table {
            family,
            size,
            format,
        } => {
            let table = ApproxTable::generate(family, size)?;
            match format {
                TableFormat::Rust => print!("{}", format_rust_table(family, &table)),
                TableFormat::Json => {
                    let dump = TableDump {
                        family,
                        size: table.size(),
                        samples: table.samples(),
                    };
                    println!("{}", serde_json::to_string_pretty(&dump)?);
                }
            }
        }
        Commands::Sweep {
            output,
            start_note,
            end_note,
            duration,
            sample_rate,
            tables,
        } => {
            if !(0.0..=127.0).contains(&start_note) || !(0.0..=127.0).contains(&end_note) {
                bail!(
                    "notes must be within 0..=127 (got {} and {})",
                    start_note,
                    end_note
                );
            }
            if sample_rate == 0 {
                bail!("sample rate must be positive");
            }

            install_tables(&tables)?;
            let maths = registry().maths()?;
            let samples = sweep::render_sweep(
                &maths,
                Note(start_note),
                Note(end_note),
                sample_rate,
                duration,
            );

            let wav_data = wav::generate_wav(&samples, sample_rate)
                .context("unable to encode wav data")?;
            std::fs::write(&output, wav_data)
                .with_context(|| format!("unable to write '{}'", output.display()))?;

            info!(
                "wrote {} samples ({:.1} s) to {}",
                samples.len(),
                duration.as_secs_f32(),
                output.display()
            );
        }
    }

    Ok(())
}

fn install_tables(args: &TableArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => read_config(path)?,
        None => TableConfig {
            log_size: args.log_size,
            pow_size: args.pow_size,
        },
    };
    info!(
        "using tables: log {} samples, pow {} samples",
        config.log_size, config.pow_size
    );
    registry().configure(&config)?;
    Ok(())
}

fn read_config(path: &Path) -> anyhow::Result<TableConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("unable to read config '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config '{}'", path.display()))
}

fn format_rust_table(family: TableFamily, table: &ApproxTable) -> String {
    const PER_LINE: usize = 4;

    let description = match family {
        TableFamily::Log => "log2(1 + t)",
        TableFamily::Pow => "2^t",
    };
    let name = format!("{}_TABLE", family.name().to_ascii_uppercase());

    let mut ret = String::new();
    ret.push_str(&format!(
        "// {} for t in [0, 1], {} samples\n",
        description,
        table.size()
    ));
    ret.push_str(&format!(
        "pub static {}: [f32; {}] = [\n",
        name,
        table.size()
    ));
    for chunk in table.samples().chunks(PER_LINE) {
        let line: Vec<String> = chunk.iter().map(|s| format!("{:?}", s)).collect();
        ret.push_str(&format!("    {},\n", line.join(", ")));
    }
    ret.push_str("];\n");

    ret
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rust_table() {
        let table = ApproxTable::generate(TableFamily::Pow, 3).unwrap();
        let text = format_rust_table(TableFamily::Pow, &table);
        assert!(text.starts_with("// 2^t for t in [0, 1], 3 samples\n"));
        assert!(text.contains("pub static POW_TABLE: [f32; 3] = [\n"));
        assert!(text.contains("    1.0, 1.4142135, 2.0,\n"));
        assert!(text.ends_with("];\n"));
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("250"), Ok(Duration::from_millis(250)));
        assert!(parse_duration("soon").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["fastmaths", "table", "log", "257", "--format", "json"])
            .unwrap();
        match args.command {
            Commands::Table {
                family,
                size,
                format,
            } => {
                assert_eq!(family, TableFamily::Log);
                assert_eq!(size, 257);
                assert_eq!(format, TableFormat::Json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
