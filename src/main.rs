use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use java_censor::job::{censor_source, CensorJob};
use java_censor::{load_from_path, CensorConfig, JavaParser};
use similar::{ChangeTag, TextDiff};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "java-censor")]
#[command(about = "Redact Java implementations while preserving the public API", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy sources into an output directory and censor them
    Run {
        /// Input files or directories to copy and censor
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (must already exist)
        #[arg(short, long)]
        output: PathBuf,

        /// Censor config TOML (placeholders, extensions)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Dry run - print what would change without copying or writing
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Show unified diff of changes
        #[arg(short, long)]
        diff: bool,
    },

    /// Parse-check files without writing anything
    Check {
        /// Files or directories to check
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            inputs,
            output,
            config,
            dry_run,
            diff,
        } => cmd_run(inputs, output, config, dry_run, diff),

        Commands::Check { inputs } => cmd_check(inputs),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<CensorConfig> {
    match path {
        Some(path) => Ok(load_from_path(&path)?),
        None => Ok(CensorConfig::default()),
    }
}

/// Collect every censorable file beneath the given inputs.
fn discover_sources(inputs: &[PathBuf], config: &CensorConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_file() {
            if config.censors_path(input) {
                files.push(input.clone());
            }
            continue;
        }
        if !input.exists() {
            anyhow::bail!("input does not exist: {}", input.display());
        }
        for entry in WalkDir::new(input) {
            let entry = entry?;
            if entry.file_type().is_file() && config.censors_path(entry.path()) {
                files.push(entry.path().to_path_buf());
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Show unified diff between original and censored content.
fn display_diff(file: &Path, original: &str, censored: &str) {
    println!(
        "\n{}",
        format!("--- {} (original)", file.display()).dimmed()
    );
    println!("{}", format!("+++ {} (censored)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, censored);

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => format!(" {}", change).normal(),
        };
        print!("{}", sign);
    }
}

fn cmd_run(
    inputs: Vec<PathBuf>,
    output: PathBuf,
    config_path: Option<PathBuf>,
    dry_run: bool,
    show_diff: bool,
) -> Result<()> {
    let config = load_config(config_path)?;

    if dry_run {
        println!("{}", "DRY RUN - no files will be written".yellow().bold());
        let files = discover_sources(&inputs, &config)?;
        let mut changed = 0;
        for file in &files {
            let source = fs::read_to_string(file)?;
            let censored = censor_source(&source, &config)
                .map_err(|e| anyhow::anyhow!("failed to censor {}: {e}", file.display()))?;
            if censored != source {
                changed += 1;
                println!("  {} {}", "would censor".yellow(), file.display());
                if show_diff {
                    display_diff(file, &source, &censored);
                }
            }
        }
        println!();
        println!(
            "Summary: {} of {} file(s) would change",
            changed.to_string().bold(),
            files.len()
        );
        return Ok(());
    }

    if !output.is_dir() {
        anyhow::bail!(
            "{}\n{}",
            format!("Output is not a directory: {}", output.display()).red(),
            "Create it first, e.g.: mkdir -p <output>"
        );
    }

    // Capture originals before the job rewrites the copies
    let mut originals = Vec::new();
    if show_diff {
        for file in discover_sources(&inputs, &config)? {
            let content = fs::read_to_string(&file)?;
            originals.push((file, content));
        }
    }

    println!("Output: {}", output.display());
    let job = CensorJob::new(inputs, output.clone(), config.clone());
    let summary = job.run()?;

    if show_diff {
        for (file, original) in &originals {
            let censored = censor_source(original, &config)?;
            if &censored != original {
                display_diff(file, original, &censored);
            }
        }
    }

    println!();
    println!(
        "Summary: {} file(s) copied, {} censored",
        summary.copied.to_string().bold(),
        summary.censored.to_string().green().bold()
    );
    Ok(())
}

fn cmd_check(inputs: Vec<PathBuf>) -> Result<()> {
    let config = CensorConfig::default();
    let files = discover_sources(&inputs, &config)?;

    let mut parser = JavaParser::new()?;
    let mut failed = 0;
    for file in &files {
        let source = fs::read_to_string(file)?;
        let parsed = parser.parse_with_source(&source)?;
        match parsed.check_syntax() {
            Ok(()) => println!("  {} {}", "ok".green(), file.display()),
            Err(e) => {
                failed += 1;
                println!("  {} {} - {e}", "FAIL".red().bold(), file.display());
            }
        }
    }

    println!();
    println!(
        "Summary: {} file(s) checked, {} failed",
        files.len().to_string().bold(),
        failed.to_string().bold()
    );

    if failed > 0 {
        anyhow::bail!("{failed} file(s) failed to parse");
    }
    Ok(())
}
