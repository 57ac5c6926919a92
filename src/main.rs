//! Robots Forge CLI
//!
//! Usage:
//!   robots-forge validate [FILE] [--json]
//!   robots-forge generate [--policy FILE]
//!   robots-forge templates [NAME] [--json]
//!   robots-forge sitemap PAGES [--base-url URL]

use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use robots_forge::policy::DEFAULT_BASE_URL;
use robots_forge::sitemap::load_pages;
use robots_forge::template::get_template;
use robots_forge::{generate, list_templates, render_sitemap, validate, CliError, Policy};

#[derive(Parser)]
#[command(name = "robots-forge")]
#[command(about = "Generate and validate robots.txt files")]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored diagnostics
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a robots.txt file (reads from stdin if not provided)
    Validate {
        input: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a robots.txt generated from a crawl policy
    Generate {
        /// Policy file (TOML); the platform default policy if omitted
        #[arg(short, long)]
        policy: Option<PathBuf>,
    },

    /// List the built-in templates, or print one by name or slug
    Templates {
        name: Option<String>,

        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a sitemap.xml built from page records
    Sitemap {
        /// Page records file (TOML with [[pages]] tables)
        pages: PathBuf,

        /// Origin prepended to page paths without a canonical URL
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    // A subscriber can only be installed once; ignore a second attempt.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let mut stdout = io::stdout().lock();
    match &cli.command {
        Command::Validate { input, json } => {
            if needs_usage(input.as_deref(), io::stdin().is_terminal()) {
                print_validate_usage();
                return Ok(ExitCode::SUCCESS);
            }
            let (source, filename) = read_input(input.as_deref())?;
            let result = validate(&source);
            info!(
                file = %filename,
                errors = result.errors().len(),
                warnings = result.warnings().len(),
                "validated"
            );

            if *json {
                serde_json::to_writer_pretty(&mut stdout, &result)?;
                writeln!(stdout)?;
            } else {
                let color = use_color(cli.no_color);
                write!(stdout, "{}", result.format(&source, &filename, color))?;
                writeln!(
                    stdout,
                    "{}: {} ({} error(s), {} warning(s))",
                    filename,
                    if result.is_valid() { "valid" } else { "invalid" },
                    result.errors().len(),
                    result.warnings().len()
                )?;
            }

            Ok(if result.is_valid() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Generate { policy } => {
            let policy = match policy {
                Some(path) => {
                    debug!(path = %path.display(), "loading policy");
                    Policy::from_file(path)?
                }
                None => Policy::default(),
            };
            write!(stdout, "{}", generate(&policy))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Templates { name, json } => {
            match (name.as_deref(), *json) {
                (Some(name), false) => {
                    let template = get_template(name)?;
                    write!(stdout, "{}", template.content)?;
                }
                (Some(name), true) => {
                    serde_json::to_writer_pretty(&mut stdout, get_template(name)?)?;
                    writeln!(stdout)?;
                }
                (None, true) => {
                    serde_json::to_writer_pretty(&mut stdout, list_templates())?;
                    writeln!(stdout)?;
                }
                (None, false) => {
                    for template in list_templates() {
                        writeln!(
                            stdout,
                            "{:<22} {:<22} {}",
                            template.slug, template.name, template.description
                        )?;
                    }
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Sitemap { pages, base_url } => {
            debug!(path = %pages.display(), "loading page records");
            let records = load_pages(pages)?;
            let active = records.iter().filter(|p| p.active).count();
            info!(total = records.len(), active, "rendering sitemap");
            write!(stdout, "{}", render_sitemap(base_url, &records))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// With no file and an interactive stdin there is nothing to read
fn needs_usage(input: Option<&Path>, stdin_is_terminal: bool) -> bool {
    input.is_none() && stdin_is_terminal
}

fn print_validate_usage() {
    println!(
        r#"Validate a robots.txt file and report errors and warnings.

USAGE:
    robots-forge validate [OPTIONS] [FILE]
    cat robots.txt | robots-forge validate

OPTIONS:
    --json         Print the result as JSON
    --no-color     Disable colored diagnostics
    -v, --verbose  Show debug logging on stderr"#
    );
}

/// Read the document from a file, or from stdin when no file is given
fn read_input(path: Option<&Path>) -> Result<(String, String), CliError> {
    match path {
        Some(path) => {
            let bytes = fs::read(path).map_err(|source| CliError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;
            debug!(path = %path.display(), bytes = bytes.len(), "read input file");
            Ok((decode(bytes), path.display().to_string()))
        }
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .map_err(CliError::ReadStdin)?;
            debug!(bytes = buffer.len(), "read input from stdin");
            Ok((decode(buffer), "<stdin>".to_string()))
        }
    }
}

/// Input is validated as text even when it is not UTF-8
fn decode(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| {
        warn!("input is not valid UTF-8, invalid bytes replaced");
        String::from_utf8_lossy(e.as_bytes()).into_owned()
    })
}

fn use_color(no_color: bool) -> bool {
    !no_color && std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal()
}
