//! Schema Records CLI
//!
//! Generates record declarations from a JSON Schema file, checks previously
//! generated output for drift, and manages configuration.
//!
//! Usage:
//!   schema-records generate schema.json -o lib/dap.rb
//!   schema-records check schema.json -o lib/dap.rb
//!   schema-records config show

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use schema_records::{codegen, DriftReport, GeneratedOutput, RecordsConfig, SchemaDocument, Target};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-records")]
#[command(about = "Compile JSON Schema definitions into value-record declarations")]
#[command(version)]
struct Cli {
    /// Config file to load (optional)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate records and write them to a file or stdout
    Generate {
        /// JSON Schema file (default: [input] schema)
        schema: Option<PathBuf>,

        /// Output file (default: [output] path, then stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Record syntax (default: [output] target)
        #[arg(short, long, value_enum)]
        target: Option<Target>,
    },

    /// Fail if an existing output file differs from freshly generated records
    Check {
        /// JSON Schema file (default: [input] schema)
        schema: Option<PathBuf>,

        /// Previously generated file (default: [output] path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Record syntax (default: [output] target)
        #[arg(short, long, value_enum)]
        target: Option<Target>,
    },

    /// View and manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show {
        /// Output as TOML
        #[arg(long)]
        toml: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Initialize a new config file
    Init {
        /// Output path
        #[arg(short, long, default_value = "records.toml")]
        output: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let config = RecordsConfig::load_from(cli.config.as_deref()).context("failed to load configuration")?;

    match cli.command {
        Commands::Generate { schema, output, target } => {
            let schema = schema_path(schema, &config)?;
            let target = target.unwrap_or(config.output.target);
            let generated = generate_file(&schema, target)?;

            match output.or(config.output.path) {
                Some(path) => {
                    fs::write(&path, &generated.code)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!(
                        "✅ Wrote {} records to {} ({} skipped)",
                        generated.record_count,
                        path.display(),
                        generated.skipped.len()
                    );
                }
                None => print!("{}", generated.code),
            }
            Ok(0)
        }

        Commands::Check { schema, output, target } => {
            let schema = schema_path(schema, &config)?;
            let target = target.unwrap_or(config.output.target);
            let path = output
                .or(config.output.path)
                .context("no output file to check; pass --output or set [output] path")?;

            let generated = generate_file(&schema, target)?;
            let stored = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;

            let report = DriftReport::compare(&stored, &generated.code);
            if report.in_sync() {
                eprintln!("✅ {} is up to date ({})", path.display(), report.generated_checksum);
                return Ok(0);
            }

            eprintln!("❌ {} is out of date", path.display());
            eprintln!("   stored:    {}", report.stored_checksum);
            eprintln!("   generated: {}", report.generated_checksum);
            for line in &report.changes {
                println!("{}", line);
            }
            Ok(1)
        }

        Commands::Config { command } => {
            match command {
                ConfigCommands::Show { toml, json } => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&config)?);
                    } else if toml {
                        println!("{}", ::toml::to_string_pretty(&config)?);
                    } else {
                        println!("📋 Schema Records Configuration\n");
                        println!("Input:");
                        println!("  Schema: {:?}", config.input.schema);
                        println!("\nOutput:");
                        println!("  Path: {:?}", config.output.path);
                        println!("  Target: {}", config.output.target);
                    }
                }
                ConfigCommands::Init { output } => {
                    RecordsConfig::default()
                        .save(&output)
                        .with_context(|| format!("failed to write {}", output))?;
                    println!("✅ Created config file: {}", output);
                }
            }
            Ok(0)
        }
    }
}

fn schema_path(arg: Option<PathBuf>, config: &RecordsConfig) -> anyhow::Result<PathBuf> {
    arg.or_else(|| config.input.schema.clone())
        .context("no schema given; pass SCHEMA or set [input] schema")
}

fn generate_file(schema: &Path, target: Target) -> anyhow::Result<GeneratedOutput> {
    let document = SchemaDocument::from_path(schema)
        .with_context(|| format!("failed to load schema {}", schema.display()))?;
    Ok(codegen::generate(&document, target))
}
