//! reqforge CLI - Turn requirement text into modules, schemas and pseudocode
//!
//! Usage:
//!   reqforge analyze [FILE] [--text <text>] [--format json|text|sql] [--dialect <dialect>]
//!   reqforge modules [--config <path>]
//!
//! Examples:
//!   reqforge analyze requirements.txt --format text
//!   reqforge analyze --text "Users place orders. Each order has many items." --format sql
//!   cat requirements.txt | reqforge analyze --dialect mysql --format sql

use clap::{Parser, Subcommand, ValueEnum};
use reqforge::config::{Settings, SettingsError};
use reqforge::dictionary::Dictionary;
use reqforge::sql::{render_schema, Dialect};
use reqforge::{AnalysisResult, AnalyzeOptions, Analyzer, ModuleTag};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reqforge")]
#[command(about = "reqforge - Rule-based requirements analyzer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze requirement text
    Analyze {
        /// Path to a requirements file (reads stdin if neither FILE nor --text is given)
        file: Option<PathBuf>,

        /// Requirement text given inline
        #[arg(short, long, conflicts_with = "file")]
        text: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: Format,

        /// SQL dialect for `--format sql` (defaults to the configured dialect)
        #[arg(short, long)]
        dialect: Option<DialectArg>,

        /// Path to a reqforge.toml settings file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List module tags and their keywords, including configured ones
    Modules {
        /// Path to a reqforge.toml settings file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, ValueEnum)]
enum DialectArg {
    Postgres,
    Mysql,
    Sqlite,
    Duckdb,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Postgres => Dialect::Postgres,
            DialectArg::Mysql => Dialect::MySql,
            DialectArg::Sqlite => Dialect::Sqlite,
            DialectArg::Duckdb => Dialect::DuckDb,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum Format {
    /// Full result as pretty-printed JSON
    Json,
    /// Human-readable report
    Text,
    /// CREATE TABLE statements only
    Sql,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            file,
            text,
            format,
            dialect,
            config,
        } => cmd_analyze(file, text, format, dialect, config),
        Commands::Modules { config } => cmd_modules(config),
    }
}

/// Settings from `--config` or the usual lookup, and an analyzer built from them.
fn load_analyzer(config: Option<PathBuf>) -> Result<(Settings, Analyzer), SettingsError> {
    let settings = match config {
        Some(path) => Settings::from_file(&path)?,
        None => Settings::load()?,
    };
    let analyzer = Analyzer::from_settings(&settings)?;
    Ok((settings, analyzer))
}

fn cmd_analyze(
    file: Option<PathBuf>,
    text: Option<String>,
    format: Format,
    dialect: Option<DialectArg>,
    config: Option<PathBuf>,
) -> ExitCode {
    let (settings, analyzer) = match load_analyzer(config) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let source = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        (None, None) => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                eprintln!("Error reading stdin: {}", e);
                return ExitCode::FAILURE;
            }
            buf
        }
    };

    let result = match analyzer.analyze(&source, &AnalyzeOptions::default()) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Input error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let dialect = dialect.map(Dialect::from).unwrap_or(settings.output.dialect);

    match format {
        Format::Json => match result.to_json_pretty() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Serialization error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        Format::Text => print_report(&result, dialect),
        Format::Sql => {
            if result.tables.is_empty() {
                println!("-- No entities detected; no tables generated");
            } else {
                println!("{}", render_schema(&result.tables, dialect));
            }
        }
    }

    ExitCode::SUCCESS
}

fn print_report(result: &AnalysisResult, dialect: Dialect) {
    for warning in &result.warnings {
        println!("Warning: {}", warning);
    }
    if !result.warnings.is_empty() {
        println!();
    }

    println!("Modules ({}):", result.modules.len());
    for module in &result.modules {
        let keywords: Vec<&str> = module.matched_keywords.iter().map(String::as_str).collect();
        println!("  {} [{}]", module.display_name, keywords.join(", "));
    }
    println!();

    println!("Entities ({}):", result.entities.len());
    for entity in &result.entities {
        println!("  {} ({} mentions)", entity.name, entity.mention_count);
    }
    println!();

    if !result.relationships.is_empty() {
        println!("Relationships ({}):", result.relationships.len());
        for rel in &result.relationships {
            println!(
                "  {} -> {} [{}] confidence {:.2} ({})",
                rel.from_entity, rel.to_entity, rel.cardinality, rel.confidence, rel.evidence
            );
        }
        println!();
    }

    if !result.tables.is_empty() {
        println!("Schema ({}):", dialect);
        println!("{}", render_schema(&result.tables, dialect));
        println!();
    }

    if !result.pseudocode.is_empty() {
        println!("Pseudocode ({} functions):", result.pseudocode.len());
        for function in &result.pseudocode {
            println!("{}", function.render());
            println!();
        }
    }

    println!("Architecture:");
    for layer in &result.architecture {
        println!("  {}: {}", layer.name, layer.recommended_technologies.join(", "));
        println!("    {}", layer.rationale);
        for consideration in &layer.considerations {
            println!("    - {}", consideration);
        }
    }
    println!();
    println!("Powered by: {}", result.powered_by);
}

fn cmd_modules(config: Option<PathBuf>) -> ExitCode {
    let analyzer = match load_analyzer(config) {
        Ok((_, analyzer)) => analyzer,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    print!("{}", module_listing(analyzer.dictionary()));
    ExitCode::SUCCESS
}

fn module_listing(dictionary: &Dictionary) -> String {
    let mut out = String::new();
    for tag in ModuleTag::ALL {
        out.push_str(&format!("{} ({})\n", tag, tag.display_name()));
        out.push_str(&format!("  {}\n", dictionary.module_keywords(tag).join(", ")));
    }
    out
}
