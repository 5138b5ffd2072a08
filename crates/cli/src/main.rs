mod commands;

use std::path::{Path, PathBuf};
use std::process;

use bugs_core::{ParseError, Rule};
use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Bugs language front-end.
#[derive(Parser)]
#[command(name = "bugs", version, about = "Bugs language parser")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a .bugs file and report the first syntax error, if any
    Check {
        /// Path to the .bugs source file
        file: PathBuf,
        /// Grammar rule to parse instead of a whole program (e.g. expression, bug-definition)
        #[arg(long, value_parser = parse_rule_arg)]
        rule: Option<Rule>,
    },

    /// Print the token stream of a .bugs file
    Tokens {
        /// Path to the .bugs source file
        file: PathBuf,
    },
}

fn parse_rule_arg(s: &str) -> Result<Rule, String> {
    s.parse().map_err(|e: String| {
        let names: Vec<&str> = Rule::ALL.iter().map(|r| r.name()).collect();
        format!("{}. Valid: {}", e, names.join(", "))
    })
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file, rule } => {
            commands::check::cmd_check(&file, rule, cli.output, cli.quiet);
        }
        Commands::Tokens { file } => {
            commands::tokens::cmd_tokens(&file, cli.output, cli.quiet);
        }
    }
}

/// Read a source file or exit with an error.
pub(crate) fn read_source(path: &Path, output: OutputFormat, quiet: bool) -> String {
    match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}

pub(crate) fn report_parse_error(file: &Path, e: &ParseError, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => {
            let mut value = e.to_json_value();
            value["file"] = serde_json::json!(file.display().to_string());
            let err_json =
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| format!("{:?}", e));
            eprintln!("{}", err_json);
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("{}: {}", file.display(), e);
            }
        }
    }
}
