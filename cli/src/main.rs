use std::path::{Path, PathBuf};

use argscan_core::{ParserConfig, PassThrough, ValueStore, validate_schema};
use argscan_parser::Parser as ArgParser;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

/// CLI-specific policy enum; overrides the policy stored in the config.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliPolicy {
    Default,
    PassDoubleDash,
    PassAfterNonOption,
}

impl From<CliPolicy> for PassThrough {
    fn from(policy: CliPolicy) -> Self {
        match policy {
            CliPolicy::Default => Self::Default,
            CliPolicy::PassDoubleDash => Self::PassDoubleDash,
            CliPolicy::PassAfterNonOption => Self::PassAfterNonOption,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "argscan")]
#[command(about = "Scan argument lists against an option schema")]
struct Cli {
    /// Enable debug logging on stderr.
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse tokens against a schema config and print the bound values.
    Parse(ParseArgs),
    /// Validate one or more schema config files.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Schema config file (YAML, or JSON with a .json extension).
    #[arg(long)]
    config: PathBuf,
    /// Override the pass-through policy from the config.
    #[arg(long)]
    policy: Option<CliPolicy>,
    /// Output format (default: json).
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Tokens to parse. Put them after `--`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Schema config files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(serde::Serialize)]
struct ParseOutput<'a> {
    values: &'a ValueStore,
    leftover: &'a [String],
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Validate(args) => run_validate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(debug: bool) {
    let default = if debug {
        "argscan=debug,argscan_parser=debug"
    } else {
        "argscan=warn,argscan_parser=warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: &Path) -> Result<ParserConfig, String> {
    ParserConfig::load(path).map_err(|err| format!("Failed to load '{}': {err}", path.display()))
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let mut config = load_config(&args.config)?;
    if let Some(policy) = args.policy {
        config.policy = policy.into();
    }
    debug!(
        config = %args.config.display(),
        schema = %config.schema.name,
        policy = config.policy.as_str(),
        "Loaded config"
    );

    let parser = ArgParser::from_config(&config)
        .map_err(|err| format!("Invalid schema in '{}': {err}", args.config.display()))?;

    let mut values = ValueStore::new();
    let leftover = match parser.parse(args.tokens.as_slice(), &mut values) {
        Ok(leftover) => leftover,
        Err(failure) => {
            let leftover = serde_json::to_string(&failure.leftover)
                .map_err(|e| format!("Failed to serialize leftover: {e}"))?;
            return Err(format!("{}\nleftover: {leftover}", failure.error));
        }
    };

    let output = ParseOutput {
        values: &values,
        leftover: &leftover,
    };
    match args.format {
        CliOutputFormat::Json => {
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| format!("Failed to serialize output: {e}"))?;
            println!("{json}");
        }
        CliOutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&output)
                .map_err(|e| format!("Failed to serialize output: {e}"))?;
            print!("{yaml}");
        }
    }
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut invalid = 0usize;
    for path in &args.inputs {
        let errors = match load_config(path) {
            Ok(config) => validate_schema(&config.schema)
                .into_iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>(),
            Err(err) => vec![err],
        };

        if errors.is_empty() {
            println!("ok: {}", path.display());
        } else {
            invalid += 1;
            for err in errors {
                eprintln!("invalid: {}: {err}", path.display());
            }
        }
    }

    info!(files = args.inputs.len(), invalid, "Validated configs");
    if invalid > 0 {
        return Err(format!("{invalid} of {} config(s) invalid", args.inputs.len()));
    }
    Ok(())
}
