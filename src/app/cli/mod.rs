//! CLI Adapter.

mod output;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dialoguer::Input;

use crate::app::{api, logging};
use crate::domain::data_source::DATA_SOURCE_NAME;
use crate::domain::{AppError, LookupInput, ReadOutcome};

pub use output::{OutputFormat, render_state};

/// Exit status when the account does not exist.
pub const EXIT_GONE: i32 = 2;

#[derive(Parser)]
#[command(name = "sa-lookup")]
#[command(version)]
#[command(about = "Look up a Google Cloud service account by account id or link", long_about = None)]
struct Cli {
    /// Provider config file (defaults to ./sa-lookup.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read the google_service_account data source
    #[clap(visible_alias = "r")]
    Read(ReadArgs),
    /// Print the data source schema as JSON
    Schema,
}

#[derive(Args)]
struct ReadArgs {
    /// Short account id (the part before '@'), expanded with the project
    #[arg(short, long, conflicts_with = "service_account_id")]
    account_id: Option<String>,
    /// Fully-qualified link: projects/{project}/serviceAccounts/{email}
    #[arg(short, long)]
    service_account_id: Option<String>,
    /// Project used to expand an account id
    #[arg(short, long)]
    project: Option<String>,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result: Result<i32, AppError> = match cli.command {
        Commands::Read(args) => run_read(args, cli.config),
        Commands::Schema => run_schema().map(|_| 0),
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_read(args: ReadArgs, config: Option<PathBuf>) -> Result<i32, AppError> {
    let input = resolve_read_input(
        args.account_id,
        args.service_account_id,
        args.project,
        std::io::stdin().is_terminal(),
        prompt_account_id,
    )?;

    // The gone warning is logged by the read command.
    match api::read(&input, config)? {
        ReadOutcome::Found(state) => {
            println!("{}", render_state(&state, args.format)?);
            Ok(0)
        }
        ReadOutcome::Gone { .. } => Ok(EXIT_GONE),
    }
}

fn run_schema() -> Result<(), AppError> {
    println!("{}", output::render_json(&api::schema(), OutputFormat::Json)?);
    Ok(())
}

/// Build the lookup input, prompting for an account id when neither selector
/// was given and `interactive` is set. An empty answer leaves both unset, so the
/// read reports the missing selector.
fn resolve_read_input<P>(
    account_id: Option<String>,
    service_account_id: Option<String>,
    project: Option<String>,
    interactive: bool,
    prompt: P,
) -> Result<LookupInput, AppError>
where
    P: FnOnce() -> Result<Option<String>, AppError>,
{
    let account_id = match (account_id, &service_account_id) {
        (None, None) if interactive => prompt()?,
        (value, _) => value,
    };

    Ok(LookupInput { account_id, service_account_id, project })
}

fn prompt_account_id() -> Result<Option<String>, AppError> {
    let value: String = Input::new()
        .with_prompt(format!("{} account_id", DATA_SOURCE_NAME))
        .allow_empty(true)
        .interact_text()
        .map_err(|err| AppError::config_error(format!("Failed to read account id: {}", err)))?;

    let trimmed = value.trim();
    if trimmed.is_empty() { Ok(None) } else { Ok(Some(trimmed.to_string())) }
}
