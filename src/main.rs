use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use roster_tools::config::{DEFAULT_JOINED_OUTPUT, DEFAULT_RETIRED_OUTPUT, MIN_PASSWORD_LENGTH};
use roster_tools::model::RunSummary;
use roster_tools::{NamePolicy, Result, RunConfig, ToolError, provision, sync};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    if let Some(program) = &cli.provisioner {
        provision::ensure_available(program)?;
    }

    let summary = sync::run(&cli.to_config())?;
    report(&summary, cli.json)?;

    if let Some(program) = &cli.provisioner {
        provision::invoke(program, &summary.joined_path)?;
    }
    Ok(())
}

fn report(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        println!(
            "{} joined -> {}, {} retired -> {} ({} old, {} new)",
            summary.joined,
            summary.joined_path.display(),
            summary.retired,
            summary.retired_path.display(),
            summary.old_count,
            summary.new_count,
        );
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Compare two roster sheets and produce joined/retired user tables.",
    after_help = "Example: roster-tools ito-rosters.xlsx \"Roster S22\" \"Roster F22\""
)]
struct Cli {
    /// Workbook holding both roster sheets.
    workbook: PathBuf,

    /// Sheet with the previous roster.
    old_sheet: String,

    /// Sheet with the current roster.
    new_sheet: String,

    /// Where to write the joined-users table.
    #[arg(long, default_value = DEFAULT_JOINED_OUTPUT)]
    joined_output: PathBuf,

    /// Where to write the retired-users table.
    #[arg(long, default_value = DEFAULT_RETIRED_OUTPUT)]
    retired_output: PathBuf,

    /// Length of generated temporary passwords.
    #[arg(long, default_value_t = MIN_PASSWORD_LENGTH)]
    password_length: usize,

    /// Leave the TempPassword column empty.
    #[arg(long)]
    no_credentials: bool,

    /// Locate columns by name instead of requiring the exact header row.
    #[arg(long)]
    skip_schema_check: bool,

    /// How names with other than two words are handled.
    #[arg(long, value_enum, default_value_t = NamePolicyArg::Strict)]
    name_policy: NamePolicyArg,

    /// Program to run with the joined-users table once both tables are written.
    #[arg(long)]
    provisioner: Option<PathBuf>,

    /// Print the run summary as JSON.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn to_config(&self) -> RunConfig {
        RunConfig::new(&self.workbook, &self.old_sheet, &self.new_sheet)
            .with_outputs(&self.joined_output, &self.retired_output)
            .with_password_length(self.password_length)
            .with_credentials(!self.no_credentials)
            .with_schema_validation(!self.skip_schema_check)
            .with_name_policy(self.name_policy.into())
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum NamePolicyArg {
    Strict,
    Remainder,
}

impl From<NamePolicyArg> for NamePolicy {
    fn from(arg: NamePolicyArg) -> Self {
        match arg {
            NamePolicyArg::Strict => NamePolicy::Strict,
            NamePolicyArg::Remainder => NamePolicy::Remainder,
        }
    }
}
