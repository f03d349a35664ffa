use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use tally_cli::config::paths::DATA_DIR_ENV;
use tally_cli::config::{Settings, TallyPaths};
use tally_cli::models::MatchMode;
use tally_cli::storage::Storage;
use tally_cli::workflow::{AuthWorkflow, ConsolePrompt, Flow, LedgerWorkflow, Termination};

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Terminal expense and income tracker",
    long_about = "Tally keeps a password-protected ledger of expenses and incomes \
                  for each user and shows the running balance after every change."
)]
struct Cli {
    /// Directory holding config.json and the data files
    #[arg(long, env = DATA_DIR_ENV, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// How descriptions are matched when adding or deleting entries
    #[arg(long, value_enum, value_name = "MODE")]
    match_mode: Option<MatchMode>,

    /// Increase log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tally_cli::logging::init(cli.verbose);

    match run(cli) {
        Ok(termination) => {
            println!("{}", termination);
            if termination.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<Termination> {
    let paths = match cli.data_dir {
        Some(dir) => TallyPaths::with_base_dir(dir),
        None => TallyPaths::new()?,
    };

    let settings = Settings::load_or_create(&paths)?;
    if !paths.settings_file().exists() {
        settings
            .save(&paths)
            .context("Failed to write default settings")?;
    }
    let mode = cli.match_mode.unwrap_or(settings.description_match);

    let storage = Storage::new(paths)?;
    tracing::debug!(base_dir = %storage.paths().base_dir().display(), ?mode, "starting");

    let mut prompt = ConsolePrompt::new();

    let session = match AuthWorkflow::new(&storage, &settings).run(&mut prompt)? {
        Flow::Continue(session) => session,
        Flow::Terminate(termination) => return Ok(termination),
    };

    let mut ledger = LedgerWorkflow::start(&storage, &settings, mode, &session, &mut prompt)?;
    Ok(ledger.run(&mut prompt)?)
}
