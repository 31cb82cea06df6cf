use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::Parser;
use daybook::core::config::{self, CliOverrides, Environment, Theme};
use daybook::core::notes::DATE_FORMAT;
use daybook::error::AppError;
use daybook::{logging, tui};

#[derive(Parser)]
#[command(name = "daybook", about = "Terminal viewer for daily notes")]
struct Args {
    /// Day to open first (YYYY-MM-DD); defaults to today
    #[arg(short, long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Editor command, overrides $EDITOR and the config file
    #[arg(short, long)]
    editor: Option<String>,

    /// Show notes as plain text instead of rendered markdown
    #[arg(long)]
    raw: bool,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<Theme>,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD ({e})"))
}

fn main() -> ExitCode {
    let args = Args::parse();

    match start(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("daybook: {e}");
            ExitCode::FAILURE
        }
    }
}

fn start(args: Args) -> Result<(), AppError> {
    let env = Environment::capture();
    let dir = config::config_dir(&env)?;

    logging::init(&dir);
    let file_config = config::load_config(&dir)?;
    let cli = CliOverrides {
        editor: args.editor,
        raw: args.raw,
        theme: args.theme,
    };
    let resolved = config::resolve(&file_config, &env, &cli)?;
    logging::set_level(resolved.log_level);

    let start = args.date.unwrap_or_else(|| Local::now().date_naive());
    log::info!("Daybook starting up on {}", start);
    log::debug!("Resolved config: {:?}", resolved);

    tui::run(&resolved, start)
}
