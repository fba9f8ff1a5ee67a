use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use chrono::NaiveDate;
use clap::Parser;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod badge;
mod controller;
mod domain;
mod inputter;
mod mock;
mod model;
mod pages;
mod record;
mod table;
mod ui;

use controller::Controller;
use domain::{DEFAULT_TODAY, ERPConfig, ERPError};
use model::{Model, Status};
use pages::{Page, Role};
use ui::DashboardUI;

#[derive(Parser, Debug)]
#[command(name = "erp-pro", version, about = "Terminal dashboard for ERP Pro business data")]
struct Args {
    /// Page shown at start
    #[arg(long, value_enum, default_value_t = Page::Dashboard)]
    page: Page,

    /// Rows per table page, overrides the per table default
    #[arg(long)]
    page_size: Option<usize>,

    #[arg(long, value_enum, default_value_t = Role::SuperAdmin)]
    role: Role,

    /// Start with a collapsed sidebar
    #[arg(long)]
    collapsed: bool,

    #[arg(long, default_value = "~/.erp-pro.log")]
    log_file: String,

    /// Event poll time in milliseconds
    #[arg(long, default_value_t = 100)]
    poll_ms: u64,

    /// Reference date for overdue tasks
    #[arg(long, default_value = DEFAULT_TODAY)]
    today: String,

    #[arg(long, default_value_t = 32)]
    max_column_width: usize,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let result = run(args);
    ratatui::restore();
    match result {
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn config_from_args(args: &Args) -> Result<ERPConfig, ERPError> {
    if args.page_size == Some(0) {
        return Err(ERPError::InvalidArgument("page size must be at least 1".into()));
    }
    let today = NaiveDate::parse_from_str(&args.today, "%Y-%m-%d")
        .map_err(|e| ERPError::InvalidArgument(format!("today {:?}: {e}", args.today)))?;
    let log_file = shellexpand::full(&args.log_file)
        .map_err(|e| ERPError::InvalidArgument(format!("log file {:?}: {e}", args.log_file)))?;

    Ok(ERPConfig {
        event_poll_time: args.poll_ms,
        page_size: args.page_size,
        start_page: args.page,
        role: args.role,
        sidebar_collapsed: args.collapsed,
        today,
        max_column_width: args.max_column_width,
        log_file: PathBuf::from(log_file.as_ref()),
    })
}

fn init_logging(config: &ERPConfig) -> Result<(), ERPError> {
    let file = File::create(&config.log_file)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(ErrorLayer::default())
        .try_init()
        .map_err(|e| ERPError::LoggingFailed(e.to_string()))
}

fn run(args: Args) -> Result<(), ERPError> {
    let config = config_from_args(&args)?;
    init_logging(&config)?;
    info!("Starting erp-pro with {:?}", config);

    let mut model = Model::init(&config);
    let ui = DashboardUI::new(model.config());
    let controller = Controller::new(&config);

    let mut terminal = ratatui::init();

    while model.status != Status::QUITTING {
        // Render the current view
        terminal.draw(|f| ui.draw(&model, f))?;

        // Handle events and map to a Message
        let message = controller.handle_event(&model)?;
        model.update(message)?;
    }

    info!("Bye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("erp-pro").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let config = config_from_args(&parse(&[])).unwrap();
        assert_eq!(config.start_page, Page::Dashboard);
        assert_eq!(config.role, Role::SuperAdmin);
        assert_eq!(config.page_size, None);
        assert_eq!(config.today, NaiveDate::from_ymd_opt(2024, 1, 26).unwrap());
    }

    #[test]
    fn flags_map_to_config() {
        let args = parse(&[
            "--page",
            "real-estate",
            "--role",
            "hr-manager",
            "--page-size",
            "3",
            "--collapsed",
            "--today",
            "2024-03-01",
            "--log-file",
            "/tmp/erp.log",
        ]);
        let config = config_from_args(&args).unwrap();
        assert_eq!(config.start_page, Page::RealEstate);
        assert_eq!(config.role, Role::HrManager);
        assert_eq!(config.page_size, Some(3));
        assert!(config.sidebar_collapsed);
        assert_eq!(config.log_file, PathBuf::from("/tmp/erp.log"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            config_from_args(&parse(&["--page-size", "0"])),
            Err(ERPError::InvalidArgument(_))
        ));
        assert!(matches!(
            config_from_args(&parse(&["--today", "26.01.2024"])),
            Err(ERPError::InvalidArgument(_))
        ));
        let argv = ["erp-pro", "--page", "warehouse"];
        assert!(Args::try_parse_from(argv).is_err());
    }
}
