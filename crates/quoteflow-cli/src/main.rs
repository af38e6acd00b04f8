//! Quoteflow CLI: run data-driven insurance quote journeys
//!
//! ## Usage
//!
//! ```bash
//! quoteflow init                      # Write quoteflow.yaml and quote.csv
//! quoteflow check-data -d quote.csv   # Verify every field is present
//! quoteflow steps                     # List the journey steps
//! quoteflow run --headed              # Run the journey in chromium
//! quoteflow run --simulate            # Run against the simulated site
//! ```

use clap::Parser;
use quoteflow::{rehearse, sample_sheet, DataTable, Field, QuotePages, TestData};
use quoteflow_cli::{
    init_logging, run_configured, step_line, CheckDataArgs, Cli, CliError, CliResult,
    ColorChoice, Commands, ConfigArgs, ConsoleReporter, InitArgs, RunArgs, RunConfig,
    DEFAULT_CONFIG_FILE,
};
use std::process::ExitCode;
use std::time::Duration;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let verbosity = cli.verbosity();
    init_logging(verbosity, cli.log_format);
    let use_color = ColorChoice::from(cli.color).should_color();
    console::set_colors_enabled(use_color);
    let reporter = ConsoleReporter::new(use_color, verbosity.is_quiet());

    match cli.command {
        Commands::Run(args) => run_journey(&args, &reporter),
        Commands::CheckData(args) => run_check_data(&args, &reporter),
        Commands::Steps => run_steps(),
        Commands::Init(args) => run_init(&args, &reporter),
        Commands::Config(args) => run_config(&args),
    }
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::config(format!("Failed to create runtime: {e}")))
}

/// Config file values with the run flags applied on top
fn build_run_config(args: &RunArgs) -> CliResult<RunConfig> {
    let mut config = RunConfig::discover(args.source.config.as_deref())?;
    if let Some(data) = &args.data {
        config = config.with_data(data);
    }
    if let Some(output) = &args.output {
        config = config.with_output_dir(output);
    }
    if args.headed {
        config = config.with_headed(true);
    }
    if let Some(path) = &args.chromium_path {
        config = config.with_chromium_path(path);
    }
    if args.no_sandbox {
        config = config.with_no_sandbox();
    }
    if let Some(ms) = args.element_timeout_ms {
        if ms == 0 {
            return Err(CliError::invalid_argument(
                "--element-timeout-ms must be greater than zero",
            ));
        }
        config = config.with_element_timeout(Duration::from_millis(ms));
    }
    if args.no_screenshot {
        config = config.with_screenshot_on_failure(false);
    }
    Ok(config)
}

fn run_journey(args: &RunArgs, reporter: &ConsoleReporter) -> CliResult<()> {
    let config = build_run_config(args)?;
    reporter.header(&config.story);
    reporter.info(&format!("Data: {}", config.data.display()));
    if args.simulate {
        reporter.info("Target: simulated site");
    }

    let report = runtime()?.block_on(run_configured(&config, args.simulate))?;

    for step in &report.steps {
        reporter.step(step);
    }
    reporter.summary(&report);
    reporter.info(&format!("Report: {}", config.report_path().display()));
    if let Some(screenshot) = &report.screenshot {
        reporter.info(&format!("Screenshot: {}", config.output_dir.join(screenshot).display()));
    }

    if report.is_passed() {
        return Ok(());
    }
    Err(CliError::JourneyFailed {
        state: report
            .final_state
            .map_or_else(|| "session".to_string(), |s| s.to_string()),
        message: report.error.unwrap_or_else(|| "journey did not finish".to_string()),
    })
}

fn run_check_data(args: &CheckDataArgs, reporter: &ConsoleReporter) -> CliResult<()> {
    let config = RunConfig::discover(args.source.config.as_deref())?;
    let path = args.data.clone().unwrap_or(config.data);
    let table = DataTable::open(&path)?;
    // Surface an unreadable file as itself rather than as 26 missing fields.
    table.sheet()?;

    let missing = TestData::new(&table).missing_fields();
    if missing.is_empty() {
        reporter.success(&format!(
            "All {} fields present in {}",
            Field::ALL.len(),
            path.display()
        ));
        return Ok(());
    }

    for field in &missing {
        reporter.failure(&format!("{field} is missing or empty"));
    }
    Err(CliError::DataIncomplete {
        fields: missing
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    })
}

fn run_steps() -> CliResult<()> {
    let pages = QuotePages::new();
    let report = runtime()?.block_on(rehearse(&pages));

    println!("{}", report.story);
    for step in &report.steps {
        println!("  {}", step_line(step));
    }
    println!("{} steps", report.steps.len());
    Ok(())
}

fn run_init(args: &InitArgs, reporter: &ConsoleReporter) -> CliResult<()> {
    let config_path = args.path.join(DEFAULT_CONFIG_FILE);
    let data_path = args.path.join("quote.csv");
    for path in [&config_path, &data_path] {
        if path.exists() && !args.force {
            return Err(CliError::invalid_argument(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }
    }

    std::fs::create_dir_all(&args.path)?;
    std::fs::write(&config_path, RunConfig::new().to_yaml()?)?;
    std::fs::write(&data_path, sample_sheet().to_csv()?)?;

    reporter.success(&format!("Wrote {}", config_path.display()));
    reporter.success(&format!("Wrote {}", data_path.display()));
    Ok(())
}

fn run_config(args: &ConfigArgs) -> CliResult<()> {
    let config = RunConfig::discover(args.source.config.as_deref())?;
    print!("{}", config.to_yaml()?);
    Ok(())
}
