//! Journey runner with report and failure artifacts

use crate::config::RunConfig;
#[cfg(not(feature = "browser"))]
use crate::error::CliError;
use crate::error::CliResult;
use quoteflow::{
    DataTable, FormDriver, JourneyState, QuoteJourney, QuotePages, RunReport, SessionProvider,
    SimulatedSession, StoryLog, TestData,
};
use std::time::Instant;

/// Run the journey in a session from `provider`
///
/// Unlike [`quoteflow::purchase_vehicle`], the session stays open after a
/// failed step long enough to capture a screenshot. The report is written
/// to [`RunConfig::report_path`] whether or not the journey passes.
///
/// # Errors
///
/// Returns an error only when the data file type is unsupported or the
/// report cannot be written. Journey failures live in the report.
pub async fn run_journey<P: SessionProvider>(
    provider: &P,
    config: &RunConfig,
) -> CliResult<RunReport> {
    let table = DataTable::open(&config.data)?;
    let pages = QuotePages::new();
    let mut report = RunReport::new();
    report.set_story_name(&config.story);
    std::fs::create_dir_all(&config.output_dir)?;

    let started = Instant::now();
    match provider.open_session().await {
        Ok(mut driver) => {
            let result = QuoteJourney::new(&pages, TestData::new(&table))
                .run(&mut driver, &mut report)
                .await;
            if result.is_err() && config.screenshot_on_failure {
                capture_failure(&driver, config, &mut report).await;
            }
            if let Err(e) = driver.close().await {
                tracing::warn!(error = %e, "failed to close session");
            }
        }
        Err(e) => report.on_finish(JourneyState::Home, Some(&e)),
    }
    report.set_duration(started.elapsed());

    let path = config.report_path();
    report.save(&path)?;
    tracing::info!(path = %path.display(), passed = report.is_passed(), "report written");
    Ok(report)
}

/// Write a screenshot of the failed page next to the report
async fn capture_failure(driver: &dyn FormDriver, config: &RunConfig, report: &mut RunReport) {
    let path = config.screenshot_path();
    let written = match driver.screenshot().await {
        Ok(png) => std::fs::write(&path, png).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };
    match written {
        Ok(()) => {
            report.screenshot = path.file_name().map(|n| n.to_string_lossy().into_owned());
            tracing::info!(path = %path.display(), "failure screenshot written");
        }
        Err(e) => tracing::warn!(error = %e, "failure screenshot skipped"),
    }
}

/// Run against the simulated site or a real browser
///
/// # Errors
///
/// See [`run_journey`]; also fails when a browser run is requested in a
/// build without browser support.
pub async fn run_configured(config: &RunConfig, simulate: bool) -> CliResult<RunReport> {
    if simulate {
        return run_journey(&SimulatedSession::new(), config).await;
    }
    run_in_browser(config).await
}

#[cfg(feature = "browser")]
async fn run_in_browser(config: &RunConfig) -> CliResult<RunReport> {
    let session = quoteflow::ChromiumSession::new(config.driver.clone());
    run_journey(&session, config).await
}

#[cfg(not(feature = "browser"))]
#[allow(clippy::unused_async)]
async fn run_in_browser(_config: &RunConfig) -> CliResult<RunReport> {
    Err(CliError::config(
        "browser support not enabled. Rebuild with --features browser",
    ))
}
