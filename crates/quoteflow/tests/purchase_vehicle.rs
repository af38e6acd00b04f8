//! Purchase Vehicle story against the simulated quote site
//!
//! Runs the whole journey end to end with the reference data row, loaded
//! both from memory and from a CSV file on disk.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use quoteflow::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Write the reference row to a temporary CSV file
fn reference_csv() -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("temp file");
    file.write_all(sample_sheet().to_csv().unwrap().as_bytes())
        .unwrap();
    file
}

// ============================================================================
// Happy path
// ============================================================================

#[tokio::test]
async fn test_reference_row_reaches_done() {
    let pages = QuotePages::new();
    let table = DataTable::from_sheet(sample_sheet());
    let mut report = RunReport::new();

    let state = purchase_vehicle(
        &SimulatedSession::new(),
        &pages,
        TestData::new(&table),
        &mut report,
    )
    .await
    .expect("journey should pass");

    assert_eq!(state, JourneyState::Done);
    assert_eq!(report.story, "Purchase Vehicle");
    assert!(report.is_passed());
    assert!(report.failed_step().is_none());
}

#[tokio::test]
async fn test_reference_csv_reaches_done() {
    let file = reference_csv();
    let table = DataTable::open(file.path()).unwrap();
    assert!(!table.is_loaded());

    let pages = QuotePages::new();
    let mut report = RunReport::new();
    let state = purchase_vehicle(
        &SimulatedSession::new(),
        &pages,
        TestData::new(&table),
        &mut report,
    )
    .await
    .unwrap();

    assert_eq!(state, JourneyState::Done);
    assert!(table.is_loaded());
}

#[tokio::test]
async fn test_form_holds_data_values_after_run() {
    let pages = QuotePages::new();
    let table = DataTable::from_sheet(sample_sheet());
    let mut driver = simulated_site(&pages);
    let mut report = RunReport::new();

    QuoteJourney::new(&pages, TestData::new(&table))
        .run(&mut driver, &mut report)
        .await
        .unwrap();

    let value = |label: &str| {
        let control = pages
            .controls()
            .into_iter()
            .find(|c| c.label() == label)
            .unwrap_or_else(|| panic!("no control labelled {label}"));
        let element = driver.element(control.control().selector()).unwrap();
        element.selected.unwrap_or(element.value)
    };

    assert_eq!(value("Make"), "Honda");
    assert_eq!(value("Date of Manufacture"), "06/15/2018");
    assert_eq!(value("Number of Seats"), "5");
    assert_eq!(value("Country"), "Germany");
    assert_eq!(value("City"), "Berlin");
    assert_eq!(value("Courtesy Car"), "Yes");
    assert_eq!(value("E-mail"), "jane@example.test");
    assert_eq!(value("Confirm Password"), "Secret123!");
}

#[tokio::test]
async fn test_run_leaves_session_open_and_confirms_last() {
    let pages = QuotePages::new();
    let table = DataTable::from_sheet(sample_sheet());
    let mut driver = simulated_site(&pages);
    let mut report = RunReport::new();

    QuoteJourney::new(&pages, TestData::new(&table))
        .run(&mut driver, &mut report)
        .await
        .unwrap();
    assert!(!driver.is_closed());

    let history = driver.history();
    let send = history.iter().position(|h| h.starts_with("click:") && h.contains("sendemail"));
    let confirm = history.iter().position(|h| h == "click:css=button.confirm");
    assert!(send.unwrap() < confirm.unwrap());
}

// ============================================================================
// Fail fast
// ============================================================================

#[tokio::test]
async fn test_missing_first_name_column_stops_run() {
    let sample = sample_sheet();
    let mut headers = Vec::new();
    let mut values = Vec::new();
    for header in sample.headers().iter().filter(|h| *h != "FirstName") {
        headers.push(header.clone());
        values.push(sample.cell_value(header, DATA_ROW).unwrap());
    }
    let table = DataTable::from_sheet(Sheet::from_rows(vec![headers, values]));

    let pages = QuotePages::new();
    let mut report = RunReport::new();
    let err = purchase_vehicle(
        &SimulatedSession::new(),
        &pages,
        TestData::new(&table),
        &mut report,
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind(), QuoteErrorKind::ColumnNotFound);
    assert!(err.to_string().contains("FirstName"));
    assert_eq!(report.final_state, Some(JourneyState::InsurantData));
    assert!(report
        .steps
        .iter()
        .all(|s| matches!(
            s.state,
            JourneyState::Home
                | JourneyState::AutoInsuranceNav
                | JourneyState::VehicleData
                | JourneyState::InsurantData
        )));
}

#[tokio::test]
async fn test_unreadable_source_fails_on_first_lookup() {
    let table = DataTable::open("/nonexistent/quote-data.csv").unwrap();
    let pages = QuotePages::new();
    let mut report = RunReport::new();

    let err = purchase_vehicle(
        &SimulatedSession::new(),
        &pages,
        TestData::new(&table),
        &mut report,
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind(), QuoteErrorKind::SourceUnreadable);
    assert!(err.to_string().contains("quote-data.csv"));
    assert_eq!(report.final_state, Some(JourneyState::Home));
}
