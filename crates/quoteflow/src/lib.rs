//! Quoteflow: data-driven page-object journeys for insurance quote forms
//!
//! A journey reads its field values from a spreadsheet, drives the quote
//! form section by section through typed controls, and reports every step.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────┐    ┌───────────┐    ┌───────────┐    ┌───────────┐    ┌──────────┐
//! │ DataTable │───►│   flow    │───►│   pages   │───►│  control  │───►│FormDriver│
//! │ (csv/xls) │    │ (journey) │    │ (sections)│    │ (typed)   │    │(chromium)│
//! └───────────┘    └─────┬─────┘    └───────────┘    └───────────┘    └──────────┘
//!                        │
//!                        ▼
//!                  ┌───────────┐
//!                  │ StoryLog  │  tracing / RunReport
//!                  └───────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! # async fn demo() -> quoteflow::QuoteResult<()> {
//! use quoteflow::{purchase_vehicle, DataTable, QuotePages, RunReport, SimulatedSession, TestData};
//!
//! let table = DataTable::open("quote.csv")?;
//! let pages = QuotePages::new();
//! let mut report = RunReport::new();
//! purchase_vehicle(&SimulatedSession::new(), &pages, TestData::new(&table), &mut report).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

#[cfg(feature = "browser")]
mod browser;
mod control;
#[allow(clippy::missing_errors_doc)]
mod data;
#[allow(clippy::missing_errors_doc)]
mod driver;
mod fields;
mod flow;
mod locator;
#[allow(clippy::missing_errors_doc)]
mod pages;
mod reporter;
mod result;

#[cfg(feature = "browser")]
pub use browser::{ChromiumDriver, ChromiumSession};
pub use control::{
    AsControl, Button, CheckBox, Clickable, ControlKind, Displayable, Element, LocatedControl,
    Link, ListBox, RadioButton, Selectable, TextBox, Typeable,
};
#[cfg(feature = "workbook")]
pub use data::WorkbookReader;
pub use data::{reader_for_path, CsvReader, DataTable, Sheet, SheetReader};
pub use driver::{
    DriverConfig, ElementHandle, FormDriver, MockDriver, MockElement, SessionProvider,
};
pub use fields::{sample_sheet, Field, TestData, DATA_ROW};
pub use flow::{purchase_vehicle, rehearse, JourneyState, QuoteJourney, MASK, PURCHASE_VEHICLE};
pub use locator::{BoundingBox, Selector};
pub use pages::{
    simulated_options, simulated_site, EmailSuccess, InsuranceNav, InsurantData, PriceOption,
    ProductData, QuotePages, SendQuote, SimulatedSession, SiteNav, VehicleData,
};
pub use reporter::{RunReport, StepKind, StepRecord, StepStatus, StoryLog, TracingStoryLog};
pub use result::{QuoteError, QuoteErrorKind, QuoteResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::control::*;
    pub use super::data::*;
    pub use super::driver::*;
    pub use super::fields::*;
    pub use super::flow::*;
    pub use super::locator::*;
    pub use super::pages::*;
    pub use super::reporter::*;
    pub use super::result::*;
    #[cfg(feature = "browser")]
    pub use super::browser::*;
}
