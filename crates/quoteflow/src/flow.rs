//! Journey flow: the fixed sequence of section actions for one story.
//!
//! ```text
//! Home ──click Automobile──► AutoInsuranceNav ──(same screen)──► VehicleData
//!   ──Next──► InsurantData ──Next──► ProductData ──Next──► PriceSelection
//!   ──Next──► SendQuote ──Send──► EmailSuccess ──Yes──► Done
//! ```
//!
//! Every step is awaited in order and the first failure stops the run in
//! the state it occurred in. Field values are looked up right before the
//! step that uses them.

use crate::control::{AsControl, ControlKind};
use crate::driver::{FormDriver, SessionProvider};
use crate::data::DataTable;
use crate::fields::{sample_sheet, Field, TestData};
use crate::pages::{QuotePages, SimulatedSession};
use crate::reporter::{RunReport, StepKind, StepRecord, StoryLog};
use crate::result::{QuoteError, QuoteResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::time::Instant;

/// Story name of the vehicle purchase journey
pub const PURCHASE_VEHICLE: &str = "Purchase Vehicle";

/// Shown instead of secret field values
pub const MASK: &str = "********";

/// Position in the quote journey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JourneyState {
    /// Landing page
    Home,
    /// Automobile insurance tabs
    AutoInsuranceNav,
    /// Vehicle data form
    VehicleData,
    /// Insurant data form
    InsurantData,
    /// Product data form
    ProductData,
    /// Price option selection
    PriceSelection,
    /// Send quote form
    SendQuote,
    /// Confirmation dialog
    EmailSuccess,
    /// Journey complete
    Done,
}

impl JourneyState {
    /// Every state in journey order
    pub const ALL: [Self; 9] = [
        Self::Home,
        Self::AutoInsuranceNav,
        Self::VehicleData,
        Self::InsurantData,
        Self::ProductData,
        Self::PriceSelection,
        Self::SendQuote,
        Self::EmailSuccess,
        Self::Done,
    ];

    /// The only state reachable from this one
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Home => Some(Self::AutoInsuranceNav),
            Self::AutoInsuranceNav => Some(Self::VehicleData),
            Self::VehicleData => Some(Self::InsurantData),
            Self::InsurantData => Some(Self::ProductData),
            Self::ProductData => Some(Self::PriceSelection),
            Self::PriceSelection => Some(Self::SendQuote),
            Self::SendQuote => Some(Self::EmailSuccess),
            Self::EmailSuccess => Some(Self::Done),
            Self::Done => None,
        }
    }

    /// Snake-case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::AutoInsuranceNav => "auto_insurance_nav",
            Self::VehicleData => "vehicle_data",
            Self::InsurantData => "insurant_data",
            Self::ProductData => "product_data",
            Self::PriceSelection => "price_selection",
            Self::SendQuote => "send_quote",
            Self::EmailSuccess => "email_success",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for JourneyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value as it may appear in logs and reports
fn shown(field: Field, value: &str) -> String {
    if field.is_secret() {
        MASK.to_string()
    } else {
        value.to_string()
    }
}

/// Tracks the current state and reports every step to the story log
struct Recorder<'l> {
    log: &'l mut dyn StoryLog,
    state: JourneyState,
}

impl<'l> Recorder<'l> {
    fn new(log: &'l mut dyn StoryLog) -> Self {
        Self {
            log,
            state: JourneyState::Home,
        }
    }

    async fn step(
        &mut self,
        kind: StepKind,
        control: Option<ControlKind>,
        label: &str,
        value: Option<String>,
        action: impl Future<Output = QuoteResult<()>>,
    ) -> QuoteResult<()> {
        let started = Instant::now();
        let result = action.await;
        let mut record = match &result {
            Ok(()) => StepRecord::passed(self.state, kind, label),
            Err(e) => StepRecord::failed(self.state, kind, label, e),
        }
        .with_elapsed(started.elapsed());
        record.control = control;
        record.value = value;
        self.log.on_step(&record);
        result
    }

    /// Failed lookups are recorded as steps; successful ones are not.
    fn lookup(&mut self, data: TestData<'_>, field: Field) -> QuoteResult<String> {
        data.value(field).map_err(|e| {
            let record = StepRecord::failed(self.state, StepKind::Lookup, field.column(), &e);
            self.log.on_step(&record);
            e
        })
    }

    async fn verify(
        &mut self,
        control: &dyn AsControl,
        action: impl Future<Output = QuoteResult<()>>,
    ) -> QuoteResult<()> {
        self.step(StepKind::Verify, Some(control.kind()), control.label(), None, action).await
    }

    async fn click(
        &mut self,
        control: &dyn AsControl,
        action: impl Future<Output = QuoteResult<()>>,
    ) -> QuoteResult<()> {
        self.step(StepKind::Click, Some(control.kind()), control.label(), None, action).await
    }

    async fn set(
        &mut self,
        field: Field,
        control: &dyn AsControl,
        value: &str,
        action: impl Future<Output = QuoteResult<()>>,
    ) -> QuoteResult<()> {
        let value = Some(shown(field, value));
        self.step(StepKind::Set, Some(control.kind()), control.label(), value, action).await
    }

    async fn select(
        &mut self,
        field: Field,
        control: &dyn AsControl,
        value: &str,
        action: impl Future<Output = QuoteResult<()>>,
    ) -> QuoteResult<()> {
        let value = Some(shown(field, value));
        self.step(StepKind::Select, Some(control.kind()), control.label(), value, action).await
    }

    fn advance(&mut self) {
        if let Some(next) = self.state.next() {
            tracing::info!(from = %self.state, to = %next, "state transition");
            self.state = next;
        }
    }

    fn finish(&mut self, error: Option<&QuoteError>) {
        if let Some(e) = error {
            tracing::warn!(state = %self.state, error = %e, "journey stopped");
        }
        self.log.on_finish(self.state, error);
    }
}

/// The vehicle purchase journey bound to its pages and data
#[derive(Debug, Clone, Copy)]
pub struct QuoteJourney<'a> {
    pages: &'a QuotePages,
    data: TestData<'a>,
}

impl<'a> QuoteJourney<'a> {
    /// Bind the journey
    #[must_use]
    pub const fn new(pages: &'a QuotePages, data: TestData<'a>) -> Self {
        Self { pages, data }
    }

    /// Run every step against an open session
    ///
    /// Returns [`JourneyState::Done`] on success. The story log receives
    /// one record per step and a final `on_finish` either way.
    ///
    /// # Errors
    ///
    /// Returns the first step error; no later step is attempted.
    pub async fn run(
        &self,
        driver: &mut dyn FormDriver,
        log: &mut dyn StoryLog,
    ) -> QuoteResult<JourneyState> {
        let mut rec = Recorder::new(log);
        let result = self.script(driver, &mut rec).await;
        rec.finish(result.as_ref().err());
        result.map(|()| rec.state)
    }

    async fn script(&self, driver: &mut dyn FormDriver, rec: &mut Recorder<'_>) -> QuoteResult<()> {
        let url = rec.lookup(self.data, Field::Url)?;
        rec.step(StepKind::Navigate, None, &url, None, driver.navigate(&url)).await?;

        let driver: &dyn FormDriver = &*driver;
        self.home(driver, rec).await?;
        self.insurance_nav(driver, rec).await?;
        self.vehicle_data(driver, rec).await?;
        self.insurant_data(driver, rec).await?;
        self.product_data(driver, rec).await?;
        self.price_selection(driver, rec).await?;
        self.send_quote(driver, rec).await?;
        self.email_success(driver, rec).await
    }

    async fn home(&self, driver: &dyn FormDriver, rec: &mut Recorder<'_>) -> QuoteResult<()> {
        let home = &self.pages.home;
        rec.verify(&home.automobile, home.verify_automobile_nav_link(driver)).await?;
        rec.verify(&home.truck, home.verify_truck_nav_link(driver)).await?;
        rec.verify(&home.motorcycle, home.verify_motorcycle_nav_link(driver)).await?;
        rec.verify(&home.camper, home.verify_camper_nav_link(driver)).await?;
        rec.click(&home.automobile, home.click_automobile_nav_link(driver)).await?;
        rec.advance();
        Ok(())
    }

    /// Tabs share the screen with vehicle data; no click moves past them.
    async fn insurance_nav(
        &self,
        driver: &dyn FormDriver,
        rec: &mut Recorder<'_>,
    ) -> QuoteResult<()> {
        let nav = &self.pages.nav;
        rec.verify(&nav.auto_insurance, nav.verify_auto_insurance_label(driver)).await?;
        rec.verify(&nav.enter_vehicle_data, nav.verify_vehicle_data_nav_link(driver)).await?;
        rec.verify(&nav.enter_insurant_data, nav.verify_insurant_data_nav_link(driver)).await?;
        rec.verify(&nav.enter_product_data, nav.verify_product_data_nav_link(driver)).await?;
        rec.verify(&nav.select_price_option, nav.verify_price_option_nav_link(driver)).await?;
        rec.verify(&nav.send_quote, nav.verify_send_quote_nav_link(driver)).await?;
        rec.advance();
        Ok(())
    }

    async fn vehicle_data(
        &self,
        driver: &dyn FormDriver,
        rec: &mut Recorder<'_>,
    ) -> QuoteResult<()> {
        let page = &self.pages.vehicle;
        let data = self.data;

        let make = rec.lookup(data, Field::Make)?;
        rec.select(Field::Make, &page.make, &make, page.sel_make(driver, &make)).await?;
        let kw = rec.lookup(data, Field::EnginePerformance)?;
        rec.set(
            Field::EnginePerformance,
            &page.engine_performance,
            &kw,
            page.set_engine_performance(driver, &kw),
        )
        .await?;
        let built = rec.lookup(data, Field::ManufactureDate)?;
        rec.set(
            Field::ManufactureDate,
            &page.date_of_manufacture,
            &built,
            page.set_date_of_manufacture(driver, &built),
        )
        .await?;
        let seats = rec.lookup(data, Field::SeatNumbers)?;
        rec.select(
            Field::SeatNumbers,
            &page.number_of_seats,
            &seats,
            page.sel_num_of_seats(driver, &seats),
        )
        .await?;
        let fuel = rec.lookup(data, Field::FuelType)?;
        rec.select(Field::FuelType, &page.fuel_type, &fuel, page.sel_fuel_type(driver, &fuel))
            .await?;
        let price = rec.lookup(data, Field::ListPrice)?;
        rec.set(Field::ListPrice, &page.list_price, &price, page.set_list_price(driver, &price))
            .await?;
        let plate = rec.lookup(data, Field::LicensePlateNumber)?;
        rec.set(
            Field::LicensePlateNumber,
            &page.license_plate_number,
            &plate,
            page.set_license_plate_number(driver, &plate),
        )
        .await?;
        let mileage = rec.lookup(data, Field::AnnualMileage)?;
        rec.set(
            Field::AnnualMileage,
            &page.annual_mileage,
            &mileage,
            page.set_annual_mileage(driver, &mileage),
        )
        .await?;

        rec.click(&page.next, page.click_next(driver)).await?;
        rec.advance();
        Ok(())
    }

    async fn insurant_data(
        &self,
        driver: &dyn FormDriver,
        rec: &mut Recorder<'_>,
    ) -> QuoteResult<()> {
        let page = &self.pages.insurant;
        let data = self.data;

        let first = rec.lookup(data, Field::FirstName)?;
        rec.set(Field::FirstName, &page.first_name, &first, page.set_first_name(driver, &first))
            .await?;
        let last = rec.lookup(data, Field::LastName)?;
        rec.set(Field::LastName, &page.last_name, &last, page.set_last_name(driver, &last))
            .await?;
        let dob = rec.lookup(data, Field::DateOfBirth)?;
        rec.set(
            Field::DateOfBirth,
            &page.date_of_birth,
            &dob,
            page.set_date_of_birth(driver, &dob),
        )
        .await?;
        rec.click(&page.gender, page.sel_gender(driver)).await?;
        let street = rec.lookup(data, Field::StreetAddress)?;
        rec.set(
            Field::StreetAddress,
            &page.street_address,
            &street,
            page.set_street_address(driver, &street),
        )
        .await?;
        let country = rec.lookup(data, Field::Country)?;
        rec.select(Field::Country, &page.country, &country, page.sel_country(driver, &country))
            .await?;
        let zip = rec.lookup(data, Field::ZipCode)?;
        rec.set(Field::ZipCode, &page.zip_code, &zip, page.set_zip_code(driver, &zip)).await?;
        let city = rec.lookup(data, Field::City)?;
        rec.set(Field::City, &page.city, &city, page.set_city(driver, &city)).await?;
        let occupation = rec.lookup(data, Field::Occupation)?;
        rec.select(
            Field::Occupation,
            &page.occupation,
            &occupation,
            page.sel_occupation(driver, &occupation),
        )
        .await?;
        rec.click(&page.hobby_speeding, page.sel_hobby_speeding(driver)).await?;
        rec.click(&page.hobby_skydiving, page.sel_hobby_skydiving(driver)).await?;

        rec.click(&page.next, page.click_next_product_btn(driver)).await?;
        rec.advance();
        Ok(())
    }

    async fn product_data(
        &self,
        driver: &dyn FormDriver,
        rec: &mut Recorder<'_>,
    ) -> QuoteResult<()> {
        let page = &self.pages.product;
        let data = self.data;

        let start = rec.lookup(data, Field::StartDate)?;
        rec.set(Field::StartDate, &page.start_date, &start, page.set_start_date(driver, &start))
            .await?;
        let sum = rec.lookup(data, Field::InsuranceSum)?;
        rec.select(
            Field::InsuranceSum,
            &page.insurance_sum,
            &sum,
            page.sel_insurance_sum(driver, &sum),
        )
        .await?;
        let rating = rec.lookup(data, Field::MeritRating)?;
        rec.select(
            Field::MeritRating,
            &page.merit_rating,
            &rating,
            page.sel_merit_rating(driver, &rating),
        )
        .await?;
        let damage = rec.lookup(data, Field::DamageInsurance)?;
        rec.select(
            Field::DamageInsurance,
            &page.damage_insurance,
            &damage,
            page.sel_damage_insurance(driver, &damage),
        )
        .await?;
        rec.click(&page.optional_products, page.sel_optional_products(driver)).await?;
        let courtesy = rec.lookup(data, Field::CourtesyCar)?;
        rec.select(
            Field::CourtesyCar,
            &page.courtesy_car,
            &courtesy,
            page.sel_courtesy_car(driver, &courtesy),
        )
        .await?;

        rec.click(&page.next, page.click_next_price_btn(driver)).await?;
        rec.advance();
        Ok(())
    }

    async fn price_selection(
        &self,
        driver: &dyn FormDriver,
        rec: &mut Recorder<'_>,
    ) -> QuoteResult<()> {
        let page = &self.pages.price;
        rec.click(&page.ultimate, page.sel_ultimate(driver)).await?;
        rec.click(&page.next, page.click_next_quote_btn(driver)).await?;
        rec.advance();
        Ok(())
    }

    async fn send_quote(&self, driver: &dyn FormDriver, rec: &mut Recorder<'_>) -> QuoteResult<()> {
        let page = &self.pages.send_quote;
        let data = self.data;

        let email = rec.lookup(data, Field::Email)?;
        rec.set(Field::Email, &page.email, &email, page.set_email(driver, &email)).await?;
        let username = rec.lookup(data, Field::Username)?;
        rec.set(Field::Username, &page.username, &username, page.set_username(driver, &username))
            .await?;
        let password = rec.lookup(data, Field::Password)?;
        rec.set(Field::Password, &page.password, &password, page.set_password(driver, &password))
            .await?;
        let confirm = rec.lookup(data, Field::ConfirmPassword)?;
        rec.set(
            Field::ConfirmPassword,
            &page.confirm_password,
            &confirm,
            page.set_confirm_password(driver, &confirm),
        )
        .await?;

        rec.click(&page.send, page.click_send_btn(driver)).await?;
        rec.advance();
        Ok(())
    }

    async fn email_success(
        &self,
        driver: &dyn FormDriver,
        rec: &mut Recorder<'_>,
    ) -> QuoteResult<()> {
        let page = &self.pages.email_success;
        rec.verify(&page.banner, page.verify_email_success_label(driver)).await?;
        rec.click(&page.yes, page.click_yes(driver)).await?;
        rec.advance();
        Ok(())
    }
}

/// Run the "Purchase Vehicle" story in a fresh session
///
/// The session is closed whether or not the journey succeeds.
///
/// # Errors
///
/// Returns the session error, the first failing step's error, or the
/// error from closing the session, in that order of precedence.
pub async fn purchase_vehicle<P: SessionProvider>(
    provider: &P,
    pages: &QuotePages,
    data: TestData<'_>,
    log: &mut dyn StoryLog,
) -> QuoteResult<JourneyState> {
    log.set_story_name(PURCHASE_VEHICLE);
    let mut driver = match provider.open_session().await {
        Ok(driver) => driver,
        Err(e) => {
            log.on_finish(JourneyState::Home, Some(&e));
            return Err(e);
        }
    };
    let result = QuoteJourney::new(pages, data).run(&mut driver, log).await;
    let closed = driver.close().await;
    let state = result?;
    closed?;
    Ok(state)
}

/// Walk the journey against the simulated site with the reference data
///
/// The report lists every step in the order a real run performs them.
pub async fn rehearse(pages: &QuotePages) -> RunReport {
    let table = DataTable::from_sheet(sample_sheet());
    let mut report = RunReport::new();
    let started = Instant::now();
    // The report already holds the outcome.
    let session = SimulatedSession::new();
    let _ = purchase_vehicle(&session, pages, TestData::new(&table), &mut report).await;
    report.set_duration(started.elapsed());
    report
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::data::Sheet;
    use crate::locator::Selector;
    use crate::pages::simulated_site;
    use crate::result::QuoteErrorKind;

    /// Reference data with one column edited
    fn sample_with(column: &str, value: Option<&str>) -> DataTable {
        let sample = sample_sheet();
        let mut headers = Vec::new();
        let mut values = Vec::new();
        for header in sample.headers() {
            let cell = if header == column {
                match value {
                    Some(v) => v.to_string(),
                    None => continue,
                }
            } else {
                sample.cell_value(header, 1).unwrap()
            };
            headers.push(header.clone());
            values.push(cell);
        }
        DataTable::from_sheet(Sheet::from_rows(vec![headers, values]))
    }

    mod state_tests {
        use super::*;

        #[test]
        fn test_states_form_a_single_chain() {
            let mut state = JourneyState::Home;
            let mut visited = vec![state];
            while let Some(next) = state.next() {
                visited.push(next);
                state = next;
            }
            assert_eq!(visited, JourneyState::ALL);
        }

        #[test]
        fn test_state_serializes_snake_case() {
            let json = serde_json::to_string(&JourneyState::AutoInsuranceNav).unwrap();
            assert_eq!(json, "\"auto_insurance_nav\"");
            assert_eq!(JourneyState::PriceSelection.to_string(), "price_selection");
        }
    }

    mod journey_tests {
        use super::*;

        #[tokio::test]
        async fn test_reference_row_reaches_done() {
            let pages = QuotePages::new();
            let table = DataTable::from_sheet(sample_sheet());
            let mut driver = simulated_site(&pages);
            let mut report = RunReport::new();

            let state = QuoteJourney::new(&pages, TestData::new(&table))
                .run(&mut driver, &mut report)
                .await
                .unwrap();

            assert_eq!(state, JourneyState::Done);
            assert!(report.is_passed());
            assert_eq!(report.passed_count(), report.steps.len());
            assert_eq!(driver.history()[0], "navigate:https://example-insurer.test");
            assert_eq!(
                driver.selected_of(&Selector::xpath("//select[@id='make']")).as_deref(),
                Some("Honda")
            );
            assert_eq!(
                driver.value_of(&Selector::xpath("//input[@id='firstname']")).as_deref(),
                Some("Jane")
            );
        }

        #[tokio::test]
        async fn test_every_state_records_steps() {
            let report = rehearse(&QuotePages::new()).await;
            for state in &JourneyState::ALL[..8] {
                assert!(report.steps_in(*state).count() > 0, "no steps in {state}");
            }
            assert_eq!(report.steps_in(JourneyState::Done).count(), 0);
        }

        #[tokio::test]
        async fn test_transitions_follow_clicks() {
            let report = rehearse(&QuotePages::new()).await;
            let last_home = report.steps_in(JourneyState::Home).last().unwrap();
            assert_eq!(last_home.kind, StepKind::Click);
            assert_eq!(last_home.label, "Automobile");

            let nav: Vec<_> = report.steps_in(JourneyState::AutoInsuranceNav).collect();
            assert_eq!(nav.len(), 6);
            assert!(nav.iter().all(|s| s.kind == StepKind::Verify));

            let last_send = report.steps_in(JourneyState::SendQuote).last().unwrap();
            assert_eq!(last_send.label, "Send");
        }

        #[tokio::test]
        async fn test_step_labels_come_from_controls() {
            let pages = QuotePages::new();
            let report = rehearse(&pages).await;
            let controls = pages.controls();
            for step in report.steps.iter().filter(|s| s.kind != StepKind::Navigate) {
                let kind = step.control.unwrap();
                assert!(
                    controls.iter().any(|c| c.label() == step.label && c.kind() == kind),
                    "no {kind:?} control labelled {}",
                    step.label
                );
            }

            let last = report.steps.last().unwrap();
            assert_eq!(last.label, pages.email_success.yes.label());
            assert_eq!(last.label, "Yes");
            assert_eq!(last.control, Some(ControlKind::Button));
        }

        #[tokio::test]
        async fn test_secrets_are_masked() {
            let report = rehearse(&QuotePages::new()).await;
            let password = report.steps.iter().find(|s| s.label == "Password").unwrap();
            assert_eq!(password.value.as_deref(), Some(MASK));
            let json = report.to_json().unwrap();
            assert!(!json.contains("Secret123!"));
            assert!(json.contains("janedoe"));
        }
    }

    mod fail_fast_tests {
        use super::*;

        async fn run_with(table: &DataTable, driver: &mut crate::driver::MockDriver) -> RunReport {
            let pages = QuotePages::new();
            let mut report = RunReport::new();
            let _ = QuoteJourney::new(&pages, TestData::new(table))
                .run(driver, &mut report)
                .await;
            report
        }

        #[tokio::test]
        async fn test_missing_first_name_stops_in_insurant_data() {
            let table = sample_with("FirstName", None);
            let mut driver = simulated_site(&QuotePages::new());
            let report = run_with(&table, &mut driver).await;

            assert_eq!(report.final_state, Some(JourneyState::InsurantData));
            assert_eq!(report.error_kind, Some(QuoteErrorKind::ColumnNotFound));
            let failed = report.failed_step().unwrap();
            assert_eq!(failed.kind, StepKind::Lookup);
            assert_eq!(failed.label, "FirstName");

            for state in [
                JourneyState::ProductData,
                JourneyState::PriceSelection,
                JourneyState::SendQuote,
            ] {
                assert_eq!(report.steps_in(state).count(), 0);
            }
            let history = driver.history();
            assert!(!history.iter().any(|h| h.contains("startdate")));
            assert!(!history.iter().any(|h| h.contains("sendemail")));
            assert!(!history.iter().any(|h| h.contains("firstname")));
        }

        #[tokio::test]
        async fn test_unknown_make_fails_with_option_not_found() {
            let table = sample_with("Make", Some("Tesla"));
            let mut driver = simulated_site(&QuotePages::new());
            let report = run_with(&table, &mut driver).await;

            assert_eq!(report.final_state, Some(JourneyState::VehicleData));
            assert_eq!(report.error_kind, Some(QuoteErrorKind::OptionNotFound));
            assert!(report.error.unwrap().contains("Tesla"));
            assert!(!driver.was_called("fill"));
        }

        #[tokio::test]
        async fn test_hidden_link_fails_verification_on_home() {
            let table = DataTable::from_sheet(sample_sheet());
            let mut driver = simulated_site(&QuotePages::new());
            driver.update_element(&Selector::id("nav_truck"), |e| e.hidden = true);
            let report = run_with(&table, &mut driver).await;

            assert_eq!(report.final_state, Some(JourneyState::Home));
            assert_eq!(report.error_kind, Some(QuoteErrorKind::VerificationFailed));
            assert!(!driver.was_called("click"));
        }

        #[tokio::test]
        async fn test_missing_control_fails_with_element_not_found() {
            let pages = QuotePages::new();
            let table = DataTable::from_sheet(sample_sheet());
            let mut driver = simulated_site(&pages);
            let ultimate = pages.price.controls()[0].control().selector().clone();
            driver.remove_element(&ultimate);
            let report = run_with(&table, &mut driver).await;

            assert_eq!(report.final_state, Some(JourneyState::PriceSelection));
            assert_eq!(report.error_kind, Some(QuoteErrorKind::ElementNotFound));
            assert!(report.error.unwrap().contains("Ultimate"));
        }

        #[tokio::test]
        async fn test_missing_url_never_navigates() {
            let table = sample_with("URL", None);
            let mut driver = simulated_site(&QuotePages::new());
            let report = run_with(&table, &mut driver).await;

            assert_eq!(report.final_state, Some(JourneyState::Home));
            assert!(driver.history().is_empty());
        }
    }

    mod session_tests {
        use super::*;

        #[tokio::test]
        async fn test_purchase_vehicle_names_story() {
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
            .unwrap();
            assert_eq!(state, JourneyState::Done);
            assert_eq!(report.story, PURCHASE_VEHICLE);
        }

        #[tokio::test]
        async fn test_purchase_vehicle_reports_failure() {
            let pages = QuotePages::new();
            let table = sample_with("City", None);
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
            assert_eq!(report.final_state, Some(JourneyState::InsurantData));
        }
    }
}
