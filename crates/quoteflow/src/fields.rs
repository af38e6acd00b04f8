//! Field bindings: which data column feeds which form field.

use crate::data::{DataTable, Sheet};
use crate::result::QuoteResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Row holding the single scenario's values (row 0 is the header)
pub const DATA_ROW: usize = 1;

/// A data column bound to one form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    /// Base URL of the site under test
    ///
    /// # Errors
    ///
    /// See [`TestData::value`].
    Url,
    /// Vehicle make
    Make,
    /// Engine performance in kW
    EnginePerformance,
    /// Date of manufacture
    ManufactureDate,
    /// Number of seats
    SeatNumbers,
    /// Fuel type
    FuelType,
    /// List price
    ListPrice,
    /// License plate number
    LicensePlateNumber,
    /// Annual mileage
    AnnualMileage,
    /// Insurant first name
    FirstName,
    /// Insurant last name
    LastName,
    /// Insurant date of birth
    DateOfBirth,
    /// Street address
    StreetAddress,
    /// Country
    Country,
    /// Zip code
    ZipCode,
    /// City
    City,
    /// Occupation
    Occupation,
    /// Insurance start date
    StartDate,
    /// Insurance sum
    InsuranceSum,
    /// Merit rating
    MeritRating,
    /// Damage insurance
    DamageInsurance,
    /// Courtesy car
    CourtesyCar,
    /// Quote recipient e-mail
    Email,
    /// Account user name
    Username,
    /// Account password
    Password,
    /// Password confirmation
    ConfirmPassword,
}

impl Field {
    /// Every bound field in journey order
    pub const ALL: [Self; 26] = [
        Self::Url,
        Self::Make,
        Self::EnginePerformance,
        Self::ManufactureDate,
        Self::SeatNumbers,
        Self::FuelType,
        Self::ListPrice,
        Self::LicensePlateNumber,
        Self::AnnualMileage,
        Self::FirstName,
        Self::LastName,
        Self::DateOfBirth,
        Self::StreetAddress,
        Self::Country,
        Self::ZipCode,
        Self::City,
        Self::Occupation,
        Self::StartDate,
        Self::InsuranceSum,
        Self::MeritRating,
        Self::DamageInsurance,
        Self::CourtesyCar,
        Self::Email,
        Self::Username,
        Self::Password,
        Self::ConfirmPassword,
    ];

    /// Column header in the data source
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Url => "URL",
            Self::Make => "Make",
            Self::EnginePerformance => "EnginePerformance",
            Self::ManufactureDate => "ManufactureDate",
            Self::SeatNumbers => "SeatNumbers",
            Self::FuelType => "FuelType",
            Self::ListPrice => "ListPrice",
            Self::LicensePlateNumber => "LicensePlateNumber",
            Self::AnnualMileage => "AnnualMileage",
            Self::FirstName => "FirstName",
            Self::LastName => "LastName",
            Self::DateOfBirth => "DateOfBirth",
            Self::StreetAddress => "StreetAddress",
            Self::Country => "Country",
            Self::ZipCode => "ZipCode",
            Self::City => "City",
            Self::Occupation => "Occupation",
            Self::StartDate => "StartDate",
            Self::InsuranceSum => "InsuranceSum",
            Self::MeritRating => "MeritRating",
            Self::DamageInsurance => "DamageInsurance",
            Self::CourtesyCar => "CourtesyCar",
            Self::Email => "Email",
            Self::Username => "Username",
            Self::Password => "Password",
            Self::ConfirmPassword => "ConfirmPassword",
        }
    }

    /// Whether the value must stay out of logs and reports
    #[must_use]
    pub const fn is_secret(self) -> bool {
        matches!(self, Self::Password | Self::ConfirmPassword)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Field values for one run, looked up on every access
#[derive(Debug, Clone, Copy)]
pub struct TestData<'a> {
    table: &'a DataTable,
    row: usize,
}

impl<'a> TestData<'a> {
    /// Bind to the scenario row of `table`
    #[must_use]
    pub const fn new(table: &'a DataTable) -> Self {
        Self {
            table,
            row: DATA_ROW,
        }
    }

    /// Bind to another row of `table`
    #[must_use]
    pub const fn with_row(mut self, row: usize) -> Self {
        self.row = row;
        self
    }

    /// Row this binding reads from
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Current value of `field`
    ///
    /// # Errors
    ///
    /// Any lookup error from the underlying [`DataTable`].
    pub fn value(&self, field: Field) -> QuoteResult<String> {
        self.table.get_cell_value(field.column(), self.row)
    }

    /// Base URL of the site under test
    ///
    /// # Errors
    ///
    /// See [`TestData::value`].
    pub fn site_url(&self) -> QuoteResult<String> {
        self.value(Field::Url)
    }

    /// Fields whose column is missing or whose cell is empty
    #[must_use]
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.value(*f).map_or(true, |v| v.is_empty()))
            .collect()
    }
}

/// Reference data set for the "Purchase Vehicle" journey
#[must_use]
pub fn sample_sheet() -> Sheet {
    Sheet::from_pairs([
        ("URL", "https://example-insurer.test"),
        ("Make", "Honda"),
        ("EnginePerformance", "110"),
        ("ManufactureDate", "06/15/2018"),
        ("SeatNumbers", "5"),
        ("FuelType", "Petrol"),
        ("ListPrice", "25000"),
        ("LicensePlateNumber", "ABC123"),
        ("AnnualMileage", "12000"),
        ("FirstName", "Jane"),
        ("LastName", "Doe"),
        ("DateOfBirth", "01/01/1990"),
        ("StreetAddress", "1 Main St"),
        ("Country", "Germany"),
        ("ZipCode", "10115"),
        ("City", "Berlin"),
        ("Occupation", "Engineer"),
        ("StartDate", "01/01/2024"),
        ("InsuranceSum", "Basic"),
        ("MeritRating", "1"),
        ("DamageInsurance", "Full"),
        ("CourtesyCar", "Yes"),
        ("Email", "jane@example.test"),
        ("Username", "janedoe"),
        ("Password", "Secret123!"),
        ("ConfirmPassword", "Secret123!"),
    ])
}
