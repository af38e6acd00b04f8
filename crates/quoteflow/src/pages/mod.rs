//! Page section objects for the insurance quote site.
//!
//! Every section is an immutable table of controls built once; its methods
//! each delegate to exactly one control action.

mod automobile;
mod home;

pub use automobile::{
    EmailSuccess, InsuranceNav, InsurantData, PriceOption, ProductData, SendQuote, VehicleData,
};
pub use home::SiteNav;

use crate::control::{AsControl, ControlKind};
use crate::driver::{ElementHandle, MockDriver, SessionProvider};
use crate::result::QuoteResult;
use async_trait::async_trait;

/// All sections of the journey, in on-screen order
#[derive(Debug, Clone, Default)]
pub struct QuotePages {
    /// Landing page navigation
    pub home: SiteNav,
    /// Step tabs of the automobile form
    pub nav: InsuranceNav,
    /// Vehicle data step
    pub vehicle: VehicleData,
    /// Insurant data step
    pub insurant: InsurantData,
    /// Product data step
    pub product: ProductData,
    /// Price option step
    pub price: PriceOption,
    /// Send quote step
    pub send_quote: SendQuote,
    /// Confirmation dialog
    pub email_success: EmailSuccess,
}

impl QuotePages {
    /// Build every section's controls
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every control on the site, section by section
    #[must_use]
    pub fn controls(&self) -> Vec<&dyn AsControl> {
        let mut controls = self.home.controls();
        controls.extend(self.nav.controls());
        controls.extend(self.vehicle.controls());
        controls.extend(self.insurant.controls());
        controls.extend(self.product.controls());
        controls.extend(self.price.controls());
        controls.extend(self.send_quote.controls());
        controls.extend(self.email_success.controls());
        controls
    }
}

/// Options offered by the simulated site's list boxes
#[must_use]
pub fn simulated_options(label: &str) -> &'static [&'static str] {
    match label {
        "Make" => &[
            "Audi", "BMW", "Ford", "Honda", "Mazda", "Mercedes Benz", "Nissan", "Opel",
            "Porsche", "Renault", "Skoda", "Suzuki", "Toyota", "Volkswagen", "Volvo",
        ],
        "Number of Seats" => &["1", "2", "3", "4", "5", "6", "7", "8", "9"],
        "Fuel Type" => &["Petrol", "Diesel", "Electric Power", "Gas", "Other"],
        "Country" => &[
            "Austria", "Belgium", "France", "Germany", "Italy", "Netherlands", "Spain",
            "Switzerland", "United Kingdom", "United States",
        ],
        "Occupation" => &[
            "Employee", "Engineer", "Public Official", "Farmer", "Unemployed", "Selfemployed",
        ],
        "Insurance Sum" => &["Basic", "Standard", "Premium"],
        "Merit Rating" => &["Super Bonus", "1", "2", "3", "4", "5", "Malus 10"],
        "Damage Insurance" => &["No Coverage", "Partial Coverage", "Full"],
        "Courtesy Car" => &["Yes", "No"],
        _ => &[],
    }
}

fn simulated_handle(kind: ControlKind, label: &str) -> ElementHandle {
    match kind {
        ControlKind::Element => ElementHandle::new("h2"),
        ControlKind::Button => ElementHandle::new("button"),
        ControlKind::Link => ElementHandle::new("a"),
        ControlKind::TextBox => ElementHandle::new("input"),
        ControlKind::ListBox => {
            ElementHandle::new("select").with_options(simulated_options(label).iter().copied())
        }
        ControlKind::CheckBox => ElementHandle::new("span"),
        ControlKind::RadioButton => ElementHandle::new("label"),
    }
}

/// In-memory rendition of the quote site with every control rendered
#[must_use]
pub fn simulated_site(pages: &QuotePages) -> MockDriver {
    let mut driver = MockDriver::new();
    for control in pages.controls() {
        driver.add_element(
            control.control().selector().clone(),
            simulated_handle(control.kind(), control.label()),
        );
    }
    driver.set_screenshot(b"\x89PNG\r\n\x1a\n".to_vec());
    driver
}

/// Session provider backed by [`simulated_site`]
#[derive(Debug, Clone, Default)]
pub struct SimulatedSession {
    pages: QuotePages,
}

impl SimulatedSession {
    /// Create a provider
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionProvider for SimulatedSession {
    type Driver = MockDriver;

    async fn open_session(&self) -> QuoteResult<MockDriver> {
        Ok(simulated_site(&self.pages))
    }
}
