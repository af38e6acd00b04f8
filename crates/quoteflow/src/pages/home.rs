//! Landing page: vehicle category navigation.

use crate::control::{AsControl, Clickable, Displayable, Link};
use crate::driver::FormDriver;
use crate::locator::Selector;
use crate::result::QuoteResult;

/// Vehicle category links on the landing page
#[derive(Debug, Clone)]
pub struct SiteNav {
    pub(crate) automobile: Link,
    pub(crate) truck: Link,
    pub(crate) motorcycle: Link,
    pub(crate) camper: Link,
}

impl Default for SiteNav {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteNav {
    /// Build the section's controls
    #[must_use]
    pub fn new() -> Self {
        Self {
            automobile: Link::new("Automobile", Selector::id("nav_automobile")),
            truck: Link::new("Truck", Selector::id("nav_truck")),
            motorcycle: Link::new("Motorcycle", Selector::id("nav_motorcycle")),
            camper: Link::new("Camper", Selector::id("nav_camper")),
        }
    }

    /// Verify "Automobile" is displayed
    pub async fn verify_automobile_nav_link(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.automobile.verify_displayed(driver).await
    }

    /// Verify "Truck" is displayed
    pub async fn verify_truck_nav_link(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.truck.verify_displayed(driver).await
    }

    /// Verify "Motorcycle" is displayed
    pub async fn verify_motorcycle_nav_link(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.motorcycle.verify_displayed(driver).await
    }

    /// Verify "Camper" is displayed
    pub async fn verify_camper_nav_link(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.camper.verify_displayed(driver).await
    }

    /// Click the "Automobile" link
    pub async fn click_automobile_nav_link(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.automobile.click(driver).await
    }

    /// Every control of the section
    #[must_use]
    pub fn controls(&self) -> Vec<&dyn AsControl> {
        vec![&self.automobile as &dyn AsControl, &self.truck, &self.motorcycle, &self.camper]
    }
}
