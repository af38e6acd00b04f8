//! Automobile insurance quote form, one section object per form step.

use crate::control::{
    AsControl, Button, CheckBox, Clickable, Displayable, Element, Link, ListBox, RadioButton,
    Selectable, TextBox, Typeable,
};
use crate::driver::FormDriver;
use crate::locator::Selector;
use crate::result::QuoteResult;

fn input(id: &str) -> Selector {
    Selector::xpath(format!("//input[@id='{id}']"))
}

fn select(id: &str) -> Selector {
    Selector::xpath(format!("//select[@id='{id}']"))
}

fn button(id: &str) -> Selector {
    Selector::xpath(format!("//button[@id='{id}']"))
}

fn nth(xpath: &str, index: usize) -> Selector {
    Selector::xpath(format!("({xpath})[{index}]"))
}

const RADIO_LABEL: &str = "//label[@class=\"ideal-radiocheck-label\"]";
const CHECK_MARK: &str = "//span[@class=\"ideal-check\"]";
const PRICE_LABEL: &str = "//label[@class=\"choosePrice ideal-radiocheck-label\"]";

/// Step tabs shown above the quote form
#[derive(Debug, Clone)]
pub struct InsuranceNav {
    pub(crate) auto_insurance: Element,
    pub(crate) enter_vehicle_data: Link,
    pub(crate) enter_insurant_data: Link,
    pub(crate) enter_product_data: Link,
    pub(crate) select_price_option: Link,
    pub(crate) send_quote: Link,
}

impl Default for InsuranceNav {
    fn default() -> Self {
        Self::new()
    }
}

impl InsuranceNav {
    /// Build the section's controls
    #[must_use]
    pub fn new() -> Self {
        Self {
            auto_insurance: Element::new("Automobile Insurance", Selector::id("selectedinsurance")),
            enter_vehicle_data: Link::new("Enter Vehicle Data", Selector::id("entervehicledata")),
            enter_insurant_data: Link::new(
                "Enter Insurant Data",
                Selector::id("enterinsurantdata"),
            ),
            enter_product_data: Link::new("Enter Product Data", Selector::id("enterproductdata")),
            select_price_option: Link::new(
                "Select Price Option",
                Selector::id("selectpriceoption"),
            ),
            send_quote: Link::new("Send Quote", Selector::id("sendquote")),
        }
    }

    /// Verify "Automobile Insurance" is displayed
    pub async fn verify_auto_insurance_label(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.auto_insurance.verify_displayed(driver).await
    }

    /// Verify "Enter Vehicle Data" is displayed
    pub async fn verify_vehicle_data_nav_link(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.enter_vehicle_data.verify_displayed(driver).await
    }

    /// Verify "Enter Insurant Data" is displayed
    pub async fn verify_insurant_data_nav_link(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.enter_insurant_data.verify_displayed(driver).await
    }

    /// Verify "Enter Product Data" is displayed
    pub async fn verify_product_data_nav_link(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.enter_product_data.verify_displayed(driver).await
    }

    /// Verify "Select Price Option" is displayed
    pub async fn verify_price_option_nav_link(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.select_price_option.verify_displayed(driver).await
    }

    /// Verify "Send Quote" is displayed
    pub async fn verify_send_quote_nav_link(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.send_quote.verify_displayed(driver).await
    }

    /// Every control of the section
    #[must_use]
    pub fn controls(&self) -> Vec<&dyn AsControl> {
        vec![
            &self.auto_insurance as &dyn AsControl,
            &self.enter_vehicle_data,
            &self.enter_insurant_data,
            &self.enter_product_data,
            &self.select_price_option,
            &self.send_quote,
        ]
    }
}

/// "Enter Vehicle Data" step
#[derive(Debug, Clone)]
pub struct VehicleData {
    pub(crate) make: ListBox,
    pub(crate) engine_performance: TextBox,
    pub(crate) date_of_manufacture: TextBox,
    pub(crate) number_of_seats: ListBox,
    pub(crate) fuel_type: ListBox,
    pub(crate) list_price: TextBox,
    pub(crate) license_plate_number: TextBox,
    pub(crate) annual_mileage: TextBox,
    pub(crate) next: Button,
}

impl Default for VehicleData {
    fn default() -> Self {
        Self::new()
    }
}

impl VehicleData {
    /// Build the section's controls
    #[must_use]
    pub fn new() -> Self {
        Self {
            make: ListBox::new("Make", select("make")),
            engine_performance: TextBox::new("Engine Performance", input("engineperformance")),
            date_of_manufacture: TextBox::new("Date of Manufacture", input("dateofmanufacture")),
            number_of_seats: ListBox::new("Number of Seats", select("numberofseats")),
            fuel_type: ListBox::new("Fuel Type", select("fuel")),
            list_price: TextBox::new("List Price", input("listprice")),
            license_plate_number: TextBox::new("License Plate Number", input("licenseplatenumber")),
            annual_mileage: TextBox::new("Annual Mileage", input("annualmileage")),
            next: Button::new("Next", button("nextenterinsurantdata")),
        }
    }

    /// Select the "Make" option whose text matches
    pub async fn sel_make(&self, driver: &dyn FormDriver, make: &str) -> QuoteResult<()> {
        self.make.select_by_visible_text(driver, make).await
    }

    /// Type into "Engine Performance"
    pub async fn set_engine_performance(
        &self,
        driver: &dyn FormDriver,
        kw: &str,
    ) -> QuoteResult<()> {
        self.engine_performance.set_text(driver, kw).await
    }

    /// Type into "Date of Manufacture"
    pub async fn set_date_of_manufacture(
        &self,
        driver: &dyn FormDriver,
        date: &str,
    ) -> QuoteResult<()> {
        self.date_of_manufacture.set_text(driver, date).await
    }

    /// Select the "Number of Seats" option whose text matches
    pub async fn sel_num_of_seats(&self, driver: &dyn FormDriver, seats: &str) -> QuoteResult<()> {
        self.number_of_seats.select_by_visible_text(driver, seats).await
    }

    /// Select the "Fuel Type" option whose text matches
    pub async fn sel_fuel_type(&self, driver: &dyn FormDriver, fuel: &str) -> QuoteResult<()> {
        self.fuel_type.select_by_visible_text(driver, fuel).await
    }

    /// Type into "List Price"
    pub async fn set_list_price(&self, driver: &dyn FormDriver, price: &str) -> QuoteResult<()> {
        self.list_price.set_text(driver, price).await
    }

    /// Type into "License Plate Number"
    pub async fn set_license_plate_number(
        &self,
        driver: &dyn FormDriver,
        plate: &str,
    ) -> QuoteResult<()> {
        self.license_plate_number.set_text(driver, plate).await
    }

    /// Type into "Annual Mileage"
    pub async fn set_annual_mileage(
        &self,
        driver: &dyn FormDriver,
        mileage: &str,
    ) -> QuoteResult<()> {
        self.annual_mileage.set_text(driver, mileage).await
    }

    /// Click "Next"
    pub async fn click_next(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.next.click(driver).await
    }

    /// Every control of the section
    #[must_use]
    pub fn controls(&self) -> Vec<&dyn AsControl> {
        vec![
            &self.make as &dyn AsControl,
            &self.engine_performance,
            &self.date_of_manufacture,
            &self.number_of_seats,
            &self.fuel_type,
            &self.list_price,
            &self.license_plate_number,
            &self.annual_mileage,
            &self.next,
        ]
    }
}

/// "Enter Insurant Data" step
#[derive(Debug, Clone)]
pub struct InsurantData {
    pub(crate) first_name: TextBox,
    pub(crate) last_name: TextBox,
    pub(crate) date_of_birth: TextBox,
    pub(crate) gender: RadioButton,
    pub(crate) street_address: TextBox,
    pub(crate) country: ListBox,
    pub(crate) zip_code: TextBox,
    pub(crate) city: TextBox,
    pub(crate) occupation: ListBox,
    pub(crate) hobby_speeding: CheckBox,
    pub(crate) hobby_skydiving: CheckBox,
    pub(crate) next: Button,
}

impl Default for InsurantData {
    fn default() -> Self {
        Self::new()
    }
}

impl InsurantData {
    /// Build the section's controls
    #[must_use]
    pub fn new() -> Self {
        Self {
            first_name: TextBox::new("First Name", input("firstname")),
            last_name: TextBox::new("Last Name", input("lastname")),
            date_of_birth: TextBox::new("Date of Birth", input("birthdate")),
            gender: RadioButton::new("Gender", nth(RADIO_LABEL, 1)),
            street_address: TextBox::new("Street Address", input("streetaddress")),
            country: ListBox::new("Country", select("country")),
            zip_code: TextBox::new("Zip Code", input("zipcode")),
            city: TextBox::new("City", input("city")),
            occupation: ListBox::new("Occupation", select("occupation")),
            hobby_speeding: CheckBox::new("Hobbies: Speeding", nth(CHECK_MARK, 1)),
            hobby_skydiving: CheckBox::new("Hobbies: Skydiving", nth(CHECK_MARK, 3)),
            next: Button::new("Next", button("nextenterproductdata")),
        }
    }

    /// Type into "First Name"
    pub async fn set_first_name(&self, driver: &dyn FormDriver, name: &str) -> QuoteResult<()> {
        self.first_name.set_text(driver, name).await
    }

    /// Type into "Last Name"
    pub async fn set_last_name(&self, driver: &dyn FormDriver, name: &str) -> QuoteResult<()> {
        self.last_name.set_text(driver, name).await
    }

    /// Type into "Date of Birth"
    pub async fn set_date_of_birth(&self, driver: &dyn FormDriver, dob: &str) -> QuoteResult<()> {
        self.date_of_birth.set_text(driver, dob).await
    }

    /// Picks the first gender radio
    pub async fn sel_gender(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.gender.click(driver).await
    }

    /// Type into "Street Address"
    pub async fn set_street_address(
        &self,
        driver: &dyn FormDriver,
        street: &str,
    ) -> QuoteResult<()> {
        self.street_address.set_text(driver, street).await
    }

    /// Select the "Country" option whose text matches
    pub async fn sel_country(&self, driver: &dyn FormDriver, country: &str) -> QuoteResult<()> {
        self.country.select_by_visible_text(driver, country).await
    }

    /// Type into "Zip Code"
    pub async fn set_zip_code(&self, driver: &dyn FormDriver, zip: &str) -> QuoteResult<()> {
        self.zip_code.set_text(driver, zip).await
    }

    /// Type into "City"
    pub async fn set_city(&self, driver: &dyn FormDriver, city: &str) -> QuoteResult<()> {
        self.city.set_text(driver, city).await
    }

    /// Select the "Occupation" option whose text matches
    pub async fn sel_occupation(
        &self,
        driver: &dyn FormDriver,
        occupation: &str,
    ) -> QuoteResult<()> {
        self.occupation.select_by_visible_text(driver, occupation).await
    }

    /// Tick "Hobbies: Speeding"
    pub async fn sel_hobby_speeding(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.hobby_speeding.click(driver).await
    }

    /// Tick "Hobbies: Skydiving"
    pub async fn sel_hobby_skydiving(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.hobby_skydiving.click(driver).await
    }

    /// Click "Next"
    pub async fn click_next_product_btn(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.next.click(driver).await
    }

    /// Every control of the section
    #[must_use]
    pub fn controls(&self) -> Vec<&dyn AsControl> {
        vec![
            &self.first_name as &dyn AsControl,
            &self.last_name,
            &self.date_of_birth,
            &self.gender,
            &self.street_address,
            &self.country,
            &self.zip_code,
            &self.city,
            &self.occupation,
            &self.hobby_speeding,
            &self.hobby_skydiving,
            &self.next,
        ]
    }
}

/// "Enter Product Data" step
#[derive(Debug, Clone)]
pub struct ProductData {
    pub(crate) start_date: TextBox,
    pub(crate) insurance_sum: ListBox,
    pub(crate) merit_rating: ListBox,
    pub(crate) damage_insurance: ListBox,
    pub(crate) optional_products: CheckBox,
    pub(crate) courtesy_car: ListBox,
    pub(crate) next: Button,
}

impl Default for ProductData {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductData {
    /// Build the section's controls
    #[must_use]
    pub fn new() -> Self {
        Self {
            start_date: TextBox::new("Start Date", input("startdate")),
            insurance_sum: ListBox::new("Insurance Sum", select("insurancesum")),
            merit_rating: ListBox::new("Merit Rating", select("meritrating")),
            damage_insurance: ListBox::new("Damage Insurance", select("damageinsurance")),
            optional_products: CheckBox::new("Optional Products", nth(CHECK_MARK, 5)),
            courtesy_car: ListBox::new("Courtesy Car", select("courtesycar")),
            next: Button::new("Next", button("nextselectpriceoption")),
        }
    }

    /// Type into "Start Date"
    pub async fn set_start_date(&self, driver: &dyn FormDriver, date: &str) -> QuoteResult<()> {
        self.start_date.set_text(driver, date).await
    }

    /// Select the "Insurance Sum" option whose text matches
    pub async fn sel_insurance_sum(&self, driver: &dyn FormDriver, sum: &str) -> QuoteResult<()> {
        self.insurance_sum.select_by_visible_text(driver, sum).await
    }

    /// Select the "Merit Rating" option whose text matches
    pub async fn sel_merit_rating(&self, driver: &dyn FormDriver, rating: &str) -> QuoteResult<()> {
        self.merit_rating.select_by_visible_text(driver, rating).await
    }

    /// Select the "Damage Insurance" option whose text matches
    pub async fn sel_damage_insurance(
        &self,
        driver: &dyn FormDriver,
        damage: &str,
    ) -> QuoteResult<()> {
        self.damage_insurance.select_by_visible_text(driver, damage).await
    }

    /// Tick "Optional Products"
    pub async fn sel_optional_products(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.optional_products.click(driver).await
    }

    /// Select the "Courtesy Car" option whose text matches
    pub async fn sel_courtesy_car(
        &self,
        driver: &dyn FormDriver,
        courtesy: &str,
    ) -> QuoteResult<()> {
        self.courtesy_car.select_by_visible_text(driver, courtesy).await
    }

    /// Click "Next"
    pub async fn click_next_price_btn(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.next.click(driver).await
    }

    /// Every control of the section
    #[must_use]
    pub fn controls(&self) -> Vec<&dyn AsControl> {
        vec![
            &self.start_date as &dyn AsControl,
            &self.insurance_sum,
            &self.merit_rating,
            &self.damage_insurance,
            &self.optional_products,
            &self.courtesy_car,
            &self.next,
        ]
    }
}

/// "Select Price Option" step
#[derive(Debug, Clone)]
pub struct PriceOption {
    pub(crate) ultimate: RadioButton,
    pub(crate) next: Button,
}

impl Default for PriceOption {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceOption {
    /// Build the section's controls
    #[must_use]
    pub fn new() -> Self {
        Self {
            ultimate: RadioButton::new("Ultimate", nth(PRICE_LABEL, 4)),
            next: Button::new("Next", button("nextsendquote")),
        }
    }

    /// Choose "Ultimate"
    pub async fn sel_ultimate(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.ultimate.click(driver).await
    }

    /// Click "Next"
    pub async fn click_next_quote_btn(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.next.click(driver).await
    }

    /// Every control of the section
    #[must_use]
    pub fn controls(&self) -> Vec<&dyn AsControl> {
        vec![&self.ultimate as &dyn AsControl, &self.next]
    }
}

/// "Send Quote" step
#[derive(Debug, Clone)]
pub struct SendQuote {
    pub(crate) email: TextBox,
    pub(crate) username: TextBox,
    pub(crate) password: TextBox,
    pub(crate) confirm_password: TextBox,
    pub(crate) send: Button,
}

impl Default for SendQuote {
    fn default() -> Self {
        Self::new()
    }
}

impl SendQuote {
    /// Build the section's controls
    #[must_use]
    pub fn new() -> Self {
        Self {
            email: TextBox::new("E-mail", input("email")),
            username: TextBox::new("Username", input("username")),
            password: TextBox::new("Password", input("password")),
            confirm_password: TextBox::new("Confirm Password", input("confirmpassword")),
            send: Button::new("Send", button("sendemail")),
        }
    }

    /// Type into "E-mail"
    pub async fn set_email(&self, driver: &dyn FormDriver, email: &str) -> QuoteResult<()> {
        self.email.set_text(driver, email).await
    }

    /// Type into "Username"
    pub async fn set_username(&self, driver: &dyn FormDriver, username: &str) -> QuoteResult<()> {
        self.username.set_text(driver, username).await
    }

    /// Type into "Password"
    pub async fn set_password(&self, driver: &dyn FormDriver, password: &str) -> QuoteResult<()> {
        self.password.set_text(driver, password).await
    }

    /// Type into "Confirm Password"
    pub async fn set_confirm_password(
        &self,
        driver: &dyn FormDriver,
        password: &str,
    ) -> QuoteResult<()> {
        self.confirm_password.set_text(driver, password).await
    }

    /// Click "Send"
    pub async fn click_send_btn(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.send.click(driver).await
    }

    /// Every control of the section
    #[must_use]
    pub fn controls(&self) -> Vec<&dyn AsControl> {
        vec![
            &self.email as &dyn AsControl,
            &self.username,
            &self.password,
            &self.confirm_password,
            &self.send,
        ]
    }
}

/// Confirmation dialog after the quote e-mail was sent
///
/// Only presence of the banner is checked; submitted values are never read back.
#[derive(Debug, Clone)]
pub struct EmailSuccess {
    pub(crate) banner: Element,
    pub(crate) yes: Button,
}

impl Default for EmailSuccess {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailSuccess {
    /// Build the section's controls
    #[must_use]
    pub fn new() -> Self {
        Self {
            banner: Element::new("Sending e-mail success", Selector::tag_name("h2")),
            yes: Button::new("Yes", Selector::css("button.confirm")),
        }
    }

    /// Verify "Sending e-mail success" is displayed
    pub async fn verify_email_success_label(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.banner.verify_displayed(driver).await
    }

    /// Click "Yes"
    pub async fn click_yes(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.yes.click(driver).await
    }

    /// Every control of the section
    #[must_use]
    pub fn controls(&self) -> Vec<&dyn AsControl> {
        vec![&self.banner as &dyn AsControl, &self.yes]
    }
}
