//! Typed wrappers around located form controls.
//!
//! Each wrapper type only implements the capability traits its control
//! supports, so calling `set_text` on a [`Button`] or `click` on a
//! [`TextBox`] does not compile:
//!
//! | Variant                    | Capabilities                         |
//! |----------------------------|--------------------------------------|
//! | [`Element`]                | [`Displayable`]                      |
//! | [`Button`], [`Link`]       | [`Displayable`], [`Clickable`]       |
//! | [`TextBox`]                | [`Typeable`]                         |
//! | [`ListBox`]                | [`Selectable`]                       |
//! | [`CheckBox`], [`RadioButton`] | [`Clickable`]                     |

use crate::driver::{ElementHandle, FormDriver};
use crate::locator::Selector;
use crate::result::{QuoteError, QuoteResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Control type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    /// Static element, verification only
    Element,
    /// Push button
    Button,
    /// Hyperlink
    Link,
    /// Text input
    TextBox,
    /// Drop-down list
    ListBox,
    /// Check box
    CheckBox,
    /// Radio button
    RadioButton,
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Element => "element",
            Self::Button => "button",
            Self::Link => "link",
            Self::TextBox => "text box",
            Self::ListBox => "list box",
            Self::CheckBox => "check box",
            Self::RadioButton => "radio button",
        };
        f.write_str(name)
    }
}

/// A human-readable label plus the selector that finds the control
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocatedControl {
    label: String,
    selector: Selector,
}

impl LocatedControl {
    /// Create a located control
    #[must_use]
    pub fn new(label: impl Into<String>, selector: Selector) -> Self {
        Self {
            label: label.into(),
            selector,
        }
    }

    /// Label used in failure messages
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Selector resolved on every action
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    async fn resolve(&self, driver: &dyn FormDriver) -> QuoteResult<ElementHandle> {
        driver
            .find(&self.selector)
            .await?
            .ok_or_else(|| QuoteError::ElementNotFound {
                label: self.label.clone(),
                selector: self.selector.to_string(),
                timeout_ms: u64::try_from(driver.element_timeout().as_millis()).unwrap_or(u64::MAX),
            })
    }

    async fn resolve_interactable(&self, driver: &dyn FormDriver) -> QuoteResult<ElementHandle> {
        let handle = self.resolve(driver).await?;
        match handle.blocked_reason() {
            Some(reason) => Err(QuoteError::NotInteractable {
                label: self.label.clone(),
                reason: reason.to_string(),
            }),
            None => Ok(handle),
        }
    }

    async fn verify_displayed(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        tracing::debug!(label = %self.label, selector = %self.selector, "verify displayed");
        if self.resolve(driver).await?.is_displayed() {
            Ok(())
        } else {
            Err(QuoteError::VerificationFailed {
                label: self.label.clone(),
            })
        }
    }

    async fn click(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        tracing::debug!(label = %self.label, selector = %self.selector, "click");
        let _ = self.resolve_interactable(driver).await?;
        driver.click(&self.selector).await
    }

    async fn set_text(&self, driver: &dyn FormDriver, value: &str) -> QuoteResult<()> {
        tracing::debug!(label = %self.label, selector = %self.selector, "set text");
        let _ = self.resolve_interactable(driver).await?;
        driver.fill(&self.selector, value).await
    }

    async fn select_by_visible_text(
        &self,
        driver: &dyn FormDriver,
        value: &str,
    ) -> QuoteResult<()> {
        tracing::debug!(label = %self.label, selector = %self.selector, value, "select option");
        let handle = self.resolve_interactable(driver).await?;
        let option_missing = || QuoteError::OptionNotFound {
            label: self.label.clone(),
            option: value.to_string(),
        };
        if !handle.has_option(value) {
            return Err(option_missing());
        }
        if driver.select_option(&self.selector, value).await? {
            Ok(())
        } else {
            Err(option_missing())
        }
    }
}

/// Access to the located control behind a wrapper
pub trait AsControl: Send + Sync {
    /// Underlying located control
    fn control(&self) -> &LocatedControl;

    /// Control type tag
    fn kind(&self) -> ControlKind;

    /// Label used in failure messages
    fn label(&self) -> &str {
        self.control().label()
    }
}

/// Controls whose presence can be asserted
#[async_trait]
pub trait Displayable: AsControl {
    /// Succeeds iff the control is present and rendered
    ///
    /// # Errors
    ///
    /// `ElementNotFound` when absent, `VerificationFailed` when hidden.
    async fn verify_displayed(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.control().verify_displayed(driver).await
    }
}

/// Controls that accept a primary click
#[async_trait]
pub trait Clickable: AsControl {
    /// Click the control
    ///
    /// # Errors
    ///
    /// `ElementNotFound` or `NotInteractable`.
    async fn click(&self, driver: &dyn FormDriver) -> QuoteResult<()> {
        self.control().click(driver).await
    }
}

/// Controls that accept typed text
#[async_trait]
pub trait Typeable: AsControl {
    /// Clear the control and type `value`
    ///
    /// # Errors
    ///
    /// `ElementNotFound` or `NotInteractable`.
    async fn set_text(&self, driver: &dyn FormDriver, value: &str) -> QuoteResult<()> {
        self.control().set_text(driver, value).await
    }
}

/// Controls offering a list of options
#[async_trait]
pub trait Selectable: AsControl {
    /// Select the option whose visible text equals `value`
    ///
    /// # Errors
    ///
    /// `OptionNotFound` when no option text matches.
    async fn select_by_visible_text(
        &self,
        driver: &dyn FormDriver,
        value: &str,
    ) -> QuoteResult<()> {
        self.control().select_by_visible_text(driver, value).await
    }
}

macro_rules! control_variant {
    ($(#[$meta:meta])* $name:ident => $kind:ident: $($cap:ident),+) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(LocatedControl);

        impl $name {
            /// Create the control from a label and selector
            #[must_use]
            pub fn new(label: impl Into<String>, selector: Selector) -> Self {
                Self(LocatedControl::new(label, selector))
            }
        }

        impl AsControl for $name {
            fn control(&self) -> &LocatedControl {
                &self.0
            }

            fn kind(&self) -> ControlKind {
                ControlKind::$kind
            }
        }

        $(impl $cap for $name {})+
    };
}

control_variant!(
    /// Static element that can only be verified
    Element => Element: Displayable
);
control_variant!(
    /// Push button
    Button => Button: Displayable, Clickable
);
control_variant!(
    /// Hyperlink
    Link => Link: Displayable, Clickable
);
control_variant!(
    /// Text input
    TextBox => TextBox: Typeable
);
control_variant!(
    /// Drop-down list
    ListBox => ListBox: Selectable
);
control_variant!(
    /// Check box
    CheckBox => CheckBox: Clickable
);
control_variant!(
    /// Radio button
    RadioButton => RadioButton: Clickable
);

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::MockDriver;
    use crate::result::QuoteErrorKind;

    fn sel(id: &str) -> Selector {
        Selector::id(id)
    }

    mod verify_tests {
        use super::*;

        #[tokio::test]
        async fn test_verify_displayed_ok() {
            let driver = MockDriver::new().with_element(sel("truck"), ElementHandle::new("a"));
            let link = Link::new("Truck", sel("truck"));
            link.verify_displayed(&driver).await.unwrap();
        }

        #[tokio::test]
        async fn test_verify_hidden_fails_with_label() {
            let mut handle = ElementHandle::new("h2");
            handle.hidden = true;
            let driver = MockDriver::new().with_element(sel("banner"), handle);
            let element = Element::new("Sending e-mail success", sel("banner"));

            let err = element.verify_displayed(&driver).await.unwrap_err();
            assert_eq!(err.kind(), QuoteErrorKind::VerificationFailed);
            assert!(err.to_string().contains("Sending e-mail success"));
        }

        #[tokio::test]
        async fn test_missing_element_not_found() {
            let driver = MockDriver::new();
            let button = Button::new("Next", sel("next"));
            let err = button.verify_displayed(&driver).await.unwrap_err();
            assert_eq!(err.kind(), QuoteErrorKind::ElementNotFound);
            assert!(err.to_string().contains("Next"));
            assert!(err.to_string().contains("#next"));
            assert!(matches!(err, QuoteError::ElementNotFound { timeout_ms: 0, .. }));
        }
    }

    mod click_tests {
        use super::*;

        #[tokio::test]
        async fn test_click_dispatches_once() {
            let driver = MockDriver::new().with_element(sel("gender"), ElementHandle::new("label"));
            RadioButton::new("Gender", sel("gender")).click(&driver).await.unwrap();
            assert_eq!(driver.element(&sel("gender")).unwrap().clicks, 1);
            assert_eq!(
                driver.history(),
                vec!["find:#gender".to_string(), "click:#gender".to_string()]
            );
        }

        #[tokio::test]
        async fn test_click_disabled_not_interactable() {
            let mut handle = ElementHandle::new("button");
            handle.enabled = false;
            let driver = MockDriver::new().with_element(sel("send"), handle);

            let err = Button::new("Send", sel("send")).click(&driver).await.unwrap_err();
            assert_eq!(err.kind(), QuoteErrorKind::NotInteractable);
            assert!(!driver.was_called("click"));
        }

        #[tokio::test]
        async fn test_click_obscured_not_interactable() {
            let mut handle = ElementHandle::new("span");
            handle.obscured = true;
            let driver = MockDriver::new().with_element(sel("hobby"), handle);

            let err = CheckBox::new("Hobbies", sel("hobby")).click(&driver).await.unwrap_err();
            assert!(err.to_string().contains("obscured"));
        }
    }

    mod text_tests {
        use super::*;

        #[tokio::test]
        async fn test_set_text_replaces_value() {
            let driver = MockDriver::new().with_element(sel("city"), ElementHandle::new("input"));
            let city = TextBox::new("City", sel("city"));
            city.set_text(&driver, "Hamburg").await.unwrap();
            city.set_text(&driver, "Berlin").await.unwrap();
            assert_eq!(driver.value_of(&sel("city")).as_deref(), Some("Berlin"));
        }

        #[tokio::test]
        async fn test_set_text_accepts_empty() {
            let driver = MockDriver::new().with_element(sel("zip"), ElementHandle::new("input"));
            TextBox::new("Zip Code", sel("zip")).set_text(&driver, "").await.unwrap();
            assert_eq!(driver.value_of(&sel("zip")).as_deref(), Some(""));
        }

        #[tokio::test]
        async fn test_set_text_disabled() {
            let mut handle = ElementHandle::new("input");
            handle.enabled = false;
            let driver = MockDriver::new().with_element(sel("zip"), handle);
            let err = TextBox::new("Zip Code", sel("zip"))
                .set_text(&driver, "10115")
                .await
                .unwrap_err();
            assert_eq!(err.kind(), QuoteErrorKind::NotInteractable);
            assert!(!driver.was_called("fill"));
        }
    }

    mod select_tests {
        use super::*;

        fn fuel_driver() -> MockDriver {
            MockDriver::new().with_element(
                sel("fuel"),
                ElementHandle::new("select").with_options(["Petrol", "Diesel", "Gas"]),
            )
        }

        #[tokio::test]
        async fn test_select_exact_match() {
            let driver = fuel_driver();
            ListBox::new("Fuel Type", sel("fuel"))
                .select_by_visible_text(&driver, "Diesel")
                .await
                .unwrap();
            assert_eq!(driver.selected_of(&sel("fuel")).as_deref(), Some("Diesel"));
        }

        #[tokio::test]
        async fn test_select_missing_option() {
            let driver = fuel_driver();
            let err = ListBox::new("Fuel Type", sel("fuel"))
                .select_by_visible_text(&driver, "diesel")
                .await
                .unwrap_err();
            assert_eq!(err.kind(), QuoteErrorKind::OptionNotFound);
            assert!(err.to_string().contains("Fuel Type"));
            assert!(!driver.was_called("select"));
        }
    }

    #[test]
    fn test_kinds_and_labels() {
        assert_eq!(Element::new("a", sel("a")).kind(), ControlKind::Element);
        assert_eq!(ListBox::new("Make", sel("make")).kind(), ControlKind::ListBox);
        assert_eq!(TextBox::new("City", sel("city")).label(), "City");
        assert_eq!(ControlKind::RadioButton.to_string(), "radio button");
    }
}
