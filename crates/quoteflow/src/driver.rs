//! FormDriver - Abstract Browser Automation Trait
//!
//! The flow never talks to a browser directly. Every control action goes
//! through [`FormDriver`], which lets the same journey run against Chromium
//! (`browser` feature) or against the in-memory [`MockDriver`].
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  FormDriver (Abstract Trait)                                 │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────┐        ┌─────────────────────┐      │
//! │  │  ChromiumDriver     │        │  MockDriver         │      │
//! │  │  CDP via            │        │  In-memory form,    │      │
//! │  │  chromiumoxide      │        │  call history       │      │
//! │  └─────────────────────┘        └─────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use crate::locator::{BoundingBox, Selector};
use crate::result::{QuoteError, QuoteResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Snapshot of a resolved DOM node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Element tag name (lowercase)
    pub tag_name: String,
    /// Bounding box if laid out
    pub bounding_box: Option<BoundingBox>,
    /// Hidden by styling (display, visibility, opacity)
    pub hidden: bool,
    /// Accepts input (not `disabled`)
    pub enabled: bool,
    /// Another node covers the element's center
    pub obscured: bool,
    /// Visible text of `<option>` children, in document order
    #[serde(default)]
    pub options: Vec<String>,
}

impl ElementHandle {
    /// Create a rendered, enabled element handle
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            bounding_box: Some(BoundingBox::new(0.0, 0.0, 120.0, 24.0)),
            hidden: false,
            enabled: true,
            obscured: false,
            options: Vec::new(),
        }
    }

    /// Set the option texts
    #[must_use]
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Check if element is visually rendered (non-zero size, not hidden)
    #[must_use]
    pub fn is_displayed(&self) -> bool {
        !self.hidden && self.bounding_box.is_some_and(|b| !b.is_empty())
    }

    /// Why the element cannot receive input, if it cannot
    #[must_use]
    pub fn blocked_reason(&self) -> Option<&'static str> {
        if !self.enabled {
            Some("element is disabled")
        } else if self.obscured {
            Some("element is obscured by another element")
        } else {
            None
        }
    }

    /// Check whether an option with exactly this visible text exists
    #[must_use]
    pub fn has_option(&self, text: &str) -> bool {
        self.options.iter().any(|o| o == text)
    }
}

/// Browser configuration for drivers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
    /// User agent string
    pub user_agent: Option<String>,
    /// Timeout for navigation (ms)
    pub navigation_timeout_ms: u64,
    /// Implicit wait for element resolution (ms)
    pub element_timeout_ms: u64,
    /// Polling interval while resolving elements (ms)
    pub poll_interval_ms: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
            chromium_path: None,
            sandbox: true,
            user_agent: None,
            navigation_timeout_ms: 30_000,
            element_timeout_ms: 10_000,
            poll_interval_ms: 100,
        }
    }
}

impl DriverConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set headless mode
    #[must_use]
    pub const fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Set the implicit element wait
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn element_timeout(mut self, timeout: Duration) -> Self {
        self.element_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Set navigation timeout
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Implicit element wait as a duration
    #[must_use]
    pub const fn element_wait(&self) -> Duration {
        Duration::from_millis(self.element_timeout_ms)
    }

    /// Poll interval as a duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Navigation timeout as a duration
    #[must_use]
    pub const fn navigation_wait(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }
}

/// Abstract driver trait for browser automation
///
/// `find` carries the implicit wait: it returns `None` only after the
/// driver's element timeout has elapsed without a match.
#[async_trait]
pub trait FormDriver: Send + Sync {
    /// Navigate to URL
    async fn navigate(&mut self, url: &str) -> QuoteResult<()>;

    /// Resolve a selector to the current state of its first matching node
    async fn find(&self, selector: &Selector) -> QuoteResult<Option<ElementHandle>>;

    /// Dispatch a primary click on the node
    async fn click(&self, selector: &Selector) -> QuoteResult<()>;

    /// Clear the node's content and type `text`
    async fn fill(&self, selector: &Selector, text: &str) -> QuoteResult<()>;

    /// Select the option whose visible text equals `text`; `false` if none does
    async fn select_option(&self, selector: &Selector, text: &str) -> QuoteResult<bool>;

    /// Capture a PNG screenshot of the viewport
    async fn screenshot(&self) -> QuoteResult<Vec<u8>>;

    /// Get current URL
    async fn current_url(&self) -> QuoteResult<String>;

    /// Close the session
    async fn close(&mut self) -> QuoteResult<()>;

    /// Implicit wait applied by `find`
    fn element_timeout(&self) -> Duration;
}

/// Opens one browser session per journey run
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Driver type handed to the journey
    type Driver: FormDriver;

    /// Start a fresh session
    async fn open_session(&self) -> QuoteResult<Self::Driver>;
}

/// Element stored by the mock driver
#[derive(Debug, Clone)]
pub struct MockElement {
    /// Reported element state
    pub handle: ElementHandle,
    /// Current text value
    pub value: String,
    /// Selected option text
    pub selected: Option<String>,
    /// Number of clicks received
    pub clicks: u32,
}

impl MockElement {
    /// Wrap a handle
    #[must_use]
    pub fn new(handle: ElementHandle) -> Self {
        Self {
            handle,
            value: String::new(),
            selected: None,
            clicks: 0,
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    elements: HashMap<Selector, MockElement>,
    history: Vec<String>,
    current_url: String,
    closed: bool,
}

/// Mock driver for unit testing
///
/// Holds an in-memory page keyed by selector and records every call.
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
    screenshot_data: Option<Vec<u8>>,
}

impl MockDriver {
    /// Create new mock driver with an empty page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a mock element
    pub fn add_element(&mut self, selector: Selector, handle: ElementHandle) {
        let _ = self.lock().elements.insert(selector, MockElement::new(handle));
    }

    /// Builder form of [`MockDriver::add_element`]
    #[must_use]
    pub fn with_element(mut self, selector: Selector, handle: ElementHandle) -> Self {
        self.add_element(selector, handle);
        self
    }

    /// Remove an element from the page
    pub fn remove_element(&mut self, selector: &Selector) {
        let _ = self.lock().elements.remove(selector);
    }

    /// Modify the stored state of an element
    pub fn update_element(&mut self, selector: &Selector, update: impl FnOnce(&mut ElementHandle)) {
        if let Some(element) = self.lock().elements.get_mut(selector) {
            update(&mut element.handle);
        }
    }

    /// Set mock screenshot
    pub fn set_screenshot(&mut self, data: Vec<u8>) {
        self.screenshot_data = Some(data);
    }

    /// Get a copy of a stored element
    #[must_use]
    pub fn element(&self, selector: &Selector) -> Option<MockElement> {
        self.lock().elements.get(selector).cloned()
    }

    /// Current text value of an element
    #[must_use]
    pub fn value_of(&self, selector: &Selector) -> Option<String> {
        self.lock().elements.get(selector).map(|e| e.value.clone())
    }

    /// Selected option of an element
    #[must_use]
    pub fn selected_of(&self, selector: &Selector) -> Option<String> {
        self.lock()
            .elements
            .get(selector)
            .and_then(|e| e.selected.clone())
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    /// Forget recorded calls
    pub fn clear_history(&self) {
        self.lock().history.clear();
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.lock().history.iter().any(|c| c.starts_with(method))
    }

    /// Whether `close` was called
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn record(&self, call: String) {
        self.lock().history.push(call);
    }

    fn with_element_mut<T>(
        &self,
        selector: &Selector,
        f: impl FnOnce(&mut MockElement) -> T,
    ) -> QuoteResult<T> {
        self.lock()
            .elements
            .get_mut(selector)
            .map(f)
            .ok_or_else(|| QuoteError::driver(format!("no node matches {selector}")))
    }
}

#[async_trait]
impl FormDriver for MockDriver {
    async fn navigate(&mut self, url: &str) -> QuoteResult<()> {
        self.record(format!("navigate:{url}"));
        self.lock().current_url = url.to_string();
        Ok(())
    }

    async fn find(&self, selector: &Selector) -> QuoteResult<Option<ElementHandle>> {
        self.record(format!("find:{selector}"));
        Ok(self.lock().elements.get(selector).map(|e| e.handle.clone()))
    }

    async fn click(&self, selector: &Selector) -> QuoteResult<()> {
        self.record(format!("click:{selector}"));
        self.with_element_mut(selector, |e| e.clicks += 1)
    }

    async fn fill(&self, selector: &Selector, text: &str) -> QuoteResult<()> {
        self.record(format!("fill:{selector}={text}"));
        self.with_element_mut(selector, |e| e.value = text.to_string())
    }

    async fn select_option(&self, selector: &Selector, text: &str) -> QuoteResult<bool> {
        self.record(format!("select:{selector}={text}"));
        self.with_element_mut(selector, |e| {
            if e.handle.has_option(text) {
                e.selected = Some(text.to_string());
                true
            } else {
                false
            }
        })
    }

    async fn screenshot(&self) -> QuoteResult<Vec<u8>> {
        self.record("screenshot".to_string());
        self.screenshot_data
            .clone()
            .ok_or_else(|| QuoteError::driver("No mock screenshot set"))
    }

    async fn current_url(&self) -> QuoteResult<String> {
        Ok(self.lock().current_url.clone())
    }

    async fn close(&mut self) -> QuoteResult<()> {
        self.record("close".to_string());
        self.lock().closed = true;
        Ok(())
    }

    fn element_timeout(&self) -> Duration {
        Duration::ZERO
    }
}
