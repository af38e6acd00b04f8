//! Chromium driver over the Chrome DevTools Protocol.
//!
//! Element resolution runs a small script per selector and polls until the
//! driver's element timeout elapses. Actions re-resolve the node in the
//! page, so no remote object handles outlive a single call.

#![allow(clippy::missing_errors_doc, clippy::significant_drop_tightening)]

use crate::driver::{DriverConfig, ElementHandle, FormDriver, SessionProvider};
use crate::locator::{BoundingBox, Selector};
use crate::result::{QuoteError, QuoteResult};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::{Page as CdpPage, ScreenshotParams};
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Node state reported by the probe script
#[derive(Debug, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
struct Probe {
    found: bool,
    #[serde(default)]
    tag: String,
    #[serde(default)]
    rect: Option<BoundingBox>,
    #[serde(default)]
    hidden: bool,
    #[serde(default)]
    enabled: bool,
    #[serde(default)]
    obscured: bool,
    #[serde(default)]
    options: Vec<String>,
}

impl Probe {
    fn into_handle(self) -> Option<ElementHandle> {
        self.found.then(|| ElementHandle {
            tag_name: self.tag,
            bounding_box: self.rect,
            hidden: self.hidden,
            enabled: self.enabled,
            obscured: self.obscured,
            options: self.options,
        })
    }
}

fn js_string(text: &str) -> QuoteResult<String> {
    Ok(serde_json::to_string(text)?)
}

fn probe_script(selector: &Selector) -> String {
    format!(
        r"(() => {{
  const el = {query};
  if (!el) return {{ found: false }};
  const r = el.getBoundingClientRect();
  const s = window.getComputedStyle(el);
  const hidden = s.display === 'none' || s.visibility === 'hidden' || s.opacity === '0';
  let obscured = false;
  const cx = r.left + r.width / 2, cy = r.top + r.height / 2;
  if (r.width > 0 && r.height > 0 && cx >= 0 && cy >= 0 && cx < window.innerWidth && cy < window.innerHeight) {{
    const top = document.elementFromPoint(cx, cy);
    obscured = top !== null && top !== el && !el.contains(top) && !top.contains(el);
  }}
  return {{
    found: true,
    tag: el.tagName.toLowerCase(),
    rect: {{ x: r.left, y: r.top, width: r.width, height: r.height }},
    hidden,
    enabled: !el.disabled,
    obscured,
    options: el.tagName === 'SELECT' ? Array.from(el.options).map(o => o.text.trim()) : [],
  }};
}})()",
        query = selector.to_query()
    )
}

fn click_script(selector: &Selector) -> String {
    format!(
        r"(() => {{
  const el = {query};
  if (!el) return false;
  el.scrollIntoView({{ block: 'center' }});
  el.click();
  return true;
}})()",
        query = selector.to_query()
    )
}

fn fill_script(selector: &Selector, text: &str) -> QuoteResult<String> {
    Ok(format!(
        r"(() => {{
  const el = {query};
  if (!el) return false;
  el.scrollIntoView({{ block: 'center' }});
  el.focus();
  el.value = '';
  el.value = {text};
  el.dispatchEvent(new Event('input', {{ bubbles: true }}));
  el.dispatchEvent(new Event('change', {{ bubbles: true }}));
  el.blur();
  return true;
}})()",
        query = selector.to_query(),
        text = js_string(text)?
    ))
}

fn select_script(selector: &Selector, text: &str) -> QuoteResult<String> {
    Ok(format!(
        r"(() => {{
  const el = {query};
  if (!el || !el.options) return false;
  const opt = Array.from(el.options).find(o => o.text.trim() === {text});
  if (!opt) return false;
  el.value = opt.value;
  el.dispatchEvent(new Event('change', {{ bubbles: true }}));
  return true;
}})()",
        query = selector.to_query(),
        text = js_string(text)?
    ))
}

/// [`FormDriver`] backed by a headless (or headed) Chromium
#[derive(Debug)]
pub struct ChromiumDriver {
    config: DriverConfig,
    browser: Mutex<CdpBrowser>,
    page: Mutex<CdpPage>,
    handler: Option<JoinHandle<()>>,
    url: String,
}

impl ChromiumDriver {
    /// Launch Chromium and open a blank page
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::BrowserLaunch`] if the browser cannot start
    pub async fn launch(config: DriverConfig) -> QuoteResult<Self> {
        let launch_err = |e: &dyn std::fmt::Display| QuoteError::BrowserLaunch {
            message: e.to_string(),
        };

        let mut builder = CdpConfig::builder()
            .window_size(config.viewport_width, config.viewport_height)
            .request_timeout(config.navigation_wait());

        if !config.headless {
            builder = builder.with_head();
        }

        if !config.sandbox {
            builder = builder.no_sandbox();
        }

        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }

        if let Some(ref ua) = config.user_agent {
            builder = builder.arg(format!("--user-agent={ua}"));
        }

        let cdp_config = builder.build().map_err(|e| launch_err(&e))?;
        let (browser, mut handler) = CdpBrowser::launch(cdp_config)
            .await
            .map_err(|e| launch_err(&e))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| launch_err(&e))?;

        tracing::info!(
            headless = config.headless,
            width = config.viewport_width,
            height = config.viewport_height,
            "chromium launched"
        );

        Ok(Self {
            config,
            browser: Mutex::new(browser),
            page: Mutex::new(page),
            handler: Some(handler),
            url: String::from("about:blank"),
        })
    }

    /// Get the driver configuration
    #[must_use]
    pub const fn config(&self) -> &DriverConfig {
        &self.config
    }

    async fn evaluate<T: DeserializeOwned>(&self, script: String) -> QuoteResult<T> {
        let page = self.page.lock().await;
        let result = page
            .evaluate(script)
            .await
            .map_err(|e| QuoteError::driver(e.to_string()))?;
        result
            .into_value()
            .map_err(|e| QuoteError::driver(e.to_string()))
    }

    async fn probe(&self, selector: &Selector) -> QuoteResult<Option<ElementHandle>> {
        let probe: Probe = self.evaluate(probe_script(selector)).await?;
        Ok(probe.into_handle())
    }

    fn no_match(selector: &Selector) -> QuoteError {
        QuoteError::driver(format!("no node matches {selector}"))
    }
}

/// Poll `probe` until it reports a node or `wait` runs out
///
/// A failed evaluation counts as "not found yet": after a click that
/// navigates, the old execution context is gone until the next document
/// loads. The last such error is logged when the wait runs out.
async fn poll_for_node<F, Fut>(
    selector: &Selector,
    wait: Duration,
    interval: Duration,
    mut probe: F,
) -> Option<ElementHandle>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = QuoteResult<Option<ElementHandle>>>,
{
    let deadline = Instant::now() + wait;
    let mut last_error = None;
    loop {
        match probe().await {
            Ok(Some(handle)) => return Some(handle),
            Ok(None) => {}
            Err(e) => {
                tracing::trace!(%selector, error = %e, "probe failed, retrying");
                last_error = Some(e);
            }
        }
        if Instant::now() >= deadline {
            if let Some(e) = last_error {
                tracing::warn!(%selector, error = %e, "element wait ended on a probe error");
            }
            return None;
        }
        tokio::time::sleep(interval).await;
    }
}

#[async_trait]
impl FormDriver for ChromiumDriver {
    async fn navigate(&mut self, url: &str) -> QuoteResult<()> {
        let nav_err = |message: String| QuoteError::Navigation {
            url: url.to_string(),
            message,
        };
        let budget = self.config.navigation_timeout_ms;
        {
            let page = self.page.lock().await;
            tokio::time::timeout(self.config.navigation_wait(), page.goto(url))
                .await
                .map_err(|_| nav_err(format!("timed out after {budget}ms")))?
                .map_err(|e| nav_err(e.to_string()))?;
        }
        tracing::debug!(url, "navigated");
        self.url = url.to_string();
        Ok(())
    }

    async fn find(&self, selector: &Selector) -> QuoteResult<Option<ElementHandle>> {
        let wait = self.config.element_wait();
        let interval = self.config.poll_interval();
        Ok(poll_for_node(selector, wait, interval, move || self.probe(selector)).await)
    }

    async fn click(&self, selector: &Selector) -> QuoteResult<()> {
        if self.evaluate::<bool>(click_script(selector)).await? {
            Ok(())
        } else {
            Err(Self::no_match(selector))
        }
    }

    async fn fill(&self, selector: &Selector, text: &str) -> QuoteResult<()> {
        if self.evaluate::<bool>(fill_script(selector, text)?).await? {
            Ok(())
        } else {
            Err(Self::no_match(selector))
        }
    }

    async fn select_option(&self, selector: &Selector, text: &str) -> QuoteResult<bool> {
        self.evaluate(select_script(selector, text)?).await
    }

    async fn screenshot(&self) -> QuoteResult<Vec<u8>> {
        let page = self.page.lock().await;
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();
        page.screenshot(params)
            .await
            .map_err(|e| QuoteError::driver(format!("screenshot failed: {e}")))
    }

    async fn current_url(&self) -> QuoteResult<String> {
        let page = self.page.lock().await;
        let url = page
            .url()
            .await
            .map_err(|e| QuoteError::driver(e.to_string()))?;
        Ok(url.unwrap_or_else(|| self.url.clone()))
    }

    async fn close(&mut self) -> QuoteResult<()> {
        {
            let mut browser = self.browser.lock().await;
            browser
                .close()
                .await
                .map_err(|e| QuoteError::driver(format!("close failed: {e}")))?;
        }
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
        tracing::debug!("chromium closed");
        Ok(())
    }

    fn element_timeout(&self) -> Duration {
        self.config.element_wait()
    }
}

/// Opens a fresh [`ChromiumDriver`] per run
#[derive(Debug, Clone, Default)]
pub struct ChromiumSession {
    config: DriverConfig,
}

impl ChromiumSession {
    /// Create a provider with the given driver settings
    #[must_use]
    pub const fn new(config: DriverConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SessionProvider for ChromiumSession {
    type Driver = ChromiumDriver;

    async fn open_session(&self) -> QuoteResult<ChromiumDriver> {
        ChromiumDriver::launch(self.config.clone()).await
    }
}
