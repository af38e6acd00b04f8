//! Selectors for locating form controls.
//!
//! A [`Selector`] is a description, not a handle: drivers re-resolve it
//! against the live page on every action, so nothing cached survives a
//! navigation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Selector strategy for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum Selector {
    /// Element id attribute
    Id(String),
    /// CSS selector (e.g., "button.confirm")
    Css(String),
    /// XPath selector
    XPath(String),
    /// Tag name (first match)
    TagName(String),
}

impl Selector {
    /// Create an id selector
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(path: impl Into<String>) -> Self {
        Self::XPath(path.into())
    }

    /// Create a tag name selector
    #[must_use]
    pub fn tag_name(tag: impl Into<String>) -> Self {
        Self::TagName(tag.into())
    }

    /// Convert to a JavaScript expression yielding the first matching node or `null`
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Id(id) => format!("document.getElementById({id:?})"),
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::XPath(s) => {
                format!(
                    "document.evaluate({s:?}, document, null, \
                     XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue"
                )
            }
            Self::TagName(t) => format!("document.getElementsByTagName({t:?})[0] || null"),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Css(s) => write!(f, "css={s}"),
            Self::XPath(s) => write!(f, "xpath={s}"),
            Self::TagName(t) => write!(f, "tag={t}"),
        }
    }
}

/// Bounding box of a rendered element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// X position
    pub x: f32,
    /// Y position
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl BoundingBox {
    /// Create a new bounding box
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the box covers no area
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}
