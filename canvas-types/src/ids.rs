//! Widget identity.
//!
//! Every widget dropped on the canvas gets a [`WidgetId`] when its instance
//! is created. The id travels with the instance through save/load and keys
//! the runtime's widget table and meta-state store; action requests carry it
//! so the host knows which widget fired. The short alphanumeric keys minted
//! for tab entries (`tabsObj.<tab>.widgetId`) are a separate, local scheme.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Canvas-wide identity of one widget instance.
///
/// Backed by a UUID v7, so ids minted later sort after earlier ones and
/// widgets list in creation order without a separate counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(Uuid);

impl WidgetId {
    /// Mints the id for a freshly created widget.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Restores the id of a widget loaded from a saved layout.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Parses the hyphenated form written into layouts and action payloads.
    pub fn parse(s: &str) -> crate::Result<Self> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for WidgetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for WidgetId {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::parse(s)
    }
}
