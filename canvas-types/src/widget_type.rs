use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of widget kinds the engine knows how to configure,
/// evaluate and migrate.
///
/// Serialized with the same screaming-snake tags the persisted application
/// documents use (`"INPUT_WIDGET"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetType {
    #[serde(rename = "INPUT_WIDGET")]
    Input,
    #[serde(rename = "IFRAME_WIDGET")]
    Iframe,
    #[serde(rename = "TABS_WIDGET")]
    Tabs,
    /// Legacy tab container still carrying the ordered `tabs` list.
    /// Only ever observed before migration.
    #[serde(rename = "TABS_MIGRATOR_WIDGET")]
    TabsMigrator,
}

impl WidgetType {
    /// Every widget type, in registry order.
    pub const ALL: [WidgetType; 4] = [
        WidgetType::Input,
        WidgetType::Iframe,
        WidgetType::Tabs,
        WidgetType::TabsMigrator,
    ];

    /// The persisted tag for this type.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Input => "INPUT_WIDGET",
            Self::Iframe => "IFRAME_WIDGET",
            Self::Tabs => "TABS_WIDGET",
            Self::TabsMigrator => "TABS_MIGRATOR_WIDGET",
        }
    }

    /// Looks up a type by its persisted tag. Returns `None` for tags this
    /// engine does not know.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    /// Whether instances of this type hold a tab set.
    #[must_use]
    pub const fn is_tab_container(self) -> bool {
        matches!(self, Self::Tabs | Self::TabsMigrator)
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for WidgetType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| crate::Error::UnknownWidgetType(s.to_string()))
    }
}
