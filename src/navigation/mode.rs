//! Navigation mode selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::navigation::source::ChangeSignal;

/// Which half of the navigation source drives location derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMode {
    /// Clean URLs backed by session history (`/tag/lighting`).
    #[default]
    History,
    /// Fragment URLs (`/#/tag/lighting`).
    Hash,
}

impl NavigationMode {
    /// The native signal a location observer listens to in this mode.
    pub fn change_signal(self) -> ChangeSignal {
        match self {
            NavigationMode::History => ChangeSignal::PopState,
            NavigationMode::Hash => ChangeSignal::HashChange,
        }
    }

    /// Anchor href for an in-app target path.
    pub fn link_href(self, target: &str) -> String {
        match self {
            NavigationMode::History => target.to_string(),
            NavigationMode::Hash => format!("#{}", target),
        }
    }

    /// Document URL used when a full page load is required.
    pub fn document_href(self, target: &str) -> String {
        match self {
            NavigationMode::History => target.to_string(),
            NavigationMode::Hash => format!("/#{}", target),
        }
    }

    /// Interpret a boolean "use hash router" flag as found in the environment.
    ///
    /// Missing or unrecognised values select clean URLs.
    pub fn from_hash_flag(flag: Option<&str>) -> Self {
        match flag.map(|f| f.trim().to_ascii_lowercase()) {
            Some(f) if f == "true" || f == "1" || f == "yes" => NavigationMode::Hash,
            _ => NavigationMode::History,
        }
    }
}

impl fmt::Display for NavigationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationMode::History => write!(f, "history"),
            NavigationMode::Hash => write!(f, "hash"),
        }
    }
}

impl FromStr for NavigationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "history" => Ok(NavigationMode::History),
            "hash" => Ok(NavigationMode::Hash),
            other => Err(format!("unknown navigation mode '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_flag() {
        assert_eq!(NavigationMode::from_hash_flag(Some("true")), NavigationMode::Hash);
        assert_eq!(NavigationMode::from_hash_flag(Some(" TRUE ")), NavigationMode::Hash);
        assert_eq!(NavigationMode::from_hash_flag(Some("false")), NavigationMode::History);
        assert_eq!(NavigationMode::from_hash_flag(None), NavigationMode::History);
    }

    #[test]
    fn test_hrefs() {
        assert_eq!(NavigationMode::History.link_href("/shop"), "/shop");
        assert_eq!(NavigationMode::Hash.link_href("/shop"), "#/shop");
        assert_eq!(NavigationMode::Hash.document_href("/shop"), "/#/shop");
    }

    #[test]
    fn test_parse() {
        assert_eq!("hash".parse::<NavigationMode>().unwrap(), NavigationMode::Hash);
        assert!("fragment".parse::<NavigationMode>().is_err());
    }
}
