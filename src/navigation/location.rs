//! Location derivation.
//!
//! # Responsibilities
//! - Represent what the navigation source reports (`RawLocation`)
//! - Derive the router-facing `Location` for a navigation mode
//! - Parse hrefs relative to the document origin
//!
//! # Design Decisions
//! - Derivation never fails; an unavailable source yields empty fields
//! - Hash mode treats the fragment as the in-app URL

use serde::Serialize;
use url::Url;

use crate::navigation::mode::NavigationMode;

/// Origin used to resolve relative hrefs. Only path, query and fragment survive.
const DOCUMENT_ORIGIN: &str = "http://localhost/";

/// Location as reported by the navigation source, browser style.
///
/// `search` keeps its leading `?` and `hash` its leading `#` when non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawLocation {
    pub pathname: String,
    pub search: String,
    pub hash: String,
}

impl RawLocation {
    /// Resolve an href (absolute path, relative path or `#fragment`) against `base`.
    pub fn resolve(base: &RawLocation, href: &str) -> RawLocation {
        let base_url = Url::parse(DOCUMENT_ORIGIN)
            .and_then(|origin| origin.join(&base.to_href()))
            .ok();

        let joined = match base_url {
            Some(url) => url.join(href),
            None => Url::parse(DOCUMENT_ORIGIN).and_then(|origin| origin.join(href)),
        };

        match joined {
            Ok(url) => RawLocation::from_url(&url),
            Err(e) => {
                tracing::debug!(href = %href, error = %e, "Unparseable href, treating as root");
                RawLocation::root()
            }
        }
    }

    /// Parse an href relative to the document root.
    pub fn parse(href: &str) -> RawLocation {
        RawLocation::resolve(&RawLocation::root(), href)
    }

    /// The document root, `/`.
    pub fn root() -> RawLocation {
        RawLocation {
            pathname: "/".to_string(),
            search: String::new(),
            hash: String::new(),
        }
    }

    /// Reassemble into an href.
    pub fn to_href(&self) -> String {
        format!("{}{}{}", self.pathname, self.search, self.hash)
    }

    fn from_url(url: &Url) -> RawLocation {
        RawLocation {
            pathname: url.path().to_string(),
            search: url.query().map(|q| format!("?{}", q)).unwrap_or_default(),
            hash: url.fragment().map(|f| format!("#{}", f)).unwrap_or_default(),
        }
    }
}

/// The router's view of the current navigation position.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Location {
    pub path: String,
    pub search: String,
    pub hash: String,
}

impl Location {
    /// A location with the given path and no query or fragment.
    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Derive the location for `mode` from what the source reports.
    ///
    /// In hash mode the path is the text after `#` (default `/`), and a
    /// query inside the fragment becomes the search string.
    pub fn derive(raw: Option<&RawLocation>, mode: NavigationMode) -> Location {
        let Some(raw) = raw else {
            return Location::default();
        };

        match mode {
            NavigationMode::History => Location {
                path: raw.pathname.clone(),
                search: raw.search.clone(),
                hash: raw.hash.clone(),
            },
            NavigationMode::Hash => {
                let fragment = raw.hash.strip_prefix('#').unwrap_or(&raw.hash);
                let (path, search) = match fragment.find('?') {
                    Some(idx) => (&fragment[..idx], fragment[idx..].to_string()),
                    None => (fragment, raw.search.clone()),
                };
                Location {
                    path: if path.is_empty() { "/".to_string() } else { path.to_string() },
                    search,
                    hash: raw.hash.clone(),
                }
            }
        }
    }

    /// First value of a query parameter in `search`.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.search.strip_prefix('?').unwrap_or(&self.search);
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}
