//! Route pattern matching.
//!
//! # Responsibilities
//! - Parse declarative patterns (`/`, `/about`, `/tag/:slug`, `/:slug`)
//! - Match a path against a pattern and capture its parameter
//!
//! # Design Decisions
//! - Literal matching is exact and case-sensitive
//! - At most one parameter, always in the final segment
//! - The catch-all only ever matches a single segment, and only when that
//!   segment is not a namespace claimed by another pattern

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Errors raised while compiling route patterns.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("route pattern '{0}' must start with '/'")]
    NotAbsolute(String),

    #[error("route pattern '{0}' has an empty parameter name")]
    EmptyParameter(String),

    #[error("route pattern '{0}' may only capture its final segment")]
    UnsupportedParameter(String),

    #[error("route pattern '{0}' is registered twice")]
    Duplicate(String),
}

/// Parameters captured by a match, by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn single(name: &str, value: &str) -> Self {
        let mut map = BTreeMap::new();
        map.insert(name.to_string(), value.to_string());
        Params(map)
    }
}

/// A compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    /// Literal path, matched verbatim.
    Exact(String),
    /// `/<prefix>/:param`; `prefix` keeps its surrounding slashes (`/tag/`).
    Prefix { prefix: String, param: String },
    /// `/:param`, any unclaimed single segment.
    CatchAll { param: String },
}

impl RoutePattern {
    /// Compile a pattern string.
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        let Some(rest) = pattern.strip_prefix('/') else {
            return Err(RouteError::NotAbsolute(pattern.to_string()));
        };

        let segments: Vec<&str> = rest.split('/').collect();
        let param_positions: Vec<usize> = segments
            .iter()
            .enumerate()
            .filter(|(_, s)| s.starts_with(':'))
            .map(|(i, _)| i)
            .collect();

        match param_positions.as_slice() {
            [] => Ok(RoutePattern::Exact(pattern.to_string())),
            [last] if *last == segments.len() - 1 => {
                let param = &segments[*last][1..];
                if param.is_empty() {
                    return Err(RouteError::EmptyParameter(pattern.to_string()));
                }
                if segments.len() == 1 {
                    Ok(RoutePattern::CatchAll {
                        param: param.to_string(),
                    })
                } else {
                    Ok(RoutePattern::Prefix {
                        prefix: format!("/{}/", segments[..*last].join("/")),
                        param: param.to_string(),
                    })
                }
            }
            _ => Err(RouteError::UnsupportedParameter(pattern.to_string())),
        }
    }

    /// First path segment this pattern owns, if any.
    ///
    /// The catch-all never captures a claimed namespace, wherever the
    /// claiming pattern sits in the table.
    pub fn namespace(&self) -> Option<&str> {
        let path = match self {
            RoutePattern::Exact(path) => path.as_str(),
            RoutePattern::Prefix { prefix, .. } => prefix.as_str(),
            RoutePattern::CatchAll { .. } => return None,
        };
        path.trim_start_matches('/')
            .split('/')
            .next()
            .filter(|segment| !segment.is_empty())
    }

    /// Match `path`, capturing the parameter if the pattern has one.
    ///
    /// `claimed` lists namespaces owned by other patterns of the table.
    pub fn capture(&self, path: &str, claimed: &[String]) -> Option<Params> {
        match self {
            RoutePattern::Exact(literal) => (literal == path).then(Params::default),
            RoutePattern::Prefix { prefix, param } => path
                .strip_prefix(prefix.as_str())
                .filter(|value| !value.is_empty())
                .map(|value| Params::single(param, value)),
            RoutePattern::CatchAll { param } => {
                let segment = path.strip_prefix('/')?;
                if segment.is_empty()
                    || segment.contains('/')
                    || claimed.iter().any(|ns| ns == segment)
                {
                    return None;
                }
                Some(Params::single(param, segment))
            }
        }
    }
}

impl FromStr for RoutePattern {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoutePattern::parse(s)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutePattern::Exact(path) => write!(f, "{}", path),
            RoutePattern::Prefix { prefix, param } => write!(f, "{}:{}", prefix, param),
            RoutePattern::CatchAll { param } => write!(f, "/:{}", param),
        }
    }
}

impl Serialize for RoutePattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shapes() {
        assert_eq!(RoutePattern::parse("/").unwrap(), RoutePattern::Exact("/".into()));
        assert_eq!(
            RoutePattern::parse("/about").unwrap(),
            RoutePattern::Exact("/about".into())
        );
        assert_eq!(
            RoutePattern::parse("/tag/:slug").unwrap(),
            RoutePattern::Prefix {
                prefix: "/tag/".into(),
                param: "slug".into()
            }
        );
        assert_eq!(
            RoutePattern::parse("/:slug").unwrap(),
            RoutePattern::CatchAll { param: "slug".into() }
        );
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert_eq!(
            RoutePattern::parse("about"),
            Err(RouteError::NotAbsolute("about".into()))
        );
        assert_eq!(
            RoutePattern::parse("/tag/:"),
            Err(RouteError::EmptyParameter("/tag/:".into()))
        );
        assert!(matches!(
            RoutePattern::parse("/:a/:b"),
            Err(RouteError::UnsupportedParameter(_))
        ));
        assert!(matches!(
            RoutePattern::parse("/:id/edit"),
            Err(RouteError::UnsupportedParameter(_))
        ));
    }

    #[test]
    fn test_display_round_trips() {
        for p in ["/", "/about", "/tag/:slug", "/:slug"] {
            assert_eq!(RoutePattern::parse(p).unwrap().to_string(), p);
        }
    }

    #[test]
    fn test_exact_capture() {
        let pattern = RoutePattern::parse("/about").unwrap();
        assert!(pattern.capture("/about", &[]).unwrap().is_empty());
        assert!(pattern.capture("/about/", &[]).is_none());
        assert!(pattern.capture("/About", &[]).is_none());
    }

    #[test]
    fn test_prefix_capture() {
        let pattern = RoutePattern::parse("/tag/:slug").unwrap();
        let params = pattern.capture("/tag/minimalism", &[]).unwrap();
        assert_eq!(params.get("slug"), Some("minimalism"));
        assert!(pattern.capture("/tag/", &[]).is_none());
        assert!(pattern.capture("/tags/x", &[]).is_none());
    }

    #[test]
    fn test_catch_all_capture() {
        let pattern = RoutePattern::parse("/:slug").unwrap();
        let claimed = vec!["tag".to_string(), "shop".to_string()];

        assert_eq!(
            pattern.capture("/some-post-title", &claimed).unwrap().get("slug"),
            Some("some-post-title")
        );
        assert!(pattern.capture("/", &claimed).is_none());
        assert!(pattern.capture("/shop", &claimed).is_none());
        assert!(pattern.capture("/tag", &claimed).is_none());
        assert!(pattern.capture("/tag/lighting", &claimed).is_none());
        assert!(pattern.capture("/unknown/deeply/nested", &claimed).is_none());
        // Claims are whole segments, not string prefixes.
        assert!(pattern.capture("/shopping-guide", &claimed).is_some());
    }

    #[test]
    fn test_namespace() {
        assert_eq!(RoutePattern::parse("/").unwrap().namespace(), None);
        assert_eq!(RoutePattern::parse("/about").unwrap().namespace(), Some("about"));
        assert_eq!(RoutePattern::parse("/tag/:slug").unwrap().namespace(), Some("tag"));
        assert_eq!(RoutePattern::parse("/:slug").unwrap().namespace(), None);
    }
}
