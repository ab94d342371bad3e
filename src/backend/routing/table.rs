//! Route table: path patterns, parameter extraction and reverse routing.

use super::RouteError;
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Route names used by the application.
pub mod names {
    pub const HOME: &str = "home";
    pub const OFFERS: &str = "offers";
    pub const PROFILE: &str = "profile";
    pub const LOGIN: &str = "login";
    pub const ALTA_INMUEBLE: &str = "alta-inmueble";
    pub const CATEGORY: &str = "category";
    pub const PROPERTY_DETAIL: &str = "PropertyDetail";
}

/// Characters escaped when a parameter value is written into a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// A parsed path pattern such as `/property/:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parses a pattern. Segments starting with `:` are named parameters.
    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        let invalid = |reason| RouteError::InvalidPattern {
            pattern: raw.to_string(),
            reason,
        };

        if !raw.starts_with('/') {
            return Err(invalid("must start with '/'"));
        }
        if raw.contains(['?', '#']) {
            return Err(invalid("query and fragment are not part of a pattern"));
        }

        let mut segments: Vec<Segment> = Vec::new();
        for part in split_segments(raw) {
            if let Some(name) = part.strip_prefix(':') {
                if name.is_empty()
                    || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                {
                    return Err(invalid("parameter names are alphanumeric"));
                }
                if segments
                    .iter()
                    .any(|s| matches!(s, Segment::Param(existing) if existing == name))
                {
                    return Err(invalid("duplicate parameter"));
                }
                segments.push(Segment::Param(name.to_string()));
            } else if part.is_empty() {
                return Err(invalid("empty segment"));
            } else {
                segments.push(Segment::Static(part.to_string()));
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Names of the parameters in order of appearance.
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Whether some concrete path could match both patterns.
    pub fn collides_with(&self, other: &Self) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Static(a), Segment::Static(b)) => a == b,
                    _ => true,
                })
    }

    fn matches(&self, parts: &[&str]) -> Option<RouteParams> {
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = RouteParams::default();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(expected) if expected == part => {}
                Segment::Param(name) if !part.is_empty() => {
                    let value = percent_decode_str(part).decode_utf8().ok()?;
                    params.insert(name.clone(), value.into_owned());
                }
                _ => return None,
            }
        }
        Some(params)
    }

    fn fill(&self, route: &str, params: &RouteParams) -> Result<String, RouteError> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(value) => path.push_str(value),
                Segment::Param(name) => {
                    let value = params
                        .get(name)
                        .filter(|v| !v.is_empty())
                        .ok_or_else(|| RouteError::MissingParam {
                            route: route.to_string(),
                            param: name.clone(),
                        })?;
                    path.extend(utf8_percent_encode(value, SEGMENT));
                }
            }
        }
        Ok(path)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Values extracted from parameterized segments, keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<const N: usize> From<[(&str, &str); N]> for RouteParams {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// A single entry of the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    pattern: PathPattern,
    name: String,
    view: String,
    requires_auth: bool,
}

impl RouteDefinition {
    /// Creates a public route. Use [`RouteDefinition::protected`] to gate it.
    pub fn new(
        pattern: &str,
        name: impl Into<String>,
        view: impl Into<String>,
    ) -> Result<Self, RouteError> {
        Ok(Self {
            pattern: PathPattern::parse(pattern)?,
            name: name.into(),
            view: view.into(),
            requires_auth: false,
        })
    }

    /// Marks the route as requiring a signed-in identity.
    #[must_use]
    pub fn protected(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn view(&self) -> &str {
        &self.view
    }

    pub fn requires_auth(&self) -> bool {
        self.requires_auth
    }
}

/// Result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute<'a> {
    pub definition: &'a RouteDefinition,
    pub path: String,
    pub params: RouteParams,
}

/// Immutable lookup structure built once at startup. Clones share storage.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Arc<[RouteDefinition]>,
}

impl RouteTable {
    /// Builds a table, rejecting duplicate names and overlapping patterns.
    pub fn new(routes: Vec<RouteDefinition>) -> Result<Self, RouteError> {
        for (i, route) in routes.iter().enumerate() {
            for earlier in &routes[..i] {
                if earlier.name == route.name {
                    return Err(RouteError::DuplicateName(route.name.clone()));
                }
                if earlier.pattern.collides_with(&route.pattern) {
                    return Err(RouteError::PatternCollision {
                        pattern: route.pattern.to_string(),
                        existing: earlier.pattern.to_string(),
                    });
                }
            }
        }

        Ok(Self {
            routes: routes.into(),
        })
    }

    /// The application's route surface.
    pub fn standard() -> Result<Self, RouteError> {
        Self::new(vec![
            RouteDefinition::new("/", names::HOME, "Home")?,
            RouteDefinition::new("/offers", names::OFFERS, "Offers")?,
            RouteDefinition::new("/profile", names::PROFILE, "Profile")?.protected(),
            RouteDefinition::new("/login", names::LOGIN, "Login")?,
            RouteDefinition::new("/alta-inmueble", names::ALTA_INMUEBLE, "AltaInmueble")?
                .protected(),
            RouteDefinition::new("/category/:category", names::CATEGORY, "Category")?,
            RouteDefinition::new("/property/:id", names::PROPERTY_DETAIL, "PropertyDetail")?,
        ])
    }

    /// Resolves a path to its route and extracted parameters.
    ///
    /// Query string and fragment are ignored, as is a single trailing slash.
    /// Parameter values are percent-decoded.
    pub fn resolve(&self, path: &str) -> Result<ResolvedRoute<'_>, RouteError> {
        let normalized = normalize(path).ok_or_else(|| RouteError::NotFound(path.to_string()))?;
        let parts: Vec<&str> = split_segments(normalized).collect();

        self.routes
            .iter()
            .find_map(|definition| {
                definition.pattern.matches(&parts).map(|params| ResolvedRoute {
                    definition,
                    path: normalized.to_string(),
                    params,
                })
            })
            .ok_or_else(|| RouteError::NotFound(path.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&RouteDefinition> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Builds the concrete path for a named route.
    pub fn href(&self, name: &str, params: &RouteParams) -> Result<String, RouteError> {
        let route = self
            .get(name)
            .ok_or_else(|| RouteError::NotFound(name.to_string()))?;
        route.pattern.fill(name, params)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDefinition> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    trimmed.split('/').filter(move |_| !trimmed.is_empty())
}

fn normalize(path: &str) -> Option<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    if path.is_empty() {
        return Some("/");
    }
    if !path.starts_with('/') {
        return None;
    }
    match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => Some(stripped),
        _ => Some(path),
    }
}
