//! Path pattern module
//!
//! Parses route patterns such as `/books/:bookName` and matches concrete
//! paths against them, extracting named parameter segments.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use super::RouteError;

/// Characters escaped when a parameter value is written into a path segment
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

/// One `/`-separated piece of a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the path segment byte for byte
    Literal(String),
    /// Captures any non-empty path segment under this name
    Param(String),
}

/// Named parameters extracted from a matched path, in pattern order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Parsed route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern like `/admin/books/:bookId`
    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        let invalid = |reason: &'static str| RouteError::InvalidPattern {
            pattern: raw.to_string(),
            reason,
        };

        if !raw.starts_with('/') {
            return Err(invalid("pattern must start with '/'"));
        }

        let mut segments = Vec::new();
        for piece in split_segments(raw) {
            if let Some(name) = piece.strip_prefix(':') {
                if name.is_empty() {
                    return Err(invalid("parameter name is empty"));
                }
                let duplicate = segments
                    .iter()
                    .any(|s| matches!(s, Segment::Param(existing) if existing == name));
                if duplicate {
                    return Err(invalid("parameter name is used twice"));
                }
                segments.push(Segment::Param(name.to_string()));
            } else if piece.is_empty() {
                return Err(invalid("pattern contains an empty segment"));
            } else {
                segments.push(Segment::Literal(piece.to_string()));
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

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the parameter segments, in order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match a concrete path, returning extracted parameters on success.
    ///
    /// The query string and fragment are ignored and a single trailing slash
    /// is tolerated. Parameter values are percent-decoded; a segment whose
    /// escapes do not decode to UTF-8 is kept as written.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let path = normalize_path(path)?;
        let pieces: Vec<&str> = split_segments(path).collect();
        if pieces.len() != self.segments.len() {
            return None;
        }

        let mut params = Vec::new();
        for (segment, piece) in self.segments.iter().zip(pieces) {
            match segment {
                Segment::Literal(literal) => {
                    if literal != piece {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if piece.is_empty() {
                        return None;
                    }
                    let value = percent_decode_str(piece)
                        .decode_utf8()
                        .map_or_else(|_| piece.to_string(), std::borrow::Cow::into_owned);
                    params.push((name.clone(), value));
                }
            }
        }

        Some(Params(params))
    }

    /// Build a concrete path by substituting parameter values
    pub fn fill(&self, route: &str, values: &[(&str, &str)]) -> Result<String, RouteError> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(literal) => path.push_str(literal),
                Segment::Param(name) => {
                    let value = values
                        .iter()
                        .find(|(key, _)| key == name)
                        .map(|(_, value)| *value)
                        .filter(|value| !value.is_empty())
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

/// Strip query, fragment and one trailing slash
///
/// `None` for relative paths and for paths still ending in `/` after the
/// strip (`//`, `/login//`).
fn normalize_path(path: &str) -> Option<&str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    if !path.starts_with('/') {
        return None;
    }
    if path.len() == 1 {
        return Some(path);
    }
    let stripped = path.strip_suffix('/').unwrap_or(path);
    if stripped.ends_with('/') {
        None
    } else {
        Some(stripped)
    }
}

/// Split an absolute path into segments; `/` yields nothing
fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = &path[1..];
    trimmed.split('/').filter(move |_| !trimmed.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal_and_param() {
        let pattern = PathPattern::parse("/books/:bookName").unwrap();
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Literal("books".to_string()),
                Segment::Param("bookName".to_string())
            ]
        );
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["bookName"]);
    }

    #[test]
    fn test_parse_root() {
        let pattern = PathPattern::parse("/").unwrap();
        assert!(pattern.segments().is_empty());
        assert!(pattern.matches("/").is_some());
        assert!(pattern.matches("/books").is_none());
    }

    #[test]
    fn test_parse_rejects_bad_patterns() {
        assert!(PathPattern::parse("books").is_err());
        assert!(PathPattern::parse("/books/:").is_err());
        assert!(PathPattern::parse("/a/:id/b/:id").is_err());
        assert!(PathPattern::parse("/a//b").is_err());
    }

    #[test]
    fn test_match_extracts_param() {
        let pattern = PathPattern::parse("/admin/books/:bookId").unwrap();
        let params = pattern.matches("/admin/books/42").unwrap();
        assert_eq!(params.get("bookId"), Some("42"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_match_ignores_query_fragment_and_trailing_slash() {
        let pattern = PathPattern::parse("/books/:bookName").unwrap();
        let params = pattern.matches("/books/dune/?page=2#top").unwrap();
        assert_eq!(params.get("bookName"), Some("dune"));
        assert!(pattern.matches("/books/dune?x=1").is_some());
    }

    #[test]
    fn test_match_is_case_sensitive_and_segment_exact() {
        let pattern = PathPattern::parse("/books").unwrap();
        assert!(pattern.matches("/Books").is_none());
        assert!(pattern.matches("/books/extra").is_none());
        assert!(pattern.matches("books").is_none());
    }

    #[test]
    fn test_param_requires_non_empty_segment() {
        let pattern = PathPattern::parse("/books/:bookName").unwrap();
        assert!(pattern.matches("/books//").is_none());
    }

    #[test]
    fn test_param_is_percent_decoded() {
        let pattern = PathPattern::parse("/books/:bookName").unwrap();
        let params = pattern.matches("/books/the%20hobbit").unwrap();
        assert_eq!(params.get("bookName"), Some("the hobbit"));
    }

    #[test]
    fn test_undecodable_param_kept_verbatim() {
        let pattern = PathPattern::parse("/books/:bookName").unwrap();
        assert_eq!(pattern.matches("/books/%FF").unwrap().get("bookName"), Some("%FF"));
        assert_eq!(pattern.matches("/books/%FE").unwrap().get("bookName"), Some("%FE"));
    }

    #[test]
    fn test_only_one_trailing_slash_tolerated() {
        let root = PathPattern::parse("/").unwrap();
        assert!(root.matches("/").is_some());
        assert!(root.matches("//").is_none());

        let login = PathPattern::parse("/login").unwrap();
        assert!(login.matches("/login/").is_some());
        assert!(login.matches("/login//").is_none());
    }

    #[test]
    fn test_fill_encodes_values() {
        let pattern = PathPattern::parse("/books/:bookName").unwrap();
        let path = pattern.fill("Book", &[("bookName", "a/b c")]).unwrap();
        assert_eq!(path, "/books/a%2Fb%20c");
        assert_eq!(pattern.matches(&path).unwrap().get("bookName"), Some("a/b c"));
    }

    #[test]
    fn test_fill_missing_param() {
        let pattern = PathPattern::parse("/books/:bookName").unwrap();
        let err = pattern.fill("Book", &[]).unwrap_err();
        assert!(matches!(err, RouteError::MissingParam { .. }));
    }
}
