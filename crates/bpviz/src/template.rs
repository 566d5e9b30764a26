//! Text templates with `{key}` placeholders.
//!
//! Templates describe participant names and note texts for function kinds,
//! e.g. `{namespace}/{kind}/{name}`. A placeholder is a brace pair around a
//! non-empty run of ASCII letters, digits, `_`, `-` or `.`. Any other brace is
//! literal text, so `{{ .Deployment.Name }}` and Mermaid markup such as `<br>`
//! pass through unchanged.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Placeholder(String),
}

/// A parsed text template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parses a template source string.
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let segments = parse_segments(&source);
        Self { source, segments }
    }

    /// Returns the original template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the placeholder keys in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(key) => Some(key.as_str()),
            Segment::Text(_) => None,
        })
    }

    /// Renders the template, asking `resolve` for the value of each placeholder.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `resolve`.
    pub fn render<E>(
        &self,
        mut resolve: impl FnMut(&str) -> Result<String, E>,
    ) -> Result<String, E> {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Placeholder(key) => out.push_str(&resolve(key)?),
            }
        }
        Ok(out)
    }
}

impl From<String> for Template {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}

impl From<&str> for Template {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

fn parse_segments(source: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut rest = source;

    while let Some(open) = rest.find('{') {
        text.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let key_len = after.find(|c: char| !is_key_char(c)).unwrap_or(after.len());

        if key_len > 0 && after[key_len..].starts_with('}') {
            if !text.is_empty() {
                segments.push(Segment::Text(std::mem::take(&mut text)));
            }
            segments.push(Segment::Placeholder(after[..key_len].to_string()));
            rest = &after[key_len + 1..];
        } else {
            text.push('{');
            rest = after;
        }
    }

    text.push_str(rest);
    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
    segments
}
