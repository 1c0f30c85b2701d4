use super::*;
use crate::corrupt::{Corruption, Substitutions};
use crate::{log, Result};
use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};
use url::{form_urlencoded, Position, Url};

/// A generator of corrupted URLs.
///
/// Path segments and query parameter values are corruption targets. A `;` in
/// the URL (before the query) marks where the addressable path starts:
/// everything in front of it is kept verbatim. Without a marker, every
/// segment after the origin is addressable.
///
/// See the [`bad_urls()`] function to create new instances and for example
/// usage.
#[derive(Clone, Debug)]
pub struct BadUrls {
    corruption: Corruption,
    corrupt_query_params: bool,
}

impl Default for BadUrls {
    fn default() -> Self {
        bad_urls()
    }
}

/// Create a new bad URL generator with default substitutions, in minimal
/// mode, corrupting query parameters too.
///
/// # Example
///
/// ```
/// use badbatch::{mutators as m, Corrupt};
///
/// let urls = m::bad_urls().corrupt("https://h.org;/houseId/1b/2c?param=value1&another=2")?;
///
/// assert_eq!(
///     urls,
///     [
///         "https://h.org/aaaaaaa/1b/2c?param=value1&another=2",
///         "https://h.org/houseId/0a/2c?param=value1&another=2",
///         "https://h.org/houseId/1b/0a?param=value1&another=2",
///         "https://h.org/houseId/1b/2c?param=aaaaa0&another=2",
///         "https://h.org/houseId/1b/2c?param=value1&another=0",
///         "https://h.org/aaaaaaa/0a/0a?param=aaaaa0&another=0",
///     ]
/// );
/// # Ok::<(), badbatch::Error>(())
/// ```
pub fn bad_urls() -> BadUrls {
    BadUrls {
        corruption: Corruption::new(),
        corrupt_query_params: true,
    }
}

impl BadUrls {
    /// Set the substitutions applied to corrupted segments and values.
    pub fn substitutions(mut self, substitutions: Substitutions) -> Self {
        self.corruption = self.corruption.substitutions(substitutions);
        self
    }

    /// Set whether segments are corrupted one at a time (the default) or a
    /// third of them at a time.
    pub fn minimal(mut self, minimal: bool) -> Self {
        self.corruption = self.corruption.minimal(minimal);
        self
    }

    /// Set whether query parameter values are corrupted. Defaults to `true`.
    ///
    /// When `false` the baseline query is appended unchanged to every URL.
    pub fn corrupt_query_params(mut self, corrupt_query_params: bool) -> Self {
        self.corrupt_query_params = corrupt_query_params;
        self
    }
}

impl Corrupt<str> for BadUrls {
    type Variant = String;

    fn corrupt(&self, url: &str) -> Result<Vec<String>> {
        let parts = UrlParts::parse(url)?;
        let tree = parts.tree(self.corrupt_query_params);
        let clean = url.replace(';', "");
        let baseline = parts.rebuild(&tree);

        let mut urls = IndexSet::new();
        for variant in self.corruption.corrupt(&crate::flatten(&tree))? {
            let bad = parts.rebuild(&crate::unflatten(&variant.entries)?);
            if bad != clean && bad != baseline {
                urls.insert(bad);
            }
        }

        log::debug!("generated {} bad urls for {url}", urls.len());
        Ok(urls.into_iter().collect())
    }
}

/// A URL split into its fixed base, its addressable path segments and its
/// query parameters grouped by name.
#[derive(Debug)]
struct UrlParts {
    base: String,
    segments: Vec<String>,
    query: IndexMap<String, Vec<String>>,
}

impl UrlParts {
    fn parse(url: &str) -> Result<Self> {
        let url = url.split_once('#').map_or(url, |(head, _)| head);
        let head = url.split_once('?').map_or(url, |(head, _)| head);

        let (base, path, query) = match head.find(';') {
            Some(marker) => {
                let rest = url[marker + 1..].replace(';', "");
                let (path, query) = match rest.split_once('?') {
                    Some((path, query)) => (path.to_owned(), query.to_owned()),
                    None => (rest.clone(), String::new()),
                };
                (url[..marker].trim_end_matches('/').to_owned(), path, query)
            }
            None => {
                let parsed = Url::parse(url)?;
                (
                    parsed[..Position::BeforePath].to_owned(),
                    parsed.path().to_owned(),
                    parsed.query().unwrap_or_default().to_owned(),
                )
            }
        };

        let segments = path
            .trim_start_matches('/')
            .split('/')
            .map(str::to_owned)
            .collect();

        let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            grouped
                .entry(name.into_owned())
                .or_default()
                .push(value.into_owned());
        }

        Ok(Self {
            base,
            segments,
            query: grouped,
        })
    }

    /// The corruptable structure: `{"params": {..}, "query": {..}}`.
    ///
    /// Entries are keyed `{name}_{position}` so that repeated names stay
    /// distinct, with dots replaced so that flat paths stay unambiguous.
    fn tree(&self, with_query: bool) -> Value {
        let mut tree = Map::new();

        let params = self
            .segments
            .iter()
            .enumerate()
            .map(|(i, segment)| (entry_key(segment, i), Value::String(segment.clone())))
            .collect();
        tree.insert("params".to_owned(), Value::Object(params));

        if with_query && !self.query.is_empty() {
            tree.insert("query".to_owned(), Value::Object(self.query_groups()));
        }

        Value::Object(tree)
    }

    fn query_groups(&self) -> Map<String, Value> {
        self.query
            .iter()
            .enumerate()
            .map(|(i, (name, values))| {
                let values = values.iter().cloned().map(Value::String).collect();
                (entry_key(name, i), Value::Array(values))
            })
            .collect()
    }

    /// Reassemble a URL from a (possibly corrupted) structure built by
    /// [`UrlParts::tree`]. A structure without a query falls back to the
    /// baseline query.
    fn rebuild(&self, tree: &Value) -> String {
        let params = tree
            .get("params")
            .and_then(Value::as_object)
            .map(|params| params.values().map(text).collect::<Vec<_>>().join("/"))
            .unwrap_or_default();

        let query = match tree.get("query").and_then(Value::as_object) {
            Some(groups) => self.encode(groups),
            None => self.encode(&self.query_groups()),
        };

        let mut url = format!("{}/{}", self.base, params.trim_end_matches('/'));
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }
        url
    }

    /// Form-encode `groups`, positionally paired with the baseline parameter
    /// names. Repeated names are emitted once per value.
    fn encode(&self, groups: &Map<String, Value>) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, values) in self.query.keys().zip(groups.values()) {
            match values {
                Value::Array(values) => {
                    for value in values {
                        serializer.append_pair(name, &text(value));
                    }
                }
                value => {
                    serializer.append_pair(name, &text(value));
                }
            }
        }
        serializer.finish()
    }
}

fn entry_key(name: &str, position: usize) -> String {
    format!("{}_{position}", name.replace('.', "_"))
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
