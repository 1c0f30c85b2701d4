//! Assembling a sorted batch of request descriptors from one known-good
//! request.
//!
//! The batch starts with the good request itself and adds every invalid
//! (`400`), unauthorized (`401`) and not-found (`404`) corruption of its URL,
//! headers and body. A dispatch layer then sends each descriptor and checks
//! the response status against its `code`.
//!
//! # Example
//!
//! ```
//! use badbatch::{generate_batch, BatchOptions, RequestBody};
//! use serde_json::json;
//!
//! let body = RequestBody::Json(json!({"name": "bob"}));
//! let options = BatchOptions::new().description("create user");
//!
//! let batch = generate_batch("POST", "https://h.org;/users", Some(&body), &options)?;
//!
//! let summary: Vec<_> = batch
//!     .iter()
//!     .map(|request| (request.code.as_str(), request.description.as_str(), request.url.as_str()))
//!     .collect();
//! assert_eq!(
//!     summary,
//!     [
//!         ("201", "create user good", "https://h.org/users"),
//!         ("400", "create user invalid", "https://h.org/aaaaaaaaaaaaaaa"),
//!         ("400", "create user invalid", "https://h.org/users"),
//!         ("404", "create user not found", "https://h.org/aaaaa"),
//!         ("404", "create user not found", "https://h.org/users"),
//!     ]
//! );
//! assert_eq!(batch[2].body, Some(RequestBody::Json(json!({"name": "aaaaaaaaa"}))));
//! # Ok::<(), badbatch::Error>(())
//! ```

use crate::corrupt::Substitutions;
use crate::mutators as m;
use crate::{log, Corrupt, Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The code of descriptors whose expected status cannot be known up front.
pub const UNRESOLVED_CODE: &str = "???";

/// A request body and the form it is sent in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestBody {
    /// A body sent as JSON.
    Json(Value),
    /// A body sent as form data.
    Data(Value),
}

impl RequestBody {
    /// The body itself.
    pub fn value(&self) -> &Value {
        match self {
            RequestBody::Json(value) | RequestBody::Data(value) => value,
        }
    }

    /// A body of the same kind holding `value`.
    pub fn with_value(&self, value: Value) -> Self {
        match self {
            RequestBody::Json(_) => RequestBody::Json(value),
            RequestBody::Data(_) => RequestBody::Data(value),
        }
    }
}

/// One request of a batch, along with the status code it is expected to get.
///
/// Serializes to the object a dispatch layer consumes, with the body under a
/// `json` or `data` key:
///
/// ```
/// use badbatch::{generate_batch, BatchOptions, RequestBody};
/// use serde_json::json;
///
/// let body = RequestBody::Data(json!({"q": "x"}));
/// let batch = generate_batch("get", "https://h.org/s", Some(&body), &BatchOptions::new())?;
///
/// assert_eq!(
///     serde_json::to_value(&batch[0])?,
///     json!({
///         "code": "200",
///         "description": "good",
///         "method": "get",
///         "headers": {},
///         "url": "https://h.org/s",
///         "data": {"q": "x"},
///     })
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// The expected status code, or [`UNRESOLVED_CODE`].
    pub code: String,
    /// What kind of request this is, e.g. `"not found"`.
    pub description: String,
    /// The lowercase HTTP method.
    pub method: String,
    /// The request headers.
    pub headers: Map<String, Value>,
    /// The request URL.
    pub url: String,
    /// The request body, if any.
    #[serde(flatten)]
    pub body: Option<RequestBody>,
}

impl RequestDescriptor {
    /// The leading `|`-separated token of the code, which batches are sorted
    /// by.
    pub fn code_class(&self) -> &str {
        self.code.split('|').next().unwrap_or_default()
    }
}

/// Options for [`generate_batch`].
///
/// # Example
///
/// ```
/// use badbatch::BatchOptions;
/// use serde_json::json;
///
/// let options = BatchOptions::new()
///     .description("list houses")
///     .headers(json!({"Authorization": "Bearer t0k3n"}).as_object().unwrap().clone())
///     // Use the first two corrupted header sets for the unauthorized cases.
///     .bad_header_count(2)
///     // Also append bodies with SQL injection payloads.
///     .unsafe_bodies(true);
/// ```
#[derive(Clone, Debug)]
pub struct BatchOptions {
    description: String,
    headers: Map<String, Value>,
    bad_header_count: usize,
    unsafe_bodies: bool,
    corrupt_query_params: bool,
    minimal: bool,
    corrupt_keys: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchOptions {
    /// Create new, default options: no description, no headers, one bad
    /// header set, query parameters corrupted, minimal corruption, and no
    /// unsafe bodies or key corruption.
    pub fn new() -> Self {
        Self {
            description: String::new(),
            headers: Map::new(),
            bad_header_count: 1,
            unsafe_bodies: false,
            corrupt_query_params: true,
            minimal: true,
            corrupt_keys: false,
        }
    }

    /// Set the description prefixed to every descriptor's description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the headers of the good request.
    pub fn headers(mut self, headers: Map<String, Value>) -> Self {
        self.headers = headers;
        self
    }

    /// Set how many corrupted header sets produce unauthorized cases.
    ///
    /// Defaults to `1`.
    pub fn bad_header_count(mut self, bad_header_count: usize) -> Self {
        self.bad_header_count = bad_header_count;
        self
    }

    /// Set whether bodies carrying injection payloads are appended.
    ///
    /// Defaults to `false`.
    pub fn unsafe_bodies(mut self, unsafe_bodies: bool) -> Self {
        self.unsafe_bodies = unsafe_bodies;
        self
    }

    /// Set whether query parameter values are corrupted.
    ///
    /// Defaults to `true`.
    pub fn corrupt_query_params(mut self, corrupt_query_params: bool) -> Self {
        self.corrupt_query_params = corrupt_query_params;
        self
    }

    /// Set whether fields are corrupted one at a time.
    ///
    /// Defaults to `true`.
    pub fn minimal(mut self, minimal: bool) -> Self {
        self.minimal = minimal;
        self
    }

    /// Set whether body variants with corrupted keys are added.
    ///
    /// Defaults to `false`.
    pub fn corrupt_keys(mut self, corrupt_keys: bool) -> Self {
        self.corrupt_keys = corrupt_keys;
        self
    }
}

fn good_code(method: &str) -> Result<&'static str> {
    match method {
        "get" | "patch" => Ok("200"),
        "post" => Ok("201"),
        "put" | "delete" => Ok("204"),
        _ => Err(Error::unsupported_method(method)),
    }
}

/// Generate the batch of requests derived from one good request.
///
/// `url` may contain a `;` marking where its addressable path starts; the
/// marker is removed from every emitted URL. See the [module
/// documentation][crate::batch] for an example.
///
/// # Errors
///
/// * [`UnsupportedMethod`][crate::ErrorKind::UnsupportedMethod] for verbs
///   other than GET, POST, PUT, PATCH and DELETE.
/// * [`InvalidUrl`][crate::ErrorKind::InvalidUrl] if `url` has no marker and
///   is not an absolute URL.
pub fn generate_batch(
    method: &str,
    url: &str,
    body: Option<&RequestBody>,
    options: &BatchOptions,
) -> Result<Vec<RequestDescriptor>> {
    let method = method.to_lowercase();
    let good_code = good_code(&method)?;

    let prefix = if options.description.is_empty() {
        String::new()
    } else {
        format!("{} ", options.description)
    };
    let clean_url = url.replace(';', "");

    let request = |code: &str, what: &str, headers: &Map<String, Value>, url: &str| {
        RequestDescriptor {
            code: code.to_owned(),
            description: format!("{prefix}{what}"),
            method: method.clone(),
            headers: headers.clone(),
            url: url.to_owned(),
            body: body.cloned(),
        }
    };

    let urls = m::bad_urls()
        .minimal(options.minimal)
        .corrupt_query_params(options.corrupt_query_params);
    let invalid_urls = urls
        .clone()
        .substitutions(Substitutions::invalid())
        .corrupt(url)?;
    let not_found_urls = urls.corrupt(url)?;

    let bad_headers = if options.headers.is_empty() {
        vec![]
    } else {
        m::bad_bodies()
            .minimal(options.minimal)
            .take(options.bad_header_count)
            .corrupt(&Value::Object(options.headers.clone()))?
    };

    let mut batch = vec![request(good_code, "good", &options.headers, &clean_url)];
    for url in &invalid_urls {
        batch.push(request("400", "invalid", &options.headers, url));
    }
    for headers in &bad_headers {
        if let Value::Object(headers) = headers {
            batch.push(request("401", "not auth", headers, &clean_url));
        }
    }
    for url in &not_found_urls {
        batch.push(request("404", "not found", &options.headers, url));
    }

    if let Some(body) = body {
        let bodies = m::bad_bodies()
            .minimal(options.minimal)
            .corrupt_keys(options.corrupt_keys);

        let mut with_body = |code: &str, what: &str, value: Value| {
            let mut descriptor = request(code, what, &options.headers, &clean_url);
            descriptor.body = Some(body.with_value(value));
            batch.push(descriptor);
        };

        let invalid = bodies
            .clone()
            .substitutions(Substitutions::invalid())
            .corrupt(body.value())?;
        for value in invalid {
            with_body("400", "invalid", value);
        }
        for value in bodies.corrupt(body.value())? {
            with_body("404", "not found", value);
        }
        if options.unsafe_bodies {
            for value in m::unsafe_bodies().corrupt(body.value())? {
                with_body(UNRESOLVED_CODE, "unsafe bodies", value);
            }
        }
    }

    batch.sort_by(|a, b| a.code_class().cmp(b.code_class()));

    log::debug!("generated a batch of {} {method} requests", batch.len());
    Ok(batch)
}
