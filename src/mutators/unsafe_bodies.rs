use super::*;
use crate::corrupt::Combinations;
use crate::{log, Result};
use serde_json::{Map, Value};

/// The kind of injection a [`Germ`] attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GermFamily {
    /// Payloads that tamper with a `WHERE` condition.
    Condition,
    /// Payloads that smuggle in a whole query.
    Query,
}

/// An injection payload appended to string fields by [`UnsafeBodies`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Germ {
    /// The kind of injection.
    ///
    /// This is descriptive only. Combinations are filtered by
    /// [`class`][Germ::class], which does not follow the family.
    pub family: GermFamily,
    /// The literal text appended after a space.
    pub payload: &'static str,
}

impl Germ {
    /// The class of this germ: the first character of its payload.
    ///
    /// Combinations of germs are only used when they are spread across
    /// enough classes.
    pub fn class(&self) -> char {
        self.payload.chars().next().unwrap_or(' ')
    }
}

/// The fixed germ catalog, conditions first.
pub const GERMS: [Germ; 6] = [
    Germ {
        family: GermFamily::Condition,
        payload: " '--",
    },
    Germ {
        family: GermFamily::Condition,
        payload: "'+OR+1=1--",
    },
    Germ {
        family: GermFamily::Condition,
        payload: "' and substr(version(),1,10) = 'PostgreSQL' and '1  -> OK",
    },
    Germ {
        family: GermFamily::Query,
        payload: "SELECT version() --",
    },
    Germ {
        family: GermFamily::Query,
        payload: "select database_to_xml(true,true,'');",
    },
    Germ {
        family: GermFamily::Query,
        payload: "UNION SELECT * FROM information_schema.tables --",
    },
];

/// A generator of bodies carrying SQL injection payloads.
///
/// For a body with `n` top-level string fields (file fields excluded), every
/// `n`-combination of [`GERMS`] spanning at least `n` distinct germ classes is
/// considered, and each germ of each such combination yields one body where
/// every targeted field is suffixed with `" " + payload`.
///
/// See the [`unsafe_bodies()`] function to create new instances and for
/// example usage.
#[derive(Clone, Debug, Default)]
pub struct UnsafeBodies {
    _private: (),
}

/// Create a new unsafe body generator.
///
/// # Example
///
/// ```
/// use badbatch::{mutators as m, Corrupt};
/// use serde_json::json;
///
/// let bodies = m::unsafe_bodies().corrupt(&json!({"name": "bob", "age": 3}))?;
///
/// assert_eq!(bodies.len(), 6);
/// assert_eq!(bodies[1], json!({"name": "bob '+OR+1=1--", "age": 3}));
/// # Ok::<(), badbatch::Error>(())
/// ```
pub fn unsafe_bodies() -> UnsafeBodies {
    UnsafeBodies { _private: () }
}

impl UnsafeBodies {
    /// The germ combinations used for a body with `n` targeted fields, in
    /// catalog order.
    pub fn combinations(&self, n: usize) -> Vec<Vec<Germ>> {
        if n == 0 {
            return vec![];
        }

        Combinations::new(GERMS.len(), n)
            .map(|indices| indices.into_iter().map(|i| GERMS[i]).collect::<Vec<_>>())
            .filter(|germs| {
                let mut classes: Vec<char> = germs.iter().map(Germ::class).collect();
                classes.sort_unstable();
                classes.dedup();
                classes.len() >= n
            })
            .collect()
    }
}

impl Corrupt<Value> for UnsafeBodies {
    type Variant = Value;

    fn corrupt(&self, body: &Value) -> Result<Vec<Value>> {
        let Value::Object(fields) = body else {
            log::debug!("unsafe bodies need an object body");
            return Ok(vec![]);
        };

        let targets = fields
            .iter()
            .filter(|(key, value)| value.is_string() && !is_file_path(key))
            .count();

        let mut bodies = vec![];
        for germs in self.combinations(targets) {
            for germ in germs {
                bodies.push(Value::Object(infect(fields, germ)));
            }
        }

        log::debug!("generated {} unsafe bodies from {targets} fields", bodies.len());
        Ok(bodies)
    }
}

fn infect(fields: &Map<String, Value>, germ: Germ) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) if !is_file_path(key) => {
                    Value::String(format!("{s} {}", germ.payload))
                }
                other => other.clone(),
            };
            (key.clone(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_are_leading_characters() {
        let classes: Vec<char> = GERMS.iter().map(Germ::class).collect();
        assert_eq!(classes, [' ', '\'', '\'', 'S', 's', 'U']);
    }

    #[test]
    fn pairs_sharing_a_class_are_skipped() {
        let pairs = unsafe_bodies().combinations(2);
        // C(6, 2) minus the two quote-led conditions paired together.
        assert_eq!(pairs.len(), 14);
        assert!(!pairs.contains(&vec![GERMS[1], GERMS[2]]));
    }

    #[test]
    fn no_combination_spans_more_classes_than_exist() {
        assert_eq!(unsafe_bodies().combinations(5).len(), 2);
        assert!(unsafe_bodies().combinations(6).is_empty());
        assert!(unsafe_bodies().combinations(7).is_empty());
    }
}
