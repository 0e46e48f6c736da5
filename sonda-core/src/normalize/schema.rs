//! Declarative description of a provider's response shape.

use serde_json::Value;
use sonda_types::{Field, FieldValue, SondaError};

/// How to turn the JSON found at an alias path into a [`FieldValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extract {
    /// String (trimmed) or number rendered as text.
    Text,
    /// Number, or a string that parses as one. Non-finite values are dropped.
    Number,
    /// One component of a `"lat,lon"` string.
    LocPart(usize),
    /// Boolean, `"true"`/`"yes"`/`"1"` style strings, or 0/1 numbers.
    Flag,
    /// Array of strings or numbers.
    List,
    /// Array of objects; collect the text under the given key.
    ListOf(&'static str),
    /// Length of an array, or a plain number.
    Count,
    /// Autonomous system number from `15169`, `"15169"`, `"AS15169"` or
    /// `"AS15169 Google LLC"`; always rendered as `AS<digits>`.
    Asn,
    /// Array of objects; text under `take` of the first object whose `key`
    /// equals `equals` (case-insensitive).
    Find {
        /// Discriminating key.
        key: &'static str,
        /// Expected value of `key`.
        equals: &'static str,
        /// Key to read from the matching object.
        take: &'static str,
    },
}

/// One canonical field and the places a provider may put it.
///
/// Paths are dotted (`data.abuseConfidenceScore`); numeric segments index
/// arrays and the empty path is the document root. The first path that yields
/// a non-empty value wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAlias {
    /// Canonical field.
    pub field: Field,
    /// Candidate paths, most specific first.
    pub paths: &'static [&'static str],
    /// Conversion applied to the value found.
    pub extract: Extract,
}

impl FieldAlias {
    /// Alias with text extraction.
    #[must_use]
    pub const fn text(field: Field, paths: &'static [&'static str]) -> Self {
        Self {
            field,
            paths,
            extract: Extract::Text,
        }
    }

    /// Alias with an explicit extraction.
    #[must_use]
    pub const fn new(field: Field, paths: &'static [&'static str], extract: Extract) -> Self {
        Self {
            field,
            paths,
            extract,
        }
    }

    pub(crate) fn resolve(&self, raw: &Value) -> Option<FieldValue> {
        self.paths
            .iter()
            .filter_map(|p| lookup(raw, p))
            .filter_map(|v| extract(v, self.extract))
            .find(|v| !v.is_empty())
    }
}

/// Predicate applied to the value at a body rule's path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// Case-insensitive equality with the value's text form.
    Equals(&'static str),
    /// Case-insensitive substring of the value's text form.
    Contains(&'static str),
    /// Any non-null value.
    Present,
    /// Nothing, or null, at the path.
    Missing,
}

/// What a matching body rule means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Valid "no data" answer.
    NotFound,
    /// Provider-specific throttling marker.
    RateLimited,
    /// Provider rejected the key inside a successful HTTP response.
    CredentialInvalid,
    /// Any other provider-signalled failure.
    Upstream,
}

/// Marker in a 2xx response body that signals something other than data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyRule {
    /// Dotted path, as for [`FieldAlias`].
    pub path: &'static str,
    /// Predicate on the value at `path`.
    pub matches: Match,
    /// Classification when the predicate holds.
    pub outcome: RuleOutcome,
}

impl BodyRule {
    /// Build a rule.
    #[must_use]
    pub const fn new(path: &'static str, matches: Match, outcome: RuleOutcome) -> Self {
        Self {
            path,
            matches,
            outcome,
        }
    }
}

/// Field aliases plus body-marker rules for one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    /// Field aliases, applied in order; earlier entries win for the same field.
    pub aliases: &'static [FieldAlias],
    /// Body rules, applied in order; the first match wins.
    pub rules: &'static [BodyRule],
}

const MESSAGE_PATHS: &[&str] = &[
    "message",
    "reason",
    "error.info",
    "error.message",
    "error.type",
    "error",
];

impl Schema {
    /// Classify a 2xx body that carries a failure or "no data" marker.
    ///
    /// Returns `None` when no rule matches and the body should be normalized.
    #[must_use]
    pub fn classify(&self, provider: &str, status: u16, raw: &Value) -> Option<SondaError> {
        let rule = self.rules.iter().find(|r| {
            let found = lookup(raw, r.path).filter(|v| !v.is_null());
            match (r.matches, found) {
                (Match::Missing, found) => found.is_none(),
                (_, None) => false,
                (Match::Present, Some(_)) => true,
                (Match::Equals(s), Some(v)) => {
                    text_form(v).is_some_and(|t| t.eq_ignore_ascii_case(s))
                }
                (Match::Contains(s), Some(v)) => text_form(v)
                    .is_some_and(|t| t.to_ascii_lowercase().contains(&s.to_ascii_lowercase())),
            }
        })?;

        let msg = MESSAGE_PATHS
            .iter()
            .filter_map(|p| lookup(raw, p))
            .find_map(|v| text_form(v).filter(|t| !t.is_empty()))
            .unwrap_or_else(|| format!("marker at `{}`", rule.path));

        Some(match rule.outcome {
            RuleOutcome::NotFound => SondaError::not_found(format!("{provider}: {msg}")),
            RuleOutcome::RateLimited => SondaError::rate_limited(provider, msg),
            RuleOutcome::CredentialInvalid => SondaError::credential_invalid(provider, status),
            RuleOutcome::Upstream => SondaError::upstream(provider, status, msg),
        })
    }
}

/// Resolve a dotted path against a JSON document.
pub(crate) fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(root);
    }
    path.split('.').try_fold(root, |cur, seg| match cur {
        Value::Object(map) => map.get(seg),
        Value::Array(items) => seg.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn text_form(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn number_form(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn asn_form(v: &Value) -> Option<String> {
    let raw = match v {
        Value::Number(n) => n.as_u64()?.to_string(),
        Value::String(s) => s.split_whitespace().next()?.to_string(),
        _ => return None,
    };
    let digits = raw
        .strip_prefix("AS")
        .or_else(|| raw.strip_prefix("as"))
        .unwrap_or(&raw);
    (!digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
        .then(|| format!("AS{digits}"))
}

fn extract(v: &Value, how: Extract) -> Option<FieldValue> {
    match how {
        Extract::Text => match v {
            Value::String(_) | Value::Number(_) => text_form(v).map(FieldValue::Text),
            _ => None,
        },
        Extract::Number => number_form(v).map(FieldValue::Number),
        Extract::LocPart(i) => v
            .as_str()
            .and_then(|s| s.split(',').nth(i))
            .and_then(|p| p.trim().parse::<f64>().ok())
            .filter(|n| n.is_finite())
            .map(FieldValue::Number),
        Extract::Flag => match v {
            Value::Bool(b) => Some(FieldValue::Flag(*b)),
            Value::Number(n) => match n.as_u64() {
                Some(0) => Some(FieldValue::Flag(false)),
                Some(1) => Some(FieldValue::Flag(true)),
                _ => None,
            },
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Some(FieldValue::Flag(true)),
                "false" | "no" | "0" => Some(FieldValue::Flag(false)),
                _ => None,
            },
            _ => None,
        },
        Extract::List => match v {
            Value::Array(items) => Some(FieldValue::List(
                items.iter().filter_map(text_form).collect(),
            )),
            Value::String(s) if !s.trim().is_empty() => {
                Some(FieldValue::List(vec![s.trim().to_string()]))
            }
            _ => None,
        },
        Extract::ListOf(key) => v.as_array().map(|items| {
            FieldValue::List(
                items
                    .iter()
                    .filter_map(|item| item.get(key))
                    .filter_map(text_form)
                    .collect(),
            )
        }),
        Extract::Count => match v {
            #[allow(clippy::cast_precision_loss)]
            Value::Array(items) => Some(FieldValue::Number(items.len() as f64)),
            Value::Number(_) => number_form(v).map(FieldValue::Number),
            _ => None,
        },
        Extract::Asn => asn_form(v).map(FieldValue::Text),
        Extract::Find { key, equals, take } => v.as_array().and_then(|items| {
            items
                .iter()
                .find(|item| {
                    item.get(key)
                        .and_then(text_form)
                        .is_some_and(|t| t.eq_ignore_ascii_case(equals))
                })
                .and_then(|item| item.get(take))
                .and_then(text_form)
                .map(FieldValue::Text)
        }),
    }
}
