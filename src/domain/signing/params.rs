//! Parameter sets exchanged with the gateway.
//!
//! A `ParameterSet` is an ordered list of entries rather than a map: the v1
//! signature depends on the order in which the caller supplied the keys, so
//! that order is kept explicitly. Inserting an existing key replaces its value
//! without moving it.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

use rust_decimal::Decimal;

use crate::domain::foundation::ValidationError;

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Present key without a value; canonicalized as `key=`.
    Null,
    /// Plain string value.
    Scalar(String),
    /// Ordered list of values; canonicalized as `key[0]=..key[1]=..`.
    Sequence(Vec<String>),
}

impl ParamValue {
    /// Returns the scalar value, if this is a scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ParamValue::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the elements, if this is a sequence.
    pub fn as_sequence(&self) -> Option<&[String]> {
        match self {
            ParamValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    /// Parses a scalar as a base-10 integer.
    pub fn parse_int(&self) -> Option<i64> {
        self.as_scalar()?.parse().ok()
    }

    /// Appends the canonical `key=value` segments for this value to `out`.
    pub(crate) fn write_canonical(&self, key: &str, out: &mut String) {
        match self {
            ParamValue::Null => {
                out.push_str(key);
                out.push('=');
            }
            ParamValue::Scalar(value) => {
                out.push_str(key);
                out.push('=');
                out.push_str(value);
            }
            ParamValue::Sequence(items) => {
                for (index, item) in items.iter().enumerate() {
                    // Writing into a String cannot fail.
                    let _ = write!(out, "{}[{}]={}", key, index, item);
                }
            }
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Scalar(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Scalar(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Scalar(value.clone())
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue::Scalar(value.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

/// Amounts render in plain decimal form without trailing zeros (`10.00` -> `10`).
impl From<Decimal> for ParamValue {
    fn from(value: Decimal) -> Self {
        ParamValue::Scalar(value.normalize().to_string())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(items: Vec<String>) -> Self {
        ParamValue::Sequence(items)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(items: Vec<&str>) -> Self {
        ParamValue::Sequence(items.into_iter().map(str::to_string).collect())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Null, Into::into)
    }
}

/// Ordered parameter mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    entries: Vec<(String, ParamValue)>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a value, replacing an existing entry in place.
    ///
    /// Returns the previous value when the key was already present.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Returns the value of `key` if it is a scalar.
    pub fn get_scalar(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParamValue::as_scalar)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let position = self.entries.iter().position(|(existing, _)| existing == key)?;
        Some(self.entries.remove(position).1)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts every entry of `other`, overriding existing keys.
    pub fn merge(&mut self, other: &ParameterSet) {
        for (key, value) in other.iter() {
            self.insert(key, value.clone());
        }
    }

    /// Returns a copy without `key`.
    pub fn without(&self, key: &str) -> ParameterSet {
        self.iter()
            .filter(|(existing, _)| *existing != key)
            .map(|(existing, value)| (existing, value.clone()))
            .collect()
    }

    /// Returns the entries named in `fields`, in the order of `fields`.
    ///
    /// Fields that are not present are skipped.
    pub fn select(&self, fields: &[&str]) -> ParameterSet {
        fields
            .iter()
            .filter_map(|field| self.get(field).map(|value| (*field, value.clone())))
            .collect()
    }

    /// Encodes the set as a URL query string, in insertion order.
    pub fn to_query(&self) -> String {
        let mut pairs = Vec::with_capacity(self.entries.len());

        for (key, value) in self.iter() {
            match value {
                ParamValue::Null => pairs.push(format!("{}=", urlencoding::encode(key))),
                ParamValue::Scalar(value) => pairs.push(format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )),
                ParamValue::Sequence(items) => {
                    for (index, item) in items.iter().enumerate() {
                        let indexed = format!("{}[{}]", key, index);
                        pairs.push(format!(
                            "{}={}",
                            urlencoding::encode(&indexed),
                            urlencoding::encode(item)
                        ));
                    }
                }
            }
        }

        pairs.join("&")
    }

    /// Parses a URL query string such as an inbound pingback request.
    ///
    /// `key[0]=a&key[1]=b` folds into a sequence ordered by index, wherever
    /// the entries appear in the query; a repeated index keeps the last
    /// value. `key[]=a` appends after the highest index seen so far. The
    /// sequence takes the position of the first entry for its key. `+`
    /// decodes to a space.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidFormat` if a component is not valid
    /// percent-encoded UTF-8.
    pub fn from_query(query: &str) -> Result<Self, ValidationError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut set = ParameterSet::new();
        let mut sequences: HashMap<String, BTreeMap<usize, String>> = HashMap::new();

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(raw_key)?;
            let value = decode_component(raw_value)?;

            match indexed_key(&key) {
                Some((base, index)) => {
                    if !sequences.contains_key(base) {
                        set.insert(base, ParamValue::Sequence(Vec::new()));
                    }
                    let items = sequences.entry(base.to_string()).or_default();
                    let index = index.unwrap_or_else(|| {
                        items.keys().next_back().map_or(0, |last| last + 1)
                    });
                    items.insert(index, value);
                }
                None => {
                    set.insert(key, value);
                }
            }
        }

        for (base, items) in sequences {
            set.insert(base, ParamValue::Sequence(items.into_values().collect()));
        }

        Ok(set)
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = ParameterSet::new();
        for (key, value) in iter {
            set.insert(key, value);
        }
        set
    }
}

fn decode_component(raw: &str) -> Result<String, ValidationError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| ValidationError::invalid_format("query", e.to_string()))
}

/// Splits keys shaped `base[]` or `base[<digits>]` into the base and the
/// index, if any.
fn indexed_key(key: &str) -> Option<(&str, Option<usize>)> {
    let open = key.find('[')?;
    let (base, rest) = key.split_at(open);
    let index = rest.strip_prefix('[')?.strip_suffix(']')?;

    if base.is_empty() {
        return None;
    }
    if index.is_empty() {
        return Some((base, None));
    }
    if !index.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    index.parse().ok().map(|index| (base, Some(index)))
}
