//! Ordered request parameters and their wire formatting.
//!
//! Signatures are computed over the exact bytes of the encoded parameters, so
//! every value goes through [`ParamValue`], which formats numbers with Rust's
//! locale-independent `Display` and never emits unset optionals.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use url::form_urlencoded;

/// Separator used when a list-valued parameter is flattened
pub const LIST_SEPARATOR: &str = ",";

/// A value that can be sent as a request parameter.
///
/// `None` means "leave the parameter out".
pub trait ParamValue {
    fn to_param(&self) -> Option<String>;
}

impl ParamValue for str {
    fn to_param(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl ParamValue for String {
    fn to_param(&self) -> Option<String> {
        Some(self.clone())
    }
}

macro_rules! display_param {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ParamValue for $ty {
                fn to_param(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

display_param!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f64, bool, Decimal);

/// Unix time in whole seconds
impl ParamValue for DateTime<Utc> {
    fn to_param(&self) -> Option<String> {
        Some(self.timestamp().to_string())
    }
}

impl<T: ParamValue + ?Sized> ParamValue for &T {
    fn to_param(&self) -> Option<String> {
        (**self).to_param()
    }
}

impl<T: ParamValue> ParamValue for Option<T> {
    fn to_param(&self) -> Option<String> {
        self.as_ref().and_then(ParamValue::to_param)
    }
}

/// Lists are joined with [`LIST_SEPARATOR`]; an empty list is omitted
impl<T: ParamValue> ParamValue for [T] {
    fn to_param(&self) -> Option<String> {
        let items: Vec<String> = self.iter().filter_map(ParamValue::to_param).collect();
        if items.is_empty() {
            None
        } else {
            Some(items.join(LIST_SEPARATOR))
        }
    }
}

impl<T: ParamValue> ParamValue for Vec<T> {
    fn to_param(&self) -> Option<String> {
        self.as_slice().to_param()
    }
}

/// Insertion-ordered string parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter; a value that encodes to nothing is skipped.
    /// Re-inserting a key overwrites its value but keeps its position.
    pub fn insert<V: ParamValue + ?Sized>(&mut self, key: &str, value: &V) {
        let Some(encoded) = value.to_param() else {
            return;
        };

        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = encoded;
        } else {
            self.entries.push((key.to_string(), encoded));
        }
    }

    /// Builder-style [`Params::insert`]
    #[must_use]
    pub fn with<V: ParamValue + ?Sized>(mut self, key: &str, value: &V) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `k1=v1&k2=v2`, in insertion order, form-urlencoded
    pub fn to_query_string(&self) -> String {
        self.iter()
            .map(|(k, v)| encode_pair(k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Encode one `key=value` pair.
///
/// Unreserved characters (`A-Za-z0-9-._*`) pass through untouched.
pub fn encode_pair(key: &str, value: &str) -> String {
    format!("{}={}", encode_component(key), encode_component(value))
}

pub fn encode_component(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}
