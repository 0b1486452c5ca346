//! Own-member listings of a value

use strum::IntoStaticStr;

use crate::value::Value;

/// Listing requested by `keys`, `values` or `entries`
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Introspection {
    Keys,
    Values,
    Entries,
}

impl Introspection {
    /// Helper subject the listings are routed through in the breadcrumb
    pub(crate) const HELPER: &'static str = "Object";

    pub(crate) fn apply(self, value: &Value) -> Value {
        let members = own_members(value);
        match self {
            Self::Keys => members.into_iter().map(|(name, _)| name).collect::<Vec<_>>().into(),
            Self::Values => members.into_iter().map(|(_, value)| value).collect::<Vec<_>>().into(),
            Self::Entries => members
                .into_iter()
                .map(|(name, value)| Value::from(vec![Value::from(name), value]))
                .collect::<Vec<_>>()
                .into(),
        }
    }
}

/// Enumerable own members: object fields, array elements and string
/// characters keyed by index
fn own_members(value: &Value) -> Vec<(String, Value)> {
    match value {
        Value::Object(object) => object.entries(),
        Value::Array(array) => array
            .to_vec()
            .into_iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item))
            .collect(),
        Value::String(s) => s
            .chars()
            .enumerate()
            .map(|(index, c)| (index.to_string(), Value::from(c.to_string())))
            .collect(),
        _ => Vec::new(),
    }
}
