use serde::{Deserialize, Serialize};
use serde_json::Value;
use vtab_types::DEFAULT_MARKER_KEY;

/// Configuration for [`merge_columns`](crate::merge_columns).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Reserved provenance key; it and everything beneath it never become
    /// rows.
    pub marker_key: String,
    /// Detection of embedded Op payloads. `None` disables the special case.
    pub op_payload: Option<OpPayloadRule>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            marker_key: DEFAULT_MARKER_KEY.into(),
            op_payload: Some(OpPayloadRule::default()),
        }
    }
}

/// How to recognise an embedded executable ("Op") payload.
///
/// An object is an Op payload when its `marker_field` holds the string
/// `marker_value`. Its code reference lives in `code_field`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpPayloadRule {
    pub marker_field: String,
    pub marker_value: String,
    pub code_field: String,
}

impl Default for OpPayloadRule {
    fn default() -> Self {
        Self {
            marker_field: "_type".into(),
            marker_value: "Op".into(),
            code_field: "code".into(),
        }
    }
}

impl OpPayloadRule {
    /// The code reference of `value` if it is an Op payload.
    ///
    /// A payload without a code field yields `null`.
    pub fn code_of<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        static NULL: Value = Value::Null;
        let object = value.as_object()?;
        let marker = object.get(&self.marker_field)?.as_str()?;
        if marker != self.marker_value {
            return None;
        }
        Some(object.get(&self.code_field).unwrap_or(&NULL))
    }
}
