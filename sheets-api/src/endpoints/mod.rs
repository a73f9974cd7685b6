pub mod values;

use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Default, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpreadsheetId(String);

impl SpreadsheetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SpreadsheetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpreadsheetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SpreadsheetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A range in A1 notation, e.g. `Sheet1!A:C`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct A1Range(String);

impl A1Range {
    pub fn new(range: impl Into<String>) -> Self {
        Self(range.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Percent-encoded form for use as a path segment
    pub fn encoded(&self) -> String {
        urlencoding::encode(&self.0).into_owned()
    }
}

impl Default for A1Range {
    fn default() -> Self {
        Self("Sheet1!A:C".to_string())
    }
}

impl Display for A1Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for A1Range {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for A1Range {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// How input data is interpreted by the API
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueInputOption {
    /// Stored as-is, never parsed as formulas or numbers
    #[default]
    Raw,
    UserEntered,
}

impl Display for ValueInputOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Raw => f.write_str("RAW"),
            Self::UserEntered => f.write_str("USER_ENTERED"),
        }
    }
}

/// How existing data is changed when new data is appended
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsertDataOption {
    Overwrite,
    #[default]
    InsertRows,
}

impl Display for InsertDataOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overwrite => f.write_str("OVERWRITE"),
            Self::InsertRows => f.write_str("INSERT_ROWS"),
        }
    }
}

/// Appends are always sent row-major
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dimension {
    #[default]
    Rows,
}

/// Body of a values request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<A1Range>,
    pub major_dimension: Dimension,
    pub values: Vec<Vec<String>>,
}

impl ValueRange {
    pub fn rows(values: Vec<Vec<String>>) -> Self {
        Self {
            range: None,
            major_dimension: Dimension::Rows,
            values,
        }
    }
}
