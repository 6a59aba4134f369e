// src/schema/types.rs

use serde::{Deserialize, Serialize};

/// Document header: which database this is and its format version.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq, Hash)]
#[serde(rename_all = "PascalCase")]
pub struct Header {
    #[serde(rename = "Type")]
    pub kind: String,
    pub version: u32,
}

impl Header {
    pub fn new(kind: impl Into<String>, version: u32) -> Self {
        Self {
            kind: kind.into(),
            version,
        }
    }
}

/// One converted source file: header plus records in production order.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct OutputDocument<T> {
    pub header: Header,
    pub body: Vec<T>,
}

impl<T> OutputDocument<T> {
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
