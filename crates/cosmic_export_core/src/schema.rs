use crate::models::{ObjectType, RemoteRecord};

/// Keys never exported as root columns, even when the sample record has them.
pub const EXCLUDED_KEYS: [&str; 3] = ["_id", "metafields", "metadata"];

/// Fixed column layout for one export run, derived once from the first record
/// of the first page. Every later record is projected against it: missing
/// values serialize as null, extra keys are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    pub root_keys: Vec<String>,
    pub meta_keys: Vec<String>,
}

impl ColumnSchema {
    pub fn width(&self) -> usize {
        self.root_keys.len() + self.meta_keys.len()
    }
}

pub fn derive_schema(object_type: &ObjectType, first_record: &RemoteRecord) -> ColumnSchema {
    let meta_keys = object_type
        .metafields
        .iter()
        .map(|field| field.key.clone())
        .collect();
    let root_keys = first_record
        .keys()
        .filter(|key| !EXCLUDED_KEYS.contains(&key.as_str()))
        .cloned()
        .collect();
    ColumnSchema {
        root_keys,
        meta_keys,
    }
}
