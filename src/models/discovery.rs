//! Discovery query result models.

use crate::known_fields;
use crate::record::{Dynamic, DynamicObject, DynamicRecord};
use serde::{Deserialize, Serialize};

/// Relevance information attached to a query result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResultMetadata {
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

known_fields! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct QueryResultFields {
        "id" => pub id: String,
        "metadata" => pub metadata: DynamicObject,
        "collection_id" => pub collection_id: String,
        "result_metadata" => pub result_metadata: QueryResultMetadata,
    }
}

/// One matching document. Every field of the stored document that is not
/// one of the fixed result fields is kept as an extension.
pub type QueryResult = DynamicRecord<QueryResultFields>;

impl QueryResult {
    pub fn id(&self) -> Option<&str> {
        self.known.id.as_deref()
    }

    pub fn score(&self) -> Option<f64> {
        self.known.result_metadata.as_ref().map(|m| m.score)
    }

    /// A document field, looked up with a dotted path through nested objects.
    pub fn field(&self, path: &str) -> Option<&Dynamic> {
        let mut parts = path.split('.');
        let mut current = self.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }
}

/// Response of a collection query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_results: Option<i64>,
    #[serde(default)]
    pub results: Vec<QueryResult>,
}

impl QueryResponse {
    /// Results ordered by descending score; results without a score go last.
    pub fn ranked(&self) -> Vec<&QueryResult> {
        let mut ranked: Vec<&QueryResult> = self.results.iter().collect();
        ranked.sort_by(|a, b| {
            let a = a.score().unwrap_or(f64::NEG_INFINITY);
            let b = b.score().unwrap_or(f64::NEG_INFINITY);
            b.total_cmp(&a)
        });
        ranked
    }
}
