//! Query bodies for the Conseil `/v2/data` endpoint.
//!
//! Conseil accepts a JSON document of requested fields, predicates, ordering
//! and a row limit. Only the subset of the query language this crate uses is
//! modelled here.

use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConseilOperator {
    Eq,
    In,
    Between,
    Like,
    StartsWith,
    Lt,
    Gt,
}

#[derive(Debug, Clone, Serialize)]
pub struct Predicate {
    pub field: String,
    pub operation: ConseilOperator,
    pub set: Vec<Value>,
    pub inverse: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConseilQuery {
    pub fields: Vec<String>,
    pub predicates: Vec<Predicate>,
    #[serde(rename = "orderBy")]
    pub order_by: Vec<Value>,
    pub aggregation: Vec<Value>,
    pub limit: usize,
}

impl Default for ConseilQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ConseilQuery {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            predicates: Vec::new(),
            order_by: Vec::new(),
            aggregation: Vec::new(),
            limit: DEFAULT_LIMIT,
        }
    }

    /// Restrict the result rows to the named fields.
    pub fn fields<I, S>(mut self, fields: I) -> Self where I: IntoIterator<Item = S>, S: Into<String> {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Require `field <operation> set`.
    pub fn predicate(mut self, field: &str, operation: ConseilOperator, set: Vec<Value>) -> Self {
        self.predicates.push(Predicate {
            field: field.to_string(),
            operation,
            set,
            inverse: false,
        });
        self
    }

    /// Require the negation of `field <operation> set`.
    pub fn exclude(mut self, field: &str, operation: ConseilOperator, set: Vec<Value>) -> Self {
        self.predicates.push(Predicate {
            field: field.to_string(),
            operation,
            set,
            inverse: true,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_serializes_to_conseil_body() {
        let query = ConseilQuery::new()
            .fields(["key", "value"])
            .predicate("big_map_id", ConseilOperator::Eq, vec![json!(511)])
            .predicate("key", ConseilOperator::StartsWith, vec![json!("Pair 0x0000")])
            .exclude("value", ConseilOperator::Eq, vec![json!(0)])
            .limit(10_000);

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "fields": ["key", "value"],
                "predicates": [
                    { "field": "big_map_id", "operation": "eq", "set": [511], "inverse": false },
                    { "field": "key", "operation": "startsWith", "set": ["Pair 0x0000"], "inverse": false },
                    { "field": "value", "operation": "eq", "set": [0], "inverse": true }
                ],
                "orderBy": [],
                "aggregation": [],
                "limit": 10_000
            })
        );
    }

    #[test]
    fn test_operator_wire_names() {
        assert_eq!(serde_json::to_value(ConseilOperator::In).unwrap(), json!("in"));
        assert_eq!(serde_json::to_value(ConseilOperator::StartsWith).unwrap(), json!("startsWith"));
        assert_eq!(serde_json::to_value(ConseilOperator::Between).unwrap(), json!("between"));
    }
}
