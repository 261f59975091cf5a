//! Tagged view of a serialized document used by the structural walk.
//!
//! Every serialized value falls into exactly one of four shapes. Conversion to
//! and from `serde_json::Value` is lossless, so a walk that preserves shape
//! converts back into the same Rust type it started from.

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A leaf string, the unit of translation.
    Text(String),
    /// Ordered list; position is meaningful.
    List(Vec<Node>),
    /// Named fields in serialization order.
    Record(Vec<(String, Node)>),
    /// Numbers, booleans and null pass through untouched.
    Other(Value),
}

impl Node {
    /// Number of `Text` leaves below this node.
    #[cfg(test)]
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Text(_) => 1,
            Node::List(items) => items.iter().map(Node::leaf_count).sum(),
            Node::Record(fields) => fields.iter().map(|(_, n)| n.leaf_count()).sum(),
            Node::Other(_) => 0,
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Node::Text(s),
            Value::Array(items) => Node::List(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => {
                Node::Record(map.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
            other => Node::Other(other),
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Text(s) => Value::String(s),
            Node::List(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Node::Record(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<Map<String, Value>>(),
            ),
            Node::Other(v) => v,
        }
    }
}
