//! Structural Translator: translates every leaf string of a value while keeping
//! its shape.
//!
//! # Walk rules
//! - `Text`: sent to the gateway; on failure the original text is kept and the
//!   leaf path is recorded as degraded. Empty strings are never sent.
//! - `List`: every element walked concurrently, reassembled by position.
//! - `Record`: a field named `id` is copied verbatim whatever its shape; every
//!   other field is walked concurrently, reassembled in field order.
//! - `Other`: returned unchanged.
//!
//! The walk itself never fails. `translate` only errors if the walked value no
//! longer deserializes into its original type, which shape preservation rules out.

use std::sync::Arc;

use async_recursion::async_recursion;
use futures::future::join_all;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::gateway::ContentGateway;
use crate::models::{Language, ID_FIELD};
use crate::translation::tree::Node;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("failed to serialize value for translation: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("translated value no longer matches its type: {0}")]
    ShapeViolation(#[source] serde_json::Error),
}

/// What a translation pass did, leaf by leaf.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslationReport {
    pub target: Language,
    /// Leaf strings visited, including empty ones.
    pub leaves: usize,
    /// Paths of leaves left in the source language because the gateway failed,
    /// e.g. `experience[0].description`.
    pub degraded: Vec<String>,
}

impl TranslationReport {
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}

#[derive(Debug)]
pub struct Translated<T> {
    pub value: T,
    pub report: TranslationReport,
}

/// Result of walking one subtree.
struct Walked {
    node: Node,
    leaves: usize,
    degraded: Vec<String>,
}

impl Walked {
    fn untouched(node: Node) -> Self {
        Self {
            node,
            leaves: 0,
            degraded: Vec::new(),
        }
    }
}

pub struct StructuralTranslator {
    gateway: Arc<dyn ContentGateway>,
    /// Bounds concurrent gateway calls within one pass.
    limiter: Semaphore,
}

impl StructuralTranslator {
    pub fn new(gateway: Arc<dyn ContentGateway>, max_in_flight: usize) -> Self {
        Self {
            gateway,
            limiter: Semaphore::new(max_in_flight.max(1)),
        }
    }

    /// Translates every leaf string of `value` into `target`, returning a new
    /// value of the same type and shape.
    pub async fn translate<T>(
        &self,
        value: &T,
        target: Language,
    ) -> Result<Translated<T>, TranslateError>
    where
        T: Serialize + DeserializeOwned,
    {
        let node = Node::from(serde_json::to_value(value).map_err(TranslateError::Serialize)?);
        let (node, report) = self.translate_node(node, target).await;

        let value =
            serde_json::from_value(node.into()).map_err(TranslateError::ShapeViolation)?;

        info!(
            "Translation to {} finished: {} leaves, {} degraded",
            target,
            report.leaves,
            report.degraded.len()
        );

        Ok(Translated { value, report })
    }

    /// Walks a raw tree.
    pub async fn translate_node(&self, node: Node, target: Language) -> (Node, TranslationReport) {
        let walked = self.walk(node, String::new(), target).await;
        let report = TranslationReport {
            target,
            leaves: walked.leaves,
            degraded: walked.degraded,
        };
        (walked.node, report)
    }

    #[async_recursion]
    async fn walk(&self, node: Node, path: String, target: Language) -> Walked {
        match node {
            Node::Text(text) => self.translate_leaf(text, path, target).await,

            Node::List(items) => {
                let walked = join_all(
                    items
                        .into_iter()
                        .enumerate()
                        .map(|(i, item)| self.walk(item, format!("{path}[{i}]"), target)),
                )
                .await;

                let mut leaves = 0;
                let mut degraded = Vec::new();
                let mut nodes = Vec::with_capacity(walked.len());
                for w in walked {
                    leaves += w.leaves;
                    degraded.extend(w.degraded);
                    nodes.push(w.node);
                }
                Walked {
                    node: Node::List(nodes),
                    leaves,
                    degraded,
                }
            }

            Node::Record(fields) => {
                let walked = join_all(fields.into_iter().map(|(key, child)| {
                    let child_path = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{path}.{key}")
                    };
                    async move {
                        if key == ID_FIELD {
                            (key, Walked::untouched(child))
                        } else {
                            let w = self.walk(child, child_path, target).await;
                            (key, w)
                        }
                    }
                }))
                .await;

                let mut leaves = 0;
                let mut degraded = Vec::new();
                let mut out = Vec::with_capacity(walked.len());
                for (key, w) in walked {
                    leaves += w.leaves;
                    degraded.extend(w.degraded);
                    out.push((key, w.node));
                }
                Walked {
                    node: Node::Record(out),
                    leaves,
                    degraded,
                }
            }

            other @ Node::Other(_) => Walked::untouched(other),
        }
    }

    async fn translate_leaf(&self, text: String, path: String, target: Language) -> Walked {
        if text.is_empty() {
            return Walked {
                node: Node::Text(text),
                leaves: 1,
                degraded: Vec::new(),
            };
        }

        // The semaphore is never closed; without a permit the call simply runs unbounded.
        let _permit = self.limiter.acquire().await.ok();

        match self.gateway.translate(&text, target).await {
            Ok(translated) => Walked {
                node: Node::Text(translated),
                leaves: 1,
                degraded: Vec::new(),
            },
            Err(e) => {
                warn!("Leaf '{}' left untranslated: {}", path, e);
                Walked {
                    node: Node::Text(text),
                    leaves: 1,
                    degraded: vec![path],
                }
            }
        }
    }
}
