//! Cross-tick scratch state carried through the environment's trader data blob

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

use crate::common::errors::Result;
use crate::common::types::Symbol;

/// Explicit per-run context, decoded from and encoded back into trader data
///
/// `logs` holds the notes written during the current tick, keyed by product.
/// Any other top-level key in the blob is kept verbatim in `scratch` so data
/// written by other tools survives the round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraderContext {
    #[serde(default)]
    pub logs: BTreeMap<Symbol, Vec<String>>,
    #[serde(flatten)]
    pub scratch: Map<String, Value>,
}

impl TraderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the previous tick's blob
    ///
    /// An empty or malformed blob yields a fresh context. Notes from the
    /// previous tick are dropped; scratch entries are kept.
    pub fn decode(trader_data: &str) -> Self {
        if trader_data.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str::<Self>(trader_data) {
            Ok(mut ctx) => {
                ctx.logs.clear();
                ctx
            }
            Err(e) => {
                warn!("Discarding undecodable trader data: {}", e);
                Self::default()
            }
        }
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Append a note for a product
    pub fn log(&mut self, symbol: &str, message: impl Into<String>) {
        self.logs
            .entry(symbol.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn logs_for(&self, symbol: &str) -> &[String] {
        self.logs.get(symbol).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.scratch.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.scratch.insert(key.into(), value);
    }
}
