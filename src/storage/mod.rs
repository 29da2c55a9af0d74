pub mod credentials;
pub mod sheets;

pub use credentials::{CredentialSource, ServiceAccountKey};
pub use sheets::GoogleSheetsClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StorageError;

/// Number of TP prices a stored row carries.
pub const ROW_TP_SLOTS: usize = 4;

/// One generated setup, flattened for tabular storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupRow {
    pub instrument: String,
    pub direction: String,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub tp_prices: Vec<f64>,
    pub swing_price: f64,
}

impl SetupRow {
    /// Nine cells: instrument, direction, entry, stop, TP1..TP4, swing.
    /// Missing TP slots are written as empty strings.
    pub fn to_values(&self) -> Vec<Value> {
        let mut values = vec![
            Value::from(self.instrument.clone()),
            Value::from(self.direction.clone()),
            Value::from(self.entry_price),
            Value::from(self.stop_loss),
        ];
        for slot in 0..ROW_TP_SLOTS {
            values.push(
                self.tp_prices
                    .get(slot)
                    .map(|p| Value::from(*p))
                    .unwrap_or_else(|| Value::from("")),
            );
        }
        values.push(Value::from(self.swing_price));
        values
    }
}

#[async_trait]
pub trait SetupStorage: Send + Sync {
    async fn append_row(&self, row: &SetupRow) -> Result<(), StorageError>;

    /// Link shown to the user after a successful save.
    fn location_url(&self) -> Option<String> {
        None
    }
}
