use serde::{Deserialize, Serialize};

/// A purchase receipt as submitted by a client.
///
/// Date, time and amounts stay as text. Each scoring rule parses the field it
/// needs, so a malformed value only zeroes the rules that depend on it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub retailer: String,
    pub purchase_date: String, // "YYYY-MM-DD"
    pub purchase_time: String, // "HH:MM", 24-hour clock
    pub total: String,         // "D+.DD"
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub short_description: String,
    pub price: String,
}

impl Item {
    pub fn new(short_description: &str, price: &str) -> Self {
        Self {
            short_description: short_description.to_string(),
            price: price.to_string(),
        }
    }
}

impl Receipt {
    /// Number of line items on the receipt
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Combined date and time in the `YYYY-MM-DD HH:MM` layout the
    /// timestamp rules parse.
    pub fn purchased_at(&self) -> String {
        format!("{} {}", self.purchase_date, self.purchase_time)
    }
}
