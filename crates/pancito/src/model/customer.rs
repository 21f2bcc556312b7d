//! A named recurring customer, typically someone from a nearby business ("local")
//! who orders on credit and pays later.
//!
//! Orders refer to frequent customers by name, so names are unique within the
//! collection (compared trimmed and case-insensitively).

use crate::model::CustomerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequentCustomer {
    pub id: CustomerId,
    pub name: String,
    pub local: String,
    pub created_at: DateTime<Utc>,
}

impl FrequentCustomer {
    /// Key used to compare customer names.
    pub fn name_key(name: &str) -> String {
        name.trim().to_lowercase()
    }

    pub fn matches_name(&self, name: &str) -> bool {
        Self::name_key(&self.name) == Self::name_key(name)
    }
}

/// Payload for registering a frequent customer.
#[derive(Debug, Clone)]
pub struct CustomerCreate {
    pub name: String,
    pub local: String,
    pub created_at: DateTime<Utc>,
}

/// Changes the customer's workplace. Names are not editable because orders link by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub local: String,
}
