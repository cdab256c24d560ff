use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Generic metadata container
pub type Metadata = HashMap<String, Value>;

/// Instants carried by generated entities; serialized as RFC 3339 UTC.
pub type Timestamp = DateTime<Utc>;
