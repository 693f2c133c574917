use serde::{Deserialize, Serialize};

/// One row of the bulk CSV: a display name plus an optional quote.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardRow {
    pub name: String,
    #[serde(default)]
    pub quote: String,
}
