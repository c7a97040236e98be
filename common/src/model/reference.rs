use serde::{Deserialize, Serialize};

/// One selectable entry of a normalized reference list (materials, colour
/// codes, finishing types). Within one result set the id is unique and the
/// display text is never empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceOption {
    pub id: String,
    pub display_text: String,
}
