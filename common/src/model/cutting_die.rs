use serde::{Deserialize, Serialize};

/// One row of the cutting die catalog, as served to the size selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuttingDieOption {
    /// Die identifier.
    pub ref_id: String,
    /// Die description (the size label shown to the user).
    pub description: String,
    /// Corner radius.
    pub radius: f64,
    /// Label width across the web.
    pub label_across: f64,
    /// Label height around the cylinder.
    pub label_around: f64,
    /// Step / circumference.
    pub circumference: f64,
    /// Whether the die is available for web label orders.
    pub web_enabled: bool,
}
