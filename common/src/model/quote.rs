use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The full set of user selections captured when the quote form is submitted.
///
/// Every selectable field is carried twice: the display text shown on the
/// confirmation page (`shape`, `material`, ...) and the underlying form value
/// used to restore the form and to build the order payload (`shape_value`,
/// `material_value`, ...). All fields default to the empty string so a partial
/// submission still deserializes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteSnapshot {
    // Contact information
    pub name: String,
    pub email: String,
    pub phone: String,

    // Display values (for the confirmation page)
    pub description: String,
    pub shape: String,
    pub label_width: String,
    pub label_height: String,
    pub diameter: String,
    pub corners: String,
    pub cutting_die: String,
    pub printing: String,
    pub material: String,
    pub color_code: String,
    pub finish: String,
    pub application_method: String,
    pub unwind_direction: String,
    pub total_quantity: String,
    pub artwork_option: String,

    // Form values (for restoration)
    pub shape_value: String,
    pub corners_value: String,
    pub material_value: String,
    pub color_code_value: String,
    pub finish_value: String,
    pub application_method_value: String,
    pub unwind_direction_value: String,
    pub artwork_option_value: String,
    pub cutting_die_value: String,
    pub printing_value: String,

    /// Stamped server-side when the snapshot is accepted.
    pub created_timestamp: Option<DateTime<Utc>>,
}

impl QuoteSnapshot {
    /// Round shapes are sized by diameter, everything else by width and
    /// height. The form value is authoritative, the display text is the
    /// fallback.
    pub fn is_round(&self) -> bool {
        let shape = if self.shape_value.trim().is_empty() {
            &self.shape
        } else {
            &self.shape_value
        };
        let shape = shape.trim().to_lowercase();
        shape == "circle" || shape == "oval"
    }
}

/// Result of a confirmed quote submission, reported to the caller regardless
/// of whether the ERP accepted the order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteOutcome {
    pub quote_id: String,
    pub submission_succeeded: bool,
}
