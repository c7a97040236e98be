use serde::{Deserialize, Serialize};

/// The ERP's order-submission schema. Field names follow the external API
/// contract, hence the PascalCase renames. Nullable numerics serialize as
/// `null` when the source field did not parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPayload {
    #[serde(rename = "CustomerId")]
    pub customer_id: String,

    #[serde(rename = "ContactId")]
    pub contact_id: String,

    #[serde(rename = "PressRuns")]
    pub press_runs: Vec<PressRun>,

    #[serde(rename = "WindingId")]
    pub winding_id: String,

    #[serde(rename = "Outline")]
    pub outline: Option<String>,

    #[serde(rename = "DieSizeId")]
    pub die_size_id: Option<String>,

    #[serde(rename = "SubstrateId")]
    pub substrate_id: Option<String>,

    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "NumberOfProducts")]
    pub number_of_products: i64,

    #[serde(rename = "Quantities")]
    pub quantities: Vec<i64>,

    #[serde(rename = "Width")]
    pub width: Option<f64>,

    #[serde(rename = "Height")]
    pub height: Option<f64>,

    #[serde(rename = "Radius")]
    pub radius: Option<f64>,

    #[serde(rename = "PackingProcedureId")]
    pub packing_procedure_id: String,

    #[serde(rename = "PackingPriority")]
    pub packing_priority: String,

    #[serde(rename = "PackingNumber")]
    pub packing_number: i64,
}

/// One unit of print production: a colour code plus the finishing operations
/// applied to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PressRun {
    #[serde(rename = "ColourCodeIdFront")]
    pub colour_code_id_front: Option<String>,

    #[serde(rename = "FinishingTypes")]
    pub finishing_types: Vec<String>,
}
