//! Mapping of a quote snapshot onto the ERP's order-submission schema.
//!
//! This is a pure transformation: no I/O, no mutation of the snapshot, and
//! no failure path. Unparsable numeric fields degrade to absence or to a
//! default so the payload is always constructible, even from incomplete
//! data; the ERP, not this module, is the final validator.

use common::model::order::{OrderPayload, PressRun};
use common::model::quote::QuoteSnapshot;

/// Winding type constant: "10" is Sheeted in the ERP's parameter set.
const WINDING_SHEETED: &str = "10";

// Fixed packing defaults for quick quotes.
const PACKING_PROCEDURE_ID: &str = "152";
const PACKING_PRIORITY: &str = "Diameter";
const PACKING_NUMBER: i64 = 500;

/// Builds the order payload from a snapshot. For every selectable field the
/// underlying form value wins over the display text; round labels yield a
/// radius (half the diameter) instead of width/height.
pub fn build_order_payload(
    snapshot: &QuoteSnapshot,
    customer_id: &str,
    contact_id: &str,
) -> OrderPayload {
    let quantity = parse_integer(&snapshot.total_quantity);

    OrderPayload {
        customer_id: customer_id.to_string(),
        contact_id: contact_id.to_string(),
        press_runs: vec![press_run(snapshot)],
        winding_id: WINDING_SHEETED.to_string(),
        outline: first_non_empty(&[&snapshot.shape_value, &snapshot.shape]),
        die_size_id: first_non_empty(&[&snapshot.cutting_die_value, &snapshot.cutting_die]),
        substrate_id: first_non_empty(&[&snapshot.material_value, &snapshot.material]),
        description: snapshot.description.clone(),
        number_of_products: quantity.unwrap_or(1),
        quantities: quantity.into_iter().collect(),
        width: parse_decimal(&snapshot.label_width),
        height: parse_decimal(&snapshot.label_height),
        radius: parse_decimal(&snapshot.diameter).map(|d| d / 2.0),
        packing_procedure_id: PACKING_PROCEDURE_ID.to_string(),
        packing_priority: PACKING_PRIORITY.to_string(),
        packing_number: PACKING_NUMBER,
    }
}

fn press_run(snapshot: &QuoteSnapshot) -> PressRun {
    let colour_code = first_non_empty(&[
        &snapshot.printing,
        &snapshot.printing_value,
        &snapshot.color_code_value,
        &snapshot.color_code,
    ]);
    let finishing = first_non_empty(&[&snapshot.finish_value, &snapshot.finish]);
    PressRun {
        colour_code_id_front: colour_code,
        finishing_types: finishing.into_iter().collect(),
    }
}

fn first_non_empty(candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .map(|candidate| candidate.trim())
        .find(|candidate| !candidate.is_empty())
        .map(str::to_string)
}

fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> QuoteSnapshot {
        QuoteSnapshot::default()
    }

    #[test]
    fn diameter_becomes_half_radius() {
        let mut s = snapshot();
        s.diameter = "10".to_string();
        let payload = build_order_payload(&s, "108620", "001");
        assert_eq!(payload.radius, Some(5.0));
        assert_eq!(payload.width, None);
        assert_eq!(payload.height, None);
    }

    #[test]
    fn unparsable_diameter_leaves_radius_absent() {
        let mut s = snapshot();
        s.diameter = "abc".to_string();
        let payload = build_order_payload(&s, "108620", "001");
        assert_eq!(payload.radius, None);
    }

    #[test]
    fn blank_quantity_defaults_products_and_empties_quantities() {
        let mut s = snapshot();
        s.total_quantity = "".to_string();
        let payload = build_order_payload(&s, "108620", "001");
        assert_eq!(payload.number_of_products, 1);
        assert!(payload.quantities.is_empty());
    }

    #[test]
    fn form_value_wins_over_display_text() {
        let mut s = snapshot();
        s.material = "Premium White Paper".to_string();
        s.material_value = "M-12".to_string();
        let payload = build_order_payload(&s, "108620", "001");
        assert_eq!(payload.substrate_id.as_deref(), Some("M-12"));
    }

    #[test]
    fn display_text_is_the_fallback_when_the_value_is_blank() {
        let mut s = snapshot();
        s.shape = "Rectangle".to_string();
        let payload = build_order_payload(&s, "108620", "001");
        assert_eq!(payload.outline.as_deref(), Some("Rectangle"));
    }

    #[test]
    fn colour_code_fallback_chain() {
        let mut s = snapshot();
        s.color_code = "CC-raw".to_string();
        s.color_code_value = "CC-9".to_string();
        let payload = build_order_payload(&s, "108620", "001");
        assert_eq!(
            payload.press_runs[0].colour_code_id_front.as_deref(),
            Some("CC-9")
        );

        s.printing_value = "PV-2".to_string();
        let payload = build_order_payload(&s, "108620", "001");
        assert_eq!(
            payload.press_runs[0].colour_code_id_front.as_deref(),
            Some("PV-2")
        );

        s.printing = "PC-77".to_string();
        let payload = build_order_payload(&s, "108620", "001");
        assert_eq!(
            payload.press_runs[0].colour_code_id_front.as_deref(),
            Some("PC-77")
        );
    }

    #[test]
    fn blank_finish_yields_no_finishing_types() {
        let payload = build_order_payload(&snapshot(), "108620", "001");
        assert!(payload.press_runs[0].finishing_types.is_empty());
    }

    #[test]
    fn constants_are_stamped_on_every_payload() {
        let payload = build_order_payload(&snapshot(), "108620", "001");
        assert_eq!(payload.customer_id, "108620");
        assert_eq!(payload.contact_id, "001");
        assert_eq!(payload.winding_id, "10");
        assert_eq!(payload.packing_procedure_id, "152");
        assert_eq!(payload.packing_priority, "Diameter");
        assert_eq!(payload.packing_number, 500);
    }

    #[test]
    fn full_rectangular_snapshot_maps_end_to_end() {
        let mut s = snapshot();
        s.shape_value = "rect-01".to_string();
        s.cutting_die_value = "D-500".to_string();
        s.material_value = "M-12".to_string();
        s.printing = "PC-77".to_string();
        s.finish_value = "F-3".to_string();
        s.label_width = "3.5".to_string();
        s.label_height = "2".to_string();
        s.total_quantity = "500".to_string();

        let payload = build_order_payload(&s, "108620", "001");
        assert_eq!(payload.outline.as_deref(), Some("rect-01"));
        assert_eq!(payload.die_size_id.as_deref(), Some("D-500"));
        assert_eq!(payload.substrate_id.as_deref(), Some("M-12"));
        assert_eq!(payload.width, Some(3.5));
        assert_eq!(payload.height, Some(2.0));
        assert_eq!(payload.radius, None);
        assert_eq!(payload.quantities, vec![500]);
        assert_eq!(payload.number_of_products, 500);
        assert_eq!(
            payload.press_runs[0].colour_code_id_front.as_deref(),
            Some("PC-77")
        );
        assert_eq!(payload.press_runs[0].finishing_types, vec!["F-3"]);
    }
}
