//! Normalization of raw upstream reference payloads.
//!
//! The parameter API is structurally inconsistent: the record list arrives
//! as a bare array or wrapped under one of several conventional properties,
//! identifiers hide under different key spellings (and, for colour codes,
//! one level down in a `ColourBacking` object), and the description list key
//! is misspelled for some resources. Everything here tolerates those shapes
//! and produces one uniform, deduplicated, sorted option list.
//!
//! Malformed individual records are skipped, never an error; the whole call
//! fails only upstream, when the body is not JSON at all.

use common::model::reference::ReferenceOption;
use log::{debug, warn};
use serde_json::Value;
use std::collections::HashSet;

/// Synonym keys tried, in order, when resolving a record identifier.
const ID_KEYS: &[&str] = &["Id", "Value", "Name"];

/// Keys that may hold the localized description list. The upstream API
/// misspells this field as "Discriptions" for colour-code data.
const DESCRIPTION_LIST_KEYS: &[&str] = &["Descriptions", "Discriptions"];

/// Wrapper properties tried, in order, when the payload root is not an array.
const WRAPPER_KEYS: &[&str] = &["Data", "items", "results"];

const UNKNOWN_TEXT: &str = "Unknown";

/// Normalizes a raw reference payload into a deduplicated option list,
/// sorted case-insensitively by display text.
pub fn normalize(raw: &Value) -> Vec<ReferenceOption> {
    collect_options(extract_records(raw))
}

/// Colour-code payloads additionally carry Blocked/AllowRFQ flags; records
/// explicitly blocked or explicitly excluded from RFQ are dropped before
/// deduplication. Absent flags keep the record, the upstream query already
/// filters on them.
pub fn normalize_color_codes(raw: &Value) -> Vec<ReferenceOption> {
    let records: Vec<&Value> = extract_records(raw)
        .into_iter()
        .filter(|record| color_code_allowed(record))
        .collect();
    collect_options(records)
}

/// Returns the first value present under any of the synonym keys, compared
/// case-insensitively. Null values count as absent.
pub(crate) fn resolve_key<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let map = record.as_object()?;
    for key in keys {
        for (name, value) in map {
            if name.eq_ignore_ascii_case(key) && !value.is_null() {
                return Some(value);
            }
        }
    }
    None
}

/// The record list, wherever the upstream put it. When no strategy matches
/// the root is treated as the list itself and per-record failures fall
/// through to "skip".
fn extract_records(raw: &Value) -> Vec<&Value> {
    if let Some(items) = raw.as_array() {
        return items.iter().collect();
    }
    for key in WRAPPER_KEYS {
        if let Some(items) = raw.get(*key).and_then(Value::as_array) {
            return items.iter().collect();
        }
    }
    warn!("Unexpected reference payload structure, treating root as the record list");
    vec![raw]
}

fn collect_options(records: Vec<&Value>) -> Vec<ReferenceOption> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut options: Vec<ReferenceOption> = Vec::new();
    let mut skipped = 0usize;

    for record in records {
        let id = match resolve_id(record) {
            Some(id) => id,
            None => {
                skipped += 1;
                continue;
            }
        };
        // First arrival wins on duplicate ids.
        if !seen.insert(id.clone()) {
            debug!("Dropping duplicate reference id {}", id);
            continue;
        }
        options.push(ReferenceOption {
            display_text: resolve_display_text(record),
            id,
        });
    }

    if skipped > 0 {
        warn!("Skipped {} reference records without a resolvable identifier", skipped);
    }

    options.sort_by(|a, b| {
        a.display_text
            .to_lowercase()
            .cmp(&b.display_text.to_lowercase())
    });
    options
}

/// Colour-code records nest their identifier and descriptions inside a
/// `ColourBacking` object; flat records carry them at the top level.
fn payload_holder(record: &Value) -> &Value {
    resolve_key(record, &["ColourBacking"]).unwrap_or(record)
}

fn resolve_id(record: &Value) -> Option<String> {
    let value = resolve_key(payload_holder(record), ID_KEYS)?;
    let id = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

fn resolve_display_text(record: &Value) -> String {
    let holder = payload_holder(record);
    if let Some(descriptions) = resolve_key(holder, DESCRIPTION_LIST_KEYS).and_then(Value::as_array) {
        if let Some(text) = preferred_description(descriptions) {
            return text;
        }
    }
    // Flat fallbacks for resources without a description list.
    if let Some(text) = resolve_key(holder, &["Description", "Name"]).and_then(Value::as_str) {
        let text = text.trim();
        if !text.is_empty() {
            return text.to_string();
        }
    }
    UNKNOWN_TEXT.to_string()
}

/// Locale preference: the en-US entry when present, else the first entry.
fn preferred_description(descriptions: &[Value]) -> Option<String> {
    let text_of = |entry: &Value| -> Option<String> {
        resolve_key(entry, &["Description"])
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    let en_us = descriptions.iter().find(|entry| {
        resolve_key(entry, &["ISOLanguageCode"])
            .and_then(Value::as_str)
            .map(|code| code.eq_ignore_ascii_case("en-US"))
            .unwrap_or(false)
    });

    en_us.and_then(&text_of).or_else(|| descriptions.first().and_then(&text_of))
}

fn color_code_allowed(record: &Value) -> bool {
    let blocked = resolve_key(record, &["Blocked"]).and_then(Value::as_bool);
    let allow_rfq = resolve_key(record, &["AllowRFQ"]).and_then(Value::as_bool);
    blocked != Some(true) && allow_rfq != Some(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(options: &[ReferenceOption]) -> Vec<&str> {
        options.iter().map(|o| o.id.as_str()).collect()
    }

    #[test]
    fn extracts_the_same_records_from_every_wrapper_shape() {
        let records = json!([
            {"Id": "A", "Description": "Alpha"},
            {"Id": "B", "Description": "Beta"},
        ]);
        let shapes = [
            records.clone(),
            json!({"Data": records.clone()}),
            json!({"items": records.clone()}),
            json!({"results": records.clone()}),
        ];

        for shape in &shapes {
            let options = normalize(shape);
            assert_eq!(ids(&options), vec!["A", "B"], "shape: {}", shape);
        }
    }

    #[test]
    fn unrecognized_root_yields_empty_list_not_error() {
        let options = normalize(&json!({"unexpected": {"Id": "X"}}));
        assert!(options.is_empty());
    }

    #[test]
    fn duplicate_ids_keep_the_first_arrival() {
        let options = normalize(&json!([
            {"Id": "A", "Description": "First"},
            {"Id": "A", "Description": "Second"},
        ]));
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].display_text, "First");
    }

    #[test]
    fn prefers_en_us_description_over_list_order() {
        let options = normalize(&json!([{
            "Id": "A",
            "Descriptions": [
                {"ISOLanguageCode": "en-GB", "Description": "X"},
                {"ISOLanguageCode": "en-US", "Description": "Y"},
            ],
        }]));
        assert_eq!(options[0].display_text, "Y");
    }

    #[test]
    fn falls_back_to_first_description_when_no_en_us() {
        let options = normalize(&json!([{
            "Id": "A",
            "Descriptions": [{"ISOLanguageCode": "fr", "Description": "Z"}],
        }]));
        assert_eq!(options[0].display_text, "Z");
    }

    #[test]
    fn missing_description_falls_back_to_unknown() {
        let options = normalize(&json!([{"Id": "A"}]));
        assert_eq!(options[0].display_text, "Unknown");
    }

    #[test]
    fn tolerates_the_misspelled_description_key() {
        let options = normalize(&json!([{
            "Id": "A",
            "Discriptions": [{"ISOLanguageCode": "en-US", "Description": "Gloss"}],
        }]));
        assert_eq!(options[0].display_text, "Gloss");
    }

    #[test]
    fn tolerates_lowercase_key_variants() {
        let options = normalize(&json!([{
            "id": "A",
            "descriptions": [{"isolanguagecode": "en-US", "description": "Matte"}],
        }]));
        assert_eq!(options[0].id, "A");
        assert_eq!(options[0].display_text, "Matte");
    }

    #[test]
    fn records_without_an_identifier_are_skipped() {
        let options = normalize(&json!([
            {"Description": "No id at all"},
            {"Id": "B", "Description": "Kept"},
        ]));
        assert_eq!(ids(&options), vec!["B"]);
    }

    #[test]
    fn sorts_case_insensitively_by_display_text() {
        let options = normalize(&json!([
            {"Id": "1", "Description": "beta"},
            {"Id": "2", "Description": "Alpha"},
            {"Id": "3", "Description": "gamma"},
        ]));
        let texts: Vec<&str> = options.iter().map(|o| o.display_text.as_str()).collect();
        assert_eq!(texts, vec!["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn colour_code_ids_resolve_through_colour_backing() {
        let options = normalize_color_codes(&json!([{
            "ColourBacking": {
                "Id": "CC-1",
                "Discriptions": [{"ISOLanguageCode": "en-US", "Description": "CMYK"}],
            },
        }]));
        assert_eq!(options[0].id, "CC-1");
        assert_eq!(options[0].display_text, "CMYK");
    }

    #[test]
    fn blocked_records_are_dropped_regardless_of_allow_rfq() {
        let options = normalize_color_codes(&json!([
            {"Blocked": true, "AllowRFQ": true, "ColourBacking": {"Id": "X"}},
            {"Blocked": false, "AllowRFQ": false, "ColourBacking": {"Id": "Y"}},
            {"ColourBacking": {"Id": "Z", "Descriptions": [{"ISOLanguageCode": "en-US", "Description": "Kept"}]}},
        ]));
        assert_eq!(ids(&options), vec!["Z"]);
    }

    #[test]
    fn absent_flags_keep_the_record() {
        let options = normalize_color_codes(&json!([
            {"Blocked": null, "ColourBacking": {"Id": "A"}},
            {"AllowRFQ": true, "ColourBacking": {"Id": "B"}},
        ]));
        assert_eq!(options.len(), 2);
    }
}
