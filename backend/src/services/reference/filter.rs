//! Cross-field filtering rules: the selected printing process constrains
//! which finishes and which cutting dies are valid.
//!
//! Two independent passes exist for finishes and both are kept, because they
//! run at different pipeline stages. `filter_finishes_by_printing` restricts
//! a freshly normalized upstream list against the printing label text;
//! `filter_finishes_by_category` is the structural check re-applied to an
//! already-built option list (and to the submitted selection), classifying
//! each option by its own text.

use common::model::reference::ReferenceOption;
use log::warn;

/// Where a finishing operation runs relative to the press: laminates run
/// inline on the flexo press, varnishes run offline after digital printing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinishCategory {
    Inline,
    Offline,
}

/// Die catalog process categories, as stored in the catalog table.
pub const PROCESS_ROTARY: i64 = 1;
pub const PROCESS_DIGITAL: i64 = 2;

/// Restricts a finish list against the selected printing label text.
/// Flexo printing keeps finishes mentioning "flexo"; digital printing keeps
/// "digital" or "blank" finishes; unrecognized printing text applies no
/// restriction at all.
pub fn filter_finishes_by_printing(
    options: Vec<ReferenceOption>,
    printing_text: &str,
) -> Vec<ReferenceOption> {
    let printing = printing_text.to_lowercase();
    if printing.contains("flexo") {
        options
            .into_iter()
            .filter(|option| option.display_text.to_lowercase().contains("flexo"))
            .collect()
    } else if printing.contains("digital") {
        options
            .into_iter()
            .filter(|option| {
                let text = option.display_text.to_lowercase();
                text.contains("digital") || text.contains("blank")
            })
            .collect()
    } else {
        options
    }
}

/// The finish category implied by the printing selection, when any.
pub fn category_for_printing(printing_text: &str) -> Option<FinishCategory> {
    let printing = printing_text.to_lowercase();
    if printing.contains("flexo") {
        Some(FinishCategory::Inline)
    } else if printing.contains("digital") {
        Some(FinishCategory::Offline)
    } else {
        None
    }
}

/// Classifies one finish by scanning its text for a recognizable finishing
/// type keyword. Returns `None` for finishes with no recognizable type.
pub fn classify_finish(text: &str) -> Option<FinishCategory> {
    let text = text.to_lowercase();
    if text.contains("laminate") {
        Some(FinishCategory::Inline)
    } else if text.contains("varnish") {
        Some(FinishCategory::Offline)
    } else {
        None
    }
}

/// Structural pass over an already-built option list: an option with a
/// recognizable finishing type is kept only when it matches the selected
/// category; an option with no recognizable type is always kept.
pub fn filter_finishes_by_category(
    options: Vec<ReferenceOption>,
    category: FinishCategory,
) -> Vec<ReferenceOption> {
    options
        .into_iter()
        .filter(|option| {
            let combined = format!("{} {}", option.display_text, option.id);
            match classify_finish(&combined) {
                Some(found) => found == category,
                None => true,
            }
        })
        .collect()
}

/// Maps the printing label text onto the die catalog's process category.
/// "Flexo" implies a rotary die (a label reading "rotary flexo" is still
/// category 1); otherwise "digital" selects category 2; anything
/// unrecognized defaults to digital with a warning.
pub fn die_category_for_printing(printing_text: &str) -> i64 {
    let printing = printing_text.to_lowercase();
    if printing.contains("flexo") {
        PROCESS_ROTARY
    } else if printing.contains("digital") {
        PROCESS_DIGITAL
    } else {
        warn!(
            "Printing option '{}' matches neither 'flexo' nor 'digital', defaulting to digital dies",
            printing_text
        );
        PROCESS_DIGITAL
    }
}
