// src/extract/abilities.rs
// AbilityExtractor: hero identity plus the ability boxes.

use std::collections::BTreeMap;

use crate::core::sanitize::normalize_ws;
use crate::dom::{Document, NodeId, Role};
use crate::model::{Ability, Keybind, StatEntry, StatValue};

use super::ExtractError;

/// First page title, trimmed. No title means the hero cannot be
/// identified and the whole page is skipped.
pub fn extract_hero_name(doc: &Document) -> Result<String, ExtractError> {
    let title = doc.find(Role::PageTitle).ok_or(ExtractError::MissingTitle)?;
    let name = normalize_ws(&doc.text(title));
    if name.is_empty() {
        return Err(ExtractError::MissingTitle);
    }
    Ok(name)
}

/// Every ability box on the page, in page order. A box that cannot
/// yield a name is skipped with a warning, never fatal.
pub fn extract_abilities(doc: &Document) -> Vec<Ability> {
    let mut out = Vec::new();
    for block in doc.find_all(Role::AbilityBlock) {
        let Some(header) = doc.find_in(block, Role::AbilityHeader) else {
            logw!("ability box without a header skipped");
            continue;
        };
        let raw = normalize_ws(&doc.text(header));
        if raw.is_empty() {
            logw!("ability box with an empty header skipped");
            continue;
        }
        let (name, keybind) = split_name_and_keybind(&raw);
        out.push(Ability { name, keybind, stats: extract_stats(doc, block) });
    }
    out
}

/// The two recognized header forms, and only those:
/// - `"FireballAlt Fire"`: name "Fireball", RCLICK (marker removed);
/// - `"ConcussionE"`: name "Concussion", key "E" (a trailing
///   ASCII-uppercase run directly after a lowercase letter).
///
/// Anything else is the primary fire, LCLICK.
pub fn split_name_and_keybind(header: &str) -> (String, Keybind) {
    const ALT_FIRE: &str = "Alt Fire";
    if let Some(pos) = header.find(ALT_FIRE) {
        let name = normalize_ws(&join!(
            &header[..pos],
            &header[pos + ALT_FIRE.len()..]
        ));
        return (name, Keybind::RClick);
    }
    if let Some(split) = uppercase_suffix_at(header) {
        let key = header[split..].to_string();
        return (normalize_ws(&header[..split]), Keybind::Key(key));
    }
    (header.to_string(), Keybind::LClick)
}

/// Byte index where a trailing ASCII-uppercase run starts, provided
/// the character right before it is ASCII lowercase. None otherwise;
/// an all-caps name is a name, not a keybind.
fn uppercase_suffix_at(s: &str) -> Option<usize> {
    let b = s.as_bytes();
    let mut i = b.len();
    while i > 0 && b[i - 1].is_ascii_uppercase() {
        i -= 1;
    }
    if i == 0 || i == b.len() || !b[i - 1].is_ascii_lowercase() {
        return None;
    }
    Some(i)
}

/// Stats live in the block following the summary node: key/value pairs,
/// keys losing their trailing colon, values normalized per the glyph
/// rules, tooltips kept as `info`.
fn extract_stats(doc: &Document, block: NodeId) -> BTreeMap<String, StatEntry> {
    let mut stats = BTreeMap::new();
    let Some(summary) = doc.find_in(block, Role::AbilitySummary) else {
        return stats;
    };
    let Some(info_block) = doc.next_sibling_with_role(summary, Role::Block) else {
        return stats;
    };
    for pair in doc.find_all_in(info_block, Role::StatPair) {
        // StatPair guarantees exactly two element children
        let kids = doc.element_children(pair);
        let (key_node, val_node) = (kids[0], kids[1]);

        let key = normalize_ws(&doc.text(key_node));
        let key = key.trim_end_matches(':').to_string();
        if key.is_empty() {
            continue;
        }
        let info = doc
            .find_in(key_node, Role::Tooltip)
            .and_then(|tip| doc.attr(tip, "title"))
            .map(String::from);

        stats.insert(
            key,
            StatEntry { value: normalize_stat_value(&doc.text(val_node)), info },
        );
    }
    stats
}

/// Glyph and range normalization: checkmark to true, cross to false,
/// infinity to the "inf" sentinel, en-dash ranges to hyphen ranges.
pub fn normalize_stat_value(raw: &str) -> StatValue {
    let v = normalize_ws(raw).replace('–', "-");
    if v.contains('✓') {
        StatValue::Flag(true)
    } else if v.contains('✕') {
        StatValue::Flag(false)
    } else if v.contains('∞') {
        StatValue::Text(s!("inf"))
    } else {
        StatValue::Text(v)
    }
}
