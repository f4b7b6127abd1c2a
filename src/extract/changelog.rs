// src/extract/changelog.rs
// ChangelogExtractor. Commentary paragraphs and change-header
// paragraphs render identically; the one structural invariant the wiki
// keeps is that a change header is always followed, one separator node
// later, by a bullet list. Everything here leans on that.

use crate::core::sanitize::normalize_ws;
use crate::dom::{Document, NodeId, Role};
use crate::model::{ChangeGroup, ChangelogEntry};

/// Walk the active changelog tab into entries, newest patch first
/// (source order). No active tab means no recorded history: an empty
/// changelog, not an error.
pub fn extract_changelog(doc: &Document) -> Vec<ChangelogEntry> {
    let containers = doc.find_all(Role::ChangelogCurrent);
    let Some(&table) = containers.last() else {
        return Vec::new();
    };
    let markers = doc.find_all_in(table, Role::PatchMarker);
    let descriptions = doc.find_all_in(table, Role::PatchDescription);

    // lockstep pairs; the first pair is the table's header row
    markers
        .iter()
        .zip(descriptions.iter())
        .skip(1)
        .map(|(&marker, &description)| extract_entry(doc, marker, description))
        .collect()
}

/// One marker/description pair into one entry.
///
/// Dev commentary arrives three ways and all are kept: a nested
/// container (verbatim), commentary paragraphs (later ones overwrite
/// earlier ones, container text stays), and link-less change headers
/// appended as notes of last resort.
fn extract_entry(doc: &Document, marker: NodeId, description: NodeId) -> ChangelogEntry {
    let container_comment = doc
        .find_in(description, Role::Block)
        .map(|div| doc.text(div))
        .filter(|t| !t.trim().is_empty());
    let mut paragraph_comment: Option<String> = None;
    let mut notes: Vec<String> = Vec::new();
    let mut groups: Vec<ChangeGroup> = Vec::new();

    for paragraph in doc.find_all_in(description, Role::Paragraph) {
        // Skip exactly one sibling: a separator node sits between a
        // header and its list. No follower at all carries nothing.
        let Some(follower) = doc.next_next_sibling(paragraph) else {
            continue;
        };
        if !doc.matches(follower, Role::BulletList) {
            // not a change header, so it is commentary
            paragraph_comment = Some(normalize_ws(&doc.text(paragraph)));
            continue;
        }

        let links = doc.find_all_in(paragraph, Role::Link);
        let ability = match links.last() {
            Some(&a) => normalize_ws(&doc.text(a)),
            None => {
                // general stat changes and brand-new abilities have no
                // section to link to; keep the text as commentary
                let text = normalize_ws(&doc.text(paragraph));
                if !text.is_empty() {
                    notes.push(text);
                }
                s!("Unknown")
            }
        };
        let changes = doc
            .find_all_in(follower, Role::BulletItem)
            .iter()
            .map(|&li| normalize_ws(&doc.text(li)))
            .collect();
        groups.push(ChangeGroup { ability, changes });
    }

    let mut parts: Vec<String> = Vec::new();
    if let Some(c) = container_comment {
        parts.push(c);
    }
    if let Some(p) = paragraph_comment.filter(|p| !p.is_empty()) {
        parts.push(p);
    }
    parts.extend(notes);

    ChangelogEntry {
        date: normalize_ws(&doc.text(marker)),
        dev_comments: parts.join("\n"),
        ability_changes: groups,
    }
}
