// src/assess/score.rs
// SentimentScorer: the fixed polarity rule table plus revert
// detection over the full changelog of one hero.

use crate::model::ChangelogEntry;

/// One change statement, scored. Derived at scoring time and never
/// mutated afterwards, apart from attaching the revert backlink.
#[derive(Clone, Debug)]
pub struct ChangeRecord {
    pub ability: String,
    pub statement: String,
    pub patch_date: String,
    /// Source-order index of the patch in the changelog (newest first).
    pub patch_ix: usize,
    /// Index of the change group within its patch.
    pub group_ix: usize,
    pub score: i32,
    /// Index into the same record list of the change this one reverts.
    pub is_revert_of: Option<usize>,
    /// More than one earlier change matched as a revert candidate;
    /// the most recent was picked, but this one wants manual review.
    pub ambiguous: bool,
    category: Option<Category>,
    direction: Option<Direction>,
    span: Option<(String, String)>,
}

/// Rendered label for judgement output.
pub fn label(record: &ChangeRecord) -> String {
    format!("{} ({})", record.statement, record.score)
}

/// Attribute categories the rule table knows. Vitals conversions are
/// their own category, so a later guard-to-health conversion can
/// revert an earlier health-to-guard one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Category {
    SelfDamage,
    Conversion,
    Cooldown,
    UltCost,
    Delay,
    Duration,
    Damage,
    Vitals,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

/// Score a full changelog. The stored changelog lists the newest patch
/// first (wiki order); revert matching is order-dependent, so patches
/// are processed oldest to newest and the results are returned mapped
/// back to source order.
pub fn score_changelog(changelog: &[ChangelogEntry]) -> Vec<ChangeRecord> {
    let mut records: Vec<ChangeRecord> = Vec::new();
    for (patch_ix, entry) in changelog.iter().enumerate() {
        for (group_ix, group) in entry.ability_changes.iter().enumerate() {
            for statement in &group.changes {
                let lower = statement.to_ascii_lowercase();
                let classified = classify(&lower);
                records.push(ChangeRecord {
                    ability: group.ability.clone(),
                    statement: statement.clone(),
                    patch_date: entry.date.clone(),
                    patch_ix,
                    group_ix,
                    score: classified.map(|(c, d)| polarity(c, d)).unwrap_or(0),
                    is_revert_of: None,
                    ambiguous: false,
                    category: classified.map(|(c, _)| c),
                    direction: classified.map(|(_, d)| d),
                    span: from_to_numbers(&lower),
                });
            }
        }
    }

    // chronological pass, oldest patch first
    let mut seen: Vec<usize> = Vec::new();
    for ix in chronological_order(&records, changelog.len()) {
        match_revert(&mut records, ix, &seen);
        seen.push(ix);
    }
    records
}

/// Record indices ordered oldest patch to newest, statements within a
/// patch keeping their source order.
fn chronological_order(records: &[ChangeRecord], patches: usize) -> Vec<usize> {
    let mut order = Vec::with_capacity(records.len());
    for patch_ix in (0..patches).rev() {
        for (ix, record) in records.iter().enumerate() {
            if record.patch_ix == patch_ix {
                order.push(ix);
            }
        }
    }
    order
}

/// Earlier records are eligible revert sources when they share the
/// ability and attribute category, scored nonzero, in the opposite
/// direction. Exact from/to numeric swaps outrank the rest; within the
/// surviving pool the most recent wins, and a pool bigger than one
/// flags the record for manual review.
fn match_revert(records: &mut [ChangeRecord], ix: usize, seen: &[usize]) {
    let (Some(category), Some(direction)) = (records[ix].category, records[ix].direction)
    else {
        return;
    };
    if records[ix].score == 0 {
        return;
    }

    let mut pool: Vec<usize> = seen
        .iter()
        .copied()
        .filter(|&earlier| {
            let r = &records[earlier];
            r.score != 0
                && r.ability == records[ix].ability
                && r.category == Some(category)
                && r.direction.is_some()
                && r.direction != Some(direction)
        })
        .collect();
    if pool.is_empty() {
        return;
    }

    if let Some((from, to)) = records[ix].span.clone() {
        let swaps: Vec<usize> = pool
            .iter()
            .copied()
            .filter(|&earlier| {
                records[earlier]
                    .span
                    .as_ref()
                    .is_some_and(|(f, t)| *f == to && *t == from)
            })
            .collect();
        if !swaps.is_empty() {
            pool = swaps;
        }
    }

    if pool.len() > 1 {
        records[ix].ambiguous = true;
        logw!(
            "{} '{}': {} earlier revert candidates, took the most recent",
            records[ix].ability,
            records[ix].statement,
            pool.len()
        );
    }
    let Some(&matched) = pool.last() else { return };
    records[ix].score = -records[matched].score;
    records[ix].is_revert_of = Some(matched);
}

/// Directional keyword matching against the changed attribute. A
/// statement matching no category, or a category with no resolvable
/// direction, stays neutral.
fn classify(t: &str) -> Option<(Category, Direction)> {
    if t.contains("self") && t.contains("damage")
        && (t.contains("no longer") || t.contains("removed"))
    {
        return Some((Category::SelfDamage, Direction::Down));
    }
    if let Some(direction) = conversion_direction(t) {
        return Some((Category::Conversion, direction));
    }
    let category = if t.contains("cooldown") {
        Category::Cooldown
    } else if t.contains("ultimate") && t.contains("cost") {
        Category::UltCost
    } else if t.contains("delay") {
        Category::Delay
    } else if t.contains("duration") {
        Category::Duration
    } else if t.contains("damage") {
        Category::Damage
    } else if t.contains("health") || t.contains("armor") || t.contains("shield") {
        Category::Vitals
    } else {
        return None;
    };
    direction_of(t).map(|d| (category, d))
}

/// A conversion statement names health and a guard pool and moves one
/// into the other under an explicit conversion cue. A bare "from A to
/// B" numeric range is not a cue: barrier stats routinely mention both
/// pools ("Shield health") without converting anything. Up means
/// toward armor/shields.
fn conversion_direction(t: &str) -> Option<Direction> {
    let health = t.find("health")?;
    let guard = t.find("armor").or_else(|| t.find("shield"))?;
    if !(t.contains("convert") || t.contains("changed to")) {
        return None;
    }
    Some(if health < guard { Direction::Up } else { Direction::Down })
}

const UP_CUES: &[&str] = &["increas", "rais", "up from"];
const DOWN_CUES: &[&str] = &["reduc", "decreas", "lower", "down from"];

/// Verb cues first, then a from/to numeric comparison.
fn direction_of(t: &str) -> Option<Direction> {
    if UP_CUES.iter().any(|cue| t.contains(cue)) {
        return Some(Direction::Up);
    }
    if DOWN_CUES.iter().any(|cue| t.contains(cue)) {
        return Some(Direction::Down);
    }
    let (from, to) = from_to_numbers(t)?;
    let from: f64 = from.parse().ok()?;
    let to: f64 = to.parse().ok()?;
    if to > from {
        Some(Direction::Up)
    } else if to < from {
        Some(Direction::Down)
    } else {
        None
    }
}

fn polarity(category: Category, direction: Direction) -> i32 {
    let sign = match direction {
        Direction::Up => 1,
        Direction::Down => -1,
    };
    match category {
        // lower is better
        Category::Cooldown | Category::UltCost | Category::Delay => -sign,
        // higher is better; Up conversions move toward armor/shields
        Category::Damage | Category::Duration | Category::Vitals | Category::Conversion => sign,
        // only the removal form is recognized
        Category::SelfDamage => 1,
    }
}

/// The numeric tokens after "from" and "to", kept as text so revert
/// swap checks compare exactly.
fn from_to_numbers(t: &str) -> Option<(String, String)> {
    Some((number_after(t, "from ")?, number_after(t, " to ")?))
}

fn number_after(t: &str, key: &str) -> Option<String> {
    let start = t.find(key)? + key.len();
    let rest = &t[start..];
    let digit = rest.find(|c: char| c.is_ascii_digit())?;
    let mut out = s!();
    for ch in rest[digit..].chars() {
        if ch.is_ascii_digit() || ch == '.' {
            out.push(ch);
        } else {
            break;
        }
    }
    if out.is_empty() { None } else { Some(out) }
}
