// src/model.rs
// Serde data model. Field names bind to the on-disk artifacts: hero
// profiles carry the capitalized top-level keys, judgements the flat
// snake_case schema.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One hero page, extracted. Immutable once built; the sole input to
/// the assess phase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeroProfile {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Abilities")]
    pub abilities: Vec<Ability>,
    #[serde(rename = "Changelog")]
    pub changelog: Vec<ChangelogEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub keybind: Keybind,
    /// Stat-name to entry. BTreeMap keeps serialized output stable.
    pub stats: BTreeMap<String, StatEntry>,
}

/// Input binding: primary fire, alt fire, or a key label. Serialized
/// as the plain string ("LCLICK", "RCLICK", or the key text).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Keybind {
    LClick,
    RClick,
    Key(String),
}

impl From<String> for Keybind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "LCLICK" => Keybind::LClick,
            "RCLICK" => Keybind::RClick,
            _ => Keybind::Key(s),
        }
    }
}

impl From<Keybind> for String {
    fn from(k: Keybind) -> Self {
        match k {
            Keybind::LClick => s!("LCLICK"),
            Keybind::RClick => s!("RCLICK"),
            Keybind::Key(keys) => keys,
        }
    }
}

/// A stat value: a flag for checkmark/cross glyphs, text otherwise.
/// "inf" is the infinity sentinel; ranges are hyphen-separated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Flag(bool),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatEntry {
    pub value: StatValue,
    /// Tooltip text, when the stat key carries one. Serialized as an
    /// explicit null otherwise, matching the original artifacts.
    pub info: Option<String>,
}

/// One patch's worth of documented changes. Wiki order: newest first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    pub date: String,
    /// Possibly empty, possibly concatenated from several sources.
    pub dev_comments: String,
    pub ability_changes: Vec<ChangeGroup>,
}

/// The change statements one patch applies to one ability. The ability
/// is "Unknown" when the header carried no resolvable link.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChangeGroup {
    pub ability: String,
    pub changes: Vec<String>,
}

/* ---------------- judgement side ---------------- */

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeroAssessment {
    pub hero_name: String,
    /// Tally, trend narrative and a 0-10 state score.
    pub hero_assessment: String,
    pub historical_changes: Vec<PatchAssessment>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatchAssessment {
    pub patch_date: String,
    pub ability_changes_judgements: BTreeMap<String, Vec<AbilityJudgement>>,
    pub overall_judgement: String,
}

/// One change group's judgement: the group's score sum plus rendered
/// "statement (score)" labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbilityJudgement {
    pub score: i32,
    pub changes: Vec<String>,
}
