// src/assess/aggregate.rs
// Aggregator: scored records folded into per-patch assessments and the
// hero-level judgement.

use std::collections::BTreeMap;

use crate::model::{
    AbilityJudgement, ChangelogEntry, HeroAssessment, HeroProfile, PatchAssessment,
};

use super::score::{self, ChangeRecord};

/// Full local pipeline: score the changelog, then fold.
pub fn assess(profile: &HeroProfile) -> HeroAssessment {
    let records = score::score_changelog(&profile.changelog);
    HeroAssessment {
        hero_name: profile.name.clone(),
        hero_assessment: hero_summary(&profile.name, &records),
        historical_changes: patch_assessments(&profile.changelog, &records),
    }
}

/// One assessment per patch, in source order. Records are grouped back
/// into their change groups so the judgement map mirrors the
/// changelog's shape; nothing is dropped, nothing counted twice.
fn patch_assessments(
    changelog: &[ChangelogEntry],
    records: &[ChangeRecord],
) -> Vec<PatchAssessment> {
    changelog
        .iter()
        .enumerate()
        .map(|(patch_ix, entry)| {
            let mut judgements: BTreeMap<String, Vec<AbilityJudgement>> = BTreeMap::new();
            for (group_ix, group) in entry.ability_changes.iter().enumerate() {
                let group_records: Vec<&ChangeRecord> = records
                    .iter()
                    .filter(|r| r.patch_ix == patch_ix && r.group_ix == group_ix)
                    .collect();
                judgements.entry(group.ability.clone()).or_default().push(AbilityJudgement {
                    score: group_records.iter().map(|r| r.score).sum(),
                    changes: group_records.iter().map(|r| score::label(r)).collect(),
                });
            }

            let net: i32 = records
                .iter()
                .filter(|r| r.patch_ix == patch_ix)
                .map(|r| r.score)
                .sum();
            let scored = records
                .iter()
                .filter(|r| r.patch_ix == patch_ix && r.score != 0)
                .count();

            PatchAssessment {
                patch_date: entry.date.clone(),
                ability_changes_judgements: judgements,
                overall_judgement: judgement_line(net, scored),
            }
        })
        .collect()
}

/// Sign of the patch net decides the word; zero with scored changes is
/// mixed, zero without is unchanged.
fn judgement_line(net: i32, scored: usize) -> String {
    if net > 0 {
        format!("buffed (net {net:+})")
    } else if net < 0 {
        format!("nerfed (net {net:+})")
    } else if scored > 0 {
        s!("mixed (net +0)")
    } else {
        s!("unchanged")
    }
}

/// Tally, trend and a 0-10 state score: 5 plus the lifetime net,
/// clamped.
fn hero_summary(name: &str, records: &[ChangeRecord]) -> String {
    let positive = records.iter().filter(|r| r.score > 0).count();
    let negative = records.iter().filter(|r| r.score < 0).count();
    let net: i64 = records.iter().map(|r| i64::from(r.score)).sum();
    let state = (5 + net).clamp(0, 10);
    let trend = if net > 0 {
        "the net effect has pushed the hero upward"
    } else if net < 0 {
        "the net effect has pushed the hero downward"
    } else {
        "buffs and nerfs have balanced out"
    };
    format!(
        "{name} has received {positive} positive and {negative} negative changes \
         across the recorded patches; {trend}. Current state: {state}/10."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChangeGroup;

    fn patch(date: &str, groups: &[(&str, &[&str])]) -> ChangelogEntry {
        ChangelogEntry {
            date: s!(date),
            dev_comments: s!(),
            ability_changes: groups
                .iter()
                .map(|(ability, changes)| ChangeGroup {
                    ability: s!(*ability),
                    changes: changes.iter().map(|c| s!(*c)).collect(),
                })
                .collect(),
        }
    }

    fn profile(changelog: Vec<ChangelogEntry>) -> HeroProfile {
        HeroProfile { name: s!("Test Hero"), abilities: Vec::new(), changelog }
    }

    #[test]
    fn judgement_words_follow_the_net_sign() {
        assert_eq!(judgement_line(2, 2), "buffed (net +2)");
        assert_eq!(judgement_line(-1, 1), "nerfed (net -1)");
        assert_eq!(judgement_line(0, 2), "mixed (net +0)");
        assert_eq!(judgement_line(0, 0), "unchanged");
    }

    #[test]
    fn state_score_clamps_to_the_scale() {
        let buffs = [
            "Damage increased from 1 to 2",
            "Damage increased from 2 to 3",
            "Damage increased from 3 to 4",
            "Damage increased from 4 to 5",
            "Damage increased from 5 to 6",
            "Damage increased from 6 to 7",
            "Damage increased from 7 to 8",
        ];
        let a = assess(&profile(vec![patch("2023-01-01", &[("X", &buffs[..])])]));
        assert!(a.hero_assessment.contains("10/10"));

        let a = assess(&profile(Vec::new()));
        assert!(a.hero_assessment.contains("5/10"));
        assert!(a.hero_assessment.contains("0 positive and 0 negative"));
    }

    #[test]
    fn groups_keep_their_shape_and_labels() {
        let log = vec![patch(
            "2023-01-01",
            &[
                ("Shield Bash", &["Cooldown reduced from 8 to 6 seconds"][..]),
                ("Unknown", &["Base health increased from 200 to 250"][..]),
            ],
        )];
        let a = assess(&profile(log));
        let p = &a.historical_changes[0];
        assert_eq!(p.overall_judgement, "buffed (net +2)");
        assert_eq!(p.ability_changes_judgements.len(), 2);
        let bash = &p.ability_changes_judgements["Shield Bash"][0];
        assert_eq!(bash.score, 1);
        assert_eq!(bash.changes, vec!["Cooldown reduced from 8 to 6 seconds (1)"]);
    }

    #[test]
    fn repeated_ability_names_stack_their_groups() {
        let log = vec![patch(
            "2023-01-01",
            &[
                ("X", &["Damage increased from 1 to 2"][..]),
                ("X", &["Cooldown increased from 6 to 8 seconds"][..]),
            ],
        )];
        let a = assess(&profile(log));
        let groups = &a.historical_changes[0].ability_changes_judgements["X"];
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].score, 1);
        assert_eq!(groups[1].score, -1);
        assert_eq!(a.historical_changes[0].overall_judgement, "mixed (net +0)");
    }

    #[test]
    fn no_label_is_dropped_or_double_counted() {
        let log = vec![
            patch("2023-05-09", &[("A", &["Cooldown increased from 6 to 8 seconds"][..])]),
            patch(
                "2023-01-01",
                &[
                    ("A", &["Cooldown reduced from 8 to 6 seconds", "Updated visuals"][..]),
                    ("B", &["Damage increased from 10 to 12"][..]),
                ],
            ),
        ];
        let records = score::score_changelog(&log);
        let patches = patch_assessments(&log, &records);
        let labels: usize = patches
            .iter()
            .flat_map(|p| p.ability_changes_judgements.values())
            .flat_map(|groups| groups.iter())
            .map(|g| g.changes.len())
            .sum();
        assert_eq!(labels, records.len());
        assert_eq!(labels, 4);
    }
}
