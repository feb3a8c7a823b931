use crate::models::Exercise;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

struct FamilyDefinition {
    label: &'static str,
    matcher: Regex,
}

// First match wins, so order matters.
static FAMILY_DEFINITIONS: Lazy<Vec<FamilyDefinition>> = Lazy::new(|| {
    [
        ("PETTORALI", r"(?i)PETTORALE|PETTORALI"),
        ("DELTOIDI", r"(?i)DELTOID"),
        ("BICIPITI", r"(?i)BICIPIT"),
        ("DORSO", r"(?i)DORSO|GRAN DORSALE|CENTRO SCHIENA"),
        ("TRICIPITI", r"(?i)TRICIPIT"),
        ("FEMORALI", r"(?i)FEMORAL|FEMORALI"),
        ("QUADRICIPITI", r"(?i)QUADRICIPIT"),
        ("GLUTEI", r"(?i)GLUTEO|GLUTEI|GLUTE"),
    ]
    .into_iter()
    .filter_map(|(label, pattern)| {
        Regex::new(pattern)
            .ok()
            .map(|matcher| FamilyDefinition { label, matcher })
    })
    .collect()
});

static PARENS: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"[()]").ok());
static GLUTE_SMALL: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(?i)PICCOL").ok());
static GLUTE_MEDIUM: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(?i)MEDIO").ok());
static GLUTE_LARGE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?i)GRANDE|GRAN\b|MAGN").ok());

// Chart color token for the muscle groups the grid offers by default.
const MUSCLE_COLORS: &[(&str, &str)] = &[
    ("FEMORALI", "femorali"),
    ("BICIPITI", "bicipiti"),
    ("DELTOIDE MEDIALE", "deltoide"),
    ("DORSO INFERIORE", "dorso"),
    ("SPALLE DORSALI", "spalle"),
    ("DELTOIDI", "deltoide"),
    ("GRAN DORSALE", "dorso"),
    ("OBLIQUI", "obliqui"),
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VolumeSegment {
    pub name: String,
    pub label: String,
    pub volume: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FamilyVolume {
    pub label: String,
    pub total: u32,
    pub children: Vec<VolumeSegment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct VolumeChart {
    pub families: Vec<FamilyVolume>,
    pub max_volume: u32,
    pub total_exercises: u32,
}

pub fn family_for(muscle_group: &str) -> String {
    FAMILY_DEFINITIONS
        .iter()
        .find(|family| family.matcher.is_match(muscle_group))
        .map(|family| family.label.to_string())
        .unwrap_or_else(|| muscle_group.to_string())
}

pub fn tally_muscle_groups(exercises: &[Exercise]) -> BTreeMap<String, u32> {
    let mut tally = BTreeMap::new();
    for exercise in exercises {
        let count = tally.entry(exercise.muscle_group.clone()).or_insert(0u32);
        *count = count.saturating_add(1);
    }
    tally
}

pub fn aggregate_volume(tally: &BTreeMap<String, u32>) -> VolumeChart {
    let mut families: Vec<FamilyVolume> = Vec::new();

    for (name, &volume) in tally.iter().filter(|(_, volume)| **volume > 0) {
        let label = family_for(name);
        let segment = VolumeSegment {
            name: name.clone(),
            label: segment_label(&label, name),
            volume,
            color: muscle_color(name).map(str::to_string),
        };

        match families.iter_mut().find(|family| family.label == label) {
            Some(family) => {
                family.total = family.total.saturating_add(volume);
                family.children.push(segment);
            }
            None => families.push(FamilyVolume {
                label,
                total: volume,
                children: vec![segment],
            }),
        }
    }

    families.retain(|family| family.total > 0);
    families.sort_by_key(|family| family.total);

    VolumeChart {
        max_volume: families.iter().map(|f| f.total).max().unwrap_or(0),
        total_exercises: tally.values().copied().sum(),
        families,
    }
}

pub fn muscle_color(name: &str) -> Option<&'static str> {
    let name = name.trim();
    MUSCLE_COLORS
        .iter()
        .find(|(group, _)| group.eq_ignore_ascii_case(name))
        .map(|(_, color)| *color)
}

fn strip_parens(name: &str) -> String {
    match &*PARENS {
        Some(re) => re.replace_all(name, "").trim().to_string(),
        None => name.trim().to_string(),
    }
}

fn matches(re: &Option<Regex>, text: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(text))
}

fn short_label(name: &str) -> String {
    let cleaned = strip_parens(name);
    let parts: Vec<&str> = cleaned.split_whitespace().collect();
    if parts.len() <= 1 {
        return cleaned.to_uppercase();
    }

    let tail = parts[1..].join(" ").to_uppercase();
    if tail.chars().count() > 18 {
        let head: String = tail.chars().take(15).collect();
        format!("{head}…")
    } else {
        tail
    }
}

/// Short name of a muscle group inside its family's stacked bar.
pub fn segment_label(family: &str, name: &str) -> String {
    if family != "GLUTEI" {
        return short_label(name);
    }

    let upper = name.to_uppercase();
    if matches(&GLUTE_SMALL, &upper) {
        return "PICCOLO".to_string();
    }
    if matches(&GLUTE_MEDIUM, &upper) {
        return "MEDIO".to_string();
    }
    if matches(&GLUTE_LARGE, &upper) {
        return "GRANDE".to_string();
    }

    strip_parens(&upper)
        .split_whitespace()
        .last()
        .map(|word| word.chars().take(12).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(entries: &[(&str, u32)]) -> BTreeMap<String, u32> {
        entries
            .iter()
            .map(|(name, count)| (name.to_string(), *count))
            .collect()
    }

    #[test]
    fn known_groups_carry_their_color() {
        let chart = aggregate_volume(&tally(&[("Gran Dorsale", 2), ("PETTORALE ALTO", 1)]));

        let colors: Vec<(String, Option<String>)> = chart
            .families
            .iter()
            .flat_map(|family| family.children.iter())
            .map(|segment| (segment.name.clone(), segment.color.clone()))
            .collect();
        assert!(colors.contains(&("Gran Dorsale".to_string(), Some("dorso".to_string()))));
        assert!(colors.contains(&("PETTORALE ALTO".to_string(), None)));
        assert_eq!(muscle_color("deltoide mediale"), Some("deltoide"));
    }

    #[test]
    fn groups_bucket_into_first_matching_family() {
        assert_eq!(family_for("PETTORALE ALTO"), "PETTORALI");
        assert_eq!(family_for("deltoide mediale"), "DELTOIDI");
        assert_eq!(family_for("GRAN DORSALE"), "DORSO");
        assert_eq!(family_for("GLUTEO MEDIO"), "GLUTEI");
        assert_eq!(family_for("OBLIQUI"), "OBLIQUI");
    }

    #[test]
    fn families_sum_and_sort_ascending() {
        let chart = aggregate_volume(&tally(&[
            ("DELTOIDE MEDIALE", 3),
            ("DELTOIDI", 2),
            ("GRAN DORSALE", 1),
            ("DORSO INFERIORE", 1),
            ("OBLIQUI", 4),
            ("BICIPITI", 0),
        ]));

        let labels: Vec<(&str, u32)> = chart
            .families
            .iter()
            .map(|f| (f.label.as_str(), f.total))
            .collect();
        assert_eq!(labels, vec![("DORSO", 2), ("OBLIQUI", 4), ("DELTOIDI", 5)]);
        assert_eq!(chart.max_volume, 5);
    }

    #[test]
    fn no_counts_are_lost() {
        let input = tally(&[
            ("PETTORALE ALTO", 2),
            ("PETTORALI", 5),
            ("TRICIPITI", 3),
            ("POLPACCI", 7),
            ("QUADRICIPITI", 1),
            ("GLUTEO GRANDE", 2),
        ]);
        let chart = aggregate_volume(&input);
        let family_sum: u32 = chart.families.iter().map(|f| f.total).sum();
        assert_eq!(family_sum, input.values().sum::<u32>());
        assert_eq!(chart.total_exercises, family_sum);
    }

    #[test]
    fn empty_tally_has_no_families() {
        let chart = aggregate_volume(&BTreeMap::new());
        assert!(chart.families.is_empty());
        assert_eq!(chart.max_volume, 0);
    }

    #[test]
    fn tally_counts_exercises_per_group() {
        let exercises: Vec<Exercise> = ["FEMORALI", "BICIPITI", "FEMORALI"]
            .iter()
            .map(|group| Exercise {
                muscle_group: group.to_string(),
                ..Exercise::default()
            })
            .collect();
        assert_eq!(
            tally_muscle_groups(&exercises),
            tally(&[("BICIPITI", 1), ("FEMORALI", 2)])
        );
    }

    #[test]
    fn segment_labels() {
        assert_eq!(segment_label("GLUTEI", "Gluteo piccolo"), "PICCOLO");
        assert_eq!(segment_label("GLUTEI", "GLUTEO (MEDIO)"), "MEDIO");
        assert_eq!(segment_label("GLUTEI", "GRAN GLUTEO"), "GRANDE");
        assert_eq!(segment_label("DELTOIDI", "DELTOIDE (MEDIALE)"), "MEDIALE");
        assert_eq!(segment_label("OBLIQUI", "obliqui"), "OBLIQUI");
        assert_eq!(
            segment_label("DORSO", "DORSO PARTE INFERIORE LOMBARE"),
            "PARTE INFERIORE…"
        );
    }
}
