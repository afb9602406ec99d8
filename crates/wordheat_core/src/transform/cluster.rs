//! Near-duplicate word clustering.
//!
//! # Responsibility
//! - Fold entries of one group under canonical words picked by an ordered
//!   substring rule table.
//! - Re-key every correlation map so absorbed words point at their
//!   canonical word.
//!
//! # Invariants
//! - First matching rule wins; rule order is significant.
//! - A canonical entry's value is the sum of its members' values.
//! - Words are unique after clustering (first occurrence kept).
//! - No entry lists its own word in `similar_sources_found`.
//! - Entries of other groups keep their word, value and group.

use crate::model::entry::{HeatmapEntry, SimilarSources};
use crate::model::group::Group;
use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Maps every word containing `pattern` to `canonical`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRule {
    pub pattern: String,
    pub canonical: String,
}

impl ClusterRule {
    pub fn new(pattern: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            canonical: canonical.into(),
        }
    }
}

/// Curated rule table for job listing words.
///
/// Picked by hand from the most common substrings in the data. `kone` maps
/// to `koneet` because `kone` already exists as an investment word and
/// clustering must not create duplicates across groups.
pub fn default_job_listing_rules() -> Vec<ClusterRule> {
    [
        ("asen", "asennus"),
        ("automa", "automaatio"),
        ("hits", "hitsaus"),
        ("sähk", "sähkö"),
        ("terv", "terveys"),
        ("maala", "maalaus"),
        ("mitta", "mittaus"),
        ("elektr", "elektroniikka"),
        ("materiaa", "materiaali"),
        ("cnc", "CNC"),
        ("hio", "hiominen"),
        ("tekni", "tekniikka"),
        ("aarpora", "aarporaus"),
        ("prosess", "prosessi"),
        ("elintar", "elintarvike"),
        ("suunnit", "suunnittelu"),
        ("rakent", "rakentaminen"),
        ("huolt", "huolto"),
        ("logisti", "logistiikka"),
        ("laat", "laatu"),
        ("valmist", "valmistus"),
        ("metall", "metalli"),
        ("polttoleikka", "polttoleikkaus"),
        ("pintakäsitte", "pintakäsittely"),
        (
            "rahdinkäsittelijät",
            "rahdinkäsittelijät ja varastotyöntekijät",
        ),
        ("raken", "rakentaminen"),
        ("varasto", "varastotyö"),
        ("autoteollisuu", "autoteollisuuden vianmäärityslaitteet"),
        ("kone", "koneet"),
        ("suojavarus", "suojavarusteet"),
        ("komponent", "komponentit"),
        ("tuotet", "tuotetuntemus"),
        ("elinkaari", "tuotteen elinkaari"),
    ]
    .into_iter()
    .map(|(pattern, canonical)| ClusterRule::new(pattern, canonical))
    .collect()
}

/// Clustered dataset plus what was merged.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterReport {
    pub entries: Vec<HeatmapEntry>,
    /// Canonical word → original member words, in rule order. Canonical
    /// words without members are omitted.
    pub clusters: IndexMap<String, Vec<String>>,
    /// Words of entries that carried no `similar_sources_found`.
    pub missing_similar_sources: Vec<String>,
}

/// First rule whose pattern occurs in `word`.
pub fn match_rule<'r>(rules: &'r [ClusterRule], word: &str) -> Option<&'r ClusterRule> {
    rules
        .iter()
        .find(|rule| word.contains(rule.pattern.as_str()))
}

/// Clusters the entries of `group` using `rules` and re-sorts the dataset by
/// group ascending, value descending.
pub fn cluster_words(
    entries: Vec<HeatmapEntry>,
    rules: &[ClusterRule],
    group: Group,
) -> ClusterReport {
    info!(
        "event=cluster_words module=transform status=start entries={} rules={} group={}",
        entries.len(),
        rules.len(),
        group
    );

    let clusters = collect_clusters(&entries, rules, group);
    let mut entries = entries;
    for (canonical, members) in &clusters {
        merge_members(&mut entries, group, canonical, members);
    }

    let absorbed: HashMap<&str, &str> = clusters
        .iter()
        .flat_map(|(canonical, members)| {
            members
                .iter()
                .map(move |member| (member.as_str(), canonical.as_str()))
        })
        .collect();

    let mut missing_similar_sources = Vec::new();
    for entry in &mut entries {
        let Some(similar) = entry.similar_sources_found.take() else {
            warn!(
                "event=cluster_rekey module=transform status=warn word={} reason=missing_similar_sources_found",
                entry.word
            );
            missing_similar_sources.push(entry.word.clone());
            continue;
        };
        entry.similar_sources_found = Some(rekey(similar, &absorbed, &entry.word));
    }

    entries.sort_by(|a, b| {
        a.group
            .cmp(&b.group)
            .then_with(|| b.value.total_cmp(&a.value))
    });

    info!(
        "event=cluster_words module=transform status=ok entries={} clusters={}",
        entries.len(),
        clusters.len()
    );

    ClusterReport {
        entries,
        clusters,
        missing_similar_sources,
    }
}

/// Sorted words of `group`, for tracking how much has been clustered.
pub fn clustered_terms(entries: &[HeatmapEntry], group: Group) -> Vec<String> {
    let mut terms: Vec<String> = entries
        .iter()
        .filter(|entry| entry.group == group)
        .map(|entry| entry.word.clone())
        .collect();
    terms.sort();
    terms
}

fn collect_clusters(
    entries: &[HeatmapEntry],
    rules: &[ClusterRule],
    group: Group,
) -> IndexMap<String, Vec<String>> {
    let mut clusters: IndexMap<String, Vec<String>> = IndexMap::new();
    for rule in rules {
        clusters.entry(rule.canonical.clone()).or_default();
    }

    for entry in entries.iter().filter(|entry| entry.group == group) {
        if let Some(rule) = match_rule(rules, &entry.word) {
            if let Some(members) = clusters.get_mut(&rule.canonical) {
                members.push(entry.word.clone());
            }
        }
    }

    clusters.retain(|_, members| !members.is_empty());
    clusters
}

fn merge_members(entries: &mut Vec<HeatmapEntry>, group: Group, canonical: &str, members: &[String]) {
    let member_words: HashSet<&str> = members.iter().map(String::as_str).collect();
    let indices: Vec<usize> = entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.group == group && member_words.contains(entry.word.as_str()))
        .map(|(index, _)| index)
        .collect();
    if indices.is_empty() {
        return;
    }

    let total: f64 = indices.iter().map(|&index| entries[index].value).sum();
    let mut merged = SimilarSources::new();
    for &index in &indices {
        for (word, count) in entries[index].similar_sources_found.iter().flatten() {
            *merged.entry(word.clone()).or_insert(0) += count;
        }
    }

    for &index in &indices {
        let entry = &mut entries[index];
        entry.word = canonical.to_string();
        entry.value = total;
        entry.replaced_words = Some(members.to_vec());
        entry.similar_sources_found = Some(merged.clone());
    }
    debug!(
        "event=cluster_merge module=transform status=ok canonical={} members={} value={}",
        canonical,
        indices.len(),
        total
    );

    dedup_by_word(entries);
}

/// Keeps the first entry for every word.
fn dedup_by_word(entries: &mut Vec<HeatmapEntry>) {
    let mut seen = HashSet::new();
    entries.retain(|entry| seen.insert(entry.word.clone()));
}

fn rekey(similar: SimilarSources, absorbed: &HashMap<&str, &str>, own_word: &str) -> SimilarSources {
    let mut rekeyed = SimilarSources::with_capacity(similar.len());
    for (word, count) in similar {
        let target = absorbed.get(word.as_str()).map_or(word.as_str(), |canonical| *canonical);
        if target == own_word {
            continue;
        }
        *rekeyed.entry(target.to_string()).or_insert(0) += count;
    }
    rekeyed
}

#[cfg(test)]
mod tests {
    use super::{default_job_listing_rules, match_rule, rekey, ClusterRule};
    use crate::model::entry::SimilarSources;
    use std::collections::HashMap;

    #[test]
    fn match_rule_is_first_match_wins() {
        let rules = vec![
            ClusterRule::new("raken", "rakentaminen"),
            ClusterRule::new("rakenne", "rakenteet"),
        ];
        let rule = match_rule(&rules, "rakennesuunnittelu").unwrap();
        assert_eq!(rule.canonical, "rakentaminen");
        assert!(match_rule(&rules, "robotiikka").is_none());
    }

    #[test]
    fn default_rules_keep_curated_order() {
        let rules = default_job_listing_rules();
        assert_eq!(rules.first().unwrap(), &ClusterRule::new("asen", "asennus"));
        assert_eq!(
            match_rule(&rules, "konepaja").unwrap().canonical,
            "koneet"
        );
        // "asen" precedes "sähk".
        assert_eq!(
            match_rule(&rules, "sähköasennus").unwrap().canonical,
            "asennus"
        );
    }

    #[test]
    fn rekey_sums_collisions_and_drops_own_word() {
        let mut similar = SimilarSources::new();
        similar.insert("hitsari".to_string(), 3);
        similar.insert("hitsaustyö".to_string(), 2);
        similar.insert("kone".to_string(), 4);
        similar.insert("maalari".to_string(), 1);

        let absorbed: HashMap<&str, &str> = [
            ("hitsari", "hitsaus"),
            ("hitsaustyö", "hitsaus"),
            ("maalari", "maalaus"),
        ]
        .into_iter()
        .collect();

        let rekeyed = rekey(similar, &absorbed, "maalaus");
        assert_eq!(rekeyed.get("hitsaus"), Some(&5));
        assert_eq!(rekeyed.get("kone"), Some(&4));
        assert!(!rekeyed.contains_key("maalaus"));
        assert_eq!(rekeyed.len(), 2);
    }
}
