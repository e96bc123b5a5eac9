//! Lung rules, 2007 revision.

use mph_types::Laterality;

use crate::constants::{Charts, NON_SMALL_CELL};
use crate::error::CatalogError;
use crate::group::{GroupScope, RuleGroup};
use crate::rule::{
    histology_triplet_rule, invasive_after_in_situ_rule, no_criteria_rule, topography_code_rule,
    years_apart_rule, Rule, RuleOutcome, RuleVerdict,
};

use super::MISSING_LATERALITY_DETAIL;

pub(super) fn build(charts: &'static Charts) -> Result<RuleGroup, CatalogError> {
    let rules = vec![
        topography_code_rule("M3"),
        small_vs_non_small_rule(charts),
        bronchioloalveolar_rule(charts),
        each_lung_rule(),
        both_lungs_histology_rule(),
        years_apart_rule("M8", 3),
        invasive_after_in_situ_rule("M9"),
        non_small_cell_specific_rule(charts),
        histology_triplet_rule("M11"),
        no_criteria_rule("M12"),
    ];
    RuleGroup::new(
        "lung-2007",
        "Lung",
        GroupScope {
            site_inclusion: Some("C340-C349"),
            histology_exclusion: Some(crate::constants::HEMATO_AND_KAPOSI),
            behavior_inclusion: "2-3,6",
            year_inclusion: "2007-9999",
            ..Default::default()
        },
        rules,
    )
}

fn small_vs_non_small_rule(charts: &'static Charts) -> Rule {
    Rule::new(
        "M4",
        "Is there at least one tumor that is non-small cell carcinoma (8046) \
         and another tumor that is small cell carcinoma (8041-8045)?",
        "At least one tumor that is non-small cell carcinoma (8046) and \
         another tumor that is small cell carcinoma (8041-8045) are multiple \
         primaries.",
        move |first, second, _| {
            let (h1, h2) = match (first.histology_number(), second.histology_number()) {
                (Some(a), Some(b)) => (a, b),
                _ => return RuleOutcome::NotMatched,
            };
            let split = (h1 == NON_SMALL_CELL && charts.small_cell.contains(h2))
                || (h2 == NON_SMALL_CELL && charts.small_cell.contains(h1));
            if split {
                RuleOutcome::Matched(RuleVerdict::MultiplePrimaries)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}

fn bronchioloalveolar_rule(charts: &'static Charts) -> Rule {
    Rule::new(
        "M5",
        "Is there a tumor that is adenocarcinoma with mixed subtypes (8255) \
         and another that is bronchioloalveolar (8250-8254)?",
        "A tumor that is adenocarcinoma with mixed subtypes (8255) and \
         another that is bronchioloalveolar (8250-8254) are multiple \
         primaries.",
        move |first, second, _| {
            let (h1, h2) = match (first.histology_number(), second.histology_number()) {
                (Some(a), Some(b)) => (a, b),
                _ => return RuleOutcome::NotMatched,
            };
            let split = (h1 == 8255 && charts.bronchioloalveolar.contains(h2))
                || (h2 == 8255 && charts.bronchioloalveolar.contains(h1));
            if split {
                RuleOutcome::Matched(RuleVerdict::MultiplePrimaries)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}

fn each_lung_rule() -> Rule {
    Rule::new(
        "M6",
        "Is there a single tumor in each lung?",
        "A single tumor in each lung is multiple primaries.",
        |first, second, _| {
            let accepted = |lat: Option<Laterality>| {
                matches!(
                    lat,
                    Some(Laterality::Right | Laterality::Left | Laterality::Bilateral)
                )
            };
            if !accepted(first.laterality) || !accepted(second.laterality) {
                return RuleOutcome::Indeterminate(MISSING_LATERALITY_DETAIL.to_string());
            }
            // Bilateral involvement is not one tumor per lung; later rules
            // look at it together with the histology.
            if first.laterality == Some(Laterality::Bilateral)
                || second.laterality == Some(Laterality::Bilateral)
            {
                return RuleOutcome::NotMatched;
            }
            if first.laterality != second.laterality {
                RuleOutcome::Matched(RuleVerdict::MultiplePrimaries)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}

fn both_lungs_histology_rule() -> Rule {
    Rule::new(
        "M7",
        "Are there tumors in both lungs with ICD-O-3 histology codes that \
         are different at the first (xxx)x number?",
        "Tumors in both lungs with ICD-O-3 histology codes that are \
         different at the first (xxx)x number are multiple primaries.",
        |first, second, _| {
            let both_lungs = first.laterality == Some(Laterality::Bilateral)
                || second.laterality == Some(Laterality::Bilateral)
                || super::opposite_sides(first, second);
            if !both_lungs {
                return RuleOutcome::NotMatched;
            }
            let (h1, h2) = match (first.histology_number(), second.histology_number()) {
                (Some(a), Some(b)) => (a, b),
                _ => return RuleOutcome::NotMatched,
            };
            if h1 / 10 != h2 / 10 {
                RuleOutcome::Matched(RuleVerdict::MultiplePrimaries)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}

fn non_small_cell_specific_rule(charts: &'static Charts) -> Rule {
    Rule::new(
        "M10",
        "Is there non-small cell carcinoma (8046) and a more specific \
         non-small cell carcinoma type?",
        "Non-small cell carcinoma (8046) and a more specific non-small cell \
         carcinoma type are a single primary.",
        move |first, second, _| {
            let (h1, h2) = match (first.histology_number(), second.histology_number()) {
                (Some(a), Some(b)) => (a, b),
                _ => return RuleOutcome::NotMatched,
            };
            let pair = (h1 == NON_SMALL_CELL && charts.specific_non_small_cell.contains(h2))
                || (h2 == NON_SMALL_CELL && charts.specific_non_small_cell.contains(h1));
            if pair {
                RuleOutcome::Matched(RuleVerdict::SinglePrimary)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}
