//! Benign and borderline brain rules, 2007 revision.

use crate::constants::{self, Charts, BRAIN_PAIRED_SITES};
use crate::dates::{self, DxOrder};
use crate::error::CatalogError;
use crate::group::{GroupScope, RuleGroup};
use crate::rule::{
    full_topography_rule, histology_triplet_rule, no_criteria_rule, Rule, RuleOutcome, RuleVerdict,
};

use super::{paired_site_rule, MISSING_DATE_ORDER_DETAIL};

pub(super) fn build(charts: &'static Charts) -> Result<RuleGroup, CatalogError> {
    let rules = vec![
        invasive_following_benign_rule(),
        full_topography_rule("M4"),
        paired_site_rule(
            "M5",
            BRAIN_PAIRED_SITES,
            "Are there tumors on both sides of a paired site?",
            "Tumors on both sides of a paired site are multiple primaries.",
        )?,
        progression_rule(
            "M6",
            9390,
            "Is there an atypical choroid plexus papilloma (9390/1) \
             following a choroid plexus papilloma, NOS (9390/0)?",
            "An atypical choroid plexus papilloma (9390/1) following a \
             choroid plexus papilloma, NOS (9390/0) is a multiple primary.",
        ),
        progression_rule(
            "M7",
            9540,
            "Is there an atypical neurofibroma (9540/1) following a \
             neurofibroma, NOS (9540/0)?",
            "An atypical neurofibroma (9540/1) following a neurofibroma, NOS \
             (9540/0) is a multiple primary.",
        ),
        same_branch_rule(charts),
        different_branch_rule(charts),
        unlisted_histology_rule(charts),
        histology_triplet_rule("M11"),
        no_criteria_rule("M12"),
    ];
    RuleGroup::new(
        "benign-brain-2007",
        "Benign Brain",
        GroupScope {
            site_inclusion: Some(super::malignant_brain::SITES),
            histology_exclusion: Some(crate::constants::HEMATO_AND_KAPOSI),
            behavior_inclusion: "0-1",
            year_inclusion: "2007-9999",
            ..Default::default()
        },
        rules,
    )
}

/// An invasive tumor following a benign tumor would be multiple primaries,
/// but this group only ever sees /0 and /1 tumors. The step keeps the
/// published numbering.
fn invasive_following_benign_rule() -> Rule {
    Rule::new(
        "M3",
        "Is there an invasive tumor following a benign tumor?",
        "An invasive brain tumor following a benign brain tumor is a \
         multiple primary.",
        |_, _, _| RuleOutcome::NotMatched,
    )
}

/// The `/1` form of `histology` following its `/0` form is a new primary.
fn progression_rule(step: &str, histology: u16, question: &str, reason: &str) -> Rule {
    Rule::new(step, question, reason, move |first, second, _| {
        let pair = first.histology_number() == Some(histology)
            && second.histology_number() == Some(histology);
        if !pair {
            return RuleOutcome::NotMatched;
        }
        let (atypical, nos) = match (first.behavior.as_str(), second.behavior.as_str()) {
            ("1", "0") => (first, second),
            ("0", "1") => (second, first),
            _ => return RuleOutcome::NotMatched,
        };
        match dates::compare_diagnosis_dates(atypical.diagnosis_date, nos.diagnosis_date) {
            DxOrder::FirstLater => RuleOutcome::Matched(RuleVerdict::MultiplePrimaries),
            DxOrder::SecondLater | DxOrder::Same => RuleOutcome::NotMatched,
            DxOrder::Indeterminate => {
                RuleOutcome::Indeterminate(MISSING_DATE_ORDER_DETAIL.to_string())
            }
        }
    })
}

fn branch(charts: &Charts, tumor: &mph_types::TumorRecord) -> Option<&'static str> {
    let histology = tumor.histology_number()?;
    let behavior = tumor.behavior.trim().chars().next()?;
    constants::benign_brain_branch(charts, histology, behavior)
}

fn same_branch_rule(charts: &'static Charts) -> Rule {
    Rule::new(
        "M8",
        "Do the tumors have ICD-O-3 histology codes on the same branch in \
         Chart 1?",
        "Tumors with ICD-O-3 histology codes on the same branch in Chart 1 \
         are a single primary.",
        move |first, second, _| {
            match (branch(charts, first), branch(charts, second)) {
                (Some(a), Some(b)) if a == b => {
                    RuleOutcome::Matched(RuleVerdict::SinglePrimary)
                }
                _ => RuleOutcome::NotMatched,
            }
        },
    )
}

fn different_branch_rule(charts: &'static Charts) -> Rule {
    Rule::new(
        "M9",
        "Do the tumors have ICD-O-3 histology codes on different branches in \
         Chart 1?",
        "Tumors with ICD-O-3 histology codes on different branches in Chart \
         1 are multiple primaries.",
        move |first, second, _| {
            match (branch(charts, first), branch(charts, second)) {
                (Some(a), Some(b)) if a != b => {
                    RuleOutcome::Matched(RuleVerdict::MultiplePrimaries)
                }
                _ => RuleOutcome::NotMatched,
            }
        },
    )
}

fn unlisted_histology_rule(charts: &'static Charts) -> Rule {
    Rule::new(
        "M10",
        "Is one tumor's ICD-O-3 histology code listed in Chart 1 and the \
         other's not listed?",
        "A tumor with an ICD-O-3 histology code listed in Chart 1 and a \
         tumor with a code not listed in Chart 1 are multiple primaries.",
        move |first, second, _| {
            let listed = (branch(charts, first).is_some(), branch(charts, second).is_some());
            if listed.0 != listed.1 {
                RuleOutcome::Matched(RuleVerdict::MultiplePrimaries)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}
