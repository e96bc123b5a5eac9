//! Malignant brain rules, 2007 revision.

use crate::constants::{self, Charts, GLIOBLASTOMA, NEUROEPITHELIAL};
use crate::dates::{self, DxOrder};
use crate::error::CatalogError;
use crate::group::{GroupScope, RuleGroup};
use crate::rule::{
    histology_triplet_rule, no_criteria_rule, topography_code_rule, Rule, RuleOutcome, RuleVerdict,
};

use super::MISSING_DATE_ORDER_DETAIL;

pub(super) const SITES: &str = "C700-C701,C709-C725,C728-C729,C751-C753";

pub(super) fn build(charts: &'static Charts) -> Result<RuleGroup, CatalogError> {
    let rules = vec![
        invasive_following_lesser_rule(),
        topography_code_rule("M5"),
        glioblastoma_rule(charts),
        same_branch_rule(charts),
        different_branch_rule(charts),
        histology_triplet_rule("M9"),
        no_criteria_rule("M10"),
    ];
    RuleGroup::new(
        "malignant-brain-2007",
        "Malignant Brain",
        GroupScope {
            site_inclusion: Some(SITES),
            histology_exclusion: Some(crate::constants::HEMATO_AND_KAPOSI),
            behavior_inclusion: "3",
            year_inclusion: "2007-9999",
            ..Default::default()
        },
        rules,
    )
}

/// An invasive tumor following a benign or in situ tumor would be multiple
/// primaries, but both tumors of this group are invasive, so the criterion
/// can never be met here. The step is kept so the chain numbering matches
/// the published rules.
fn invasive_following_lesser_rule() -> Rule {
    Rule::new(
        "M4",
        "Is there an invasive tumor following a benign or in situ tumor?",
        "An invasive brain tumor following a benign or in situ brain tumor \
         is a multiple primary.",
        |_, _, _| RuleOutcome::NotMatched,
    )
}

fn glioblastoma_rule(charts: &'static Charts) -> Rule {
    Rule::new(
        "M6",
        "Is there a glioblastoma or glioblastoma multiforme (9440) following \
         a glial tumor?",
        "A glioblastoma or glioblastoma multiforme (9440) following a glial \
         tumor is a single primary.",
        move |first, second, _| {
            let (h1, h2) = match (first.histology_number(), second.histology_number()) {
                (Some(a), Some(b)) => (a, b),
                _ => return RuleOutcome::NotMatched,
            };
            let (glioblastoma, glial) = if h1 == GLIOBLASTOMA && charts.glial_tumor.contains(h2) {
                (first, second)
            } else if h2 == GLIOBLASTOMA && charts.glial_tumor.contains(h1) {
                (second, first)
            } else {
                return RuleOutcome::NotMatched;
            };
            match dates::compare_diagnosis_dates(
                glioblastoma.diagnosis_date,
                glial.diagnosis_date,
            ) {
                DxOrder::FirstLater => RuleOutcome::Matched(RuleVerdict::SinglePrimary),
                DxOrder::SecondLater | DxOrder::Same => RuleOutcome::NotMatched,
                DxOrder::Indeterminate => {
                    RuleOutcome::Indeterminate(MISSING_DATE_ORDER_DETAIL.to_string())
                }
            }
        },
    )
}

fn chart_branches(charts: &Charts, histology: u16) -> (Option<&'static str>, Option<&'static str>) {
    (
        constants::malignant_chart1_branch(charts, histology),
        charts.malignant_brain_chart2.get(&histology).copied(),
    )
}

fn same_branch_rule(charts: &'static Charts) -> Rule {
    Rule::new(
        "M7",
        "Do the tumors have ICD-O-3 histology codes on the same branch in \
         Chart 1 or Chart 2?",
        "Tumors with ICD-O-3 histology codes on the same branch in Chart 1 \
         or Chart 2 are a single primary.",
        move |first, second, _| {
            let (h1, h2) = match (first.histology_number(), second.histology_number()) {
                (Some(a), Some(b)) => (a, b),
                _ => return RuleOutcome::NotMatched,
            };
            // Neuroepithelial tumors sit on every branch of Chart 1.
            let chart1_match = if h1 == NEUROEPITHELIAL || h2 == NEUROEPITHELIAL {
                let other = if h1 == NEUROEPITHELIAL { h2 } else { h1 };
                other == NEUROEPITHELIAL
                    || constants::malignant_chart1_branch(charts, other).is_some()
            } else {
                match (
                    constants::malignant_chart1_branch(charts, h1),
                    constants::malignant_chart1_branch(charts, h2),
                ) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                }
            };
            let chart2_match = match (
                charts.malignant_brain_chart2.get(&h1),
                charts.malignant_brain_chart2.get(&h2),
            ) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            };
            if chart1_match || chart2_match {
                RuleOutcome::Matched(RuleVerdict::SinglePrimary)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}

fn different_branch_rule(charts: &'static Charts) -> Rule {
    Rule::new(
        "M8",
        "Do the tumors have ICD-O-3 histology codes on different branches in \
         Chart 1 or Chart 2?",
        "Tumors with ICD-O-3 histology codes on different branches in Chart \
         1 or Chart 2 are multiple primaries.",
        move |first, second, _| {
            let (h1, h2) = match (first.histology_number(), second.histology_number()) {
                (Some(a), Some(b)) => (a, b),
                _ => return RuleOutcome::NotMatched,
            };
            if h1 == NEUROEPITHELIAL || h2 == NEUROEPITHELIAL {
                return RuleOutcome::NotMatched;
            }
            let (c1a, c2a) = chart_branches(charts, h1);
            let (c1b, c2b) = chart_branches(charts, h2);
            let chart1_differ = matches!((c1a, c1b), (Some(a), Some(b)) if a != b);
            let chart2_differ = matches!((c2a, c2b), (Some(a), Some(b)) if a != b);
            if chart1_differ || chart2_differ {
                RuleOutcome::Matched(RuleVerdict::MultiplePrimaries)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}
