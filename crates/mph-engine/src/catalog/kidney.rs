//! Kidney rules, 2007 revision.

use crate::constants::{Charts, WILMS};
use crate::error::CatalogError;
use crate::group::{GroupScope, RuleGroup};
use crate::rule::{
    histology_triplet_rule, invasive_after_in_situ_rule, no_criteria_rule, nos_vs_specific_rule,
    topography_code_rule, years_apart_rule, Rule, RuleOutcome, RuleVerdict,
};

use super::{nos_chart_subset, paired_organ_rule};

pub(super) fn build(charts: &'static Charts) -> Result<RuleGroup, CatalogError> {
    let rules = vec![
        wilms_rule(),
        topography_code_rule("M4"),
        paired_organ_rule(
            "M5",
            649,
            "Are there tumors in both the right kidney and the left kidney?",
            "Tumors in both the right kidney and in the left kidney are \
             multiple primaries.",
        ),
        years_apart_rule("M6", 3),
        invasive_after_in_situ_rule("M7"),
        renal_cell_types_rule(charts),
        nos_vs_specific_rule("M9", nos_chart_subset(charts, &[8000, 8010, 8312])),
        histology_triplet_rule("M10"),
        no_criteria_rule("M11"),
    ];
    RuleGroup::new(
        "kidney-2007",
        "Kidney",
        GroupScope {
            site_inclusion: Some("C649"),
            histology_exclusion: Some(crate::constants::HEMATO_AND_KAPOSI),
            behavior_inclusion: "2-3,6",
            year_inclusion: "2007-9999",
            ..Default::default()
        },
        rules,
    )
}

fn wilms_rule() -> Rule {
    Rule::new(
        "M3",
        "Are there bilateral nephroblastomas (Wilms tumors)?",
        "Bilateral nephroblastomas are a single primary.",
        |first, second, _| {
            if super::both_histologies_in(first, second, |h| h == WILMS) {
                RuleOutcome::Matched(RuleVerdict::SinglePrimary)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}

fn renal_cell_types_rule(charts: &'static Charts) -> Rule {
    Rule::new(
        "M8",
        "Does the patient have one tumor with a specific renal cell type and \
         another tumor with a different specific renal cell type?",
        "One tumor with a specific renal cell type and another tumor with a \
         different specific renal cell type are multiple primaries.",
        move |first, second, _| {
            let (h1, h2) = match (first.histology_number(), second.histology_number()) {
                (Some(a), Some(b)) => (a, b),
                _ => return RuleOutcome::NotMatched,
            };
            if h1 != h2
                && charts.specific_renal_cell.contains(h1)
                && charts.specific_renal_cell.contains(h2)
            {
                RuleOutcome::Matched(RuleVerdict::MultiplePrimaries)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}
