//! Head and neck rules, 2007 revision.

use crate::constants::{Charts, HEAD_AND_NECK_PAIRED_SITES};
use crate::error::CatalogError;
use crate::group::{GroupScope, RuleGroup};
use crate::rule::{
    histology_triplet_rule, invasive_after_in_situ_rule, no_criteria_rule, nos_vs_specific_rule,
    topography_code_rule, years_apart_rule, Rule, RuleOutcome, RuleVerdict,
};

use super::{nos_chart_subset, paired_site_rule};

pub(super) fn build(charts: &'static Charts) -> Result<RuleGroup, CatalogError> {
    let rules = vec![
        paired_site_rule(
            "M3",
            HEAD_AND_NECK_PAIRED_SITES,
            "Are there tumors on the right side and the left side of a \
             paired site?",
            "Tumors on the right side and the left side of a paired site are \
             multiple primaries.",
        )?,
        site_pair_rule(
            "M4",
            &[0, 3],
            &[1, 4],
            "Are there tumors on the upper lip (C000 or C003) and the lower \
             lip (C001 or C004)?",
            "Tumors on the upper lip (C000 or C003) and the lower lip (C001 \
             or C004) are multiple primaries.",
        ),
        site_pair_rule(
            "M5",
            &[30],
            &[31],
            "Are there tumors on the upper gum (C030) and the lower gum \
             (C031)?",
            "Tumors on the upper gum (C030) and the lower gum (C031) are \
             multiple primaries.",
        ),
        site_pair_rule(
            "M6",
            &[300],
            &[301],
            "Are there tumors in the nasal cavity (C300) and the middle ear \
             (C301)?",
            "Tumors in the nasal cavity (C300) and the middle ear (C301) are \
             multiple primaries.",
        ),
        topography_code_rule("M7"),
        invasive_after_in_situ_rule("M8"),
        years_apart_rule("M9", 5),
        nos_vs_specific_rule(
            "M10",
            nos_chart_subset(charts, &[8000, 8010, 8070, 8140, 8720, 8800]),
        ),
        histology_triplet_rule("M11"),
        no_criteria_rule("M12"),
    ];
    RuleGroup::new(
        "head-and-neck-2007",
        "Head and Neck",
        GroupScope {
            site_inclusion: Some("C000-C148,C300-C329"),
            histology_exclusion: Some(crate::constants::HEMATO_AND_KAPOSI),
            behavior_inclusion: "2-3,6",
            year_inclusion: "2007-9999",
            ..Default::default()
        },
        rules,
    )
}

/// One tumor in each of two disjoint site lists, in either order.
fn site_pair_rule(
    step: &str,
    sites_a: &'static [u16],
    sites_b: &'static [u16],
    question: &str,
    reason: &str,
) -> Rule {
    Rule::new(step, question, reason, move |first, second, _| {
        let (s1, s2) = match (first.site_number(), second.site_number()) {
            (Some(a), Some(b)) => (a, b),
            _ => return RuleOutcome::NotMatched,
        };
        let split = (sites_a.contains(&s1) && sites_b.contains(&s2))
            || (sites_a.contains(&s2) && sites_b.contains(&s1));
        if split {
            RuleOutcome::Matched(RuleVerdict::MultiplePrimaries)
        } else {
            RuleOutcome::NotMatched
        }
    })
}
