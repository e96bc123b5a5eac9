//! The rule-group catalogue.
//!
//! One module per anatomic rule group, each exposing a `build` function that
//! assembles the group's scope and ordered rule chain. [`build_all`] returns
//! the groups in resolution priority order: the year-scoped hematopoietic
//! revisions first, the site-specific groups next, and the residual
//! catch-all last.

use std::sync::Arc;

use mph_types::{Laterality, TumorRecord};

use crate::constants::{self, Charts};
use crate::error::CatalogError;
use crate::group::RuleGroup;
use crate::ranges::{CodeKind, RangeSet};
use crate::rule::{Rule, RuleOutcome, RuleVerdict};
use crate::tables::HematoTables;

mod benign_brain;
mod breast;
mod colon;
mod head_and_neck;
mod hemato_1998;
mod hemato_2001;
mod kidney;
mod lung;
mod malignant_brain;
mod melanoma;
mod other_sites;
mod urinary;

/// Builds every rule group, in resolution priority order.
pub fn build_all() -> Result<Vec<RuleGroup>, CatalogError> {
    let charts = constants::charts()?;
    let tables = Arc::new(HematoTables::load()?);
    Ok(vec![
        hemato_1998::build(Arc::clone(&tables))?,
        hemato_2001::build(tables)?,
        benign_brain::build(charts)?,
        breast::build(charts)?,
        colon::build(charts)?,
        head_and_neck::build(charts)?,
        kidney::build(charts)?,
        lung::build(charts)?,
        malignant_brain::build(charts)?,
        melanoma::build()?,
        urinary::build(charts)?,
        other_sites::build(charts)?,
    ])
}

/// Detail text for rules stopped by an unusable laterality.
pub(crate) const MISSING_LATERALITY_DETAIL: &str =
    "Valid and known laterality should be provided.";

/// Detail text for order-sensitive rules stopped by an undecidable
/// diagnosis order.
pub(crate) const MISSING_DATE_ORDER_DETAIL: &str =
    "Valid and known diagnosis date should be provided.";

/// Both lateralities name a definite side and the sides differ.
pub(crate) fn opposite_sides(first: &TumorRecord, second: &TumorRecord) -> bool {
    matches!(
        (first.laterality, second.laterality),
        (Some(Laterality::Right), Some(Laterality::Left))
            | (Some(Laterality::Left), Some(Laterality::Right))
    )
}

/// Shared shape of the "one tumor on each side of a paired site" rules:
/// when both tumors sit in the same paired-site region, a definite side is
/// required of each, and opposite sides decide multiple primaries.
pub(crate) fn paired_site_rule(
    step: &str,
    site_specs: &[&str],
    question: &str,
    reason: &str,
) -> Result<Rule, CatalogError> {
    let regions: Vec<RangeSet> = site_specs
        .iter()
        .map(|spec| RangeSet::parse(spec, CodeKind::Topography))
        .collect::<Result<_, _>>()?;
    Ok(Rule::new(step, question, reason, move |first, second, _| {
        let (s1, s2) = match (first.site_number(), second.site_number()) {
            (Some(a), Some(b)) => (a, b),
            _ => return RuleOutcome::NotMatched,
        };
        let shared_region = regions
            .iter()
            .any(|region| region.contains(s1) && region.contains(s2));
        if !shared_region {
            return RuleOutcome::NotMatched;
        }
        let definite = |lat: Option<Laterality>| matches!(lat, Some(l) if l.is_side());
        if !definite(first.laterality) || !definite(second.laterality) {
            return RuleOutcome::Indeterminate(MISSING_LATERALITY_DETAIL.to_string());
        }
        if first.laterality != second.laterality {
            RuleOutcome::Matched(RuleVerdict::MultiplePrimaries)
        } else {
            RuleOutcome::NotMatched
        }
    }))
}

/// Rule shape for two single-site organs reported on opposite sides
/// (both kidneys, both renal pelves, both ureters).
pub(crate) fn paired_organ_rule(
    step: &str,
    site: u16,
    question: &str,
    reason: &str,
) -> Rule {
    Rule::new(step, question, reason, move |first, second, _| {
        if first.site_number() != Some(site) || second.site_number() != Some(site) {
            return RuleOutcome::NotMatched;
        }
        let definite = |lat: Option<Laterality>| matches!(lat, Some(l) if l.is_side());
        if !definite(first.laterality) || !definite(second.laterality) {
            return RuleOutcome::Indeterminate(MISSING_LATERALITY_DETAIL.to_string());
        }
        if first.laterality != second.laterality {
            RuleOutcome::Matched(RuleVerdict::MultiplePrimaries)
        } else {
            RuleOutcome::NotMatched
        }
    })
}

/// Whether both tumors carry one of the given histologies.
pub(crate) fn both_histologies_in(
    first: &TumorRecord,
    second: &TumorRecord,
    predicate: impl Fn(u16) -> bool,
) -> bool {
    match (first.histology_number(), second.histology_number()) {
        (Some(a), Some(b)) => predicate(a) && predicate(b),
        _ => false,
    }
}

/// Filters the NOS chart down to the listed NOS keys, cloning the specific
/// ranges for the rule to own.
pub(crate) fn nos_chart_subset(charts: &Charts, keys: &[u16]) -> Vec<(u16, RangeSet)> {
    charts
        .nos_chart
        .iter()
        .filter(|(nos, _)| keys.contains(nos))
        .map(|(nos, set)| (*nos, set.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_all_priority_order() {
        let groups = build_all().unwrap();
        let ids: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids.first(), Some(&"hematopoietic-1998"));
        assert_eq!(ids.last(), Some(&"other-sites-2007"));
        assert_eq!(groups.len(), 12);
    }

    #[test]
    fn test_paired_site_rule_regions() {
        use mph_types::PartialDate;

        let rule = paired_site_rule(
            "M3",
            &["C090-C091,C098-C099"],
            "question",
            "reason",
        )
        .unwrap();
        let tumor = |site: &str, lat: Laterality| {
            TumorRecord::builder()
                .site(site)
                .histology("8070")
                .behavior("3")
                .laterality(lat)
                .diagnosis_date(PartialDate::new(Some(2015), Some(1), Some(1)))
                .build()
        };
        let options = mph_types::ComputeOptions::default();

        let right = tumor("C090", Laterality::Right);
        let left = tumor("C098", Laterality::Left);
        assert_eq!(
            rule.evaluate(&right, &left, &options),
            RuleOutcome::Matched(RuleVerdict::MultiplePrimaries)
        );

        let same = tumor("C091", Laterality::Right);
        assert_eq!(rule.evaluate(&right, &same, &options), RuleOutcome::NotMatched);

        let vague = tumor("C090", Laterality::Unknown);
        assert!(matches!(
            rule.evaluate(&right, &vague, &options),
            RuleOutcome::Indeterminate(_)
        ));

        // Outside the paired regions the rule stays silent
        let elsewhere = tumor("C020", Laterality::Unknown);
        assert_eq!(
            rule.evaluate(&elsewhere, &elsewhere, &options),
            RuleOutcome::NotMatched
        );
    }
}
