//! Rule groups and chain execution.
//!
//! A rule group scopes an ordered rule chain to an anatomic and temporal
//! slice of the input space: site, histology, and behavior decide whether a
//! tumor belongs to the group at all, and the diagnosis-year window decides
//! which revision of the rules governs it.

use mph_types::{ComputeOptions, MpResult, TumorRecord};

use crate::error::CatalogError;
use crate::ranges::{CodeKind, RangeSet};
use crate::rule::{Rule, RuleOutcome, RuleVerdict};

/// Scope specification for a rule group, in range notation.
///
/// An inclusion that is present is authoritative: the matching exclusion is
/// not consulted. An absent inclusion with a present exclusion admits
/// everything outside the exclusion. Both absent admits everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupScope<'a> {
    /// Topography inclusion.
    pub site_inclusion: Option<&'a str>,
    /// Topography exclusion.
    pub site_exclusion: Option<&'a str>,
    /// Morphology inclusion.
    pub histology_inclusion: Option<&'a str>,
    /// Morphology exclusion.
    pub histology_exclusion: Option<&'a str>,
    /// Behavior inclusion (inclusion-only).
    pub behavior_inclusion: &'a str,
    /// Diagnosis-year inclusion (inclusion-only).
    pub year_inclusion: &'a str,
}

/// Result of running a group's rule chain over a tumor pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainResult {
    /// The verdict.
    pub result: MpResult,
    /// Step labels of every rule evaluated, in order, terminator included.
    pub applied_rules: Vec<String>,
    /// Reason text of the deciding rule, or the indeterminate explanation.
    pub reason: String,
}

/// An ordered rule chain with the scope it governs.
pub struct RuleGroup {
    /// Stable group identifier, e.g. `colon-2007`.
    pub id: String,
    /// Display name, e.g. `Colon`.
    pub name: String,
    site_inclusion: Option<RangeSet>,
    site_exclusion: Option<RangeSet>,
    histology_inclusion: Option<RangeSet>,
    histology_exclusion: Option<RangeSet>,
    behavior_inclusion: RangeSet,
    year_inclusion: RangeSet,
    rules: Vec<Rule>,
}

impl RuleGroup {
    /// Creates a group from its scope specification and rule chain.
    pub fn new(
        id: &str,
        name: &str,
        scope: GroupScope<'_>,
        rules: Vec<Rule>,
    ) -> Result<RuleGroup, CatalogError> {
        let topo = |spec: Option<&str>| {
            spec.map(|s| RangeSet::parse(s, CodeKind::Topography))
                .transpose()
        };
        let num = |spec: Option<&str>| {
            spec.map(|s| RangeSet::parse(s, CodeKind::Numeric))
                .transpose()
        };
        Ok(RuleGroup {
            id: id.to_string(),
            name: name.to_string(),
            site_inclusion: topo(scope.site_inclusion)?,
            site_exclusion: topo(scope.site_exclusion)?,
            histology_inclusion: num(scope.histology_inclusion)?,
            histology_exclusion: num(scope.histology_exclusion)?,
            behavior_inclusion: RangeSet::parse(scope.behavior_inclusion, CodeKind::Numeric)?,
            year_inclusion: RangeSet::parse(scope.year_inclusion, CodeKind::Numeric)?,
            rules,
        })
    }

    /// Whether a tumor's site, histology, and behavior fall in this group's
    /// scope. The diagnosis year is checked separately.
    pub fn matches_profile(&self, tumor: &TumorRecord) -> bool {
        let (site, histology, behavior) = match (
            tumor.site_number(),
            tumor.histology_number(),
            tumor.behavior_code(),
        ) {
            (Some(s), Some(h), Some(b)) => (s, h, b),
            _ => return false,
        };
        passes(&self.site_inclusion, &self.site_exclusion, site)
            && passes(&self.histology_inclusion, &self.histology_exclusion, histology)
            && self.behavior_inclusion.contains(u16::from(behavior.digit()))
    }

    /// Whether a diagnosis year falls in this group's window.
    pub fn matches_year(&self, year: u16) -> bool {
        self.year_inclusion.contains(year)
    }

    /// First year this group's rules apply.
    pub fn earliest_year(&self) -> u16 {
        self.year_inclusion.min_value()
    }

    /// Number of rules in the chain.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Runs the chain over a tumor pair.
    ///
    /// Every group chain ends with an unconditional rule, so the walk always
    /// terminates with a decision or an indeterminate stop.
    pub fn execute(
        &self,
        first: &TumorRecord,
        second: &TumorRecord,
        options: &ComputeOptions,
    ) -> ChainResult {
        let mut applied = Vec::new();
        for rule in &self.rules {
            applied.push(rule.step.clone());
            match rule.evaluate(first, second, options) {
                RuleOutcome::NotMatched => continue,
                RuleOutcome::Matched(verdict) => {
                    let result = match verdict {
                        RuleVerdict::SinglePrimary => MpResult::SinglePrimary,
                        RuleVerdict::MultiplePrimaries => MpResult::MultiplePrimaries,
                    };
                    return ChainResult {
                        result,
                        applied_rules: applied,
                        reason: rule.reason.clone(),
                    };
                }
                RuleOutcome::Indeterminate(detail) => {
                    return ChainResult {
                        result: MpResult::Questionable,
                        applied_rules: applied,
                        reason: format!(
                            "Unable to apply rule {} of the {} rules. {}",
                            rule.step, self.name, detail
                        ),
                    };
                }
            }
        }
        // Unreachable with a well-formed chain; report for manual review
        // rather than panicking.
        ChainResult {
            result: MpResult::Questionable,
            applied_rules: applied,
            reason: format!("No rule of the {} rules reached a decision.", self.name),
        }
    }
}

impl std::fmt::Debug for RuleGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleGroup")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("rules", &self.rules.len())
            .finish()
    }
}

fn passes(inclusion: &Option<RangeSet>, exclusion: &Option<RangeSet>, value: u16) -> bool {
    match (inclusion, exclusion) {
        (Some(inc), _) => inc.contains(value),
        (None, Some(exc)) => !exc.contains(value),
        (None, None) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{no_criteria_rule, years_apart_rule};
    use mph_types::PartialDate;

    fn group() -> RuleGroup {
        RuleGroup::new(
            "colon-2007",
            "Colon",
            GroupScope {
                site_inclusion: Some("C180-C189"),
                histology_exclusion: Some("9590-9989,9140"),
                behavior_inclusion: "2-3,6",
                year_inclusion: "2007-9999",
                ..Default::default()
            },
            vec![years_apart_rule("M5", 1), no_criteria_rule("M11")],
        )
        .unwrap()
    }

    fn tumor(site: &str, hist: &str, year: u16) -> TumorRecord {
        TumorRecord::builder()
            .site(site)
            .histology(hist)
            .behavior("3")
            .diagnosis_date(PartialDate::new(Some(year), None, None))
            .build()
    }

    #[test]
    fn test_profile_matching() {
        let g = group();
        assert!(g.matches_profile(&tumor("C182", "8140", 2015)));
        // Outside the site inclusion
        assert!(!g.matches_profile(&tumor("C340", "8140", 2015)));
        // Excluded histology
        assert!(!g.matches_profile(&tumor("C182", "9650", 2015)));
        assert!(!g.matches_profile(&tumor("C182", "9140", 2015)));
    }

    #[test]
    fn test_inclusion_beats_exclusion() {
        let g = RuleGroup::new(
            "test",
            "Test",
            GroupScope {
                histology_inclusion: Some("9590-9989"),
                histology_exclusion: Some("9590-9989"),
                behavior_inclusion: "2-3,6",
                year_inclusion: "0000-9999",
                ..Default::default()
            },
            vec![no_criteria_rule("M1")],
        )
        .unwrap();
        // Inclusion is authoritative, so the identical exclusion is ignored
        assert!(g.matches_profile(&tumor("C182", "9650", 2015)));
        assert!(!g.matches_profile(&tumor("C182", "8140", 2015)));
    }

    #[test]
    fn test_year_window() {
        let g = group();
        assert!(g.matches_year(2007));
        assert!(!g.matches_year(2006));
        assert_eq!(g.earliest_year(), 2007);
    }

    #[test]
    fn test_chain_stops_at_first_match() {
        let g = group();
        let options = ComputeOptions::default();
        let a = tumor("C182", "8140", 2010);
        let b = tumor("C182", "8140", 2014);
        let result = g.execute(&a, &b, &options);
        assert_eq!(result.result, MpResult::MultiplePrimaries);
        assert_eq!(result.applied_rules, vec!["M5"]);

        let result = g.execute(&a, &a, &options);
        assert_eq!(result.result, MpResult::SinglePrimary);
        assert_eq!(result.applied_rules, vec!["M5", "M11"]);
    }

    #[test]
    fn test_indeterminate_stops_with_step_label() {
        let g = group();
        let options = ComputeOptions::default();
        let dated = tumor("C182", "8140", 2010);
        let undated = TumorRecord::builder()
            .site("C182")
            .histology("8140")
            .behavior("3")
            .build();
        let result = g.execute(&dated, &undated, &options);
        assert_eq!(result.result, MpResult::Questionable);
        assert!(result.reason.contains("M5"));
        assert!(result.reason.contains("Colon"));
        assert_eq!(result.applied_rules, vec!["M5"]);
    }
}
