//! The determination entry point.

use mph_types::{ComputeOptions, DeterminationOutput, MpResult, TumorRecord};

use crate::catalog;
use crate::error::CatalogError;
use crate::group::RuleGroup;

/// The assembled rule-group catalogue.
///
/// Construction parses every range specification and bundled lookup table;
/// a malformed specification fails here rather than during a determination.
/// The catalogue is immutable afterwards and can be shared freely across
/// threads.
///
/// # Examples
///
/// ```
/// use mph_engine::Catalog;
/// use mph_types::{MpResult, PartialDate, TumorRecord};
///
/// let catalog = Catalog::new().unwrap();
/// let tumor = TumorRecord::builder()
///     .site("C619")
///     .histology("8140")
///     .behavior("3")
///     .diagnosis_date(PartialDate::new(Some(2015), Some(3), Some(1)))
///     .build();
/// let output = catalog.determine(&tumor, &tumor);
/// assert_eq!(output.result, MpResult::SinglePrimary);
/// ```
#[derive(Debug)]
pub struct Catalog {
    groups: Vec<RuleGroup>,
}

/// How group resolution ended for one tumor.
enum Resolution {
    /// Index of the governing group.
    Group(usize),
    /// The profile matched one or more groups but the diagnosis year is
    /// unknown.
    YearUnknown,
    /// The profile matched one or more groups but the diagnosis year
    /// precedes every matching window; the year names the earliest start.
    TooEarly(u16),
    /// No applicable group.
    None,
}

impl Catalog {
    /// Builds the catalogue.
    pub fn new() -> Result<Catalog, CatalogError> {
        Ok(Catalog {
            groups: catalog::build_all()?,
        })
    }

    /// Determines whether two reported tumors are one primary or two, with
    /// default options.
    pub fn determine(
        &self,
        first: &TumorRecord,
        second: &TumorRecord,
    ) -> DeterminationOutput {
        self.determine_with_options(first, second, &ComputeOptions::default())
    }

    /// Determines whether two reported tumors are one primary or two.
    ///
    /// This never fails: invalid codes, unknown years, and unresolvable
    /// questions all surface as verdicts in the output.
    pub fn determine_with_options(
        &self,
        first: &TumorRecord,
        second: &TumorRecord,
        options: &ComputeOptions,
    ) -> DeterminationOutput {
        if !is_valid(first) || !is_valid(second) {
            return DeterminationOutput::without_rules(
                MpResult::Questionable,
                "Valid and known primary site, histology and behavior are \
                 required for both tumors.",
            );
        }

        let resolutions = (self.resolve(first), self.resolve(second));
        let (g1, g2) = match resolutions {
            (Resolution::TooEarly(year), _) | (_, Resolution::TooEarly(year)) => {
                return DeterminationOutput::without_rules(
                    MpResult::NotApplicable,
                    format!(
                        "The multiple primary rules do not apply to tumors \
                         diagnosed before {year}."
                    ),
                );
            }
            (Resolution::YearUnknown, _) | (_, Resolution::YearUnknown) => {
                return DeterminationOutput::without_rules(
                    MpResult::NotApplicable,
                    "A valid and known diagnosis year is required to select \
                     the applicable rules.",
                );
            }
            (Resolution::None, _) | (_, Resolution::None) => {
                return DeterminationOutput::without_rules(
                    MpResult::Questionable,
                    "The tumors do not belong to any applicable rule groups.",
                );
            }
            (Resolution::Group(a), Resolution::Group(b)) => (a, b),
        };

        if g1 != g2 {
            return DeterminationOutput::without_rules(
                MpResult::MultiplePrimaries,
                format!(
                    "The tumors belong to different rule groups: {} and {}.",
                    self.groups[g1].id, self.groups[g2].id
                ),
            );
        }

        let group = &self.groups[g1];
        let chain = group.execute(first, second, options);
        DeterminationOutput {
            result: chain.result,
            group_id: Some(group.id.clone()),
            applied_rules: chain.applied_rules,
            reason: chain.reason,
        }
    }

    fn resolve(&self, tumor: &TumorRecord) -> Resolution {
        let mut earliest_start: Option<u16> = None;
        for (index, group) in self.groups.iter().enumerate() {
            if !group.matches_profile(tumor) {
                continue;
            }
            match tumor.diagnosis_date.year {
                Some(year) if group.matches_year(year) => return Resolution::Group(index),
                Some(_) => {
                    let start = group.earliest_year();
                    earliest_start =
                        Some(earliest_start.map_or(start, |current| current.min(start)));
                }
                None => return Resolution::YearUnknown,
            }
        }
        match (earliest_start, tumor.diagnosis_date.year) {
            (Some(start), Some(year)) if year < start => Resolution::TooEarly(start),
            _ => Resolution::None,
        }
    }
}

fn is_valid(tumor: &TumorRecord) -> bool {
    let site_ok = match tumor.site_number() {
        // C809 is the unknown-primary sentinel; the rules need a real site.
        Some(site) => site < 809,
        None => false,
    };
    let histology_ok = matches!(tumor.histology_number(), Some(h) if (8000..=9999).contains(&h));
    site_ok && histology_ok && tumor.behavior_code().is_some()
}
