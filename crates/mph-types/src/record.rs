//! Reported tumor records.

use crate::{Behavior, Laterality, PartialDate};

/// One reported tumor, as supplied by the caller.
///
/// Fields are kept as the raw registry codes; nothing is rejected at
/// construction time. Validation is a determination concern: a record with
/// an invalid code still produces an output, with a verdict explaining why
/// no rule could be applied.
///
/// # Examples
///
/// ```
/// use mph_types::{PartialDate, TumorRecord};
///
/// let tumor = TumorRecord::builder()
///     .site("C509")
///     .histology("8500")
///     .behavior("3")
///     .diagnosis_date(PartialDate::new(Some(2016), Some(4), None))
///     .build();
///
/// assert_eq!(tumor.histology_number(), Some(8500));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TumorRecord {
    /// ICD-O-3 topography code, letter `C` plus three digits (e.g. `C509`).
    pub site: String,
    /// Four-digit ICD-O-3 morphology code (e.g. `8500`).
    pub histology: String,
    /// Single-digit ICD-O-3 behavior code.
    pub behavior: String,
    /// Registry laterality code, if reported.
    pub laterality: Option<Laterality>,
    /// Diagnosis date, any component of which may be unknown.
    pub diagnosis_date: PartialDate,
}

impl TumorRecord {
    /// Starts building a record.
    pub fn builder() -> TumorRecordBuilder {
        TumorRecordBuilder::default()
    }

    /// The numeric part of the topography code, when well formed.
    pub fn site_number(&self) -> Option<u16> {
        let code = self.site.trim();
        let rest = code.strip_prefix('C').or_else(|| code.strip_prefix('c'))?;
        if rest.len() != 3 {
            return None;
        }
        rest.parse().ok()
    }

    /// The morphology code as a number, when well formed.
    pub fn histology_number(&self) -> Option<u16> {
        let code = self.histology.trim();
        if code.len() != 4 {
            return None;
        }
        code.parse().ok()
    }

    /// The behavior code as an enum, when well formed.
    pub fn behavior_code(&self) -> Option<Behavior> {
        let mut chars = self.behavior.trim().chars();
        let first = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Behavior::from_code(first)
    }

    /// The combined morphology code, `histology/behavior`.
    pub fn icd_code(&self) -> String {
        format!("{}/{}", self.histology.trim(), self.behavior.trim())
    }
}

/// Builder for [`TumorRecord`].
#[derive(Debug, Clone, Default)]
pub struct TumorRecordBuilder {
    site: String,
    histology: String,
    behavior: String,
    laterality: Option<Laterality>,
    diagnosis_date: PartialDate,
}

impl TumorRecordBuilder {
    /// Sets the topography code.
    pub fn site(mut self, site: &str) -> Self {
        self.site = site.trim().to_uppercase();
        self
    }

    /// Sets the morphology code.
    pub fn histology(mut self, histology: &str) -> Self {
        self.histology = histology.trim().to_string();
        self
    }

    /// Sets the behavior code.
    pub fn behavior(mut self, behavior: &str) -> Self {
        self.behavior = behavior.trim().to_string();
        self
    }

    /// Sets the laterality.
    pub fn laterality(mut self, laterality: Laterality) -> Self {
        self.laterality = Some(laterality);
        self
    }

    /// Sets the diagnosis date.
    pub fn diagnosis_date(mut self, date: PartialDate) -> Self {
        self.diagnosis_date = date;
        self
    }

    /// Sets the diagnosis date from raw year/month/day field strings.
    pub fn diagnosis_fields(mut self, year: &str, month: &str, day: &str) -> Self {
        self.diagnosis_date = PartialDate::from_fields(year, month, day);
        self
    }

    /// Finishes the record.
    pub fn build(self) -> TumorRecord {
        TumorRecord {
            site: self.site,
            histology: self.histology,
            behavior: self.behavior,
            laterality: self.laterality,
            diagnosis_date: self.diagnosis_date,
        }
    }
}
