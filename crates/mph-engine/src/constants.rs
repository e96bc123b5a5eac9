//! Histology and topography reference sets shared by the rule groups.
//!
//! The range specifications live here as plain strings; [`charts`] parses
//! them exactly once behind a process-wide initialization guard and hands
//! out `'static` references the rule closures can capture.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::CatalogError;
use crate::ranges::{CodeKind, RangeSet};

/// Adenomatous polyp morphologies.
pub const POLYP: &str = "8210-8211,8213,8220-8221,8261-8263";
/// Familial adenomatous polyposis.
pub const FAMILIAL_POLYPOSIS: &str = "8220-8221";
/// Specific adenocarcinoma morphologies.
pub const ADENOCARCINOMA_SPECIFIC: &str =
    "8140-8148,8154,8160-8162,8190,8200-8201,8210-8211,8214-8215,8220-8221,\
     8230-8231,8244-8245,8250-8255,8260-8263,8290,8310,8312-8320,8322-8323,\
     8330-8333,8335,8337,8350,8370,8380-8384,8390,8400-8403,8407-8409,8410,\
     8413,8420,8440-8442,8450-8453,8460-8462,8470-8473,8480-8482,8490,8500-8504,\
     8507-8508,8510,8512-8514,8520-8525,8530,8540-8543,8550-8551,8561-8562,8570-8576";
/// Adenocarcinoma NOS.
pub const ADENOCARCINOMA_NOS: &str = "8140";
/// Small cell carcinoma morphologies.
pub const SMALL_CELL: &str = "8041-8045";
/// Non-small cell carcinoma, NOS.
pub const NON_SMALL_CELL: u16 = 8046;
/// Specific non-small cell carcinoma morphologies.
pub const SPECIFIC_NON_SMALL_CELL: &str =
    "8012-8014,8022,8031-8033,8052,8070-8073,8082-8084,8123,8140,8200,8230,\
     8250-8255,8260,8310,8333,8430,8470,8480-8481,8490,8550,8560,8570-8576,8972,8980";
/// Bronchioloalveolar carcinoma morphologies.
pub const BRONCHIOLOALVEOLAR: &str = "8250-8254";
/// Specific renal cell carcinoma morphologies.
pub const SPECIFIC_RENAL_CELL: &str = "8260,8310,8316-8320,8510,8959";
/// Follicular thyroid carcinoma morphologies.
pub const FOLLICULAR: &str = "8290,8330-8332,8335,8340,8346";
/// Papillary thyroid carcinoma morphologies.
pub const PAPILLARY: &str = "8050,8052,8260,8340-8343,8344,8347";
/// Transitional cell carcinoma morphologies.
pub const TRANSITIONAL: &str = "8120-8124";
/// Papillary transitional cell carcinoma morphologies.
pub const PAPILLARY_TRANSITIONAL: &str = "8130-8131";
/// Urothelial tumor morphologies.
pub const UROTHELIAL: &str = "8020,8031,8082,8120,8122,8130-8131";
/// Paget disease morphologies.
pub const PAGET: &str = "8540-8543";
/// Intraductal carcinoma morphologies.
pub const INTRADUCTAL: &str = "8201,8230,8401,8500-8501,8503-8504,8507";
/// Duct carcinoma morphologies.
pub const DUCT: &str = "8022,8035,8500-8503,8508";
/// Lobular carcinoma morphologies.
pub const LOBULAR: &str = "8520,8522,8524";
/// Retinoblastoma morphologies.
pub const RETINOBLASTOMA: &str = "9510-9513";
/// Glial tumor morphologies.
pub const GLIAL_TUMOR: &str =
    "9380-9382,9400-9401,9410-9411,9420-9421,9423-9424,9430,9440-9442";
/// Hematopoietic and Kaposi morphologies excluded from most solid-tumor
/// groups.
pub const HEMATO_AND_KAPOSI: &str = "9590-9989,9140";
/// Hematopoietic morphologies alone.
pub const HEMATO: &str = "9590-9989";
/// Wilms tumor.
pub const WILMS: u16 = 8960;
/// Kaposi sarcoma.
pub const KAPOSI: u16 = 9140;
/// Glioblastoma multiforme.
pub const GLIOBLASTOMA: u16 = 9440;

/// Paired-site specifications for the head and neck group.
pub const HEAD_AND_NECK_PAIRED_SITES: &[&str] = &[
    "C079",
    "C080-C081",
    "C090-C091,C098-C099",
    "C300",
    "C310,C312",
    "C301",
];

/// Paired-site specifications for the brain groups.
pub const BRAIN_PAIRED_SITES: &[&str] = &["C700", "C710-C714", "C722-C725"];

/// Paired-site specifications for the residual catch-all group.
pub const OTHER_PAIRED_SITES: &[&str] = &[
    "C384",
    "C400-C403,C408-C413,C418",
    "C441-C443,C445-C447",
    "C471-C472",
    "C491-C492",
    "C569",
    "C570",
    "C620-C629",
    "C630-C631",
    "C690-C699",
    "C740-C749",
    "C754",
];

/// Fourth-character topography prefixes where a fourth-character difference
/// alone makes multiple primaries.
pub const FOURTH_CHARACTER_SITES: &[&str] = &["C21", "C40", "C41", "C44", "C47", "C49"];

/// Parsed reference sets, built once per process.
#[derive(Debug)]
pub struct Charts {
    /// Adenomatous polyps.
    pub polyp: RangeSet,
    /// Familial adenomatous polyposis.
    pub familial_polyposis: RangeSet,
    /// Specific adenocarcinomas.
    pub adenocarcinoma_specific: RangeSet,
    /// Adenocarcinoma NOS.
    pub adenocarcinoma_nos: RangeSet,
    /// Small cell carcinomas.
    pub small_cell: RangeSet,
    /// Specific non-small cell carcinomas.
    pub specific_non_small_cell: RangeSet,
    /// Bronchioloalveolar carcinomas.
    pub bronchioloalveolar: RangeSet,
    /// Specific renal cell carcinomas.
    pub specific_renal_cell: RangeSet,
    /// Follicular thyroid carcinomas.
    pub follicular: RangeSet,
    /// Papillary thyroid carcinomas.
    pub papillary: RangeSet,
    /// Transitional cell carcinomas.
    pub transitional: RangeSet,
    /// Papillary transitional cell carcinomas.
    pub papillary_transitional: RangeSet,
    /// Urothelial tumors.
    pub urothelial: RangeSet,
    /// Paget disease.
    pub paget: RangeSet,
    /// Intraductal carcinomas.
    pub intraductal: RangeSet,
    /// Duct carcinomas.
    pub duct: RangeSet,
    /// Lobular carcinomas.
    pub lobular: RangeSet,
    /// Retinoblastomas.
    pub retinoblastoma: RangeSet,
    /// Glial tumors.
    pub glial_tumor: RangeSet,
    /// NOS histology paired with the specific codes it covers.
    pub nos_chart: Vec<(u16, RangeSet)>,
    /// Benign brain histology branches, keyed by `hist/behavior` or plain
    /// histology.
    pub benign_brain_chart: HashMap<&'static str, &'static str>,
    /// Malignant brain Chart 1 branches, keyed by histology.
    pub malignant_brain_chart1: HashMap<u16, &'static str>,
    /// Malignant brain Chart 2 branches, keyed by histology.
    pub malignant_brain_chart2: HashMap<u16, &'static str>,
}

impl Charts {
    fn build() -> Result<Charts, CatalogError> {
        let numeric = |spec: &str| RangeSet::parse(spec, CodeKind::Numeric);
        Ok(Charts {
            polyp: numeric(POLYP)?,
            familial_polyposis: numeric(FAMILIAL_POLYPOSIS)?,
            adenocarcinoma_specific: numeric(ADENOCARCINOMA_SPECIFIC)?,
            adenocarcinoma_nos: numeric(ADENOCARCINOMA_NOS)?,
            small_cell: numeric(SMALL_CELL)?,
            specific_non_small_cell: numeric(SPECIFIC_NON_SMALL_CELL)?,
            bronchioloalveolar: numeric(BRONCHIOLOALVEOLAR)?,
            specific_renal_cell: numeric(SPECIFIC_RENAL_CELL)?,
            follicular: numeric(FOLLICULAR)?,
            papillary: numeric(PAPILLARY)?,
            transitional: numeric(TRANSITIONAL)?,
            papillary_transitional: numeric(PAPILLARY_TRANSITIONAL)?,
            urothelial: numeric(UROTHELIAL)?,
            paget: numeric(PAGET)?,
            intraductal: numeric(INTRADUCTAL)?,
            duct: numeric(DUCT)?,
            lobular: numeric(LOBULAR)?,
            retinoblastoma: numeric(RETINOBLASTOMA)?,
            glial_tumor: numeric(GLIAL_TUMOR)?,
            nos_chart: build_nos_chart()?,
            benign_brain_chart: build_benign_brain_chart(),
            malignant_brain_chart1: build_malignant_brain_chart1(),
            malignant_brain_chart2: build_malignant_brain_chart2(),
        })
    }
}

static CHARTS: OnceLock<Charts> = OnceLock::new();

/// Returns the parsed reference sets, building them on first use.
pub fn charts() -> Result<&'static Charts, CatalogError> {
    if let Some(existing) = CHARTS.get() {
        return Ok(existing);
    }
    let built = Charts::build()?;
    Ok(CHARTS.get_or_init(|| built))
}

fn build_nos_chart() -> Result<Vec<(u16, RangeSet)>, CatalogError> {
    let entries: &[(u16, &str)] = &[
        (8000, "8001-9999"),
        (8010, "8011-8015"),
        (8140, "8141-8145,8147-8148"),
        (8070, "8071-8078,8080-8084,8094,8323"),
        (8720, "8721-8723,8726,8728,8730,8740-8746,8761,8770-8774,8780"),
        (8800, "8801-8806"),
        (8312, "8313-8320"),
    ];
    entries
        .iter()
        .map(|&(nos, spec)| Ok((nos, RangeSet::parse(spec, CodeKind::Numeric)?)))
        .collect()
}

fn build_benign_brain_chart() -> HashMap<&'static str, &'static str> {
    // Keys are either "hist/behavior" or plain histology; lookup tries the
    // combined key first.
    HashMap::from([
        ("9383/1", "Ependymomas"),
        ("9394/1", "Ependymomas"),
        ("9444/1", "Ependymomas"),
        ("9384/1", "Neuronal and neuronal-glial neoplasms"),
        ("9412/1", "Neuronal and neuronal-glial neoplasms"),
        ("9413/0", "Neuronal and neuronal-glial neoplasms"),
        ("9442/1", "Neuronal and neuronal-glial neoplasms"),
        ("9505/1", "Neuronal and neuronal-glial neoplasms"),
        ("9506/1", "Neuronal and neuronal-glial neoplasms"),
        ("9540/0", "Neurofibromas"),
        ("9540/1", "Neurofibromas"),
        ("9541", "Neurofibromas"),
        ("9550", "Neurofibromas"),
        ("9560/0", "Neurinomatosis"),
        ("9560/1", "Neurofibromatosis"),
        ("9562", "Neurothekeoma"),
        ("9570", "Neuroma"),
        ("9571/0", "Perineurioma, NOS"),
    ])
}

fn build_malignant_brain_chart1() -> HashMap<u16, &'static str> {
    let branches: &[(&str, &[u16])] = &[
        (
            "Embryonal tumors",
            &[9508, 9392, 9501, 9502, 9470, 9471, 9472, 9473, 9474, 9500, 9490],
        ),
        ("Ependymal tumors", &[9391, 9393]),
        (
            "Glial tumors",
            &[
                9380, 9381, 9382, 9400, 9401, 9410, 9411, 9420, 9421, 9423, 9424,
                9430, 9440, 9441, 9442,
            ],
        ),
        ("Oligodendroglial tumors", &[9450, 9451, 9460]),
        ("Neuronal and mixed neuronal-glial tumors", &[9505]),
        ("Neuroblastic tumors", &[9521, 9522, 9523]),
        ("Pineal tumors", &[9362]),
        ("Choroid plexus tumors", &[9390]),
    ];
    let mut chart = HashMap::new();
    for (branch, codes) in branches {
        for &code in *codes {
            chart.insert(code, *branch);
        }
    }
    chart
}

fn build_malignant_brain_chart2() -> HashMap<u16, &'static str> {
    let branches: &[(&str, &[u16])] = &[
        ("Peripheral nerve tumors", &[9540, 9560, 9561, 9571]),
        ("Germ cell tumors", &[9064, 9070, 9071, 9080, 9084, 9085, 9100]),
        ("Meningiomas", &[9538, 9539]),
    ];
    let mut chart = HashMap::new();
    for (branch, codes) in branches {
        for &code in *codes {
            chart.insert(code, *branch);
        }
    }
    chart
}

/// Neuroepithelial tumors (9503) belong to every Chart 1 branch.
pub const NEUROEPITHELIAL: u16 = 9503;

/// Chart 1 branch for a malignant brain histology, honoring the 9503
/// matches-everything case.
pub fn malignant_chart1_branch(charts: &Charts, histology: u16) -> Option<&'static str> {
    charts.malignant_brain_chart1.get(&histology).copied()
}

/// Benign brain branch lookup: combined `hist/behavior` key first, then the
/// plain histology key.
pub fn benign_brain_branch(
    charts: &Charts,
    histology: u16,
    behavior: char,
) -> Option<&'static str> {
    let combined = format!("{histology}/{behavior}");
    charts
        .benign_brain_chart
        .get(combined.as_str())
        .or_else(|| charts.benign_brain_chart.get(histology.to_string().as_str()))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charts_build() {
        let charts = charts().unwrap();
        assert!(charts.polyp.contains(8213));
        assert!(charts.familial_polyposis.contains(8220));
        assert!(!charts.polyp.contains(8000));
        assert!(charts.glial_tumor.contains(9440));
    }

    #[test]
    fn test_nos_chart_entries() {
        let charts = charts().unwrap();
        let renal = charts
            .nos_chart
            .iter()
            .find(|(nos, _)| *nos == 8312)
            .map(|(_, set)| set)
            .unwrap();
        assert!(renal.contains(8317));
        assert!(!renal.contains(8310));
    }

    #[test]
    fn test_benign_brain_lookup() {
        let charts = charts().unwrap();
        assert_eq!(
            benign_brain_branch(charts, 9540, '0'),
            Some("Neurofibromas")
        );
        assert_eq!(benign_brain_branch(charts, 9562, '0'), Some("Neurothekeoma"));
        assert_eq!(benign_brain_branch(charts, 9562, '1'), Some("Neurothekeoma"));
        assert_eq!(benign_brain_branch(charts, 9000, '0'), None);
    }

    #[test]
    fn test_malignant_brain_charts() {
        let charts = charts().unwrap();
        assert_eq!(
            malignant_chart1_branch(charts, 9440),
            Some("Glial tumors")
        );
        assert_eq!(
            malignant_chart1_branch(charts, 9392),
            Some("Embryonal tumors")
        );
        assert_eq!(charts.malignant_brain_chart2.get(&9538).copied(), Some("Meningiomas"));
        assert_eq!(malignant_chart1_branch(charts, 9538), None);
    }
}
