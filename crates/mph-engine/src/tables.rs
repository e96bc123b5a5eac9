//! Bundled hematopoietic lookup tables.
//!
//! The pre-2010 hematopoietic rule revisions are table-driven rather than
//! rule-chain-driven: the 1998 revision pairs histology ranges directly, and
//! the 2001 revision first maps histologies to disease groups and then pairs
//! the groups. The tables ship inside the crate and are parsed once when the
//! catalogue is built.

use crate::error::CatalogError;

const PAIRS_1998: &str = include_str!("../data/hematopoietic_1998_pairs.csv");
const GROUPS_2001: &str = include_str!("../data/hematopoietic_2001_groups.csv");
const GROUP_PAIRS_2001: &str = include_str!("../data/hematopoietic_2001_group_pairs.csv");

#[derive(Debug, Clone, PartialEq, Eq)]
struct PairRow {
    first_low: u16,
    first_high: u16,
    second_low: u16,
    second_high: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GroupRow {
    group: String,
    low: u16,
    high: u16,
}

/// Parsed hematopoietic tables.
#[derive(Debug)]
pub struct HematoTables {
    pairs_1998: Vec<PairRow>,
    groups_2001: Vec<GroupRow>,
    group_pairs_2001: Vec<(String, String)>,
}

impl HematoTables {
    /// Parses the bundled tables.
    pub fn load() -> Result<HematoTables, CatalogError> {
        Ok(HematoTables {
            pairs_1998: parse_pairs("hematopoietic_1998_pairs.csv", PAIRS_1998)?,
            groups_2001: parse_groups("hematopoietic_2001_groups.csv", GROUPS_2001)?,
            group_pairs_2001: parse_group_pairs(
                "hematopoietic_2001_group_pairs.csv",
                GROUP_PAIRS_2001,
            )?,
        })
    }

    /// 1998 revision: whether a histology pair, ordered by diagnosis date,
    /// abstracts to a single primary.
    pub fn single_primary_1998(&self, first: u16, second: u16) -> bool {
        self.pairs_1998.iter().any(|row| {
            first >= row.first_low
                && first <= row.first_high
                && second >= row.second_low
                && second <= row.second_high
        })
    }

    /// 2001 revision: the disease group a histology belongs to.
    pub fn group_2001(&self, histology: u16) -> Option<&str> {
        self.groups_2001
            .iter()
            .find(|row| histology >= row.low && histology <= row.high)
            .map(|row| row.group.as_str())
    }

    /// 2001 revision: whether an ordered group pair abstracts to a single
    /// primary.
    pub fn single_primary_2001(&self, first: &str, second: &str) -> bool {
        self.group_pairs_2001
            .iter()
            .any(|(a, b)| a == first && b == second)
    }
}

fn reader(data: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data.as_bytes())
}

fn parse_code(table: &str, record: &csv::StringRecord, index: usize) -> Result<u16, CatalogError> {
    let raw = record.get(index).unwrap_or("");
    raw.trim()
        .parse()
        .map_err(|_| CatalogError::InvalidTableValue {
            table: table.to_string(),
            value: raw.to_string(),
        })
}

fn table_error(table: &str, source: csv::Error) -> CatalogError {
    CatalogError::InvalidTable {
        table: table.to_string(),
        source,
    }
}

fn parse_pairs(table: &str, data: &str) -> Result<Vec<PairRow>, CatalogError> {
    let mut rows = Vec::new();
    for result in reader(data).records() {
        let record = result.map_err(|e| table_error(table, e))?;
        rows.push(PairRow {
            first_low: parse_code(table, &record, 0)?,
            first_high: parse_code(table, &record, 1)?,
            second_low: parse_code(table, &record, 2)?,
            second_high: parse_code(table, &record, 3)?,
        });
    }
    Ok(rows)
}

fn parse_groups(table: &str, data: &str) -> Result<Vec<GroupRow>, CatalogError> {
    let mut rows = Vec::new();
    for result in reader(data).records() {
        let record = result.map_err(|e| table_error(table, e))?;
        rows.push(GroupRow {
            group: record.get(0).unwrap_or("").trim().to_string(),
            low: parse_code(table, &record, 1)?,
            high: parse_code(table, &record, 2)?,
        });
    }
    Ok(rows)
}

fn parse_group_pairs(table: &str, data: &str) -> Result<Vec<(String, String)>, CatalogError> {
    let mut rows = Vec::new();
    for result in reader(data).records() {
        let record = result.map_err(|e| table_error(table, e))?;
        rows.push((
            record.get(0).unwrap_or("").trim().to_string(),
            record.get(1).unwrap_or("").trim().to_string(),
        ));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_load() {
        let tables = HematoTables::load().unwrap();
        assert!(!tables.pairs_1998.is_empty());
        assert!(!tables.groups_2001.is_empty());
        assert!(!tables.group_pairs_2001.is_empty());
    }

    #[test]
    fn test_1998_pair_lookup() {
        let tables = HematoTables::load().unwrap();
        // Same disease range in either position
        assert!(tables.single_primary_1998(9650, 9663));
        // CML followed by blast-phase transformation
        assert!(tables.single_primary_1998(9863, 9861));
        // The reverse order is a separate row, deliberately absent
        assert!(!tables.single_primary_1998(9861, 9863));
    }

    #[test]
    fn test_2001_group_lookup() {
        let tables = HematoTables::load().unwrap();
        assert_eq!(tables.group_2001(9653), Some("hodgkin-lymphoma"));
        assert_eq!(tables.group_2001(9680), Some("b-cell-lymphoma"));
        assert_eq!(tables.group_2001(8140), None);
    }

    #[test]
    fn test_2001_pair_lookup() {
        let tables = HematoTables::load().unwrap();
        assert!(tables.single_primary_2001("b-cell-lymphoma", "lymphoma-nos"));
        assert!(!tables.single_primary_2001("hodgkin-lymphoma", "t-cell-lymphoma"));
    }
}
