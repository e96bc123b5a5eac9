//! Multiple-primary determination CLI.

use mph_engine::Catalog;
use mph_types::{ComputeOptions, HistologyMatching, Laterality, PartialDate, TumorRecord};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "\
Usage: mph SITE HIST BEHAVIOR DATE [LATERALITY] SITE HIST BEHAVIOR DATE [LATERALITY]

Decides whether two reported tumors are one primary cancer or two.

Arguments (each tumor, in order):
  SITE        ICD-O-3 topography code, e.g. C509
  HIST        four-digit ICD-O-3 morphology code, e.g. 8500
  BEHAVIOR    single-digit ICD-O-3 behavior code (0, 1, 2, 3 or 6)
  DATE        diagnosis date as YYYY, YYYY-MM or YYYY-MM-DD, or - if unknown
  LATERALITY  single-digit registry laterality code (optional)

Give the laterality for both tumors or for neither (8 or 10 arguments).

Environment:
  MPH_HISTOLOGY_MATCHING  set to 'lenient' to treat 8000 as compatible with
                          every other 8xxx histology
  RUST_LOG                tracing filter, e.g. 'mph_engine=debug'";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (first, second) = match args.len() {
        8 => (parse_tumor(&args[0..4])?, parse_tumor(&args[4..8])?),
        10 => (parse_tumor(&args[0..5])?, parse_tumor(&args[5..10])?),
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    let options = ComputeOptions {
        histology_matching: match std::env::var("MPH_HISTOLOGY_MATCHING") {
            Ok(value) if value.eq_ignore_ascii_case("lenient") => HistologyMatching::Lenient,
            _ => HistologyMatching::Strict,
        },
    };

    let catalog = Catalog::new()?;
    let output = catalog.determine_with_options(&first, &second, &options);

    match &output.group_id {
        Some(group) => tracing::info!("{:?} per the {} rules", output.result, group),
        None => tracing::info!("{:?} without a rule group", output.result),
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Parses one tumor from 4 or 5 positional arguments.
fn parse_tumor(fields: &[String]) -> Result<TumorRecord, String> {
    let mut builder = TumorRecord::builder()
        .site(&fields[0])
        .histology(&fields[1])
        .behavior(&fields[2])
        .diagnosis_date(parse_date(&fields[3])?);
    if let Some(raw) = fields.get(4) {
        if raw != "-" {
            let mut chars = raw.trim().chars();
            let laterality = match (chars.next().and_then(Laterality::from_code), chars.next()) {
                (Some(code), None) => code,
                _ => return Err(format!("invalid laterality code '{raw}'")),
            };
            builder = builder.laterality(laterality);
        }
    }
    Ok(builder.build())
}

/// Parses `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, or `-` for unknown.
fn parse_date(raw: &str) -> Result<PartialDate, String> {
    if raw == "-" {
        return Ok(PartialDate::UNKNOWN);
    }
    let bad = || format!("invalid date '{raw}', expected YYYY[-MM[-DD]] or -");
    let mut parts = raw.splitn(3, '-');
    let year: u16 = parts
        .next()
        .filter(|y| y.len() == 4)
        .and_then(|y| y.parse().ok())
        .ok_or_else(bad)?;
    let month: Option<u8> = match parts.next() {
        Some(m) => Some(
            m.parse()
                .ok()
                .filter(|m| (1..=12).contains(m))
                .ok_or_else(bad)?,
        ),
        None => None,
    };
    let day: Option<u8> = match parts.next() {
        Some(d) => Some(
            d.parse()
                .ok()
                .filter(|d| (1..=31).contains(d))
                .ok_or_else(bad)?,
        ),
        None => None,
    };
    Ok(PartialDate::new(Some(year), month, day))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_parse_date_forms() {
        assert_eq!(parse_date("-").unwrap(), PartialDate::UNKNOWN);
        assert_eq!(
            parse_date("2016").unwrap(),
            PartialDate::new(Some(2016), None, None)
        );
        assert_eq!(
            parse_date("2016-04").unwrap(),
            PartialDate::new(Some(2016), Some(4), None)
        );
        assert_eq!(
            parse_date("2016-04-02").unwrap(),
            PartialDate::new(Some(2016), Some(4), Some(2))
        );
        assert!(parse_date("16").is_err());
        assert!(parse_date("2016-13").is_err());
        assert!(parse_date("2016-04-32").is_err());
        assert!(parse_date("soon").is_err());
    }

    #[test]
    fn test_parse_tumor_with_laterality() {
        let tumor = parse_tumor(&strings(&["C509", "8500", "3", "2016-04", "1"])).unwrap();
        assert_eq!(tumor.laterality, Some(Laterality::Right));
        assert_eq!(tumor.diagnosis_date, PartialDate::new(Some(2016), Some(4), None));

        let tumor = parse_tumor(&strings(&["C509", "8500", "3", "-", "-"])).unwrap();
        assert_eq!(tumor.laterality, None);
        assert_eq!(tumor.diagnosis_date, PartialDate::UNKNOWN);

        assert!(parse_tumor(&strings(&["C509", "8500", "3", "2016", "7"])).is_err());
    }
}
