//! Load projection requests from a batch CSV file

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::Reader;

use super::data::ProjectionRequest;

/// Raw CSV row. Only the first two columns are required.
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "MonthlyContribution")]
    monthly_contribution: f64,
    #[serde(rename = "CurrentAge")]
    current_age: u32,
    #[serde(rename = "RetirementAge", default)]
    retirement_age: Option<u32>,
    #[serde(rename = "RiskProfile", default)]
    risk_profile: Option<String>,
    #[serde(rename = "InflationAdjusted", default)]
    inflation_adjusted: Option<bool>,
}

impl CsvRow {
    fn into_request(self) -> ProjectionRequest {
        ProjectionRequest {
            monthly_contribution: Some(self.monthly_contribution),
            current_age: self.current_age,
            retirement_age: self.retirement_age,
            risk_profile: self.risk_profile.filter(|p| !p.trim().is_empty()),
            inflation_adjusted: self.inflation_adjusted.unwrap_or(false),
        }
    }
}

/// One data row of a batch file: its 1-based line number (the header is
/// line 1) and either the parsed request or why it could not be parsed
pub type RequestRow = (usize, Result<ProjectionRequest>);

/// Load all requests from a CSV file.
///
/// Only a file that cannot be opened fails as a whole; a malformed row is
/// returned as an error in its own slot so the remaining rows still run.
pub fn load_requests<P: AsRef<Path>>(path: P) -> Result<Vec<RequestRow>> {
    let path = path.as_ref();
    let reader = Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    Ok(collect_rows(reader))
}

/// Load requests from any reader (e.g., string buffer, request body)
pub fn load_requests_from_reader<R: Read>(reader: R) -> Vec<RequestRow> {
    collect_rows(Reader::from_reader(reader))
}

fn collect_rows<R: Read>(mut reader: Reader<R>) -> Vec<RequestRow> {
    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            // +2: one for the header row, one for 1-based numbering
            let row = idx + 2;
            let parsed = result
                .map(CsvRow::into_request)
                .with_context(|| format!("malformed row {}", row));
            (row, parsed)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requests(rows: Vec<RequestRow>) -> Vec<ProjectionRequest> {
        rows.into_iter().map(|(_, r)| r.unwrap()).collect()
    }

    #[test]
    fn test_load_requests_with_optional_columns() {
        let csv = "\
MonthlyContribution,CurrentAge,RetirementAge,RiskProfile,InflationAdjusted
5000,30,60,moderate,true
1500,25,,,
";
        let requests = requests(load_requests_from_reader(csv.as_bytes()));
        assert_eq!(requests.len(), 2);

        assert_eq!(requests[0].monthly_contribution, Some(5000.0));
        assert_eq!(requests[0].retirement_age, Some(60));
        assert_eq!(requests[0].risk_profile.as_deref(), Some("moderate"));
        assert!(requests[0].inflation_adjusted);

        assert_eq!(requests[1].retirement_age, None);
        assert_eq!(requests[1].risk_profile, None);
        assert!(!requests[1].inflation_adjusted);
    }

    #[test]
    fn test_minimal_columns() {
        let csv = "MonthlyContribution,CurrentAge\n800,40\n";
        let requests = requests(load_requests_from_reader(csv.as_bytes()));
        assert_eq!(requests, vec![ProjectionRequest::new(800.0, 40)]);
    }

    #[test]
    fn test_malformed_row_does_not_stop_the_batch() {
        let csv = "MonthlyContribution,CurrentAge\n800,40\n800,forty\n1200,35\n";
        let rows = load_requests_from_reader(csv.as_bytes());

        let numbers: Vec<_> = rows.iter().map(|(row, _)| *row).collect();
        assert_eq!(numbers, vec![2, 3, 4]);

        assert_eq!(rows[0].1.as_ref().unwrap(), &ProjectionRequest::new(800.0, 40));
        let err = rows[1].1.as_ref().unwrap_err();
        assert!(format!("{:#}", err).contains("row 3"));
        assert_eq!(rows[2].1.as_ref().unwrap(), &ProjectionRequest::new(1200.0, 35));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_requests("no/such/requests.csv").is_err());
    }
}
