//! MDW report parsing
//!
//! Reads the "Criminal scum" section copied out of the MDW:
//!
//! ```text
//! Bryan Barker (#1130)
//! Jaywalking
//! Littering
//! Warrant for Arrest
//! Reductions
//! Final
//! 50 months (+10 months parole) / $20,425.00 fine / 1 point(s)
//! ```
//!
//! The first `Name (#id)` line names the suspect, every line after it up to
//! the `Warrant for Arrest` marker is a charge, and the first sentencing line
//! after the marker carries the fine and optional points.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::common::parse_amount_prefix;
use crate::error::ReportParseError;
use crate::value_objects::SelectedCharge;

/// Line separating the charge list from sentencing information
pub const SENTENCING_MARKER: &str = "Warrant for Arrest";

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\w ]+) \(#\d+\)").expect("valid regex"));
static SENTENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+) months.+/ \$([\d,.]+) fine( / (\d+) point)?").expect("valid regex")
});

/// Fields extracted from MDW output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedReport {
    pub full_name: String,
    /// Charge lines, verbatim and in report order
    pub charges: Vec<String>,
    pub fine_amount: f64,
    pub point_count: Option<u32>,
}

impl ParsedReport {
    /// Charges as selections, tagged `mdw_0`, `mdw_1`, ...
    pub fn selected_charges(&self) -> Vec<SelectedCharge> {
        self.charges
            .iter()
            .enumerate()
            .map(|(index, label)| SelectedCharge::from_report(index, label.as_str()))
            .collect()
    }
}

/// Parses pasted MDW output.
///
/// Returns `Ok(None)` for blank input, which leaves the form alone.
pub fn parse_report(text: &str) -> Result<Option<ParsedReport>, ReportParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let mut full_name: Option<&str> = None;
    let mut charges = Vec::new();
    let mut sentence: Option<(&str, Option<&str>)> = None;
    let mut past_charges = false;

    for line in text.split('\n') {
        if line == SENTENCING_MARKER {
            past_charges = true;
            continue;
        }

        if full_name.is_none() {
            if let Some(captures) = NAME_RE.captures(line) {
                full_name = captures.get(1).map(|m| m.as_str());
                continue;
            }
        }

        if full_name.is_some() && !past_charges {
            charges.push(line.to_string());
        } else if past_charges {
            if let Some(captures) = SENTENCE_RE.captures(line) {
                let fine = captures.get(2).map_or("", |m| m.as_str());
                let points = captures.get(4).map(|m| m.as_str());
                sentence = Some((fine, points));
                break;
            }
        }
    }

    let full_name = full_name.ok_or(ReportParseError::MissingName)?;
    let (fine, points) = sentence.ok_or(ReportParseError::MissingFine)?;

    let fine_amount =
        parse_amount_prefix(fine).ok_or_else(|| ReportParseError::InvalidFine(fine.to_string()))?;
    let point_count = points
        .map(|p| {
            p.parse::<u32>()
                .map_err(|_| ReportParseError::InvalidPoints(p.to_string()))
        })
        .transpose()?;

    Ok(Some(ParsedReport {
        full_name: full_name.to_string(),
        charges,
        fine_amount,
        point_count,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Bryan Barker (#1130)
Jaywalking
Littering
Warrant for Arrest
Reductions
Final
50 months (+10 months parole) / $20,425.00 fine / 1 point(s)";

    #[test]
    fn test_parse_sample_report() {
        let report = parse_report(SAMPLE).unwrap().unwrap();
        assert_eq!(report.full_name, "Bryan Barker");
        assert_eq!(report.charges, vec!["Jaywalking", "Littering"]);
        assert_eq!(report.fine_amount, 20425.0);
        assert_eq!(report.point_count, Some(1));
    }

    #[test]
    fn test_minimal_sentencing_line() {
        let text = "Bryan Barker (#1130)\nJaywalking\nLittering\nWarrant for Arrest\n50 months / $20,425.00 fine / 1 point(s)";
        let report = parse_report(text).unwrap().unwrap();
        assert_eq!(report.charges, vec!["Jaywalking", "Littering"]);
        assert_eq!(report.fine_amount, 20425.0);
        assert_eq!(report.point_count, Some(1));
    }

    #[test]
    fn test_blank_input_is_a_no_op() {
        assert_eq!(parse_report(""), Ok(None));
        assert_eq!(parse_report("  \n\t \n"), Ok(None));
    }

    #[test]
    fn test_points_are_optional() {
        let text = "Jane Doe (#7)\nLoitering\nWarrant for Arrest\n0 months / $150 fine";
        let report = parse_report(text).unwrap().unwrap();
        assert_eq!(report.fine_amount, 150.0);
        assert_eq!(report.point_count, None);
    }

    #[test]
    fn test_missing_marker_fails_even_with_name_and_charges() {
        let text = "Bryan Barker (#1130)\nJaywalking\n50 months / $250.00 fine";
        assert_eq!(parse_report(text), Err(ReportParseError::MissingFine));
    }

    #[test]
    fn test_missing_name_fails() {
        let text = "Jaywalking\nWarrant for Arrest\n50 months / $250.00 fine";
        assert_eq!(parse_report(text), Err(ReportParseError::MissingName));
    }

    #[test]
    fn test_second_name_line_is_a_charge() {
        let text = "Bryan Barker (#1130)\nJohn Smith (#22)\nJaywalking\nWarrant for Arrest\n1 months / $10 fine";
        let report = parse_report(text).unwrap().unwrap();
        assert_eq!(report.full_name, "Bryan Barker");
        assert_eq!(report.charges, vec!["John Smith (#22)", "Jaywalking"]);
    }

    #[test]
    fn test_name_after_marker_is_accepted() {
        let text = "Jaywalking\nWarrant for Arrest\nBryan Barker (#1)\n1 months / $10 fine";
        let report = parse_report(text).unwrap().unwrap();
        assert_eq!(report.full_name, "Bryan Barker");
        assert!(report.charges.is_empty());
        assert_eq!(report.fine_amount, 10.0);
    }

    #[test]
    fn test_lines_before_name_are_ignored() {
        let text = "Criminal scum\nBryan Barker (#1130)\nJaywalking\nWarrant for Arrest\n1 months / $10 fine";
        let report = parse_report(text).unwrap().unwrap();
        assert_eq!(report.charges, vec!["Jaywalking"]);
    }

    #[test]
    fn test_only_first_sentencing_line_counts() {
        let text = "A B (#1)\nX\nWarrant for Arrest\n1 months / $10 fine / 2 point(s)\n3 months / $99 fine";
        let report = parse_report(text).unwrap().unwrap();
        assert_eq!(report.fine_amount, 10.0);
        assert_eq!(report.point_count, Some(2));
    }

    #[test]
    fn test_unreadable_fine_is_rejected() {
        let text = "A B (#1)\nX\nWarrant for Arrest\n1 months / $,. fine";
        assert_eq!(
            parse_report(text),
            Err(ReportParseError::InvalidFine(",.".into()))
        );
    }

    #[test]
    fn test_selected_charges_use_report_ids() {
        let report = parse_report(SAMPLE).unwrap().unwrap();
        let selected = report.selected_charges();
        assert_eq!(selected[0].id.as_str(), "mdw_0");
        assert_eq!(selected[1].id.as_str(), "mdw_1");
        assert_eq!(selected[1].label, "Littering");
    }
}
