//! Shared domain types.
//!
//! These types are intentionally small: the client never interprets the
//! response payload, so the only structured values are the query inputs.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::SieError;

/// Date format accepted by the ranged endpoint.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Language of the returned titles and labels (`locale` query parameter).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Es];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = SieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "es" => Ok(Language::Es),
            other => Err(SieError::Config(format!(
                "language \"{other}\" is not defined. Try \"en\" for english or \"es\" for spanish"
            ))),
        }
    }
}

/// Server-side percentage-change transforms (`incremento` query parameter).
///
/// Query operations take the mode as a plain string and forward it verbatim,
/// so modes added by the service later keep working. These variants are the
/// ones documented today; "levels" is expressed by omitting the parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PctChange {
    /// Change rate against the previous observation.
    #[serde(rename = "PorcObsAnt")]
    PreviousObservation,
    /// Annual change rate.
    #[serde(rename = "PorcAnual")]
    Annual,
    /// Annual accumulated (year-to-date) change rate.
    #[serde(rename = "PorcAcumAnual")]
    AnnualAccumulated,
}

impl PctChange {
    pub const ALL: [PctChange; 3] = [
        PctChange::PreviousObservation,
        PctChange::Annual,
        PctChange::AnnualAccumulated,
    ];

    pub fn as_param(self) -> &'static str {
        match self {
            PctChange::PreviousObservation => "PorcObsAnt",
            PctChange::Annual => "PorcAnual",
            PctChange::AnnualAccumulated => "PorcAcumAnual",
        }
    }

    /// Look up a documented mode by its parameter value.
    pub fn from_param(value: &str) -> Option<PctChange> {
        PctChange::ALL.into_iter().find(|m| m.as_param() == value)
    }
}

impl fmt::Display for PctChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// Validate a `yyyy-mm-dd` date.
///
/// The shape is checked strictly (zero-padded, four-digit year) before chrono
/// checks that the date exists on the calendar.
pub fn parse_query_date(field: &'static str, value: &str) -> Result<NaiveDate, SieError> {
    let invalid = || SieError::InvalidDate {
        field,
        value: value.to_string(),
    };

    let bytes = value.as_bytes();
    if bytes.len() != 10 {
        return Err(invalid());
    }
    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

/// True if `id` looks like a range expression (`ID1-ID2`).
pub fn is_range_expression(id: &str) -> bool {
    id.contains('-')
}

/// Join series identifiers into the comma-separated form used in the URL path.
///
/// Identifiers are trimmed; blank entries are an error.
pub fn join_series_ids<I, S>(ids: I) -> Result<String, SieError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parts = Vec::new();
    for id in ids {
        let id = id.as_ref().trim();
        if id.is_empty() {
            return Err(SieError::Config("series identifiers cannot be blank".to_string()));
        }
        parts.push(id.to_string());
    }
    if parts.is_empty() {
        return Err(SieError::Config("series list cannot be empty".to_string()));
    }
    Ok(parts.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_parses_known_codes_only() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!("es".parse::<Language>().unwrap(), Language::Es);
        assert!(matches!("fr".parse::<Language>(), Err(SieError::Config(_))));
        assert!("EN".parse::<Language>().is_err());
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn pct_change_params_round_trip() {
        for mode in PctChange::ALL {
            assert_eq!(PctChange::from_param(mode.as_param()), Some(mode));
        }
        assert_eq!(PctChange::from_param("PorcMensual"), None);
        assert_eq!(
            serde_json::to_string(&PctChange::Annual).unwrap(),
            "\"PorcAnual\""
        );
    }

    #[test]
    fn query_dates_must_be_strict_and_real() {
        assert_eq!(
            parse_query_date("start date", "2000-12-31").unwrap(),
            NaiveDate::from_ymd_opt(2000, 12, 31).unwrap()
        );
        assert!(parse_query_date("start date", "2020-13-01").is_err());
        assert!(parse_query_date("start date", "2021-02-29").is_err());
        assert!(parse_query_date("start date", "2020-1-01").is_err());
        assert!(parse_query_date("start date", "01-01-2020").is_err());
        assert!(parse_query_date("start date", "2020/01/01").is_err());
        assert!(parse_query_date("start date", "").is_err());
        assert!(parse_query_date("start date", "2020-02-29").is_ok());
    }

    #[test]
    fn join_series_ids_rejects_empty_input() {
        assert_eq!(join_series_ids(["SF43718", " SF46410 "]).unwrap(), "SF43718,SF46410");
        assert!(join_series_ids(Vec::<String>::new()).is_err());
        assert!(join_series_ids(["SF43718", "  "]).is_err());
    }

    #[test]
    fn range_expressions_are_detected() {
        assert!(is_range_expression("SF311408-SF311410"));
        assert!(!is_range_expression("SF311408"));
    }
}
