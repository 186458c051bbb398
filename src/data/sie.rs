//! SIE (Sistema de Información Económica) API client for Banco de México series.
//!
//! The client builds endpoint URLs from its token, series selection and
//! language, performs a blocking GET and hands back the decoded JSON as-is.
//! Response envelope, for reference:
//!
//! ```text
//! { "bmx": { "series": [ { "idSerie", "titulo", "fechaInicio", "fechaFin",
//!                          "periodicidad", "datos": [ { "fecha", "dato" } ] } ] } }
//! ```
//!
//! `dato` values are locale-formatted strings ("1,234.56") and are left alone.

use chrono::NaiveDate;
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, info};

use crate::data::config::{ClientConfig, token_from_env};
use crate::data::transport::{HttpTransport, Transport};
use crate::domain::{DATE_FORMAT, Language, is_range_expression, join_series_ids, parse_query_date};
use crate::error::SieError;

/// The four query endpoints exposed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `/series/{ids}`
    Metadata,
    /// `/series/{ids}/datos/oportuno`
    LastData,
    /// `/series/{ids}/datos`
    TimeSeries,
    /// `/series/{ids}/datos/{start}/{end}`
    TimeSeriesRange { start: NaiveDate, end: NaiveDate },
}

impl Endpoint {
    fn sub_path(&self) -> Vec<String> {
        match self {
            Endpoint::Metadata => Vec::new(),
            Endpoint::LastData => vec!["datos".to_string(), "oportuno".to_string()],
            Endpoint::TimeSeries => vec!["datos".to_string()],
            Endpoint::TimeSeriesRange { start, end } => vec![
                "datos".to_string(),
                start.format(DATE_FORMAT).to_string(),
                end.format(DATE_FORMAT).to_string(),
            ],
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Endpoint::Metadata => "metadata",
            Endpoint::LastData => "last data",
            Endpoint::TimeSeries => "time series",
            Endpoint::TimeSeriesRange { .. } => "time series range",
        }
    }
}

pub struct SieClient<T = HttpTransport> {
    transport: T,
    config: ClientConfig,
    token: String,
    series: String,
    language: Language,
}

impl SieClient<HttpTransport> {
    /// Client against the public service with default settings.
    pub fn new<I, S>(token: impl Into<String>, series: I, language: Language) -> Result<Self, SieError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_config(ClientConfig::default(), token, series, language)
    }

    pub fn with_config<I, S>(
        config: ClientConfig,
        token: impl Into<String>,
        series: I,
        language: Language,
    ) -> Result<Self, SieError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(transport, config, token, series, language)
    }

    /// Token from `BANXICO_TOKEN`, base URL from `SIE_BASE_URL` (both via `.env`).
    pub fn from_env<I, S>(series: I, language: Language) -> Result<Self, SieError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let token = token_from_env()?;
        Self::with_config(ClientConfig::from_env(), token, series, language)
    }
}

impl<T: Transport> SieClient<T> {
    pub fn with_transport<I, S>(
        transport: T,
        config: ClientConfig,
        token: impl Into<String>,
        series: I,
        language: Language,
    ) -> Result<Self, SieError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        config.validate()?;
        let mut client = Self {
            transport,
            config,
            token: String::new(),
            series: String::new(),
            language,
        };
        client.set_token(token)?;
        client.set_series(series)?;
        Ok(client)
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Current series selection, as sent in the URL path.
    pub fn series(&self) -> &str {
        &self.series
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn set_token(&mut self, token: impl Into<String>) -> Result<(), SieError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SieError::Config("token cannot be empty".to_string()));
        }
        self.token = token;
        Ok(())
    }

    /// Replace the series to query.
    ///
    /// Takes a list of identifiers, or a single range expression such as
    /// `["SF311408-SF311410"]`. A range cannot be mixed with other ids.
    pub fn set_series<I, S>(&mut self, ids: I) -> Result<(), SieError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let series = join_series_ids(ids)?;
        if series.contains(',') && series.split(',').any(is_range_expression) {
            return Err(SieError::Config(
                "a series range must be the only identifier".to_string(),
            ));
        }
        self.series = series;
        Ok(())
    }

    /// Replace the series with the range `first-last`.
    pub fn set_series_range(&mut self, first: &str, last: &str) -> Result<(), SieError> {
        let (first, last) = (first.trim(), last.trim());
        if first.is_empty() || last.is_empty() {
            return Err(SieError::Config("series range bounds cannot be empty".to_string()));
        }
        self.series = format!("{first}-{last}");
        Ok(())
    }

    /// Add identifiers to the current selection.
    ///
    /// Ranges cannot be appended; use [`set_series`](Self::set_series) for those.
    pub fn append_series<I, S>(&mut self, ids: I) -> Result<(), SieError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra = join_series_ids(ids)?;
        if extra.split(',').any(is_range_expression) {
            return Err(SieError::Config(
                "series ranges cannot be appended; use set_series instead".to_string(),
            ));
        }
        self.series = format!("{},{extra}", self.series);
        Ok(())
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Metadata of the series (title, coverage dates, periodicity, units).
    pub fn get_metadata(&self) -> Result<Value, SieError> {
        self.fetch(Endpoint::Metadata, None)
    }

    /// Most recent published observation of each series.
    pub fn get_last_data(&self, pct_change: Option<&str>) -> Result<Value, SieError> {
        self.fetch(Endpoint::LastData, pct_change)
    }

    /// Whole history of each series, from `fechaInicio` to `fechaFin`.
    pub fn get_timeseries(&self, pct_change: Option<&str>) -> Result<Value, SieError> {
        self.fetch(Endpoint::TimeSeries, pct_change)
    }

    /// Observations between `start` and `end` (inclusive, `yyyy-mm-dd`).
    ///
    /// Both dates are validated before anything is sent. Dates outside the
    /// coverage of a series are clamped by the service.
    pub fn get_timeseries_range(
        &self,
        start: &str,
        end: &str,
        pct_change: Option<&str>,
    ) -> Result<Value, SieError> {
        let start = parse_query_date("start date", start)?;
        let end = parse_query_date("end date", end)?;
        self.fetch(Endpoint::TimeSeriesRange { start, end }, pct_change)
    }

    /// Build the request URL for `endpoint`.
    ///
    /// `pct_change` is forwarded verbatim as `incremento`.
    pub fn url_for(&self, endpoint: Endpoint, pct_change: Option<&str>) -> Result<Url, SieError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| SieError::Config(format!("invalid base_url '{}': {e}", self.config.base_url)))?;

        url.path_segments_mut()
            .map_err(|_| SieError::Config(format!("base_url '{}' cannot carry a path", self.config.base_url)))?
            .pop_if_empty()
            .push("series")
            .push(&self.series)
            .extend(endpoint.sub_path());

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("token", &self.token);
            query.append_pair("locale", self.language.as_str());
            if let Some(mode) = pct_change {
                query.append_pair("incremento", mode);
            }
            if let Some(media_type) = &self.config.media_type {
                query.append_pair("mediaType", media_type);
            }
        }

        Ok(url)
    }

    fn fetch(&self, endpoint: Endpoint, pct_change: Option<&str>) -> Result<Value, SieError> {
        let url = self.url_for(endpoint, pct_change)?;
        debug!(url = %redact_token(&url), "SIE {} request", endpoint.name());
        let body = self.transport.get_json(&url)?;
        info!(series = %self.series, "SIE {} request succeeded", endpoint.name());
        Ok(body)
    }
}

impl<T> std::fmt::Debug for SieClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SieClient")
            .field("config", &self.config)
            .field("token", &"***")
            .field("series", &self.series)
            .field("language", &self.language)
            .finish()
    }
}

/// Render `url` with the token value masked, for logs.
pub fn redact_token(url: &Url) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "token" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Counts calls and always answers with an empty envelope.
    struct CountingTransport {
        calls: Cell<usize>,
    }

    impl Transport for CountingTransport {
        fn get_json(&self, _url: &Url) -> Result<Value, SieError> {
            self.calls.set(self.calls.get() + 1);
            Ok(serde_json::json!({ "bmx": { "series": [] } }))
        }
    }

    fn client(series: &[&str]) -> SieClient<CountingTransport> {
        SieClient::with_transport(
            CountingTransport { calls: Cell::new(0) },
            ClientConfig::default(),
            "tok123",
            series.iter().copied(),
            Language::En,
        )
        .unwrap()
    }

    #[test]
    fn urls_follow_endpoint_layout() {
        let c = client(&["SF43718", "SF46410"]);
        let base = "https://www.banxico.org.mx/SieAPIRest/service/v1/series/SF43718,SF46410";

        assert_eq!(
            c.url_for(Endpoint::Metadata, None).unwrap().as_str(),
            format!("{base}?token=tok123&locale=en")
        );
        assert_eq!(
            c.url_for(Endpoint::LastData, Some("PorcObsAnt")).unwrap().as_str(),
            format!("{base}/datos/oportuno?token=tok123&locale=en&incremento=PorcObsAnt")
        );
        assert_eq!(
            c.url_for(Endpoint::TimeSeries, None).unwrap().as_str(),
            format!("{base}/datos?token=tok123&locale=en")
        );

        let range = Endpoint::TimeSeriesRange {
            start: NaiveDate::from_ymd_opt(2000, 12, 31).unwrap(),
            end: NaiveDate::from_ymd_opt(2004, 4, 1).unwrap(),
        };
        assert_eq!(
            c.url_for(range, None).unwrap().as_str(),
            format!("{base}/datos/2000-12-31/2004-04-01?token=tok123&locale=en")
        );
    }

    #[test]
    fn trailing_slash_and_media_type_are_handled() {
        let c = SieClient::with_transport(
            CountingTransport { calls: Cell::new(0) },
            ClientConfig::new("http://localhost:9000/v1/").with_media_type("json"),
            "tok",
            ["SF60648"],
            Language::Es,
        )
        .unwrap();
        assert_eq!(
            c.url_for(Endpoint::TimeSeries, Some("PorcAnual")).unwrap().as_str(),
            "http://localhost:9000/v1/series/SF60648/datos?token=tok&locale=es&incremento=PorcAnual&mediaType=json"
        );
    }

    #[test]
    fn range_expression_stays_in_path() {
        let mut c = client(&["SF43718"]);
        c.set_series_range("SF311408", "SF311410").unwrap();
        assert_eq!(c.series(), "SF311408-SF311410");
        let url = c.url_for(Endpoint::Metadata, None).unwrap();
        assert!(url.path().ends_with("/series/SF311408-SF311410"));
    }

    #[test]
    fn invalid_dates_never_reach_the_transport() {
        let c = client(&["SF43718"]);
        let err = c.get_timeseries_range("2020-13-01", "2020-01-01", None).unwrap_err();
        assert!(matches!(err, SieError::InvalidDate { field: "start date", .. }));
        let err = c.get_timeseries_range("2020-01-01", "2020-02-30", None).unwrap_err();
        assert!(matches!(err, SieError::InvalidDate { field: "end date", .. }));
        assert_eq!(c.transport().calls.get(), 0);

        c.get_timeseries_range("2020-01-01", "2020-02-01", None).unwrap();
        assert_eq!(c.transport().calls.get(), 1);
    }

    #[test]
    fn range_cannot_be_mixed_with_other_ids() {
        let mut c = client(&["SF43718"]);
        assert!(matches!(c.set_series(["A", "SF1-SF9"]), Err(SieError::Config(_))));
        assert!(c.set_series(["SF1-SF9", "A"]).is_err());
        assert_eq!(c.series(), "SF43718");

        c.set_series(["SF1-SF9"]).unwrap();
        assert_eq!(c.series(), "SF1-SF9");
    }

    #[test]
    fn setters_validate_input() {
        let mut c = client(&["A", "B"]);
        assert!(matches!(c.set_token("  "), Err(SieError::Config(_))));
        assert_eq!(c.token(), "tok123");

        assert!(c.set_series(Vec::<&str>::new()).is_err());
        assert_eq!(c.series(), "A,B");

        assert!(c.append_series(["SF1-SF9"]).is_err());
        assert!(c.append_series(Vec::<&str>::new()).is_err());
        assert_eq!(c.series(), "A,B");

        c.append_series(["X"]).unwrap();
        assert_eq!(c.series(), "A,B,X");

        c.set_language(Language::Es);
        assert_eq!(c.language(), Language::Es);
        assert!(c.url_for(Endpoint::Metadata, None).unwrap().as_str().contains("locale=es"));
    }

    #[test]
    fn redaction_hides_token_only() {
        let c = client(&["SF43718"]);
        let url = c.url_for(Endpoint::LastData, Some("PorcAnual")).unwrap();
        let shown = redact_token(&url);
        assert!(!shown.contains("tok123"));
        assert!(shown.contains("locale=en"));
        assert!(shown.contains("incremento=PorcAnual"));
    }

    #[test]
    fn debug_output_masks_token() {
        let c = client(&["SF43718"]);
        let shown = format!("{c:?}");
        assert!(!shown.contains("tok123"));
        assert!(shown.contains("SF43718"));
    }
}
