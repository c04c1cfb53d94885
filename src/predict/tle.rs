use chrono::{DateTime, Duration, Utc};
use sgp4::{Constants, Elements};

use crate::predict::error::PredictError;

/// A parsed element set, age-stamped at fetch time. A set is never
/// discarded on a failed refresh; the previous one stays in use until a
/// new fetch succeeds.
pub struct ElementSet {
    pub elements: Elements,
    pub constants: Constants,
    pub fetched_at: DateTime<Utc>,
}

impl ElementSet {
    pub fn from_tle(text: &str, fetched_at: DateTime<Utc>) -> Result<Self, PredictError> {
        let (name, line1, line2) = parse_tle_text(text)?;
        let elements = Elements::from_tle(name, line1.as_bytes(), line2.as_bytes())?;
        let constants = Constants::from_elements(&elements)?;
        Ok(Self {
            elements,
            constants,
            fetched_at,
        })
    }

    pub fn name(&self) -> String {
        self.elements
            .object_name
            .clone()
            .unwrap_or_else(|| format!("NORAD {}", self.elements.norad_id))
    }
}

/// Take the element record from the first non-empty lines of `text`:
/// either `1 .../2 ...` or a name line followed by the two data lines.
pub fn parse_tle_text(text: &str) -> Result<(Option<String>, String, String), PredictError> {
    let lines: Vec<&str> = text
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    if lines.len() >= 2 && lines[0].starts_with("1 ") && lines[1].starts_with("2 ") {
        return Ok((None, lines[0].to_string(), lines[1].to_string()));
    }
    if lines.len() >= 3 && lines[1].starts_with("1 ") && lines[2].starts_with("2 ") {
        return Ok((
            Some(lines[0].to_string()),
            lines[1].to_string(),
            lines[2].to_string(),
        ));
    }
    Err(PredictError::InvalidFormat(
        "expected a 2- or 3-line element record".to_string(),
    ))
}

/// True once the last fetch is older than `interval`, and always on first
/// run. A failed fetch leaves the stamp untouched, so the retry happens on
/// the next tick rather than a full interval later.
pub fn should_refresh(
    last_fetch: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    interval: Duration,
) -> bool {
    match last_fetch {
        None => true,
        Some(fetched_at) => now - fetched_at > interval,
    }
}

/// Something that can produce a fresh element set on demand.
pub trait ElementProvider {
    fn fetch(&mut self, now: DateTime<Utc>) -> Result<ElementSet, PredictError>;
}

/// HTTP element source: GET a fixed URL returning the record as plain
/// text.
pub struct TleSource {
    http: reqwest::blocking::Client,
    url: String,
}

impl TleSource {
    pub fn new(url: String, timeout: std::time::Duration) -> Result<Self, PredictError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { http, url })
    }
}

impl ElementProvider for TleSource {
    fn fetch(&mut self, now: DateTime<Utc>) -> Result<ElementSet, PredictError> {
        let response = self.http.get(&self.url).send()?.error_for_status()?;
        let body = response.text()?;
        ElementSet::from_tle(&body, now)
    }
}
