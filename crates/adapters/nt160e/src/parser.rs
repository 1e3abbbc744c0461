//! Page parsing: pulls field values out of the thermostat's HTML.
//!
//! The pages are not parsed as HTML. Each field is found by a literal
//! marker, the rest of that line is split on `"` and one token is taken.

use regex::Regex;

use crate::error::ParseError;
use crate::fields::{FIELDS, FieldDescriptor, FieldKind, HvacState, SCALE_MARKER};

/// One cycle's worth of values, in [`FIELDS`] order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThermostatReading {
    values: Vec<(&'static str, f64)>,
}

impl ThermostatReading {
    /// Value of the named field, if the page carried it.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.values.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn push(&mut self, field: &'static str, value: f64) {
        self.values.push((field, value));
    }
}

/// Turns the two status pages into a reading.
pub trait PageParser: Send + Sync {
    /// Extract every field found on `main_page`, using `settings_page` for
    /// the temperature scale.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when a marker is present but its value cannot
    /// be read. Fields whose marker is absent are left out.
    fn extract(&self, main_page: &str, settings_page: &str)
    -> Result<ThermostatReading, ParseError>;
}

/// Marker-and-token scraper for the NT160e pages.
#[derive(Debug)]
pub struct ScrapeParser {
    patterns: Vec<(&'static FieldDescriptor, Regex)>,
}

impl ScrapeParser {
    /// Compile one pattern per field.
    ///
    /// # Errors
    ///
    /// Returns [`regex::Error`] if a pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        let patterns = FIELDS
            .iter()
            .map(|field| {
                let pattern = format!("{}.+", regex::escape(field.marker));
                Regex::new(&pattern).map(|regex| (field, regex))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { patterns })
    }
}

impl PageParser for ScrapeParser {
    fn extract(
        &self,
        main_page: &str,
        settings_page: &str,
    ) -> Result<ThermostatReading, ParseError> {
        let fahrenheit = temperature_scale(settings_page)?
            .is_some_and(|scale| scale.eq_ignore_ascii_case("FAHRENHEIT"));

        let mut reading = ThermostatReading::default();
        for (field, regex) in &self.patterns {
            let Some(found) = regex.find(main_page) else {
                tracing::trace!(field = field.name, "marker not on page");
                continue;
            };
            let token = nth_token(found.as_str(), field.name, field.token)?;
            let value = match field.kind {
                FieldKind::HvacState => f64::from(HvacState::from_word(token).code()),
                FieldKind::Plain => parse_number(field.name, token)?,
                FieldKind::Temperature => {
                    let value = parse_number(field.name, token)?;
                    if fahrenheit {
                        fahrenheit_to_celsius(value)
                    } else {
                        value
                    }
                }
            };
            reading.push(field.name, value);
        }
        Ok(reading)
    }
}

/// The scale named on the settings page, if a line starting with the
/// scale marker declares one.
///
/// # Errors
///
/// Returns [`ParseError::MissingToken`] when the declaring line has no
/// value token.
pub fn temperature_scale(settings_page: &str) -> Result<Option<&str>, ParseError> {
    settings_page
        .lines()
        .find(|line| line.starts_with(SCALE_MARKER))
        .map(|line| nth_token(line, "temperature_scale", 3))
        .transpose()
}

#[must_use]
pub fn fahrenheit_to_celsius(value: f64) -> f64 {
    (value - 32.0) / 1.8
}

fn nth_token<'a>(
    line: &'a str,
    field: &'static str,
    index: usize,
) -> Result<&'a str, ParseError> {
    line.split('"')
        .nth(index)
        .ok_or(ParseError::MissingToken { field, index })
}

/// Parse `raw` as a float after dropping one trailing unit character
/// (`75F`, `45%`).
fn parse_number(field: &'static str, raw: &str) -> Result<f64, ParseError> {
    let digits = match raw.chars().next_back() {
        Some(last) if !last.is_ascii_digit() => &raw[..raw.len() - last.len_utf8()],
        _ => raw,
    };
    digits
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidNumber {
            field,
            raw: raw.to_string(),
        })
}
