//! Dashboard request documents
//!
//! The JSON shape accepted from producers:
//!
//! ```json
//! {
//!   "module": "weather",
//!   "title": "Weather",
//!   "sections": [
//!     { "type": "text", "value": "Sunny", "color": "#FFFFFF" },
//!     { "type": "gauge", "value": 42, "range": [0, 50, 100],
//!       "color": ["#00FF00", "#FF0000"] }
//!   ]
//! }
//! ```
//!
//! Deserialization is deliberately loose; [`DashboardRequest::into_sections`]
//! is where a document is checked and turned into typed [`Section`]s.

use embedded_graphics::pixelcolor::Rgb888;
use serde::{Deserialize, Serialize};

use crate::color::parse_hex;
use crate::error::{RenderError, RenderResult};
use crate::metrics::format_number;
use crate::sections::{Gauge, Section, TextSection};

/// One dashboard render request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardRequest {
    /// Producer name; also names the stored image
    pub module: String,
    /// Header line
    pub title: String,
    #[serde(default)]
    pub sections: Vec<SectionSpec>,
}

/// A section as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSpec {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, alias = "colors", skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ValueField>,
}

/// `color` holds one hex string for text and a list for gauges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorField {
    One(String),
    Many(Vec<String>),
}

/// `value` may be sent as a JSON number or a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueField {
    Number(f64),
    Text(String),
}

impl DashboardRequest {
    pub fn from_json_str(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    /// Validate every section spec and convert it, failing on the first bad one.
    pub fn into_sections(self) -> RenderResult<Vec<Section>> {
        self.sections
            .into_iter()
            .enumerate()
            .map(|(index, spec)| spec.into_section(index))
            .collect()
    }
}

impl SectionSpec {
    fn into_section(self, index: usize) -> RenderResult<Section> {
        let fail = |reason: String| RenderError::invalid_section(index, reason);

        match self.kind.as_str() {
            "text" => {
                let value = match self.value {
                    Some(ValueField::Text(text)) => text,
                    Some(ValueField::Number(n)) => format_number(n).as_str().into(),
                    None => return Err(fail("text section is missing \"value\"".into())),
                };
                let color = match self.color {
                    Some(ColorField::One(hex)) => color(&hex).map_err(fail)?,
                    Some(ColorField::Many(_)) => {
                        return Err(fail("text color must be a single hex string".into()));
                    }
                    None => return Err(fail("text section is missing \"color\"".into())),
                };
                Ok(Section::Text(TextSection::new(value, color)))
            }
            "gauge" => {
                let value = match self.value {
                    Some(ValueField::Number(n)) => n,
                    Some(ValueField::Text(text)) => text
                        .trim()
                        .parse::<f64>()
                        .map_err(|_| fail(format!("gauge value {text:?} is not a number")))?,
                    None => return Err(fail("gauge section is missing \"value\"".into())),
                };
                if !value.is_finite() {
                    return Err(fail(format!("gauge value {value} is not finite")));
                }

                let range = self
                    .range
                    .ok_or_else(|| fail("gauge section is missing \"range\"".into()))?;
                if range.len() < 2 {
                    return Err(fail(format!(
                        "gauge range needs at least 2 markers, got {}",
                        range.len()
                    )));
                }
                if range.iter().any(|v| !v.is_finite()) {
                    return Err(fail("gauge range contains a non-finite marker".into()));
                }

                let colors = match self.color {
                    Some(ColorField::Many(list)) => list
                        .iter()
                        .map(|hex| color(hex))
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(fail)?,
                    Some(ColorField::One(_)) => {
                        return Err(fail("gauge colors must be a list of hex strings".into()));
                    }
                    None => return Err(fail("gauge section is missing \"color\"".into())),
                };
                if colors.len() != range.len() - 1 {
                    return Err(fail(format!(
                        "gauge with {} markers needs {} colors, got {}",
                        range.len(),
                        range.len() - 1,
                        colors.len()
                    )));
                }

                Ok(Section::Gauge(Gauge::new(range, colors, value)))
            }
            other => Err(fail(format!("unknown section type {other:?}"))),
        }
    }
}

fn color(hex: &str) -> Result<Rgb888, String> {
    parse_hex(hex).ok_or_else(|| format!("malformed color {hex:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::*;

    const WEATHER: &str = r##"{
        "module": "weather",
        "title": "Weather",
        "sections": [
            {"type": "text", "value": "Sunny", "color": "#FFFFFF"},
            {"type": "gauge", "value": 42, "range": [0, 50, 100],
             "color": ["#00FF00", "#FF0000"]}
        ]
    }"##;

    fn single(section: &str) -> RenderResult<Vec<Section>> {
        let doc = format!(r#"{{"module": "m", "title": "t", "sections": [{section}]}}"#);
        DashboardRequest::from_json_str(&doc).unwrap().into_sections()
    }

    fn reason(err: RenderError) -> String {
        match err {
            RenderError::InvalidSection { reason, .. } => reason,
            other => panic!("expected InvalidSection, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_reference_request() {
        let request = DashboardRequest::from_json_str(WEATHER).unwrap();
        assert_eq!(request.module, "weather");

        let sections = request.into_sections().unwrap();
        assert_eq!(
            sections,
            vec![
                Section::Text(TextSection::new("Sunny", Rgb888::WHITE)),
                Section::Gauge(Gauge::new(
                    vec![0.0, 50.0, 100.0],
                    vec![Rgb888::GREEN, Rgb888::RED],
                    42.0
                )),
            ]
        );
    }

    #[test]
    fn test_colors_alias_and_string_value() {
        let sections = single(
            r##"{"type": "gauge", "value": "7.5", "range": [0, 10], "colors": ["#0000FF"]}"##,
        )
        .unwrap();
        assert_eq!(
            sections[0],
            Section::Gauge(Gauge::new(vec![0.0, 10.0], vec![Rgb888::BLUE], 7.5))
        );
    }

    #[test]
    fn test_numeric_text_value_is_formatted() {
        let sections = single(r##"{"type": "text", "value": 21, "color": "#FFFFFF"}"##).unwrap();
        assert_eq!(
            sections[0],
            Section::Text(TextSection::new("21", Rgb888::WHITE))
        );
    }

    #[test]
    fn test_unknown_type() {
        let err = single(r##"{"type": "sparkline", "value": 1}"##).unwrap_err();
        assert!(reason(err).contains("sparkline"));
    }

    #[test]
    fn test_missing_fields() {
        assert!(single(r##"{"type": "text", "color": "#FFFFFF"}"##).is_err());
        assert!(single(r##"{"type": "text", "value": "x"}"##).is_err());
        assert!(single(r##"{"type": "gauge", "value": 1, "color": ["#FFFFFF"]}"##).is_err());
    }

    #[test]
    fn test_range_too_short() {
        let err = single(r##"{"type": "gauge", "value": 1, "range": [1], "color": []}"##)
            .unwrap_err();
        assert!(reason(err).contains("at least 2"));
    }

    #[test]
    fn test_color_count_mismatch() {
        let err = single(
            r##"{"type": "gauge", "value": 1, "range": [0, 1, 2], "color": ["#FFFFFF"]}"##,
        )
        .unwrap_err();
        assert!(reason(err).contains("needs 2 colors"));
    }

    #[test]
    fn test_malformed_color() {
        let err = single(r##"{"type": "text", "value": "x", "color": "white"}"##).unwrap_err();
        assert!(reason(err).contains("malformed color"));
    }

    #[test]
    fn test_wrong_value_kind() {
        assert!(single(
            r##"{"type": "gauge", "value": "warm", "range": [0, 1], "color": ["#FFFFFF"]}"##
        )
        .is_err());
        assert!(single(r##"{"type": "text", "value": "x", "color": ["#FFFFFF"]}"##).is_err());
    }

    #[test]
    fn test_error_carries_section_index() {
        let doc = r##"{"module": "m", "title": "t", "sections": [
            {"type": "text", "value": "ok", "color": "#FFFFFF"},
            {"type": "text", "value": "bad", "color": "#GGGGGG"}
        ]}"##;
        let err = DashboardRequest::from_json_str(doc)
            .unwrap()
            .into_sections()
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidSection { index: 1, .. }));
    }

    #[test]
    fn test_empty_sections_allowed() {
        let request =
            DashboardRequest::from_json_str(r#"{"module": "m", "title": "Only a title"}"#).unwrap();
        assert!(request.into_sections().unwrap().is_empty());
    }
}
