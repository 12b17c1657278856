//! Raw map elements as exported for one hall.

use serde::{Deserialize, Deserializer, Serialize};

use super::HallId;

/// `TYPE` value marking an element as a booth; everything else is structural.
pub const BOOTH_ELEMENT_TYPE: i64 = 0;

/// One element of a hall map: a booth or a structural shape (wall, stairs, ...).
///
/// Field names follow the exporter's upper-case JSON keys. Numeric fields are
/// accepted both as numbers and as numeric strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapElement {
    /// Element identifier
    #[serde(rename = "ID", deserialize_with = "lenient_u64")]
    pub id: u64,
    /// Hall this element belongs to
    #[serde(rename = "MAPID", deserialize_with = "lenient_u32")]
    pub map_id: HallId,
    /// Left edge in raster pixels
    #[serde(rename = "X", deserialize_with = "lenient_f64")]
    pub x: f64,
    /// Top edge in raster pixels
    #[serde(rename = "Y", deserialize_with = "lenient_f64")]
    pub y: f64,
    /// Width in raster pixels
    #[serde(rename = "W", deserialize_with = "lenient_f64")]
    pub w: f64,
    /// Height in raster pixels
    #[serde(rename = "H", deserialize_with = "lenient_f64")]
    pub h: f64,
    /// Pipe-delimited x coordinates of a detailed outline
    #[serde(rename = "XCOORDS", default, skip_serializing_if = "Option::is_none")]
    pub x_coords: Option<String>,
    /// Pipe-delimited y coordinates of a detailed outline
    #[serde(rename = "YCOORDS", default, skip_serializing_if = "Option::is_none")]
    pub y_coords: Option<String>,
    /// Element type, see [`BOOTH_ELEMENT_TYPE`]
    #[serde(rename = "TYPE", default, deserialize_with = "lenient_i64")]
    pub kind: i64,
    /// Booth label (e.g. "1.E211")
    #[serde(rename = "STANDID", default, skip_serializing_if = "Option::is_none")]
    pub stand_id: Option<String>,
    /// Free-form element name
    #[serde(rename = "NAME", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl MapElement {
    /// Creates a rectangular booth element without detailed coordinates.
    #[must_use]
    pub fn booth(id: u64, map_id: HallId, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            id,
            map_id,
            x,
            y,
            w,
            h,
            x_coords: None,
            y_coords: None,
            kind: BOOTH_ELEMENT_TYPE,
            stand_id: None,
            name: None,
        }
    }

    /// Sets the booth label.
    #[must_use]
    pub fn with_stand_id(mut self, stand_id: impl Into<String>) -> Self {
        self.stand_id = Some(stand_id.into());
        self
    }

    /// Sets the element name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the detailed outline coordinate lists.
    #[must_use]
    pub fn with_coords(mut self, x_coords: impl Into<String>, y_coords: impl Into<String>) -> Self {
        self.x_coords = Some(x_coords.into());
        self.y_coords = Some(y_coords.into());
        self
    }

    /// Whether this element is a booth (as opposed to a structural shape).
    #[must_use]
    pub const fn is_booth(&self) -> bool {
        self.kind == BOOTH_ELEMENT_TYPE
    }

    /// The label a stand built from this element is known by.
    ///
    /// Stand id wins over name; blank values count as absent.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.stand_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or_else(|| self.name.as_deref().map(str::trim).filter(|s| !s.is_empty()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    Text(String),
}

fn number_from<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom("number out of range")),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("not a number: {s:?}"))),
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    number_from(deserializer)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = number_from(deserializer)?;
    if value < 0.0 || value.fract() != 0.0 {
        return Err(serde::de::Error::custom(format!("not an identifier: {value}")));
    }
    Ok(value as u64)
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_u64(deserializer)?;
    u32::try_from(value).map_err(|_| serde::de::Error::custom(format!("map id too large: {value}")))
}

#[allow(clippy::cast_possible_truncation)]
fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = number_from(deserializer)?;
    if value.fract() != 0.0 {
        return Err(serde::de::Error::custom(format!("not an integer: {value}")));
    }
    Ok(value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_element_with_numbers() {
        let json = r#"{"ID":7,"MAPID":1,"X":5,"Y":5,"W":2,"H":3,"TYPE":0,"STANDID":"1.E211"}"#;
        let element: MapElement = serde_json::from_str(json).unwrap();

        assert_eq!(element.id, 7);
        assert_eq!(element.map_id, 1);
        assert!((element.w - 2.0).abs() < f64::EPSILON);
        assert!(element.is_booth());
        assert_eq!(element.label(), Some("1.E211"));
        assert!(element.x_coords.is_none());
    }

    #[test]
    fn test_parse_element_with_numeric_strings() {
        let json = r#"{"ID":"8","MAPID":"2","X":"1.5","Y":"2","W":"3","H":"4","TYPE":"1",
            "XCOORDS":"0|10|10|0","YCOORDS":"0|0|10|10","NAME":"Stairs"}"#;
        let element: MapElement = serde_json::from_str(json).unwrap();

        assert_eq!(element.id, 8);
        assert!((element.x - 1.5).abs() < f64::EPSILON);
        assert_eq!(element.kind, 1);
        assert!(!element.is_booth());
        assert_eq!(element.x_coords.as_deref(), Some("0|10|10|0"));
    }

    #[test]
    fn test_type_defaults_to_booth() {
        let json = r#"{"ID":1,"MAPID":1,"X":0,"Y":0,"W":1,"H":1}"#;
        let element: MapElement = serde_json::from_str(json).unwrap();
        assert!(element.is_booth());
    }

    #[test]
    fn test_rejects_garbage_position() {
        let json = r#"{"ID":1,"MAPID":1,"X":"left","Y":0,"W":1,"H":1}"#;
        assert!(serde_json::from_str::<MapElement>(json).is_err());
    }

    #[test]
    fn test_label_prefers_stand_id() {
        let element = MapElement::booth(1, 1, 0.0, 0.0, 1.0, 1.0)
            .with_stand_id("A1")
            .with_name("Lounge");
        assert_eq!(element.label(), Some("A1"));

        let element = MapElement::booth(1, 1, 0.0, 0.0, 1.0, 1.0)
            .with_stand_id("  ")
            .with_name("Lounge");
        assert_eq!(element.label(), Some("Lounge"));

        let element = MapElement::booth(1, 1, 0.0, 0.0, 1.0, 1.0);
        assert_eq!(element.label(), None);
    }
}
