//! Keys and values of annotation fields, and the table of their decoders.
//!
//! Every `key=value` token of an annotation group (apart from the leading
//! taxon index) is decoded according to its [FieldKey]. The set of known keys
//! is closed; unknown keys are kept verbatim as [FieldKey::Other]. To support
//! a new field, add a variant and its entry in [FieldKey::decoder].

use crate::model::event::Event;
use crate::parser::parsing_error::ParsingErrorType;
use serde::{Serialize, Serializer};
use std::fmt;

// =#========================================================================#=
// FIELD KEY
// =#========================================================================#=
/// Key of an annotation field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    /// `nd`: areas occupied at the vertex (end of its branch)
    Node,
    /// `pa`: areas occupied at the start of the branch
    Parent,
    /// `ch0`: areas inherited by the first daughter lineage
    Child0,
    /// `ch1`: areas inherited by the second daughter lineage
    Child1,
    /// `cs`: cladogenic state code
    CladoState,
    /// `bn`: index of the budding vertex
    BudNode,
    /// `ev`: events along the branch
    Events,
    /// Any other key, value kept as text
    Other(String),
}

/// Function decoding the raw value of a field.
pub type Decoder = fn(&str) -> Result<FieldValue, ParsingErrorType>;

impl FieldKey {
    /// Maps the short code used in the log to a key.
    pub fn from_code(code: &str) -> Self {
        match code {
            "nd" => FieldKey::Node,
            "pa" => FieldKey::Parent,
            "ch0" => FieldKey::Child0,
            "ch1" => FieldKey::Child1,
            "cs" => FieldKey::CladoState,
            "bn" => FieldKey::BudNode,
            "ev" => FieldKey::Events,
            other => FieldKey::Other(other.to_string()),
        }
    }

    /// Returns the short code used in the log.
    pub fn code(&self) -> &str {
        match self {
            FieldKey::Node => "nd",
            FieldKey::Parent => "pa",
            FieldKey::Child0 => "ch0",
            FieldKey::Child1 => "ch1",
            FieldKey::CladoState => "cs",
            FieldKey::BudNode => "bn",
            FieldKey::Events => "ev",
            FieldKey::Other(code) => code,
        }
    }

    /// Returns the decoder for values of this key.
    pub fn decoder(&self) -> Decoder {
        match self {
            FieldKey::Node | FieldKey::Parent | FieldKey::Child0 | FieldKey::Child1 => {
                decode_areas
            }
            FieldKey::CladoState => decode_code,
            FieldKey::BudNode => decode_int,
            FieldKey::Events => decode_events,
            FieldKey::Other(_) => decode_text,
        }
    }

    /// Decodes a raw value of this key.
    ///
    /// # Example
    /// ```
    /// use biogeolog::model::{FieldKey, FieldValue};
    ///
    /// let value = FieldKey::from_code("nd").decode("0110").unwrap();
    /// assert_eq!(value, FieldValue::Areas(vec![0, 1, 1, 0]));
    /// ```
    pub fn decode(&self, value: &str) -> Result<FieldValue, ParsingErrorType> {
        (self.decoder())(value)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for FieldKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

// ============================================================================
// Decoders (private)
// ============================================================================
fn decode_areas(value: &str) -> Result<FieldValue, ParsingErrorType> {
    value
        .chars()
        .map(|c| match c {
            '0' => Some(0),
            '1' => Some(1),
            _ => None,
        })
        .collect::<Option<Vec<u8>>>()
        .map(FieldValue::Areas)
        .ok_or_else(|| ParsingErrorType::InvalidAreas(value.to_string()))
}

fn decode_code(value: &str) -> Result<FieldValue, ParsingErrorType> {
    Ok(FieldValue::Code(value.to_string()))
}

fn decode_int(value: &str) -> Result<FieldValue, ParsingErrorType> {
    value
        .trim()
        .parse()
        .map(FieldValue::Int)
        .map_err(|_| ParsingErrorType::InvalidNumber(value.to_string()))
}

fn decode_events(value: &str) -> Result<FieldValue, ParsingErrorType> {
    Event::parse_list(value).map(FieldValue::Events)
}

fn decode_text(value: &str) -> Result<FieldValue, ParsingErrorType> {
    Ok(FieldValue::Text(value.to_string()))
}

// =#========================================================================#=
// FIELD VALUE
// =#========================================================================#=
/// A decoded annotation value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Presence (1) or absence (0) per area
    Areas(Vec<u8>),
    /// Cladogenic state code, e.g. `s`, `a`, `w`
    Code(String),
    /// Integer value
    Int(i64),
    /// Branch events
    Events(Vec<Event>),
    /// Value of an unknown key
    Text(String),
}

impl FieldValue {
    /// Returns the area bits if this is an [FieldValue::Areas].
    pub fn as_areas(&self) -> Option<&[u8]> {
        match self {
            FieldValue::Areas(bits) => Some(bits),
            _ => None,
        }
    }

    /// Returns the code if this is a [FieldValue::Code].
    pub fn as_code(&self) -> Option<&str> {
        match self {
            FieldValue::Code(code) => Some(code),
            _ => None,
        }
    }

    /// Returns the integer if this is a [FieldValue::Int].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the events if this is a [FieldValue::Events].
    pub fn as_events(&self) -> Option<&[Event]> {
        match self {
            FieldValue::Events(events) => Some(events),
            _ => None,
        }
    }

    /// Returns the text if this is a [FieldValue::Text].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    /// Renders the value the way it is written in the log.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Areas(bits) => f.write_str(&area_string(bits)),
            FieldValue::Code(code) => f.write_str(code),
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Events(events) => {
                f.write_str("{")?;
                for (i, event) in events.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{event}")?;
                }
                f.write_str("}")
            }
            FieldValue::Text(text) => f.write_str(text),
        }
    }
}

/// Renders area bits as a digit string, e.g. `[0, 1, 1]` as `"011"`.
pub fn area_string(bits: &[u8]) -> String {
    bits.iter().map(u8::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_through_keys() {
        for code in ["nd", "pa", "ch0", "ch1", "cs", "bn", "ev", "xyz"] {
            assert_eq!(FieldKey::from_code(code).code(), code);
        }
        assert_eq!(FieldKey::from_code("xyz"), FieldKey::Other("xyz".to_string()));
    }

    #[test]
    fn test_decode_table() {
        assert_eq!(
            FieldKey::Child1.decode("101").unwrap(),
            FieldValue::Areas(vec![1, 0, 1])
        );
        assert_eq!(
            FieldKey::CladoState.decode("NA").unwrap(),
            FieldValue::Code("NA".to_string())
        );
        assert_eq!(FieldKey::BudNode.decode("12").unwrap(), FieldValue::Int(12));
        assert_eq!(
            FieldKey::Other("foo".to_string()).decode("1,2").unwrap(),
            FieldValue::Text("1,2".to_string())
        );
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(
            FieldKey::Node.decode("01x").unwrap_err(),
            ParsingErrorType::InvalidAreas("01x".to_string())
        );
        assert_eq!(
            FieldKey::Child0.decode("55").unwrap_err(),
            ParsingErrorType::InvalidAreas("55".to_string())
        );
        assert_eq!(
            FieldKey::BudNode.decode("seven").unwrap_err(),
            ParsingErrorType::InvalidNumber("seven".to_string())
        );
    }

    #[test]
    fn test_display_matches_log_format() {
        let value = FieldKey::Events.decode("{{t:0.5,a:1,s:1,i:0}}").unwrap();
        assert_eq!(value.to_string(), "{{t:0.5,a:1,s:1,i:0}}");
        assert_eq!(FieldValue::Areas(vec![0, 1]).to_string(), "01");
    }
}
