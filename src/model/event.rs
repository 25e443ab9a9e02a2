//! Dispersal/extinction events recorded along a branch.
//!
//! The `ev` field of an annotation group lists the anagenetic events of the
//! branch above a vertex, e.g. `ev={{t:0.25,a:1.5,s:1,i:2},{t:0.75,a:0.5,s:0,i:2}}`.

use crate::parser::defs::{
    EVENT_BRACES, EVENT_FIELD_SEPARATOR, EVENT_FIELDS, EVENT_PREFIX_LEN,
};
use crate::parser::parsing_error::ParsingErrorType;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// =#========================================================================#=
// EVENT
// =#========================================================================#=
/// A single area gain or loss on a branch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Event {
    /// Relative position of the event along the branch
    pub time: f64,
    /// Absolute age of the event
    pub age: f64,
    /// New state of the area: 0 = loss, 1 = gain
    pub state: u8,
    /// Index of the area that changed
    pub index: usize,
}

impl Event {
    /// Decodes an event list as written into the `ev` field.
    ///
    /// All braces are removed, the remainder is split on commas and every
    /// four consecutive tokens form one event. Each token is read after its
    /// two-character type prefix (`t:`, `a:`, `s:`, `i:`); the prefix itself is
    /// not checked. An empty list (`{}`) yields no events.
    ///
    /// # Errors
    /// Returns [ParsingErrorType::InvalidEventList] if the number of tokens is
    /// not a multiple of four or a token does not hold a number.
    ///
    /// # Example
    /// ```
    /// use biogeolog::model::Event;
    ///
    /// let events = Event::parse_list("{{t:0.5,a:2.25,s:1,i:3}}").unwrap();
    /// assert_eq!(events[0], Event { time: 0.5, age: 2.25, state: 1, index: 3 });
    /// assert!(Event::parse_list("{}").unwrap().is_empty());
    /// ```
    pub fn parse_list(value: &str) -> Result<Vec<Event>, ParsingErrorType> {
        let stripped: String = value.chars().filter(|c| !EVENT_BRACES.contains(c)).collect();
        let tokens: Vec<&str> = stripped
            .split(EVENT_FIELD_SEPARATOR)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect();

        if tokens.len() % EVENT_FIELDS != 0 {
            return Err(ParsingErrorType::InvalidEventList(format!(
                "{} fields is not a multiple of {}",
                tokens.len(),
                EVENT_FIELDS
            )));
        }

        tokens
            .chunks_exact(EVENT_FIELDS)
            .map(|fields| {
                Ok(Event {
                    time: parse_event_field(fields[0], "time")?,
                    age: parse_event_field(fields[1], "age")?,
                    state: parse_event_field(fields[2], "state")?,
                    index: parse_event_field(fields[3], "index")?,
                })
            })
            .collect()
    }
}

/// Parses the value of an event token after its type prefix.
fn parse_event_field<T: FromStr>(token: &str, name: &str) -> Result<T, ParsingErrorType> {
    token
        .get(EVENT_PREFIX_LEN..)
        .and_then(|value| value.parse().ok())
        .ok_or_else(|| ParsingErrorType::InvalidEventList(format!("invalid {name} '{token}'")))
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{t:{},a:{},s:{},i:{}}}",
            self.time, self.age, self.state, self.index
        )
    }
}
