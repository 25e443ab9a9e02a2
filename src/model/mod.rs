//! Data model for decoded character-history logs.
//!
//! # Representation
//! A log is decoded into [EventsByTaxon], which maps each taxon (vertex) index
//! to a [TaxonTable]. A table is column-oriented:
//!
//! | Column | Type | Source |
//! |--------|------|--------|
//! | iteration | `u64` | first column of the row |
//! | posterior, likelihood, prior | `f64` | columns 2–4 of the row |
//! | one per [FieldKey] | `Option<FieldValue>` | annotation group of the vertex |
//!
//! # Field decoding
//! Annotation values are decoded by the decoder registered for their
//! [FieldKey]; see [field] for the table of known keys.

pub mod event;
pub mod events_by_taxon;
pub mod field;
pub mod score;
pub mod taxon_table;

pub use event::Event;
pub use events_by_taxon::EventsByTaxon;
pub use field::{FieldKey, FieldValue, area_string};
pub use score::{SampleScores, ScoreField};
pub use taxon_table::TaxonTable;
