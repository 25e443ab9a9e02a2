//! Mapping from taxon index to its [TaxonTable].

use crate::model::taxon_table::TaxonTable;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::ops::Index;

// =#========================================================================#=
// EVENTS BY TAXON
// =#========================================================================#=
/// All records of a log, grouped by taxon (vertex) index.
///
/// Built once by the [log parser](crate::eventlog) and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EventsByTaxon {
    tables: BTreeMap<usize, TaxonTable>,
}

impl EventsByTaxon {
    /// Returns the table of `taxon`, creating an empty one if needed.
    pub(crate) fn table_mut(&mut self, taxon: usize) -> &mut TaxonTable {
        self.tables.entry(taxon).or_default()
    }

    /// Returns the table of `taxon`, if any record of it was parsed.
    pub fn get(&self, taxon: usize) -> Option<&TaxonTable> {
        self.tables.get(&taxon)
    }

    /// Returns the number of taxa.
    pub fn num_taxa(&self) -> usize {
        self.tables.len()
    }

    /// Returns whether no taxon was parsed.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Returns the taxon indices in ascending order.
    pub fn taxon_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.tables.keys().copied()
    }

    /// Returns an iterator over `(taxon index, table)` in ascending order.
    pub fn iter(&self) -> btree_map::Iter<'_, usize, TaxonTable> {
        self.tables.iter()
    }

    /// Checks the column invariant of every table.
    pub fn is_consistent(&self) -> bool {
        self.tables.values().all(TaxonTable::is_consistent)
    }
}

impl Index<usize> for EventsByTaxon {
    type Output = TaxonTable;

    /// # Panics
    /// Panics if no table exists for `taxon`.
    fn index(&self, taxon: usize) -> &Self::Output {
        &self.tables[&taxon]
    }
}

impl<'a> IntoIterator for &'a EventsByTaxon {
    type Item = (&'a usize, &'a TaxonTable);
    type IntoIter = btree_map::Iter<'a, usize, TaxonTable>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}
