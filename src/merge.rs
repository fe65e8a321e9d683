//! Folding of parsed reports into a single accumulator.
//!
//! Entities are matched level by level on their identity key:
//!   package → name, class → name, method → name (signature is ignored),
//!   line → number.
//! An unmatched incoming entity is appended with its whole subtree. A matched
//! one is merged into the existing entity, which keeps its own attributes;
//! only line hit counts are ever combined. Rate fields are left stale here
//! and rebuilt by [`crate::metrics::recalculate`].

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use log::debug;

use crate::model::{Class, Line, Method, Package, Report};

/// An entity matched across reports by key. `absorb` folds a matching
/// incoming entity into `self`.
trait Mergeable {
    type Key: Hash + Eq;

    fn key(&self) -> Self::Key;

    fn absorb(&mut self, incoming: Self);
}

impl Mergeable for Package {
    type Key = String;

    fn key(&self) -> String {
        self.name.clone()
    }

    fn absorb(&mut self, incoming: Self) {
        merge_keyed(&mut self.classes, incoming.classes);
    }
}

impl Mergeable for Class {
    type Key = String;

    fn key(&self) -> String {
        self.name.clone()
    }

    fn absorb(&mut self, incoming: Self) {
        merge_keyed(&mut self.methods, incoming.methods);
        merge_keyed(&mut self.lines, incoming.lines);
    }
}

impl Mergeable for Method {
    type Key = String;

    fn key(&self) -> String {
        self.name.clone()
    }

    fn absorb(&mut self, incoming: Self) {
        merge_keyed(&mut self.lines, incoming.lines);
    }
}

impl Mergeable for Line {
    type Key = u32;

    fn key(&self) -> u32 {
        self.number
    }

    fn absorb(&mut self, incoming: Self) {
        self.hits = self.hits.saturating_add(incoming.hits);
    }
}

/// Merge `incoming` into `existing`, preserving the order of first
/// appearance. Entities appended during this call are registered in the
/// index too, so a key repeated inside `incoming` folds onto one entry.
fn merge_keyed<T: Mergeable>(existing: &mut Vec<T>, incoming: Vec<T>) {
    let mut index: HashMap<T::Key, usize> = HashMap::with_capacity(existing.len());
    for (i, item) in existing.iter().enumerate() {
        index.entry(item.key()).or_insert(i);
    }

    for item in incoming {
        let key = item.key();
        match index.get(&key).copied() {
            Some(i) => existing[i].absorb(item),
            None => {
                index.insert(key, existing.len());
                existing.push(item);
            }
        }
    }
}

fn merge_sources(existing: &mut Vec<String>, incoming: Vec<String>) {
    let mut seen: HashSet<String> = existing.iter().cloned().collect();
    for source in incoming {
        if seen.insert(source.clone()) {
            existing.push(source);
        }
    }
}

/// Merge `incoming` into `accumulator` in place.
///
/// Never fails: an entity missing from the accumulator is simply added.
/// Report-level metric fields of the accumulator are not touched.
pub fn merge(accumulator: &mut Report, incoming: Report) {
    debug!(
        "Merging report with {} sources and {} packages",
        incoming.sources.len(),
        incoming.packages.len()
    );
    merge_sources(&mut accumulator.sources, incoming.sources);
    merge_keyed(&mut accumulator.packages, incoming.packages);
}
