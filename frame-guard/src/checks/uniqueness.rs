//! Row index uniqueness check.

use std::collections::{HashMap, HashSet};

use crate::error::{CheckKind, Result, ValidationFailure, ViolationReport};
use crate::table::Table;
use crate::value::Label;

/// Asserts that the row index contains no duplicate labels.
///
/// The failure report lists each duplicated label once, in first-occurrence
/// order.
pub fn unique_index(table: &Table) -> Result<&Table> {
    let mut counts: HashMap<&Label, usize> = HashMap::new();
    for label in table.index() {
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut duplicates = Vec::new();
    let mut reported: HashSet<&Label> = HashSet::new();
    for label in table.index() {
        if counts[label] > 1 && reported.insert(label) {
            duplicates.push(label.clone());
        }
    }

    if duplicates.is_empty() {
        Ok(table)
    } else {
        Err(ValidationFailure::new(CheckKind::UniqueIndex, ViolationReport::Duplicates(duplicates))
            .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{int_column, table_of, table_with_index};

    #[test]
    fn unique_labels_pass() {
        let table = table_of(vec![("a", int_column(vec![Some(1), Some(2)]))]);
        assert!(unique_index(&table).is_ok());
    }

    #[test]
    fn duplicates_are_reported_once_each() {
        let table = table_with_index(
            vec!["a", "a", "b", "b", "c"],
            vec![("x", int_column(vec![Some(1), Some(2), Some(3), Some(4), Some(5)]))],
        );
        let error = unique_index(&table).unwrap_err();
        match error.as_validation().unwrap().report() {
            ViolationReport::Duplicates(labels) => {
                assert_eq!(labels, &vec![Label::from("a"), Label::from("b")]);
            }
            other => panic!("unexpected report {other:?}"),
        }
    }
}
