//! Assignment set diffing
//!
//! The relationship screens (role permissions per platform, profile roles
//! per platform) edit a desired set of ids. Saving sends one assign call per
//! added id and one unassign call per removed id.

use std::collections::BTreeSet;

/// Ids to add and ids to remove, each in ascending order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentDiff<T> {
    pub to_assign: Vec<T>,
    pub to_unassign: Vec<T>,
}

impl<T> AssignmentDiff<T> {
    pub fn is_empty(&self) -> bool {
        self.to_assign.is_empty() && self.to_unassign.is_empty()
    }
}

impl<T> Default for AssignmentDiff<T> {
    fn default() -> Self {
        Self { to_assign: Vec::new(), to_unassign: Vec::new() }
    }
}

/// Compare the current assignment set against the desired one
///
/// Duplicates in either input are ignored.
pub fn diff<T: Ord + Clone>(current: &[T], desired: &[T]) -> AssignmentDiff<T> {
    let current: BTreeSet<&T> = current.iter().collect();
    let desired: BTreeSet<&T> = desired.iter().collect();

    AssignmentDiff {
        to_assign: desired.difference(&current).map(|id| (*id).clone()).collect(),
        to_unassign: current.difference(&desired).map(|id| (*id).clone()).collect(),
    }
}
