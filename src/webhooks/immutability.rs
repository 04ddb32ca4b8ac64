//! Immutable-field enforcement on update operations.
//!
//! Checked on updates only, never on create: an immutable field may be set
//! freely at creation and never changed afterwards.

use std::collections::BTreeSet;
use std::fmt::Display;

use crate::webhooks::error::FieldError;

/// Reject a change to an immutable scalar field.
pub fn check_immutable<T: PartialEq + Display>(
    old: &T,
    new: &T,
    path: &str,
) -> Option<FieldError> {
    (old != new).then(|| {
        FieldError::forbidden(
            path,
            format!("field is immutable: cannot be changed from \"{old}\" to \"{new}\""),
        )
    })
}

/// Reject a change to an immutable collection, compared as a set.
///
/// Reordering an unchanged membership is not a change.
pub fn check_immutable_set(old: &[String], new: &[String], path: &str) -> Option<FieldError> {
    let old: BTreeSet<&str> = old.iter().map(String::as_str).collect();
    let new: BTreeSet<&str> = new.iter().map(String::as_str).collect();
    (old != new).then(|| FieldError::forbidden(path, "cannot be changed"))
}
