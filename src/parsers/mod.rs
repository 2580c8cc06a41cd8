//! The three per-type line scanners.
//!
//! Each parser makes a single pass over the raw text, owns the record it is
//! building, and shares only the immutable key and date tables. Domain
//! records route unknown labels through the key normalizer into role
//! contacts; IP and AS records track an explicit section state that decides
//! which entity a field belongs to.

pub(crate) mod asn;
pub(crate) mod domain;
pub(crate) mod ip;

/// Appends a continuation value to a newline-joined multi-line field
/// (RIR-style `Address:` and `Comment:` runs).
pub(crate) fn push_line(field: &mut String, value: &str) {
    if !field.is_empty() {
        field.push('\n');
    }
    field.push_str(value);
}
