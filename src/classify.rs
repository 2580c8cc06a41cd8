//! Record-type classification.
//!
//! Registries never label the kind of record they return, so the record
//! type is decided from signature field labels in the raw text. The check
//! order is fixed: AS before IP before the domain fallback, because some
//! IP allocation dumps mention AS-style labels incidentally and the AS
//! labels are the most specific.

/// The kind of record a WHOIS response describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    /// Autonomous-system record.
    Asn,
    /// IP network allocation record.
    Ip,
    /// Domain registration record (the default when nothing else matches).
    Domain,
}

const AS_LABELS: [&str; 3] = ["ASNumber:", "ASName:", "aut-num:"];
const IP_LABELS: [&str; 4] = ["NetRange:", "CIDR:", "inetnum:", "inet6num:"];

/// Decides which parser should handle the response text.
pub fn classify(text: &str) -> RecordType {
    if AS_LABELS.iter().any(|label| text.contains(label)) {
        RecordType::Asn
    } else if IP_LABELS.iter().any(|label| text.contains(label)) {
        RecordType::Ip
    } else {
        RecordType::Domain
    }
}
