//! Parsing of raw WHOIS responses into structured records.
//!
//! Registries answer lookups with loosely structured text whose field
//! names, section layouts, and continuation conventions differ per
//! registry. This crate recognizes whether a response describes a domain,
//! an IP network allocation, or an autonomous system, and extracts the
//! semantically equivalent fields into one normalized [`WhoisInfo`].
//!
//! The crate does no I/O: it consumes text a transport already fetched
//! and returns an in-memory record. Parsing is synchronous, deterministic,
//! and shares no mutable state, so calls may run concurrently.
//!
//! ```
//! let raw = "Domain Name: example.com\nRegistrar: Example Registrar, Inc.\n";
//! let info = whois_parser::parse(raw)?;
//!
//! let domain = info.domain.expect("domain record");
//! assert_eq!(domain.domain.domain, "example.com");
//! # Ok::<(), whois_parser::WhoisParseError>(())
//! ```

mod classify;
mod dates;
mod error;
mod keys;
mod model;
mod parsers;

use tracing::debug;

pub use classify::{classify, RecordType};
pub use dates::parse_date;
pub use error::{Result, WhoisParseError};
pub use model::{AsInfo, Contact, DomainInfo, DomainRecord, IpInfo, NetworkBlock, WhoisInfo};

/// Parses a raw WHOIS response into a structured record.
///
/// The response text is classified first; exactly one branch of the
/// returned [`WhoisInfo`] is populated according to that decision. IP
/// records never fail on missing fields; domain and AS records fail with
/// the corresponding [`WhoisParseError`] when the mandatory parts are
/// absent.
pub fn parse(text: &str) -> Result<WhoisInfo> {
    let record_type = classify(text);
    debug!(?record_type, len = text.len(), "parsing whois response");

    match record_type {
        RecordType::Asn => {
            let asn = parsers::asn::parse(text)?;
            Ok(WhoisInfo {
                asn: Some(asn),
                ..Default::default()
            })
        }
        RecordType::Ip => Ok(WhoisInfo {
            ip: Some(parsers::ip::parse(text)),
            ..Default::default()
        }),
        RecordType::Domain => {
            let domain = parsers::domain::parse(text)?;
            Ok(WhoisInfo {
                domain: Some(domain),
                ..Default::default()
            })
        }
    }
}
