//! Domain registration record parser.
//!
//! The scan is gated by a two-stage regex search for the domain name
//! itself: without one there is nothing to parse, and the failure is
//! classified by looking for the registry's "no match" phrasing. The line
//! scan then routes every labelled value either into the domain record
//! (via the canonical key table) or into one of five role contacts.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::dates;
use crate::error::{Result, WhoisParseError};
use crate::keys::{self, canonical_key, clear_key_name};
use crate::model::{Contact, DomainInfo, DomainRecord};

/// Primary search: a `domain`/`domain name` label followed by
/// `name.extension`.
static DOMAIN_WITH_EXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[?domain:?(\s*_?name)?\]?[\s.]*:?\s*([^\s,;@()]+)\.([^\s,;().]{2,})")
        .expect("invalid domain search regex")
});

/// Secondary search: a bare `name` with no extension, terminated by a
/// newline. Used by registries that print the label and name alone.
static DOMAIN_BARE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[?domain:?(\s*_?name)?\]?[\s.]*:?\s*([^\s,;@().]{2,})\n")
        .expect("invalid bare domain search regex")
});

/// Phrases registries use to say the queried object does not exist.
const NOT_FOUND_PHRASES: [&str; 11] = [
    "no match",
    "not found",
    "no data found",
    "no entries found",
    "no object found",
    "nothing found",
    "object does not exist",
    "not registered",
    "is available for registration",
    "status: available",
    "status: free",
];

/// Extension-specific "no match" signatures. Some registries echo the
/// queried name in their not-found banner, so a domain can be extracted
/// even though the registry found nothing.
static EXT_NOT_FOUND: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("br", "no match for"),
        ("ch", "we do not have an entry in our database"),
        ("com", "no match for"),
        ("de", "status: free"),
        ("ee", "domain not found"),
        ("eu", "status: available"),
        ("fr", "no entries found"),
        ("it", "status: available"),
        ("jp", "no match!!"),
        ("net", "no match for"),
        ("nl", "is free"),
        ("uk", "no match for"),
    ]
    .into_iter()
    .collect()
});

/// Raw values that mean DNSSEC is enabled for the zone.
const DNSSEC_ENABLED: [&str; 6] = [
    "signed",
    "signeddelegation",
    "signed delegation",
    "active",
    "yes",
    "true",
];

pub(crate) fn parse(text: &str) -> Result<DomainInfo> {
    let (name, extension) = search_domain(text);
    if name.is_empty() {
        return Err(not_found_kind(text));
    }
    if !extension.is_empty() && is_ext_not_found(text, &extension) {
        return Err(WhoisParseError::DomainNotFound);
    }

    let mut domain = DomainRecord {
        name: to_punycode(&name),
        extension: to_punycode(&extension),
        ..Default::default()
    };
    let mut registrar = Contact::default();
    let mut registrant = Contact::default();
    let mut administrative = Contact::default();
    let mut technical = Contact::default();
    let mut billing = Contact::default();

    let lines: Vec<&str> = text.lines().collect();
    let mut i = 0;
    while i < lines.len() {
        let mut line = lines[i].trim().to_string();
        i += 1;
        if line.len() < 5 || !line.contains(':') {
            continue;
        }
        if matches!(line.as_bytes()[0], b'-' | b'*' | b'%' | b'>' | b';') {
            continue;
        }

        // A label ending in a bare colon holds its values on the following
        // lines; absorb them until the next labelled line.
        if line.ends_with(':') {
            while i < lines.len() && !lines[i].contains(':') {
                line.push_str(lines[i].trim());
                line.push(',');
                i += 1;
            }
            line = line.trim_matches(',').to_string();
        }

        let Some((label, rest)) = line.split_once(':') else {
            continue;
        };
        let label = label.trim();
        let value = rest.trim().trim_matches(':').trim();
        if value.is_empty() {
            continue;
        }

        match canonical_key(label) {
            Some(keys::DOMAIN_ID) => domain.id = value.to_string(),
            Some(keys::DOMAIN_NAME) => {
                if domain.domain.is_empty() {
                    let value = value.split(' ').next().unwrap_or(value);
                    domain.domain = value.to_lowercase();
                    domain.punycode = to_punycode(&domain.domain);
                }
            }
            Some(keys::DOMAIN_STATUS) => {
                domain.status.extend(value.split(',').map(str::to_string));
            }
            Some(keys::DOMAIN_DNSSEC) => {
                if !domain.dnssec {
                    domain.dnssec = is_dnssec_enabled(value);
                }
            }
            Some(keys::WHOIS_SERVER) => {
                if domain.whois_server.is_empty() {
                    domain.whois_server = value.to_string();
                }
            }
            Some(keys::NAME_SERVERS) => {
                domain.name_servers.extend(value.split(',').map(str::to_string));
            }
            Some(keys::CREATED_DATE) => {
                if domain.created_date.is_empty() {
                    domain.created_date = value.to_string();
                    domain.created_date_in_time = dates::parse_date(value);
                }
            }
            Some(keys::UPDATED_DATE) => {
                if domain.updated_date.is_empty() {
                    domain.updated_date = value.to_string();
                    domain.updated_date_in_time = dates::parse_date(value);
                }
            }
            Some(keys::EXPIRED_DATE) => {
                if domain.expiration_date.is_empty() {
                    domain.expiration_date = value.to_string();
                    domain.expiration_date_in_time = dates::parse_date(value);
                }
            }
            Some(keys::REFERRAL_URL) => registrar.referral_url = value.to_string(),
            _ => {
                // Everything else is a contact-role field. Unqualified
                // labels get a role or field suffix inferred first.
                let mut label = clear_key_name(label);
                if !label.contains(' ') {
                    if label == "registrar" {
                        label.push_str(" name");
                    } else if domain.extension == "dk" {
                        // DK whois lists registrant fields unqualified.
                        label.insert_str(0, "registrant ");
                    } else {
                        label.push_str(" organization");
                    }
                }
                let Some((role, field)) = label.split_once(' ') else {
                    continue;
                };
                let field = format!("registrant {field}");
                let contact = match role {
                    "registrar" | "registration" => &mut registrar,
                    "registrant" | "holder" => &mut registrant,
                    "admin" | "administrative" => &mut administrative,
                    "tech" | "technical" => &mut technical,
                    "bill" | "billing" => &mut billing,
                    _ => continue,
                };
                write_contact_field(contact, &field, value);
            }
        }
    }

    domain.status = fix_status(domain.status);
    domain.name_servers = fix_name_servers(domain.name_servers);

    Ok(DomainInfo {
        domain,
        registrar: registrar.into_option(),
        registrant: registrant.into_option(),
        administrative: administrative.into_option(),
        technical: technical.into_option(),
        billing: billing.into_option(),
    })
}

/// Writes one re-normalized contact field. `field` is the cleaned label
/// with its role token replaced by `registrant`, so one table lookup
/// serves all five roles.
fn write_contact_field(contact: &mut Contact, field: &str, value: &str) {
    match canonical_key(field) {
        Some(keys::CONTACT_ID) => contact.id = value.to_string(),
        Some(keys::CONTACT_NAME) => {
            if contact.name.is_empty() {
                contact.name = value.to_string();
            }
        }
        Some(keys::CONTACT_ORGANIZATION) => {
            if contact.organization.is_empty() {
                contact.organization = value.to_string();
            }
        }
        Some(keys::CONTACT_STREET) => {
            // Repeated street lines are comma-joined in domain records.
            if contact.street.is_empty() {
                contact.street = value.to_string();
            } else {
                contact.street.push_str(", ");
                contact.street.push_str(value);
            }
        }
        Some(keys::CONTACT_CITY) => contact.city = value.to_string(),
        Some(keys::CONTACT_PROVINCE) => contact.province = value.to_string(),
        Some(keys::CONTACT_POSTAL_CODE) => contact.postal_code = value.to_string(),
        Some(keys::CONTACT_COUNTRY) => contact.country = value.to_string(),
        Some(keys::CONTACT_PHONE) => contact.phone = value.to_string(),
        Some(keys::CONTACT_PHONE_EXT) => contact.phone_ext = value.to_string(),
        Some(keys::CONTACT_FAX) => contact.fax = value.to_string(),
        Some(keys::CONTACT_FAX_EXT) => contact.fax_ext = value.to_string(),
        Some(keys::CONTACT_EMAIL) => contact.email = value.to_lowercase(),
        _ => {}
    }
}

/// Finds the domain name and extension anywhere in the raw text.
/// Returns empty strings when nothing matches.
fn search_domain(text: &str) -> (String, String) {
    if let Some(caps) = DOMAIN_WITH_EXT.captures(text) {
        let name = caps
            .get(2)
            .map_or("", |m| m.as_str())
            .trim()
            .trim_start_matches('"');
        let extension = caps
            .get(3)
            .map_or("", |m| m.as_str())
            .trim()
            .trim_end_matches('"');
        if !name.is_empty() {
            return (name.to_lowercase(), extension.to_lowercase());
        }
    }

    if let Some(caps) = DOMAIN_BARE.captures(text) {
        let name = caps.get(2).map_or("", |m| m.as_str()).trim();
        if !name.is_empty() {
            return (name.to_lowercase(), String::new());
        }
    }

    (String::new(), String::new())
}

/// Distinguishes a registry's positive "no match" answer from text the
/// parser simply cannot recognize.
fn not_found_kind(text: &str) -> WhoisParseError {
    let lower = text.to_lowercase();
    if NOT_FOUND_PHRASES.iter().any(|phrase| lower.contains(phrase)) {
        WhoisParseError::DomainNotFound
    } else {
        WhoisParseError::Unrecognized
    }
}

fn is_ext_not_found(text: &str, extension: &str) -> bool {
    EXT_NOT_FOUND
        .get(extension)
        .is_some_and(|signature| text.to_lowercase().contains(signature))
}

fn is_dnssec_enabled(value: &str) -> bool {
    DNSSEC_ENABLED.contains(&value.trim().to_lowercase().as_str())
}

fn to_punycode(name: &str) -> String {
    idna::domain_to_ascii(name).unwrap_or_else(|_| name.to_string())
}

/// Keeps the status code itself (registries append the EPP reference URL
/// after a space) and drops repeats, preserving first-occurrence order.
fn fix_status(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let Some(status) = value.split_whitespace().next() else {
            continue;
        };
        if !out.iter().any(|seen| seen == status) {
            out.push(status.to_string());
        }
    }
    out
}

/// Lowercases name servers, strips trailing root dots and any glue
/// addresses after the hostname, and drops repeats preserving order.
fn fix_name_servers(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let lowered = value.to_lowercase();
        let Some(host) = lowered.split_whitespace().next() else {
            continue;
        };
        let host = host.trim_end_matches('.');
        if !host.is_empty() && !out.iter().any(|seen| seen == host) {
            out.push(host.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERISIGN_RESPONSE: &str = r#"
   Domain Name: EXAMPLE.COM
   Registry Domain ID: 2336799_DOMAIN_COM-VRSN
   Registrar WHOIS Server: whois.verisign-grs.com
   Registrar URL: http://res-dom.iana.org
   Updated Date: 2023-08-14T07:01:38Z
   Creation Date: 1995-08-14T04:00:00Z
   Registry Expiry Date: 2024-08-13T04:00:00Z
   Registrar: RESERVED-Internet Assigned Numbers Authority
   Domain Status: clientDeleteProhibited https://icann.org/epp#clientDeleteProhibited
   Domain Status: clientTransferProhibited https://icann.org/epp#clientTransferProhibited
   Domain Status: clientTransferProhibited https://icann.org/epp#clientTransferProhibited
   Name Server: A.IANA-SERVERS.NET
   Name Server: B.IANA-SERVERS.NET
   Name Server: a.iana-servers.net
   DNSSEC: signedDelegation
"#;

    #[test]
    fn test_verisign_domain_record() {
        let info = parse(VERISIGN_RESPONSE).unwrap();
        let domain = &info.domain;

        assert_eq!(domain.name, "example");
        assert_eq!(domain.extension, "com");
        assert_eq!(domain.domain, "example.com");
        assert_eq!(domain.punycode, "example.com");
        assert_eq!(domain.id, "2336799_DOMAIN_COM-VRSN");
        assert_eq!(domain.whois_server, "whois.verisign-grs.com");
        assert!(domain.dnssec);

        assert_eq!(domain.created_date, "1995-08-14T04:00:00Z");
        assert!(domain.created_date_in_time.is_some());
        assert_eq!(domain.updated_date, "2023-08-14T07:01:38Z");
        assert_eq!(domain.expiration_date, "2024-08-13T04:00:00Z");
        assert!(domain.expiration_date_in_time.is_some());
    }

    #[test]
    fn test_status_and_name_servers_deduplicated_in_order() {
        let info = parse(VERISIGN_RESPONSE).unwrap();
        assert_eq!(
            info.domain.status,
            vec!["clientDeleteProhibited", "clientTransferProhibited"]
        );
        assert_eq!(
            info.domain.name_servers,
            vec!["a.iana-servers.net", "b.iana-servers.net"]
        );
    }

    #[test]
    fn test_registrar_contact() {
        let info = parse(VERISIGN_RESPONSE).unwrap();
        let registrar = info.registrar.unwrap();
        assert_eq!(registrar.name, "RESERVED-Internet Assigned Numbers Authority");
        assert_eq!(registrar.referral_url, "http://res-dom.iana.org");
        assert!(info.registrant.is_none());
        assert!(info.billing.is_none());
    }

    #[test]
    fn test_continuation_lines_are_absorbed() {
        let raw = "Domain name:\n    example.co.uk\n\nRegistrant:\n    Example Ltd\n\nName servers:\n    ns1.example.co.uk\n    ns2.example.co.uk\n\nRegistered on: 01-Jan-2020\n";
        let info = parse(raw).unwrap();

        assert_eq!(info.domain.domain, "example.co.uk");
        assert_eq!(
            info.domain.name_servers,
            vec!["ns1.example.co.uk", "ns2.example.co.uk"]
        );
        assert_eq!(info.domain.created_date, "01-Jan-2020");
        assert!(info.domain.created_date_in_time.is_some());
        assert_eq!(info.registrant.unwrap().organization, "Example Ltd");
    }

    #[test]
    fn test_dk_unqualified_labels_are_registrant_fields() {
        let raw = "\
Domain:               example.dk
Registered:           1999-05-10
Expires:              2025-03-31
Registrant
Handle:               ABCD1234-DK
Name:                 Example ApS
Address:              Testvej 1
Address:              Bygning B
City:                 Copenhagen
Country:              DK

Nameservers
Hostname:             ns1.example.dk
Hostname:             ns2.example.dk
";
        let info = parse(raw).unwrap();
        assert_eq!(info.domain.extension, "dk");
        assert_eq!(info.domain.created_date, "1999-05-10");

        let registrant = info.registrant.unwrap();
        assert_eq!(registrant.id, "ABCD1234-DK");
        assert_eq!(registrant.name, "Example ApS");
        // The domain scanner joins repeated street lines with a comma.
        assert_eq!(registrant.street, "Testvej 1, Bygning B");
        assert_eq!(registrant.city, "Copenhagen");
        assert_eq!(registrant.country, "DK");

        assert_eq!(
            info.domain.name_servers,
            vec!["ns1.example.dk", "ns2.example.dk"]
        );
    }

    #[test]
    fn test_role_contact_fields() {
        let raw = "\
Domain Name: example.com
Registrant Name: Jane Holder
Registrant Email: JANE@EXAMPLE.COM
Admin Name: Alice Admin
Admin Email: ALICE@example.com
Tech Name: Bob Tech
Billing Phone: +1.5551234567
Billing Phone Ext: 42
";
        let info = parse(raw).unwrap();
        assert_eq!(info.registrant.as_ref().unwrap().name, "Jane Holder");
        assert_eq!(info.registrant.unwrap().email, "jane@example.com");

        let admin = info.administrative.unwrap();
        assert_eq!(admin.name, "Alice Admin");
        assert_eq!(admin.email, "alice@example.com");

        assert_eq!(info.technical.unwrap().name, "Bob Tech");

        let billing = info.billing.unwrap();
        assert_eq!(billing.phone, "+1.5551234567");
        assert_eq!(billing.phone_ext, "42");
    }

    #[test]
    fn test_contact_with_single_field_is_present() {
        let raw = "Domain Name: example.com\nAdmin Email: admin@EXAMPLE.COM\n";
        let info = parse(raw).unwrap();

        let admin = info.administrative.unwrap();
        assert_eq!(admin.email, "admin@example.com");
        assert!(admin.name.is_empty());
        assert!(info.registrant.is_none());
        assert!(info.technical.is_none());
    }

    #[test]
    fn test_banner_lines_are_skipped() {
        let raw = "\
% This is the RIPE Database query service.
% The objects are in RPSL format.
Domain Name: example.com
- Note: something that looks: like a field
Registrar: Good Registrar
";
        let info = parse(raw).unwrap();
        assert_eq!(info.registrar.unwrap().name, "Good Registrar");
    }

    #[test]
    fn test_first_domain_name_wins_and_is_truncated() {
        let raw = "Domain Name: EXAMPLE.COM (primary)\nDomain Name: other.net\n";
        let info = parse(raw).unwrap();
        assert_eq!(info.domain.domain, "example.com");
        assert_eq!(info.domain.punycode, "example.com");
    }

    #[test]
    fn test_idn_is_punycoded() {
        let raw = "Domain Name: bücher.de\nRegistrar: IDN Registrar\n";
        let info = parse(raw).unwrap();
        assert_eq!(info.domain.domain, "bücher.de");
        assert_eq!(info.domain.punycode, "xn--bcher-kva.de");
    }

    #[test]
    fn test_not_found_response() {
        let err = parse("No match for \"EXAMPLE-UNREGISTERED\"\n").unwrap_err();
        assert_eq!(err, WhoisParseError::DomainNotFound);
    }

    #[test]
    fn test_ext_specific_not_found_with_echoed_name() {
        // The registry echoes the queried name, so a domain is extracted,
        // but the .com not-found signature still applies.
        let err = parse("No match for domain \"EXAMPLE-UNREGISTERED.COM\".\n").unwrap_err();
        assert_eq!(err, WhoisParseError::DomainNotFound);
    }

    #[test]
    fn test_unrecognized_response() {
        let err = parse("completely unrelated text with no labels at all\n").unwrap_err();
        assert_eq!(err, WhoisParseError::Unrecognized);
    }

    #[test]
    fn test_search_domain_bare_name() {
        let (name, extension) = search_domain("domain: example\n");
        assert_eq!(name, "example");
        assert!(extension.is_empty());
    }

    #[test]
    fn test_dnssec_values() {
        assert!(is_dnssec_enabled("signedDelegation"));
        assert!(is_dnssec_enabled("yes"));
        assert!(is_dnssec_enabled("Active"));
        assert!(!is_dnssec_enabled("unsigned"));
        assert!(!is_dnssec_enabled("no"));
    }
}
