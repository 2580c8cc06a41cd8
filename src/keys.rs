//! Key-name normalization.
//!
//! Registries spell the same field dozens of ways ("Creation Date",
//! "Registered on", "created", "commencement date", ...). Labels are first
//! cleaned of punctuation and case, then looked up in a static table that
//! maps every known spelling to a canonical key. The table is built once on
//! first use and never mutated, so concurrent parses can read it freely.

use std::collections::HashMap;

use once_cell::sync::Lazy;

pub const DOMAIN_ID: &str = "domain_id";
pub const DOMAIN_NAME: &str = "domain_name";
pub const DOMAIN_STATUS: &str = "domain_status";
pub const DOMAIN_DNSSEC: &str = "domain_dnssec";
pub const WHOIS_SERVER: &str = "whois_server";
pub const NAME_SERVERS: &str = "name_servers";
pub const CREATED_DATE: &str = "created_date";
pub const UPDATED_DATE: &str = "updated_date";
pub const EXPIRED_DATE: &str = "expired_date";
pub const REFERRAL_URL: &str = "referral_url";

pub const CONTACT_ID: &str = "registrant_id";
pub const CONTACT_NAME: &str = "registrant_name";
pub const CONTACT_ORGANIZATION: &str = "registrant_organization";
pub const CONTACT_STREET: &str = "registrant_street";
pub const CONTACT_CITY: &str = "registrant_city";
pub const CONTACT_PROVINCE: &str = "registrant_state_province";
pub const CONTACT_POSTAL_CODE: &str = "registrant_postal_code";
pub const CONTACT_COUNTRY: &str = "registrant_country";
pub const CONTACT_PHONE: &str = "registrant_phone";
pub const CONTACT_PHONE_EXT: &str = "registrant_phone_ext";
pub const CONTACT_FAX: &str = "registrant_fax";
pub const CONTACT_FAX_EXT: &str = "registrant_fax_ext";
pub const CONTACT_EMAIL: &str = "registrant_email";

/// Cleaned label spelling -> canonical key.
static KEY_TABLE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let entries: &[(&str, &str)] = &[
        ("domain id", DOMAIN_ID),
        ("registry domain id", DOMAIN_ID),
        ("domain", DOMAIN_NAME),
        ("domain name", DOMAIN_NAME),
        ("domainname", DOMAIN_NAME),
        ("status", DOMAIN_STATUS),
        ("state", DOMAIN_STATUS),
        ("domain status", DOMAIN_STATUS),
        ("registration status", DOMAIN_STATUS),
        ("dnssec", DOMAIN_DNSSEC),
        ("domain dnssec", DOMAIN_DNSSEC),
        ("dnssec status", DOMAIN_DNSSEC),
        ("signing key", DOMAIN_DNSSEC),
        ("whois", WHOIS_SERVER),
        ("whois server", WHOIS_SERVER),
        ("registrar whois server", WHOIS_SERVER),
        ("name server", NAME_SERVERS),
        ("name servers", NAME_SERVERS),
        ("nameserver", NAME_SERVERS),
        ("nameservers", NAME_SERVERS),
        ("nserver", NAME_SERVERS),
        ("dns", NAME_SERVERS),
        ("dns servers", NAME_SERVERS),
        ("domain servers in listed order", NAME_SERVERS),
        ("domain nameservers", NAME_SERVERS),
        ("host name", NAME_SERVERS),
        ("hostname", NAME_SERVERS),
        ("created", CREATED_DATE),
        ("created on", CREATED_DATE),
        ("created date", CREATED_DATE),
        ("create date", CREATED_DATE),
        ("creation date", CREATED_DATE),
        ("creation time", CREATED_DATE),
        ("registered", CREATED_DATE),
        ("registered on", CREATED_DATE),
        ("registered date", CREATED_DATE),
        ("registration date", CREATED_DATE),
        ("registration time", CREATED_DATE),
        ("domain registration date", CREATED_DATE),
        ("commencement date", CREATED_DATE),
        ("record created", CREATED_DATE),
        ("updated", UPDATED_DATE),
        ("update date", UPDATED_DATE),
        ("updated date", UPDATED_DATE),
        ("update time", UPDATED_DATE),
        ("modified", UPDATED_DATE),
        ("last modified", UPDATED_DATE),
        ("last updated", UPDATED_DATE),
        ("last update", UPDATED_DATE),
        ("last updated on", UPDATED_DATE),
        ("last updated date", UPDATED_DATE),
        ("changed", UPDATED_DATE),
        ("expire", EXPIRED_DATE),
        ("expires", EXPIRED_DATE),
        ("expires on", EXPIRED_DATE),
        ("expire date", EXPIRED_DATE),
        ("expired date", EXPIRED_DATE),
        ("expiry date", EXPIRED_DATE),
        ("expiration date", EXPIRED_DATE),
        ("expiration time", EXPIRED_DATE),
        ("registry expiry date", EXPIRED_DATE),
        ("registrar registration expiration date", EXPIRED_DATE),
        ("paid till", EXPIRED_DATE),
        ("valid until", EXPIRED_DATE),
        ("renewal date", EXPIRED_DATE),
        ("record expires", EXPIRED_DATE),
        ("referral url", REFERRAL_URL),
        ("registrar url", REFERRAL_URL),
        ("url", REFERRAL_URL),
        ("registrant id", CONTACT_ID),
        ("registrant iana id", CONTACT_ID),
        ("registrant handle", CONTACT_ID),
        ("registrant name", CONTACT_NAME),
        ("registrant contact name", CONTACT_NAME),
        ("registrant person", CONTACT_NAME),
        ("registrant organization", CONTACT_ORGANIZATION),
        ("registrant org", CONTACT_ORGANIZATION),
        ("registrant organisation", CONTACT_ORGANIZATION),
        ("registrant contact organisation", CONTACT_ORGANIZATION),
        ("registrant company", CONTACT_ORGANIZATION),
        ("registrant street", CONTACT_STREET),
        ("registrant street1", CONTACT_STREET),
        ("registrant address", CONTACT_STREET),
        ("registrant address1", CONTACT_STREET),
        ("registrant addr", CONTACT_STREET),
        ("registrant city", CONTACT_CITY),
        ("registrant state", CONTACT_PROVINCE),
        ("registrant province", CONTACT_PROVINCE),
        ("registrant state province", CONTACT_PROVINCE),
        ("registrant stateprovince", CONTACT_PROVINCE),
        ("registrant postal code", CONTACT_POSTAL_CODE),
        ("registrant postalcode", CONTACT_POSTAL_CODE),
        ("registrant zip", CONTACT_POSTAL_CODE),
        ("registrant zip code", CONTACT_POSTAL_CODE),
        ("registrant country", CONTACT_COUNTRY),
        ("registrant country economy", CONTACT_COUNTRY),
        ("registrant phone", CONTACT_PHONE),
        ("registrant phone number", CONTACT_PHONE),
        ("registrant tel", CONTACT_PHONE),
        ("registrant telephone", CONTACT_PHONE),
        ("registrant phone ext", CONTACT_PHONE_EXT),
        ("registrant fax", CONTACT_FAX),
        ("registrant fax no", CONTACT_FAX),
        ("registrant facsimile", CONTACT_FAX),
        ("registrant fax ext", CONTACT_FAX_EXT),
        ("registrant email", CONTACT_EMAIL),
        ("registrant e mail", CONTACT_EMAIL),
        ("registrant mail", CONTACT_EMAIL),
        ("registrant contact email", CONTACT_EMAIL),
    ];
    entries.iter().copied().collect()
});

/// Strips the punctuation and case variance out of a raw field label:
/// parenthesized trailers are cut, separators become spaces, and the result
/// is lowercased.
pub fn clear_key_name(name: &str) -> String {
    let name = match name.find('(') {
        Some(pos) => &name[..pos],
        None => name,
    };

    let mut cleaned = String::with_capacity(name.len());
    for ch in name.chars() {
        match ch {
            '-' | '_' | '/' | '\\' => cleaned.push(' '),
            '\'' | '.' | '[' | ']' => {}
            _ => cleaned.extend(ch.to_lowercase()),
        }
    }

    // Collapse runs of spaces left behind by removed separators.
    let mut out = String::with_capacity(cleaned.len());
    for word in cleaned.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Maps a raw field label to its canonical key, if the spelling is known.
pub fn canonical_key(name: &str) -> Option<&'static str> {
    KEY_TABLE.get(clear_key_name(name).as_str()).copied()
}
