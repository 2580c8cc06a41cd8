//! Result data model.
//!
//! Scalar fields use empty strings for "not present in the source text" and
//! are skipped during serialization, so serialized output only carries the
//! fields a registry actually returned. Structural absence (a contact that
//! never appeared, a date that did not parse) uses `Option`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Parsed WHOIS information. Exactly one branch is populated per
/// successful parse, chosen by the classifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhoisInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<DomainInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<IpInfo>,
    #[serde(rename = "as", skip_serializing_if = "Option::is_none")]
    pub asn: Option<AsInfo>,
}

/// Domain branch: the domain record plus up to five role contacts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainInfo {
    pub domain: DomainRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrar: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrant: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrative: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing: Option<Contact>,
}

/// Registration details for a domain name.
///
/// `name`/`extension` come from the regex search over the raw text;
/// `domain`/`punycode` come from the scanned `Domain Name` field. Dates keep
/// the registry's verbatim spelling next to an optional parsed timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainRecord {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub domain: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub punycode: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub extension: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub whois_server: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub name_servers: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub dnssec: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub created_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date_in_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub updated_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date_in_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub expiration_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date_in_time: Option<DateTime<Utc>>,
}

/// IP branch: every allocation range encountered, plus the top-level
/// abuse/technical/routing contacts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpInfo {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub networks: Vec<NetworkBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abuse: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing: Option<Contact>,
}

/// One allocated network range. CIDR prefixes keep their order of
/// appearance, duplicates included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkBlock {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub range: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cidr: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub handle: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub parent: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub net_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub origin_as: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub organization_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Contact>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reg_date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub updated: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
    #[serde(rename = "ref", skip_serializing_if = "String::is_empty")]
    pub ref_url: String,
}

/// AS branch. `number` holds only the numeric portion, with any leading
/// "AS" prefix stripped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsInfo {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub number: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub handle: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reg_date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub updated: String,
    #[serde(rename = "ref", skip_serializing_if = "String::is_empty")]
    pub ref_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abuse: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical: Option<Contact>,
}

/// Contact details for a registrar, registrant, organization, or role
/// contact. A contact with every field empty is never included in a result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub organization: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub street: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub city: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub province: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub postal_code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub country: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone_ext: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fax: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fax_ext: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub referral_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub registration_date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub updated: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

impl Contact {
    /// True when no field was ever written. Used to decide whether the
    /// contact appears in the result at all.
    pub fn is_empty(&self) -> bool {
        *self == Contact::default()
    }

    /// Wraps the contact in `Some` only if at least one field is non-empty.
    pub(crate) fn into_option(self) -> Option<Contact> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_contact_detection() {
        let contact = Contact::default();
        assert!(contact.is_empty());
        assert!(contact.into_option().is_none());

        let contact = Contact {
            email: "abuse@example.com".to_string(),
            ..Default::default()
        };
        assert!(!contact.is_empty());
        assert!(contact.into_option().is_some());
    }

    #[test]
    fn test_serialization_omits_empty_fields() {
        let info = WhoisInfo {
            asn: Some(AsInfo {
                number: "7132".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };

        let json = serde_json::to_value(&info).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("domain"));
        assert!(!obj.contains_key("ip"));

        let asn = obj["as"].as_object().unwrap();
        assert_eq!(asn["number"], "7132");
        assert!(!asn.contains_key("name"));
        assert!(!asn.contains_key("organization"));
    }

    #[test]
    fn test_deserialization_fills_missing_fields() {
        let info: WhoisInfo = serde_json::from_str(r#"{"as":{"number":"7132"}}"#).unwrap();
        let asn = info.asn.unwrap();
        assert_eq!(asn.number, "7132");
        assert!(asn.handle.is_empty());
        assert!(asn.organization.is_none());
    }
}
