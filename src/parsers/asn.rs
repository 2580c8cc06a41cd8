//! Autonomous-system record parser.
//!
//! Same single-pass scanning discipline as the IP parser, with one
//! difference inherited from observed registry dumps: the role-contact
//! `Ref` line does not reset the section, so attribution after a role
//! block relies on the next `Handle` line appearing first. AS number and
//! handle are mandatory; everything else is optional.

use crate::error::{Result, WhoisParseError};
use crate::model::{AsInfo, Contact};
use crate::parsers::push_line;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Organization,
    Abuse,
    Routing,
    Technical,
}

pub(crate) fn parse(text: &str) -> Result<AsInfo> {
    let mut info = AsInfo::default();
    let mut section = Section::None;
    let mut has_number = false;
    let mut has_handle = false;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.len() < 5 || line.starts_with('#') || !line.contains(':') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim();

        match key.as_str() {
            "asnumber" | "as-number" | "as number" | "aut-num" => {
                info.number = value.strip_prefix("AS").unwrap_or(value).to_string();
                has_number = true;
            }
            "asname" | "as-name" | "as name" => info.name = value.to_string(),
            "ashandle" | "as-handle" | "as handle" => {
                info.handle = value.to_string();
                has_handle = true;
            }
            "regdate" | "registration-date" | "created" => {
                match org_if_active(&mut info.organization, section) {
                    Some(org) => org.registration_date = value.to_string(),
                    None => info.reg_date = value.to_string(),
                }
            }
            "updated" | "last-modified" => {
                match org_if_active(&mut info.organization, section) {
                    Some(org) => org.updated = value.to_string(),
                    None => info.updated = value.to_string(),
                }
            }
            "ref" | "reference" => {
                match org_if_active(&mut info.organization, section) {
                    Some(org) => org.referral_url = value.to_string(),
                    None => info.ref_url = value.to_string(),
                }
            }
            "orgname" | "org-name" | "organization" | "owner" => {
                info.organization = Some(Contact {
                    organization: value.to_string(),
                    ..Default::default()
                });
                section = Section::Organization;
            }
            "orgid" | "org-id" => {
                if let Some(org) = org_if_active(&mut info.organization, section) {
                    org.id = value.to_string();
                }
            }
            "address" => {
                if let Some(org) = org_if_active(&mut info.organization, section) {
                    push_line(&mut org.street, value);
                }
            }
            "city" => {
                if let Some(org) = org_if_active(&mut info.organization, section) {
                    org.city = value.to_string();
                }
            }
            "stateprov" | "state" => {
                if let Some(org) = org_if_active(&mut info.organization, section) {
                    org.province = value.to_string();
                }
            }
            "postalcode" | "postal-code" => {
                if let Some(org) = org_if_active(&mut info.organization, section) {
                    org.postal_code = value.to_string();
                }
            }
            "country" => {
                if let Some(org) = org_if_active(&mut info.organization, section) {
                    org.country = value.to_string();
                }
            }
            "comment" => {
                if let Some(org) = org_if_active(&mut info.organization, section) {
                    push_line(&mut org.comment, value);
                }
            }
            "orgabusehandle" | "org-abuse-handle" => {
                info.abuse = Some(Contact {
                    id: value.to_string(),
                    ..Default::default()
                });
                section = Section::Abuse;
            }
            "orgabusename" | "org-abuse-name" => {
                if section == Section::Abuse {
                    if let Some(contact) = info.abuse.as_mut() {
                        contact.name = value.to_string();
                    }
                }
            }
            "orgabusephone" | "org-abuse-phone" => {
                if section == Section::Abuse {
                    if let Some(contact) = info.abuse.as_mut() {
                        contact.phone = value.to_string();
                    }
                }
            }
            "orgabuseemail" | "org-abuse-email" => {
                if section == Section::Abuse {
                    if let Some(contact) = info.abuse.as_mut() {
                        contact.email = value.to_string();
                    }
                }
            }
            "orgabuseref" | "org-abuse-ref" => {
                if section == Section::Abuse {
                    if let Some(contact) = info.abuse.as_mut() {
                        contact.referral_url = value.to_string();
                    }
                }
            }
            "orgroutinghandle" | "org-routing-handle" => {
                info.routing = Some(Contact {
                    id: value.to_string(),
                    ..Default::default()
                });
                section = Section::Routing;
            }
            "orgroutingname" | "org-routing-name" => {
                if section == Section::Routing {
                    if let Some(contact) = info.routing.as_mut() {
                        contact.name = value.to_string();
                    }
                }
            }
            "orgroutingphone" | "org-routing-phone" => {
                if section == Section::Routing {
                    if let Some(contact) = info.routing.as_mut() {
                        contact.phone = value.to_string();
                    }
                }
            }
            "orgroutingemail" | "org-routing-email" => {
                if section == Section::Routing {
                    if let Some(contact) = info.routing.as_mut() {
                        contact.email = value.to_string();
                    }
                }
            }
            "orgroutingref" | "org-routing-ref" => {
                if section == Section::Routing {
                    if let Some(contact) = info.routing.as_mut() {
                        contact.referral_url = value.to_string();
                    }
                }
            }
            "orgtechhandle" | "org-tech-handle" => {
                info.technical = Some(Contact {
                    id: value.to_string(),
                    ..Default::default()
                });
                section = Section::Technical;
            }
            "orgtechname" | "org-tech-name" => {
                if section == Section::Technical {
                    if let Some(contact) = info.technical.as_mut() {
                        contact.name = value.to_string();
                    }
                }
            }
            "orgtechphone" | "org-tech-phone" => {
                if section == Section::Technical {
                    if let Some(contact) = info.technical.as_mut() {
                        contact.phone = value.to_string();
                    }
                }
            }
            "orgtechemail" | "org-tech-email" => {
                if section == Section::Technical {
                    if let Some(contact) = info.technical.as_mut() {
                        contact.email = value.to_string();
                    }
                }
            }
            "orgtechref" | "org-tech-ref" => {
                if section == Section::Technical {
                    if let Some(contact) = info.technical.as_mut() {
                        contact.referral_url = value.to_string();
                    }
                }
            }
            _ => {}
        }
    }

    if !has_number {
        return Err(WhoisParseError::AsNumberMissing);
    }
    if !has_handle {
        return Err(WhoisParseError::AsHandleMissing);
    }

    if let Some(org) = info.organization.as_mut() {
        org.street = org.street.trim().to_string();
        org.comment = org.comment.trim().to_string();
    }

    Ok(info)
}

/// The organization contact, but only while the scanner is inside the
/// organization block. Outside of it the same labels belong to the AS
/// record itself (or are dropped).
fn org_if_active(org: &mut Option<Contact>, section: Section) -> Option<&mut Contact> {
    if section == Section::Organization {
        org.as_mut()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARIN_AS_RESPONSE: &str = "\
# ARIN WHOIS data and services are subject to the Terms of Use
# available at: https://www.arin.net/resources/registry/whois/tou/
#
# Copyright 1997-2024, American Registry for Internet Numbers, Ltd.
#

ASNumber:       7132
ASName:         SBIS-AS
ASHandle:       AS7132
RegDate:        1996-09-13
Updated:        2018-07-18
Ref:            https://rdap.arin.net/registry/autnum/7132


OrgName:        AT&T Corp.
OrgId:          AC-3280
Address:        7277 164th Ave NE
Address:        Attn: IP Management
City:           Redmond
StateProv:      WA
PostalCode:     98052
Country:        US
RegDate:        2018-03-05
Updated:        2024-05-28
Comment:        For policy abuse issues contact abuse@att.net
Comment:        For all subpoena, Internet, court order related matters and emergency requests contact
Comment:        11760 US Highway 1
Comment:        North Palm Beach, FL 33408
Comment:        Main Number: 800-635-6840
Comment:        Fax: 888-938-4715
Ref:            https://rdap.arin.net/registry/entity/AC-3280


OrgAbuseHandle: ABUSE7-ARIN
OrgAbuseName:   abuse
OrgAbusePhone:  +1-919-319-8167
OrgAbuseEmail:  abuse@att.net
OrgAbuseRef:    https://rdap.arin.net/registry/entity/ABUSE7-ARIN

OrgRoutingHandle: ROUTI59-ARIN
OrgRoutingName:   Routing POC
OrgRoutingPhone:  +1-999-999-9999
OrgRoutingEmail:  routing@cbbtier3.att.net
OrgRoutingRef:    https://rdap.arin.net/registry/entity/ROUTI59-ARIN

OrgTechHandle: ZS44-ARIN
OrgTechName:   IPAdmin-ATT Internet Services
OrgTechPhone:  +1-888-510-5545
OrgTechEmail:  ipadmin@semail.att.com
OrgTechRef:    https://rdap.arin.net/registry/entity/ZS44-ARIN
";

    #[test]
    fn test_as_record_fields() {
        let info = parse(ARIN_AS_RESPONSE).unwrap();

        // The "AS" prefix never appears in the parsed number.
        assert_eq!(info.number, "7132");
        assert_eq!(info.name, "SBIS-AS");
        assert_eq!(info.handle, "AS7132");
        assert_eq!(info.reg_date, "1996-09-13");
        assert_eq!(info.updated, "2018-07-18");
        assert_eq!(info.ref_url, "https://rdap.arin.net/registry/autnum/7132");
    }

    #[test]
    fn test_organization_block() {
        let info = parse(ARIN_AS_RESPONSE).unwrap();
        let org = info.organization.as_ref().unwrap();

        assert_eq!(org.organization, "AT&T Corp.");
        assert_eq!(org.id, "AC-3280");
        assert_eq!(org.street, "7277 164th Ave NE\nAttn: IP Management");
        assert_eq!(org.city, "Redmond");
        assert_eq!(org.province, "WA");
        assert_eq!(org.postal_code, "98052");
        assert_eq!(org.country, "US");
        assert_eq!(org.registration_date, "2018-03-05");
        assert_eq!(org.updated, "2024-05-28");
        assert_eq!(
            org.comment,
            "For policy abuse issues contact abuse@att.net\n\
             For all subpoena, Internet, court order related matters and emergency requests contact\n\
             11760 US Highway 1\n\
             North Palm Beach, FL 33408\n\
             Main Number: 800-635-6840\n\
             Fax: 888-938-4715"
        );
        assert_eq!(org.referral_url, "https://rdap.arin.net/registry/entity/AC-3280");
    }

    #[test]
    fn test_role_contacts() {
        let info = parse(ARIN_AS_RESPONSE).unwrap();

        let abuse = info.abuse.as_ref().unwrap();
        assert_eq!(abuse.id, "ABUSE7-ARIN");
        assert_eq!(abuse.name, "abuse");
        assert_eq!(abuse.phone, "+1-919-319-8167");
        assert_eq!(abuse.email, "abuse@att.net");
        assert_eq!(abuse.referral_url, "https://rdap.arin.net/registry/entity/ABUSE7-ARIN");

        let routing = info.routing.as_ref().unwrap();
        assert_eq!(routing.id, "ROUTI59-ARIN");
        assert_eq!(routing.name, "Routing POC");
        assert_eq!(routing.phone, "+1-999-999-9999");
        assert_eq!(routing.email, "routing@cbbtier3.att.net");

        let technical = info.technical.as_ref().unwrap();
        assert_eq!(technical.id, "ZS44-ARIN");
        assert_eq!(technical.name, "IPAdmin-ATT Internet Services");
        assert_eq!(technical.email, "ipadmin@semail.att.com");
    }

    #[test]
    fn test_ripe_style_labels() {
        let raw = "\
aut-num:        AS3333
as-name:        RIPE-NCC-AS
as-handle:      AS3333-RIPE
owner:          RIPE Network Coordination Centre
created:        2002-08-21
last-modified:  2018-01-22
";
        let info = parse(raw).unwrap();
        assert_eq!(info.number, "3333");
        assert_eq!(info.name, "RIPE-NCC-AS");
        assert_eq!(info.handle, "AS3333-RIPE");
        // created/last-modified after the owner line belong to the
        // organization block.
        let org = info.organization.unwrap();
        assert_eq!(org.organization, "RIPE Network Coordination Centre");
        assert_eq!(org.registration_date, "2002-08-21");
        assert_eq!(org.updated, "2018-01-22");
    }

    #[test]
    fn test_missing_number_is_distinct_error() {
        let raw = "ASName: TEST-AS\nASHandle: AS99999\n";
        assert_eq!(parse(raw).unwrap_err(), WhoisParseError::AsNumberMissing);
    }

    #[test]
    fn test_missing_handle_is_distinct_error() {
        let raw = "ASNumber: 99999\nASName: TEST-AS\n";
        assert_eq!(parse(raw).unwrap_err(), WhoisParseError::AsHandleMissing);
    }

    #[test]
    fn test_invalid_text_fails() {
        assert!(parse("This is not a valid AS WHOIS response").is_err());
    }
}
