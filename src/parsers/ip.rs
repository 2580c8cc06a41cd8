//! IP allocation record parser.
//!
//! A single left-to-right pass over the lines. `NetRange` starts a new
//! network block; which entity later fields land on is decided by the
//! current section state. Legacy single-block responses (`inetnum` with no
//! `NetRange`) are collected into a fallback block that is used only when
//! no explicit range ever appeared.
//!
//! Missing fields are never an error here: an IP record degrades to
//! whatever the registry supplied, down to an empty network list.

use crate::model::{Contact, IpInfo, NetworkBlock};
use crate::parsers::push_line;

/// The nested block the scanner is currently inside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Network,
    Organization,
    Customer,
    Abuse,
    Technical,
    Routing,
}

pub(crate) fn parse(text: &str) -> IpInfo {
    let mut info = IpInfo::default();
    let mut current: Option<NetworkBlock> = None;
    let mut fallback = NetworkBlock::default();
    let mut section = Section::None;

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
            "netrange" => {
                if let Some(done) = current.take() {
                    info.networks.push(done);
                }
                current = Some(NetworkBlock {
                    range: value.to_string(),
                    ..Default::default()
                });
                section = Section::Network;
            }
            "inetnum" => fallback.range = value.to_string(),
            "cidr" => {
                if let Some(block) = current.as_mut() {
                    for cidr in value.split(',') {
                        let cidr = cidr.trim();
                        if !cidr.is_empty() {
                            block.cidr.push(cidr.to_string());
                        }
                    }
                }
                section = Section::Network;
            }
            "netname" => {
                if let Some(block) = current.as_mut() {
                    block.name = value.to_string();
                }
                section = Section::Network;
            }
            "nethandle" => {
                if let Some(block) = current.as_mut() {
                    block.handle = value.to_string();
                }
                section = Section::Network;
            }
            "parent" => {
                if let Some(block) = current.as_mut() {
                    block.parent = value.to_string();
                }
                section = Section::Network;
            }
            "nettype" => {
                if let Some(block) = current.as_mut() {
                    block.net_type = value.to_string();
                }
                section = Section::Network;
            }
            "originas" => {
                if let Some(block) = current.as_mut() {
                    block.origin_as = value.to_string();
                }
                section = Section::Network;
            }
            // Free-text organization summary on the network line itself,
            // distinct from the OrgName block; leaves the section alone.
            "organization" => match current.as_mut() {
                Some(block) => block.organization_name = value.to_string(),
                None => fallback.organization_name = value.to_string(),
            },
            "orgname" => {
                if let Some(block) = current.as_mut() {
                    let org = block.organization.get_or_insert_with(Contact::default);
                    org.organization = value.to_string();
                    section = Section::Organization;
                }
            }
            "orgid" => {
                if let Some(block) = current.as_mut() {
                    let org = block.organization.get_or_insert_with(Contact::default);
                    org.id = value.to_string();
                    section = Section::Organization;
                }
            }
            "custname" => {
                if let Some(block) = current.as_mut() {
                    let customer = block.customer.get_or_insert_with(Contact::default);
                    customer.name = value.to_string();
                    section = Section::Customer;
                }
            }
            "regdate" => {
                if let Some(block) = current.as_mut() {
                    match section {
                        Section::Organization => {
                            if let Some(org) = block.organization.as_mut() {
                                org.registration_date = value.to_string();
                            }
                        }
                        Section::Customer => {
                            if let Some(customer) = block.customer.as_mut() {
                                customer.registration_date = value.to_string();
                            }
                        }
                        _ => block.reg_date = value.to_string(),
                    }
                }
            }
            "updated" => {
                if let Some(block) = current.as_mut() {
                    match section {
                        Section::Organization => {
                            if let Some(org) = block.organization.as_mut() {
                                org.updated = value.to_string();
                            }
                        }
                        Section::Customer => {
                            if let Some(customer) = block.customer.as_mut() {
                                customer.updated = value.to_string();
                            }
                        }
                        _ => block.updated = value.to_string(),
                    }
                }
            }
            // The Ref line always terminates a nested organization or
            // customer block, so the section falls back to the network.
            "ref" => {
                if let Some(block) = current.as_mut() {
                    match section {
                        Section::Organization => {
                            if let Some(org) = block.organization.as_mut() {
                                org.referral_url = value.to_string();
                            }
                            section = Section::Network;
                        }
                        Section::Customer => {
                            if let Some(customer) = block.customer.as_mut() {
                                customer.referral_url = value.to_string();
                            }
                            section = Section::Network;
                        }
                        _ => block.ref_url = value.to_string(),
                    }
                }
            }
            "address" => {
                if let Some(contact) = section_contact(current.as_mut(), section) {
                    push_line(&mut contact.street, value);
                }
            }
            "city" => {
                if let Some(contact) = section_contact(current.as_mut(), section) {
                    contact.city = value.to_string();
                }
            }
            "stateprov" | "state" => {
                if let Some(contact) = section_contact(current.as_mut(), section) {
                    contact.province = value.to_string();
                }
            }
            "postalcode" | "postal-code" => {
                if let Some(contact) = section_contact(current.as_mut(), section) {
                    contact.postal_code = value.to_string();
                }
            }
            "country" => {
                if let Some(contact) = section_contact(current.as_mut(), section) {
                    contact.country = value.to_string();
                }
            }
            "comment" => {
                if let Some(block) = current.as_mut() {
                    match section {
                        Section::Organization => {
                            if let Some(org) = block.organization.as_mut() {
                                push_line(&mut org.comment, value);
                            }
                        }
                        Section::Customer => {
                            if let Some(customer) = block.customer.as_mut() {
                                push_line(&mut customer.comment, value);
                            }
                        }
                        _ => push_line(&mut block.comment, value),
                    }
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
                section = Section::None;
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
                section = Section::None;
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
                section = Section::None;
            }
            _ => {}
        }
    }

    if let Some(done) = current.take() {
        info.networks.push(done);
    }
    if info.networks.is_empty() && !fallback.range.is_empty() {
        info.networks.push(fallback);
    }

    for network in &mut info.networks {
        network.comment = network.comment.trim().to_string();
        if let Some(org) = network.organization.as_mut() {
            org.street = org.street.trim().to_string();
            org.comment = org.comment.trim().to_string();
        }
        if let Some(customer) = network.customer.as_mut() {
            customer.street = customer.street.trim().to_string();
            customer.comment = customer.comment.trim().to_string();
        }
    }

    info
}

/// Picks the nested contact that address fields belong to, based on the
/// current section. Address lines outside an organization or customer
/// block have nowhere to go and are dropped.
fn section_contact(current: Option<&mut NetworkBlock>, section: Section) -> Option<&mut Contact> {
    let block = current?;
    match section {
        Section::Organization => block.organization.as_mut(),
        Section::Customer => block.customer.as_mut(),
        _ => None,
    }
}
