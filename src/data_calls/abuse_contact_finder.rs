//! The `abuse-contact-finder` data call
//!
//! Abuse contact information for an Internet number resource, plus the
//! responsible RIR, blocklist and special-purpose registry information, and
//! less/more specific prefixes. The contact data is best-effort; it can be
//! incorrect or missing.
//!
//! Reference: <https://stat.ripe.net/docs/data_api#abuse-contact-finder>

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;

use crate::client::RipeStat;
use crate::error::Result;
use crate::types::Resource;

pub(crate) const PATH: &str = "abuse-contact-finder";
pub(crate) const VERSION: &str = "1.2";

pub(crate) async fn fetch(client: &RipeStat, resource: Resource) -> Result<AbuseContacts> {
    let params = vec![
        ("preferred_version", VERSION.to_owned()),
        ("resource", resource.to_string()),
    ];

    let envelope = client.get(PATH, params).await?;
    Ok(serde_json::from_value(envelope.data)?)
}

/// A dedicated abuse contact (`abuse-c` per ripe-563).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AbuseContact {
    #[serde(default)]
    pub description: String,
    pub email: String,
    /// RIPE DB object key, e.g. `OPS4-RIPE`
    #[serde(default)]
    pub key: String,
}

/// Anti-abuse contact information.
///
/// When `abuse_c` is populated the extracted fields are left empty by the
/// server. The extracted/remark entries keep the server's free-form shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AntiAbuseContacts {
    #[serde(default)]
    pub abuse_c: Vec<AbuseContact>,
    #[serde(default)]
    pub emails: Vec<Value>,
    #[serde(default)]
    pub extracted_emails: Vec<Value>,
    #[serde(default)]
    pub objects_with_remarks: Vec<Value>,
}

/// Special-purpose registry information (e.g. private address space).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct GlobalNetworkInfo {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub source_url: String,
}

/// Matching autnum or inet(6)num object from the RIPE DB.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct HolderInfo {
    /// `netname` for IP queries, `as-name` for ASN queries
    #[serde(default)]
    pub name: String,
    /// Resource the object maps to (may differ from the input)
    #[serde(default)]
    pub resource: String,
}

/// Response of the abuse contact finder data call.
#[derive(Debug, Clone, Deserialize)]
pub struct AbuseContacts {
    pub query_time: NaiveDateTime,
    /// Resource the query was based on, echoed as a string
    pub resource: String,
    /// RIRs responsible for the queried resource
    #[serde(default)]
    pub authorities: Vec<String>,
    /// Blocklist entry counts, kept in the server's free-form shape
    #[serde(default)]
    pub blocklist_info: Vec<Value>,
    #[serde(default)]
    pub global_network_info: GlobalNetworkInfo,
    pub anti_abuse_contacts: AntiAbuseContacts,
    #[serde(default)]
    pub holder_info: HolderInfo,
    #[serde(default)]
    pub special_resources: Vec<Value>,
    /// Less specific prefixes/ranges, in the server's mixed notations
    /// (`193.0.0.0-193.0.23.255` or `193.0.0.0/16`)
    #[serde(default)]
    pub less_specifics: Vec<String>,
    #[serde(default)]
    pub more_specifics: Vec<String>,
}

impl AbuseContacts {
    /// The queried resource parsed back into its typed form.
    pub fn resource(&self) -> Result<Resource> {
        self.resource.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_data() -> serde_json::Value {
        json!({
            "query_time": "2021-04-23T16:11:00",
            "resource": "3333",
            "authorities": ["ripe"],
            "blocklist_info": [],
            "global_network_info": {
                "description": "Assigned by RIPE NCC",
                "source": "IANA 16-bit Autonomous System (AS) Numbers Registry",
                "source_url": "http://www.iana.org/assignments/as-numbers/as-numbers-1.csv",
                "name": "Assigned by RIPE NCC"
            },
            "anti_abuse_contacts": {
                "emails": [],
                "objects_with_remarks": [],
                "extracted_emails": [],
                "abuse_c": [
                    {
                        "description": "abuse-c",
                        "email": "abuse@ripe.net",
                        "key": "OPS4-RIPE"
                    }
                ]
            },
            "holder_info": {
                "name": "RIPE-NCC-AS - Reseaux IP Europeens Network Coordination Centre (RIPE NCC)",
                "resource": "3333"
            },
            "special_resources": [],
            "more_specifics": ["193.0.18.0-193.0.21.255", "193.0.0.0/16"],
            "less_specifics": ["193.0.0.0-193.0.255.255", "193.0.0.0/12"]
        })
    }

    #[test]
    fn decodes_recorded_payload() {
        let response: AbuseContacts = serde_json::from_value(sample_data()).unwrap();

        assert_eq!(response.authorities, vec!["ripe"]);
        assert_eq!(response.resource().unwrap(), Resource::Asn(3333));

        let abuse_c = &response.anti_abuse_contacts.abuse_c[0];
        assert_eq!(abuse_c.email, "abuse@ripe.net");
        assert_eq!(abuse_c.key, "OPS4-RIPE");

        assert!(response.holder_info.name.starts_with("RIPE-NCC-AS"));
        assert_eq!(response.global_network_info.name, "Assigned by RIPE NCC");
        assert_eq!(response.more_specifics.len(), 2);
        assert_eq!(response.less_specifics.len(), 2);
    }

    #[test]
    fn missing_optional_sections_default() {
        let data = json!({
            "query_time": "2021-04-23T16:11:00",
            "resource": "193.0.0.0/21",
            "anti_abuse_contacts": {}
        });

        let response: AbuseContacts = serde_json::from_value(data).unwrap();
        assert!(response.authorities.is_empty());
        assert!(response.anti_abuse_contacts.abuse_c.is_empty());
        assert_eq!(response.holder_info, HolderInfo::default());
        assert!(matches!(
            response.resource().unwrap(),
            Resource::Prefix(_)
        ));
    }
}
