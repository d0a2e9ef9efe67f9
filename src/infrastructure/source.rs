//! JSON record source.
//!
//! Accepts a plain array of records or the GraphQL response served by the
//! organization directory backend:
//!
//! ```json
//! {"data": {"allOrgTiers": [{"id": "..", "nameEn": "..", "tierLevel": 0,
//!   "owner": {"givenName": "..", "familyName": "..", "activeRoles": [{"titleEnglish": ".."}]},
//!   "parentOrganizationTier": null}]}}
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::domain::{OrgTierRecord, Owner};
use crate::infrastructure::traits::RecordSource;
use crate::infrastructure::{InfraError, InfraResult};

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordDocument {
    Records(Vec<OrgTierRecord>),
    Envelope { data: TierList },
    Bare(TierList),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TierList {
    all_org_tiers: Vec<GraphQlTier>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlTier {
    id: String,
    #[serde(default)]
    name_en: String,
    #[serde(default)]
    tier_level: i32,
    owner: GraphQlOwner,
    #[serde(default)]
    parent_organization_tier: Option<GraphQlRef>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlOwner {
    given_name: String,
    family_name: String,
    #[serde(default)]
    active_roles: Vec<GraphQlRole>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlRole {
    title_english: String,
}

#[derive(Deserialize)]
struct GraphQlRef {
    id: String,
}

impl From<GraphQlTier> for OrgTierRecord {
    fn from(tier: GraphQlTier) -> Self {
        let owner = Owner::new(tier.owner.given_name, tier.owner.family_name).with_titles(
            tier.owner
                .active_roles
                .into_iter()
                .map(|role| role.title_english),
        );
        OrgTierRecord {
            id: tier.id,
            name: tier.name_en,
            tier_level: tier.tier_level,
            owner,
            parent_id: tier.parent_organization_tier.map(|parent| parent.id),
        }
    }
}

/// Decode records from JSON text, keeping document order.
pub fn decode_records(json: &str) -> Result<Vec<OrgTierRecord>, serde_json::Error> {
    let records = match serde_json::from_str(json)? {
        RecordDocument::Records(records) => records,
        RecordDocument::Envelope { data } | RecordDocument::Bare(data) => {
            data.all_org_tiers.into_iter().map(OrgTierRecord::from).collect()
        }
    };
    Ok(records)
}

/// Reads records from a JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for JsonFileSource {
    fn fetch(&self) -> InfraResult<Vec<OrgTierRecord>> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| InfraError::io(format!("read {}", self.path.display()), e))?;
        let records = decode_records(&content).map_err(|source| InfraError::Decode {
            path: self.path.clone(),
            source,
        })?;
        debug!("fetched {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_graphql_envelope_when_decoding_then_maps_to_records() {
        let json = r#"{"data": {"allOrgTiers": [
            {"id": "a", "nameEn": "Office of the President", "tierLevel": 0,
             "owner": {"givenName": "Theresa", "familyName": "Tam",
                       "activeRoles": [{"titleEnglish": "President"}]},
             "parentOrganizationTier": null},
            {"id": "b", "nameEn": "Science Branch", "tierLevel": 1,
             "owner": {"givenName": "Ada", "familyName": "Lovelace", "activeRoles": []},
             "parentOrganizationTier": {"id": "a"}}
        ]}}"#;

        let records = decode_records(json).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Office of the President");
        assert_eq!(records[0].owner.titles, vec!["President".to_string()]);
        assert!(records[0].is_root());
        assert_eq!(records[1].parent_id.as_deref(), Some("a"));
        assert_eq!(records[1].tier_level, 1);
    }

    #[test]
    fn given_bare_tier_list_when_decoding_then_accepts_it() {
        let json = r#"{"allOrgTiers": [
            {"id": "a", "owner": {"givenName": "A", "familyName": "Root"}}
        ]}"#;
        let records = decode_records(json).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].is_root());
    }

    #[test]
    fn given_unrecognised_document_when_decoding_then_errors() {
        assert!(decode_records(r#"{"rows": []}"#).is_err());
    }
}
