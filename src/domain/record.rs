//! Input records: one organization tier with its owner.

use serde::{Deserialize, Serialize};

/// Person owning an organization tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub given_name: String,
    pub family_name: String,
    /// Active role titles, most relevant first
    #[serde(default)]
    pub titles: Vec<String>,
}

impl Owner {
    pub fn new(given_name: impl Into<String>, family_name: impl Into<String>) -> Self {
        Self {
            given_name: given_name.into(),
            family_name: family_name.into(),
            titles: Vec::new(),
        }
    }

    pub fn with_titles<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.titles = titles.into_iter().map(Into::into).collect();
        self
    }

    /// Card title: given and family name joined by a single space.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}

/// Flat, read-only organization tier record.
///
/// Records reference their parent by id; exactly one record in a
/// well-formed set has no parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgTierRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tier_level: i32,
    pub owner: Owner,
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl OrgTierRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        owner: Owner,
        parent_id: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tier_level: 0,
            owner,
            parent_id: parent_id.map(str::to_string),
        }
    }

    pub fn with_tier_level(mut self, tier_level: i32) -> Self {
        self.tier_level = tier_level;
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_owner_when_display_name_then_joins_given_and_family() {
        let owner = Owner::new("Ada", "Lovelace");
        assert_eq!(owner.display_name(), "Ada Lovelace");
    }

    #[test]
    fn given_camel_case_json_when_deserializing_then_maps_fields() {
        let json = r#"{
            "id": "7",
            "name": "Science Division",
            "tierLevel": 3,
            "owner": { "givenName": "Grace", "familyName": "Hopper", "titles": ["Director"] },
            "parentId": "2"
        }"#;
        let record: OrgTierRecord = serde_json::from_str(json).expect("decode record");
        assert_eq!(record.tier_level, 3);
        assert_eq!(record.parent_id.as_deref(), Some("2"));
        assert_eq!(record.owner.titles, vec!["Director".to_string()]);
        assert!(!record.is_root());
    }

    #[test]
    fn given_missing_parent_field_when_deserializing_then_is_root() {
        let json = r#"{ "id": "1", "owner": { "givenName": "A", "familyName": "Root" } }"#;
        let record: OrgTierRecord = serde_json::from_str(json).expect("decode record");
        assert!(record.is_root());
        assert!(record.name.is_empty());
    }
}
