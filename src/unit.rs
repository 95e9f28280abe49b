//! Source unit descriptions exchanged with the indexing system.

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{XrefError, XrefResult};

/// One logical group of documents scanned together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct SourceUnit {
    pub name: String,
    #[serde(rename = "Type")]
    pub unit_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub repo: String,
    /// Document paths relative to the scan root, slash separated.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub files: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub dir: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum UnitEnvelope {
    Many(Option<Vec<SourceUnit>>),
    One(SourceUnit),
}

/// Decodes either a JSON array of units or a single unit object.
pub fn decode_units(input: &[u8]) -> XrefResult<Vec<SourceUnit>> {
    let envelope: UnitEnvelope =
        serde_json::from_slice(input).map_err(|source| XrefError::MalformedUnits { source })?;
    Ok(match envelope {
        UnitEnvelope::Many(units) => units.unwrap_or_default(),
        UnitEnvelope::One(unit) => vec![unit],
    })
}

/// Exactly one unit is graphed per invocation.
pub fn single_unit(units: Vec<SourceUnit>) -> XrefResult<SourceUnit> {
    let count = units.len();
    let mut units = units.into_iter();
    match (units.next(), count) {
        (Some(unit), 1) => Ok(unit),
        (None, _) => Err(XrefError::NoUnits),
        _ => Err(XrefError::MultipleUnits { count }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_an_array() {
        let units = decode_units(br#"[{"Name":"docs","Type":"yaml","Files":["a.yml"]}]"#).unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].name, "docs");
        assert_eq!(units[0].unit_type, "yaml");
        assert_eq!(units[0].files, vec!["a.yml"]);
    }

    #[test]
    fn decodes_a_single_object() {
        let units = decode_units(br#"{"Name":"docs","Type":"yaml","Repo":"o/docs"}"#).unwrap();
        assert_eq!(units[0].repo, "o/docs");
        assert!(units[0].files.is_empty());
    }

    #[test]
    fn null_files_are_empty() {
        let units = decode_units(br#"{"Name":"d","Type":"yaml","Files":null}"#).unwrap();
        assert!(units[0].files.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let units =
            decode_units(br#"[{"Name":"d","Type":"yaml","CommitID":"abc","Ops":{}}]"#).unwrap();
        assert_eq!(units[0].name, "d");
    }

    #[test]
    fn null_is_no_units() {
        let units = decode_units(b"null").unwrap();
        assert!(matches!(single_unit(units), Err(XrefError::NoUnits)));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            decode_units(b"not json"),
            Err(XrefError::MalformedUnits { .. })
        ));
    }

    #[test]
    fn more_than_one_unit_is_rejected() {
        let units = vec![SourceUnit::default(), SourceUnit::default()];
        assert!(matches!(
            single_unit(units),
            Err(XrefError::MultipleUnits { count: 2 })
        ));
    }

    #[test]
    fn serializes_with_srclib_field_names() {
        let unit = SourceUnit {
            name: "docs".into(),
            unit_type: "yaml".into(),
            repo: "owner/docs".into(),
            files: vec!["a.yml".into()],
            dir: ".".into(),
        };
        let json = serde_json::to_value(&unit).unwrap();
        assert_eq!(json["Name"], "docs");
        assert_eq!(json["Type"], "yaml");
        assert_eq!(json["Repo"], "owner/docs");
        assert_eq!(json["Files"][0], "a.yml");
        assert_eq!(json["Dir"], ".");
    }
}
