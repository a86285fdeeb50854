//! Product metadata loaded from `.docweaver.yml` sidecar files.

use serde::Deserialize;

/// Metadata filename looked up in the default version's directory.
pub const META_FILENAME: &str = ".docweaver.yml";

/// Product metadata overriding display fields.
///
/// All fields are optional. When a field is `None`, the value derived from
/// the directory name is kept.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductMetadata {
    /// Display name override.
    #[serde(default)]
    pub name: Option<String>,

    /// Product description.
    #[serde(default)]
    pub description: Option<String>,

    /// Product image URL; relative values are resolved against the
    /// product's public asset route.
    #[serde(default, alias = "imageUrl")]
    pub image_url: Option<String>,
}

impl ProductMetadata {
    /// Parse metadata from YAML content.
    ///
    /// Empty content returns a default instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml(content: &str) -> Result<Self, MetadataError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(trimmed)
            .map_err(|e| MetadataError::Parse(format!("Invalid YAML: {e}")))
    }
}

/// Error type for metadata operations.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// YAML parsing error.
    #[error("{0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_yaml() {
        let meta = ProductMetadata::from_yaml("").unwrap();
        assert_eq!(meta, ProductMetadata::default());
    }

    #[test]
    fn test_parse_whitespace_only() {
        let meta = ProductMetadata::from_yaml("   \n\t  ").unwrap();
        assert_eq!(meta, ProductMetadata::default());
    }

    #[test]
    fn test_parse_all_fields() {
        let yaml = r#"
name: "Alpha"
description: "Alpha product docs"
image_url: images/logo.png
"#;
        let meta = ProductMetadata::from_yaml(yaml).unwrap();
        assert_eq!(meta.name, Some("Alpha".to_owned()));
        assert_eq!(meta.description, Some("Alpha product docs".to_owned()));
        assert_eq!(meta.image_url, Some("images/logo.png".to_owned()));
    }

    #[test]
    fn test_parse_camel_case_alias() {
        let yaml = "imageUrl: images/logo.png";
        let meta = ProductMetadata::from_yaml(yaml).unwrap();
        assert_eq!(meta.image_url, Some("images/logo.png".to_owned()));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = ProductMetadata::from_yaml("name: [invalid yaml");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_unknown_field_ignored() {
        let yaml = "name: Alpha\nunknown_field: value";
        let meta = ProductMetadata::from_yaml(yaml).unwrap();
        assert_eq!(meta.name, Some("Alpha".to_owned()));
    }
}
