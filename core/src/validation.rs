//! Client-side check of an options update against the service's metadata.

use std::collections::HashSet;

use crate::error::{ValidationError, ValidationErrorEntry};
use crate::types::{OptionsMetadata, ServiceOptions};

/// Reject every supplied option whose name is absent from `metadata`.
///
/// All unknown names are collected into one error, ordered by name. Values
/// and declared types are not checked; that is left to the server.
pub fn validate_options(
    metadata: &OptionsMetadata,
    options: &ServiceOptions,
) -> Result<(), ValidationError> {
    let valid: HashSet<&str> = metadata.names().collect();

    let errors: Vec<ValidationErrorEntry> = options
        .keys()
        .filter(|name| !valid.contains(name.as_str()))
        .map(|name| ValidationErrorEntry::option_not_available(name))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { errors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OPTION_NOT_AVAILABLE;
    use crate::types::{MetadataMeta, OptionMetadata, OptionValue};

    fn metadata(names: &[&str]) -> OptionsMetadata {
        OptionsMetadata {
            meta: MetadataMeta {
                count: names.len() as u64,
            },
            data: names
                .iter()
                .enumerate()
                .map(|(i, name)| OptionMetadata {
                    id: format!("opt{i}"),
                    name: name.to_string(),
                    title: String::new(),
                    kind: "dynamic".to_string(),
                    read_only: false,
                    property: None,
                })
                .collect(),
        }
    }

    fn options(pairs: &[(&str, bool)]) -> ServiceOptions {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), OptionValue::Bool(*v)))
            .collect()
    }

    #[test]
    fn known_options_pass() {
        let meta = metadata(&["cors", "ftp", "autoRedirect"]);
        let opts = options(&[("ftp", false), ("cors", true), ("autoRedirect", false)]);
        assert!(validate_options(&meta, &opts).is_ok());
    }

    #[test]
    fn empty_update_passes() {
        assert!(validate_options(&metadata(&["cors"]), &ServiceOptions::new()).is_ok());
    }

    #[test]
    fn single_unknown_option_is_reported() {
        let meta = metadata(&["cors"]);
        let opts = options(&[("cors", true), ("invalid_option", false)]);
        let err = validate_options(&meta, &opts).unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].field, "invalid_option");
        assert_eq!(err.errors[0].code, OPTION_NOT_AVAILABLE);
    }

    #[test]
    fn every_unknown_option_is_reported_in_name_order() {
        let meta = metadata(&["cors"]);
        let opts = options(&[("zeta", true), ("alpha", true), ("cors", false)]);
        let err = validate_options(&meta, &opts).unwrap_err();
        let fields: Vec<&str> = err.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["alpha", "zeta"]);
    }

    #[test]
    fn empty_metadata_rejects_everything() {
        let err = validate_options(&metadata(&[]), &options(&[("cors", true)])).unwrap_err();
        assert_eq!(err.errors[0].field, "cors");
    }
}
