//! Validation helpers for ingestion

use crate::domain::DomainError;

use super::pipeline::{DocumentSource, StartIngestionRequest};

/// Maximum length of a property identifier
pub const MAX_PROPERTY_ID_LENGTH: usize = 255;

/// Validate property ID format
pub fn validate_property_id(id: &str) -> Result<(), DomainError> {
    if id.trim().is_empty() {
        return Err(DomainError::validation("property_id cannot be empty"));
    }

    if id.len() > MAX_PROPERTY_ID_LENGTH {
        return Err(DomainError::validation(format!(
            "property_id cannot exceed {} characters",
            MAX_PROPERTY_ID_LENGTH
        )));
    }

    Ok(())
}

/// Validate a start request, returning the usable sources
pub fn validate_start_request(
    request: &StartIngestionRequest,
) -> Result<Vec<DocumentSource>, DomainError> {
    validate_property_id(&request.property_id)?;

    if request.sources.is_empty() {
        return Err(DomainError::validation("at least one source is required"));
    }

    let usable: Vec<DocumentSource> = request
        .sources
        .iter()
        .filter(|s| s.is_usable())
        .cloned()
        .collect();

    if usable.is_empty() {
        return Err(DomainError::validation(
            "No valid sources provided. Each source must have url or file_path.",
        ));
    }

    Ok(usable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_property_id() {
        assert!(validate_property_id("villa-42").is_ok());
        assert!(validate_property_id("").is_err());
        assert!(validate_property_id("   ").is_err());
        assert!(validate_property_id(&"a".repeat(256)).is_err());
    }

    #[test]
    fn test_validate_start_request_filters_sources() {
        let request = StartIngestionRequest::new(
            "villa-42",
            vec![
                DocumentSource::url("https://example.com/manual"),
                DocumentSource {
                    url: None,
                    file_path: None,
                    ..DocumentSource::file("")
                },
            ],
        );

        let usable = validate_start_request(&request).unwrap();
        assert_eq!(usable.len(), 1);
    }

    #[test]
    fn test_validate_start_request_requires_sources() {
        let request = StartIngestionRequest::new("villa-42", vec![]);
        assert!(validate_start_request(&request).is_err());

        let request = StartIngestionRequest::new("villa-42", vec![DocumentSource::file(" ")]);
        let err = validate_start_request(&request).unwrap_err();
        assert!(err.to_string().contains("No valid sources"));
    }
}
