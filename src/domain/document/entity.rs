//! Parsed document entities

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::classifier::is_critical_text;
use crate::domain::DomainError;

/// Shallowest heading level
pub const MIN_SECTION_LEVEL: u8 = 1;

/// Deepest heading level
pub const MAX_SECTION_LEVEL: u8 = 6;

/// Category of a property document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DocType {
    #[default]
    HouseManual,
    LocalGuide,
    ApplianceManual,
    Policy,
    #[serde(other)]
    Unknown,
}

impl DocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HouseManual => "house_manual",
            Self::LocalGuide => "local_guide",
            Self::ApplianceManual => "appliance_manual",
            Self::Policy => "policy",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One logical unit of a source document: a heading and its body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SectionPayload")]
pub struct ParsedSection {
    pub title: String,
    pub content: String,
    pub level: u8,
    pub is_critical: bool,
}

impl ParsedSection {
    /// Create a section, classifying criticality from its title and content
    pub fn new(title: impl Into<String>, content: impl Into<String>, level: u8) -> Self {
        let title = title.into();
        let content = content.into();
        let is_critical = is_critical_text(&title, &content);

        Self {
            title,
            content,
            level,
            is_critical,
        }
    }

    /// Override the classified criticality
    pub fn with_critical(mut self, is_critical: bool) -> Self {
        self.is_critical = is_critical;
        self
    }
}

/// Wire shape of a section; a missing `is_critical` is classified on arrival
#[derive(Deserialize)]
struct SectionPayload {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default = "default_level")]
    level: u8,
    #[serde(default)]
    is_critical: Option<bool>,
}

fn default_level() -> u8 {
    MIN_SECTION_LEVEL
}

impl From<SectionPayload> for ParsedSection {
    fn from(payload: SectionPayload) -> Self {
        let section = ParsedSection::new(payload.title, payload.content, payload.level);

        match payload.is_critical {
            Some(flag) => section.with_critical(flag),
            None => section,
        }
    }
}

/// Normalized document produced by a format-specific parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub doc_type: DocType,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub source_filename: String,
    #[serde(default)]
    pub sections: Vec<ParsedSection>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

fn default_language() -> String {
    "en".to_string()
}

impl ParsedDocument {
    /// Create an empty English house manual with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            language: default_language(),
            doc_type: DocType::default(),
            source_url: String::new(),
            source_filename: String::new(),
            sections: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_doc_type(mut self, doc_type: DocType) -> Self {
        self.doc_type = doc_type;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = url.into();
        self
    }

    pub fn with_source_filename(mut self, filename: impl Into<String>) -> Self {
        self.source_filename = filename.into();
        self
    }

    pub fn with_section(mut self, section: ParsedSection) -> Self {
        self.sections.push(section);
        self
    }

    /// The URL when present, otherwise the filename
    pub fn source(&self) -> &str {
        if self.source_url.is_empty() {
            &self.source_filename
        } else {
            &self.source_url
        }
    }

    /// Check the invariants a parser is expected to uphold
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.source_url.trim().is_empty() && self.source_filename.trim().is_empty() {
            return Err(DomainError::validation(
                "document must have a source_url or source_filename",
            ));
        }

        if let Some(section) = self
            .sections
            .iter()
            .find(|s| !(MIN_SECTION_LEVEL..=MAX_SECTION_LEVEL).contains(&s.level))
        {
            return Err(DomainError::validation(format!(
                "section '{}' has heading level {} (expected {}-{})",
                section.title, section.level, MIN_SECTION_LEVEL, MAX_SECTION_LEVEL
            )));
        }

        Ok(())
    }
}
