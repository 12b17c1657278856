//! Exhibitor directory entries.

use serde::{Deserialize, Serialize};

/// One exhibiting company and the booths it occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Directory identifier
    #[serde(default)]
    pub id: String,
    /// Company name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Website URL, if published
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Booth labels without hall prefix (e.g. "E211")
    #[serde(default)]
    pub booths: Vec<String>,
}

impl Company {
    /// Creates a company with the given booths and no description or website.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, booths: &[&str]) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            website: None,
            booths: booths.iter().map(|b| (*b).to_string()).collect(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the website.
    #[must_use]
    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    /// Whether this company occupies the given (unprefixed) booth.
    #[must_use]
    pub fn has_booth(&self, booth: &str) -> bool {
        self.booths.iter().any(|b| b == booth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_company_defaults() {
        let company: Company = serde_json::from_str(r#"{"name":"Acme"}"#).unwrap();
        assert_eq!(company.name, "Acme");
        assert!(company.description.is_empty());
        assert!(company.website.is_none());
        assert!(company.booths.is_empty());
    }

    #[test]
    fn test_has_booth() {
        let company = Company::new("1", "Acme", &["E211", "E212"]);
        assert!(company.has_booth("E212"));
        assert!(!company.has_booth("E21"));
    }
}
