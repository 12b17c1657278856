//! Booth-to-exhibitor matching.
//!
//! Map elements carry booth labels that may be prefixed with a hall
//! identifier (`"1.E211"`); the company directory lists bare booth labels
//! (`"E211"`). Matching happens on the part after the last dot.
//!
//! When several companies share a booth their entries are merged: names are
//! joined with `" / "`, descriptions with a blank line, the first website wins
//! and the first company's booth list becomes the sibling list. This is a
//! fixed, deterministic choice for display purposes only.

use crate::models::{Company, ExhibitorInfo};

/// Title used for booths with neither a matching company nor a name.
pub const UNKNOWN_EXHIBITOR: &str = "Unknown";

/// Separator between company names sharing a booth.
pub const TITLE_SEPARATOR: &str = " / ";

/// Separator between company descriptions sharing a booth.
pub const DESCRIPTION_SEPARATOR: &str = "\n\n";

/// Returns the booth part of a possibly prefixed label.
///
/// # Examples
///
/// - `"1.E211"` → `"E211"`
/// - `"A.B.C7"` → `"C7"`
/// - `"E211"` → `"E211"`
#[must_use]
pub fn booth_suffix(label: &str) -> &str {
    label.rsplit_once('.').map_or(label, |(_, suffix)| suffix)
}

/// Companies occupying the booth named by `label`, in directory order.
#[must_use]
pub fn matching_companies<'a>(label: &str, companies: &'a [Company]) -> Vec<&'a Company> {
    let booth = booth_suffix(label);
    companies.iter().filter(|c| c.has_booth(booth)).collect()
}

/// Merges the companies on a booth into one [`ExhibitorInfo`].
///
/// With no matches the title falls back to `element_name`, then to
/// [`UNKNOWN_EXHIBITOR`].
#[must_use]
pub fn merge_exhibitors(matches: &[&Company], element_name: Option<&str>) -> ExhibitorInfo {
    let Some(first) = matches.first() else {
        let title = element_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(UNKNOWN_EXHIBITOR);
        return ExhibitorInfo {
            title: title.to_string(),
            ..ExhibitorInfo::default()
        };
    };

    let title = matches
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(TITLE_SEPARATOR);

    let description = matches
        .iter()
        .map(|c| c.description.trim())
        .filter(|d| !d.is_empty())
        .collect::<Vec<_>>()
        .join(DESCRIPTION_SEPARATOR);

    let website = matches
        .iter()
        .filter_map(|c| c.website.as_deref())
        .map(str::trim)
        .find(|w| !w.is_empty())
        .map(String::from);

    ExhibitorInfo {
        title,
        description,
        website,
        siblings: first.booths.clone(),
        match_count: matches.len(),
    }
}

/// Looks up and merges the exhibitors for a booth label in one step.
#[must_use]
pub fn exhibitor_info(label: &str, element_name: Option<&str>, companies: &[Company]) -> ExhibitorInfo {
    let matches = matching_companies(label, companies);
    merge_exhibitors(&matches, element_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booth_suffix() {
        assert_eq!(booth_suffix("1.E211"), "E211");
        assert_eq!(booth_suffix("A.B.C7"), "C7");
        assert_eq!(booth_suffix("E211"), "E211");
        assert_eq!(booth_suffix("1."), "");
    }

    #[test]
    fn test_shared_booth_titles_are_joined() {
        let companies = vec![
            Company::new("1", "A", &["E211"]),
            Company::new("2", "B", &["E211"]),
            Company::new("3", "C", &["E300"]),
        ];
        let info = exhibitor_info("1.E211", None, &companies);
        assert_eq!(info.title, "A / B");
        assert_eq!(info.match_count, 2);
    }

    #[test]
    fn test_merge_descriptions_websites_and_siblings() {
        let companies = vec![
            Company::new("1", "A", &["E211", "E212"]).with_description("First"),
            Company::new("2", "B", &["E211"])
                .with_description("Second")
                .with_website("https://b.example"),
            Company::new("3", "C", &["E211"]).with_website("https://c.example"),
        ];
        let info = exhibitor_info("E211", Some("ignored"), &companies);

        assert_eq!(info.title, "A / B / C");
        assert_eq!(info.description, "First\n\nSecond");
        assert_eq!(info.website.as_deref(), Some("https://b.example"));
        assert_eq!(info.siblings, vec!["E211", "E212"]);
    }

    #[test]
    fn test_no_match_uses_element_name() {
        let companies = vec![Company::new("1", "A", &["E211"])];

        let info = exhibitor_info("1.X1", Some("Press Lounge"), &companies);
        assert_eq!(info.title, "Press Lounge");
        assert_eq!(info.match_count, 0);
        assert!(info.siblings.is_empty());

        let info = exhibitor_info("1.X1", None, &companies);
        assert_eq!(info.title, UNKNOWN_EXHIBITOR);

        let info = exhibitor_info("1.X1", Some("   "), &companies);
        assert_eq!(info.title, UNKNOWN_EXHIBITOR);
    }

    #[test]
    fn test_matching_is_exact() {
        let companies = vec![Company::new("1", "A", &["e211"])];
        assert!(matching_companies("1.E211", &companies).is_empty());
    }
}
