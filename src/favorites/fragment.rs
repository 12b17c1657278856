//! URL fragment format for shareable favorites.
//!
//! The fragment is query-string shaped: `list=<name>&favs=<data>`. `list` is
//! percent-encoded; `favs` is the comma-joined label list, DEFLATE-compressed
//! and base64url-encoded without padding. Labels must not contain commas.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use tracing::warn;

use crate::constants::{FRAGMENT_FAVS_PARAM, FRAGMENT_LIST_PARAM};

/// Parsed URL fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    /// Active list name
    pub list: Option<String>,
    /// Compressed favorites, still encoded
    pub favs: Option<String>,
}

impl Fragment {
    /// Fragment describing a list and its favorites.
    ///
    /// `favs` is left out for an empty list.
    #[must_use]
    pub fn for_list(name: &str, labels: &[String]) -> Self {
        Self {
            list: Some(name.to_string()),
            favs: if labels.is_empty() {
                None
            } else {
                Some(encode_favorites(labels))
            },
        }
    }

    /// Parses a fragment with or without its leading `#`.
    ///
    /// Unknown keys are ignored; empty values count as absent; values that
    /// are not valid percent-encoding are ignored with a warning.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('#').unwrap_or(raw);
        let mut fragment = Self::default();

        for pair in raw.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = match urlencoding::decode(value) {
                Ok(v) => v.into_owned(),
                Err(e) => {
                    warn!("Ignoring undecodable fragment parameter {key:?}: {e}");
                    continue;
                }
            };
            if value.is_empty() {
                continue;
            }
            match key {
                FRAGMENT_LIST_PARAM => fragment.list = Some(value),
                FRAGMENT_FAVS_PARAM => fragment.favs = Some(value),
                _ => {}
            }
        }

        fragment
    }

    /// Decoded favorites; empty when absent or malformed.
    #[must_use]
    pub fn favorites(&self) -> Vec<String> {
        self.favs.as_deref().map(decode_favorites).unwrap_or_default()
    }

    /// Whether the fragment carries neither a list nor favorites.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.list.is_none() && self.favs.is_none()
    }
}

impl std::fmt::Display for Fragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if let Some(list) = &self.list {
            parts.push(format!("{FRAGMENT_LIST_PARAM}={}", urlencoding::encode(list)));
        }
        if let Some(favs) = &self.favs {
            parts.push(format!("{FRAGMENT_FAVS_PARAM}={}", urlencoding::encode(favs)));
        }
        write!(f, "{}", parts.join("&"))
    }
}

/// Separator between labels in the `favs` parameter.
pub const LABEL_SEPARATOR: &str = ",";

/// Whether `label` comes back unchanged from the `favs` parameter.
#[must_use]
pub fn is_shareable_label(label: &str) -> bool {
    !label.contains(LABEL_SEPARATOR)
}

/// Compresses a label list for the `favs` parameter.
#[must_use]
pub fn encode_favorites(labels: &[String]) -> String {
    let joined = labels.join(LABEL_SEPARATOR);
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    // Writing into a Vec cannot fail
    let compressed = encoder
        .write_all(joined.as_bytes())
        .and_then(|()| encoder.finish())
        .unwrap_or_default();
    URL_SAFE_NO_PAD.encode(compressed)
}

/// Decompresses a `favs` value into its comma-joined form.
///
/// # Errors
///
/// Returns an error for invalid base64, an invalid DEFLATE stream or
/// non-UTF-8 content.
pub fn try_decode_joined(encoded: &str) -> Result<String> {
    let trimmed = encoded.trim().trim_end_matches('=');
    let compressed = URL_SAFE_NO_PAD
        .decode(trimmed)
        .context("Favorites parameter is not valid base64url")?;
    let mut joined = String::new();
    DeflateDecoder::new(compressed.as_slice())
        .read_to_string(&mut joined)
        .context("Favorites parameter is not a valid compressed label list")?;
    Ok(joined)
}

/// Decodes a `favs` value; never fails.
///
/// Empty input gives an empty list; malformed input gives an empty list and a
/// warning. Empty labels are dropped.
#[must_use]
pub fn decode_favorites(encoded: &str) -> Vec<String> {
    if encoded.trim().is_empty() {
        return Vec::new();
    }
    match try_decode_joined(encoded) {
        Ok(joined) => joined
            .split(LABEL_SEPARATOR)
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(String::from)
            .collect(),
        Err(e) => {
            warn!("Ignoring malformed favorites in link: {e:#}");
            Vec::new()
        }
    }
}
