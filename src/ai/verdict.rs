use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{ClassificationResult, FolderId, DEFAULT_FOLDER};

/// Reason stored when the model gives none.
pub const FALLBACK_REASON: &str = "Classified by AI";

static FOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)FOLDER:\s*([A-Za-z0-9_]+)").expect("valid folder regex"));
static REASON_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)REASON:\s*(.+)").expect("valid reason regex"));

/// Extracts folder and reason from free-form model output.
///
/// Never fails: an absent or unrecognised folder falls back to
/// `internal_coms`, an absent or blank reason to [`FALLBACK_REASON`].
pub fn parse_verdict(text: &str) -> ClassificationResult {
    let folder = FOLDER_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
        .and_then(|token| match token.parse::<FolderId>() {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::debug!(target: "classifier", error = %err, "model named an unknown folder");
                None
            }
        })
        .unwrap_or(DEFAULT_FOLDER);

    let reason = REASON_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|reason| !reason.is_empty())
        .unwrap_or_else(|| FALLBACK_REASON.to_string());

    ClassificationResult { folder, reason }
}
