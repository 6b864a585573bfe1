use serde::{Deserialize, Serialize};

use super::folder::FolderId;

/// Folder and explanation extracted from one model answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub folder: FolderId,
    pub reason: String,
}
