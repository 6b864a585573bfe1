pub mod folder;
pub mod message;
pub mod store;
pub mod types;

pub use folder::{FolderDefinition, FolderId, DEFAULT_FOLDER, FOLDERS};
pub use message::{EmailDraft, EmailRecord};
pub use store::FolderStore;
pub use types::ClassificationResult;
