use chrono::{DateTime, Utc};

use super::{
    folder::{FolderId, FOLDERS},
    message::{EmailDraft, EmailRecord},
};

/// In-memory folders, one newest-first list per known folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderStore {
    folders: [Vec<EmailRecord>; 4],
    last_id: i64,
}

impl FolderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends a new record to `folder` and returns it.
    ///
    /// Ids derive from the filing time in milliseconds and are bumped when two
    /// emails land within the same millisecond.
    pub fn file(
        &mut self,
        folder: FolderId,
        draft: &EmailDraft,
        reason: &str,
        now: DateTime<Utc>,
    ) -> &EmailRecord {
        let id = now.timestamp_millis().max(self.last_id + 1);
        self.last_id = id;

        let body = if draft.body.is_empty() {
            None
        } else {
            Some(draft.body.clone())
        };
        let record = EmailRecord {
            id,
            subject: draft.subject.clone(),
            body,
            timestamp: now,
            reason: reason.to_string(),
        };

        let list = &mut self.folders[folder.index()];
        list.insert(0, record);
        &list[0]
    }

    pub fn emails(&self, folder: FolderId) -> &[EmailRecord] {
        &self.folders[folder.index()]
    }

    pub fn count(&self, folder: FolderId) -> usize {
        self.folders[folder.index()].len()
    }

    pub fn total(&self) -> usize {
        self.folders.iter().map(Vec::len).sum()
    }

    /// Folders in display order with their records.
    pub fn iter(&self) -> impl Iterator<Item = (FolderId, &[EmailRecord])> {
        FOLDERS
            .iter()
            .map(move |def| (def.id, self.emails(def.id)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn new_store_has_four_empty_folders() {
        let store = FolderStore::new();
        assert_eq!(store.iter().count(), 4);
        assert_eq!(store.total(), 0);
        for id in FolderId::ALL {
            assert!(store.emails(id).is_empty());
        }
    }

    #[test]
    fn filing_prepends_newest_first() {
        let mut store = FolderStore::new();
        store.file(FolderId::Clients, &EmailDraft::new("first", ""), "r1", at(1_000));
        store.file(FolderId::Clients, &EmailDraft::new("second", "hi"), "r2", at(2_000));

        let subjects: Vec<_> = store
            .emails(FolderId::Clients)
            .iter()
            .map(|e| e.subject.as_str())
            .collect();
        assert_eq!(subjects, vec!["second", "first"]);
        assert_eq!(store.count(FolderId::InternalComs), 0);
        assert_eq!(store.emails(FolderId::Clients)[1].body, None);
        assert_eq!(store.emails(FolderId::Clients)[0].body.as_deref(), Some("hi"));
    }

    #[test]
    fn ids_stay_unique_within_one_millisecond() {
        let mut store = FolderStore::new();
        let first = store
            .file(FolderId::Clients, &EmailDraft::new("a", ""), "r", at(5_000))
            .id;
        let second = store
            .file(FolderId::VeryImportant, &EmailDraft::new("b", ""), "r", at(5_000))
            .id;
        assert_eq!(first, 5_000);
        assert_eq!(second, 5_001);
    }

    #[test]
    fn every_record_lives_in_exactly_one_folder() {
        let mut store = FolderStore::new();
        for (i, id) in FolderId::ALL.into_iter().enumerate() {
            store.file(id, &EmailDraft::new(format!("s{i}"), ""), "r", at(i as i64));
        }
        assert_eq!(store.total(), 4);
        for (_, emails) in store.iter() {
            assert_eq!(emails.len(), 1);
        }
    }
}
