use std::collections::{BTreeMap, HashSet};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

use super::{time, EntryId, ReminderEntry, StoreError};

/// Date-indexed reminders backed by a single JSON file.
///
/// Entries keep insertion order per date, which is also the on-disk order.
/// Every mutation rewrites the whole file before returning; if that write
/// fails the mutation is undone, so memory always matches the last good save.
pub struct EventStore {
    path: PathBuf,
    days: BTreeMap<NaiveDate, Vec<ReminderEntry>>,
}

impl EventStore {
    /// Load the store at `path`. A missing file is an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let days = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no reminder file yet, starting empty");
                BTreeMap::new()
            }
            Err(source) => return Err(StoreError::Read { path, source }),
        };

        let store = Self { path, days };
        info!(path = %store.path.display(), entries = store.len(), "reminders loaded");
        Ok(store)
    }

    pub fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.days).map_err(StoreError::Encode)?;
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, json).map_err(write_err)?;
        if let Err(err) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(err));
        }
        Ok(())
    }

    /// Validate and append a reminder to `date`, then persist.
    pub fn add(
        &mut self,
        date: NaiveDate,
        time: &str,
        description: &str,
    ) -> Result<EntryId, StoreError> {
        if description.trim().is_empty() {
            return Err(StoreError::EmptyDescription);
        }
        let time = time::parse_hhmm(time)?;

        let entry = ReminderEntry::new(time, description);
        let id = entry.id;
        self.days.entry(date).or_default().push(entry);

        if let Err(err) = self.save() {
            self.take(date, id);
            return Err(err);
        }

        info!(%date, time = %time::format_hhmm(time), %id, "reminder added");
        Ok(id)
    }

    /// Remove the entry with `id` from `date`, then persist.
    pub fn delete(&mut self, date: NaiveDate, id: EntryId) -> Result<ReminderEntry, StoreError> {
        let (pos, entry) = self.take(date, id).ok_or(StoreError::NotFound { date })?;

        if let Err(err) = self.save() {
            self.days.entry(date).or_default().insert(pos, entry);
            return Err(err);
        }

        info!(%date, time = %time::format_hhmm(entry.time), %id, "reminder deleted");
        Ok(entry)
    }

    /// Remove the entry shown at `row` of [`EventStore::list_for`].
    ///
    /// The row is resolved to the entry's id first, so the sorted position is
    /// never used as an index into stored order.
    pub fn delete_at(&mut self, date: NaiveDate, row: usize) -> Result<ReminderEntry, StoreError> {
        let id = self
            .list_for(date)
            .get(row)
            .map(|entry| entry.id)
            .ok_or(StoreError::RowOutOfRange { date, row })?;
        self.delete(date, id)
    }

    /// Entries of `date` sorted by time. Equal times keep insertion order.
    pub fn list_for(&self, date: NaiveDate) -> Vec<ReminderEntry> {
        let mut entries = self.entries_on(date).to_vec();
        entries.sort_by_key(|entry| entry.time);
        entries
    }

    /// Entries of `date` in stored order.
    pub fn entries_on(&self, date: NaiveDate) -> &[ReminderEntry] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn get(&self, date: NaiveDate, id: EntryId) -> Option<&ReminderEntry> {
        self.entries_on(date).iter().find(|entry| entry.id == id)
    }

    /// Day-of-month numbers in the given month that have at least one reminder.
    pub fn days_with_reminders(&self, year: i32, month: u32) -> HashSet<u32> {
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return HashSet::new();
        };
        self.days
            .range(first..)
            .take_while(|(date, _)| date.year() == year && date.month() == month)
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(date, _)| date.day())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    fn take(&mut self, date: NaiveDate, id: EntryId) -> Option<(usize, ReminderEntry)> {
        let entries = self.days.get_mut(&date)?;
        let pos = entries.iter().position(|entry| entry.id == id)?;
        let entry = entries.remove(pos);
        if entries.is_empty() {
            self.days.remove(&date);
        }
        Some((pos, entry))
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn mk_store() -> (EventStore, TempDir) {
        let tmp = tempdir().unwrap();
        let store = EventStore::load(tmp.path().join("events.json")).unwrap();
        (store, tmp)
    }

    fn rows(store: &EventStore, day: NaiveDate) -> Vec<(String, String)> {
        store
            .list_for(day)
            .into_iter()
            .map(|e| (time::format_hhmm(e.time), e.description))
            .collect()
    }

    fn row(time: &str, description: &str) -> (String, String) {
        (time.to_string(), description.to_string())
    }

    #[test]
    fn load_missing_file_is_empty() {
        let (store, _tmp) = mk_store();
        assert_eq!(store.len(), 0);
        assert!(store.list_for(date("2024-06-10")).is_empty());
    }

    #[test]
    fn load_corrupt_file_fails() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("events.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(EventStore::load(&path), Err(StoreError::Parse { .. })));
    }

    #[test]
    fn load_rejects_invalid_time_in_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("events.json");
        fs::write(&path, r#"{"2024-06-10":[{"time":"25:00","description":"x"}]}"#).unwrap();
        assert!(matches!(EventStore::load(&path), Err(StoreError::Parse { .. })));
    }

    #[test]
    fn add_then_list_contains_entry() {
        let (mut store, _tmp) = mk_store();
        let day = date("2024-06-10");
        store.add(day, "14:30", "Team sync").unwrap();
        assert_eq!(rows(&store, day), vec![row("14:30", "Team sync")]);
    }

    #[test]
    fn add_rejects_invalid_time_and_leaves_store_unchanged() {
        let (mut store, tmp) = mk_store();
        let day = date("2024-06-10");
        store.add(day, "08:00", "Existing").unwrap();
        let before = fs::read_to_string(tmp.path().join("events.json")).unwrap();

        for bad in ["25:00", "9:30", "", "noon"] {
            let err = store.add(day, bad, "Nope").unwrap_err();
            assert!(err.is_validation());
            assert!(matches!(err, StoreError::InvalidTime(_)));
        }

        assert_eq!(rows(&store, day), vec![row("08:00", "Existing")]);
        let after = fs::read_to_string(tmp.path().join("events.json")).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn add_rejects_blank_description() {
        let (mut store, _tmp) = mk_store();
        let day = date("2024-06-10");
        assert!(matches!(store.add(day, "10:00", ""), Err(StoreError::EmptyDescription)));
        assert!(matches!(store.add(day, "10:00", "   "), Err(StoreError::EmptyDescription)));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn add_keeps_description_verbatim() {
        let (mut store, tmp) = mk_store();
        let day = date("2024-06-10");
        store.add(day, "09:00", "  Standup ").unwrap();
        assert_eq!(store.list_for(day)[0].description, "  Standup ");

        let reloaded = EventStore::load(tmp.path().join("events.json")).unwrap();
        assert_eq!(rows(&reloaded, day), vec![row("09:00", "  Standup ")]);
    }

    #[test]
    fn list_for_is_sorted_by_time() {
        let (mut store, _tmp) = mk_store();
        let day = date("2024-06-10");
        for (t, d) in [("18:00", "c"), ("07:15", "a"), ("12:00", "b"), ("07:15", "a2")] {
            store.add(day, t, d).unwrap();
        }
        let listed = store.list_for(day);
        assert!(listed.windows(2).all(|w| w[0].time <= w[1].time));
        assert_eq!(
            rows(&store, day),
            vec![row("07:15", "a"), row("07:15", "a2"), row("12:00", "b"), row("18:00", "c")]
        );
    }

    #[test]
    fn delete_keeps_remaining_order() {
        let (mut store, _tmp) = mk_store();
        let day = date("2024-06-10");
        let _a = store.add(day, "08:00", "a").unwrap();
        let b = store.add(day, "09:00", "b").unwrap();
        let _c = store.add(day, "10:00", "c").unwrap();

        let removed = store.delete(day, b).unwrap();
        assert_eq!(removed.description, "b");

        let stored: Vec<_> = store.entries_on(day).iter().map(|e| e.description.as_str()).collect();
        assert_eq!(stored, vec!["a", "c"]);
    }

    #[test]
    fn delete_unknown_id_is_not_found() {
        let (mut store, _tmp) = mk_store();
        let day = date("2024-06-10");
        store.add(day, "08:00", "a").unwrap();
        let err = store.delete(day, EntryId::generate()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_at_uses_sorted_row() {
        let (mut store, _tmp) = mk_store();
        let day = date("2024-06-10");
        // Stored order differs from time order.
        store.add(day, "14:30", "Team sync").unwrap();
        store.add(day, "09:00", "Standup").unwrap();

        let removed = store.delete_at(day, 0).unwrap();
        assert_eq!(removed.description, "Standup");
        assert_eq!(rows(&store, day), vec![row("14:30", "Team sync")]);
    }

    #[test]
    fn delete_at_out_of_range() {
        let (mut store, _tmp) = mk_store();
        let day = date("2024-06-10");
        store.add(day, "08:00", "a").unwrap();
        let err = store.delete_at(day, 3).unwrap_err();
        assert!(matches!(err, StoreError::RowOutOfRange { row: 3, .. }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn deleting_last_entry_drops_the_date() {
        let (mut store, tmp) = mk_store();
        let day = date("2024-06-10");
        let id = store.add(day, "08:00", "a").unwrap();
        store.delete(day, id).unwrap();
        assert!(store.days_with_reminders(2024, 6).is_empty());
        let on_disk = fs::read_to_string(tmp.path().join("events.json")).unwrap();
        assert_eq!(on_disk, "{}");
    }

    #[test]
    fn team_sync_scenario() {
        let (mut store, _tmp) = mk_store();
        let day = date("2024-06-10");

        store.add(day, "14:30", "Team sync").unwrap();
        assert_eq!(rows(&store, day), vec![row("14:30", "Team sync")]);

        store.add(day, "09:00", "Standup").unwrap();
        assert_eq!(
            rows(&store, day),
            vec![row("09:00", "Standup"), row("14:30", "Team sync")]
        );

        store.delete_at(day, 0).unwrap();
        assert_eq!(rows(&store, day), vec![row("14:30", "Team sync")]);
    }

    #[test]
    fn save_then_load_preserves_stored_order() {
        let (mut store, tmp) = mk_store();
        let d1 = date("2024-06-10");
        let d2 = date("2025-01-01");
        store.add(d1, "14:30", "Team sync").unwrap();
        store.add(d1, "09:00", "Standup").unwrap();
        store.add(d2, "00:05", "Новый год 🎉").unwrap();

        let reloaded = EventStore::load(tmp.path().join("events.json")).unwrap();
        for day in [d1, d2] {
            let saved: Vec<_> = store
                .entries_on(day)
                .iter()
                .map(|e| (e.time, e.description.clone()))
                .collect();
            let loaded: Vec<_> = reloaded
                .entries_on(day)
                .iter()
                .map(|e| (e.time, e.description.clone()))
                .collect();
            assert_eq!(saved, loaded);
        }
        assert_eq!(reloaded.len(), 3);
    }

    #[test]
    fn file_format_matches_plain_json_mapping() {
        let (mut store, tmp) = mk_store();
        store.add(date("2024-06-10"), "09:00", "提醒").unwrap();
        let on_disk = fs::read_to_string(tmp.path().join("events.json")).unwrap();
        assert_eq!(on_disk, r#"{"2024-06-10":[{"time":"09:00","description":"提醒"}]}"#);
        assert!(!tmp.path().join("events.json.tmp").exists());
    }

    #[test]
    fn failed_save_rolls_back_add() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("blocked").join("events.json");
        let mut store = EventStore::load(&path).unwrap();
        // A regular file where the parent directory should be.
        fs::write(tmp.path().join("blocked"), "").unwrap();

        let err = store.add(date("2024-06-10"), "09:00", "x").unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert!(!err.is_validation());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn days_with_reminders_is_month_scoped() {
        let (mut store, _tmp) = mk_store();
        store.add(date("2024-05-31"), "09:00", "may").unwrap();
        store.add(date("2024-06-01"), "09:00", "june 1").unwrap();
        store.add(date("2024-06-30"), "09:00", "june 30").unwrap();
        store.add(date("2024-07-01"), "09:00", "july").unwrap();

        let days = store.days_with_reminders(2024, 6);
        assert_eq!(days, HashSet::from([1, 30]));
    }
}
