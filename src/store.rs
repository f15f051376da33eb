use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::Theme;

const FAVORITES_KEY: &str = "favorites";
const NOTES_KEY: &str = "patternNotes";
const COMPLETED_KEY: &str = "completedModules";
const RECENT_KEY: &str = "recentlyViewed";
const THEME_KEY: &str = "theme";

pub(crate) const RECENT_CAP: usize = 5;

/// Per-user preference state: independent JSON entries under one directory,
/// one file per key. Reads degrade to the entity's empty default when an
/// entry is missing or corrupt; writes are best-effort and never fatal.
pub(crate) struct PreferenceStore {
    dir: PathBuf,
}

impl PreferenceStore {
    pub(crate) fn open(dir: PathBuf) -> Self {
        if let Err(err) = fs::create_dir_all(&dir) {
            eprintln!("preference store unavailable at {}: {err}", dir.display());
        }
        PreferenceStore { dir }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn read_entry<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        fs::read_to_string(self.entry_path(key))
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default()
    }

    fn write_entry<T: Serialize>(&self, key: &str, value: &T) {
        let path = self.entry_path(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        let payload = match serde_json::to_vec_pretty(value) {
            Ok(bytes) => bytes,
            Err(err) => {
                eprintln!("failed to encode {key}: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&tmp, payload).and_then(|_| fs::rename(&tmp, &path)) {
            eprintln!("failed to persist {key}: {err}");
        }
    }

    fn toggle_in(&self, key: &str, id: &str) -> bool {
        let mut ids: Vec<String> = self.read_entry(key);
        let present = if let Some(pos) = ids.iter().position(|v| v == id) {
            ids.remove(pos);
            false
        } else {
            ids.push(id.to_string());
            true
        };
        self.write_entry(key, &ids);
        present
    }

    // ── Favorites ───────────────────────────────────────────────────────

    pub(crate) fn favorites(&self) -> Vec<String> {
        self.read_entry(FAVORITES_KEY)
    }

    pub(crate) fn is_favorite(&self, id: &str) -> bool {
        self.favorites().iter().any(|v| v == id)
    }

    /// Toggle set membership; returns whether `id` is a favorite afterwards.
    pub(crate) fn toggle_favorite(&self, id: &str) -> bool {
        self.toggle_in(FAVORITES_KEY, id)
    }

    // ── Notes ───────────────────────────────────────────────────────────

    pub(crate) fn notes(&self) -> BTreeMap<String, String> {
        self.read_entry(NOTES_KEY)
    }

    pub(crate) fn note(&self, id: &str) -> Option<String> {
        self.notes().remove(id)
    }

    /// Save a note; an empty (whitespace-only) note removes the entry.
    pub(crate) fn save_note(&self, id: &str, text: &str) {
        let mut notes = self.notes();
        if text.trim().is_empty() {
            notes.remove(id);
        } else {
            notes.insert(id.to_string(), text.to_string());
        }
        self.write_entry(NOTES_KEY, &notes);
    }

    // ── Roadmap progress ────────────────────────────────────────────────

    pub(crate) fn completed_modules(&self) -> Vec<String> {
        self.read_entry(COMPLETED_KEY)
    }

    pub(crate) fn is_module_completed(&self, id: &str) -> bool {
        self.completed_modules().iter().any(|v| v == id)
    }

    pub(crate) fn toggle_module_complete(&self, id: &str) -> bool {
        self.toggle_in(COMPLETED_KEY, id)
    }

    // ── Recently viewed ─────────────────────────────────────────────────

    pub(crate) fn recently_viewed(&self) -> Vec<String> {
        self.read_entry(RECENT_KEY)
    }

    /// Dedupe, prepend, then truncate to the newest RECENT_CAP entries.
    pub(crate) fn add_recently_viewed(&self, id: &str) {
        let mut recent = self.recently_viewed();
        recent.retain(|v| v != id);
        recent.insert(0, id.to_string());
        recent.truncate(RECENT_CAP);
        self.write_entry(RECENT_KEY, &recent);
    }

    // ── Theme ───────────────────────────────────────────────────────────

    pub(crate) fn theme(&self) -> Theme {
        let raw: String = self.read_entry(THEME_KEY);
        Theme::parse(&raw)
    }

    pub(crate) fn toggle_theme(&self) -> Theme {
        let next = self.theme().toggled();
        self.write_entry(THEME_KEY, &next.as_str());
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    fn temp_store() -> PreferenceStore {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "patternbook-store-{}-{n}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        PreferenceStore::open(dir)
    }

    #[test]
    fn toggle_favorite_roundtrip() {
        let store = temp_store();
        assert!(!store.is_favorite("bloom-filter"));
        assert!(store.toggle_favorite("bloom-filter"));
        assert!(store.is_favorite("bloom-filter"));
        assert!(!store.toggle_favorite("bloom-filter"));
        assert!(!store.is_favorite("bloom-filter"));
    }

    #[test]
    fn favorites_survive_reopen() {
        let store = temp_store();
        store.toggle_favorite("lsm-tree");
        let reopened = PreferenceStore::open(store.dir.clone());
        assert!(reopened.is_favorite("lsm-tree"));
    }

    #[test]
    fn recently_viewed_dedupes_and_moves_to_front() {
        let store = temp_store();
        store.add_recently_viewed("a");
        store.add_recently_viewed("b");
        store.add_recently_viewed("a");
        assert_eq!(store.recently_viewed(), vec!["a", "b"]);
    }

    #[test]
    fn recently_viewed_evicts_oldest_at_cap() {
        let store = temp_store();
        for id in ["a", "b", "c", "d", "e", "f"] {
            store.add_recently_viewed(id);
        }
        let recent = store.recently_viewed();
        assert_eq!(recent.len(), RECENT_CAP);
        assert_eq!(recent, vec!["f", "e", "d", "c", "b"]);
    }

    #[test]
    fn notes_save_read_and_clear() {
        let store = temp_store();
        assert_eq!(store.note("x"), None);
        store.save_note("x", "clock skew gotcha");
        assert_eq!(store.note("x").as_deref(), Some("clock skew gotcha"));
        store.save_note("x", "  ");
        assert_eq!(store.note("x"), None);
    }

    #[test]
    fn corrupt_entry_reads_as_default() {
        let store = temp_store();
        fs::write(store.entry_path(FAVORITES_KEY), b"{not json").unwrap();
        assert!(store.favorites().is_empty());
        fs::write(store.entry_path(NOTES_KEY), b"[1,2,3]").unwrap();
        assert!(store.notes().is_empty());
    }

    #[test]
    fn theme_defaults_light_and_toggles() {
        let store = temp_store();
        assert_eq!(store.theme(), Theme::Light);
        assert_eq!(store.toggle_theme(), Theme::Dark);
        assert_eq!(store.theme(), Theme::Dark);
        assert_eq!(store.toggle_theme(), Theme::Light);
    }

    #[test]
    fn module_completion_toggles() {
        let store = temp_store();
        assert!(store.toggle_module_complete("00-foundations"));
        assert!(store.is_module_completed("00-foundations"));
        assert!(!store.toggle_module_complete("00-foundations"));
        assert!(!store.is_module_completed("00-foundations"));
    }
}
