use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::{Catalog, PreferenceStore};

/// Top-level views plus the detail and document states. `Document` is a
/// sub-state of `Detail`: back-navigation returns to the same record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum View {
    Catalog,
    Roadmap,
    ReferenceSheet,
    Detail(String),
    Document(String),
}

/// Fetches long-form reference documents by the relative path recorded in
/// `adr.filePath`. The two production impls resolve against the assets
/// directory or an HTTP base; tests stub this.
pub(crate) trait DocumentFetcher {
    fn fetch(&self, path: &str) -> Result<String, String>;
}

pub(crate) struct FileFetcher {
    pub(crate) root: PathBuf,
}

impl DocumentFetcher for FileFetcher {
    fn fetch(&self, path: &str) -> Result<String, String> {
        // Relative paths only; reject traversal out of the assets root.
        let relative = path.trim_start_matches("./");
        if relative.starts_with('/') || relative.split('/').any(|part| part == "..") {
            return Err(format!("invalid document path: {path}"));
        }
        let full = self.root.join(relative);
        fs::read_to_string(&full).map_err(|err| format!("{}: {err}", full.display()))
    }
}

pub(crate) struct HttpFetcher {
    pub(crate) base: String,
    pub(crate) timeout_ms: u64,
}

impl DocumentFetcher for HttpFetcher {
    fn fetch(&self, path: &str) -> Result<String, String> {
        let url = format!(
            "{}/{}",
            self.base.trim_end_matches('/'),
            path.trim_start_matches("./")
        );
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_millis(self.timeout_ms))
            .timeout_read(Duration::from_millis(self.timeout_ms))
            .build();
        agent
            .get(&url)
            .call()
            .map_err(|err| err.to_string())?
            .into_string()
            .map_err(|err| err.to_string())
    }
}

/// Ticket handed out when a document fetch starts. Carries the navigation
/// generation it started under so a slow fetch cannot render into a view the
/// user has already left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FetchTicket {
    generation: u64,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum DocumentOutcome {
    /// Fetch succeeded and the controller is now in `Document`.
    Loaded(String),
    /// Fetch failed; the controller stays in `Detail` and the caller shows
    /// an inline error.
    Failed(String),
    /// The user navigated away while the fetch was in flight; drop the
    /// result without touching the current view.
    Stale,
}

/// Small state machine over the five views. Always starts at `Catalog`; no
/// view state persists across restarts (only the preference store does).
pub(crate) struct ViewController {
    view: View,
    generation: u64,
}

impl ViewController {
    pub(crate) fn new() -> Self {
        ViewController {
            view: View::Catalog,
            generation: 0,
        }
    }

    pub(crate) fn view(&self) -> &View {
        &self.view
    }

    fn navigate(&mut self, view: View) {
        self.generation += 1;
        self.view = view;
    }

    /// Switch to a top-level view. Always exits `Detail`/`Document`.
    pub(crate) fn show_view(&mut self, view: View) {
        debug_assert!(matches!(
            view,
            View::Catalog | View::Roadmap | View::ReferenceSheet
        ));
        self.navigate(view);
    }

    pub(crate) fn show_catalog(&mut self) {
        self.navigate(View::Catalog);
    }

    /// Open the detail view for `id`. A dangling id is a no-op: the current
    /// view is kept and nothing is recorded. On success the id lands in
    /// recently-viewed.
    pub(crate) fn show_detail(&mut self, catalog: &Catalog, store: &PreferenceStore, id: &str) -> bool {
        if catalog.find(id).is_none() {
            return false;
        }
        store.add_recently_viewed(id);
        self.navigate(View::Detail(id.to_string()));
        true
    }

    /// Start a document fetch. Only valid from `Detail(id)` for a record
    /// that actually has a document path; returns the path to fetch plus a
    /// staleness ticket.
    pub(crate) fn begin_document(&mut self, catalog: &Catalog) -> Option<(String, FetchTicket)> {
        let View::Detail(id) = &self.view else {
            return None;
        };
        let path = catalog.find(id)?.adr.file_path.clone()?;
        Some((
            path,
            FetchTicket {
                generation: self.generation,
            },
        ))
    }

    /// Complete a document fetch started by `begin_document`. A ticket from
    /// a superseded navigation is discarded.
    pub(crate) fn finish_document(
        &mut self,
        ticket: FetchTicket,
        result: Result<String, String>,
    ) -> DocumentOutcome {
        if ticket.generation != self.generation {
            return DocumentOutcome::Stale;
        }
        let View::Detail(id) = self.view.clone() else {
            return DocumentOutcome::Stale;
        };
        match result {
            Ok(text) => {
                self.navigate(View::Document(id));
                DocumentOutcome::Loaded(text)
            }
            Err(message) => DocumentOutcome::Failed(message),
        }
    }

    /// Back-navigation from `Document` returns to the owning detail view.
    pub(crate) fn back_from_document(&mut self) {
        if let View::Document(id) = self.view.clone() {
            self.navigate(View::Detail(id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{embedded_records, Catalog};
    use std::sync::atomic::{AtomicUsize, Ordering};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    fn fixtures() -> (Catalog, PreferenceStore) {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "patternbook-view-{}-{n}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        (
            Catalog::from_records(embedded_records()),
            PreferenceStore::open(dir),
        )
    }

    #[test]
    fn starts_at_catalog() {
        let ctrl = ViewController::new();
        assert_eq!(ctrl.view(), &View::Catalog);
    }

    #[test]
    fn show_view_exits_detail() {
        let (catalog, store) = fixtures();
        let mut ctrl = ViewController::new();
        assert!(ctrl.show_detail(&catalog, &store, "bloom-filter"));
        assert_eq!(ctrl.view(), &View::Detail("bloom-filter".to_string()));
        ctrl.show_view(View::Roadmap);
        assert_eq!(ctrl.view(), &View::Roadmap);
    }

    #[test]
    fn show_detail_unknown_id_is_noop() {
        let (catalog, store) = fixtures();
        let mut ctrl = ViewController::new();
        assert!(!ctrl.show_detail(&catalog, &store, "write-ahead-log"));
        assert_eq!(ctrl.view(), &View::Catalog);
        assert!(store.recently_viewed().is_empty());
    }

    #[test]
    fn show_detail_records_recently_viewed() {
        let (catalog, store) = fixtures();
        let mut ctrl = ViewController::new();
        ctrl.show_detail(&catalog, &store, "lsm-tree");
        ctrl.show_detail(&catalog, &store, "bloom-filter");
        assert_eq!(store.recently_viewed(), vec!["bloom-filter", "lsm-tree"]);
    }

    #[test]
    fn document_flow_success_and_back() {
        let (catalog, store) = fixtures();
        let mut ctrl = ViewController::new();
        ctrl.show_detail(&catalog, &store, "global-sequencer");
        let (path, ticket) = ctrl.begin_document(&catalog).unwrap();
        assert!(path.ends_with(".md"));
        let outcome = ctrl.finish_document(ticket, Ok("## Decision\nbody\n".to_string()));
        assert!(matches!(outcome, DocumentOutcome::Loaded(_)));
        assert_eq!(ctrl.view(), &View::Document("global-sequencer".to_string()));
        ctrl.back_from_document();
        assert_eq!(ctrl.view(), &View::Detail("global-sequencer".to_string()));
    }

    #[test]
    fn document_fetch_failure_keeps_detail_open() {
        let (catalog, store) = fixtures();
        let mut ctrl = ViewController::new();
        ctrl.show_detail(&catalog, &store, "global-sequencer");
        let (_, ticket) = ctrl.begin_document(&catalog).unwrap();
        let outcome = ctrl.finish_document(ticket, Err("connection refused".to_string()));
        assert_eq!(
            outcome,
            DocumentOutcome::Failed("connection refused".to_string())
        );
        assert_eq!(ctrl.view(), &View::Detail("global-sequencer".to_string()));
    }

    #[test]
    fn stale_fetch_result_is_discarded_after_navigation() {
        let (catalog, store) = fixtures();
        let mut ctrl = ViewController::new();
        ctrl.show_detail(&catalog, &store, "global-sequencer");
        let (_, ticket) = ctrl.begin_document(&catalog).unwrap();
        // User re-enters a different detail view before the fetch resolves.
        ctrl.show_detail(&catalog, &store, "bloom-filter");
        let outcome = ctrl.finish_document(ticket, Ok("## Decision\nlate\n".to_string()));
        assert_eq!(outcome, DocumentOutcome::Stale);
        assert_eq!(ctrl.view(), &View::Detail("bloom-filter".to_string()));
    }

    #[test]
    fn begin_document_requires_detail_with_file_path() {
        let (catalog, store) = fixtures();
        let mut ctrl = ViewController::new();
        assert!(ctrl.begin_document(&catalog).is_none());
        // bloom-filter has no long-form document.
        ctrl.show_detail(&catalog, &store, "bloom-filter");
        assert!(ctrl.begin_document(&catalog).is_none());
    }

    #[test]
    fn boxed_fetcher_fetches_through_trait_object() {
        let fetcher: Box<dyn DocumentFetcher> = Box::new(FileFetcher {
            root: PathBuf::from("assets"),
        });
        let doc = fetcher
            .as_ref()
            .fetch("docs/ADR-001-distributed-id-generation.md");
        assert!(doc.unwrap().contains("## "));
    }

    #[test]
    fn file_fetcher_rejects_traversal() {
        let fetcher = FileFetcher {
            root: PathBuf::from("assets"),
        };
        assert!(fetcher.fetch("../Cargo.toml").is_err());
        assert!(fetcher.fetch("/etc/hostname").is_err());
    }
}
