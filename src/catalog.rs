use std::time::Duration;

use crate::{roadmap, CatalogSummary, PatternRecord, RoadmapModule, STATUS_COMING_SOON, STATUS_PRODUCTION};

/// Embedded fallback catalog, shape-compatible with the remote resource.
pub(crate) const EMBEDDED_PATTERNS: &str = include_str!("../data/patterns.json");

const FETCH_TIMEOUT_MS: u64 = 10_000;

/// Read-only pattern and roadmap data. Loaded once at startup; records are
/// immutable afterwards.
pub(crate) struct Catalog {
    records: Vec<PatternRecord>,
    modules: Vec<RoadmapModule>,
}

impl Catalog {
    /// Load the catalog, preferring `remote` when given. Any fetch or decode
    /// failure falls back to the embedded records; this never errors.
    pub(crate) fn load(remote: Option<&str>) -> Catalog {
        let records = match remote {
            Some(url) => match fetch_remote(url) {
                Ok(records) => records,
                Err(err) => {
                    eprintln!("catalog fetch failed ({err}); using embedded records");
                    embedded_records()
                }
            },
            None => embedded_records(),
        };
        Catalog {
            records,
            modules: roadmap::modules(),
        }
    }

    pub(crate) fn from_records(records: Vec<PatternRecord>) -> Catalog {
        Catalog {
            records,
            modules: roadmap::modules(),
        }
    }

    pub(crate) fn records(&self) -> &[PatternRecord] {
        &self.records
    }

    pub(crate) fn find(&self, id: &str) -> Option<&PatternRecord> {
        self.records.iter().find(|rec| rec.id == id)
    }

    pub(crate) fn modules(&self) -> &[RoadmapModule] {
        &self.modules
    }

    pub(crate) fn module(&self, id: &str) -> Option<&RoadmapModule> {
        self.modules.iter().find(|module| module.id == id)
    }

    /// Dangling ids are dropped rather than surfaced as errors.
    pub(crate) fn resolve_many(&self, ids: &[String]) -> Vec<&PatternRecord> {
        ids.iter().filter_map(|id| self.find(id)).collect()
    }

    /// Category names with record counts, in first-appearance order.
    pub(crate) fn category_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for rec in &self.records {
            match counts.iter_mut().find(|(name, _)| name == &rec.category) {
                Some((_, count)) => *count += 1,
                None => counts.push((rec.category.clone(), 1)),
            }
        }
        counts
    }

    pub(crate) fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            total_patterns: self.records.len(),
            production: self
                .records
                .iter()
                .filter(|rec| rec.status() == Some(STATUS_PRODUCTION))
                .count(),
            coming_soon: self
                .records
                .iter()
                .filter(|rec| rec.status() == Some(STATUS_COMING_SOON))
                .count(),
            categories: self.category_counts().len(),
        }
    }
}

fn fetch_remote(url: &str) -> Result<Vec<PatternRecord>, Box<dyn std::error::Error>> {
    let agent = ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_millis(FETCH_TIMEOUT_MS))
        .timeout_read(Duration::from_millis(FETCH_TIMEOUT_MS))
        .build();
    let records: Vec<PatternRecord> = agent.get(url).call()?.into_json()?;
    Ok(records)
}

pub(crate) fn embedded_records() -> Vec<PatternRecord> {
    match serde_json::from_str(EMBEDDED_PATTERNS) {
        Ok(records) => records,
        Err(err) => {
            eprintln!("embedded catalog is malformed: {err}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_records_parse_with_wire_schema() {
        let records = embedded_records();
        assert_eq!(records.len(), 4);
        for rec in &records {
            assert!(!rec.id.is_empty());
            assert!(!rec.adr.problem.is_empty());
        }
    }

    #[test]
    fn embedded_category_counts() {
        let catalog = Catalog::from_records(embedded_records());
        let counts = catalog.category_counts();
        for (category, count) in [
            ("Distributed", 1),
            ("Storage", 1),
            ("Consistency", 1),
            ("Persistence", 1),
        ] {
            let got = counts.iter().find(|(name, _)| name == category);
            assert_eq!(got.map(|(_, c)| *c), Some(count), "category {category}");
        }
    }

    #[test]
    fn load_falls_back_to_embedded_when_fetch_fails() {
        // Nothing listens here, so the fetch is refused immediately.
        let catalog = Catalog::load(Some("http://127.0.0.1:1/patterns.json"));
        assert_eq!(catalog.records().len(), 4);
        assert!(catalog.find("global-sequencer").is_some());
    }

    #[test]
    fn find_and_resolve_drop_dangling_ids() {
        let catalog = Catalog::from_records(embedded_records());
        assert!(catalog.find("bloom-filter").is_some());
        assert!(catalog.find("no-such-id").is_none());
        let resolved = catalog.resolve_many(&[
            "lsm-tree".to_string(),
            "time-ordering".to_string(),
        ]);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, "lsm-tree");
    }

    #[test]
    fn summary_counts_statuses() {
        let catalog = Catalog::from_records(embedded_records());
        let summary = catalog.summary();
        assert_eq!(summary.total_patterns, 4);
        assert_eq!(summary.production, 1);
        assert_eq!(summary.coming_soon, 0);
        assert_eq!(summary.categories, 4);
    }

    #[test]
    fn roadmap_pattern_links_resolve_or_are_absent() {
        let catalog = Catalog::from_records(embedded_records());
        for module in catalog.modules() {
            for topic in &module.topics {
                if let Some(id) = &topic.pattern {
                    // Linked deep-dives must exist in the embedded catalog.
                    assert!(catalog.find(id).is_some(), "dangling pattern {id}");
                }
            }
        }
    }

    #[test]
    fn read_time_prefers_explicit_value() {
        let catalog = Catalog::from_records(embedded_records());
        let rec = catalog.find("global-sequencer").unwrap();
        assert_eq!(rec.read_time(), "15 min");
        let consensus = catalog.find("distributed-consensus").unwrap();
        assert_eq!(consensus.read_time(), "10 min");
    }
}
