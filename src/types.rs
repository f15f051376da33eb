use serde::{Deserialize, Serialize};

/// One catalog entry. Wire shape is camelCase JSON; unknown keys are ignored
/// so older catalog dumps with extra display fields still load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PatternRecord {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) category: String,
    pub(crate) icon: String,
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) tags: Vec<String>,
    pub(crate) difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) estimated_read_time: Option<String>,
    #[serde(default)]
    pub(crate) stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) metadata: Option<RecordMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) stats: Option<RecordStats>,
    pub(crate) adr: Adr,
    #[serde(default)]
    pub(crate) related_concepts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) external_links: Option<Vec<ExternalLink>>,
}

impl PatternRecord {
    pub(crate) fn status(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.status.as_deref())
    }

    pub(crate) fn adr_number(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.adr_number.as_deref())
    }

    pub(crate) fn prerequisites(&self) -> &[String] {
        self.metadata
            .as_ref()
            .map(|m| m.prerequisites.as_slice())
            .unwrap_or(&[])
    }

    /// Estimated read time, preferring an explicit value over the derived one.
    /// Derivation counts words in the description and ADR prose at 225 wpm.
    pub(crate) fn read_time(&self) -> String {
        if let Some(explicit) = &self.estimated_read_time {
            return explicit.clone();
        }
        let mut words = word_count(&self.description);
        words += word_count(&self.adr.problem);
        words += word_count(&self.adr.context);
        words += word_count(&self.adr.decision);
        if let Some(text) = &self.adr.alternatives {
            words += word_count(text);
        }
        if let Some(text) = &self.adr.architecture {
            words += word_count(text);
        }
        words += word_count(&self.adr.consequences);
        let minutes = words.div_ceil(225).max(1);
        format!("{minutes} min")
    }
}

fn word_count(text: &str) -> usize {
    crate::strip_markup(text).split_whitespace().count()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecordMetadata {
    #[serde(default)]
    pub(crate) date_added: Option<String>,
    #[serde(default)]
    pub(crate) source: Option<String>,
    #[serde(default)]
    pub(crate) status: Option<String>,
    #[serde(default)]
    pub(crate) adr_number: Option<String>,
    #[serde(default)]
    pub(crate) prerequisites: Vec<String>,
}

/// Free-form display metrics. Opaque strings, never computed on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RecordStats {
    #[serde(default)]
    pub(crate) throughput: Option<String>,
    #[serde(default)]
    pub(crate) latency: Option<String>,
    #[serde(default)]
    pub(crate) cost: Option<String>,
    #[serde(default)]
    pub(crate) savings: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Adr {
    pub(crate) problem: String,
    pub(crate) context: String,
    pub(crate) decision: String,
    #[serde(default)]
    pub(crate) alternatives: Option<String>,
    /// Trusted first-party markup, rendered verbatim into the detail view.
    #[serde(default)]
    pub(crate) architecture: Option<String>,
    pub(crate) consequences: String,
    /// Relative path of the long-form decision record, fetched on demand.
    #[serde(default)]
    pub(crate) file_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ExternalLink {
    pub(crate) name: String,
    pub(crate) url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

pub(crate) const STATUS_PRODUCTION: &str = "Production";
pub(crate) const STATUS_COMING_SOON: &str = "Coming Soon";

/// A curriculum unit. Defined in code, never mutated; only its completed
/// flag (held by the preference store) changes at runtime.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RoadmapModule {
    pub(crate) id: String,
    pub(crate) number: String,
    pub(crate) title: String,
    pub(crate) icon: String,
    pub(crate) difficulty: Difficulty,
    pub(crate) estimated_time: String,
    pub(crate) prerequisites: Vec<String>,
    pub(crate) description: String,
    pub(crate) topics: Vec<Topic>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Topic {
    pub(crate) title: String,
    pub(crate) description: String,
    /// PatternRecord id, or None when no deep-dive exists yet.
    pub(crate) pattern: Option<String>,
}

/// Transient filter inputs. Created at startup, mutated by user actions,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FilterState {
    pub(crate) category: String,
    pub(crate) favorites_only: bool,
    pub(crate) production_only: bool,
    pub(crate) search: String,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            category: "all".to_string(),
            favorites_only: false,
            production_only: false,
            search: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub(crate) fn parse(value: &str) -> Theme {
        match value {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub(crate) fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CatalogSummary {
    pub(crate) total_patterns: usize,
    pub(crate) production: usize,
    pub(crate) coming_soon: usize,
    pub(crate) categories: usize,
}
