use crate::{FilterState, PatternRecord, STATUS_PRODUCTION};

pub(crate) const HIGHLIGHT_OPEN: &str = "<mark class=\"search-highlight\">";
pub(crate) const HIGHLIGHT_CLOSE: &str = "</mark>";

/// Narrow `records` to the visible subset, preserving input order.
/// Each step narrows the previous one: category, favorites, production
/// status, then free-text search.
pub(crate) fn filter<'a>(
    records: &'a [PatternRecord],
    state: &FilterState,
    favorites: &[String],
) -> Vec<&'a PatternRecord> {
    let query = state.search.trim().to_ascii_lowercase();
    records
        .iter()
        .filter(|rec| state.category == "all" || rec.category == state.category)
        .filter(|rec| !state.favorites_only || favorites.iter().any(|f| f == &rec.id))
        .filter(|rec| !state.production_only || rec.status() == Some(STATUS_PRODUCTION))
        .filter(|rec| query.is_empty() || matches_query(rec, &query))
        .collect()
}

/// Literal, case-insensitive substring match over title, description, tags,
/// and category. `query` must already be lowercased. No pattern syntax:
/// metacharacters in the query match themselves.
pub(crate) fn matches_query(record: &PatternRecord, query: &str) -> bool {
    record.title.to_ascii_lowercase().contains(query)
        || record.description.to_ascii_lowercase().contains(query)
        || record
            .tags
            .iter()
            .any(|tag| tag.to_ascii_lowercase().contains(query))
        || record.category.to_ascii_lowercase().contains(query)
}

/// Byte ranges of every case-insensitive occurrence of `query` in `text`.
/// ASCII case folding keeps byte offsets identical between the folded and
/// original strings.
fn match_spans(text: &str, query: &str) -> Vec<(usize, usize)> {
    if query.is_empty() {
        return Vec::new();
    }
    let haystack = text.to_ascii_lowercase();
    let needle = query.to_ascii_lowercase();
    let mut spans = Vec::new();
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(&needle) {
        let start = from + pos;
        spans.push((start, start + needle.len()));
        from = start + needle.len();
    }
    spans
}

/// Wrap every occurrence of `query` in highlight markers. Text outside the
/// matched spans passes through untouched; an empty query returns `text`
/// unchanged.
pub(crate) fn highlight(text: &str, query: &str) -> String {
    highlight_with(text, query, HIGHLIGHT_OPEN, HIGHLIGHT_CLOSE)
}

/// `highlight` with caller-chosen markers; the CLI passes ANSI codes here
/// instead of the web markers.
pub(crate) fn highlight_with(text: &str, query: &str, open: &str, close: &str) -> String {
    let spans = match_spans(text, query);
    if spans.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + spans.len() * 48);
    let mut cursor = 0;
    for (start, end) in spans {
        out.push_str(&text[cursor..start]);
        out.push_str(open);
        out.push_str(&text[start..end]);
        out.push_str(close);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Renderer-facing variant: matches against the raw text, then escapes each
/// segment on output so escaping can never split or fake a match boundary.
pub(crate) fn highlight_html(text: &str, query: &str) -> String {
    let spans = match_spans(text, query);
    if spans.is_empty() {
        return crate::escape_html(text);
    }
    let mut out = String::with_capacity(text.len() + spans.len() * 48);
    let mut cursor = 0;
    for (start, end) in spans {
        out.push_str(&crate::escape_html(&text[cursor..start]));
        out.push_str(HIGHLIGHT_OPEN);
        out.push_str(&crate::escape_html(&text[start..end]));
        out.push_str(HIGHLIGHT_CLOSE);
        cursor = end;
    }
    out.push_str(&crate::escape_html(&text[cursor..]));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::embedded_records;

    fn state() -> FilterState {
        FilterState::default()
    }

    #[test]
    fn identity_state_returns_all_records() {
        let records = embedded_records();
        let visible = filter(&records, &state(), &[]);
        assert_eq!(visible.len(), records.len());
        for (got, want) in visible.iter().zip(records.iter()) {
            assert_eq!(got.id, want.id);
        }
    }

    #[test]
    fn result_is_order_preserving_subsequence() {
        let records = embedded_records();
        let mut st = state();
        st.search = "e".to_string();
        let visible = filter(&records, &st, &[]);
        let mut last_index = 0;
        for rec in visible {
            let index = records.iter().position(|r| r.id == rec.id).unwrap();
            assert!(index >= last_index);
            last_index = index;
        }
    }

    #[test]
    fn category_and_search_narrow_together() {
        let records = embedded_records();
        let mut st = state();
        st.category = "Storage".to_string();
        st.search = "bloom".to_string();
        let visible = filter(&records, &st, &[]);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "bloom-filter");
    }

    #[test]
    fn favorites_only_uses_membership() {
        let records = embedded_records();
        let mut st = state();
        st.favorites_only = true;
        assert!(filter(&records, &st, &[]).is_empty());
        let favorites = vec!["lsm-tree".to_string()];
        let visible = filter(&records, &st, &favorites);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "lsm-tree");
    }

    #[test]
    fn production_only_checks_status() {
        let records = embedded_records();
        let mut st = state();
        st.production_only = true;
        let visible = filter(&records, &st, &[]);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "global-sequencer");
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let visible = filter(&[], &state(), &[]);
        assert!(visible.is_empty());
    }

    #[test]
    fn search_matches_tags_and_category() {
        let records = embedded_records();
        let mut st = state();
        st.search = "probabilistic".to_string();
        assert_eq!(filter(&records, &st, &[]).len(), 1);
        st.search = "consistency".to_string();
        let visible = filter(&records, &st, &[]);
        assert!(visible.iter().any(|r| r.id == "distributed-consensus"));
    }

    #[test]
    fn metacharacters_match_literally() {
        let records = embedded_records();
        let mut st = state();
        st.search = "(raft".to_string();
        // No panic, no pattern semantics: nothing contains "(raft".
        assert!(filter(&records, &st, &[]).is_empty());
        st.search = ".".to_string();
        // Literal dot appears in descriptions.
        assert!(!filter(&records, &st, &[]).is_empty());
    }

    #[test]
    fn highlight_empty_query_is_identity() {
        assert_eq!(highlight("Bloom Filter", ""), "Bloom Filter");
    }

    #[test]
    fn highlight_wraps_exact_span_case_insensitively() {
        let got = highlight("Bloom Filter", "bloom");
        assert_eq!(
            got,
            format!("{HIGHLIGHT_OPEN}Bloom{HIGHLIGHT_CLOSE} Filter")
        );
    }

    #[test]
    fn highlight_wraps_every_occurrence() {
        let got = highlight("raft and RAFT", "raft");
        assert_eq!(
            got,
            format!("{HIGHLIGHT_OPEN}raft{HIGHLIGHT_CLOSE} and {HIGHLIGHT_OPEN}RAFT{HIGHLIGHT_CLOSE}")
        );
    }

    #[test]
    fn highlight_no_match_leaves_text_alone() {
        assert_eq!(highlight("Bloom Filter", "zzz"), "Bloom Filter");
    }

    #[test]
    fn highlight_with_uses_caller_markers() {
        assert_eq!(
            highlight_with("Bloom Filter", "bloom", "\x1b[1m", "\x1b[0m"),
            "\x1b[1mBloom\x1b[0m Filter"
        );
        assert_eq!(highlight_with("Bloom Filter", "", "[", "]"), "Bloom Filter");
    }

    #[test]
    fn highlight_html_escapes_outside_and_inside_spans() {
        let got = highlight_html("a < Bloom", "bloom");
        assert_eq!(
            got,
            format!("a &lt; {HIGHLIGHT_OPEN}Bloom{HIGHLIGHT_CLOSE}")
        );
    }
}
