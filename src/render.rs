use crate::docparse::Section;
use crate::{
    highlight_html, CatalogSummary, FilterState, PatternRecord, RoadmapModule, Theme,
    STATUS_PRODUCTION,
};

/// Escape text for interpolation into element content or quoted attributes.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn pattern_url(id: &str) -> String {
    format!("/pattern/{}", urlencoding::encode(id))
}

/// One grid card. Optional regions (ADR badge, stats, source) are omitted
/// entirely when the data is absent.
pub(crate) fn render_card(record: &PatternRecord, is_favorite: bool, query: &str) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "<article class=\"card cat-{}\">\n",
        escape_html(&record.category.to_ascii_lowercase())
    ));
    html.push_str(&format!(
        "<form method=\"post\" action=\"/favorite/{}\" class=\"fav-form\">\
         <button class=\"fav{}\" title=\"Toggle favorite\">&#9733;</button></form>\n",
        urlencoding::encode(&record.id),
        if is_favorite { " is-favorite" } else { "" }
    ));
    html.push_str("<div class=\"badges\">");
    html.push_str(&format!(
        "<span class=\"badge cat\">{}</span>",
        highlight_html(&record.category, query)
    ));
    html.push_str(&format!(
        "<span class=\"badge diff-{0}\">{0}</span>",
        record.difficulty.label()
    ));
    if let Some(adr) = record.adr_number() {
        html.push_str(&format!("<span class=\"badge adr\">{}</span>", escape_html(adr)));
    }
    html.push_str("</div>\n");
    html.push_str(&format!(
        "<h3><a href=\"{}\">{}</a></h3>\n",
        pattern_url(&record.id),
        highlight_html(&record.title, query)
    ));
    html.push_str(&format!(
        "<p class=\"desc\">{}</p>\n",
        highlight_html(&record.description, query)
    ));
    if let Some(stats) = &record.stats {
        html.push_str("<dl class=\"stats\">");
        for (label, value) in [
            ("Throughput", &stats.throughput),
            ("Latency", &stats.latency),
            ("Cost", &stats.cost),
            ("Savings", &stats.savings),
        ] {
            if let Some(value) = value {
                html.push_str(&format!(
                    "<div><dt>{label}</dt><dd>{}</dd></div>",
                    escape_html(value)
                ));
            }
        }
        html.push_str("</dl>\n");
    }
    if !record.tags.is_empty() {
        html.push_str("<div class=\"tags\">");
        for tag in record.tags.iter().take(3) {
            html.push_str(&format!(
                "<span class=\"badge tag\">{}</span>",
                highlight_html(tag, query)
            ));
        }
        html.push_str("</div>\n");
    }
    html.push_str("<footer class=\"card-meta\">");
    html.push_str(&format!("<span>{}</span>", escape_html(&record.read_time())));
    if let Some(source) = record.metadata.as_ref().and_then(|m| m.source.as_deref()) {
        html.push_str(&format!("<span>{}</span>", escape_html(source)));
    }
    html.push_str("</footer>\n</article>\n");
    html
}

/// The catalog view: summary stats, filter bar, search box, recently viewed
/// strip, and the card grid.
#[allow(clippy::too_many_arguments)]
pub(crate) fn render_grid(
    visible: &[&PatternRecord],
    counts: &[(String, usize)],
    total: usize,
    state: &FilterState,
    summary: &CatalogSummary,
    favorites: &[String],
    recent: &[&PatternRecord],
) -> String {
    let mut html = String::new();

    html.push_str("<section class=\"hero\">\n<h1>Architecture Pattern Catalog</h1>\n");
    html.push_str(&format!(
        "<p class=\"hero-stats\">{} patterns &middot; {} production &middot; {} coming soon &middot; {} categories</p>\n",
        summary.total_patterns, summary.production, summary.coming_soon, summary.categories
    ));
    html.push_str("</section>\n");

    html.push_str("<form method=\"get\" action=\"/\" class=\"search-bar\">\n");
    html.push_str(&format!(
        "<input type=\"search\" name=\"q\" value=\"{}\" placeholder=\"Search title, description, tags...\" autofocus>\n",
        escape_html(&state.search)
    ));
    if state.category != "all" {
        html.push_str(&format!(
            "<input type=\"hidden\" name=\"category\" value=\"{}\">\n",
            escape_html(&state.category)
        ));
    }
    if state.favorites_only {
        html.push_str("<input type=\"hidden\" name=\"favorites\" value=\"1\">\n");
    }
    if state.production_only {
        html.push_str("<input type=\"hidden\" name=\"production\" value=\"1\">\n");
    }
    html.push_str("<button>Search</button>\n</form>\n");

    html.push_str("<nav class=\"filters\">\n");
    html.push_str(&filter_link("all", total, state));
    for (category, count) in counts {
        html.push_str(&filter_link(category, *count, state));
    }
    html.push_str(&toggle_link(
        "favorites",
        "Favorites",
        state.favorites_only,
        state,
    ));
    html.push_str(&toggle_link(
        "production",
        STATUS_PRODUCTION,
        state.production_only,
        state,
    ));
    html.push_str("</nav>\n");

    if !recent.is_empty() {
        html.push_str("<div class=\"recent\"><span>Recently viewed:</span>");
        for rec in recent {
            html.push_str(&format!(
                " <a class=\"chip\" href=\"{}\">{}</a>",
                pattern_url(&rec.id),
                escape_html(&rec.title)
            ));
        }
        html.push_str("</div>\n");
    }

    if visible.is_empty() {
        html.push_str("<p class=\"empty\">No patterns match your filters</p>\n");
    } else {
        html.push_str("<div class=\"grid\">\n");
        for rec in visible {
            let is_favorite = favorites.iter().any(|f| f == &rec.id);
            html.push_str(&render_card(rec, is_favorite, state.search.trim()));
        }
        html.push_str("</div>\n");
    }
    html
}

fn filter_query(state: &FilterState, category: &str) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::new();
    if category != "all" {
        pairs.push(("category", category.to_string()));
    }
    if state.favorites_only {
        pairs.push(("favorites", "1".to_string()));
    }
    if state.production_only {
        pairs.push(("production", "1".to_string()));
    }
    if !state.search.is_empty() {
        pairs.push(("q", state.search.clone()));
    }
    if pairs.is_empty() {
        return "/".to_string();
    }
    let query: Vec<String> = pairs
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect();
    format!("/?{}", query.join("&"))
}

fn filter_link(category: &str, count: usize, state: &FilterState) -> String {
    let active = if state.category == category { " active" } else { "" };
    format!(
        "<a class=\"filter-btn{active}\" href=\"{}\">{} <span class=\"count\">{count}</span></a>\n",
        escape_html(&filter_query(state, category)),
        escape_html(category)
    )
}

fn toggle_link(param: &str, label: &str, on: bool, state: &FilterState) -> String {
    let mut next = state.clone();
    match param {
        "favorites" => next.favorites_only = !on,
        _ => next.production_only = !on,
    }
    let active = if on { " active" } else { "" };
    format!(
        "<a class=\"filter-btn toggle{active}\" href=\"{}\">{}</a>\n",
        escape_html(&filter_query(&next, &next.category.clone())),
        escape_html(label)
    )
}

fn chips(records: &[&PatternRecord]) -> String {
    let mut html = String::from("<div class=\"chips\">");
    for rec in records {
        html.push_str(&format!(
            "<a class=\"chip\" href=\"{}\">{}</a>",
            pattern_url(&rec.id),
            escape_html(&rec.title)
        ));
    }
    html.push_str("</div>");
    html
}

/// The detail view. `related` and `prerequisites` are already resolved;
/// dangling ids never reach this function.
pub(crate) fn render_detail(
    record: &PatternRecord,
    related: &[&PatternRecord],
    prerequisites: &[&PatternRecord],
    is_favorite: bool,
    note: Option<&str>,
) -> String {
    let mut html = String::new();

    html.push_str(&format!(
        "<nav class=\"breadcrumbs\"><a href=\"/\">Home</a> &rsaquo; <span>{}</span> &rsaquo; <strong>{}</strong></nav>\n",
        escape_html(&record.category),
        escape_html(&record.title)
    ));
    html.push_str("<a class=\"back\" href=\"/\">&larr; Back to Catalog</a>\n");

    html.push_str("<header class=\"detail-head\">\n");
    html.push_str(&format!(
        "<span class=\"kicker\">{} &middot; {}</span>\n",
        escape_html(record.adr_number().unwrap_or("Decision Record")),
        escape_html(&record.id.to_ascii_uppercase())
    ));
    html.push_str(&format!(
        "<form method=\"post\" action=\"/favorite/{}\" class=\"fav-form\">\
         <button class=\"fav{}\" title=\"Toggle favorite\">&#9733;</button></form>\n",
        urlencoding::encode(&record.id),
        if is_favorite { " is-favorite" } else { "" }
    ));
    html.push_str(&format!("<h1>{}</h1>\n", escape_html(&record.title)));
    html.push_str("<div class=\"badges\">");
    html.push_str(&format!(
        "<span class=\"badge diff-{0}\">{0}</span>",
        record.difficulty.label()
    ));
    for tag in &record.tags {
        html.push_str(&format!("<span class=\"badge tag\">{}</span>", escape_html(tag)));
    }
    html.push_str(&format!("<span class=\"badge\">{}</span>", escape_html(&record.read_time())));
    if let Some(status) = record.status() {
        html.push_str(&format!("<span class=\"badge status\">{}</span>", escape_html(status)));
    }
    html.push_str("</div>\n</header>\n");

    if record.adr.file_path.is_some() {
        html.push_str(&format!(
            "<div class=\"doc-banner\"><div><strong>Complete Architecture Decision Record</strong>\
             <p>Full details with cost analysis, production incidents, and failure modes</p></div>\
             <a class=\"button\" href=\"{}/document\">Read Full ADR &rarr;</a></div>\n",
            pattern_url(&record.id)
        ));
    }

    if let Some(stats) = &record.stats {
        html.push_str("<dl class=\"stats stats-wide\">");
        for (label, value) in [
            ("Throughput", &stats.throughput),
            ("Latency", &stats.latency),
            ("Cost", &stats.cost),
            ("Savings", &stats.savings),
        ] {
            if let Some(value) = value {
                html.push_str(&format!(
                    "<div><dt>{label}</dt><dd>{}</dd></div>",
                    escape_html(value)
                ));
            }
        }
        html.push_str("</dl>\n");
    }

    html.push_str("<div class=\"detail-body\">\n<div class=\"prose\">\n");
    html.push_str(&format!(
        "<section><h2>The Problem</h2><p class=\"lede\">{}</p></section>\n",
        escape_html(&record.adr.problem)
    ));
    html.push_str(&format!(
        "<section><h2>Engineering Context</h2><p>{}</p></section>\n",
        escape_html(&record.adr.context)
    ));
    html.push_str(&format!(
        "<section><h2>Proposed Decision</h2><p>{}</p></section>\n",
        escape_html(&record.adr.decision)
    ));
    if let Some(alternatives) = &record.adr.alternatives {
        html.push_str(&format!(
            "<section><h2>Alternatives Considered</h2><p>{}</p></section>\n",
            escape_html(alternatives)
        ));
    }
    if let Some(architecture) = &record.adr.architecture {
        // Trusted first-party markup per the data model.
        html.push_str(&format!(
            "<section><h2>Implementation Logic</h2>{architecture}</section>\n"
        ));
    }
    if !related.is_empty() {
        html.push_str("<section><h2>Related Concepts</h2>");
        html.push_str(&chips(related));
        html.push_str("</section>\n");
    }
    if !prerequisites.is_empty() {
        html.push_str("<section><h2>Prerequisites</h2>");
        html.push_str(&chips(prerequisites));
        html.push_str("</section>\n");
    }
    if let Some(links) = &record.external_links {
        html.push_str("<section><h2>Knowledge Base</h2><ul class=\"links\">");
        for link in links {
            html.push_str(&format!(
                "<li><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></li>",
                escape_html(&link.url),
                escape_html(&link.name)
            ));
        }
        html.push_str("</ul></section>\n");
    }
    html.push_str(&format!(
        "<section><h2>My Notes</h2>\
         <form method=\"post\" action=\"/note/{}\">\
         <textarea name=\"text\" placeholder=\"Add your personal notes, insights, or gotchas here...\">{}</textarea>\
         <button>Save Notes</button></form>\
         <p class=\"hint\">Notes are saved locally on this machine</p></section>\n",
        urlencoding::encode(&record.id),
        escape_html(note.unwrap_or(""))
    ));
    html.push_str("</div>\n<aside>\n");
    if !record.stack.is_empty() {
        html.push_str("<div class=\"panel stack\"><h4>Component Stack</h4><ul>");
        for item in &record.stack {
            html.push_str(&format!("<li>{}</li>", escape_html(item)));
        }
        html.push_str("</ul></div>\n");
    }
    html.push_str(&format!(
        "<div class=\"panel\"><h4>Verdict</h4><p class=\"verdict\">{}</p></div>\n",
        escape_html(&record.adr.consequences)
    ));
    if let Some(meta) = &record.metadata {
        let mut rows = String::new();
        if let Some(added) = &meta.date_added {
            rows.push_str(&format!("<div><span>Added</span><span>{}</span></div>", escape_html(added)));
        }
        if let Some(source) = &meta.source {
            rows.push_str(&format!("<div><span>Source</span><span>{}</span></div>", escape_html(source)));
        }
        rows.push_str(&format!(
            "<div><span>Difficulty</span><span class=\"badge diff-{0}\">{0}</span></div>",
            record.difficulty.label()
        ));
        html.push_str(&format!("<div class=\"panel\"><h4>Metadata</h4>{rows}</div>\n"));
    }
    html.push_str("</aside>\n</div>\n");
    html
}

/// A roadmap module card. `resolve` maps a topic's pattern id to a record;
/// unresolved links render as Coming Soon.
pub(crate) fn render_roadmap_module<'a>(
    module: &RoadmapModule,
    is_completed: bool,
    prereq_labels: &[String],
    resolve: impl Fn(&str) -> Option<&'a PatternRecord>,
) -> String {
    let available = module
        .topics
        .iter()
        .filter(|t| t.pattern.as_deref().and_then(&resolve).is_some())
        .count();

    let mut html = String::new();
    html.push_str(&format!(
        "<article class=\"module{}\">\n<header>\n",
        if is_completed { " completed" } else { "" }
    ));
    html.push_str(&format!(
        "<span class=\"module-number\">Module {}</span> <span class=\"badge diff-{1}\">{1}</span>",
        escape_html(&module.number),
        module.difficulty.label()
    ));
    if is_completed {
        html.push_str(" <span class=\"badge done\">Completed</span>");
    }
    html.push_str(&format!("\n<h3>{}</h3>\n", escape_html(&module.title)));
    html.push_str(&format!("<p>{}</p>\n", escape_html(&module.description)));
    html.push_str(&format!(
        "<p class=\"module-meta\">{} &middot; {available}/{} patterns",
        escape_html(&module.estimated_time),
        module.topics.len()
    ));
    if !prereq_labels.is_empty() {
        html.push_str(&format!(
            " &middot; Requires: {}",
            escape_html(&prereq_labels.join(", "))
        ));
    }
    html.push_str("</p>\n");
    html.push_str(&format!(
        "<form method=\"post\" action=\"/complete/{}\"><button class=\"check\">{}</button></form>\n",
        urlencoding::encode(&module.id),
        if is_completed { "Mark incomplete" } else { "Mark complete" }
    ));
    html.push_str("</header>\n<ul class=\"topics\">\n");
    for topic in &module.topics {
        let record = topic.pattern.as_deref().and_then(&resolve);
        html.push_str("<li>");
        match record {
            Some(rec) => html.push_str(&format!(
                "<a href=\"{}\"><strong>{}</strong></a> <span class=\"badge ok\">Available</span>",
                pattern_url(&rec.id),
                escape_html(&topic.title)
            )),
            None => html.push_str(&format!(
                "<strong>{}</strong> <span class=\"badge soon\">Coming Soon</span>",
                escape_html(&topic.title)
            )),
        }
        html.push_str(&format!(
            "<p>{}</p></li>\n",
            escape_html(&topic.description)
        ));
    }
    html.push_str("</ul>\n</article>\n");
    html
}

pub(crate) fn render_roadmap<'a>(
    modules: &[RoadmapModule],
    completed: &[String],
    resolve: impl Fn(&str) -> Option<&'a PatternRecord>,
) -> String {
    let done = modules
        .iter()
        .filter(|m| completed.iter().any(|c| c == &m.id))
        .count();
    let percent = if modules.is_empty() {
        0
    } else {
        done * 100 / modules.len()
    };

    let mut html = String::new();
    html.push_str("<section class=\"hero\"><h1>Learning Roadmap</h1>");
    html.push_str(&format!(
        "<p class=\"hero-stats\">{done}/{} modules completed &middot; {percent}%</p>",
        modules.len()
    ));
    html.push_str(&format!(
        "<div class=\"progress\"><div class=\"progress-fill\" style=\"width:{percent}%\"></div></div>"
    ));
    html.push_str("</section>\n");
    for module in modules {
        let is_completed = completed.iter().any(|c| c == &module.id);
        // Prerequisite labels show module numbers; unknown ids fall back to
        // the raw id rather than erroring.
        let prereq_labels: Vec<String> = module
            .prerequisites
            .iter()
            .map(|p| {
                modules
                    .iter()
                    .find(|m| &m.id == p)
                    .map(|m| m.number.clone())
                    .unwrap_or_else(|| p.clone())
            })
            .collect();
        html.push_str(&render_roadmap_module(
            module,
            is_completed,
            &prereq_labels,
            &resolve,
        ));
    }
    html
}

/// Long-form document view: parsed sections as collapsible cards, the first
/// three open.
pub(crate) fn render_document(record: &PatternRecord, sections: &[Section]) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "<a class=\"back\" href=\"{}\">&larr; Back to Pattern</a>\n",
        pattern_url(&record.id)
    ));
    html.push_str("<header class=\"detail-head\">");
    html.push_str("<span class=\"kicker\">Architecture Decision Record</span>");
    html.push_str(&format!("<h1>{}</h1></header>\n", escape_html(&record.title)));
    if let Some(stats) = &record.stats {
        html.push_str("<dl class=\"stats stats-wide\">");
        for (label, value) in [
            ("Throughput", &stats.throughput),
            ("Latency", &stats.latency),
            ("Cost", &stats.cost),
            ("Savings", &stats.savings),
        ] {
            if let Some(value) = value {
                html.push_str(&format!(
                    "<div><dt>{label}</dt><dd>{}</dd></div>",
                    escape_html(value)
                ));
            }
        }
        html.push_str("</dl>\n");
    }
    for (index, section) in sections.iter().enumerate() {
        html.push_str(&format!(
            "<details class=\"{}\"{}>\n<summary>{}</summary>\n<div class=\"prose\">{}</div>\n</details>\n",
            section.kind.accent(),
            if index < 3 { " open" } else { "" },
            escape_html(&section.title),
            section.body_html
        ));
    }
    html
}

/// Inline failure message for a region; the rest of the page stays usable.
pub(crate) fn render_error(heading: &str, message: &str) -> String {
    format!(
        "<div class=\"error\"><p class=\"error-title\">{}</p><p>{}</p></div>\n",
        escape_html(heading),
        escape_html(message)
    )
}

/// Extract the inner content of `<body>...</body>`; documents without a body
/// element are spliced whole. Inline scripts are carried across verbatim
/// (the reference sheet is a single trusted first-party resource).
pub(crate) fn extract_body(html: &str) -> &str {
    let lower = html.to_ascii_lowercase();
    let Some(open) = lower.find("<body") else {
        return html;
    };
    let Some(start) = lower[open..].find('>').map(|i| open + i + 1) else {
        return html;
    };
    let end = lower[start..]
        .find("</body>")
        .map(|i| start + i)
        .unwrap_or(html.len());
    &html[start..end]
}

/// Reference sheet view: the fundamentals asset's body content, spliced in
/// as-is. The asset is a trusted first-party resource.
pub(crate) fn render_reference_sheet(asset: &str) -> String {
    extract_body(asset).to_string()
}

const STYLE: &str = include_str!("../assets/style.css");

pub(crate) fn render_page(title: &str, theme: Theme, active: &str, body: &str) -> String {
    let tab = |href: &str, key: &str, label: &str| {
        format!(
            "<a class=\"tab{}\" href=\"{href}\">{label}</a>",
            if key == active { " active" } else { "" }
        )
    };
    format!(
        "<!DOCTYPE html>\n<html class=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{} - patternbook</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <header class=\"topbar\">\n<a class=\"brand\" href=\"/\">patternbook</a>\n\
         <nav>{}{}{}</nav>\n\
         <form method=\"post\" action=\"/theme\"><button class=\"theme-toggle\" title=\"Toggle theme\">{}</button></form>\n\
         </header>\n<main>\n{body}</main>\n</body>\n</html>\n",
        theme.as_str(),
        escape_html(title),
        tab("/", "catalog", "Patterns"),
        tab("/roadmap", "roadmap", "Roadmap"),
        tab("/fundamentals", "fundamentals", "Fundamentals"),
        match theme {
            Theme::Dark => "Light mode",
            Theme::Light => "Dark mode",
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{embedded_records, Catalog};

    #[test]
    fn escape_html_covers_the_dangerous_five() {
        assert_eq!(
            escape_html("<a href=\"x\" title='y'>&z</a>"),
            "&lt;a href=&quot;x&quot; title=&#39;y&#39;&gt;&amp;z&lt;/a&gt;"
        );
    }

    #[test]
    fn card_omits_optional_regions_when_absent() {
        let records = embedded_records();
        let bloom = records.iter().find(|r| r.id == "bloom-filter").unwrap();
        let html = render_card(bloom, false, "");
        // bloom-filter has no stats block and no adrNumber badge.
        assert!(!html.contains("class=\"stats\""));
        assert!(!html.contains("class=\"badge adr\""));
        let sequencer = records.iter().find(|r| r.id == "global-sequencer").unwrap();
        let html = render_card(sequencer, true, "");
        assert!(html.contains("class=\"stats\""));
        assert!(html.contains("ADR-001"));
        assert!(html.contains("is-favorite"));
    }

    #[test]
    fn card_escapes_record_text() {
        let mut records = embedded_records();
        records[0].title = "<script>alert(1)</script>".to_string();
        let html = render_card(&records[0], false, "");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn detail_renders_one_chip_when_one_related_id_resolves() {
        let catalog = Catalog::from_records(embedded_records());
        let record = catalog.find("lsm-tree").unwrap().clone();
        // Simulate relatedConcepts: ["lsm-tree", "bloom-filter"] where only
        // one id resolves.
        let related = catalog.resolve_many(&[
            "bloom-filter".to_string(),
            "write-ahead-log".to_string(),
        ]);
        assert_eq!(related.len(), 1);
        let html = render_detail(&record, &related, &[], false, None);
        assert_eq!(html.matches("class=\"chip\"").count(), 1);
        assert!(html.contains("Bloom Filter"));
    }

    #[test]
    fn detail_omits_absent_sections() {
        let catalog = Catalog::from_records(embedded_records());
        let record = catalog.find("bloom-filter").unwrap();
        let html = render_detail(record, &[], &[], false, None);
        assert!(!html.contains("Prerequisites"));
        assert!(!html.contains("Related Concepts"));
        assert!(!html.contains("doc-banner"));
        assert!(html.contains("Knowledge Base"));
    }

    #[test]
    fn roadmap_module_marks_missing_patterns_coming_soon() {
        let catalog = Catalog::from_records(embedded_records());
        let modules = catalog.modules();
        let foundations = &modules[0];
        let html = render_roadmap_module(foundations, false, &[], |id| catalog.find(id));
        assert!(html.contains("Available"));
        // Six of the seven foundation topics have no deep-dive yet.
        assert_eq!(html.matches("Coming Soon").count(), 6);
        assert!(html.contains("1/7 patterns"));
    }

    #[test]
    fn roadmap_progress_counts_completed() {
        let catalog = Catalog::from_records(embedded_records());
        let completed = vec!["00-foundations".to_string(), "01-requirements".to_string()];
        let html = render_roadmap(catalog.modules(), &completed, |id| catalog.find(id));
        assert!(html.contains("2/16 modules completed"));
        assert!(html.contains("width:12%"));
    }

    #[test]
    fn extract_body_returns_inner_content() {
        let html = "<html><head><title>x</title></head><body class=\"a\"><p>hi</p></body></html>";
        assert_eq!(extract_body(html), "<p>hi</p>");
        assert_eq!(extract_body("<p>no body tag</p>"), "<p>no body tag</p>");
    }

    #[test]
    fn page_shell_carries_theme_class_and_active_tab() {
        let html = render_page("Catalog", Theme::Dark, "roadmap", "<p>x</p>");
        assert!(html.contains("<html class=\"dark\">"));
        assert!(html.contains("class=\"tab active\" href=\"/roadmap\""));
    }
}
