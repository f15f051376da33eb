//! Line-oriented parser for long-form decision-record documents. Splits on
//! level-2 headings into typed sections and renders each body with a small
//! markdown subset; no regex chains, no external parser state.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SectionKind {
    Problem,
    Decision,
    Rationale,
    Consequences,
    Alternatives,
    Implementation,
    Failure,
    Other,
}

impl SectionKind {
    /// CSS accent class for the section card.
    pub(crate) fn accent(self) -> &'static str {
        match self {
            SectionKind::Problem => "section-problem",
            SectionKind::Decision => "section-decision",
            SectionKind::Rationale => "section-rationale",
            SectionKind::Consequences => "section-consequences",
            SectionKind::Alternatives => "section-alternatives",
            SectionKind::Implementation => "section-implementation",
            SectionKind::Failure => "section-failure",
            SectionKind::Other => "section-other",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Section {
    pub(crate) title: String,
    pub(crate) kind: SectionKind,
    pub(crate) body_html: String,
}

/// Split a document at `## ` headings. Content before the first heading is
/// preamble and is dropped; heading emoji are stripped for display.
pub(crate) fn parse_sections(markdown: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut title: Option<String> = None;
    let mut body: Vec<&str> = Vec::new();

    for line in markdown.lines() {
        if let Some(heading) = line.strip_prefix("## ") {
            if let Some(prev) = title.take() {
                sections.push(finish_section(prev, &body));
            }
            title = Some(strip_heading_glyphs(heading));
            body.clear();
        } else if title.is_some() {
            body.push(line);
        }
    }
    if let Some(prev) = title {
        sections.push(finish_section(prev, &body));
    }
    sections
}

fn finish_section(title: String, body: &[&str]) -> Section {
    Section {
        kind: classify(&title),
        body_html: render_markdown(body),
        title,
    }
}

fn classify(title: &str) -> SectionKind {
    if title.contains("Context") || title.contains("Problem") {
        SectionKind::Problem
    } else if title.contains("Decision") {
        SectionKind::Decision
    } else if title.contains("Rationale") || title.contains("Why") {
        SectionKind::Rationale
    } else if title.contains("Consequence") {
        SectionKind::Consequences
    } else if title.contains("Alternative") {
        SectionKind::Alternatives
    } else if title.contains("Implementation") || title.contains("Capacity") {
        SectionKind::Implementation
    } else if title.contains("Break") || title.contains("Failure") {
        SectionKind::Failure
    } else {
        SectionKind::Other
    }
}

/// Remove emoji glyphs (and the variation selector) from a heading.
pub(crate) fn strip_heading_glyphs(heading: &str) -> String {
    heading
        .chars()
        .filter(|&ch| {
            !matches!(u32::from(ch),
                0x1F300..=0x1F9FF | 0x2600..=0x26FF | 0x2700..=0x27BF | 0xFE0F)
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Minimal line-oriented markdown renderer: paragraphs, `###`/`####`
/// subheadings, unordered and ordered lists, fenced code, and the inline
/// subset handled by `render_inline`. Everything is escaped on output.
fn render_markdown(lines: &[&str]) -> String {
    #[derive(PartialEq)]
    enum Block {
        None,
        Paragraph,
        Bullets,
        Ordered,
        Code,
    }

    let mut html = String::new();
    let mut block = Block::None;
    let mut paragraph: Vec<String> = Vec::new();

    fn close(block: &mut Block, paragraph: &mut Vec<String>, html: &mut String) {
        match block {
            Block::Paragraph => {
                html.push_str("<p>");
                html.push_str(&paragraph.join(" "));
                html.push_str("</p>\n");
                paragraph.clear();
            }
            Block::Bullets => html.push_str("</ul>\n"),
            Block::Ordered => html.push_str("</ol>\n"),
            Block::Code => html.push_str("</code></pre>\n"),
            Block::None => {}
        }
        *block = Block::None;
    }

    for raw in lines {
        let line = raw.trim_end();

        if block == Block::Code {
            if line.trim_start().starts_with("```") {
                close(&mut block, &mut paragraph, &mut html);
            } else {
                html.push_str(&crate::escape_html(line));
                html.push('\n');
            }
            continue;
        }

        let trimmed = line.trim_start();
        if trimmed.starts_with("```") {
            close(&mut block, &mut paragraph, &mut html);
            html.push_str("<pre><code>");
            block = Block::Code;
        } else if trimmed.is_empty() {
            close(&mut block, &mut paragraph, &mut html);
        } else if let Some(rest) = trimmed.strip_prefix("#### ") {
            close(&mut block, &mut paragraph, &mut html);
            html.push_str("<h4>");
            html.push_str(&render_inline(rest));
            html.push_str("</h4>\n");
        } else if let Some(rest) = trimmed.strip_prefix("### ") {
            close(&mut block, &mut paragraph, &mut html);
            html.push_str("<h3>");
            html.push_str(&render_inline(rest));
            html.push_str("</h3>\n");
        } else if let Some(rest) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            if block != Block::Bullets {
                close(&mut block, &mut paragraph, &mut html);
                html.push_str("<ul>\n");
                block = Block::Bullets;
            }
            html.push_str("<li>");
            html.push_str(&render_inline(rest));
            html.push_str("</li>\n");
        } else if let Some(rest) = strip_ordered_marker(trimmed) {
            if block != Block::Ordered {
                close(&mut block, &mut paragraph, &mut html);
                html.push_str("<ol>\n");
                block = Block::Ordered;
            }
            html.push_str("<li>");
            html.push_str(&render_inline(rest));
            html.push_str("</li>\n");
        } else {
            if block != Block::Paragraph {
                close(&mut block, &mut paragraph, &mut html);
                block = Block::Paragraph;
            }
            paragraph.push(render_inline(trimmed));
        }
    }
    close(&mut block, &mut paragraph, &mut html);
    html
}

fn strip_ordered_marker(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix(". ")
}

/// Inline subset: `code`, **bold**, [text](url). All other text is escaped.
fn render_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '`' {
            if let Some(end) = find_char(&chars, i + 1, '`') {
                out.push_str("<code>");
                out.push_str(&crate::escape_html(&collect(&chars[i + 1..end])));
                out.push_str("</code>");
                i = end + 1;
                continue;
            }
        }
        if chars[i] == '*' && i + 1 < chars.len() && chars[i + 1] == '*' {
            if let Some(end) = find_pair(&chars, i + 2) {
                out.push_str("<strong>");
                out.push_str(&crate::escape_html(&collect(&chars[i + 2..end])));
                out.push_str("</strong>");
                i = end + 2;
                continue;
            }
        }
        if chars[i] == '[' {
            if let Some((label_end, url_end)) = find_link(&chars, i) {
                let label = collect(&chars[i + 1..label_end]);
                let url = collect(&chars[label_end + 2..url_end]);
                out.push_str("<a href=\"");
                out.push_str(&crate::escape_html(&url));
                out.push_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
                out.push_str(&crate::escape_html(&label));
                out.push_str("</a>");
                i = url_end + 1;
                continue;
            }
        }
        out.push_str(&crate::escape_html(&chars[i].to_string()));
        i += 1;
    }
    out
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

fn find_char(chars: &[char], from: usize, target: char) -> Option<usize> {
    (from..chars.len()).find(|&i| chars[i] == target)
}

fn find_pair(chars: &[char], from: usize) -> Option<usize> {
    (from..chars.len().saturating_sub(1)).find(|&i| chars[i] == '*' && chars[i + 1] == '*')
}

/// Returns (index of `]`, index of `)`) for a `[label](url)` run at `start`.
fn find_link(chars: &[char], start: usize) -> Option<(usize, usize)> {
    let label_end = find_char(chars, start + 1, ']')?;
    if label_end + 1 >= chars.len() || chars[label_end + 1] != '(' {
        return None;
    }
    let url_end = find_char(chars, label_end + 2, ')')?;
    Some((label_end, url_end))
}
