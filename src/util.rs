use std::env;
use std::path::PathBuf;

pub(crate) const DEFAULT_STATE_DIR: &str = ".patternbook";
pub(crate) const DEFAULT_ASSETS_DIR: &str = "assets";

pub(crate) fn env_optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// CLI flag wins, then PATTERNBOOK_STATE_DIR, then the default directory.
pub(crate) fn resolve_state_dir(cli: Option<PathBuf>) -> PathBuf {
    if let Some(path) = cli {
        return path;
    }
    if let Some(value) = env_optional("PATTERNBOOK_STATE_DIR") {
        return PathBuf::from(value);
    }
    PathBuf::from(DEFAULT_STATE_DIR)
}

pub(crate) fn resolve_assets_dir(cli: Option<PathBuf>) -> PathBuf {
    if let Some(path) = cli {
        return path;
    }
    if let Some(value) = env_optional("PATTERNBOOK_ASSETS") {
        return PathBuf::from(value);
    }
    PathBuf::from(DEFAULT_ASSETS_DIR)
}

pub(crate) fn resolve_catalog_url(cli: Option<String>) -> Option<String> {
    cli.or_else(|| env_optional("PATTERNBOOK_CATALOG_URL"))
}

/// Drop `<...>` spans so word counts and plain-text output ignore markup.
pub(crate) fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_markup_removes_tags_only() {
        assert_eq!(
            strip_markup("keys in an <span class='x'>LSM-Tree</span> index"),
            "keys in an LSM-Tree index"
        );
        assert_eq!(strip_markup("no markup here"), "no markup here");
    }

    #[test]
    fn strip_markup_handles_unclosed_tag() {
        assert_eq!(strip_markup("text <unterminated"), "text ");
    }
}
