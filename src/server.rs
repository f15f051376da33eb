use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::Utc;
use tiny_http::{Header, Method, Response, Server};
use url::form_urlencoded;

use crate::{
    docparse, render, Catalog, DocumentFetcher, DocumentOutcome, FileFetcher, FilterState,
    HttpFetcher, PreferenceStore, View, ViewController,
};

const DOC_FETCH_TIMEOUT_MS: u64 = 10_000;

pub(crate) struct ServeOptions {
    pub(crate) bind: String,
    pub(crate) port: u16,
    pub(crate) assets: PathBuf,
    pub(crate) state_dir: PathBuf,
    pub(crate) catalog_url: Option<String>,
}

type Reply = Response<io::Cursor<Vec<u8>>>;

pub(crate) fn run_server(opts: ServeOptions) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::load(opts.catalog_url.as_deref());
    let store = PreferenceStore::open(opts.state_dir.clone());
    // Documents resolve against the same base the catalog came from.
    let fetcher: Box<dyn DocumentFetcher> = match opts.catalog_url.as_deref().and_then(|u| u.rsplit_once('/')) {
        Some((base, _)) => Box::new(HttpFetcher {
            base: base.to_string(),
            timeout_ms: DOC_FETCH_TIMEOUT_MS,
        }),
        None => Box::new(FileFetcher {
            root: opts.assets.clone(),
        }),
    };
    let mut ctrl = ViewController::new();

    let addr = format!("{}:{}", opts.bind, opts.port);
    let server = Server::http(&addr)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("server: {e}")))?;
    eprintln!("patternbook listening on http://{addr}");

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();
        let response = route(&mut ctrl, &catalog, &store, fetcher.as_ref(), &opts, &mut request);
        let status = response.status_code().0;
        eprintln!(
            "{} {method} {url} {status}",
            Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
        );
        let _ = request.respond(response);
    }
    Ok(())
}

fn route(
    ctrl: &mut ViewController,
    catalog: &Catalog,
    store: &PreferenceStore,
    fetcher: &dyn DocumentFetcher,
    opts: &ServeOptions,
    request: &mut tiny_http::Request,
) -> Reply {
    let url = request.url().to_string();
    let (path, query) = match url.split_once('?') {
        Some((path, query)) => (path.to_string(), query.to_string()),
        None => (url, String::new()),
    };
    let params: HashMap<String, String> = form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (request.method(), segments.as_slice()) {
        (Method::Get, []) => {
            ctrl.show_catalog();
            let state = filter_state(&params);
            html(render_catalog(catalog, store, &state))
        }
        (Method::Get, ["roadmap"]) => {
            ctrl.show_view(View::Roadmap);
            let body = render::render_roadmap(catalog.modules(), &store.completed_modules(), |id| {
                catalog.find(id)
            });
            html(render::render_page("Roadmap", store.theme(), "roadmap", &body))
        }
        (Method::Get, ["fundamentals"]) => {
            ctrl.show_view(View::ReferenceSheet);
            let body = match fs::read_to_string(opts.assets.join("fundamentals.html")) {
                Ok(doc) => render::render_reference_sheet(&doc),
                Err(err) => render::render_error("Failed to load fundamentals", &err.to_string()),
            };
            html(render::render_page(
                "Fundamentals",
                store.theme(),
                "fundamentals",
                &body,
            ))
        }
        (Method::Get, ["pattern", id]) => {
            let id = decode(id);
            if !ctrl.show_detail(catalog, store, &id) {
                return not_found();
            }
            html(render_detail_page(catalog, store, &id))
        }
        (Method::Get, ["pattern", id, "document"]) => {
            let id = decode(id);
            if !matches!(ctrl.view(), View::Detail(current) if current == &id)
                && !ctrl.show_detail(catalog, store, &id)
            {
                return not_found();
            }
            let Some((doc_path, ticket)) = ctrl.begin_document(catalog) else {
                return not_found();
            };
            let record = match catalog.find(&id) {
                Some(record) => record,
                None => return not_found(),
            };
            match ctrl.finish_document(ticket, fetcher.fetch(&doc_path)) {
                DocumentOutcome::Loaded(text) => {
                    let sections = docparse::parse_sections(&text);
                    let body = render::render_document(record, &sections);
                    html(render::render_page(&record.title, store.theme(), "catalog", &body))
                }
                DocumentOutcome::Failed(message) => {
                    // Detail stays open with an inline error above it.
                    let mut body = render::render_error("Failed to load the decision record", &message);
                    body.push_str(&render_detail_page_body(catalog, store, &id));
                    html(render::render_page(&record.title, store.theme(), "catalog", &body))
                }
                DocumentOutcome::Stale => not_found(),
            }
        }
        (Method::Post, ["favorite", id]) => {
            store.toggle_favorite(&decode(id));
            redirect(&referer_or(request, "/"))
        }
        (Method::Post, ["complete", id]) => {
            store.toggle_module_complete(&decode(id));
            redirect(&referer_or(request, "/roadmap"))
        }
        (Method::Post, ["note", id]) => {
            let id = decode(id);
            let form = read_form(request);
            store.save_note(&id, form.get("text").map(String::as_str).unwrap_or(""));
            redirect(&format!("/pattern/{}", urlencoding::encode(&id)))
        }
        (Method::Post, ["theme"]) => {
            store.toggle_theme();
            redirect(&referer_or(request, "/"))
        }
        (Method::Get, ["assets", ..]) => serve_asset(&opts.assets, &segments[1..]),
        _ => not_found(),
    }
}

fn render_catalog(catalog: &Catalog, store: &PreferenceStore, state: &FilterState) -> String {
    let favorites = store.favorites();
    let visible = crate::filter(catalog.records(), state, &favorites);
    let recent_ids = store.recently_viewed();
    let recent = catalog.resolve_many(&recent_ids);
    let body = render::render_grid(
        &visible,
        &catalog.category_counts(),
        catalog.records().len(),
        state,
        &catalog.summary(),
        &favorites,
        &recent,
    );
    render::render_page("Catalog", store.theme(), "catalog", &body)
}

fn render_detail_page(catalog: &Catalog, store: &PreferenceStore, id: &str) -> String {
    let body = render_detail_page_body(catalog, store, id);
    let title = catalog.find(id).map(|r| r.title.clone()).unwrap_or_default();
    render::render_page(&title, store.theme(), "catalog", &body)
}

fn render_detail_page_body(catalog: &Catalog, store: &PreferenceStore, id: &str) -> String {
    let Some(record) = catalog.find(id) else {
        return render::render_error("Pattern not found", id);
    };
    let related = catalog.resolve_many(&record.related_concepts);
    let prerequisites = catalog.resolve_many(record.prerequisites());
    let note = store.note(id);
    render::render_detail(
        record,
        &related,
        &prerequisites,
        store.is_favorite(id),
        note.as_deref(),
    )
}

fn filter_state(params: &HashMap<String, String>) -> FilterState {
    FilterState {
        category: params
            .get("category")
            .cloned()
            .unwrap_or_else(|| "all".to_string()),
        favorites_only: params.get("favorites").map(String::as_str) == Some("1"),
        production_only: params.get("production").map(String::as_str) == Some("1"),
        search: params.get("q").cloned().unwrap_or_default(),
    }
}

fn decode(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

fn read_form(request: &mut tiny_http::Request) -> HashMap<String, String> {
    let mut body = String::new();
    if request.as_reader().read_to_string(&mut body).is_err() {
        return HashMap::new();
    }
    form_urlencoded::parse(body.as_bytes()).into_owned().collect()
}

fn referer_or(request: &tiny_http::Request, fallback: &str) -> String {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv("Referer"))
        .map(|h| h.value.as_str().to_string())
        .unwrap_or_else(|| fallback.to_string())
}

fn html(body: String) -> Reply {
    let header = Header::from_bytes(&b"Content-Type"[..], &b"text/html; charset=utf-8"[..])
        .unwrap_or_else(|_| unreachable!("static header"));
    Response::from_string(body).with_header(header)
}

fn redirect(location: &str) -> Reply {
    match Header::from_bytes(&b"Location"[..], location.as_bytes()) {
        Ok(header) => Response::from_string("")
            .with_status_code(303)
            .with_header(header),
        Err(()) => not_found(),
    }
}

fn not_found() -> Reply {
    Response::from_string("not found").with_status_code(404)
}

fn serve_asset(root: &Path, segments: &[&str]) -> Reply {
    if segments.is_empty() {
        return not_found();
    }
    let mut path = root.to_path_buf();
    for segment in segments {
        // Validate after percent-decoding so encoded traversal cannot slip
        // through as a literal segment.
        let segment = decode(segment);
        if segment.is_empty()
            || segment == ".."
            || segment.contains('/')
            || segment.contains('\\')
        {
            return not_found();
        }
        path.push(segment);
    }
    let Ok(bytes) = fs::read(&path) else {
        return not_found();
    };
    let content_type = match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("json") => "application/json",
        Some("md") => "text/markdown; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    };
    let header = Header::from_bytes(&b"Content-Type"[..], content_type.as_bytes())
        .unwrap_or_else(|_| unreachable!("static header"));
    Response::from_data(bytes).with_header(header)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_state_reads_query_params() {
        let mut params = HashMap::new();
        params.insert("category".to_string(), "Storage".to_string());
        params.insert("q".to_string(), "bloom".to_string());
        params.insert("favorites".to_string(), "1".to_string());
        let state = filter_state(&params);
        assert_eq!(state.category, "Storage");
        assert_eq!(state.search, "bloom");
        assert!(state.favorites_only);
        assert!(!state.production_only);
    }

    #[test]
    fn filter_state_defaults_to_identity() {
        let state = filter_state(&HashMap::new());
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn decode_handles_percent_sequences() {
        assert_eq!(decode("bloom%2Dfilter"), "bloom-filter");
        assert_eq!(decode("plain"), "plain");
    }

    #[test]
    fn serve_asset_rejects_traversal_encoded_or_not() {
        let root = PathBuf::from("assets");
        assert_eq!(serve_asset(&root, &["..", "Cargo.toml"]).status_code().0, 404);
        assert_eq!(serve_asset(&root, &["%2e%2e", "Cargo.toml"]).status_code().0, 404);
        assert_eq!(serve_asset(&root, &["%2e%2e%2fCargo.toml"]).status_code().0, 404);
        assert_eq!(serve_asset(&root, &["docs%2f.."]).status_code().0, 404);
        assert_eq!(serve_asset(&root, &[""]).status_code().0, 404);
    }

    #[test]
    fn serve_asset_serves_files_under_the_root() {
        let root = PathBuf::from("assets");
        let reply = serve_asset(&root, &["style.css"]);
        assert_eq!(reply.status_code().0, 200);
        let reply = serve_asset(&root, &["docs", "ADR-001-distributed-id-generation.md"]);
        assert_eq!(reply.status_code().0, 200);
    }
}
