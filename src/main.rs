// Module declarations
mod cli;
mod types;
mod util;
mod filter;
mod store;
mod catalog;
mod roadmap;
mod docparse;
mod render;
mod view;
mod server;

// Re-export all module items at crate root so cross-module references work
// through a single namespace.
#[allow(unused_imports)]
pub(crate) use cli::*;
#[allow(unused_imports)]
pub(crate) use types::*;
#[allow(unused_imports)]
pub(crate) use util::*;
#[allow(unused_imports)]
pub(crate) use filter::*;
#[allow(unused_imports)]
pub(crate) use store::*;
#[allow(unused_imports)]
pub(crate) use catalog::*;
#[allow(unused_imports)]
pub(crate) use roadmap::*;
#[allow(unused_imports)]
pub(crate) use docparse::*;
#[allow(unused_imports)]
pub(crate) use render::*;
#[allow(unused_imports)]
pub(crate) use view::*;
#[allow(unused_imports)]
pub(crate) use server::*;

use clap::Parser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            bind,
            port,
            assets,
            state_dir,
            catalog_url,
        } => run_server(ServeOptions {
            bind,
            port,
            assets: resolve_assets_dir(assets),
            state_dir: resolve_state_dir(state_dir),
            catalog_url: resolve_catalog_url(catalog_url),
        }),

        Command::List {
            category,
            favorites,
            production,
            search,
            json,
        } => {
            let catalog = open_catalog();
            let store = open_store();
            let state = FilterState {
                category: category.unwrap_or_else(|| "all".to_string()),
                favorites_only: favorites,
                production_only: production,
                search: search.unwrap_or_default(),
            };
            let favorite_ids = store.favorites();
            let visible = filter::filter(catalog.records(), &state, &favorite_ids);
            if json {
                println!("{}", serde_json::to_string_pretty(&visible)?);
            } else if visible.is_empty() {
                println!("No patterns match.");
            } else {
                for rec in visible {
                    let marker = if favorite_ids.iter().any(|id| id == &rec.id) {
                        "*"
                    } else {
                        " "
                    };
                    println!(
                        "{marker} {:<24} {:<14} {:<12} {}",
                        rec.id,
                        rec.category,
                        rec.difficulty.label(),
                        rec.title
                    );
                }
            }
            Ok(())
        }

        Command::Show { id, json } => {
            let catalog = open_catalog();
            let store = open_store();
            let Some(rec) = catalog.find(&id) else {
                eprintln!("No such pattern: {id}");
                std::process::exit(2);
            };
            store.add_recently_viewed(&id);
            if json {
                println!("{}", serde_json::to_string_pretty(rec)?);
                return Ok(());
            }
            println!("{} ({})", rec.title, rec.id);
            println!(
                "{} | {} | {}",
                rec.category,
                rec.difficulty.label(),
                rec.read_time()
            );
            if let Some(status) = rec.status() {
                println!("Status: {status}");
            }
            if let Some(adr) = rec.adr_number() {
                println!("Decision record: {adr}");
            }
            println!();
            println!("{}", rec.description);
            println!();
            println!("Problem:      {}", strip_markup(&rec.adr.problem));
            println!("Context:      {}", strip_markup(&rec.adr.context));
            println!("Decision:     {}", strip_markup(&rec.adr.decision));
            if let Some(alt) = &rec.adr.alternatives {
                println!("Alternatives: {}", strip_markup(alt));
            }
            println!("Consequences: {}", strip_markup(&rec.adr.consequences));
            if !rec.stack.is_empty() {
                println!("Stack:        {}", rec.stack.join(", "));
            }
            if let Some(note) = store.note(&id) {
                println!();
                println!("Your note: {note}");
            }
            Ok(())
        }

        Command::Search { query } => {
            let catalog = open_catalog();
            let state = FilterState {
                search: query.clone(),
                ..FilterState::default()
            };
            let visible = filter::filter(catalog.records(), &state, &[]);
            if visible.is_empty() {
                println!("No patterns match \"{query}\".");
                return Ok(());
            }
            // ANSI bold for terminal output; the web markers stay in render.
            for rec in visible {
                println!(
                    "{:<24} {}",
                    rec.id,
                    highlight_with(&rec.title, &query, "\x1b[1m", "\x1b[0m")
                );
                println!(
                    "{:<24} {}",
                    "",
                    highlight_with(&rec.description, &query, "\x1b[1m", "\x1b[0m")
                );
            }
            Ok(())
        }

        Command::Roadmap { json } => {
            let catalog = open_catalog();
            let store = open_store();
            let completed = store.completed_modules();
            if json {
                let modules: Vec<serde_json::Value> = catalog
                    .modules()
                    .iter()
                    .map(|module| {
                        let mut value = serde_json::to_value(module).unwrap_or_default();
                        if let Some(map) = value.as_object_mut() {
                            map.insert(
                                "completed".to_string(),
                                serde_json::Value::Bool(
                                    completed.iter().any(|id| id == &module.id),
                                ),
                            );
                        }
                        value
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&modules)?);
                return Ok(());
            }
            for module in catalog.modules() {
                let mark = if completed.iter().any(|id| id == &module.id) {
                    "x"
                } else {
                    " "
                };
                println!(
                    "[{mark}] {} {:<36} {:<12} {}",
                    module.number,
                    module.title,
                    module.difficulty.label(),
                    module.estimated_time
                );
            }
            println!(
                "\n{} of {} modules completed",
                completed.len(),
                catalog.modules().len()
            );
            Ok(())
        }

        Command::Favorite { id } => {
            let catalog = open_catalog();
            if catalog.find(&id).is_none() {
                eprintln!("No such pattern: {id}");
                std::process::exit(2);
            }
            let store = open_store();
            if store.toggle_favorite(&id) {
                println!("Added {id} to favorites.");
            } else {
                println!("Removed {id} from favorites.");
            }
            Ok(())
        }

        Command::Complete { id } => {
            let catalog = open_catalog();
            if catalog.module(&id).is_none() {
                eprintln!("No such module: {id}");
                std::process::exit(2);
            }
            let store = open_store();
            if store.toggle_module_complete(&id) {
                println!("Marked {id} complete.");
            } else {
                println!("Marked {id} incomplete.");
            }
            Ok(())
        }

        Command::Note { id, set } => {
            let catalog = open_catalog();
            if catalog.find(&id).is_none() {
                eprintln!("No such pattern: {id}");
                std::process::exit(2);
            }
            let store = open_store();
            match set {
                Some(text) => {
                    store.save_note(&id, &text);
                    if text.trim().is_empty() {
                        println!("Cleared note on {id}.");
                    } else {
                        println!("Saved note on {id}.");
                    }
                }
                None => match store.note(&id) {
                    Some(note) => println!("{note}"),
                    None => println!("No note on {id}."),
                },
            }
            Ok(())
        }

        Command::Recent => {
            let catalog = open_catalog();
            let store = open_store();
            let recent = catalog.resolve_many(&store.recently_viewed());
            if recent.is_empty() {
                println!("Nothing viewed yet.");
            }
            for rec in recent {
                println!("{:<24} {}", rec.id, rec.title);
            }
            Ok(())
        }

        Command::Stats { json } => {
            let catalog = open_catalog();
            let summary = catalog.summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }
            println!("Patterns:   {}", summary.total_patterns);
            println!("Production: {}", summary.production);
            println!("Planned:    {}", summary.coming_soon);
            println!("Categories: {}", summary.categories);
            for (category, count) in catalog.category_counts() {
                println!("  {category}: {count}");
            }
            Ok(())
        }
    }
}

fn open_catalog() -> Catalog {
    Catalog::load(resolve_catalog_url(None).as_deref())
}

fn open_store() -> PreferenceStore {
    PreferenceStore::open(resolve_state_dir(None))
}
