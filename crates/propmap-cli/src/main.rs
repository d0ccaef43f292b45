use std::path::PathBuf;

use clap::{Parser, Subcommand};
use propmap_core::{
    compose::list_page,
    format::{concatenate_typologies, format_price_range},
    load_catalog, Catalog, PageItem, PageWindow, ViewMode, ViewState, ITEMS_PER_PAGE,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "propmap-cli")]
#[command(about = "Property catalog command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Catalog maintenance commands
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Print one page of the list view
    List {
        /// Page to print; out-of-range values are clamped like the web view
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Catalog file; defaults to `PROPMAP_CATALOG_PATH`
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Print the pagination window for a page
    Window {
        #[arg(long)]
        current: u32,
        #[arg(long)]
        total: u32,
    },
}

#[derive(Debug, Subcommand)]
enum CatalogCommands {
    /// Load and validate the catalog
    Check {
        /// Catalog file; defaults to `PROPMAP_CATALOG_PATH`
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    let config = propmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Catalog {
            command: CatalogCommands::Check { path },
        }) => {
            let path = path.unwrap_or(config.catalog_path);
            let catalog = load_catalog(&path)?;
            tracing::info!(path = %path.display(), "catalog is valid");
            println!("{}: {} properties", path.display(), catalog.len());
        }
        Some(Commands::List { page, path }) => {
            let catalog = load_catalog(&path.unwrap_or(config.catalog_path))?;
            print!("{}", render_list(&catalog, page));
        }
        Some(Commands::Window { current, total }) => {
            println!("{}", render_window(&PageWindow::compute(current, total)));
        }
        None => println!("propmap-cli ready; see --help for commands"),
    }

    Ok(())
}

fn render_list(catalog: &Catalog, page: u32) -> String {
    let total_pages = propmap_core::view_state::total_pages(catalog.len(), ITEMS_PER_PAGE);
    let state = ViewState {
        view: ViewMode::List,
        page: page.clamp(1, total_pages),
    };
    let list = list_page(catalog, state, ITEMS_PER_PAGE);

    if list.items.is_empty() {
        return "No properties found.\n".to_string();
    }

    let mut out = format!(
        "Showing {}-{} of {} (page {} of {})\n",
        list.showing.from, list.showing.to, list.showing.total, state.page, total_pages
    );
    for property in list.items {
        out.push_str(&format!(
            "{:>4}  {:<32} {:<20} {:<20} {}\n",
            property.id,
            property.name,
            property.micromarket,
            format_price_range(property.min_price, property.max_price),
            concatenate_typologies(&property.typologies),
        ));
    }
    out.push_str(&render_window(&list.window));
    out.push('\n');
    out
}

fn render_window(window: &PageWindow) -> String {
    let mut parts = Vec::with_capacity(window.items.len() + 2);
    if window.previous.is_some() {
        parts.push("<".to_string());
    }
    for item in &window.items {
        parts.push(match *item {
            PageItem::Page {
                number,
                current: true,
            } => format!("[{number}]"),
            PageItem::Page { number, .. } => number.to_string(),
            PageItem::Ellipsis => "...".to_string(),
        });
    }
    if window.next.is_some() {
        parts.push(">".to_string());
    }
    parts.join(" ")
}
