use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

use decor_atlas::config::load_startup_config;
use decor_atlas::content::{filter_by_category, visible_tags, FallbackPolicy, Fetched};
use decor_atlas::lifecycle::Site;
use decor_atlas::navigation::{Activation, MemoryHistory, NavigationMode};
use decor_atlas::observability::logging;

#[derive(Parser)]
#[command(name = "atlas-cli")]
#[command(about = "Inspect routes and content of The Decor Atlas", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serve everything from the fallback catalog.
    #[arg(long)]
    offline: bool,

    /// Use hash routing regardless of configuration.
    #[arg(long)]
    hash: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which view a path resolves to
    Resolve { path: String },
    /// List journal posts
    Posts,
    /// Show a single post
    Post { slug: String },
    /// List navigation tags
    Tags,
    /// Show a tag and one page of its posts
    Tag {
        slug: String,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Search post titles
    Search { query: String },
    /// List shop products
    Products {
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Follow links in order through an in-memory session
    Browse {
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_startup_config(cli.config.as_deref())?;
    if cli.offline {
        config.content.fallback = FallbackPolicy::Always;
    }
    if cli.hash {
        config.navigation.mode = NavigationMode::Hash;
    }
    logging::init_logging(&config.observability);

    let site = Site::bootstrap(&config)?;
    let content = &site.content;

    match cli.command {
        Commands::Resolve { path } => print_json(&site.routes.resolve(&path))?,
        Commands::Posts => print_fetched(content.list_posts().await)?,
        Commands::Post { slug } => print_fetched(content.get_post_by_slug(&slug).await)?,
        Commands::Tags => print_fetched(content.list_tags().await.map(visible_tags))?,
        Commands::Tag { slug, page } => {
            let tag = content.get_tag_by_slug(&slug).await;
            let posts = content
                .list_posts_by_tag(&slug, page, config.content.category_page_size)
                .await;
            print_json(&json!({ "tag": tag, "posts": posts }))?;
        }
        Commands::Search { query } => print_fetched(content.search_posts(&query).await)?,
        Commands::Products { category } => {
            let fetched = content.list_products().await;
            let filtered: Vec<_> = filter_by_category(&fetched.data, category.as_deref())
                .into_iter()
                .cloned()
                .collect();
            print_json(&json!({ "data": filtered, "origin": fetched.origin }))?;
        }
        Commands::Browse { paths } => browse(&site, &paths).await?,
    }

    Ok(())
}

async fn browse(site: &Site, paths: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let history = Arc::new(MemoryHistory::new("/"));
    let session = site.session(history.clone())?;
    session.ready().await?;

    for path in paths {
        let activation = session.navigate(path);
        let page = session.ready().await?;
        let outcome = match &activation {
            Activation::Navigated(_) => "navigated",
            Activation::Deferred => "deferred",
            Activation::Reloaded { .. } => "reloaded",
        };

        print_json(&json!({
            "path": path,
            "href": history.href(),
            "activation": outcome,
            "location": session.location().as_ref(),
            "page": page.as_ref(),
        }))?;
    }
    Ok(())
}

fn print_fetched<T: Serialize>(fetched: Fetched<T>) -> Result<(), Box<dyn std::error::Error>> {
    print_json(&fetched)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
