//! inkpost CLI - markdown blog engine

use clap::{Parser, Subcommand};
use inkpost::{Blog, PageStatus};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "inkpost")]
#[command(about = "A markdown blog engine with static site output", long_about = None)]
struct Cli {
    /// Blog directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create blog.yaml and a first post
    Init,

    /// Parse a markdown file and print its frontmatter and body as JSON
    Parse {
        /// File to parse
        file: PathBuf,
    },

    /// List posts, newest first
    List,

    /// Show posts grouped by year
    Archive,

    /// Show tags with post counts
    Tags,

    /// Print the HTML of one page
    Show {
        /// Route, e.g. "/", "/archive", "#/post/hello-world"
        #[arg(default_value = "/")]
        route: String,
    },

    /// Format a YYYY-MM-DD date for display
    FormatDate {
        date: String,
    },

    /// Write the static site to the output directory
    Build,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => init_blog(&cli.root).await,
        Commands::Parse { file } => parse_file(&file).await,
        Commands::List => list_posts(&cli.root).await,
        Commands::Archive => show_archive(&cli.root).await,
        Commands::Tags => show_tags(&cli.root).await,
        Commands::Show { route } => show_page(&cli.root, &route).await,
        Commands::FormatDate { date } => {
            println!("{}", inkpost::format_date(&date));
            Ok(())
        }
        Commands::Build => build_site(&cli.root).await,
    };

    if let Err(e) = &result {
        if let Some(hint) = e.downcast_ref::<inkpost::Error>().and_then(|e| e.suggestion()) {
            eprintln!("hint: {}", hint);
        }
    }
    result
}

async fn init_blog(path: &Path) -> anyhow::Result<()> {
    println!("Initializing blog at {:?}...", path);
    let blog = Blog::init(path).await?;

    println!("Blog initialized with {} post(s).", blog.posts().len());
    println!();
    println!("Layout:");
    println!("  blog.yaml    - Site settings");
    println!("  {}/       - Markdown posts", blog.config.posts_dir.display());
    println!("  templates/   - Optional template overrides");
    println!();
    println!("Next: inkpost build");
    Ok(())
}

async fn parse_file(file: &Path) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(file).await?;
    let parsed = inkpost::parse_frontmatter(&content);
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}

async fn list_posts(path: &Path) -> anyhow::Result<()> {
    let blog = Blog::open(path).await?;

    if blog.posts().is_empty() {
        println!("No posts found.");
        return Ok(());
    }

    for post in blog.posts() {
        let summary = post.summary();
        let date = summary.date.as_deref().unwrap_or("----------");
        print!("{}  {}  {}", date, summary.slug, summary.title);
        if !summary.tags.is_empty() {
            print!("  [{}]", summary.tags.join(", "));
        }
        println!();
    }
    println!("({} post(s))", blog.posts().len());
    Ok(())
}

async fn show_archive(path: &Path) -> anyhow::Result<()> {
    let blog = Blog::open(path).await?;

    for group in blog.archive() {
        println!("{}", group.year);
        for post in &group.posts {
            println!(
                "  {}  {}",
                post.date_display.as_deref().unwrap_or_default(),
                post.title
            );
        }
    }
    Ok(())
}

async fn show_tags(path: &Path) -> anyhow::Result<()> {
    let blog = Blog::open(path).await?;
    let tags = blog.tag_cloud();

    if tags.is_empty() {
        println!("No tags found.");
        return Ok(());
    }
    for entry in tags {
        println!("  {} ({})", entry.tag, entry.count);
    }
    Ok(())
}

async fn show_page(path: &Path, route: &str) -> anyhow::Result<()> {
    let blog = Blog::open(path).await?;
    let page = blog.render_path(route)?;

    if page.status == PageStatus::NotFound {
        tracing::warn!("No page for {:?}", route);
    }
    print!("{}", page.html);
    Ok(())
}

async fn build_site(path: &Path) -> anyhow::Result<()> {
    let blog = Blog::open(path).await?;
    println!("Building {} post(s)...", blog.posts().len());

    let report = blog.build().await?;
    println!("Wrote {} page(s) to {:?}", report.pages, report.output_dir);
    Ok(())
}
