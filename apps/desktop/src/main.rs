use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use client_core::{
    load_settings, to_import_payload, CatalogApi, CatalogClient, ListQuery, SearchApi,
    SettingsOverrides, UNKNOWN_AUTHOR,
};
use serde::Serialize;
use shared::{
    domain::{BookId, Rating, SortOrder},
    protocol::{Book, BookDraft, BookUpdate, ReviewDraft},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "catalog", about = "Command-line client for the book catalog")]
struct Args {
    /// TOML settings file; `catalog.toml` in the working directory is used when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    catalog_url: Option<String>,
    #[arg(long, global = true)]
    search_url: Option<String>,
    #[arg(long, global = true)]
    page_size: Option<u32>,
    /// Print raw JSON instead of a text summary.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List books in the catalog.
    List {
        #[arg(long)]
        page: Option<u32>,
        /// Title or author substring.
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
    },
    /// Show one book with its reviews.
    Show { id: i64 },
    /// Add a book by hand.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long, default_value = "")]
        isbn: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        cover_url: String,
    },
    /// Change title and/or author. An omitted or blank value keeps the current one.
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
    },
    /// Delete a book and its reviews.
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Add a review to a book.
    Review {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Search the external catalog.
    Search { query: String },
    /// Search the external catalog and import one result.
    Import {
        query: String,
        /// Position of the result to import.
        #[arg(long, default_value_t = 0)]
        index: usize,
    },
    /// Check that the catalog service is reachable.
    Health,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum SortArg {
    CreatedAt,
    Title,
    Author,
}

impl From<SortArg> for SortOrder {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::CreatedAt => SortOrder::CreatedAt,
            SortArg::Title => SortOrder::Title,
            SortArg::Author => SortOrder::Author,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let settings = load_settings(
        args.config.as_deref(),
        SettingsOverrides {
            catalog_url: args.catalog_url,
            search_url: args.search_url,
            page_size: args.page_size,
        },
    )?;
    let catalog = settings.catalog_client();
    let json = args.json;

    match args.command {
        Command::List { page, search, sort } => {
            let query = ListQuery {
                page,
                search,
                sort_by: sort.map(SortOrder::from),
                ..ListQuery::first_page(settings.page_size)
            };
            let page = catalog.list_books(&query).await?;
            if json {
                return print_json(&page);
            }
            for book in &page.books {
                println!("{}", summary_line(book));
            }
            if let (Some(total), Some(current), Some(pages)) =
                (page.total, page.current_page, page.pages)
            {
                println!("-- page {current}/{pages}, {total} books");
            }
        }
        Command::Show { id } => {
            let book = catalog.get_book(BookId(id)).await?;
            if json {
                return print_json(&book);
            }
            print_detail(&book);
        }
        Command::Add {
            title,
            author,
            isbn,
            description,
            cover_url,
        } => {
            let draft = BookDraft {
                title: required("title", &title)?,
                author: required("author", &author)?,
                isbn: isbn.trim().to_string(),
                description: description.trim().to_string(),
                cover_url: cover_url.trim().to_string(),
            };
            let book = catalog.create_book(&draft).await?;
            report_book(json, "Added", &book)?;
        }
        Command::Edit { id, title, author } => {
            let id = BookId(id);
            let current = catalog.get_book(id).await?;
            let update = BookUpdate {
                title: Some(keep_or_replace(title.as_deref(), &current.title)),
                author: Some(keep_or_replace(author.as_deref(), &current.author)),
            };
            let book = catalog.update_book(id, &update).await?;
            report_book(json, "Updated", &book)?;
        }
        Command::Delete { id, yes } => {
            let id = BookId(id);
            if !yes {
                let book = catalog.get_book(id).await?;
                if !confirm(&format!(
                    "Delete \"{}\" and all of its reviews? [y/N] ",
                    book.title
                ))? {
                    println!("Cancelled");
                    return Ok(());
                }
            }
            catalog.delete_book(id).await?;
            tracing::info!(book_id = id.0, "book deleted");
            println!("Deleted book {id}");
        }
        Command::Review {
            id,
            name,
            rating,
            comment,
        } => {
            let review = ReviewDraft {
                user_name: required("name", &name)?,
                rating: Rating::try_from(rating)?,
                comment: comment
                    .map(|comment| comment.trim().to_string())
                    .filter(|comment| !comment.is_empty()),
            };
            let review = catalog.add_review(BookId(id), &review).await?;
            if json {
                return print_json(&review);
            }
            println!("Review by {} added ({})", review.user_name, review.rating.stars());
        }
        Command::Search { query } => {
            let results = settings.search_client().search(&query).await?;
            if json {
                return print_json(&results);
            }
            if results.is_empty() {
                println!("No results");
            }
            for (index, record) in results.iter().enumerate() {
                let year = record
                    .first_publish_year
                    .map(|year| year.to_string())
                    .unwrap_or_else(|| "N/A".to_string());
                println!(
                    "[{index}] {} by {} ({year})",
                    record.title,
                    record.first_author().unwrap_or(UNKNOWN_AUTHOR)
                );
            }
        }
        Command::Import { query, index } => {
            let results = settings.search_client().search(&query).await?;
            let Some(record) = results.get(index) else {
                bail!("no search result at index {index} ({} results)", results.len());
            };
            let book = catalog.create_book(&to_import_payload(record)).await?;
            report_book(json, "Imported", &book)?;
        }
        Command::Health => health(&catalog, json).await?,
    }

    Ok(())
}

async fn health(catalog: &CatalogClient, json: bool) -> Result<()> {
    let status = catalog
        .health()
        .await
        .with_context(|| format!("catalog service at {} is unreachable", catalog.base_url()))?;
    if json {
        return print_json(&status);
    }
    println!("{}: {}", catalog.base_url(), status.status);
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report_book(json: bool, verb: &str, book: &Book) -> Result<()> {
    if json {
        return print_json(book);
    }
    println!("{verb} {}", summary_line(book));
    Ok(())
}

fn summary_line(book: &Book) -> String {
    let rating = if book.has_reviews() {
        format!("{:.1}/5 from {} reviews", book.average_rating, book.reviews_count)
    } else {
        "no reviews".to_string()
    };
    format!("#{} {} by {} ({rating})", book.id, book.title, book.author)
}

fn print_detail(book: &Book) {
    println!("{}", summary_line(book));
    for (label, value) in [
        ("ISBN", &book.isbn),
        ("Cover", &book.cover_url),
        ("Description", &book.description),
    ] {
        if let Some(value) = value.as_deref().filter(|value| !value.is_empty()) {
            println!("{label}: {value}");
        }
    }
    for review in &book.reviews {
        println!("  {} {}", review.rating.stars(), review.user_name);
        if let Some(comment) = &review.comment {
            println!("    {comment}");
        }
    }
}

fn required(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        bail!("{field} must not be blank");
    }
    Ok(value.to_string())
}

fn keep_or_replace(edited: Option<&str>, current: &str) -> String {
    match edited.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => current.to_string(),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}
