//! rateshelf Shop Binary
//!
//! Drives a catalog directly (no network): seeds sample data, looks up
//! products, renders reports, aggregates discounts and exercises the
//! snapshot dump/restore cycle.

use std::path::Path;

use chrono::{Duration, Local};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{fmt, EnvFilter};

use rateshelf::report::Formatter;
use rateshelf::{Catalog, Rating, Result};

/// rateshelf Shop
#[derive(Parser, Debug)]
#[command(name = "rateshelf-shop")]
#[command(about = "Local front end for the product catalog")]
#[command(version)]
struct Args {
    /// Root directory (data/, reports/ and temp/ live under it)
    #[arg(short, long, default_value = "./rateshelf_data")]
    root: String,

    /// Language tag for printed output
    #[arg(long, default_value = "en-US")]
    locale: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the sample products and reviews
    Seed,

    /// Look up a product and its reviews by id
    Find {
        /// The product id
        #[arg(long)]
        id: u64,
    },

    /// Render a product report to the reports directory
    Report {
        /// The product id
        #[arg(long)]
        id: u64,

        /// Language tag for the report (defaults to the global one)
        #[arg(long)]
        locale: Option<String>,

        /// Client tag appended to the report file name
        #[arg(long)]
        client: Option<String>,
    },

    /// Total discount per rating group
    Discounts,

    /// Dump the whole catalog to a snapshot file
    Dump,

    /// Restore the catalog from the first snapshot found
    Restore,
}

fn main() {
    // Initialize tracing/logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,rateshelf=info"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let catalog = Catalog::open_path(Path::new(&args.root))?;
    let formatter = Formatter::new(&args.locale);

    match args.command {
        Commands::Seed => seed(&catalog)?,

        Commands::Find { id } => {
            let product = catalog.find_product(id)?;
            println!("{}", formatter.format_product(&product));

            for review in catalog.find_reviews(id) {
                println!("{}", formatter.format_review(&review));
            }
        }

        Commands::Report { id, locale, client } => {
            let tag = locale.as_deref().unwrap_or(&args.locale);
            let path = catalog.print_report_as(id, tag, client.as_deref())?;
            println!("Report written to {}", path.display());
        }

        Commands::Discounts => {
            let mut buckets: Vec<(Rating, Decimal)> =
                catalog.get_discounts().into_iter().collect();
            buckets.sort_by_key(|&(rating, _)| rating.ordinal());

            for (rating, total) in buckets {
                println!("{}  {}", rating.stars(), formatter.format_price(total));
            }
        }

        Commands::Dump => {
            let path = catalog.dump_data()?;
            println!("Catalog dumped to {}", path.display());
        }

        Commands::Restore => {
            let entries = catalog.restore_data()?;
            println!("Restored {} products", entries.len());

            for entry in entries.values() {
                println!("{}", formatter.format_product(&entry.product));
            }
        }
    }

    Ok(())
}

/// Create the sample catalog: a few drinks and foods with reviews
fn seed(catalog: &Catalog) -> Result<()> {
    let next_week = Local::now().date_naive() + Duration::days(7);

    catalog.create_drink(101, "Tea", Decimal::new(199, 2), Rating::NoStar)?;
    catalog.review_product(101, Rating::FourStar, "Fine tea")?;
    catalog.review_product(101, Rating::TwoStar, "Looks like tea but is it?")?;
    catalog.review_product(101, Rating::FourStar, "Good tea")?;
    catalog.review_product(101, Rating::FiveStar, "Perfect tea")?;
    catalog.review_product(101, Rating::ThreeStar, "Just add some lemon")?;

    catalog.create_drink(102, "Coffee", Decimal::new(199, 2), Rating::NoStar)?;
    catalog.review_product(102, Rating::ThreeStar, "Coffee was good")?;
    catalog.review_product(102, Rating::OneStar, "Where is the milk?")?;
    catalog.review_product(102, Rating::FiveStar, "It's perfect with ten spoons of sugar!")?;

    catalog.create_food(103, "Cake", Decimal::new(399, 2), Rating::NoStar, next_week)?;
    catalog.review_product(103, Rating::FiveStar, "Very nice cake")?;
    catalog.review_product(103, Rating::FourStar, "It's good, but I've expected more chocolate")?;
    catalog.review_product(103, Rating::FiveStar, "This cake is perfect!")?;

    catalog.create_food(104, "Cookie", Decimal::new(299, 2), Rating::NoStar, next_week)?;
    catalog.review_product(104, Rating::ThreeStar, "Just another cookie")?;
    catalog.review_product(104, Rating::ThreeStar, "Ok")?;

    catalog.create_food(106, "Churma", Decimal::new(5000, 2), Rating::NoStar, next_week)?;
    catalog.review_product(106, Rating::FiveStar, "Perfect")?;
    catalog.review_product(106, Rating::FourStar, "Extremely tasty")?;
    catalog.review_product(106, Rating::ThreeStar, "Looks like tea but is it?")?;
    catalog.review_product(106, Rating::TwoStar, "Fine tea")?;
    catalog.review_product(106, Rating::ThreeStar, "Good tea")?;

    println!("Seeded {} products", catalog.product_count());
    Ok(())
}
