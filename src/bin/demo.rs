#![forbid(unsafe_code)]

//! Walks through the catalog and route APIs and prints what happens.
//!
//! Set `RUST_LOG=linked_routes=debug` (or pass `--verbose`) to see the
//! library's own events.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use linked_routes::route::{CircularRoute, LinearRoute, Station, TrainCursor};
use linked_routes::Catalog;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug output from the library
    #[arg(short, long, env = "LINKED_ROUTES_VERBOSE")]
    verbose: bool,

    #[command(subcommand)]
    demo: Option<Demo>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Demo {
    /// Book catalog: add, borrow, return, undo, search
    Library,
    /// Linear and circular train routes
    Route,
    /// Both demos
    All,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match args.demo.unwrap_or(Demo::All) {
        Demo::Library => library(),
        Demo::Route => route(),
        Demo::All => {
            library()?;
            route()
        }
    }
}

fn library() -> Result<()> {
    info!("running library demo");
    let mut catalog = Catalog::new();
    catalog.add("Python Programming", "Guido van Rossum");
    catalog.add("Data Structures", "Narasimha Karumanchi");
    catalog.add("Clean Code", "Robert C. Martin");

    println!("--- Library Inventory ---");
    for book in catalog.list_all()? {
        println!("{book}");
    }

    for outcome in [
        catalog.borrow("Python Programming"),
        catalog.return_book("Python Programming"),
    ] {
        match outcome {
            Ok(id) => println!("ok: {}", catalog.get(id).map_or("?", |book| book.title())),
            Err(err) => println!("failed: {err}"),
        }
    }

    for _ in 0..3 {
        match catalog.undo() {
            Ok(undone) => println!("undo {}: {:?}", undone.action, catalog.get(undone.book)),
            Err(err) => println!("undo failed: {err}"),
        }
    }

    for keyword in ["Code", "Narasimha", "Rust"] {
        match catalog.search(keyword) {
            Ok(books) => books.iter().for_each(|book| println!("{keyword}: {book}")),
            Err(err) => println!("{err}"),
        }
    }
    Ok(())
}

fn route() -> Result<()> {
    info!("running route demo");
    println!("=== Linear Route ===");
    let mut linear = LinearRoute::from_iter([
        Station::new("Alpha", 3),
        Station::new("Bravo", 5),
        Station::new("Charlie", 2),
        Station::new("Delta", 4),
    ]);
    println!("Map: {linear}");
    {
        let mut cursor = TrainCursor::new(&linear, Some("Bravo"));
        println!("Start at: {:?}", cursor.current());
        println!("After advance(1): {:?}", cursor.advance(1)?);
        println!("After retreat(1): {:?}", cursor.retreat(1)?);
        println!("ETA Bravo -> Delta: {} min", cursor.eta_to("Delta")?);
    }
    if let Some(charlie) = linear.find("Charlie") {
        linear.insert_after(charlie, Station::new("Echo", 6))?;
    }
    println!("Map (after insert): {linear}");

    println!("=== Circular Loop Route ===");
    let mut loop_route = CircularRoute::from_iter([
        Station::new("North", 4),
        Station::new("East", 3),
        Station::new("South", 5),
        Station::new("West", 2),
    ]);
    println!("Map: {loop_route}");
    {
        let mut cursor = TrainCursor::new(&loop_route, Some("West"));
        println!("Start at: {:?}", cursor.current());
        println!("After advance(1) (wrap): {:?}", cursor.advance(1)?);
        println!("After retreat(1) (wrap): {:?}", cursor.retreat(1)?);
        println!("ETA West -> South: {} min", cursor.eta_to("South")?);
    }
    if let Some(south) = loop_route.find("South") {
        loop_route.remove(south)?;
    }
    println!("Map (after removing South): {loop_route}");
    Ok(())
}
