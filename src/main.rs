// Entry point: handles --help and --stats, and runs the interactive board

use plaza::stats;
use plaza::store::{MemoryStore, SharedStore, Store};
use std::env;
use std::process;
use std::sync::Arc;

fn print_help() {
    println!("plaza - terminal photo-board client");
    println!();
    println!("Usage:");
    println!("  plaza [--stats]");
    println!();
    println!("Options:");
    println!("  --stats          Print collection statistics as JSON and exit.");
    println!("  --help           Show this help message.");
    println!();
    println!("Keys:");
    println!("  up/down select a card, enter view it, l like, d delete (asks first),");
    println!("  n new card, e edit profile, a change avatar, i statistics, esc quit.");
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return;
    }

    let store: SharedStore = match MemoryStore::demo() {
        Ok(s) => Arc::new(s),
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    };

    if args.iter().any(|a| a == "--stats") {
        match store.fetch_cards().await {
            Ok(cards) => {
                let aggregated = stats::aggregate(&cards);
                match serde_json::to_string_pretty(&aggregated) {
                    Ok(out) => println!("{out}"),
                    Err(e) => {
                        eprintln!("failed to encode stats: {e}");
                        process::exit(2);
                    }
                }
                process::exit(0);
            }
            Err(e) => {
                eprintln!("{e}");
                process::exit(2);
            }
        }
    }

    if let Some(unknown) = args.first() {
        eprintln!("unknown option: {unknown}");
        process::exit(2);
    }

    match plaza::ui::run(store).await {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    }
}
