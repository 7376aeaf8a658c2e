//! Show how the search candidates for an (artist, album) pair are scored,
//! without fetching any review page.
//!
//! Usage:
//!     candidates <ARTIST> <ALBUM> [--format FORMAT] [--verbose]

use std::env;
use std::process;

use pitchfork::matcher;
use pitchfork::{logger, Config, Query, Resolver, SearchFormat};

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");

    let mut config = Config::load().unwrap_or_else(|_| Config::new());
    if let Some(idx) = args.iter().position(|a| a == "--format") {
        let format = args.get(idx + 1).map(|f| f.parse::<SearchFormat>());
        match format {
            Some(Ok(f)) => config.search_format = Some(f),
            Some(Err(e)) => {
                eprintln!("{}", e);
                process::exit(1);
            }
            None => {
                eprintln!("--format requires a value");
                process::exit(1);
            }
        }
    }

    let positional: Vec<&String> = args.iter()
        .enumerate()
        .filter(|(i, a)| !a.starts_with('-') && !(*i > 0 && args[i - 1] == "--format"))
        .map(|(_, a)| a)
        .collect();
    if positional.len() != 2 {
        eprintln!("Usage: candidates <ARTIST> <ALBUM> [--format embedded|autocomplete|results] [--verbose]");
        process::exit(1);
    }

    logger::init(verbose);

    let resolver = match Resolver::from_config(&config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    let query = Query::new(positional[0], positional[1]);
    let candidates = match resolver.candidates(&query) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Search failed: {}", e);
            process::exit(2);
        }
    };

    if candidates.is_empty() {
        println!("No results for \"{}\"", query.text());
        return;
    }

    let scored = matcher::score_candidates(&candidates, &query, resolver.delimiters());
    let winner = matcher::best_index(&scored);

    println!("{} candidate(s) for \"{}\":", scored.len(), query.text());
    println!("     {:>6}  {:>6}  {:>6}  {}", "total", "artist", "album", "review");
    for (i, s) in scored.iter().enumerate() {
        let marker = if Some(i) == winner { "→" } else { " " };
        println!("  {}  {:>6.3}  {:>6.3}  {:>6.3}  {} - {}",
                 marker, s.combined, s.artist.score, s.album.score,
                 s.candidate.artist, s.album.fragment);
        println!("                                {}", s.candidate.url);
    }
}
