//! Look up a Pitchfork album review.
//!
//! Usage:
//!     review <ARTIST> <ALBUM> [--json] [--format FORMAT] [--base-url URL]
//!                             [--timeout SECS] [--verbose] [--save-defaults]

use std::env;
use std::process;

use pitchfork::{logger, Config, Resolver, SearchFormat};

fn print_usage() {
    println!("Fetch the Pitchfork review of an album");
    println!();
    println!("Usage: review <ARTIST> <ALBUM> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --json                   Print the review as JSON");
    println!("  --format <FORMAT>        Search response format: embedded, autocomplete, results");
    println!("                             (default: embedded)");
    println!("  --base-url <URL>         Site root (default: https://pitchfork.com/)");
    println!("  --timeout <SECS>         Request timeout in seconds (default: 20)");
    println!("  --verbose, -v            Log candidate scores and requests");
    println!("  --show-saved-defaults    Show saved default configuration and exit");
    println!("  --save-defaults          Save the options given as defaults");
    println!("  --help                   Show this help message");
    println!();
    println!("Configuration:");
    println!("  Defaults are read from ~/.state/pitchfork/defaults.toml.");
    println!();
    println!("Examples:");
    println!("  review mogwai \"come on\"");
    println!("  review radiohead \"ok computer\" --json");
}

/// The value following the flag at `args[i]`.
fn option_value(args: &[String], i: usize) -> Result<&str, String> {
    match args.get(i + 1) {
        Some(value) if !value.starts_with("--") => Ok(value.as_str()),
        _ => Err(format!("{} requires a value", args[i])),
    }
}

fn parse_timeout(value: &str) -> Result<u64, String> {
    value.parse()
        .map_err(|_| format!("Invalid timeout '{}': expected a whole number of seconds", value))
}

/// Print `message` and exit with status 1.
fn fail(message: String) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let saved_config = Config::load().unwrap_or_else(|_| Config::new());
    let mut cmdline_config = Config::new();
    let mut json = false;
    let mut verbose = false;
    let mut save_defaults = false;
    let mut positional_args = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => {
                json = true;
            }
            "--verbose" | "-v" => {
                verbose = true;
            }
            "--format" => {
                let value = option_value(&args, i).unwrap_or_else(|e| fail(e));
                let format = value.parse::<SearchFormat>().unwrap_or_else(|e| fail(e));
                cmdline_config.search_format = Some(format);
                i += 1;
            }
            "--base-url" => {
                let value = option_value(&args, i).unwrap_or_else(|e| fail(e));
                cmdline_config.base_url = Some(value.to_string());
                i += 1;
            }
            "--timeout" => {
                let value = option_value(&args, i).unwrap_or_else(|e| fail(e));
                cmdline_config.timeout_secs = Some(parse_timeout(value).unwrap_or_else(|e| fail(e)));
                i += 1;
            }
            "--show-saved-defaults" => {
                saved_config.print("Configuration");
                process::exit(0);
            }
            "--save-defaults" => {
                save_defaults = true;
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                positional_args.push(arg.to_string());
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    logger::init(verbose);

    if save_defaults {
        let mut config_to_save = saved_config.clone();
        config_to_save.merge(&cmdline_config);
        match config_to_save.save() {
            Ok(()) => config_to_save.print("Saved configuration"),
            Err(e) => eprintln!("Failed to save defaults: {}", e),
        }
    }

    if positional_args.len() != 2 {
        print_usage();
        process::exit(1);
    }
    let (artist, album) = (&positional_args[0], &positional_args[1]);

    let mut config = saved_config;
    config.merge(&cmdline_config);

    let resolver = match Resolver::from_config(&config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    let review = match resolver.search(artist, album) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    let summary = match review.summary() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Found {} but {}", review, e);
            process::exit(3);
        }
    };

    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
        return;
    }

    println!("{} - {}", summary.artist, summary.album);
    println!("  Score:     {:.1}{}", summary.score, if summary.best_new_music { "  (Best New Music)" } else { "" });
    println!("  Label:     {}", summary.label);
    println!("  Year:      {}", summary.year);
    println!("  Cover:     {}", summary.cover);
    println!("  URL:       {}", summary.url);
    if summary.is_multi {
        println!("  (one of several albums in this review)");
    }
    println!();
    if let Some(abstract_text) = &summary.abstract_text {
        println!("{}", abstract_text);
        println!();
    }
    println!("{}", summary.editorial);
}
