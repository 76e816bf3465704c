//! deshak - highlight, search and replace text files from the command line

use std::env;
use std::io;
use std::path::Path;
use std::process;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use deshak::render::render_document;
use deshak::search::SearchDirection;
use deshak::{
    Config, Document, EditorError, FindReplace, HighlightCache, LanguageRegistry, Result,
    SearchOptions, SearchOutcome, SearchState,
};

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("DESHAK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };

    match command.as_str() {
        "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" => {
            println!("deshak {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "languages" => {
            let registry = LanguageRegistry::from_config(&load_config());
            for name in registry.list_languages() {
                println!("{}", name);
            }
            Ok(())
        }
        "highlight" => {
            let [file] = positional::<1>(&args[1..])?;
            highlight(Path::new(file))
        }
        "find" => {
            let [file, query] = positional::<2>(&args[1..])?;
            let from = match flag_value(&args, "--from") {
                Some(value) => value
                    .parse::<usize>()
                    .map_err(|_| EditorError::Usage(format!("--from expects an offset, got `{}`", value)))?,
                None => 0,
            };
            let direction = if has_flag(&args, "--backward") {
                SearchDirection::Backward
            } else {
                SearchDirection::Forward
            };
            find(Path::new(file), query, from, direction, search_options(&args))
        }
        "replace" => {
            let [file, query, replacement] = positional::<3>(&args[1..])?;
            let write = has_flag(&args, "--write");
            replace(Path::new(file), query, replacement, write, search_options(&args))
        }
        other => Err(EditorError::Usage(format!(
            "unknown command `{}` (try --help)",
            other
        ))),
    }
}

/// Config from the default path, falling back to defaults on error
fn load_config() -> Config {
    Config::load().unwrap_or_else(|err| {
        warn!(%err, "using default configuration");
        Config::default()
    })
}

/// Config search options overridden by command-line flags
fn search_options(args: &[String]) -> SearchOptions {
    let mut options = load_config().search;
    if has_flag(args, "--match-case") {
        options.case_sensitive = true;
    }
    if has_flag(args, "--no-wrap") {
        options.wrap = false;
    }
    options
}

fn highlight(path: &Path) -> Result<()> {
    let registry = LanguageRegistry::from_config(&load_config());
    let doc = Document::from_file(path)?;
    let mut cache = HighlightCache::new(registry.rules_for_path(path));
    cache.refresh(&doc);
    let mut stdout = io::stdout().lock();
    render_document(&mut stdout, &doc, &cache)?;
    println!();
    Ok(())
}

fn find(path: &Path, query: &str, from: usize, direction: SearchDirection, options: SearchOptions) -> Result<()> {
    let mut doc = Document::from_file(path)?;
    doc.set_cursor(from);
    let session = FindReplace::new(SearchState::new(query, ""), options)?;
    match session.find(&mut doc, direction) {
        SearchOutcome::Found(m) => {
            let (line, col) = doc.position_of(m.start);
            println!("{}:{} {}", line, col, m.start);
        }
        SearchOutcome::NotFound => println!("Nothing found"),
        SearchOutcome::EmptyQuery => {}
    }
    Ok(())
}

fn replace(path: &Path, query: &str, replacement: &str, write: bool, options: SearchOptions) -> Result<()> {
    let mut doc = Document::from_file(path)?;
    let session = FindReplace::new(SearchState::new(query, replacement), options)?;
    let result = session.replace_all(&mut doc);
    if write {
        if result.count > 0 {
            doc.save()?;
        }
    } else {
        println!("{}", doc.text());
    }
    eprintln!("Replaced {} occurrences", result.count);
    Ok(())
}

/// First `N` arguments that are not flags or flag values
fn positional<const N: usize>(args: &[String]) -> Result<[&str; N]> {
    let mut found = Vec::with_capacity(N);
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--from" {
            iter.next();
        } else if !arg.starts_with("--") {
            found.push(arg.as_str());
        }
    }
    found
        .get(..N)
        .and_then(|slice| <[&str; N]>::try_from(slice).ok())
        .ok_or_else(|| EditorError::Usage(format!("expected {} argument(s), try --help", N)))
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|arg| arg == flag)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|idx| args.get(idx + 1))
        .map(String::as_str)
}

fn print_usage() {
    println!("deshak {} - highlight, search and replace text files", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: deshak <COMMAND> [ARGS] [OPTIONS]");
    println!();
    println!("Commands:");
    println!("  highlight FILE                    Print FILE with syntax colors");
    println!("  find FILE QUERY                   Print line:col and offset of the next match");
    println!("  replace FILE QUERY REPLACEMENT    Replace every occurrence of QUERY");
    println!("  languages                         List known languages");
    println!();
    println!("Options:");
    println!("  --from N        Start searching at byte offset N (find)");
    println!("  --backward      Search towards the start of the file (find)");
    println!("  --match-case    Find only exact-case matches (replace is always exact)");
    println!("  --no-wrap       Do not continue from the other end of the file");
    println!("  --write         Save the result back to FILE (replace)");
    println!("  -h, --help      Show this help message");
    println!("  -V, --version   Show version information");
    println!();
    println!("Settings are read from ~/.deshak.toml; set DESHAK_LOG=debug for logs.");
}
