use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use altre_find::logging::{self, Logger};
use altre_find::{
    compute_replacement, find, find_all, replace_all, FindSettings, MatchResult, SearchDirection,
    SearchModel, TextView,
};
use anyhow::{Context, Result};
use clap::Parser;

/// Find (and optionally replace) text the way the altre editor does
#[derive(Debug, Parser)]
#[command(name = "altre-find", version, about)]
struct Cli {
    /// Pattern to search for
    pattern: String,

    /// File to search (stdin when omitted)
    file: Option<PathBuf>,

    /// Treat the pattern as a regular expression
    #[arg(short = 'e', long)]
    regex: bool,

    /// Ignore case (overrides the saved preference)
    #[arg(short = 'i', long, conflicts_with = "match_case")]
    ignore_case: bool,

    /// Match case (overrides the saved preference)
    #[arg(short = 'c', long)]
    match_case: bool,

    /// Whole words only
    #[arg(short = 'w', long)]
    word: bool,

    /// Search backward from the offset
    #[arg(short = 'b', long)]
    backward: bool,

    /// Character offset to start from (defaults to the start, or the end when searching backward)
    #[arg(short = 'o', long)]
    offset: Option<usize>,

    /// Replacement text
    #[arg(short = 'r', long)]
    replace: Option<String>,

    /// Adapt the replacement to the case of each match
    #[arg(short = 'p', long, requires = "replace")]
    preserve_case: bool,

    /// Report every match (or replace every match and print the result)
    #[arg(short = 'a', long)]
    all: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(Logger::from_verbosity(cli.verbose)).context("failed to install logger")?;

    let settings = load_settings();
    let model = build_model(&cli, &settings);
    let text = read_input(cli.file.as_ref())?;

    let found_any = match (&cli.replace, cli.all) {
        (Some(_), true) => {
            let summary = replace_all(&text, &model)?;
            print!("{}", summary.text);
            log::info!("replaced {} occurrence(s)", summary.replaced);
            summary.replaced > 0
        }
        (None, true) => {
            let view = TextView::new(&text);
            let matches = find_all(&text, &model)?;
            for result in &matches {
                print_match(&view, result);
            }
            !matches.is_empty()
        }
        (replace, false) => {
            let view = TextView::new(&text);
            let offset = cli.offset.unwrap_or(if cli.backward { view.len() } else { 0 });
            let result = find(&text, offset, &model)?;
            if let MatchResult::Found { start, end } = result {
                if replace.is_some() {
                    let found = view.slice(start, end);
                    let replacement = compute_replacement(found, &model)?.unwrap_or_default();
                    println!("{}..{}: {} -> {}", start, end, found, replacement);
                } else {
                    print_match(&view, &result);
                }
            }
            result.is_found()
        }
    };

    Ok(if found_any {
        ExitCode::SUCCESS
    } else {
        eprintln!("{} not found", cli.pattern);
        ExitCode::from(1)
    })
}

fn load_settings() -> FindSettings {
    let Some(path) = FindSettings::default_path() else {
        return FindSettings::default();
    };
    FindSettings::load(&path).unwrap_or_else(|err| {
        log::warn!("{}", err);
        FindSettings::default()
    })
}

fn build_model(cli: &Cli, settings: &FindSettings) -> SearchModel {
    let mut model = SearchModel::from_settings(settings).with_pattern(cli.pattern.clone());
    model.is_regex |= cli.regex;
    model.whole_words_only |= cli.word;
    if cli.ignore_case {
        model.case_sensitive = false;
    } else if cli.match_case {
        model.case_sensitive = true;
    }
    model = model.direction(if cli.backward {
        SearchDirection::Backward
    } else {
        SearchDirection::Forward
    });
    if let Some(replacement) = &cli.replace {
        model = model
            .replace_with(replacement.clone())
            .preserve_case(cli.preserve_case || settings.preserve_case);
    }
    model
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn print_match(view: &TextView<'_>, result: &MatchResult) {
    if let MatchResult::Found { start, end } = *result {
        println!("{}..{}: {}", start, end, view.slice(start, end));
    }
}
