use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use config::Config;
use dictionary::WordTable;
use lexer::Lexer;
use log::{error, info};

mod config;
mod dictionary;
mod lexer;

/// Checks a text against a word list and reports the words it does not know.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Text file to spell-check.
    text: PathBuf,
    /// Word list to load, whitespace-separated words.
    #[arg(short, long)]
    dictionary: Option<PathBuf>,
    /// Config file to read instead of the default location.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref());

    let dictionary = args.dictionary.unwrap_or_else(|| config.dictionary.clone());
    let dictionary = config::expand_tilde(&dictionary).unwrap_or(dictionary);

    let mut table = WordTable::new();
    let load_started = Instant::now();
    if let Err(err) = table.load(&dictionary, config.oversized_words) {
        error!("could not load word list {}: {err}", dictionary.display());
        return ExitCode::FAILURE;
    }
    let time_in_load = load_started.elapsed();
    info!("loaded {} words from {}", table.size(), dictionary.display());

    let text = match fs::read_to_string(&args.text) {
        Ok(text) => text,
        Err(err) => {
            error!("could not read {}: {err}", args.text.display());
            return ExitCode::FAILURE;
        }
    };

    let mut words_in_text = 0u32;
    let mut misspelled = Vec::new();
    let check_started = Instant::now();
    for token in Lexer::new(&text) {
        words_in_text += 1;
        if !table.check(&token.lexeme) {
            misspelled.push(token);
        }
    }
    let time_in_check = check_started.elapsed();

    for token in &misspelled {
        println!(
            "{}:{}:{}: unknown word \"{}\"",
            args.text.display(),
            token.start.line() + 1,
            token.start.column() + 1,
            token.lexeme
        );
    }

    let size_started = Instant::now();
    let words_in_dictionary = table.size();
    let time_in_size = size_started.elapsed();

    let unload_started = Instant::now();
    table.unload();
    let time_in_unload = unload_started.elapsed();

    println!();
    println!("WORDS MISSPELLED:    {}", misspelled.len());
    println!("WORDS IN DICTIONARY: {words_in_dictionary}");
    println!("WORDS IN TEXT:       {words_in_text}");
    println!("TIME IN load:        {time_in_load:.2?}");
    println!("TIME IN check:       {time_in_check:.2?}");
    println!("TIME IN size:        {time_in_size:.2?}");
    println!("TIME IN unload:      {time_in_unload:.2?}");

    ExitCode::SUCCESS
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use crate::dictionary::{Oversized, WordTable};
    use crate::lexer::Lexer;

    #[test]
    fn reports_unknown_words_only() {
        let mut table = WordTable::new();
        table
            .load_from(Cursor::new("apple banana cherry"), Oversized::Skip)
            .unwrap();

        let misspelled: Vec<_> = Lexer::new("An Apple, a BANANA, and a quince.")
            .filter(|t| !table.check(&t.lexeme))
            .map(|t| t.lexeme)
            .collect();

        assert_eq!(misspelled, ["An", "a", "and", "a", "quince"]);
    }
}
