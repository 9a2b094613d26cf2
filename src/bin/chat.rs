// src/bin/chat.rs

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use relchat::responder::{Responder, ResponderConfig};

#[derive(Parser, Debug)]
struct Args {
    /// Model directory produced by train_parser
    #[arg(long, default_value = "model")]
    model: PathBuf,
    /// Seed for reply selection (random when absent)
    #[arg(long)]
    seed: Option<u64>,
    /// Optional TOML override for word lists and replies
    #[arg(long)]
    wordlists: Option<String>,
}

fn sanitize_input(s: &str) -> String {
    // strip any leading prompt sigils like ">" or "-" repeatedly
    let mut t = s.trim();
    while let Some(c) = t.chars().next() {
        if c == '>' || c == '-' || c == '|' {
            t = t[1..].trim_start();
        } else {
            break;
        }
    }
    t.to_string()
}

fn main() -> Result<()> {
    let args = Args::parse();

    ctrlc::set_handler(|| {
        println!("\nGoodbye human friend, have a nice day!");
        std::process::exit(0);
    })?;

    let parser = relchat::parser::Parser::load(&args.model)?;
    let cfg = match &args.wordlists {
        Some(path) => ResponderConfig::load_or_default(path),
        None => ResponderConfig::default(),
    };
    let mut responder = match args.seed {
        Some(seed) => Responder::with_seed(parser, cfg, seed),
        None => Responder::new(parser, cfg),
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break; // EOF
        };
        let msg = sanitize_input(&line?);
        if msg.is_empty() {
            continue;
        }
        match responder.respond(&msg) {
            Ok(Some(reply)) => println!("{reply}"),
            Ok(None) => {}
            Err(e) => eprintln!("[respond] {e}"),
        }
    }
    Ok(())
}
