// src/bin/train_parser.rs

use std::path::PathBuf;

use anyhow::Result;
use burn::module::AutodiffModule;
use burn::tensor::backend::Backend;
use burn_autodiff::Autodiff;
use burn_ndarray::NdArray;
use clap::Parser;

use relchat::relations::RelLabel;
use relchat::responder::{Responder, ResponderConfig};
use relchat::training::{
    builtin_corpus, load_jsonl, load_model, save_model, train, ParserDataset, TrainCfg,
};

#[derive(Parser, Debug)]
struct Args {
    /// Existing model directory to resume fine-tuning from
    #[arg(long)]
    model: Option<PathBuf>,
    /// Output directory for parser.bin + meta.json (skips saving if absent)
    #[arg(long)]
    out: Option<PathBuf>,
    /// Number of training iterations
    #[arg(long, default_value_t = 15)]
    n_iter: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Extra corpus rows, one {"text","heads","deps"} JSON object per line
    #[arg(long)]
    extra: Option<PathBuf>,
}

type AD = Autodiff<NdArray<f32>>;

const SMOKE_TEXTS: &[&str] = &[
    "hello bot",
    "hi good morning",
    "HI THERE",
    "how are you doing bot",
    "how do you do",
    "I'm feeling sad",
    "I'm very happy today",
    "hi my name is Steve",
    "goodbye chatbot",
];

fn main() -> Result<()> {
    let args = Args::parse();

    let mut corpus = builtin_corpus();
    if let Some(path) = &args.extra {
        let extra = load_jsonl(path)?;
        eprintln!("[data] loaded {} extra rows from {}", extra.len(), path.display());
        corpus.extend(extra);
    }

    let cfg = TrainCfg {
        n_iter: args.n_iter,
        seed: args.seed,
        ..TrainCfg::default()
    };
    let ds = ParserDataset::from_corpus(&corpus, &cfg);
    eprintln!("[data] utterances={} token_samples={}", corpus.len(), ds.len());

    let device = <AD as Backend>::Device::default();
    let init = match &args.model {
        Some(dir) => {
            let (model, _meta) = load_model::<AD>(dir, &device)?;
            eprintln!("[init] resumed from {}", dir.display());
            Some(model)
        }
        None => None,
    };

    let model = train::<AD>(&ds, &device, &cfg, init)?;
    let meta = cfg.meta();

    // sanity-check the freshly trained weights
    let parser = relchat::parser::Parser::from_parts(model.valid(), meta.clone());
    smoke(parser, args.seed)?;

    if let Some(out) = &args.out {
        save_model(&model, out, &meta)?;

        // reload what we just wrote and check it still answers
        eprintln!("[reload] loading from {}", out.display());
        let parser = relchat::parser::Parser::load(out)?;
        smoke(parser, args.seed)?;
    }

    Ok(())
}

fn smoke(parser: relchat::parser::Parser, seed: u64) -> Result<()> {
    // parse once per text for the label dump, then let the responder run
    for text in SMOKE_TEXTS {
        let tokens = parser.parse(text)?;
        let labeled: Vec<(String, String, String)> = tokens
            .iter()
            .filter(|t| t.label != RelLabel::NoRel)
            .map(|t| {
                (
                    t.text.clone(),
                    t.label.to_string(),
                    tokens[t.head].text.clone(),
                )
            })
            .collect();
        println!("{text}");
        println!("  {labeled:?}");
    }

    let mut responder = Responder::with_seed(parser, ResponderConfig::default(), seed);
    for text in SMOKE_TEXTS {
        match responder.respond(text) {
            Ok(Some(reply)) => println!("{text:30} -> {reply}"),
            Ok(None) => println!("{text:30} -> (silent)"),
            Err(e) => println!("{text:30} -> [unparsable] {e}"),
        }
    }
    Ok(())
}
