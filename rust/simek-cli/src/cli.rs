use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use simek_nlp::Copula;

/// Where the trigram snapshot lives unless configured otherwise
pub const DEFAULT_MARKOV_FILE: &str = "data/simek/markov_trigram.cbor";

#[derive(Debug, Parser)]
#[command(name = "simek")]
#[command(bin_name = "simek")]
#[command(about = "Linguistic core of the šimek bot", long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct SimekCli {
    /// JSON lexicon used to tokenize, tag and inflect Czech text
    #[arg(long, env = "SIMEK_LEXICON", global = true)]
    pub lexicon: Option<PathBuf>,

    /// Trigram snapshot file
    #[arg(long, env = "SIMEK_MARKOV_FILE", default_value = DEFAULT_MARKOV_FILE, global = true)]
    pub markov_file: PathBuf,

    #[arg(long, env = "SIMEK_ENCODING", value_enum, default_value_t = SnapshotEncoding::Cbor, global = true)]
    pub encoding: SnapshotEncoding,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SnapshotEncoding {
    Cbor,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check whether a message describes its author ("jsem X") or the bot ("jsi X")
    Resolve {
        #[arg(long, default_value = "jsem")]
        keyword: Copula,

        /// Inflect the described noun into vocative
        #[arg(long)]
        vocative: bool,

        text: String,
    },

    /// Check whether a message asks for help
    Help { text: String },

    /// Learn from the messages, then generate text from everything learned so far
    Generate {
        #[arg(long, default_value_t = 20)]
        max_words: usize,

        #[arg(required = true)]
        messages: Vec<String>,
    },

    /// Summarize the trigram snapshot
    Stats {
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}
