//! The `simek` command line tool, standing in for the bot that normally
//! drives the linguistic core.

mod cli;
pub use cli::*;

use std::{io::Write, path::Path, sync::Arc};

use anyhow::{Context, Result};
use simek_common::Lane;
use simek_markov::{TrigramGenerator, TrigramStore};
use simek_nlp::{Analyzer, Lexicon, NlpWorker};
use simek_storage::{
    CborEncoder, Encoder, FileSystemSnapshotBackend, JsonEncoder, PersistencePool, Persister,
};

/// How many requests may wait for the analysis lane
pub const NLP_LANE_CAPACITY: usize = 32;

impl SimekCli {
    /// Execute the selected subcommand, writing its result to `out`
    pub async fn run<W>(self, out: &mut W) -> Result<()>
    where
        W: Write,
    {
        tracing::debug!("Running {:?}", self.command);

        match self.command {
            Command::Resolve {
                keyword,
                vocative,
                ref text,
            } => {
                let worker = nlp_worker(self.lexicon.as_deref())?;
                let reference = worker.resolve(text.as_str(), keyword, vocative).await?;
                writeln!(out, "self-reference: {}", reference.is_self_reference)?;
                writeln!(out, "phrase: {}", reference.phrase)?;
                writeln!(out, "words: {}", reference.word_count)?;
            }
            Command::Help { ref text } => {
                let worker = nlp_worker(self.lexicon.as_deref())?;
                writeln!(out, "{}", worker.needs_help(text.as_str()).await?)?;
            }
            Command::Generate {
                max_words,
                ref messages,
            } => {
                let text = match self.encoding {
                    SnapshotEncoding::Cbor => {
                        generate(persister(&self.markov_file, CborEncoder)?, messages, max_words)
                            .await?
                    }
                    SnapshotEncoding::Json => {
                        generate(persister(&self.markov_file, JsonEncoder)?, messages, max_words)
                            .await?
                    }
                };
                writeln!(out, "{text}")?;
            }
            Command::Stats { top } => {
                let stats = match self.encoding {
                    SnapshotEncoding::Cbor => {
                        TrigramStore::open(persister(&self.markov_file, CborEncoder)?)
                            .await?
                            .stats(top)
                    }
                    SnapshotEncoding::Json => {
                        TrigramStore::open(persister(&self.markov_file, JsonEncoder)?)
                            .await?
                            .stats(top)
                    }
                };
                write!(out, "{stats}")?;
            }
        }
        Ok(())
    }
}

fn nlp_worker(lexicon: Option<&Path>) -> Result<NlpWorker> {
    let path = lexicon.context("a lexicon is required for analysis (--lexicon or SIMEK_LEXICON)")?;
    let analyzer: Arc<dyn Analyzer> = Arc::new(Lexicon::load(path)?);
    Ok(NlpWorker::new(analyzer, Lane::new("nlp", NLP_LANE_CAPACITY)?))
}

fn persister<E>(markov_file: &Path, encoder: E) -> Result<Persister<E>>
where
    E: Encoder,
{
    let pool = PersistencePool::new("io")?;
    Ok(pool.persister(Arc::new(FileSystemSnapshotBackend::new(markov_file)), encoder))
}

async fn generate<E>(persister: Persister<E>, messages: &[String], max_words: usize) -> Result<String>
where
    E: Encoder,
{
    let store = Arc::new(TrigramStore::open(persister).await?);
    let generator = TrigramGenerator::new(store.clone(), Lane::new("nlp", NLP_LANE_CAPACITY)?);
    let text = generator.generate(messages.to_vec(), max_words).await?;

    // The process exits right after, so wait for the snapshot instead of
    // leaving it to the background save
    store.flush().await?;
    Ok(text)
}
