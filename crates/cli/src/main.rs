mod cli;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use studynotes_core::Config;
use studynotes_notes::{
    chunk_text, create_cache, GeneratedNotes, NoteService, NotesError, NotesPipeline,
    PlainTextExtractor, TextExtractor,
};

use crate::cli::{CliArgs, Command};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    studynotes_core::config::load_dotenv();
    let args = CliArgs::parse();

    let mut config = Config::from_env();
    apply_overrides(&mut config, &args);

    match args.command {
        Command::Generate {
            path,
            file_id,
            no_cache,
            json,
        } => {
            let result = generate(&config, &path, file_id, no_cache).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                if result.cached {
                    eprintln!("(cached notes from {})", result.model);
                }
                println!("{}", result.notes);
            }
        }
        Command::Chunk { path, max_size } => {
            let max_size = max_size.unwrap_or(config.notes.max_chunk_size);
            preview_chunks(&path, max_size)?;
        }
    }

    Ok(())
}

/// Flags win over the (profiled) environment only when actually passed.
fn apply_overrides(config: &mut Config, args: &CliArgs) {
    if let Some(url) = &args.ollama_url {
        let url = url.trim_end_matches('/');
        config.ollama.url = url.to_string();
        config.ollama.status_url = format!("{url}/api/tags");
    }
    if let Some(model) = &args.model {
        config.ollama.model = model.clone();
    }
    if let Some(dir) = &args.cache_dir {
        config.cache.dir = Some(dir.clone());
    }
    if config.cache.dir.is_none() {
        config.cache.dir = dirs::cache_dir().map(|d| d.join("studynotes"));
    }
}

/// Read a file, returning its name (used for format detection) and raw bytes.
fn read_document(path: &Path) -> Result<(String, Vec<u8>)> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .with_context(|| format!("{} has no usable file name", path.display()))?;
    Ok((filename, bytes))
}

async fn generate(
    config: &Config,
    path: &Path,
    file_id: Option<String>,
    no_cache: bool,
) -> Result<GeneratedNotes> {
    let (filename, bytes) = read_document(path)?;
    let file_id = file_id.unwrap_or_else(|| filename.clone());

    let provider = studynotes_llm::create_provider(&config.ollama);
    let pipeline = NotesPipeline::new(provider, &config.notes);
    let cache = create_cache(&config.cache).context("failed to open notes cache")?;
    let extractor = Arc::new(PlainTextExtractor);
    let service = NoteService::new(pipeline, cache, extractor.clone());

    info!(file_id = %file_id, model = %config.ollama.model, "generating notes");
    let result = if no_cache {
        let text = extractor.extract(&bytes, &filename)?;
        service.regenerate(&file_id, &text).await
    } else {
        service.notes_for_document(&file_id, &filename, &bytes).await
    };

    result.map_err(|e| match e {
        NotesError::ServiceUnreachable(_) => anyhow::Error::new(e).context(format!(
            "is Ollama running at {}?",
            config.ollama.url
        )),
        NotesError::ServiceTimeout(_) => {
            anyhow::Error::new(e).context("the model may still be loading; try again shortly")
        }
        other => anyhow::Error::new(other),
    })
}

fn preview_chunks(path: &Path, max_size: usize) -> Result<()> {
    let (filename, bytes) = read_document(path)?;
    let text = PlainTextExtractor.extract(&bytes, &filename)?;
    let chunks = chunk_text(&text, max_size);

    println!("{} chunk(s) at max {} chars", chunks.len(), max_size);
    for chunk in &chunks {
        let preview: String = chunk.content.chars().take(72).collect();
        let ellipsis = if chunk.char_len() > 72 { "…" } else { "" };
        println!(
            "#{:<3} offset={:<8} chars={:<5} {}{}",
            chunk.index,
            chunk.char_offset,
            chunk.char_len(),
            preview,
            ellipsis
        );
    }
    Ok(())
}
