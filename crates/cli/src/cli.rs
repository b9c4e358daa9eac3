use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Turn documents into structured study notes with a local Ollama model.
#[derive(Parser, Debug)]
#[command(name = "studynotes", version, about)]
pub struct CliArgs {
    /// Ollama base URL; also points the status check at `<url>/api/tags`
    #[arg(long, global = true)]
    pub ollama_url: Option<String>,

    /// Model name (overrides the configured OLLAMA_MODEL)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Notes cache directory (default: NOTES_CACHE_DIR, then the platform cache dir)
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate study notes for a text or Markdown file
    Generate {
        /// File to summarize
        path: PathBuf,

        /// Cache key (defaults to the file name)
        #[arg(long)]
        file_id: Option<String>,

        /// Ignore cached notes and regenerate
        #[arg(long)]
        no_cache: bool,

        /// Print the result as JSON instead of plain notes
        #[arg(long)]
        json: bool,
    },

    /// Show how a file would be chunked, without calling the model
    Chunk {
        /// File to chunk
        path: PathBuf,

        /// Maximum characters per chunk (overrides NOTES_MAX_CHUNK_SIZE)
        #[arg(long)]
        max_size: Option<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate_with_flags() {
        let args = CliArgs::try_parse_from([
            "studynotes",
            "generate",
            "lecture.txt",
            "--file-id",
            "abc_lecture.txt",
            "--no-cache",
            "--json",
        ])
        .unwrap();
        match args.command {
            Command::Generate {
                path,
                file_id,
                no_cache,
                json,
            } => {
                assert_eq!(path, PathBuf::from("lecture.txt"));
                assert_eq!(file_id.as_deref(), Some("abc_lecture.txt"));
                assert!(no_cache);
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_overrides_follow_subcommand() {
        let args = CliArgs::try_parse_from([
            "studynotes",
            "chunk",
            "notes.md",
            "--max-size",
            "500",
            "--model",
            "mistral",
        ])
        .unwrap();
        assert_eq!(args.model.as_deref(), Some("mistral"));
        assert!(matches!(args.command, Command::Chunk { max_size: Some(500), .. }));
    }

    #[test]
    fn path_is_required() {
        assert!(CliArgs::try_parse_from(["studynotes", "generate"]).is_err());
    }
}
