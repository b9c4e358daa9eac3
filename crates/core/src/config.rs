use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u16(profile: &str, key: &str, default: u16) -> u16 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub ollama: OllamaConfig,
    pub notes: NotesConfig,
    pub cache: CacheConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `STUDYNOTES_PROFILE`. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("STUDYNOTES_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            server: ServerConfig::from_env_profiled(p),
            ollama: OllamaConfig::from_env_profiled(p),
            notes: NotesConfig::from_env_profiled(p),
            cache: CacheConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  server:  {}:{}, max_concurrent={}",
            self.server.host,
            self.server.port,
            self.server.max_concurrent
        );
        tracing::info!(
            "  ollama:  url={}, model={}, timeout={}s",
            self.ollama.url,
            self.ollama.model,
            self.ollama.timeout_secs
        );
        tracing::info!(
            "  notes:   max_chunk_size={}, short_text_threshold={}",
            self.notes.max_chunk_size,
            self.notes.short_text_threshold
        );
        match &self.cache.dir {
            Some(dir) => tracing::info!("  cache:   dir={}", dir.display()),
            None => tracing::info!("  cache:   in-memory, capacity={}", self.cache.capacity),
        }
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    /// Upper bound on note generations running against the model service at once.
    pub max_concurrent: usize,
}

impl ServerConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            host: profiled_env_or(p, "HOST", "0.0.0.0"),
            port: profiled_env_u16(p, "PORT", 8000),
            cors_origin: profiled_env_or(p, "CORS_ORIGIN", "*"),
            max_concurrent: profiled_env_usize(p, "NOTES_MAX_CONCURRENT", 1).max(1),
        }
    }
}

// ── Ollama (local model service) ──────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    pub url: String,
    /// Endpoint hit by the reachability probe before a chat request.
    pub status_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub probe_timeout_secs: u64,
}

impl OllamaConfig {
    fn from_env_profiled(p: &str) -> Self {
        let url = profiled_env_or(p, "OLLAMA_URL", "http://localhost:11434")
            .trim_end_matches('/')
            .to_string();
        let status_url = profiled_env_opt(p, "OLLAMA_STATUS_URL")
            .unwrap_or_else(|| format!("{url}/api/tags"));
        Self {
            status_url,
            url,
            model: profiled_env_or(p, "OLLAMA_MODEL", "llama3"),
            timeout_secs: profiled_env_u64(p, "OLLAMA_TIMEOUT_SECS", 120),
            probe_timeout_secs: profiled_env_u64(p, "OLLAMA_PROBE_TIMEOUT_SECS", 5),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:11434".into(),
            status_url: "http://localhost:11434/api/tags".into(),
            model: "llama3".into(),
            timeout_secs: 120,
            probe_timeout_secs: 5,
        }
    }
}

// ── Notes pipeline ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesConfig {
    /// Maximum characters per chunk handed to the model.
    pub max_chunk_size: usize,
    /// Texts shorter than this (after trimming) skip map-reduce.
    pub short_text_threshold: usize,
}

impl NotesConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            max_chunk_size: profiled_env_usize(p, "NOTES_MAX_CHUNK_SIZE", 3000).max(1),
            short_text_threshold: profiled_env_usize(p, "NOTES_SHORT_TEXT_THRESHOLD", 500),
        }
    }
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: 3000,
            short_text_threshold: 500,
        }
    }
}

// ── Note cache ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Directory for the on-disk cache. `None` selects the in-memory cache.
    pub dir: Option<PathBuf>,
    pub capacity: usize,
}

impl CacheConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            dir: profiled_env_opt(p, "NOTES_CACHE_DIR").map(PathBuf::from),
            capacity: profiled_env_usize(p, "NOTES_CACHE_CAPACITY", 256),
        }
    }
}
