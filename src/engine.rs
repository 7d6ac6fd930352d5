//! Engine maintenance scripts.
//!
//! Each script in the configured directory with the configured extension is
//! a command named after its file stem. Stems starting with `_` are private
//! helpers and never listed or run.

use ais_core::config::EngineConfig;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("unknown engine command {name:?}; available: {available}")]
    UnknownScript { name: String, available: String },

    #[error("cannot read scripts directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start {interpreter} for {script}: {source}")]
    Spawn {
        interpreter: String,
        script: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The scripts available under one directory.
#[derive(Debug, Clone)]
pub struct ScriptCatalog {
    dir: PathBuf,
    ext: String,
    interpreter: String,
}

impl ScriptCatalog {
    pub fn new(dir: impl Into<PathBuf>, ext: impl Into<String>, interpreter: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            ext: ext.into(),
            interpreter: interpreter.into(),
        }
    }

    pub fn from_config(cfg: &EngineConfig) -> Self {
        Self::new(&cfg.scripts_dir, &cfg.script_ext, &cfg.interpreter)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Command names, sorted.
    pub fn list_commands(&self) -> Result<Vec<String>, EngineError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|source| EngineError::ReadDir {
            path: self.dir.clone(),
            source,
        })?;

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| path.extension().is_some_and(|ext| ext == self.ext.as_str()))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
            .filter(|name| !name.starts_with('_'))
            .collect();
        names.sort();
        Ok(names)
    }

    /// Run `name` with `args` and wait for it. Output is inherited.
    pub fn run(&self, name: &str, args: &[String]) -> Result<ExitStatus, EngineError> {
        let commands = self.list_commands()?;
        if !commands.iter().any(|c| c == name) {
            return Err(EngineError::UnknownScript {
                name: name.to_string(),
                available: commands.join(", "),
            });
        }

        let script = self.dir.join(format!("{name}.{}", self.ext));
        tracing::info!(script = %script.display(), ?args, "running engine command");
        Command::new(&self.interpreter)
            .arg(&script)
            .args(args)
            .status()
            .map_err(|source| EngineError::Spawn {
                interpreter: self.interpreter.clone(),
                script,
                source,
            })
    }
}
