//! # External Editor
//!
//! Daybook never writes notes itself. Pressing `e` hands the day's file to
//! whatever editor the user prefers and waits for it to exit.
//!
//! The command string comes from config resolution (`--editor`, `$EDITOR`,
//! config file, then `vim`). It is split on whitespace so values such as
//! `code -w` work; the note path is always the last argument.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use log::info;
use thiserror::Error;

/// Editor used when nothing else is configured.
pub const FALLBACK_EDITOR: &str = "vim";

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("no editor command configured")]
    EmptyCommand,
    #[error("could not create notes directory {}: {source}", dir.display())]
    PrepareDir { dir: PathBuf, source: io::Error },
    #[error("failed to start editor `{program}`: {source}")]
    Spawn { program: String, source: io::Error },
    #[error("editor `{program}` exited with {status}")]
    Status { program: String, status: ExitStatus },
    #[error("terminal error around editor session: {0}")]
    Terminal(#[source] io::Error),
}

/// Something that can open a note file and block until the user is done.
pub trait EditorLauncher {
    fn launch(&mut self, path: &Path) -> Result<(), EditorError>;
}

/// A parsed editor command line: program plus leading arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    program: String,
    args: Vec<String>,
}

impl EditorCommand {
    /// A command naming an existing file is taken whole, so paths with
    /// spaces (`/Applications/Sublime Text/subl`) work unquoted.
    pub fn parse(command: &str) -> Result<Self, EditorError> {
        let whole = command.trim();
        if whole.contains(char::is_whitespace) && Path::new(whole).is_file() {
            return Ok(Self {
                program: whole.to_string(),
                args: Vec::new(),
            });
        }
        let mut words = command.split_whitespace().map(str::to_string);
        let program = words.next().ok_or(EditorError::EmptyCommand)?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Build the child process for editing `path`.
    pub fn command_for(&self, path: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).arg(path);
        cmd
    }

    /// Run the editor on `path`, inheriting the terminal, and wait for it.
    ///
    /// The note's parent directory is created first so the editor can save
    /// into it; the note file itself is left for the editor to create.
    pub fn run(&self, path: &Path) -> Result<(), EditorError> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|source| EditorError::PrepareDir {
                dir: dir.to_path_buf(),
                source,
            })?;
        }

        info!("Launching {} {:?} {}", self.program, self.args, path.display());
        let status = self
            .command_for(path)
            .status()
            .map_err(|source| EditorError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            info!("Editor exited cleanly");
            Ok(())
        } else {
            Err(EditorError::Status {
                program: self.program.clone(),
                status,
            })
        }
    }
}

impl EditorLauncher for EditorCommand {
    fn launch(&mut self, path: &Path) -> Result<(), EditorError> {
        self.run(path)
    }
}
