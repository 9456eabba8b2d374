//! Line-command application for vfstore.
//!
//! `Application` is the composition root: it builds the user, folder and
//! file stores in dependency order and dispatches parsed commands to them.

mod command;
mod render;

pub use command::{parse_command, tokenize, usage, Command};
pub use render::{file_row, folder_row};

use std::io::{BufRead, Write};
use std::sync::Arc;

use tracing::debug;

use crate::config::{Config, DisplayConfig};
use crate::datetime::{Clock, SystemClock};
use crate::file::{FileOrder, FileService, FileStore, FolderOrder, FolderService, FolderStore};
use crate::user::{UserService, UserStore};
use crate::{Result, VfsError};

/// Result of executing one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Lines to print, in order.
    pub output: Vec<String>,
    /// `false` once the session should end.
    pub keep_running: bool,
}

impl Outcome {
    fn rows(output: Vec<String>) -> Self {
        Self {
            output,
            keep_running: true,
        }
    }

    fn line(line: impl Into<String>) -> Self {
        Self::rows(vec![line.into()])
    }

    fn error(err: &VfsError) -> Self {
        Self::line(format!("Error - {err}"))
    }

    fn stop(line: impl Into<String>) -> Self {
        Self {
            output: vec![line.into()],
            keep_running: false,
        }
    }
}

/// The stores plus rendering settings for one session.
pub struct Application {
    users: Arc<dyn UserService>,
    folders: Arc<dyn FolderService>,
    files: Arc<dyn FileService>,
    display: DisplayConfig,
}

impl Application {
    /// Build the stores from `config` using the system clock.
    pub fn new(config: &Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build the stores from `config` with an explicit clock.
    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> Self {
        let users: Arc<dyn UserService> = Arc::new(UserStore::new());
        let folders: Arc<dyn FolderService> = Arc::new(FolderStore::with_config(
            users.clone(),
            clock.clone(),
            &config.store,
        ));
        let files: Arc<dyn FileService> =
            Arc::new(FileStore::new(users.clone(), folders.clone(), clock));

        Self {
            users,
            folders,
            files,
            display: config.display.clone(),
        }
    }

    /// User store handle.
    pub fn users(&self) -> &dyn UserService {
        self.users.as_ref()
    }

    /// Folder store handle.
    pub fn folders(&self) -> &dyn FolderService {
        self.folders.as_ref()
    }

    /// File store handle.
    pub fn files(&self) -> &dyn FileService {
        self.files.as_ref()
    }

    /// Parse and execute one input line.
    ///
    /// Blank lines produce no output.
    pub fn execute(&self, line: &str) -> Outcome {
        let args = tokenize(line);
        if args.is_empty() {
            return Outcome::rows(Vec::new());
        }

        match parse_command(&args) {
            Ok(command) => {
                debug!(command = command.name(), "dispatching");
                self.dispatch(command)
            }
            Err(e) => Outcome::error(&e),
        }
    }

    fn dispatch(&self, command: Command) -> Outcome {
        let result = match command {
            Command::Register { username } => self
                .users
                .register(&username)
                .map(|_| Outcome::line("Success")),
            Command::CreateFolder {
                username,
                folder_name,
                description,
            } => self
                .folders
                .create(&folder_name, &username, &description)
                .map(|folder| Outcome::line(folder.id.to_string())),
            Command::GetFolders {
                username,
                sort_by,
                sort_order,
            } => self
                .folders
                .get_all(&username, FolderOrder::from_args(&sort_by, &sort_order))
                .map(|folders| {
                    Outcome::rows(
                        folders
                            .iter()
                            .map(|f| folder_row(f, &self.display))
                            .collect(),
                    )
                }),
            Command::RenameFolder {
                username,
                folder_id,
                new_name,
            } => self
                .folders
                .rename(folder_id, &new_name, &username)
                .map(|()| Outcome::line("Success")),
            Command::DeleteFolder {
                username,
                folder_id,
            } => self
                .folders
                .delete(folder_id, &username)
                .map(|()| Outcome::line("Success")),
            Command::UploadFile {
                username,
                folder_id,
                file_name,
                description,
            } => self
                .files
                .upload(&username, folder_id, &file_name, &description)
                .map(|_| Outcome::line("Success")),
            Command::DeleteFile {
                username,
                folder_id,
                file_name,
            } => self
                .files
                .delete(&username, folder_id, &file_name)
                .map(|()| Outcome::line("Success")),
            Command::GetFiles {
                username,
                folder_id,
                sort_by,
                sort_order,
            } => self
                .files
                .get_all(&username, folder_id, FileOrder::from_args(&sort_by, &sort_order))
                .map(|files| {
                    Outcome::rows(files.iter().map(|f| file_row(f, &self.display)).collect())
                }),
            Command::Exit => Ok(Outcome::stop("bye")),
            Command::Unknown(args) => Ok(Outcome::line(format!(
                "Unknown command: {}",
                args.join(" ")
            ))),
        };

        result.unwrap_or_else(|e| Outcome::error(&e))
    }

    /// Read commands from `input` until `exit` or end of input.
    ///
    /// When `show_prompt` is set the configured prompt is written before
    /// each read.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W, show_prompt: bool) -> Result<()> {
        let mut lines = input.lines();
        loop {
            if show_prompt {
                write!(output, "{}", self.display.prompt)?;
                output.flush()?;
            }

            let Some(line) = lines.next() else {
                break;
            };
            let outcome = self.execute(&line?);
            for line in &outcome.output {
                writeln!(output, "{line}")?;
            }
            if !outcome.keep_running {
                break;
            }
        }
        output.flush()?;
        Ok(())
    }
}
