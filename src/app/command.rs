//! Command line tokenizer and parser.
//!
//! A line is split on whitespace; a run wrapped in double or single quotes
//! is kept as one argument so descriptions can contain spaces.

use crate::{Result, VfsError};

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `register {username}`
    Register { username: String },
    /// `create_folder {username} {folder_name} [description]`
    CreateFolder {
        username: String,
        folder_name: String,
        description: String,
    },
    /// `get_folders {username} [sort_name|sort_time] [asc|dsc]`
    GetFolders {
        username: String,
        sort_by: String,
        sort_order: String,
    },
    /// `rename_folder {username} {folder_id} {new_folder_name}`
    RenameFolder {
        username: String,
        folder_id: i64,
        new_name: String,
    },
    /// `delete_folder {username} {folder_id}`
    DeleteFolder { username: String, folder_id: i64 },
    /// `upload_file {username} {folder_id} {file_name} [description]`
    UploadFile {
        username: String,
        folder_id: i64,
        file_name: String,
        description: String,
    },
    /// `delete_file {username} {folder_id} {file_name}`
    DeleteFile {
        username: String,
        folder_id: i64,
        file_name: String,
    },
    /// `get_files {username} {folder_id} [sort_name|sort_time|sort_extension] [asc|dsc]`
    GetFiles {
        username: String,
        folder_id: i64,
        sort_by: String,
        sort_order: String,
    },
    /// `exit`
    Exit,
    /// Anything else; keeps the raw arguments.
    Unknown(Vec<String>),
}

impl Command {
    /// Get the command name.
    pub fn name(&self) -> &str {
        match self {
            Command::Register { .. } => "register",
            Command::CreateFolder { .. } => "create_folder",
            Command::GetFolders { .. } => "get_folders",
            Command::RenameFolder { .. } => "rename_folder",
            Command::DeleteFolder { .. } => "delete_folder",
            Command::UploadFile { .. } => "upload_file",
            Command::DeleteFile { .. } => "delete_file",
            Command::GetFiles { .. } => "get_files",
            Command::Exit => "exit",
            Command::Unknown(_) => "unknown",
        }
    }
}

/// Usage line for each command, printed when arguments are missing.
pub fn usage(command: &str) -> Option<&'static str> {
    let usage = match command {
        "register" => "register {username}",
        "create_folder" => "create_folder {username} {folder_name} {description}",
        "get_folders" => "get_folders {username} {sort_name|sort_time} {asc|dsc}",
        "rename_folder" => "rename_folder {username} {folder_id} {new_folder_name}",
        "delete_folder" => "delete_folder {username} {folder_id}",
        "upload_file" => "upload_file {username} {folder_id} {file_name} {description}",
        "delete_file" => "delete_file {username} {folder_id} {file_name}",
        "get_files" => {
            "get_files {username} {folder_id} {sort_name|sort_time|sort_extension} {asc|dsc}"
        }
        _ => return None,
    };
    Some(usage)
}

/// Split a line into arguments.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    args.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_token {
        args.push(current);
    }
    args
}

fn missing_arguments(command: &str) -> VfsError {
    VfsError::InvalidArgument(format!(
        "Missing arguments: {}",
        usage(command).unwrap_or(command)
    ))
}

fn parse_folder_id(arg: &str) -> Result<i64> {
    arg.parse()
        .map_err(|_| VfsError::InvalidArgument("{folder_id} should be integer".to_string()))
}

/// The optional `{sort_by} {sort_order}` pair; honoured only when both are present.
fn sort_args(args: &[String], from: usize) -> (String, String) {
    match (args.get(from), args.get(from + 1)) {
        (Some(by), Some(order)) => (by.clone(), order.clone()),
        _ => (String::new(), String::new()),
    }
}

fn optional(args: &[String], index: usize) -> String {
    args.get(index).cloned().unwrap_or_default()
}

/// Turn tokenized arguments into a `Command`.
///
/// Fails with `InvalidArgument` when required arguments are missing or a
/// folder id is not an integer.
pub fn parse_command(args: &[String]) -> Result<Command> {
    let Some(name) = args.first() else {
        return Ok(Command::Unknown(Vec::new()));
    };

    let command = match name.as_str() {
        "register" => {
            if args.len() != 2 {
                return Err(missing_arguments(name));
            }
            Command::Register {
                username: args[1].clone(),
            }
        }
        "create_folder" => {
            if args.len() < 3 {
                return Err(missing_arguments(name));
            }
            Command::CreateFolder {
                username: args[1].clone(),
                folder_name: args[2].clone(),
                description: optional(args, 3),
            }
        }
        "get_folders" => {
            if args.len() < 2 {
                return Err(missing_arguments(name));
            }
            let (sort_by, sort_order) = sort_args(args, 2);
            Command::GetFolders {
                username: args[1].clone(),
                sort_by,
                sort_order,
            }
        }
        "rename_folder" => {
            if args.len() < 4 {
                return Err(missing_arguments(name));
            }
            Command::RenameFolder {
                username: args[1].clone(),
                folder_id: parse_folder_id(&args[2])?,
                new_name: args[3].clone(),
            }
        }
        "delete_folder" => {
            if args.len() < 3 {
                return Err(missing_arguments(name));
            }
            Command::DeleteFolder {
                username: args[1].clone(),
                folder_id: parse_folder_id(&args[2])?,
            }
        }
        "upload_file" => {
            if args.len() < 4 {
                return Err(missing_arguments(name));
            }
            Command::UploadFile {
                username: args[1].clone(),
                folder_id: parse_folder_id(&args[2])?,
                file_name: args[3].clone(),
                description: optional(args, 4),
            }
        }
        "delete_file" => {
            if args.len() < 4 {
                return Err(missing_arguments(name));
            }
            Command::DeleteFile {
                username: args[1].clone(),
                folder_id: parse_folder_id(&args[2])?,
                file_name: args[3].clone(),
            }
        }
        "get_files" => {
            if args.len() < 3 {
                return Err(missing_arguments(name));
            }
            let (sort_by, sort_order) = sort_args(args, 3);
            Command::GetFiles {
                username: args[1].clone(),
                folder_id: parse_folder_id(&args[2])?,
                sort_by,
                sort_order,
            }
        }
        "exit" => Command::Exit,
        _ => Command::Unknown(args.to_vec()),
    };

    Ok(command)
}
