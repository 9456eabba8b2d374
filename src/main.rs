use std::io::IsTerminal;
use std::process::ExitCode;

use tracing::{error, info};

use vfstore::{Application, Config};

fn main() -> ExitCode {
    let path = std::env::var("VFS_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

    // Load configuration
    let config = match Config::load_with_env(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {path}: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = vfstore::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        vfstore::logging::init_stderr_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("{e}");
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    info!(
        folder_id_base = config.store.folder_id_base,
        strategy = ?config.store.folder_id_strategy,
        "vfstore starting"
    );

    let app = Application::new(&config);
    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();

    match app.run(stdin.lock(), std::io::stdout().lock(), interactive) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("session aborted: {e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
