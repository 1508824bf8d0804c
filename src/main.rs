use anyhow::Context;
use mini_nano::error;
use mini_nano::{logging, EditorConfig, TuiApplication};

fn main() -> anyhow::Result<()> {
    error::setup_panic_handler();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let filename = TuiApplication::parse_args(&args).context("invalid arguments")?;

    let config = match EditorConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("mini-nano: {} (using defaults)", err);
            EditorConfig::default()
        }
    };
    logging::init(config.log_file.as_deref(), &config.log_level);
    log::info!("mini-nano {} starting", env!("CARGO_PKG_VERSION"));

    let mut app = TuiApplication::new(config);
    if let Err(err) = app.run(filename.as_deref()) {
        if err.is_fatal() {
            error::handle_fatal_error(&err, "terminal");
        }
        error::restore_terminal();
        return Err(err).context("editor terminated abnormally");
    }

    log::info!("mini-nano exited");
    Ok(())
}
