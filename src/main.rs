use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{self, BufReader, IsTerminal};

use rowscope::cli::{CliArgs, InputSource};
use rowscope::keymap::{load_default_keymap, load_keymap_with_user, Keymap};
use rowscope::rows::RowStore;
use rowscope::{config_paths, tui, App, PickerConfig};

fn main() -> Result<()> {
    rowscope::tracing::init();

    let startup = match CliArgs::parse().into_config(io::stdin().is_terminal()) {
        Ok(startup) => startup,
        Err(message) => bail!(message),
    };

    let mut config = if startup.use_config_dir {
        PickerConfig::load()
    } else {
        PickerConfig::default()
    };
    startup.apply_overrides(&mut config);

    let mut rows = RowStore::new();
    let count = match &startup.input {
        InputSource::File(path) => rows
            .load(path, config.delimiter)
            .with_context(|| format!("Failed to read rows from {}", path.display()))?,
        InputSource::Stdin => rows
            .load_reader(BufReader::new(io::stdin().lock()), config.delimiter)
            .context("Failed to read rows from stdin")?,
    };
    tracing::info!(count, "Loaded rows");

    let bindings = if startup.use_config_dir {
        load_keymap_with_user(config_paths::keymap_file().as_deref())
    } else {
        load_default_keymap()
    };

    let mut app = App::with_keymap(rows, Keymap::with_bindings(bindings));
    app.apply_config(&config);

    // Startup commands may already have ended the session
    if !app.exit_requested() {
        tui::run(&mut app).context("Terminal session failed")?;
    }

    if let Some(output) = app.take_final_output() {
        println!("{}", output);
    }
    Ok(())
}
