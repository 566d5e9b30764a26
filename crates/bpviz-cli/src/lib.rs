//! CLI logic for the bpviz blueprint visualizer.
//!
//! This module contains the core CLI logic: it loads the configuration, reads
//! a blueprint and writes the Mermaid sequence diagram for it.

pub mod error_adapter;

mod args;
mod config;
mod input;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use bpviz::{BpvizError, Translator, registry::FunctionRegistry};

/// Run the bpviz CLI application
///
/// This function translates the input blueprint and writes the resulting
/// Mermaid markup to the output file, or to stdout when no output is given.
/// With `--list-functions` it writes the supported functions instead.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `BpvizError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Blueprint decoding errors
/// - Translation errors
pub fn run(args: &Args) -> Result<(), BpvizError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let translator = Translator::new(app_config);

    if args.list_functions {
        return write_output(args.output.as_deref(), &function_listing(translator.registry()));
    }

    let Some(input_path) = args.input.as_deref() else {
        return Err(BpvizError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            "no input blueprint given",
        )));
    };

    info!(
        input_path = input_path,
        output_path = args.output.as_deref().unwrap_or("<stdout>");
        "Processing blueprint"
    );

    let source = input::read_source(input_path)?;
    let blueprint = input::parse_blueprint(&source)?;
    let mermaid = translator.translate(&blueprint)?;

    write_output(args.output.as_deref(), &mermaid)?;

    info!(output_path = args.output.as_deref().unwrap_or("<stdout>"); "Mermaid exported successfully");

    Ok(())
}

/// Describe every registered function, one per line.
fn function_listing(registry: &FunctionRegistry) -> String {
    registry
        .iter()
        .map(|kind| {
            format!(
                "{}: {} ({})\n",
                kind.name(),
                kind.participant().source(),
                kind.note().source()
            )
        })
        .collect()
}

fn write_output(path: Option<&str>, content: &str) -> Result<(), BpvizError> {
    match path {
        Some(path) => fs::write(path, content)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
