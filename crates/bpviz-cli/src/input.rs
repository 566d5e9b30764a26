//! Blueprint document loading.
//!
//! Blueprints are YAML documents; JSON is accepted as the YAML subset it is.

use std::{
    fs,
    io::{self, Read},
};

use log::debug;

use bpviz::{BpvizError, blueprint::Blueprint};

use crate::args::STDIN_PATH;

/// Read the blueprint text from a file, or from stdin when `path` is `-`.
///
/// # Errors
///
/// Returns [`BpvizError::Io`] when the source cannot be read.
pub fn read_source(path: &str) -> Result<String, BpvizError> {
    if path == STDIN_PATH {
        debug!("Reading blueprint from stdin");
        let mut source = String::new();
        io::stdin().lock().read_to_string(&mut source)?;
        return Ok(source);
    }

    Ok(fs::read_to_string(path)?)
}

/// Decode a blueprint document.
///
/// # Errors
///
/// Returns [`BpvizError::Blueprint`] carrying the source text and the failure
/// offset when the document is not a valid blueprint.
pub fn parse_blueprint(source: &str) -> Result<Blueprint, BpvizError> {
    serde_yaml::from_str(source).map_err(|err| {
        let offset = err.location().map(|location| location.index());
        BpvizError::new_blueprint_error(err.to_string(), source, offset)
    })
}
