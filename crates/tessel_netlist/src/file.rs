//! The JSON design file.
//!
//! A design file carries an elaborated design together with its identifier
//! table, so that the interner can be rebuilt with the same indices:
//!
//! ```json
//! { "names": ["top", "a", ...], "design": { ... } }
//! ```

use crate::design::Design;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tessel_common::{Ident, Interner};
use thiserror::Error;

/// Errors reading or writing a design file.
#[derive(Debug, Error)]
pub enum DesignFileError {
    /// The file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a well-formed design file.
    #[error("malformed design file: {0}")]
    Json(#[from] serde_json::Error),

    /// The name table lists the same name twice.
    #[error("name table contains a duplicate entry")]
    DuplicateName,

    /// An entity uses an identifier index beyond the name table.
    #[error("identifier {index} is outside the name table of {len} entries")]
    UnknownName { index: u32, len: usize },
}

#[derive(Serialize, Deserialize)]
struct DesignFile {
    names: Vec<String>,
    design: Design,
}

#[derive(Serialize)]
struct DesignFileRef<'a> {
    names: Vec<String>,
    design: &'a Design,
}

/// Reads a design file from disk.
pub fn load_design(path: &Path) -> Result<(Design, Interner), DesignFileError> {
    let text = std::fs::read_to_string(path)?;
    parse_design(&text)
}

/// Parses a design file from a string.
pub fn parse_design(text: &str) -> Result<(Design, Interner), DesignFileError> {
    let file: DesignFile = serde_json::from_str(text)?;
    let len = file.names.len();
    let interner = Interner::from_names(&file.names).ok_or(DesignFileError::DuplicateName)?;
    if let Some(max) = max_ident(&file.design) {
        if max.as_raw() as usize >= len {
            return Err(DesignFileError::UnknownName {
                index: max.as_raw(),
                len,
            });
        }
    }
    log::debug!(
        "loaded design: {} names, {} scopes, {} devices",
        len,
        file.design.scopes.len(),
        file.design.lpms.len() + file.design.logic.len()
    );
    Ok((file.design, interner))
}

/// Serializes a design and its names as pretty-printed JSON.
pub fn write_design(design: &Design, interner: &Interner) -> Result<String, DesignFileError> {
    let file = DesignFileRef {
        names: interner.names(),
        design,
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Writes a design file to disk.
pub fn save_design(path: &Path, design: &Design, interner: &Interner) -> Result<(), DesignFileError> {
    std::fs::write(path, write_design(design, interner)?)?;
    Ok(())
}

/// Returns the largest identifier used anywhere in the design.
fn max_ident(design: &Design) -> Option<Ident> {
    let scopes = design
        .scopes
        .iter()
        .flat_map(|(_, s)| [s.name, s.type_name]);
    let nexuses = design.nexuses.iter().filter_map(|(_, n)| n.name);
    scopes
        .chain(nexuses)
        .chain(design.signals.iter().map(|(_, s)| s.name))
        .chain(design.lpms.iter().map(|(_, l)| l.name))
        .chain(design.logic.iter().map(|(_, g)| g.name))
        .chain(design.memories.iter().map(|(_, m)| m.name))
        .chain(design.events.iter().map(|(_, e)| e.name))
        .chain(design.params.iter().map(|(_, p)| p.name))
        .max()
}
