use std::fs;
use std::path::Path;

use crate::commands::CommandResult;
use soiree_catalog::{fixtures, wire};

/// Writes the demo catalog as a document `plan --catalog` can load back.
pub fn run(out: &Path) -> CommandResult {
    let catalog = fixtures::demo_catalog();

    let document = match wire::encode_catalog(&catalog) {
        Ok(document) => document,
        Err(error) => {
            return CommandResult::failure("seed", "serialization", error.to_string(), 1);
        }
    };

    if let Err(error) = fs::write(out, document) {
        return CommandResult::failure(
            "seed",
            "write_failed",
            format!("could not write `{}`: {error}", out.display()),
            4,
        );
    }

    CommandResult::success(
        "seed",
        format!("wrote {} demo suppliers to `{}`", catalog.len(), out.display()),
    )
}
