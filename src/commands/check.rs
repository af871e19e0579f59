//! Validate every collection

use anyhow::Result;

use crate::content::{CollectionLoader, LoadError};
use crate::Workspace;

/// Load and validate every declared collection.
///
/// Prints one line per violation and fails if any collection has an
/// invalid entry, so a build pipeline can gate on the exit code.
pub fn run(workspace: &Workspace) -> Result<()> {
    let loader = CollectionLoader::new(workspace);

    let mut total_entries = 0;
    let mut invalid_files = 0;
    let mut problems = 0;

    for name in workspace.config.collections.keys() {
        match loader.load(name) {
            Ok(entries) => {
                println!("{}: {} entries", name, entries.len());
                total_entries += entries.len();
            }
            Err(LoadError::Invalid(report)) => {
                invalid_files += report.failures.len();
                problems += report.problem_count();
                for failure in &report.failures {
                    for problem in &failure.problems {
                        println!("{}: {}", failure.source, problem);
                    }
                }
            }
            Err(e) => return Err(e.into()),
        }
    }

    if invalid_files > 0 {
        anyhow::bail!(
            "validation failed: {} problem(s) in {} file(s)",
            problems,
            invalid_files
        );
    }

    println!(
        "All collections valid ({} entries in {} collections)",
        total_entries,
        workspace.config.collections.len()
    );
    Ok(())
}
