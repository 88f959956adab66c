//! Detection of generated files whose spec no longer exists.

use std::path::PathBuf;

use tracing::debug;

use crate::layout::ProjectLayout;

/// Every generated header or source under the project root none of whose
/// possible specs exists.
///
/// The caller decides whether to delete or just report them.
pub fn find_outdated(layout: &ProjectLayout) -> impl Iterator<Item = PathBuf> + '_ {
    layout.generated_files().filter(move |generated| {
        let outdated = !layout
            .possible_spec_paths(generated)
            .iter()
            .any(|spec| spec.is_file());
        if outdated {
            debug!(path = %generated.display(), "no spec found for generated file");
        }
        outdated
    })
}
