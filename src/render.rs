use std::path::Path;

use anyhow::{bail, Context};
use log::{debug, info};

use crate::{
    journal::Journal,
    page::{render_index, render_wonder},
};

/// Writes `index.html` and `wonder/<slug>/index.html` under `out_dir`,
/// replacing whatever was there. Returns the number of wonder pages.
pub(crate) fn render_site(journal: &Journal, out_dir: &Path) -> anyhow::Result<usize> {
    if contains_journal(out_dir, journal.root()) {
        bail!(
            "refusing to clear {out_dir:?}: it holds the journal {:?}",
            journal.root()
        );
    }

    fs_extra::dir::create_all(out_dir, true)
        .with_context(|| format!("while preparing {out_dir:?}"))?;

    let wonders = journal.list_all();

    let index_path = out_dir.join("index.html");
    std::fs::write(&index_path, render_index(&wonders, journal.root()))
        .with_context(|| format!("while writing {index_path:?}"))?;

    for wonder in wonders.iter() {
        let dir = out_dir.join("wonder").join(&wonder.slug);
        fs_extra::dir::create_all(&dir, false)
            .with_context(|| format!("while creating {dir:?}"))?;

        let path = dir.join("index.html");
        debug!("Writing {path:?}...");
        std::fs::write(&path, render_wonder(wonder))
            .with_context(|| format!("while generating from {:?}", wonder.slug))?;
    }

    info!("Rendered {} wonders into {out_dir:?}", wonders.len());
    Ok(wonders.len())
}

// Only paths that exist can be erased, so a missing one never contains anything.
fn contains_journal(out_dir: &Path, journal_root: &Path) -> bool {
    match (out_dir.canonicalize(), journal_root.canonicalize()) {
        (Ok(out_dir), Ok(journal_root)) => journal_root.starts_with(out_dir),
        _ => false,
    }
}
