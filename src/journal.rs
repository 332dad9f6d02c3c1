use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use log::{debug, error, warn};

use crate::{
    error::WonderError,
    front_matter::{parse_front_matter, FrontMatterError},
    markdown::{first_heading, markdown_to_html},
    wonder::{front_matter_title, DateSource, Wonder},
};

const JOURNAL_SUBDIR: &str = "clawd/memory/daily-wonders";

/// `<home>/clawd/memory/daily-wonders`, or the relative path alone without a home.
pub(crate) fn default_root(home: Option<OsString>) -> PathBuf {
    match home {
        Some(home) if !home.is_empty() => PathBuf::from(home).join(JOURNAL_SUBDIR),
        _ => PathBuf::from(JOURNAL_SUBDIR),
    }
}

/// Read-only view of a directory of `<slug>.md` files.
#[derive(Debug, Clone)]
pub(crate) struct Journal {
    root: PathBuf,
    date_source: DateSource,
}

impl Journal {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            date_source: DateSource::default(),
        }
    }

    pub fn with_date_source(mut self, date_source: DateSource) -> Self {
        self.date_source = date_source;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every wonder in the journal, newest first.
    ///
    /// Never fails: an unreadable directory gives an empty list and files
    /// that fail to load are logged and left out.
    pub fn list_all(&self) -> Vec<Wonder> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) => {
                error!("Could not read wonders directory {:?}: {err}", self.root);
                return vec![];
            }
        };

        let mut wonders = vec![];
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unreadable entry in {:?}: {err}", self.root);
                    continue;
                }
            };

            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                warn!("Skipping non UTF-8 file name {file_name:?}");
                continue;
            };
            let Some(slug) = slug_of(file_name) else {
                continue;
            };
            if entry.file_type().map_or(false, |t| t.is_dir()) {
                debug!("Skipping directory {file_name:?}");
                continue;
            }

            debug!("Loading {slug}...");
            match self.get_by_slug(slug) {
                Ok(wonder) => wonders.push(wonder),
                Err(err) => warn!("Skipping {file_name:?}: {err}"),
            }
        }

        // stable: equal keys keep listing order
        let date_source = self.date_source;
        wonders.sort_by(|a, b| b.sort_key(date_source).cmp(&a.sort_key(date_source)));
        wonders
    }

    pub fn latest(&self) -> Option<Wonder> {
        self.list_all().into_iter().next()
    }

    pub fn get_by_slug(&self, slug: &str) -> Result<Wonder, WonderError> {
        validate_slug(slug)?;

        let path = self.root.join(format!("{slug}.md"));
        let content =
            fs::read_to_string(&path).map_err(|err| WonderError::from_io(path.clone(), err))?;

        parse_wonder(slug, &content).map_err(|source| WonderError::Malformed { path, source })
    }
}

fn slug_of(file_name: &str) -> Option<&str> {
    if file_name == "README.md" {
        return None;
    }
    file_name.strip_suffix(".md")
}

/// A slug names a single file in the journal root: no separators, no `..`,
/// no NUL, not hidden. Anything else (spaces, non-ASCII) is fine.
pub(crate) fn validate_slug(slug: &str) -> Result<(), WonderError> {
    let valid = !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains("..")
        && !slug.contains(&['/', '\\', '\0'][..]);

    if valid {
        Ok(())
    } else {
        Err(WonderError::InvalidSlug {
            slug: slug.to_string(),
        })
    }
}

fn parse_wonder(slug: &str, content: &str) -> Result<Wonder, FrontMatterError> {
    let front_matter = parse_front_matter(content)?;

    // front matter title wins over the first heading
    let title = front_matter
        .data
        .get("title")
        .and_then(front_matter_title)
        .or_else(|| first_heading(front_matter.body));

    Ok(Wonder {
        slug: slug.to_string(),
        date: slug.to_string(),
        title,
        content_html: markdown_to_html(front_matter.body),
        metadata: front_matter.data,
    })
}
