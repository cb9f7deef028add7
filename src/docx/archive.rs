use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::Error;

/// What to do when more than one archive entry matches a stream lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AmbiguityPolicy {
    /// Take the first candidate in archive order and log a warning.
    #[default]
    First,
    /// Take the last candidate in archive order and log a warning.
    Last,
    /// Fail with [`Error::AmbiguousStream`].
    Reject,
}

/// Suffix constraint for [`DocxArchive::find_entry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Suffix<'a> {
    Required(&'a str),
    Excluded(&'a str),
}

impl Suffix<'_> {
    fn accepts(&self, name: &str) -> bool {
        match *self {
            Suffix::Required(s) => name.ends_with(s),
            Suffix::Excluded(s) => !name.ends_with(s),
        }
    }
}

/// A ZIP container opened for reading.
pub struct DocxArchive<R> {
    zip: ZipArchive<R>,
}

impl DocxArchive<File> {
    pub fn open(path: &Path) -> Result<Self, Error> {
        if !path.is_file() {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                Error::NotFound(path.to_path_buf())
            }
            _ => Error::Io(e),
        })?;
        Self::from_reader(file)
    }
}

impl<'a> DocxArchive<Cursor<&'a [u8]>> {
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self, Error> {
        Self::from_reader(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> DocxArchive<R> {
    pub fn from_reader(reader: R) -> Result<Self, Error> {
        let zip = ZipArchive::new(reader).map_err(|e| Error::InvalidArchive(e.to_string()))?;
        Ok(Self { zip })
    }

    /// Entry names in central directory order.
    pub fn entry_names(&self) -> Vec<String> {
        self.zip.file_names().map(String::from).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.zip.file_names().any(|n| n == name)
    }

    pub fn open_entry(&mut self, name: &str) -> Result<impl Read + '_, Error> {
        self.zip.by_name(name).map_err(|e| match e {
            ZipError::FileNotFound => Error::StreamNotFound(name.to_string()),
            other => Error::from(other),
        })
    }

    pub fn read_entry(&mut self, name: &str) -> Result<Vec<u8>, Error> {
        let mut data = Vec::new();
        self.open_entry(name)?.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Read an entry as UTF-8 text, dropping a leading byte order mark.
    pub fn read_text(&mut self, name: &str) -> Result<String, Error> {
        let mut content = String::new();
        self.open_entry(name)?.read_to_string(&mut content)?;
        if let Some(stripped) = content.strip_prefix('\u{feff}') {
            content = stripped.to_string();
        }
        Ok(content)
    }

    /// Find the entry whose name contains `marker` and satisfies `suffix`.
    ///
    /// Returns `Ok(None)` when nothing matches. Multiple matches are settled by
    /// `policy`.
    pub fn find_entry(
        &self,
        marker: &str,
        suffix: Suffix,
        policy: AmbiguityPolicy,
    ) -> Result<Option<String>, Error> {
        self.find_entry_in("", marker, suffix, policy)
    }

    /// [`find_entry`](Self::find_entry) limited to names starting with `dir`.
    pub fn find_entry_in(
        &self,
        dir: &str,
        marker: &str,
        suffix: Suffix,
        policy: AmbiguityPolicy,
    ) -> Result<Option<String>, Error> {
        let mut candidates: Vec<String> = self
            .zip
            .file_names()
            .filter(|n| n.starts_with(dir) && n.contains(marker) && suffix.accepts(n))
            .map(String::from)
            .collect();

        if candidates.len() <= 1 {
            return Ok(candidates.pop());
        }

        let chosen = match policy {
            AmbiguityPolicy::First => candidates.swap_remove(0),
            AmbiguityPolicy::Last => candidates.pop().unwrap_or_default(),
            AmbiguityPolicy::Reject => {
                return Err(Error::AmbiguousStream {
                    marker: marker.to_string(),
                    candidates,
                });
            }
        };
        log::warn!(
            "{} entries contain {:?} ({:?}), using {}",
            candidates.len() + 1,
            marker,
            suffix,
            chosen
        );
        Ok(Some(chosen))
    }
}

/// Companion relationship part of a part: "word/document.xml" → "word/_rels/document.xml.rels".
pub fn rels_path_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

/// Directory holding the relationship parts of `part`, with a trailing slash.
pub fn rels_dir_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, _)) => format!("{}/_rels/", dir),
        None => "_rels/".to_string(),
    }
}

/// Archive entry name for a relationship target of `base_part`.
///
/// Relative targets resolve against the directory of `base_part`; a leading `/`
/// makes the target archive-rooted. `.` and `..` segments are collapsed.
pub fn resolve_target(base_part: &str, target: &str) -> String {
    let joined = match target.strip_prefix('/') {
        Some(rooted) => rooted.to_string(),
        None => match base_part.rsplit_once('/') {
            Some((dir, _)) => format!("{}/{}", dir, target),
            None => target.to_string(),
        },
    };

    let mut segments: Vec<&str> = Vec::new();
    for seg in joined.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rels_path_for_nested_and_root_parts() {
        assert_eq!(rels_path_for("word/document.xml"), "word/_rels/document.xml.rels");
        assert_eq!(rels_path_for("document.xml"), "_rels/document.xml.rels");
        assert_eq!(rels_dir_for("word/glossary/document.xml"), "word/glossary/_rels/");
        assert_eq!(rels_dir_for("document.xml"), "_rels/");
    }

    #[test]
    fn resolve_target_relative_rooted_and_parent() {
        assert_eq!(resolve_target("word/document.xml", "media/image1.png"), "word/media/image1.png");
        assert_eq!(resolve_target("word/document.xml", "/word/media/a.jpeg"), "word/media/a.jpeg");
        assert_eq!(resolve_target("word/document.xml", "../media/b.png"), "media/b.png");
        assert_eq!(resolve_target("document.xml", "./media/c.png"), "media/c.png");
    }
}
