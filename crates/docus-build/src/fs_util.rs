//! Filesystem helpers: staging, directory recreation and artifact publishing.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use docus_chapters::Chapter;

use crate::error::BuildError;

/// Remove `dir` and everything below it. A missing directory is not an error.
pub(crate) fn remove_dir_if_exists(dir: &Path) -> Result<(), BuildError> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(BuildError::io(dir)(e)),
    }
}

/// Delete-then-create `dir`, leaving it empty. Not atomic.
pub(crate) fn recreate_dir(dir: &Path) -> Result<(), BuildError> {
    remove_dir_if_exists(dir)?;
    fs::create_dir_all(dir).map_err(BuildError::io(dir))
}

/// Write `contents` to `path`, creating parent directories.
pub(crate) fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(BuildError::io(parent))?;
    }
    fs::write(path, contents).map_err(BuildError::io(path))
}

/// Copy every document of `chapters` from `src_dir` to `docs_dir`.
///
/// Stops at the first document that is missing or whose path would leave
/// the source directory. Returns the number of documents copied.
pub(crate) fn stage_documents(
    chapters: &Chapter,
    src_dir: &Path,
    docs_dir: &Path,
) -> Result<usize, BuildError> {
    let mut staged = 0;
    for leaf in chapters.leaves() {
        let relative = checked_relative(leaf)?;
        let source = src_dir.join(relative);
        if !source.is_file() {
            return Err(BuildError::Staging {
                path: leaf.to_owned(),
                reason: format!("source file {} not found", source.display()),
            });
        }

        let dest = docs_dir.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(BuildError::io(parent))?;
        }
        fs::copy(&source, &dest).map_err(BuildError::io(&source))?;
        tracing::debug!(document = leaf, "Staged");
        staged += 1;
    }
    Ok(staged)
}

/// Validate that a chapter leaf is a plain relative path.
fn checked_relative(leaf: &str) -> Result<&Path, BuildError> {
    let path = Path::new(leaf);
    let plain = path
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if leaf.is_empty() || !plain {
        return Err(BuildError::Staging {
            path: leaf.to_owned(),
            reason: "document paths must be relative and stay inside the source directory"
                .to_owned(),
        });
    }
    Ok(path)
}

/// Recursively copy the directory `src` to `dest`.
pub(crate) fn copy_tree(src: &Path, dest: &Path) -> Result<(), BuildError> {
    fs::create_dir_all(dest).map_err(BuildError::io(dest))?;
    for entry in fs::read_dir(src).map_err(BuildError::io(src))? {
        let entry = entry.map_err(BuildError::io(src))?;
        let path = entry.path();
        let target = dest.join(entry.file_name());
        if path.is_dir() {
            copy_tree(&path, &target)?;
        } else {
            fs::copy(&path, &target).map_err(BuildError::io(&path))?;
        }
    }
    Ok(())
}

/// Replace `dest` with a copy of `src` without exposing a partial tree.
///
/// The copy is written into a temporary sibling of `dest` and renamed into
/// place once complete. If copying fails the temporary directory is removed
/// and `dest` is left as it was.
///
/// Fails with [`BuildError::NestedOutput`] before touching the disk if `dest`
/// would land inside `src`.
pub(crate) fn publish_tree(src: &Path, dest: &Path) -> Result<(), BuildError> {
    let parent = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let src_root = resolve(src).map_err(BuildError::io(src))?;
    if resolve(parent).map_err(BuildError::io(parent))?.starts_with(&src_root) {
        return Err(BuildError::NestedOutput {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
        });
    }
    fs::create_dir_all(parent).map_err(BuildError::io(parent))?;

    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let staging = tempfile::Builder::new()
        .prefix(&format!(".{name}."))
        .tempdir_in(parent)
        .map_err(BuildError::io(parent))?;

    let staged = staging.path().join("tree");
    copy_tree(src, &staged)?;

    remove_dir_if_exists(dest)?;
    fs::rename(&staged, dest).map_err(BuildError::io(dest))?;
    tracing::debug!(dest = %dest.display(), "Published");
    Ok(())
}

/// Canonical form of `path`, which need not exist yet.
///
/// Canonicalizes the nearest existing ancestor and appends the rest.
fn resolve(path: &Path) -> io::Result<PathBuf> {
    let mut existing = path;
    let mut missing = Vec::new();
    loop {
        match existing.canonicalize() {
            Ok(base) => return Ok(missing.iter().rev().fold(base, |acc, name| acc.join(name))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let Some(name) = existing.file_name() else {
                    return Err(e);
                };
                missing.push(name.to_owned());
                existing = existing
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or(Path::new("."));
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_recreate_dir_empties_existing() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("pages");
        write(&dir.join("old.js"), "old");

        recreate_dir(&dir).unwrap();

        assert!(dir.is_dir());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn test_recreate_dir_creates_missing() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a/b");
        recreate_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_stage_documents_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let docs = tmp.path().join("docs");
        write(&src.join("index.md"), "# Index");
        write(&src.join("guide/deep/a.md"), "# A");
        let chapters = Chapter::Sequence(vec![
            Chapter::leaf("index.md"),
            Chapter::Mapping(vec![("Guide".to_owned(), Chapter::leaf("guide/deep/a.md"))]),
        ]);

        let staged = stage_documents(&chapters, &src, &docs).unwrap();

        assert_eq!(staged, 2);
        assert_eq!(fs::read_to_string(docs.join("index.md")).unwrap(), "# Index");
        assert_eq!(fs::read_to_string(docs.join("guide/deep/a.md")).unwrap(), "# A");
    }

    #[test]
    fn test_stage_documents_halts_on_missing() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let docs = tmp.path().join("docs");
        write(&src.join("a.md"), "a");
        write(&src.join("c.md"), "c");
        let chapters = Chapter::Sequence(vec![
            Chapter::leaf("a.md"),
            Chapter::leaf("b.md"),
            Chapter::leaf("c.md"),
        ]);

        let err = stage_documents(&chapters, &src, &docs).unwrap_err();

        assert!(matches!(err, BuildError::Staging { ref path, .. } if path == "b.md"));
        assert!(docs.join("a.md").exists());
        assert!(!docs.join("c.md").exists());
    }

    #[test]
    fn test_stage_documents_rejects_escaping_paths() {
        let tmp = TempDir::new().unwrap();
        for leaf in ["../secret.md", "/etc/passwd", "guide/../../x.md", ""] {
            let chapters = Chapter::leaf(leaf);
            let err = stage_documents(&chapters, tmp.path(), &tmp.path().join("docs")).unwrap_err();
            assert!(
                matches!(err, BuildError::Staging { ref path, .. } if path == leaf),
                "expected staging error for {leaf:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_stage_documents_directory_is_not_a_document() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("src/guide")).unwrap();
        let err = stage_documents(
            &Chapter::leaf("guide"),
            &tmp.path().join("src"),
            &tmp.path().join("docs"),
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::Staging { .. }));
    }

    #[test]
    fn test_copy_tree() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        write(&src.join("a.txt"), "a");
        write(&src.join("nested/b.txt"), "b");
        fs::create_dir_all(src.join("empty")).unwrap();

        copy_tree(&src, &tmp.path().join("dest")).unwrap();

        let dest = tmp.path().join("dest");
        assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "a");
        assert_eq!(fs::read_to_string(dest.join("nested/b.txt")).unwrap(), "b");
        assert!(dest.join("empty").is_dir());
    }

    #[test]
    fn test_publish_tree_replaces_destination() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("build");
        write(&src.join("index.html"), "new");
        let dest = tmp.path().join("out/site.docus");
        write(&dest.join("stale.html"), "stale");

        publish_tree(&src, &dest).unwrap();

        assert_eq!(fs::read_to_string(dest.join("index.html")).unwrap(), "new");
        assert!(!dest.join("stale.html").exists());
        // Only the published directory is left in the parent.
        let entries: Vec<_> = fs::read_dir(tmp.path().join("out"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("site.docus")]);
    }

    #[test]
    fn test_publish_tree_missing_source_keeps_destination() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("site.docus");
        write(&dest.join("index.html"), "previous");

        let err = publish_tree(&tmp.path().join("missing"), &dest).unwrap_err();

        assert!(matches!(err, BuildError::Io { .. }));
        assert_eq!(fs::read_to_string(dest.join("index.html")).unwrap(), "previous");
    }

    #[test]
    fn test_publish_tree_rejects_destination_inside_source() {
        let tmp = TempDir::new().unwrap();
        let cache = tmp.path().join(".cache");
        write(&cache.join("website/sidebars.json"), "{}");

        let err = publish_tree(&cache, &cache.join("out/p.docus.src")).unwrap_err();

        assert!(matches!(err, BuildError::NestedOutput { .. }), "got {err:?}");
        assert!(err.to_string().contains("inside"));
        assert!(!cache.join("out").exists());
    }

    #[test]
    fn test_publish_tree_rejects_destination_beside_source_root() {
        let tmp = TempDir::new().unwrap();
        write(&tmp.path().join("docs/index.md"), "# Index");

        // Publishing the project directory next to itself nests the copy.
        let err = publish_tree(tmp.path(), &tmp.path().join("p.docus.src")).unwrap_err();

        assert!(matches!(err, BuildError::NestedOutput { .. }), "got {err:?}");
    }

    #[test]
    fn test_resolve_missing_tail() {
        let tmp = TempDir::new().unwrap();
        let resolved = resolve(&tmp.path().join("a/./b")).unwrap();
        assert_eq!(resolved, tmp.path().canonicalize().unwrap().join("a/b"));
    }
}
