//! Repository archival: gzip-compressed tar snapshot of the configured
//! repository directory.
//!
//! Entries are normalized to root ownership so the downstream worker
//! unpacks them uniformly, and the walk is sorted so identical trees
//! produce identical archives. Archive names are rooted at the
//! repository directory name (`<repo>/<relative path>`).

use std::fs::File;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tracing::debug;

use crate::error::CoreError;

/// A packed archive on disk.
#[derive(Debug)]
pub struct Archive {
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// The repository directory name, used as archive root and object-name
/// stem.
pub fn repo_name(repo_path: &Path) -> Result<String, CoreError> {
    repo_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| CoreError::RepoPath {
            path: repo_path.to_path_buf(),
            reason: "has no directory name".into(),
        })
}

/// Pack `repo_path` into `dest` (a `.tar.gz` path in a staging dir).
pub fn pack_repository(repo_path: &Path, dest: &Path) -> Result<Archive, CoreError> {
    if !repo_path.is_dir() {
        return Err(CoreError::RepoPath {
            path: repo_path.to_path_buf(),
            reason: "does not exist or is not a directory".into(),
        });
    }
    let root = repo_name(repo_path)?;

    debug!(repo = %repo_path.display(), dest = %dest.display(), "packing repository");

    let encoder = GzEncoder::new(File::create(dest)?, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    append_dir(&mut builder, repo_path, Path::new(&root))?;
    builder.into_inner()?.finish()?;

    let size_bytes = dest.metadata()?.len();
    Ok(Archive {
        path: dest.to_path_buf(),
        size_bytes,
    })
}

fn append_dir(
    builder: &mut tar::Builder<GzEncoder<File>>,
    dir: &Path,
    arc_dir: &Path,
) -> Result<(), CoreError> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(std::fs::DirEntry::file_name);

    for entry in entries {
        let path = entry.path();
        let arc_name = arc_dir.join(entry.file_name());
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            let mut header = root_owned_header(&entry.metadata()?);
            header.set_entry_type(tar::EntryType::Directory);
            header.set_size(0);
            builder.append_data(&mut header, &arc_name, std::io::empty())?;
            append_dir(builder, &path, &arc_name)?;
        } else if file_type.is_file() {
            let metadata = entry.metadata()?;
            let mut header = root_owned_header(&metadata);
            header.set_size(metadata.len());
            builder.append_data(&mut header, &arc_name, File::open(&path)?)?;
        }
        // Other entry types (sockets, fifos) are not part of a source
        // snapshot and are skipped.
    }
    Ok(())
}

fn root_owned_header(metadata: &std::fs::Metadata) -> tar::Header {
    let mut header = tar::Header::new_gnu();
    header.set_metadata(metadata);
    header.set_uid(0);
    header.set_gid(0);
    // "root"/"root" always fit in the gnu header name fields.
    let _ = header.set_username("root");
    let _ = header.set_groupname("root");
    header
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use flate2::read::GzDecoder;

    use super::*;

    fn build_tree(root: &Path) {
        std::fs::create_dir_all(root.join("src/components")).unwrap();
        std::fs::write(root.join("package.json"), b"{\"name\":\"site\"}").unwrap();
        std::fs::write(root.join("src/index.html"), b"<html></html>").unwrap();
        std::fs::write(root.join("src/components/nav.js"), b"export {};\n").unwrap();
    }

    #[test]
    fn round_trip_reproduces_the_tree() {
        let source = tempfile::tempdir().unwrap();
        let repo = source.path().join("customer-site");
        std::fs::create_dir(&repo).unwrap();
        build_tree(&repo);

        let staging = tempfile::tempdir().unwrap();
        let dest = staging.path().join("customer-site.tar.gz");
        let archive = pack_repository(&repo, &dest).unwrap();
        assert!(archive.size_bytes > 0);

        let unpacked = tempfile::tempdir().unwrap();
        tar::Archive::new(GzDecoder::new(File::open(&archive.path).unwrap()))
            .unpack(unpacked.path())
            .unwrap();

        for rel in [
            "package.json",
            "src/index.html",
            "src/components/nav.js",
        ] {
            let original = std::fs::read(repo.join(rel)).unwrap();
            let restored = std::fs::read(unpacked.path().join("customer-site").join(rel)).unwrap();
            assert_eq!(original, restored, "mismatch for {rel}");
        }
    }

    #[test]
    fn entries_are_root_owned_and_rooted_at_repo_name() {
        let source = tempfile::tempdir().unwrap();
        let repo = source.path().join("customer-site");
        std::fs::create_dir(&repo).unwrap();
        build_tree(&repo);

        let staging = tempfile::tempdir().unwrap();
        let dest = staging.path().join("customer-site.tar.gz");
        let archive = pack_repository(&repo, &dest).unwrap();

        let mut tar = tar::Archive::new(GzDecoder::new(File::open(&archive.path).unwrap()));
        let mut seen = Vec::new();
        for entry in tar.entries().unwrap() {
            let entry = entry.unwrap();
            let header = entry.header();
            assert_eq!(header.uid().unwrap(), 0);
            assert_eq!(header.gid().unwrap(), 0);
            let path = entry.path().unwrap().to_string_lossy().into_owned();
            assert!(
                path.starts_with("customer-site"),
                "entry not rooted at repo name: {path}"
            );
            seen.push(path);
        }
        assert!(seen.contains(&"customer-site/src/components/nav.js".to_owned()));
    }

    #[test]
    fn missing_repo_path_is_rejected() {
        let staging = tempfile::tempdir().unwrap();
        let dest = staging.path().join("out.tar.gz");
        let err = pack_repository(Path::new("/nonexistent/repo"), &dest).unwrap_err();
        assert!(matches!(err, CoreError::RepoPath { .. }));
    }
}
