use std::io::Write as _;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("output directory does not exist: {}", path.display())]
    MissingParent { path: PathBuf },
    #[error("output parent is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Writes `contents` to `path`, replacing any existing file.
///
/// The parent directory must already exist. Data is written to a temporary file next to the
/// destination and renamed into place, so readers observe either the old file or the complete
/// new one. On error the temporary file is removed.
pub fn write_document(path: &Path, contents: &str) -> Result<(), WriteError> {
    let io_err = |source: std::io::Error| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    let parent = parent_dir(path);
    let meta = match std::fs::metadata(&parent) {
        Ok(meta) => meta,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(WriteError::MissingParent { path: parent });
        }
        Err(err) => return Err(io_err(err)),
    };
    if !meta.is_dir() {
        return Err(WriteError::NotADirectory { path: parent });
    }

    let mut tmp = tempfile::Builder::new()
        .prefix(".narwhal-")
        .suffix(".tmp")
        .tempfile_in(&parent)
        .map_err(io_err)?;
    tmp.write_all(contents.as_bytes()).map_err(io_err)?;
    tmp.flush().map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|err| io_err(err.error))?;

    tracing::info!(path = %path.display(), bytes = contents.len(), "document written");
    Ok(())
}
