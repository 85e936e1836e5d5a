use std::fs;
use std::path::{Path, PathBuf};

use staffboard_engine::ExportArtifact;

use crate::error::ExportError;

/// Write `artifact` into `dir` under its own file name, creating `dir` if
/// needed. An existing file is overwritten.
pub fn write_artifact(artifact: &ExportArtifact, dir: &Path) -> Result<PathBuf, ExportError> {
    let io_err = |path: &Path, e: std::io::Error| ExportError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    let path = dir.join(&artifact.file_name);
    fs::write(&path, &artifact.contents).map_err(|e| io_err(&path, e))?;

    log::info!("wrote {} ({} bytes)", path.display(), artifact.contents.len());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn artifact() -> ExportArtifact {
        ExportArtifact {
            file_name: "incidents.csv".into(),
            contents: "time,type\n\"09:00\",\"Medical\"".into(),
        }
    }

    #[test]
    fn writes_into_nested_dir() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out/today");

        let path = write_artifact(&artifact(), &target).unwrap();

        assert_eq!(path, target.join("incidents.csv"));
        assert_eq!(fs::read_to_string(&path).unwrap(), artifact().contents);
    }

    #[test]
    fn dir_that_is_a_file_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let err = write_artifact(&artifact(), &blocker).unwrap_err();
        assert!(err.to_string().contains("blocker"));
    }
}
