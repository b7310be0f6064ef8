use std::path::{Path, PathBuf};

use crate::error::Result;

/// Platform share surface. Implementations may decline (no share sheet,
/// user cancelled); callers must treat that as "use the fallback".
pub trait ShareTarget {
    fn share(&self, title: &str, text: &str, file: Option<&Path>) -> Result<()>;
}

/// Desktop default: there is no native share sheet, so every offer is
/// declined and delivery falls through to the file on disk.
pub struct NoShareTarget;

impl ShareTarget for NoShareTarget {
    fn share(&self, _title: &str, _text: &str, _file: Option<&Path>) -> Result<()> {
        Err(crate::error::PerdiemError::Other("no share surface available".to_string()))
    }
}

/// Writes the workbook to `path`, then offers it to the share target.
/// A declined share is swallowed; the written file is the fallback either
/// way and its path is returned.
pub fn deliver(
    target: &dyn ShareTarget,
    title: &str,
    text: &str,
    bytes: &[u8],
    path: &Path,
) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;
    let _ = target.share(title, text, Some(path));
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingTarget {
        accept: bool,
        offered: RefCell<Vec<PathBuf>>,
    }

    impl ShareTarget for RecordingTarget {
        fn share(&self, _title: &str, _text: &str, file: Option<&Path>) -> Result<()> {
            if let Some(f) = file {
                self.offered.borrow_mut().push(f.to_path_buf());
            }
            if self.accept {
                Ok(())
            } else {
                Err(crate::error::PerdiemError::Other("declined".to_string()))
            }
        }
    }

    #[test]
    fn test_deliver_writes_file_and_offers_share() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        let target = RecordingTarget { accept: true, offered: RefCell::new(Vec::new()) };
        let out = deliver(&target, "Report", "Expense report", b"bytes", &path).unwrap();
        assert_eq!(out, path);
        assert_eq!(std::fs::read(&path).unwrap(), b"bytes");
        assert_eq!(target.offered.borrow().as_slice(), &[path]);
    }

    #[test]
    fn test_declined_share_still_delivers_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        let target = RecordingTarget { accept: false, offered: RefCell::new(Vec::new()) };
        let out = deliver(&target, "Report", "Expense report", b"bytes", &path).unwrap();
        assert!(out.exists());
    }

    #[test]
    fn test_no_share_target_declines() {
        assert!(NoShareTarget.share("t", "x", None).is_err());
    }

    #[test]
    fn test_deliver_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exports").join("report.xlsx");
        deliver(&NoShareTarget, "Report", "", b"b", &path).unwrap();
        assert!(path.exists());
    }
}
