// Sat Oct 17 2026 - Alex

use std::io;
use std::path::{Path, PathBuf};

/// Moves the process into a script's directory and puts it back afterwards.
///
/// The process working directory is global state: only one guard may be
/// live at a time. Restoration happens in `restore`, or on drop for every
/// path that never reaches it.
pub struct WorkingDirGuard {
    previous: PathBuf,
    current: PathBuf,
    restored: bool,
}

impl WorkingDirGuard {
    pub fn enter(script: &Path) -> io::Result<Self> {
        let previous = std::env::current_dir()?;
        let absolute = std::path::absolute(script)?;
        let current = absolute
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| previous.clone());

        std::env::set_current_dir(&current)?;
        log::debug!(old:% = previous.display(), new:% = absolute.display(); "changed dir");

        Ok(Self {
            previous,
            current,
            restored: false,
        })
    }

    pub fn current(&self) -> &Path {
        &self.current
    }

    pub fn restore(mut self) -> io::Result<()> {
        self.restored = true;
        std::env::set_current_dir(&self.previous)
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        if let Err(e) = std::env::set_current_dir(&self.previous) {
            log::error!(dir:% = self.previous.display(), err:% = e; "failed to restore working directory");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;

    // The working directory is shared by every test thread.
    static CWD_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_enter_and_restore() {
        let _lock = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("data.js");
        fs::write(&script, "function getData() { return '{}'; }").unwrap();

        let before = std::env::current_dir().unwrap();
        let guard = WorkingDirGuard::enter(&script).unwrap();
        assert_eq!(
            fs::canonicalize(std::env::current_dir().unwrap()).unwrap(),
            fs::canonicalize(dir.path()).unwrap()
        );

        guard.restore().unwrap();
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_drop_restores_on_early_exit() {
        let _lock = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("nested.js");

        let before = std::env::current_dir().unwrap();
        let failing = || -> Result<(), String> {
            let _guard = WorkingDirGuard::enter(&script).map_err(|e| e.to_string())?;
            Err("script failed".to_string())
        };
        assert!(failing().is_err());
        assert_eq!(std::env::current_dir().unwrap(), before);
    }
}
