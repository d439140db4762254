#[cfg(test)]
pub mod test {
    use std::collections::HashMap;
    use std::io;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use crate::file::FileSystem;

    /// A small document exercising comments, indentation and an empty section.
    pub const SAMPLE: &str = "; application settings\r\n\
        [server]\r\n\
        host = localhost ; bind address\r\n\
        \tport=8080\r\n\
        \r\n\
        [database]\n\
        ; connection\n\
        url = postgres://db/app\n\
        pool_size = 5\n\
        \n\
        [empty]\n";

    /// In-memory [`FileSystem`] that counts reads and successful writes.
    ///
    /// Clones share the same files and counters, so a test can keep one clone
    /// while the store owns another.
    #[derive(Clone, Default)]
    pub struct RecordingFs {
        inner: Arc<Inner>,
    }

    #[derive(Default)]
    struct Inner {
        files: Mutex<HashMap<PathBuf, String>>,
        reads: AtomicUsize,
        writes: AtomicUsize,
        fail_writes: AtomicBool,
    }

    impl RecordingFs {
        pub fn with_file(path: impl Into<PathBuf>, contents: &str) -> Self {
            let fs = Self::default();
            fs.inner
                .files
                .lock()
                .unwrap()
                .insert(path.into(), contents.to_string());
            fs
        }

        pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
            self.inner.files.lock().unwrap().get(path.as_ref()).cloned()
        }

        pub fn reads(&self) -> usize {
            self.inner.reads.load(Ordering::SeqCst)
        }

        pub fn writes(&self) -> usize {
            self.inner.writes.load(Ordering::SeqCst)
        }

        pub fn fail_writes(&self, fail: bool) {
            self.inner.fail_writes.store(fail, Ordering::SeqCst);
        }
    }

    impl FileSystem for RecordingFs {
        fn exists(&self, path: &Path) -> bool {
            self.inner.files.lock().unwrap().contains_key(path)
        }

        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            self.inner.reads.fetch_add(1, Ordering::SeqCst);
            self.contents(path)
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }

        fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
            if self.inner.fail_writes.load(Ordering::SeqCst) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
            }
            self.inner
                .files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), contents.to_string());
            self.inner.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn recording_fs_counts_successful_writes() {
        let fs = RecordingFs::default();
        fs.write(Path::new("a.ini"), "x").unwrap();
        fs.fail_writes(true);
        assert!(fs.write(Path::new("a.ini"), "y").is_err());
        assert_eq!(fs.writes(), 1);
        assert_eq!(fs.contents("a.ini").as_deref(), Some("x"));
    }
}
