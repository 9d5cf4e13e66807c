use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

/// Access to the files that make up a data root.
///
/// Loaders never touch the filesystem directly, so a host engine can supply
/// its own reader (for example one backed by packaged game assets).
pub trait DataSource {
    /// Reads a whole file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// A missing file must be reported with [`io::ErrorKind::NotFound`].
    fn read(&self, path: &Path) -> io::Result<String>;

    /// Writes a whole file, replacing any previous contents.
    ///
    /// Sources are read-only unless they override this.
    ///
    /// # Errors
    ///
    /// The default implementation always fails with
    /// [`io::ErrorKind::Unsupported`].
    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        let _ = contents;
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("cannot write {}: data source is read-only", path.display()),
        ))
    }
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn read(&self, path: &Path) -> io::Result<String> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        (**self).write(path, contents)
    }
}

impl<T: DataSource + ?Sized> DataSource for Box<T> {
    fn read(&self, path: &Path) -> io::Result<String> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        (**self).write(path, contents)
    }
}

/// The local filesystem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileSystem;

impl DataSource for FileSystem {
    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    /// Parent directories are created automatically if they don't exist.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    }
}

/// A read-only set of files held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bundle {
    files: BTreeMap<PathBuf, String>,
}

impl Bundle {
    /// Creates an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, returning `self` for chaining.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Adds a file, replacing any previous file at the same path.
    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }

    /// The number of files in the bundle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the bundle holds no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl<P: Into<PathBuf>, C: Into<String>> FromIterator<(P, C)> for Bundle {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let mut bundle = Self::new();
        for (path, contents) in iter {
            bundle.insert(path, contents);
        }
        bundle
    }
}

impl DataSource for Bundle {
    fn read(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not in the bundle", path.display()),
            )
        })
    }
}
