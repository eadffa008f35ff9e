use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extension of generated files unless configured otherwise
pub const DEFAULT_EXTENSION: &str = "java";

/// Destination of rendered artifacts
///
/// Each `(namespace, artifact)` pair is opened once per pass. The returned
/// writer is closed when dropped.
pub trait ArtifactSink {
    /// Open a fresh writer for one artifact, replacing any previous content
    fn create_writer(&self, namespace: &str, artifact: &str) -> io::Result<Box<dyn Write + '_>>;
}

/// Writes artifacts below a root directory, one directory per namespace segment
///
/// `("io.github.example", "Contact")` → `<root>/io/github/example/Contact.java`
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
    extension: String,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectorySink {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding a namespace
    pub fn namespace_dir(&self, namespace: &str) -> PathBuf {
        namespace
            .split('.')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |dir, segment| dir.join(segment))
    }

    /// File an artifact is written to
    pub fn path_for(&self, namespace: &str, artifact: &str) -> PathBuf {
        self.namespace_dir(namespace)
            .join(format!("{artifact}.{}", self.extension))
    }
}

impl ArtifactSink for DirectorySink {
    fn create_writer(&self, namespace: &str, artifact: &str) -> io::Result<Box<dyn Write + '_>> {
        let segments_valid = namespace
            .split('.')
            .filter(|segment| !segment.is_empty())
            .all(is_identifier);
        if !segments_valid || !is_identifier(artifact) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{namespace}.{artifact}' is not a valid class name"),
            ));
        }
        let dir = self.namespace_dir(namespace);
        fs::create_dir_all(&dir)?;
        let path = self.path_for(namespace, artifact);
        debug!(path = %path.display(), "opening artifact");
        Ok(Box::new(BufWriter::new(File::create(path)?)))
    }
}

/// Letters, digits, `_` and `$`, not starting with a digit
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Keeps artifacts in memory, keyed by `(namespace, artifact)`
#[derive(Debug, Default)]
pub struct MemorySink {
    artifacts: RefCell<BTreeMap<(String, String), Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of one artifact, if it was written
    pub fn artifact(&self, namespace: &str, artifact: &str) -> Option<String> {
        self.artifacts
            .borrow()
            .get(&(namespace.to_string(), artifact.to_string()))
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Every `(namespace, artifact)` written so far, sorted
    pub fn keys(&self) -> Vec<(String, String)> {
        self.artifacts.borrow().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.artifacts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.borrow().is_empty()
    }
}

impl ArtifactSink for MemorySink {
    fn create_writer(&self, namespace: &str, artifact: &str) -> io::Result<Box<dyn Write + '_>> {
        let key = (namespace.to_string(), artifact.to_string());
        self.artifacts.borrow_mut().insert(key.clone(), Vec::new());
        Ok(Box::new(MemoryWriter { sink: self, key }))
    }
}

struct MemoryWriter<'a> {
    sink: &'a MemorySink,
    key: (String, String),
}

impl Write for MemoryWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sink
            .artifacts
            .borrow_mut()
            .entry(self.key.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
