// Sat Oct 17 2026 - Alex

use crate::scripting::error::ResolveError;
use std::fs;
use std::path::{Path, PathBuf};

/// Native modules answered without touching the filesystem.
pub const BUILTIN_MODULES: &[&str] = &["console"];

const EXTENSIONS: &[&str] = &["js", "json"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleKind {
    Script,
    Json,
    Builtin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    /// Canonical path, or the builtin name.
    pub id: String,
    pub path: Option<PathBuf>,
    pub kind: ModuleKind,
}

impl ResolvedModule {
    fn file(path: PathBuf) -> Result<Self, ResolveError> {
        let canonical = fs::canonicalize(&path).map_err(|source| ResolveError::Io {
            path: path.clone(),
            source,
        })?;
        let kind = match canonical.extension().and_then(|e| e.to_str()) {
            Some("json") => ModuleKind::Json,
            _ => ModuleKind::Script,
        };

        Ok(Self {
            id: canonical.to_string_lossy().into_owned(),
            path: Some(canonical),
            kind,
        })
    }

    fn builtin(name: &str) -> Self {
        Self {
            id: name.to_string(),
            path: None,
            kind: ModuleKind::Builtin,
        }
    }

    /// Directory the module's own relative requires resolve against.
    pub fn dir(&self) -> Option<&Path> {
        self.path.as_deref().and_then(Path::parent)
    }
}

/// Ordered list of directories for bare specifiers. First match wins.
#[derive(Debug, Clone)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Anchors relative entries at `root`.
    pub fn anchored<S: AsRef<str>>(root: &Path, entries: &[S]) -> Self {
        let dirs = entries
            .iter()
            .map(|entry| {
                let entry = Path::new(entry.as_ref());
                if entry.is_absolute() {
                    entry.to_path_buf()
                } else {
                    root.join(entry)
                }
            })
            .collect();
        Self { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

/// Maps `require` specifiers to files.
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    search_path: SearchPath,
    node_modules: bool,
}

impl ModuleResolver {
    pub fn new(search_path: SearchPath) -> Self {
        Self {
            search_path,
            node_modules: true,
        }
    }

    pub fn without_node_modules(mut self) -> Self {
        self.node_modules = false;
        self
    }

    pub fn resolve(&self, specifier: &str, from: &Path) -> Result<ResolvedModule, ResolveError> {
        let found = if is_path_specifier(specifier) {
            self.load_as_file_or_dir(&from.join(specifier))?
        } else {
            if BUILTIN_MODULES.contains(&specifier) {
                return Ok(ResolvedModule::builtin(specifier));
            }
            self.resolve_bare(specifier, from)?
        };

        match found {
            Some(path) => ResolvedModule::file(path),
            None => Err(ResolveError::NotFound {
                specifier: specifier.to_string(),
                from: from.to_path_buf(),
            }),
        }
    }

    fn resolve_bare(&self, specifier: &str, from: &Path) -> Result<Option<PathBuf>, ResolveError> {
        if self.node_modules {
            for dir in from.ancestors() {
                if dir.file_name().is_some_and(|name| name == "node_modules") {
                    continue;
                }
                let candidate = dir.join("node_modules").join(specifier);
                if let Some(path) = self.load_as_file_or_dir(&candidate)? {
                    return Ok(Some(path));
                }
            }
        }

        for dir in self.search_path.dirs() {
            if let Some(path) = self.load_as_file_or_dir(&dir.join(specifier))? {
                return Ok(Some(path));
            }
        }

        Ok(None)
    }

    fn load_as_file_or_dir(&self, path: &Path) -> Result<Option<PathBuf>, ResolveError> {
        if let Some(file) = load_as_file(path) {
            return Ok(Some(file));
        }
        self.load_as_directory(path)
    }

    fn load_as_directory(&self, dir: &Path) -> Result<Option<PathBuf>, ResolveError> {
        if !dir.is_dir() {
            return Ok(None);
        }

        let manifest = dir.join("package.json");
        if manifest.is_file() {
            if let Some(main) = package_main(&manifest)? {
                let target = dir.join(main);
                if let Some(file) = load_as_file(&target) {
                    return Ok(Some(file));
                }
                if let Some(index) = load_index(&target) {
                    return Ok(Some(index));
                }
            }
        }

        Ok(load_index(dir))
    }
}

/// `./x`, `../x`, `/x`, `.` and `..` are resolved against the requiring file.
pub fn is_path_specifier(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
        || specifier.starts_with('/')
}

fn load_as_file(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }

    let name = path.file_name()?.to_string_lossy().into_owned();
    EXTENSIONS
        .iter()
        .map(|ext| path.with_file_name(format!("{}.{}", name, ext)))
        .find(|candidate| candidate.is_file())
}

fn load_index(dir: &Path) -> Option<PathBuf> {
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("index.{}", ext)))
        .find(|candidate| candidate.is_file())
}

fn package_main(manifest: &Path) -> Result<Option<String>, ResolveError> {
    let text = fs::read_to_string(manifest).map_err(|source| ResolveError::Io {
        path: manifest.to_path_buf(),
        source,
    })?;
    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| ResolveError::InvalidPackage {
            path: manifest.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(value
        .get("main")
        .and_then(|main| main.as_str())
        .filter(|main| !main.is_empty())
        .map(str::to_string))
}
