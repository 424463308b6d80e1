use crate::config::Config;
use ignore::{DirEntry, WalkBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Structure key for files sitting directly in the project root.
pub const ROOT_KEY: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub name: String,
    pub path: String,
    pub size: u64,
    /// Extension including the leading dot, empty when the file has none.
    pub ext: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub files: Vec<FileDescriptor>,
}

/// Directories keyed by their path relative to the project root.
///
/// There are no parent/child links: a subdirectory is related to its parent
/// only through the shared key prefix, and the Markdown tree is rendered by
/// walking the keys in sorted order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectStructure {
    directories: BTreeMap<String, DirectoryEntry>,
}

impl ProjectStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ensure(&mut self, key: &str) -> &mut DirectoryEntry {
        self.directories.entry(key.to_string()).or_default()
    }

    pub fn get(&self, key: &str) -> Option<&DirectoryEntry> {
        self.directories.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.directories.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &DirectoryEntry)> {
        self.directories.iter()
    }

    pub fn len(&self) -> usize {
        self.directories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    pub fn total_files(&self) -> usize {
        self.directories.values().map(|d| d.files.len()).sum()
    }
}

pub struct FileDiscovery {
    config: Config,
}

impl FileDiscovery {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Walk `root` and index every non-ignored file under its parent
    /// directory key. Files whose extension is on the allow-list are handed
    /// to `on_source_file` with their absolute and relative paths.
    ///
    /// Symlinks are followed, so a linked directory is indexed like any other.
    /// A directory that cannot be read, a dangling link or a link loop is
    /// logged and skipped; the rest of the tree is still visited.
    pub fn walk<F>(&self, root: &Path, mut on_source_file: F) -> ProjectStructure
    where
        F: FnMut(&Path, &str),
    {
        let mut structure = ProjectStructure::new();

        let filter_config = self.config.clone();
        let mut walker_builder = WalkBuilder::new(root);
        walker_builder
            .standard_filters(false)
            .follow_links(true)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| keep_entry(&filter_config, entry));

        for result in walker_builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Error analyzing directory: {}", e);
                    continue;
                }
            };

            if entry.depth() == 0 {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            let rel_path = relative.to_string_lossy().to_string();

            if entry.file_type().is_some_and(|t| t.is_dir()) {
                structure.ensure(&rel_path);
                continue;
            }

            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    warn!("Error analyzing {}: {}", rel_path, e);
                    continue;
                }
            };

            let extension = relative
                .extension()
                .map(|e| e.to_string_lossy().to_string())
                .unwrap_or_default();

            if !extension.is_empty() && self.config.is_scannable(&extension) {
                on_source_file(entry.path(), &rel_path);
            }

            let parent_key = match relative.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => {
                    parent.to_string_lossy().to_string()
                }
                _ => ROOT_KEY.to_string(),
            };

            let descriptor = FileDescriptor {
                name: entry.file_name().to_string_lossy().to_string(),
                path: rel_path,
                size,
                ext: if extension.is_empty() {
                    String::new()
                } else {
                    format!(".{}", extension)
                },
            };
            structure.ensure(&parent_key).files.push(descriptor);
        }

        structure
    }
}

fn keep_entry(config: &Config, entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return true;
    }

    let name = entry.file_name().to_string_lossy();
    if config.is_ignored(&name) {
        debug!("Skipping {}", entry.path().display());
        return false;
    }

    // Our own output from a previous run.
    if entry.depth() == 1 && (name == config.json_report.as_str() || name == config.markdown_report.as_str()) {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn key(parts: &[&str]) -> String {
        parts.iter().collect::<PathBuf>().to_string_lossy().to_string()
    }

    #[test]
    fn indexes_files_under_parent_keys() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "index.html", "<div id=root></div>");
        write(root, "src/main.tsx", "import App from './App'");
        write(root, "src/components/Button.jsx", "export default 1");
        fs::create_dir_all(root.join("src/empty")).unwrap();

        let discovery = FileDiscovery::new(Config::default());
        let mut scanned = Vec::new();
        let structure = discovery.walk(root, |_, rel| scanned.push(rel.to_string()));

        let top = structure.get(ROOT_KEY).unwrap();
        assert_eq!(top.files.len(), 1);
        assert_eq!(top.files[0].name, "index.html");
        assert_eq!(top.files[0].ext, ".html");
        assert_eq!(top.files[0].size, 19);

        assert!(structure.contains("src"));
        assert!(structure.get(&key(&["src", "empty"])).unwrap().files.is_empty());
        let components = structure.get(&key(&["src", "components"])).unwrap();
        assert_eq!(components.files[0].path, key(&["src", "components", "Button.jsx"]));

        assert_eq!(structure.total_files(), 3);
        assert_eq!(
            scanned,
            vec![key(&["src", "components", "Button.jsx"]), key(&["src", "main.tsx"])]
        );
    }

    #[test]
    fn skips_ignored_and_hidden_entries() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, ".git/config", "[core]");
        write(root, "node_modules/pkg/index.js", "module.exports = {}");
        write(root, ".env", "API_URL=x");
        write(root, "src/.cache/tmp.js", "x");
        write(root, "src/app.js", "x");

        let discovery = FileDiscovery::new(Config::default());
        let mut scanned = Vec::new();
        let structure = discovery.walk(root, |_, rel| scanned.push(rel.to_string()));

        let keys: Vec<&String> = structure.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["src"]);
        assert_eq!(structure.total_files(), 1);
        assert_eq!(scanned, vec![key(&["src", "app.js"])]);
    }

    #[test]
    fn previous_reports_are_not_indexed() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "frontend-analysis.json", "{}");
        write(root, "frontend-analysis.md", "# old");
        write(root, "docs/frontend-analysis.md", "# kept");

        let structure = FileDiscovery::new(Config::default()).walk(root, |_, _| {});
        assert!(structure.get(ROOT_KEY).is_none());
        assert_eq!(structure.get("docs").unwrap().files.len(), 1);
    }

    #[test]
    fn files_without_extension_are_indexed_but_not_scanned() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "Makefile", "all:");

        let mut scanned = 0;
        let structure = FileDiscovery::new(Config::default()).walk(dir.path(), |_, _| scanned += 1);
        assert_eq!(scanned, 0);
        assert_eq!(structure.get(ROOT_KEY).unwrap().files[0].ext, "");
    }

    #[cfg(unix)]
    #[test]
    fn linked_directories_are_walked() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        let shared = TempDir::new().unwrap();
        write(shared.path(), "components/Card.jsx", "export default function Card() {}");
        write(dir.path(), "src/main.js", "import Card from './shared/components/Card'");
        symlink(shared.path(), dir.path().join("src").join("shared")).unwrap();

        let mut scanned = Vec::new();
        let structure = FileDiscovery::new(Config::default()).walk(dir.path(), |_, rel| scanned.push(rel.to_string()));

        assert!(structure.contains(&key(&["src", "shared"])));
        let components = structure.get(&key(&["src", "shared", "components"])).unwrap();
        assert_eq!(components.files[0].name, "Card.jsx");
        assert!(scanned.contains(&key(&["src", "shared", "components", "Card.jsx"])));
    }

    #[cfg(unix)]
    #[test]
    fn broken_entries_do_not_stop_the_walk() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "a/first.js", "x");
        write(root, "z/last.js", "x");
        symlink(root.join("gone"), root.join("m-dangling")).unwrap();
        symlink(root, root.join("a").join("loop")).unwrap();

        let structure = FileDiscovery::new(Config::default()).walk(root, |_, _| {});

        assert_eq!(structure.get("a").unwrap().files.len(), 1);
        assert_eq!(structure.get("z").unwrap().files.len(), 1);
        assert!(structure.get(ROOT_KEY).is_none());
        assert!(!structure.contains(&key(&["a", "loop", "a"])));
    }
}
