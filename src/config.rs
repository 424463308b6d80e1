#[derive(Debug, Clone)]
pub struct Config {
    pub ignore_names: Vec<String>,
    pub hidden_prefix: String,
    pub file_extensions: Vec<String>,
    pub manifest_file: String,
    pub json_report: String,
    pub markdown_report: String,
    pub max_api_lines_per_file: usize,
    pub report: ReportLimits,
}

/// Truncation limits applied when rendering the Markdown report.
#[derive(Debug, Clone)]
pub struct ReportLimits {
    pub tree_files_per_dir: usize,
    pub list_entries: usize,
    pub api_files: usize,
    pub api_lines_per_file: usize,
    pub line_text_chars: usize,
}

impl Default for ReportLimits {
    fn default() -> Self {
        Self {
            tree_files_per_dir: 5,
            list_entries: 20,
            api_files: 10,
            api_lines_per_file: 3,
            line_text_chars: 70,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore_names: vec!["node_modules".to_string(), ".git".to_string()],
            hidden_prefix: ".".to_string(),
            file_extensions: vec![
                "js".to_string(),
                "jsx".to_string(),
                "ts".to_string(),
                "tsx".to_string(),
                "vue".to_string(),
                "css".to_string(),
                "scss".to_string(),
                "mjs".to_string(),
                "cjs".to_string(),
            ],
            manifest_file: "package.json".to_string(),
            json_report: "frontend-analysis.json".to_string(),
            markdown_report: "frontend-analysis.md".to_string(),
            max_api_lines_per_file: 5,
            report: ReportLimits::default(),
        }
    }
}

impl Config {
    /// True when a directory entry name must never be visited.
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore_names.iter().any(|n| n == name)
            || (!self.hidden_prefix.is_empty() && name.starts_with(&self.hidden_prefix))
    }

    /// Extensions are compared exactly, without the leading dot.
    pub fn is_scannable(&self, extension: &str) -> bool {
        self.file_extensions.iter().any(|e| e == extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_dependency_cache_vcs_and_hidden_names() {
        let config = Config::default();
        assert!(config.is_ignored("node_modules"));
        assert!(config.is_ignored(".git"));
        assert!(config.is_ignored(".vscode"));
        assert!(config.is_ignored(".env"));
        assert!(!config.is_ignored("src"));
        assert!(!config.is_ignored("node_modules_backup"));
    }

    #[test]
    fn allow_list_is_exact() {
        let config = Config::default();
        for ext in ["js", "jsx", "ts", "tsx", "vue", "css", "scss", "mjs", "cjs"] {
            assert!(config.is_scannable(ext), "{ext} should be scannable");
        }
        assert!(!config.is_scannable("json"));
        assert!(!config.is_scannable("JS"));
        assert!(!config.is_scannable(""));
    }
}
