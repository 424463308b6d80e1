use std::path::Path;

pub const MISSING_ENV_ISSUE: &str = "⚠️ .env file not found";
pub const MISSING_API_LIBRARY_ISSUE: &str =
    "ℹ️ No common API libraries found (consider installing axios or react-query)";
pub const MISSING_API_FOLDER_ISSUE: &str = "ℹ️ No api/ or services/ folder found";

const ENV_FILES: [&str; 2] = [".env", ".env.local"];
const API_LIBRARIES: [&str; 5] = [
    "axios",
    "react-query",
    "@tanstack/react-query",
    "swr",
    "graphql-request",
];
const API_FOLDERS: [&[&str]; 3] = [&["src", "api"], &["api"], &["services"]];

/// Advisory checks run after the walk. They look at the filesystem again
/// rather than at the indexed structure, since hidden files such as `.env`
/// are never indexed.
pub struct IssueChecker<'a> {
    root: &'a Path,
}

impl<'a> IssueChecker<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    pub fn check(&self, dependencies: &[String], dev_dependencies: &[String]) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.has_env_file() {
            issues.push(MISSING_ENV_ISSUE.to_string());
        }

        if !has_api_library(dependencies, dev_dependencies) {
            issues.push(MISSING_API_LIBRARY_ISSUE.to_string());
        }

        if !self.has_api_folder() {
            issues.push(MISSING_API_FOLDER_ISSUE.to_string());
        }

        issues
    }

    fn has_env_file(&self) -> bool {
        ENV_FILES.iter().any(|name| self.root.join(name).exists())
    }

    fn has_api_folder(&self) -> bool {
        API_FOLDERS.iter().any(|parts| {
            let path = parts.iter().fold(self.root.to_path_buf(), |acc, p| acc.join(p));
            path.exists()
        })
    }
}

fn has_api_library(dependencies: &[String], dev_dependencies: &[String]) -> bool {
    API_LIBRARIES
        .iter()
        .any(|lib| dependencies.iter().chain(dev_dependencies).any(|d| d == lib))
}
