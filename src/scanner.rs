//! Regex-based scanning of frontend source text.
//!
//! This is a heuristic: template literals, comments and minified bundles can
//! all produce false matches. No attempt is made to parse the language.

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

const EXPORT_MARKERS: [&str; 5] = [
    "export default",
    "export const",
    "export function",
    "export class",
    "export {",
];

const COMPONENT_SEGMENTS: [&str; 2] = ["/components/", "\\components\\"];
const PAGE_SEGMENTS: [&str; 4] = ["/pages/", "\\pages\\", "/views/", "\\views\\"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCallLine {
    pub line: usize,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Component,
    Page,
}

#[derive(Debug, Clone, Default)]
pub struct FileScan {
    pub imports: Vec<String>,
    /// Already capped to the per-file limit.
    pub api_lines: Vec<ApiCallLine>,
    pub kind: Option<FileKind>,
}

pub struct SourceScanner {
    import_patterns: Vec<Regex>,
    api_patterns: Vec<Regex>,
    max_api_lines: usize,
}

impl SourceScanner {
    pub fn new(max_api_lines: usize) -> Result<Self> {
        Ok(Self {
            import_patterns: vec![
                Regex::new(r#"import\s+.*?\s+from\s+['"]([^'"]+)['"]|import\s+['"]([^'"]+)['"]"#)?,
                Regex::new(r#"require\s*\(\s*['"]([^'"]+)['"]\s*\)"#)?,
            ],
            api_patterns: vec![
                Regex::new(r"fetch\s*\(")?,
                Regex::new(r"axios\.(get|post|put|delete|patch)")?,
                Regex::new(r"\$\.(get|post|ajax)")?,
                Regex::new(r"http\.(get|post)")?,
                Regex::new(r"api\.(get|post)")?,
            ],
            max_api_lines,
        })
    }

    pub fn scan(&self, content: &str, rel_path: &str) -> FileScan {
        FileScan {
            imports: self.extract_imports(content),
            api_lines: self.extract_api_lines(content),
            kind: classify(content, rel_path),
        }
    }

    fn extract_imports(&self, content: &str) -> Vec<String> {
        let mut imports = Vec::new();
        for pattern in &self.import_patterns {
            for captures in pattern.captures_iter(content) {
                if let Some(target) = captures.get(1).or_else(|| captures.get(2)) {
                    imports.push(target.as_str().to_string());
                }
            }
        }
        imports
    }

    /// Every pattern that matches a line records that line once, so a line
    /// hitting two patterns shows up twice before the cap is applied.
    fn extract_api_lines(&self, content: &str) -> Vec<ApiCallLine> {
        let mut lines = Vec::new();
        for (index, line) in content.lines().enumerate() {
            for pattern in &self.api_patterns {
                if pattern.is_match(line) {
                    lines.push(ApiCallLine {
                        line: index + 1,
                        text: line.trim().to_string(),
                    });
                }
            }
        }
        lines.truncate(self.max_api_lines);
        lines
    }
}

/// Components win over pages; a file never lands in both.
pub fn classify(content: &str, rel_path: &str) -> Option<FileKind> {
    if !EXPORT_MARKERS.iter().any(|marker| content.contains(marker)) {
        return None;
    }

    if COMPONENT_SEGMENTS.iter().any(|seg| rel_path.contains(seg)) {
        Some(FileKind::Component)
    } else if PAGE_SEGMENTS.iter().any(|seg| rel_path.contains(seg)) {
        Some(FileKind::Page)
    } else {
        None
    }
}
