use crate::{
    analyzer::AnalysisReport,
    config::{Config, ReportLimits},
    file_discovery::ROOT_KEY,
};
use anyhow::{Context, Result};
use chrono::Local;
use std::{
    fs,
    path::{Path, PathBuf, MAIN_SEPARATOR},
};

const MAIN_FRAMEWORKS: [&str; 7] = ["react", "vue", "angular", "next", "nuxt", "vite", "webpack"];

/// Renders a finished [`AnalysisReport`] as JSON and Markdown. Rendering
/// never touches the report itself.
pub struct Reporter {
    limits: ReportLimits,
    manifest_file: String,
    json_report: String,
    markdown_report: String,
}

impl Reporter {
    pub fn new(config: &Config) -> Self {
        Self {
            limits: config.report.clone(),
            manifest_file: config.manifest_file.clone(),
            json_report: config.json_report.clone(),
            markdown_report: config.markdown_report.clone(),
        }
    }

    /// Write both reports into `output_dir`, replacing whatever was there.
    /// Returns the JSON path followed by the Markdown path.
    pub fn export_report(&self, report: &AnalysisReport, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut exported_files = Vec::new();

        let json_path = output_dir.join(&self.json_report);
        let json_content = report.export_to_json()?;
        fs::write(&json_path, json_content)
            .with_context(|| format!("Failed to write {}", json_path.display()))?;
        exported_files.push(json_path);

        let md_path = output_dir.join(&self.markdown_report);
        let md_content = self.generate_markdown(report);
        fs::write(&md_path, md_content)
            .with_context(|| format!("Failed to write {}", md_path.display()))?;
        exported_files.push(md_path);

        Ok(exported_files)
    }

    pub fn generate_markdown(&self, report: &AnalysisReport) -> String {
        let manifest = report.package_json.as_ref();
        let mut md = String::new();

        md.push_str(&format!("# Frontend Analysis: {}\n\n", report.project_name));
        md.push_str(&format!(
            "**Date:** {}\n",
            report.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
        ));
        md.push_str(&format!(
            "**Module Type:** {}\n\n",
            manifest.map(|m| m.module_type()).unwrap_or_else(|| "CommonJS".to_string())
        ));

        md.push_str(&format!("## 📦 {}\n\n", self.manifest_file));
        md.push_str(&format!(
            "**Name:** {}\n",
            manifest.and_then(|m| m.name()).unwrap_or_else(|| "N/A".to_string())
        ));
        md.push_str(&format!(
            "**Version:** {}\n\n",
            manifest.and_then(|m| m.version()).unwrap_or_else(|| "N/A".to_string())
        ));

        md.push_str("### Main dependencies:\n");
        md.push_str(&self.render_frameworks(report));

        md.push_str("## 📁 Folder Structure\n\n");
        md.push_str("```\n");
        md.push_str(&self.render_tree(report));
        md.push_str("```\n\n");

        md.push_str(&format!("## 🧩 Components Found ({})\n\n", report.components.len()));
        md.push_str(&self.render_path_list(&report.components, "*No components found in /components*"));
        md.push('\n');

        md.push_str(&format!("## 📄 Pages Found ({})\n\n", report.pages.len()));
        md.push_str(&self.render_path_list(&report.pages, "*No pages found in /pages*"));
        md.push('\n');

        md.push_str("## 🌐 Detected API Calls\n\n");
        md.push_str(&self.render_api_calls(report));
        md.push('\n');

        md.push_str("## ⚠️ Detected Issues\n\n");
        if report.issues.is_empty() {
            md.push_str("*No issues found*\n");
        } else {
            for issue in &report.issues {
                md.push_str(&format!("- {}\n", issue));
            }
        }
        md.push('\n');

        let summary = report.summary();
        md.push_str("## 📊 Summary\n\n");
        md.push_str(&format!("- **Total files analyzed:** {}\n", summary.total_files));
        md.push_str(&format!("- **Components:** {}\n", summary.components));
        md.push_str(&format!("- **Pages:** {}\n", summary.pages));
        md.push_str(&format!("- **Files with API calls:** {}\n", summary.api_files));
        md.push_str(&format!("- **Issues:** {}\n", summary.issues));

        md
    }

    fn render_frameworks(&self, report: &AnalysisReport) -> String {
        let found: Vec<&str> = MAIN_FRAMEWORKS
            .iter()
            .copied()
            .filter(|f| report.dependencies.iter().any(|d| d == f))
            .collect();

        if found.is_empty() {
            return "*No main framework detected*\n\n".to_string();
        }

        let mut out: String = found.iter().map(|f| format!("- {}\n", f)).collect();
        out.push('\n');
        out
    }

    fn render_tree(&self, report: &AnalysisReport) -> String {
        let max_files = self.limits.tree_files_per_dir;
        let mut out = String::new();

        for (dir, entry) in report.structure.iter() {
            if dir == ROOT_KEY || dir == "." {
                continue;
            }

            let depth = dir.split(MAIN_SEPARATOR).count();
            let name = dir.rsplit(MAIN_SEPARATOR).next().unwrap_or(dir);
            out.push_str(&format!("{}📁 {}\n", "  ".repeat(depth), name));

            let file_indent = "  ".repeat(depth + 1);
            for file in entry.files.iter().take(max_files) {
                out.push_str(&format!("{}📄 {}\n", file_indent, file.name));
            }
            if entry.files.len() > max_files {
                out.push_str(&format!("{}... and {} more\n", file_indent, entry.files.len() - max_files));
            }
        }

        out
    }

    fn render_path_list(&self, paths: &[String], empty_note: &str) -> String {
        if paths.is_empty() {
            return format!("{}\n", empty_note);
        }

        let max = self.limits.list_entries;
        let mut out = String::new();
        for path in paths.iter().take(max) {
            out.push_str(&format!("- `{}`\n", path));
        }
        if paths.len() > max {
            out.push_str(&format!("\n*and {} more...*\n", paths.len() - max));
        }
        out
    }

    fn render_api_calls(&self, report: &AnalysisReport) -> String {
        if report.api_calls.is_empty() {
            return "*No explicit API calls detected*\n".to_string();
        }

        let max_files = self.limits.api_files;
        let max_lines = self.limits.api_lines_per_file;
        let mut out = String::new();

        for finding in report.api_calls.iter().take(max_files) {
            out.push_str(&format!("- **{}**\n", finding.file));
            for line in finding.lines.iter().take(max_lines) {
                out.push_str(&format!(
                    "  - Line {}: `{}`\n",
                    line.line,
                    truncate_chars(&line.text, self.limits.line_text_chars)
                ));
            }
            if finding.lines.len() > max_lines {
                out.push_str(&format!("  - *... and {} more*\n", finding.lines.len() - max_lines));
            }
        }

        if report.api_calls.len() > max_files {
            out.push_str(&format!(
                "\n*and {} more files with API calls*\n",
                report.api_calls.len() - max_files
            ));
        }

        out
    }
}

/// Cut `text` to `max_chars` characters, marking the cut with `...`.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
