use crate::{
    config::Config,
    file_discovery::{FileDiscovery, ProjectStructure},
    issues::IssueChecker,
    manifest::{load_manifest, Manifest, ManifestStatus},
    scanner::{ApiCallLine, FileKind, FileScan, SourceScanner},
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Everything one run learns about a project. Built up phase by phase by
/// [`Analyzer::analyze`] and only read afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub project_name: String,
    pub timestamp: DateTime<Utc>,
    pub package_json: Option<Manifest>,
    pub structure: ProjectStructure,
    pub components: Vec<String>,
    pub pages: Vec<String>,
    pub api_calls: Vec<ApiCallFinding>,
    pub imports: BTreeSet<String>,
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCallFinding {
    pub file: String,
    pub lines: Vec<ApiCallLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub total_files: usize,
    pub components: usize,
    pub pages: usize,
    pub api_files: usize,
    pub issues: usize,
}

impl AnalysisReport {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            timestamp: Utc::now(),
            package_json: None,
            structure: ProjectStructure::new(),
            components: Vec::new(),
            pages: Vec::new(),
            api_calls: Vec::new(),
            imports: BTreeSet::new(),
            dependencies: Vec::new(),
            dev_dependencies: Vec::new(),
            issues: Vec::new(),
        }
    }

    fn record_scan(&mut self, rel_path: &str, scan: FileScan) {
        self.imports.extend(scan.imports);

        if !scan.api_lines.is_empty() {
            self.api_calls.push(ApiCallFinding {
                file: rel_path.to_string(),
                lines: scan.api_lines,
            });
        }

        match scan.kind {
            Some(FileKind::Component) => self.components.push(rel_path.to_string()),
            Some(FileKind::Page) => self.pages.push(rel_path.to_string()),
            None => {}
        }
    }

    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            total_files: self.structure.total_files(),
            components: self.components.len(),
            pages: self.pages.len(),
            api_files: self.api_calls.len(),
            issues: self.issues.len(),
        }
    }

    pub fn print_summary(&self) {
        let summary = self.summary();
        println!("\n📋 Analysis summary:");
        println!("📁 Total files: {}", summary.total_files);
        println!("🧩 Components: {}", summary.components);
        println!("📄 Pages: {}", summary.pages);
        println!("🌐 Files with API calls: {}", summary.api_files);
        println!("⚠️ Issues: {}", summary.issues);
        println!("\n📊 Check the generated files for more details!");
    }

    pub fn export_to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub struct Analyzer {
    config: Config,
    root: PathBuf,
    file_discovery: FileDiscovery,
    scanner: SourceScanner,
}

impl Analyzer {
    pub fn new(root: &Path, config: Config) -> Result<Self> {
        let root = std::path::absolute(root)?;
        let file_discovery = FileDiscovery::new(config.clone());
        let scanner = SourceScanner::new(config.max_api_lines_per_file)?;

        Ok(Self {
            config,
            root,
            file_discovery,
            scanner,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn project_name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.root.to_string_lossy().to_string())
    }

    /// Run the loader, walker/scanner and issue checks in order. Nothing is
    /// written to disk here; see [`crate::Reporter`] for that.
    pub fn analyze(&self) -> AnalysisReport {
        let mut report = AnalysisReport::new(self.project_name());

        self.load_manifest(&mut report);

        let structure = self
            .file_discovery
            .walk(&self.root, |path, rel_path| self.scan_file(path, rel_path, &mut report));
        report.structure = structure;

        let issues = IssueChecker::new(&self.root).check(&report.dependencies, &report.dev_dependencies);
        report.issues.extend(issues);

        report
    }

    fn load_manifest(&self, report: &mut AnalysisReport) {
        let manifest_path = self.root.join(&self.config.manifest_file);
        let status = load_manifest(&manifest_path);

        if let Some(issue) = status.issue(&self.config.manifest_file) {
            debug!("{}", issue);
            report.issues.push(issue);
        }

        if let ManifestStatus::Loaded(manifest) = status {
            debug!("Loaded {}", manifest_path.display());
            report.dependencies = manifest.dependency_names();
            report.dev_dependencies = manifest.dev_dependency_names();
            report.package_json = Some(manifest);
        }
    }

    fn scan_file(&self, path: &Path, rel_path: &str, report: &mut AnalysisReport) {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            // The walker raced a directory swap; nothing worth reporting.
            Err(e) if e.kind() == io::ErrorKind::IsADirectory => return,
            Err(e) => {
                warn!("Error analyzing {}: {}", rel_path, e);
                return;
            }
        };

        let scan = self.scanner.scan(&content, rel_path);
        debug!(
            "  ✓ {} ({} imports, {} API lines)",
            rel_path,
            scan.imports.len(),
            scan.api_lines.len()
        );
        report.record_scan(rel_path, scan);
    }
}
