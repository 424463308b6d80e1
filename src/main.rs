use clap::Parser;
use frontend_examer::{Analyzer, Config, Reporter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "frontend-examer")]
#[command(about = "Scan a frontend project and write a structure report next to it")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Project root to analyze
    #[arg(default_value = ".")]
    path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = Config::default();
    let analyzer = Analyzer::new(&cli.path, config)?;

    println!("🔍 Analyzing frontend structure...\n");
    let report = analyzer.analyze();

    if let Some(manifest) = &report.package_json {
        println!("✅ {} found", analyzer.config().manifest_file);
        println!("📦 Type: {}", manifest.module_type());
    }

    let reporter = Reporter::new(analyzer.config());
    let exported_files = reporter.export_report(&report, analyzer.root())?;

    println!("✅ Analysis complete!");
    if let [json_path, md_path] = exported_files.as_slice() {
        println!("📊 JSON report: {}", json_path.display());
        println!("📝 Markdown report: {}", md_path.display());
    }

    report.print_summary();

    Ok(())
}
