use anyhow::Context;
use clap::Parser;
use folder_to_pdf::cli::Cli;
use folder_to_pdf::{BatchConverter, ConverterConfig};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("📄 folder-pdf - 画像フォルダのPDF一括変換\n");

    let config = ConverterConfig::new(&cli.folder)
        .with_pdf_quality(cli.pdf_quality)
        .with_collision_policy(cli.on_collision)
        .with_progress(!cli.no_progress);

    let converter = BatchConverter::new(config)
        .with_context(|| format!("処理を開始できません: {}", cli.folder.display()))?;

    let summary = converter.convert();

    if let Some(report_path) = &cli.report {
        let json = summary.to_json()?;
        std::fs::write(report_path, json)
            .with_context(|| format!("レポートを保存できません: {}", report_path.display()))?;
        println!("✔ レポートを保存: {}", report_path.display());
    }

    let skipped = summary.skipped_count();
    if skipped > 0 {
        println!("\n⚠️ {}件の項目をスキップしました", skipped);
    }
    println!("\n✅ PDF変換と後片付けが完了 ({}件のPDF)", summary.documents_written());

    Ok(())
}
