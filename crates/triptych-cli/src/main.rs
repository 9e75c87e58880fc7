//! triptych - side-by-side comparison pages for image generation experiments
//!
//! Reads the experiment manifest, matches SD / UCE / Our images on disk,
//! and writes one HTML page per concept plus an index.

use anyhow::Result;
use clap::Parser;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};
use triptych_core::{fmt_num, HostingMode, ProgressContext, SiteConfig, SiteSummary, WriteOutcome};

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "triptych")]
#[command(about = "Generate SD vs UCE vs Our comparison pages from an experiment manifest")]
#[command(version)]
struct Cli {
    /// Image hosting: online, dropbox, public (remote URLs) or local, offline
    /// (relative paths). Defaults to the configured mode, local if unset.
    mode: Option<HostingMode>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Bars on a TTY, log lines otherwise
    let progress = ProgressContext::new();
    let multi = if progress.is_tty() {
        Some(progress.multi())
    } else {
        None
    };
    triptych_core::init_logging(false, multi);

    let config = Config::load()?;
    let mode = config.hosting_mode(cli.mode);
    let site = config.site_config(mode)?;

    match mode {
        HostingMode::Online => log::info!("Hosting mode: online, using public URL {}", site.url_prefix),
        HostingMode::Local => log::info!(
            "Hosting mode: local, using local path {}",
            config.hosting.local_prefix
        ),
    }

    let summary = triptych_core::run(&site, &progress)?;
    print_summary(&summary, &site, mode);
    Ok(())
}

fn print_summary(summary: &SiteSummary, site: &SiteConfig, mode: HostingMode) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Concept").fg(Color::Cyan),
            Cell::new("Triplets").fg(Color::Cyan),
            Cell::new("Page").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
        ]);

    for page in &summary.pages {
        let status = match page.outcome {
            WriteOutcome::Written => Cell::new("written").fg(Color::Green),
            WriteOutcome::Unchanged => Cell::new("unchanged"),
        };
        table.add_row(vec![
            Cell::new(&page.concept),
            Cell::new(fmt_num(page.triplets)),
            Cell::new(page.path.display()),
            status,
        ]);
    }
    for concept in &summary.concepts_without_matches {
        table.add_row(vec![
            Cell::new(concept).fg(Color::Yellow),
            Cell::new("0").fg(Color::Yellow),
            Cell::new("-"),
            Cell::new("skipped").fg(Color::Yellow),
        ]);
    }
    for collision in &summary.page_collisions {
        table.add_row(vec![
            Cell::new(&collision.concept).fg(Color::Red),
            Cell::new("-"),
            Cell::new(&collision.page),
            Cell::new(format!("collides with '{}'", collision.kept)).fg(Color::Red),
        ]);
    }

    println!("\n{table}");
    println!();
    println!(
        "Complete! Generated visualizations for {} concepts",
        summary.pages.len()
    );
    println!(
        "Open '{}' in your browser to explore all concepts",
        summary.index_path.display()
    );
    println!(
        "Total image triplets processed: {}",
        fmt_num(summary.total_triplets())
    );
    println!(
        "Files written: {}, unchanged: {}",
        summary.written(),
        summary.unchanged()
    );
    if summary.rows_skipped > 0 {
        println!(
            "Manifest rows skipped as malformed: {} (of {})",
            fmt_num(summary.rows_skipped),
            fmt_num(summary.rows_loaded + summary.rows_skipped)
        );
    }
    if !summary.pruned.is_empty() {
        println!("Stale pages removed: {}", summary.pruned.len());
    }

    println!();
    match mode {
        HostingMode::Online => {
            println!("Online hosting mode:");
            println!("   Images will be loaded from: {}", site.url_prefix);
            println!("   Upload all HTML files and the data folder to your hosting service");
        }
        HostingMode::Local => {
            println!("Local hosting mode:");
            println!("   Images will be loaded from local paths");
            println!("   Ensure the data folder is in the same directory as the HTML files");
        }
    }
}
