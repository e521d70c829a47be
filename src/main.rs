//! # chatstats CLI
//!
//! Command-line interface for the chatstats library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatstats::ChatstatsError;
use chatstats::cli::Args;
use chatstats::pipeline::{analyze_files, expand_inputs};
use chatstats::report::{render_reports, report_stem};
use chatstats::text::StopWords;

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<(), ChatstatsError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);
    let config = args.to_config();

    // Print header
    println!("📊 chatstats v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📖 Format:    {}", args.format);
    println!("🚫 Stopwords: {}", config.stopwords_path.display());
    println!("💾 Output:    {}", config.output_dir.display());
    println!("📄 Charts:    {}", config.chart_format);
    println!();

    let stop_words = StopWords::load(&config.stopwords_path)?.with_match(config.stop_word_match);
    let inputs = expand_inputs(&args.files);

    println!("⏳ Analyzing {} file(s)...", inputs.len());
    let parse_start = Instant::now();
    let report = analyze_files(&inputs, &stop_words, &config, args.format.export_format());
    let parse_time = parse_start.elapsed();

    for file in &report.files {
        match &file.outcome {
            Ok(summary) => println!(
                "   ✔ {} [{}]: {} messages, {} skipped",
                file.path.display(),
                summary.format,
                summary.messages,
                summary.skipped.total()
            ),
            Err(e) => println!("   ✘ {}: {}", file.path.display(), e),
        }
    }
    println!("   Done in {:.2}s", parse_time.as_secs_f64());

    let report = report.into_result()?;
    let skipped = report.skipped();
    let summary = report.stats.summary();

    if report.stats.is_empty() {
        println!();
        println!("⚠️  No messages extracted, nothing to chart");
        return Ok(());
    }

    println!("📈 Writing {} reports...", config.chart_format);
    let stem = report_stem(&inputs);
    let written = render_reports(&report.stats, &config, &stem)?;
    for path in &written {
        println!("   {}", path.display());
    }

    println!();
    println!("✅ Done! Reports saved to {}", config.output_dir.display());

    // Summary
    println!();
    println!("📊 Summary:");
    println!(
        "   Files:     {} analyzed, {} failed",
        report.succeeded(),
        report.failed()
    );
    println!("   Messages:  {}", summary.messages);
    println!(
        "   Skipped:   {} (media {}, service {}, malformed {})",
        skipped.total(),
        skipped.media,
        skipped.service,
        skipped.malformed
    );
    println!(
        "   Words:     {} ({} distinct)",
        summary.tokens, summary.distinct_words
    );
    println!("   Senders:   {}", summary.senders);
    println!("   Days:      {}", summary.days);

    println!();
    println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}
