//! # kakaopack CLI
//!
//! Command-line interface for the kakaopack library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use kakaopack::cli::{Args, OutputFormat};
use kakaopack::config::{Hooks, ParseConfig};
use kakaopack::output::{write_csv, write_json};
use kakaopack::{KakaopackError, import_file, import_file_as};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), KakaopackError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    let output_path = adjust_output_extension(&args.output, args.format);

    // Print header
    println!("📦 kakaopack v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    if let Some(source) = args.source {
        println!("📖 Source:  {}", source);
    }
    println!("💾 Output:  {}", output_path);
    println!("📄 Format:  {}", args.format);
    if args.merge {
        println!("🔀 Merge:   consecutive same-sender messages");
    }
    println!();

    let mut config = ParseConfig::new().with_merge(args.merge);
    if let Some(ref date_format) = args.date_format {
        config = config.with_date_format(date_format.clone());
    }

    println!("⏳ Parsing...");
    let parse_start = Instant::now();
    let mut room = match args.source {
        Some(format) => import_file_as(Path::new(&args.input), format, &config, &Hooks::new())?,
        None => import_file(Path::new(&args.input), &config, &Hooks::new())?,
    };
    if let Some(ref name) = args.name {
        room.set_name(name.clone());
    }
    let parse_time = parse_start.elapsed();
    println!(
        "   Found {} messages in '{}' ({:.2}s)",
        room.len(),
        room.name(),
        parse_time.as_secs_f64()
    );

    println!("💾 Writing {}...", args.format);
    let write_start = Instant::now();
    match args.format {
        OutputFormat::Csv => write_csv(&room, &output_path)?,
        OutputFormat::Json => write_json(&room, &output_path)?,
    }
    let write_time = write_start.elapsed();
    println!("   Written in {:.2}s", write_time.as_secs_f64());

    if let Some(n) = args.top_words {
        println!();
        println!("🔤 Top {} words:", n);
        for (word, count) in room.top_words(n) {
            println!("   {:>6}  {}", count, word);
        }
    }

    let total_time = total_start.elapsed();

    println!();
    println!("✅ Done! Output saved to {}", output_path);
    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());
    let msgs_per_sec = room.len() as f64 / total_time.as_secs_f64().max(f64::EPSILON);
    println!("   Throughput:  {:.0} messages/sec", msgs_per_sec);

    Ok(())
}

/// Adjusts output file extension based on format if using default output.
fn adjust_output_extension(output: &str, format: OutputFormat) -> String {
    if output != "chatroom.csv" {
        return output.to_string();
    }
    format!("chatroom.{}", format.extension())
}
