use chrono::Local;
use color_journal::{
    FileStore, Gateway, JournalContext, config::resolve_data_path, palette, summarize,
};
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_path = resolve_data_path();
    info!("reading journal from {}", data_path.display());

    let context = JournalContext::new(Gateway::new(FileStore::new(data_path)));
    let document = context.gateway().load_document()?;
    let records = context.gateway().load_records();
    let today = Local::now().date_naive();
    let summary = summarize(&records, today);

    if env::args().skip(1).any(|arg| arg == "--json") {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let name = context.display_name()?.unwrap_or_else(|| "there".to_string());
    println!("Hello, {name}.");
    match &document {
        Some(document) if !document.dataset_name.is_empty() => {
            println!("Journal: {}", document.dataset_name);
        }
        Some(_) => println!("Journal: (unnamed)"),
        None => {
            println!("No color data yet.");
            return Ok(());
        }
    }

    println!(
        "{} days tracked ({} light, {} dark), {} with notes, {:.0}% of the last 30 days",
        summary.tracked_days,
        summary.light_days,
        summary.dark_days,
        summary.notes,
        summary.window_coverage
    );
    if let Some(color) = &summary.dominant_color {
        let label = palette::name_for_hex(color).unwrap_or("custom");
        println!("Most frequent color: {color} ({label})");
    }

    for week in &summary.weeks {
        println!("Week {} ({} to {})", week.week, week.start, week.end);
        for record in &week.records {
            let note = record.note.as_deref().unwrap_or("");
            println!(
                "  day {:>2}  {}  {:<5}  {note}",
                record.day, record.color, record.color_mode
            );
        }
    }

    Ok(())
}
