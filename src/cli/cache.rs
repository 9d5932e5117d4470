//! Cache management flags

use colored::Colorize;

use crate::cache::CacheStorage;
use crate::cli::OutputFormat;
use crate::cli::args::CacheArgs;
use crate::error::Result;

/// Show cache status/statistics
pub fn info(args: &CacheArgs, format: OutputFormat) -> Result<()> {
    let dir = args.resolve_dir()?;
    let cache = CacheStorage::open_at(&dir)?;
    let stats = cache.stats()?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "path": dir.display().to_string(),
                "total_entries": stats.total_entries,
                "total_size_bytes": stats.total_size_bytes,
                "total_size_human": format_size(stats.total_size_bytes),
                "max_age_hours": args.cache_hours,
                "oldest_entry_timestamp": stats.oldest_entry,
                "newest_entry_timestamp": stats.newest_entry,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            println!("{}", "Cache Status".bold());
            println!("────────────────────────────────────────");
            println!("Location:       {}", dir.display());
            println!("Entries:        {}", stats.total_entries);
            println!("Total size:     {}", format_size(stats.total_size_bytes));
            println!("Expiry:         {}h", args.cache_hours);

            if let Some(oldest) = stats.oldest_entry {
                println!("Oldest entry:   {}", format_epoch(oldest));
            }
            if let Some(newest) = stats.newest_entry {
                println!("Newest entry:   {}", format_epoch(newest));
            }
        }
    }

    Ok(())
}

/// Delete every cached result
pub fn reset(args: &CacheArgs) -> Result<()> {
    let dir = args.resolve_dir()?;
    if CacheStorage::reset_at(&dir)? {
        eprintln!("{} Cache reset ({})", "✓".green(), dir.display());
    } else {
        eprintln!("Cache was already empty");
    }
    Ok(())
}

fn format_epoch(secs: i64) -> String {
    chrono::DateTime::from_timestamp(secs, 0)
        .map(|d| {
            d.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// Format bytes as human-readable size
fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }
}
