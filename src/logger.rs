//! File-based logging using simplelog.
//!
//! The terminal belongs to the TUI, so records go to
//! `<cache>/ghpm/ghpm.log`. Level comes from `RUST_LOG` (default info).

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::{Path, PathBuf};

fn level_from_env(value: Option<&str>) -> LevelFilter {
    match value.map(str::to_lowercase).as_deref() {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

pub fn log_file_path(cache_root: &Path) -> PathBuf {
    cache_root.join("ghpm.log")
}

/// Start logging into `cache_root`. Any failure leaves logging disabled;
/// the app runs the same either way.
pub fn init(cache_root: &Path) -> Option<PathBuf> {
    let level = level_from_env(std::env::var("RUST_LOG").ok().as_deref());
    if level == LevelFilter::Off {
        return None;
    }

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|c| c)
        .build();

    std::fs::create_dir_all(cache_root).ok()?;
    let path = log_file_path(cache_root);
    let file = File::create(&path).ok()?;
    WriteLogger::init(level, config, file).ok()?;
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parsing_defaults_to_info() {
        assert_eq!(level_from_env(None), LevelFilter::Info);
        assert_eq!(level_from_env(Some("DEBUG")), LevelFilter::Debug);
        assert_eq!(level_from_env(Some("warn")), LevelFilter::Warn);
        assert_eq!(level_from_env(Some("ghpm=debug")), LevelFilter::Info);
        assert_eq!(level_from_env(Some("off")), LevelFilter::Off);
    }

    #[test]
    fn log_file_sits_in_cache_root() {
        assert_eq!(
            log_file_path(Path::new("/cache/ghpm")),
            PathBuf::from("/cache/ghpm/ghpm.log")
        );
    }
}
