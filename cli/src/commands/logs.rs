use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};

use bytesize::ByteSize;
use chrono::NaiveDate;
use color_eyre::eyre::{eyre, Result};

use crate::commands::parse_date;
use crate::config;
use crate::data::DATE_FORMAT;
use crate::logging::LOG_FILE_PREFIX;

pub fn run(lines: usize, follow: bool, list: bool, date: Option<String>) -> Result<()> {
    let log_dir = config::runtime_dir();
    let files = log_files(&log_dir);

    if files.is_empty() {
        println!("No log files found in {}", log_dir.display());
        println!("Log files are written by `stride steps feed`.");
        return Ok(());
    }

    if list {
        for (day, path) in &files {
            let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
            println!("{}  {:>10}  {}", day, ByteSize::b(size).to_string(), path.display());
        }
        return Ok(());
    }

    let path = match date {
        Some(raw) => {
            let day = parse_date(Some(&raw))?;
            find_for_date(&files, day).ok_or_else(|| eyre!("No log file for {}", day))?
        }
        None => match files.last() {
            Some((_, path)) => path,
            None => return Ok(()),
        },
    };

    let mut tail = std::process::Command::new("tail");
    if follow {
        tail.arg("-f");
    }
    tail.args(["-n", &lines.to_string()]).arg(path);

    if follow {
        return Err(tail.exec().into());
    }
    tail.status()?;
    Ok(())
}

/// Daily log files in `dir`, oldest first.
fn log_files(dir: &Path) -> Vec<(NaiveDate, PathBuf)> {
    let mut files: Vec<_> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .filter_map(|e| {
                    let day = log_date(&e.file_name().to_string_lossy())?;
                    Some((day, e.path()))
                })
                .collect()
        })
        .unwrap_or_default();

    files.sort();
    files
}

/// Day encoded in a rolled file name such as `stride.2026-03-01.log`.
fn log_date(file_name: &str) -> Option<NaiveDate> {
    let day = file_name
        .strip_prefix(LOG_FILE_PREFIX)?
        .strip_prefix('.')?
        .strip_suffix(".log")?;
    NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
}

fn find_for_date(files: &[(NaiveDate, PathBuf)], day: NaiveDate) -> Option<&PathBuf> {
    files.iter().find(|(d, _)| *d == day).map(|(_, path)| path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_log_date() {
        assert_eq!(log_date("stride.2026-03-01.log"), Some(day("2026-03-01")));
        assert_eq!(log_date("stride.log"), None);
        assert_eq!(log_date("stride.2026-03-01.log.gz"), None);
        assert_eq!(log_date("other.2026-03-01.log"), None);
        assert_eq!(log_date("stride.yesterday.log"), None);
    }

    #[test]
    fn test_find_for_date() {
        let files = vec![
            (day("2026-03-01"), PathBuf::from("stride.2026-03-01.log")),
            (day("2026-03-02"), PathBuf::from("stride.2026-03-02.log")),
        ];
        assert_eq!(
            find_for_date(&files, day("2026-03-02")),
            Some(&PathBuf::from("stride.2026-03-02.log"))
        );
        assert_eq!(find_for_date(&files, day("2026-03-03")), None);
    }
}
