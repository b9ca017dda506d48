use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::prelude::*;
use clap::ValueEnum;

use crate::RankedAuthor;

/// Output format for the optional ranking export.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Txt,
    Csv,
    Json,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

///Save the ranking to a timestamped file inside `path`. Returns the file path.
pub fn save_ranking(
    ranking: &[RankedAuthor],
    format: ExportFormat,
    mut path: PathBuf,
) -> io::Result<PathBuf> {
    let local: DateTime<Local> = Local::now();
    let new_filename: String = local
        .format(&format!(
            "%Y_%m_%d_%H_%M_%S_top_repliers.{}",
            format.extension()
        ))
        .to_string();
    path.push(new_filename);

    let content = render_ranking(ranking, format)?;

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)?;

    file.write_all(content.as_bytes())?;

    Ok(path)
}

fn render_ranking(ranking: &[RankedAuthor], format: ExportFormat) -> io::Result<String> {
    match format {
        ExportFormat::Txt => Ok(ranking
            .iter()
            .map(|entry| format!("{}: {}\n", entry.author, entry.count))
            .collect()),
        ExportFormat::Json => {
            let json = serde_json::to_string_pretty(ranking).map_err(io::Error::other)?;
            Ok(json + "\n")
        }
        ExportFormat::Csv => {
            let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
            for entry in ranking {
                writer.serialize(entry).map_err(io::Error::other)?;
            }
            let bytes = writer.into_inner().map_err(io::Error::other)?;
            String::from_utf8(bytes).map_err(io::Error::other)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_ranking() -> Vec<RankedAuthor> {
        vec![
            RankedAuthor {
                author: "B".to_string(),
                count: 3,
            },
            RankedAuthor {
                author: "C".to_string(),
                count: 1,
            },
        ]
    }

    #[test]
    fn txt_export_lists_author_and_count() {
        let dir = tempdir().unwrap();
        let path = save_ranking(
            &sample_ranking(),
            ExportFormat::Txt,
            dir.path().to_path_buf(),
        )
        .unwrap();
        assert!(path.to_string_lossy().ends_with("_top_repliers.txt"));
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, "B: 3\nC: 1\n");
    }

    #[test]
    fn csv_export_has_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = save_ranking(
            &sample_ranking(),
            ExportFormat::Csv,
            dir.path().to_path_buf(),
        )
        .unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("author,count"));
        assert_eq!(lines.next(), Some("B,3"));
        assert_eq!(lines.next(), Some("C,1"));
    }

    #[test]
    fn json_export_round_trips() {
        let dir = tempdir().unwrap();
        let path = save_ranking(
            &sample_ranking(),
            ExportFormat::Json,
            dir.path().to_path_buf(),
        )
        .unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed[0]["author"], "B");
        assert_eq!(parsed[0]["count"], 3);
        assert_eq!(parsed[1]["author"], "C");
    }
}
