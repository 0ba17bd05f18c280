//! CSV export of harvested building records
//!
//! Format: a header line with the twelve field names, then one line per
//! building, every field double-quoted, fields separated by `", "`, lines
//! joined by newlines. Embedded quote characters are escaped by doubling, so
//! re-parsing the file recovers the original values.

use crate::building::{Building, FIELD_NAMES};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Field separator between quoted values
const SEPARATOR: &str = ", ";

/// Quotes one field value, doubling embedded quote characters
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// One export line from a slice of field values
fn format_line(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|f| quote(f))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Formats the full export text: header line plus one line per building
pub fn format_csv(buildings: &[Building]) -> String {
    let mut lines = Vec::with_capacity(buildings.len() + 1);
    lines.push(format_line(&FIELD_NAMES));

    for building in buildings {
        lines.push(format_line(&building.fields()));
    }

    lines.join("\n")
}

/// Writes the export file, overwriting any existing content
///
/// # Arguments
///
/// * `buildings` - The harvested records, in the order they should appear
/// * `path` - Destination file path
pub fn export_buildings(buildings: &[Building], path: &Path) -> ExportResult<()> {
    fs::write(path, format_csv(buildings))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_building() -> Building {
        Building {
            name: "Casa Batlló".to_string(),
            architect: "Antoni Gaudí".to_string(),
            city: "Barcelona".to_string(),
            state: "Catalonia".to_string(),
            country: "Spain".to_string(),
            latitude: "41.40338".to_string(),
            longitude: "2.17403".to_string(),
            date: "1904-1906".to_string(),
            style: "Modernisme".to_string(),
            building_type: "Residential".to_string(),
            alias: "Casa dels ossos".to_string(),
            notes: String::new(),
        }
    }

    /// Splits one export line back into its fields. Assumes well-formed
    /// output produced by format_line.
    fn parse_line(line: &str) -> Vec<String> {
        let inner = line
            .strip_prefix('"')
            .and_then(|l| l.strip_suffix('"'))
            .expect("line not quoted");
        inner
            .split("\", \"")
            .map(|f| f.replace("\"\"", "\""))
            .collect()
    }

    #[test]
    fn test_header_line() {
        let text = format_csv(&[]);
        assert_eq!(
            text,
            r#""name", "architect", "city", "state", "country", "latitude", "longitude", "date", "style", "type", "alias", "notes""#
        );
    }

    #[test]
    fn test_one_building_one_line() {
        let text = format_csv(&[sample_building()]);
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with(r#""Casa Batlló", "Antoni Gaudí", "#));
        assert!(lines[1].ends_with(r#""Casa dels ossos", """#));
    }

    #[test]
    fn test_round_trip_plain_values() {
        let buildings = vec![
            sample_building(),
            Building {
                name: "Casa Milà".to_string(),
                architect: "Antoni Gaudí".to_string(),
                ..Default::default()
            },
        ];
        let text = format_csv(&buildings);
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 3);

        for (line, building) in lines[1..].iter().zip(&buildings) {
            let parsed = parse_line(line);
            let expected: Vec<String> =
                building.fields().iter().map(|f| f.to_string()).collect();
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn test_round_trip_embedded_quotes_and_commas() {
        let building = Building {
            name: r#"The "Gherkin", London"#.to_string(),
            architect: "Foster".to_string(),
            ..Default::default()
        };
        let text = format_csv(&[building.clone()]);
        let line = text.split('\n').nth(1).unwrap();

        let parsed = parse_line(line);
        assert_eq!(parsed[0], r#"The "Gherkin", London"#);
        assert_eq!(parsed[1], "Foster");
    }

    #[test]
    fn test_export_overwrites_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");

        std::fs::write(&path, "stale content").unwrap();
        export_buildings(&[sample_building()], &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with(r#""name", "architect""#));
        assert!(written.contains("Casa Batlló"));
        assert!(!written.contains("stale content"));
    }

    #[test]
    fn test_export_to_invalid_path_is_an_error() {
        let result = export_buildings(&[], Path::new("/nonexistent-dir/export.csv"));
        assert!(matches!(result, Err(ExportError::Io(_))));
    }
}
