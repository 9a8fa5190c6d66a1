use std::collections::HashSet;

use crate::error::SourceError;
use crate::models::Row;

fn is_header_padding(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Decodes a header-plus-rows CSV sheet into rows tagged with `source_file`.
///
/// Header cells are trimmed (BOM included) and repeated header text is
/// renamed `Name_1`, `Name_2`, ... so every cell keeps a distinct key. Ragged
/// rows are tolerated and records whose cells are all blank are skipped.
pub fn parse_csv(content: &str, source_file: &str) -> Result<Vec<Row>, SourceError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let csv_error = |source| SourceError::Csv {
        file: source_file.to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|h| h.trim_matches(is_header_padding).to_string())
        .collect::<Vec<String>>();
    let headers = disambiguate_headers(headers);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }

        let cells = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), value.to_string()))
            .collect();
        rows.push(Row::new(source_file, cells));
    }

    Ok(rows)
}

/// Renames repeated headers with a numeric suffix, skipping suffixes that
/// would collide with a header already in use.
pub fn disambiguate_headers(headers: Vec<String>) -> Vec<String> {
    let mut used: HashSet<String> = headers.iter().cloned().collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut result = Vec::with_capacity(headers.len());

    for header in headers {
        if seen.insert(header.clone()) {
            result.push(header);
            continue;
        }

        let mut suffix = 1;
        let renamed = loop {
            let candidate = format!("{header}_{suffix}");
            if !used.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        used.insert(renamed.clone());
        seen.insert(renamed.clone());
        result.push(renamed);
    }

    result
}
