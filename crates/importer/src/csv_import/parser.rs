use thiserror::Error;

pub const EXPECTED_COLUMNS: [&str; 6] = ["name", "slug", "price", "category", "description", "stock"];
pub const EXPECTED_HEADER: &str = "name,slug,price,category,description,stock";

/// Why a file was refused before any row was looked at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("CSV file is empty")]
    Empty,

    #[error("Invalid CSV header. Expected \"name,slug,price,category,description,stock\", found \"{found}\"")]
    Mismatch { found: String },
}

/// One data line split on commas. Fields are trimmed; quoting is not supported,
/// so a comma inside a value always starts a new field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub line: usize,
    pub fields: Vec<String>,
}

impl RawRow {
    /// Field at `idx`, or an empty string when the line is short.
    pub fn field(&self, idx: usize) -> &str {
        self.fields.get(idx).map(String::as_str).unwrap_or("")
    }
}

fn split_fields(line: &str) -> Vec<String> {
    line.split(',').map(|field| field.trim().to_string()).collect()
}

/// Splits the content into data rows after checking the header.
///
/// Blank lines are dropped before numbering, so row `i` (0-based) of the
/// remaining data lines is reported as line `i + 2`.
pub fn parse_rows(content: &str) -> Result<Vec<RawRow>, HeaderError> {
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);

    let mut lines = content.lines().filter(|line| !line.trim().is_empty());

    let header = lines.next().ok_or(HeaderError::Empty)?;
    let header = split_fields(header).join(",");
    if header != EXPECTED_HEADER {
        return Err(HeaderError::Mismatch { found: header });
    }

    let rows = lines
        .enumerate()
        .map(|(idx, line)| RawRow {
            line: idx + 2,
            fields: split_fields(line),
        })
        .collect();

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_constant_matches_columns() {
        assert_eq!(EXPECTED_COLUMNS.join(","), EXPECTED_HEADER);
    }

    #[test]
    fn test_parses_rows_with_crlf_and_blank_lines() {
        let content = "name,slug,price,category,description,stock\r\n\
                       Areca Palm,areca-palm,699,indoor,A lovely palm,32\r\n\
                       \r\n\
                       Snake Plant , snake-plant ,349,indoor,Hardy,10\n";
        let rows = parse_rows(content).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[0].field(0), "Areca Palm");
        assert_eq!(rows[1].line, 3);
        assert_eq!(rows[1].field(0), "Snake Plant");
        assert_eq!(rows[1].field(1), "snake-plant");
    }

    #[test]
    fn test_header_cells_are_trimmed() {
        let rows = parse_rows(" name , slug,price,category,description,stock \nA,a,1,c,d,1").unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let rows = parse_rows("\u{FEFF}name,slug,price,category,description,stock\nA,a,1,c,d,1").unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_header_mismatch() {
        let err = parse_rows("name,slug,price,category,description\nA,a,1,c,d").unwrap_err();
        assert_eq!(
            err,
            HeaderError::Mismatch {
                found: "name,slug,price,category,description".to_string()
            }
        );

        // Order matters
        assert!(parse_rows("slug,name,price,category,description,stock").is_err());
        // Header names are case sensitive
        assert!(parse_rows("Name,slug,price,category,description,stock").is_err());
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(parse_rows(""), Err(HeaderError::Empty));
        assert_eq!(parse_rows("\n  \r\n"), Err(HeaderError::Empty));
    }

    #[test]
    fn test_header_only_yields_no_rows() {
        assert!(parse_rows(EXPECTED_HEADER).unwrap().is_empty());
    }

    #[test]
    fn test_short_line_pads_with_empty_fields() {
        let rows = parse_rows("name,slug,price,category,description,stock\nA,a").unwrap();
        assert_eq!(rows[0].field(1), "a");
        assert_eq!(rows[0].field(5), "");
    }

    #[test]
    fn test_quoted_commas_are_not_special() {
        let rows =
            parse_rows("name,slug,price,category,description,stock\n\"Palm, Areca\",a,1,c,d,1").unwrap();
        assert_eq!(rows[0].field(0), "\"Palm");
        assert_eq!(rows[0].fields.len(), 7);
    }
}
