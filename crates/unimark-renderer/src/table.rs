//! Pipe table recognition.

/// Column alignment parsed from the alignment row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    /// No colon in the alignment cell.
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl Alignment {
    /// CSS `text-align` value, if the column is explicitly aligned.
    #[must_use]
    pub fn as_css(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Left => Some("left"),
            Self::Center => Some("center"),
            Self::Right => Some("right"),
        }
    }
}

/// A recognized table: header cells, per-column alignment and data rows.
///
/// Rows are ragged-tolerant: no row is required to match the header width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Table<'a> {
    pub header: Vec<&'a str>,
    pub alignments: Vec<Alignment>,
    pub rows: Vec<Vec<&'a str>>,
}

impl Table<'_> {
    /// Alignment for a column, `None` past the alignment row's width.
    pub fn alignment(&self, column: usize) -> Alignment {
        self.alignments.get(column).copied().unwrap_or_default()
    }
}

/// Whether a line can be a table row.
pub(crate) fn is_row(line: &str) -> bool {
    line.contains('|')
}

/// Split a row into trimmed cells, dropping the empty cells produced by
/// outer pipes.
pub(crate) fn split_row(line: &str) -> Vec<&str> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);
    trimmed.split('|').map(str::trim).collect()
}

/// Parse an alignment row (`|---|:-:|`), returning `None` if the line is not
/// one.
pub(crate) fn parse_alignment_row(line: &str) -> Option<Vec<Alignment>> {
    if !is_row(line) {
        return None;
    }
    split_row(line).into_iter().map(parse_alignment_cell).collect()
}

fn parse_alignment_cell(cell: &str) -> Option<Alignment> {
    let valid = !cell.is_empty()
        && cell.contains('-')
        && cell.chars().all(|c| matches!(c, '-' | ':' | ' '));
    if !valid {
        return None;
    }

    let alignment = match (cell.starts_with(':'), cell.ends_with(':')) {
        (true, true) => Alignment::Center,
        (true, false) => Alignment::Left,
        (false, true) => Alignment::Right,
        (false, false) => Alignment::None,
    };
    Some(alignment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_row_outer_pipes() {
        assert_eq!(split_row("| A | B |"), vec!["A", "B"]);
        assert_eq!(split_row("|A|B|"), vec!["A", "B"]);
    }

    #[test]
    fn test_split_row_without_outer_pipes() {
        assert_eq!(split_row("A | B"), vec!["A", "B"]);
    }

    #[test]
    fn test_split_row_keeps_inner_empty_cells() {
        assert_eq!(split_row("| A | | C |"), vec!["A", "", "C"]);
    }

    #[test]
    fn test_alignment_row() {
        assert_eq!(
            parse_alignment_row("|---|:--|:-:|--:|"),
            Some(vec![
                Alignment::None,
                Alignment::Left,
                Alignment::Center,
                Alignment::Right,
            ])
        );
    }

    #[test]
    fn test_alignment_row_with_spaces() {
        assert_eq!(
            parse_alignment_row("| - | - |"),
            Some(vec![Alignment::None, Alignment::None])
        );
    }

    #[test]
    fn test_not_alignment_row() {
        assert_eq!(parse_alignment_row("| 1 | 2 |"), None);
        assert_eq!(parse_alignment_row("|:|:|"), None);
        assert_eq!(parse_alignment_row("---"), None);
        assert_eq!(parse_alignment_row("| --- | |"), None);
    }

    #[test]
    fn test_alignment_past_width_is_none() {
        let table = Table {
            header: vec!["A"],
            alignments: vec![Alignment::Right],
            rows: Vec::new(),
        };
        assert_eq!(table.alignment(0), Alignment::Right);
        assert_eq!(table.alignment(3), Alignment::None);
    }

    #[test]
    fn test_alignment_css() {
        assert_eq!(Alignment::None.as_css(), None);
        assert_eq!(Alignment::Right.as_css(), Some("right"));
    }
}
