use std::iter::Peekable;
use std::mem::take;
use std::str::Chars;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum FieldState {
    Unquoted,
    Quoted,
}

impl FieldState {
    fn toggled(self) -> Self {
        match self {
            Self::Unquoted => Self::Quoted,
            Self::Quoted => Self::Unquoted,
        }
    }
}

/// Splits comma-delimited text into rows of cells.
///
/// `""` is a literal quote in either state and a lone `"` toggles quoting.
/// Blank rows are dropped when a line break ends them, but the final
/// unterminated row is always kept if anything was accumulated. Never fails:
/// an unterminated quote swallows the rest of the input into one cell.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::<String>::new();
    let mut cell = String::new();
    let mut state = FieldState::Unquoted;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match (state, ch) {
            (_, '"') if next_is(&mut chars, '"') => {
                chars.next();
                cell.push('"');
            }
            (_, '"') => state = state.toggled(),
            (FieldState::Unquoted, ',') => row.push(take(&mut cell)),
            (FieldState::Unquoted, '\n' | '\r') => {
                if ch == '\r' && next_is(&mut chars, '\n') {
                    chars.next();
                }
                row.push(take(&mut cell));
                if row.iter().any(|value| !value.trim().is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            (_, other) => cell.push(other),
        }
    }

    // Trailing row is kept even when blank.
    if !cell.is_empty() || !row.is_empty() {
        row.push(cell);
        rows.push(row);
    }

    rows
}

fn next_is(chars: &mut Peekable<Chars<'_>>, expected: char) -> bool {
    chars.peek() == Some(&expected)
}
