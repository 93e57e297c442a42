// File: src/directive.rs
// Purpose: Parsing of per-field `validate` directives

/// Reserved directive name that validates a field's value as a nested record.
pub const STRUCT_DIRECTIVE: &str = "struct";

/// One entry of a field directive: a validator name plus its bracketed parameters.
///
/// `between[4,7]` parses to `name = "between"`, `params = ["4", "7"]`.
/// Params keep their surrounding whitespace, so joining them with `,`
/// restores the bracket text exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: String,
    pub params: Vec<String>,
}

impl Directive {
    /// Whether this entry is the reserved `struct` directive
    pub fn is_struct(&self) -> bool {
        self.name == STRUCT_DIRECTIVE
    }

    fn parse(entry: &str) -> Self {
        let entry = entry.trim();

        let bracketed = entry
            .strip_suffix(']')
            .and_then(|rest| rest.split_once('['));

        match bracketed {
            Some((name, inner)) => Self {
                name: name.trim().to_string(),
                params: split_params(inner),
            },
            None => Self {
                name: entry.to_string(),
                params: Vec::new(),
            },
        }
    }
}

/// Parse a directive string into its ordered entries.
///
/// Commas inside brackets belong to the parameter list, so
/// `long,between[4,7],struct` yields three entries. Empty entries are kept
/// and later reported as undefined validators. An unterminated `[` absorbs
/// the rest of the string into a single entry.
pub fn parse_directive(directive: &str) -> Vec<Directive> {
    split_top_level(directive)
        .into_iter()
        .map(Directive::parse)
        .collect()
}

fn split_top_level(directive: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, ch) in directive.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                entries.push(&directive[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    entries.push(&directive[start..]);

    entries
}

fn split_params(inner: &str) -> Vec<String> {
    if inner.is_empty() {
        return Vec::new();
    }
    inner.split(',').map(str::to_string).collect()
}
