// Path-data mini-language engine for the `d` attribute of <path> elements.
//
// Three layers, leaves first: a tokenizer that splits the raw string into
// raw command groups, a numeric sanitizer that turns each group into a
// validated command (or drops it), and a canonical serializer. Geometry is
// out of scope: command case is preserved but never interpreted, and no
// per-command arity is enforced.

/// One validated path command: a command letter plus its finite parameters.
///
/// `kind` is case-sensitive (`M` vs `m` selects absolute vs relative
/// coordinates). `params` is always empty for `Z`/`z` and non-empty for
/// every other kind.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCommand {
    pub kind: char,
    pub params: Vec<f64>,
}

impl PathCommand {
    pub fn is_close(&self) -> bool {
        matches!(self.kind, 'Z' | 'z')
    }
}

/// Drop counts produced while sanitizing one path-data string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathDataReport {
    pub dropped_tokens: usize,
    pub dropped_commands: usize,
}

impl PathDataReport {
    pub fn is_clean(&self) -> bool {
        self.dropped_tokens == 0 && self.dropped_commands == 0
    }

    pub(crate) fn absorb(&mut self, other: PathDataReport) {
        self.dropped_tokens += other.dropped_tokens;
        self.dropped_commands += other.dropped_commands;
    }
}

fn is_command_letter(c: char) -> bool {
    matches!(
        c,
        'M' | 'm'
            | 'L'
            | 'l'
            | 'H'
            | 'h'
            | 'V'
            | 'v'
            | 'C'
            | 'c'
            | 'S'
            | 's'
            | 'Q'
            | 'q'
            | 'T'
            | 't'
            | 'A'
            | 'a'
            | 'Z'
            | 'z'
    )
}

/// Splits raw path data into `(letter, trimmed parameter text)` groups.
///
/// The split is a lookahead split: each of the 20 command letters starts a
/// new group and is not duplicated into the previous one. Text before the
/// first letter cannot form a group and is discarded. Malformed input never
/// errors; it degrades to an empty sequence.
pub fn tokenize(path_data: &str) -> Vec<(char, &str)> {
    let mut groups = Vec::new();
    let mut start: Option<usize> = None;
    for (index, c) in path_data.char_indices() {
        if is_command_letter(c) {
            if let Some(s) = start {
                groups.push(&path_data[s..index]);
            }
            start = Some(index);
        }
    }
    if let Some(s) = start {
        groups.push(&path_data[s..]);
    }

    groups
        .into_iter()
        .map(|group| {
            let kind = group.as_bytes()[0] as char;
            // Command letters are ASCII, so the parameter text starts at byte 1.
            (kind, group[1..].trim())
        })
        .collect()
}

fn parse_group(kind: char, param_text: &str, report: &mut PathDataReport) -> Option<PathCommand> {
    if matches!(kind, 'Z' | 'z') {
        // Close commands carry no parameters; trailing garbage before the
        // next letter is ignored.
        return Some(PathCommand {
            kind,
            params: Vec::new(),
        });
    }

    let mut params = Vec::new();
    for token in param_text.split(|c: char| c.is_whitespace() || c == ',') {
        if token.is_empty() {
            continue;
        }
        // Finite-number validity is the whole filter: `nan`, `inf` and
        // friends parse but are not finite, anything else fails to parse.
        match token.parse::<f64>() {
            Ok(value) if value.is_finite() => params.push(value),
            _ => report.dropped_tokens += 1,
        }
    }

    if params.is_empty() {
        report.dropped_commands += 1;
        return None;
    }
    Some(PathCommand { kind, params })
}

/// Tokenizes and sanitizes a raw path-data string.
///
/// Invalid parameter tokens are removed wherever they occur; a non-close
/// command left with zero parameters is dropped entirely.
pub fn parse_path_data(path_data: &str) -> Vec<PathCommand> {
    parse_path_data_with_report(path_data).0
}

/// Like [`parse_path_data`], also returning how much input was discarded.
pub fn parse_path_data_with_report(path_data: &str) -> (Vec<PathCommand>, PathDataReport) {
    let mut report = PathDataReport::default();
    let commands = tokenize(path_data)
        .into_iter()
        .filter_map(|(kind, param_text)| parse_group(kind, param_text, &mut report))
        .collect();
    (commands, report)
}

/// Canonical serialization: each command is its letter followed by its
/// parameters joined with single spaces; the next command's letter is the
/// only separator between commands. Floats format the shortest way that
/// round-trips (`10.0` prints as `10`).
pub fn serialize_path_data(commands: &[PathCommand]) -> String {
    let mut out = String::new();
    let mut buffer = ryu_js::Buffer::new();
    for command in commands {
        out.push(command.kind);
        for (index, value) in command.params.iter().enumerate() {
            if index > 0 {
                out.push(' ');
            }
            out.push_str(buffer.format(*value));
        }
    }
    out
}
