//! Field-by-field comparison of two configurations
//!
//! [`compare`] yields one [`FieldDiff`] per managed field, in a fixed order.
//! [`ConfigDiff::lines`] turns that into a line-oriented view; drawing those
//! lines is left to a [`crate::render::DiffRenderer`].

use crate::config::Configuration;

/// Value held by a single configuration field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Optional scalar; `None` is "unset"
    Text(Option<String>),
    /// Ordered list of strings
    List(Vec<String>),
}

/// Comparison result for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDiff {
    pub field: &'static str,
    pub current: FieldValue,
    pub desired: FieldValue,
    pub changed: bool,
}

impl FieldDiff {
    fn new(field: &'static str, current: FieldValue, desired: FieldValue) -> Self {
        let changed = current != desired;
        Self {
            field,
            current,
            desired,
            changed,
        }
    }
}

/// How a rendered line relates current to desired state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Unchanged,
    Added,
    Removed,
}

/// One line of the diff view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub kind: LineKind,
    pub text: String,
}

impl DiffLine {
    fn new(kind: LineKind, text: String) -> Self {
        Self { kind, text }
    }

    /// Marker character followed by the text, as in a unified diff
    pub fn marked(&self) -> String {
        let marker = match self.kind {
            LineKind::Unchanged => ' ',
            LineKind::Added => '+',
            LineKind::Removed => '-',
        };
        format!("{}{}", marker, self.text)
    }
}

/// Ordered comparison of every managed field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDiff {
    pub fields: Vec<FieldDiff>,
}

/// Compare the remote state against the desired configuration
pub fn compare(current: &Configuration, desired: &Configuration) -> ConfigDiff {
    ConfigDiff {
        fields: vec![
            FieldDiff::new(
                "description",
                FieldValue::Text(current.description.clone()),
                FieldValue::Text(desired.description.clone()),
            ),
            FieldDiff::new(
                "homepage",
                FieldValue::Text(current.homepage.clone()),
                FieldValue::Text(desired.homepage.clone()),
            ),
            FieldDiff::new(
                "topics",
                FieldValue::List(current.topics.clone()),
                FieldValue::List(desired.topics.clone()),
            ),
        ],
    }
}

impl ConfigDiff {
    pub fn has_changes(&self) -> bool {
        self.fields.iter().any(|f| f.changed)
    }

    /// Names of the fields that differ
    pub fn changed_fields(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.changed)
            .map(|f| f.field)
            .collect()
    }

    /// Line-oriented view of the whole configuration
    pub fn lines(&self) -> Vec<DiffLine> {
        let mut lines = vec![DiffLine::new(LineKind::Unchanged, "{".to_string())];

        for field in &self.fields {
            match (&field.current, &field.desired) {
                (FieldValue::List(current), FieldValue::List(desired)) => {
                    list_lines(field.field, current, desired, &mut lines)
                }
                (current, desired) => {
                    let before = format!("  {}: {},", field.field, format_value(current));
                    if field.changed {
                        let after = format!("  {}: {},", field.field, format_value(desired));
                        lines.push(DiffLine::new(LineKind::Removed, before));
                        lines.push(DiffLine::new(LineKind::Added, after));
                    } else {
                        lines.push(DiffLine::new(LineKind::Unchanged, before));
                    }
                }
            }
        }

        lines.push(DiffLine::new(LineKind::Unchanged, "}".to_string()));
        lines
    }
}

fn format_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(Some(text)) => format!("{:?}", text),
        FieldValue::Text(None) => "null".to_string(),
        FieldValue::List(items) => format!("{:?}", items),
    }
}

fn list_lines(field: &str, current: &[String], desired: &[String], out: &mut Vec<DiffLine>) {
    out.push(DiffLine::new(LineKind::Unchanged, format!("  {}: [", field)));
    for (kind, item) in align(current, desired) {
        out.push(DiffLine::new(kind, format!("    {:?},", item)));
    }
    out.push(DiffLine::new(LineKind::Unchanged, "  ],".to_string()));
}

/// Align two lists on their longest common subsequence
fn align<'a>(current: &'a [String], desired: &'a [String]) -> Vec<(LineKind, &'a str)> {
    let (n, m) = (current.len(), desired.len());

    // lcs[i][j] = LCS length of current[i..] and desired[j..]
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if current[i] == desired[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut result = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if current[i] == desired[j] {
            result.push((LineKind::Unchanged, current[i].as_str()));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            result.push((LineKind::Removed, current[i].as_str()));
            i += 1;
        } else {
            result.push((LineKind::Added, desired[j].as_str()));
            j += 1;
        }
    }
    result.extend(current[i..].iter().map(|s| (LineKind::Removed, s.as_str())));
    result.extend(desired[j..].iter().map(|s| (LineKind::Added, s.as_str())));
    result
}
