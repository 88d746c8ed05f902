//! Text normalization for comparing multi-line literals.

/// Removes the indentation of an indented multi-line literal.
///
/// The indent is the number of leading tabs on the first non-empty line.
/// That many leading tabs are stripped from every line (lines with fewer
/// keep what is left) and surrounding whitespace is trimmed from the result.
/// Deeper indentation is preserved relative to the first line.
///
/// # Examples
///
/// ```
/// use assay::normalize_indent;
///
/// let text = "\n\t\tfn main() {\n\t\t\tok();\n\t\t}\n\t";
/// assert_eq!(normalize_indent(text), "fn main() {\n\tok();\n}");
/// ```
pub fn normalize_indent(input: &str) -> String {
    let indent = input
        .trim_start_matches('\n')
        .chars()
        .take_while(|&c| c == '\t')
        .count();

    let lines: Vec<&str> = input
        .split('\n')
        .map(|line| strip_tabs(line, indent))
        .collect();

    lines.join("\n").trim().to_string()
}

/// Strips at most `count` leading tabs.
fn strip_tabs(line: &str, count: usize) -> &str {
    let tabs = line.chars().take(count).take_while(|&c| c == '\t').count();
    &line[tabs..]
}
