use crate::ast::Span;

/// Returns the source line at `span` followed by a caret line pointing at its
/// column.
///
/// Tabs before the column are kept so the caret lines up in a terminal.
///
/// # Example
/// ```
/// use arn::{ast::Span, util::diagnostic::excerpt};
///
/// let shown = excerpt("a\n1 + x", Span::new(2, 5));
/// assert_eq!(shown, "1 + x\n    ^");
/// ```
#[must_use]
pub fn excerpt(source: &str, span: Span) -> String {
    let line = source.lines().nth(span.line.saturating_sub(1)).unwrap_or_default();
    let pad: String = line.chars()
                          .take(span.column.saturating_sub(1))
                          .map(|c| if c == '\t' { '\t' } else { ' ' })
                          .collect();
    format!("{line}\n{pad}^")
}
