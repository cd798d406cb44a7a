//! Rendering and diff interfaces.
//!
//! Markdown rendering and text diffing are consumed as black boxes by the
//! workspace views; only their contracts live here.

/// Renders markdown source into the host UI's display format.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> String;
}

/// A diff operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffOp {
    Equal,
    Insert,
    Delete,
}

/// One span of a computed diff: an operation and the text it applies to.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffSpan {
    pub op: DiffOp,
    pub text: String,
}

/// Computes an ordered sequence of diff spans between two strings.
///
/// Used by the optimizer view to show what changed between the original and
/// an optimized prompt variation.
pub trait TextDiff: Send + Sync {
    fn diff(&self, old: &str, new: &str) -> Vec<DiffSpan>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Trivial implementation to exercise the contract shape.
    struct ReplaceAll;

    impl TextDiff for ReplaceAll {
        fn diff(&self, old: &str, new: &str) -> Vec<DiffSpan> {
            vec![
                DiffSpan {
                    op: DiffOp::Delete,
                    text: old.to_string(),
                },
                DiffSpan {
                    op: DiffOp::Insert,
                    text: new.to_string(),
                },
            ]
        }
    }

    #[test]
    fn test_diff_spans_are_ordered() {
        let spans = ReplaceAll.diff("old prompt", "new prompt");
        assert_eq!(spans[0].op, DiffOp::Delete);
        assert_eq!(spans[1].op, DiffOp::Insert);
        assert_eq!(spans[1].text, "new prompt");
    }
}
