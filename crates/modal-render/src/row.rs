use crate::style::Style;

/// One run of clusters sharing a style, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub style: Style,
}

/// One output display row — a whole logical line when `width == 0`, or one
/// wrap segment of a logical line otherwise. A single logical line can
/// therefore produce more than one `StyledRow`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledRow {
    pub spans: Vec<StyledSpan>,
}

impl StyledRow {
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}
