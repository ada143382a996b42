/// The single internal yank/delete register. There are no named or
/// numbered registers and no system-clipboard integration; callers
/// needing that wire it up at the host boundary, outside this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Register {
    pub text: String,
    pub linewise: bool,
}

impl Register {
    pub fn new(text: impl Into<String>, linewise: bool) -> Self {
        Self {
            text: text.into(),
            linewise,
        }
    }

    /// An empty register suppresses paste (`ExecuteResult::Skipped`).
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
