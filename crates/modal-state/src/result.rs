/// Outcome of an operation against the buffer. The core is total: every
/// input produces one of these three rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteResult {
    /// The command performed its effect.
    Executed,
    /// A precondition was unmet; no state changed.
    Skipped,
    /// The command declines this key; the host should treat it as unhandled.
    PassThrough,
}

impl ExecuteResult {
    pub fn is_executed(self) -> bool {
        matches!(self, ExecuteResult::Executed)
    }
}
