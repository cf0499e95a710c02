use crate::kernel::editor::CheckRequest;

/// Runs syntax checks off the UI thread and reports each one back as a
/// [`CheckResult`](crate::kernel::editor::CheckResult).
pub trait CheckExecutor: Send + Sync {
    fn submit(&self, request: CheckRequest);
}
