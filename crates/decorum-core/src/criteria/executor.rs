use crate::{
    criteria::{ScrollableResults, state::QueryState},
    error::CriteriaError,
    expr::Value,
    mode::ScrollMode,
};

///
/// CriteriaExecutor
///
/// Session-like collaborator that actually runs a criteria query.
/// Implementations own query translation and row materialization; the
/// builders only hand over the accumulated `QueryState`.
///

pub trait CriteriaExecutor {
    fn list(&self, query: &QueryState) -> Result<Vec<Value>, CriteriaError>;

    fn scroll(
        &self,
        query: &QueryState,
        mode: ScrollMode,
    ) -> Result<ScrollableResults, CriteriaError> {
        let rows = self.list(query)?;

        Ok(ScrollableResults::new(rows, mode))
    }

    /// Read-only default for builders that never set the flag explicitly.
    fn default_read_only(&self) -> bool {
        false
    }
}
