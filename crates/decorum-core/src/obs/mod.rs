//! Module: obs
//! Responsibility: execution observability for decorated criteria chains.
//! Does not own: builder state, query execution, or subscriber setup.
//! Boundary: decorators report through `ExecutionSink`; sinks decide where
//! events end up.

mod observed;
mod sink;


// re-exports
pub use observed::{ObservedCriteria, UNRESOLVED_ENTITY};
pub use sink::{ExecutionEvent, ExecutionSink, TracingSink};
