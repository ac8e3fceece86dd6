//! Execution sink boundary.
//!
//! Observing decorators MUST NOT log directly.
//! All instrumentation flows through `ExecutionEvent` and `ExecutionSink`.
use crate::decorator::ExecutionKind;
use std::time::Duration;

///
/// ExecutionEvent
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExecutionEvent {
    Start {
        kind: ExecutionKind,
        entity: String,
    },
    Finish {
        kind: ExecutionKind,
        entity: String,
        elapsed: Duration,
    },
}

impl ExecutionEvent {
    #[must_use]
    pub const fn kind(&self) -> ExecutionKind {
        match self {
            Self::Start { kind, .. } | Self::Finish { kind, .. } => *kind,
        }
    }

    #[must_use]
    pub fn entity(&self) -> &str {
        match self {
            Self::Start { entity, .. } | Self::Finish { entity, .. } => entity,
        }
    }
}

///
/// ExecutionSink
///

pub trait ExecutionSink {
    fn record(&self, event: ExecutionEvent);
}

///
/// TracingSink
/// Default sink; forwards every event to `tracing` at debug level.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl ExecutionSink for TracingSink {
    fn record(&self, event: ExecutionEvent) {
        match event {
            ExecutionEvent::Start { kind, entity } => {
                tracing::debug!(%kind, %entity, "criteria execution started");
            }
            ExecutionEvent::Finish {
                kind,
                entity,
                elapsed,
            } => {
                let elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
                tracing::debug!(%kind, %entity, elapsed_us, "criteria execution finished");
            }
        }
    }
}
