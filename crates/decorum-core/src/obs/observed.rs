use crate::{
    criteria::CriteriaRef,
    decorator::{CriteriaDecorator, ExecutionKind},
    obs::{ExecutionEvent, ExecutionSink, TracingSink},
};
use std::{fmt, rc::Rc, time::Instant};

/// Entity label reported when the chain root cannot be resolved.
pub const UNRESOLVED_ENTITY: &str = "<unresolved>";

///
/// ObservedCriteria
///
/// Decorator that reports one `Start` and one `Finish` event per execution,
/// tagged with the root entity name, and counts executions.
///

pub struct ObservedCriteria {
    criteria: CriteriaRef,
    sink: Rc<dyn ExecutionSink>,
    started: Option<(String, Instant)>,
    executions: u64,
}

impl ObservedCriteria {
    #[must_use]
    pub fn new(criteria: CriteriaRef, sink: Rc<dyn ExecutionSink>) -> Self {
        Self {
            criteria,
            sink,
            started: None,
            executions: 0,
        }
    }

    /// Observe `criteria` through the `tracing` sink.
    #[must_use]
    pub fn traced(criteria: CriteriaRef) -> Self {
        Self::new(criteria, Rc::new(TracingSink))
    }

    /// Number of executions started through this decorator.
    #[must_use]
    pub const fn executions(&self) -> u64 {
        self.executions
    }

    fn entity_label(&self) -> String {
        match self.root_entity_name() {
            Ok(entity) => entity,
            Err(err) => {
                tracing::warn!(error = %err, "criteria root could not be resolved");
                UNRESOLVED_ENTITY.to_string()
            }
        }
    }
}

impl fmt::Debug for ObservedCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservedCriteria")
            .field("criteria", &self.criteria)
            .field("executions", &self.executions)
            .finish_non_exhaustive()
    }
}

impl CriteriaDecorator for ObservedCriteria {
    fn criteria(&self) -> &CriteriaRef {
        &self.criteria
    }

    fn decorate(&mut self, criteria: CriteriaRef) -> &mut Self {
        self.criteria = criteria;
        self
    }

    fn before_executed(&mut self, kind: ExecutionKind) {
        let entity = self.entity_label();
        self.executions = self.executions.saturating_add(1);
        self.started = Some((entity.clone(), Instant::now()));

        self.sink.record(ExecutionEvent::Start { kind, entity });
    }

    fn after_executed(&mut self, kind: ExecutionKind) {
        let Some((entity, started)) = self.started.take() else {
            return;
        };

        self.sink.record(ExecutionEvent::Finish {
            kind,
            entity,
            elapsed: started.elapsed(),
        });
    }
}
