//! Analysis sessions and per-stage gate context.
//!
//! An [`AnalysisSession`] corresponds to one pass of a pipeline over one input.
//! It optionally carries a [`SharedConsumerGate`]; when it does not, nothing is
//! suppressed and every stage produces its term text.
//!
//! When an analyzer builds its chain it asks the session for a
//! [`StageContext`] per stage, passing the id of the stage being wrapped:
//!
//! ```text
//! session.stage(None)       -> tokenizer      (registers itself)
//! session.stage(Some(tok))  -> filter 1       (takes over from tok)
//! session.stage(Some(f1))   -> filter 2       ...
//! ```

use log::debug;

use crate::analysis::consumer::{ConsumerGuard, ConsumerId, SharedConsumerGate};

/// Session-scoped state shared by the stages of one analysis pass.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    consumer_gate: Option<SharedConsumerGate>,
}

impl AnalysisSession {
    /// Create a session without consumer gating.
    pub fn new() -> Self {
        AnalysisSession::default()
    }

    /// Create a session with an empty consumer gate.
    pub fn with_consumer_gate() -> Self {
        AnalysisSession {
            consumer_gate: Some(SharedConsumerGate::new()),
        }
    }

    /// The consumer gate, if this session has one.
    pub fn consumer_gate(&self) -> Option<&SharedConsumerGate> {
        self.consumer_gate.as_ref()
    }

    /// The consumer gate, creating it first if needed.
    pub fn consumer_gate_or_insert(&mut self) -> SharedConsumerGate {
        self.consumer_gate
            .get_or_insert_with(SharedConsumerGate::new)
            .clone()
    }

    /// Check whether this session gates term production.
    pub fn has_consumer_gate(&self) -> bool {
        self.consumer_gate.is_some()
    }

    /// Forget every registered consumer, keeping the gate itself.
    pub fn reset(&mut self) {
        if let Some(gate) = &self.consumer_gate {
            gate.clear();
        }
    }

    /// Allocate the context of a new stage wrapping `upstream`.
    pub fn stage(&self, upstream: Option<ConsumerId>) -> StageContext {
        let context = StageContext {
            consumer: ConsumerId::next(),
            upstream,
            gate: self.consumer_gate.clone(),
        };
        debug!(
            "allocated {} (upstream: {:?}, gated: {})",
            context.consumer,
            upstream.map(ConsumerId::get),
            context.gate.is_some()
        );
        context
    }
}

/// What a stage needs to know about the gate while it is part of a chain.
#[derive(Clone, Debug)]
pub struct StageContext {
    consumer: ConsumerId,
    upstream: Option<ConsumerId>,
    gate: Option<SharedConsumerGate>,
}

impl StageContext {
    /// Context for a stage running outside of any gated session.
    pub fn ungated() -> Self {
        StageContext {
            consumer: ConsumerId::next(),
            upstream: None,
            gate: None,
        }
    }

    /// This stage's identity on the gate.
    pub fn consumer(&self) -> ConsumerId {
        self.consumer
    }

    /// The stage this one wraps, if any.
    pub fn upstream(&self) -> Option<ConsumerId> {
        self.upstream
    }

    /// The session's gate, if the session has one.
    pub fn gate(&self) -> Option<&SharedConsumerGate> {
        self.gate.as_ref()
    }

    /// Check whether this stage should produce term text right now.
    ///
    /// Always true without a gate.
    pub fn should_consume(&self) -> bool {
        self.gate
            .as_ref()
            .is_none_or(|gate| gate.should_consume(self.consumer))
    }

    /// Register this stage as a consumer. Used by leaf producers.
    pub fn register(&self) -> Option<ConsumerGuard> {
        self.gate.as_ref().map(|gate| gate.register(self.consumer))
    }

    /// Take the consumer slot over from the upstream stage. Used by stages that
    /// overwrite the text their upstream produced.
    pub fn take_over(&self) -> Option<ConsumerGuard> {
        let gate = self.gate.as_ref()?;
        Some(match self.upstream {
            Some(previous) => gate.hand_off(self.consumer, previous),
            None => gate.register(self.consumer),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_without_gate_never_suppresses() {
        let session = AnalysisSession::new();
        assert!(!session.has_consumer_gate());

        let stage = session.stage(None);
        assert!(stage.register().is_none());
        assert!(stage.take_over().is_none());
        assert!(stage.should_consume());
    }

    #[test]
    fn test_consumer_gate_or_insert() {
        let mut session = AnalysisSession::new();
        let gate = session.consumer_gate_or_insert();
        assert!(session.has_consumer_gate());
        assert!(gate.ptr_eq(session.consumer_gate().unwrap()));

        let again = session.consumer_gate_or_insert();
        assert!(gate.ptr_eq(&again));
    }

    #[test]
    fn test_stage_take_over_chain() {
        let session = AnalysisSession::with_consumer_gate();
        let tokenizer = session.stage(None);
        let _tokenizer_guard = tokenizer.register();
        assert!(tokenizer.should_consume());

        let filter = session.stage(Some(tokenizer.consumer()));
        assert_eq!(filter.upstream(), Some(tokenizer.consumer()));
        let _filter_guard = filter.take_over();

        assert!(!tokenizer.should_consume());
        assert!(filter.should_consume());
    }

    #[test]
    fn test_take_over_without_upstream_registers() {
        let session = AnalysisSession::with_consumer_gate();
        let stage = session.stage(None);
        let guard = stage.take_over().unwrap();
        assert_eq!(guard.consumer(), stage.consumer());
        assert!(stage.should_consume());
    }

    #[test]
    fn test_reset_clears_consumers() {
        let mut session = AnalysisSession::with_consumer_gate();
        let stage = session.stage(None);
        let guard = stage.register();
        assert!(stage.should_consume());

        session.reset();
        assert!(!stage.should_consume());
        assert!(session.consumer_gate().unwrap().is_empty());
        drop(guard);
    }

    #[test]
    fn test_ungated_context() {
        let stage = StageContext::ungated();
        assert!(stage.gate().is_none());
        assert!(stage.upstream().is_none());
        assert!(stage.should_consume());
    }
}
