//! Consumer gate for term-text production.
//!
//! A pipeline stage that would write term text into a token asks the gate
//! whether it is one of the current consumers before doing that work. Stages
//! that replace the output of their upstream stage hand the consumer slot over
//! to themselves, so the upstream stage stops materializing text which would be
//! overwritten anyway.
//!
//! The gate is an ordered stack of [`ConsumerId`]s. Membership is tested over
//! the whole stack, but removal only ever happens at the top and only when the
//! caller names the element that is actually there:
//!
//! ```text
//! add(A)            [A]
//! add(B)            [A, B]
//! drop_last(A)      [A, B]    top is B, no-op
//! drop_last(B)      [A]
//! update(C, A)      [C]       A was last: replaced
//! update(D, X)      [C, D]    X was not last: C stays registered
//! ```
//!
//! # Examples
//!
//! ```
//! use termgate::analysis::consumer::{ConsumerAttribute, ConsumerGate, ConsumerId};
//!
//! let tokenizer = ConsumerId::next();
//! let filter = ConsumerId::next();
//!
//! let mut gate = ConsumerGate::new();
//! gate.add_consumer(tokenizer);
//! assert!(gate.should_consume(tokenizer));
//!
//! // The filter overwrites the tokenizer's text, so it takes over.
//! gate.update_current_consumers(filter, tokenizer);
//! assert!(!gate.should_consume(tokenizer));
//! assert!(gate.should_consume(filter));
//! ```
//!
//! Scoped registration releases the slot on every exit path:
//!
//! ```
//! use termgate::analysis::consumer::{ConsumerAttribute, ConsumerGate, ConsumerId};
//!
//! let stage = ConsumerId::next();
//! let mut gate = ConsumerGate::new();
//! {
//!     let scope = gate.scope(stage);
//!     assert!(scope.should_consume(stage));
//! }
//! assert!(gate.is_empty());
//! ```

use std::cell::RefCell;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::trace;

static NEXT_CONSUMER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a pipeline stage on a [`ConsumerGate`].
///
/// Ids are allocated from a process-wide counter, so two stages built from the
/// same configuration still compare unequal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConsumerId(u64);

impl ConsumerId {
    /// Allocate a fresh, never before returned id.
    pub fn next() -> Self {
        ConsumerId(NEXT_CONSUMER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw value of this id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConsumerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "consumer#{}", self.0)
    }
}

/// Capability of an analysis session to gate term production.
///
/// Every operation is total: there is nothing to fail on, and a mismatched
/// [`drop_last_consumer`](Self::drop_last_consumer) is silently ignored.
pub trait ConsumerAttribute {
    /// Check whether `consumer` is one of the current consumers.
    fn should_consume(&self, consumer: ConsumerId) -> bool;

    /// Register `consumer` at the top of the stack.
    fn add_consumer(&mut self, consumer: ConsumerId);

    /// Remove the top of the stack if it is `consumer`, otherwise do nothing.
    fn drop_last_consumer(&mut self, consumer: ConsumerId);

    /// Hand the top slot from `previous` over to `consumer`.
    ///
    /// `previous` is dropped only if it is the top of the stack; `consumer` is
    /// always added.
    fn update_current_consumers(&mut self, consumer: ConsumerId, previous: ConsumerId) {
        self.drop_last_consumer(previous);
        self.add_consumer(consumer);
    }
}

/// Ordered stack of the consumers currently allowed to produce term text.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ConsumerGate {
    consumers: Vec<ConsumerId>,
}

impl ConsumerGate {
    /// Create an empty gate.
    pub fn new() -> Self {
        ConsumerGate {
            consumers: Vec::new(),
        }
    }

    /// Current consumers, in the order of insertion.
    pub fn consumers(&self) -> &[ConsumerId] {
        &self.consumers
    }

    /// Number of registrations on the stack, duplicates included.
    pub fn len(&self) -> usize {
        self.consumers.len()
    }

    /// Check if no consumer is registered.
    pub fn is_empty(&self) -> bool {
        self.consumers.is_empty()
    }

    /// Forget every consumer. Used when the owning session is reset.
    pub fn clear(&mut self) {
        self.consumers.clear();
    }

    /// Register `consumer` until the returned scope is dropped.
    pub fn scope(&mut self, consumer: ConsumerId) -> ConsumerScope<'_> {
        self.add_consumer(consumer);
        ConsumerScope {
            gate: self,
            consumer,
        }
    }
}

impl ConsumerAttribute for ConsumerGate {
    fn should_consume(&self, consumer: ConsumerId) -> bool {
        self.consumers.contains(&consumer)
    }

    fn add_consumer(&mut self, consumer: ConsumerId) {
        self.consumers.push(consumer);
    }

    fn drop_last_consumer(&mut self, consumer: ConsumerId) {
        match self.consumers.last() {
            Some(&last) if last == consumer => {
                self.consumers.pop();
            }
            Some(&last) => {
                trace!("ignoring drop of {consumer}: {last} is the last consumer");
            }
            None => {}
        }
    }
}

/// Registration of a consumer on an exclusively borrowed [`ConsumerGate`].
///
/// Derefs to the gate; dropping the scope drops the consumer again if it is
/// still on top.
#[derive(Debug)]
pub struct ConsumerScope<'a> {
    gate: &'a mut ConsumerGate,
    consumer: ConsumerId,
}

impl ConsumerScope<'_> {
    /// The consumer registered by this scope.
    pub fn consumer(&self) -> ConsumerId {
        self.consumer
    }
}

impl Deref for ConsumerScope<'_> {
    type Target = ConsumerGate;

    fn deref(&self) -> &ConsumerGate {
        self.gate
    }
}

impl DerefMut for ConsumerScope<'_> {
    fn deref_mut(&mut self) -> &mut ConsumerGate {
        self.gate
    }
}

impl Drop for ConsumerScope<'_> {
    fn drop(&mut self) {
        self.gate.drop_last_consumer(self.consumer);
    }
}

/// A [`ConsumerGate`] shared by the stages of one analysis session.
///
/// Sessions are single threaded, so the handle is `!Send` and needs no locking.
#[derive(Clone, Debug, Default)]
pub struct SharedConsumerGate {
    inner: Rc<RefCell<ConsumerGate>>,
}

impl SharedConsumerGate {
    /// Create a handle to a new, empty gate.
    pub fn new() -> Self {
        SharedConsumerGate::default()
    }

    /// Snapshot of the current consumers.
    pub fn consumers(&self) -> Vec<ConsumerId> {
        self.inner.borrow().consumers().to_vec()
    }

    /// Number of registrations on the stack.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Check if no consumer is registered.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Forget every consumer.
    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    /// Check whether `consumer` is one of the current consumers.
    pub fn should_consume(&self, consumer: ConsumerId) -> bool {
        self.inner.borrow().should_consume(consumer)
    }

    /// Register `consumer` for as long as the returned guard lives.
    pub fn register(&self, consumer: ConsumerId) -> ConsumerGuard {
        self.inner.borrow_mut().add_consumer(consumer);
        self.guard(consumer)
    }

    /// Hand the top slot from `previous` over to `consumer` for as long as the
    /// returned guard lives.
    pub fn hand_off(&self, consumer: ConsumerId, previous: ConsumerId) -> ConsumerGuard {
        self.inner
            .borrow_mut()
            .update_current_consumers(consumer, previous);
        self.guard(consumer)
    }

    fn guard(&self, consumer: ConsumerId) -> ConsumerGuard {
        ConsumerGuard {
            gate: self.clone(),
            consumer,
        }
    }

    /// Check whether two handles point at the same gate.
    pub fn ptr_eq(&self, other: &SharedConsumerGate) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl ConsumerAttribute for SharedConsumerGate {
    fn should_consume(&self, consumer: ConsumerId) -> bool {
        SharedConsumerGate::should_consume(self, consumer)
    }

    fn add_consumer(&mut self, consumer: ConsumerId) {
        self.inner.borrow_mut().add_consumer(consumer);
    }

    fn drop_last_consumer(&mut self, consumer: ConsumerId) {
        self.inner.borrow_mut().drop_last_consumer(consumer);
    }
}

/// Registration of a consumer on a [`SharedConsumerGate`].
///
/// Dropping the guard calls `drop_last_consumer` for its consumer. If the
/// consumer was already handed off or is no longer on top, that is a no-op.
#[must_use = "dropping the guard unregisters the consumer immediately"]
#[derive(Debug)]
pub struct ConsumerGuard {
    gate: SharedConsumerGate,
    consumer: ConsumerId,
}

impl ConsumerGuard {
    /// The consumer registered by this guard.
    pub fn consumer(&self) -> ConsumerId {
        self.consumer
    }

    /// The gate this guard is registered on.
    pub fn gate(&self) -> &SharedConsumerGate {
        &self.gate
    }
}

impl Drop for ConsumerGuard {
    fn drop(&mut self) {
        if let Ok(mut gate) = self.gate.inner.try_borrow_mut() {
            gate.drop_last_consumer(self.consumer);
        }
    }
}
