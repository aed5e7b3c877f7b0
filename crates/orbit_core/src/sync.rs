//! Fence tickets and the CPU-side submission ledger.
//!
//! The GPU side of synchronization is a single monotonically increasing
//! 64-bit counter that the queue bumps as submissions retire. The CPU side is
//! this module: every submission takes the next counter value as its
//! [`FenceTicket`], and the [`FenceLedger`] remembers which ticket owns which
//! swapchain slot so the frame loop can wait for exactly the slot it is about
//! to reuse, never for the whole queue.

use crate::error::RenderResult;
use crate::frame_loop::SLOT_COUNT;

/// Completion marker for one submission.
///
/// Tickets are compared, never subtracted or wrapped; the 64-bit counter does
/// not overflow in any realistic run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FenceTicket(u64);

impl FenceTicket {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Observation and wait interface over the GPU's completion counter.
///
/// Implemented by the Direct3D fence (an `ID3D12Fence` plus an event handle)
/// and by test fakes. Waits are unbounded: a hung GPU stalls the process.
pub trait GpuFence {
    /// Latest counter value the GPU is known to have reached.
    fn completed_value(&self) -> u64;

    /// Block until the counter reaches `ticket`.
    fn wait_until(&mut self, ticket: FenceTicket) -> RenderResult<()>;

    /// Non-blocking check, used to decide whether a wait is necessary at all.
    fn is_reached(&self, ticket: FenceTicket) -> bool {
        self.completed_value() >= ticket.value()
    }
}

/// CPU-side record of what was submitted and which slot it owns.
#[derive(Debug)]
pub struct FenceLedger {
    next_value: u64,
    slots: [Option<FenceTicket>; SLOT_COUNT],
    last: Option<FenceTicket>,
}

impl FenceLedger {
    /// A fresh ledger. The first ticket is 1, one above the initial counter
    /// value of a newly created fence, so nothing reads as retired early.
    pub fn new() -> Self {
        Self {
            next_value: 1,
            slots: [None; SLOT_COUNT],
            last: None,
        }
    }

    /// Take the ticket for the submission about to be made.
    pub fn next_ticket(&mut self) -> FenceTicket {
        let ticket = FenceTicket(self.next_value);
        self.next_value += 1;
        self.last = Some(ticket);
        ticket
    }

    /// Record that `ticket`'s submission rendered into `slot`.
    pub fn assign_slot(&mut self, slot: usize, ticket: FenceTicket) {
        self.slots[slot] = Some(ticket);
    }

    /// The ticket that must retire before `slot` may be reused, if any.
    pub fn ticket_for_slot(&self, slot: usize) -> Option<FenceTicket> {
        self.slots[slot]
    }

    /// The most recent submission, waited on once at shutdown.
    pub fn last_submitted(&self) -> Option<FenceTicket> {
        self.last
    }
}

impl Default for FenceLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingFence {
        completed: u64,
    }

    impl GpuFence for CountingFence {
        fn completed_value(&self) -> u64 {
            self.completed
        }

        fn wait_until(&mut self, ticket: FenceTicket) -> RenderResult<()> {
            // A real fence blocks here; the fake retires the work instead.
            if self.completed < ticket.value() {
                self.completed = ticket.value();
            }
            Ok(())
        }
    }

    #[test]
    fn tickets_are_monotonic_from_one() {
        let mut ledger = FenceLedger::new();
        assert_eq!(ledger.next_ticket().value(), 1);
        assert_eq!(ledger.next_ticket().value(), 2);
        assert_eq!(ledger.next_ticket().value(), 3);
        assert_eq!(ledger.last_submitted(), Some(FenceTicket::new(3)));
    }

    #[test]
    fn slots_remember_their_owner() {
        let mut ledger = FenceLedger::new();
        let a = ledger.next_ticket();
        let b = ledger.next_ticket();
        ledger.assign_slot(0, a);
        ledger.assign_slot(1, b);
        assert_eq!(ledger.ticket_for_slot(0), Some(a));
        assert_eq!(ledger.ticket_for_slot(1), Some(b));
        assert_eq!(ledger.ticket_for_slot(2), None);

        // Reassignment replaces the owner, as happens every SLOT_COUNT frames.
        let c = ledger.next_ticket();
        ledger.assign_slot(0, c);
        assert_eq!(ledger.ticket_for_slot(0), Some(c));
    }

    #[test]
    fn is_reached_is_stable_without_new_signals() {
        let fence = CountingFence { completed: 5 };
        let reached = FenceTicket::new(4);
        let pending = FenceTicket::new(6);
        for _ in 0..8 {
            assert!(fence.is_reached(reached));
            assert!(!fence.is_reached(pending));
        }
    }

    #[test]
    fn wait_until_observes_at_least_the_ticket() {
        let mut fence = CountingFence { completed: 0 };
        let ticket = FenceTicket::new(3);
        fence.wait_until(ticket).unwrap();
        assert!(fence.completed_value() >= ticket.value());
        // The counter never moves backwards.
        fence.wait_until(FenceTicket::new(1)).unwrap();
        assert_eq!(fence.completed_value(), 3);
    }
}
