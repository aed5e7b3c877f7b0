//! The frame loop state machine.
//!
//! One tick walks `POLL_INPUT -> UPDATE_SCENE -> ACQUIRE_SLOT ->
//! RECORD_AND_SUBMIT -> PRESENT` on a single thread; the GPU is the only
//! other actor and is observed exclusively through the fence. The loop never
//! waits for the whole queue mid-run — ACQUIRE_SLOT waits only for the ticket
//! that owned the slot about to be reused, keeping CPU and GPU pipelined.

use tracing::trace;

use crate::constants::SceneConstants;
use crate::drawable::{scene_drawables, Drawable};
use crate::error::RenderResult;
use crate::input::InputEvent;
use crate::scene::SceneState;
use crate::sync::{FenceLedger, FenceTicket, GpuFence};

/// Number of presentable images in the swapchain ring.
pub const SLOT_COUNT: usize = 3;

/// Loop-local mutable state, passed by reference into each phase.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext {
    /// Frames completed so far; drives all animation (one unit per frame,
    /// never wall-clock).
    pub frame_count: u64,
    /// Swapchain slot targeted by the current frame.
    pub slot: usize,
    /// Active entry in the light palette.
    pub palette_index: usize,
}

impl FrameContext {
    /// Slot starts on the last entry of the ring so the first advance lands
    /// on slot 0 and frame *n* uses slot `n % SLOT_COUNT`.
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            slot: SLOT_COUNT - 1,
            palette_index: 0,
        }
    }
}

impl Default for FrameContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the loop should keep running after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameFlow {
    Continue,
    Halt,
}

/// The GPU-facing side of the pipeline.
///
/// The Direct3D 12 backend implements this over a swapchain, per-slot command
/// allocators, and mapped upload buffers; tests implement it in memory. The
/// fence observation methods come from the [`GpuFence`] supertrait.
pub trait RenderBackend: GpuFence {
    /// Drain pending platform events into `events` without blocking.
    fn poll_input(&mut self, events: &mut Vec<InputEvent>) -> RenderResult<()>;

    /// Write one drawable's constant record into the slot that drawable
    /// exclusively owns.
    fn write_constants(&mut self, slot: usize, constants: &SceneConstants) -> RenderResult<()>;

    /// Record the frame's command stream against `ctx.slot`, submit it, and
    /// ask the GPU to signal `ticket` when the submission retires.
    fn submit_frame(&mut self, ctx: &FrameContext, ticket: FenceTicket) -> RenderResult<()>;

    /// Present the just-rendered slot, vsync interval 1.
    fn present(&mut self) -> RenderResult<()>;
}

/// Owns a backend and drives it one frame per [`FrameLoop::tick`].
pub struct FrameLoop<B: RenderBackend> {
    backend: B,
    scene: SceneState,
    ledger: FenceLedger,
    ctx: FrameContext,
    drawables: Vec<Drawable>,
    events: Vec<InputEvent>,
}

impl<B: RenderBackend> FrameLoop<B> {
    pub fn new(backend: B, scene: SceneState) -> Self {
        Self {
            backend,
            scene,
            ledger: FenceLedger::new(),
            ctx: FrameContext::new(),
            drawables: scene_drawables().to_vec(),
            events: Vec::new(),
        }
    }

    pub fn context(&self) -> &FrameContext {
        &self.ctx
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    /// Run ticks until the platform asks to quit, then wait for the last
    /// submission so no GPU work is in flight when resources drop.
    pub fn run(&mut self) -> RenderResult<()> {
        while self.tick()? == FrameFlow::Continue {}
        self.wait_idle()
    }

    /// One full pass of the frame state machine.
    pub fn tick(&mut self) -> RenderResult<FrameFlow> {
        if self.poll_input()? == FrameFlow::Halt {
            return Ok(FrameFlow::Halt);
        }
        self.scene.advance(&mut self.ctx);
        self.acquire_slot()?;
        self.record_and_submit()?;
        self.backend.present()?;
        self.ctx.frame_count += 1;
        Ok(FrameFlow::Continue)
    }

    /// Block until the most recent submission has retired. Called once after
    /// the loop ends; also safe to call when nothing was ever submitted.
    pub fn wait_idle(&mut self) -> RenderResult<()> {
        if let Some(ticket) = self.ledger.last_submitted() {
            if !self.backend.is_reached(ticket) {
                self.backend.wait_until(ticket)?;
            }
        }
        Ok(())
    }

    fn poll_input(&mut self) -> RenderResult<FrameFlow> {
        self.events.clear();
        self.backend.poll_input(&mut self.events)?;
        for event in self.events.drain(..) {
            match event {
                InputEvent::Quit => return Ok(FrameFlow::Halt),
                InputEvent::Resize(width, height) => self.scene.set_viewport(width, height),
                InputEvent::KeyDown(code) => self.scene.on_key_down(code),
            }
        }
        Ok(FrameFlow::Continue)
    }

    /// Advance to the next slot in the ring and make sure its previous
    /// submission retired before anything belonging to it is reused.
    fn acquire_slot(&mut self) -> RenderResult<()> {
        self.ctx.slot = (self.ctx.slot + 1) % SLOT_COUNT;
        if let Some(ticket) = self.ledger.ticket_for_slot(self.ctx.slot) {
            if !self.backend.is_reached(ticket) {
                trace!(slot = self.ctx.slot, ticket = ticket.value(), "waiting on slot fence");
                self.backend.wait_until(ticket)?;
            }
        }
        Ok(())
    }

    fn record_and_submit(&mut self) -> RenderResult<()> {
        for drawable in &self.drawables {
            let record = self.scene.constants_for(drawable, &self.ctx);
            self.backend.write_constants(drawable.constant_slot, &record)?;
        }
        let ticket = self.ledger.next_ticket();
        self.backend.submit_frame(&self.ctx, ticket)?;
        self.ledger.assign_slot(self.ctx.slot, ticket);
        Ok(())
    }
}
