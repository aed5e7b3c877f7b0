//! Frame-loop pipeline tests against an in-memory backend.
//!
//! The fake models the worst-case GPU: nothing retires until the loop
//! actually blocks on the fence. That makes every ordering obligation of the
//! pipeline observable — slot rotation, per-slot waits, and the constant
//! records each drawable owns.

use std::collections::VecDeque;

use orbit_core::constants::SceneConstants;
use orbit_core::drawable::{scene_drawables, DRAW_SLOT_COUNT};
use orbit_core::input::InputEvent;
use orbit_core::scene::SceneState;
use orbit_core::{
    FenceTicket, FrameContext, FrameFlow, FrameLoop, GpuFence, RenderBackend, RenderResult,
    SLOT_COUNT,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Submission {
    slot: usize,
    ticket: u64,
    frame: u64,
}

/// In-memory stand-in for the Direct3D backend.
#[derive(Default)]
struct TestBackend {
    /// One batch of events handed out per POLL_INPUT call.
    event_batches: VecDeque<Vec<InputEvent>>,
    completed: u64,
    waits: Vec<u64>,
    submissions: Vec<Submission>,
    constants: [Option<SceneConstants>; DRAW_SLOT_COUNT],
    presents: usize,
}

impl TestBackend {
    fn with_events(batches: Vec<Vec<InputEvent>>) -> Self {
        Self {
            event_batches: batches.into(),
            ..Self::default()
        }
    }
}

impl GpuFence for TestBackend {
    fn completed_value(&self) -> u64 {
        self.completed
    }

    fn wait_until(&mut self, ticket: FenceTicket) -> RenderResult<()> {
        self.waits.push(ticket.value());
        // The fake GPU retires work only when waited on; the counter still
        // never moves backwards.
        if self.completed < ticket.value() {
            self.completed = ticket.value();
        }
        Ok(())
    }
}

impl RenderBackend for TestBackend {
    fn poll_input(&mut self, events: &mut Vec<InputEvent>) -> RenderResult<()> {
        if let Some(batch) = self.event_batches.pop_front() {
            events.extend(batch);
        }
        Ok(())
    }

    fn write_constants(&mut self, slot: usize, constants: &SceneConstants) -> RenderResult<()> {
        self.constants[slot] = Some(*constants);
        Ok(())
    }

    fn submit_frame(&mut self, ctx: &FrameContext, ticket: FenceTicket) -> RenderResult<()> {
        self.submissions.push(Submission {
            slot: ctx.slot,
            ticket: ticket.value(),
            frame: ctx.frame_count,
        });
        Ok(())
    }

    fn present(&mut self) -> RenderResult<()> {
        self.presents += 1;
        Ok(())
    }
}

fn new_loop(backend: TestBackend) -> FrameLoop<TestBackend> {
    FrameLoop::new(backend, SceneState::new(800, 600))
}

#[test]
fn slot_at_frame_n_is_n_mod_buffer_count() {
    let mut frame_loop = new_loop(TestBackend::default());
    for _ in 0..7 {
        assert_eq!(frame_loop.tick().unwrap(), FrameFlow::Continue);
    }
    let backend = frame_loop.backend();
    assert_eq!(backend.submissions.len(), 7);
    assert_eq!(backend.presents, 7);
    for submission in &backend.submissions {
        assert_eq!(submission.slot, (submission.frame as usize) % SLOT_COUNT);
    }
}

#[test]
fn tickets_count_up_by_one_per_frame() {
    let mut frame_loop = new_loop(TestBackend::default());
    for _ in 0..5 {
        frame_loop.tick().unwrap();
    }
    let tickets: Vec<u64> = frame_loop.backend().submissions.iter().map(|s| s.ticket).collect();
    assert_eq!(tickets, vec![1, 2, 3, 4, 5]);
}

#[test]
fn slot_reuse_waits_for_the_submission_three_frames_back() {
    let mut frame_loop = new_loop(TestBackend::default());
    for _ in 0..9 {
        frame_loop.tick().unwrap();
    }
    // Frames 0..3 find virgin slots; from frame 3 on, reusing slot n % 3
    // must wait for frame n-3's ticket and nothing newer.
    assert_eq!(frame_loop.backend().waits, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn no_wait_happens_when_the_gpu_already_retired_the_slot() {
    let mut frame_loop = new_loop(TestBackend::default());
    for _ in 0..3 {
        frame_loop.tick().unwrap();
    }
    // GPU caught up on everything; the next acquire must not block.
    frame_loop.backend_mut().completed = 3;
    frame_loop.tick().unwrap();
    assert_eq!(frame_loop.backend().waits, Vec::<u64>::new());
}

#[test]
fn quit_terminates_before_the_next_submission() {
    let backend = TestBackend::with_events(vec![
        vec![InputEvent::KeyDown(65)],
        vec![InputEvent::Quit, InputEvent::KeyDown(66)],
    ]);
    let mut frame_loop = new_loop(backend);

    assert_eq!(frame_loop.tick().unwrap(), FrameFlow::Continue);
    assert_eq!(frame_loop.tick().unwrap(), FrameFlow::Halt);

    let backend = frame_loop.backend();
    // Only the first tick reached RECORD_AND_SUBMIT.
    assert_eq!(backend.submissions.len(), 1);
    assert_eq!(backend.presents, 1);
}

#[test]
fn resize_reaches_the_scene_state() {
    let backend = TestBackend::with_events(vec![vec![InputEvent::Resize(1280, 720)]]);
    let mut frame_loop = new_loop(backend);
    frame_loop.tick().unwrap();
    assert_eq!(frame_loop.scene().viewport(), (1280, 720));
}

#[test]
fn constant_records_survive_submission_and_waiting() {
    let mut frame_loop = new_loop(TestBackend::default());
    frame_loop.tick().unwrap();

    // Reassemble the snapshot the loop must have written for frame 0.
    let scene = SceneState::new(800, 600);
    let ctx = FrameContext::new();
    let [plain, lit] = scene_drawables();
    let expected_plain = scene.constants_for(&plain, &ctx);
    let expected_lit = scene.constants_for(&lit, &ctx);

    let observed_plain = frame_loop.backend().constants[0].unwrap();
    let observed_lit = frame_loop.backend().constants[1].unwrap();
    assert_eq!(observed_plain, expected_plain);
    assert_eq!(observed_lit, expected_lit);

    // Forcing the fence wait must not disturb the records.
    frame_loop.wait_idle().unwrap();
    assert_eq!(frame_loop.backend().constants[0].unwrap(), expected_plain);
    assert_eq!(frame_loop.backend().constants[1].unwrap(), expected_lit);
}

#[test]
fn run_drains_until_quit_and_leaves_the_gpu_idle() {
    let backend = TestBackend::with_events(vec![
        vec![],
        vec![],
        vec![],
        vec![],
        vec![InputEvent::Quit],
    ]);
    let mut frame_loop = new_loop(backend);
    frame_loop.run().unwrap();

    let backend = frame_loop.backend();
    assert_eq!(backend.submissions.len(), 4);
    // run() waits out the final ticket before returning.
    assert!(backend.completed >= backend.submissions.last().unwrap().ticket);
}
