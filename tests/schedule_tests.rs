// Host-side tests for the frame loop state machine.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod schedule {
    include!("../src/core/schedule.rs");
}

use schedule::*;

/// Hands out increasing ids and tracks which requests are still outstanding.
#[derive(Default)]
struct FakeRaf {
    next: u32,
    outstanding: Vec<u32>,
    cancelled: Vec<u32>,
    refuse: bool,
}

impl FakeRaf {
    /// Host fires the oldest pending callback.
    fn fire(&mut self) -> Option<u32> {
        if self.outstanding.is_empty() {
            None
        } else {
            Some(self.outstanding.remove(0))
        }
    }
}

impl FrameScheduler for FakeRaf {
    type Handle = u32;

    fn request_frame(&mut self) -> Option<u32> {
        if self.refuse {
            return None;
        }
        self.next += 1;
        self.outstanding.push(self.next);
        Some(self.next)
    }

    fn cancel_frame(&mut self, handle: u32) {
        self.outstanding.retain(|h| *h != handle);
        self.cancelled.push(handle);
    }
}

/// One host callback: the loop consumes the request, "draws", re-arms.
fn run_frame(lp: &mut AnimationLoop<u32>, raf: &mut FakeRaf) -> bool {
    if raf.fire().is_none() {
        return false;
    }
    let drew = lp.begin_frame();
    if drew {
        lp.end_frame(raf);
    }
    drew
}

#[test]
fn start_requests_exactly_one_frame() {
    let mut raf = FakeRaf::default();
    let mut lp = AnimationLoop::new();
    assert_eq!(lp.state(), LoopState::Idle);
    lp.start(&mut raf);
    lp.start(&mut raf);
    assert_eq!(raf.outstanding.len(), 1);
    assert_eq!(lp.state(), LoopState::Running { pending: Some(1) });
}

#[test]
fn running_loop_keeps_a_single_request() {
    let mut raf = FakeRaf::default();
    let mut lp = AnimationLoop::new();
    lp.start(&mut raf);
    for _ in 0..50 {
        assert!(run_frame(&mut lp, &mut raf));
        assert_eq!(raf.outstanding.len(), 1);
    }
}

#[test]
fn hidden_cancels_and_pauses() {
    let mut raf = FakeRaf::default();
    let mut lp = AnimationLoop::new();
    lp.start(&mut raf);
    lp.set_visible(false, &mut raf);
    assert_eq!(lp.state(), LoopState::Paused);
    assert!(raf.outstanding.is_empty());
    assert_eq!(raf.cancelled, vec![1]);
    // a stray callback while paused draws nothing and does not re-arm
    assert!(!lp.begin_frame());
    assert!(raf.outstanding.is_empty());
}

#[test]
fn hidden_visible_cycles_never_double_schedule() {
    let mut raf = FakeRaf::default();
    let mut lp = AnimationLoop::new();
    lp.start(&mut raf);
    for i in 0..20 {
        lp.set_visible(false, &mut raf);
        assert!(raf.outstanding.is_empty());
        lp.set_visible(true, &mut raf);
        lp.set_visible(true, &mut raf);
        assert_eq!(raf.outstanding.len(), 1, "cycle {}", i);
        run_frame(&mut lp, &mut raf);
        assert_eq!(raf.outstanding.len(), 1);
    }
}

#[test]
fn visible_while_running_or_idle_is_ignored() {
    let mut raf = FakeRaf::default();
    let mut lp = AnimationLoop::new();
    lp.set_visible(true, &mut raf);
    lp.set_visible(false, &mut raf);
    assert_eq!(lp.state(), LoopState::Idle);
    assert!(raf.outstanding.is_empty());

    lp.start(&mut raf);
    lp.set_visible(true, &mut raf);
    assert_eq!(raf.outstanding.len(), 1);
}

#[test]
fn pause_between_callback_and_rearm_leaves_nothing_pending() {
    let mut raf = FakeRaf::default();
    let mut lp = AnimationLoop::new();
    lp.start(&mut raf);
    raf.fire();
    assert!(lp.begin_frame());
    lp.pause(&mut raf);
    lp.end_frame(&mut raf);
    assert!(raf.outstanding.is_empty());
    assert!(raf.cancelled.is_empty());
}

#[test]
fn refused_request_can_be_retried_on_resume() {
    let mut raf = FakeRaf {
        refuse: true,
        ..Default::default()
    };
    let mut lp = AnimationLoop::new();
    lp.start(&mut raf);
    assert!(lp.is_running());
    assert!(!lp.has_pending());

    raf.refuse = false;
    lp.pause(&mut raf);
    lp.resume(&mut raf);
    assert!(lp.has_pending());
    assert_eq!(raf.outstanding.len(), 1);
}
