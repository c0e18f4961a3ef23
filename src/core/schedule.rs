/// Host animation-frame primitive: request one callback, or cancel a pending one.
pub trait FrameScheduler {
    type Handle: Copy;

    /// Ask for one callback on the next frame. `None` means the host refused.
    fn request_frame(&mut self) -> Option<Self::Handle>;
    fn cancel_frame(&mut self, handle: Self::Handle);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState<H> {
    /// Never started.
    Idle,
    /// Ticking; `pending` is the outstanding request, if any.
    Running { pending: Option<H> },
    /// Page hidden; no request outstanding.
    Paused,
}

/// Self-rescheduling frame loop as an explicit state machine.
///
/// Only this type issues frame requests, and only when none is outstanding,
/// so there is never more than one scheduled tick at a time.
#[derive(Debug)]
pub struct AnimationLoop<H> {
    state: LoopState<H>,
}

impl<H: Copy> Default for AnimationLoop<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Copy> AnimationLoop<H> {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
        }
    }

    #[inline]
    pub fn state(&self) -> LoopState<H> {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    #[inline]
    pub fn has_pending(&self) -> bool {
        matches!(self.state, LoopState::Running { pending: Some(_) })
    }

    /// Idle -> Running with one frame requested. No-op otherwise.
    pub fn start<S: FrameScheduler<Handle = H>>(&mut self, scheduler: &mut S) {
        if let LoopState::Idle = self.state {
            self.state = LoopState::Running { pending: None };
            self.arm(scheduler);
        }
    }

    /// Called at the top of a frame callback. The pending request has been
    /// consumed by the host; returns whether the frame should be drawn.
    pub fn begin_frame(&mut self) -> bool {
        match &mut self.state {
            LoopState::Running { pending } => {
                *pending = None;
                true
            }
            _ => false,
        }
    }

    /// Called after a frame has been drawn: request the next one.
    pub fn end_frame<S: FrameScheduler<Handle = H>>(&mut self, scheduler: &mut S) {
        self.arm(scheduler);
    }

    /// Page hidden: cancel the outstanding request and pause.
    pub fn pause<S: FrameScheduler<Handle = H>>(&mut self, scheduler: &mut S) {
        if let LoopState::Running { pending } = self.state {
            if let Some(handle) = pending {
                scheduler.cancel_frame(handle);
            }
            self.state = LoopState::Paused;
        }
    }

    /// Page visible again: re-arm if paused. Idle and Running are untouched.
    pub fn resume<S: FrameScheduler<Handle = H>>(&mut self, scheduler: &mut S) {
        if let LoopState::Paused = self.state {
            self.state = LoopState::Running { pending: None };
            self.arm(scheduler);
        }
    }

    /// Route a visibility notification to `pause` / `resume`.
    pub fn set_visible<S: FrameScheduler<Handle = H>>(&mut self, visible: bool, scheduler: &mut S) {
        if visible {
            self.resume(scheduler);
        } else {
            self.pause(scheduler);
        }
    }

    fn arm<S: FrameScheduler<Handle = H>>(&mut self, scheduler: &mut S) {
        if let LoopState::Running { pending } = &mut self.state {
            if pending.is_none() {
                *pending = scheduler.request_frame();
                if pending.is_none() {
                    log::warn!("[frame] host refused animation frame request");
                }
            }
        }
    }
}
