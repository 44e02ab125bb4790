// Drives the field once per display refresh. The clock is injected so the
// loop can run off requestAnimationFrame in the browser and off a manual
// clock in tests.

use crate::field::ConstellationField;
use crate::surface::Surface;
use gloo::render::{request_animation_frame, AnimationFrame};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

pub type FrameCallback = Box<dyn FnOnce()>;

/// Runs a callback once, at the next frame. Dropping the returned handle
/// before the frame fires cancels it.
pub trait FrameClock {
    type Frame;

    fn request_frame(&self, callback: FrameCallback) -> Self::Frame;
}

#[derive(Default)]
pub struct AnimationFrameClock;

impl AnimationFrameClock {
    pub fn new() -> Self {
        AnimationFrameClock
    }
}

impl FrameClock for AnimationFrameClock {
    type Frame = AnimationFrame;

    fn request_frame(&self, callback: FrameCallback) -> AnimationFrame {
        request_animation_frame(move |_timestamp| callback())
    }
}

type FrameQueue = RefCell<VecDeque<(u64, FrameCallback)>>;

/// Clock that only ticks when told to.
#[derive(Default)]
pub struct ManualClock {
    queue: Rc<FrameQueue>,
    next_id: Cell<u64>,
}

/// Pending frame on a `ManualClock`; dropping it unqueues the callback.
pub struct ManualFrame {
    id: u64,
    queue: Weak<FrameQueue>,
}

impl Drop for ManualFrame {
    fn drop(&mut self) {
        if let Some(queue) = self.queue.upgrade() {
            queue.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Fires the oldest pending callback. Returns false if nothing was queued.
    pub fn advance(&self) -> bool {
        let next = self.queue.borrow_mut().pop_front();
        match next {
            Some((_, callback)) => {
                callback();
                true
            }
            None => false,
        }
    }
}

impl FrameClock for ManualClock {
    type Frame = ManualFrame;

    fn request_frame(&self, callback: FrameCallback) -> ManualFrame {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.queue.borrow_mut().push_back((id, callback));
        ManualFrame {
            id,
            queue: Rc::downgrade(&self.queue),
        }
    }
}

// One started loop. Each start gets its own, so a stopped loop can never
// be revived by a later start.
struct Run<F> {
    running: Cell<bool>,
    pending: RefCell<Option<F>>,
}

impl<F> Run<F> {
    fn halt(&self) {
        self.running.set(false);
        let pending = self.pending.borrow_mut().take();
        drop(pending);
    }
}

pub struct FrameScheduler<C: FrameClock> {
    clock: Rc<C>,
    run: RefCell<Option<Rc<Run<C::Frame>>>>,
    frames: Rc<Cell<u64>>,
}

impl<C: FrameClock + 'static> FrameScheduler<C> {
    pub fn new(clock: Rc<C>) -> Self {
        FrameScheduler {
            clock,
            run: RefCell::new(None),
            frames: Rc::new(Cell::new(0)),
        }
    }

    pub fn start<S: Surface + 'static>(&self, field: ConstellationField, surface: S) {
        if self.is_running() {
            log::warn!("frame scheduler already running, ignoring start");
            return;
        }
        log::debug!("frame scheduler started");
        let run = Rc::new(Run {
            running: Cell::new(true),
            pending: RefCell::new(None),
        });
        *self.run.borrow_mut() = Some(Rc::clone(&run));
        schedule(
            Rc::clone(&self.clock),
            run,
            Rc::clone(&self.frames),
            Rc::new(RefCell::new((field, surface))),
        );
    }

    /// Cancels the queued frame. No step runs after this returns.
    pub fn stop(&self) {
        let run = self.run.borrow_mut().take();
        if let Some(run) = run {
            run.halt();
            log::debug!("frame scheduler stopped after {} frames", self.frames.get());
        }
    }

    pub fn is_running(&self) -> bool {
        self.run
            .borrow()
            .as_ref()
            .map_or(false, |run| run.running.get())
    }

    pub fn frames(&self) -> u64 {
        self.frames.get()
    }
}

impl<C: FrameClock> Drop for FrameScheduler<C> {
    fn drop(&mut self) {
        if let Some(run) = self.run.borrow_mut().take() {
            run.halt();
        }
    }
}

fn schedule<C, S>(
    clock: Rc<C>,
    run: Rc<Run<C::Frame>>,
    frames: Rc<Cell<u64>>,
    frame: Rc<RefCell<(ConstellationField, S)>>,
) where
    C: FrameClock + 'static,
    S: Surface + 'static,
{
    let next_clock = Rc::clone(&clock);
    let this_run = Rc::clone(&run);
    let handle = clock.request_frame(Box::new(move || {
        // the handle for the frame now firing is spent
        let fired = this_run.pending.borrow_mut().take();
        drop(fired);
        if !this_run.running.get() {
            return;
        }
        {
            let mut frame = frame.borrow_mut();
            let (field, surface) = &mut *frame;
            field.step(surface);
        }
        frames.set(frames.get() + 1);
        schedule(next_clock, this_run, frames, frame);
    }));
    *run.pending.borrow_mut() = Some(handle);
}
