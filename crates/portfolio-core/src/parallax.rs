//! Pointer parallax driver.
//!
//! Pointer moves (or, on touch devices, a synthetic drift) set a target in
//! roughly `[-0.5, 0.5]²`; once per frame the current value eases toward it
//! and is published to [`ParallaxOutput`]. The easing loop parks itself when
//! it converges and is re-armed by the next target change.
//!
//! Lifetime is scoped: [`ParallaxDriver::start`] returns a [`ParallaxHandle`]
//! whose [`dispose`](ParallaxHandle::dispose) (or drop) cancels every pending
//! frame, runs registered teardown work and silences the driver for good.

use crate::constants::*;
use crate::frames::{FrameHandle, FrameScheduler};
use crate::output::ParallaxOutput;
use crate::shapes::DeviceProbe;
use glam::Vec2;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Converged,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParallaxState {
    pub target: Vec2,
    pub current: Vec2,
    /// An easing step is scheduled.
    pub active: bool,
}

impl ParallaxState {
    /// L1 distance between current and target.
    #[inline]
    pub fn distance(&self) -> f32 {
        let d = (self.current - self.target).abs();
        d.x + d.y
    }

    /// One exponential-smoothing update toward the target.
    pub fn ease_step(&mut self) -> StepOutcome {
        self.current += (self.target - self.current) * EASING_FACTOR;
        if self.distance() > CONVERGENCE_EPSILON {
            StepOutcome::Continue
        } else {
            StepOutcome::Converged
        }
    }
}

/// One pointer-move observation in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub client_x: f32,
    pub client_y: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

/// Map a pointer position to a target centred on the viewport.
///
/// Returns `None` for a degenerate viewport.
#[inline]
pub fn pointer_target(sample: PointerSample) -> Option<Vec2> {
    let (w, h) = (sample.viewport_width, sample.viewport_height);
    if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
        return None;
    }
    let x = (sample.client_x - w / 2.0) / w;
    let y = (sample.client_y - h / 2.0) / h;
    (x.is_finite() && y.is_finite()).then(|| Vec2::new(x, y))
}

/// Synthetic wander substituting for pointer input.
///
/// The phase is kept in f64 and wrapped to [`DRIFT_PHASE_PERIOD`] so the step
/// stays exact however long the page is left open.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Drift {
    pub phase: f64,
}

impl Drift {
    pub fn tick(&mut self) -> Vec2 {
        self.phase = (self.phase + DRIFT_PHASE_STEP).rem_euclid(DRIFT_PHASE_PERIOD);
        Vec2::new(
            self.phase.sin() as f32 * DRIFT_AMPLITUDE_X,
            (self.phase * DRIFT_Y_PHASE_RATIO).cos() as f32 * DRIFT_AMPLITUDE_Y,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverMode {
    Pointer,
    /// Pointer input plus the always-on drift loop (coarse pointers).
    PointerWithDrift,
}

impl DriverMode {
    pub fn for_probe(probe: DeviceProbe) -> Self {
        if probe.is_coarse() {
            DriverMode::PointerWithDrift
        } else {
            DriverMode::Pointer
        }
    }
}

type TeardownFn = Box<dyn FnOnce()>;

struct Inner {
    state: ParallaxState,
    drift: Option<Drift>,
    step_frame: Option<FrameHandle>,
    drift_frame: Option<FrameHandle>,
    disposed: bool,
    teardown: SmallVec<[TeardownFn; 2]>,
}

pub struct ParallaxDriver {
    mode: DriverMode,
    inner: RefCell<Inner>,
    scheduler: Rc<dyn FrameScheduler>,
    output: ParallaxOutput,
}

impl ParallaxDriver {
    pub fn start(mode: DriverMode, scheduler: Rc<dyn FrameScheduler>) -> ParallaxHandle {
        let driver = Rc::new(ParallaxDriver {
            mode,
            inner: RefCell::new(Inner {
                state: ParallaxState::default(),
                drift: (mode == DriverMode::PointerWithDrift).then(Drift::default),
                step_frame: None,
                drift_frame: None,
                disposed: false,
                teardown: SmallVec::new(),
            }),
            scheduler,
            output: ParallaxOutput::new(),
        });
        if mode == DriverMode::PointerWithDrift {
            schedule_drift(&driver);
        }
        log::debug!("parallax driver started ({:?})", mode);
        ParallaxHandle { driver }
    }
}

fn schedule_step(driver: &Rc<ParallaxDriver>) {
    {
        let inner = driver.inner.borrow();
        if inner.disposed || inner.step_frame.is_some() {
            return;
        }
    }
    let weak: Weak<ParallaxDriver> = Rc::downgrade(driver);
    let handle = driver.scheduler.request_frame(Box::new(move || {
        if let Some(d) = weak.upgrade() {
            run_step(&d);
        }
    }));
    let mut inner = driver.inner.borrow_mut();
    inner.step_frame = handle;
    inner.state.active = handle.is_some();
}

fn run_step(driver: &Rc<ParallaxDriver>) {
    let (value, outcome) = {
        let mut inner = driver.inner.borrow_mut();
        if inner.disposed {
            return;
        }
        inner.step_frame = None;
        inner.state.active = false;
        let outcome = inner.state.ease_step();
        (inner.state.current, outcome)
    };
    driver.output.publish(value);
    match outcome {
        StepOutcome::Continue => schedule_step(driver),
        StepOutcome::Converged => log::trace!("parallax converged at {:?}", value),
    }
}

fn schedule_drift(driver: &Rc<ParallaxDriver>) {
    {
        let inner = driver.inner.borrow();
        if inner.disposed || inner.drift.is_none() || inner.drift_frame.is_some() {
            return;
        }
    }
    let weak: Weak<ParallaxDriver> = Rc::downgrade(driver);
    let handle = driver.scheduler.request_frame(Box::new(move || {
        if let Some(d) = weak.upgrade() {
            run_drift(&d);
        }
    }));
    driver.inner.borrow_mut().drift_frame = handle;
}

fn run_drift(driver: &Rc<ParallaxDriver>) {
    {
        let mut guard = driver.inner.borrow_mut();
        let inner = &mut *guard;
        if inner.disposed {
            return;
        }
        inner.drift_frame = None;
        match inner.drift.as_mut() {
            Some(drift) => inner.state.target = drift.tick(),
            None => return,
        }
    }
    schedule_step(driver);
    schedule_drift(driver);
}

fn feed_pointer(driver: &Rc<ParallaxDriver>, sample: PointerSample) {
    let Some(target) = pointer_target(sample) else {
        return;
    };
    {
        let mut inner = driver.inner.borrow_mut();
        if inner.disposed {
            return;
        }
        inner.state.target = target;
    }
    schedule_step(driver);
}

/// Weak pointer-move sender; does nothing once the driver is gone.
#[derive(Clone)]
pub struct PointerInput {
    driver: Weak<ParallaxDriver>,
}

impl PointerInput {
    pub fn send(&self, sample: PointerSample) {
        if let Some(driver) = self.driver.upgrade() {
            feed_pointer(&driver, sample);
        }
    }
}

/// Owning handle of a running driver; the single teardown path.
pub struct ParallaxHandle {
    driver: Rc<ParallaxDriver>,
}

impl ParallaxHandle {
    pub fn mode(&self) -> DriverMode {
        self.driver.mode
    }

    pub fn output(&self) -> ParallaxOutput {
        self.driver.output.clone()
    }

    pub fn state(&self) -> ParallaxState {
        self.driver.inner.borrow().state
    }

    pub fn is_disposed(&self) -> bool {
        self.driver.inner.borrow().disposed
    }

    pub fn is_drifting(&self) -> bool {
        self.driver.inner.borrow().drift_frame.is_some()
    }

    /// Feed a pointer move. Ignored after disposal or for a degenerate
    /// viewport. Never schedules a second concurrent easing step.
    pub fn pointer_moved(&self, sample: PointerSample) {
        feed_pointer(&self.driver, sample);
    }

    /// Non-owning sender for event listeners.
    pub fn pointer_input(&self) -> PointerInput {
        PointerInput {
            driver: Rc::downgrade(&self.driver),
        }
    }

    /// Register work (e.g. listener removal) to run once at disposal. Runs
    /// immediately if the driver is already disposed.
    pub fn on_teardown(&self, f: impl FnOnce() + 'static) {
        let mut inner = self.driver.inner.borrow_mut();
        if inner.disposed {
            drop(inner);
            f();
        } else {
            inner.teardown.push(Box::new(f));
        }
    }

    /// Cancel pending frames, run teardown work and stop publishing.
    /// Idempotent.
    pub fn dispose(&self) {
        let (step, drift, teardown) = {
            let mut inner = self.driver.inner.borrow_mut();
            if inner.disposed {
                return;
            }
            inner.disposed = true;
            inner.state.active = false;
            (
                inner.step_frame.take(),
                inner.drift_frame.take(),
                std::mem::take(&mut inner.teardown),
            )
        };
        for handle in step.into_iter().chain(drift) {
            self.driver.scheduler.cancel_frame(handle);
        }
        for f in teardown {
            f();
        }
        log::debug!("parallax driver disposed");
    }
}

impl Drop for ParallaxHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}
