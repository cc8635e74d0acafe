// Host-side tests for the parallax driver, run against the manual frame queue.

use glam::Vec2;
use portfolio_core::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn sample(x: f32, y: f32) -> PointerSample {
    PointerSample {
        client_x: x,
        client_y: y,
        viewport_width: 1000.0,
        viewport_height: 1000.0,
    }
}

fn start(mode: DriverMode) -> (Rc<ManualFrames>, ParallaxHandle) {
    let frames = Rc::new(ManualFrames::new());
    let handle = ParallaxDriver::start(mode, frames.clone());
    (frames, handle)
}

/// Ignores cancellation, so already-queued callbacks still fire after
/// teardown, like a late browser callback would.
#[derive(Default)]
struct LateFrames(ManualFrames);

impl FrameScheduler for LateFrames {
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameHandle> {
        self.0.request_frame(callback)
    }
    fn cancel_frame(&self, _handle: FrameHandle) {}
}

/// No display surface.
struct NoFrames;

impl FrameScheduler for NoFrames {
    fn request_frame(&self, _callback: FrameCallback) -> Option<FrameHandle> {
        None
    }
    fn cancel_frame(&self, _handle: FrameHandle) {}
}

#[test]
fn easing_converges_in_predicted_step_count() {
    let mut st = ParallaxState {
        target: Vec2::new(0.4, -0.3),
        ..Default::default()
    };
    let mut steps = 0;
    while st.ease_step() == StepOutcome::Continue {
        steps += 1;
        assert!(steps < 1000, "easing never converged");
    }
    steps += 1;
    // L1 error after n steps is 0.7 * 0.92^n.
    let predicted = ((0.001f64 / 0.7).ln() / 0.92f64.ln()).ceil() as usize;
    assert_eq!(predicted, 79);
    assert_eq!(steps, predicted);
    assert!(st.distance() <= CONVERGENCE_EPSILON);
}

#[test]
fn driver_stops_scheduling_once_converged() {
    let (frames, handle) = start(DriverMode::Pointer);
    let out = handle.output();
    assert!(frames.is_idle(), "pointer mode schedules nothing up front");
    handle.pointer_moved(sample(900.0, 200.0));
    let target = handle.state().target;
    assert!((target - Vec2::new(0.4, -0.3)).abs().max_element() < 1e-6);
    let ran = frames.run_until_idle(1000);
    assert_eq!(ran, 79);
    assert_eq!(out.publish_count(), 79);
    assert!(frames.is_idle());
    assert!(!handle.state().active);
    assert!((out.read() - target).abs().max_element() < 0.001);

    // A new target wakes the loop again.
    handle.pointer_moved(sample(500.0, 500.0));
    assert_eq!(frames.pending_count(), 1);
    assert!(handle.state().active);
}

#[test]
fn burst_of_moves_schedules_one_step() {
    let (frames, handle) = start(DriverMode::Pointer);
    for i in 0..25 {
        handle.pointer_moved(sample(10.0 * i as f32, 990.0 - 10.0 * i as f32));
    }
    assert_eq!(frames.pending_count(), 1);
    // Only the latest target matters for the frame.
    assert_eq!(handle.state().target, pointer_target(sample(240.0, 750.0)).unwrap());
    assert_eq!(frames.run_frame(), 1);
    assert_eq!(handle.output().publish_count(), 1);
    assert_eq!(frames.pending_count(), 1);
}

#[test]
fn subscribers_receive_every_published_value() {
    let (frames, handle) = start(DriverMode::Pointer);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = seen.clone();
    let _sub = handle.output().subscribe(move |v| s.borrow_mut().push(v));
    handle.pointer_moved(sample(1000.0, 1000.0));
    frames.run_frame();
    frames.run_frame();
    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert!((seen[0].x - 0.04).abs() < 1e-6);
    assert!(seen[1].x > seen[0].x);
    assert_eq!(*seen.last().unwrap(), handle.output().read());
}

#[test]
fn dispose_cancels_pending_work_and_runs_teardown_once() {
    let (frames, handle) = start(DriverMode::PointerWithDrift);
    let removed = Rc::new(Cell::new(0));
    let r = removed.clone();
    handle.on_teardown(move || r.set(r.get() + 1));
    frames.run_frame();
    assert!(frames.pending_count() >= 1);

    handle.dispose();
    handle.dispose();
    assert!(handle.is_disposed());
    assert!(!handle.is_drifting());
    assert!(frames.is_idle());
    assert_eq!(removed.get(), 1);

    let late = Rc::new(Cell::new(false));
    let l = late.clone();
    handle.on_teardown(move || l.set(true));
    assert!(late.get(), "teardown registered after disposal runs at once");
}

#[test]
fn no_writes_after_teardown_even_from_late_callbacks() {
    let frames = Rc::new(LateFrames::default());
    let handle = ParallaxDriver::start(DriverMode::PointerWithDrift, frames.clone());
    let out = handle.output();
    let writes = Rc::new(Cell::new(0u32));
    let w = writes.clone();
    let _sub = out.subscribe(move |_| w.set(w.get() + 1));

    frames.0.run_frame(); // drift tick, arms easing
    handle.pointer_moved(sample(100.0, 100.0));
    assert!(frames.0.pending_count() >= 2);
    let before = out.publish_count();

    handle.dispose();
    // Late pointer event and late frame callbacks after unmount.
    handle.pointer_moved(sample(900.0, 900.0));
    for _ in 0..5 {
        frames.0.run_frame();
    }
    assert_eq!(out.publish_count(), before);
    assert_eq!(writes.get() as u64, before);
    assert!(frames.0.is_idle(), "late callbacks must not reschedule");
}

#[test]
fn dropping_the_handle_disposes() {
    let frames = Rc::new(ManualFrames::new());
    let removed = Rc::new(Cell::new(false));
    {
        let handle = ParallaxDriver::start(DriverMode::PointerWithDrift, frames.clone());
        let r = removed.clone();
        handle.on_teardown(move || r.set(true));
        assert_eq!(frames.pending_count(), 1);
    }
    assert!(removed.get());
    assert!(frames.is_idle());
}

#[test]
fn drift_first_tick_matches_formula() {
    let (frames, handle) = start(DriverMode::PointerWithDrift);
    assert_eq!(handle.mode(), DriverMode::PointerWithDrift);
    assert!(handle.is_drifting());
    frames.run_frame();
    let expected = Vec2::new(
        0.005f64.sin() as f32 * 0.15,
        (0.005f64 * 0.9).cos() as f32 * 0.12,
    );
    assert_eq!(handle.state().target, expected);
    assert!((handle.state().target.y as f64 - 0.0045f64.cos() * 0.12).abs() < 1e-6);
    // Drift tick armed exactly one easing step next to its own next tick.
    assert_eq!(frames.pending_count(), 2);

    let mut drift = Drift::default();
    assert_eq!(drift.tick(), expected);
}

#[test]
fn drift_keeps_easing_alive() {
    let (frames, handle) = start(DriverMode::PointerWithDrift);
    for _ in 0..600 {
        frames.run_frame();
        assert!(frames.pending_count() <= 2);
    }
    assert!(handle.is_drifting());
    assert!(handle.state().active, "easing never idles while drifting");
    let t = handle.state().target;
    assert!(t.x.abs() <= DRIFT_AMPLITUDE_X && t.y.abs() <= DRIFT_AMPLITUDE_Y);
    assert!(handle.output().publish_count() >= 598);
}

#[test]
fn pointer_moves_still_steer_while_drifting() {
    let (frames, handle) = start(DriverMode::PointerWithDrift);
    frames.run_frame();
    handle.pointer_moved(sample(0.0, 0.0));
    assert_eq!(handle.state().target, Vec2::new(-0.5, -0.5));
    assert_eq!(frames.pending_count(), 2);
}

#[test]
fn headless_scheduler_makes_driver_inert() {
    let handle = ParallaxDriver::start(DriverMode::PointerWithDrift, Rc::new(NoFrames));
    assert!(!handle.is_drifting());
    handle.pointer_moved(sample(900.0, 900.0));
    assert!(!handle.state().active);
    assert_eq!(handle.output().publish_count(), 0);
    handle.dispose();
}

#[test]
fn degenerate_viewport_is_ignored() {
    let (frames, handle) = start(DriverMode::Pointer);
    handle.pointer_moved(PointerSample {
        client_x: 10.0,
        client_y: 10.0,
        viewport_width: 0.0,
        viewport_height: 0.0,
    });
    assert!(frames.is_idle());
    assert_eq!(handle.state().target, Vec2::ZERO);
}

#[test]
fn pointer_input_goes_quiet_after_teardown() {
    let (frames, handle) = start(DriverMode::Pointer);
    let input = handle.pointer_input();
    input.send(sample(700.0, 300.0));
    assert_eq!(frames.pending_count(), 1);
    drop(handle);
    assert!(frames.is_idle());
    input.send(sample(100.0, 100.0));
    assert!(frames.is_idle());
}

#[test]
fn drift_keeps_exact_steps_after_long_sessions() {
    // 216_000 frames per hour at 60 Hz.
    for hours in [1.0f64, 24.0, 60.0, 130.0, 1000.0] {
        let start = hours * 216_000.0 * DRIFT_PHASE_STEP;
        let mut drift = Drift { phase: start };
        let a = drift.tick();
        let p1 = drift.phase;
        let b = drift.tick();
        let p2 = drift.phase;
        assert!(p1 >= 0.0 && p1 < DRIFT_PHASE_PERIOD, "hours={hours} phase={p1}");
        let step = (p2 - p1).rem_euclid(DRIFT_PHASE_PERIOD);
        assert!((step - 0.005).abs() < 1e-9, "hours={hours} step={step}");
        assert_ne!(a.x, b.x, "hours={hours}: x stalled");
        assert_ne!(a.y, b.y, "hours={hours}: y stalled");

        // Same point on the path as the unwrapped formula.
        let exact = start + 0.005;
        assert!((a.x - (exact.sin() as f32 * 0.15)).abs() < 1e-5);
        assert!((a.y - ((exact * 0.9).cos() as f32 * 0.12)).abs() < 1e-5);
    }
}

#[test]
fn drift_phase_after_an_hour_of_ticks_is_exact() {
    let mut drift = Drift::default();
    for _ in 0..216_000 {
        drift.tick();
    }
    let expected = 1080.0f64.rem_euclid(DRIFT_PHASE_PERIOD);
    assert!((drift.phase - expected).abs() < 1e-6, "phase={}", drift.phase);
}
