use super::*;
use crate::geometry::figure::FillRule;
use std::time::Duration;

fn recorder() -> (RedrawHook, Arc<Mutex<Vec<f64>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let hook: RedrawHook = Arc::new(move |o| sink.lock().unwrap().push(o));
    (hook, seen)
}

fn geometry() -> Arc<Geometry> {
    Arc::new(Geometry::new(FillRule::EvenOdd))
}

#[test]
fn manual_ticks_ramp_to_one_and_drop_previous() {
    let (hook, seen) = recorder();
    let mut c = TransitionController::manual(RampOpts::default(), hook);
    assert_eq!(c.tick(), None);

    c.on_new_geometry(geometry());
    c.on_new_geometry(geometry());
    assert!(c.previous().is_some());

    let mut steps = 0;
    while let Some(step) = c.tick() {
        steps += 1;
        if step == RampStep::Completed {
            break;
        }
    }
    assert_eq!(steps, 10);
    assert_eq!(c.tick(), None);
    assert!(c.previous().is_none());
    assert_eq!(c.current().unwrap().opacity, 1.0);
    assert!(c.is_settled());

    let seen = seen.lock().unwrap();
    assert!(seen.windows(2).all(|w| w[1] > w[0]), "{seen:?}");
    assert_eq!(*seen.last().unwrap(), 1.0);
}

#[test]
fn cancel_settles_on_current_frame() {
    let (hook, _) = recorder();
    let mut c = TransitionController::manual(RampOpts::default(), hook);
    c.on_new_geometry(geometry());
    c.on_new_geometry(geometry());
    c.tick();
    c.cancel();
    assert!(c.previous().is_none());
    assert_eq!(c.current().unwrap().opacity, 1.0);
    assert_eq!(c.tick(), None);
}

#[test]
fn detach_clears_everything() {
    let (hook, _) = recorder();
    let mut c = TransitionController::manual(RampOpts::default(), hook);
    c.on_new_geometry(geometry());
    c.on_new_geometry(geometry());
    c.detach();
    assert_eq!(c.frames(), (None, None));
    assert_eq!(c.tick(), None);
}

#[tokio::test(start_paused = true)]
async fn spawned_ramp_completes_on_timer() {
    let (hook, seen) = recorder();
    let mut c = TransitionController::new(RampOpts::default(), hook);
    c.on_new_geometry(geometry());
    c.on_new_geometry(geometry());
    assert!(c.is_ramping());

    tokio::time::sleep(Duration::from_millis(1_000)).await;

    assert!(!c.is_ramping());
    assert!(c.previous().is_none());
    assert_eq!(c.current().unwrap().opacity, 1.0);
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 10);
    assert!(seen.windows(2).all(|w| w[1] > w[0]), "{seen:?}");
}

#[tokio::test(start_paused = true)]
async fn new_geometry_mid_ramp_restarts_from_zero() {
    let (hook, seen) = recorder();
    let mut c = TransitionController::new(RampOpts::default(), hook);
    let first = geometry();
    c.on_new_geometry(first.clone());

    tokio::time::sleep(Duration::from_millis(65)).await;
    let mid = c.current().unwrap().opacity;
    assert!(mid > 0.0 && mid < 1.0, "{mid}");

    let second = geometry();
    c.on_new_geometry(second.clone());
    let (prev, cur) = c.frames();
    assert!(Arc::ptr_eq(&prev.unwrap().geometry, &first));
    let cur = cur.unwrap();
    assert!(Arc::ptr_eq(&cur.geometry, &second));
    assert_eq!(cur.opacity, 0.0);

    let before_restart = seen.lock().unwrap().len();
    tokio::time::sleep(Duration::from_millis(1_000)).await;

    assert!(c.is_settled());
    assert!(c.previous().is_none());
    let seen = seen.lock().unwrap();
    let restarted = &seen[before_restart..];
    assert_eq!(restarted.first().copied(), Some(0.1));
    assert!(restarted.windows(2).all(|w| w[1] > w[0]), "{restarted:?}");
    assert_eq!(restarted.len(), 10);
}

#[tokio::test(start_paused = true)]
async fn detach_stops_the_running_task() {
    let (hook, seen) = recorder();
    let mut c = TransitionController::new(RampOpts::default(), hook);
    c.on_new_geometry(geometry());
    tokio::time::sleep(Duration::from_millis(45)).await;
    c.detach();
    let count = seen.lock().unwrap().len();
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(seen.lock().unwrap().len(), count);
    assert_eq!(c.frames(), (None, None));
}

#[tokio::test(start_paused = true)]
async fn tick_is_a_no_op_while_a_task_owns_the_ramp() {
    let (hook, seen) = recorder();
    let mut c = TransitionController::new(RampOpts::default(), hook);
    c.on_new_geometry(geometry());
    tokio::time::sleep(Duration::from_millis(15)).await;

    let before = c.current().unwrap().opacity;
    assert_eq!(c.tick(), None);
    assert_eq!(c.current().unwrap().opacity, before);

    tokio::time::sleep(Duration::from_millis(1_000)).await;
    assert_eq!(seen.lock().unwrap().len(), 10);
}

#[test]
fn restart_before_first_tick_keeps_an_opaque_backdrop() {
    let (hook, _) = recorder();
    let mut c = TransitionController::manual(RampOpts::default(), hook);
    c.on_new_geometry(geometry());
    c.on_new_geometry(geometry());
    c.on_new_geometry(geometry());
    let (prev, cur) = c.frames();
    assert_eq!(prev.unwrap().opacity, 1.0);
    assert_eq!(cur.unwrap().opacity, 0.0);
}
