use super::*;
use crate::control::cancel::CancellationSource;
use crate::control::playback::PlaybackControl;
use std::time::Instant;

#[test]
fn delay_is_strictly_decreasing_and_bounded() {
    for curve in [DelayCurve::new(1000, 50), DelayCurve::new(800, 50)] {
        assert_eq!(curve.delay(0), curve.slowest());
        assert_eq!(curve.delay(100), curve.fastest());
        for speed in 0..100u8 {
            assert!(curve.delay(speed) > curve.delay(speed + 1), "speed {speed}");
        }
        assert_eq!(curve.delay(255), curve.fastest());
    }
}

#[test]
fn detached_stepper_records_in_order() {
    let mut rec: Recorder<i32> = Recorder::new();
    let mut stepper = Stepper::detached(&mut rec);
    stepper.emit(1).unwrap();
    stepper.emit_beat(2, Beat::Half).unwrap();
    stepper.idle(Beat::Brief).unwrap();
    assert_eq!(stepper.emitted(), 2);
    assert_eq!(rec.snapshots, vec![1, 2]);
}

#[test]
fn cancelled_stepper_refuses_to_emit() {
    let source = CancellationSource::new();
    let pacer = Pacer::new(PlaybackView::always_running(), source.token())
        .with_pacing(Pacing::Unpaced);
    let mut rec: Recorder<i32> = Recorder::new();
    let mut stepper = Stepper::new(&mut rec, pacer);
    stepper.emit(1).unwrap();
    source.cancel();
    assert_eq!(stepper.emit(2), Err(Halt::Cancelled));
    assert_eq!(rec.snapshots, vec![1]);
}

#[test]
fn paused_stepper_waits_until_resumed() {
    let control = PlaybackControl::new(100);
    control.pause();
    let pacer = Pacer::new(control.view(), CancellationToken::never())
        .with_pacing(Pacing::Unpaced)
        .with_poll_interval(Duration::from_millis(2));

    let resumer = {
        let control = control.clone();
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(30));
            control.resume();
        })
    };

    let start = Instant::now();
    pacer.step(Beat::Full).unwrap();
    assert!(start.elapsed() >= Duration::from_millis(25));
    resumer.join().unwrap();
}

#[test]
fn cancel_wakes_a_paused_stepper() {
    let control = PlaybackControl::new(100);
    control.pause();
    let source = CancellationSource::new();
    let pacer = Pacer::new(control.view(), source.token())
        .with_poll_interval(Duration::from_secs(5));

    let waiter = std::thread::spawn(move || pacer.await_resumed());
    std::thread::sleep(Duration::from_millis(20));
    source.cancel();
    assert_eq!(waiter.join().unwrap(), Err(Halt::Cancelled));
}

#[test]
fn realtime_step_sleeps_for_the_curve_delay() {
    let control = PlaybackControl::new(100);
    let pacer = Pacer::new(control.view(), CancellationToken::never())
        .with_curve(DelayCurve::new(200, 20));
    let start = Instant::now();
    pacer.step(Beat::Full).unwrap();
    assert!(start.elapsed() >= Duration::from_millis(20));
}
