use crate::error::SimError;
use crate::sim::{Event, EventKind, SimTime, Simulator, World};

/// 记录每次分发与时钟推进的测试世界
#[derive(Default)]
struct RecordingWorld {
    log: Vec<(EventKind, SimTime)>,
    elapsed: Vec<f64>,
    ticks: usize,
    /// 每次到达后，在当前时刻之后这么久再调度一个到达
    rearm: Option<f64>,
}

impl World for RecordingWorld {
    fn on_advance(&mut self, elapsed: f64) {
        self.elapsed.push(elapsed);
    }

    fn handle(&mut self, ev: Event, sim: &mut Simulator) -> Result<(), SimError> {
        assert_eq!(sim.now(), ev.time);
        self.log.push((ev.kind, ev.time));
        if let (EventKind::Arrival, Some(gap)) = (ev.kind, self.rearm) {
            sim.schedule_in(EventKind::Arrival, gap)?;
        }
        Ok(())
    }

    fn on_tick(&mut self, _sim: &Simulator) {
        self.ticks = self.ticks.saturating_add(1);
    }
}

#[test]
fn step_advances_clock_to_each_event_and_reports_elapsed() {
    let mut sim = Simulator::default();
    sim.schedule(EventKind::Departure, SimTime(2.5)).expect("schedule");
    sim.schedule(EventKind::Arrival, SimTime(1.0)).expect("schedule");

    let mut world = RecordingWorld::default();
    assert!(sim.step(&mut world).expect("step").is_some());
    assert_eq!(sim.now(), SimTime(1.0));
    assert!(sim.step(&mut world).expect("step").is_some());
    assert_eq!(sim.now(), SimTime(2.5));
    assert_eq!(sim.step(&mut world).expect("step"), None);

    assert_eq!(
        world.log,
        vec![
            (EventKind::Arrival, SimTime(1.0)),
            (EventKind::Departure, SimTime(2.5))
        ]
    );
    assert_eq!(world.elapsed, vec![1.0, 1.5]);
    assert_eq!(world.ticks, 2);
    assert_eq!(sim.dispatched(), 2);
}

#[test]
fn event_scheduled_at_now_inside_handler_runs_next() {
    let mut sim = Simulator::default();
    sim.schedule(EventKind::Arrival, SimTime::ZERO).expect("schedule");

    let mut world = RecordingWorld {
        rearm: Some(0.0),
        ..Default::default()
    };
    sim.step(&mut world).expect("step");
    sim.step(&mut world).expect("step");

    assert_eq!(
        world.log,
        vec![
            (EventKind::Arrival, SimTime::ZERO),
            (EventKind::Arrival, SimTime::ZERO)
        ]
    );
    assert_eq!(sim.now(), SimTime::ZERO);
    assert_eq!(world.elapsed, vec![0.0, 0.0]);
}

#[test]
fn event_in_the_past_is_a_clock_regression() {
    let mut sim = Simulator::default();
    sim.schedule(EventKind::Arrival, SimTime(3.0)).expect("schedule");
    let mut world = RecordingWorld::default();
    sim.step(&mut world).expect("step");

    sim.schedule(EventKind::Departure, SimTime(2.0)).expect("schedule");
    let err = sim.step(&mut world).expect_err("regression");
    assert_eq!(
        err,
        SimError::ClockRegression {
            now: SimTime(3.0),
            at: SimTime(2.0)
        }
    );
    // 时钟不倒退，世界也没有被通知
    assert_eq!(sim.now(), SimTime(3.0));
    assert_eq!(world.log.len(), 1);
    assert_eq!(world.elapsed.len(), 1);
}

#[test]
fn run_until_stops_before_later_events_without_moving_clock_past_last_event() {
    let mut sim = Simulator::default();
    sim.schedule(EventKind::Arrival, SimTime(1.0)).expect("schedule");
    let mut world = RecordingWorld {
        rearm: Some(2.0),
        ..Default::default()
    };

    let ran = sim.run_until(SimTime(5.0), &mut world).expect("run");
    assert_eq!(ran, 3);
    assert_eq!(sim.now(), SimTime(5.0));

    let ran = sim.run_until(SimTime(6.5), &mut world).expect("run");
    assert_eq!(ran, 0);
    assert_eq!(sim.now(), SimTime(5.0));
    assert_eq!(sim.pending(EventKind::Arrival), SimTime(7.0));
}

#[test]
fn reschedule_cancel_and_peek_go_through_the_event_queue() {
    let mut sim = Simulator::default();
    assert!(!sim.has_pending());
    assert_eq!(sim.peek_next(), None);

    sim.schedule(EventKind::Arrival, SimTime(4.0)).expect("schedule");
    sim.schedule(EventKind::Departure, SimTime(6.0)).expect("schedule");
    assert!(sim.has_pending());

    assert_eq!(sim.reschedule(EventKind::Departure, SimTime(2.0)), Some(SimTime(6.0)));
    assert_eq!(
        sim.peek_next(),
        Some(Event {
            kind: EventKind::Departure,
            time: SimTime(2.0)
        })
    );
    // peek 不推进时钟
    assert_eq!(sim.now(), SimTime::ZERO);

    assert_eq!(sim.cancel(EventKind::Departure), Some(SimTime(2.0)));
    assert!(sim.pending(EventKind::Departure).is_never());

    let mut world = RecordingWorld::default();
    sim.step(&mut world).expect("step");
    assert_eq!(world.log, vec![(EventKind::Arrival, SimTime(4.0))]);
    assert!(!sim.has_pending());
    assert_eq!(sim.step(&mut world).expect("step"), None);
}
