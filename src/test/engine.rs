use float_cmp::approx_eq;

use crate::mm1::{Engine, NullSink, ServerState, SimConfig, Snapshot, Termination};
use crate::sim::{EventKind, SimTime};
use crate::viz::SnapshotLogger;

fn cfg(horizon: Option<u64>, every: u64, seed: u64) -> SimConfig {
    SimConfig {
        horizon,
        snapshot_every: every,
        seed,
        ..SimConfig::default()
    }
}

fn run_logged(cfg: SimConfig) -> (Engine, SnapshotLogger) {
    let mut e = Engine::new(cfg).expect("engine");
    let mut log = SnapshotLogger::default();
    e.run(&mut log).expect("run");
    (e, log)
}

#[test]
fn first_event_is_an_arrival_into_an_idle_system_with_zero_wait() {
    let (e, log) = run_logged(cfg(Some(1), 1, 42));

    let first = &log.snapshots[0];
    assert_eq!(first.event, Some(EventKind::Arrival));
    assert_eq!(first.server_state, ServerState::Busy);
    assert_eq!(first.queue_length, 0);
    assert_eq!(first.avg_wait, 0.0);
    assert!(e.world().stats().n_started >= 1);

    assert_eq!(e.termination(), Some(Termination::Horizon));
    assert_eq!(e.world().stats().n_served, 1);
    // 一个到达、一个离开，期间从未有人排队
    assert_eq!(e.simulator().dispatched(), 2);
    assert_eq!(log.len(), 2);
    assert_eq!(e.summary().time_avg_queue, 0.0);
    assert_eq!(e.world().stats().area_q, 0.0);
    assert_eq!(log.last().and_then(|s| s.event), Some(EventKind::Departure));
}

#[test]
fn invariants_hold_after_every_event() {
    let mut e = Engine::new(cfg(Some(2_000), 1, 7)).expect("engine");
    let mut prev = SimTime::ZERO;
    let mut prev_total_wait = 0.0;

    while let Some(ev) = e.step(&mut NullSink).expect("step") {
        let sim = e.simulator();
        let world = e.world();
        let stats = world.stats();

        // 时钟单调不减，且等于刚分发事件的时间
        assert!(sim.now() >= prev);
        assert_eq!(sim.now(), ev.time);
        prev = sim.now();

        // 系统内顾客数 = 到达数 - 离开数
        assert_eq!(world.in_system() as u64, stats.n_arrivals - stats.n_served);

        // Busy ⇔ 有离开事件待执行
        assert_eq!(
            world.server().is_busy(),
            !sim.pending(EventKind::Departure).is_never()
        );
        // 到达流永不耗尽
        assert!(!sim.pending(EventKind::Arrival).is_never());

        // 开始服务数 = 离开数 + 正在服务数
        assert_eq!(
            stats.n_started,
            stats.n_served + world.server().in_service() as u64
        );
        if world.server() == ServerState::Idle {
            assert!(world.line().is_empty());
            assert_eq!(stats.n_started, stats.n_served);
        }

        // 等待时间只增不减（每次记录都非负）
        assert!(stats.total_wait >= prev_total_wait);
        prev_total_wait = stats.total_wait;
    }
    assert_eq!(e.termination(), Some(Termination::Horizon));
    assert_eq!(e.world().stats().n_served, 2_000);
}

#[test]
fn incremental_queue_area_matches_reconstructed_step_function() {
    let (e, log) = run_logged(cfg(Some(3_000), 1, 11));

    // 用每个事件后的 (clock, queue_length) 重建 Q(t) 的阶梯函数并积分
    let mut area = 0.0;
    let (mut t_prev, mut q_prev) = (0.0, 0usize);
    for s in &log.snapshots {
        area += q_prev as f64 * (s.clock - t_prev);
        t_prev = s.clock;
        q_prev = s.queue_length;
    }

    let stats = e.world().stats();
    assert!(approx_eq!(f64, stats.area_q, area, epsilon = 1e-9));
    assert!(approx_eq!(
        f64,
        e.summary().time_avg_queue,
        area / t_prev,
        epsilon = 1e-12
    ));
    assert_eq!(log.len() as u64, e.simulator().dispatched());
}

#[test]
fn customers_in_system_is_conserved_in_every_snapshot() {
    let (_, log) = run_logged(cfg(Some(1_000), 1, 3));
    for s in &log.snapshots {
        let in_service = u64::from(s.server_state == ServerState::Busy);
        assert_eq!(s.queue_length as u64 + in_service, s.n_arrivals - s.n_served);
        assert!(s.avg_wait >= 0.0);
        assert!(s.time_avg_queue >= 0.0);
        assert!((0.0..=1.0).contains(&s.utilization));
    }
}

#[test]
fn identical_seed_and_parameters_give_identical_runs() {
    let trace = |log: &SnapshotLogger| -> Vec<(u64, Option<EventKind>)> {
        log.snapshots
            .iter()
            .map(|s| (s.clock.to_bits(), s.event))
            .collect()
    };

    let (a, log_a) = run_logged(cfg(Some(500), 1, 99));
    let (b, log_b) = run_logged(cfg(Some(500), 1, 99));
    assert_eq!(trace(&log_a), trace(&log_b));
    assert_eq!(a.summary(), b.summary());
    assert_eq!(
        a.summary().avg_wait.to_bits(),
        b.summary().avg_wait.to_bits()
    );

    let (c, _) = run_logged(cfg(Some(500), 1, 100));
    assert_ne!(a.summary(), c.summary());
}

#[test]
fn snapshot_cadence_never_changes_statistics() {
    let (every_event, log_1) = run_logged(cfg(Some(400), 1, 5));
    let (every_seventh, log_7) = run_logged(cfg(Some(400), 7, 5));

    assert_eq!(every_event.summary(), every_seventh.summary());

    let events = every_event.simulator().dispatched();
    assert_eq!(log_1.len() as u64, events);
    assert_eq!(log_7.len() as u64, events.div_ceil(7));
    // 最后一个快照总是反映终止时的状态
    assert_eq!(log_7.last(), log_1.last());
    assert_eq!(log_7.last(), Some(&every_seventh.snapshot()));
}

#[test]
fn final_snapshot_is_emitted_even_when_cadence_skips_it() {
    let (e, log) = run_logged(cfg(Some(3), 1_000, 42));
    assert_eq!(log.len(), 1);
    let last: &Snapshot = log.last().expect("final snapshot");
    assert_eq!(last.n_served, 3);
    assert_eq!(last, &e.snapshot());
}

#[test]
fn zero_horizon_terminates_before_any_event() {
    let (e, log) = run_logged(cfg(Some(0), 1, 42));
    assert_eq!(e.termination(), Some(Termination::Horizon));
    assert_eq!(e.simulator().dispatched(), 0);
    assert_eq!(e.simulator().now(), SimTime::ZERO);
    assert!(log.is_empty());
}

#[test]
fn stop_handle_ends_an_unbounded_run_between_events() {
    let mut e = Engine::new(cfg(None, 10, 42)).expect("engine");
    let stop = e.stop_handle();
    let mut log = SnapshotLogger::default();

    let summary = e
        .run_with(&mut log, |e| {
            if e.simulator().dispatched() == 250 {
                stop.stop();
            }
        })
        .expect("run");

    assert_eq!(summary.termination, Some(Termination::Stopped));
    assert_eq!(summary.events, 250);
    assert_eq!(log.len(), 25);

    // 终止后不再推进
    assert_eq!(e.step(&mut log).expect("step"), None);
    assert_eq!(e.simulator().dispatched(), 250);
}

#[test]
fn stop_before_first_step_processes_nothing() {
    let mut e = Engine::new(cfg(None, 1, 42)).expect("engine");
    e.stop_handle().stop();
    let summary = e.run(&mut NullSink).expect("run");
    assert_eq!(summary.termination, Some(Termination::Stopped));
    assert_eq!(summary.events, 0);
    assert_eq!(summary.n_arrivals, 0);
}

#[test]
fn long_run_approaches_mm1_steady_state() {
    // λ = 0.5, μ = 1 → ρ = 0.5, Wq = ρ/(μ-λ) = 1, Lq = ρ²/(1-ρ) = 0.5
    let mut e = Engine::new(cfg(Some(100_000), 1_000, 2024)).expect("engine");
    let summary = e.run(&mut NullSink).expect("run");

    assert!((summary.utilization - 0.5).abs() < 0.03, "{summary:?}");
    assert!((summary.avg_wait - 1.0).abs() < 0.2, "{summary:?}");
    assert!((summary.time_avg_queue - 0.5).abs() < 0.1, "{summary:?}");
    assert!(summary.max_wait >= summary.avg_wait);
}
