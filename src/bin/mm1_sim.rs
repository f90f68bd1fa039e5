//! M/M/1 单服务台排队仿真
//!
//! 运行到服务完指定数量的顾客，或无限运行直到外部停止（事件数上限 / 墙钟计时）。

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::Parser;
use mm1_des::mm1::{Engine, SimConfig, Snapshot, SnapshotSink};
use mm1_des::viz::{ChannelSink, SnapshotLogger};
use tracing::{error, info, warn};

#[derive(Debug, Parser)]
#[command(name = "mm1_sim", about = "单服务台 FIFO 离散事件仿真（M/M/1）")]
struct Args {
    /// JSON 配置文件；命令行参数会覆盖其中的字段
    #[arg(long)]
    config: Option<PathBuf>,
    /// 平均到达间隔
    #[arg(long)]
    interarrival_mean: Option<f64>,
    /// 平均服务时长
    #[arg(long)]
    service_mean: Option<f64>,
    #[arg(long)]
    seed: Option<u64>,
    /// 服务完多少位顾客后停止；不给则无限运行
    #[arg(long)]
    customers: Option<u64>,
    /// 每多少个事件发出一次快照
    #[arg(long)]
    every: Option<u64>,
    /// 执行多少个事件后停止（无限运行时的外部停止条件）
    #[arg(long)]
    max_events: Option<u64>,
    /// 墙钟运行多少秒后停止
    #[arg(long)]
    wall_secs: Option<f64>,
    /// 两次迭代之间的墙钟延迟（毫秒），用于放慢动画
    #[arg(long, default_value_t = 0)]
    pace_ms: u64,
    /// 在独立线程中逐条打印快照
    #[arg(long)]
    live: bool,
    /// 把所有快照写成 JSON 数组
    #[arg(long)]
    viz_json: Option<PathBuf>,
    /// 以 JSON 输出最终汇总
    #[arg(long)]
    json: bool,
}

fn load_config(args: &Args) -> Result<SimConfig, String> {
    let mut cfg = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|e| format!("read config {}: {e}", path.display()))?;
            serde_json::from_str::<SimConfig>(&raw)
                .map_err(|e| format!("parse config {}: {e}", path.display()))?
        }
        None => SimConfig::default(),
    };
    if let Some(v) = args.interarrival_mean {
        cfg.interarrival_mean = v;
    }
    if let Some(v) = args.service_mean {
        cfg.service_mean = v;
    }
    if let Some(v) = args.seed {
        cfg.seed = v;
    }
    if args.customers.is_some() {
        cfg.horizon = args.customers;
    }
    if let Some(v) = args.every {
        cfg.snapshot_every = v;
    }
    Ok(cfg)
}

fn dashboard_line(s: &Snapshot) -> String {
    format!(
        "t={:10.3} arrivals={:6} served={:6} queue={:3} server={:?} avg_wait={:8.3} time_avg_q={:8.3}",
        s.clock,
        s.n_arrivals,
        s.n_served,
        s.queue_length,
        s.server_state,
        s.avg_wait,
        s.time_avg_queue
    )
}

fn main() -> ExitCode {
    // 初始化 tracing（写到 stderr，stdout 留给结果）
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    let cfg = match load_config(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut engine = match Engine::new(cfg) {
        Ok(engine) => engine,
        Err(e) => {
            error!(error = %e, "无法构造仿真引擎");
            return ExitCode::FAILURE;
        }
    };

    if engine.config().horizon.is_none() && args.max_events.is_none() && args.wall_secs.is_none()
    {
        warn!("未设置停止条件，仿真将一直运行直到进程被终止");
    }

    let stop = engine.stop_handle();
    if let Some(secs) = args.wall_secs {
        let stop = stop.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_secs_f64(secs.max(0.0)));
            stop.stop();
        });
    }

    let mut logger = args.viz_json.as_ref().map(|_| SnapshotLogger::default());
    let (mut live_tx, printer) = if args.live {
        let (tx, rx) = ChannelSink::new();
        let printer = thread::spawn(move || {
            for snap in rx {
                println!("{}", dashboard_line(&snap));
            }
        });
        (Some(tx), Some(printer))
    } else {
        (None, None)
    };

    let mut sink = |snap: Snapshot| {
        if let Some(l) = logger.as_mut() {
            l.emit(snap.clone());
        }
        if let Some(tx) = live_tx.as_mut() {
            tx.emit(snap);
        }
    };

    let pace = Duration::from_millis(args.pace_ms);
    let max_events = args.max_events;
    let result = engine.run_with(&mut sink, |e| {
        if max_events.is_some_and(|n| e.simulator().dispatched() >= n) {
            stop.stop();
        }
        if !pace.is_zero() {
            thread::sleep(pace);
        }
    });

    // 关闭通道，等打印线程把剩余快照输出完
    drop(live_tx);
    if let Some(printer) = printer {
        let _ = printer.join();
    }

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            error!(error = %e, "仿真中止");
            return ExitCode::FAILURE;
        }
    };

    if let (Some(path), Some(logger)) = (&args.viz_json, &logger) {
        let written = logger
            .to_json()
            .map_err(|e| e.to_string())
            .and_then(|json| fs::write(path, json).map_err(|e| e.to_string()));
        match written {
            Ok(()) => info!(path = %path.display(), snapshots = logger.len(), "快照已写出"),
            Err(e) => {
                error!(path = %path.display(), "写出快照失败: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    if args.json {
        match serde_json::to_string(&summary) {
            Ok(line) => println!("{line}"),
            Err(e) => {
                error!("序列化汇总失败: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!(
            "done @ t={:.3}, arrivals={}, served={}, avg_wait={:.4}, time_avg_q={:.4}, utilization={:.4}",
            summary.clock,
            summary.n_arrivals,
            summary.n_served,
            summary.avg_wait,
            summary.time_avg_queue,
            summary.utilization
        );
    }
    ExitCode::SUCCESS
}
