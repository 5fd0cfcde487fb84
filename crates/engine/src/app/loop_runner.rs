use std::time::Duration;

use tracing::{debug, info, warn};

use super::scene::{Scene, SceneCommand};
use super::script::InputSource;

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub target_tps: u32,
    pub frame_dt: Duration,
    pub max_frame_delta: Duration,
    pub max_ticks_per_frame: u32,
    pub frame_count: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            target_tps: 50,
            frame_dt: Duration::from_micros(16_667),
            max_frame_delta: Duration::from_millis(250),
            max_ticks_per_frame: 5,
            frame_count: 600,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopSummary {
    pub frames_run: u32,
    pub ticks_run: u32,
    pub quit_requested: bool,
}

/// Runs `frame_count` frames without a window: each frame samples input, runs
/// the scene's frame step, then as many fixed steps as the accumulator allows.
pub fn run_headless(
    config: &LoopConfig,
    scene: &mut dyn Scene,
    input: &mut dyn InputSource,
) -> LoopSummary {
    let target_tps = config.target_tps.max(1);
    let fixed_dt = Duration::from_secs_f64(1.0 / target_tps as f64);
    let fixed_dt_seconds = fixed_dt.as_secs_f32();
    let max_frame_delta =
        normalize_non_zero_duration(config.max_frame_delta, Duration::from_millis(250));
    let max_ticks_per_frame = config.max_ticks_per_frame.max(1);
    let frame_dt = clamp_frame_delta(config.frame_dt, max_frame_delta);
    let frame_dt_seconds = frame_dt.as_secs_f32();

    info!(
        target_tps,
        frame_dt_ms = frame_dt.as_secs_f64() * 1000.0,
        max_ticks_per_frame,
        frame_count = config.frame_count,
        "loop_start"
    );

    let mut summary = LoopSummary::default();
    let mut accumulator = Duration::ZERO;
    for frame in 0..config.frame_count {
        let snapshot = input.next_snapshot();
        let command = scene.update(frame_dt_seconds, &snapshot);
        summary.frames_run = summary.frames_run.saturating_add(1);

        accumulator = accumulator.saturating_add(frame_dt);
        let step_plan = plan_sim_steps(accumulator, fixed_dt, max_ticks_per_frame);
        for _ in 0..step_plan.ticks_to_run {
            scene.fixed_update(fixed_dt_seconds);
        }
        summary.ticks_run = summary.ticks_run.saturating_add(step_plan.ticks_to_run);
        accumulator = step_plan.remaining_accumulator;

        if step_plan.dropped_backlog > Duration::ZERO {
            warn!(
                frame,
                dropped_backlog_ms = step_plan.dropped_backlog.as_secs_f64() * 1000.0,
                "sim_backlog_dropped"
            );
        }

        if command == SceneCommand::Quit {
            summary.quit_requested = true;
            info!(frame, "quit_requested");
            break;
        }
        if let Some(title) = scene.debug_title() {
            debug!(frame, title = title.as_str(), "frame_done");
        }
    }

    info!(
        frames_run = summary.frames_run,
        ticks_run = summary.ticks_run,
        "loop_end"
    );
    summary
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPlan {
    pub ticks_to_run: u32,
    pub remaining_accumulator: Duration,
    pub dropped_backlog: Duration,
}

pub fn plan_sim_steps(
    mut accumulator: Duration,
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
) -> StepPlan {
    let mut ticks_to_run = 0u32;

    while accumulator >= fixed_dt && ticks_to_run < max_ticks_per_frame {
        accumulator = accumulator.saturating_sub(fixed_dt);
        ticks_to_run = ticks_to_run.saturating_add(1);
    }

    if accumulator >= fixed_dt {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: Duration::ZERO,
            dropped_backlog: accumulator,
        }
    } else {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: accumulator,
            dropped_backlog: Duration::ZERO,
        }
    }
}

fn clamp_frame_delta(frame_dt: Duration, max_frame_delta: Duration) -> Duration {
    frame_dt.min(max_frame_delta)
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}
