//! Headless frame loop standing in for a display-driven renderer.

use std::time::Duration;

use osc_sim::{AutoFinalize, FinalizeOutcome, SimulationEngine, TickOutcome};
use tracing::{debug, warn};

/// How a scripted run is driven.
#[derive(Debug, Clone)]
pub struct Script {
    pub ticks: usize,
    pub frame: Duration,
    /// Tick at which the run is paused, if any.
    pub pause_at: Option<usize>,
    /// Frames spent paused before resuming.
    pub pause_frames: usize,
}

/// Outcome of a scripted run.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub frames: usize,
    pub advanced: usize,
    pub samples: usize,
    /// Set when the timeout policy ended the run early.
    pub auto_finalized: Option<FinalizeOutcome>,
}

/// Start a run and feed it frames until the script ends or the timeout fires.
///
/// The run is left in progress so the caller decides whether to finalize.
pub fn drive(
    engine: &mut SimulationEngine,
    script: &Script,
    mut timeout: Option<&mut AutoFinalize>,
) -> osc_sim::OscResult<Report> {
    engine.start()?;
    let mut report = Report::default();

    let mut advanced = 0;
    let mut paused_frames = 0;
    while advanced < script.ticks {
        if script.pause_at == Some(advanced) && paused_frames == 0 && script.pause_frames > 0 {
            engine.pause()?;
        }
        if engine.state() == osc_sim::RunState::Paused {
            paused_frames += 1;
            if paused_frames > script.pause_frames {
                engine.resume()?;
            }
        }

        report.frames += 1;
        match engine.tick(script.frame) {
            TickOutcome::Advanced { sampled, .. } => {
                advanced += 1;
                if sampled {
                    report.samples += 1;
                }
            }
            TickOutcome::Paused => {}
            TickOutcome::Idle => break,
            TickOutcome::Stalled { time, .. } => {
                warn!(time, "run stalled; ending script early");
                break;
            }
        }

        if let Some(policy) = timeout.as_deref_mut() {
            if let Some(outcome) = policy.poll(engine, script.frame) {
                report.auto_finalized = Some(outcome);
                break;
            }
        }
    }
    report.advanced = advanced;
    debug!(?report, "script finished");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use osc_sim::RunState;

    fn script(ticks: usize) -> Script {
        Script {
            ticks,
            frame: Duration::from_millis(16),
            pause_at: None,
            pause_frames: 0,
        }
    }

    #[test]
    fn runs_requested_ticks() {
        let mut engine = SimulationEngine::default();
        let report = drive(&mut engine, &script(30), None).unwrap();
        assert_eq!(report.advanced, 30);
        assert_eq!(report.frames, 30);
        assert_eq!(report.samples, 30);
        assert_eq!(engine.state(), RunState::Running);
    }

    #[test]
    fn pause_holds_clock() {
        let mut engine = SimulationEngine::default();
        let s = Script {
            pause_at: Some(10),
            pause_frames: 5,
            ..script(20)
        };
        let report = drive(&mut engine, &s, None).unwrap();
        assert_eq!(report.advanced, 20);
        assert_eq!(report.frames, 25);
        assert!((engine.virtual_time() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn timeout_cuts_run_short() {
        let mut engine = SimulationEngine::default();
        let mut policy = AutoFinalize::new(Duration::from_millis(160));
        let report = drive(&mut engine, &script(100), Some(&mut policy)).unwrap();
        assert_eq!(report.advanced, 10);
        assert!(report.auto_finalized.unwrap().archived());
        assert_eq!(engine.state(), RunState::Idle);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn refuses_to_start_twice() {
        let mut engine = SimulationEngine::default();
        engine.start().unwrap();
        assert!(drive(&mut engine, &script(1), None).is_err());
    }
}
