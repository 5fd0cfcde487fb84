mod input;
mod loop_runner;
mod scene;
mod script;

pub use input::{ActionStates, InputAction, InputEdgeTracker};
pub use loop_runner::{plan_sim_steps, run_headless, LoopConfig, LoopSummary, StepPlan};
pub use scene::{EntityId, InputSnapshot, Scene, SceneCommand};
pub use script::{InputScript, InputSource, RawInputSample, ScriptError, ScriptedInput};
