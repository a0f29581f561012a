//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::Serialize;

use crate::config::PlayerConfig;
use crate::error::Result;
use crate::playback::{
    HeadlessAudio, HeadlessControl, PlaybackController, PlaybackEvent, PlaybackSnapshot,
    ResourceCommand, Transition,
};

/// One replayed event and what came of it.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationStep {
    pub event: PlaybackEvent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of a full simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub steps: Vec<SimulationStep>,
    /// Commands the audio resource actually received, in order.
    pub commands: Vec<ResourceCommand>,
    pub first_play_calls: u32,
    pub final_state: PlaybackSnapshot,
}

/// Parse event tokens, failing on the first unknown one.
pub fn parse_events(tokens: &[String]) -> Result<Vec<PlaybackEvent>> {
    tokens.iter().map(|token| token.parse()).collect()
}

/// Read a JSON array of events from disk.
pub fn load_script(path: &Path) -> Result<Vec<PlaybackEvent>> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Replay events against headless collaborators.
///
/// Refused audio commands are recorded in the report rather than aborting
/// the run, the same way a page keeps handling clicks after one fails.
pub fn run_simulation(
    config: &PlayerConfig,
    events: &[PlaybackEvent],
    fail_start: bool,
) -> SimulationReport {
    let audio = HeadlessAudio::default();
    audio.set_fail_start(fail_start);

    let first_play_calls = std::rc::Rc::new(std::cell::Cell::new(0u32));
    let calls = first_play_calls.clone();

    let mut controller = PlaybackController::new(
        audio.clone(),
        HeadlessControl::default(),
        HeadlessControl::default(),
        move || calls.set(calls.get() + 1),
    )
    .with_config(config);

    let steps = events
        .iter()
        .map(|&event| match controller.handle(event) {
            Ok(transition) => SimulationStep {
                event,
                transition: Some(transition),
                error: None,
            },
            Err(err) => {
                warn!("{} failed: {}", event, err);
                SimulationStep {
                    event,
                    transition: None,
                    error: Some(err.to_string()),
                }
            }
        })
        .collect();

    SimulationReport {
        steps,
        commands: audio.commands(),
        first_play_calls: first_play_calls.get(),
        final_state: controller.snapshot(),
    }
}

/// Run the `simulate` command.
pub fn simulate(
    events: &[String],
    script: Option<&Path>,
    config_path: Option<&Path>,
    fail_start: bool,
    json: bool,
) -> Result<()> {
    let config = match config_path {
        Some(path) => PlayerConfig::load(path)?,
        None => PlayerConfig::default(),
    };

    let mut replay = match script {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };
    replay.extend(parse_events(events)?);

    if replay.is_empty() {
        println!("No events to replay");
        return Ok(());
    }

    info!("Replaying {} events", replay.len());
    let report = run_simulation(&config, &replay, fail_start);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (i, step) in report.steps.iter().enumerate() {
        match (&step.transition, &step.error) {
            (Some(t), _) => {
                let command = match t.command.issued() {
                    Some(command) => command.to_string(),
                    None => format!("{:?}", t.command).to_lowercase(),
                };
                let first = if t.first_play_fired { " (first play)" } else { "" };
                println!(
                    "{:>3}. {:<8} -> {:<14} {}{}",
                    i + 1,
                    step.event,
                    command,
                    t.affordance,
                    first
                );
            }
            (None, Some(err)) => println!("{:>3}. {:<8} -> error: {}", i + 1, step.event, err),
            (None, None) => {}
        }
    }

    let commands: Vec<String> = report.commands.iter().map(|c| c.to_string()).collect();
    println!();
    println!("Commands: [{}]", commands.join(", "));
    println!("First-play callbacks: {}", report.first_play_calls);
    println!(
        "Final: {} / {} / user wants playing: {}",
        report.final_state.phase,
        report.final_state.affordance,
        report.final_state.user_wants_playing
    );

    Ok(())
}

/// Print the default config as JSON.
pub fn print_default_config() -> Result<()> {
    println!("{}", PlayerConfig::default().to_json_pretty()?);
    Ok(())
}

/// Validate a config file.
pub fn check_config(path: &Path) -> Result<()> {
    info!("Checking config: {}", path.display());

    let config = PlayerConfig::load(path)?;
    println!("Config OK: {}", path.display());
    println!("  audio element: #{}", config.audio_element_id);
    println!("  play button:   #{}", config.play_button_id);
    println!("  stop button:   #{}", config.stop_button_id);
    println!("  skip redundant commands: {}", config.skip_redundant_commands);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::{CommandOutcome, ControlAffordance, Visibility};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_events_rejects_unknown() {
        let err = parse_events(&tokens(&["play", "rewind"])).unwrap_err();
        assert!(err.to_string().contains("rewind"));
    }

    #[test]
    fn test_load_script() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"["play", "hidden"]"#).unwrap();

        let events = load_script(file.path()).unwrap();
        assert_eq!(
            events,
            vec![
                PlaybackEvent::Play,
                PlaybackEvent::VisibilityChanged(Visibility::Hidden)
            ]
        );
    }

    #[test]
    fn test_simulation_report() {
        let events = parse_events(&tokens(&["play", "hidden", "visible", "stop"])).unwrap();
        let report = run_simulation(&PlayerConfig::default(), &events, false);

        assert_eq!(report.steps.len(), 4);
        assert_eq!(
            report.steps[0].transition.map(|t| t.command),
            Some(CommandOutcome::Issued(ResourceCommand::Start))
        );
        assert_eq!(report.first_play_calls, 1);
        assert_eq!(
            report.commands,
            vec![
                ResourceCommand::Start,
                ResourceCommand::Stop,
                ResourceCommand::Start,
                ResourceCommand::Stop
            ]
        );
        assert_eq!(report.final_state.affordance, ControlAffordance::ShowPlay);
    }

    #[test]
    fn test_simulation_records_refused_start() {
        let events = parse_events(&tokens(&["play", "visible"])).unwrap();
        let report = run_simulation(&PlayerConfig::default(), &events, true);

        // A refused start is not remembered, so the visible event tries again
        assert!(report.steps[0].error.is_some());
        assert!(report.steps[1].error.is_some());
        assert_eq!(report.commands, vec![ResourceCommand::Start, ResourceCommand::Start]);
        assert_eq!(report.final_state.last_command, None);
        assert_eq!(report.final_state.affordance, ControlAffordance::ShowStop);
        assert!(report.final_state.user_wants_playing);
    }

    #[test]
    fn test_report_serializes() {
        let report = run_simulation(&PlayerConfig::default(), &[PlaybackEvent::Play], false);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["commands"][0], "start");
        assert_eq!(json["steps"][0]["event"], "play");
        assert_eq!(json["final_state"]["affordance"], "ShowStop");
    }
}
