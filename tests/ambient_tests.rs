// Host-side tests for the ambient audio engine.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod ambient {
        include!("../src/core/ambient.rs");
    }
}

use crate::core::ambient::*;
use crate::core::constants::*;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Gain { id: u32, value: f32 },
    Osc { id: u32, waveform: Waveform, hz: f32 },
    ToOutput(u32),
    GainToGain(u32, u32),
    OscToGain(u32, u32),
    SetAt { gain: u32, value: f32, at: f64 },
    Ramp { gain: u32, value: f32, at: f64 },
    Start { osc: u32, at: f64 },
    Stop { osc: u32, at: f64 },
    Disconnect(u32),
}

/// Bookkeeping audio host: numbered nodes, a fake clock, and switches to
/// make individual operations fail.
#[derive(Default)]
struct FakeHost {
    now: f64,
    next_id: u32,
    contexts_created: u32,
    events: Vec<Event>,
    running: HashSet<u32>,
    connected: HashSet<u32>,
    stops: HashMap<u32, u32>,
    fail_context: bool,
    fail_oscillator_after: Option<u32>,
    oscillators_built: u32,
}

impl FakeHost {
    fn id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl AudioHost for FakeHost {
    type Context = u32;
    type Gain = u32;
    type Oscillator = u32;

    fn create_context(&mut self) -> Result<u32, AudioError> {
        if self.fail_context {
            return Err(AudioError::ContextUnavailable("no audio".into()));
        }
        self.contexts_created += 1;
        Ok(self.contexts_created)
    }

    fn current_time(&self, _ctx: &u32) -> f64 {
        self.now
    }

    fn create_gain(&mut self, _ctx: &u32, value: f32) -> Result<u32, AudioError> {
        let id = self.id();
        self.events.push(Event::Gain { id, value });
        Ok(id)
    }

    fn create_oscillator(&mut self, _ctx: &u32, waveform: Waveform, hz: f32) -> Result<u32, AudioError> {
        if let Some(limit) = self.fail_oscillator_after {
            if self.oscillators_built >= limit {
                return Err(AudioError::Node {
                    node: "Oscillator",
                    detail: "refused".into(),
                });
            }
        }
        self.oscillators_built += 1;
        let id = self.id();
        self.events.push(Event::Osc { id, waveform, hz });
        Ok(id)
    }

    fn connect_to_output(&mut self, _ctx: &u32, gain: &u32) -> Result<(), AudioError> {
        self.connected.insert(*gain);
        self.events.push(Event::ToOutput(*gain));
        Ok(())
    }

    fn connect_gain(&mut self, from: &u32, to: &u32) -> Result<(), AudioError> {
        self.connected.insert(*from);
        self.events.push(Event::GainToGain(*from, *to));
        Ok(())
    }

    fn connect_oscillator(&mut self, osc: &u32, to: &u32) -> Result<(), AudioError> {
        self.events.push(Event::OscToGain(*osc, *to));
        Ok(())
    }

    fn disconnect_gain(&mut self, gain: &u32) -> Result<(), AudioError> {
        self.connected.remove(gain);
        self.events.push(Event::Disconnect(*gain));
        Ok(())
    }

    fn set_gain_at(&mut self, gain: &u32, value: f32, at: f64) -> Result<(), AudioError> {
        self.events.push(Event::SetAt {
            gain: *gain,
            value,
            at,
        });
        Ok(())
    }

    fn ramp_gain_exponential(&mut self, gain: &u32, value: f32, at: f64) -> Result<(), AudioError> {
        self.events.push(Event::Ramp {
            gain: *gain,
            value,
            at,
        });
        Ok(())
    }

    fn start_oscillator(&mut self, osc: &u32, at: f64) -> Result<(), AudioError> {
        self.running.insert(*osc);
        self.events.push(Event::Start { osc: *osc, at });
        Ok(())
    }

    fn stop_oscillator(&mut self, osc: &u32, at: f64) -> Result<(), AudioError> {
        self.events.push(Event::Stop { osc: *osc, at });
        *self.stops.entry(*osc).or_default() += 1;
        // a second stop is an error, like the browser's InvalidStateError
        if self.running.remove(osc) {
            Ok(())
        } else {
            Err(AudioError::Schedule("already stopped".into()))
        }
    }
}

fn engine() -> AmbientEngine<FakeHost> {
    AmbientEngine::new(FakeHost::default())
}

fn ambient_oscillators(host: &FakeHost) -> Vec<(u32, Waveform, f32)> {
    host.events
        .iter()
        .filter_map(|e| match e {
            Event::Osc { id, waveform, hz } if *waveform != Waveform::Square => Some((*id, *waveform, *hz)),
            _ => None,
        })
        .collect()
}

#[test]
fn start_builds_three_partials_into_quiet_master() {
    let mut e = engine();
    assert_eq!(e.start().unwrap(), true);
    assert!(e.is_running());

    let host = e.host();
    assert_eq!(host.running.len(), 3);
    let oscs = ambient_oscillators(host);
    assert_eq!(
        oscs.iter().map(|o| (o.1, o.2)).collect::<Vec<_>>(),
        vec![
            (Waveform::Sine, 120.0),
            (Waveform::Triangle, 238.0),
            (Waveform::Triangle, 480.0)
        ]
    );

    let gains: Vec<f32> = host
        .events
        .iter()
        .filter_map(|e| match e {
            Event::Gain { value, .. } => Some(*value),
            _ => None,
        })
        .collect();
    assert_eq!(gains[0], AMBIENT_MASTER_GAIN);
    assert!((gains[1] - 0.3).abs() < 1e-6);
    assert!((gains[2] - 0.15).abs() < 1e-6);
    assert!((gains[3] - 0.1).abs() < 1e-6);

    // master goes to the output, every partial gain feeds the master
    let master = 1;
    assert!(host.events.contains(&Event::ToOutput(master)));
    let feeds = host
        .events
        .iter()
        .filter(|e| matches!(e, Event::GainToGain(_, to) if *to == master))
        .count();
    assert_eq!(feeds, 3);
}

#[test]
fn partials_start_together() {
    let mut e = engine();
    e.start().unwrap();
    let starts: Vec<f64> = e
        .host()
        .events
        .iter()
        .filter_map(|ev| match ev {
            Event::Start { at, .. } => Some(*at),
            _ => None,
        })
        .collect();
    assert_eq!(starts.len(), 3);
    assert!(starts.iter().all(|t| *t == starts[0]));
}

#[test]
fn double_start_does_not_duplicate() {
    let mut e = engine();
    assert!(e.start().unwrap());
    assert!(!e.start().unwrap());
    assert_eq!(e.host().running.len(), 3);
    assert_eq!(ambient_oscillators(e.host()).len(), 3);
}

#[test]
fn context_is_created_once() {
    let mut e = engine();
    e.click();
    e.start().unwrap();
    e.click();
    e.context().unwrap();
    assert_eq!(e.host().contexts_created, 1);
}

#[test]
fn stop_when_idle_is_a_no_op() {
    let mut e = engine();
    assert_eq!(e.stop(), None);
    assert!(!e.is_running());
    assert!(e.host().events.is_empty());
    assert_eq!(e.host().contexts_created, 0);
}

#[test]
fn stop_fades_then_teardown_silences_everything() {
    let mut e = engine();
    e.start().unwrap();
    e.host_mut().now = 5.0;
    let teardown = e.stop().expect("was running");
    assert_eq!(teardown.delay_ms, AMBIENT_TEARDOWN_DELAY_MS);
    assert!(!e.is_running());

    // fade scheduled, oscillators still sounding until the teardown fires
    assert!(e.host().events.contains(&Event::Ramp {
        gain: 1,
        value: SILENT_GAIN,
        at: 5.0 + AMBIENT_FADE_SEC,
    }));
    assert_eq!(e.host().running.len(), 3);
    assert_eq!(e.fading_count(), 1);

    e.finish_teardown(teardown);
    assert!(e.host().running.is_empty());
    assert!(e.host().connected.is_empty());
    assert_eq!(e.fading_count(), 0);
}

#[test]
fn toggle_on_then_off_leaves_no_oscillators_after_delay() {
    let mut e = engine();
    assert_eq!(e.toggle().unwrap(), AmbientChange::Started);
    let AmbientChange::Stopping(teardown) = e.toggle().unwrap() else {
        panic!("second toggle should stop");
    };
    e.finish_teardown(teardown);
    assert!(e.host().running.is_empty());
}

#[test]
fn stale_teardown_leaves_newer_graph_alone() {
    let mut e = engine();
    e.start().unwrap();
    let first = e.stop().unwrap();
    // restart before the first teardown fires
    assert!(e.start().unwrap());
    assert_eq!(e.host().running.len(), 6);

    e.finish_teardown(first);
    assert!(e.is_running());
    assert_eq!(e.host().running.len(), 3);

    // a repeated token is ignored
    e.finish_teardown(first);
    assert_eq!(e.host().running.len(), 3);

    let second = e.stop().unwrap();
    assert_ne!(first.generation, second.generation);
    e.finish_teardown(second);
    assert!(e.host().running.is_empty());
}

#[test]
fn teardown_swallows_already_stopped_oscillators() {
    let mut e = engine();
    e.start().unwrap();
    let t = e.stop().unwrap();
    // something else stopped them first
    let ids: Vec<u32> = e.host().running.iter().copied().collect();
    for id in ids {
        e.host_mut().running.remove(&id);
    }
    e.finish_teardown(t);
    assert_eq!(e.fading_count(), 0);
    assert!(e.host().connected.is_empty());
}

#[test]
fn click_envelope_and_autostop() {
    let mut e = engine();
    e.host_mut().now = 2.0;
    e.click();
    let ev = &e.host().events;
    assert!(ev.contains(&Event::Osc {
        id: 1,
        waveform: Waveform::Square,
        hz: CLICK_FREQ_HZ
    }));
    assert!(ev.contains(&Event::SetAt {
        gain: 2,
        value: SILENT_GAIN,
        at: 2.0
    }));
    assert!(ev.contains(&Event::Ramp {
        gain: 2,
        value: CLICK_PEAK_GAIN,
        at: 2.0 + CLICK_ATTACK_SEC
    }));
    assert!(ev.contains(&Event::Ramp {
        gain: 2,
        value: SILENT_GAIN,
        at: 2.0 + CLICK_DECAY_SEC
    }));
    assert!(ev.contains(&Event::Start { osc: 1, at: 2.0 }));
    assert!(ev.contains(&Event::Stop {
        osc: 1,
        at: 2.0 + CLICK_STOP_SEC
    }));
    assert!(!e.is_running());
}

#[test]
fn click_without_audio_is_silent() {
    let mut e = AmbientEngine::new(FakeHost {
        fail_context: true,
        ..Default::default()
    });
    e.click();
    assert!(e.host().events.is_empty());
    assert!(matches!(e.start(), Err(AudioError::ContextUnavailable(_))));
    assert!(!e.is_running());
}

#[test]
fn failed_build_leaves_engine_stopped() {
    let mut e = AmbientEngine::new(FakeHost {
        fail_oscillator_after: Some(2),
        ..Default::default()
    });
    assert!(e.start().is_err());
    assert!(!e.is_running());
    assert!(e.host().running.is_empty());
    assert!(!e.host().connected.contains(&1));
    assert_eq!(e.stop(), None);
}

#[test]
fn teardowns_finishing_out_of_order_clean_up_both_graphs() {
    let mut e = engine();
    e.start().unwrap();
    let first = e.stop().expect("first graph running");
    e.start().unwrap();
    let second = e.stop().expect("second graph running");
    assert_eq!(e.fading_count(), 2);

    e.finish_teardown(second);
    e.finish_teardown(first);
    assert_eq!(e.fading_count(), 0);
    assert!(e.host().running.is_empty());
    assert!(e.host().connected.is_empty());

    e.start().unwrap();
    assert_eq!(e.host().running.len(), 3);
}
