use crate::core::{AmbientEngine, AudioError, AudioHost, Teardown, Waveform};
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub type SharedAudio = Rc<RefCell<AmbientEngine<WebAudio>>>;

/// `AudioHost` backed by the browser's WebAudio API.
#[derive(Default)]
pub struct WebAudio;

fn node_err(node: &'static str) -> impl Fn(wasm_bindgen::JsValue) -> AudioError {
    move |e| AudioError::Node {
        node,
        detail: format!("{:?}", e),
    }
}

fn schedule_err(e: wasm_bindgen::JsValue) -> AudioError {
    AudioError::Schedule(format!("{:?}", e))
}

impl AudioHost for WebAudio {
    type Context = web::AudioContext;
    type Gain = web::GainNode;
    type Oscillator = web::OscillatorNode;

    fn create_context(&mut self) -> Result<Self::Context, AudioError> {
        web::AudioContext::new().map_err(|e| AudioError::ContextUnavailable(format!("{:?}", e)))
    }

    fn current_time(&self, ctx: &Self::Context) -> f64 {
        ctx.current_time()
    }

    fn create_gain(&mut self, ctx: &Self::Context, value: f32) -> Result<Self::Gain, AudioError> {
        let g = web::GainNode::new(ctx).map_err(node_err("Gain"))?;
        g.gain().set_value(value);
        Ok(g)
    }

    fn create_oscillator(
        &mut self,
        ctx: &Self::Context,
        waveform: Waveform,
        frequency_hz: f32,
    ) -> Result<Self::Oscillator, AudioError> {
        let osc = web::OscillatorNode::new(ctx).map_err(node_err("Oscillator"))?;
        osc.set_type(match waveform {
            Waveform::Sine => web::OscillatorType::Sine,
            Waveform::Triangle => web::OscillatorType::Triangle,
            Waveform::Square => web::OscillatorType::Square,
        });
        osc.frequency().set_value(frequency_hz);
        Ok(osc)
    }

    fn connect_to_output(&mut self, ctx: &Self::Context, gain: &Self::Gain) -> Result<(), AudioError> {
        gain.connect_with_audio_node(&ctx.destination())
            .map(|_| ())
            .map_err(node_err("Gain"))
    }

    fn connect_gain(&mut self, from: &Self::Gain, to: &Self::Gain) -> Result<(), AudioError> {
        from.connect_with_audio_node(to)
            .map(|_| ())
            .map_err(node_err("Gain"))
    }

    fn connect_oscillator(&mut self, osc: &Self::Oscillator, to: &Self::Gain) -> Result<(), AudioError> {
        osc.connect_with_audio_node(to)
            .map(|_| ())
            .map_err(node_err("Oscillator"))
    }

    fn disconnect_gain(&mut self, gain: &Self::Gain) -> Result<(), AudioError> {
        gain.disconnect().map_err(node_err("Gain"))
    }

    fn set_gain_at(&mut self, gain: &Self::Gain, value: f32, at: f64) -> Result<(), AudioError> {
        gain.gain()
            .set_value_at_time(value, at)
            .map(|_| ())
            .map_err(schedule_err)
    }

    fn ramp_gain_exponential(&mut self, gain: &Self::Gain, value: f32, at: f64) -> Result<(), AudioError> {
        gain.gain()
            .exponential_ramp_to_value_at_time(value, at)
            .map(|_| ())
            .map_err(schedule_err)
    }

    fn start_oscillator(&mut self, osc: &Self::Oscillator, at: f64) -> Result<(), AudioError> {
        osc.start_with_when(at).map_err(schedule_err)
    }

    fn stop_oscillator(&mut self, osc: &Self::Oscillator, at: f64) -> Result<(), AudioError> {
        osc.stop_with_when(at).map_err(schedule_err)
    }
}

pub fn new_shared() -> SharedAudio {
    Rc::new(RefCell::new(AmbientEngine::new(WebAudio)))
}

/// Hand the teardown token back to the engine once the fade has finished.
pub fn schedule_teardown(engine: &SharedAudio, teardown: Teardown) {
    let engine = engine.clone();
    dom::set_timeout(teardown.delay_ms, move || {
        engine.borrow_mut().finish_teardown(teardown);
    });
}

/// Resume the context if the browser left it suspended.
pub async fn resume_if_suspended(engine: &SharedAudio) -> anyhow::Result<()> {
    let ctx = engine
        .borrow_mut()
        .context()
        .cloned()
        .map_err(anyhow::Error::from)?;
    if ctx.state() == web::AudioContextState::Suspended {
        let promise = ctx.resume().map_err(|e| anyhow::anyhow!("{:?}", e))?;
        wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map_err(|e| anyhow::anyhow!("resume rejected: {:?}", e))?;
    }
    Ok(())
}
