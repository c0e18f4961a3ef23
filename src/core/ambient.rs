use super::constants::*;

/// Errors raised by an audio host while building or driving nodes.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("audio context unavailable: {0}")]
    ContextUnavailable(String),
    #[error("{node} node error: {detail}")]
    Node { node: &'static str, detail: String },
    #[error("audio scheduling error: {0}")]
    Schedule(String),
}

/// Oscillator shapes used by the ambient pad and the click blip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
}

/// Audio-graph construction API of the host. Times are in the context's
/// clock (seconds); a time at or before `current_time` means "now".
pub trait AudioHost {
    type Context;
    type Gain;
    type Oscillator;

    fn create_context(&mut self) -> Result<Self::Context, AudioError>;
    fn current_time(&self, ctx: &Self::Context) -> f64;

    fn create_gain(&mut self, ctx: &Self::Context, value: f32) -> Result<Self::Gain, AudioError>;
    fn create_oscillator(
        &mut self,
        ctx: &Self::Context,
        waveform: Waveform,
        frequency_hz: f32,
    ) -> Result<Self::Oscillator, AudioError>;

    fn connect_to_output(&mut self, ctx: &Self::Context, gain: &Self::Gain) -> Result<(), AudioError>;
    fn connect_gain(&mut self, from: &Self::Gain, to: &Self::Gain) -> Result<(), AudioError>;
    fn connect_oscillator(&mut self, osc: &Self::Oscillator, to: &Self::Gain) -> Result<(), AudioError>;
    fn disconnect_gain(&mut self, gain: &Self::Gain) -> Result<(), AudioError>;

    fn set_gain_at(&mut self, gain: &Self::Gain, value: f32, at: f64) -> Result<(), AudioError>;
    fn ramp_gain_exponential(&mut self, gain: &Self::Gain, value: f32, at: f64) -> Result<(), AudioError>;

    fn start_oscillator(&mut self, osc: &Self::Oscillator, at: f64) -> Result<(), AudioError>;
    fn stop_oscillator(&mut self, osc: &Self::Oscillator, at: f64) -> Result<(), AudioError>;
}

/// Token for the delayed half of a stop. The host hands it back to
/// `AmbientEngine::finish_teardown` after `delay_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Teardown {
    pub generation: u64,
    pub delay_ms: i32,
}

/// Outcome of `AmbientEngine::toggle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmbientChange {
    Started,
    Stopping(Teardown),
}

struct Partial<H: AudioHost> {
    osc: H::Oscillator,
    gain: H::Gain,
}

/// One ambient pad: master gain plus its three partials, built and torn
/// down together.
struct AmbientGraph<H: AudioHost> {
    generation: u64,
    master: H::Gain,
    partials: Vec<Partial<H>>,
}

/// Owns the lazily created audio context and the ambient pad.
///
/// Typical usage:
/// - `toggle()` from the audio button (after resuming a suspended context)
/// - schedule `finish_teardown(token)` when a stop hands back a `Teardown`
/// - `click()` from any UI interaction; it never reports failure
///
/// `stop` detaches the live graph at once and parks it until its teardown
/// token comes back, so a start issued in between always builds a new graph
/// and a late teardown can only touch the graph it was issued for.
pub struct AmbientEngine<H: AudioHost> {
    host: H,
    context: Option<H::Context>,
    live: Option<AmbientGraph<H>>,
    fading: Vec<AmbientGraph<H>>,
    generation: u64,
}

impl<H: AudioHost> AmbientEngine<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            context: None,
            live: None,
            fading: Vec::new(),
            generation: 0,
        }
    }

    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[inline]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Whether the ambient pad is currently on.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.live.is_some()
    }

    /// Graphs faded out but not yet torn down.
    #[inline]
    pub fn fading_count(&self) -> usize {
        self.fading.len()
    }

    /// The audio context, created on first call and reused afterwards.
    pub fn context(&mut self) -> Result<&H::Context, AudioError> {
        if self.context.is_none() {
            let ctx = self.host.create_context()?;
            log::info!("[audio] context created");
            self.context = Some(ctx);
        }
        self.context
            .as_ref()
            .ok_or_else(|| AudioError::ContextUnavailable("not created".into()))
    }

    /// Start the ambient pad. Returns `false` when it was already running.
    pub fn start(&mut self) -> Result<bool, AudioError> {
        self.context()?;
        if self.live.is_some() {
            return Ok(false);
        }
        let generation = self.generation.wrapping_add(1);
        let graph = self.build_graph(generation)?;
        self.generation = generation;
        self.live = Some(graph);
        log::info!("[audio] ambient started (generation {})", generation);
        Ok(true)
    }

    fn build_graph(&mut self, generation: u64) -> Result<AmbientGraph<H>, AudioError> {
        let Self { host, context, .. } = self;
        let ctx = context
            .as_ref()
            .ok_or_else(|| AudioError::ContextUnavailable("not created".into()))?;

        let master = host.create_gain(ctx, AMBIENT_MASTER_GAIN)?;
        host.connect_to_output(ctx, &master)?;

        let mut partials = Vec::with_capacity(AMBIENT_PARTIALS_HZ.len());
        let built: Result<(), AudioError> = AMBIENT_PARTIALS_HZ
            .iter()
            .enumerate()
            .try_for_each(|(idx, &freq)| {
                let waveform = if idx == 0 {
                    Waveform::Sine
                } else {
                    Waveform::Triangle
                };
                let osc = host.create_oscillator(ctx, waveform, freq)?;
                let gain = host.create_gain(ctx, AMBIENT_PARTIAL_GAIN / (idx as f32 + 1.0))?;
                host.connect_oscillator(&osc, &gain)?;
                host.connect_gain(&gain, &master)?;
                partials.push(Partial { osc, gain });
                Ok(())
            });
        if let Err(e) = built {
            _ = host.disconnect_gain(&master);
            return Err(e);
        }

        let now = host.current_time(ctx);
        for (i, p) in partials.iter().enumerate() {
            if let Err(e) = host.start_oscillator(&p.osc, now) {
                for started in &partials[..i] {
                    _ = host.stop_oscillator(&started.osc, 0.0);
                }
                _ = host.disconnect_gain(&master);
                return Err(e);
            }
        }

        Ok(AmbientGraph {
            generation,
            master,
            partials,
        })
    }

    /// Fade the pad out. Returns the teardown token to schedule, or `None`
    /// when nothing was running.
    pub fn stop(&mut self) -> Option<Teardown> {
        let graph = self.live.take()?;
        if let Some(ctx) = self.context.as_ref() {
            let at = self.host.current_time(ctx) + AMBIENT_FADE_SEC;
            if let Err(e) = self.host.ramp_gain_exponential(&graph.master, SILENT_GAIN, at) {
                log::debug!("[audio] fade ramp failed: {}", e);
            }
        }
        let token = Teardown {
            generation: graph.generation,
            delay_ms: AMBIENT_TEARDOWN_DELAY_MS,
        };
        self.fading.push(graph);
        log::info!("[audio] ambient stopping (generation {})", token.generation);
        Some(token)
    }

    /// Stop and disconnect the graph the token was issued for. Tokens for
    /// graphs already torn down are ignored.
    pub fn finish_teardown(&mut self, token: Teardown) {
        let Some(idx) = self
            .fading
            .iter()
            .position(|g| g.generation == token.generation)
        else {
            return;
        };
        let graph = self.fading.swap_remove(idx);
        for p in &graph.partials {
            if let Err(e) = self.host.stop_oscillator(&p.osc, 0.0) {
                log::debug!("[audio] oscillator already stopped: {}", e);
            }
            _ = self.host.disconnect_gain(&p.gain);
        }
        _ = self.host.disconnect_gain(&graph.master);
        log::debug!("[audio] ambient generation {} torn down", graph.generation);
    }

    /// Flip the pad on or off.
    pub fn toggle(&mut self) -> Result<AmbientChange, AudioError> {
        match self.stop() {
            Some(teardown) => Ok(AmbientChange::Stopping(teardown)),
            None => {
                self.start()?;
                Ok(AmbientChange::Started)
            }
        }
    }

    /// Short square blip for UI feedback. Failures are logged and dropped.
    pub fn click(&mut self) {
        if let Err(e) = self.try_click() {
            log::debug!("[audio] click skipped: {}", e);
        }
    }

    fn try_click(&mut self) -> Result<(), AudioError> {
        self.context()?;
        let Self { host, context, .. } = self;
        let ctx = context
            .as_ref()
            .ok_or_else(|| AudioError::ContextUnavailable("not created".into()))?;
        let now = host.current_time(ctx);
        let osc = host.create_oscillator(ctx, Waveform::Square, CLICK_FREQ_HZ)?;
        let gain = host.create_gain(ctx, SILENT_GAIN)?;
        host.set_gain_at(&gain, SILENT_GAIN, now)?;
        host.ramp_gain_exponential(&gain, CLICK_PEAK_GAIN, now + CLICK_ATTACK_SEC)?;
        host.ramp_gain_exponential(&gain, SILENT_GAIN, now + CLICK_DECAY_SEC)?;
        host.connect_oscillator(&osc, &gain)?;
        host.connect_to_output(ctx, &gain)?;
        host.start_oscillator(&osc, now)?;
        host.stop_oscillator(&osc, now + CLICK_STOP_SEC)?;
        Ok(())
    }
}
