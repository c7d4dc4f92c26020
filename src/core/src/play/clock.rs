use crate::play::{ActorId, Millis};
use log::debug;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Idle,
    Playing,
    Recording,
}

#[derive(Debug, Clone, Copy)]
pub enum TimeSource {
    /// Real time between `update` calls.
    Wall { last_update: Option<Instant> },
    /// Constant step per `update`, for headless runs.
    Fixed(Millis),
}

/// Shared play timeline. Drives recording and replay of every actor.
#[derive(Debug, Clone)]
pub struct Clock {
    elapsed: Millis,
    max_time: Millis,
    state: ClockState,
    source: TimeSource,
    listeners: Vec<ActorId>,
}

impl Clock {
    pub fn new() -> Self {
        Clock::with_source(TimeSource::Wall { last_update: None })
    }

    pub fn with_fixed_step(step: Millis) -> Self {
        Clock::with_source(TimeSource::Fixed(step))
    }

    fn with_source(source: TimeSource) -> Self {
        Clock {
            elapsed: 0.0,
            max_time: 0.0,
            state: ClockState::Idle,
            source,
            listeners: Vec::new(),
        }
    }

    pub fn use_fixed_step(&mut self, step: Millis) {
        self.source = TimeSource::Fixed(step);
    }

    pub fn record(&mut self) {
        self.start(ClockState::Recording);
    }

    pub fn play(&mut self) {
        self.start(ClockState::Playing);
    }

    pub fn stop(&mut self) {
        self.state = ClockState::Idle;
    }

    fn start(&mut self, state: ClockState) {
        self.state = state;
        if let TimeSource::Wall { last_update } = &mut self.source {
            *last_update = Some(Instant::now());
        }
    }

    /// Rewinds to zero and returns the actors to notify, in registration order.
    /// Active/idle state is left untouched.
    pub fn reset(&mut self, hard: bool) -> Vec<ActorId> {
        debug!(
            "clock reset (hard: {hard}) at {:.1}ms, notifying {} listeners",
            self.elapsed,
            self.listeners.len()
        );

        self.elapsed = 0.0;
        self.listeners.clone()
    }

    pub fn update(&mut self) {
        if !self.is_active() {
            return;
        }

        let delta = match &mut self.source {
            TimeSource::Wall { last_update } => {
                let now = Instant::now();
                let delta = last_update
                    .map(|last| now.duration_since(last).as_secs_f64() * 1000.0)
                    .unwrap_or_default();
                *last_update = Some(now);
                delta
            }
            TimeSource::Fixed(step) => *step,
        };

        self.advance(delta);
    }

    pub fn advance(&mut self, delta: Millis) {
        self.elapsed += delta;
        self.max_time = self.max_time.max(self.elapsed);
    }

    pub fn goto_time(&mut self, time: Millis) {
        self.elapsed = time.clamp(0.0, self.max_time);
    }

    pub fn add_reset_listener(&mut self, id: ActorId) {
        self.listeners.push(id);
    }

    #[inline]
    pub fn listeners(&self) -> &[ActorId] {
        &self.listeners
    }

    #[inline]
    pub fn elapsed(&self) -> Millis {
        self.elapsed
    }

    #[inline]
    pub fn max_time(&self) -> Millis {
        self.max_time
    }

    #[inline]
    pub fn state(&self) -> ClockState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state != ClockState::Idle
    }

    #[inline]
    pub fn is_recording(&self) -> bool {
        self.state == ClockState::Recording
    }

    /// Elapsed time as `SS.CCs`.
    pub fn format_elapsed(&self) -> String {
        let seconds = self.elapsed / 1000.0;
        let whole = (seconds % 60.0).floor() as u32;
        let centis = ((seconds % 1.0) * 100.0).floor() as u32;

        format!("{whole:02}.{centis:02}s")
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clock_is_idle() {
        let clock = Clock::new();

        assert_eq!(clock.state(), ClockState::Idle);
        assert!(!clock.is_active());
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_state_transitions() {
        let mut clock = Clock::with_fixed_step(10.0);

        clock.record();
        assert!(clock.is_recording());
        assert!(clock.is_active());

        clock.play();
        assert!(!clock.is_recording());
        assert!(clock.is_active());

        clock.stop();
        assert_eq!(clock.state(), ClockState::Idle);
    }

    #[test]
    fn test_update_only_advances_while_active() {
        let mut clock = Clock::with_fixed_step(10.0);

        clock.update();
        assert_eq!(clock.elapsed(), 0.0);

        clock.play();
        clock.update();
        clock.update();
        assert_eq!(clock.elapsed(), 20.0);
        assert_eq!(clock.max_time(), 20.0);
    }

    #[test]
    fn test_reset_keeps_state_and_watermark() {
        let mut clock = Clock::with_fixed_step(10.0);
        clock.record();
        clock.update();

        clock.reset(false);

        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.max_time(), 10.0);
        assert!(clock.is_recording());
    }

    #[test]
    fn test_reset_returns_listeners_in_order() {
        let mut clock = Clock::new();
        clock.add_reset_listener(ActorId(3));
        clock.add_reset_listener(ActorId(1));
        clock.add_reset_listener(ActorId(2));

        assert_eq!(clock.reset(true), vec![ActorId(3), ActorId(1), ActorId(2)]);
    }

    #[test]
    fn test_goto_time_clamps() {
        let mut clock = Clock::with_fixed_step(10.0);
        clock.play();
        for _ in 0..10 {
            clock.update();
        }
        clock.stop();

        clock.goto_time(55.0);
        assert_eq!(clock.elapsed(), 55.0);

        clock.goto_time(500.0);
        assert_eq!(clock.elapsed(), 100.0);

        clock.goto_time(-1.0);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut clock = Clock::with_fixed_step(10.0);
        clock.add_reset_listener(ActorId(0));
        clock.play();

        let mut copy = clock.clone();
        copy.update();
        copy.add_reset_listener(ActorId(1));

        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.listeners(), &[ActorId(0)]);
        assert_eq!(copy.listeners(), &[ActorId(0), ActorId(1)]);
    }

    #[test]
    fn test_format_elapsed() {
        let mut clock = Clock::with_fixed_step(10.0);
        clock.advance(3_450.0);

        assert_eq!(clock.format_elapsed(), "03.45s");

        clock.advance(60_000.0);
        assert_eq!(clock.format_elapsed(), "03.45s");
    }

    #[test]
    fn test_wall_clock_moves_forward() {
        let mut clock = Clock::new();
        clock.play();
        std::thread::sleep(std::time::Duration::from_millis(2));
        clock.update();

        assert!(clock.elapsed() > 0.0);
    }
}
