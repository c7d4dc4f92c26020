use crate::play::{
    Actor, ActorId, ActorRegistry, BallCarrier, CarrierChange, Clock, ClockActor,
    FieldActor, Football, InputBuffer, Millis, PhysicsWorld, PhysicsWorldHistory, PlayActor,
    PlayEngine, Player, Pointer,
};
use crate::render::{Camera, NullRenderer, Renderer};
use crate::{Coordinate, PlaybookResult, Tuning};
use log::{debug, info};

/// Everything one play lives in: physics, actors, the clock and possession.
/// Actors receive it mutably while they update.
pub struct Stage {
    pub world: PhysicsWorld,
    pub registry: ActorRegistry,
    pub clock: Clock,
    pub carrier: BallCarrier,
    pub input: InputBuffer,
    pub tuning: Tuning,
    pub history: Option<PhysicsWorldHistory>,
    // never reused, so number keys stay unique after deletions
    next_player_number: usize,
}

impl Stage {
    /// Stage driven by wall-clock time.
    pub fn new(tuning: Tuning) -> PlaybookResult<Self> {
        Stage::with_clock(tuning, Clock::new())
    }

    /// Stage whose clock advances one frame length per update.
    pub fn headless(tuning: Tuning) -> PlaybookResult<Self> {
        let clock = Clock::with_fixed_step(tuning.frame_ms);
        Stage::with_clock(tuning, clock)
    }

    fn with_clock(tuning: Tuning, mut clock: Clock) -> PlaybookResult<Self> {
        let mut world = PhysicsWorld::new(&tuning);
        let mut registry = ActorRegistry::new();

        registry.add_actor(FieldActor::new(&mut world, &tuning))?;
        registry.add_actor(ClockActor::new(&mut world))?;
        let football = registry.add_actor(Football::new(&mut world, &tuning, Coordinate::default()))?;
        clock.add_reset_listener(football);

        let mut stage = Stage {
            world,
            registry,
            clock,
            carrier: BallCarrier::new(football),
            input: InputBuffer::new(),
            tuning,
            history: None,
            next_player_number: 1,
        };
        stage.set_football(football);

        Ok(stage)
    }

    pub fn set_football(&mut self, football: ActorId) {
        self.carrier.set_football(football);
    }

    pub fn attach_pointer(&mut self) -> PlaybookResult<ActorId> {
        let pointer = Pointer::new(&mut self.world, &self.tuning);
        self.registry.add_actor(pointer)
    }

    /// Adds a player with the next unused number.
    pub fn spawn_player(&mut self, at: Coordinate) -> PlaybookResult<ActorId> {
        let number = self.next_player_number;

        let mut player = Player::new(&mut self.world, &self.tuning, number.to_string(), at);
        if self.clock.is_recording() {
            player.start_recording();
        }

        let id = self.registry.add_actor(player)?;
        self.next_player_number += 1;
        self.clock.add_reset_listener(id);

        info!("player {number} ({id}) added at ({:.1}, {:.1})", at.x, at.y);

        Ok(id)
    }

    /// Runs `f` on an actor moved out of the registry, so it can mutate the stage.
    /// `None` when the actor does not exist or is already checked out.
    pub fn with_actor<R>(
        &mut self,
        id: ActorId,
        f: impl FnOnce(&mut Actor, &mut Stage) -> PlaybookResult<R>,
    ) -> PlaybookResult<Option<R>> {
        let Some(mut actor) = self.registry.checkout(id) else {
            return Ok(None);
        };

        let result = f(&mut actor, self);
        self.registry.checkin(id, actor);

        result.map(Some)
    }

    pub fn set_ball_carrier(&mut self, player: Option<ActorId>) -> PlaybookResult<()> {
        if let CarrierChange::FirstPossession(_) = self.carrier.set_carrier(player) {
            let football = self.carrier.football();
            self.with_actor(football, |actor, stage| actor.on_reset(stage, true))?;
        }

        Ok(())
    }

    /// Starts over with `carrier` holding the ball.
    pub fn new_play(&mut self, carrier: ActorId) -> PlaybookResult<()> {
        info!("new play with {carrier} carrying the ball");

        self.carrier.clear_player_state();
        self.set_ball_carrier(Some(carrier))?;
        self.reset(true)
    }

    pub fn record(&mut self) -> PlaybookResult<()> {
        self.reset(true)?;
        self.clock.record();

        if self.tuning.track_world_history {
            self.history = Some(PhysicsWorldHistory::new(self.world.snapshot()?));
        }

        Ok(())
    }

    pub fn play(&mut self) -> PlaybookResult<()> {
        self.reset(false)?;
        self.clock.play();
        Ok(())
    }

    pub fn stop(&mut self) {
        let was_recording = self.clock.is_recording();
        self.clock.stop();

        if !was_recording {
            return;
        }

        for id in self.registry.ids().collect::<Vec<_>>() {
            if let Some(actor) = self.registry.get_mut(id) {
                actor.finish_recording();
            }
        }

        debug!("recording stopped at {:.1}ms", self.clock.elapsed());
    }

    /// Jumps the clock. Actors pick up the new time on the next step.
    pub fn scrub(&mut self, time: Millis) {
        self.clock.goto_time(time);
    }

    /// Rewinds the clock and notifies every reset listener in registration order.
    pub fn reset(&mut self, hard: bool) -> PlaybookResult<()> {
        for id in self.clock.reset(hard) {
            if self
                .with_actor(id, |actor, stage| actor.on_reset(stage, hard))?
                .is_none()
            {
                debug!("reset listener {id} is no longer on the stage");
            }
        }

        Ok(())
    }

    pub fn step(&mut self, renderer: &mut dyn Renderer, camera: &Camera) -> PlaybookResult<()> {
        PlayEngine::frame(self, renderer, camera)
    }

    pub fn remove_actor(&mut self, id: ActorId) -> PlaybookResult<bool> {
        self.with_actor(id, |actor, stage| {
            actor.delete_descendants(id, stage);
            Ok(())
        })?;

        let Some(actor) = self.registry.remove_actor(id) else {
            return Ok(false);
        };

        self.world.remove_body(actor.handles().body);

        Ok(true)
    }

    /// Independent copy: snapshotted physics plus cloned actors, clock and
    /// possession. The pointer stays behind.
    pub fn duplicate(&self) -> PlaybookResult<Stage> {
        let mut world = PhysicsWorld::from_snapshot(&self.world.snapshot()?)?;
        let (registry, skipped) = self.registry.duplicate()?;

        for handles in skipped {
            world.remove_body(handles.body);
        }

        Ok(Stage {
            world,
            registry,
            clock: self.clock.clone(),
            carrier: self.carrier.clone(),
            input: InputBuffer::new(),
            tuning: self.tuning.clone(),
            history: None,
            next_player_number: self.next_player_number,
        })
    }

    /// Where `player` ends up after simulating `frames` more frames on a copy
    /// of this stage.
    pub fn look_ahead(&self, player: ActorId, frames: usize) -> PlaybookResult<Option<Coordinate>> {
        let mut future = self.duplicate()?;
        future.clock.use_fixed_step(self.tuning.frame_ms);

        let camera = Camera::default();
        for _ in 0..frames {
            future.step(&mut NullRenderer, &camera)?;
        }

        Ok(future.player(player).map(Player::position))
    }

    pub fn player(&self, id: ActorId) -> Option<&Player> {
        self.registry.player(id)
    }

    pub fn football(&self) -> Option<&Football> {
        self.registry.football(self.carrier.football())
    }

    pub fn history(&self) -> Option<&PhysicsWorldHistory> {
        self.history.as_ref()
    }
}
