//! Game state machine and frame loop
//!
//! `Game` owns every piece of simulation state. Input events move it between
//! phases and queue tasks; `tick` runs one frame of queued tasks, drawing
//! after each task that changed something.

use glam::Vec3;

use super::camera::{Camera, CameraFollower, Frustum, Viewport};
use super::fall::{FallProgress, fall_step};
use super::landing::{FallMode, Landing, LandingOutcome, classify, fall_mode};
use super::schedule::{FrameScheduler, Step, Task};
use super::state::{ChargeState, FallState, GameEvent, GamePhase, JumpActor};
use super::track::{PlatformTrack, Spawn};
use crate::error::GameError;
use crate::scene::{Light, LightKind, ObjectId, Scene, SceneObject};
use crate::settings::Settings;

/// Press or release of the charge input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressKind {
    Press,
    Release,
}

/// Element an input event originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTarget {
    /// The play surface itself
    Surface,
    /// Something layered on top of it (HUD, buttons)
    Descendant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PressKind,
    pub target: EventTarget,
}

impl PointerEvent {
    pub fn press() -> Self {
        Self {
            kind: PressKind::Press,
            target: EventTarget::Surface,
        }
    }

    pub fn release() -> Self {
        Self {
            kind: PressKind::Release,
            target: EventTarget::Surface,
        }
    }

    pub fn from_descendant(self) -> Self {
        Self {
            target: EventTarget::Descendant,
            ..self
        }
    }
}

type ScoreCallback = Box<dyn FnMut(u32)>;

pub struct Game {
    settings: Settings,
    phase: GamePhase,
    score: u32,
    track: PlatformTrack,
    follower: CameraFollower,
    camera: Camera,
    actor: JumpActor,
    charge: ChargeState,
    fall: FallState,
    /// Last classified landing; the fall reads its edge distance
    landing: Option<Landing>,
    scheduler: FrameScheduler,
    events: Vec<GameEvent>,
    on_success: Option<ScoreCallback>,
    on_failure: Option<ScoreCallback>,
    initialized: bool,
    next_actor_id: u32,
    /// Frames run so far
    time_ticks: u64,
}

impl Game {
    /// Create a game with stock settings
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Settings::default())
    }

    pub fn with_settings(seed: u64, settings: Settings) -> Result<Self, GameError> {
        settings.validate()?;
        Ok(Self::build(seed, settings))
    }

    fn build(seed: u64, settings: Settings) -> Self {
        Self {
            track: PlatformTrack::new(seed, &settings),
            camera: Camera::new(
                settings.camera_eye,
                Viewport::new(0.0, 0.0),
                settings.viewport_divisor,
            ),
            settings,
            phase: GamePhase::Idle,
            score: 0,
            follower: CameraFollower::default(),
            actor: JumpActor::new(0),
            charge: ChargeState::default(),
            fall: FallState::default(),
            landing: None,
            scheduler: FrameScheduler::new(),
            events: Vec::new(),
            on_success: None,
            on_failure: None,
            initialized: false,
            next_actor_id: 1,
            time_ticks: 0,
        }
    }

    /// Called with the score after every scoring landing, and with 0 on restart
    pub fn on_success(&mut self, callback: impl FnMut(u32) + 'static) {
        self.on_success = Some(Box::new(callback));
    }

    /// Called once with the final score when a fall settles
    pub fn on_failure(&mut self, callback: impl FnMut(u32) + 'static) {
        self.on_failure = Some(Box::new(callback));
    }

    /// Set up the scene and start the camera loop. Must run once, before
    /// any input is processed.
    pub fn init(&mut self, viewport: Viewport, scene: &mut dyn Scene) -> Result<(), GameError> {
        if self.initialized {
            return Err(GameError::AlreadyInitialized);
        }

        self.camera = Camera::new(
            self.settings.camera_eye,
            viewport,
            self.settings.viewport_divisor,
        );
        self.camera.look_at = self.follower.look_at();

        scene.add(
            ObjectId::Light(1),
            SceneObject::Light(Light {
                kind: LightKind::Directional,
                color: 0xffffff,
                intensity: 1.1,
                position: Vec3::new(2.0, 10.0, 5.0),
            }),
        );
        scene.add(
            ObjectId::Light(2),
            SceneObject::Light(Light {
                kind: LightKind::Ambient,
                color: 0xffffff,
                intensity: 0.3,
                position: Vec3::ZERO,
            }),
        );

        self.spawn_opening_pair(scene);
        self.spawn_actor(scene);
        self.scheduler.schedule(Task::CameraFollow);
        self.phase = GamePhase::Idle;
        self.initialized = true;

        log::info!(
            "game initialized ({}x{} viewport)",
            viewport.width,
            viewport.height
        );
        self.draw(scene);
        Ok(())
    }

    /// Throw the current run away and start over. Animations still in flight
    /// belong to the old epoch and never run again.
    pub fn restart(&mut self, scene: &mut dyn Scene) {
        if !self.initialized {
            log::warn!("restart before init ignored");
            return;
        }

        let epoch = self.scheduler.advance_epoch();
        self.follower.reset();
        self.camera.look_at = self.follower.look_at();
        self.fall = FallState::default();
        self.charge.reset();
        self.landing = None;

        self.track.clear(scene);
        scene.remove(self.actor.object_id());

        self.score = 0;
        self.events.push(GameEvent::Restarted);
        self.notify_success();

        self.spawn_opening_pair(scene);
        self.spawn_actor(scene);
        self.phase = GamePhase::Idle;

        log::info!("restarted (epoch {})", epoch);
        self.draw(scene);
    }

    /// Feed a press/release. Returns whether the event was acted on; events
    /// from descendants of the play surface or out of phase are dropped.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        if !self.initialized {
            log::trace!("input before init ignored");
            return false;
        }
        if event.target != EventTarget::Surface {
            log::trace!("{:?} from descendant ignored", event.kind);
            return false;
        }

        match (event.kind, self.phase) {
            (PressKind::Press, GamePhase::Idle) => {
                self.phase = GamePhase::Charging;
                self.scheduler.schedule(Task::Charge);
                true
            }
            (PressKind::Release, GamePhase::Charging) => {
                self.charge.ready = true;
                self.phase = GamePhase::Airborne;
                self.scheduler.schedule(Task::Launch);
                log::debug!(
                    "launch after {} charge ticks: x_speed={:.3} y_speed={:.3}",
                    self.charge.ticks,
                    self.charge.x_speed,
                    self.charge.y_speed
                );
                true
            }
            (kind, phase) => {
                log::trace!("{:?} ignored during {:?}", kind, phase);
                false
            }
        }
    }

    /// Recompute the frustum for a new surface size and redraw once
    pub fn resize(&mut self, viewport: Viewport, scene: &mut dyn Scene) {
        self.camera.frustum = Frustum::from_viewport(viewport, self.settings.viewport_divisor);
        self.draw(scene);
    }

    /// Run one frame: every task queued for it, in order
    pub fn tick(&mut self, scene: &mut dyn Scene) -> Result<(), GameError> {
        self.time_ticks += 1;

        for task in self.scheduler.take_frame() {
            let step = self.run_task(task, scene)?;
            if step.mutated() {
                self.draw(scene);
            }
            match step {
                Step::Continue => self.scheduler.schedule(task),
                Step::Then(next) => self.scheduler.schedule(next),
                Step::Done | Step::Idle => {}
            }
        }
        Ok(())
    }

    fn run_task(&mut self, task: Task, scene: &mut dyn Scene) -> Result<Step, GameError> {
        match task {
            Task::Charge => Ok(self.charge_step()),
            Task::Launch => self.launch_step(scene),
            Task::Fall(mode) => Ok(self.fall_tick(mode)),
            Task::CameraFollow => Ok(self.camera_step()),
        }
    }

    fn charge_step(&mut self) -> Step {
        if self.phase != GamePhase::Charging {
            return Step::Idle;
        }
        if self.actor.charge_step(&mut self.charge) {
            Step::Continue
        } else {
            Step::Idle
        }
    }

    fn launch_step(&mut self, scene: &mut dyn Scene) -> Result<Step, GameError> {
        if self.phase != GamePhase::Airborne {
            return Ok(Step::Idle);
        }
        let axis = self.track.direction().axis();
        if self.actor.flight_step(&mut self.charge, axis) {
            return Ok(Step::Continue);
        }
        self.actor.touch_down(&mut self.charge);
        self.resolve_landing(scene)
    }

    fn resolve_landing(&mut self, scene: &mut dyn Scene) -> Result<Step, GameError> {
        self.phase = GamePhase::Resolving;

        let (current, next) = self.track.latest_two()?;
        let direction = self.track.direction();
        let position = self.actor.position;
        let landing = classify(position, current, next, direction, &self.settings);
        let mode = fall_mode(&landing, direction, position, next);
        self.landing = Some(landing);

        log::debug!(
            "landed {:?} at distance {:.2} heading {:?}",
            landing.outcome,
            landing.distance,
            direction
        );

        match (landing.outcome, mode) {
            (LandingOutcome::OnNext, _) => {
                self.score_landing(scene);
                Ok(Step::Done)
            }
            (_, None) => {
                self.events.push(GameEvent::StableLanding);
                self.phase = GamePhase::Idle;
                Ok(Step::Done)
            }
            (_, Some(mode)) => {
                log::debug!("falling: {}", mode);
                self.fall = FallState::default();
                self.phase = GamePhase::Falling;
                Ok(Step::Then(Task::Fall(mode)))
            }
        }
    }

    fn score_landing(&mut self, scene: &mut dyn Scene) {
        self.phase = GamePhase::Scoring;
        self.score += 1;
        self.spawn_platform(scene);
        self.events.push(GameEvent::Scored { score: self.score });
        log::info!("score {}", self.score);
        self.notify_success();
        self.phase = GamePhase::Idle;
    }

    fn fall_tick(&mut self, mode: FallMode) -> Step {
        if self.phase != GamePhase::Falling {
            return Step::Idle;
        }
        let distance = self.landing.map_or(0.0, |l| l.distance);
        match fall_step(
            &mut self.actor,
            &mut self.fall,
            mode,
            distance,
            &self.settings,
        ) {
            FallProgress::Rotated | FallProgress::Descended => Step::Continue,
            FallProgress::Settled => {
                self.phase = GamePhase::GameOver;
                self.events.push(GameEvent::Fell { score: self.score });
                log::info!("fell ({}) with score {}", mode, self.score);
                if let Some(callback) = self.on_failure.as_mut() {
                    callback(self.score);
                }
                Step::Done
            }
        }
    }

    fn camera_step(&mut self) -> Step {
        self.follower.step();
        self.camera.look_at = self.follower.look_at();
        Step::Continue
    }

    fn spawn_opening_pair(&mut self, scene: &mut dyn Scene) {
        self.spawn_platform(scene);
        self.spawn_platform(scene);
    }

    /// Add a platform and aim the camera between the newest two
    fn spawn_platform(&mut self, scene: &mut dyn Scene) -> Spawn {
        let spawn = self.track.create_next(scene);
        self.events.push(GameEvent::PlatformCreated {
            id: spawn.created.id,
            position: spawn.created.position,
        });
        if let Some(old) = spawn.evicted {
            self.events.push(GameEvent::PlatformEvicted { id: old.id });
        }
        if let Ok((current, next)) = self.track.latest_two() {
            self.follower.retarget(current, next);
        }
        spawn
    }

    fn spawn_actor(&mut self, scene: &mut dyn Scene) {
        self.actor = JumpActor::new(self.next_actor_id);
        self.next_actor_id += 1;
        scene.add(
            self.actor.object_id(),
            SceneObject::Actor {
                actor: self.actor,
                size: Vec3::new(
                    self.settings.jumper_width,
                    self.settings.jumper_height,
                    self.settings.jumper_depth,
                ),
                color: self.settings.jumper_color,
            },
        );
    }

    fn notify_success(&mut self) {
        if let Some(callback) = self.on_success.as_mut() {
            callback(self.score);
        }
    }

    fn draw(&self, scene: &mut dyn Scene) {
        scene.draw(&self.camera, &self.actor);
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn actor(&self) -> &JumpActor {
        &self.actor
    }

    pub fn track(&self) -> &PlatformTrack {
        &self.track
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn follower(&self) -> &CameraFollower {
        &self.follower
    }

    pub fn charge(&self) -> &ChargeState {
        &self.charge
    }

    pub fn fall(&self) -> &FallState {
        &self.fall
    }

    pub fn landing(&self) -> Option<&Landing> {
        self.landing.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Tasks queued for the next frame
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
