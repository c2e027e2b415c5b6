//! # Game State Module
//!
//! The engine: owns the grid, the player's pose, the current mode and the
//! collaborators, and routes every input according to the mode.
//!
//! Modes form a single enum, so a pending encounter and an active battle can
//! never coexist. All mutation happens in [`GameState::handle_input`]; the
//! render loop reads a [`FrameSnapshot`] borrowed from the state.

use crate::config::EngineConfig;
use crate::game::{
    Battle, BattleAction, BattleConfig, BattleEvent, BattleLogEntry, BattleResult, BattleSummary, Dice,
    EncounterController, Grid, MonsterInstance, MotionController, MoveDirection, Negotiation, Pose,
    Position, Turn,
};
use crate::generation::{utils::create_rng, MazeGenerator};
use crate::input::PlayerInput;
use crate::lldm::Notifiers;
use crate::rendering::LightSettings;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::mem;

/// What the engine is doing right now.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Exploring,
    /// A monster appeared; waiting for negotiate or fight
    Negotiating(MonsterInstance),
    Fighting(Battle),
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Exploring => ModeKind::Exploring,
            Mode::Negotiating(_) => ModeKind::Negotiating,
            Mode::Fighting(_) => ModeKind::Fighting,
        }
    }
}

/// [`Mode`] without its payload, for input binding and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeKind {
    Exploring,
    Negotiating,
    Fighting,
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ModeKind::Exploring => "exploring",
            ModeKind::Negotiating => "negotiating",
            ModeKind::Fighting => "fighting",
        };
        f.write_str(label)
    }
}

/// Something that happened while handling an input.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PartyMoved { cell: Position },
    /// A move into a wall was rejected; the pose is unchanged
    MoveBlocked,
    PartyTurned { heading: f32 },
    EncounterStarted { monster: String },
    NegotiationSucceeded { monster: String },
    NegotiationFailed { monster: String },
    BattleStarted { monster: String },
    TacticalMove { position: Position },
    Blow(BattleLogEntry),
    RetreatFailed,
    BattleEnded { result: BattleResult, xp: u32 },
    LightsChanged(LightSettings),
}

impl GameEvent {
    /// Message-log line for this event, if it deserves one.
    pub fn describe(&self) -> Option<String> {
        match self {
            GameEvent::PartyMoved { .. }
            | GameEvent::MoveBlocked
            | GameEvent::PartyTurned { .. }
            | GameEvent::TacticalMove { .. } => None,
            GameEvent::EncounterStarted { monster } => {
                Some(format!("A {monster} blocks the way! (N)egotiate or (F)ight?"))
            }
            GameEvent::NegotiationSucceeded { monster } => {
                Some(format!("The {monster} lets the party pass."))
            }
            GameEvent::NegotiationFailed { monster } => {
                Some(format!("The {monster} will not parley!"))
            }
            GameEvent::BattleStarted { monster } => Some(format!("Battle with the {monster}!")),
            GameEvent::Blow(entry) => Some(entry.to_string()),
            GameEvent::RetreatFailed => Some("The party fails to break away.".to_string()),
            GameEvent::BattleEnded { result, xp } => Some(match result {
                BattleResult::Victory => format!("Victory! The party earns {xp} XP."),
                BattleResult::Defeat => "The party is beaten back into the dark.".to_string(),
                BattleResult::Fled => "The party escapes.".to_string(),
            }),
            GameEvent::LightsChanged(lights) => Some(format!(
                "Ambient {:.1}, torch {:.1}",
                lights.ambient, lights.torch
            )),
        }
    }
}

/// Session statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    pub steps_taken: u64,
    pub encounters: u32,
    pub negotiated: u32,
    pub victories: u32,
    pub defeats: u32,
    pub flights: u32,
    pub xp_awarded: u64,
}

impl GameStatistics {
    /// Updates statistics based on a game event.
    pub fn update_from_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PartyMoved { .. } => self.steps_taken += 1,
            GameEvent::EncounterStarted { .. } => self.encounters += 1,
            GameEvent::NegotiationSucceeded { .. } => self.negotiated += 1,
            GameEvent::BattleEnded { result, xp } => {
                match result {
                    BattleResult::Victory => self.victories += 1,
                    BattleResult::Defeat => self.defeats += 1,
                    BattleResult::Fled => self.flights += 1,
                }
                self.xp_awarded += u64::from(*xp);
            }
            _ => {}
        }
    }
}

/// Overlay drawn above the first-person view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Overlay<'a> {
    None,
    Dialogue(&'a MonsterInstance),
    Battle(&'a Battle),
}

/// Read-only view of the state for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot<'a> {
    pub grid: &'a Grid,
    pub pose: Pose,
    pub lights: LightSettings,
    pub overlay: Overlay<'a>,
    pub explored_percent: f32,
    pub statistics: &'a GameStatistics,
}

impl FrameSnapshot<'_> {
    pub fn mode(&self) -> ModeKind {
        match self.overlay {
            Overlay::None => ModeKind::Exploring,
            Overlay::Dialogue(_) => ModeKind::Negotiating,
            Overlay::Battle(_) => ModeKind::Fighting,
        }
    }
}

/// Central game state.
pub struct GameState {
    grid: Grid,
    pose: Pose,
    mode: Mode,
    lights: LightSettings,
    motion: MotionController,
    encounters: EncounterController,
    battle_config: BattleConfig,
    notifiers: Notifiers,
    outbox: Vec<Notice>,
    dice: Box<dyn Dice>,
    visited: HashSet<Position>,
    statistics: GameStatistics,
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("pose", &self.pose)
            .field("mode", &self.mode.kind())
            .field("lights", &self.lights)
            .field("statistics", &self.statistics)
            .finish_non_exhaustive()
    }
}

impl GameState {
    /// Generates a fresh dungeon and places the party at the spawn point,
    /// facing east.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{EngineConfig, GameState, ModeKind, Notifiers};
    ///
    /// let game_state = GameState::new(&EngineConfig::default(), Notifiers::silent());
    /// assert_eq!(game_state.mode_kind(), ModeKind::Exploring);
    /// assert!(game_state.grid().is_floor(game_state.pose().cell()));
    /// ```
    pub fn new(config: &EngineConfig, notifiers: Notifiers) -> Self {
        let mut rng = create_rng();
        let layout = MazeGenerator::new().generate_layout(&config.generation, &mut rng);
        let spawn = layout.spawn_cell().unwrap_or_else(|| {
            Position::new(
                (layout.grid.width() / 2) as i32,
                (layout.grid.height() / 2) as i32,
            )
        });
        info!(
            "Dungeon ready: {} rooms, {} floor cells, party at {:?}",
            layout.rooms.len(),
            layout.grid.floor_count(),
            spawn
        );
        Self::with_grid(
            layout.grid,
            Pose::centered_in(spawn, 0.0),
            config,
            notifiers,
            Box::new(rng),
        )
    }

    /// Builds an engine over an existing grid with injected randomness.
    pub fn with_grid(
        grid: Grid,
        pose: Pose,
        config: &EngineConfig,
        notifiers: Notifiers,
        dice: Box<dyn Dice>,
    ) -> Self {
        let mut visited = HashSet::new();
        if grid.is_floor(pose.cell()) {
            visited.insert(pose.cell());
        }
        Self {
            grid,
            pose,
            mode: Mode::Exploring,
            lights: config.lights,
            motion: MotionController::new(config.motion.clone()),
            encounters: EncounterController::new(config.encounter.clone()),
            battle_config: config.battle.clone(),
            notifiers,
            outbox: Vec::new(),
            dice,
            visited,
            statistics: GameStatistics::default(),
        }
    }

    /// Replaces the encounter controller, e.g. with a custom monster table.
    pub fn with_encounters(mut self, encounters: EncounterController) -> Self {
        self.encounters = encounters;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn mode_kind(&self) -> ModeKind {
        self.mode.kind()
    }

    pub fn lights(&self) -> LightSettings {
        self.lights
    }

    pub fn statistics(&self) -> &GameStatistics {
        &self.statistics
    }

    /// The battle in progress, if any.
    pub fn battle(&self) -> Option<&Battle> {
        match &self.mode {
            Mode::Fighting(battle) => Some(battle),
            _ => None,
        }
    }

    /// Share of floor cells the party has stood in, in percent.
    pub fn explored_percent(&self) -> f32 {
        let floor = self.grid.floor_count();
        if floor == 0 {
            return 0.0;
        }
        self.visited.len() as f32 * 100.0 / floor as f32
    }

    /// Borrows everything the display needs for one frame.
    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        let overlay = match &self.mode {
            Mode::Exploring => Overlay::None,
            Mode::Negotiating(monster) => Overlay::Dialogue(monster),
            Mode::Fighting(battle) => Overlay::Battle(battle),
        };
        FrameSnapshot {
            grid: &self.grid,
            pose: self.pose,
            lights: self.lights,
            overlay,
            explored_percent: self.explored_percent(),
            statistics: &self.statistics,
        }
    }

    /// Applies one input. Inputs the current mode does not accept are
    /// ignored and produce no events.
    pub fn handle_input(&mut self, input: PlayerInput) -> Vec<GameEvent> {
        let events = match input {
            PlayerInput::AdjustAmbient(delta) => self.adjust_lights(delta, 0.0),
            PlayerInput::AdjustTorch(delta) => self.adjust_lights(0.0, delta),
            PlayerInput::Quit | PlayerInput::Help => Vec::new(),
            _ => match self.mode.kind() {
                ModeKind::Exploring => self.explore(input),
                ModeKind::Negotiating => self.parley(input),
                ModeKind::Fighting => self.fight(input),
            },
        };

        for event in &events {
            self.statistics.update_from_event(event);
        }
        for notice in mem::take(&mut self.outbox) {
            notice.deliver(&mut self.notifiers);
        }
        events
    }

    fn adjust_lights(&mut self, ambient: f32, torch: f32) -> Vec<GameEvent> {
        let adjusted = self.lights.adjusted(ambient, torch);
        if adjusted == self.lights {
            return Vec::new();
        }
        self.lights = adjusted;
        vec![GameEvent::LightsChanged(adjusted)]
    }

    fn explore(&mut self, input: PlayerInput) -> Vec<GameEvent> {
        match input {
            PlayerInput::MoveForward => self.step(MoveDirection::Forward),
            PlayerInput::MoveBackward => self.step(MoveDirection::Backward),
            PlayerInput::Turn(turn) => self.turn(turn),
            _ => Vec::new(),
        }
    }

    fn turn(&mut self, turn: Turn) -> Vec<GameEvent> {
        self.pose = self.motion.rotate(&self.pose, turn);
        vec![GameEvent::PartyTurned {
            heading: self.pose.heading(),
        }]
    }

    fn step(&mut self, direction: MoveDirection) -> Vec<GameEvent> {
        let Some(pose) = self.motion.try_move(&self.grid, &self.pose, direction) else {
            debug!("Move blocked at {:?}", self.pose.cell());
            return vec![GameEvent::MoveBlocked];
        };
        let delta = (pose.x - self.pose.x, pose.y - self.pose.y);
        self.pose = pose;
        let cell = pose.cell();
        self.visited.insert(cell);
        debug!("Party moved to {cell:?}");

        self.outbox.push(Notice::PartyMoved {
            cell,
            delta,
            heading: pose.heading(),
        });
        self.outbox.push(Notice::Progress {
            percent: self.explored_percent(),
            hint: position_hint(&self.grid, cell),
        });

        let mut events = vec![GameEvent::PartyMoved { cell }];
        if let Some(monster) = self.encounters.maybe_trigger(&mut *self.dice) {
            info!("Encounter: {} appears", monster.name);
            events.push(GameEvent::EncounterStarted {
                monster: monster.name.clone(),
            });
            self.outbox.push(Notice::EncounterStarted(monster.clone()));
            self.mode = Mode::Negotiating(monster);
        }
        events
    }

    fn parley(&mut self, input: PlayerInput) -> Vec<GameEvent> {
        let negotiate = match input {
            PlayerInput::Negotiate => true,
            PlayerInput::Fight => false,
            _ => return Vec::new(),
        };
        let monster = match mem::replace(&mut self.mode, Mode::Exploring) {
            Mode::Negotiating(monster) => monster,
            other => {
                self.mode = other;
                return Vec::new();
            }
        };

        if !negotiate {
            return self.start_battle(monster, Vec::new());
        }

        let name = monster.name.clone();
        match self.encounters.negotiate(monster, &mut *self.dice) {
            Negotiation::Peace => {
                info!("Negotiation with {name} succeeded");
                self.outbox
                    .push(Notice::Narrative(format!("The {name} lets the party pass.")));
                vec![GameEvent::NegotiationSucceeded { monster: name }]
            }
            Negotiation::Refused(monster) => {
                info!("Negotiation with {name} failed");
                self.start_battle(monster, vec![GameEvent::NegotiationFailed { monster: name }])
            }
        }
    }

    fn start_battle(&mut self, monster: MonsterInstance, mut events: Vec<GameEvent>) -> Vec<GameEvent> {
        let party_roll = self.dice.roll(1, 20);
        let monster_roll = self.dice.roll(1, 20);

        info!("Battle started against {}", monster.name);
        events.push(GameEvent::BattleStarted {
            monster: monster.name.clone(),
        });
        self.outbox
            .push(Notice::Narrative(format!("The {} attacks!", monster.name)));
        self.outbox.push(Notice::Initiative {
            monster: monster.clone(),
            party_roll,
            monster_roll,
        });
        self.mode = Mode::Fighting(Battle::new(monster, self.battle_config.clone()));
        events
    }

    fn fight(&mut self, input: PlayerInput) -> Vec<GameEvent> {
        let action = match input {
            PlayerInput::TacticalMove(direction) => BattleAction::Move(direction),
            PlayerInput::Attack => BattleAction::Attack,
            PlayerInput::Flee => BattleAction::Retreat,
            _ => return Vec::new(),
        };
        let Mode::Fighting(battle) = &mut self.mode else {
            return Vec::new();
        };

        let outcome = battle.act(action, &mut *self.dice);
        let mut events = Vec::with_capacity(outcome.len());
        let mut resolved = None;
        for event in outcome {
            match event {
                BattleEvent::Moved(position) => events.push(GameEvent::TacticalMove { position }),
                BattleEvent::Hit(entry) => {
                    self.outbox.push(Notice::Blow(entry.clone()));
                    events.push(GameEvent::Blow(entry));
                }
                BattleEvent::RetreatFailed => events.push(GameEvent::RetreatFailed),
                BattleEvent::Resolved(result) => resolved = Some(result),
            }
        }

        if let Some(result) = resolved {
            events.push(self.finish_battle(result));
        }
        events
    }

    /// Drops the battle and its monster and returns to exploring.
    fn finish_battle(&mut self, result: BattleResult) -> GameEvent {
        let summary = match mem::replace(&mut self.mode, Mode::Exploring) {
            Mode::Fighting(battle) => battle.summary(),
            other => {
                self.mode = other;
                return GameEvent::BattleEnded { result, xp: 0 };
            }
        };

        let xp = if result == BattleResult::Victory {
            self.battle_config.victory_xp
        } else {
            0
        };
        info!("Battle ended in {result}: {summary}");
        if xp > 0 {
            self.outbox.push(Notice::Xp {
                amount: xp,
                reason: format!("defeated {}", summary.monster_name),
            });
        }
        self.outbox.push(Notice::Finished { result, summary });

        GameEvent::BattleEnded { result, xp }
    }
}

/// A collaborator notification, held back until the input that caused it has
/// been fully applied.
#[derive(Debug)]
enum Notice {
    PartyMoved {
        cell: Position,
        delta: (f32, f32),
        heading: f32,
    },
    Progress {
        percent: f32,
        hint: &'static str,
    },
    EncounterStarted(MonsterInstance),
    Initiative {
        monster: MonsterInstance,
        party_roll: u32,
        monster_roll: u32,
    },
    Narrative(String),
    Blow(BattleLogEntry),
    Xp {
        amount: u32,
        reason: String,
    },
    Finished {
        result: BattleResult,
        summary: BattleSummary,
    },
}

impl Notice {
    fn deliver(self, notifiers: &mut Notifiers) {
        match self {
            Notice::PartyMoved {
                cell,
                delta,
                heading,
            } => notifiers.party_moved(cell, delta, heading),
            Notice::Progress { percent, hint } => notifiers.exploration_progress(percent, hint),
            Notice::EncounterStarted(monster) => notifiers.encounter_started(&monster),
            Notice::Initiative {
                monster,
                party_roll,
                monster_roll,
            } => notifiers.initiative_rolled(&monster, party_roll, monster_roll),
            Notice::Narrative(text) => notifiers.battle_narrative(&text),
            Notice::Blow(entry) => notifiers.blow_landed(&entry),
            Notice::Xp { amount, reason } => notifiers.award_xp(amount, &reason),
            Notice::Finished { result, summary } => notifiers.battle_finished(result, &summary),
        }
    }
}

/// Coarse compass region of a cell, splitting the grid into thirds on each
/// axis.
///
/// # Examples
///
/// ```
/// use delve::{position_hint, Grid, Position};
///
/// let grid = Grid::from_rows(&["######"; 6]).unwrap();
/// assert_eq!(position_hint(&grid, Position::new(0, 0)), "north-west");
/// assert_eq!(position_hint(&grid, Position::new(5, 3)), "east");
/// ```
pub fn position_hint(grid: &Grid, cell: Position) -> &'static str {
    let third = |value: i32, size: usize| -> usize {
        let size = size.max(1) as i64;
        ((i64::from(value.max(0)) * 3) / size).min(2) as usize
    };
    const REGIONS: [[&str; 3]; 3] = [
        ["north-west", "north", "north-east"],
        ["west", "centre", "east"],
        ["south-west", "south", "south-east"],
    ];
    REGIONS[third(cell.y, grid.height())][third(cell.x, grid.width())]
}
