//! Kitchen engine - main entry point for running a shift

use std::path::Path;

use backroom_logic::cutscene::{CutscenePlayer, CutsceneStep};
use backroom_logic::data::GameData;
use backroom_logic::day::{day_end_outcome, lowered_threshold, DayClock, DayOutcome};
use backroom_logic::geometry::Vec2;
use backroom_logic::morality::{DecisionEffect, MoralLedger};
use backroom_logic::orders::{OrderBoard, Ticket};
use backroom_logic::upgrades::ExtortionUpgrade;
use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::components::*;
use crate::config::KitchenConfig;
use crate::error::KitchenError;
use crate::events::{EventLog, InventoryOwner, KitchenEvent};
use crate::persistence::{self, GameState, KitchenState, SaveError};
use crate::systems::*;

/// Main kitchen engine
pub struct Kitchen {
    /// ECS world containing the player, stations, items and customers
    pub world: World,
    /// Recipe, ingredient, station and cutscene tables
    pub data: GameData,
    pub config: KitchenConfig,
    /// Simulation time in seconds, paused during cutscenes
    pub sim_time: f64,
    pub gold: i32,
    pub lose_threshold: i32,
    pub clock: DayClock,
    pub orders: OrderBoard,
    pub morality: MoralLedger,
    pub extortion: ExtortionUpgrade,
    pub events: EventLog,
    cutscene: Option<CutscenePlayer>,
    game_over: bool,
    rng: StdRng,
    next_item_id: u32,
    last_spawn: f64,
    time_scale: f32,
}

impl Kitchen {
    /// Create a kitchen using the embedded data tables
    pub fn new(config: KitchenConfig) -> Result<Self, KitchenError> {
        Self::with_data(config, GameData::embedded()?)
    }

    /// Create a kitchen from replacement data tables
    pub fn with_data(config: KitchenConfig, data: GameData) -> Result<Self, KitchenError> {
        let mut kitchen = Self {
            world: World::new(),
            rng: StdRng::seed_from_u64(config.seed),
            gold: config.starting_gold,
            lose_threshold: config.lose_threshold,
            clock: DayClock::new(1, config.day_length),
            extortion: ExtortionUpgrade::new(config.extortion_duration),
            morality: default_decisions(),
            orders: OrderBoard::new(),
            events: EventLog::new(),
            cutscene: None,
            game_over: false,
            next_item_id: 1,
            last_spawn: 0.0,
            sim_time: 0.0,
            time_scale: 1.0,
            data,
            config,
        };
        kitchen.spawn_kitchen()?;

        if kitchen.config.play_intro && kitchen.data.cutscene("backstory").is_some() {
            kitchen.play_cutscene("backstory")?;
        }
        log::info!(
            "kitchen ready: {} stations, {} recipes, gold {}",
            kitchen.config.stations.len(),
            kitchen.data.recipes.len(),
            kitchen.gold
        );
        Ok(kitchen)
    }

    fn spawn_kitchen(&mut self) -> Result<(), KitchenError> {
        self.world.spawn((
            Player::default(),
            Position::from(self.config.player_start),
            Inventory::new(self.config.player_capacity),
        ));

        for (index, placement) in self.config.stations.iter().enumerate() {
            let spec = self
                .data
                .station(placement.kind.data_key())
                .ok_or(KitchenError::MissingStationData(placement.kind))?;
            self.world.spawn((
                Station {
                    id: StationId(index as u32 + 1),
                    kind: placement.kind,
                    accepts: spec.accepts.clone(),
                },
                Position::from(placement.position),
                Inventory::new(spec.capacity),
            ));
        }
        Ok(())
    }

    /// Update the kitchen by delta_seconds
    pub fn update(&mut self, delta_seconds: f32) {
        let dt = delta_seconds * self.time_scale;
        if dt <= 0.0 {
            return;
        }

        // Cutscenes pause the kitchen
        if let Some(player) = self.cutscene.as_mut() {
            if player.update(dt) == CutsceneStep::Ended {
                self.finish_cutscene();
            }
            return;
        }
        if self.game_over {
            return;
        }

        self.sim_time += dt as f64;

        // Movement
        let bounds = WalkBounds {
            min_x: self.config.walk_min_x,
            max_x: self.config.walk_max_x,
            speed: self.config.player_speed,
        };
        player_movement_system(&mut self.world, bounds, dt);
        let arrived = path_follow_system(&mut self.world, dt);
        customer_arrival_system(
            &mut self.world,
            &arrived,
            &mut self.orders,
            &self.data.recipes,
            self.sim_time,
            &mut self.events,
        );

        // Cook and chop timers
        item_timer_system(&mut self.world, dt, &mut self.events);

        // Tickets
        order_expiry_system(
            &mut self.world,
            &mut self.orders,
            self.sim_time,
            self.config.exit,
            self.config.customer_speed,
            &mut self.events,
        );

        if self.sim_time - self.last_spawn >= self.config.spawn_interval {
            customer_spawn_system(&mut self.world, &self.data.recipes, &self.config, &mut self.rng);
            self.last_spawn = self.sim_time;
        }

        if self.extortion.update(self.sim_time) {
            log::info!("extortion expired");
            self.events.push(KitchenEvent::ExtortionExpired);
        }

        if self.clock.tick(dt as f64) {
            self.end_day();
        }
    }

    fn end_day(&mut self) {
        let day = self.clock.day;
        log::info!("day {} over with {} gold (threshold {})", day, self.gold, self.lose_threshold);
        self.events.push(KitchenEvent::DayEnded { day, gold: self.gold });

        match day_end_outcome(self.gold, self.lose_threshold) {
            DayOutcome::Fired => {
                log::warn!("fired on day {} with {} gold", day, self.gold);
                self.game_over = true;
                self.events.push(KitchenEvent::Fired { day, gold: self.gold });
                if let Err(e) = self.play_cutscene("fired_end") {
                    log::warn!("{}", e);
                }
            }
            DayOutcome::Continue => {
                self.clock.start_next_day();
                self.orders.clear();
                self.clear_customers();
                self.last_spawn = self.sim_time;

                if self.config.autosave {
                    if let Err(e) = self.save_profile() {
                        log::error!("autosave failed: {}", e);
                    }
                }
                let moral_scene = format!("moral_day{}", day);
                if self.data.cutscene(&moral_scene).is_some() {
                    if let Err(e) = self.play_cutscene(&moral_scene) {
                        log::warn!("{}", e);
                    }
                }
            }
        }
    }

    fn clear_customers(&mut self) {
        let customers: Vec<Entity> = self
            .world
            .query::<&Customer>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();
        for entity in customers {
            let _ = self.world.despawn(entity);
        }
    }

    fn next_id(&mut self) -> ItemId {
        let id = ItemId(self.next_item_id);
        self.next_item_id += 1;
        id
    }

    pub fn player_entity(&self) -> Result<Entity, KitchenError> {
        self.world
            .query::<&Player>()
            .iter()
            .next()
            .map(|(entity, _)| entity)
            .ok_or(KitchenError::NoPlayer)
    }

    pub fn station_entity(&self, id: StationId) -> Result<Entity, KitchenError> {
        self.world
            .query::<&Station>()
            .iter()
            .find(|(_, s)| s.id == id)
            .map(|(entity, _)| entity)
            .ok_or(KitchenError::UnknownStation(id))
    }

    /// First station of `kind`.
    pub fn station_id(&self, kind: StationKind) -> Option<StationId> {
        self.world
            .query::<&Station>()
            .iter()
            .map(|(_, s)| s)
            .filter(|s| s.kind == kind)
            .map(|s| s.id)
            .min()
    }

    // ── Player ──

    /// Start walking left (negative) or right (positive).
    pub fn walk(&mut self, direction: f32) -> Result<(), KitchenError> {
        let player = self.player_entity()?;
        if direction == 0.0 {
            let _ = self.world.remove_one::<Walking>(player);
            return Ok(());
        }
        self.world.insert_one(
            player,
            Walking {
                direction: direction.signum(),
            },
        )?;
        Ok(())
    }

    pub fn stop_walking(&mut self) -> Result<(), KitchenError> {
        self.walk(0.0)
    }

    /// Put the player at `x` on the counter, clamped to the walkable range.
    pub fn place_player(&mut self, x: f32) -> Result<(), KitchenError> {
        let player = self.player_entity()?;
        let x = x.clamp(self.config.walk_min_x, self.config.walk_max_x);
        self.world.get::<&mut Position>(player)?.point.x = x;
        Ok(())
    }

    pub fn player_position(&self) -> Result<Vec2, KitchenError> {
        let player = self.player_entity()?;
        Ok(self.world.get::<&Position>(player)?.point)
    }

    pub fn tooltip(&self) -> Option<Tooltip> {
        let point = self.player_position().ok()?;
        interaction_tooltip(&self.world, point, self.config.sensor_range)
    }

    /// Interact with the closest station using a tag: `"default"`, `"chop"`
    /// or `"stopChop"`. Unknown tags are ignored.
    pub fn interact(&mut self, tag: &str) -> Result<InteractionOutcome, KitchenError> {
        match tag.parse::<Interaction>() {
            Ok(interaction) => self.interact_with(interaction),
            Err(e) => {
                log::warn!("{}", e);
                Ok(InteractionOutcome::Ignored)
            }
        }
    }

    pub fn interact_with(&mut self, interaction: Interaction) -> Result<InteractionOutcome, KitchenError> {
        if self.cutscene.is_some() || self.game_over {
            return Ok(InteractionOutcome::Nothing);
        }
        let player = self.player_entity()?;
        let point = self.world.get::<&Position>(player)?.point;
        let station = closest_station(&self.world, point).ok_or(KitchenError::NoStation)?;

        let mut ctx = ServiceContext {
            orders: &mut self.orders,
            recipes: &self.data.recipes,
            gold: &mut self.gold,
            now: self.sim_time,
            price_multiplier: self.extortion.price_multiplier(),
            exit: self.config.exit,
            customer_speed: self.config.customer_speed,
            events: &mut self.events,
        };
        dispatch_interaction(&mut self.world, player, station, interaction, &mut ctx)
    }

    // ── Items ──

    /// Spawn a raw ingredient by name, not yet held by anyone.
    pub fn spawn_ingredient(&mut self, name: &str) -> Result<ItemId, KitchenError> {
        let spec = self
            .data
            .ingredient(name)
            .ok_or_else(|| KitchenError::UnknownIngredient(name.to_string()))?
            .clone();
        let id = self.next_id();
        spawn_ingredient(&mut self.world, id, &spec);
        Ok(id)
    }

    /// Hand an unheld item to the player.
    pub fn give_player(&mut self, item: ItemId) -> Result<(), KitchenError> {
        find_item(&self.world, item).ok_or(KitchenError::UnknownItem(item))?;
        let player = self.player_entity()?;
        self.world.get::<&mut Inventory>(player)?.add_item(item)?;
        self.events.push(KitchenEvent::InventoryUpdated {
            owner: InventoryOwner::Player,
        });
        Ok(())
    }

    /// Combine the ingredients on a bench into the matching meal.
    /// Returns `None` for other stations or when no recipe matches.
    pub fn assemble_meal(&mut self, station: StationId) -> Result<Option<ItemId>, KitchenError> {
        let entity = self.station_entity(station)?;
        if self.world.get::<&Station>(entity)?.kind != StationKind::Bench {
            return Ok(None);
        }
        let mut inventory = (*self.world.get::<&Inventory>(entity)?).clone();
        let Some((recipe, parts)) = match_assembly(&self.world, &inventory, &self.data.recipes) else {
            return Ok(None);
        };
        let recipe = recipe.clone();

        inventory.drain();
        let id = self.next_id();
        spawn_meal(&mut self.world, id, &recipe, parts);
        inventory.add_item(id)?;
        *self.world.get::<&mut Inventory>(entity)? = inventory;

        log::info!("assembled {}", recipe.display_name);
        self.events.push(KitchenEvent::MealAssembled {
            item: id,
            recipe: recipe.key,
        });
        self.events.push(KitchenEvent::InventoryUpdated {
            owner: InventoryOwner::Station(station),
        });
        Ok(Some(id))
    }

    pub fn player_inventory(&self) -> Result<InventorySnapshot, KitchenError> {
        inventory_snapshot(&self.world, self.player_entity()?)
    }

    pub fn station_inventory(&self, station: StationId) -> Result<InventorySnapshot, KitchenError> {
        inventory_snapshot(&self.world, self.station_entity(station)?)
    }

    // ── Orders ──

    /// Put a ticket on the docket line without a customer.
    pub fn place_order(&mut self, recipe: &str) -> Result<u32, KitchenError> {
        let make_time = self
            .data
            .recipes
            .get(recipe)
            .ok_or_else(|| KitchenError::UnknownRecipe(recipe.to_string()))?
            .make_time;
        Ok(self.orders.add_order(recipe, make_time, self.sim_time))
    }

    pub fn big_ticket(&self) -> Option<&Ticket> {
        self.orders.big_ticket()
    }

    pub fn shift_dockets_left(&mut self) {
        self.orders.shift_left();
    }

    pub fn shift_dockets_right(&mut self) {
        self.orders.shift_right();
    }

    pub fn customer_count(&self) -> usize {
        self.world.query::<&Customer>().iter().count()
    }

    // ── Cutscenes ──

    pub fn play_cutscene(&mut self, name: &str) -> Result<(), KitchenError> {
        let script = self
            .data
            .cutscene(name)
            .ok_or_else(|| KitchenError::UnknownCutscene(name.to_string()))?
            .clone();
        log::info!("playing cutscene {}", name);
        self.cutscene = Some(CutscenePlayer::new(script));
        self.events.push(KitchenEvent::CutsceneStarted { name: name.to_string() });
        Ok(())
    }

    pub fn cutscene(&self) -> Option<&CutscenePlayer> {
        self.cutscene.as_ref()
    }

    pub fn advance_cutscene_text(&mut self) -> CutsceneStep {
        self.drive_cutscene(CutscenePlayer::advance_text)
    }

    pub fn next_cutscene_scene(&mut self) -> CutsceneStep {
        self.drive_cutscene(CutscenePlayer::next_scene)
    }

    pub fn skip_cutscene(&mut self) -> CutsceneStep {
        self.drive_cutscene(CutscenePlayer::skip)
    }

    fn drive_cutscene(&mut self, step: fn(&mut CutscenePlayer) -> CutsceneStep) -> CutsceneStep {
        let Some(player) = self.cutscene.as_mut() else {
            return CutsceneStep::Unchanged;
        };
        let result = step(player);
        if result == CutsceneStep::Ended {
            self.finish_cutscene();
        }
        result
    }

    fn finish_cutscene(&mut self) {
        if let Some(player) = self.cutscene.take() {
            log::info!("cutscene {} ended", player.name());
            self.events.push(KitchenEvent::CutsceneEnded {
                name: player.name().to_string(),
            });
        }
    }

    // ── Decisions and upgrades ──

    /// Answer moral decision `number` (1-based) and apply its consequence.
    pub fn answer_decision(&mut self, number: usize, moral: bool) -> DecisionEffect {
        let effect = self.morality.set_decision(number, moral);
        match effect {
            DecisionEffect::None => {}
            DecisionEffect::AddGold(amount) => self.gold += amount,
            DecisionEffect::LowerLoseThreshold => {
                self.lose_threshold = lowered_threshold(self.lose_threshold);
            }
            DecisionEffect::SpeedBoost => {
                if let Ok(player) = self.player_entity() {
                    if let Ok(mut p) = self.world.get::<&mut Player>(player) {
                        p.speed_multiplier = self.config.speed_boost;
                    }
                }
            }
        }
        log::info!("decision {} answered {}: {:?}", number, moral, effect);
        effect
    }

    /// Turn on extortion; returns the gold it cost.
    pub fn activate_extortion(&mut self) -> i32 {
        let cost = self.extortion.activate(self.sim_time, self.gold);
        self.gold -= cost;
        self.events.push(KitchenEvent::ExtortionStarted { cost });
        cost
    }

    // ── Status ──

    pub fn gold(&self) -> i32 {
        self.gold
    }

    pub fn day(&self) -> u32 {
        self.clock.day
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Set time scale (1.0 = real-time, 2.0 = 2x speed, etc.)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn drain_events(&mut self) -> Vec<KitchenEvent> {
        self.events.drain()
    }

    // ── Persistence ──

    fn state(&self) -> KitchenState {
        KitchenState {
            config: self.config.clone(),
            sim_time: self.sim_time,
            time_scale: self.time_scale,
            gold: self.gold,
            lose_threshold: self.lose_threshold,
            clock: self.clock,
            orders: self.orders.clone(),
            morality: self.morality.clone(),
            extortion: self.extortion,
            cutscene: self.cutscene.clone(),
            game_over: self.game_over,
            next_item_id: self.next_item_id,
            last_spawn: self.last_spawn,
        }
    }

    /// Save the full kitchen to a writer
    pub fn save<W: std::io::Write>(&self, writer: W) -> Result<(), SaveError> {
        persistence::save_kitchen(writer, &self.world, self.state())
    }

    /// Load the full kitchen from a reader. The spawn RNG is reseeded from
    /// the configured seed and the loaded day.
    pub fn load<R: std::io::Read>(&mut self, reader: R) -> Result<(), SaveError> {
        let loaded = persistence::load_kitchen(reader)?;
        let state = loaded.state;

        self.world = loaded.world;
        self.sim_time = state.sim_time;
        self.time_scale = state.time_scale;
        self.gold = state.gold;
        self.lose_threshold = state.lose_threshold;
        self.clock = state.clock;
        self.orders = state.orders;
        self.morality = state.morality;
        self.extortion = state.extortion;
        self.cutscene = state.cutscene;
        self.game_over = state.game_over;
        self.next_item_id = state.next_item_id;
        self.last_spawn = state.last_spawn;
        self.config = state.config;
        self.rng = StdRng::seed_from_u64(self.config.seed.wrapping_add(self.clock.day as u64));
        self.events = EventLog::new();
        Ok(())
    }

    pub fn game_state(&self) -> GameState {
        GameState {
            money: self.gold,
            day: self.clock.day,
        }
    }

    /// Write money and day to the configured save path.
    pub fn save_profile(&self) -> Result<GameState, SaveError> {
        let path = self.config.save_path.clone();
        self.save_profile_to(&path)
    }

    pub fn save_profile_to(&self, path: &Path) -> Result<GameState, SaveError> {
        let state = self.game_state();
        persistence::save_profile(path, &state)?;
        Ok(state)
    }

    pub fn load_profile(&mut self) -> Result<GameState, SaveError> {
        let path = self.config.save_path.clone();
        self.load_profile_from(&path)
    }

    /// Restore money and day; the day starts from the beginning.
    pub fn load_profile_from(&mut self, path: &Path) -> Result<GameState, SaveError> {
        let state = persistence::load_profile(path)?;
        self.gold = state.money;
        self.clock = DayClock::new(state.day.max(1), self.config.day_length);
        Ok(state)
    }
}

/// The boss's four questions, in the order the moral cutscenes ask them.
fn default_decisions() -> MoralLedger {
    let mut ledger = MoralLedger::new();
    ledger.add_question_with("Hold the package?", false, 40);
    ledger.add_question_with("Host the gambling?", false, 30);
    ledger.add_question_with("Bribe the inspector?", false, 0);
    ledger.add_question_with("Take the shortcut?", false, 0);
    ledger
}

#[cfg(test)]
mod tests {
    use super::*;
    use backroom_logic::scoring::Satisfaction;
    use backroom_logic::timer::IngredientState;

    fn quiet_config() -> KitchenConfig {
        KitchenConfig {
            play_intro: false,
            autosave: false,
            spawn_interval: 10_000.0,
            ..Default::default()
        }
    }

    fn station_x(kitchen: &Kitchen, kind: StationKind) -> f32 {
        kitchen
            .config
            .stations
            .iter()
            .find(|p| p.kind == kind)
            .unwrap()
            .position
            .x
    }

    #[test]
    fn test_kitchen_creation() {
        let kitchen = Kitchen::new(quiet_config()).unwrap();
        assert_eq!(kitchen.gold(), 100);
        assert_eq!(kitchen.day(), 1);
        assert_eq!(kitchen.world.query::<&Station>().iter().count(), 6);
        assert!(kitchen.cutscene().is_none());
        let bench = kitchen.station_id(StationKind::Bench).unwrap();
        assert_eq!(kitchen.station_inventory(bench).unwrap().slots.len(), 4);
    }

    #[test]
    fn test_intro_pauses_kitchen() {
        let mut kitchen = Kitchen::new(KitchenConfig {
            play_intro: true,
            autosave: false,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(kitchen.cutscene().unwrap().name(), "backstory");
        kitchen.update(1.0);
        assert_eq!(kitchen.sim_time(), 0.0);
        assert_eq!(kitchen.interact("default").unwrap(), InteractionOutcome::Nothing);

        assert_eq!(kitchen.skip_cutscene(), CutsceneStep::Ended);
        kitchen.update(1.0);
        assert_eq!(kitchen.sim_time(), 1.0);
    }

    #[test]
    fn test_unknown_tag_ignored() {
        let mut kitchen = Kitchen::new(quiet_config()).unwrap();
        assert_eq!(kitchen.interact("dance").unwrap(), InteractionOutcome::Ignored);
    }

    #[test]
    fn test_walk_clamps_to_counter() {
        let mut kitchen = Kitchen::new(quiet_config()).unwrap();
        kitchen.walk(1.0).unwrap();
        for _ in 0..100 {
            kitchen.update(0.1);
        }
        assert_eq!(kitchen.player_position().unwrap().x, 15.1);
        kitchen.walk(-1.0).unwrap();
        kitchen.update(1.0);
        assert!((kitchen.player_position().unwrap().x - 12.1).abs() < 1e-3);
        kitchen.stop_walking().unwrap();
        kitchen.update(1.0);
        assert!((kitchen.player_position().unwrap().x - 12.1).abs() < 1e-3);
    }

    #[test]
    fn test_cook_beef_on_oven() {
        let mut kitchen = Kitchen::new(quiet_config()).unwrap();
        let beef = kitchen.spawn_ingredient("beef").unwrap();
        kitchen.give_player(beef).unwrap();
        let oven_x = station_x(&kitchen, StationKind::Oven);
        kitchen.place_player(oven_x).unwrap();

        assert!(matches!(kitchen.interact("default").unwrap(), InteractionOutcome::Deposited { .. }));
        for _ in 0..10 {
            kitchen.update(1.0);
        }
        let oven = kitchen.station_id(StationKind::Oven).unwrap();
        let slot = kitchen.station_inventory(oven).unwrap().slots[0].clone().unwrap();
        assert_eq!(slot.state, Some(IngredientState::Cooked));

        assert!(matches!(kitchen.interact("default").unwrap(), InteractionOutcome::Collected { .. }));
        let held = kitchen.player_inventory().unwrap().slots[0].clone().unwrap();
        assert_eq!(held.item, beef);
    }

    #[test]
    fn test_decisions_apply_effects() {
        let mut kitchen = Kitchen::new(quiet_config()).unwrap();
        kitchen.answer_decision(1, false);
        assert_eq!(kitchen.gold(), 140);
        kitchen.answer_decision(3, false);
        assert_eq!(kitchen.lose_threshold, 40);
        kitchen.answer_decision(4, false);
        let player = kitchen.player_entity().unwrap();
        assert_eq!(kitchen.world.get::<&Player>(player).unwrap().speed_multiplier, 1.5);
        kitchen.answer_decision(4, true);
        assert_eq!(kitchen.gold(), 120);
    }

    #[test]
    fn test_extortion_doubles_price() {
        let mut kitchen = Kitchen::new(quiet_config()).unwrap();
        assert_eq!(kitchen.activate_extortion(), 40);
        assert_eq!(kitchen.gold(), 60);

        let order_number = kitchen.place_order("fruitSalad").unwrap();
        kitchen.world.spawn((
            Customer {
                order_number: Some(order_number),
                state: CustomerState::Waiting,
                ..Customer::new("fruitSalad", 0)
            },
            Position::new(17.0, 1.0),
        ));
        let mut parts = Vec::new();
        for name in ["strawberry", "banana"] {
            let id = kitchen.spawn_ingredient(name).unwrap();
            let entity = find_item(&kitchen.world, id).unwrap();
            let mut timer = kitchen.world.get::<&mut ChopTimer>(entity).unwrap();
            timer.0.elapsed = timer.0.length;
            parts.push(id);
        }
        let bench = kitchen.station_id(StationKind::Bench).unwrap();
        let bench_entity = kitchen.station_entity(bench).unwrap();
        for id in &parts {
            kitchen
                .world
                .get::<&mut Inventory>(bench_entity)
                .unwrap()
                .add_item(*id)
                .unwrap();
        }
        let meal = kitchen.assemble_meal(bench).unwrap().unwrap();
        kitchen.place_player(station_x(&kitchen, StationKind::Bench)).unwrap();
        assert!(matches!(
            kitchen.interact("default").unwrap(),
            InteractionOutcome::Collected { item, .. } if item == meal
        ));
        kitchen.place_player(15.1).unwrap();
        let outcome = kitchen.interact("default").unwrap();
        assert_eq!(
            outcome,
            InteractionOutcome::Served {
                order_number: Some(1),
                satisfaction: Some(Satisfaction::Grin)
            }
        );
        assert_eq!(kitchen.gold(), 60 + 40 + 10);
    }

    #[test]
    fn test_customerless_ticket_scores_without_gold() {
        let mut kitchen = Kitchen::new(quiet_config()).unwrap();
        kitchen.place_order("fruitSalad").unwrap();
        let bench = kitchen.station_id(StationKind::Bench).unwrap();
        let bench_entity = kitchen.station_entity(bench).unwrap();
        for name in ["strawberry", "banana"] {
            let id = kitchen.spawn_ingredient(name).unwrap();
            let entity = find_item(&kitchen.world, id).unwrap();
            {
                let mut timer = kitchen.world.get::<&mut ChopTimer>(entity).unwrap();
                timer.0.elapsed = timer.0.length;
            }
            kitchen
                .world
                .get::<&mut Inventory>(bench_entity)
                .unwrap()
                .add_item(id)
                .unwrap();
        }
        kitchen.assemble_meal(bench).unwrap().unwrap();
        kitchen.place_player(station_x(&kitchen, StationKind::Bench)).unwrap();
        kitchen.interact("default").unwrap();

        kitchen.place_player(station_x(&kitchen, StationKind::Serving)).unwrap();
        assert_eq!(
            kitchen.interact("default").unwrap(),
            InteractionOutcome::Served {
                order_number: Some(1),
                satisfaction: Some(Satisfaction::Grin)
            }
        );
        assert_eq!(kitchen.gold(), 100);
        assert!(kitchen.big_ticket().is_none());
    }

    #[test]
    fn test_burnt_item_burns_once() {
        let mut kitchen = Kitchen::new(quiet_config()).unwrap();
        let beef = kitchen.spawn_ingredient("beef").unwrap();
        kitchen.give_player(beef).unwrap();
        kitchen.place_player(station_x(&kitchen, StationKind::Oven)).unwrap();
        kitchen.interact("default").unwrap();
        for _ in 0..30 {
            kitchen.update(1.0);
        }
        // Pick the burnt beef up and put it straight back
        assert!(matches!(kitchen.interact("default").unwrap(), InteractionOutcome::Collected { .. }));
        assert!(matches!(kitchen.interact("default").unwrap(), InteractionOutcome::Deposited { .. }));
        for _ in 0..30 {
            kitchen.update(1.0);
        }
        let burns = kitchen
            .drain_events()
            .into_iter()
            .filter(|e| *e == KitchenEvent::ItemBurnt { item: beef })
            .count();
        assert_eq!(burns, 1);
    }

    #[test]
    fn test_assembly_only_on_bench() {
        let mut kitchen = Kitchen::new(quiet_config()).unwrap();
        let board = kitchen.station_id(StationKind::CuttingBoard).unwrap();
        let board_entity = kitchen.station_entity(board).unwrap();
        let banana = kitchen.spawn_ingredient("banana").unwrap();
        kitchen
            .world
            .get::<&mut Inventory>(board_entity)
            .unwrap()
            .add_item(banana)
            .unwrap();
        assert_eq!(kitchen.assemble_meal(board).unwrap(), None);
        assert!(kitchen.station_inventory(board).unwrap().slots[0].is_some());
    }

    #[test]
    fn test_day_end_fires_below_threshold() {
        let mut kitchen = Kitchen::new(KitchenConfig {
            day_length: 5.0,
            starting_gold: 10,
            ..quiet_config()
        })
        .unwrap();
        for _ in 0..6 {
            kitchen.update(1.0);
        }
        assert!(kitchen.is_game_over());
        assert_eq!(kitchen.cutscene().unwrap().name(), "fired_end");
        assert!(kitchen
            .drain_events()
            .contains(&KitchenEvent::Fired { day: 1, gold: 10 }));
    }

    #[test]
    fn test_day_end_continues_and_plays_moral_scene() {
        let mut kitchen = Kitchen::new(KitchenConfig {
            day_length: 5.0,
            ..quiet_config()
        })
        .unwrap();
        for _ in 0..6 {
            kitchen.update(1.0);
        }
        assert!(!kitchen.is_game_over());
        assert_eq!(kitchen.day(), 2);
        assert_eq!(kitchen.cutscene().unwrap().name(), "moral_day1");
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut kitchen = Kitchen::new(quiet_config()).unwrap();
        let beef = kitchen.spawn_ingredient("beef").unwrap();
        kitchen.give_player(beef).unwrap();
        kitchen.place_order("steakMeal").unwrap();
        kitchen.update(2.0);
        kitchen.gold = 321;

        let mut buffer = Vec::new();
        kitchen.save(&mut buffer).unwrap();

        let mut loaded = Kitchen::new(quiet_config()).unwrap();
        loaded.load(&buffer[..]).unwrap();
        assert_eq!(loaded.gold(), 321);
        assert_eq!(loaded.sim_time(), kitchen.sim_time());
        assert_eq!(loaded.orders.len(), 1);
        assert_eq!(loaded.player_inventory().unwrap().slots[0].as_ref().unwrap().name, "beef");
        assert_eq!(loaded.spawn_ingredient("fish").unwrap(), ItemId(beef.0 + 1));
    }
}
