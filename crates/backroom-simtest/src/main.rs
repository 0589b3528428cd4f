//! Backroom Headless Shift Harness
//!
//! Validates the kitchen rules and plays scripted shifts without rendering.
//! A scripted cook walks the counter, preps the big ticket's ingredients at
//! the right stations, assembles on the bench and serves.
//!
//! Usage:
//!   cargo run -p backroom-simtest
//!   cargo run -p backroom-simtest -- --verbose --seed 7 --days 5

use backroom_core::components::StationKind;
use backroom_core::config::KitchenConfig;
use backroom_core::engine::Kitchen;
use backroom_core::error::KitchenError;
use backroom_core::events::KitchenEvent;
use backroom_core::systems::InteractionOutcome;
use backroom_logic::data::GameData;
use backroom_logic::orders::OrderBoard;
use backroom_logic::scoring::{score_meal, Satisfaction};
use backroom_logic::timer::IngredientState;
use clap::Parser;

const TICK: f32 = 0.1;

#[derive(Parser, Debug)]
#[command(name = "backroom-simtest", about = "Headless shift harness")]
struct Args {
    /// Print every result, not just failures
    #[arg(short, long)]
    verbose: bool,

    /// Seed for customer spawning
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of days the scripted cook plays
    #[arg(long, default_value_t = 3)]
    days: u32,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    println!("=== Backroom Shift Harness ===\n");

    let mut results = Vec::new();

    // 1. Data tables
    results.extend(validate_data_tables());

    // 2. Scoring sweep
    results.extend(validate_scoring());

    // 3. Docket line
    results.extend(validate_orders());

    // 4. Scripted shifts
    results.extend(validate_shifts(args.seed, args.days));

    // 5. Save and load
    results.extend(validate_persistence(args.seed));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!("\n=== RESULT: {}/{} passed, {} failed ===", passed, results.len(), failed);

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Data tables ──────────────────────────────────────────────────────

fn validate_data_tables() -> Vec<TestResult> {
    println!("--- Data Tables ---");
    let mut results = Vec::new();

    let data = match GameData::embedded() {
        Ok(d) => d,
        Err(e) => {
            results.push(TestResult::new("data_parse", false, format!("{}", e)));
            return results;
        }
    };
    results.push(TestResult::new(
        "data_parse",
        true,
        format!("{} recipes, {} ingredients", data.recipes.len(), data.ingredients.len()),
    ));

    // Every ingredient can be prepared somewhere
    let stranded: Vec<&str> = data
        .ingredients
        .iter()
        .filter(|i| {
            !data.stations.iter().any(|s| {
                s.accepts
                    .as_ref()
                    .is_some_and(|names| names.iter().any(|n| n == &i.name))
            })
        })
        .map(|i| i.name.as_str())
        .collect();
    results.push(TestResult::new(
        "data_ingredients_placeable",
        stranded.is_empty(),
        if stranded.is_empty() {
            "every ingredient has a station".to_string()
        } else {
            format!("no station accepts {:?}", stranded)
        },
    ));

    // The bench must hold the largest recipe
    let largest = data.recipes.iter().map(|r| r.ingredients.len()).max().unwrap_or(0);
    let bench = data.station(StationKind::Bench.data_key()).map(|s| s.capacity).unwrap_or(0);
    results.push(TestResult::new(
        "data_bench_fits_recipes",
        bench >= largest,
        format!("bench holds {}, largest recipe needs {}", bench, largest),
    ));

    // Each cutscene the day cycle can reach
    let missing: Vec<&str> = ["backstory", "moral_day1", "moral_day2", "moral_day3", "fired_end"]
        .into_iter()
        .filter(|name| data.cutscene(name).is_none())
        .collect();
    results.push(TestResult::new(
        "data_cutscenes_present",
        missing.is_empty(),
        format!("missing: {:?}", missing),
    ));

    results
}

// ── 2. Scoring ──────────────────────────────────────────────────────────

fn validate_scoring() -> Vec<TestResult> {
    println!("--- Scoring ---");
    let mut results = Vec::new();
    let order = ["tomato", "cucumber", "lettuce"];

    let perfect = score_meal(&order, &order, 5.0, 70.0, &[100.0; 3]);
    results.push(TestResult::new(
        "scoring_perfect_is_grin",
        perfect.satisfaction == Satisfaction::Grin,
        format!("combined {}", perfect.combined),
    ));

    let wrong = score_meal(&["beef"], &order, 80.0, 70.0, &[10.0]);
    results.push(TestResult::new(
        "scoring_wrong_late_raw_is_angry",
        wrong.satisfaction == Satisfaction::Angry,
        format!("combined {}", wrong.combined),
    ));

    // Satisfaction never improves as the wait grows
    let mut last = u32::MAX;
    let mut monotonic = true;
    for step in 0..=14 {
        let elapsed = step as f32 * 5.0;
        let score = score_meal(&order, &order, elapsed, 70.0, &[100.0; 3]);
        if score.combined > last {
            monotonic = false;
        }
        last = score.combined;
    }
    results.push(TestResult::new(
        "scoring_time_monotonic",
        monotonic,
        "combined score falls as the wait grows",
    ));

    results
}

// ── 3. Orders ───────────────────────────────────────────────────────────

fn validate_orders() -> Vec<TestResult> {
    println!("--- Orders ---");
    let mut results = Vec::new();
    let mut board = OrderBoard::new();
    let first = board.add_order("salad", 70.0, 0.0);
    let second = board.add_order("acaiBowl", 60.0, 1.0);

    results.push(TestResult::new(
        "orders_numbers_increase",
        second == first + 1,
        format!("{} then {}", first, second),
    ));

    board.shift_left();
    let rotated = board.big_ticket().map(|t| t.order_number) == Some(second);
    board.shift_right();
    let restored = board.big_ticket().map(|t| t.order_number) == Some(first);
    results.push(TestResult::new(
        "orders_shift_rotates",
        rotated && restored,
        "shift left then right restores the big ticket",
    ));

    let expired = board.expire_overdue(62.0);
    results.push(TestResult::new(
        "orders_expiry",
        expired.len() == 1 && board.len() == 1,
        format!("{} expired, {} left", expired.len(), board.len()),
    ));

    results
}

// ── 4. Scripted shifts ──────────────────────────────────────────────────

#[derive(Default)]
struct ShiftStats {
    meals_served: u32,
    satisfied: u32,
    customers_arrived: u32,
    orders_expired: u32,
    cutscenes: u32,
    days_ended: u32,
    fired: bool,
}

/// A cook that follows the big ticket. Cutscenes are skipped as they start
/// and every moral decision is answered honestly.
struct ScriptedCook {
    kitchen: Kitchen,
    stats: ShiftStats,
}

impl ScriptedCook {
    fn new(kitchen: Kitchen) -> Self {
        Self {
            kitchen,
            stats: ShiftStats::default(),
        }
    }

    fn tick(&mut self) {
        self.kitchen.update(TICK);
        for event in self.kitchen.drain_events() {
            match event {
                KitchenEvent::CustomerArrived { .. } => self.stats.customers_arrived += 1,
                KitchenEvent::OrderExpired { .. } => self.stats.orders_expired += 1,
                KitchenEvent::CutsceneStarted { .. } => self.stats.cutscenes += 1,
                KitchenEvent::DayEnded { day, .. } => {
                    self.stats.days_ended += 1;
                    self.kitchen.answer_decision(day as usize, true);
                }
                KitchenEvent::Fired { .. } => self.stats.fired = true,
                _ => {}
            }
        }
        if self.kitchen.cutscene().is_some() {
            self.kitchen.skip_cutscene();
        }
    }

    fn station_x(&self, kind: StationKind) -> Result<f32, String> {
        self.kitchen
            .config
            .stations
            .iter()
            .find(|p| p.kind == kind)
            .map(|p| p.position.x)
            .ok_or_else(|| format!("no {} placed", kind))
    }

    fn walk_to(&mut self, kind: StationKind) -> Result<(), String> {
        let x = self.station_x(kind)?;
        for _ in 0..1000 {
            let here = self.kitchen.player_position().map_err(err)?.x;
            let dx = x - here;
            if dx.abs() <= self.kitchen.config.player_speed * TICK * 2.0 {
                self.kitchen.stop_walking().map_err(err)?;
                return self.kitchen.place_player(x).map_err(err);
            }
            self.kitchen.walk(dx).map_err(err)?;
            self.tick();
        }
        Err(format!("never reached the {}", kind))
    }

    fn interact(&mut self, tag: &str) -> Result<InteractionOutcome, String> {
        self.kitchen.interact(tag).map_err(err)
    }

    /// Tick until the station's first slot reaches `state`.
    fn wait_for(&mut self, kind: StationKind, state: IngredientState) -> Result<(), String> {
        let station = self.kitchen.station_id(kind).ok_or("station missing")?;
        for _ in 0..1000 {
            let slot = self.kitchen.station_inventory(station).map_err(err)?.slots[0].clone();
            match slot {
                Some(view) if view.state == Some(state) => return Ok(()),
                Some(_) => self.tick(),
                None => return Err(format!("{} emptied while waiting", kind)),
            }
        }
        Err(format!("{} never reached {}", kind, state.name()))
    }

    /// Prep one ingredient and leave it on the bench.
    fn prep(&mut self, name: &str) -> Result<(), String> {
        let spec = self
            .kitchen
            .data
            .ingredient(name)
            .ok_or_else(|| format!("unknown ingredient {}", name))?
            .clone();
        let item = self.kitchen.spawn_ingredient(name).map_err(err)?;
        self.kitchen.give_player(item).map_err(err)?;

        if spec.cookable {
            self.walk_to(StationKind::Stove)?;
            expect_deposit(self.interact("default")?)?;
            self.wait_for(StationKind::Stove, IngredientState::Cooked)?;
            self.interact("default")?;
        } else if spec.choppable {
            self.walk_to(StationKind::CuttingBoard)?;
            expect_deposit(self.interact("default")?)?;
            self.interact("chop")?;
            self.wait_for(StationKind::CuttingBoard, IngredientState::Chopped)?;
            self.interact("default")?;
        }

        self.walk_to(StationKind::Bench)?;
        expect_deposit(self.interact("default")?)
    }

    /// Cook the big ticket and serve it. Returns false when nothing is ordered.
    fn serve_big_ticket(&mut self) -> Result<bool, String> {
        let Some(ticket) = self.kitchen.big_ticket().cloned() else {
            return Ok(false);
        };
        let recipe = self
            .kitchen
            .data
            .recipes
            .get(&ticket.recipe)
            .ok_or_else(|| format!("unknown recipe {}", ticket.recipe))?
            .clone();
        log::debug!("cooking order {} ({})", ticket.order_number, recipe.display_name);

        for name in &recipe.ingredients {
            self.prep(name)?;
        }
        let bench = self.kitchen.station_id(StationKind::Bench).ok_or("bench missing")?;
        self.kitchen
            .assemble_meal(bench)
            .map_err(err)?
            .ok_or_else(|| format!("{} did not assemble", recipe.key))?;
        self.walk_to(StationKind::Bench)?;
        self.interact("default")?;

        self.walk_to(StationKind::Serving)?;
        if let InteractionOutcome::Served { satisfaction, .. } = self.interact("default")? {
            self.stats.meals_served += 1;
            if matches!(satisfaction, Some(Satisfaction::Grin | Satisfaction::Smile)) {
                self.stats.satisfied += 1;
            }
        }
        Ok(true)
    }

    fn play(&mut self, days: u32) -> Result<(), String> {
        while self.kitchen.day() <= days && !self.kitchen.is_game_over() {
            if !self.serve_big_ticket()? {
                self.tick();
            }
        }
        Ok(())
    }
}

fn err(e: KitchenError) -> String {
    e.to_string()
}

fn expect_deposit(outcome: InteractionOutcome) -> Result<(), String> {
    match outcome {
        InteractionOutcome::Deposited { .. } => Ok(()),
        other => Err(format!("expected a deposit, got {:?}", other)),
    }
}

fn shift_config(seed: u64) -> KitchenConfig {
    KitchenConfig {
        seed,
        autosave: false,
        ..Default::default()
    }
}

fn validate_shifts(seed: u64, days: u32) -> Vec<TestResult> {
    println!("--- Scripted Shifts ---");
    let mut results = Vec::new();

    let kitchen = match Kitchen::new(shift_config(seed)) {
        Ok(k) => k,
        Err(e) => {
            results.push(TestResult::new("shift_kitchen_new", false, e.to_string()));
            return results;
        }
    };
    let starting_gold = kitchen.gold();
    let mut cook = ScriptedCook::new(kitchen);
    // Intro plays before the first tick
    if cook.kitchen.cutscene().is_some() {
        cook.stats.cutscenes += 1;
        cook.kitchen.skip_cutscene();
    }

    let outcome = cook.play(days);
    results.push(TestResult::new(
        "shift_no_errors",
        outcome.is_ok(),
        outcome.err().unwrap_or_else(|| "cook finished cleanly".into()),
    ));

    let stats = &cook.stats;
    println!(
        "  day {}, gold {} → {}, served {} ({} happy), arrived {}, expired {}",
        cook.kitchen.day(),
        starting_gold,
        cook.kitchen.gold(),
        stats.meals_served,
        stats.satisfied,
        stats.customers_arrived,
        stats.orders_expired
    );

    results.push(TestResult::new(
        "shift_meals_served",
        stats.meals_served > 0,
        format!("{} meals served", stats.meals_served),
    ));
    results.push(TestResult::new(
        "shift_customers_happy",
        stats.satisfied > 0,
        format!("{}/{} grin or smile", stats.satisfied, stats.meals_served),
    ));
    results.push(TestResult::new(
        "shift_days_completed",
        stats.fired || stats.days_ended >= days,
        format!("{} days ended, fired: {}", stats.days_ended, stats.fired),
    ));
    results.push(TestResult::new(
        "shift_cook_keeps_job",
        !stats.fired,
        format!("gold {} vs threshold {}", cook.kitchen.gold(), cook.kitchen.lose_threshold),
    ));
    results.push(TestResult::new(
        "shift_cutscenes_played",
        stats.cutscenes >= 1 + days.min(3),
        format!("{} cutscenes", stats.cutscenes),
    ));

    // An idle kitchen loses the job
    let idle = Kitchen::new(KitchenConfig {
        starting_gold: 0,
        play_intro: false,
        ..shift_config(seed)
    });
    match idle {
        Ok(kitchen) => {
            let mut idle = ScriptedCook::new(kitchen);
            let limit = (idle.kitchen.config.day_length / TICK as f64) as usize + 10;
            for _ in 0..limit {
                idle.tick();
            }
            results.push(TestResult::new(
                "shift_idle_cook_fired",
                idle.stats.fired && idle.kitchen.is_game_over(),
                format!("angry customers: {}", idle.stats.orders_expired),
            ));
        }
        Err(e) => results.push(TestResult::new("shift_idle_cook_fired", false, e.to_string())),
    }

    results
}

// ── 5. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(seed: u64) -> Vec<TestResult> {
    println!("--- Save / Load ---");
    let mut results = Vec::new();

    let config = KitchenConfig {
        spawn_interval: 3.0,
        play_intro: false,
        ..shift_config(seed)
    };
    let mut kitchen = match Kitchen::new(config.clone()) {
        Ok(k) => k,
        Err(e) => {
            results.push(TestResult::new("save_kitchen_new", false, e.to_string()));
            return results;
        }
    };
    for _ in 0..200 {
        kitchen.update(TICK);
    }

    let mut buffer = Vec::new();
    let snapshot = kitchen.save(&mut buffer).map_err(|e| e.to_string()).and_then(|_| {
        let mut loaded = Kitchen::new(config.clone()).map_err(|e| e.to_string())?;
        loaded.load(&buffer[..]).map_err(|e| e.to_string())?;
        Ok(loaded)
    });
    match snapshot {
        Ok(loaded) => {
            let same = loaded.customer_count() == kitchen.customer_count()
                && loaded.orders.len() == kitchen.orders.len()
                && loaded.gold() == kitchen.gold()
                && loaded.sim_time() == kitchen.sim_time();
            results.push(TestResult::new(
                "save_snapshot_roundtrip",
                same,
                format!("{} bytes, {} customers", buffer.len(), loaded.customer_count()),
            ));
        }
        Err(e) => results.push(TestResult::new("save_snapshot_roundtrip", false, e)),
    }

    let path = std::env::temp_dir()
        .join(format!("backroom-simtest-{}", std::process::id()))
        .join("saveFile.json");
    kitchen.gold = 275;
    let profile = kitchen.save_profile_to(&path).map_err(|e| e.to_string()).and_then(|_| {
        let mut fresh = Kitchen::new(config).map_err(|e| e.to_string())?;
        fresh.load_profile_from(&path).map_err(|e| e.to_string())
    });
    results.push(match profile {
        Ok(state) => TestResult::new(
            "save_profile_roundtrip",
            state.money == 275 && state.day == kitchen.day(),
            format!("money {}, day {}", state.money, state.day),
        ),
        Err(e) => TestResult::new("save_profile_roundtrip", false, e),
    });
    if let Some(dir) = path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }

    results
}
