//! Integration tests for the service rules pipeline.
//!
//! Exercises: GameData → OrderBoard → scoring → gold, plus the day and
//! decision rules that decide whether the player keeps the job.
//!
//! All tests are pure logic, no ECS world.

use backroom_logic::cutscene::{CutscenePlayer, CutsceneStep};
use backroom_logic::data::{DataError, GameData};
use backroom_logic::day::{day_end_outcome, lowered_threshold, DayClock, DayOutcome};
use backroom_logic::morality::{DecisionEffect, MoralLedger};
use backroom_logic::orders::OrderBoard;
use backroom_logic::scoring::{gold_after_service, score_meal, Satisfaction};
use backroom_logic::upgrades::ExtortionUpgrade;

// ── Helpers ────────────────────────────────────────────────────────────

fn data() -> GameData {
    GameData::embedded().expect("embedded data parses")
}

/// Serve `served` against the big ticket at `now` with every ingredient at
/// `percent` completion; returns the satisfaction and new gold.
fn serve(
    data: &GameData,
    board: &mut OrderBoard,
    served: &str,
    now: f64,
    percent: f32,
    gold: i32,
) -> (Satisfaction, i32) {
    let ticket = board.remove_order(None).expect("a ticket to serve");
    let served = data.recipes.get(served).unwrap();
    let ordered = data.recipes.get(&ticket.recipe).unwrap();
    let percents = vec![percent; served.ingredients.len()];
    let score = score_meal(
        &served.ingredients,
        &ordered.ingredients,
        ticket.elapsed(now),
        ticket.make_time,
        &percents,
    );
    let price = data.recipes.price(&ticket.recipe);
    (score.satisfaction, gold_after_service(gold, score.satisfaction, price))
}

// ── Data tables ────────────────────────────────────────────────────────

#[test]
fn embedded_tables_are_consistent() {
    let data = data();
    assert_eq!(data.recipes.len(), 5);
    for recipe in data.recipes.iter() {
        for ingredient in &recipe.ingredients {
            assert!(data.ingredient(ingredient).is_some(), "{} missing", ingredient);
        }
    }
    for name in ["backstory", "moral_day1", "moral_day2", "moral_day3", "fired_end"] {
        assert!(data.cutscene(name).is_some(), "cutscene {} missing", name);
    }
    assert_eq!(data.station("bench").unwrap().capacity, 4);
}

#[test]
fn recipe_naming_unknown_ingredient_is_rejected() {
    let recipes = r#"[{"key":"x","display_name":"x","ingredients":["unobtainium"],"make_time":10.0,"price":5}]"#;
    let err = GameData::from_json_str(recipes, "[]", "[]", "[]").unwrap_err();
    assert!(matches!(err, DataError::UnknownIngredient { .. }));
}

// ── Service ────────────────────────────────────────────────────────────

#[test]
fn prices_follow_meal_table() {
    let data = data();
    let expected = [
        ("acaiBowl", 20),
        ("fruitSalad", 20),
        ("salad", 25),
        ("bananaSplit", 25),
        ("steakMeal", 40),
        ("mysteryStew", 10),
    ];
    for (key, price) in expected {
        assert_eq!(data.recipes.price(key), price, "{}", key);
    }
}

#[test]
fn a_morning_of_service() {
    let data = data();
    let mut board = OrderBoard::new();
    let mut gold = 50;

    board.add_order("salad", 70.0, 0.0);
    board.add_order("steakMeal", 90.0, 5.0);
    board.add_order("acaiBowl", 60.0, 10.0);

    // Fast and correct
    let (face, g) = serve(&data, &mut board, "salad", 20.0, 100.0, gold);
    assert_eq!(face, Satisfaction::Grin);
    gold = g;
    assert_eq!(gold, 50 + 25 + 10);

    // Rotate the dockets so the acai bowl is served next
    board.shift_right();
    assert_eq!(board.big_ticket().unwrap().recipe, "acaiBowl");
    let (face, g) = serve(&data, &mut board, "acaiBowl", 40.0, 100.0, gold);
    assert_eq!(face, Satisfaction::Grin);
    gold = g;

    // Wrong dish, late and undercooked
    let (face, g) = serve(&data, &mut board, "fruitSalad", 200.0, 10.0, gold);
    assert_eq!(face, Satisfaction::Angry);
    assert_eq!(g, gold + 40 - 10);
    assert!(board.is_empty());
}

#[test]
fn overdue_tickets_expire_in_place() {
    let mut board = OrderBoard::new();
    board.add_order("salad", 70.0, 0.0);
    board.add_order("acaiBowl", 60.0, 0.0);
    let expired = board.expire_overdue(65.0);
    assert_eq!(expired.len(), 1);
    assert_eq!(board.big_ticket().unwrap().recipe, "salad");
}

// ── Day and decisions ──────────────────────────────────────────────────

#[test]
fn threshold_lowering_can_save_the_job() {
    let mut ledger = MoralLedger::new();
    for q in ["a", "b", "c", "d"] {
        ledger.add_question(q);
    }
    let mut threshold = 50;
    let gold = 45;
    assert_eq!(day_end_outcome(gold, threshold), DayOutcome::Fired);

    if ledger.set_decision(3, false) == DecisionEffect::LowerLoseThreshold {
        threshold = lowered_threshold(threshold);
    }
    assert_eq!(day_end_outcome(gold, threshold), DayOutcome::Continue);
    assert!(!ledger.current_morality());
}

#[test]
fn day_clock_rolls_over() {
    let mut clock = DayClock::new(1, 30.0);
    let ends = (0..40).filter(|_| clock.tick(1.0)).count();
    assert_eq!(ends, 1);
    clock.start_next_day();
    assert_eq!(clock.day, 2);
    assert_eq!(clock.remaining(), 30.0);
}

#[test]
fn extortion_runs_out() {
    let mut upgrade = ExtortionUpgrade::new(60.0);
    assert_eq!(upgrade.activate(0.0, 100), 40);
    assert_eq!(upgrade.price_multiplier(), 2);
    assert!(!upgrade.update(30.0));
    assert!(upgrade.update(60.0));
    assert_eq!(upgrade.price_multiplier(), 1);
}

// ── Cutscenes ──────────────────────────────────────────────────────────

#[test]
fn moral_scene_plays_through_by_text() {
    let data = data();
    let mut player = CutscenePlayer::new(data.cutscene("moral_day1").unwrap().clone());
    let mut steps = 0;
    while !player.is_finished() {
        let step = player.advance_text();
        steps += 1;
        assert!(steps < 50, "cutscene never ended");
        if player.is_finished() {
            assert_eq!(step, CutsceneStep::Ended);
        }
    }
    assert!(player.current_scene().is_none());
}
