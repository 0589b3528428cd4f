//! Pure scoring logic: meal accuracy, service time, ingredient completion,
//! and the satisfaction label and gold they add up to.
//!
//! All scores are integer percentages in `0..=100`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Customer reaction to a served meal, best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Satisfaction {
    Grin,
    Smile,
    Neutral,
    Frown,
    Angry,
}

impl Satisfaction {
    /// Label shown above the customer, e.g. `"Grin Face"`.
    pub fn label(&self) -> &'static str {
        match self {
            Satisfaction::Grin => "Grin Face",
            Satisfaction::Smile => "Smile Face",
            Satisfaction::Neutral => "Neutral Face",
            Satisfaction::Frown => "Frown Face",
            Satisfaction::Angry => "Angry Face",
        }
    }

    /// Parse a label back; unknown labels are treated as angry.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Grin Face" => Satisfaction::Grin,
            "Smile Face" => Satisfaction::Smile,
            "Neutral Face" => Satisfaction::Neutral,
            "Frown Face" => Satisfaction::Frown,
            _ => Satisfaction::Angry,
        }
    }

    pub fn face_image_path(&self) -> &'static str {
        match self {
            Satisfaction::Grin => "images/customer_faces/grin_face.png",
            Satisfaction::Smile => "images/customer_faces/smile_face.png",
            Satisfaction::Neutral => "images/customer_faces/neutral_face.png",
            Satisfaction::Frown => "images/customer_faces/frown_face.png",
            Satisfaction::Angry => "images/customer_faces/angry_face.png",
        }
    }

    /// Tip (or penalty) on top of the meal price.
    pub fn gold_bonus(&self) -> i32 {
        match self {
            Satisfaction::Grin => 10,
            Satisfaction::Smile => 5,
            Satisfaction::Neutral => 0,
            Satisfaction::Frown => -5,
            Satisfaction::Angry => -10,
        }
    }
}

/// Breakdown of one scored meal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MealScore {
    pub accuracy: u32,
    pub time: u32,
    pub completion: u32,
    pub combined: u32,
    pub satisfaction: Satisfaction,
}

/// Ingredient-set overlap between the served meal and the ordered one.
pub fn accuracy_score<S: AsRef<str>>(player_ingredients: &[S], order_ingredients: &[S]) -> u32 {
    let player: HashSet<&str> = player_ingredients.iter().map(|s| s.as_ref()).collect();
    let order: HashSet<&str> = order_ingredients.iter().map(|s| s.as_ref()).collect();

    let denominator = player.len().max(order.len());
    if denominator == 0 {
        return 100;
    }
    let overlap = player.intersection(&order).count();
    ((overlap as f32 / denominator as f32) * 100.0).round() as u32
}

/// Full marks for the first half of the wait, then linear down to zero at the deadline.
pub fn time_score(elapsed: f32, make_time: f32) -> u32 {
    if make_time <= 0.0 || elapsed >= make_time {
        return 0;
    }
    let half = make_time / 2.0;
    if elapsed <= half {
        return 100;
    }
    let fraction = 1.0 - (elapsed - half) / half;
    (fraction * 100.0).round().clamp(0.0, 100.0) as u32
}

/// Quality of a single ingredient from its timer completion percent.
/// Past 100% the ingredient is overcooked and loses a point per percent.
pub fn ingredient_quality(completion_percent: f32) -> f32 {
    let p = completion_percent.max(0.0);
    if p <= 100.0 {
        p
    } else {
        (200.0 - p).max(0.0)
    }
}

/// Mean ingredient quality; a meal with nothing timed scores full marks.
pub fn completion_score(completion_percents: &[f32]) -> u32 {
    if completion_percents.is_empty() {
        return 100;
    }
    let total: f32 = completion_percents.iter().map(|&p| ingredient_quality(p)).sum();
    (total / completion_percents.len() as f32).round().clamp(0.0, 100.0) as u32
}

/// Weighted combination of the three scores.
pub fn combined_score(accuracy: u32, time: u32, completion: u32) -> u32 {
    let weighted = 0.5 * accuracy as f32 + 0.25 * time as f32 + 0.25 * completion as f32;
    weighted.round() as u32
}

/// Map the three scores to a satisfaction label.
pub fn final_score(accuracy: u32, time: u32, completion: u32) -> Satisfaction {
    let combined = combined_score(accuracy, time, completion);
    if combined >= 80 {
        Satisfaction::Grin
    } else if combined >= 60 {
        Satisfaction::Smile
    } else if combined >= 40 {
        Satisfaction::Neutral
    } else if combined >= 20 {
        Satisfaction::Frown
    } else {
        Satisfaction::Angry
    }
}

/// Score a served meal in one call.
pub fn score_meal<S: AsRef<str>>(
    player_ingredients: &[S],
    order_ingredients: &[S],
    elapsed: f32,
    make_time: f32,
    completion_percents: &[f32],
) -> MealScore {
    let accuracy = accuracy_score(player_ingredients, order_ingredients);
    let time = time_score(elapsed, make_time);
    let completion = completion_score(completion_percents);
    MealScore {
        accuracy,
        time,
        completion,
        combined: combined_score(accuracy, time, completion),
        satisfaction: final_score(accuracy, time, completion),
    }
}

/// Gold earned for one meal: its price plus the satisfaction bonus.
pub fn gold_delta(satisfaction: Satisfaction, meal_price: u32) -> i32 {
    meal_price as i32 + satisfaction.gold_bonus()
}

/// Gold after serving one meal.
pub fn gold_after_service(current_gold: i32, satisfaction: Satisfaction, meal_price: u32) -> i32 {
    current_gold + gold_delta(satisfaction, meal_price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_exact_match() {
        assert_eq!(accuracy_score(&["tomato", "lettuce"], &["lettuce", "tomato"]), 100);
    }

    #[test]
    fn test_accuracy_partial_and_extra() {
        // 2 of 4 ordered ingredients
        assert_eq!(
            accuracy_score(&["tomato", "lettuce"], &["beef", "tomato", "cucumber", "lettuce"]),
            50
        );
        // Extra ingredients dilute the score too
        assert_eq!(accuracy_score(&["banana", "acai", "chocolate"], &["acai", "banana"]), 67);
        assert_eq!(accuracy_score(&["fish"], &["beef"]), 0);
    }

    #[test]
    fn test_accuracy_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(accuracy_score(&empty, &empty), 100);
        assert_eq!(accuracy_score(&empty, &["beef"]), 0);
    }

    #[test]
    fn test_time_score_curve() {
        assert_eq!(time_score(0.0, 60.0), 100);
        assert_eq!(time_score(30.0, 60.0), 100);
        assert_eq!(time_score(45.0, 60.0), 50);
        assert_eq!(time_score(60.0, 60.0), 0);
        assert_eq!(time_score(90.0, 60.0), 0);
        assert_eq!(time_score(5.0, 0.0), 0);
    }

    #[test]
    fn test_completion_penalises_overcooking() {
        assert_eq!(completion_score(&[]), 100);
        assert_eq!(completion_score(&[100.0, 100.0]), 100);
        assert_eq!(completion_score(&[50.0, 100.0]), 75);
        assert_eq!(completion_score(&[150.0]), 50);
        assert_eq!(completion_score(&[250.0]), 0);
    }

    #[test]
    fn test_final_score_thresholds() {
        assert_eq!(final_score(100, 100, 100), Satisfaction::Grin);
        assert_eq!(final_score(100, 0, 100), Satisfaction::Smile);
        assert_eq!(final_score(50, 50, 50), Satisfaction::Neutral);
        assert_eq!(final_score(0, 100, 20), Satisfaction::Frown);
        assert_eq!(final_score(0, 0, 50), Satisfaction::Angry);
    }

    #[test]
    fn test_gold_after_service() {
        assert_eq!(gold_after_service(100, Satisfaction::Grin, 40), 150);
        assert_eq!(gold_after_service(100, Satisfaction::Smile, 20), 125);
        assert_eq!(gold_after_service(100, Satisfaction::Neutral, 20), 120);
        assert_eq!(gold_after_service(100, Satisfaction::Frown, 20), 115);
        assert_eq!(gold_after_service(100, Satisfaction::Angry, 10), 100);
    }

    #[test]
    fn test_gold_delta_can_be_negative() {
        assert_eq!(gold_delta(Satisfaction::Angry, 5), -5);
        assert_eq!(gold_delta(Satisfaction::Grin, 25), 35);
    }

    #[test]
    fn test_label_roundtrip_and_unknown() {
        for s in [
            Satisfaction::Grin,
            Satisfaction::Smile,
            Satisfaction::Neutral,
            Satisfaction::Frown,
            Satisfaction::Angry,
        ] {
            assert_eq!(Satisfaction::from_label(s.label()), s);
        }
        assert_eq!(Satisfaction::from_label("Confused Face"), Satisfaction::Angry);
        assert!(Satisfaction::Grin.face_image_path().ends_with("grin_face.png"));
    }

    #[test]
    fn test_score_meal_combines() {
        let score = score_meal(&["acai", "banana"], &["acai", "banana"], 10.0, 60.0, &[100.0, 90.0]);
        assert_eq!(score.accuracy, 100);
        assert_eq!(score.time, 100);
        assert_eq!(score.completion, 95);
        assert_eq!(score.satisfaction, Satisfaction::Grin);
    }
}
