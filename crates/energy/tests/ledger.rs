use pretty_assertions::assert_eq;
use stride_energy::*;

fn approx(actual: f32, expected: f32) -> bool {
    let scale = expected.abs().max(1.0);
    (actual - expected).abs() / scale < 1e-3
}

#[test]
fn meal_kcal_matches_formula() {
    for (grams, density) in [(0.0, 0.0), (100.0, 250.0), (37.5, 880.0), (1200.0, 12.0)] {
        let meal = Meal::new("sample", grams, density).unwrap();
        assert!(approx(meal.total_kcal(), grams / 100.0 * density));
        assert!(meal.total_kcal() >= 0.0);
    }
}

#[test]
fn activity_kcal_matches_formula() {
    for (met, minutes, kg) in [(1.0, 1.0, 1.0), (8.0, 45.0, 72.5), (19.5, 5.0, 110.0)] {
        let activity = Activity::new("sample", met, minutes, kg).unwrap();
        assert!(approx(
            activity.kcal_burned(),
            (met * 3.5 * kg / 200.0) * minutes
        ));
    }
}

#[test]
fn consumed_250_expended_100_nets_150() {
    let mut tracker = EnergyBalanceTracker::new();
    // 250 g at 100 kcal/100 g
    tracker.add_consumed(Meal::new("Pasta", 250.0, 100.0).unwrap());
    // 5 MET * 3.5 * 80 / 200 = 7 kcal/min; 100 / 7 minutes
    tracker.add_expended(Activity::new("Cycling", 5.0, 100.0 / 7.0, 80.0).unwrap());

    assert!(approx(tracker.total_consumed(), 250.0));
    assert!(approx(tracker.total_expended(), 100.0));
    assert!(approx(tracker.net_balance(), 150.0));
}

#[test]
fn deficit_is_not_clamped() {
    let mut tracker = EnergyBalanceTracker::new();
    tracker.add_consumed(Meal::new("Apple", 100.0, 50.0).unwrap());
    tracker.add_expended(Activity::new("Running", 8.0, 60.0, 70.0).unwrap());

    let summary = tracker.summary();
    assert!(summary.net_kcal < 0.0);
    assert!(approx(summary.net_kcal, 50.0 - 588.0));
    assert_eq!(summary.balance, Balance::Deficit);
    assert_eq!((summary.meal_count, summary.activity_count), (1, 1));
}

#[test]
fn from_records_matches_incremental() {
    let meals = vec![
        Meal::new("Eggs", 120.0, 155.0).unwrap(),
        Meal::new("Toast", 60.0, 265.0).unwrap(),
    ];
    let activities = vec![Activity::new("Swim", 6.0, 40.0, 65.0).unwrap()];

    let mut incremental = EnergyBalanceTracker::new();
    for meal in meals.clone() {
        incremental.add_consumed(meal);
    }
    for activity in activities.clone() {
        incremental.add_expended(activity);
    }

    let bulk = EnergyBalanceTracker::from_records(meals, activities);
    assert_eq!(bulk.meals(), incremental.meals());
    assert_eq!(bulk.summary(), incremental.summary());
}

#[test]
fn summary_serializes_snake_case() {
    let tracker = EnergyBalanceTracker::from_records(
        [Meal::new("Soup", 300.0, 40.0).unwrap()],
        std::iter::empty(),
    );
    let json = serde_json::to_value(tracker.summary()).unwrap();
    assert_eq!(json["balance"], "surplus");
    assert_eq!(json["meal_count"], 1);
}
