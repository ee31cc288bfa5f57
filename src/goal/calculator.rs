//! Derived values for a savings goal: what is left, how far along it is and how long it will take.

use std::fmt::Display;

use crate::goal::SavingsGoal;

/// The estimated number of weekly contributions needed to reach a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeeksRemaining {
    /// The goal will be met after this many weeks. Zero means it already has been.
    Weeks(u64),
    /// Nothing is saved each week so the goal will never be met at the current rate.
    Never,
}

impl Display for WeeksRemaining {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeeksRemaining::Weeks(1) => write!(f, "1 week"),
            WeeksRemaining::Weeks(weeks) => write!(f, "{weeks} weeks"),
            WeeksRemaining::Never => write!(f, "Never"),
        }
    }
}

/// The amount still needed, floored at zero.
pub fn remaining(goal: &SavingsGoal) -> f64 {
    (goal.target_price - goal.current_savings).max(0.0)
}

/// The share of the target price saved so far as a percentage in `[0, 100]`.
pub fn progress_percent(goal: &SavingsGoal) -> f64 {
    (goal.current_savings * 100.0 / goal.target_price).min(100.0)
}

/// How many weeks of saving `weekly_savings` it takes to close the remaining amount.
pub fn weeks_remaining(goal: &SavingsGoal) -> WeeksRemaining {
    let remaining = remaining(goal);

    if remaining == 0.0 {
        return WeeksRemaining::Weeks(0);
    }

    if goal.weekly_savings == 0.0 {
        return WeeksRemaining::Never;
    }

    let weeks = (remaining / goal.weekly_savings).ceil();

    // Rates so small that the estimate overflows are as good as never.
    if !weeks.is_finite() || weeks >= u64::MAX as f64 {
        return WeeksRemaining::Never;
    }

    WeeksRemaining::Weeks(weeks as u64)
}

/// Whether the current savings cover the target price.
pub fn is_achieved(goal: &SavingsGoal) -> bool {
    goal.current_savings >= goal.target_price
}

/// All the derived values for one goal, for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalProgress {
    /// See [remaining].
    pub remaining: f64,
    /// See [progress_percent].
    pub progress_percent: f64,
    /// See [weeks_remaining].
    pub weeks_remaining: WeeksRemaining,
    /// See [is_achieved].
    pub is_achieved: bool,
}

impl From<&SavingsGoal> for GoalProgress {
    fn from(goal: &SavingsGoal) -> Self {
        Self {
            remaining: remaining(goal),
            progress_percent: progress_percent(goal),
            weeks_remaining: weeks_remaining(goal),
            is_achieved: is_achieved(goal),
        }
    }
}

#[cfg(test)]
mod calculator_tests {
    use time::macros::datetime;

    use crate::goal::{
        GoalId, ProductName, SavingsGoal,
        calculator::{
            GoalProgress, WeeksRemaining, is_achieved, progress_percent, remaining,
            weeks_remaining,
        },
    };

    fn goal(target_price: f64, weekly_savings: f64, current_savings: f64) -> SavingsGoal {
        SavingsGoal {
            id: GoalId::new_random(),
            product_name: ProductName::new_unchecked("New Laptop"),
            target_price,
            weekly_savings,
            current_savings,
            created_at: datetime!(2025-10-01 12:00 UTC),
            updated_at: datetime!(2025-10-01 12:00 UTC),
        }
    }

    #[test]
    fn new_laptop_scenario() {
        let goal = goal(1500.0, 50.0, 300.0);

        assert_eq!(remaining(&goal), 1200.0);
        assert_eq!(progress_percent(&goal), 20.0);
        assert_eq!(weeks_remaining(&goal), WeeksRemaining::Weeks(24));
        assert!(!is_achieved(&goal));
    }

    #[test]
    fn zero_weekly_savings_never_finishes() {
        let goal = goal(1000.0, 0.0, 0.0);

        assert_eq!(weeks_remaining(&goal), WeeksRemaining::Never);
        assert!(!is_achieved(&goal));
        assert_eq!(progress_percent(&goal), 0.0);
    }

    #[test]
    fn zero_weekly_savings_on_met_goal_is_zero_weeks() {
        let goal = goal(1000.0, 0.0, 1000.0);

        assert_eq!(weeks_remaining(&goal), WeeksRemaining::Weeks(0));
        assert!(is_achieved(&goal));
    }

    #[test]
    fn exactly_met_goal_is_achieved() {
        let goal = goal(1000.0, 25.0, 1000.0);

        assert_eq!(remaining(&goal), 0.0);
        assert_eq!(progress_percent(&goal), 100.0);
        assert_eq!(weeks_remaining(&goal), WeeksRemaining::Weeks(0));
        assert!(is_achieved(&goal));
    }

    #[test]
    fn overshooting_goal_is_capped() {
        let goal = goal(100.0, 10.0, 250.0);

        assert_eq!(remaining(&goal), 0.0);
        assert_eq!(progress_percent(&goal), 100.0);
        assert_eq!(weeks_remaining(&goal), WeeksRemaining::Weeks(0));
    }

    #[test]
    fn partial_week_rounds_up() {
        let goal = goal(100.0, 30.0, 0.0);

        assert_eq!(weeks_remaining(&goal), WeeksRemaining::Weeks(4));
    }

    #[test]
    fn tiny_remaining_amount_takes_one_week() {
        let goal = goal(100.0, 50.0, 99.99);

        assert_eq!(weeks_remaining(&goal), WeeksRemaining::Weeks(1));
    }

    #[test]
    fn vanishingly_small_weekly_savings_never_finishes() {
        let goal = goal(1000.0, 1e-300, 0.0);

        assert_eq!(weeks_remaining(&goal), WeeksRemaining::Never);
    }

    #[test]
    fn properties_hold_across_a_grid_of_goals() {
        let targets = [0.01, 1.0, 99.99, 1000.0, 123_456.78];
        let weekly = [0.0, 0.5, 50.0, 10_000.0];
        let current = [0.0, 0.01, 50.0, 999.99, 1000.0, 200_000.0];

        for &target_price in &targets {
            for &weekly_savings in &weekly {
                for &current_savings in &current {
                    let goal = goal(target_price, weekly_savings, current_savings);
                    let progress = GoalProgress::from(&goal);

                    assert!(
                        (0.0..=100.0).contains(&progress.progress_percent),
                        "progress out of range for {goal:?}"
                    );
                    assert!(progress.remaining >= 0.0, "negative remaining for {goal:?}");
                    assert_eq!(
                        progress.is_achieved,
                        progress.remaining == 0.0,
                        "achieved flag disagrees with remaining for {goal:?}"
                    );
                    assert_eq!(
                        progress.weeks_remaining == WeeksRemaining::Weeks(0),
                        progress.is_achieved,
                        "zero weeks disagrees with achieved for {goal:?}"
                    );
                    assert_eq!(
                        progress.weeks_remaining == WeeksRemaining::Never,
                        weekly_savings == 0.0 && !progress.is_achieved,
                        "never disagrees with weekly savings for {goal:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn displays_weeks() {
        assert_eq!(WeeksRemaining::Weeks(1).to_string(), "1 week");
        assert_eq!(WeeksRemaining::Weeks(24).to_string(), "24 weeks");
        assert_eq!(WeeksRemaining::Weeks(0).to_string(), "0 weeks");
        assert_eq!(WeeksRemaining::Never.to_string(), "Never");
    }
}
