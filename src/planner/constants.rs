/// Fixed iteration budget for the menu/plan feedback loop. The bonus
/// encounter estimate is not guaranteed contractive, so the loop always
/// runs to the budget and keeps the final plan.
pub const BALANCE_ITERATIONS: usize = 5;

/// Fallback value of one ordinary turn when the state file has none.
pub const DEFAULT_TURN_VALUE: f64 = 4000.0;

/// A bonus encounter is worth this many ordinary turns by default.
pub const ENCOUNTER_VALUE_MULT: f64 = 4.0;

/// Strict-improvement margin for knapsack comparisons; ties keep the
/// earlier-declared entry.
pub const VALUE_EPSILON: f64 = 1e-9;
