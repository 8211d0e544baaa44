use crate::models::budget::{BudgetAllocation, BudgetTier};

/// INR per person per day at which each tier above `very_low` starts
const BUDGET_THRESHOLD: f64 = 1000.0;
const MID_RANGE_THRESHOLD: f64 = 3000.0;
const LUXURY_THRESHOLD: f64 = 8000.0;

pub struct BudgetClassifier;

impl BudgetClassifier {
    /// Callers must pass non-zero `duration_days` and `traveler_count`.
    pub fn classify(reference_budget: f64, duration_days: u32, traveler_count: u32) -> BudgetTier {
        let per_person_per_day =
            reference_budget / (duration_days as f64 * traveler_count as f64);

        if per_person_per_day < BUDGET_THRESHOLD {
            BudgetTier::VeryLow
        } else if per_person_per_day < MID_RANGE_THRESHOLD {
            BudgetTier::Budget
        } else if per_person_per_day < LUXURY_THRESHOLD {
            BudgetTier::MidRange
        } else {
            BudgetTier::Luxury
        }
    }
}

pub struct BudgetAllocator;

impl BudgetAllocator {
    pub fn allocate(total_reference_budget: f64, tier: BudgetTier) -> BudgetAllocation {
        let [accommodation, food, transport, activities, miscellaneous] =
            tier.allocation_weights().map(|w| total_reference_budget * w);

        BudgetAllocation {
            accommodation,
            food,
            transport,
            activities,
            miscellaneous,
        }
    }
}
