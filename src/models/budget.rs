use serde::{Deserialize, Serialize};

/// Currencies the planner knows a rate for. Budgets are normalized to INR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "INR")]
    Inr,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "GBP")]
    Gbp,
    #[serde(rename = "AED")]
    Aed,
}

impl Currency {
    pub const ALL: [Currency; 5] = [
        Currency::Inr,
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Aed,
    ];

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "INR" => Some(Currency::Inr),
            "USD" => Some(Currency::Usd),
            "EUR" => Some(Currency::Eur),
            "GBP" => Some(Currency::Gbp),
            "AED" => Some(Currency::Aed),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Aed => "AED",
        }
    }

    /// Value of one unit in INR
    pub fn rate_to_reference(&self) -> f64 {
        match self {
            Currency::Inr => 1.0,
            Currency::Usd => 83.0,
            Currency::Eur => 89.0,
            Currency::Gbp => 105.0,
            Currency::Aed => 22.6,
        }
    }
}

/// Spending tier derived from INR per person per day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BudgetTier {
    #[serde(rename = "very_low")]
    VeryLow,
    #[serde(rename = "budget")]
    Budget,
    #[serde(rename = "mid-range")]
    MidRange,
    #[serde(rename = "luxury")]
    Luxury,
}

impl BudgetTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::VeryLow => "very_low",
            BudgetTier::Budget => "budget",
            BudgetTier::MidRange => "mid-range",
            BudgetTier::Luxury => "luxury",
        }
    }

    /// Label with the first letter upper-cased, e.g. "Mid-range"
    pub fn display_label(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Share of the total budget per category:
    /// accommodation, food, transport, activities, miscellaneous.
    pub fn allocation_weights(&self) -> [f64; 5] {
        match self {
            BudgetTier::VeryLow | BudgetTier::Budget => [0.35, 0.25, 0.20, 0.15, 0.05],
            BudgetTier::MidRange => [0.40, 0.25, 0.15, 0.15, 0.05],
            BudgetTier::Luxury => [0.45, 0.20, 0.15, 0.15, 0.05],
        }
    }

    pub fn money_saving_tips(&self) -> &'static str {
        match self {
            BudgetTier::VeryLow | BudgetTier::Budget => {
                "Book accommodations in advance for better rates. Use public transportation. Eat at local restaurants and street food. Look for free attractions and activities. Travel during off-peak seasons."
            }
            BudgetTier::MidRange => {
                "Mix of budget and mid-range accommodations. Combination of local and upscale dining. Use mix of public and private transportation. Include both free and paid attractions. Book popular restaurants in advance."
            }
            BudgetTier::Luxury => {
                "Premium accommodations and experiences. Fine dining and exclusive restaurants. Private transportation options. VIP attraction access and tours. Luxury shopping and spa experiences."
            }
        }
    }
}

/// Category amounts in INR. Unrounded; rounding happens when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetAllocation {
    pub accommodation: f64,
    pub food: f64,
    pub transport: f64,
    pub activities: f64,
    pub miscellaneous: f64,
}

impl BudgetAllocation {
    pub fn total(&self) -> f64 {
        self.accommodation + self.food + self.transport + self.activities + self.miscellaneous
    }

    /// Category label and amount, in report order
    pub fn categories(&self) -> [(&'static str, f64); 5] {
        [
            ("Accommodation", self.accommodation),
            ("Food & Dining", self.food),
            ("Transportation", self.transport),
            ("Activities & Sightseeing", self.activities),
            ("Miscellaneous & Emergency", self.miscellaneous),
        ]
    }
}
