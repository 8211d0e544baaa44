use crate::models::budget::{BudgetAllocation, BudgetTier};
use crate::models::plan::PlanRequest;

/// Inputs for the budget breakdown text shown next to the generated sections
pub struct BudgetReport<'a> {
    pub request: &'a PlanRequest,
    pub reference_budget: f64,
    pub tier: BudgetTier,
    pub allocation: &'a BudgetAllocation,
}

impl BudgetReport<'_> {
    pub fn render(&self) -> String {
        let travelers = self.request.traveler_count as f64;
        let mut lines = vec![
            format!(
                "BUDGET BREAKDOWN (Total: ₹{} / {} {})",
                format_inr(self.reference_budget),
                self.request.currency_code,
                format_grouped(self.request.budget_amount)
            ),
            String::new(),
            format!(
                "Per Person Cost: ₹{}",
                format_inr(self.reference_budget / travelers)
            ),
            format!("Budget Category: {}", self.tier.display_label()),
            format!("Trip Duration: {} days", self.request.duration_days),
        ];

        for (label, amount) in self.allocation.categories() {
            let percent = if self.reference_budget > 0.0 {
                (amount / self.reference_budget * 100.0).round()
            } else {
                0.0
            };
            lines.push(String::new());
            lines.push(format!(
                "{}: ₹{} ({}%) - ₹{} per person",
                label,
                format_inr(amount),
                percent,
                format_inr(amount / travelers)
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "Money-Saving Tips for {} Budget:",
            self.tier.as_str()
        ));
        lines.push(self.tier.money_saving_tips().to_string());

        lines.join("\n")
    }
}

/// Round to the nearest rupee and group digits the Indian way (12,34,567)
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    if digits.len() <= 3 {
        return format!("{}{}", sign, digits);
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{}{},{}", sign, groups.join(","), tail)
}

/// Thousands grouping with up to two decimals, e.g. 1,234.5
pub fn format_grouped(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    if fraction.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, fraction)
    }
}
