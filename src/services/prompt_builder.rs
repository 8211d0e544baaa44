use crate::models::budget::{BudgetAllocation, BudgetTier};
use crate::models::plan::{PlanRequest, Section};
use crate::services::budget_report::{format_grouped, format_inr};

/// Everything a prompt is parameterized by
pub struct PromptContext<'a> {
    pub request: &'a PlanRequest,
    pub reference_budget: f64,
    pub tier: BudgetTier,
    pub allocation: &'a BudgetAllocation,
}

pub struct PlanPromptBuilder;

impl PlanPromptBuilder {
    /// Single request asking for all five sections as one JSON object
    pub fn combined_prompt(ctx: &PromptContext) -> String {
        let keys = Section::ALL
            .iter()
            .map(|s| s.key())
            .collect::<Vec<_>>()
            .join(", ");

        let guidelines = Section::ALL
            .iter()
            .map(|s| format!("- {}: {}", s.key(), Self::section_guideline(*s, ctx)))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "You are a helpful travel planner.\n\
             Return ONLY a compact JSON object with these string fields: {keys}.\n\
             Do not include markdown, code fences, or any additional commentary.\n\
             \n\
             Context:\n\
             {context}\n\
             \n\
             Guidelines:\n\
             {guidelines}\n",
            keys = keys,
            context = Self::context_block(ctx),
            guidelines = guidelines,
        )
    }

    /// Plain-text request for one section
    pub fn section_prompt(section: Section, ctx: &PromptContext) -> String {
        format!(
            "You are a helpful travel planner.\n\
             Write the {title} section of a trip plan.\n\
             Respond in plain text only: no markdown, no asterisks, no hash headings, no tables, no code fences.\n\
             \n\
             Context:\n\
             {context}\n\
             \n\
             Task:\n\
             {guideline}\n",
            title = Self::section_title(section),
            context = Self::context_block(ctx),
            guideline = Self::section_guideline(section, ctx),
        )
    }

    fn context_block(ctx: &PromptContext) -> String {
        let request = ctx.request;
        let allocation = ctx.allocation;
        format!(
            "From: {from}\n\
             To: {to}\n\
             Duration: {days} days\n\
             Travelers: {travelers}\n\
             Budget: INR {budget_inr} (input: {currency} {budget})\n\
             Budget Category: {tier}\n\
             Budget Breakdown (INR totals):\n  \
             accommodation={accommodation}\n  \
             food={food}\n  \
             transport={transport}\n  \
             activities={activities}\n  \
             miscellaneous={misc}",
            from = request.origin_city,
            to = request.destination_city,
            days = request.duration_days,
            travelers = request.traveler_count,
            budget_inr = format_inr(ctx.reference_budget),
            currency = request.currency_code,
            budget = format_grouped(request.budget_amount),
            tier = ctx.tier.as_str(),
            accommodation = allocation.accommodation.round(),
            food = allocation.food.round(),
            transport = allocation.transport.round(),
            activities = allocation.activities.round(),
            misc = allocation.miscellaneous.round(),
        )
    }

    fn section_title(section: Section) -> &'static str {
        match section {
            Section::Overview => "destination overview",
            Section::AttractivePlaces => "attractions",
            Section::Restaurants => "restaurants and food",
            Section::TravelMethods => "travel methods",
            Section::DetailedItinerary => "day-by-day itinerary",
        }
    }

    fn section_guideline(section: Section, ctx: &PromptContext) -> String {
        let to = &ctx.request.destination_city;
        match section {
            Section::Overview => format!("simple paragraphs on what makes {} special.", to),
            Section::AttractivePlaces => {
                "numbered list (plain text) of 10-15 attractions with short details.".to_string()
            }
            Section::Restaurants => {
                "plain text for breakfast/lunch/dinner/street food with price ranges.".to_string()
            }
            Section::TravelMethods => {
                "flights/trains/bus/local transport and budget split, plain text.".to_string()
            }
            Section::DetailedItinerary => format!(
                "day-by-day schedule for all {} days with morning/afternoon/evening, realistic costs; include a final BUDGET SPENT SUMMARY.",
                ctx.request.duration_days
            ),
        }
    }
}
