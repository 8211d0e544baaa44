use crate::models::budget::BudgetTier;
use crate::models::plan::{GeneratedSections, PlanRequest};
use crate::services::text_sanitizer::sanitize;

/// Locally written sections used when mock mode is on. No network calls.
pub fn mock_sections(request: &PlanRequest, tier: BudgetTier) -> GeneratedSections {
    let sections = GeneratedSections {
        overview: format!(
            "A pleasant trip from {} to {} over {} days for {} travelers.",
            request.origin_city,
            request.destination_city,
            request.duration_days,
            request.traveler_count
        ),
        attractive_places: "1. Central Park - Relaxing green space.\n2. City Museum - Local history and culture."
            .to_string(),
        restaurants: "Breakfast: Cozy Cafe; Lunch: Downtown Deli; Dinner: Riverside Grill.".to_string(),
        travel_methods: format!(
            "Flights, trains, and local taxis are available with budget options for {}.",
            tier.as_str()
        ),
        detailed_itinerary: (1..=request.duration_days)
            .map(|day| format!("Day {}: {}", day, mock_day_activity(day)))
            .collect::<Vec<_>>()
            .join("\n"),
    };

    sections.map_text(sanitize)
}

fn mock_day_activity(day: u32) -> &'static str {
    match day {
        1 => "Arrival and city walk.",
        d if d % 3 == 2 => "Museums and markets.",
        d if d % 3 == 0 => "Parks and riverfront.",
        _ => "Free day for local favourites.",
    }
}
