use serde::{Deserialize, Serialize};

use super::geo::MapBundle;

pub const MAX_DURATION_DAYS: u32 = 30;
pub const MAX_TRAVELERS: u32 = 20;
pub const MAX_CITY_CHARS: usize = 200;

/// Body of `POST /api/travel-plan` as sent by the form. Every field is
/// optional here so missing fields are reported by validation rather than
/// by the JSON extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanRequestBody {
    pub from_city: Option<String>,
    pub to_city: Option<String>,
    pub budget: Option<f64>,
    pub currency: Option<String>,
    pub duration: Option<f64>,
    pub travelers: Option<f64>,
}

/// A request that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub origin_city: String,
    pub destination_city: String,
    pub budget_amount: f64,
    pub currency_code: String,
    pub duration_days: u32,
    pub traveler_count: u32,
}

impl PlanRequestBody {
    pub fn validate(&self) -> Result<PlanRequest, String> {
        let from_city = present_text(&self.from_city);
        let to_city = present_text(&self.to_city);
        let currency = present_text(&self.currency);

        let mut missing = Vec::new();
        if from_city.is_none() {
            missing.push("from_city");
        }
        if to_city.is_none() {
            missing.push("to_city");
        }
        if self.budget.is_none() {
            missing.push("budget");
        }
        if currency.is_none() {
            missing.push("currency");
        }
        if self.duration.is_none() {
            missing.push("duration");
        }
        if self.travelers.is_none() {
            missing.push("travelers");
        }

        let (Some(from_city), Some(to_city), Some(budget), Some(currency), Some(duration), Some(travelers)) = (
            from_city,
            to_city,
            self.budget,
            currency,
            self.duration,
            self.travelers,
        ) else {
            return Err(format!("Missing required fields: {}", missing.join(", ")));
        };

        for (field, city) in [("from_city", &from_city), ("to_city", &to_city)] {
            if city.chars().count() > MAX_CITY_CHARS {
                return Err(format!(
                    "{} must be at most {} characters",
                    field, MAX_CITY_CHARS
                ));
            }
        }

        if !budget.is_finite() || budget <= 0.0 || duration <= 0.0 || travelers <= 0.0 {
            return Err("Budget, duration, and travelers must be positive numbers".to_string());
        }

        let duration_days = whole_number(duration, "duration", MAX_DURATION_DAYS)?;
        let traveler_count = whole_number(travelers, "travelers", MAX_TRAVELERS)?;

        Ok(PlanRequest {
            origin_city: from_city,
            destination_city: to_city,
            budget_amount: budget,
            currency_code: currency,
            duration_days,
            traveler_count,
        })
    }
}

fn present_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn whole_number(value: f64, field: &str, max: u32) -> Result<u32, String> {
    if value.fract() != 0.0 {
        return Err(format!("{} must be a whole number", field));
    }
    if value > max as f64 {
        return Err(format!("{} must be at most {}", field, max));
    }
    Ok(value as u32)
}

/// One of the five narrative parts of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Overview,
    AttractivePlaces,
    Restaurants,
    TravelMethods,
    DetailedItinerary,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Overview,
        Section::AttractivePlaces,
        Section::Restaurants,
        Section::TravelMethods,
        Section::DetailedItinerary,
    ];

    /// Field name used on the wire and in the combined JSON prompt
    pub fn key(&self) -> &'static str {
        match self {
            Section::Overview => "overview",
            Section::AttractivePlaces => "attractive_places",
            Section::Restaurants => "restaurants",
            Section::TravelMethods => "travel_methods",
            Section::DetailedItinerary => "detailed_itinerary",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedSections {
    pub overview: String,
    pub attractive_places: String,
    pub restaurants: String,
    pub travel_methods: String,
    pub detailed_itinerary: String,
}

impl GeneratedSections {
    pub fn get(&self, section: Section) -> &str {
        match section {
            Section::Overview => &self.overview,
            Section::AttractivePlaces => &self.attractive_places,
            Section::Restaurants => &self.restaurants,
            Section::TravelMethods => &self.travel_methods,
            Section::DetailedItinerary => &self.detailed_itinerary,
        }
    }

    pub fn set(&mut self, section: Section, text: String) {
        match section {
            Section::Overview => self.overview = text,
            Section::AttractivePlaces => self.attractive_places = text,
            Section::Restaurants => self.restaurants = text,
            Section::TravelMethods => self.travel_methods = text,
            Section::DetailedItinerary => self.detailed_itinerary = text,
        }
    }

    /// Apply `f` to every section
    pub fn map_text(self, f: impl Fn(&str) -> String) -> Self {
        Self {
            overview: f(&self.overview),
            attractive_places: f(&self.attractive_places),
            restaurants: f(&self.restaurants),
            travel_methods: f(&self.travel_methods),
            detailed_itinerary: f(&self.detailed_itinerary),
        }
    }

    /// Sections that came back empty
    pub fn missing(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|s| self.get(*s).trim().is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelPlan {
    pub destination: String,
    pub overview: String,
    pub attractive_places: String,
    pub restaurants: String,
    pub travel_methods: String,
    pub budget_breakdown: String,
    pub detailed_itinerary: String,
    pub maps: MapBundle,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub incomplete_sections: Vec<String>,
}

impl TravelPlan {
    pub fn new(
        destination: &str,
        sections: GeneratedSections,
        budget_breakdown: String,
        maps: MapBundle,
    ) -> Self {
        let incomplete_sections = sections
            .missing()
            .iter()
            .map(|s| s.key().to_string())
            .collect();

        Self {
            destination: destination.to_string(),
            overview: sections.overview,
            attractive_places: sections.attractive_places,
            restaurants: sections.restaurants,
            travel_methods: sections.travel_methods,
            budget_breakdown,
            detailed_itinerary: sections.detailed_itinerary,
            maps,
            incomplete_sections,
        }
    }
}

/// Response envelope returned for every plan request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<TravelPlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlanResult {
    pub fn success(plan: TravelPlan) -> Self {
        Self {
            success: true,
            plan: Some(plan),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            plan: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goa_body() -> PlanRequestBody {
        PlanRequestBody {
            from_city: Some("Mumbai".to_string()),
            to_city: Some("Goa".to_string()),
            budget: Some(50000.0),
            currency: Some("INR".to_string()),
            duration: Some(5.0),
            travelers: Some(2.0),
        }
    }

    #[test]
    fn test_valid_request() {
        let request = goa_body().validate().unwrap();
        assert_eq!(request.origin_city, "Mumbai");
        assert_eq!(request.destination_city, "Goa");
        assert_eq!(request.duration_days, 5);
        assert_eq!(request.traveler_count, 2);
    }

    #[test]
    fn test_missing_fields_are_named() {
        let mut body = goa_body();
        body.travelers = None;
        body.to_city = Some("   ".to_string());

        let err = body.validate().unwrap_err();
        assert!(err.contains("travelers"));
        assert!(err.contains("to_city"));
        assert!(!err.contains("budget"));
    }

    #[test]
    fn test_long_city_names_rejected() {
        let mut body = goa_body();
        body.to_city = Some("G".repeat(MAX_CITY_CHARS + 1));
        assert_eq!(
            body.validate().unwrap_err(),
            "to_city must be at most 200 characters"
        );

        let mut body = goa_body();
        body.from_city = Some("M".repeat(MAX_CITY_CHARS));
        assert!(body.validate().is_ok());
    }

    #[test]
    fn test_non_positive_values_rejected() {
        let mut body = goa_body();
        body.budget = Some(0.0);
        assert!(body.validate().unwrap_err().contains("positive"));

        let mut body = goa_body();
        body.duration = Some(-3.0);
        assert!(body.validate().is_err());
    }

    #[test]
    fn test_bounds_and_whole_numbers() {
        let mut body = goa_body();
        body.duration = Some(31.0);
        assert!(body.validate().unwrap_err().contains("at most 30"));

        let mut body = goa_body();
        body.travelers = Some(21.0);
        assert!(body.validate().unwrap_err().contains("at most 20"));

        let mut body = goa_body();
        body.travelers = Some(2.5);
        assert!(body.validate().unwrap_err().contains("whole number"));

        let mut body = goa_body();
        body.duration = Some(30.0);
        body.travelers = Some(20.0);
        assert!(body.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_listed() {
        let sections = GeneratedSections {
            overview: "Sunny beaches".to_string(),
            restaurants: "  ".to_string(),
            ..Default::default()
        };
        let plan = TravelPlan::new("Goa", sections, String::new(), MapBundle::default());

        assert_eq!(
            plan.incomplete_sections,
            vec![
                "attractive_places",
                "restaurants",
                "travel_methods",
                "detailed_itinerary"
            ]
        );
    }

    #[test]
    fn test_failure_envelope_shape() {
        let json = serde_json::to_value(PlanResult::failure("nope")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "nope");
        assert!(json.get("plan").is_none());
    }
}
