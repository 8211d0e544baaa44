use log::{info, warn};
use serde_json::Value;
use std::sync::Arc;

use crate::config::GenerationMode;
use crate::error::PlanError;
use crate::models::plan::{GeneratedSections, Section};
use crate::services::budget_report::BudgetReport;
use crate::services::gemini_client::{check_prompt, TextGenerator};
use crate::services::prompt_builder::{PlanPromptBuilder, PromptContext};
use crate::services::text_sanitizer::sanitize;

#[derive(Debug, Clone, PartialEq)]
pub struct AssembledPlan {
    pub sections: GeneratedSections,
    pub budget_breakdown: String,
}

pub struct PlanAssembler {
    generator: Arc<dyn TextGenerator>,
    mode: GenerationMode,
}

impl PlanAssembler {
    pub fn new(generator: Arc<dyn TextGenerator>, mode: GenerationMode) -> Self {
        Self { generator, mode }
    }

    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_configured()
    }

    /// Build every prompt this plan will send and check it against the
    /// provider limits. Run before any outbound work starts.
    pub fn check_prompts(&self, ctx: &PromptContext<'_>) -> Result<(), PlanError> {
        match self.mode {
            GenerationMode::Combined => check_prompt(&PlanPromptBuilder::combined_prompt(ctx)),
            GenerationMode::Sections => Section::ALL
                .into_iter()
                .try_for_each(|section| check_prompt(&PlanPromptBuilder::section_prompt(section, ctx))),
        }
    }

    pub async fn assemble(
        &self,
        ctx: &PromptContext<'_>,
        request_id: &str,
    ) -> Result<AssembledPlan, PlanError> {
        let raw_sections = match self.mode {
            GenerationMode::Combined => self.generate_combined(ctx, request_id).await?,
            GenerationMode::Sections => self.generate_per_section(ctx, request_id).await?,
        };

        let budget_breakdown = BudgetReport {
            request: ctx.request,
            reference_budget: ctx.reference_budget,
            tier: ctx.tier,
            allocation: ctx.allocation,
        }
        .render();

        Ok(AssembledPlan {
            sections: raw_sections.map_text(sanitize),
            budget_breakdown,
        })
    }

    async fn generate_combined(
        &self,
        ctx: &PromptContext<'_>,
        request_id: &str,
    ) -> Result<GeneratedSections, PlanError> {
        let prompt = PlanPromptBuilder::combined_prompt(ctx);
        let raw = self.generator.generate(&prompt).await?;

        let (sections, parsed) = parse_combined_response(&raw);
        if !parsed {
            warn!(
                "[{}] Combined response was not valid JSON; returning raw text as overview",
                request_id
            );
        }
        Ok(sections)
    }

    /// One call per section, in order. A failed section is left empty unless
    /// the failure means no call can succeed (missing credential, bad prompt).
    async fn generate_per_section(
        &self,
        ctx: &PromptContext<'_>,
        request_id: &str,
    ) -> Result<GeneratedSections, PlanError> {
        let mut sections = GeneratedSections::default();
        let mut last_error = None;

        for section in Section::ALL {
            let prompt = PlanPromptBuilder::section_prompt(section, ctx);
            match self.generator.generate(&prompt).await {
                Ok(text) => {
                    info!("[{}] Generated section {}", request_id, section.key());
                    sections.set(section, text);
                }
                Err(err) if err.is_fatal_for_plan() => return Err(err),
                Err(err) => {
                    warn!(
                        "[{}] Section {} failed, leaving it empty: {}",
                        request_id,
                        section.key(),
                        err
                    );
                    last_error = Some(err);
                }
            }
        }

        match last_error {
            Some(err) if sections.missing().len() == Section::ALL.len() => Err(err),
            _ => Ok(sections),
        }
    }
}

/// Pull the five sections out of a combined response. The JSON object is taken
/// from the first `{` to the last `}` so prose around it is ignored. When no
/// object can be parsed, the whole text becomes the overview and the second
/// value is `false`.
pub fn parse_combined_response(raw: &str) -> (GeneratedSections, bool) {
    let slice = match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => raw,
    };

    match serde_json::from_str::<Value>(slice) {
        Ok(Value::Object(map)) => {
            let mut sections = GeneratedSections::default();
            for section in Section::ALL {
                let text = match map.get(section.key()) {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Null) | None => String::new(),
                    Some(other) => other.to_string(),
                };
                sections.set(section, text);
            }
            (sections, true)
        }
        _ => (
            GeneratedSections {
                overview: raw.to_string(),
                ..Default::default()
            },
            false,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorKind;
    use crate::models::budget::BudgetTier;
    use crate::models::plan::PlanRequest;
    use crate::services::budget_service::BudgetAllocator;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned results and records the prompts it was given
    struct ScriptedGenerator {
        replies: Mutex<VecDeque<Result<String, PlanError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn new(replies: Vec<Result<String, PlanError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        fn is_configured(&self) -> bool {
            true
        }

        async fn generate(&self, prompt: &str) -> Result<String, PlanError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(PlanError::Http("no more replies".to_string())))
        }
    }

    fn rate_limited() -> PlanError {
        PlanError::Provider {
            kind: ProviderErrorKind::RateLimited,
            message: "slow down".to_string(),
        }
    }

    fn goa_request() -> PlanRequest {
        PlanRequest {
            origin_city: "Mumbai".to_string(),
            destination_city: "Goa".to_string(),
            budget_amount: 50000.0,
            currency_code: "INR".to_string(),
            duration_days: 5,
            traveler_count: 2,
        }
    }

    #[test]
    fn test_oversized_prompts_rejected_up_front() {
        let mut request = goa_request();
        request.destination_city = "Goa".repeat(11_000);
        let allocation = BudgetAllocator::allocate(50000.0, BudgetTier::MidRange);
        let ctx = PromptContext {
            request: &request,
            reference_budget: 50000.0,
            tier: BudgetTier::MidRange,
            allocation: &allocation,
        };

        for mode in [GenerationMode::Combined, GenerationMode::Sections] {
            let generator = ScriptedGenerator::new(vec![]);
            let assembler = PlanAssembler::new(generator.clone(), mode);
            assert!(matches!(
                assembler.check_prompts(&ctx),
                Err(PlanError::Validation(_))
            ));
            assert!(generator.prompts.lock().unwrap().is_empty());
        }

        let request = goa_request();
        let ctx = PromptContext {
            request: &request,
            ..ctx
        };
        let assembler = PlanAssembler::new(ScriptedGenerator::new(vec![]), GenerationMode::Sections);
        assert!(assembler.check_prompts(&ctx).is_ok());
    }

    async fn run(
        generator: Arc<ScriptedGenerator>,
        mode: GenerationMode,
    ) -> Result<AssembledPlan, PlanError> {
        let request = goa_request();
        let allocation = BudgetAllocator::allocate(50000.0, BudgetTier::MidRange);
        let ctx = PromptContext {
            request: &request,
            reference_budget: 50000.0,
            tier: BudgetTier::MidRange,
            allocation: &allocation,
        };
        PlanAssembler::new(generator, mode)
            .assemble(&ctx, "test")
            .await
    }

    #[test]
    fn test_parse_prose_wrapped_json() {
        let raw = r#"Sure! {"overview":"Beaches","attractive_places":"1. Baga","restaurants":"Fish thali","travel_methods":"Train","detailed_itinerary":"Day 1: arrive"} Hope that helps"#;
        let (sections, parsed) = parse_combined_response(raw);

        assert!(parsed);
        assert_eq!(sections.overview, "Beaches");
        assert_eq!(sections.attractive_places, "1. Baga");
        assert_eq!(sections.detailed_itinerary, "Day 1: arrive");
    }

    #[test]
    fn test_parse_stringifies_and_defaults_fields() {
        let (sections, parsed) =
            parse_combined_response(r#"{"overview":"Hi","restaurants":["a","b"],"travel_methods":null}"#);

        assert!(parsed);
        assert_eq!(sections.restaurants, r#"["a","b"]"#);
        assert_eq!(sections.travel_methods, "");
        assert_eq!(sections.attractive_places, "");
    }

    #[test]
    fn test_parse_failure_falls_back_to_overview() {
        let raw = "Goa has beaches {but this is not json}";
        let (sections, parsed) = parse_combined_response(raw);

        assert!(!parsed);
        assert_eq!(sections.overview, raw);
        assert_eq!(sections.missing().len(), 4);

        let (sections, parsed) = parse_combined_response("[1, 2, 3]");
        assert!(!parsed);
        assert_eq!(sections.overview, "[1, 2, 3]");
    }

    #[actix_web::test]
    async fn test_combined_mode_sanitizes_and_reports_budget() {
        let generator = ScriptedGenerator::new(vec![Ok(
            r##"{"overview":"**Goa** is  sunny","attractive_places":"# Forts\n• Aguada","restaurants":"r","travel_methods":"t","detailed_itinerary":"d"}"##
                .to_string(),
        )]);

        let plan = run(generator.clone(), GenerationMode::Combined).await.unwrap();

        assert_eq!(plan.sections.overview, "Goa is sunny");
        assert_eq!(plan.sections.attractive_places, "Forts\n Aguada");
        assert!(plan.budget_breakdown.contains("Accommodation: ₹20,000 (40%)"));
        assert_eq!(generator.prompts.lock().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_combined_mode_provider_error_aborts() {
        let generator = ScriptedGenerator::new(vec![Err(rate_limited())]);
        let err = run(generator, GenerationMode::Combined).await.unwrap_err();
        assert_eq!(err.provider_kind(), Some(ProviderErrorKind::RateLimited));
    }

    #[actix_web::test]
    async fn test_section_mode_tolerates_partial_failure() {
        let generator = ScriptedGenerator::new(vec![
            Ok("Overview text".to_string()),
            Err(rate_limited()),
            Ok("Restaurants text".to_string()),
            Ok("Travel text".to_string()),
            Ok("Itinerary text".to_string()),
        ]);

        let plan = run(generator.clone(), GenerationMode::Sections).await.unwrap();

        assert_eq!(plan.sections.overview, "Overview text");
        assert_eq!(plan.sections.attractive_places, "");
        assert_eq!(plan.sections.detailed_itinerary, "Itinerary text");
        assert_eq!(plan.sections.missing(), vec![Section::AttractivePlaces]);
        assert_eq!(generator.prompts.lock().unwrap().len(), 5);
    }

    #[actix_web::test]
    async fn test_section_mode_config_error_aborts() {
        let generator = ScriptedGenerator::new(vec![Err(PlanError::Config(
            "Gemini API key not configured".to_string(),
        ))]);

        let err = run(generator.clone(), GenerationMode::Sections).await.unwrap_err();

        assert!(matches!(err, PlanError::Config(_)));
        assert_eq!(generator.prompts.lock().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_section_mode_all_failed_surfaces_error() {
        let generator = ScriptedGenerator::new((0..5).map(|_| Err(rate_limited())).collect());
        let err = run(generator, GenerationMode::Sections).await.unwrap_err();
        assert_eq!(err.provider_kind(), Some(ProviderErrorKind::RateLimited));
    }
}
