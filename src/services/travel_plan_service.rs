//! Plan pipeline: validate, classify and allocate, generate, geocode, compose.
//!
//! Generation and geocoding run side by side. A generation failure ends the
//! request with an error; geocoding and map failures only leave `maps` empty.

use log::{error, info};
use reqwest::Client;
use std::sync::Arc;

use crate::config::{AppConfig, GenerationMode};
use crate::error::PlanError;
use crate::models::budget::BudgetTier;
use crate::models::geo::MapBundle;
use crate::models::plan::{PlanRequestBody, TravelPlan};
use crate::services::budget_report::BudgetReport;
use crate::services::budget_service::{BudgetAllocator, BudgetClassifier};
use crate::services::currency_service::CurrencyConverter;
use crate::services::gemini_client::{GeminiClient, TextGenerator};
use crate::services::geocoding_service::GeoResolver;
use crate::services::map_service::MapComposer;
use crate::services::mock_plan_service::mock_sections;
use crate::services::plan_assembler::PlanAssembler;
use crate::services::prompt_builder::PromptContext;

pub struct PlanPipeline {
    assembler: PlanAssembler,
    geo_resolver: GeoResolver,
    map_composer: MapComposer,
    mock_mode: bool,
}

impl PlanPipeline {
    pub fn new(
        assembler: PlanAssembler,
        geo_resolver: GeoResolver,
        map_composer: MapComposer,
        mock_mode: bool,
    ) -> Self {
        Self {
            assembler,
            geo_resolver,
            map_composer,
            mock_mode,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, PlanError> {
        let http_client = Client::builder().timeout(config.outbound_timeout).build()?;
        let generator: Arc<dyn TextGenerator> =
            Arc::new(GeminiClient::new(&config.generation, config.outbound_timeout)?);

        Ok(Self::new(
            PlanAssembler::new(generator, config.generation.mode),
            GeoResolver::from_config(&config.maps, http_client.clone()),
            MapComposer::from_config(&config.maps, http_client),
            config.mock_mode,
        ))
    }

    pub fn generation_configured(&self) -> bool {
        self.assembler.is_configured()
    }

    pub fn generation_mode(&self) -> GenerationMode {
        self.assembler.mode()
    }

    pub fn mock_mode(&self) -> bool {
        self.mock_mode
    }

    pub fn geocoders(&self) -> Vec<&'static str> {
        self.geo_resolver.provider_names()
    }

    pub fn static_map_providers(&self) -> Vec<&'static str> {
        self.map_composer.provider_names()
    }

    /// Run one request to completion. `force_mock` turns on mock mode for
    /// this request only.
    pub async fn plan_trip(
        &self,
        body: &PlanRequestBody,
        force_mock: bool,
        request_id: &str,
    ) -> Result<TravelPlan, PlanError> {
        let request = body.validate().map_err(|message| {
            info!("[{}] Rejected plan request: {}", request_id, message);
            PlanError::Validation(message)
        })?;

        let reference_budget =
            CurrencyConverter::to_reference(request.budget_amount, &request.currency_code);
        if !reference_budget.is_finite() {
            info!(
                "[{}] Rejected plan request: budget overflows after conversion",
                request_id
            );
            return Err(PlanError::Validation(
                "Budget is too large to convert".to_string(),
            ));
        }
        let tier = BudgetClassifier::classify(
            reference_budget,
            request.duration_days,
            request.traveler_count,
        );
        let allocation = BudgetAllocator::allocate(reference_budget, tier);
        let ctx = PromptContext {
            request: &request,
            reference_budget,
            tier,
            allocation: &allocation,
        };

        info!(
            "[{}] Planning {} -> {}: {} days, {} travelers, INR {:.0}, tier {}",
            request_id,
            request.origin_city,
            request.destination_city,
            request.duration_days,
            request.traveler_count,
            reference_budget,
            tier.as_str()
        );

        if self.mock_mode || force_mock {
            info!("[{}] Using mock mode for travel plan generation", request_id);
            return Ok(Self::mock_plan(&ctx, tier));
        }

        if !self.assembler.is_configured() {
            error!("[{}] Gemini API key not found in environment variables", request_id);
            return Err(PlanError::Config(
                "Gemini API key not configured. Please check your environment variables."
                    .to_string(),
            ));
        }

        self.assembler.check_prompts(&ctx).map_err(|e| {
            info!("[{}] Rejected plan request: {}", request_id, e);
            e
        })?;

        let maps_future = async {
            let (origin, destination) = futures::join!(
                self.geo_resolver.resolve(&request.origin_city),
                self.geo_resolver.resolve(&request.destination_city)
            );
            self.map_composer.compose(origin, destination).await
        };

        let (assembled, maps) =
            futures::join!(self.assembler.assemble(&ctx, request_id), maps_future);

        let assembled = assembled.map_err(|e| {
            error!("[{}] Travel planning failed: {}", request_id, e);
            e
        })?;

        let plan = TravelPlan::new(
            &request.destination_city,
            assembled.sections,
            assembled.budget_breakdown,
            maps,
        );
        if !plan.incomplete_sections.is_empty() {
            info!(
                "[{}] Plan returned with empty sections: {}",
                request_id,
                plan.incomplete_sections.join(", ")
            );
        }
        Ok(plan)
    }

    fn mock_plan(ctx: &PromptContext<'_>, tier: BudgetTier) -> TravelPlan {
        let budget_breakdown = BudgetReport {
            request: ctx.request,
            reference_budget: ctx.reference_budget,
            tier,
            allocation: ctx.allocation,
        }
        .render();

        TravelPlan::new(
            &ctx.request.destination_city,
            mock_sections(ctx.request, tier),
            budget_breakdown,
            MapBundle::default(),
        )
    }
}
