pub mod budget_report;
pub mod budget_service;
pub mod currency_service;
pub mod gemini_client;
pub mod geocoding_service;
pub mod map_service;
pub mod mock_plan_service;
pub mod plan_assembler;
pub mod prompt_builder;
pub mod text_sanitizer;
pub mod travel_plan_service;
