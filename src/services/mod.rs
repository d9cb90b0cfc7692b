pub mod gemini;
pub mod generator_service;
pub mod quiz_service;
pub mod scrape_service;
