// SPDX-License-Identifier: MIT

//! The assistant's lookup capabilities and their catalog.

pub mod currency;
pub mod fd_rates;
pub mod flights;
pub mod holidays;
pub mod rail;
pub mod search;
pub mod stocks;
pub mod time;
pub mod weather;
pub mod wiki;

use crate::concierge::config::Config;
use crate::contract::registry::ToolRegistry;
use crate::contract::tool::Tool;
use reqwest::Client;
use std::sync::Arc;

/// Build the full catalog in its fixed order. All tools share one HTTP
/// client; cloning `Client` is cheap (Arc internally).
pub fn build_registry(config: &Config) -> ToolRegistry {
    let http = Client::new();
    let search = search::SearchClient::new(http.clone(), config);
    let rail = rail::RailClient::new(http.clone(), config);
    let locator = Arc::new(weather::IpInfoLocator::new(http.clone(), config));

    let tools: Vec<Arc<dyn Tool>> = vec![
        Arc::new(time::CurrentTimeTool),
        Arc::new(wiki::WikipediaTool::new(http.clone())),
        Arc::new(search::WebSearchTool::new(search.clone())),
        Arc::new(stocks::StockPriceTool::new(http.clone())),
        Arc::new(weather::WeatherTool::new(http.clone(), config, locator)),
        Arc::new(currency::CurrencyTool::new(http.clone(), config)),
        Arc::new(search::VideoSearchTool::new(search.clone())),
        Arc::new(search::ProductSearchTool::new(search.clone())),
        Arc::new(holidays::HolidayLookupTool),
        Arc::new(rail::TrainStatusTool::new(rail.clone())),
        Arc::new(rail::PnrStatusTool::new(rail)),
        Arc::new(flights::FlightStatusTool::new(http.clone(), config)),
        Arc::new(fd_rates::FdRatesTool::new(http.clone())),
        Arc::new(search::RechargePlanTool::new(search)),
    ];

    for tool in &tools {
        log::info!("Registered tool: {}", tool.name());
    }

    ToolRegistry::from_tools(tools)
}
