// SPDX-License-Identifier: MIT

//! Upstream credentials, read from the environment once at startup.
//!
//! Every key is optional: an absent key degrades the tools that need it to a
//! "not configured" reply at call time instead of crashing the process.

use std::env;

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Keyword search (web, video, product and recharge-plan lookups)
    pub serpapi_key: Option<String>,
    /// Current-weather service
    pub openweather_key: Option<String>,
    /// Foreign-exchange pair rates
    pub exchange_rate_key: Option<String>,
    /// Rail status and PNR lookups
    pub rapidapi_key: Option<String>,
    /// Flight status lookups
    pub aviationstack_key: Option<String>,
    /// Optional token for IP geolocation; the service also answers without one
    pub ipinfo_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            serpapi_key: read("SERPAPI_API_KEY"),
            openweather_key: read("OPENWEATHER_API_KEY"),
            exchange_rate_key: read("EXCHANGE_RATE_API_KEY"),
            rapidapi_key: read("RAPIDAPI_KEY"),
            aviationstack_key: read("AVIATIONSTACK_KEY"),
            ipinfo_token: read("IPINFO_TOKEN"),
        }
    }
}

fn read(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
