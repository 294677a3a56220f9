// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Deserialize;

use crate::utils::http_client;

const BASE_URL: &str = "https://api.coingecko.com/api/v3";

fn api_key_param() -> String {
    match std::env::var("COINGECKO_API_KEY") {
        Ok(key) if !key.is_empty() => format!("&x_cg_demo_api_key={}", key),
        _ => String::new(),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoinPrice {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub sparkline_in_7d: Option<Sparkline>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sparkline {
    pub price: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub market_cap_rank: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    coins: Vec<SearchHit>,
}

/// Search outcome: candidates, or an empty list plus a user-facing message.
/// Failures never escape as errors.
pub struct SearchOutcome {
    pub results: Vec<SearchHit>,
    pub error: Option<String>,
}

/// Current prices for a set of coin ids, 7-day sparkline included.
pub fn fetch_prices(ids: &[String]) -> Result<Vec<CoinPrice>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let url = format!(
        "{}/coins/markets?vs_currency=usd&ids={}&order=market_cap_desc&sparkline=true&price_change_percentage=24h{}",
        BASE_URL,
        ids.join(","),
        api_key_param()
    );
    let client = http_client()?;
    let resp = client.get(url).send()?.error_for_status()?;
    let prices: Vec<CoinPrice> = resp.json()?;
    Ok(prices)
}

pub fn search(query: &str) -> SearchOutcome {
    let run = || -> Result<reqwest::blocking::Response> {
        let url = format!("{}/search?query={}{}", BASE_URL, query, api_key_param());
        let client = http_client()?;
        Ok(client.get(url).send()?)
    };
    let resp = match run() {
        Ok(resp) => resp,
        Err(_) => {
            return SearchOutcome {
                results: Vec::new(),
                error: Some("Network error occurred.".to_string()),
            };
        }
    };
    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return SearchOutcome {
            results: Vec::new(),
            error: Some("Too many requests. Please wait a moment.".to_string()),
        };
    }
    if !resp.status().is_success() {
        return SearchOutcome {
            results: Vec::new(),
            error: Some("Failed to fetch coins.".to_string()),
        };
    }
    match resp.json::<SearchResponse>() {
        Ok(body) => SearchOutcome {
            results: body.coins,
            error: None,
        },
        Err(_) => SearchOutcome {
            results: Vec::new(),
            error: Some("Failed to fetch coins.".to_string()),
        },
    }
}

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    #[serde(default)]
    prices: Vec<(f64, f64)>,
}

/// Price series for a coin over the trailing `days` window, as
/// (unix epoch milliseconds, price) pairs.
pub fn market_chart(id: &str, days: u32) -> Result<Vec<(f64, f64)>> {
    let url = format!(
        "{}/coins/{}/market_chart?vs_currency=usd&days={}{}",
        BASE_URL,
        id,
        days,
        api_key_param()
    );
    let client = http_client()?;
    let resp = client.get(url).send()?.error_for_status()?;
    let body: MarketChartResponse = resp.json()?;
    Ok(body.prices)
}
