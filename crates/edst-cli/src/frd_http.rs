// SPDX-License-Identifier: MIT
// Copyright (c) 2020 Austin Goudge
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use edst_core::route::Position;
use edst_core::FrdResolver;
use log::debug;
use serde::Serialize;
use std::time::Duration;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FrdRequest<'a> {
    artcc_id: &'a str,
    lat: f64,
    lon: f64,
}

/// Asks the flight-data server for a fix-radial-distance.
pub struct HttpFrdResolver {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpFrdResolver {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }
}

impl FrdResolver for HttpFrdResolver {
    fn resolve_frd(&self, artcc_id: &str, position: Position) -> Result<String> {
        let url = format!("{}/edst/frd", self.base_url);
        debug!("Requesting FRD: url={} lat={} lon={}", url, position.lat, position.lon);
        let frd = self
            .client
            .post(&url)
            .json(&FrdRequest {
                artcc_id,
                lat: position.lat,
                lon: position.lon,
            })
            .send()
            .with_context(|| format!("FRD request to {} failed", url))?
            .error_for_status()?
            .text()?;
        Ok(frd.trim().to_string())
    }
}
