/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
use std::time::Duration;
use anyhow::{Context,Result};
use nws_common::{check_cli, define_cli, init_tracing, config::load_config_or_default};
use nws_grid::{
    enrich_cities, lookup_records, state_capitals, write_cities, EnrichSummary, GridConfig, LivePointsTransport
};

define_cli! { ARGS [about="look up NWS forecast grid cells for the US state capitals"] =
    config: Option<String> [help="filename of GridConfig RON file (built-in defaults if not set)", short, long],
    output: Option<String> [help="pathname of the JSON output file (overrides config)", short, long],
    delay_ms: Option<u64> [help="pause between requests in milliseconds (overrides config)", short, long]
}

#[tokio::main]
async fn main ()->Result<()> {
    check_cli!(ARGS);
    init_tracing();

    let mut cfg: GridConfig = load_config_or_default( ARGS.config.as_ref())?;
    if let Some(output) = &ARGS.output { cfg.output = output.clone() }
    if let Some(ms) = ARGS.delay_ms { cfg.request_delay = Duration::from_millis(ms) }

    let transport = LivePointsTransport::new( &cfg)?;
    let cities = state_capitals();
    let total = cities.len();

    println!("Fetching grid data for {total} cities...");
    let lookups = enrich_cities( &transport, &cfg, cities, |lookup| println!("{}", lookup.report(total))).await;

    let records = lookup_records( &lookups);
    let n = write_cities( &cfg.output, &records).with_context(|| format!("failed to write {}", cfg.output))?;

    let summary = EnrichSummary::of( &lookups);
    println!("\nSaved {} cities to {} ({} resolved, {} failed)", n, cfg.output, summary.resolved, summary.failed);

    Ok(())
}
