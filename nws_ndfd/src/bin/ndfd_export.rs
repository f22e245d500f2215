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
use anyhow::{Context,Result};
use nws_common::{check_cli, define_cli, init_tracing, config::load_config_or_default};
use nws_ndfd::{export_filename, export_layer_image, export_url, ndfd_client, select_layer, ForecastKind, NdfdConfig};

define_cli! { ARGS [about="export a NDFD temperature forecast layer as image"] =
    config: Option<String> [help="filename of NdfdConfig RON file (built-in defaults if not set)", short, long],
    kind: Option<ForecastKind> [help="forecast kind: high or low (default high)", short, long],
    day: Option<u32> [help="forecast day 1..3 (default 1)", short, long],
    layer: Option<u32> [help="explicit layer id (takes precedence over kind and day)", short, long],
    output: Option<String> [help="pathname of the image file (default ndfd_<layer>.<format>)", short, long]
}

#[tokio::main]
async fn main ()->Result<()> {
    check_cli!(ARGS);
    init_tracing();

    let cfg: NdfdConfig = load_config_or_default( ARGS.config.as_ref())?;
    let layer_id = select_layer( ARGS.layer, ARGS.kind, ARGS.day)?;
    let output = ARGS.output.clone().unwrap_or_else( || export_filename( &cfg, layer_id));

    let client = ndfd_client( &cfg)?;
    println!("Exporting layer {layer_id}: {}", export_url( &cfg, layer_id));

    let len = export_layer_image( &client, &cfg, layer_id, &output).await
        .with_context(|| format!("failed to export layer {layer_id}"))?;
    println!("Saved {len} bytes to {output}");

    Ok(())
}
