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
use anyhow::Result;
use nws_common::{check_cli, define_cli, init_tracing, config::load_config_or_default};
use nws_ndfd::{categorize_layers, format_catalog, get_layer_info, get_service_info, ndfd_client, NdfdConfig, TimeInfo};

define_cli! { ARGS [about="list the layers of the NDFD temperature MapServer"] =
    config: Option<String> [help="filename of NdfdConfig RON file (built-in defaults if not set)", short, long],
    layer: Vec<u32> [help="only show metadata of the given layer id (can be repeated)", short, long]
}

fn time_info_line (time_info: &Option<TimeInfo>)->String {
    match time_info {
        Some(ti) => ti.to_string(),
        None => "None".to_string()
    }
}

#[tokio::main]
async fn main ()->Result<()> {
    check_cli!(ARGS);
    init_tracing();

    let cfg: NdfdConfig = load_config_or_default( ARGS.config.as_ref())?;
    let client = ndfd_client( &cfg)?;

    if ARGS.layer.is_empty() {
        let info = get_service_info( &client, &cfg).await?;

        println!("Service: {}", cfg.service_url);
        if let Some(desc) = &info.description {
            if !desc.is_empty() { println!("Description: {desc}") }
        }
        println!("Time Info: {}\n", time_info_line( &info.time_info));

        let catalog = categorize_layers( &info.layers);
        print!("{}", format_catalog( &catalog));

        let timed: Vec<_> = info.layers.iter().filter( |l| l.time_info.is_some()).collect();
        if !timed.is_empty() {
            println!("\nLayers with time info:");
            for l in timed {
                println!("  {} (ID {}): {}", l.name, l.id, time_info_line( &l.time_info));
            }
        }

    } else {
        for id in &ARGS.layer {
            let layer = get_layer_info( &client, &cfg, *id).await?;
            println!("Layer {}:", layer.id);
            println!("  Name: {}", layer.name);
            println!("  Time Info: {}", time_info_line( &layer.time_info));
        }
    }

    Ok(())
}
