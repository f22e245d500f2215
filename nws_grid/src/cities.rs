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
//! the built-in city list: the 50 US state capitals

use crate::CityRecord;

/// (name, latitude, longitude) in decimal degrees
pub const STATE_CAPITALS: &[(&str, f64, f64)] = &[
    ("Montgomery", 32.3792, -86.3077),
    ("Juneau", 58.3019, -134.4197),
    ("Phoenix", 33.4484, -112.0740),
    ("Little Rock", 34.7465, -92.2896),
    ("Sacramento", 38.5816, -121.4944),
    ("Denver", 39.7392, -104.9903),
    ("Hartford", 41.7658, -72.6734),
    ("Dover", 39.1582, -75.5244),
    ("Tallahassee", 30.4383, -84.2807),
    ("Atlanta", 33.7490, -84.3880),
    ("Honolulu", 21.3069, -157.8583),
    ("Boise", 43.6150, -116.2023),
    ("Springfield", 39.7817, -89.6501),
    ("Indianapolis", 39.7684, -86.1581),
    ("Des Moines", 41.6195, -93.5911),
    ("Topeka", 39.0473, -95.6752),
    ("Frankfort", 38.2009, -84.8733),
    ("Baton Rouge", 30.4515, -91.1871),
    ("Augusta", 44.3106, -69.7795),
    ("Annapolis", 38.9784, -76.4922),
    ("Boston", 42.3601, -71.0589),
    ("Lansing", 42.7325, -84.5555),
    ("St. Paul", 44.9537, -93.0900),
    ("Jackson", 32.2988, -90.1848),
    ("Jefferson City", 38.5767, -92.1735),
    ("Helena", 46.5891, -112.0391),
    ("Lincoln", 40.8136, -96.7026),
    ("Carson City", 39.1638, -119.7674),
    ("Concord", 43.2081, -71.5375),
    ("Trenton", 40.2206, -74.7597),
    ("Santa Fe", 35.6870, -105.9378),
    ("Albany", 42.6526, -73.7562),
    ("Raleigh", 35.7796, -78.6382),
    ("Bismarck", 46.8083, -100.7837),
    ("Columbus", 39.9612, -82.9988),
    ("Oklahoma City", 35.4676, -97.5164),
    ("Salem", 44.9429, -123.0351),
    ("Harrisburg", 40.2732, -76.8867),
    ("Providence", 41.8240, -71.4128),
    ("Columbia", 34.0007, -81.0348),
    ("Pierre", 44.3683, -100.3510),
    ("Nashville", 36.1627, -86.7816),
    ("Austin", 30.2672, -97.7431),
    ("Salt Lake City", 40.7608, -111.8910),
    ("Montpelier", 44.2601, -72.5754),
    ("Richmond", 37.5407, -77.4360),
    ("Olympia", 47.0379, -122.9007),
    ("Charleston", 38.3498, -81.6326),
    ("Madison", 43.0731, -89.4012),
    ("Cheyenne", 41.1400, -104.8202),
];

/// owned, not-yet-enriched records for all state capitals, in list order
pub fn state_capitals()->Vec<CityRecord> {
    cities_from( STATE_CAPITALS)
}

pub fn cities_from (list: &[(&str, f64, f64)])->Vec<CityRecord> {
    list.iter().map( |(name,lat,lng)| CityRecord::new( *name, *lat, *lng)).collect()
}
