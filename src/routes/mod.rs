// Routes module - static route payload, operator input validation and rollout

pub mod apply;
pub mod input;
pub mod prefix;

use serde::Serialize;
use std::net::IpAddr;

pub use prefix::IpNetwork;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextHop {
    pub nexthop_ip: String,
    pub nexthop_interface_id: Option<String>,
    pub admin_distance: String,
    #[serde(rename = "self")]
    pub is_self: bool,
}

/// Body of a static route creation call. Built once per run and sent
/// unchanged to every confirmed element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticRouteRequest {
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub destination_prefix: String,
    pub nexthops: Vec<NextHop>,
    pub scope: String,
    pub network_context_id: Option<String>,
}

impl StaticRouteRequest {
    pub fn global(destination: IpNetwork, next_hop: IpAddr, admin_distance: &str) -> Self {
        StaticRouteRequest {
            description: None,
            tags: None,
            destination_prefix: destination.to_string(),
            nexthops: vec![NextHop {
                nexthop_ip: next_hop.to_string(),
                nexthop_interface_id: None,
                admin_distance: admin_distance.to_string(),
                is_self: false,
            }],
            scope: "global".to_string(),
            network_context_id: None,
        }
    }
}
