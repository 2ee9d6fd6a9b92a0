// Operator route inputs - validate CLI values, re-prompt until usable

use std::net::IpAddr;

use super::{IpNetwork, StaticRouteRequest};
use crate::config::RouteArgs;
use crate::error::AppResult;
use crate::prompt::Prompter;

const PREFIX_PROMPT: &str = "Please enter the DEST PREFIX (x.x.x.x/z): ";
const NEXT_HOP_PROMPT: &str = "Please enter the NEXTHOP IP (x.x.x.x): ";
const ADMIN_DISTANCE_PROMPT: &str = "Please enter the ADMIN Distance (Default 1): ";

/// Validated route inputs
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInputs {
    pub destination: IpNetwork,
    pub next_hop: IpAddr,
    pub admin_distance: String,
}

impl RouteInputs {
    pub fn to_request(&self) -> StaticRouteRequest {
        StaticRouteRequest::global(self.destination, self.next_hop, &self.admin_distance)
    }
}

/// Validate prefix, next hop and admin distance in that order, asking the
/// operator again for each one that does not parse.
pub fn collect_route_inputs<P>(args: &RouteArgs, prompter: &mut P) -> AppResult<RouteInputs>
where
    P: Prompter + ?Sized,
{
    Ok(RouteInputs {
        destination: read_prefix(&args.prefix, prompter)?,
        next_hop: read_next_hop(&args.next_hop, prompter)?,
        admin_distance: read_admin_distance(&args.admin_distance, prompter)?,
    })
}

/// An empty value is a missing one: prompt without complaining.
pub fn read_prefix<P>(initial: &str, prompter: &mut P) -> AppResult<IpNetwork>
where
    P: Prompter + ?Sized,
{
    let mut candidate = initial.to_string();
    loop {
        match candidate.parse::<IpNetwork>() {
            Ok(network) => return Ok(network),
            Err(e) => {
                if !candidate.is_empty() {
                    tracing::debug!("{}", e);
                    println!();
                    println!("Invalid IP Prefix Detected...");
                }
                candidate = prompter.ask(PREFIX_PROMPT)?;
            }
        }
    }
}

pub fn read_next_hop<P>(initial: &str, prompter: &mut P) -> AppResult<IpAddr>
where
    P: Prompter + ?Sized,
{
    let mut candidate = initial.to_string();
    loop {
        match candidate.trim().parse::<IpAddr>() {
            Ok(addr) => return Ok(addr),
            Err(_) => {
                if !candidate.is_empty() {
                    println!();
                    println!("Invalid IP Next-HOP Detected...");
                }
                candidate = prompter.ask(NEXT_HOP_PROMPT)?;
            }
        }
    }
}

/// Returned in canonical decimal form, e.g. "007" becomes "7"
pub fn read_admin_distance<P>(initial: &str, prompter: &mut P) -> AppResult<String>
where
    P: Prompter + ?Sized,
{
    let mut candidate = initial.to_string();
    loop {
        match candidate.trim().parse::<i64>() {
            Ok(distance) => return Ok(distance.to_string()),
            Err(_) => {
                println!("Invalid IP Admin Distance Detected...");
                candidate = prompter.ask(ADMIN_DISTANCE_PROMPT)?;
            }
        }
    }
}
