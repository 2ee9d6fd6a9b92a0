// The full run: authenticate, find the site and its elements, roll out the route

use crate::config::Config;
use crate::controller::auth::{self, CredentialSource};
use crate::controller::{ControllerApi, Element};
use crate::error::{AppError, AppResult};
use crate::inventory::{self, SiteMatch};
use crate::prompt::Prompter;
use crate::routes::apply::{self, ApplySummary};
use crate::routes::input;

/// Authenticate, then run the rollout. Once a session exists it is logged
/// out on every path, fatal ones included.
pub async fn run<C, P>(
    config: &Config,
    credentials: &CredentialSource,
    api: &mut C,
    prompter: &mut P,
) -> AppResult<ApplySummary>
where
    C: ControllerApi + ?Sized,
    P: Prompter + ?Sized,
{
    auth::authenticate(api, credentials, prompter).await?;

    let outcome = add_route_to_site(config, &*api, prompter).await;

    println!("Logging out");
    if let Err(e) = api.logout().await {
        tracing::warn!("logout failed: {}", e);
    }

    outcome
}

async fn add_route_to_site<C, P>(
    config: &Config,
    api: &C,
    prompter: &mut P,
) -> AppResult<ApplySummary>
where
    C: ControllerApi + ?Sized,
    P: Prompter + ?Sized,
{
    let site = match_site(&config.route.site_name, api).await?;

    let tenant = api.list_tenant().await?;
    println!(
        "TENANT NAME: {}",
        tenant.name.as_deref().unwrap_or("None")
    );

    let elements = site_elements(&site.site.id, api).await?;

    let inputs = input::collect_route_inputs(&config.route, prompter)?;
    let route = inputs.to_request();
    tracing::info!(
        "Prepared route {} via {} (distance {})",
        route.destination_prefix,
        inputs.next_hop,
        inputs.admin_distance
    );

    let summary = apply::apply_route(api, &site.site.id, &elements, &route, prompter).await?;
    println!(
        "Static route added to {} of {} element(s)",
        summary.added,
        summary.total()
    );
    Ok(summary)
}

async fn match_site<C>(name: &str, api: &C) -> AppResult<SiteMatch>
where
    C: ControllerApi + ?Sized,
{
    let sites = api.list_sites().await?;
    let found = inventory::resolve_site(name, &sites.items)?;
    tracing::info!("Matched site {:?} with score {}", found.site.name, found.score);

    println!("Found SITE ");
    println!("     Site Name:  {}", found.site.name);
    println!("       Site ID:  {}", found.site.id);
    println!(
        "   Description:  {}",
        found.site.description.as_deref().unwrap_or("None")
    );
    Ok(found)
}

async fn site_elements<C>(site_id: &str, api: &C) -> AppResult<Vec<Element>>
where
    C: ControllerApi + ?Sized,
{
    let listing = api.list_elements().await?;
    let elements = inventory::filter_elements(site_id, &listing.items);
    for element in &elements {
        println!("Found ION to add static route to:  {}", element.display_name());
    }
    Ok(elements)
}

/// Print a fatal error the way the operator expects to see it
pub fn report_fatal(error: &AppError) {
    tracing::error!("{}", error);
    println!("{}", error.user_message());
    if let Some(raw) = error.raw_payload() {
        println!("{}", raw);
    }
}
