// Push the static route to each element after operator confirmation

use super::StaticRouteRequest;
use crate::controller::{ControllerApi, Element};
use crate::error::{AppError, AppResult};
use crate::prompt::Prompter;

/// Outcome counts for one rollout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub added: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl ApplySummary {
    pub fn total(&self) -> usize {
        self.added + self.skipped + self.failed
    }
}

/// Ask "y"/"n" until one of exactly those is typed
fn confirm<P>(element: &Element, prompter: &mut P) -> AppResult<bool>
where
    P: Prompter + ?Sized,
{
    let question = format!(
        "Would you like to add the static route to {} ?(y/n) ",
        element.display_name()
    );
    loop {
        match prompter.ask(&question)?.as_str() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => {}
        }
    }
}

/// Offer `route` to every element in turn.
///
/// A failed creation is reported and the rollout moves on; only a closed
/// operator input stops it early.
pub async fn apply_route<C, P>(
    api: &C,
    site_id: &str,
    elements: &[Element],
    route: &StaticRouteRequest,
    prompter: &mut P,
) -> AppResult<ApplySummary>
where
    C: ControllerApi + ?Sized,
    P: Prompter + ?Sized,
{
    let mut summary = ApplySummary::default();

    for element in elements {
        if !confirm(element, prompter)? {
            summary.skipped += 1;
            continue;
        }

        match api.create_static_route(site_id, &element.id, route).await {
            Ok(_) => {
                summary.added += 1;
                println!("Route added Successfully");
            }
            Err(e) => {
                summary.failed += 1;
                tracing::warn!("static route creation failed on {}: {}", element.id, e);
                println!(
                    "ERROR: API Call failure when adding static route to {}!",
                    element.display_name()
                );
                match &e {
                    AppError::Api { status, body, .. } => println!("{} {}", status, body),
                    other => println!("{}", other),
                }
            }
        }
    }

    Ok(summary)
}
