// Inventory module - picks the target site and the elements bound to it

pub mod fuzzy;

use crate::controller::{Element, Site};
use crate::error::{AppError, AppResult};

/// A site picked by name, with the score it won by
#[derive(Debug, Clone, PartialEq)]
pub struct SiteMatch {
    pub site: Site,
    pub score: u8,
}

/// Find the site whose name best matches `name`, case-insensitively.
///
/// A later candidate only wins on a strictly higher score, so ties keep the
/// first one listed. There is no minimum score.
pub fn resolve_site(name: &str, sites: &[Site]) -> AppResult<SiteMatch> {
    let search = name.to_lowercase();
    let mut best_match: Option<(&Site, u8)> = None;

    for site in sites {
        let score = fuzzy::ratio(&search, &site.name.to_lowercase());
        tracing::trace!("site {:?} scored {}", site.name, score);
        match best_match {
            None => best_match = Some((site, score)),
            Some((_, best)) if score > best => best_match = Some((site, score)),
            _ => {}
        }
    }

    best_match
        .map(|(site, score)| SiteMatch {
            site: site.clone(),
            score,
        })
        .ok_or(AppError::NoSites)
}

/// Elements whose site foreign key is `site_id`, in listing order
pub fn filter_elements(site_id: &str, elements: &[Element]) -> Vec<Element> {
    elements
        .iter()
        .filter(|element| element.site_id.as_deref() == Some(site_id))
        .cloned()
        .collect()
}
