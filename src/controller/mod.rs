// Controller module - the SD-WAN controller's REST API as seen by this tool

pub mod auth;
pub mod client;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::AppResult;
use crate::routes::StaticRouteRequest;

/// An authenticated controller session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub tenant_id: String,
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tenant {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Site {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A managed device ("ION")
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Element {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub site_id: Option<String>,
}

impl Element {
    /// Name to show the operator; unnamed devices fall back to their id
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// List envelope returned by collection endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct Listing<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Operations the route workflow needs from the controller.
///
/// `use_token` and `login` report rejected credentials as `Ok(None)`; an
/// `Err` means the controller could not be asked at all.
#[async_trait(?Send)]
pub trait ControllerApi {
    async fn use_token(&mut self, token: &str) -> AppResult<Option<Session>>;

    async fn login(&mut self, email: &str, password: &str) -> AppResult<Option<Session>>;

    async fn logout(&mut self) -> AppResult<()>;

    async fn list_tenant(&self) -> AppResult<Tenant>;

    async fn list_sites(&self) -> AppResult<Listing<Site>>;

    async fn list_elements(&self) -> AppResult<Listing<Element>>;

    async fn create_static_route(
        &self,
        site_id: &str,
        element_id: &str,
        route: &StaticRouteRequest,
    ) -> AppResult<serde_json::Value>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_parses_items() {
        let listing: Listing<Element> = serde_json::from_str(
            r#"{"count":2,"items":[
                {"id":"e1","name":"ION-1","site_id":"s1","model_name":"ion 2000"},
                {"id":"e2","name":null,"site_id":null}
            ]}"#,
        )
        .unwrap();
        assert_eq!(listing.items.len(), 2);
        assert_eq!(listing.items[0].display_name(), "ION-1");
        assert_eq!(listing.items[1].display_name(), "e2");
        assert_eq!(listing.items[1].site_id, None);
    }

    #[test]
    fn test_listing_without_items_is_empty() {
        let listing: Listing<Site> = serde_json::from_str(r#"{"count":0}"#).unwrap();
        assert!(listing.items.is_empty());
    }
}
