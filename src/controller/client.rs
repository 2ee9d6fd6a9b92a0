// HTTP client for the controller's REST API

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{ControllerApi, Element, Listing, Session, Site, Tenant};
use crate::config::ControllerSettings;
use crate::error::{AppError, AppResult};
use crate::routes::StaticRouteRequest;

const AUTH_HEADER: &str = "X-Auth-Token";

const LOGIN_API: &str = "v2.0";
const LOGOUT_API: &str = "v2.0";
const PROFILE_API: &str = "v2.1";
const TENANT_API: &str = "v2.4";
const SITES_API: &str = "v4.7";
const ELEMENTS_API: &str = "v3.0";
const STATICROUTES_API: &str = "v2.3";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    x_auth_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    #[serde(default)]
    tenant_id: Option<String>,
}

/// reqwest-backed controller client
pub struct HttpController {
    client: Client,
    base_url: String,
    session: Option<Session>,
}

impl HttpController {
    pub fn new(settings: &ControllerSettings) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .danger_accept_invalid_certs(!settings.verify_tls)
            .user_agent(concat!("cg-add-route/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(HttpController {
            client,
            base_url: settings.url.clone(),
            session: None,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn tenant_path(&self, version: &str, rest: &str) -> AppResult<String> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| AppError::Auth("no active session".to_string()))?;
        Ok(tenant_scoped_path(version, &session.tenant_id, rest))
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        tracing::debug!("{} {}", method, path);
        let builder = self.client.request(method, self.url(path));
        match token.or_else(|| self.session.as_ref().map(|s| s.token.as_str())) {
            Some(token) => builder.header(AUTH_HEADER, token),
            None => builder,
        }
    }

    /// Resolve the tenant behind `token`; `None` if the controller rejects it
    async fn profile(&self, token: &str) -> AppResult<Option<String>> {
        let path = format!("/{}/api/profile", PROFILE_API);
        let response = self.request(Method::GET, &path, Some(token)).send().await?;
        if !response.status().is_success() {
            tracing::debug!("profile lookup rejected with {}", response.status());
            return Ok(None);
        }
        let profile: ProfileResponse = response.json().await?;
        Ok(profile.tenant_id.filter(|id| !id.is_empty()))
    }

    async fn establish(&mut self, token: &str) -> AppResult<Option<Session>> {
        let session = self.profile(token).await?.map(|tenant_id| Session {
            tenant_id,
            token: token.to_string(),
        });
        self.session = session.clone();
        Ok(session)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        operation: &'static str,
    ) -> AppResult<T> {
        let response = self.request(Method::GET, path, None).send().await?;
        let response = check_status(response, operation).await?;
        Ok(response.json().await?)
    }
}

fn tenant_scoped_path(version: &str, tenant_id: &str, rest: &str) -> String {
    format!("/{}/api/tenants/{}{}", version, tenant_id, rest)
}

/// Turn a failure envelope into `AppError::Api`, keeping the raw body
async fn check_status(response: Response, operation: &'static str) -> AppResult<Response> {
    let status = response.status();
    tracing::debug!("{} -> {}", operation, status);
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AppError::Api {
        operation,
        status: status.as_u16(),
        body,
    })
}

#[async_trait(?Send)]
impl ControllerApi for HttpController {
    async fn use_token(&mut self, token: &str) -> AppResult<Option<Session>> {
        self.establish(token).await
    }

    async fn login(&mut self, email: &str, password: &str) -> AppResult<Option<Session>> {
        let path = format!("/{}/api/login", LOGIN_API);
        let response = self
            .client
            .post(self.url(&path))
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::BAD_REQUEST => {
                return Ok(None);
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                tracing::warn!("login failed with status {}: {}", status, body);
                return Ok(None);
            }
        }

        let login: LoginResponse = response.json().await?;
        match login.x_auth_token {
            Some(token) if !token.is_empty() => self.establish(&token).await,
            _ => Ok(None),
        }
    }

    async fn logout(&mut self) -> AppResult<()> {
        let path = format!("/{}/api/logout", LOGOUT_API);
        let response = self.request(Method::GET, &path, None).send().await?;
        self.session = None;
        check_status(response, "logging out").await?;
        Ok(())
    }

    async fn list_tenant(&self) -> AppResult<Tenant> {
        let path = self.tenant_path(TENANT_API, "")?;
        self.get_json(&path, "enumerating TENANT Name").await
    }

    async fn list_sites(&self) -> AppResult<Listing<Site>> {
        let path = self.tenant_path(SITES_API, "/sites")?;
        self.get_json(&path, "enumerating SITES in tenant").await
    }

    async fn list_elements(&self) -> AppResult<Listing<Element>> {
        let path = self.tenant_path(ELEMENTS_API, "/elements")?;
        self.get_json(&path, "enumerating ELEMENTS in tenant").await
    }

    async fn create_static_route(
        &self,
        site_id: &str,
        element_id: &str,
        route: &StaticRouteRequest,
    ) -> AppResult<serde_json::Value> {
        let path = self.tenant_path(
            STATICROUTES_API,
            &format!("/sites/{}/elements/{}/staticroutes", site_id, element_id),
        )?;
        let response = self
            .request(Method::POST, &path, None)
            .json(route)
            .send()
            .await?;
        let response = check_status(response, "adding static route").await?;
        Ok(response.json().await?)
    }
}
