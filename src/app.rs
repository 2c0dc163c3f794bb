use std::collections::BTreeMap;

use crate::api::{auth_headers, ApiClient};
use crate::config::AppConfig;
use crate::error::Result;
use crate::models::{Credentials, AuthResponse};
use crate::router::{Navigation, RouteId, Router};
use crate::session::Session;
use crate::storage::{MemoryStorage, Persistence};
use crate::stores::{ApplicationStore, UserStore};

/// Everything the shell knows at runtime.
///
/// Guards, the API client factory and the views receive what they need from
/// here explicitly; there is no global session.
pub struct App {
    config: AppConfig,
    user: UserStore,
    application: ApplicationStore,
    router: Router,
}

impl App {
    /// Session identity lives in memory for the life of the process;
    /// application metadata goes where the config says
    pub fn new(config: AppConfig) -> Self {
        let user = UserStore::new(Box::new(MemoryStorage::new()));
        let application = ApplicationStore::new(config.application_storage.open(&config.config_dir));
        Self::with_stores(config, user, application)
    }

    pub fn with_stores(config: AppConfig, user: UserStore, application: ApplicationStore) -> Self {
        Self {
            config,
            user,
            application,
            router: Router::new(),
        }
    }

    /// Shell with both stores in memory; nothing touches the filesystem
    pub fn ephemeral(config: AppConfig) -> Self {
        let user = UserStore::new(Persistence::Session.open(&config.config_dir));
        let application = ApplicationStore::new(Persistence::Session.open(&config.config_dir));
        Self::with_stores(config, user, application)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        self.user.session()
    }

    pub fn user(&self) -> &UserStore {
        &self.user
    }

    pub fn application(&self) -> &ApplicationStore {
        &self.application
    }

    pub fn application_mut(&mut self) -> &mut ApplicationStore {
        &mut self.application
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Fresh API client reflecting the session right now
    pub fn api(&self) -> Result<ApiClient> {
        ApiClient::for_session(&self.config.api_url, self.user.session())
    }

    /// Initial navigation when the shell opens
    pub fn start(&mut self) -> Result<Navigation> {
        self.navigate("/")
    }

    pub fn navigate(&mut self, path: &str) -> Result<Navigation> {
        self.router.navigate(path, self.user.session())
    }

    pub fn push(&mut self, route: RouteId, params: &BTreeMap<String, String>) -> Result<Navigation> {
        self.router.push(route, params, self.user.session())
    }

    /// Authenticate against `POST /auth`, store the identity and go to the dashboard.
    ///
    /// On any failure the error is returned and the session is left as it was.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Navigation> {
        let api = self.api()?;
        let response: AuthResponse = api.authenticate(&Credentials::new(email, password)).await?;

        // a token that cannot become a header would break every later request
        auth_headers(&Session::from_auth(response.clone()))?;

        tracing::info!("Logged in as {}", response.email);
        self.user.sign_in(response);

        self.push(RouteId::Dashboard, &BTreeMap::new())
    }

    /// Forget the identity and go back to the login view
    pub fn logout(&mut self) -> Navigation {
        if let Some(email) = self.user.session().email() {
            tracing::info!("Logging out {}", email);
        }
        self.user.sign_out();

        // the login view has no guard a logged-out session can fail
        self.push(RouteId::Login, &BTreeMap::new())
            .unwrap_or_else(|e| {
                tracing::warn!("Navigation after logout failed: {}", e);
                Navigation {
                    route: RouteId::Login,
                    path: "/".to_string(),
                    params: BTreeMap::new(),
                    redirected_from: None,
                }
            })
    }
}
