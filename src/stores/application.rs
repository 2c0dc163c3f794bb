use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::{self, Storage};

const STORAGE_KEY: &str = "application";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Light,
    Dark,
}

/// Static application metadata shown by the layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationState {
    pub app_name: Option<String>,
    pub company_name: Option<String>,
    pub theme: Theme,
    pub language: String,
}

impl Default for ApplicationState {
    fn default() -> Self {
        Self {
            app_name: None,
            company_name: None,
            theme: Theme::Default,
            language: "default".to_string(),
        }
    }
}

pub struct ApplicationStore {
    state: ApplicationState,
    storage: Box<dyn Storage>,
}

impl ApplicationStore {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        let state = storage::load_or_default(storage.as_ref(), STORAGE_KEY);
        Self { state, storage }
    }

    pub fn state(&self) -> &ApplicationState {
        &self.state
    }

    pub fn app_name(&self) -> Option<&str> {
        self.state.app_name.as_deref()
    }

    pub fn company_name(&self) -> Option<&str> {
        self.state.company_name.as_deref()
    }

    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    pub fn language(&self) -> &str {
        &self.state.language
    }

    /// Name the application and the company running it
    pub fn define_platform(
        &mut self,
        app_name: impl Into<String>,
        company_name: impl Into<String>,
    ) -> Result<()> {
        self.state.app_name = Some(app_name.into());
        self.state.company_name = Some(company_name.into());
        self.persist()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.state.theme = theme;
        self.persist()
    }

    pub fn set_language(&mut self, language: impl Into<String>) -> Result<()> {
        self.state.language = language.into();
        self.persist()
    }

    fn persist(&mut self) -> Result<()> {
        storage::save(self.storage.as_mut(), STORAGE_KEY, &self.state)
    }
}
