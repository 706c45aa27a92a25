//! Process state: per-family remote model priority lists read from config.

use std::collections::HashMap;
use std::sync::Arc;

use gateway_config::Settings;

pub struct AppState {
    pub model_priority_by_family: HashMap<String, Vec<String>>,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self { model_priority_by_family: settings.provider.model_priority_by_family.clone() }
    }

    pub fn model_priority_for(&self, family: &str) -> Vec<String> {
        self.model_priority_by_family.get(family).cloned().unwrap_or_default()
    }
}

pub type SharedState = Arc<AppState>;
