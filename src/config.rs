// SPDX-License-Identifier: GPL-3.0-or-later
// src/config.rs
//
// Global configuration for the application with cosmic-config support.

use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};

use crate::domain::record::Subject;

/// Global configuration for the application.
#[derive(Debug, Clone, CosmicConfigEntry, PartialEq)]
#[version = 1]
pub struct AppConfig {
    /// Base URL of the AI vision service.
    pub vision_endpoint: String,
    /// Model identifier passed to the vision service.
    pub vision_model: String,
    /// Subject preselected on the capture screen.
    pub default_subject: Subject,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            vision_endpoint: String::new(),
            vision_model: "flash-vision-1".to_string(),
            default_subject: Subject::Math,
        }
    }
}
