// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/mod.rs
//
// COSMIC application wiring and main app struct.

pub mod editor;
pub mod message;
pub mod model;
pub mod update;

use std::time::Duration;

use cosmic::app::Core;
use cosmic::cosmic_config::{self, CosmicConfigEntry};
use cosmic::iced::keyboard::{self, Key, Modifiers, key::Named};
use cosmic::iced::time;
use cosmic::iced::window;
use cosmic::iced::Subscription;
use cosmic::{Action, Element, Task};

use crate::config::AppConfig;
use crate::domain::photo::Photo;
use crate::services::store::RecordStore;
use crate::ui::views;
use crate::{Args, fl};

use self::message::AppMessage;
use self::model::AppModel;

/// Flags passed from `main` into the application.
#[derive(Debug, Clone)]
pub enum Flags {
    Args(Args),
}

/// Main application type.
pub struct App {
    core: Core,
    pub model: AppModel,
    pub config: AppConfig,
    config_handler: Option<cosmic_config::Config>,
    pub store: RecordStore,
}

impl cosmic::Application for App {
    type Executor = cosmic::SingleThreadExecutor;
    type Flags = Flags;
    type Message = AppMessage;

    const APP_ID: &'static str = "io.github.dudu.Erratum";

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, flags: Self::Flags) -> (Self, Task<Action<Self::Message>>) {
        // Load persisted config.
        let (config, config_handler) =
            match cosmic_config::Config::new(Self::APP_ID, AppConfig::VERSION) {
                Ok(handler) => {
                    let config = AppConfig::get_entry(&handler).unwrap_or_default();
                    (config, Some(handler))
                }
                Err(_) => (AppConfig::default(), None),
            };

        let Flags::Args(args) = flags;

        let mut model = AppModel::new(config.clone());

        // Open the record store, falling back to a temporary directory
        // so the app still comes up when the data dir is unusable.
        let store = RecordStore::open(args.data_dir.clone()).unwrap_or_else(|e| {
            log::error!("Falling back to a temporary store: {e}");
            model.set_error(fl!("store-open-failed"));
            RecordStore::at(std::env::temp_dir().join("erratum"))
        });

        // Load records and stats.
        match store.load_records() {
            Ok(records) => model.records = records,
            Err(e) => {
                log::error!("Failed to load records: {e}");
                model.set_error(fl!("records-load-failed"));
            }
        }
        match store.load_stats() {
            Ok(stats) => model.stats = stats,
            Err(e) => {
                log::error!("Failed to load stats: {e}");
            }
        }

        // Opening the app counts as a study session for the streak.
        model.stats.touch_streak(chrono::Utc::now());
        if let Err(e) = store.save_stats(&model.stats) {
            log::warn!("Failed to persist stats: {e}");
        }

        (
            Self {
                core,
                model,
                config,
                config_handler,
                store,
            },
            Task::none(),
        )
    }

    fn on_close_requested(&self, _id: window::Id) -> Option<Self::Message> {
        None
    }

    fn update(&mut self, message: Self::Message) -> Task<Action<Self::Message>> {
        update::update(self, message)
    }

    fn header_start(&self) -> Vec<Element<'_, Self::Message>> {
        views::header::start(&self.model)
    }

    fn header_end(&self) -> Vec<Element<'_, Self::Message>> {
        views::header::end(&self.model)
    }

    fn view(&self) -> Element<'_, Self::Message> {
        views::view(&self.model)
    }

    fn dialog(&self) -> Option<Element<'_, Self::Message>> {
        views::dialogs::view(&self.model)
    }

    fn subscription(&self) -> Subscription<Self::Message> {
        let mut subscriptions = vec![keyboard::on_key_press(handle_key_press)];

        // The level-up banner dismisses itself after a moment.
        if self.model.level_up {
            subscriptions
                .push(time::every(Duration::from_secs(3)).map(|_| AppMessage::DismissLevelUp));
        }

        Subscription::batch(subscriptions)
    }
}

impl App {
    /// Save current config to disk.
    #[allow(dead_code)]
    pub fn save_config(&self) {
        if let Some(ref handler) = self.config_handler {
            let _ = self.config.write_entry(handler);
        }
    }

    /// Decode a record's photo into the display cache if not present.
    pub fn ensure_photo(&mut self, id: uuid::Uuid) {
        if self.model.photos.contains_key(&id) {
            return;
        }
        let Some(record) = self.model.record(id) else {
            return;
        };
        let path = self.store.photo_path(record);
        match Photo::open(&path) {
            Ok(photo) => {
                self.model.photos.insert(id, photo);
            }
            Err(e) => {
                log::error!("Failed to load photo for record {id}: {e}");
            }
        }
    }

    /// Award XP, raising the level-up banner and persisting stats.
    pub fn award_xp(&mut self, amount: u32) {
        if self.model.stats.add_xp(amount) {
            self.model.level_up = true;
        }
        if let Err(e) = self.store.save_stats(&self.model.stats) {
            log::warn!("Failed to persist stats: {e}");
        }
    }
}

/// Map raw key presses + modifiers into high-level application messages.
fn handle_key_press(key: Key, modifiers: Modifiers) -> Option<AppMessage> {
    // Ignore key presses when command-style modifiers are pressed.
    if modifiers.command() || modifiers.alt() || modifiers.logo() || modifiers.control() {
        return None;
    }

    match key.as_ref() {
        Key::Named(Named::Escape) => Some(AppMessage::EscapePressed),
        _ => None,
    }
}
