// SPDX-License-Identifier: GPL-3.0-or-later
// src/constant.rs
//
// Application constants that should not be changed by the user.

/// Normalized region coordinate scale (region values run 0..=1000).
pub const REGION_SCALE: i32 = 1000;

/// Units per display percent (scale 0-1000 mapped onto 0-100%).
pub const UNITS_PER_PERCENT: f32 = 10.0;

/// Minimum region edge length in normalized units.
pub const MIN_REGION_SIZE: i32 = 50;

/// Maximum number of photos per capture session.
pub const MAX_CAPTURE_PHOTOS: usize = 5;

/// XP awarded per newly recorded mistake.
pub const XP_PER_MISTAKE: u32 = 10;

/// XP awarded the first time a mistake is marked reviewed.
pub const XP_FIRST_REVIEW: u32 = 20;

/// XP awarded for building a smart practice paper.
pub const XP_SMART_PAPER: u32 = 40;

/// XP awarded for a tag-targeted practice paper.
pub const XP_TAGGED_PAPER: u32 = 50;

/// XP required to finish a level is `level * XP_LEVEL_FACTOR`.
pub const XP_LEVEL_FACTOR: u32 = 200;

/// Default number of questions in a smart practice paper.
pub const SMART_PAPER_DEFAULT_COUNT: usize = 5;

/// Application data directory name.
pub const DATA_DIR: &str = "erratum";

/// Records file name inside the data directory.
pub const RECORDS_FILE: &str = "records.json";

/// Stats file name inside the data directory.
pub const STATS_FILE: &str = "stats.json";

/// Imported photo directory name inside the data directory.
pub const PHOTOS_DIR: &str = "images";
