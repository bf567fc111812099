// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::read_to_string;
use std::path::PathBuf;

use decouvertes_core::BoxSchedule;
use decouvertes_core::Catalog;
use decouvertes_core::ErrorKind;
use decouvertes_core::ErrorReport;
use decouvertes_core::Fallible;
use decouvertes_core::fail;

pub const CARDS_FILE: &str = "cards.json";
pub const PROGRESS_FILE: &str = "progress.json";
pub const CONFIG_FILE: &str = "config.toml";

/// The data directory: the card catalog, the progress file, and optional
/// engine configuration.
pub struct Collection {
    pub directory: PathBuf,
}

impl Collection {
    /// Open the data directory. By default this is `~/.config/decouvertes`.
    pub fn open(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(directory) => PathBuf::from(directory),
            None => default_directory()?,
        };
        if !directory.is_dir() {
            return fail(
                ErrorKind::Configuration,
                format!(
                    "Config directory not found at {}. Please create it and place your '{CARDS_FILE}' file inside.",
                    directory.display()
                ),
            );
        }
        log::debug!("Using data directory {}", directory.display());
        Ok(Self { directory })
    }

    pub fn progress_path(&self) -> PathBuf {
        self.directory.join(PROGRESS_FILE)
    }

    /// Load the card catalog. It must exist and be non-empty.
    pub fn catalog(&self) -> Fallible<Catalog> {
        let path = self.directory.join(CARDS_FILE);
        if !path.is_file() {
            return fail(
                ErrorKind::Configuration,
                format!(
                    "Card catalog not found at {}. Please create it.",
                    path.display()
                ),
            );
        }
        let content = read_to_string(&path)?;
        if content.trim().is_empty() {
            return fail(ErrorKind::Configuration, format!("{CARDS_FILE} is empty."));
        }
        let catalog = Catalog::from_json(&content).map_err(|e| {
            ErrorReport::new(
                e.kind(),
                format!("Failed to load {}: {}", path.display(), e.message()),
            )
        })?;
        log::debug!("Loaded {} cards from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Load the box schedule from `config.toml`, or the default schedule if
    /// there is no such file.
    pub fn schedule(&self) -> Fallible<BoxSchedule> {
        let path = self.directory.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(BoxSchedule::default());
        }
        let content = read_to_string(&path)?;
        BoxSchedule::from_toml(&content).map_err(|e| {
            ErrorReport::new(
                e.kind(),
                format!("Failed to load {}: {}", path.display(), e.message()),
            )
        })
    }
}

fn default_directory() -> Fallible<PathBuf> {
    match dirs::home_dir() {
        Some(home) => Ok(home.join(".config").join("decouvertes")),
        None => fail(
            ErrorKind::Configuration,
            "Could not find user home directory.",
        ),
    }
}
