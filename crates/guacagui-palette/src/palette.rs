//! Macro Palette
//!
//! One entry per configured macro, in document order. Users may type over an
//! entry's displayed text; that draft is never written back and disappears on
//! the next render.

use serde::Serialize;

use guacagui_config::Configuration;
use guacagui_tabs::TabManager;

use crate::error::PaletteError;
use crate::injector::{InjectionReport, InputInjector};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    /// Label from the configuration
    pub name: String,
    /// Configured payload
    pub text: String,
    /// Visual-only edit of the displayed text
    draft: Option<String>,
}

impl PaletteEntry {
    /// What the control currently shows
    pub fn display_text(&self) -> &str {
        self.draft.as_deref().unwrap_or(&self.text)
    }

    pub fn is_edited(&self) -> bool {
        self.draft.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MacroPalette {
    entries: Vec<PaletteEntry>,
    /// Configuration generation last rendered
    generation: u64,
}

impl MacroPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Configuration) -> Self {
        let mut palette = Self::new();
        palette.render(config);
        palette
    }

    /// Replace every entry with the snapshot's macros
    pub fn render(&mut self, config: &Configuration) {
        self.entries = config
            .macros
            .iter()
            .map(|def| PaletteEntry {
                name: def.name.clone(),
                text: def.text.clone(),
                draft: None,
            })
            .collect();
        self.generation = config.generation;

        tracing::debug!(
            generation = self.generation,
            entries = self.entries.len(),
            "Rendered macro palette"
        );
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PaletteEntry> {
        self.entries.get(index)
    }

    /// First entry with this label
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    /// Change what an entry displays; discarded on the next render
    pub fn edit(&mut self, index: usize, text: String) -> Result<()> {
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(PaletteError::UnknownIndex(index))?;
        entry.draft = Some(text);
        Ok(())
    }

    /// Inject the configured text of entry `index` into the active session
    pub fn activate(
        &self,
        index: usize,
        injector: &mut InputInjector,
        tabs: &mut TabManager,
    ) -> Result<InjectionReport> {
        let entry = self
            .entries
            .get(index)
            .ok_or(PaletteError::UnknownIndex(index))?;

        tracing::debug!(name = %entry.name, "Macro activated");

        Ok(injector.inject(tabs, &entry.text)?)
    }

    pub fn activate_named(
        &self,
        name: &str,
        injector: &mut InputInjector,
        tabs: &mut TabManager,
    ) -> Result<InjectionReport> {
        let index = self
            .position(name)
            .ok_or_else(|| PaletteError::UnknownName(name.to_string()))?;
        self.activate(index, injector, tabs)
    }
}
