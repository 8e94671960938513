//! Headless UI state: step panels, part buttons and the free-build card.

use rigcoach_logic::cables::CableChecklist;
use rigcoach_logic::cards::{Language, StepCard};
use rigcoach_logic::parts::PartType;

/// What the screen shows. One panel per step, at most one visible.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    panels: Vec<bool>,
    part_buttons: [bool; PartType::COUNT],
    desktop_button: bool,
    skip_visible: bool,
    finish_visible: bool,
    choose_build_menu: bool,
    language: Language,
    card: Option<StepCard>,
    button_text: &'static str,
    cables: CableChecklist,
}

impl UiState {
    pub fn new(panel_count: usize) -> Self {
        Self {
            panels: vec![false; panel_count],
            ..Self::default()
        }
    }

    /// Back to a blank screen with `panel_count` panels. Language survives.
    pub fn reset(&mut self, panel_count: usize) {
        let language = self.language;
        *self = Self::new(panel_count);
        self.language = language;
    }

    // ── Panels ──────────────────────────────────────────────────────────

    pub fn show_panel(&mut self, index: usize) {
        for (i, visible) in self.panels.iter_mut().enumerate() {
            *visible = i == index;
        }
    }

    pub fn hide_panels(&mut self) {
        self.panels.iter_mut().for_each(|p| *p = false);
    }

    pub fn visible_panel(&self) -> Option<usize> {
        self.panels.iter().position(|p| *p)
    }

    pub fn visible_panel_count(&self) -> usize {
        self.panels.iter().filter(|p| **p).count()
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    // ── Buttons ─────────────────────────────────────────────────────────

    pub fn part_button(&self, part: PartType) -> bool {
        self.part_buttons[part.index()]
    }

    pub fn set_part_button(&mut self, part: PartType, visible: bool) {
        self.part_buttons[part.index()] = visible;
    }

    pub fn desktop_button(&self) -> bool {
        self.desktop_button
    }

    pub fn reveal_desktop_button(&mut self) {
        self.desktop_button = true;
    }

    pub fn skip_visible(&self) -> bool {
        self.skip_visible
    }

    pub fn set_skip_visible(&mut self, visible: bool) {
        self.skip_visible = visible;
    }

    pub fn finish_visible(&self) -> bool {
        self.finish_visible
    }

    /// Swap the skip button for the finish button.
    pub fn show_finish(&mut self) {
        self.skip_visible = false;
        self.finish_visible = true;
    }

    pub fn choose_build_menu(&self) -> bool {
        self.choose_build_menu
    }

    pub fn set_choose_build_menu(&mut self, visible: bool) {
        self.choose_build_menu = visible;
    }

    pub fn button_text(&self) -> &'static str {
        self.button_text
    }

    pub fn set_button_text(&mut self, text: &'static str) {
        self.button_text = text;
    }

    // ── Card and language ───────────────────────────────────────────────

    pub fn set_card(&mut self, card: Option<StepCard>) {
        self.card = card;
    }

    /// Title and detail of the current card in the selected language.
    pub fn card_text(&self) -> Option<(&'static str, &'static str)> {
        self.card
            .map(|c| (c.title.get(self.language), c.detail.get(self.language)))
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn toggle_language(&mut self) -> Language {
        self.language = self.language.toggled();
        self.language
    }

    // ── Cables ──────────────────────────────────────────────────────────

    pub fn cables(&self) -> &CableChecklist {
        &self.cables
    }

    pub fn cables_mut(&mut self) -> &mut CableChecklist {
        &mut self.cables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigcoach_logic::cards::{CPU, TAP_TO_PLACE};

    #[test]
    fn test_single_visible_panel() {
        let mut ui = UiState::new(4);
        ui.show_panel(1);
        ui.show_panel(3);
        assert_eq!(ui.visible_panel(), Some(3));
        assert_eq!(ui.visible_panel_count(), 1);
        ui.hide_panels();
        assert_eq!(ui.visible_panel_count(), 0);
    }

    #[test]
    fn test_card_follows_language() {
        let mut ui = UiState::new(1);
        ui.set_card(Some(StepCard::new(CPU, TAP_TO_PLACE)));
        assert_eq!(ui.card_text(), Some(("CPU", "Tap to place")));
        assert_eq!(ui.toggle_language(), Language::Greek);
        assert_eq!(ui.card_text(), Some(("Επεξεργαστής", "Πάτα για τοποθέτηση")));

        ui.reset(2);
        assert_eq!(ui.language(), Language::Greek);
        assert_eq!(ui.card_text(), None);
    }
}
