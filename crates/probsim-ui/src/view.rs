use probsim_core::model::experiment::Experiment;

use crate::asset::ImageAsset;
use crate::presenter::{Presenter, Slot};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelView {
    pub result: String,
    pub event_space: String,
    pub image: Option<ImageAsset>,
}

impl PanelView {
    pub fn is_empty(&self) -> bool {
        self.result.is_empty() && self.event_space.is_empty() && self.image.is_none()
    }

    /// Event annotation as rendered, or empty when unset.
    pub fn event_space_line(&self) -> String {
        if self.event_space.is_empty() {
            String::new()
        } else {
            format!("Event Space: {}", self.event_space)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

/// Everything the front end draws, updated only through [`Presenter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardView {
    panels: [PanelView; 3],
    notice: Option<Notice>,
}

impl BoardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&self, experiment: Experiment) -> &PanelView {
        &self.panels[experiment.index()]
    }

    pub fn panels(&self) -> &[PanelView; 3] {
        &self.panels
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn is_blank(&self) -> bool {
        self.panels.iter().all(PanelView::is_empty)
    }

    fn panel_mut(&mut self, experiment: Experiment) -> &mut PanelView {
        &mut self.panels[experiment.index()]
    }
}

impl Presenter for BoardView {
    fn show_text(&mut self, experiment: Experiment, slot: Slot, value: &str) {
        let panel = self.panel_mut(experiment);
        let target = match slot {
            Slot::Result => &mut panel.result,
            Slot::EventSpace => &mut panel.event_space,
        };
        target.clear();
        target.push_str(value);
    }

    fn show_image(&mut self, experiment: Experiment, image: &ImageAsset) {
        self.panel_mut(experiment).image = Some(image.clone());
    }

    fn clear_image(&mut self, experiment: Experiment) {
        self.panel_mut(experiment).image = None;
    }

    fn show_error(&mut self, title: &str, message: &str) {
        self.notice = Some(Notice {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn clear_all(&mut self) {
        for panel in &mut self.panels {
            *panel = PanelView::default();
        }
        self.notice = None;
    }
}
