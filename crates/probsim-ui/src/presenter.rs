use probsim_core::model::experiment::Experiment;

use crate::asset::ImageAsset;

/// Text widgets of an experiment panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Result,
    EventSpace,
}

/// Rendering surface driven by the controller.
pub trait Presenter {
    fn show_text(&mut self, experiment: Experiment, slot: Slot, value: &str);

    fn show_image(&mut self, experiment: Experiment, image: &ImageAsset);

    fn clear_image(&mut self, experiment: Experiment);

    /// Modal notice; the front end keeps running after it is dismissed.
    fn show_error(&mut self, title: &str, message: &str);

    /// Empties every result, event annotation and image.
    fn clear_all(&mut self);
}
