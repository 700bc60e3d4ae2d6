use probsim_core::model::experiment::Experiment;

pub const WINDOW_TITLE: &str = "Probability Simulator";
pub const INSTRUCTIONS: &str = "Welcome to the Probability Simulator!\n\
Click the buttons below to flip a coin, roll a die, or draw a card.\n\
Results and probabilities will be displayed below.";
pub const RESET_LABEL: &str = "Reset";
pub const RESET_HOTKEY: char = 'r';
pub const IMAGE_ERROR_TITLE: &str = "Image Error";

/// Static content of one experiment panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelDescriptor {
    pub experiment: Experiment,
    pub title: &'static str,
    pub probability: &'static str,
    pub sample_space: &'static str,
    pub button: &'static str,
    pub hotkey: char,
    /// Status text while intermediate frames are shown.
    pub in_progress: Option<&'static str>,
    pub accent: Accent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    LightBlue,
    LightGreen,
    LightYellow,
}

impl PanelDescriptor {
    pub fn for_experiment(experiment: Experiment) -> Self {
        match experiment {
            Experiment::Coin => Self {
                experiment,
                title: "Coin Flip",
                probability: "Probability: 50% for Heads or Tails",
                sample_space: "Sample Space: {Heads, Tails}",
                button: "Flip Coin",
                hotkey: '1',
                in_progress: Some("Flipping..."),
                accent: Accent::LightBlue,
            },
            Experiment::Die => Self {
                experiment,
                title: "Die Roll",
                probability: "Probability: 1/6 for each face",
                sample_space: "Sample Space: {1, 2, 3, 4, 5, 6}",
                button: "Roll Die",
                hotkey: '2',
                in_progress: Some("Rolling..."),
                accent: Accent::LightGreen,
            },
            Experiment::Card => Self {
                experiment,
                title: "Card Draw",
                probability: "Probability: 1/52 for each card",
                sample_space: "Sample Space: 52 Cards",
                button: "Draw Card",
                hotkey: '3',
                in_progress: None,
                accent: Accent::LightYellow,
            },
        }
    }

    pub fn in_progress_text(&self) -> &'static str {
        self.in_progress.unwrap_or("")
    }
}

pub fn built_in_panels() -> [PanelDescriptor; 3] {
    Experiment::ALL.map(PanelDescriptor::for_experiment)
}

/// Modal message shown when an outcome's image cannot be loaded.
pub fn image_error_message(experiment: Experiment, cause: &dyn std::fmt::Display) -> String {
    format!("Could not load {} image: {cause}", experiment.key())
}
