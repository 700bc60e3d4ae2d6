pub mod asset;
pub mod panel;
pub mod presenter;
pub mod resource;
pub mod view;

pub use asset::{AssetLoadFailure, AssetStore, ImageAsset};
pub use presenter::{Presenter, Slot};
pub use view::{BoardView, Notice, PanelView};
