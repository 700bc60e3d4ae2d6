//! Outcome → image file lookup.
//!
//! Files follow a fixed naming convention under the manifest root:
//! `coin_heads.png`, `die_4.png`, `cards/queen_of_spades.png`. Loading only
//! checks that the file is present and carries a PNG signature; decoding is
//! left to whatever front end displays it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use probsim_core::model::experiment::Experiment;
use probsim_core::model::outcome::Outcome;
use thiserror::Error;

use crate::resource::{AssetManifest, ImageSize};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

#[derive(Debug, Error)]
pub enum AssetLoadFailure {
    #[error("{} not found", .path.display())]
    Missing { path: PathBuf },
    #[error("failed to read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not a PNG image", .path.display())]
    NotAnImage { path: PathBuf },
}

impl AssetLoadFailure {
    pub fn path(&self) -> &Path {
        match self {
            AssetLoadFailure::Missing { path }
            | AssetLoadFailure::Unreadable { path, .. }
            | AssetLoadFailure::NotAnImage { path } => path,
        }
    }
}

/// A verified image ready to be handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub outcome: Outcome,
    pub path: PathBuf,
    pub size: ImageSize,
    pub byte_len: usize,
}

impl ImageAsset {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
    manifest: AssetManifest,
}

impl AssetStore {
    pub fn new(manifest: AssetManifest) -> Self {
        Self {
            root: PathBuf::from(&manifest.root),
            manifest,
        }
    }

    pub fn from_current_manifest() -> Self {
        Self::new(AssetManifest::current().clone())
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path relative to the asset root, by naming convention.
    pub fn relative_path(&self, outcome: Outcome) -> PathBuf {
        let file = match outcome {
            Outcome::Coin(face) => format!("coin_{}.png", face.asset_key()),
            Outcome::Die(face) => format!("die_{}.png", face.value()),
            Outcome::Card(card) => format!("{}.png", card.asset_stem()),
        };
        let dir = &self.manifest.images_for(outcome.experiment()).dir;
        if dir.is_empty() {
            PathBuf::from(file)
        } else {
            Path::new(dir).join(file)
        }
    }

    pub fn resolve(&self, outcome: Outcome) -> PathBuf {
        self.root.join(self.relative_path(outcome))
    }

    pub fn display_size(&self, experiment: Experiment) -> ImageSize {
        self.manifest.images_for(experiment).size
    }

    pub fn load(&self, outcome: Outcome) -> Result<ImageAsset, AssetLoadFailure> {
        let path = self.resolve(outcome);
        let bytes = fs::read(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                AssetLoadFailure::Missing { path: path.clone() }
            } else {
                AssetLoadFailure::Unreadable {
                    path: path.clone(),
                    source,
                }
            }
        })?;
        if !bytes.starts_with(&PNG_SIGNATURE) {
            return Err(AssetLoadFailure::NotAnImage { path });
        }
        Ok(ImageAsset {
            outcome,
            size: self.display_size(outcome.experiment()),
            byte_len: bytes.len(),
            path,
        })
    }

    /// Every outcome whose image is absent or invalid.
    pub fn missing(&self) -> Vec<AssetLoadFailure> {
        all_outcomes()
            .filter_map(|outcome| self.load(outcome).err())
            .collect()
    }
}

fn all_outcomes() -> impl Iterator<Item = Outcome> {
    use probsim_core::model::card::Card;
    use probsim_core::model::coin::Coin;
    use probsim_core::model::die::DieFace;

    Coin::ALL
        .into_iter()
        .map(Outcome::Coin)
        .chain(DieFace::ALL.into_iter().map(Outcome::Die))
        .chain(Card::all().map(Outcome::Card))
}
