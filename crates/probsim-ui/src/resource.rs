use once_cell::sync::Lazy;
use probsim_core::model::experiment::Experiment;
use serde::Deserialize;

/// Environment variable naming a manifest to load instead of the bundled one.
pub const MANIFEST_ENV: &str = "PROBSIM_ASSET_MANIFEST";

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ImageSet {
    /// Sub-directory under the asset root; empty for the root itself.
    #[serde(default)]
    pub dir: String,
    pub size: ImageSize,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AssetManifest {
    pub root: String,
    pub coin: ImageSet,
    pub die: ImageSet,
    pub card: ImageSet,
}

static MANIFEST: Lazy<AssetManifest> = Lazy::new(load_manifest);

fn load_manifest() -> AssetManifest {
    let path = std::env::var(MANIFEST_ENV)
        .ok()
        .or_else(|| option_env!("PROBSIM_BUNDLED_MANIFEST").map(str::to_string));
    if let Some(path) = path {
        if let Ok(content) = std::fs::read_to_string(&path) {
            if let Ok(manifest) = serde_json::from_str::<AssetManifest>(&content) {
                return manifest;
            } else {
                eprintln!("Failed to parse asset manifest {path}; falling back to placeholder");
            }
        } else {
            eprintln!("Failed to read asset manifest {path}; falling back to placeholder");
        }
    }

    AssetManifest::placeholder()
}

impl AssetManifest {
    pub fn placeholder() -> Self {
        Self {
            root: "images".into(),
            coin: ImageSet {
                dir: String::new(),
                size: ImageSize {
                    width: 100,
                    height: 100,
                },
            },
            die: ImageSet {
                dir: String::new(),
                size: ImageSize {
                    width: 100,
                    height: 100,
                },
            },
            card: ImageSet {
                dir: "cards".into(),
                size: ImageSize {
                    width: 100,
                    height: 150,
                },
            },
        }
    }

    pub fn current() -> &'static AssetManifest {
        &MANIFEST
    }

    pub fn images_for(&self, experiment: Experiment) -> &ImageSet {
        match experiment {
            Experiment::Coin => &self.coin,
            Experiment::Die => &self.die,
            Experiment::Card => &self.card,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AssetManifest, Experiment};

    #[test]
    fn placeholder_manifest_uses_images_dir() {
        let manifest = AssetManifest::placeholder();
        assert_eq!(manifest.root, "images");
        assert_eq!(manifest.images_for(Experiment::Card).dir, "cards");
        assert_eq!(manifest.images_for(Experiment::Card).size.height, 150);
        assert_eq!(manifest.images_for(Experiment::Coin).size.width, 100);
    }

    #[test]
    fn manifest_parses_with_default_dirs() {
        let json = r#"{
            "root": "assets/img",
            "coin": { "size": { "width": 64, "height": 64 } },
            "die": { "size": { "width": 64, "height": 64 } },
            "card": { "dir": "deck", "size": { "width": 64, "height": 96 } }
        }"#;
        let manifest: AssetManifest = serde_json::from_str(json).expect("manifest parses");
        assert_eq!(manifest.coin.dir, "");
        assert_eq!(manifest.card.dir, "deck");
    }
}
