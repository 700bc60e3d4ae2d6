use std::fs;
use std::path::Path;

use probsim_core::model::card::Card;
use probsim_core::model::outcome::Outcome;
use probsim_core::model::rank::Rank;
use probsim_core::model::suit::Suit;
use probsim_ui::AssetStore;
use probsim_ui::resource::{AssetManifest, MANIFEST_ENV};

// The manifest is loaded once per process, so this binary holds a single test.
#[test]
fn environment_manifest_replaces_bundled_one() {
    let dir = tempfile::tempdir().expect("temp dir");
    let manifest_path = dir.path().join("manifest.json");
    fs::write(
        &manifest_path,
        r#"{
            "root": "skins/classic",
            "coin": { "size": { "width": 64, "height": 64 } },
            "die": { "dir": "dice", "size": { "width": 72, "height": 72 } },
            "card": { "dir": "deck", "size": { "width": 90, "height": 130 } }
        }"#,
    )
    .expect("write manifest");

    unsafe {
        std::env::set_var(MANIFEST_ENV, &manifest_path);
    }

    let manifest = AssetManifest::current();
    assert_eq!(manifest.root, "skins/classic");
    assert_eq!(manifest.coin.dir, "");
    assert_eq!(manifest.card.size.height, 130);

    let store = AssetStore::from_current_manifest();
    assert_eq!(store.root(), Path::new("skins/classic"));
    let ace = Outcome::Card(Card::new(Rank::Ace, Suit::Clubs));
    assert_eq!(
        store.resolve(ace),
        Path::new("skins/classic").join("deck").join("ace_of_clubs.png")
    );
}
