// Item catalog invariant tests.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use melon_drop::ITEM_SPECS;

#[test]
fn catalog_is_aligned_with_kind_order() {
    assert!(!ITEM_SPECS.is_empty());
    for (i, spec) in ITEM_SPECS.iter().enumerate() {
        assert_eq!(
            spec.kind as usize, i,
            "spec for '{}' is out of enum order",
            spec.name
        );
        assert!(
            std::ptr::eq(spec.kind.spec(), spec),
            "ItemKind::spec for '{}' resolves to the wrong entry",
            spec.name
        );
    }
}

#[test]
fn catalog_entries_are_unique_and_valid() {
    let mut names = HashSet::new();
    let mut sprites = HashSet::new();
    let mut glyphs = HashSet::new();
    for spec in ITEM_SPECS {
        assert!(names.insert(spec.name), "duplicate item name '{}'", spec.name);
        assert!(
            sprites.insert(spec.sprite),
            "duplicate sprite path '{}' for '{}'",
            spec.sprite,
            spec.name
        );
        assert!(
            glyphs.insert(spec.glyph),
            "duplicate HUD glyph '{}' for '{}'",
            spec.glyph,
            spec.name
        );
        assert!(spec.radius > 0.0, "non-positive radius for '{}'", spec.name);
        assert!(spec.points > 0, "non-positive points for '{}'", spec.name);
        assert!(
            spec.fill.starts_with('#'),
            "fill '{}' for '{}' is not a hex color",
            spec.fill,
            spec.name
        );
        assert!(
            spec.sprite.ends_with(".png"),
            "sprite path '{}' for '{}' is not a png",
            spec.sprite,
            spec.name
        );
    }
}
