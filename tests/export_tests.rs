// End-to-end export checks: file layout, dimensions, determinism and the
// font fallback, all against a throwaway output root.

use std::fs;
use std::path::Path;

use phaselimiter_icon::export::{export_icon_set, icon_file_name, retina_file_name};
use phaselimiter_icon::IconConfig;

const SIZES: [u32; 6] = [16, 32, 64, 128, 256, 512];

fn offline_config() -> IconConfig {
    // Unreachable font path so every run uses the same built-in glyphs
    let mut config = IconConfig::default();
    config.render.font_path = "/nonexistent/fonts/Arial.ttf".into();
    config
}

fn export_into(root: &Path) -> phaselimiter_icon::ExportReport {
    export_icon_set(&offline_config(), root).expect("export should succeed")
}

#[test]
fn test_icons_dir_has_every_size() {
    let root = tempfile::tempdir().unwrap();
    export_into(root.path());

    for size in SIZES {
        let path = root.path().join("icons").join(icon_file_name(size));
        assert_eq!(
            image::image_dimensions(&path).unwrap(),
            (size, size),
            "{}",
            path.display()
        );
    }
}

#[test]
fn test_iconset_layout() {
    let root = tempfile::tempdir().unwrap();
    let report = export_into(root.path());
    let iconset = root.path().join("PhaseLimiter.iconset");

    for size in SIZES {
        let path = iconset.join(icon_file_name(size));
        assert_eq!(image::image_dimensions(&path).unwrap(), (size, size));

        let retina = iconset.join(retina_file_name(size));
        if size <= 256 {
            assert_eq!(image::image_dimensions(&retina).unwrap(), (size * 2, size * 2));
        } else {
            assert!(!retina.exists(), "{} should not exist", retina.display());
        }
    }

    // 6 flat icons + 6 iconset icons + 5 retina variants
    assert_eq!(report.written.len(), 17);
    assert_eq!(fs::read_dir(&iconset).unwrap().count(), 11);
}

#[test]
fn test_export_is_idempotent() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let a = export_into(first.path());
    let b = export_into(second.path());

    for (left, right) in a.written.iter().zip(&b.written) {
        assert_eq!(
            left.strip_prefix(first.path()).unwrap(),
            right.strip_prefix(second.path()).unwrap()
        );
        assert!(
            fs::read(left).unwrap() == fs::read(right).unwrap(),
            "{} differs between runs",
            left.display()
        );
    }
}

#[test]
fn test_rerun_into_existing_dirs() {
    let root = tempfile::tempdir().unwrap();
    let first = export_into(root.path());
    let before = fs::read(&first.written[0]).unwrap();

    let second = export_into(root.path());
    assert_eq!(first.written, second.written);
    assert_eq!(fs::read(&second.written[0]).unwrap(), before);
}

#[test]
fn test_missing_font_still_draws_label() {
    let root = tempfile::tempdir().unwrap();
    export_into(root.path());

    let icon = image::open(root.path().join("icons").join(icon_file_name(512)))
        .unwrap()
        .to_rgba8();

    // The drop shadow darkens the disc around the label; nothing else does
    let mut shadowed = 0;
    for y in 200..352 {
        for x in 150..362 {
            let [_, _, b, a] = icon.get_pixel(x, y).0;
            if a == 255 && b > 100 && b < 200 {
                shadowed += 1;
            }
        }
    }
    assert!(shadowed > 100, "only {} shadow pixels near the center", shadowed);
}

#[test]
fn test_full_size_disc_and_corners() {
    let root = tempfile::tempdir().unwrap();
    export_into(root.path());

    let icon = image::open(root.path().join("icons").join(icon_file_name(512)))
        .unwrap()
        .to_rgba8();

    for (x, y) in [(0, 0), (511, 0), (0, 511), (511, 511)] {
        assert_eq!(icon.get_pixel(x, y).0[3], 0, "corner ({}, {})", x, y);
    }

    // Sample the disc interior along a ring well inside radius 512/3
    let (center, radius) = (256.0_f32, 150.0_f32);
    for step in 0..36 {
        let angle = (step as f32 * 10.0).to_radians();
        let x = (center + radius * angle.cos()) as u32;
        let y = (center + radius * angle.sin()) as u32;
        assert_eq!(icon.get_pixel(x, y).0[3], 255, "({}, {}) not opaque", x, y);
    }
    assert_eq!(icon.get_pixel(256, 256).0[3], 255);
}

#[test]
fn test_custom_sizes_and_dirs() {
    let root = tempfile::tempdir().unwrap();
    let mut config = offline_config();
    config.export.sizes = vec![48];
    config.export.retina_max_size = 0;
    config.export.icons_dir = "png".into();
    config.export.iconset_dir = "App.iconset".into();

    let report = export_icon_set(&config, root.path()).unwrap();

    assert_eq!(report.written.len(), 2);
    assert!(root.path().join("png/icon_48x48.png").exists());
    assert!(root.path().join("App.iconset/icon_48x48.png").exists());
    assert!(!root.path().join("App.iconset/icon_48x48@2x.png").exists());
}
