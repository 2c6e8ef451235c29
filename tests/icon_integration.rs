#![cfg(feature = "icons")]

use legalkit::icons::layout::layout_icon;
use legalkit::icons::paint::{largest_filled, Primitive, BACKGROUND, GOLD, WHITE};
use legalkit::icons::{generate, render, Design};
use legalkit::{digest_hex, Error, IconConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// Decode a PNG file into (width, height, rgba bytes)
fn decode_rgba(path: &Path) -> (u32, u32, Vec<u8>) {
    let decoder = png::Decoder::new(fs::File::open(path).expect("open png"));
    let mut reader = decoder.read_info().expect("decode");
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).expect("frame");
    assert_eq!(info.color_type, png::ColorType::Rgba);
    buf.truncate(info.buffer_size());
    (info.width, info.height, buf)
}

#[test]
fn writes_both_pwa_sizes_for_each_design() {
    for design in [Design::Pyramid, Design::Scale] {
        let dir = tempfile::tempdir().unwrap();
        let cfg = IconConfig {
            out_dir: dir.path().to_path_buf(),
            design,
            ..Default::default()
        };
        let written = generate(&cfg).expect("generate icons");
        assert_eq!(written.len(), 2);

        for (icon, size) in written.iter().zip([192u32, 512]) {
            assert_eq!(icon.size, size);
            assert_eq!(icon.path, dir.path().join(format!("icon-{}.png", size)));

            let (w, h, rgba) = decode_rgba(&icon.path);
            assert_eq!((w, h), (size, size), "{design} at {size}px");
            let corner = (rgba[0], rgba[1], rgba[2], rgba[3]);
            assert_eq!(corner, BACKGROUND, "{design} corner at {size}px");

            assert_eq!(icon.digest, digest_hex(&fs::read(&icon.path).unwrap()));
        }
    }
}

#[test]
fn existing_files_are_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let stale = dir.path().join("icon-192.png");
    fs::write(&stale, b"stale").unwrap();

    let cfg = IconConfig {
        out_dir: dir.path().to_path_buf(),
        sizes: vec![192],
        ..Default::default()
    };
    generate(&cfg).unwrap();
    let bytes = fs::read(&stale).unwrap();
    assert_eq!(&bytes[0..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn out_dir_that_is_a_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let not_a_dir = dir.path().join("public");
    fs::write(&not_a_dir, b"plain file").unwrap();

    let cfg = IconConfig {
        out_dir: not_a_dir.clone(),
        ..Default::default()
    };
    match generate(&cfg) {
        Err(Error::Io { path, .. }) => assert_eq!(path, not_a_dir),
        other => panic!("expected Io error, got {:?}", other),
    }
}

#[test]
fn unwritable_png_path_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"plain file").unwrap();
    let target = blocker.join("icon-192.png");

    let canvas = render(Design::Pyramid, 192).unwrap();
    match canvas.save_png(&target) {
        Err(Error::Io { path, .. }) => assert_eq!(path, target),
        other => panic!("expected Io error, got {:?}", other.map(|b| b.len())),
    }
    assert!(!target.exists());
}

#[test]
fn accents_land_where_expected() {
    let pyramid = render(Design::Pyramid, 192).unwrap();
    // centre dot at (size/2, 0.52 * size)
    assert_eq!(pyramid.pixel(96, 99), Some(GOLD));

    let scale = render(Design::Scale, 512).unwrap();
    // left pan centre
    assert_eq!(scale.pixel(130, 295), Some(WHITE));
    // plinth
    assert_eq!(scale.pixel(256, 420), Some(GOLD));
}

#[test]
fn largest_shape_keeps_its_relative_position() {
    for design in [Design::Pyramid, Design::Scale] {
        let rel = |size: u32| {
            let prims = layout_icon(design, size);
            let c = largest_filled(&prims)
                .and_then(|p| p.centroid())
                .expect("design has a filled shape");
            (c.x / size as f32, c.y / size as f32)
        };
        let (small, large) = (rel(192), rel(512));
        assert!((small.0 - large.0).abs() <= 0.01, "{design}: x drifted");
        assert!((small.1 - large.1).abs() <= 0.01, "{design}: y drifted");
    }
}

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens/expected");
    p.push(name);
    p
}

#[test]
fn golden_icon_layouts() {
    for design in [Design::Pyramid, Design::Scale] {
        let layout = layout_icon(design, 192);
        let expected_path = golden_path(&format!("{}-192.layout.json", design));

        if std::env::var("UPDATE_GOLDENS").is_ok() {
            fs::create_dir_all("tests/goldens/expected").ok();
            let json = serde_json::to_string_pretty(&layout).expect("serialize layout");
            fs::write(&expected_path, json + "\n").expect("write golden");
            println!("Updated golden: {:?}", expected_path);
            continue;
        }

        let exp = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("unable to read golden {:?}: {}", expected_path, e));
        let expected: Vec<Primitive> = serde_json::from_str(&exp).expect("invalid golden json");
        assert_eq!(layout, expected, "{design} layout drifted from golden");
    }
}
