#![cfg(feature = "render-png")]

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use cairo::ImageSurface;
use vectopng::{convert, Config, Error};

const RED: u32 = 0xFFFF0000;

fn data(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

fn scratch(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("vectopng-tests").join(test);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();

    dir
}

fn load_png(path: &Path) -> ImageSurface {
    let mut file = File::open(path).unwrap();
    ImageSurface::create_from_png(&mut file).unwrap()
}

fn pixel(surface: &mut ImageSurface, x: usize, y: usize) -> u32 {
    let stride = surface.stride() as usize;
    let data = surface.data().unwrap();
    let offset = y * stride + x * 4;

    u32::from_ne_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}

#[test]
fn red_unit_square() {
    let dir = scratch("red_unit_square");
    let mut config = Config::new(data("ic_square.xml"));
    config.output = dir.join("square.png");

    let written = convert(&config).unwrap();
    assert_eq!(written, vec![dir.join("square.png")]);

    let mut png = load_png(&written[0]);
    assert_eq!((png.width(), png.height()), (24, 24));
    assert_eq!(pixel(&mut png, 0, 0), RED);
    assert_eq!(pixel(&mut png, 1, 0), 0);
    assert_eq!(pixel(&mut png, 0, 1), 0);
    assert_eq!(pixel(&mut png, 23, 23), 0);
}

#[test]
fn ios_writes_three_densities() {
    let dir = scratch("ios_writes_three_densities");
    let mut config = Config::new(data("ic_square.xml"));
    config.output = dir.join("square.png");
    config.scale = 2.0;
    config.ios = true;

    let written = convert(&config).unwrap();
    assert_eq!(
        written,
        vec![
            dir.join("square.png"),
            dir.join("square@2x.png"),
            dir.join("square@3x.png"),
        ]
    );

    for (path, size) in written.iter().zip([48, 96, 144]) {
        let mut png = load_png(path);
        assert_eq!((png.width(), png.height()), (size, size), "{}", path.display());

        let edge = (size / 24 - 1) as usize;
        assert_eq!(pixel(&mut png, edge, edge), RED);
        assert_eq!(pixel(&mut png, edge + 1, edge + 1), 0);
    }
}

#[test]
fn width_override_stretches_viewport() {
    let dir = scratch("width_override_stretches_viewport");
    let mut config = Config::new(data("ic_square.xml"));
    config.output = dir.join("wide.png");
    config.size.width = Some(48.0);

    convert(&config).unwrap();

    let mut png = load_png(&config.output);
    assert_eq!((png.width(), png.height()), (48, 24));
    assert_eq!(pixel(&mut png, 0, 0), RED);
    assert_eq!(pixel(&mut png, 1, 0), RED);
    assert_eq!(pixel(&mut png, 2, 0), 0);
    assert_eq!(pixel(&mut png, 0, 1), 0);
}

#[test]
fn colors_come_from_resource_file() {
    let dir = scratch("colors_come_from_resource_file");
    let mut config = Config::new(data("ic_badge.xml"));
    config.output = dir.join("badge.png");
    config.colors_file = Some(data("colors.xml"));

    convert(&config).unwrap();

    let mut png = load_png(&config.output);
    assert_eq!((png.width(), png.height()), (48, 48));
    assert_eq!(pixel(&mut png, 24, 8), 0xFF6200EE);
    assert_eq!(pixel(&mut png, 24, 24), 0xFF6200EE);
    assert_eq!(pixel(&mut png, 16, 16), 0xFFFFFFFF);
    assert_eq!(pixel(&mut png, 0, 0), 0);
}

#[test]
fn command_line_colors_override_resource_file() {
    let dir = scratch("command_line_colors_override_resource_file");
    let mut config = Config::new(data("ic_badge.xml"));
    config.output = dir.join("badge.png");
    config.colors_file = Some(data("colors.xml"));
    config.colors = vec!["@color/brand=#00F".parse().unwrap()];

    convert(&config).unwrap();

    let mut png = load_png(&config.output);
    assert_eq!(pixel(&mut png, 24, 8), 0xFF0000FF);
}

#[test]
fn unresolved_color_fails_without_output() {
    let dir = scratch("unresolved_color_fails_without_output");
    let mut config = Config::new(data("ic_badge.xml"));
    config.output = dir.join("badge.png");

    let err = convert(&config).unwrap_err();
    assert_eq!(
        format!("{:#}", err),
        "cannot render vector file: invalid color \"@color/badge_fill\""
    );
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::InvalidColor(_))
    ));
    assert!(!config.output.exists());
}

#[test]
fn missing_input_file() {
    let dir = scratch("missing_input_file");
    let mut config = Config::new(dir.join("nothing.xml"));
    config.output = dir.join("nothing.png");

    let err = convert(&config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::FileRead { what: "vector file", .. })
    ));
}

#[test]
fn renders_every_sample() {
    let dir = scratch("renders_every_sample");
    let pattern = data("ic_*.xml");

    let mut count = 0;
    for path in glob::glob(pattern.to_str().unwrap()).unwrap() {
        let path = path.unwrap();
        let mut config = Config::new(&path);
        config.output = dir.join(path.file_name().unwrap()).with_extension("png");
        config.colors_file = Some(data("colors.xml"));

        convert(&config).unwrap();
        assert!(config.output.exists(), "{}", config.output.display());
        count += 1;
    }

    assert!(count >= 2);
}
