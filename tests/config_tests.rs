use zoom_gallery::config::{Configuration, GalleryOptions, Viewport};
use zoom_gallery::error::Error;
use zoom_gallery::gallery::LoadFailurePolicy;
use zoom_gallery::platform::Platform;

#[test]
fn parse_minimal_config_with_defaults() {
    let yaml = r#"
container: "gallery"
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.gallery.container.as_deref(), Some("gallery"));
    assert_eq!(cfg.gallery.platform, None);
    assert!(cfg.gallery.multitouch);
    assert_eq!(cfg.gallery.on_load_error, LoadFailurePolicy::Stall);
    assert_eq!(cfg.viewport, Viewport::default());
    assert_eq!(cfg.tick_rate_hz, 60);
    assert!(cfg.images.is_empty());
}

#[test]
fn parse_full_config() {
    let yaml = r#"
container: stage
platform: canvas
multitouch: false
width: 640
height: 480
viewport:
  width: 1280
  height: 720
on-load-error: skip
tick-rate-hz: 30
image-root: /srv/photos
images:
  - source: a.jpg
    width: 400
    height: 300
  - { source: "file:///tmp/b.png", width: 10, height: 20 }
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.gallery.platform, Some(Platform::Canvas));
    assert!(!cfg.gallery.multitouch);
    assert_eq!((cfg.gallery.width, cfg.gallery.height), (Some(640), Some(480)));
    assert_eq!(cfg.gallery.on_load_error, LoadFailurePolicy::Skip);
    assert_eq!(cfg.tick_rate_hz, 30);
    assert_eq!(cfg.images.len(), 2);
    assert_eq!(cfg.images[1].source, "file:///tmp/b.png");

    let resolved = cfg.gallery.resolve(cfg.viewport).unwrap();
    assert_eq!((resolved.width, resolved.height), (640, 480));
}

#[test]
fn unknown_platform_is_rejected() {
    let yaml = r#"
container: stage
platform: vulkan
"#;
    assert!(serde_yaml::from_str::<Configuration>(yaml).is_err());
}

#[test]
fn size_falls_back_to_viewport() {
    let resolved = GalleryOptions::new("stage")
        .resolve(Viewport {
            width: 800,
            height: 600,
        })
        .unwrap();
    assert_eq!((resolved.width, resolved.height), (800, 600));
}

#[test]
fn blank_container_is_a_configuration_error() {
    let opts = GalleryOptions::new("   ");
    assert!(matches!(
        opts.resolve(Viewport::default()),
        Err(Error::Configuration(_))
    ));
}

#[test]
fn validation_rejects_bad_values() {
    let no_container: Configuration = serde_yaml::from_str("tick-rate-hz: 60").unwrap();
    assert!(no_container.validated().is_err());

    let zero_rate: Configuration =
        serde_yaml::from_str("container: c\ntick-rate-hz: 0").unwrap();
    assert!(zero_rate.validated().is_err());

    let zero_image: Configuration = serde_yaml::from_str(
        "container: c\nimages:\n  - { source: a.jpg, width: 0, height: 10 }",
    )
    .unwrap();
    assert!(zero_image.validated().is_err());
}

#[test]
fn loads_from_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gallery.yaml");
    std::fs::write(&path, "container: root\nwidth: 300\n").unwrap();
    let cfg = Configuration::from_yaml_file(&path)
        .unwrap()
        .validated()
        .unwrap();
    assert_eq!(cfg.gallery.width, Some(300));
}
