use super::*;

#[test]
fn test_default_config_is_valid() {
    let config = PipelineConfig::default();
    config.validate().unwrap();
    assert_eq!(config.reflection_size, PhysicalSize::new(320, 180));
    assert_eq!(config.refraction_size, PhysicalSize::new(1280, 720));
    assert!(config.sample_refraction_depth);
    assert!(matches!(config.blend, SurfaceBlend::Fresnel { .. }));
}

#[test]
fn test_zero_sizes_are_rejected() {
    let config = PipelineConfig {
        reflection_size: PhysicalSize::new(0, 180),
        ..Default::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("reflection_size"));

    let config = PipelineConfig {
        window_size: PhysicalSize::new(1280, 0),
        ..Default::default()
    };
    assert!(config.validate().unwrap_err().to_string().contains("window_size"));
}

#[test]
fn test_invalid_blend_is_rejected() {
    let config = PipelineConfig {
        blend: SurfaceBlend::Fixed(1.5),
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_negative_distortion_strength_is_rejected() {
    let config = PipelineConfig {
        distortion_strength: -0.1,
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_flat_color_range() {
    let config = PipelineConfig {
        flat_color: [0.0, 2.0, 0.0, 1.0],
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_sampler_slots_must_be_distinct() {
    let config = PipelineConfig {
        refraction_slot: 0,
        ..Default::default()
    };
    assert!(config.validate().is_err());

    let config = PipelineConfig {
        depth_slot: 1,
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_depth_slot_unused_without_depth_sampling() {
    let config = PipelineConfig {
        sample_refraction_depth: false,
        depth_slot: 1,
        ..Default::default()
    };
    config.validate().unwrap();
}
