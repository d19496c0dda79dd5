mod common;

use colorspace_node::host::Format;
use colorspace_node::{
    ChannelSet, ColorConfig, ColorLibrary, ColorSpaceError, ColorSpaceOp, ContextOverrides,
    ImageInfo, OpHash, PixelIop, Selector, description,
};
use common::{EXPOSURE_VAR, Failure, MockLibrary};

fn upstream() -> ImageInfo {
    let mut info = ImageInfo {
        format: Format::new(0, 0, 64, 32),
        channels: ChannelSet::RGBA,
        ..ImageInfo::default()
    };
    info.metadata
        .insert("input/filename".to_string(), "plate.0001.exr".to_string());
    info
}

#[test]
fn defaults_point_at_scene_linear() {
    let op = ColorSpaceOp::new(MockLibrary::new(&["sRGB", "Rec709", "linear"], Some("linear")));
    assert!(op.has_color_spaces());
    assert_eq!(op.params().input_index(), 2);
    assert_eq!(op.params().output_index(), 2);
    assert_eq!(op.catalog().name(op.params().input_index()), Some("linear"));
}

#[test]
fn missing_scene_linear_role_defaults_to_first_entry() {
    let op = ColorSpaceOp::new(MockLibrary::new(&["sRGB", "Rec709"], None));
    assert_eq!(op.params().input_index(), 0);
    assert_eq!(op.params().output_index(), 0);
}

#[test]
fn linear_to_srgb_scenario() {
    let mut op = ColorSpaceOp::new(MockLibrary::standard());
    op.select_input("linear").unwrap();
    op.select_output("sRGB").unwrap();

    let validated = op.validate(&upstream(), true).unwrap();
    assert!(!op.is_noop());
    assert_eq!(validated.out_channels, ChannelSet::ALL);
    assert_eq!(validated.info, upstream());
}

#[test]
fn out_of_range_input_index_is_a_range_error() {
    let library = MockLibrary::standard();
    let mut op = ColorSpaceOp::new(library.clone());
    op.params_mut().set_input_index(5);

    let err = op.validate(&upstream(), true).unwrap_err();
    assert_eq!(
        err,
        ColorSpaceError::Range {
            selector: Selector::Input,
            index: 5
        }
    );
    assert!(err.to_string().contains("(5)"), "message was: {err}");
    assert_eq!(library.processor_calls(), 0);
    assert_eq!(op.out_channels(), ChannelSet::NONE);
}

#[test]
fn negative_and_overflowing_output_indices_are_range_errors() {
    let library = MockLibrary::standard();
    let mut op = ColorSpaceOp::new(library.clone());

    for index in [-1, 3, i32::MAX] {
        op.params_mut().set_output_index(index);
        let err = op.validate(&upstream(), false).unwrap_err();
        assert_eq!(
            err,
            ColorSpaceError::Range {
                selector: Selector::Output,
                index
            }
        );
    }
    assert_eq!(library.processor_calls(), 0);
}

#[test]
fn identical_spaces_disable_output_channels() {
    let mut op = ColorSpaceOp::new(MockLibrary::standard());
    op.select_input("sRGB").unwrap();
    op.select_output("sRGB").unwrap();

    let validated = op.validate(&upstream(), true).unwrap();
    assert!(op.is_noop());
    assert_eq!(validated.out_channels, ChannelSet::NONE);
    assert_eq!(validated.info, upstream());
}

#[test]
fn context_override_can_turn_noop_into_active_transform() {
    let mut op = ColorSpaceOp::new(MockLibrary::standard());
    op.validate(&upstream(), true).unwrap();
    assert!(op.is_noop());

    op.params_mut()
        .set_context_pair(1, EXPOSURE_VAR, "2.0")
        .unwrap();
    let validated = op.validate(&upstream(), true).unwrap();
    assert!(!op.is_noop());
    assert_eq!(validated.out_channels, ChannelSet::ALL);
}

#[test]
fn empty_catalog_is_a_configuration_error() {
    let library = MockLibrary::new(&[], Some("linear"));
    let mut op = ColorSpaceOp::new(library.clone());
    assert!(!op.has_color_spaces());

    let err = op.validate(&upstream(), true).unwrap_err();
    assert!(matches!(err, ColorSpaceError::Configuration(_)));
    assert_eq!(
        err.to_string(),
        "No colorspaces available for input and/or output."
    );
    assert_eq!(library.processor_calls(), 0);
}

#[test]
fn discovery_failure_leaves_node_unavailable() {
    let library = MockLibrary::failing(Failure::CurrentConfig);
    let mut op = ColorSpaceOp::new(library.clone());
    assert!(!op.has_color_spaces());

    // Fixing the library later does not revive the node.
    library.update(|s| s.failure = None);
    let err = op.validate(&upstream(), true).unwrap_err();
    assert!(matches!(err, ColorSpaceError::Configuration(_)));
}

#[test]
fn panic_during_discovery_is_contained() {
    let op = ColorSpaceOp::new(MockLibrary::failing(Failure::Panic));
    assert!(!op.has_color_spaces());
    assert!(op.catalog().is_empty());
}

#[test]
fn sanity_check_failure_is_a_configuration_error() {
    let library = MockLibrary::standard();
    let mut op = ColorSpaceOp::new(library.clone());
    library.update(|s| s.failure = Some(Failure::SanityCheck));

    let err = op.validate(&upstream(), true).unwrap_err();
    assert_eq!(
        err,
        ColorSpaceError::Configuration("config failed sanity check".to_string())
    );
    assert_eq!(library.processor_calls(), 0);
}

#[test]
fn processor_failure_is_a_resolution_error() {
    let library = MockLibrary::standard();
    let mut op = ColorSpaceOp::new(library.clone());
    op.select_output("Rec709").unwrap();
    library.update(|s| s.failure = Some(Failure::Processor));

    let err = op.validate(&upstream(), true).unwrap_err();
    assert_eq!(
        err,
        ColorSpaceError::TransformResolution("no transform from linear to Rec709".to_string())
    );
    assert_eq!(op.out_channels(), ChannelSet::NONE);
}

#[test]
fn colorspace_removed_from_config_fails_resolution() {
    let library = MockLibrary::standard();
    let mut op = ColorSpaceOp::new(library.clone());
    op.select_output("Rec709").unwrap();
    library.update(|s| s.spaces[2] = "Rec2020".to_string());

    // The catalog was captured at construction; the library decides.
    let err = op.validate(&upstream(), true).unwrap_err();
    assert!(matches!(err, ColorSpaceError::TransformResolution(_)));
}

#[test]
fn failed_validation_discards_previous_processor() {
    let mut op = ColorSpaceOp::new(MockLibrary::standard());
    op.select_output("sRGB").unwrap();
    op.validate(&upstream(), true).unwrap();
    assert_eq!(op.out_channels(), ChannelSet::ALL);

    op.params_mut().set_input_index(42);
    assert!(op.validate(&upstream(), true).is_err());
    assert_eq!(op.out_channels(), ChannelSet::NONE);
}

#[test]
fn validation_is_idempotent() {
    let library = MockLibrary::standard();
    let mut op = ColorSpaceOp::new(library.clone());
    op.select_output("sRGB").unwrap();

    let first = op.validate(&upstream(), false).unwrap();
    let second = op.validate(&upstream(), true).unwrap();
    assert_eq!(first, second);
    assert_eq!(library.processor_calls(), 2);
}

#[test]
fn unknown_colorspace_name_is_rejected() {
    let mut op = ColorSpaceOp::new(MockLibrary::standard());
    assert_eq!(
        op.select_input("ACEScg"),
        Err(ColorSpaceError::UnknownColorSpace("ACEScg".to_string()))
    );
}

#[test]
fn hash_follows_context_and_config_generation() {
    let library = MockLibrary::standard();
    let mut op = ColorSpaceOp::new(library.clone());

    let hash_of = |op: &ColorSpaceOp<MockLibrary>| {
        let mut hash = OpHash::new();
        op.append(&mut hash).unwrap();
        assert_eq!(hash.parts(), 1);
        hash.value()
    };

    let base = hash_of(&op);
    assert_eq!(base, hash_of(&op));

    op.params_mut().set_context_pair(0, "SHOT", "sh010").unwrap();
    let with_context = hash_of(&op);
    assert_ne!(base, with_context);

    library.update(|s| s.generation += 1);
    assert_ne!(with_context, hash_of(&op));
}

#[test]
fn hash_failure_is_reported() {
    let library = MockLibrary::standard();
    let op = ColorSpaceOp::new(library.clone());
    library.update(|s| s.failure = Some(Failure::CacheId));

    let mut hash = OpHash::new();
    let err = op.append(&mut hash).unwrap_err();
    assert_eq!(
        err,
        ColorSpaceError::Configuration("cache id unavailable".to_string())
    );
    assert_eq!(hash.parts(), 0);
}

#[test]
fn empty_context_reuses_base_context() {
    let library = MockLibrary::standard();
    library.update(|s| {
        s.vars.insert("SEQ".to_string(), "sq01".to_string());
    });
    let config = library.current_config().unwrap();
    let base = config.current_context().unwrap();

    let effective = ContextOverrides::default().apply(base.clone()).unwrap();
    assert!(effective.shares_storage_with(&base));
}

#[test]
fn description_builds_a_working_node() {
    let description = description::<MockLibrary>();
    assert_eq!(description.name, "OCIOColorSpace");
    assert!(!description.wrapper.mix);
    assert!(!description.wrapper.mask);
    assert!(!description.wrapper.channels);
    assert!(!description.wrapper.unpremult);

    let mut node: Box<dyn PixelIop> = (description.build)(MockLibrary::standard());
    assert_eq!(node.class(), "OCIOColorSpace");
    assert_eq!(node.node_help(), description.help);
    assert!(!node.knobs().is_empty());
    let validated = node.validate(&upstream(), true).unwrap();
    assert_eq!(validated.out_channels, ChannelSet::NONE);
}
