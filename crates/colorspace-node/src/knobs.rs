//! Declarative knob schema.
//!
//! Hosts render their parameter UI from this list. The order of entries is
//! the order in which the knobs appear.

use serde::Serialize;

use crate::catalog::ColorSpaceCatalog;
use crate::channel::ChannelSet;
use crate::params::ColorSpaceParams;

pub const IN_COLORSPACE: &str = "in_colorspace";
pub const OUT_COLORSPACE: &str = "out_colorspace";
pub const LAYER: &str = "layer";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KnobKind {
    Enumeration { items: Vec<String>, default: i32 },
    String { default: String },
    InputChannelSet { default: ChannelSet },
    BeginClosedGroup,
    EndGroup,
    Divider,
    Spacer { width: u32 },
}

/// Layout and behaviour flags a host may honour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct KnobFlags {
    /// The knob continues the previous line instead of starting a new one.
    pub same_line: bool,
    pub no_checkmarks: bool,
    pub no_alpha_pulldown: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnobSpec {
    pub name: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: KnobKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<&'static str>,
    pub flags: KnobFlags,
}

impl KnobSpec {
    fn new(name: impl Into<String>, label: impl Into<String>, kind: KnobKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            tooltip: None,
            flags: KnobFlags::default(),
        }
    }

    fn layout(kind: KnobKind) -> Self {
        Self::new("", "", kind)
    }

    fn tooltip(mut self, tooltip: &'static str) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    fn flags(mut self, flags: KnobFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// The knobs of a colour-space node, with current values as defaults.
pub fn declare(catalog: &ColorSpaceCatalog, params: &ColorSpaceParams) -> Vec<KnobSpec> {
    let items = catalog.names().to_vec();
    let mut knobs = vec![
        KnobSpec::new(
            IN_COLORSPACE,
            "in",
            KnobKind::Enumeration {
                items: items.clone(),
                default: params.input_index(),
            },
        )
        .tooltip("Input data is taken to be in this colorspace."),
        KnobSpec::new(
            OUT_COLORSPACE,
            "out",
            KnobKind::Enumeration {
                items,
                default: params.output_index(),
            },
        )
        .tooltip("Image data is converted to this colorspace for output."),
        KnobSpec::new("Context", "Context", KnobKind::BeginClosedGroup),
    ];

    for (slot, pair) in params.context().pairs().iter().enumerate() {
        let n = slot + 1;
        knobs.push(KnobSpec::new(
            format!("key{n}"),
            format!("key{n}"),
            KnobKind::String {
                default: pair.key.clone(),
            },
        ));
        knobs.push(KnobSpec::layout(KnobKind::Spacer { width: 10 }));
        knobs.push(
            KnobSpec::new(
                format!("value{n}"),
                format!("value{n}"),
                KnobKind::String {
                    default: pair.value.clone(),
                },
            )
            .flags(KnobFlags {
                same_line: true,
                ..KnobFlags::default()
            }),
        );
    }

    knobs.push(KnobSpec::layout(KnobKind::EndGroup));
    knobs.push(KnobSpec::layout(KnobKind::Divider));
    knobs.push(
        KnobSpec::new(
            LAYER,
            LAYER,
            KnobKind::InputChannelSet {
                default: params.layer(),
            },
        )
        .flags(KnobFlags {
            no_checkmarks: true,
            no_alpha_pulldown: true,
            ..KnobFlags::default()
        })
        .tooltip("Set which layer to process. This should be a layer with rgb data."),
    );
    knobs
}
