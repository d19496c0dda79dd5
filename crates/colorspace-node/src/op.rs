//! The `OCIOColorSpace` pixel operator.
//!
//! Converts the RGB triplets of a selected layer from one named colour space
//! to another. The processor is resolved once per validation and then
//! shared read-only by every row the host renders.

use crate::catalog::ColorSpaceCatalog;
use crate::channel::{Channel, ChannelSet};
use crate::error::{ColorSpaceError, Selector};
use crate::host::{
    ImageInfo, OpDescription, OpHash, PixelIop, RowOutcome, Validated, WrapperFlags,
};
use crate::knobs::{self, KnobSpec};
use crate::library::{ColorConfig, ColorLibrary, ColorProcessor, LibraryError};
use crate::params::ColorSpaceParams;
use crate::row::Row;

pub const CLASS: &str = "OCIOColorSpace";
pub const HELP: &str = "Use OpenColorIO to convert from one ColorSpace to another.";

type Config<L> = <L as ColorLibrary>::Config;
type Context<L> = <Config<L> as ColorConfig>::Context;
type Processor<L> = <Config<L> as ColorConfig>::Processor;

/// Outcome of the last successful validation.
enum Resolution<P> {
    Active(P),
    NoOp,
}

pub struct ColorSpaceOp<L: ColorLibrary> {
    library: L,
    catalog: ColorSpaceCatalog,
    params: ColorSpaceParams,
    resolution: Option<Resolution<Processor<L>>>,
    out_channels: ChannelSet,
}

impl<L: ColorLibrary> ColorSpaceOp<L> {
    /// Creates a node and captures the colour spaces of the active
    /// configuration. Discovery failures are logged and leave the node
    /// permanently unavailable; they never abort construction.
    pub fn new(library: L) -> Self {
        let catalog = match ColorSpaceCatalog::discover(&library) {
            Ok(catalog) => catalog,
            Err(err) => {
                tracing::error!("{err}");
                ColorSpaceCatalog::default()
            }
        };

        if catalog.is_empty() {
            tracing::error!("No ColorSpaces available for input and/or output.");
        } else {
            tracing::info!(
                count = catalog.len(),
                default = catalog.names()[catalog.default_index()].as_str(),
                "colour spaces discovered"
            );
        }

        let params = ColorSpaceParams::with_default_index(catalog.default_index());
        Self {
            library,
            catalog,
            params,
            resolution: None,
            out_channels: ChannelSet::NONE,
        }
    }

    pub fn catalog(&self) -> &ColorSpaceCatalog {
        &self.catalog
    }

    pub fn has_color_spaces(&self) -> bool {
        !self.catalog.is_empty()
    }

    pub fn params(&self) -> &ColorSpaceParams {
        &self.params
    }

    /// Edits invalidate the current resolution; validate again before
    /// rendering.
    pub fn params_mut(&mut self) -> &mut ColorSpaceParams {
        self.resolution = None;
        &mut self.params
    }

    pub fn set_params(&mut self, params: ColorSpaceParams) {
        self.resolution = None;
        self.params = params;
    }

    pub fn select_input(&mut self, name: &str) -> Result<(), ColorSpaceError> {
        let index = self.index_of(name)?;
        self.params_mut().set_input_index(index);
        Ok(())
    }

    pub fn select_output(&mut self, name: &str) -> Result<(), ColorSpaceError> {
        let index = self.index_of(name)?;
        self.params_mut().set_output_index(index);
        Ok(())
    }

    fn index_of(&self, name: &str) -> Result<i32, ColorSpaceError> {
        self.catalog
            .index_of(name)
            .and_then(|i| i32::try_from(i).ok())
            .ok_or_else(|| ColorSpaceError::UnknownColorSpace(name.to_string()))
    }

    /// Channels written by the pixel engine after the last validation.
    pub fn out_channels(&self) -> ChannelSet {
        self.out_channels
    }

    /// `true` when the last validation resolved an identity transform.
    pub fn is_noop(&self) -> bool {
        matches!(self.resolution, Some(Resolution::NoOp))
    }

    fn effective_context(&self, config: &Config<L>) -> Result<Context<L>, LibraryError> {
        self.params.context().apply(config.current_context()?)
    }

    /// Adds the configuration cache id under the effective context.
    pub fn append(&self, hash: &mut OpHash) -> Result<(), ColorSpaceError> {
        let cache_id = self
            .library
            .current_config()
            .and_then(|config| {
                let context = self.effective_context(&config)?;
                config.cache_id(&context)
            })
            .map_err(ColorSpaceError::configuration)?;
        hash.append(cache_id);
        Ok(())
    }

    /// Resolves the processor for the current selection and context.
    pub fn validate(
        &mut self,
        input: &ImageInfo,
        for_real: bool,
    ) -> Result<Validated, ColorSpaceError> {
        self.resolution = None;
        self.out_channels = ChannelSet::NONE;

        let resolution = self.resolve()?;
        let noop = matches!(resolution, Resolution::NoOp);
        tracing::debug!(
            input = ?self.catalog.name(self.params.input_index()),
            output = ?self.catalog.name(self.params.output_index()),
            noop,
            for_real,
            "resolved colour-space processor"
        );

        self.out_channels = if noop {
            ChannelSet::NONE
        } else {
            ChannelSet::ALL
        };
        self.resolution = Some(resolution);
        Ok(Validated {
            info: input.clone(),
            out_channels: self.out_channels,
        })
    }

    fn resolve(&self) -> Result<Resolution<Processor<L>>, ColorSpaceError> {
        if !self.has_color_spaces() {
            return Err(ColorSpaceError::no_color_spaces());
        }

        let input_index = self.params.input_index();
        let input_name = self.catalog.name(input_index).ok_or(ColorSpaceError::Range {
            selector: Selector::Input,
            index: input_index,
        })?;
        let output_index = self.params.output_index();
        let output_name = self
            .catalog
            .name(output_index)
            .ok_or(ColorSpaceError::Range {
                selector: Selector::Output,
                index: output_index,
            })?;

        let config = self
            .library
            .current_config()
            .map_err(ColorSpaceError::configuration)?;
        config
            .sanity_check()
            .map_err(ColorSpaceError::configuration)?;

        let context = self
            .effective_context(&config)
            .map_err(ColorSpaceError::resolution)?;
        let processor = config
            .processor(&context, input_name, output_name)
            .map_err(ColorSpaceError::resolution)?;

        if processor.is_noop() {
            Ok(Resolution::NoOp)
        } else {
            Ok(Resolution::Active(processor))
        }
    }

    /// Adds the RGB brothers of every selected colour channel in `mask`.
    pub fn in_channels(&self, mask: &mut ChannelSet) {
        let layer = self.params.layer();
        let mut done = ChannelSet::NONE;
        for channel in mask.iter() {
            if layer.contains(channel) && channel.is_colour() && !done.contains(channel) {
                done.add_brothers(channel, 3);
            }
        }
        *mask += done;
    }

    /// Writes `channels` of `out` over `[x, r)` from `input`.
    pub fn pixel_engine(
        &self,
        input: &Row,
        _y: i32,
        x: i32,
        r: i32,
        channels: ChannelSet,
        out: &mut Row,
    ) -> Result<RowOutcome, ColorSpaceError> {
        let Some(resolution) = &self.resolution else {
            return Err(ColorSpaceError::NotValidated);
        };
        if !input.covers(x, r) || !out.covers(x, r) {
            return Err(ColorSpaceError::SpanOutsideRow { x, r });
        }

        let processor = match resolution {
            Resolution::NoOp => {
                let mut outcome = RowOutcome::default();
                for channel in channels.iter() {
                    pass_through(input, out, channel, x, r, &mut outcome);
                }
                return Ok(outcome);
            }
            Resolution::Active(processor) => processor,
        };

        let layer = self.params.layer();
        let mut done = ChannelSet::NONE;
        let mut outcome = RowOutcome::default();

        for channel in channels.iter() {
            if done.contains(channel) {
                continue;
            }

            if !layer.contains(channel) || !channel.is_colour() {
                pass_through(input, out, channel, x, r, &mut outcome);
                continue;
            }

            let triplet = [channel.brother(0), channel.brother(1), channel.brother(2)];
            let group: ChannelSet = triplet.into_iter().collect();
            done += group;
            outcome.groups += 1;

            match apply_triplet(processor, input, out, triplet, x, r) {
                Ok(()) => outcome.transformed += group,
                Err(err) => {
                    tracing::error!(channels = %group, "{}", err.message());
                    outcome.failures.push(ColorSpaceError::TransformApply {
                        channels: group,
                        message: err.message().to_string(),
                    });
                }
            }
        }

        Ok(outcome)
    }
}

fn pass_through(
    input: &Row,
    out: &mut Row,
    channel: Channel,
    x: i32,
    r: i32,
    outcome: &mut RowOutcome,
) {
    if out.copy(input, channel, x, r) {
        outcome.passed_through += channel;
    } else {
        outcome.failures.push(ColorSpaceError::SpanOutsideRow { x, r });
    }
}

/// Copies a triplet into `out` and converts it there in place.
fn apply_triplet<P: ColorProcessor>(
    processor: &P,
    input: &Row,
    out: &mut Row,
    triplet: [Channel; 3],
    x: i32,
    r: i32,
) -> Result<(), LibraryError> {
    let span_error = || LibraryError::new(format!("span [{x}, {r}) lies outside the row"));
    for channel in triplet {
        if !out.copy(input, channel, x, r) {
            return Err(span_error());
        }
    }
    let [red, green, blue] = out.writable_triplet(triplet, x, r).ok_or_else(span_error)?;
    processor.apply_planar(red, green, blue)
}

impl<L: ColorLibrary + 'static> PixelIop for ColorSpaceOp<L> {
    fn class(&self) -> &'static str {
        CLASS
    }

    fn node_help(&self) -> &'static str {
        HELP
    }

    fn knobs(&self) -> Vec<KnobSpec> {
        knobs::declare(&self.catalog, &self.params)
    }

    fn append(&self, hash: &mut OpHash) -> Result<(), ColorSpaceError> {
        ColorSpaceOp::append(self, hash)
    }

    fn validate(
        &mut self,
        input: &ImageInfo,
        for_real: bool,
    ) -> Result<Validated, ColorSpaceError> {
        ColorSpaceOp::validate(self, input, for_real)
    }

    fn in_channels(&self, mask: &mut ChannelSet) {
        ColorSpaceOp::in_channels(self, mask)
    }

    fn pixel_engine(
        &self,
        input: &Row,
        y: i32,
        x: i32,
        r: i32,
        channels: ChannelSet,
        out: &mut Row,
    ) -> Result<RowOutcome, ColorSpaceError> {
        ColorSpaceOp::pixel_engine(self, input, y, x, r, channels, out)
    }
}

/// Registration record for the operator.
pub fn description<L: ColorLibrary + 'static>() -> OpDescription<L> {
    OpDescription {
        name: CLASS,
        help: HELP,
        wrapper: WrapperFlags {
            mix: false,
            mask: false,
            channels: false,
            unpremult: false,
        },
        build: build::<L>,
    }
}

fn build<L: ColorLibrary + 'static>(library: L) -> Box<dyn PixelIop> {
    Box::new(ColorSpaceOp::new(library))
}
