//! In-memory colour library for driving the node without a native install.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use colorspace_node::{ColorConfig, ColorContext, ColorLibrary, ColorProcessor, LibraryError};
use palette::{LinSrgb, Srgb};
use parking_lot::Mutex;

/// Context variable read by the mock as a linear gain.
pub const EXPOSURE_VAR: &str = "EXPOSURE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    CurrentConfig,
    Panic,
    SanityCheck,
    Processor,
    CacheId,
}

#[derive(Debug, Clone, Default)]
pub struct MockSettings {
    pub spaces: Vec<String>,
    pub scene_linear: Option<String>,
    pub vars: BTreeMap<String, String>,
    pub generation: u64,
    pub failure: Option<Failure>,
}

#[derive(Clone, Default)]
pub struct MockLibrary {
    settings: Arc<Mutex<MockSettings>>,
    processor_calls: Arc<AtomicUsize>,
}

impl MockLibrary {
    pub fn new(spaces: &[&str], scene_linear: Option<&str>) -> Self {
        let settings = MockSettings {
            spaces: spaces.iter().map(|s| s.to_string()).collect(),
            scene_linear: scene_linear.map(str::to_string),
            ..MockSettings::default()
        };
        Self {
            settings: Arc::new(Mutex::new(settings)),
            processor_calls: Arc::default(),
        }
    }

    /// `linear`, `sRGB` and `Rec709`, with `linear` as scene-linear.
    pub fn standard() -> Self {
        Self::new(&["linear", "sRGB", "Rec709"], Some("linear"))
    }

    pub fn failing(failure: Failure) -> Self {
        let library = Self::standard();
        library.update(|s| s.failure = Some(failure));
        library
    }

    pub fn update(&self, f: impl FnOnce(&mut MockSettings)) {
        f(&mut self.settings.lock());
    }

    pub fn processor_calls(&self) -> usize {
        self.processor_calls.load(Ordering::SeqCst)
    }
}

impl ColorLibrary for MockLibrary {
    type Config = MockConfig;

    fn current_config(&self) -> Result<MockConfig, LibraryError> {
        let settings = self.settings.lock().clone();
        match settings.failure {
            Some(Failure::CurrentConfig) => Err(LibraryError::new("no config loaded")),
            Some(Failure::Panic) => panic!("config loader exploded"),
            _ => Ok(MockConfig {
                base: MockContext(Arc::new(settings.vars.clone())),
                settings,
                processor_calls: Arc::clone(&self.processor_calls),
            }),
        }
    }
}

pub struct MockConfig {
    settings: MockSettings,
    base: MockContext,
    processor_calls: Arc<AtomicUsize>,
}

impl ColorConfig for MockConfig {
    type Context = MockContext;
    type Processor = MockProcessor;

    fn color_space_count(&self) -> usize {
        self.settings.spaces.len()
    }

    fn color_space_name(&self, index: usize) -> Option<String> {
        self.settings.spaces.get(index).cloned()
    }

    fn role_color_space(&self, role: &str) -> Option<String> {
        (role == colorspace_node::library::ROLE_SCENE_LINEAR)
            .then(|| self.settings.scene_linear.clone())
            .flatten()
    }

    fn current_context(&self) -> Result<MockContext, LibraryError> {
        Ok(self.base.clone())
    }

    fn cache_id(&self, context: &MockContext) -> Result<String, LibraryError> {
        if self.settings.failure == Some(Failure::CacheId) {
            return Err(LibraryError::new("cache id unavailable"));
        }
        Ok(format!("mock-{}-{:?}", self.settings.generation, context.0))
    }

    fn sanity_check(&self) -> Result<(), LibraryError> {
        if self.settings.failure == Some(Failure::SanityCheck) {
            return Err(LibraryError::new("config failed sanity check"));
        }
        Ok(())
    }

    fn processor(
        &self,
        context: &MockContext,
        src: &str,
        dst: &str,
    ) -> Result<MockProcessor, LibraryError> {
        self.processor_calls.fetch_add(1, Ordering::SeqCst);
        if self.settings.failure == Some(Failure::Processor) {
            return Err(LibraryError::new(format!("no transform from {src} to {dst}")));
        }

        let gain = match context.string_var(EXPOSURE_VAR) {
            Some(value) => value
                .parse()
                .map_err(|_| LibraryError::new(format!("bad {EXPOSURE_VAR} value: {value}")))?,
            None => 1.0,
        };
        Ok(MockProcessor {
            src: Space::parse(src)?,
            dst: Space::parse(dst)?,
            gain,
        })
    }
}

#[derive(Debug, Clone)]
pub struct MockContext(Arc<BTreeMap<String, String>>);

impl MockContext {
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl ColorContext for MockContext {
    fn editable_copy(&self) -> Result<Self, LibraryError> {
        Ok(Self(Arc::new((*self.0).clone())))
    }

    fn set_string_var(&mut self, name: &str, value: &str) -> Result<(), LibraryError> {
        Arc::make_mut(&mut self.0).insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn string_var(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    Linear,
    Srgb,
    Rec709,
}

impl Space {
    fn parse(name: &str) -> Result<Self, LibraryError> {
        match name {
            "linear" => Ok(Self::Linear),
            "sRGB" => Ok(Self::Srgb),
            "Rec709" => Ok(Self::Rec709),
            other => Err(LibraryError::new(format!("colorspace '{other}' not found"))),
        }
    }

    fn decode(self, rgb: [f32; 3]) -> [f32; 3] {
        match self {
            Self::Linear => rgb,
            Self::Srgb => {
                let lin: LinSrgb<f32> = Srgb::new(rgb[0], rgb[1], rgb[2]).into_linear();
                [lin.red, lin.green, lin.blue]
            }
            Self::Rec709 => rgb.map(rec709_decode),
        }
    }

    fn encode(self, rgb: [f32; 3]) -> [f32; 3] {
        match self {
            Self::Linear => rgb,
            Self::Srgb => {
                let encoded: Srgb<f32> = Srgb::from_linear(LinSrgb::new(rgb[0], rgb[1], rgb[2]));
                [encoded.red, encoded.green, encoded.blue]
            }
            Self::Rec709 => rgb.map(rec709_encode),
        }
    }
}

fn rec709_encode(v: f32) -> f32 {
    if v < 0.018 {
        4.5 * v
    } else {
        1.099 * v.powf(0.45) - 0.099
    }
}

fn rec709_decode(v: f32) -> f32 {
    if v < 0.081 {
        v / 4.5
    } else {
        ((v + 0.099) / 1.099).powf(1.0 / 0.45)
    }
}

#[derive(Debug)]
pub struct MockProcessor {
    src: Space,
    dst: Space,
    gain: f32,
}

impl ColorProcessor for MockProcessor {
    fn is_noop(&self) -> bool {
        self.src == self.dst && self.gain == 1.0
    }

    fn apply_planar(
        &self,
        red: &mut [f32],
        green: &mut [f32],
        blue: &mut [f32],
    ) -> Result<(), LibraryError> {
        if red.len() != green.len() || green.len() != blue.len() {
            return Err(LibraryError::new("plane lengths differ"));
        }
        if red.iter().chain(green.iter()).chain(blue.iter()).any(|v| v.is_nan()) {
            return Err(LibraryError::new("NaN in input image"));
        }

        for ((r, g), b) in red.iter_mut().zip(green.iter_mut()).zip(blue.iter_mut()) {
            let lin = self.src.decode([*r, *g, *b]).map(|v| v * self.gain);
            let [nr, ng, nb] = self.dst.encode(lin);
            *r = nr;
            *g = ng;
            *b = nb;
        }
        Ok(())
    }
}

/// The sRGB encoding of a linear value, as computed by `palette`.
pub fn srgb_encode(v: f32) -> f32 {
    let encoded: Srgb<f32> = Srgb::from_linear(LinSrgb::new(v, v, v));
    encoded.red
}

pub fn assert_close(actual: &[f32], expected: &[f32], tol: f32) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        let diff = (a - e).abs();
        assert!(
            diff <= tol,
            "sample {i} mismatch: got {a}, expected {e}, diff {diff} > {tol}"
        );
    }
}
