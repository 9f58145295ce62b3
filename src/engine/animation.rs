//! Animation plugin contract and the engine-owned host around it.
//!
//! A concrete animation implements [`Animation`] and works against the
//! frame, palette and console handed to it through [`AnimationContext`].
//! The [`AnimationHost`] owns those resources, enforces lifecycle ordering
//! (initialize before any frame call, finish paired with initialize) and
//! owns the frame-sequence counter.

use super::console::Console;
use super::frame::Frame;
use super::palette::Palette;

/// Maximum length of an animation name. Longer names are truncated.
pub const ANIMATION_NAME_MAX_LEN: usize = 32;

/// Resources an animation works against during lifecycle and frame calls.
pub struct AnimationContext<'a> {
    /// The animation's working frame.
    pub frame: &'a mut Frame,
    /// The animation's palette.
    pub palette: &'a mut Palette,
    /// Diagnostic sink; one formatted line per frame is customary.
    pub console: &'a mut Console,
}

/// Per-frame generator contract.
///
/// Variant state lives in the implementing type. `initialize` is always
/// called before any frame-generation method, against a freshly allocated
/// frame and palette; `finish` releases whatever extra resources the
/// variant allocated. A variant that has exhausted its pattern may call
/// [`Animation::reinitialize`] on itself from inside a frame call - that
/// is a normal control path, not an error.
pub trait Animation {
    /// Display name, used by diagnostics and the CLI.
    fn name(&self) -> &str;

    /// Frame rate the player adopts when none is configured.
    fn default_fps(&self) -> f64;

    /// Variant-specific setup: seed state, paint the palette, clear the
    /// frame.
    fn initialize(&mut self, ctx: &mut AnimationContext<'_>);

    /// Variant-specific teardown.
    fn finish(&mut self, _ctx: &mut AnimationContext<'_>) {}

    /// Compute one frame's worth of pixels into the context frame.
    fn next_frame(&mut self, ctx: &mut AnimationContext<'_>);

    /// First frame of the sequence. Defaults to `next_frame`.
    fn first_frame(&mut self, ctx: &mut AnimationContext<'_>) {
        self.next_frame(ctx);
    }

    /// Step backwards. Defaults to `next_frame` for animations without a
    /// meaningful reverse direction.
    fn previous_frame(&mut self, ctx: &mut AnimationContext<'_>) {
        self.next_frame(ctx);
    }

    /// Finish and initialize again in place, without reallocating the
    /// frame or palette.
    fn reinitialize(&mut self, ctx: &mut AnimationContext<'_>) {
        self.finish(ctx);
        self.initialize(ctx);
    }
}

/// Engine-owned shell around a boxed [`Animation`].
///
/// Owns the working frame and palette for the lifetime of one
/// initialize/finish span, the bounded name, the default frame rate and
/// the frame-sequence counter (0 before the first frame, set to 1 by
/// `first_frame`, +1 per `next_frame`, -1 per `previous_frame`).
pub struct AnimationHost {
    name: String,
    default_fps: f64,
    variant: Box<dyn Animation>,
    frame: Option<Frame>,
    palette: Option<Palette>,
    frame_sequence: i64,
    cols: usize,
    rows: usize,
    initialized: bool,
}

impl AnimationHost {
    /// Wrap a concrete animation. Name and default rate are captured here.
    pub fn new(variant: Box<dyn Animation>) -> Self {
        let name: String = variant
            .name()
            .chars()
            .take(ANIMATION_NAME_MAX_LEN)
            .collect();
        let default_fps = variant.default_fps();

        Self {
            name,
            default_fps,
            variant,
            frame: None,
            palette: None,
            frame_sequence: 0,
            cols: 0,
            rows: 0,
            initialized: false,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn default_fps(&self) -> f64 {
        self.default_fps
    }

    #[inline]
    pub fn frame_sequence(&self) -> i64 {
        self.frame_sequence
    }

    /// Grid dimensions the animation was initialized with.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The working frame, present between initialize and finish.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// The palette, present between initialize and finish.
    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// Allocate the frame and palette and run variant setup.
    ///
    /// A second initialize without an intervening finish is a no-op.
    pub fn initialize(&mut self, cols: usize, rows: usize, console: &mut Console) {
        if self.initialized {
            return;
        }

        self.cols = cols;
        self.rows = rows;
        self.frame_sequence = 0;

        let mut frame = Frame::new(cols, rows);
        let mut palette = Palette::new();

        let mut ctx = AnimationContext {
            frame: &mut frame,
            palette: &mut palette,
            console,
        };
        self.variant.initialize(&mut ctx);

        self.frame = Some(frame);
        self.palette = Some(palette);
        self.initialized = true;
        log::debug!("animation '{}' initialized at {}x{}", self.name, cols, rows);
    }

    /// Run variant teardown and release the frame and palette.
    ///
    /// A finish without a prior initialize is a no-op.
    pub fn finish(&mut self, console: &mut Console) {
        if !self.initialized {
            return;
        }

        if let (Some(frame), Some(palette)) = (self.frame.as_mut(), self.palette.as_mut()) {
            let mut ctx = AnimationContext {
                frame,
                palette,
                console,
            };
            self.variant.finish(&mut ctx);
        }

        self.frame = None;
        self.palette = None;
        self.initialized = false;
        log::debug!("animation '{}' finished", self.name);
    }

    /// Generate the first frame; sequence becomes 1.
    pub fn first_frame(&mut self, console: &mut Console) {
        let Some(mut ctx) = Self::context(&mut self.frame, &mut self.palette, console) else {
            return;
        };
        self.variant.first_frame(&mut ctx);
        self.frame_sequence = 1;
    }

    /// Advance one frame forward; sequence +1.
    pub fn next_frame(&mut self, console: &mut Console) {
        let Some(mut ctx) = Self::context(&mut self.frame, &mut self.palette, console) else {
            return;
        };
        self.variant.next_frame(&mut ctx);
        self.frame_sequence += 1;
    }

    /// Step one frame backward; sequence -1.
    pub fn previous_frame(&mut self, console: &mut Console) {
        let Some(mut ctx) = Self::context(&mut self.frame, &mut self.palette, console) else {
            return;
        };
        self.variant.previous_frame(&mut ctx);
        self.frame_sequence -= 1;
    }

    fn context<'a>(
        frame: &'a mut Option<Frame>,
        palette: &'a mut Option<Palette>,
        console: &'a mut Console,
    ) -> Option<AnimationContext<'a>> {
        match (frame.as_mut(), palette.as_mut()) {
            (Some(frame), Some(palette)) => Some(AnimationContext {
                frame,
                palette,
                console,
            }),
            _ => None,
        }
    }
}
