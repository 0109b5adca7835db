//! Transcode plans: the exact ffmpeg invocations for each recipe.
//!
//! Building a plan is pure. It only decides argument vectors, file names and
//! timeouts; [`crate::PlanExecutor`] runs the result.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use stk_core::config::ConversionConfig;
use stk_core::{ConversionRecipe, MediaKind};

/// Edge of the square sticker canvas, in pixels.
pub const STICKER_EDGE: u32 = 512;
/// Radius of the opaque disc cut out of video-note stickers.
pub const CIRCLE_MASK_RADIUS: u32 = 230;
/// GIF sampling rate.
pub const GIF_FPS: u32 = 18;
/// GIF output width; height follows the aspect ratio.
pub const GIF_WIDTH: u32 = 480;
/// Longest GIF produced, in seconds.
pub const GIF_MAX_SECS: u32 = 10;
/// Longest video sticker produced, in seconds.
pub const LOOP_STICKER_MAX_SECS: u32 = 3;

const PALETTE_FILE: &str = "palette.png";

/// One transcoder invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeStep {
    /// Arguments passed to the transcoder (program name excluded).
    pub args: Vec<String>,
    pub timeout: Duration,
    /// Files this step reads.
    pub inputs: Vec<PathBuf>,
    /// File this step writes.
    pub output: PathBuf,
}

impl fmt::Display for TranscodeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.args.join(" "))
    }
}

/// Ordered sequence of steps; later steps may consume earlier outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodePlan {
    recipe: ConversionRecipe,
    workspace: PathBuf,
    steps: Vec<TranscodeStep>,
}

impl TranscodePlan {
    pub fn recipe(&self) -> ConversionRecipe {
        self.recipe
    }

    /// Directory every step runs in and writes to.
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    pub fn steps(&self) -> &[TranscodeStep] {
        &self.steps
    }

    /// Consume the plan, yielding its steps in execution order.
    pub fn into_steps(self) -> Vec<TranscodeStep> {
        self.steps
    }

    /// Output of the last step: the artifact.
    pub fn final_output(&self) -> Option<&Path> {
        self.steps.last().map(|s| s.output.as_path())
    }
}

/// Timeouts applied to planned steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTimeouts {
    /// Static sticker and GIF steps.
    pub default: Duration,
    /// Video sticker encode.
    pub loop_sticker: Duration,
}

impl Default for StepTimeouts {
    fn default() -> Self {
        Self::from(&ConversionConfig::default())
    }
}

impl From<&ConversionConfig> for StepTimeouts {
    fn from(config: &ConversionConfig) -> Self {
        Self {
            default: config.step_timeout(),
            loop_sticker: config.loop_sticker_timeout(),
        }
    }
}

/// Builds [`TranscodePlan`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanBuilder {
    timeouts: StepTimeouts,
}

impl PlanBuilder {
    pub fn new(timeouts: StepTimeouts) -> Self {
        Self { timeouts }
    }

    /// Plan the conversion of `input` (already inside `workspace`) with
    /// `recipe`. `source` decides shape-specific filters.
    pub fn build(
        &self,
        recipe: ConversionRecipe,
        source: MediaKind,
        input: &Path,
        workspace: &Path,
    ) -> TranscodePlan {
        let output = workspace.join(recipe.artifact_file_name());
        let steps = match recipe {
            ConversionRecipe::StaticSticker => vec![self.static_sticker(input, output)],
            ConversionRecipe::AnimatedGif => {
                let palette = workspace.join(PALETTE_FILE);
                vec![
                    self.gif_palette(input, palette.clone()),
                    self.gif_render(input, &palette, output),
                ]
            }
            ConversionRecipe::LoopingVideoSticker => {
                vec![self.loop_sticker(input, output, source.is_circular())]
            }
        };

        TranscodePlan {
            recipe,
            workspace: workspace.to_path_buf(),
            steps,
        }
    }

    fn static_sticker(&self, input: &Path, output: PathBuf) -> TranscodeStep {
        let mut args = input_args(input);
        args.extend(strs(["-vf", &square_crop_filter(), "-frames:v", "1"]));
        args.push(path_arg(&output));

        TranscodeStep {
            args,
            timeout: self.timeouts.default,
            inputs: vec![input.to_path_buf()],
            output,
        }
    }

    fn gif_palette(&self, input: &Path, palette: PathBuf) -> TranscodeStep {
        let mut args = input_args(input);
        args.extend(strs(["-vf", &format!("{},palettegen", gif_scale_filter())]));
        args.push(path_arg(&palette));

        TranscodeStep {
            args,
            timeout: self.timeouts.default,
            inputs: vec![input.to_path_buf()],
            output: palette,
        }
    }

    fn gif_render(&self, input: &Path, palette: &Path, output: PathBuf) -> TranscodeStep {
        let mut args = input_args(input);
        args.extend(strs(["-i", &path_arg(palette)]));
        args.extend(strs([
            "-filter_complex",
            &format!("{}[x];[x][1:v]paletteuse", gif_scale_filter()),
            "-t",
            &GIF_MAX_SECS.to_string(),
            "-loop",
            "0",
        ]));
        args.push(path_arg(&output));

        TranscodeStep {
            args,
            timeout: self.timeouts.default,
            inputs: vec![input.to_path_buf(), palette.to_path_buf()],
            output,
        }
    }

    fn loop_sticker(&self, input: &Path, output: PathBuf, circular: bool) -> TranscodeStep {
        let mut args = input_args(input);
        args.extend(strs([
            "-t",
            &LOOP_STICKER_MAX_SECS.to_string(),
            "-c:v",
            "libvpx-vp9",
            "-b:v",
            "500k",
            "-crf",
            "30",
            "-an",
            "-loop",
            "0",
        ]));

        if circular {
            let filter = format!("{},{}", square_crop_filter(), circle_mask_filter());
            args.extend(strs(["-vf", &filter, "-pix_fmt", "yuva420p"]));
        } else {
            args.extend(strs(["-vf", &square_crop_filter()]));
        }
        args.push(path_arg(&output));

        TranscodeStep {
            args,
            timeout: self.timeouts.loop_sticker,
            inputs: vec![input.to_path_buf()],
            output,
        }
    }
}

fn input_args(input: &Path) -> Vec<String> {
    strs(["-y", "-i", &path_arg(input)])
}

fn strs<const N: usize>(items: [&str; N]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// Scale so the shorter side reaches the canvas edge, then center-crop.
fn square_crop_filter() -> String {
    format!(
        "scale={e}:{e}:force_original_aspect_ratio=increase,crop={e}:{e}",
        e = STICKER_EDGE
    )
}

fn gif_scale_filter() -> String {
    format!("fps={GIF_FPS},scale={GIF_WIDTH}:-1:flags=lanczos")
}

/// Opaque inside the disc centred on the canvas, transparent outside.
fn circle_mask_filter() -> String {
    let c = STICKER_EDGE / 2;
    format!(
        "format=rgba,geq=r='r(X,Y)':g='g(X,Y)':b='b(X,Y)':a='if(gt(hypot(X-{c},Y-{c}),{r}),0,255)'",
        r = CIRCLE_MASK_RADIUS
    )
}
