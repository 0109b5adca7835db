use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stickerforge")]
#[command(author, version, about = "Turn photos and videos into stickers and GIFs")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a single local file, exactly as the bot would
    Convert {
        /// Source photo or video
        #[arg(required = true)]
        input: PathBuf,

        /// Menu option to run
        #[arg(short, long, value_enum)]
        mode: ModeArg,

        /// How the source arrived (defaults to photo for static, video otherwise)
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,

        /// Declared mime type, for `--kind document`
        #[arg(long)]
        mime: Option<String>,

        /// Declared duration in seconds
        #[arg(short, long)]
        duration: Option<f64>,

        /// Directory the artifact is written to
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Print the transcoder invocations without running them
        #[arg(long)]
        dry_run: bool,
    },

    /// Check that the transcoder is available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModeArg {
    /// 512x512 WebP sticker from a photo
    Static,
    /// 512x512 WebM video sticker, at most 3 seconds
    Animated,
    /// GIF animation, at most 10 seconds
    Gif,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum KindArg {
    Photo,
    Video,
    VideoNote,
    Document,
}
