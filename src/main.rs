mod cli;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, KindArg, ModeArg};
use stickerforge::conversation::{render_outcome, MenuSelection};
use stickerforge::pipeline::{classify, select, InboundMedia};
use stickerforge::{LocalTransport, StickerBot};
use stk_av::{PlanBuilder, StepTimeouts, ToolRegistry};
use stk_core::config::Config;
use stk_core::{JobOutcome, SessionId};

/// Session id used for conversions started from the command line.
const LOCAL_SESSION: SessionId = SessionId::new(0);

struct ConvertArgs {
    input: PathBuf,
    mode: ModeArg,
    kind: Option<KindArg>,
    mime: Option<String>,
    duration: Option<f64>,
    output: PathBuf,
    dry_run: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "stickerforge=debug,stk_av=debug,stk_core=debug".to_string()
        } else {
            "stickerforge=info,stk_av=info,stk_core=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Convert {
            input,
            mode,
            kind,
            mime,
            duration,
            output,
            dry_run,
        } => convert_file(
            ConvertArgs {
                input,
                mode,
                kind,
                mime,
                duration,
                output,
                dry_run,
            },
            cli.config.as_deref(),
        ),
        Commands::CheckTools => check_tools(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("stickerforge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn selection_for(mode: ModeArg) -> MenuSelection {
    match mode {
        ModeArg::Static => MenuSelection::StaticSticker,
        ModeArg::Animated => MenuSelection::AnimatedSticker,
        ModeArg::Gif => MenuSelection::Gif,
    }
}

fn inbound_media(args: &ConvertArgs) -> Result<InboundMedia> {
    let duration = args
        .duration
        .map(Duration::try_from_secs_f64)
        .transpose()
        .map_err(|e| anyhow::anyhow!("invalid --duration: {e}"))?;

    let kind = args.kind.unwrap_or(match args.mode {
        ModeArg::Static => KindArg::Photo,
        ModeArg::Animated | ModeArg::Gif => KindArg::Video,
    });

    let handle = args.input.to_string_lossy().to_string();
    let media = match kind {
        KindArg::Photo => InboundMedia::photo(handle),
        KindArg::Video => InboundMedia::video(handle, duration),
        KindArg::VideoNote => InboundMedia::video_note(handle, duration),
        KindArg::Document => {
            let mut media = InboundMedia::document(handle, args.mime.as_deref());
            if let Some(doc) = media.document.as_mut() {
                doc.duration = duration;
            }
            media
        }
    };
    Ok(media)
}

fn convert_file(args: ConvertArgs, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load_or_default(config_path);

    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {:?}", args.input);
    }

    let selection = selection_for(args.mode);
    let media = inbound_media(&args)?;

    if args.dry_run {
        return print_plan(&config, selection, &media);
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_conversion(&config, selection, &media, &args.output))
}

async fn run_conversion(
    config: &Config,
    selection: MenuSelection,
    media: &InboundMedia,
    output: &Path,
) -> Result<()> {
    let transport = Arc::new(LocalTransport::new(output));
    let bot = StickerBot::from_config(config, transport)?;

    println!("{}", bot.on_menu_selection(LOCAL_SESSION, selection).text);
    let outcome = bot.handle_media(LOCAL_SESSION, media).await?;
    println!("{}", render_outcome(&outcome).text);

    match outcome {
        JobOutcome::Success { artifact, .. } => {
            let path = bot.transport().artifact_path(&artifact.filename);
            println!("Output: {} ({} bytes)", path.display(), artifact.len());
            Ok(())
        }
        JobOutcome::Failure { kind, detail, .. } => {
            anyhow::bail!("conversion failed ({kind}): {detail}")
        }
    }
}

fn print_plan(config: &Config, selection: MenuSelection, media: &InboundMedia) -> Result<()> {
    let submission = classify(media)?;
    let recipe = select(selection.pending_mode(), &submission)?;

    let workspace = PathBuf::from("<workspace>");
    let input = workspace.join(submission.kind().source_file_name());
    let plan = PlanBuilder::new(StepTimeouts::from(&config.conversion)).build(
        recipe,
        submission.kind(),
        &input,
        &workspace,
    );

    println!("Recipe: {recipe}");
    println!("Steps: {}", plan.steps().len());
    for (i, step) in plan.steps().iter().enumerate() {
        println!("  {}. ffmpeg {} (timeout {:?})", i + 1, step, step.timeout);
    }
    println!("\n[DRY RUN] Nothing was executed");

    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    println!("Checking external tools...\n");

    let config = Config::load_or_default(config_path);
    let tools = ToolRegistry::discover(&config.tools).check_all();
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("ffmpeg is missing. Install it to enable conversions.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = Config::load(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    match config.tools.ffmpeg_path {
        Some(ref p) => println!("  ffmpeg: {}", p.display()),
        None => println!("  ffmpeg: (search PATH)"),
    }
    match config.conversion.workspace_root {
        Some(ref p) => println!("  Workspace root: {}", p.display()),
        None => println!("  Workspace root: (system temp dir)"),
    }
    println!("  Step timeout: {}s", config.conversion.step_timeout_secs);
    println!(
        "  Video sticker timeout: {}s",
        config.conversion.loop_sticker_timeout_secs
    );

    for warning in config.validate() {
        println!("  ⚠ {warning}");
    }

    Ok(())
}
