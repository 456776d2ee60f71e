use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use grid_snake::assets::{AssetBundle, AssetConfig, AssetKind, DEFAULT_CONFIG_FILE};
use grid_snake::game::{GameConfig, GameEngine};
use grid_snake::highscore::{FileHighscoreStore, HighscoreStore, MemoryHighscoreStore};
use grid_snake::logging::init_logger;
use grid_snake::modes::{HumanMode, LoopTiming, TexturesMode};
use grid_snake::render::Renderer;
use grid_snake::session::Session;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake arcade game in the terminal")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    play: PlayArgs,

    /// JSON file mapping asset names to image paths
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    asset_config: PathBuf,

    /// File receiving log output
    #[arg(long, global = true, default_value = "grid_snake.log")]
    log_file: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Play snake with keyboard controls (default)
    Play(PlayArgs),
    /// Show or change texture paths
    Textures(TexturesArgs),
}

#[derive(Args, Clone)]
struct PlayArgs {
    /// Side length of the square play field
    #[arg(long, default_value = "700")]
    field_extent: i32,

    /// Side length of one grid cell
    #[arg(long, default_value = "50")]
    cell_size: i32,

    /// Engine ticks per snake step
    #[arg(long, default_value = "10")]
    speed: u32,

    /// Score that wins the round
    #[arg(long, default_value = "100")]
    win_score: u32,

    /// Never place apples on the snake
    #[arg(long)]
    apple_avoids_snake: bool,

    /// Engine ticks per second
    #[arg(long, default_value = "60")]
    tick_rate: u32,

    /// Frames drawn per second
    #[arg(long, default_value = "30")]
    render_fps: u32,

    /// Text file holding the highscore
    #[arg(long, default_value = "highscore.txt")]
    highscore_file: PathBuf,

    /// Seed for reproducible rounds
    #[arg(long)]
    seed: Option<u64>,

    /// Show the stored highscore but never write it back
    #[arg(long)]
    practice: bool,
}

#[derive(Args)]
struct TexturesArgs {
    /// New background image
    #[arg(long)]
    background: Option<PathBuf>,

    /// New snake head image
    #[arg(long)]
    snake_head: Option<PathBuf>,

    /// New snake body image
    #[arg(long)]
    snake_body: Option<PathBuf>,

    /// New apple image
    #[arg(long)]
    apple: Option<PathBuf>,
}

impl TexturesArgs {
    fn updates(self) -> Vec<(AssetKind, PathBuf)> {
        [
            (AssetKind::Background, self.background),
            (AssetKind::SnakeHead, self.snake_head),
            (AssetKind::SnakeBody, self.snake_body),
            (AssetKind::Apple, self.apple),
        ]
        .into_iter()
        .filter_map(|(kind, path)| path.map(|path| (kind, path)))
        .collect()
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(Some(&cli.log_file))?;

    match cli.command {
        Some(Command::Textures(args)) => {
            let mode = TexturesMode::new(cli.asset_config, args.updates());
            mode.run(&mut std::io::stdout().lock())?;
        }
        Some(Command::Play(args)) => play(args, cli.asset_config).await?,
        None => play(cli.play, cli.asset_config).await?,
    }

    Ok(())
}

async fn play(args: PlayArgs, asset_config: PathBuf) -> Result<()> {
    let config = GameConfig {
        field_extent: args.field_extent,
        cell_size: args.cell_size,
        speed: args.speed,
        win_score: args.win_score,
        apple_avoids_snake: args.apple_avoids_snake,
    };
    let timing = LoopTiming {
        tick_rate: args.tick_rate,
        render_fps: args.render_fps,
    };

    let engine = match args.seed {
        Some(seed) => GameEngine::with_seed(config.clone(), seed)?,
        None => GameEngine::new(config.clone())?,
    };

    // Assets are resolved once, before the terminal is taken over
    let assets = AssetBundle::load(
        &AssetConfig::load(&asset_config),
        config.cells_per_side() as u32,
    );
    let renderer = Renderer::new(assets, &config);
    let file_store = FileHighscoreStore::new(args.highscore_file);

    if args.practice {
        log::info!("practice mode, {:?} stays untouched", file_store.path());
        let store = MemoryHighscoreStore::new(file_store.load());
        run_session(Session::new(engine, store), renderer, timing).await
    } else {
        run_session(Session::new(engine, file_store), renderer, timing).await
    }
}

async fn run_session<S: HighscoreStore>(
    session: Session<S>,
    renderer: Renderer,
    timing: LoopTiming,
) -> Result<()> {
    let mut human_mode = HumanMode::new(session, renderer, timing);
    human_mode.run().await
}
