//! OnAir headless demo.
//!
//! Runs a field of spots with a broadcaster roaming between them. Arriving
//! at a spot starts the spot's live on its screen; once the live ends the
//! broadcaster picks another enabled spot at random. A comment supplier
//! comments on what happens, gated by world signals, and a deployer lays the
//! comments out on a scrolling canvas. Every event is logged.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --ticks 900 --seed 7
//! RUST_LOG=debug cargo run -- --config onair.ini --script comments.json
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info};

use onair::components::commentsupplier::{CommentSchema, CommentScript};
use onair::components::condition::{CmpOp, Condition};
use onair::components::live::{Live, LiveContext, LiveFactory, LiveKind};
use onair::components::mapposition::{MapPosition, Vector2};
use onair::components::mover::{Mover, MoverFlavor, MoverStatus};
use onair::components::spot::{Spot, SpotAssets, SpotStatus};
use onair::error::OnAirError;
use onair::events::comment::{CommentDeployedEvent, CommentFadedOutEvent};
use onair::events::live::{LiveEndedEvent, LiveStartedEvent};
use onair::events::mover::{MoverArrivedEvent, MoverDepartedEvent};
use onair::game::Game;
use onair::resources::gameconfig::GameConfig;
use onair::resources::worldsignals::WorldSignals;
use onair::systems::comment::{spawn_canvas, subscribe};
use onair::systems::field::{add_mover, add_spot, spawn_field};
use onair::systems::mover::depart_to;
use onair::systems::screen::spawn_screen;
use onair::systems::spot::{attach_screen, spawn_spot};

/// OnAir headless demo
#[derive(Parser)]
#[command(version, about = "Runs the OnAir simulation core without a renderer.")]
struct Cli {
    /// INI file with mover and comment tunables.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON comment rotation (replaces the built-in one).
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Seed for the destination picker.
    #[arg(long)]
    seed: Option<u64>,
}

/// Interview that stays on air for a fixed time.
#[derive(Default)]
struct Interview {
    seconds: f32,
}

impl Live for Interview {
    fn kind(&self) -> LiveKind {
        LiveKind("interview")
    }

    fn start(&mut self, ctx: &mut LiveContext<'_>) {
        ctx.world
            .spawn((MapPosition::new(0.0, 0.0), ChildOf(ctx.container)));
        info!("Interview at spot {} begins", ctx.spot);
    }

    fn update(&mut self, ctx: &mut LiveContext<'_>) {
        self.seconds += ctx.delta();
        if self.seconds >= 1.5 {
            ctx.end();
        }
    }
}

/// One-shot jingle: ends as soon as it starts.
#[derive(Default)]
struct Jingle;

impl Live for Jingle {
    fn kind(&self) -> LiveKind {
        LiveKind("jingle")
    }

    fn start(&mut self, ctx: &mut LiveContext<'_>) {
        info!("Jingle at spot {}", ctx.spot);
        ctx.end();
    }
}

fn builtin_comments() -> Vec<CommentSchema> {
    vec![
        CommentSchema::new("here we go").when(Condition::lacks_flag("on_air")),
        CommentSchema::new("ON AIR!").when(Condition::has_flag("on_air")),
        CommentSchema::new("another one?").when(Condition::integer("lives", CmpOp::Ge, 1)),
        CommentSchema::new("wwwww"),
    ]
}

fn register_observers(world: &mut World) {
    world.add_observer(|t: On<MoverDepartedEvent>| {
        info!("Mover {} departs to spot {}", t.event().mover, t.event().spot);
    });
    world.add_observer(|t: On<MoverArrivedEvent>| {
        let e = t.event();
        let note = if e.first_visit { " (first visit)" } else { "" };
        info!("Mover {} arrived at spot {}{}", e.mover, e.spot, note);
    });
    world.add_observer(
        |t: On<LiveStartedEvent>, mut signals: ResMut<WorldSignals>| {
            signals.set_flag("on_air");
            info!("`{}` started on screen {}", t.event().live, t.event().screen);
        },
    );
    world.add_observer(|t: On<LiveEndedEvent>, mut signals: ResMut<WorldSignals>| {
        signals.clear_flag("on_air");
        let total = signals.add_integer("lives", 1);
        info!("`{}` ended ({} so far)", t.event().live, total);
    });
    world.add_observer(|t: On<CommentDeployedEvent>| {
        info!("Comment {} placed in row {}", t.event().view, t.event().row);
    });
    world.add_observer(|t: On<CommentFadedOutEvent>| {
        info!("Comment `{}` faded out", t.event().text);
    });
    world.flush();
}

fn setup(game: &mut Game, schemas: Vec<CommentSchema>) -> Result<Entity, OnAirError> {
    let broadcaster = game.spawn_mover(MoverFlavor::Broadcaster, Some(Vector2::new(0.0, 0.0)))?;
    let supplier = game.spawn_comment_supplier(schemas)?;

    let world = game.world_mut();
    register_observers(world);

    let field = spawn_field(world, 640.0, 480.0)?;
    let screen = spawn_screen(world);
    let layout = [
        (Vector2::new(80.0, 80.0), LiveFactory::of::<Interview>()),
        (Vector2::new(560.0, 80.0), LiveFactory::of::<Jingle>()),
        (Vector2::new(320.0, 240.0), LiveFactory::of::<Interview>()),
        (Vector2::new(80.0, 400.0), LiveFactory::of::<Jingle>()),
        (Vector2::new(560.0, 400.0), LiveFactory::of::<Interview>()),
    ];
    for (pos, live) in layout {
        let assets = SpotAssets::new("locked.png", "unvisited.png", "disabled.png", "normal.png");
        let spot = spawn_spot(world, pos, live, assets);
        add_spot(world, field, spot)?;
        attach_screen(world, spot, screen)?;
    }
    add_mover(world, field, broadcaster)?;

    let canvas = spawn_canvas(world, 640.0, 96.0);
    let deployer = game.spawn_comment_deployer(Some(canvas))?;
    subscribe(game.world_mut(), supplier, deployer)?;
    Ok(broadcaster)
}

/// Send the mover to a random enabled spot other than the one it stays at.
fn roam(world: &mut World, rng: &mut fastrand::Rng, mover: Entity) -> Result<(), OnAirError> {
    let (field, staying) = match world.get::<Mover>(mover) {
        Some(m) if matches!(m.status(), MoverStatus::Idle | MoverStatus::Staying) => {
            (m.field(), m.staying())
        }
        _ => return Ok(()),
    };
    let Some(field) = field else {
        return Ok(());
    };
    let mut query = world.query::<(Entity, &Spot)>();
    let candidates: Vec<Entity> = query
        .iter(world)
        .filter(|(e, s)| {
            s.field() == Some(field) && s.status() == SpotStatus::Enabled && Some(*e) != staying
        })
        .map(|(e, _)| e)
        .collect();
    if candidates.is_empty() {
        return Ok(());
    }
    let spot = candidates[rng.usize(..candidates.len())];
    depart_to(world, mover, spot)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::new();
    if let Some(path) = &cli.config {
        config = GameConfig::with_path(path.clone());
        if let Err(e) = config.load_from_file() {
            error!("{}", e);
            std::process::exit(1);
        }
    }

    let schemas = match &cli.script {
        Some(path) => match CommentScript::load(path) {
            Ok(script) => script.into_schemas(),
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        },
        None => builtin_comments(),
    };

    let dt = (1.0 / config.comment_fps) as f32;
    let mut game = Game::new(config);
    let broadcaster = match setup(&mut game, schemas) {
        Ok(e) => e,
        Err(e) => {
            error!("Setup failed: {}", e);
            std::process::exit(1);
        }
    };

    let mut rng = match cli.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    info!("Running {} ticks ({:.3}s each)", cli.ticks, dt);
    for _ in 0..cli.ticks {
        if let Err(e) = roam(game.world_mut(), &mut rng, broadcaster) {
            error!("Roaming failed: {}", e);
        }
        game.tick(dt);
    }

    let signals = game.world().resource::<WorldSignals>();
    info!(
        "Done: {} live(s) broadcast",
        signals.get_integer("lives").unwrap_or(0)
    );
}
