//! Comment pipeline integration tests: supplier scheduling through the tick
//! schedule, row placement, scrolling, retirement and container changes.

use std::sync::{Arc, Mutex};

use bevy_ecs::prelude::*;

use onair::components::commentdeployer::{CommentDeployer, CommentView};
use onair::components::commentsupplier::{CommentSchema, CommentScript, CommentSupplier};
use onair::components::condition::Condition;
use onair::components::mapposition::MapPosition;
use onair::error::OnAirError;
use onair::events::comment::{CommentDeployedEvent, CommentFadedOutEvent, CommentSuppliedEvent};
use onair::game::Game;
use onair::resources::gameconfig::GameConfig;
use onair::resources::textmetrics::TextMetrics;
use onair::resources::worldsignals::WorldSignals;
use onair::resources::worldtime::WorldTime;
use onair::systems::comment::{
    comment_deploy_system, comment_supply_system, deploy, set_container, spawn_canvas,
    spawn_comment_deployer, spawn_comment_supplier, subscribe,
};
use onair::systems::time::update_world_time;

const EPSILON: f32 = 1e-6;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world() -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(WorldSignals::default());
    world.insert_resource(TextMetrics { glyph_width: 10.0 });
    world
}

fn tick(world: &mut World) {
    update_world_time(world, 1.0 / 50.0);
    let mut schedule = Schedule::default();
    schedule.add_systems((comment_supply_system, comment_deploy_system).chain());
    schedule.run(world);
}

fn views(world: &World, deployer: Entity) -> Vec<Entity> {
    world.get::<CommentDeployer>(deployer).unwrap().views().to_vec()
}

fn row_of(world: &World, view: Entity) -> u32 {
    world.get::<CommentView>(view).unwrap().row
}

fn x_of(world: &World, view: Entity) -> f32 {
    world.get::<MapPosition>(view).unwrap().pos.x
}

// ==================== PLACEMENT TESTS ====================

#[test]
fn first_comment_lands_in_row_zero_at_the_right_edge() {
    let mut world = make_world();
    let canvas = spawn_canvas(&mut world, 320.0, 96.0);
    let deployer = spawn_comment_deployer(&mut world, 4.0, 32.0, Some(canvas)).unwrap();

    deploy(&mut world, deployer, "hello").unwrap();
    tick(&mut world);

    let placed = views(&world, deployer);
    assert_eq!(placed.len(), 1);
    assert_eq!(row_of(&world, placed[0]), 0);
    assert!(approx_eq(x_of(&world, placed[0]), 320.0));
    assert!(approx_eq(
        world.get::<MapPosition>(placed[0]).unwrap().pos.y,
        0.0
    ));
    assert_eq!(world.get::<CommentView>(placed[0]).unwrap().width, 50.0);
    assert_eq!(world.get::<ChildOf>(placed[0]).unwrap().parent(), canvas);

    tick(&mut world);
    assert!(approx_eq(x_of(&world, placed[0]), 316.0));
}

#[test]
fn later_comment_takes_the_next_free_row() {
    let mut world = make_world();
    let canvas = spawn_canvas(&mut world, 320.0, 96.0);
    let deployer = spawn_comment_deployer(&mut world, 4.0, 32.0, Some(canvas)).unwrap();

    let rows = Arc::new(Mutex::new(Vec::new()));
    let r = rows.clone();
    world.add_observer(move |t: On<CommentDeployedEvent>| r.lock().unwrap().push(t.event().row));
    world.flush();

    for text in ["a", "b", "c"] {
        deploy(&mut world, deployer, text).unwrap();
        tick(&mut world);
    }
    assert_eq!(*rows.lock().unwrap(), vec![0, 1, 2]);
    let placed = views(&world, deployer);
    assert!(approx_eq(
        world.get::<MapPosition>(placed[2]).unwrap().pos.y,
        64.0
    ));
}

#[test]
fn row_frees_up_once_its_comment_clears_the_edge() {
    let mut world = make_world();
    let canvas = spawn_canvas(&mut world, 100.0, 32.0);
    // 10px wide comment scrolling 6px per tick clears the edge after two ticks
    let deployer = spawn_comment_deployer(&mut world, 6.0, 32.0, Some(canvas)).unwrap();

    deploy(&mut world, deployer, "a").unwrap();
    tick(&mut world);
    tick(&mut world);
    tick(&mut world);
    deploy(&mut world, deployer, "b").unwrap();
    tick(&mut world);

    let placed = views(&world, deployer);
    assert_eq!(row_of(&world, placed[1]), 0);
}

#[test]
fn full_rows_overflow_past_the_highest_used_row() {
    let mut world = make_world();
    let canvas = spawn_canvas(&mut world, 100.0, 32.0);
    let deployer = spawn_comment_deployer(&mut world, 1.0, 32.0, Some(canvas)).unwrap();

    deploy(&mut world, deployer, "first").unwrap();
    tick(&mut world);
    deploy(&mut world, deployer, "second").unwrap();
    tick(&mut world);
    deploy(&mut world, deployer, "third").unwrap();
    tick(&mut world);

    let rows: Vec<u32> = views(&world, deployer)
        .iter()
        .map(|v| row_of(&world, *v))
        .collect();
    assert_eq!(rows, vec![0, 1, 2]);
    let last = views(&world, deployer)[2];
    assert!(approx_eq(
        world.get::<MapPosition>(last).unwrap().pos.y,
        64.0
    ));
}

#[test]
fn same_tick_emissions_stack_in_row_zero() {
    let mut world = make_world();
    // exactly one row fits
    let canvas = spawn_canvas(&mut world, 200.0, 24.0);
    let deployer = spawn_comment_deployer(&mut world, 2.0, 24.0, Some(canvas)).unwrap();
    // 10ms slots at 20ms per tick: two emissions per tick
    let supplier = spawn_comment_supplier(
        &mut world,
        vec![CommentSchema::new("one"), CommentSchema::new("two")],
        10.0,
        50.0,
    )
    .unwrap();
    subscribe(&mut world, supplier, deployer).unwrap();

    tick(&mut world);
    assert!(views(&world, deployer).is_empty());
    tick(&mut world);

    let placed = views(&world, deployer);
    assert_eq!(placed.len(), 2);
    assert_eq!(row_of(&world, placed[0]), 0);
    assert_eq!(row_of(&world, placed[1]), 0);
    assert!(approx_eq(x_of(&world, placed[0]), 200.0));
    assert!(approx_eq(x_of(&world, placed[1]), 200.0));
}

#[test]
fn same_tick_burst_spreads_over_free_rows() {
    let mut world = make_world();
    // three rows fit
    let canvas = spawn_canvas(&mut world, 200.0, 96.0);
    let deployer = spawn_comment_deployer(&mut world, 2.0, 32.0, Some(canvas)).unwrap();

    for text in ["one", "two", "three"] {
        deploy(&mut world, deployer, text).unwrap();
    }
    tick(&mut world);

    let placed = views(&world, deployer);
    let rows: Vec<u32> = placed.iter().map(|v| row_of(&world, *v)).collect();
    assert_eq!(rows, vec![0, 1, 2]);
    for view in &placed {
        assert!(approx_eq(x_of(&world, *view), 200.0));
    }

    // a fourth one in a later tick overflows below the burst
    deploy(&mut world, deployer, "four").unwrap();
    tick(&mut world);
    let last = *views(&world, deployer).last().unwrap();
    assert_eq!(row_of(&world, last), 3);
}

// ==================== RETIREMENT TESTS ====================

#[test]
fn comment_fades_out_after_leaving_the_left_edge() {
    let mut world = make_world();
    let canvas = spawn_canvas(&mut world, 10.0, 32.0);
    let deployer = spawn_comment_deployer(&mut world, 5.0, 32.0, Some(canvas)).unwrap();

    let faded = Arc::new(Mutex::new(Vec::new()));
    let f = faded.clone();
    world.add_observer(move |t: On<CommentFadedOutEvent>| {
        f.lock().unwrap().push(t.event().text.clone())
    });
    world.flush();

    // 20px wide, placed at x = 10, gone once x < -20
    deploy(&mut world, deployer, "ab").unwrap();
    tick(&mut world);
    let view = views(&world, deployer)[0];
    for _ in 0..6 {
        tick(&mut world);
    }
    assert!(approx_eq(x_of(&world, view), -20.0));
    assert!(faded.lock().unwrap().is_empty());

    tick(&mut world);
    assert!(views(&world, deployer).is_empty());
    assert!(world.get_entity(view).is_err());
    assert_eq!(*faded.lock().unwrap(), vec!["ab".to_string()]);
}

// ==================== CONTAINER TESTS ====================

#[test]
fn set_container_reparents_views_in_place() {
    let mut world = make_world();
    let first = spawn_canvas(&mut world, 100.0, 64.0);
    let second = spawn_canvas(&mut world, 400.0, 64.0);
    let deployer = spawn_comment_deployer(&mut world, 5.0, 32.0, Some(first)).unwrap();

    deploy(&mut world, deployer, "a").unwrap();
    tick(&mut world);
    deploy(&mut world, deployer, "b").unwrap();
    tick(&mut world);
    let placed = views(&world, deployer);

    set_container(&mut world, deployer, None).unwrap();
    assert!(world.get::<ChildOf>(placed[0]).is_none());
    assert!(approx_eq(x_of(&world, placed[0]), 95.0));

    set_container(&mut world, deployer, Some(second)).unwrap();
    for view in &placed {
        assert_eq!(world.get::<ChildOf>(*view).unwrap().parent(), second);
    }
    assert_eq!(row_of(&world, placed[1]), 1);
    assert!(approx_eq(x_of(&world, placed[1]), 100.0));
}

#[test]
fn set_container_rejects_non_canvas() {
    let mut world = make_world();
    let deployer = spawn_comment_deployer(&mut world, 5.0, 32.0, None).unwrap();
    let stray = world.spawn_empty().id();
    assert!(matches!(
        set_container(&mut world, deployer, Some(stray)),
        Err(OnAirError::NotACanvas(_))
    ));
    assert_eq!(world.get::<CommentDeployer>(deployer).unwrap().container(), None);
}

#[test]
fn comments_without_container_are_dropped() {
    let mut world = make_world();
    let deployer = spawn_comment_deployer(&mut world, 5.0, 32.0, None).unwrap();
    deploy(&mut world, deployer, "lost").unwrap();
    tick(&mut world);
    assert!(views(&world, deployer).is_empty());
    assert!(world.get::<CommentDeployer>(deployer).unwrap().pending().is_empty());
}

// ==================== SUPPLIER TESTS ====================

#[test]
fn supplier_follows_world_signals() {
    let mut world = make_world();
    let canvas = spawn_canvas(&mut world, 320.0, 320.0);
    let deployer = spawn_comment_deployer(&mut world, 4.0, 32.0, Some(canvas)).unwrap();
    let supplier = spawn_comment_supplier(
        &mut world,
        vec![CommentSchema::new("on air!").when(Condition::has_flag("on_air"))],
        20.0,
        50.0,
    )
    .unwrap();
    subscribe(&mut world, supplier, deployer).unwrap();
    subscribe(&mut world, supplier, deployer).unwrap();
    assert_eq!(world.get::<CommentSupplier>(supplier).unwrap().deployers().len(), 1);

    let supplied = Arc::new(Mutex::new(Vec::new()));
    let s = supplied.clone();
    world.add_observer(move |t: On<CommentSuppliedEvent>| {
        s.lock().unwrap().push(t.event().text.clone())
    });
    world.flush();

    tick(&mut world);
    tick(&mut world);
    assert!(supplied.lock().unwrap().is_empty());

    world.resource_mut::<WorldSignals>().set_flag("on_air");
    tick(&mut world);
    assert_eq!(*supplied.lock().unwrap(), vec!["on air!".to_string()]);
    assert_eq!(views(&world, deployer).len(), 1);
}

#[test]
fn subscribe_checks_both_ends() {
    let mut world = make_world();
    let deployer = spawn_comment_deployer(&mut world, 4.0, 32.0, None).unwrap();
    let supplier = spawn_comment_supplier(&mut world, vec![], 20.0, 50.0).unwrap();
    assert!(matches!(
        subscribe(&mut world, deployer, deployer),
        Err(OnAirError::NotASupplier(_))
    ));
    assert!(matches!(
        subscribe(&mut world, supplier, supplier),
        Err(OnAirError::NotADeployer(_))
    ));
}

// ==================== GAME TESTS ====================

#[test]
fn game_runs_script_driven_comments() {
    let mut config = GameConfig::new();
    config
        .load_from_str("[comments]\ninterval_ms = 40\nfps = 50\nscroll_speed = 2\nrow_spacing = 20\nglyph_width = 8\n")
        .unwrap();
    let mut game = Game::new(config);

    let script = CommentScript::from_json(
        r#"{"comments":[{"text":"hi"},{"text":"hurry","when":[{"HasFlag":{"key":"late"}}]}]}"#,
    )
    .unwrap();
    let supplier = game.spawn_comment_supplier(script.into_schemas()).unwrap();
    let canvas = spawn_canvas(game.world_mut(), 160.0, 60.0);
    let deployer = game.spawn_comment_deployer(Some(canvas)).unwrap();
    subscribe(game.world_mut(), supplier, deployer).unwrap();

    // 20ms per tick, a slot every 40ms: the first slot opens on tick 3
    for _ in 0..3 {
        game.tick(1.0 / 50.0);
    }
    let placed = views(game.world(), deployer);
    assert_eq!(placed.len(), 1);
    assert_eq!(game.world().get::<CommentView>(placed[0]).unwrap().text, "hi");
    assert_eq!(game.world().get::<CommentView>(placed[0]).unwrap().width, 16.0);
    assert_eq!(game.world().resource::<WorldTime>().frame_count, 3);
}
