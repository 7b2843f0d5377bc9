//! Comment scheduling and placement.
//!
//! - [`comment_supply_system`] runs every supplier once per tick against a
//!   snapshot of [`WorldSignals`] and queues the emitted texts on each
//!   subscribed deployer.
//! - [`comment_deploy_system`] scrolls every live view left by the deployer
//!   speed, retires views that left the canvas, then places the queued texts.
//!
//! Texts queued during one tick are placed in order, each one seeing the
//! views placed before it, so a burst fills the free rows top to bottom.

use bevy_ecs::prelude::*;
use log::{debug, error, warn};

use crate::components::commentdeployer::{
    Canvas, CommentDeployer, CommentView, RowOccupancy, choose_row_in_pass,
};
use crate::components::commentsupplier::{CommentSchema, CommentSupplier};
use crate::components::mapposition::MapPosition;
use crate::error::OnAirError;
use crate::events::comment::{CommentDeployedEvent, CommentFadedOutEvent, CommentSuppliedEvent};
use crate::resources::textmetrics::TextMetrics;
use crate::resources::worldsignals::WorldSignals;

pub fn spawn_canvas(world: &mut World, width: f32, height: f32) -> Entity {
    world.spawn(Canvas::new(width, height)).id()
}

pub fn spawn_comment_supplier(
    world: &mut World,
    schemas: Vec<CommentSchema>,
    interval_ms: f64,
    fps: f64,
) -> Result<Entity, OnAirError> {
    let supplier = CommentSupplier::new(schemas, interval_ms, fps)?;
    Ok(world.spawn(supplier).id())
}

/// Spawn a deployer, optionally already bound to a canvas.
pub fn spawn_comment_deployer(
    world: &mut World,
    speed: f32,
    row_spacing: f32,
    container: Option<Entity>,
) -> Result<Entity, OnAirError> {
    if let Some(canvas) = container {
        canvas_of(world, canvas)?;
    }
    let mut deployer = CommentDeployer::new(speed, row_spacing)?;
    deployer.container = container;
    Ok(world.spawn(deployer).id())
}

/// Route the comments of `supplier` to `deployer`. Repeats are ignored.
pub fn subscribe(world: &mut World, supplier: Entity, deployer: Entity) -> Result<(), OnAirError> {
    if world.get::<CommentDeployer>(deployer).is_none() {
        return Err(OnAirError::NotADeployer(deployer));
    }
    let mut s = world
        .get_mut::<CommentSupplier>(supplier)
        .ok_or(OnAirError::NotASupplier(supplier))?;
    if !s.deployers.contains(&deployer) {
        s.deployers.push(deployer);
    }
    Ok(())
}

/// Queue `text` for placement on the next deploy pass.
pub fn deploy(world: &mut World, deployer: Entity, text: impl Into<String>) -> Result<(), OnAirError> {
    world
        .get_mut::<CommentDeployer>(deployer)
        .ok_or(OnAirError::NotADeployer(deployer))?
        .pending
        .push(text.into());
    Ok(())
}

/// Attach the deployer to another canvas, or detach it with `None`.
///
/// Live views follow the deployer and keep their row and position.
pub fn set_container(
    world: &mut World,
    deployer: Entity,
    container: Option<Entity>,
) -> Result<(), OnAirError> {
    if let Some(canvas) = container {
        canvas_of(world, canvas)?;
    }
    let views = {
        let mut d = world
            .get_mut::<CommentDeployer>(deployer)
            .ok_or(OnAirError::NotADeployer(deployer))?;
        if d.container == container {
            return Ok(());
        }
        d.container = container;
        d.views.clone()
    };
    for view in views {
        let Ok(mut e) = world.get_entity_mut(view) else {
            continue;
        };
        match container {
            Some(canvas) => {
                e.insert(ChildOf(canvas));
            }
            None => {
                e.remove::<ChildOf>();
            }
        }
    }
    debug!("Comment deployer {} container -> {:?}", deployer, container);
    Ok(())
}

fn canvas_of(world: &World, canvas: Entity) -> Result<Canvas, OnAirError> {
    world
        .get::<Canvas>(canvas)
        .copied()
        .ok_or(OnAirError::NotACanvas(canvas))
}

/// Run every supplier for one tick.
pub fn comment_supply_system(world: &mut World) {
    let signals = world
        .get_resource::<WorldSignals>()
        .cloned()
        .unwrap_or_default();

    let mut query = world.query::<(Entity, &mut CommentSupplier)>();
    let mut emitted: Vec<(Entity, Vec<Entity>, Vec<String>)> = Vec::new();
    for (entity, mut supplier) in query.iter_mut(world) {
        let texts = supplier.fetch(&signals);
        if !texts.is_empty() {
            emitted.push((entity, supplier.deployers.clone(), texts));
        }
    }

    for (supplier, deployers, texts) in emitted {
        for text in texts {
            for &deployer in &deployers {
                if let Err(err) = deploy(world, deployer, text.clone()) {
                    warn!("Comment supplier {}: {}", supplier, err);
                }
            }
            world.trigger(CommentSuppliedEvent { supplier, text });
        }
    }
}

/// Scroll, retire and place comment views for every deployer.
pub fn comment_deploy_system(world: &mut World) {
    let metrics = world
        .get_resource::<TextMetrics>()
        .copied()
        .unwrap_or_default();
    let mut query = world.query_filtered::<Entity, With<CommentDeployer>>();
    let deployers: Vec<Entity> = query.iter(world).collect();

    for deployer in deployers {
        if let Err(err) = scroll_views(world, deployer) {
            error!("Comment deployer {}: {}", deployer, err);
            continue;
        }
        if let Err(err) = place_pending(world, deployer, metrics) {
            error!("Comment deployer {}: {}", deployer, err);
        }
    }
}

fn scroll_views(world: &mut World, deployer: Entity) -> Result<(), OnAirError> {
    let (speed, views) = {
        let d = world
            .get::<CommentDeployer>(deployer)
            .ok_or(OnAirError::NotADeployer(deployer))?;
        (d.speed(), d.views.clone())
    };

    let mut kept = Vec::with_capacity(views.len());
    let mut faded = Vec::new();
    for view in views {
        let width = match world.get::<CommentView>(view) {
            Some(v) => v.width,
            // despawned by someone else
            None => continue,
        };
        let Some(mut pos) = world.get_mut::<MapPosition>(view) else {
            continue;
        };
        pos.pos.x -= speed;
        if pos.pos.x + width < 0.0 {
            faded.push(view);
        } else {
            kept.push(view);
        }
    }

    if let Some(mut d) = world.get_mut::<CommentDeployer>(deployer) {
        d.views = kept;
    }
    for view in faded {
        let text = world
            .get::<CommentView>(view)
            .map(|v| v.text.clone())
            .unwrap_or_default();
        world.despawn(view);
        world.trigger(CommentFadedOutEvent { deployer, text });
    }
    Ok(())
}

fn place_pending(
    world: &mut World,
    deployer: Entity,
    metrics: TextMetrics,
) -> Result<(), OnAirError> {
    let (pending, container, row_spacing, views) = {
        let mut d = world
            .get_mut::<CommentDeployer>(deployer)
            .ok_or(OnAirError::NotADeployer(deployer))?;
        if d.pending.is_empty() {
            return Ok(());
        }
        let pending = std::mem::take(&mut d.pending);
        (pending, d.container, d.row_spacing(), d.views.clone())
    };

    let Some(container) = container else {
        warn!(
            "Comment deployer {} has no container, dropping {} comment(s)",
            deployer,
            pending.len()
        );
        return Err(OnAirError::NoContainer(deployer));
    };
    let canvas = canvas_of(world, container)?;
    let capacity = world
        .get::<CommentDeployer>(deployer)
        .map_or(0, |d| d.row_capacity(canvas));

    let snapshot: Vec<RowOccupancy> = views
        .iter()
        .filter_map(|&view| {
            let v = world.get::<CommentView>(view)?;
            let pos = world.get::<MapPosition>(view)?;
            Some((v.row, pos.pos.x + v.width))
        })
        .collect();

    let mut placed: Vec<RowOccupancy> = Vec::with_capacity(pending.len());
    for text in pending {
        let row = choose_row_in_pass(&snapshot, &placed, canvas.width, capacity);
        let width = metrics.measure(&text);
        placed.push((row, canvas.width + width));
        let view = world
            .spawn((
                CommentView {
                    deployer,
                    text,
                    row,
                    width,
                },
                MapPosition::new(canvas.width, row as f32 * row_spacing),
                ChildOf(container),
            ))
            .id();
        if let Some(mut d) = world.get_mut::<CommentDeployer>(deployer) {
            d.views.push(view);
        }
        world.trigger(CommentDeployedEvent {
            deployer,
            view,
            row,
        });
    }
    Ok(())
}
