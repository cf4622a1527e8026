//! Demo binary that registers sample biomes, stripes a small world with them,
//! and walks a player across the stripes, logging every biome change.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p biomes-demo -- --steps 80 --log-level debug`.

mod world_gen;

use bevy_ecs::prelude::*;
use biomes_api::{
    BiomeColorProvider, BiomeError, BiomeEventBuffer, BiomeInbox, BiomeRegistry,
    BiomesMetricsMode, ColorLut, PlayerCharacter, biome_change_system, register_biome_resources,
};
use biomes_config::{CliArgs, ColorConfig, Config};
use biomes_world::{CHUNK_SIZE, ExtraDataSlotRegistry, WorldStorage, block_pos};
use clap::Parser;
use glam::{IVec3, Vec3};
use tracing::{error, info, warn};

/// Distance the player moves along +X each step.
const STEP: Vec3 = Vec3::new(2.0, 0.0, 0.0);
/// Where the player spawns.
const SPAWN: Vec3 = Vec3::new(-60.5, 1.5, 8.5);

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args.config.clone().unwrap_or_else(Config::default_dir);

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config
        .debug
        .log_dir
        .clone()
        .unwrap_or_else(|| config_dir.join("logs"));
    biomes_log::init_logging(Some(&log_dir), config.debug.file_logging, Some(&config));

    if let Err(e) = run(&config, args.steps) {
        error!("Biome demo failed: {e}");
        std::process::exit(1);
    }
}

fn run(config: &Config, steps: u32) -> Result<(), BiomeError> {
    let mut slots = ExtraDataSlotRegistry::new();
    let mut registry = BiomeRegistry::install(&mut slots, &config.biomes.extra_data_slot)?;
    let biomes = world_gen::register_all(&mut registry)?;

    let mut storage = WorldStorage::new(slots);
    world_gen::populate(&registry, &mut storage, &biomes)?;
    log_colors(&registry, &storage, &load_colors(&config.color))?;

    let mut world = World::new();
    register_biome_resources(&mut world, registry, storage, &config.biomes);

    let mut schedule = Schedule::default();
    schedule.add_systems(biome_change_system);

    let player = world.spawn(PlayerCharacter).id();
    world.resource_mut::<BiomeInbox>().push_spawned(player, SPAWN);
    schedule.run(&mut world);
    info!("{}", world.resource::<BiomesMetricsMode>().metrics());

    let mut position = SPAWN;
    let mut changes = 0usize;
    for step in 0..steps {
        world.resource_mut::<BiomeEventBuffer>().swap();
        let seen = world.resource::<BiomeEventBuffer>().len();

        position += STEP;
        world
            .resource_mut::<BiomeInbox>()
            .push_moved(player, position, STEP);
        schedule.run(&mut world);

        for event in world.resource::<BiomeEventBuffer>().read().skip(seen) {
            changes += 1;
            info!(
                "Step {step}: {} -> {} at {}",
                event.old_biome.display_name(),
                event.new_biome.display_name(),
                block_pos(position)
            );
        }
    }

    if changes == 0 {
        warn!("Player never crossed a biome boundary; try more --steps");
    }
    info!(
        "Walked {steps} steps, {changes} biome changes{}",
        world.resource::<BiomesMetricsMode>().metrics()
    );
    Ok(())
}

fn load_colors(config: &ColorConfig) -> BiomeColorProvider {
    BiomeColorProvider::from_config(config).unwrap_or_else(|e| {
        warn!("Failed to load colour lookup tables: {e}, using built-in gradients");
        BiomeColorProvider::new(ColorLut::grass_gradient(), ColorLut::foliage_gradient())
    })
}

/// Logs the grass and foliage colour at the start of each stripe.
fn log_colors(
    registry: &BiomeRegistry,
    storage: &WorldStorage,
    colors: &BiomeColorProvider,
) -> Result<(), BiomeError> {
    let start = world_gen::CHUNKS_X.start * CHUNK_SIZE as i32;
    let end = (world_gen::CHUNKS_X.end + 1) * CHUNK_SIZE as i32;
    for x in (start..end).step_by(world_gen::STRIPE_WIDTH as usize) {
        let pos = IVec3::new(x, 0, 0);
        let name = registry
            .get_biome(storage, pos)?
            .map_or_else(|| "none".to_string(), |b| b.display_name().to_string());
        let grass = colors.color_lut(registry, storage, pos)?;
        let foliage = colors.foliage_lut(registry, storage, pos)?;
        info!(
            "x={x:>4} {name:<10} grass {:?} foliage {:?}",
            grass.0, foliage.0
        );
    }
    Ok(())
}
