//! Integration tests for clustered harvesting

use glam::Vec3;
use sowgrid::core::types::{LayerMask, ObjectId};
use sowgrid::core::{HarvestStyle, PlacementConfig};
use sowgrid::harvest::{harvest_cluster, HarvestClusterFinder};
use sowgrid::world::{HarvestableIndex, MemoryWorld, Scenario};
use std::path::Path;

fn bush(world: &mut MemoryWorld, name: &str, position: Vec3) -> ObjectId {
    let id = world.add_object(name, position, None, true);
    world.add_collider(id, position, 0.4, LayerMask::DEFAULT);
    id
}

#[test]
fn test_meadow_garden_harvest() {
    let path = Path::new("data/scenarios/meadow_garden.toml");
    if !path.exists() {
        eprintln!("Skipping test: meadow_garden scenario not found");
        return;
    }

    let scenario = Scenario::load(path).expect("Failed to load scenario");
    let mut built = scenario.build_world().unwrap();
    let origin = built.object_id("raspberry_1").unwrap();
    let neighbour = built.object_id("raspberry_2").unwrap();

    let finder = HarvestClusterFinder::new(&scenario.config);
    let harvested = finder.harvest(origin, &mut built.world);

    assert_eq!(harvested, vec![origin, neighbour]);
    assert_eq!(built.world.remaining_harvestables().len(), 2);
}

#[test]
fn test_mixed_cluster_like_resources_only() {
    let mut world = MemoryWorld::new();
    let origin = bush(&mut world, "Pickable_Mushroom", Vec3::ZERO);
    let same_a = bush(&mut world, "Pickable_Mushroom", Vec3::new(1.0, 0.0, 1.0));
    bush(&mut world, "Pickable_Dandelion", Vec3::new(-1.0, 0.0, 0.0));
    let same_b = bush(&mut world, "Pickable_Mushroom", Vec3::new(0.0, 0.0, -2.0));
    bush(&mut world, "Pickable_Thistle", Vec3::new(2.0, 0.0, 0.0));

    let config = PlacementConfig::default();
    let cluster = HarvestClusterFinder::new(&config).find(origin, &world);

    assert_eq!(cluster.members, vec![same_a, same_b]);
    for member in &cluster.members {
        assert_eq!(world.type_name(*member), world.type_name(origin));
    }
}

#[test]
fn test_cluster_never_contains_origin_or_duplicates() {
    let mut world = MemoryWorld::new();
    let origin = bush(&mut world, "RaspberryBush", Vec3::ZERO);
    // Extra colliders on the origin itself
    world.add_collider(origin, Vec3::new(0.0, 0.5, 0.0), 0.2, LayerMask::ITEM);
    let other = bush(&mut world, "RaspberryBush", Vec3::new(1.0, 0.0, 0.0));
    world.add_collider(other, Vec3::new(1.0, 0.5, 0.0), 0.2, LayerMask::ITEM);
    world.add_collider(other, Vec3::new(1.0, 1.0, 0.0), 0.2, LayerMask::PIECE_NONSOLID);

    let config = PlacementConfig {
        harvest_style: HarvestStyle::AllResources,
        ..Default::default()
    };
    let cluster = HarvestClusterFinder::new(&config).find(origin, &world);

    assert_eq!(cluster.members, vec![other]);
    assert_eq!(cluster.targets().collect::<Vec<_>>(), vec![origin, other]);
}

#[test]
fn test_colliders_outside_snap_mask_are_not_clustered() {
    let mut world = MemoryWorld::new();
    let origin = bush(&mut world, "RaspberryBush", Vec3::ZERO);
    let hidden = world.add_object("RaspberryBush", Vec3::new(1.0, 0.0, 0.0), None, true);
    world.add_collider(hidden, Vec3::new(1.0, 0.0, 0.0), 0.4, LayerMask(1 << 20));

    let config = PlacementConfig::default();
    let cluster = HarvestClusterFinder::new(&config).find(origin, &world);
    assert!(cluster.members.is_empty());
}

#[test]
fn test_repeated_harvest_only_takes_remaining() {
    let mut world = MemoryWorld::new();
    let origin = bush(&mut world, "BlueberryBush", Vec3::ZERO);
    let a = bush(&mut world, "BlueberryBush", Vec3::new(1.0, 0.0, 0.0));
    let b = bush(&mut world, "BlueberryBush", Vec3::new(2.0, 0.0, 0.0));

    let config = PlacementConfig::default();
    let finder = HarvestClusterFinder::new(&config);

    let cluster = finder.find(origin, &world);
    assert_eq!(harvest_cluster(&cluster, &mut world), vec![origin, a, b]);

    // Harvesting the same batch again finds nothing left to take
    assert!(harvest_cluster(&cluster, &mut world).is_empty());
    assert!(world.remaining_harvestables().is_empty());
}
