//! Clustered harvesting around a chosen origin

use crate::core::config::{HarvestStyle, PlacementConfig};
use crate::core::types::HarvestableRef;
use crate::world::host::{HarvestWorld, Harvester};
use ahash::AHashSet;

/// Harvestables collected for one harvest action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestCluster {
    pub origin: HarvestableRef,
    /// Extra targets in discovery order; never contains `origin`
    pub members: Vec<HarvestableRef>,
}

impl HarvestCluster {
    /// Origin first, then every member
    pub fn targets(&self) -> impl Iterator<Item = HarvestableRef> + '_ {
        std::iter::once(self.origin).chain(self.members.iter().copied())
    }

    /// Number of targets, origin included
    pub fn target_count(&self) -> usize {
        self.members.len() + 1
    }
}

/// Finds harvestables near an origin
pub struct HarvestClusterFinder<'a> {
    config: &'a PlacementConfig,
}

impl<'a> HarvestClusterFinder<'a> {
    pub fn new(config: &'a PlacementConfig) -> Self {
        Self { config }
    }

    /// Cluster of harvestables within the harvest radius of `origin`
    pub fn find<W: HarvestWorld + ?Sized>(&self, origin: HarvestableRef, world: &W) -> HarvestCluster {
        let mut cluster = HarvestCluster {
            origin,
            members: Vec::new(),
        };

        let Some(center) = world.root_position(origin) else {
            tracing::debug!(?origin, "harvest origin has no position");
            return cluster;
        };
        let origin_name = world.type_name(origin);

        let mut seen: AHashSet<HarvestableRef> = AHashSet::new();
        for collider in world.overlap_sphere(center, self.config.harvest_radius, self.config.snap_collision_mask) {
            let Some(candidate) = world.owning_harvestable(collider) else {
                continue;
            };
            if candidate == origin || seen.contains(&candidate) {
                continue;
            }
            if self.config.harvest_style == HarvestStyle::LikeResources
                && world.type_name(candidate) != origin_name
            {
                continue;
            }

            seen.insert(candidate);
            cluster.members.push(candidate);
        }

        tracing::debug!(
            ?origin,
            members = cluster.members.len(),
            style = ?self.config.harvest_style,
            "found harvest cluster"
        );
        cluster
    }

    /// Find the cluster around `origin` and harvest every target in it
    ///
    /// Returns the targets that were actually harvested, origin first.
    pub fn harvest<W: HarvestWorld + Harvester>(&self, origin: HarvestableRef, world: &mut W) -> Vec<HarvestableRef> {
        let cluster = self.find(origin, &*world);
        harvest_cluster(&cluster, world)
    }
}

/// Harvest each target of `cluster` as if it were individually targeted
pub fn harvest_cluster<H: Harvester + ?Sized>(cluster: &HarvestCluster, harvester: &mut H) -> Vec<HarvestableRef> {
    cluster
        .targets()
        .filter(|&target| harvester.harvest(target))
        .collect()
}
