//! Harvest clustering

pub mod cluster;

pub use cluster::{harvest_cluster, HarvestCluster, HarvestClusterFinder};
