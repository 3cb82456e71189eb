//! # Topogen Core
//!
//! The topology pipeline and the adapters it ships with.
//!
//! * **Stages**: [`gather`], [`dedup`], [`unmanaged`], [`consolidate`],
//!   [`report`] and [`render`], orchestrated by [`pipeline::TopologyService`].
//! * **Inputs**: [`targets`] decides which devices are queried.
//! * **Adapters**: [`snapshot`] reads captured device output,
//!   [`render::Graphviz`] draws the graph and [`export`] delivers the files.

pub mod consolidate;
pub mod dedup;
pub mod export;
pub mod gather;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod snapshot;
pub mod targets;
pub mod unmanaged;
