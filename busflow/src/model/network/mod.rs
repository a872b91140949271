mod adjacency_direction;
mod network_error;
mod node_id;
mod road_edge;
pub mod road_network;
mod segment;
mod segment_lookup;
mod way_data;
mod way_filter;
mod way_id;
mod way_source;

pub use adjacency_direction::AdjacencyDirection;
pub use network_error::NetworkError;
pub use node_id::NodeId;
pub use road_edge::RoadEdge;
pub use road_network::RoadNetwork;
pub use segment::Segment;
pub use segment_lookup::SegmentLookup;
pub use way_data::WayData;
pub use way_filter::WayFilter;
pub use way_id::WayId;
pub use way_source::WaySource;
