mod task_id;
pub use task_id::TaskId;

mod task_snapshot;
pub use task_snapshot::{NANOS_PER_SECOND, TaskSnapshot};

mod threshold;
pub use threshold::Threshold;

mod endpoint;
pub use endpoint::{CLUSTER_PORT, ClusterEndpoint, ClusterEndpoints};
