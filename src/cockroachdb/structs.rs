//! The structs
//!
/// The root struct for deserializing `/_status/nodes`.
///
/// Only the fields used for the ranges check are parsed, a node looks like:
/// ```text
/// {
///   "nodes": [
///     {
///       "desc": { "nodeId": 1, "address": { "addressField": "10.0.4.80:26257" } },
///       "storeStatuses": [
///         {
///           "desc": { "storeId": 1 },
///           "metrics": { "ranges.unavailable": 0, "ranges.underreplicated": 0, "ranges": 22 }
///         }
///       ],
///       "args": ["cockroach", "start", "--logtostderr"]
///     }
///   ]
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct NodesStatus {
    #[serde(default)]
    pub nodes: Vec<NodeStatus>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct NodeStatus {
    pub desc: Option<NodeDescriptor>,
    #[serde(default)]
    pub store_statuses: Vec<StoreStatus>,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescriptor {
    pub node_id: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct StoreStatus {
    #[serde(default)]
    pub metrics: StoreMetrics,
}

/// CockroachDB reports its metrics as numbers which can carry a fraction.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct StoreMetrics {
    #[serde(rename = "ranges.unavailable", default)]
    pub ranges_unavailable: f64,
    #[serde(rename = "ranges.underreplicated", default)]
    pub ranges_underreplicated: f64,
}

/// The range counters of a node, summed over its stores.
///
/// The sums stay numbers with a fraction, any reading above zero counts.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RangeCounts {
    pub unavailable: f64,
    pub underreplicated: f64,
}

/// The CockroachDB check, `args` selects the evaluation.
#[derive(Debug)]
pub struct CockroachdbCheck {
    pub name: String,
    pub args: Vec<String>,
}
