//! The structs
//!
/// A single record of the leader resolution endpoint `/mesos_dns/v1/hosts/master.mesos`.
///
/// The endpoint returns a list of these:
/// ```text
/// [
///   {"host": "master.mesos.", "ip": "10.0.4.80"},
///   {"host": "master.mesos.", "ip": "10.0.5.139"}
/// ]
/// ```
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct MasterRecord {
    pub host: String,
    pub ip: String,
}

/// The root struct for deserializing `/mesos/master/slaves`.
///
/// ```text
/// {
///   "slaves": [
///     {
///       "id": "a3c3e6b4-9a1e-4bf2-8e1c-0ac2bc0e7d23-S1",
///       "hostname": "10.0.2.41",
///       "port": 5051,
///       "attributes": {"public_ip": "true"}
///     }
///   ],
///   "recovered_slaves": []
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct AgentListResponse {
    pub slaves: Vec<Agent>,
    #[serde(default)]
    pub recovered_slaves: Vec<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct Agent {
    pub id: String,
    pub hostname: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub attributes: AgentAttributes,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct AgentAttributes {
    pub public_ip: Option<String>,
}

/// The masters and agents found for one check run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ClusterTopology {
    pub masters: Vec<String>,
    pub agents: Vec<String>,
}
