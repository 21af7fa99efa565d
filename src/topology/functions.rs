//! The impls and functions
//!
use std::time::Instant;
use itertools::Itertools;
use log::*;
use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use crate::config::{Config, Role};
use crate::http::{http_query, parse_json};
use crate::topology::{AgentListResponse, ClusterTopology, MasterRecord};

pub const MASTER_LIST_PATH: &str = "/mesos_dns/v1/hosts/master.mesos";
pub const AGENT_LIST_PATH: &str = "/mesos/master/slaves";

impl ClusterTopology {
    pub fn new() -> Self {
        Default::default()
    }
    /// Discover the masters, then the agents.
    pub async fn discover(
        config: &Config,
        cancel: &CancellationToken,
    ) -> Result<ClusterTopology>
    {
        info!("begin topology discovery");
        let timer = Instant::now();

        let masters = ClusterTopology::list_masters(config, cancel).await?;
        let agents = ClusterTopology::list_agents(config, cancel).await?;

        info!("end topology discovery: {} masters, {} agents {:?}", masters.len(), agents.len(), timer.elapsed());
        Ok(ClusterTopology { masters, agents })
    }
    pub async fn list_masters(
        config: &Config,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>>
    {
        let url = config.leader_address().url(MASTER_LIST_PATH);
        let data_from_http = http_query(config, &url, cancel)
            .await
            .with_context(|| "Unable to fetch list of masters")?;
        ClusterTopology::parse_masters(&data_from_http)
    }
    pub async fn list_agents(
        config: &Config,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>>
    {
        let url = config.leader_address().url(AGENT_LIST_PATH);
        let data_from_http = http_query(config, &url, cancel)
            .await
            .with_context(|| "Unable to fetch list of agents")?;
        ClusterTopology::parse_agents(&data_from_http)
    }
    fn parse_masters(
        http_data: &[u8],
    ) -> Result<Vec<String>>
    {
        let records: Vec<MasterRecord> = parse_json(http_data, "master list")?;
        Ok(records.into_iter()
            .map(|record| record.ip)
            .filter(|ip| !ip.is_empty())
            .unique()
            .collect())
    }
    fn parse_agents(
        http_data: &[u8],
    ) -> Result<Vec<String>>
    {
        let agent_list: AgentListResponse = parse_json(http_data, "agent list")?;
        debug!("agents: {}, recovered agents: {}", agent_list.slaves.len(), agent_list.recovered_slaves.len());
        Ok(agent_list.slaves.into_iter()
            .map(|agent| agent.hostname)
            .filter(|hostname| !hostname.is_empty())
            .unique()
            .collect())
    }
    /// All nodes with their role: masters first, then agents, each in discovery order.
    pub fn nodes(&self) -> impl Iterator<Item = (Role, &str)> + '_ {
        self.masters.iter().map(|host| (Role::Master, host.as_str()))
            .chain(self.agents.iter().map(|host| (Role::Agent, host.as_str())))
    }
    pub fn len(&self) -> usize {
        self.masters.len() + self.agents.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PortLayout;
    use crate::http::ParseError;
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use wiremock::matchers::{method, path};

    #[test]
    fn unit_parse_masters() {
        let json = r#"
[
    {"host": "master.mesos.", "ip": "10.0.4.80"},
    {"host": "master.mesos.", "ip": "10.0.5.139"},
    {"host": "master.mesos.", "ip": "10.0.6.12"}
]
        "#;
        let result = ClusterTopology::parse_masters(json.as_bytes()).unwrap();
        assert_eq!(result, vec!["10.0.4.80", "10.0.5.139", "10.0.6.12"]);
    }

    #[test]
    fn unit_parse_masters_keeps_first_occurrence() {
        let json = r#"
[
    {"host": "master.mesos.", "ip": "10.0.5.139"},
    {"host": "master.mesos.", "ip": "10.0.4.80"},
    {"host": "master.mesos.", "ip": "10.0.5.139"}
]
        "#;
        let result = ClusterTopology::parse_masters(json.as_bytes()).unwrap();
        assert_eq!(result, vec!["10.0.5.139", "10.0.4.80"]);
    }

    #[test]
    fn unit_parse_masters_invalid_json() {
        let error = ClusterTopology::parse_masters(b"<html>not found</html>").unwrap_err();
        let parse_error = error.downcast_ref::<ParseError>().unwrap();
        assert_eq!(parse_error.payload, "<html>not found</html>");
    }

    #[test]
    fn unit_parse_agents() {
        let json = r#"
{
    "slaves": [
        {
            "id": "a3c3e6b4-9a1e-4bf2-8e1c-0ac2bc0e7d23-S1",
            "hostname": "10.0.2.41",
            "port": 5051,
            "attributes": {"public_ip": "true"}
        },
        {
            "id": "a3c3e6b4-9a1e-4bf2-8e1c-0ac2bc0e7d23-S0",
            "hostname": "10.0.1.7",
            "port": 5051,
            "attributes": {}
        }
    ],
    "recovered_slaves": []
}
        "#;
        let result = ClusterTopology::parse_agents(json.as_bytes()).unwrap();
        assert_eq!(result, vec!["10.0.2.41", "10.0.1.7"]);
    }

    #[test]
    fn unit_parse_agents_missing_slaves() {
        assert!(ClusterTopology::parse_agents(br#"{"recovered_slaves": []}"#).is_err());
    }

    #[test]
    fn unit_nodes_masters_first() {
        let topology = ClusterTopology {
            masters: vec!["m1".to_string(), "m2".to_string()],
            agents: vec!["a1".to_string()],
        };
        let nodes: Vec<(Role, &str)> = topology.nodes().collect();
        assert_eq!(nodes, vec![(Role::Master, "m1"), (Role::Master, "m2"), (Role::Agent, "a1")]);
        assert_eq!(topology.len(), 3);
    }

    #[tokio::test]
    async fn integration_discover() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(MASTER_LIST_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"host": "master.mesos.", "ip": "10.0.4.80"}]"#))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(AGENT_LIST_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"slaves": [{"id": "S0", "hostname": "10.0.1.7", "port": 5051, "attributes": {}}], "recovered_slaves": []}"#))
            .mount(&server)
            .await;
        let config = Config {
            leader_host: server.address().ip().to_string(),
            ports: PortLayout::uniform(server.address().port()),
            ..Default::default()
        };

        let topology = ClusterTopology::discover(&config, &CancellationToken::new()).await.unwrap();
        assert_eq!(topology.masters, vec!["10.0.4.80"]);
        assert_eq!(topology.agents, vec!["10.0.1.7"]);
    }

    #[tokio::test]
    async fn integration_discover_agents_unreachable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(MASTER_LIST_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"host": "master.mesos.", "ip": "10.0.4.80"}]"#))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(AGENT_LIST_PATH))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let config = Config {
            leader_host: server.address().ip().to_string(),
            ports: PortLayout::uniform(server.address().port()),
            ..Default::default()
        };

        let error = ClusterTopology::discover(&config, &CancellationToken::new()).await.unwrap_err();
        assert_eq!(error.to_string(), "Unable to fetch list of agents");
    }
}
