//! The impls and functions
//!
use log::*;
use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use crate::check::{Check, Verdict};
use crate::cockroachdb::{CockroachdbCheck, NodeStatus, NodesStatus, RangeCounts};
use crate::config::Config;
use crate::http::{http_query, parse_json, UrlFields};

pub const NODES_STATUS_PATH: &str = "/_status/nodes";
pub const VALID_ARGS: [&str; 1] = ["ranges"];

impl NodeStatus {
    /// Sum the range counters over the stores of this node.
    pub fn range_counts(&self) -> RangeCounts {
        self.store_statuses.iter()
            .fold(RangeCounts::default(), |counts, store| RangeCounts {
                unavailable: counts.unavailable + store.metrics.ranges_unavailable,
                underreplicated: counts.underreplicated + store.metrics.ranges_underreplicated,
            })
    }
    /// The node id when reported, otherwise the position in the response.
    fn label(
        &self,
        position: usize,
    ) -> String
    {
        self.desc.as_ref()
            .and_then(|desc| desc.node_id)
            .map(|node_id| node_id.to_string())
            .unwrap_or_else(|| format!("#{}", position))
    }
}

impl NodesStatus {
    /// Evaluate the nodes in response order, the first node with problem ranges fails the check.
    ///
    /// Unavailable ranges are checked before underreplicated ranges.
    pub fn evaluate_ranges(&self) -> Verdict {
        for (position, node) in self.nodes.iter().enumerate() {
            let counts = node.range_counts();
            debug!("node {}: {:?}", node.label(position), counts);
            if counts.unavailable > 0.0 {
                return Verdict::failure(&format!("CockroachDB has unavailable ranges (node {}: {})", node.label(position), counts.unavailable));
            }
            if counts.underreplicated > 0.0 {
                return Verdict::failure(&format!("CockroachDB has underreplicated ranges (node {}: {})", node.label(position), counts.underreplicated));
            }
        }
        Verdict::ok_with(&format!("{} nodes without unavailable or underreplicated ranges", self.nodes.len()))
    }
}

impl CockroachdbCheck {
    pub fn new(
        name: &str,
        args: Vec<String>,
    ) -> Self
    {
        CockroachdbCheck { name: name.to_string(), args }
    }
    pub async fn ranges(
        &self,
        cancel: &CancellationToken,
        config: &Config,
    ) -> Result<Verdict>
    {
        let (host, port) = split_host_port(&config.cockroachdb_addr)?;
        let url = UrlFields::new(host, port, NODES_STATUS_PATH, config.force_tls);
        let data_from_http = http_query(config, &url, cancel)
            .await
            .with_context(|| format!("Unable to read CockroachDB node status from {}", url))?;
        let nodes_status: NodesStatus = parse_json(&data_from_http, "CockroachDB node status")?;
        Ok(nodes_status.evaluate_ranges())
    }
}

fn split_host_port(
    address: &str,
) -> Result<(&str, u16)>
{
    let (host, port) = address.rsplit_once(':')
        .with_context(|| format!("Invalid CockroachDB address, expected host:port: {}", address))?;
    let port = port.parse::<u16>()
        .with_context(|| format!("Invalid port in CockroachDB address: {}", address))?;
    Ok((host, port))
}

impl Check for CockroachdbCheck {
    fn id(&self) -> &str {
        &self.name
    }
    async fn run(
        &self,
        cancel: &CancellationToken,
        config: &Config,
    ) -> Verdict
    {
        let valid_args = format!("{:?}", VALID_ARGS);
        if self.args.is_empty() {
            return Verdict::failure(&format!("No args provided, valid args {}", valid_args));
        }
        // the first recognized option decides.
        if self.args.iter().any(|arg| arg == "ranges") {
            return Verdict::from(self.ranges(cancel, config).await);
        }
        Verdict::failure(&format!("Option not supported, valid args {}", valid_args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::Status;

    fn parse(json: &str) -> NodesStatus {
        parse_json(json.as_bytes(), "CockroachDB node status").unwrap()
    }

    #[test]
    fn unit_parse_node_status() {
        let json = r#"
{
    "nodes": [
        {
            "desc": { "nodeId": 1, "address": { "networkField": "tcp", "addressField": "10.0.4.80:26257" } },
            "storeStatuses": [
                { "desc": { "storeId": 1 }, "metrics": { "ranges": 22, "ranges.unavailable": 0, "ranges.underreplicated": 1 } },
                { "desc": { "storeId": 2 }, "metrics": { "ranges": 20, "ranges.unavailable": 0, "ranges.underreplicated": 2.0 } }
            ],
            "args": ["cockroach", "start", "--logtostderr"]
        }
    ]
}
        "#;
        let result = parse(json);
        assert_eq!(result.nodes.len(), 1);
        assert_eq!(result.nodes[0].args.len(), 3);
        assert_eq!(result.nodes[0].range_counts(), RangeCounts { unavailable: 0.0, underreplicated: 3.0 });
    }

    #[test]
    fn unit_all_zero_is_ok() {
        let json = r#"
{
    "nodes": [
        { "desc": { "nodeId": 1 }, "storeStatuses": [ { "metrics": { "ranges.unavailable": 0, "ranges.underreplicated": 0 } } ] },
        { "desc": { "nodeId": 2 }, "storeStatuses": [ { "metrics": { "ranges.unavailable": 0, "ranges.underreplicated": 0 } } ] }
    ]
}
        "#;
        let verdict = parse(json).evaluate_ranges();
        assert_eq!(verdict.status, Status::Ok);
    }

    #[test]
    fn unit_unavailable_on_one_node_fails() {
        let json = r#"
{
    "nodes": [
        { "desc": { "nodeId": 1 }, "storeStatuses": [ { "metrics": { "ranges.unavailable": 0, "ranges.underreplicated": 0 } } ] },
        { "desc": { "nodeId": 2 }, "storeStatuses": [ { "metrics": { "ranges.unavailable": 0 } }, { "metrics": { "ranges.unavailable": 4 } } ] },
        { "desc": { "nodeId": 3 }, "storeStatuses": [ { "metrics": { "ranges.unavailable": 0, "ranges.underreplicated": 0 } } ] }
    ]
}
        "#;
        let verdict = parse(json).evaluate_ranges();
        assert_eq!(verdict.status, Status::Failure);
        assert_eq!(verdict.message, "CockroachDB has unavailable ranges (node 2: 4)");
    }

    #[test]
    fn unit_unavailable_checked_before_underreplicated() {
        let json = r#"
{
    "nodes": [
        { "storeStatuses": [ { "metrics": { "ranges.unavailable": 1, "ranges.underreplicated": 5 } } ] }
    ]
}
        "#;
        let verdict = parse(json).evaluate_ranges();
        assert_eq!(verdict.message, "CockroachDB has unavailable ranges (node #0: 1)");
    }

    #[test]
    fn unit_first_node_in_response_order_decides() {
        let json = r#"
{
    "nodes": [
        { "desc": { "nodeId": 7 }, "storeStatuses": [ { "metrics": { "ranges.underreplicated": 2 } } ] },
        { "desc": { "nodeId": 8 }, "storeStatuses": [ { "metrics": { "ranges.unavailable": 3 } } ] }
    ]
}
        "#;
        let verdict = parse(json).evaluate_ranges();
        assert_eq!(verdict.message, "CockroachDB has underreplicated ranges (node 7: 2)");
    }

    #[test]
    fn unit_fractional_reading_fails() {
        let json = r#"
{
    "nodes": [
        { "desc": { "nodeId": 1 }, "storeStatuses": [ { "metrics": { "ranges.unavailable": 0.5, "ranges.underreplicated": 0 } } ] }
    ]
}
        "#;
        let verdict = parse(json).evaluate_ranges();
        assert_eq!(verdict.status, Status::Failure);
        assert_eq!(verdict.message, "CockroachDB has unavailable ranges (node 1: 0.5)");
    }

    #[test]
    fn unit_huge_readings_sum_without_overflow() {
        let json = r#"
{
    "nodes": [
        { "desc": { "nodeId": 1 }, "storeStatuses": [
            { "metrics": { "ranges.underreplicated": 1e20 } },
            { "metrics": { "ranges.underreplicated": 1e20 } }
        ] }
    ]
}
        "#;
        let result = parse(json);
        assert_eq!(result.nodes[0].range_counts().underreplicated, 2e20);
        let verdict = result.evaluate_ranges();
        assert_eq!(verdict.status, Status::Failure);
        assert!(verdict.message.starts_with("CockroachDB has underreplicated ranges (node 1: "), "{}", verdict.message);
    }

    #[test]
    fn unit_no_nodes_is_ok() {
        assert!(parse(r#"{"nodes": []}"#).evaluate_ranges().is_ok());
    }

    #[test]
    fn unit_split_host_port() {
        assert_eq!(split_host_port("127.0.0.1:8090").unwrap(), ("127.0.0.1", 8090));
        assert!(split_host_port("127.0.0.1").is_err());
        assert!(split_host_port("127.0.0.1:http").is_err());
    }

    #[tokio::test]
    async fn unit_no_args() {
        let check = CockroachdbCheck::new("test", Vec::new());
        let verdict = check.run(&CancellationToken::new(), &Config::default()).await;
        assert_eq!(verdict.status, Status::Failure);
        assert_eq!(verdict.message, r#"No args provided, valid args ["ranges"]"#);
    }

    #[tokio::test]
    async fn unit_unsupported_arg() {
        let check = CockroachdbCheck::new("test", vec!["leases".to_string()]);
        let verdict = check.run(&CancellationToken::new(), &Config::default()).await;
        assert_eq!(verdict.status, Status::Failure);
        assert_eq!(verdict.message, r#"Option not supported, valid args ["ranges"]"#);
        assert!(verdict.error.is_none());
    }
}
