// Live AWS implementation: EC2 DescribeInstances + CloudWatch
// GetMetricStatistics, one client pair per region.

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_cloudwatch as cloudwatch;
use aws_sdk_cloudwatch::types::{Dimension, StandardUnit, Statistic};
use aws_sdk_ec2 as ec2;
use aws_types::region::Region;
use chrono::{DateTime, Utc};

use super::{CloudConnector, Credentials, InstanceApi, InstanceDescription, MetricsApi, Reservation};
use crate::models::{MetricPoint, MetricSeries, Tag};

pub struct AwsConnector {
    credentials: Credentials,
}

impl AwsConnector {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl CloudConnector for AwsConnector {
    async fn connect(
        &self,
        region: &str,
    ) -> Result<(Box<dyn InstanceApi>, Box<dyn MetricsApi>)> {
        let creds = aws_credential_types::Credentials::new(
            self.credentials.access_key.clone(),
            self.credentials.secret_key.clone(),
            None,
            None,
            "ec2stats",
        );
        let conf = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .credentials_provider(creds)
            .load()
            .await;

        Ok((
            Box::new(Ec2InstanceApi {
                client: ec2::Client::new(&conf),
            }),
            Box::new(CloudWatchMetricsApi {
                client: cloudwatch::Client::new(&conf),
            }),
        ))
    }
}

struct Ec2InstanceApi {
    client: ec2::Client,
}

#[async_trait]
impl InstanceApi for Ec2InstanceApi {
    async fn list_reservations(&self) -> Result<Vec<Reservation>> {
        let mut out = Vec::new();
        let mut token: Option<String> = None;
        loop {
            let mut req = self.client.describe_instances();
            if let Some(t) = token.as_deref() {
                req = req.next_token(t);
            }
            let resp = req.send().await.context("DescribeInstances failed")?;

            for res in resp.reservations() {
                out.push(Reservation {
                    owner_id: res.owner_id().map(str::to_string),
                    instances: res.instances().iter().map(describe_instance).collect(),
                });
            }

            token = resp.next_token().map(str::to_string);
            if token.is_none() {
                break;
            }
        }
        Ok(out)
    }
}

fn describe_instance(inst: &ec2::types::Instance) -> InstanceDescription {
    InstanceDescription {
        instance_id: inst.instance_id().unwrap_or_default().to_string(),
        instance_type: inst
            .instance_type()
            .map(|t| t.as_str().to_string())
            .unwrap_or_default(),
        state_name: inst
            .state()
            .and_then(|s| s.name())
            .map(|n| n.as_str().to_string())
            .unwrap_or_default(),
        state_code: inst.state().and_then(|s| s.code()),
        tags: inst
            .tags()
            .iter()
            .filter_map(|t| {
                Some(Tag {
                    key: t.key()?.to_string(),
                    value: t.value()?.to_string(),
                })
            })
            .collect(),
    }
}

struct CloudWatchMetricsApi {
    client: cloudwatch::Client,
}

#[async_trait]
impl MetricsApi for CloudWatchMetricsApi {
    async fn cpu_utilization(
        &self,
        instance_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        period_secs: u32,
    ) -> Result<MetricSeries> {
        let resp = self
            .client
            .get_metric_statistics()
            .namespace("AWS/EC2")
            .metric_name("CPUUtilization")
            .dimensions(
                Dimension::builder()
                    .name("InstanceId")
                    .value(instance_id)
                    .build(),
            )
            .start_time(aws_smithy_types::DateTime::from_secs(start.timestamp()))
            .end_time(aws_smithy_types::DateTime::from_secs(end.timestamp()))
            .period(period_secs as i32)
            .statistics(Statistic::Average)
            .statistics(Statistic::Maximum)
            .unit(StandardUnit::Percent)
            .send()
            .await
            .context("GetMetricStatistics failed")?;

        let datapoints = resp
            .datapoints()
            .iter()
            .map(|d| MetricPoint {
                timestamp: d
                    .timestamp()
                    .map(format_metric_timestamp)
                    .unwrap_or_default(),
                average: d.average().unwrap_or(0.0),
                maximum: d.maximum().unwrap_or(0.0),
                unit: d
                    .unit()
                    .map(|u| u.as_str().to_string())
                    .unwrap_or_else(|| StandardUnit::Percent.as_str().to_string()),
            })
            .collect();

        Ok(MetricSeries {
            label: resp.label().unwrap_or("CPUUtilization").to_string(),
            datapoints,
        })
    }
}

fn format_metric_timestamp(ts: &aws_smithy_types::DateTime) -> String {
    DateTime::<Utc>::from_timestamp(ts.secs(), ts.subsec_nanos())
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}
