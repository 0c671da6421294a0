// Shared test helpers: fake cloud backends and snapshot builders

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use ec2stats::cloud::{CloudConnector, InstanceApi, InstanceDescription, MetricsApi, Reservation};
use ec2stats::models::{
    FleetSnapshot, InstanceRecord, InstanceState, MetricPoint, MetricSeries, Tag,
};

/// Scripted behavior for one fake region.
#[derive(Clone, Default)]
pub struct FakeRegion {
    pub connect_fails: bool,
    pub listing_fails: bool,
    pub metrics_fail: bool,
    pub reservations: Vec<Reservation>,
}

/// CloudConnector fake: per-region scripts, records every metric call.
#[derive(Default)]
pub struct FakeCloud {
    regions: HashMap<String, FakeRegion>,
    metric_calls: Arc<Mutex<Vec<String>>>,
}

impl FakeCloud {
    pub fn with_region(mut self, name: &str, region: FakeRegion) -> Self {
        self.regions.insert(name.to_string(), region);
        self
    }

    /// Instance ids the collector asked metrics for, in call order.
    pub fn metric_calls(&self) -> Vec<String> {
        self.metric_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CloudConnector for FakeCloud {
    async fn connect(
        &self,
        region: &str,
    ) -> Result<(Box<dyn InstanceApi>, Box<dyn MetricsApi>)> {
        let scripted = self
            .regions
            .get(region)
            .cloned()
            .ok_or_else(|| anyhow!("unknown region {region}"))?;
        if scripted.connect_fails {
            return Err(anyhow!("connection refused in {region}"));
        }
        Ok((
            Box::new(FakeInstanceApi {
                listing_fails: scripted.listing_fails,
                reservations: scripted.reservations,
            }),
            Box::new(FakeMetricsApi {
                fail: scripted.metrics_fail,
                calls: self.metric_calls.clone(),
            }),
        ))
    }
}

struct FakeInstanceApi {
    listing_fails: bool,
    reservations: Vec<Reservation>,
}

#[async_trait]
impl InstanceApi for FakeInstanceApi {
    async fn list_reservations(&self) -> Result<Vec<Reservation>> {
        if self.listing_fails {
            return Err(anyhow!("DescribeInstances throttled"));
        }
        Ok(self.reservations.clone())
    }
}

struct FakeMetricsApi {
    fail: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl MetricsApi for FakeMetricsApi {
    async fn cpu_utilization(
        &self,
        instance_id: &str,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
        _period_secs: u32,
    ) -> Result<MetricSeries> {
        self.calls.lock().unwrap().push(instance_id.to_string());
        if self.fail {
            return Err(anyhow!("metric backend unavailable"));
        }
        Ok(sample_series())
    }
}

pub fn sample_series() -> MetricSeries {
    MetricSeries {
        label: "CPUUtilization".into(),
        datapoints: vec![
            MetricPoint {
                timestamp: "2024-03-04 10:30:00".into(),
                average: 3.2,
                maximum: 41.0,
                unit: "Percent".into(),
            },
            MetricPoint {
                timestamp: "2024-03-04 10:45:00".into(),
                average: 2.9,
                maximum: 17.5,
                unit: "Percent".into(),
            },
        ],
    }
}

pub fn instance(id: &str, state: &str) -> InstanceDescription {
    InstanceDescription {
        instance_id: id.to_string(),
        instance_type: "t2.micro".into(),
        state_name: state.to_string(),
        state_code: Some(if state == "running" { 16 } else { 48 }),
        tags: vec![Tag {
            key: "Name".into(),
            value: id.to_string(),
        }],
    }
}

pub fn running_instance(id: &str) -> InstanceDescription {
    instance(id, "running")
}

pub fn reservation(owner: Option<&str>, instances: Vec<InstanceDescription>) -> Reservation {
    Reservation {
        owner_id: owner.map(String::from),
        instances,
    }
}

/// A small but fully populated snapshot for store/analyzer tests.
pub fn sample_snapshot() -> FleetSnapshot {
    FleetSnapshot {
        instances: vec![
            InstanceRecord {
                region: "us-east-1".into(),
                instance_id: "i-0123456789abcdef0".into(),
                instance_type: "t2.micro".into(),
                state: InstanceState {
                    code: Some(16),
                    name: "running".into(),
                },
                tags: vec![Tag {
                    key: "Name".into(),
                    value: "web-1".into(),
                }],
                stats: sample_series(),
            },
            InstanceRecord {
                region: "us-west-2".into(),
                instance_id: "i-0fedcba9876543210".into(),
                instance_type: "m5.large".into(),
                state: InstanceState {
                    code: Some(80),
                    name: "stopped".into(),
                },
                tags: vec![],
                stats: MetricSeries::empty(),
            },
        ],
        owner_id: "8d969eef6ecad3c2".into(),
        threshold: Default::default(),
    }
}
