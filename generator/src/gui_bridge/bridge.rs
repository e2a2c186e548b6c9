use crate::gui_bridge::model::VisualizationModel;
use crate::workflow::config::TableConfig;
use crate::workflow::runner::Runner;
use anyhow::Result;
use lutcore::prelude::WaveformSpec;
use lutcore::telemetry::MetricsRecorder;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

fn gui_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

#[derive(Debug)]
struct WarpError;

impl warp::reject::Reject for WarpError {}

/// Bridge that hosts the table HTTP endpoint and regenerates tables for
/// specs submitted by the visualizer.
pub struct GuiBridge {
    state: Arc<RwLock<VisualizationModel>>,
    metrics: Arc<MetricsRecorder>,
}

impl GuiBridge {
    pub fn new(runner: Arc<Runner>) -> Self {
        let state = Arc::new(RwLock::new(VisualizationModel::default()));
        let metrics = Arc::new(MetricsRecorder::new());

        let state_for_filter = state.clone();
        let metrics_for_filter = metrics.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());
        let metrics_filter = warp::any().map(move || metrics_for_filter.clone());
        let runner_filter = warp::any().map(move || runner.clone());

        let get_route = warp::path("table")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: Arc<RwLock<VisualizationModel>>| {
                warp::reply::json(&*state.read().unwrap())
            });

        let spec_route = warp::path("ingest")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and(metrics_filter.clone())
            .and_then(
                |spec: WaveformSpec,
                 state: Arc<RwLock<VisualizationModel>>,
                 runner: Arc<Runner>,
                 metrics: Arc<MetricsRecorder>| async move {
                    match runner.execute_spec(&spec) {
                        Ok(artifact) => {
                            let model = VisualizationModel::from_artifact(&artifact);
                            let mut guard = state.write().unwrap();
                            *guard = model;
                            metrics.record_published();
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "length": artifact.spec.length,
                                    "notes": artifact.notes,
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            eprintln!("ingest error: {}", err);
                            metrics.record_error();
                            Err(warp::reject::custom(WarpError))
                        }
                    }
                },
            );

        let config_route = warp::path("ingest-config")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .and(runner_filter)
            .and(metrics_filter)
            .and_then(
                |config: TableConfig,
                 state: Arc<RwLock<VisualizationModel>>,
                 runner: Arc<Runner>,
                 metrics: Arc<MetricsRecorder>| async move {
                    match runner.execute_spec(&config.to_waveform_spec()) {
                        Ok(artifact) => {
                            let model = VisualizationModel::from_artifact(&artifact);
                            let mut guard = state.write().unwrap();
                            *guard = model;
                            metrics.record_published();
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "length": artifact.spec.length,
                                    "resolution_bits": artifact.spec.resolution_bits,
                                    "notes": artifact.notes,
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            eprintln!("ingest-config error: {}", err);
                            metrics.record_error();
                            Err(warp::reject::custom(WarpError))
                        }
                    }
                },
            );

        thread::spawn(move || {
            let routes = get_route.or(spec_route).or(config_route);
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(gui_bind_address()).await;
            });
        });

        Self { state, metrics }
    }

    pub fn publish(&self, model: &VisualizationModel) -> Result<()> {
        let mut guard = self.state.write().unwrap();
        *guard = model.clone();
        self.metrics.record_published();
        let (published, errors) = self.metrics.snapshot();
        println!(
            "[GUI] table: {} codes / {} bits (published {}, errors {})",
            guard.codes.len(),
            guard.resolution_bits,
            published,
            errors
        );
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        println!("[GUI] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> VisualizationModel {
        self.state.read().unwrap().clone()
    }
}
