mod caching;
mod health;
mod page;

use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tracing::{debug, error, info, warn};

use crate::{
    caching::{CacheKey, Dataset, FrameCache},
    charts::DashboardCharts,
    config::{self, DashboardConfig},
    dai_market,
    env::ENV_CONFIG,
    export::DataFormat,
    flipside::{AnalyticsApi, FlipsideHttp},
    frame::Frame,
    granularity::Granularity,
    health::HealthCheckable,
    log,
    policy_markers::{AnnotationPosition, FeeDirection, PolicyMarker},
    reshape::to_long_format,
};

use self::{caching::cached_json, health::ServeHealth};

pub type StateExtension = Extension<Arc<State>>;

pub struct State {
    pub api: Box<dyn AnalyticsApi + Send + Sync>,
    pub cache: FrameCache,
    pub config: DashboardConfig,
    pub health: ServeHealth,
}

impl State {
    pub fn new(
        api: Box<dyn AnalyticsApi + Send + Sync>,
        config: DashboardConfig,
        cache: FrameCache,
    ) -> Self {
        Self {
            api,
            cache,
            config,
            health: ServeHealth::new(),
        }
    }

    async fn dai_market(&self, granularity: Granularity) -> Result<Frame, ServeError> {
        let url = self.config.dai_daily_url()?;
        let key = CacheKey::new(Dataset::DaiMarket, granularity);
        let result = self
            .cache
            .get_or_load(key, || {
                dai_market::get_dai_market(self.api.as_ref(), url, granularity)
            })
            .await;

        match result {
            Ok(frame) if frame.is_empty() => {
                warn!(%key, "analytics api returned no rows, serving empty charts");
                self.health
                    .set_fetch_failed(format!("analytics api returned no rows for {key}"));
                Ok(frame)
            }
            Ok(frame) => {
                self.health.set_fetch_succeeded();
                Ok(frame)
            }
            Err(err) => {
                error!(%key, "failed to load dataset: {err:#}");
                self.health.set_fetch_failed(format!("{err:#}"));
                Err(ServeError::Upstream(err))
            }
        }
    }

    async fn charts(&self, granularity: Granularity) -> Result<DashboardCharts, ServeError> {
        let daily = self.dai_market(Granularity::Daily).await?;
        let selected = match granularity {
            Granularity::Daily => daily.clone(),
            _ => self.dai_market(granularity).await?,
        };
        Ok(DashboardCharts::build(
            &selected,
            &daily,
            granularity,
            &self.config.policy_markers(),
        ))
    }
}

#[derive(Debug, Error)]
pub enum ServeError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error("failed to load data from the analytics api: {0:#}")]
    Upstream(anyhow::Error),
    #[error("failed to render page")]
    Render(#[from] serde_json::Error),
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let status = match self {
            ServeError::Config(_) | ServeError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServeError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        let body = json!({ "message": self.to_string() });
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GranularityQuery {
    #[serde(default)]
    granularity: Granularity,
}

#[derive(Debug, Default, Deserialize)]
pub struct DataQuery {
    #[serde(default)]
    granularity: Granularity,
    #[serde(default)]
    format: DataFormat,
}

#[derive(Debug, Serialize)]
struct PolicyMarkerView<'a> {
    date: chrono::NaiveDate,
    direction: FeeDirection,
    label: &'a str,
    position: AnnotationPosition,
}

impl<'a> From<&'a PolicyMarker> for PolicyMarkerView<'a> {
    fn from(marker: &'a PolicyMarker) -> Self {
        Self {
            date: marker.date,
            direction: marker.direction,
            label: marker.label(),
            position: marker.position(),
        }
    }
}

async fn dashboard_page(
    Extension(state): StateExtension,
    Query(query): Query<GranularityQuery>,
) -> Result<Html<String>, ServeError> {
    debug!(granularity = %query.granularity, "render dashboard");
    let charts = state.charts(query.granularity).await?;
    let html = page::render(&charts, query.granularity)?;
    Ok(Html(html))
}

async fn charts(
    Extension(state): StateExtension,
    Query(query): Query<GranularityQuery>,
    headers: HeaderMap,
) -> Result<Response, ServeError> {
    let charts = state.charts(query.granularity).await?;
    Ok(cached_json(&headers, &charts))
}

async fn dai_market_data(
    Extension(state): StateExtension,
    Query(query): Query<DataQuery>,
    headers: HeaderMap,
) -> Result<Response, ServeError> {
    let frame = state.dai_market(query.granularity).await?;
    let response = match query.format {
        DataFormat::Wide => cached_json(&headers, &frame),
        DataFormat::Long => cached_json(&headers, &to_long_format(&frame)),
    };
    Ok(response)
}

async fn policy_markers(Extension(state): StateExtension, headers: HeaderMap) -> Response {
    let markers = state.config.policy_markers();
    let views = markers
        .iter()
        .map(PolicyMarkerView::from)
        .collect::<Vec<_>>();
    cached_json(&headers, &views)
}

pub fn router(state: Arc<State>) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/api/v1/charts", get(charts))
        .route("/api/v1/dai-market", get(dai_market_data))
        .route("/api/v1/policy-markers", get(policy_markers))
        .route(
            "/healthz",
            get(|state: StateExtension| async move {
                state.health.health_status().into_response()
            }),
        )
        .layer(
            ServiceBuilder::new()
                .layer(CompressionLayer::new())
                .layer(Extension(state)),
        )
}

pub async fn start_server() -> Result<()> {
    log::init();

    let config = config::read_config(&ENV_CONFIG.config_path)
        .with_context(|| format!("failed to load config from {}", ENV_CONFIG.config_path))?;
    // Fail on startup rather than on the first page load.
    config.dai_daily_url()?;

    let cache = FrameCache::new(ENV_CONFIG.cache_size, ENV_CONFIG.cache_ttl_seconds);
    let state = Arc::new(State::new(Box::new(FlipsideHttp::new()), config, cache));

    let app = router(state);

    let host = if ENV_CONFIG.bind_public_interface {
        [0, 0, 0, 0]
    } else {
        [127, 0, 0, 1]
    };
    let socket_addr = SocketAddr::from((host, ENV_CONFIG.port));

    info!(port = ENV_CONFIG.port, "server listening");
    axum::Server::bind(&socket_addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
