mod annotations;
mod figure;

pub use annotations::{plot_vlines, DEFAULT_LINE_COLOR};
pub use figure::{Annotation, Axis, Figure, Layout, Line, ScatterTrace, Shape, Title, YAxis};

use serde::Serialize;
use tracing::warn;

use crate::{
    dai_market::{DAI_PRICE, DIFF_MINT_REPAY, ETH_PRICE, NUM_MINTED, NUM_REPAID},
    frame::Frame,
    granularity::Granularity,
    policy_markers::PolicyMarker,
};

const DATE_TITLE: &str = "Date";
const DAI_AMOUNT_TITLE: &str = "Amount (DAI)";
const USD_AMOUNT_TITLE: &str = "Amount ($)";

fn trace(frame: &Frame, column: &str, name: &str, yaxis: YAxis) -> ScatterTrace {
    let y = frame.column(column).unwrap_or_else(|| {
        if !frame.is_empty() {
            warn!(column, "frame is missing column, plotting an empty trace");
        }
        vec![]
    });
    let x = if y.is_empty() { vec![] } else { frame.dates() };
    ScatterTrace::new(name, x, y, yaxis)
}

fn titled(title: &str, with_secondary: bool) -> Figure {
    let mut figure = Figure::new(title);
    figure.set_x_title(DATE_TITLE);
    figure.set_y_title(YAxis::Primary, DAI_AMOUNT_TITLE);
    if with_secondary {
        figure.set_y_title(YAxis::Secondary, USD_AMOUNT_TITLE);
    }
    figure
}

/// Minted, repaid and their difference at the selected granularity.
pub fn market_overview(frame: &Frame, granularity: Granularity) -> Figure {
    let mut figure = titled(
        &format!("DAI on the Market | {}", granularity.title()),
        false,
    );
    figure.add_trace(trace(frame, NUM_MINTED, "DAI Minted", YAxis::Primary));
    figure.add_trace(trace(frame, NUM_REPAID, "DAI Repaid", YAxis::Primary));
    figure.add_trace(trace(
        frame,
        DIFF_MINT_REPAY,
        "DAI Minted - Repaid",
        YAxis::Primary,
    ));
    figure
}

pub fn eth_price_vs_net_mint(frame: &Frame, granularity: Granularity) -> Figure {
    let mut figure = titled(
        &format!(
            "ETH (WETH) Average Price  vs Difference between Mint and Repay | {}",
            granularity.title()
        ),
        true,
    );
    figure.add_trace(trace(
        frame,
        DIFF_MINT_REPAY,
        "DAI Minted - Repaid",
        YAxis::Primary,
    ));
    figure.add_trace(trace(frame, ETH_PRICE, "ETH Average Price", YAxis::Secondary));
    figure
}

pub fn minted_vs_dai_price(daily: &Frame) -> Figure {
    let mut figure = titled("DAI Minted vs DAI price | Daily", true);
    figure.add_trace(trace(daily, NUM_MINTED, "DAI Minted", YAxis::Primary));
    figure.add_trace(trace(daily, DAI_PRICE, "DAI Average Price", YAxis::Secondary));
    figure
}

pub fn repaid_vs_dai_price(daily: &Frame) -> Figure {
    let mut figure = titled("DAI Repaid vs DAI price | Daily", true);
    figure.add_trace(trace(daily, NUM_REPAID, "DAI Burned/Repaid", YAxis::Primary));
    figure.add_trace(trace(daily, DAI_PRICE, "DAI Average Price", YAxis::Secondary));
    figure
}

/// The four chart panes of the dashboard.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardCharts {
    pub market_overview: Figure,
    pub eth_price_vs_net_mint: Figure,
    pub minted_vs_dai_price: Figure,
    pub repaid_vs_dai_price: Figure,
}

impl DashboardCharts {
    /// `selected` is the data at `granularity`, `daily` the daily data the price charts always
    /// use.
    pub fn build(
        selected: &Frame,
        daily: &Frame,
        granularity: Granularity,
        markers: &[PolicyMarker],
    ) -> Self {
        let mut charts = Self {
            market_overview: market_overview(selected, granularity),
            eth_price_vs_net_mint: eth_price_vs_net_mint(selected, granularity),
            minted_vs_dai_price: minted_vs_dai_price(daily),
            repaid_vs_dai_price: repaid_vs_dai_price(daily),
        };

        for figure in charts.figures_mut() {
            plot_vlines(figure, markers, DEFAULT_LINE_COLOR);
        }

        charts
    }

    pub fn figures(&self) -> [&Figure; 4] {
        [
            &self.market_overview,
            &self.eth_price_vs_net_mint,
            &self.minted_vs_dai_price,
            &self.repaid_vs_dai_price,
        ]
    }

    fn figures_mut(&mut self) -> [&mut Figure; 4] {
        [
            &mut self.market_overview,
            &mut self.eth_price_vs_net_mint,
            &mut self.minted_vs_dai_price,
            &mut self.repaid_vs_dai_price,
        ]
    }
}
