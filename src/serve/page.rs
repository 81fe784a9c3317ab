//! The dashboard page. Charts are drawn client side by plotly.js from the embedded figures.

use enum_iterator::all;

use crate::{charts::DashboardCharts, granularity::Granularity};

const PLOTLY_JS_URL: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";
const FLIPSIDE_URL: &str = "https://flipsidecrypto.xyz/";
const STABILITY_FEE_URL: &str = "https://makerdao.world/en/learn/vaults/stability-fees/";
const FLIPSIDE_VISUAL_URL: &str = "https://velocity-app.flipsidecrypto.com/velocity/visuals/3ce232d2-3350-4539-8902-6cae1456fdbd/43fa7dee-c660-463b-8434-169c686584c9";

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2rem auto; max-width: 1680px; padding: 0 1rem; }
.chart-row { display: flex; flex-wrap: wrap; gap: 1rem; }
.chart { flex: 1 1 800px; min-height: 600px; }
code { background: #f2f2f2; padding: 0 0.2rem; }
"#;

/// JSON embedded in a script tag must not be able to close it.
fn script_safe_json(charts: &DashboardCharts) -> serde_json::Result<String> {
    serde_json::to_string(charts).map(|json| json.replace('<', "\\u003c"))
}

fn granularity_selector(selected: Granularity) -> String {
    let options = all::<Granularity>()
        .map(|granularity| {
            let selected_attr = if granularity == selected {
                " selected"
            } else {
                ""
            };
            format!(r#"<option value="{granularity}"{selected_attr}>{granularity}</option>"#)
        })
        .collect::<String>();

    format!(
        r#"<form method="get" action="/">
  <label for="granularity">View:</label>
  <select id="granularity" name="granularity" onchange="this.form.submit()">{options}</select>
</form>"#
    )
}

pub fn render(charts: &DashboardCharts, granularity: Granularity) -> serde_json::Result<String> {
    let figures = script_safe_json(charts)?;
    let selector = granularity_selector(granularity);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>DAI on the Market</title>
<script src="{PLOTLY_JS_URL}"></script>
<style>{STYLE}</style>
</head>
<body>
<h1>DAI on the Market</h1>
<p>How the amount of <code>DAI</code> in the market changed over the past 365 days, and whether
minting and burning moved with changes to the
<a href="{STABILITY_FEE_URL}">Stability Fee</a> or for other reasons.</p>
<p>All data is aggregated by <a href="{FLIPSIDE_URL}">FlipsideCrypto</a>.</p>

<h2>DAI on the Market</h2>
<p>The amount of <code>DAI</code> minted, burned, and the difference between the two. Every chart
marks the dates the stability fee changed.</p>
{selector}
<div class="chart-row">
  <div class="chart" id="market-overview"></div>
  <div class="chart" id="eth-price-vs-net-mint"></div>
</div>
<p>Large mint spikes tend to be followed by burns of about the same size. The mint-minus-burn
difference stays flat or drifts down outside of those spikes.</p>
<hr>

<h2>DAI Minted/Burned vs <code>DAI</code> Price</h2>
<p>Minting and burning against the price of <code>DAI</code>, daily.</p>
<div class="chart-row">
  <div class="chart" id="minted-vs-dai-price"></div>
  <div class="chart" id="repaid-vs-dai-price"></div>
</div>
<p>Heavy minting coincides with the price slipping below the peg, heavy burning with it rising
above.</p>

<h3>A different view</h3>
<p>Minted - burned <code>DAI</code> against the <code>DAI</code> price.</p>
<iframe loading="lazy" src="{FLIPSIDE_VISUAL_URL}" width="100%" height="600"></iframe>

<h3>Summary</h3>
<p>Stability fee changes did not move minting or burning of <code>DAI</code> by much. Minting
pushes the peg down and burning pushes it up.</p>

<script>
const charts = {figures};
const panes = {{
  "market-overview": charts.market_overview,
  "eth-price-vs-net-mint": charts.eth_price_vs_net_mint,
  "minted-vs-dai-price": charts.minted_vs_dai_price,
  "repaid-vs-dai-price": charts.repaid_vs_dai_price,
}};
for (const [id, figure] of Object.entries(panes)) {{
  Plotly.newPlot(id, figure.data, figure.layout);
}}
</script>
</body>
</html>
"#
    ))
}
