//! DAI minted and repaid per day, as aggregated by Flipside, and the views the dashboard needs
//! of it.

use anyhow::Result;
use tracing::{debug, instrument};

use crate::{
    flipside::{self, AnalyticsApi},
    frame::Frame,
    granularity::Granularity,
    resample::trunc_by,
    reshape::{to_long_format, LongRecord},
};

pub const NUM_MINTED: &str = "Num_minted";
pub const NUM_REPAID: &str = "Num_repaid";
pub const DIFF_MINT_REPAY: &str = "Diff_mint_repay";
pub const DAI_PRICE: &str = "Dai_price";
pub const ETH_PRICE: &str = "Eth_price";

/// Fetches the daily DAI market rows and truncates them to `granularity`.
#[instrument(skip(api))]
pub async fn get_dai_market(
    api: &(dyn AnalyticsApi + Send + Sync),
    url: &str,
    granularity: Granularity,
) -> Result<Frame> {
    let daily = flipside::fetch_frame(api, url).await?;
    let truncated = trunc_by(&daily, granularity);
    debug!(
        daily_rows = daily.len(),
        rows = truncated.len(),
        "truncated dai market"
    );
    Ok(truncated)
}

/// Like [`get_dai_market`], stacked into one long series per metric.
pub async fn get_dai_market_long(
    api: &(dyn AnalyticsApi + Send + Sync),
    url: &str,
    granularity: Granularity,
) -> Result<Vec<LongRecord>> {
    let frame = get_dai_market(api, url, granularity).await?;
    Ok(to_long_format(&frame))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::flipside::MockAnalyticsApi;

    fn api_with_rows(rows: serde_json::Value) -> MockAnalyticsApi {
        let mut api = MockAnalyticsApi::new();
        api.expect_fetch_records()
            .returning(move |_| Ok(serde_json::from_value(rows.clone()).unwrap()));
        api
    }

    fn week_of_rows() -> serde_json::Value {
        json!([
            {"DATE": "2022-06-07", "NUM_MINTED": 2, "NUM_REPAID": 1, "DIFF_MINT_REPAY": 1, "DAI_PRICE": 1.0, "ETH_PRICE": 1800},
            {"DATE": "2022-06-06", "NUM_MINTED": 1, "NUM_REPAID": 1, "DIFF_MINT_REPAY": 0, "DAI_PRICE": 1.0, "ETH_PRICE": 1900},
            {"DATE": "2022-06-13", "NUM_MINTED": 4, "NUM_REPAID": 2, "DIFF_MINT_REPAY": 2, "DAI_PRICE": 1.0, "ETH_PRICE": 1200}
        ])
    }

    #[tokio::test]
    async fn daily_drops_today() {
        let api = api_with_rows(week_of_rows());
        let frame = get_dai_market(&api, "https://example.com", Granularity::Daily)
            .await
            .unwrap();
        assert_eq!(frame.len(), 2);
        assert_eq!(
            frame.columns(),
            [NUM_MINTED, NUM_REPAID, DIFF_MINT_REPAY, DAI_PRICE, ETH_PRICE]
        );
        assert_eq!(frame.column(ETH_PRICE).unwrap(), vec![1900.0, 1800.0]);
    }

    #[tokio::test]
    async fn weekly_sums_every_metric() {
        let api = api_with_rows(week_of_rows());
        let frame = get_dai_market(&api, "https://example.com", Granularity::Weekly)
            .await
            .unwrap();
        assert_eq!(frame.column(NUM_MINTED).unwrap(), vec![3.0, 4.0]);
        assert_eq!(frame.column(DIFF_MINT_REPAY).unwrap(), vec![1.0, 2.0]);
        assert_eq!(frame.column(DAI_PRICE).unwrap(), vec![2.0, 1.0]);
    }

    #[tokio::test]
    async fn long_format_has_a_record_per_metric_and_day() {
        let api = api_with_rows(week_of_rows());
        let long = get_dai_market_long(&api, "https://example.com", Granularity::Daily)
            .await
            .unwrap();
        assert_eq!(long.len(), 2 * 5);
        assert_eq!(long[0].context, "Num minted");
        assert_eq!(long[9].context, "Eth price");
    }

    #[tokio::test]
    async fn empty_response_degrades_to_empty_views() {
        let api = api_with_rows(json!([]));
        for granularity in enum_iterator::all::<Granularity>() {
            let frame = get_dai_market(&api, "https://example.com", granularity)
                .await
                .unwrap();
            assert!(frame.is_empty());
            let long = get_dai_market_long(&api, "https://example.com", granularity)
                .await
                .unwrap();
            assert!(long.is_empty());
        }
    }
}
