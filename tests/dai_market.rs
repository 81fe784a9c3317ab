use dai_market::{
    dai_market::{get_dai_market, get_dai_market_long, NUM_MINTED, NUM_REPAID},
    flipside::FlipsideHttp,
    granularity::Granularity,
};
use serde_json::json;

fn flipside_rows() -> String {
    json!([
        {"DATE": "2021-01-08 00:00:00.000", "NUM_MINTED": 5, "NUM_REPAID": 2, "DIFF_MINT_REPAY": 3, "DAI_PRICE": 1.0, "ETH_PRICE": 1200.0},
        {"DATE": "2021-01-01 00:00:00.000", "NUM_MINTED": 10, "NUM_REPAID": 4, "DIFF_MINT_REPAY": 6, "DAI_PRICE": 1.0, "ETH_PRICE": 730.0},
        {"DATE": "2021-01-05 00:00:00.000", "NUM_MINTED": 1, "NUM_REPAID": 1, "DIFF_MINT_REPAY": 0, "DAI_PRICE": 1.0, "ETH_PRICE": 1100.0}
    ])
    .to_string()
}

#[tokio::test]
async fn weekly_dai_market_from_flipside() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v2/queries/dai/data/latest")
        .with_status(200)
        .with_body(flipside_rows())
        .create_async()
        .await;
    let url = format!("{}/api/v2/queries/dai/data/latest", server.url());

    let frame = get_dai_market(&FlipsideHttp::new(), &url, Granularity::Weekly)
        .await
        .unwrap();

    let dates = frame
        .dates()
        .iter()
        .map(|date| date.to_string())
        .collect::<Vec<_>>();
    assert_eq!(dates, vec!["2020-12-28", "2021-01-04"]);
    assert_eq!(frame.column(NUM_MINTED).unwrap(), vec![10.0, 6.0]);
    assert_eq!(frame.column(NUM_REPAID).unwrap(), vec![4.0, 3.0]);
}

#[tokio::test]
async fn daily_long_dai_market_from_flipside() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/dai")
        .with_status(200)
        .with_body(flipside_rows())
        .create_async()
        .await;

    let long = get_dai_market_long(
        &FlipsideHttp::new(),
        &format!("{}/dai", server.url()),
        Granularity::Daily,
    )
    .await
    .unwrap();

    // The latest day is dropped, leaving two days of five metrics.
    assert_eq!(long.len(), 10);
    assert!(long.iter().all(|record| record.date.to_string() != "2021-01-08"));
    assert_eq!(long[0].context, "Num minted");
    assert_eq!(long[0].amount, 10.0);
}

#[tokio::test]
async fn unavailable_flipside_gives_empty_views() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/dai")
        .with_status(503)
        .create_async()
        .await;
    let url = format!("{}/dai", server.url());

    for granularity in [Granularity::Daily, Granularity::Weekly, Granularity::Monthly] {
        let frame = get_dai_market(&FlipsideHttp::new(), &url, granularity)
            .await
            .unwrap();
        assert!(frame.is_empty(), "{granularity}");
    }
}
