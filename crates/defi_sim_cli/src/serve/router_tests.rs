use super::{build_app, AppState};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use defi_sim::{PoolRegistry, Simulator, StakingPool, Token};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

fn app() -> Router {
    build_app(AppState {
        simulator: Simulator::default(),
    })
}

fn app_with_sol() -> Router {
    let sol = StakingPool::new(2, Token::new("SOL").unwrap(), "SOL Staking Pool", 10.0);
    let registry = PoolRegistry::new([StakingPool::eth_default(), sol], Some(1)).unwrap();
    build_app(AppState {
        simulator: Simulator::new(registry),
    })
}

fn strict_app_without_fallback() -> Router {
    let registry = PoolRegistry::new([StakingPool::eth_default()], None).unwrap();
    build_app(AppState {
        simulator: Simulator::new(registry).with_strict_validation(true),
    })
}

fn simulate_request(body: &str) -> Request<Body> {
    Request::builder()
        .uri("/api/simulate/staking")
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_body(res: axum::http::Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(res.into_body(), 1024 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

async fn read_json<T: DeserializeOwned>(res: axum::http::Response<Body>) -> T {
    serde_json::from_slice(&read_body(res).await).expect("json")
}

#[tokio::test]
async fn health_ok() {
    let res = app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = read_json(res).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn simulate_one_year_eth() {
    let res = app()
        .oneshot(simulate_request(
            r#"{"pool_id":1,"amount_staked":1000,"duration_days":365}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = read_json(res).await;
    assert_eq!(body["pool_id"], 1);
    assert_eq!(body["pool_name"], "ETH Staking Pool");
    assert_eq!(body["amount_staked"], 1000.0);
    assert_eq!(body["duration_days"], 365);
    assert_eq!(body["earnings"], 250.0);
}

#[tokio::test]
async fn zero_amount_and_zero_duration_earn_nothing() {
    let app = app();
    for body in [
        r#"{"pool_id":1,"amount_staked":0,"duration_days":365}"#,
        r#"{"pool_id":1,"amount_staked":1000,"duration_days":0}"#,
    ] {
        let res = app.clone().oneshot(simulate_request(body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json: serde_json::Value = read_json(res).await;
        assert_eq!(json["earnings"], 0.0);
    }
}

#[tokio::test]
async fn identical_requests_give_identical_bodies() {
    let app = app();
    let body = r#"{"pool_id":1,"amount_staked":4321.5,"duration_days":73}"#;
    let a = read_body(app.clone().oneshot(simulate_request(body)).await.unwrap()).await;
    let b = read_body(app.clone().oneshot(simulate_request(body)).await.unwrap()).await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn unknown_pool_returns_eth_pool_by_default() {
    let res = app()
        .oneshot(simulate_request(
            r#"{"pool_id":999,"amount_staked":1000,"duration_days":365}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = read_json(res).await;
    assert_eq!(body["pool_id"], 1);
    assert_eq!(body["pool_name"], "ETH Staking Pool");
    assert_eq!(body["earnings"], 250.0);
}

#[tokio::test]
async fn unknown_pool_is_404_without_fallback() {
    let res = strict_app_without_fallback()
        .oneshot(simulate_request(
            r#"{"pool_id":999,"amount_staked":1000,"duration_days":365}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = read_json(res).await;
    assert_eq!(body["kind"], "pool_not_found");
    assert!(body.get("earnings").is_none());
}

#[tokio::test]
async fn known_pool_is_used_when_present() {
    let res = app_with_sol()
        .oneshot(simulate_request(
            r#"{"pool_id":2,"amount_staked":365,"duration_days":100}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = read_json(res).await;
    assert_eq!(body["pool_name"], "SOL Staking Pool");
    assert_eq!(body["earnings"], 10.0);
}

#[tokio::test]
async fn earnings_round_like_two_place_decimal_rounding() {
    let res = app()
        .oneshot(simulate_request(
            r#"{"pool_id":1,"amount_staked":9471.22,"duration_days":3285}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = read_json(res).await;
    assert_eq!(body["earnings"], 21310.24);
}

#[tokio::test]
async fn missing_field_is_422_without_result() {
    let res = app()
        .oneshot(simulate_request(r#"{"pool_id":1,"duration_days":365}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = String::from_utf8(read_body(res).await).unwrap();
    assert!(body.contains("amount_staked"));
    assert!(!body.contains("earnings"));
}

#[tokio::test]
async fn mistyped_field_is_422() {
    let res = app()
        .oneshot(simulate_request(
            r#"{"pool_id":"one","amount_staked":1000,"duration_days":365}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn fractional_duration_is_422() {
    let res = app()
        .oneshot(simulate_request(
            r#"{"pool_id":1,"amount_staked":1000,"duration_days":1.5}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn malformed_json_is_422() {
    let res = app()
        .oneshot(simulate_request(r#"{"pool_id":1,"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = read_json(res).await;
    assert_eq!(body["kind"], "invalid_body");
}

#[tokio::test]
async fn missing_content_type_is_422() {
    let res = app()
        .oneshot(
            Request::builder()
                .uri("/api/simulate/staking")
                .method("POST")
                .body(Body::from(
                    r#"{"pool_id":1,"amount_staked":1000,"duration_days":365}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = read_json(res).await;
    assert_eq!(body["kind"], "invalid_body");
}

#[tokio::test]
async fn negative_inputs_compute_through_by_default() {
    let app = app();
    for body in [
        r#"{"pool_id":1,"amount_staked":-1000,"duration_days":365}"#,
        r#"{"pool_id":1,"amount_staked":1000,"duration_days":-365}"#,
    ] {
        let res = app.clone().oneshot(simulate_request(body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json: serde_json::Value = read_json(res).await;
        assert_eq!(json["earnings"], -250.0);
    }
}

#[tokio::test]
async fn strict_rejects_negative_inputs_with_kind() {
    let app = strict_app_without_fallback();
    for (body, kind) in [
        (
            r#"{"pool_id":1,"amount_staked":-1,"duration_days":10}"#,
            "negative_amount",
        ),
        (
            r#"{"pool_id":1,"amount_staked":1,"duration_days":-10}"#,
            "negative_duration",
        ),
    ] {
        let res = app.clone().oneshot(simulate_request(body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json: serde_json::Value = read_json(res).await;
        assert_eq!(json["kind"], kind);
    }
}

#[tokio::test]
async fn huge_duration_is_finite() {
    let res = app()
        .oneshot(simulate_request(
            r#"{"pool_id":1,"amount_staked":1000,"duration_days":1000000}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = read_json(res).await;
    let earnings = body["earnings"].as_f64().unwrap();
    assert!(earnings.is_finite());
    assert_eq!(earnings, 684_931.51);
}

#[tokio::test]
async fn pools_listing_is_ordered() {
    let res = app_with_sol()
        .oneshot(
            Request::builder()
                .uri("/api/pools")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let pools: Vec<StakingPool> = read_json(res).await;
    let ids: Vec<i64> = pools.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(pools[0].token.name, "ETH");
}

#[tokio::test]
async fn get_on_simulate_is_405() {
    let res = app()
        .oneshot(
            Request::builder()
                .uri("/api/simulate/staking")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}
