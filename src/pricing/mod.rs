pub mod client;
pub mod types;

pub use client::PricingClient;
pub use types::PricingResponse;

/// In-process stand-in for the pricing service, bound to an ephemeral port.
#[cfg(test)]
pub mod mock {
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::time::Duration;

    pub const UNKNOWN_TICKER: &str = "NOPE";
    /// Ticker that makes the mock hold the response for a while.
    pub const SLOW_TICKER: &str = "SLOW";
    /// Ticker that gets a 200 envelope with no lattice nodes.
    pub const EMPTY_TICKER: &str = "EMPTY";

    async fn bopm(Json(req): Json<Value>) -> Json<Value> {
        let well_formed = req["ticker"].is_string()
            && req["days"].is_number()
            && req["strike"].is_number()
            && req["type"].is_string()
            && req["depth"].is_u64();
        if !well_formed {
            return Json(json!({
                "statusCode": 400,
                "body": json!({ "error": "malformed request" }).to_string(),
            }));
        }
        if req["ticker"] == UNKNOWN_TICKER {
            return Json(json!({
                "statusCode": 400,
                "body": json!({ "error": "unknown ticker" }).to_string(),
            }));
        }
        if req["ticker"] == EMPTY_TICKER {
            let body = json!({
                "ticker": EMPTY_TICKER,
                "price": 10.0,
                "risk_free_rate": 0.01,
                "ewm_volatility": 0.2,
                "points": [],
                "depth": req["depth"],
            });
            return Json(json!({ "statusCode": 200, "body": body.to_string() }));
        }
        if req["ticker"] == SLOW_TICKER {
            tokio::time::sleep(Duration::from_millis(300)).await;
        }

        // ECHO reflects the option type back through the ticker slot.
        let ticker = if req["ticker"] == "ECHO" { req["type"].clone() } else { req["ticker"].clone() };
        let body = json!({
            "ticker": ticker,
            "price": 182.31459,
            "risk_free_rate": 0.0153219,
            "ewm_volatility": 0.271449,
            "points": [[0.0, 0, 5.5], [0.5, 1, 7.25], [1.0, 2, 4.0]],
            "depth": req["depth"],
        });
        Json(json!({ "statusCode": 200, "body": body.to_string() }))
    }

    async fn broken() -> (StatusCode, &'static str) {
        (StatusCode::INTERNAL_SERVER_ERROR, "internal failure")
    }

    /// Start the mock and return its base url.
    pub async fn spawn() -> String {
        let app = Router::new()
            .route("/bopm", post(bopm))
            .route("/broken", post(broken));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }
}
