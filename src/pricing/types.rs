use crate::errors::{VizError, VizResult};
use crate::plot::LatticePoint;
use serde::{Deserialize, Serialize};

// ── Response envelope ──
//
// The service answers with a proxy-style envelope whose body is itself a
// JSON-encoded string:
// {
//   "statusCode": 200,
//   "body": "{\"ticker\": \"AAPL\", \"price\": 182.3, \"risk_free_rate\": 0.0153,
//             \"ewm_volatility\": 0.2714, \"points\": [[0, 0, 4.81], ...], \"depth\": 50}"
// }
// On failure the body carries `{"error": "..."}` instead.

#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PricingResponse {
    pub ticker: String,
    /// Underlying spot price.
    pub price: f64,
    pub risk_free_rate: f64,
    pub ewm_volatility: f64,
    /// Lattice nodes, root first.
    pub points: Vec<LatticePoint>,
    pub depth: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl Envelope {
    /// Decode the nested body. Anything but status 200 is a service failure.
    pub fn into_response(self) -> VizResult<PricingResponse> {
        if self.status_code == 200 {
            let resp: PricingResponse = serde_json::from_str(&self.body)?;
            return Ok(resp);
        }

        let message = serde_json::from_str::<ErrorBody>(&self.body)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or(self.body);
        Err(VizError::PricingService {
            status: self.status_code,
            message,
        })
    }
}
