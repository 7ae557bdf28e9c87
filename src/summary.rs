use crate::pricing::PricingResponse;
use serde::Serialize;

/// Headline numbers shown next to the plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub ticker: String,
    pub underlying_price: f64,
    /// Root node price of the lattice.
    pub option_price: f64,
    pub risk_free_rate: f64,
    pub ewm_volatility: f64,
}

impl Summary {
    /// `None` when the response carries no lattice nodes.
    pub fn from_response(resp: &PricingResponse) -> Option<Self> {
        let root = resp.points.first()?;
        Some(Self {
            ticker: resp.ticker.clone(),
            underlying_price: resp.price,
            option_price: root.price,
            risk_free_rate: resp.risk_free_rate,
            ewm_volatility: resp.ewm_volatility,
        })
    }

    fn lines(&self) -> [String; 4] {
        [
            format!("{} Price: ${:.2}", self.ticker, self.underlying_price),
            format!("Modeled Option Price: ${:.2}", self.option_price),
            format!("Risk-Free Rate: {:.5}", self.risk_free_rate),
            format!("252-Day EWMA Volatility: {:.4}", self.ewm_volatility),
        ]
    }

    /// Snippet for the stats panel. The ticker is escaped, it comes straight from the form.
    pub fn render_html(&self) -> String {
        let mut lines = self.lines();
        lines[0] = format!("{} Price: ${:.2}", escape_html(&self.ticker), self.underlying_price);
        lines.join("<br>\n")
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
