use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

/// Upper bound (inclusive) on days to expiry.
pub const MAX_DAYS: f64 = 60.0;
/// Upper bound (inclusive) on lattice depth.
pub const MAX_DEPTH: u32 = 200;

// ── Raw form input ──

/// The five form values exactly as typed. Missing keys decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FormFields {
    pub ticker: String,
    pub days: String,
    pub strike: String,
    #[serde(rename = "type")]
    pub option_type: String,
    pub depth: String,
}

impl FormFields {
    #[cfg(test)]
    pub fn new(ticker: &str, days: &str, strike: &str, option_type: &str, depth: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            days: days.to_string(),
            strike: strike.to_string(),
            option_type: option_type.to_string(),
            depth: depth.to_string(),
        }
    }

    #[inline]
    pub fn all_present(&self) -> bool {
        [&self.ticker, &self.days, &self.strike, &self.option_type, &self.depth]
            .iter()
            .all(|v| !v.is_empty())
    }
}

// ── Verdicts ──

/// The four fields that carry a format/range check. Ticker is presence-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Days,
    Strike,
    Type,
    Depth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldVerdict {
    pub field: Field,
    pub valid: bool,
}

/// Outcome of one validation pass. Holds no verdicts when a field was empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationState {
    pub verdicts: SmallVec<[FieldVerdict; 4]>,
    pub valid: bool,
}

impl ValidationState {
    pub fn incomplete() -> Self {
        Self {
            verdicts: SmallVec::new(),
            valid: false,
        }
    }

    /// `None` when the pass stopped at the presence check.
    pub fn verdict(&self, field: Field) -> Option<bool> {
        self.verdicts.iter().find(|v| v.field == field).map(|v| v.valid)
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.verdicts.iter().filter(|v| !v.valid).map(|v| v.field)
    }

    #[inline]
    pub fn submit_enabled(&self) -> bool {
        self.valid
    }
}

/// Run every field check. Pure function; the caller decides how to display markers.
pub fn validate(form: &FormFields) -> ValidationState {
    if !form.all_present() {
        return ValidationState::incomplete();
    }

    let verdicts: SmallVec<[FieldVerdict; 4]> = smallvec![
        FieldVerdict { field: Field::Days, valid: check_days(&form.days) },
        FieldVerdict { field: Field::Strike, valid: check_strike(&form.strike) },
        FieldVerdict { field: Field::Type, valid: check_type(&form.option_type) },
        FieldVerdict { field: Field::Depth, valid: check_depth(&form.depth) },
    ];
    let valid = verdicts.iter().all(|v| v.valid);

    ValidationState { verdicts, valid }
}

#[inline]
pub fn check_days(raw: &str) -> bool {
    parse_number(raw).is_some_and(|d| d > 0.0 && d <= MAX_DAYS)
}

#[inline]
pub fn check_strike(raw: &str) -> bool {
    parse_number(raw).is_some_and(|k| k > 0.0)
}

#[inline]
pub fn check_type(raw: &str) -> bool {
    OptionKind::parse(raw).is_some()
}

#[inline]
pub fn check_depth(raw: &str) -> bool {
    parse_depth(raw).is_some_and(|d| (1..=MAX_DEPTH).contains(&d))
}

/// Lenient numeric cast: surrounding whitespace allowed, non-finite rejected.
fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Digits only: no sign, no decimal point, no whitespace.
fn parse_depth(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Overflowing digit strings are out of range anyway.
    raw.parse::<u32>().ok()
}

// ── Typed request ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Call,
    Put,
}

impl OptionKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "call" | "c" => Some(Self::Call),
            "put" | "p" => Some(Self::Put),
            _ => None,
        }
    }
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

/// Payload sent to the pricing service. Only built from a fully valid form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestParams {
    pub ticker: String,
    pub days: f64,
    pub strike: f64,
    /// Sent exactly as typed; the service does its own case folding.
    #[serde(rename = "type")]
    pub option_type: String,
    pub depth: u32,
    #[serde(skip)]
    pub kind: OptionKind,
}

impl RequestParams {
    /// Validate and convert. Returns the failing `ValidationState` otherwise.
    pub fn from_form(form: &FormFields) -> Result<Self, ValidationState> {
        let state = validate(form);
        let (true, Some(days), Some(strike), Some(kind), Some(depth)) = (
            state.valid,
            parse_number(&form.days),
            parse_number(&form.strike),
            OptionKind::parse(&form.option_type),
            parse_depth(&form.depth),
        ) else {
            return Err(state);
        };

        Ok(Self {
            ticker: form.ticker.clone(),
            days,
            strike,
            option_type: form.option_type.clone(),
            depth,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn good_form() -> FormFields {
        FormFields::new("AAPL", "30", "150", "Call", "50")
    }

    #[test]
    fn test_all_in_range_enables_submit() {
        let state = validate(&good_form());
        assert!(state.valid);
        assert!(state.submit_enabled());
        assert_eq!(state.verdicts.len(), 4);
        assert_eq!(state.invalid_fields().count(), 0);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let cases = [
            (FormFields { days: "0".into(), ..good_form() }, Field::Days),
            (FormFields { days: "61".into(), ..good_form() }, Field::Days),
            (FormFields { days: "abc".into(), ..good_form() }, Field::Days),
            (FormFields { strike: "0".into(), ..good_form() }, Field::Strike),
            (FormFields { strike: "-10".into(), ..good_form() }, Field::Strike),
            (FormFields { depth: "0".into(), ..good_form() }, Field::Depth),
            (FormFields { depth: "201".into(), ..good_form() }, Field::Depth),
            (FormFields { depth: "12.5".into(), ..good_form() }, Field::Depth),
            (FormFields { depth: "-5".into(), ..good_form() }, Field::Depth),
        ];
        for (form, field) in cases {
            let state = validate(&form);
            assert!(!state.valid, "should be invalid: {form:?}");
            assert_eq!(state.verdict(field), Some(false), "{form:?}");
            assert_eq!(state.invalid_fields().collect::<Vec<_>>(), vec![field]);
        }
    }

    #[test]
    fn test_days_bounds_inclusive() {
        assert!(check_days("60"));
        assert!(check_days("0.5"));
        assert!(check_days(" 30 "));
        assert!(!check_days("60.0001"));
        assert!(!check_days("NaN"));
        assert!(!check_days("inf"));
        assert!(!check_days("   "));
        assert!(!check_days("0x10"));
    }

    #[test]
    fn test_non_finite_and_hex_rejected() {
        assert!(check_strike("1e3"));
        assert!(!check_strike("Infinity"));
        assert!(!check_strike("0x10"));
        assert!(!check_days("Infinity"));
    }

    #[test]
    fn test_type_case_insensitive_aliases() {
        for ok in ["CALL", "call", "C", "put", "P", "Put", "c", "pUt"] {
            assert!(check_type(ok), "{ok} should validate");
        }
        for bad in ["buy", "calls", "", " call"] {
            assert!(!check_type(bad), "{bad:?} should not validate");
        }
    }

    #[test]
    fn test_depth_requires_pure_digits() {
        assert!(check_depth("50"));
        assert!(check_depth("1"));
        assert!(check_depth("200"));
        assert!(check_depth("007"));
        assert!(!check_depth("50.0"));
        assert!(!check_depth("+50"));
        assert!(!check_depth(" 50"));
        assert!(!check_depth("99999999999999999999"));
    }

    #[test]
    fn test_empty_field_short_circuits() {
        let forms = [
            FormFields { ticker: String::new(), ..good_form() },
            FormFields { days: String::new(), ..good_form() },
            FormFields { option_type: String::new(), depth: "0".into(), ..good_form() },
            FormFields::default(),
        ];
        for form in forms {
            let state = validate(&form);
            assert!(!state.valid);
            assert!(!state.submit_enabled());
            assert!(state.verdicts.is_empty(), "no verdicts expected: {form:?}");
            assert_eq!(state.verdict(Field::Days), None);
        }
    }

    #[test]
    fn test_fixing_one_field_only_clears_that_marker() {
        let broken = FormFields { days: "0".into(), depth: "500".into(), ..good_form() };
        let before = validate(&broken);
        assert_eq!(before.verdict(Field::Days), Some(false));
        assert_eq!(before.verdict(Field::Depth), Some(false));

        let fixed = FormFields { days: "10".into(), ..broken };
        let after = validate(&fixed);
        assert_eq!(after.verdict(Field::Days), Some(true));
        assert_eq!(after.verdict(Field::Depth), Some(false));
        assert_eq!(after.verdict(Field::Strike), Some(true));
        assert!(!after.valid);
    }

    #[test]
    fn test_ticker_is_presence_only() {
        let form = FormFields { ticker: "not a ticker $$".into(), ..good_form() };
        assert!(validate(&form).valid);
    }

    #[test]
    fn test_request_params_normalization() {
        let form = FormFields::new("MSFT", "12.5", "300.25", "PuT", "075");
        let params = RequestParams::from_form(&form).unwrap();
        assert_eq!(params.ticker, "MSFT");
        assert_eq!(params.days, 12.5);
        assert_eq!(params.strike, 300.25);
        assert_eq!(params.option_type, "PuT");
        assert_eq!(params.kind, OptionKind::Put);
        assert_eq!(params.depth, 75);

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "ticker": "MSFT", "days": 12.5, "strike": 300.25, "type": "PuT", "depth": 75
            })
        );
    }

    #[test]
    fn test_request_params_refused_when_invalid() {
        let form = FormFields { strike: "0".into(), ..good_form() };
        let state = RequestParams::from_form(&form).unwrap_err();
        assert!(!state.valid);
        assert_eq!(state.verdict(Field::Strike), Some(false));
    }

    #[test]
    fn test_form_decodes_type_key() {
        let form: FormFields =
            serde_json::from_str(r#"{"ticker":"AAPL","days":"30","strike":"150","type":"c"}"#).unwrap();
        assert_eq!(form.option_type, "c");
        assert!(form.depth.is_empty());
    }
}
