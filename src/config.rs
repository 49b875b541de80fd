//! Tunables for a session. Defaults reproduce the stock demo page.

/// Popup text used when a sign carries no `data-content`.
pub const DEFAULT_SIGN_TEXT: &str = "기본 팝업 내용입니다.";

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Pixels moved per frame per held direction.
    pub move_amount: f64,
    pub start_x: f64,
    pub start_y: f64,
    pub default_sign_text: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            move_amount: 4.0,
            start_x: 50.0,
            start_y: 600.0,
            default_sign_text: DEFAULT_SIGN_TEXT.to_owned(),
        }
    }
}

#[cfg(feature = "serde_json")]
impl Config {
    /// Parse a (possibly partial) JSON object; absent fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = Config::default();
        assert_eq!(c.move_amount, 4.0);
        assert_eq!((c.start_x, c.start_y), (50.0, 600.0));
        assert_eq!(c.default_sign_text, DEFAULT_SIGN_TEXT);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_partial_json_keeps_defaults() {
        let c = Config::from_json(r#"{"move_amount": 6, "default_sign_text": "hello"}"#).unwrap();
        assert_eq!(c.move_amount, 6.0);
        assert_eq!(c.start_x, 50.0);
        assert_eq!(c.default_sign_text, "hello");
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Config::from_json("{move_amount:").is_err());
    }
}
