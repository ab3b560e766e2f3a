//! Local input validation shared by the workflows.
//!
//! All inputs arrive as the raw text the user typed. Parsing happens here,
//! before any request is built.

pub const INVALID_COORDINATES: &str = "Latitude/longitude inválidas";
pub const INVALID_AMOUNT: &str = "Valor da proposta inválido";
pub const INVALID_FRACTION: &str = "Fração deve estar entre 0 e 100";
pub const INVALID_PROPOSAL_ID: &str = "ID da proposta inválido";
pub const MISSING_TX_REFERENCE: &str = "Informe a referência da transação";
pub const MISSING_MATRICULA: &str = "Informe a matrícula";
pub const INVALID_MATRICULA: &str = "Matrícula inválida";
pub const MISSING_WALLET: &str = "Informe a carteira";
pub const MISSING_ADMIN_SECRET: &str = "Informe o segredo de administrador";
pub const INVALID_ROLE: &str = "Papel inválido";

/// Returns the trimmed text, or `None` when it is blank.
pub fn non_blank(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Same as [`non_blank`] for optional fields.
pub fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.and_then(non_blank).map(str::to_string)
}

/// Parses a finite number; `inf`/`NaN` spellings are rejected.
pub fn parse_finite(raw: &str) -> Option<f64> {
    non_blank(raw)?
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

pub fn parse_coordinates(latitude: &str, longitude: &str) -> Result<(f64, f64), String> {
    match (parse_finite(latitude), parse_finite(longitude)) {
        (Some(lat), Some(lon)) => Ok((lat, lon)),
        _ => Err(INVALID_COORDINATES.to_string()),
    }
}

pub fn parse_amount(raw: &str) -> Result<f64, String> {
    parse_finite(raw)
        .filter(|amount| *amount > 0.0)
        .ok_or_else(|| INVALID_AMOUNT.to_string())
}

/// A blank fraction means "whole property"; anything else must be in (0, 100].
pub fn parse_fraction(raw: Option<&str>) -> Result<Option<f64>, String> {
    let Some(text) = raw.and_then(non_blank) else {
        return Ok(None);
    };
    parse_finite(text)
        .filter(|fraction| *fraction > 0.0 && *fraction <= 100.0)
        .map(Some)
        .ok_or_else(|| INVALID_FRACTION.to_string())
}

pub fn parse_proposal_id(raw: &str) -> Result<u64, String> {
    non_blank(raw)
        .and_then(|text| text.parse::<u64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| INVALID_PROPOSAL_ID.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_must_both_be_finite_numbers() {
        assert_eq!(parse_coordinates(" -23.55 ", "-46.63"), Ok((-23.55, -46.63)));
        for (lat, lon) in [("abc", "1"), ("1", ""), ("NaN", "1"), ("1", "inf"), ("1,5", "2")] {
            assert_eq!(
                parse_coordinates(lat, lon),
                Err(INVALID_COORDINATES.to_string()),
                "lat={lat:?} lon={lon:?}"
            );
        }
    }

    #[test]
    fn amount_must_be_positive() {
        assert_eq!(parse_amount("1500.50"), Ok(1500.5));
        for raw in ["0", "-1", "", "dez", "infinity"] {
            assert!(parse_amount(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn fraction_bounds_are_exclusive_zero_inclusive_hundred() {
        assert_eq!(parse_fraction(None), Ok(None));
        assert_eq!(parse_fraction(Some("   ")), Ok(None));
        assert_eq!(parse_fraction(Some("100")), Ok(Some(100.0)));
        assert_eq!(parse_fraction(Some("0.5")), Ok(Some(0.5)));
        for raw in ["0", "100.01", "-3", "metade"] {
            assert_eq!(parse_fraction(Some(raw)), Err(INVALID_FRACTION.to_string()));
        }
    }

    #[test]
    fn proposal_id_must_be_positive_integer() {
        assert_eq!(parse_proposal_id(" 42 "), Ok(42));
        for raw in ["0", "-4", "1.5", "", "abc"] {
            assert_eq!(parse_proposal_id(raw), Err(INVALID_PROPOSAL_ID.to_string()));
        }
    }
}
