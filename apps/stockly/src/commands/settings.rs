//! # Settings Commands
//!
//! Store preferences. Currently the checkout tax rate.

use tracing::info;

use crate::error::ApiError;
use crate::state::DbState;
use stockly_core::validation::validate_tax_rate;

/// The saved tax rate in percent, or the default when none was saved.
pub async fn get_tax_rate(state: &DbState) -> Result<f64, ApiError> {
    Ok(state.db()?.settings().tax_rate().await?)
}

/// Saves the tax rate (percent, 0 to 100).
pub async fn save_tax_rate(state: &DbState, rate: f64) -> Result<f64, ApiError> {
    let db = state.db()?;
    validate_tax_rate(rate)?;

    db.settings().save_tax_rate(rate).await?;
    info!(rate, "Tax rate saved");
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;
    use crate::error::ErrorCode;
    use stockly_core::DEFAULT_TAX_RATE;

    #[tokio::test]
    async fn test_tax_rate_round_trip() {
        let state = test_support::state().await;
        assert_eq!(get_tax_rate(&state).await.unwrap(), DEFAULT_TAX_RATE);

        save_tax_rate(&state, 15.0).await.unwrap();
        assert_eq!(get_tax_rate(&state).await.unwrap(), 15.0);
    }

    #[tokio::test]
    async fn test_out_of_range_rate_is_rejected() {
        let state = test_support::state().await;

        let err = save_tax_rate(&state, 150.0).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(get_tax_rate(&state).await.unwrap(), DEFAULT_TAX_RATE);
    }

    #[tokio::test]
    async fn test_degraded_state() {
        let state = DbState::unavailable("no store");
        assert_eq!(
            get_tax_rate(&state).await.unwrap_err().code,
            ErrorCode::ConnectionError
        );
    }
}
