use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReturnError {
    #[error("Price at index {index} is zero, returns are undefined")]
    ZeroPrice { index: usize },
    #[error("Price at index {index} is not finite: {value}")]
    NonFinitePrice { index: usize, value: f64 },
    #[error("Price at index {index} is negative: {value}")]
    NonPositivePrice { index: usize, value: f64 },
}

//calculates single-period returns from an ordered price series
//r[i] = (p[i+1] - p[i]) / p[i]
//fewer than 2 prices yields an empty series rather than an error
pub fn compute_returns(prices: &[f64]) -> Result<Vec<f64>, ReturnError> {
    if prices.len() < 2 {
        return Ok(vec![]);
    }

    //every price must be finite and positive, including the last one
    for (index, &value) in prices.iter().enumerate() {
        if !value.is_finite() {
            return Err(ReturnError::NonFinitePrice { index, value });
        }
        if value == 0.0 {
            return Err(ReturnError::ZeroPrice { index });
        }
        if value < 0.0 {
            return Err(ReturnError::NonPositivePrice { index, value });
        }
    }

    let mut returns = Vec::with_capacity(prices.len() - 1);
    for i in 1..prices.len() {
        returns.push((prices[i] - prices[i - 1]) / prices[i - 1]);
    }

    Ok(returns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn returns_match_adjacent_pairs() {
        let returns = compute_returns(&[100.0, 110.0, 99.0]).unwrap();
        assert_eq!(returns.len(), 2);
        assert_relative_eq!(returns[0], 0.10, epsilon = 1e-12);
        assert_relative_eq!(returns[1], -0.10, epsilon = 1e-12);
    }

    #[test]
    fn cumulative_product_reproduces_prices() {
        let prices = [42.0, 43.5, 41.25, 41.25, 50.0, 12.75, 13.0];
        let returns = compute_returns(&prices).unwrap();
        assert_eq!(returns.len(), prices.len() - 1);

        let mut rebuilt = vec![prices[0]];
        for r in &returns {
            let last = *rebuilt.last().unwrap();
            rebuilt.push(last * (1.0 + r));
        }

        for (expected, actual) in prices.iter().zip(rebuilt.iter()) {
            assert_relative_eq!(*expected, *actual, max_relative = 1e-12);
        }
    }

    #[test]
    fn short_series_yields_no_returns() {
        assert!(compute_returns(&[]).unwrap().is_empty());
        assert!(compute_returns(&[100.0]).unwrap().is_empty());
    }

    #[test]
    fn zero_price_is_rejected() {
        let err = compute_returns(&[100.0, 0.0, 50.0]).unwrap_err();
        assert_eq!(err, ReturnError::ZeroPrice { index: 1 });
    }

    #[test]
    fn zero_last_price_is_rejected() {
        let err = compute_returns(&[100.0, 0.0]).unwrap_err();
        assert_eq!(err, ReturnError::ZeroPrice { index: 1 });
    }

    #[test]
    fn negative_price_is_rejected() {
        let err = compute_returns(&[100.0, -5.0, 50.0]).unwrap_err();
        assert_eq!(
            err,
            ReturnError::NonPositivePrice {
                index: 1,
                value: -5.0
            }
        );
    }

    #[test]
    fn non_finite_price_is_rejected() {
        let err = compute_returns(&[100.0, 101.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, ReturnError::NonFinitePrice { index: 2, .. }));
    }
}
