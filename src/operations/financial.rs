// ============================================================================
// Financial Operations
// Time-value-of-money and ratio formulas in exact decimal arithmetic
// ============================================================================
//
// Rates are per-period fractions (0.05 = 5%). Compounding uses exact integer
// powers, so period counts must be whole numbers. Quotients are rounded to the
// evaluation's configured precision; products and sums are left exact.

use super::solver::{self, SolverError};
use crate::interfaces::operation::{
    as_f64, require_count, require_non_negative, require_positive, require_unit_interval,
};
use crate::interfaces::{OperandSpec, Operation, OperationFailure, OperationInfo, OperationResult};
use crate::numeric::{Number, NumericConfig};

/// Upper bound on compounding periods accepted by any formula.
pub const MAX_PERIODS: u32 = 10_000;

/// `(1 + rate)^periods`
fn growth_factor(rate: Number, periods: u32) -> Result<Number, OperationFailure> {
    Ok(Number::ONE.checked_add(rate)?.checked_powi(periods)?)
}

fn validate_rate_and_periods(rate: Number, periods: Number) -> Result<(), OperationFailure> {
    require_non_negative(rate, "rate")?;
    require_count(periods, "periods", MAX_PERIODS)?;
    Ok(())
}

fn periods_of(value: Number) -> Result<u32, OperationFailure> {
    require_count(value, "periods", MAX_PERIODS)
}

const AMOUNT_RATE_PERIODS: [OperandSpec; 2] = [
    OperandSpec::new("rate", "interest rate per period, as a fraction"),
    OperandSpec::new("n", "number of compounding periods"),
];

// ============================================================================
// Future / Present Value
// ============================================================================

static FUTURE_VALUE_INFO: OperationInfo = OperationInfo {
    name: "FUTURE_VALUE",
    symbol: "FV",
    arity: 3,
    description: "Value of a lump sum after compounding",
    example: "1000 0.05 10 FV → 1628.89462677744140625",
    operands: &[
        OperandSpec::new("pv", "amount invested today"),
        AMOUNT_RATE_PERIODS[0],
        AMOUNT_RATE_PERIODS[1],
    ],
};

pub struct FutureValue;

impl Operation for FutureValue {
    fn info(&self) -> &'static OperationInfo {
        &FUTURE_VALUE_INFO
    }

    fn validate(&self, args: &[Number]) -> Result<(), OperationFailure> {
        validate_rate_and_periods(args[1], args[2])
    }

    fn compute(&self, args: &[Number], _config: &NumericConfig) -> OperationResult {
        let factor = growth_factor(args[1], periods_of(args[2])?)?;
        Ok(args[0].checked_mul(factor)?)
    }
}

static PRESENT_VALUE_INFO: OperationInfo = OperationInfo {
    name: "PRESENT_VALUE",
    symbol: "PV",
    arity: 3,
    description: "Today's value of a future lump sum",
    example: "1000 0.05 10 PV → 613.9132535408",
    operands: &[
        OperandSpec::new("fv", "amount received in the future"),
        AMOUNT_RATE_PERIODS[0],
        AMOUNT_RATE_PERIODS[1],
    ],
};

pub struct PresentValue;

impl Operation for PresentValue {
    fn info(&self) -> &'static OperationInfo {
        &PRESENT_VALUE_INFO
    }

    fn validate(&self, args: &[Number]) -> Result<(), OperationFailure> {
        validate_rate_and_periods(args[1], args[2])
    }

    fn compute(&self, args: &[Number], config: &NumericConfig) -> OperationResult {
        let factor = growth_factor(args[1], periods_of(args[2])?)?;
        Ok(args[0].checked_div(factor)?.rounded(config))
    }
}

// ============================================================================
// Loan Payment
// ============================================================================

static PAYMENT_INFO: OperationInfo = OperationInfo {
    name: "PAYMENT",
    symbol: "PMT",
    arity: 3,
    description: "Level payment that amortizes a loan (mortgage payment)",
    example: "200000 0.005 360 PMT → 1199.1010503055",
    operands: &[
        OperandSpec::new("principal", "amount borrowed"),
        AMOUNT_RATE_PERIODS[0],
        OperandSpec::new("n", "number of payments"),
    ],
};

pub struct Payment;

impl Operation for Payment {
    fn info(&self) -> &'static OperationInfo {
        &PAYMENT_INFO
    }

    fn validate(&self, args: &[Number]) -> Result<(), OperationFailure> {
        require_non_negative(args[0], "principal")?;
        validate_rate_and_periods(args[1], args[2])?;
        if args[2].is_zero() {
            return Err(OperationFailure::domain("number of payments must be at least 1"));
        }
        Ok(())
    }

    fn compute(&self, args: &[Number], config: &NumericConfig) -> OperationResult {
        let (principal, rate) = (args[0], args[1]);
        let periods = periods_of(args[2])?;

        if rate.is_zero() {
            return Ok(principal.checked_div(Number::from(periods))?.rounded(config));
        }

        // P·r·g / (g − 1) with g = (1 + r)^n
        let growth = growth_factor(rate, periods)?;
        let numerator = principal.checked_mul(rate)?.checked_mul(growth)?;
        let denominator = growth.checked_sub(Number::ONE)?;
        Ok(numerator.checked_div(denominator)?.rounded(config))
    }
}

// ============================================================================
// Bond Price
// ============================================================================

static BOND_PRICE_INFO: OperationInfo = OperationInfo {
    name: "BOND_PRICE",
    symbol: "BOND",
    arity: 4,
    description: "Price of a level-coupon bond at a given yield",
    example: "1000 0.05 0.06 10 BOND → 926.3991294859",
    operands: &[
        OperandSpec::new("face", "face (par) value repaid at maturity"),
        OperandSpec::new("coupon", "coupon rate per period, as a fraction of face"),
        OperandSpec::new("yield", "market yield per period, as a fraction"),
        OperandSpec::new("n", "periods to maturity"),
    ],
};

pub struct BondPrice;

impl Operation for BondPrice {
    fn info(&self) -> &'static OperationInfo {
        &BOND_PRICE_INFO
    }

    fn validate(&self, args: &[Number]) -> Result<(), OperationFailure> {
        require_positive(args[0], "face value")?;
        require_non_negative(args[1], "coupon rate")?;
        require_non_negative(args[2], "yield")?;
        require_count(args[3], "periods", MAX_PERIODS)?;
        Ok(())
    }

    fn compute(&self, args: &[Number], config: &NumericConfig) -> OperationResult {
        let (face, coupon_rate, yld) = (args[0], args[1], args[2]);
        let periods = periods_of(args[3])?;
        let coupon = face.checked_mul(coupon_rate)?;

        if yld.is_zero() {
            let coupons = coupon.checked_mul(Number::from(periods))?;
            return Ok(coupons.checked_add(face)?);
        }

        // C·(1 − g⁻¹)/y + F·g⁻¹
        let discount = Number::ONE.checked_div(growth_factor(yld, periods)?)?;
        let annuity = coupon
            .checked_mul(Number::ONE.checked_sub(discount)?)?
            .checked_div(yld)?;
        let principal = face.checked_mul(discount)?;
        Ok(annuity.checked_add(principal)?.rounded(config))
    }
}

// ============================================================================
// Ratios
// ============================================================================

static CAP_RATE_INFO: OperationInfo = OperationInfo {
    name: "CAP_RATE",
    symbol: "CAPRATE",
    arity: 2,
    description: "Capitalization rate: net operating income over property value",
    example: "50000 625000 CAPRATE → 0.08",
    operands: &[
        OperandSpec::new("noi", "annual net operating income"),
        OperandSpec::new("value", "property value, must be positive"),
    ],
};

pub struct CapRate;

impl Operation for CapRate {
    fn info(&self) -> &'static OperationInfo {
        &CAP_RATE_INFO
    }

    fn validate(&self, args: &[Number]) -> Result<(), OperationFailure> {
        require_positive(args[1], "property value")
    }

    fn compute(&self, args: &[Number], config: &NumericConfig) -> OperationResult {
        Ok(args[0].checked_div(args[1])?.rounded(config))
    }
}

static RETURN_ON_INVESTMENT_INFO: OperationInfo = OperationInfo {
    name: "RETURN_ON_INVESTMENT",
    symbol: "ROI",
    arity: 2,
    description: "Return on investment as a fraction of cost",
    example: "1250 1000 ROI → 0.25",
    operands: &[
        OperandSpec::new("value", "final value of the investment"),
        OperandSpec::new("cost", "amount invested, must be positive"),
    ],
};

pub struct ReturnOnInvestment;

impl Operation for ReturnOnInvestment {
    fn info(&self) -> &'static OperationInfo {
        &RETURN_ON_INVESTMENT_INFO
    }

    fn validate(&self, args: &[Number]) -> Result<(), OperationFailure> {
        require_positive(args[1], "cost")
    }

    fn compute(&self, args: &[Number], config: &NumericConfig) -> OperationResult {
        let gain = args[0].checked_sub(args[1])?;
        Ok(gain.checked_div(args[1])?.rounded(config))
    }
}

static EXPECTED_VALUE_INFO: OperationInfo = OperationInfo {
    name: "EXPECTED_VALUE",
    symbol: "EV",
    arity: 3,
    description: "Expected value of a win/lose proposition",
    example: "0.6 100 50 EV → 40",
    operands: &[
        OperandSpec::new("p", "probability of winning, between 0 and 1"),
        OperandSpec::new("win", "amount gained on a win"),
        OperandSpec::new("loss", "amount lost on a loss"),
    ],
};

pub struct ExpectedValue;

impl Operation for ExpectedValue {
    fn info(&self) -> &'static OperationInfo {
        &EXPECTED_VALUE_INFO
    }

    fn validate(&self, args: &[Number]) -> Result<(), OperationFailure> {
        require_unit_interval(args[0], "probability")
    }

    fn compute(&self, args: &[Number], _config: &NumericConfig) -> OperationResult {
        let (p, win, loss) = (args[0], args[1], args[2]);
        let expected_gain = p.checked_mul(win)?;
        let expected_loss = Number::ONE.checked_sub(p)?.checked_mul(loss)?;
        Ok(expected_gain.checked_sub(expected_loss)?)
    }
}

// ============================================================================
// Rate Solver
// ============================================================================

static INTEREST_RATE_INFO: OperationInfo = OperationInfo {
    name: "INTEREST_RATE",
    symbol: "RATE",
    arity: 3,
    description: "Periodic interest rate implied by a loan and its level payment",
    example: "200000 1199.1010503055 360 RATE → 0.005",
    operands: &[
        OperandSpec::new("principal", "amount borrowed, must be positive"),
        OperandSpec::new("payment", "level payment per period, must be positive"),
        OperandSpec::new("n", "number of payments"),
    ],
};

pub struct InterestRate;

/// Float annuity payment used inside the rate solve.
fn annuity_payment(principal: f64, rate: f64, periods: f64) -> f64 {
    if rate.abs() < 1e-12 {
        principal / periods
    } else {
        principal * rate / (1.0 - (1.0 + rate).powf(-periods))
    }
}

impl Operation for InterestRate {
    fn info(&self) -> &'static OperationInfo {
        &INTEREST_RATE_INFO
    }

    fn validate(&self, args: &[Number]) -> Result<(), OperationFailure> {
        require_positive(args[0], "principal")?;
        require_positive(args[1], "payment")?;
        let periods = require_count(args[2], "periods", MAX_PERIODS)?;
        if periods == 0 {
            return Err(OperationFailure::domain("number of payments must be at least 1"));
        }
        let total_paid = args[1].checked_mul(args[2])?;
        if total_paid < args[0] {
            return Err(OperationFailure::domain("payments do not repay the principal"));
        }
        Ok(())
    }

    fn compute(&self, args: &[Number], config: &NumericConfig) -> OperationResult {
        if args[1].checked_mul(args[2])? == args[0] {
            return Ok(Number::ZERO.rounded(config));
        }

        let principal = as_f64(args[0])?;
        let payment = as_f64(args[1])?;
        let periods = as_f64(args[2])?;

        // payment / principal lies right of the root, where the payment curve
        // is increasing and convex, so Newton descends monotonically
        let guess = payment / principal;
        let rate = solver::newton(|r| annuity_payment(principal, r, periods) - payment, guess)
            .map_err(|err| match err {
                SolverError::NonFinite => OperationFailure::Undefined,
                other => OperationFailure::Domain(format!("rate solve {}", other)),
            })?;

        Number::from_f64_lossy(rate)
            .map(|r| r.rounded(config))
            .map_err(|_| OperationFailure::Undefined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CalcError, Stack, StackItem};

    fn n(text: &str) -> Number {
        text.parse().unwrap()
    }

    fn run(op: &dyn Operation, args: &[&str]) -> Stack {
        let mut stack: Stack = args.iter().map(|a| StackItem::Number(n(a))).collect();
        op.execute_with(&mut stack, &NumericConfig::DEFAULT);
        stack
    }

    fn result(op: &dyn Operation, args: &[&str]) -> Number {
        run(op, args).single_number().expect("single number")
    }

    fn error(op: &dyn Operation, args: &[&str]) -> CalcError {
        let stack = run(op, args);
        assert_eq!(stack.len(), 1, "operation must leave exactly one item");
        stack.top().and_then(|i| i.as_error()).cloned().expect("error result")
    }

    #[test]
    fn test_future_value_is_exact() {
        assert_eq!(
            result(&FutureValue, &["1000", "0.05", "10"]),
            n("1628.89462677744140625")
        );
        assert_eq!(result(&FutureValue, &["1000", "0", "10"]), n("1000"));
        assert_eq!(result(&FutureValue, &["1000", "0.05", "0"]), n("1000"));
    }

    #[test]
    fn test_present_value() {
        assert_eq!(
            result(&PresentValue, &["1000", "0.05", "10"]).to_string(),
            "613.9132535408"
        );
    }

    #[test]
    fn test_rate_and_period_validation() {
        assert_eq!(
            error(&FutureValue, &["1000", "-0.05", "10"]),
            CalcError::domain("FV", "rate cannot be negative")
        );
        assert_eq!(
            error(&PresentValue, &["1000", "0.05", "2.5"]),
            CalcError::domain("PV", "periods must be a whole number between 0 and 10000")
        );
        assert_eq!(error(&PresentValue, &["1000", "0.05", "10001"]).symbol(), Some("PV"));
    }

    #[test]
    fn test_payment() {
        assert_eq!(
            result(&Payment, &["200000", "0.005", "360"]).to_string(),
            "1199.1010503055"
        );
        assert_eq!(
            result(&Payment, &["10000", "0.01", "12"]).to_string(),
            "888.4878867834"
        );
        assert_eq!(result(&Payment, &["1200", "0", "12"]), n("100"));
        assert_eq!(
            error(&Payment, &["1200", "0.01", "0"]),
            CalcError::domain("PMT", "number of payments must be at least 1")
        );
    }

    #[test]
    fn test_bond_price() {
        assert_eq!(
            result(&BondPrice, &["1000", "0.05", "0.06", "10"]).to_string(),
            "926.3991294859"
        );
        // Coupon equal to yield prices at par
        assert_eq!(result(&BondPrice, &["1000", "0.05", "0.05", "10"]), n("1000"));
        assert_eq!(result(&BondPrice, &["1000", "0.05", "0", "10"]), n("1500"));
        assert_eq!(
            error(&BondPrice, &["0", "0.05", "0.05", "10"]),
            CalcError::domain("BOND", "face value must be positive")
        );
    }

    #[test]
    fn test_ratios() {
        assert_eq!(result(&CapRate, &["50000", "625000"]), n("0.08"));
        assert_eq!(
            error(&CapRate, &["50000", "0"]),
            CalcError::domain("CAPRATE", "property value must be positive")
        );

        assert_eq!(result(&ReturnOnInvestment, &["1250", "1000"]), n("0.25"));
        assert_eq!(result(&ReturnOnInvestment, &["750", "1000"]), n("-0.25"));
        assert!(error(&ReturnOnInvestment, &["750", "-1"]).to_string().contains("cost"));
    }

    #[test]
    fn test_expected_value() {
        assert_eq!(result(&ExpectedValue, &["0.6", "100", "50"]), n("40"));
        assert_eq!(result(&ExpectedValue, &["0", "100", "50"]), n("-50"));
        assert_eq!(result(&ExpectedValue, &["1", "100", "50"]), n("100"));
        assert_eq!(
            error(&ExpectedValue, &["1.5", "100", "50"]),
            CalcError::domain("EV", "probability must be between 0 and 1")
        );
        assert_eq!(error(&ExpectedValue, &["-0.1", "100", "50"]).symbol(), Some("EV"));
    }

    #[test]
    fn test_interest_rate_recovers_payment_rate() {
        let rate = result(&InterestRate, &["200000", "1199.1010503055", "360"]);
        let rate = rate.to_f64().unwrap();
        assert!((rate - 0.005).abs() < 1e-9, "rate was {rate}");

        let rate = result(&InterestRate, &["10000", "888.4878867834", "12"])
            .to_f64()
            .unwrap();
        assert!((rate - 0.01).abs() < 1e-9, "rate was {rate}");
    }

    #[test]
    fn test_interest_rate_edge_cases() {
        assert_eq!(result(&InterestRate, &["1200", "100", "12"]), Number::ZERO);
        assert_eq!(
            error(&InterestRate, &["1200", "90", "12"]),
            CalcError::domain("RATE", "payments do not repay the principal")
        );
        assert_eq!(
            error(&InterestRate, &["0", "90", "12"]),
            CalcError::domain("RATE", "principal must be positive")
        );
    }

    #[test]
    fn test_metadata_consistency() {
        let ops: [&dyn Operation; 8] = [
            &FutureValue,
            &PresentValue,
            &Payment,
            &BondPrice,
            &CapRate,
            &ReturnOnInvestment,
            &ExpectedValue,
            &InterestRate,
        ];
        for op in ops {
            assert_eq!(op.info().operands.len(), op.arity(), "{}", op.name());
            assert!(op.info().example.contains(op.symbol()));
        }
    }
}
