use crate::error_handling::*;
use std::fmt;
use std::str::FromStr;

pub type Value = i64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    addition,
    subtraction,
    multiplication,
    division,
    remainder,
    exponentiation,
}

impl Operator {
    pub fn precedence(self) -> u8 {
        match self {
            Self::addition | Self::subtraction => 1,
            Self::multiplication | Self::division | Self::remainder => 2,
            Self::exponentiation => 3,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::addition => '+',
            Self::subtraction => '-',
            Self::multiplication => '*',
            Self::division => '/',
            Self::remainder => '%',
            Self::exponentiation => '^',
        }
    }

    /// Applies the operator as `left OP right` with 64-bit wraparound.
    pub fn call(self, left: Value, right: Value) -> Result<Value> {
        match self {
            Self::addition => Ok(left.wrapping_add(right)),
            Self::subtraction => Ok(left.wrapping_sub(right)),
            Self::multiplication => Ok(left.wrapping_mul(right)),
            Self::division if right == 0 => Err(CalcError::division_by_zero),
            Self::division => Ok(left.wrapping_div(right)),
            Self::remainder if right == 0 => Err(CalcError::division_by_zero),
            Self::remainder => Ok(left.wrapping_rem(right)),
            Self::exponentiation => power(left, right),
        }
    }
}

/// Integer power. A negative exponent yields `1 / base^n` truncated toward zero,
/// which is only non-zero for a base of 1 or -1.
fn power(base: Value, exponent: Value) -> Result<Value> {
    if exponent < 0 {
        return match base {
            0 => Err(CalcError::division_by_zero),
            1 => Ok(1),
            -1 => Ok(if exponent % 2 == 0 { 1 } else { -1 }),
            _ => Ok(0),
        };
    }

    let mut result: Value = 1;
    let mut base = base;
    let mut exponent = exponent.unsigned_abs();
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result.wrapping_mul(base);
        }
        base = base.wrapping_mul(base);
        exponent >>= 1;
    }
    Ok(result)
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidOperator;

impl FromStr for Operator {
    type Err = InvalidOperator;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::addition),
            "-" => Ok(Self::subtraction),
            "*" => Ok(Self::multiplication),
            "/" => Ok(Self::division),
            "%" => Ok(Self::remainder),
            "^" => Ok(Self::exponentiation),
            _ => Err(InvalidOperator),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_levels() {
        assert_eq!(Operator::addition.precedence(), Operator::subtraction.precedence());
        assert!(Operator::multiplication.precedence() > Operator::addition.precedence());
        assert_eq!(Operator::remainder.precedence(), Operator::division.precedence());
        assert!(Operator::exponentiation.precedence() > Operator::division.precedence());
    }

    #[test]
    fn division_truncates_toward_zero() {
        assert_eq!(Operator::division.call(7, 2).unwrap(), 3);
        assert_eq!(Operator::division.call(-7, 2).unwrap(), -3);
        assert_eq!(Operator::remainder.call(7, 2).unwrap(), 1);
        assert_eq!(Operator::remainder.call(-7, 2).unwrap(), -1);
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert!(matches!(Operator::division.call(5, 0), Err(CalcError::division_by_zero)));
        assert!(matches!(Operator::remainder.call(5, 0), Err(CalcError::division_by_zero)));
    }

    #[test]
    fn arithmetic_wraps_on_overflow() {
        assert_eq!(Operator::addition.call(Value::MAX, 1).unwrap(), Value::MIN);
        assert_eq!(Operator::subtraction.call(Value::MIN, 1).unwrap(), Value::MAX);
        assert_eq!(Operator::division.call(Value::MIN, -1).unwrap(), Value::MIN);
        assert_eq!(Operator::remainder.call(Value::MIN, -1).unwrap(), 0);
    }

    #[test]
    fn integer_power() {
        let pow = Operator::exponentiation;
        assert_eq!(pow.call(2, 10).unwrap(), 1024);
        assert_eq!(pow.call(-3, 3).unwrap(), -27);
        assert_eq!(pow.call(7, 0).unwrap(), 1);
        assert_eq!(pow.call(0, 0).unwrap(), 1);
        assert_eq!(pow.call(2, 64).unwrap(), 0);
    }

    #[test]
    fn negative_exponents_truncate() {
        let pow = Operator::exponentiation;
        assert_eq!(pow.call(2, -1).unwrap(), 0);
        assert_eq!(pow.call(1, -5).unwrap(), 1);
        assert_eq!(pow.call(-1, -3).unwrap(), -1);
        assert_eq!(pow.call(-1, -4).unwrap(), 1);
        assert!(matches!(pow.call(0, -1), Err(CalcError::division_by_zero)));
    }

    #[test]
    fn parses_the_fixed_operator_set() {
        for symbol in ["+", "-", "*", "/", "%", "^"] {
            let operator: Operator = symbol.parse().unwrap();
            assert_eq!(operator.to_string(), symbol);
        }
        assert_eq!("**".parse::<Operator>(), Err(InvalidOperator));
        assert_eq!("(".parse::<Operator>(), Err(InvalidOperator));
    }
}
