use crate::error_handling::*;
use crate::memory::Environment;
use crate::operating::Value;
use crate::parsing::*;
use crate::stack::Stack;

pub fn evaluate(expression: &Expression) -> Result<Value> {
    if expression.is_empty() {
        return Err(CalcError::empty_expression);
    }

    let mut slots = Stack::<Value>::new();
    for node in expression.nodes() {
        match node {
            ExprNode::value(value) => slots.push(*value),

            ExprNode::operator(operator) => {
                let right = slots.pop().ok_or(CalcError::invalid_expression)?;
                let left = slots.pop().ok_or(CalcError::invalid_expression)?;
                slots.push(operator.call(left, right)?);
            },
        }
    }

    let result = slots.pop().ok_or(CalcError::invalid_expression)?;
    // leftover operands mean an operator was missing somewhere
    if !slots.is_empty() {
        return Err(CalcError::invalid_expression);
    }
    Ok(result)
}

pub fn evaluate_expression<E: Environment + ?Sized>(line: &str, environment: &E) -> Result<Value> {
    let expression = parse(line, environment)?;
    evaluate(&expression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Variables;
    use crate::operating::Operator;

    fn calc(line: &str) -> Result<Value> {
        evaluate_expression(line, &Variables::new())
    }

    #[test]
    fn folds_postfix_left_to_right() {
        let expression = Expression::from(vec![
            ExprNode::value(10),
            ExprNode::value(4),
            ExprNode::operator(Operator::subtraction),
        ]);
        assert_eq!(evaluate(&expression).unwrap(), 6);
    }

    #[test]
    fn empty_expression_is_its_own_error() {
        assert!(matches!(evaluate(&Expression::default()), Err(CalcError::empty_expression)));
    }

    #[test]
    fn missing_operands_are_invalid() {
        let expression = Expression::from(vec![
            ExprNode::value(1),
            ExprNode::operator(Operator::addition),
        ]);
        assert!(matches!(evaluate(&expression), Err(CalcError::invalid_expression)));
        assert!(matches!(calc("5 -"), Err(CalcError::invalid_expression)));
        assert!(matches!(calc("* 2"), Err(CalcError::invalid_expression)));
    }

    #[test]
    fn excess_operands_are_invalid() {
        assert!(matches!(calc("1 2"), Err(CalcError::invalid_expression)));
        assert!(matches!(calc("3x"), Err(CalcError::unknown_variable(_))));
    }

    #[test]
    fn precedence_and_parentheses() {
        assert_eq!(calc("3 + 8 * 2").unwrap(), 19);
        assert_eq!(calc("(3 + 8) * 2").unwrap(), 22);
        assert_eq!(calc("3 + 8 * ((4 + 3) * 2 + 1) - 6 / (2 + 1)").unwrap(), 121);
    }

    #[test]
    fn sign_runs() {
        assert_eq!(calc("5 - - 3").unwrap(), 8);
        assert_eq!(calc("5 + - - + - 3").unwrap(), 2);
        assert_eq!(calc("5 --- 3").unwrap(), 2);
        assert_eq!(calc("-5 + 2").unwrap(), -3);
        assert_eq!(calc("2 * -3").unwrap(), -6);
        assert_eq!(calc("(-4) ^ 2").unwrap(), 16);
        assert_eq!(calc("(2)-5").unwrap(), -3);
        assert_eq!(calc("(1 + 1)-5").unwrap(), -3);
    }

    #[test]
    fn integer_division_and_modulo() {
        assert_eq!(calc("7 / 2").unwrap(), 3);
        assert_eq!(calc("7 % 2").unwrap(), 1);
        assert!(matches!(calc("5 / 0"), Err(CalcError::division_by_zero)));
        assert!(matches!(calc("5 % (3 - 3)"), Err(CalcError::division_by_zero)));
    }

    #[test]
    fn exponentiation_is_left_associative() {
        assert_eq!(calc("2 ^ 3 ^ 2").unwrap(), 64);
        assert_eq!(calc("2 * 3 ^ 2").unwrap(), 18);
    }

    #[test]
    fn resolves_variables() {
        let mut variables = Variables::new();
        variables.assign("a", 4);
        variables.assign("b", 5);
        assert_eq!(evaluate_expression("a * b - a", &variables).unwrap(), 16);
        assert!(matches!(calc("x + 1"), Err(CalcError::unknown_variable(n)) if n == "x"));
    }
}
