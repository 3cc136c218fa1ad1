//! # Property Sweeps
//!
//! Invariants checked across ranges of gas limits, operands and arguments
//! rather than single hand-picked transactions.

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        arithmetic_program, arithmetic_program_gas, world_with, ADDER, ADDER_CALLER,
    };
    use mvm_engine::prelude::*;

    const COUNTER: &str = "LOAD counter\nADD\nSTORE counter\nLOAD counter\nRETURN";

    fn divide(left: Word, right: Word) -> TransactionResult {
        let mut world = World::new();
        world
            .deploy(
                "div",
                vec![
                    Instruction::Push(left),
                    Instruction::Push(right),
                    Instruction::Div,
                    Instruction::Return,
                ],
            )
            .unwrap();
        world.run_transaction("div", 100)
    }

    #[test]
    fn test_gas_limit_sweep() {
        let world = world_with(&[("A1", ADDER), ("A2", ADDER_CALLER)]);

        for gas_limit in 0..=120 {
            let mut scratch = world.clone();
            let result = scratch.execute(&TransactionRequest::new("A2", gas_limit));

            assert_eq!(
                check_all_invariants(&result, world.config()),
                InvariantCheckResult::Valid,
                "gas_limit {gas_limit}"
            );
            assert!(result.gas_used <= gas_limit);

            if gas_limit >= 41 {
                assert!(result.success, "gas_limit {gas_limit}: {:?}", result.error);
                assert_eq!(result.gas_used, 39);
                assert_eq!(scratch.get_storage("A2", "result"), 8);
            } else {
                assert!(!result.success, "gas_limit {gas_limit}");
                // PUSH and CALL are charged before the allowance check
                assert_eq!(result.gas_used, gas_limit.min(11));
                assert_eq!(scratch.storage(), world.storage());
            }
        }
    }

    #[test]
    fn test_simulate_matches_execute() {
        let world = world_with(&[("A", COUNTER), ("A1", ADDER), ("A2", ADDER_CALLER)]);

        for request in [
            TransactionRequest::new("A", 100).with_args(vec![4]),
            TransactionRequest::new("A", 10).with_args(vec![4]),
            TransactionRequest::new("A2", 100),
            TransactionRequest::new("A2", 20),
            TransactionRequest::new("missing", 100),
        ] {
            let simulated = world.simulate(&request);
            let executed = world.clone().execute(&request);
            assert_eq!(simulated, executed);
        }
    }

    #[test]
    fn test_counter_accumulates_arguments() {
        let mut world = world_with(&[("A", COUNTER)]);
        let mut total: Word = 0;

        for arg in [7, 3, 0, -4, 12, Word::MAX] {
            total = total.wrapping_add(arg);
            let result = world.execute(&TransactionRequest::new("A", 34).with_args(vec![arg]));
            assert!(result.success);
            assert_eq!(result.return_value, total);
            assert_eq!(result.gas_used, 34);
        }
        assert_eq!(world.get_storage("A", "counter"), total);
    }

    #[test]
    fn test_division_rounds_toward_negative_infinity() {
        for left in -7..=7 {
            for right in [-3, -2, -1, 1, 2, 3] {
                let expected = (left as f64 / right as f64).floor() as Word;
                let result = divide(left, right);
                assert_eq!(result.return_value, expected, "{left} / {right}");
            }
        }
    }

    #[test]
    fn test_arithmetic_wraps() {
        assert_eq!(divide(Word::MIN, -1).return_value, Word::MIN);

        let mut world = World::new();
        world
            .deploy(
                "mul",
                vec![
                    Instruction::Push(Word::MAX),
                    Instruction::Push(2),
                    Instruction::Mul,
                    Instruction::Return,
                ],
            )
            .unwrap();
        assert_eq!(world.run_transaction("mul", 100).return_value, -2);
    }

    #[test]
    fn test_straight_line_gas_is_exact() {
        for ops in [0, 1, 10, 200] {
            let mut world = World::new();
            world.deploy("p", arithmetic_program(ops)).unwrap();
            let gas = arithmetic_program_gas(ops);

            let exact = world.clone().run_transaction("p", gas);
            assert!(exact.success, "ops {ops}: {:?}", exact.error);
            assert_eq!(exact.gas_used, gas);

            let short = world.run_transaction("p", gas - 1);
            assert_eq!(short.error, Some(VmError::OutOfGas));
            assert_eq!(short.gas_used, gas - 1);
        }
    }

    #[test]
    fn test_opcode_counts_match_program() {
        let mut world = World::new();
        world.deploy("p", arithmetic_program(10)).unwrap();

        let result = world.run_transaction("p", 1_000);

        assert_eq!(result.opcode_counts.get(&Opcode::Push), Some(&11));
        assert_eq!(result.opcode_counts.get(&Opcode::Add), Some(&10));
        assert_eq!(result.opcode_counts.get(&Opcode::Call), None);
        assert_eq!(result.instructions_executed(), 24);
    }
}
