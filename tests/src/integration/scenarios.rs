//! # Reference Scenarios
//!
//! Whole transactions through the lexer, interpreter and world, checked
//! against exact gas, storage, log and call-trace outcomes.

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        call_chain_gas, deploy_call_chain, world_with, ADDER, ADDER_CALLER,
    };
    use mvm_engine::prelude::*;

    fn assert_invariants(result: &TransactionResult, world: &World) {
        assert_eq!(
            check_all_invariants(result, world.config()),
            InvariantCheckResult::Valid
        );
    }

    // =========================================================================
    // SINGLE FRAME
    // =========================================================================

    #[test]
    fn test_add_and_store() {
        let mut world = world_with(&[("A1", "PUSH 5\nPUSH 3\nADD\nSTORE x\nPUSH 1\nRETURN")]);

        let result = world.run_transaction("A1", 100);

        assert!(result.success);
        assert_eq!(result.phase, TransactionPhase::Committed);
        assert_eq!(result.return_value, 1);
        assert_eq!(result.gas_used, 27);
        assert_eq!(world.get_storage("A1", "x"), 8);
        assert!(result.call_trace.is_empty());
        assert_invariants(&result, &world);
    }

    #[test]
    fn test_unwritten_slot_loads_zero() {
        let mut world = world_with(&[("R", "LOAD nothing\nRETURN")]);
        let result = world.run_transaction("R", 10);
        assert_eq!(result.return_value, 0);
        assert_eq!(result.gas_used, 6);
    }

    #[test]
    fn test_division_by_zero_reverts() {
        let mut world = world_with(&[("D", "PUSH 9\nSTORE kept\nPUSH 1\nPUSH 0\nDIV\nRETURN")]);

        let result = world.run_transaction("D", 100);

        assert_eq!(result.error, Some(VmError::DivisionByZero));
        assert_eq!(result.phase, TransactionPhase::Reverted);
        // DIV is charged before the divisor is checked
        assert_eq!(result.gas_used, 28);
        assert_eq!(world.get_storage("D", "kept"), 0);
        assert_invariants(&result, &world);
    }

    #[test]
    fn test_running_off_the_end_returns_zero() {
        let mut world = world_with(&[("E", "PUSH 4\nSTORE y")]);

        let result = world.run_transaction("E", 50);

        assert!(result.success);
        assert_eq!(result.return_value, 0);
        assert_eq!(result.gas_used, 21);
        assert_eq!(world.get_storage("E", "y"), 4);
    }

    #[test]
    fn test_stack_overflow() {
        let mut world = World::new();
        world.deploy("S", vec![Instruction::Push(1); 1025]).unwrap();

        let result = world.run_transaction("S", 2000);

        assert_eq!(result.error, Some(VmError::StackOverflow { max: 1024 }));
        assert_eq!(result.gas_used, 1025);
    }

    #[test]
    fn test_stack_underflow() {
        let mut world = world_with(&[("U", "PUSH 1\nADD")]);
        let result = world.run_transaction("U", 10);
        assert_eq!(result.error, Some(VmError::StackUnderflow));
        assert_eq!(result.gas_used, 4);
    }

    fn assert_underflows_without_commit(source: &str, gas_used: u64) {
        let mut world = world_with(&[("U", source)]);

        let result = world.run_transaction("U", 100);

        assert_eq!(result.error, Some(VmError::StackUnderflow));
        assert_eq!(result.phase, TransactionPhase::Reverted);
        assert_eq!(result.gas_used, gas_used);
        assert!(result.logs.is_empty());
        assert_eq!(world.storage().slot_count(), 0);
        assert_invariants(&result, &world);
    }

    #[test]
    fn test_store_on_empty_stack() {
        assert_underflows_without_commit("STORE x", 20);
    }

    #[test]
    fn test_pop_on_empty_stack() {
        assert_underflows_without_commit("POP", 1);
    }

    #[test]
    fn test_log_on_empty_stack() {
        assert_underflows_without_commit("LOG", 1);
    }

    #[test]
    fn test_underflow_after_store_discards_it() {
        assert_underflows_without_commit("PUSH 3\nSTORE x\nSTORE y", 41);
    }

    // =========================================================================
    // NESTED CALLS
    // =========================================================================

    #[test]
    fn test_nested_call_refunds_unused_gas() {
        let mut world = world_with(&[("A1", ADDER), ("A2", ADDER_CALLER)]);

        let result = world.run_transaction("A2", 100);

        assert!(result.success);
        assert_eq!(result.return_value, 1);
        assert_eq!(result.gas_used, 39);
        assert_eq!(world.get_storage("A2", "result"), 8);

        assert_eq!(result.call_trace.len(), 1);
        let call = &result.call_trace[0];
        assert_eq!(call.caller, Address::from("A2"));
        assert_eq!(call.callee, Address::from("A1"));
        assert_eq!(call.depth, 1);
        assert_eq!(call.gas_allocated, 30);
        assert_eq!(call.gas_used, 6);
        assert_eq!(call.gas_refunded, 24);
        assert_eq!(call.return_value, Some(8));
        assert_invariants(&result, &world);
    }

    #[test]
    fn test_callee_out_of_gas_reverts_everything() {
        let mut world = world_with(&[
            ("A1", ADDER),
            ("A2", "PUSH 0\nCALL A1 5 0\nSTORE result\nPUSH 1\nRETURN"),
        ]);

        let result = world.run_transaction("A2", 100);

        assert_eq!(result.error, Some(VmError::OutOfGas));
        // caller's 11 plus the callee's whole allowance
        assert_eq!(result.gas_used, 16);
        assert_eq!(world.get_storage("A2", "result"), 0);

        assert_eq!(result.call_trace.len(), 1);
        let call = &result.call_trace[0];
        assert!(!call.success);
        assert_eq!(call.gas_used, 5);
        assert_eq!(call.gas_refunded, 0);
        assert_eq!(call.return_value, None);
        assert_invariants(&result, &world);
    }

    #[test]
    fn test_call_arguments_keep_order() {
        let mut world = world_with(&[
            ("sub", "SUB\nRETURN"),
            ("main", "PUSH 10\nPUSH 3\nCALL sub 10 2\nRETURN"),
        ]);

        let result = world.run_transaction("main", 100);

        assert_eq!(result.return_value, 7);
    }

    #[test]
    fn test_storage_visible_to_later_calls() {
        let mut world = world_with(&[
            ("inc", "LOAD n\nPUSH 1\nADD\nSTORE n\nLOAD n\nRETURN"),
            ("main", "CALL inc 50 0\nPOP\nCALL inc 50 0\nRETURN"),
        ]);

        let result = world.run_transaction("main", 200);

        assert!(result.success);
        assert_eq!(result.return_value, 2);
        assert_eq!(result.gas_used, 92);
        assert_eq!(world.get_storage("inc", "n"), 2);
        assert_eq!(world.get_storage("main", "n"), 0);
    }

    #[test]
    fn test_logs_follow_execution_order() {
        let mut world = world_with(&[
            ("child", "PUSH 2\nLOG\nPUSH 9\nRETURN"),
            (
                "main",
                "PUSH 1\nLOG\nCALL child 20 0\nLOG\nPUSH 3\nLOG\nPUSH 0\nRETURN",
            ),
        ]);

        let result = world.run_transaction("main", 100);

        let logs: Vec<(&str, Word)> = result
            .logs
            .iter()
            .map(|log| (log.address.as_str(), log.value))
            .collect();
        assert_eq!(logs, vec![("main", 1), ("child", 2), ("main", 9), ("main", 3)]);
        assert!(result
            .logs
            .iter()
            .enumerate()
            .all(|(i, log)| log.sequence == i));

        assert!(matches!(result.events[1], TraceEvent::CallEnter { depth: 1, gas: 20, .. }));
        assert!(matches!(&result.events[3], TraceEvent::CallExit(call) if call.success));
        assert_eq!(result.events.len(), 6);
        assert_invariants(&result, &world);
    }

    #[test]
    fn test_reverted_transaction_keeps_trace() {
        let mut world = world_with(&[
            ("child", "PUSH 4\nLOG\nPUSH 1\nPUSH 0\nDIV\nRETURN"),
            ("main", "CALL child 50 0\nRETURN"),
        ]);

        let result = world.run_transaction("main", 100);

        assert_eq!(result.error, Some(VmError::DivisionByZero));
        assert_eq!(result.logs.len(), 1);
        assert_eq!(result.logs[0].value, 4);
        assert_eq!(result.call_trace.len(), 1);
        assert!(!result.call_trace[0].success);
        assert_eq!(result.call_trace[0].gas_used, 9);
    }

    #[test]
    fn test_call_errors() {
        let mut world = world_with(&[
            ("A1", ADDER),
            ("ghost_caller", "CALL ghost 10 0\nRETURN"),
            ("greedy", "CALL A1 500 0\nRETURN"),
            ("short", "PUSH 1\nCALL A1 10 2\nRETURN"),
        ]);

        let ghost = world.run_transaction("ghost_caller", 100);
        assert_eq!(
            ghost.error,
            Some(VmError::UnknownContract(Address::from("ghost")))
        );
        // CALL cost plus the reserved allowance
        assert_eq!(ghost.gas_used, 20);

        let greedy = world.run_transaction("greedy", 100);
        assert_eq!(
            greedy.error,
            Some(VmError::InsufficientGas {
                requested: 500,
                available: 90
            })
        );

        let short = world.run_transaction("short", 100);
        assert_eq!(
            short.error,
            Some(VmError::ArgumentCountMismatch {
                expected: 2,
                available: 1
            })
        );

        for result in [&ghost, &greedy, &short] {
            assert!(result.call_trace.is_empty());
            assert_invariants(result, &world);
        }
    }

    // =========================================================================
    // CALL DEPTH
    // =========================================================================

    #[test]
    fn test_deep_call_chain_within_limit() {
        let mut world = World::new();
        let root = deploy_call_chain(&mut world, "c", 1024);

        let result = world.execute(&TransactionRequest::new(root, call_chain_gas(1024)));

        assert!(result.success, "error: {:?}", result.error);
        assert_eq!(result.return_value, 1);
        assert_eq!(result.call_trace.len(), 1024);
        // innermost call completes first
        assert_eq!(result.call_trace[0].depth, 1024);
        assert_eq!(result.call_trace[1023].depth, 1);
        assert_invariants(&result, &world);
    }

    #[test]
    fn test_call_depth_exceeded() {
        let mut world = World::new();
        let root = deploy_call_chain(&mut world, "c", 1025);

        let result = world.execute(&TransactionRequest::new(root, call_chain_gas(1025)));

        assert_eq!(
            result.error,
            Some(VmError::CallDepthExceeded {
                depth: 1025,
                max: 1024
            })
        );
        assert_eq!(result.call_trace.len(), 1024);
        assert!(result.call_trace.iter().all(|call| !call.success));
        assert_eq!(result.call_trace[0].depth, 1024);
        assert_invariants(&result, &world);
    }

    #[test]
    fn test_configured_depth_limit() {
        let mut world = World::with_config(VmConfig {
            max_call_depth: 3,
            ..VmConfig::default()
        });
        let root = deploy_call_chain(&mut world, "d", 4);

        let result = world.execute(&TransactionRequest::new(root, call_chain_gas(4)));

        assert_eq!(
            result.error,
            Some(VmError::CallDepthExceeded { depth: 4, max: 3 })
        );
        let depths: Vec<usize> = result.call_trace.iter().map(|call| call.depth).collect();
        assert_eq!(depths, vec![3, 2, 1]);
    }

    // =========================================================================
    // ATOMICITY & DETERMINISM
    // =========================================================================

    #[test]
    fn test_failed_transaction_is_atomic() {
        let mut world = world_with(&[
            ("writer", "PUSH 5\nSTORE a\nPUSH 1\nRETURN"),
            (
                "breaker",
                "CALL writer 30 0\nPOP\nPUSH 6\nSTORE b\nPUSH 1\nPUSH 0\nDIV\nRETURN",
            ),
        ]);
        world.run_transaction("writer", 100);
        let before = world.storage().clone();

        let result = world.run_transaction("breaker", 200);

        assert!(result.is_reverted());
        assert_eq!(world.storage(), &before);
        assert_eq!(world.get_storage("breaker", "b"), 0);
        assert_eq!(world.get_storage("writer", "a"), 5);
    }

    #[test]
    fn test_identical_worlds_produce_identical_results() {
        let contracts = [
            ("A", "LOAD counter\nADD\nSTORE counter\nLOAD counter\nRETURN"),
            ("B", "PUSH 2\nCALL A 200 1\nPUSH 10\nMUL\nSTORE myvalue\nLOAD myvalue\nRETURN"),
        ];
        let mut left = world_with(&contracts);
        let mut right = left.clone();

        for request in [
            TransactionRequest::new("A", 500).with_args(vec![7]),
            TransactionRequest::new("B", 800),
            TransactionRequest::new("B", 100),
        ] {
            let a = left.execute(&request);
            let b = right.execute(&request);
            assert_eq!(a, b);
            assert_eq!(
                serde_json::to_string(&a).unwrap(),
                serde_json::to_string(&b).unwrap()
            );
        }
        assert_eq!(left.storage(), right.storage());
    }
}
