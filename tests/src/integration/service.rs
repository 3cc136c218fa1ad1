//! # Service Flows
//!
//! The async execution service and the demo runner driven end to end.

#[cfg(test)]
mod tests {
    use crate::fixtures::{ADDER, ADDER_CALLER};
    use mvm_engine::prelude::*;
    use mvm_runner::{run_demo, RunnerConfig};
    use std::sync::Arc;

    async fn service_with(contracts: &[(&str, &str)]) -> ExecutionService {
        let service = ExecutionService::default();
        for (address, source) in contracts {
            service
                .deploy(Address::from(*address), source)
                .await
                .unwrap();
        }
        service
    }

    #[tokio::test]
    async fn test_estimate_matches_execution() {
        let service = service_with(&[("A1", ADDER), ("A2", ADDER_CALLER)]).await;

        let estimate = service
            .estimate_gas(TransactionRequest::new("A2", 100))
            .await
            .unwrap();
        assert_eq!(service.get_storage("A2".into(), "result".into()).await, 0);

        let result = service
            .execute_transaction(TransactionRequest::new("A2", 100))
            .await;
        assert_eq!(result.gas_used, estimate);
        assert_eq!(service.get_storage("A2".into(), "result".into()).await, 8);
    }

    #[tokio::test]
    async fn test_call_reports_errors() {
        let service = service_with(&[("A1", ADDER), ("A2", ADDER_CALLER)]).await;

        assert_eq!(
            service.call(TransactionRequest::new("A1", 100)).await,
            Ok(8)
        );
        assert!(matches!(
            service.call(TransactionRequest::new("A2", 20)).await,
            Err(VmError::InsufficientGas { .. })
        ));
        assert_eq!(service.stats().await.transactions_executed, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_transactions_across_contracts() {
        let service = Arc::new(
            service_with(&[
                ("X", "LOAD n\nADD\nSTORE n\nLOAD n\nRETURN"),
                ("Y", "LOAD n\nADD\nSTORE n\nLOAD n\nRETURN"),
            ])
            .await,
        );

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let service = Arc::clone(&service);
                let to = if i % 2 == 0 { "X" } else { "Y" };
                tokio::spawn(async move {
                    service
                        .execute_transaction(TransactionRequest::new(to, 100).with_args(vec![1]))
                        .await
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().success);
        }

        let storage = service.storage().await;
        assert_eq!(storage.get(&Address::from("X"), &StorageKey::from("n")), 10);
        assert_eq!(storage.get(&Address::from("Y"), &StorageKey::from("n")), 10);

        let stats = service.stats().await;
        assert_eq!(stats.transactions_executed, 20);
        assert_eq!(stats.successful_executions, 20);
        assert_eq!(stats.total_gas_used, 20 * 34);
    }

    #[tokio::test]
    async fn test_demo_gas_independent_of_limits() {
        let config = RunnerConfig {
            gas_limit_scale: 3,
            ..RunnerConfig::default()
        };
        let report = run_demo(&ExecutionService::default(), &config)
            .await
            .unwrap();

        let outcomes: Vec<(Word, u64)> = report
            .transactions
            .iter()
            .map(|result| (result.return_value, result.gas_used))
            .collect();
        assert_eq!(outcomes, vec![(7, 34), (90, 77), (12, 34), (140, 77)]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["transactions"][1]["gas_limit"], 2400);
        // B hands A a fixed allowance regardless of its own limit
        assert_eq!(json["transactions"][1]["call_trace"][0]["gas_refunded"], 166);
        assert_eq!(json["transactions"][3]["phase"], "committed");
        assert_eq!(json["storage"]["B"]["myvalue"], 140);
    }
}
