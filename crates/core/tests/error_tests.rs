// ═══════════════════════════════════════════════════════════════════
// Error Tests: CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use income_planner_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("amount must be positive".into());
        assert_eq!(err.to_string(), "Validation failed: amount must be positive");
    }

    #[test]
    fn validation_error_empty_message() {
        let err = CoreError::ValidationError(String::new());
        assert_eq!(err.to_string(), "Validation failed: ");
    }

    #[test]
    fn source_not_found() {
        let err = CoreError::SourceNotFound("abc-123".into());
        assert_eq!(err.to_string(), "Income source not found: abc-123");
    }

    #[test]
    fn expense_not_found() {
        let err = CoreError::ExpenseNotFound("def-456".into());
        assert_eq!(err.to_string(), "Planned expense not found: def-456");
    }

    #[test]
    fn transaction_not_found() {
        let err = CoreError::TransactionNotFound("ghi-789".into());
        assert_eq!(err.to_string(), "Transaction not found: ghi-789");
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("buffer too small".into());
        assert_eq!(err.to_string(), "Serialization error: buffer too small");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("unexpected token".into());
        assert_eq!(err.to_string(), "Deserialization error: unexpected token");
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod from_impls {
    use super::*;

    #[test]
    fn serde_json_error_becomes_deserialization() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CoreError = json_err.into();
        match err {
            CoreError::Deserialization(msg) => assert!(!msg.is_empty()),
            other => panic!("expected Deserialization, got {other:?}"),
        }
    }

    #[test]
    fn question_mark_conversion_compiles() {
        fn parse(json: &str) -> Result<serde_json::Value, CoreError> {
            let value = serde_json::from_str(json)?;
            Ok(value)
        }

        assert!(parse("{\"a\": 1}").is_ok());
        assert!(matches!(
            parse("oops").unwrap_err(),
            CoreError::Deserialization(_)
        ));
    }
}

// ── Debug formatting ────────────────────────────────────────────────

mod debug {
    use super::*;

    #[test]
    fn debug_names_the_variant() {
        let err = CoreError::SourceNotFound("abc".into());
        let debug = format!("{err:?}");
        assert!(debug.contains("SourceNotFound"));
        assert!(debug.contains("abc"));
    }

    #[test]
    fn errors_implement_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&CoreError::ValidationError("x".into()));
    }
}
