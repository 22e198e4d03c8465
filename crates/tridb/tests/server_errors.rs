//! Error mapping for the server-backed facades without live servers:
//! builder failures surface before connecting, unreachable servers come
//! back as connection errors.

use tridb::{Column, ColumnData, Error};

// Port 1 on loopback is closed, so connects are refused immediately.
const CLOSED_PORT: u16 = 1;

#[cfg(feature = "mysql")]
mod mysql {
    use super::*;
    use tridb::types::mysql as types;
    use tridb::MySqlManager;

    fn unreachable() -> MySqlManager {
        MySqlManager::new("app", "127.0.0.1", "root", "pw").port(CLOSED_PORT)
    }

    #[tokio::test]
    async fn refused_connect_maps_to_connection_error() {
        let result = unreachable().list_tables().await;
        assert!(matches!(result, Err(Error::Connection(_))));
    }

    #[tokio::test]
    async fn drop_database_on_unreachable_server() {
        let result = unreachable().drop_database().await;
        assert!(matches!(result, Err(Error::Connection(_))));
    }

    #[tokio::test]
    async fn builder_errors_win_over_connection_errors() {
        let manager = unreachable();
        let result = manager.insert("users", &[]).await;
        assert!(matches!(result, Err(Error::Builder(_))));

        let bad = Column::new("age", tridb::types::postgres::integer());
        let result = manager.add_column("users", &bad).await;
        assert!(matches!(result, Err(Error::Builder(_))));
    }

    #[tokio::test]
    async fn valid_unsigned_column_fails_on_connect_not_render() {
        // UNSIGNED renders fine here, so the unreachable server is the
        // first thing that can fail.
        let result = unreachable()
            .create_table("t", &[Column::new("n", types::integer()).unsigned()])
            .await;
        assert!(matches!(result, Err(Error::Connection(_))));
    }
}

#[cfg(feature = "postgres")]
mod postgres {
    use super::*;
    use tridb::PostgresManager;

    fn unreachable() -> PostgresManager {
        PostgresManager::new("app", "127.0.0.1", "svc", "pw").port(CLOSED_PORT)
    }

    #[tokio::test]
    async fn refused_connect_maps_to_connection_error() {
        let result = unreachable().list_tables().await;
        assert!(matches!(result, Err(Error::Connection(_))));
    }

    #[tokio::test]
    async fn update_with_values_still_needs_the_server() {
        let result = unreachable()
            .update("users", &[ColumnData::new("age", 1)], None)
            .await;
        assert!(matches!(result, Err(Error::Connection(_))));
    }

    #[tokio::test]
    async fn serial_substitution_rejected_for_text_before_connecting() {
        let column = Column::new("name", tridb::types::postgres::text()).auto_increment();
        let result = unreachable().add_column("users", &column).await;
        assert!(matches!(result, Err(Error::Builder(_))));
    }
}
