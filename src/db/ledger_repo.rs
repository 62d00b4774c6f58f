// src/db/ledger_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::ledger::{short_name, LedgerEntry, LedgerRow, LedgerTable},
};

// O repositório das tabelas t_<familia>_<data>.
// O nome da tabela chega sempre como LedgerTable (já validado); os valores vão sempre como bind.
#[derive(Clone)]
pub struct LedgerRepository {
    pool: PgPool,
}

impl LedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Cria a tabela do dia se ainda não existir.
    pub async fn ensure_table<'e, E>(&self, executor: E, table: &LedgerTable) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ddl = create_table_sql(table);
        sqlx::query(&ddl).execute(executor).await?;
        tracing::debug!("Tabela {} garantida", table);
        Ok(())
    }

    /// Grava uma movimentação e devolve o id gerado.
    pub async fn insert_entry<'e, E>(
        &self,
        executor: E,
        table: &LedgerTable,
        entry: &LedgerEntry,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO {} (name, product_id, quantity, drcr, company_id,
                            warehouse_id, bill_id, create_time, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
            table.quoted()
        );

        let id: i64 = sqlx::query_scalar(&sql)
            .bind(short_name(&entry.product_id))
            .bind(&entry.product_id)
            .bind(entry.quantity)
            .bind(entry.drcr)
            .bind(&entry.company_id)
            .bind(&entry.warehouse_id)
            .bind(&entry.bill_id)
            .bind(entry.create_time)
            .bind(&entry.description)
            .fetch_one(executor)
            .await?;
        Ok(id)
    }

    /// Todas as linhas da tabela, em ordem de inserção.
    pub async fn fetch_all<'e, E>(
        &self,
        executor: E,
        table: &LedgerTable,
    ) -> Result<Vec<LedgerRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            SELECT id, name, product_id, quantity, drcr, company_id,
                   warehouse_id, bill_id, create_time, description
            FROM {}
            ORDER BY id ASC
            "#,
            table.quoted()
        );

        let rows = sqlx::query_as::<_, LedgerRow>(&sql)
            .fetch_all(executor)
            .await?;
        Ok(rows)
    }
}

// Colunas de texto com o mesmo limite do esquema de origem (255).
fn create_table_sql(table: &LedgerTable) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id           BIGSERIAL PRIMARY KEY,
            name         VARCHAR(255) NOT NULL,
            product_id   VARCHAR(255) NOT NULL,
            quantity     BIGINT       NOT NULL,
            drcr         BIGINT       NOT NULL,
            company_id   VARCHAR(255) NOT NULL,
            warehouse_id VARCHAR(255) NOT NULL,
            bill_id      VARCHAR(255) NOT NULL,
            create_time  TIMESTAMP    NOT NULL,
            description  TEXT         NOT NULL DEFAULT ''
        )
        "#,
        table.quoted()
    )
}
