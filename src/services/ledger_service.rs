// src/services/ledger_service.rs

use crate::{
    common::error::AppError,
    db::LedgerRepository,
    models::{
        catalog::drcr_label,
        ledger::{LedgerEntry, LedgerRow, LedgerTable},
    },
};

#[derive(Clone)]
pub struct LedgerService {
    ledger_repo: LedgerRepository,
}

impl LedgerService {
    pub fn new(ledger_repo: LedgerRepository) -> Self {
        Self { ledger_repo }
    }

    // --- RECORD ENTRY ---
    // A entrada já chega validada (quantidade e bill_id).
    pub async fn record_entry(&self, entry: &LedgerEntry) -> Result<Vec<LedgerRow>, AppError> {
        let table = LedgerTable::for_entry(entry)?;
        let pool = self.ledger_repo.pool();

        // 1. Garante a tabela (idempotente, fica criada mesmo se o insert falhar)
        self.ledger_repo.ensure_table(pool, &table).await?;

        // 2. Grava a linha dentro de uma transação
        let mut tx = pool.begin().await?;
        let id = self
            .ledger_repo
            .insert_entry(&mut *tx, &table, entry)
            .await?;
        tx.commit().await?;

        tracing::info!(
            "Movimentação {} gravada em {} (bill_id={}, drcr={})",
            id,
            table,
            entry.bill_id,
            drcr_label(entry.drcr).unwrap_or("?")
        );

        // 3. Devolve a tabela inteira, lida depois do commit
        self.ledger_repo.fetch_all(pool, &table).await
    }
}
