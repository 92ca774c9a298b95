// src/db/sequence_repo.rs
//
// Numeração de documentos (SO/PO/V). O contador vive em
// `document_sequences` e é incrementado por um UPSERT atômico, então dois
// pedidos criados ao mesmo tempo nunca recebem o mesmo número.

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};

use crate::common::error::AppError;

/// Formato humano: {prefixo}{AAAAMMDD}{sequencial com 4 dígitos}.
pub fn format_document_number(prefix: &str, day: NaiveDate, seq: i32) -> String {
    format!("{}{}{:04}", prefix, day.format("%Y%m%d"), seq)
}

#[derive(Clone)]
pub struct SequenceRepository {
    pool: PgPool,
}

impl SequenceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Reserva e devolve o próximo sequencial do par (prefixo, dia).
    pub async fn next_seq<'e, E>(
        &self,
        executor: E,
        prefix: &str,
        day: NaiveDate,
    ) -> Result<i32, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let seq = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO document_sequences (prefix, day, last_seq)
            VALUES ($1, $2, 1)
            ON CONFLICT (prefix, day)
            DO UPDATE SET last_seq = document_sequences.last_seq + 1
            RETURNING last_seq
            "#,
        )
        .bind(prefix)
        .bind(day)
        .fetch_one(executor)
        .await?;

        Ok(seq)
    }

    /// Atalho: reserva o sequencial de hoje e devolve o número formatado.
    pub async fn next_document_number<'e, E>(
        &self,
        executor: E,
        prefix: &str,
    ) -> Result<String, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let today = chrono::Utc::now().date_naive();
        let seq = self.next_seq(executor, prefix, today).await?;
        Ok(format_document_number(prefix, today, seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numero_segue_o_formato_prefixo_data_sequencial() {
        let day = NaiveDate::from_ymd_opt(2026, 8, 8).unwrap();
        assert_eq!(format_document_number("SO", day, 1), "SO202608080001");
        assert_eq!(format_document_number("PO", day, 42), "PO202608080042");
        assert_eq!(format_document_number("V", day, 9999), "V202608089999");
    }

    #[test]
    fn sequencial_preenche_com_zeros_a_esquerda() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        assert_eq!(format_document_number("SO", day, 7), "SO202601020007");
    }

    #[test]
    fn numeros_consecutivos_sao_estritamente_crescentes() {
        let day = NaiveDate::from_ymd_opt(2026, 8, 8).unwrap();
        let a = format_document_number("SO", day, 11);
        let b = format_document_number("SO", day, 12);
        assert!(b > a);
    }
}
