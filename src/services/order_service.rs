// src/services/order_service.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{OrderRepository, SequenceRepository},
    models::orders::{Order, OrderDetail, OrderStatus, OrderSummary},
};

/// Alíquota padrão aplicada quando o pedido não informa outra.
pub fn default_tax_rate() -> Decimal {
    Decimal::new(13, 2) // 0.13
}

/// Valor da linha: quantidade × preço unitário − desconto da linha.
pub fn line_amount(quantity: i32, unit_price: Decimal, discount: Decimal) -> Decimal {
    Decimal::from(quantity) * unit_price - discount
}

#[derive(Debug, PartialEq)]
pub struct OrderTotals {
    pub total: Decimal,
    pub tax: Decimal,
    pub final_amount: Decimal,
}

/// Totais do documento: total = Σ linhas; imposto = total × alíquota
/// (arredondado no centavo); final = total − desconto + imposto.
pub fn compute_totals(line_amounts: &[Decimal], discount: Decimal, tax_rate: Decimal) -> OrderTotals {
    let total: Decimal = line_amounts.iter().copied().sum();
    let tax = (total * tax_rate).round_dp(2);
    let final_amount = total - discount + tax;
    OrderTotals {
        total,
        tax,
        final_amount,
    }
}

// Linha de pedido já validada pelo handler.
#[derive(Debug, Clone)]
pub struct NewOrderLine {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub discount: Decimal,
    pub tax_rate: Decimal,
    pub note: Option<String>,
}

#[derive(Clone)]
pub struct OrderService {
    order_repo: OrderRepository,
    sequence_repo: SequenceRepository,
    pool: PgPool,
}

impl OrderService {
    pub fn new(
        order_repo: OrderRepository,
        sequence_repo: SequenceRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            order_repo,
            sequence_repo,
            pool,
        }
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        status: Option<OrderStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<OrderSummary>, i64), AppError> {
        self.order_repo.list(search, status, limit, offset).await
    }

    /// Cria o pedido com número SO do dia, itens e totais, tudo em uma
    /// transação: ou o agregado inteiro existe, ou nada existe.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        customer_id: Uuid,
        lines: Vec<NewOrderLine>,
        discount: Decimal,
        tax_rate: Decimal,
        delivery_date: Option<DateTime<Utc>>,
        delivery_address: Option<&str>,
        note: Option<&str>,
        sales_person_id: Option<Uuid>,
    ) -> Result<OrderDetail, AppError> {
        let customer_name = self.order_repo.customer_name(customer_id).await?;

        let amounts: Vec<Decimal> = lines
            .iter()
            .map(|l| line_amount(l.quantity, l.unit_price, l.discount))
            .collect();
        let totals = compute_totals(&amounts, discount, tax_rate);

        let mut tx = self.pool.begin().await?;

        let order_number = self
            .sequence_repo
            .next_document_number(&mut *tx, "SO")
            .await?;

        let order = self
            .order_repo
            .insert_order(
                &mut *tx,
                &order_number,
                customer_id,
                totals.total,
                discount,
                tax_rate,
                totals.tax,
                totals.final_amount,
                delivery_date,
                delivery_address,
                note,
                sales_person_id,
            )
            .await?;

        let mut items = Vec::with_capacity(lines.len());
        for (line, amount) in lines.iter().zip(amounts) {
            let item = self
                .order_repo
                .insert_item(
                    &mut *tx,
                    order.id,
                    line.product_id,
                    line.quantity,
                    line.unit_price,
                    line.discount,
                    line.tax_rate,
                    amount,
                    line.note.as_deref(),
                )
                .await?;
            items.push(item);
        }

        tx.commit().await?;

        Ok(OrderDetail {
            order,
            customer_name,
            items,
        })
    }

    /// Atualização de cabeçalho. Status é livre (não há máquina de estados);
    /// qualquer outro campo exige que o pedido ainda esteja em DRAFT.
    pub async fn update(
        &self,
        id: Uuid,
        status: Option<OrderStatus>,
        delivery_date: Option<DateTime<Utc>>,
        delivery_address: Option<&str>,
        note: Option<&str>,
        discount: Option<Decimal>,
    ) -> Result<Order, AppError> {
        let order = self
            .order_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Pedido"))?;

        let touches_content = delivery_date.is_some()
            || delivery_address.is_some()
            || note.is_some()
            || discount.is_some();
        if touches_content && order.status != OrderStatus::Draft {
            return Err(AppError::NotDraft);
        }

        // Desconto novo muda o valor final; imposto continua sobre o total.
        let (tax_amount, final_amount) = match discount {
            Some(d) => (
                Some(order.tax_amount),
                Some(order.total_amount - d + order.tax_amount),
            ),
            None => (None, None),
        };

        self.order_repo
            .update_header(
                &self.pool,
                id,
                status,
                delivery_date,
                delivery_address,
                note,
                discount,
                tax_amount,
                final_amount,
            )
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let order = self
            .order_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Pedido"))?;

        if order.status != OrderStatus::Draft {
            return Err(AppError::NotDraft);
        }

        self.order_repo.delete(&self.pool, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn valor_da_linha_e_qtd_vezes_preco_menos_desconto() {
        assert_eq!(line_amount(3, dec!(10.00), dec!(5.00)), dec!(25.00));
        assert_eq!(line_amount(1, dec!(99.90), Decimal::ZERO), dec!(99.90));
    }

    #[test]
    fn totais_seguem_a_formula_do_documento() {
        // total = 100; imposto = 13; final = 100 − 10 + 13 = 103
        let totals = compute_totals(
            &[dec!(60.00), dec!(40.00)],
            dec!(10.00),
            default_tax_rate(),
        );
        assert_eq!(totals.total, dec!(100.00));
        assert_eq!(totals.tax, dec!(13.00));
        assert_eq!(totals.final_amount, dec!(103.00));
    }

    #[test]
    fn imposto_arredonda_no_centavo() {
        // 33.33 × 0.13 = 4.3329 → 4.33
        let totals = compute_totals(&[dec!(33.33)], Decimal::ZERO, default_tax_rate());
        assert_eq!(totals.tax, dec!(4.33));
        assert_eq!(totals.final_amount, dec!(37.66));
    }

    #[test]
    fn pedido_sem_linhas_zera_tudo() {
        let totals = compute_totals(&[], Decimal::ZERO, default_tax_rate());
        assert_eq!(totals.total, Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.final_amount, Decimal::ZERO);
    }

    mod propriedades {
        use super::*;
        use proptest::prelude::*;

        // Centavos → Decimal com 2 casas, para gerar valores monetários válidos.
        fn money(cents: i64) -> Decimal {
            Decimal::new(cents, 2)
        }

        proptest! {
            #[test]
            fn linha_e_exata_em_centavos(qty in 1..1000i32, price_cents in 0..1_000_000i64, discount_cents in 0..10_000i64) {
                let amount = line_amount(qty, money(price_cents), money(discount_cents));
                // quantidade inteira × preço com 2 casas − desconto com 2 casas
                // nunca passa de 2 casas decimais
                prop_assert_eq!(amount.round_dp(2), amount);
            }

            #[test]
            fn final_e_total_menos_desconto_mais_imposto(
                amounts_cents in proptest::collection::vec(0..1_000_000i64, 0..10),
                discount_cents in 0..10_000i64,
            ) {
                let amounts: Vec<Decimal> = amounts_cents.into_iter().map(money).collect();
                let discount = money(discount_cents);
                let totals = compute_totals(&amounts, discount, default_tax_rate());

                let expected_total: Decimal = amounts.iter().copied().sum();
                prop_assert_eq!(totals.total, expected_total);
                prop_assert_eq!(totals.final_amount, totals.total - discount + totals.tax);
                // imposto já sai arredondado no centavo
                prop_assert_eq!(totals.tax.round_dp(2), totals.tax);
            }
        }
    }
}
