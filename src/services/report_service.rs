// src/services/report_service.rs

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::{
    common::error::AppError,
    db::ReportRepository,
    models::inventory::MovementDetail,
    models::reports::{DailySales, InventoryStatusReport, SalesSummary, TopProduct},
};

const TOP_PRODUCTS_LIMIT: i64 = 10;
const MOVEMENTS_LIMIT: i64 = 100;

/// Começo do dia em UTC, para transformar datas da query string em limites.
fn day_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Fim do intervalo: o dia seguinte, exclusivo, vira `<= fim do dia`.
fn day_end(day: NaiveDate) -> DateTime<Utc> {
    day_start(day) + Duration::days(1) - Duration::microseconds(1)
}

#[derive(Clone)]
pub struct ReportService {
    report_repo: ReportRepository,
}

impl ReportService {
    pub fn new(report_repo: ReportRepository) -> Self {
        Self { report_repo }
    }

    pub async fn sales_summary(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<SalesSummary, AppError> {
        let start = start_date.map(day_start);
        let end = end_date.map(day_end);

        let (total_orders, total_revenue) = self.report_repo.sales_totals(start, end).await?;
        let by_status = self.report_repo.sales_by_status(start, end).await?;

        Ok(SalesSummary {
            total_orders,
            total_revenue,
            by_status,
        })
    }

    /// Tendência diária. Sem intervalo informado, os últimos 30 dias.
    pub async fn sales_daily(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<DailySales>, AppError> {
        let end = end_date.map(day_end).unwrap_or_else(Utc::now);
        let start = start_date
            .map(day_start)
            .unwrap_or_else(|| end - Duration::days(30));

        self.report_repo.sales_daily(start, end).await
    }

    pub async fn top_products(&self) -> Result<Vec<TopProduct>, AppError> {
        self.report_repo.top_products(TOP_PRODUCTS_LIMIT).await
    }

    pub async fn inventory_status(&self) -> Result<InventoryStatusReport, AppError> {
        let summary = self.report_repo.inventory_summary().await?;
        let details = self.report_repo.inventory_details().await?;
        Ok(InventoryStatusReport { summary, details })
    }

    pub async fn inventory_movements(&self) -> Result<Vec<MovementDetail>, AppError> {
        self.report_repo.latest_movements(MOVEMENTS_LIMIT).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limites_do_dia_cobrem_o_dia_inteiro() {
        let day = NaiveDate::from_ymd_opt(2026, 8, 8).unwrap();
        let start = day_start(day);
        let end = day_end(day);
        assert!(start < end);
        assert_eq!(start.date_naive(), day);
        assert_eq!(end.date_naive(), day);
    }
}
