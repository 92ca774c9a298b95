// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        ActivityRepository, CatalogRepository, CustomerRepository, FinanceRepository,
        InventoryRepository, NotificationRepository, OrderRepository, PurchaseRepository,
        ReportRepository, SequenceRepository, SupplierRepository, UserRepository,
        WarehouseRepository,
    },
    services::{
        activity_service::ActivityService, auth::AuthService, catalog_service::CatalogService,
        customer_service::CustomerService, finance_service::FinanceService,
        inventory_service::InventoryService, notification_service::NotificationService,
        order_service::OrderService, purchase_service::PurchaseService,
        report_service::ReportService, supplier_service::SupplierService,
        user_service::UserService, warehouse_service::WarehouseService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,

    pub auth_service: AuthService,
    pub user_service: UserService,
    pub catalog_service: CatalogService,
    pub warehouse_service: WarehouseService,
    pub inventory_service: InventoryService,
    pub customer_service: CustomerService,
    pub supplier_service: SupplierService,
    pub order_service: OrderService,
    pub purchase_service: PurchaseService,
    pub finance_service: FinanceService,
    pub notification_service: NotificationService,
    pub activity_service: ActivityService,
    pub report_service: ReportService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o grafo de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let warehouse_repo = WarehouseRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());
        let customer_repo = CustomerRepository::new(db_pool.clone());
        let supplier_repo = SupplierRepository::new(db_pool.clone());
        let order_repo = OrderRepository::new(db_pool.clone());
        let purchase_repo = PurchaseRepository::new(db_pool.clone());
        let finance_repo = FinanceRepository::new(db_pool.clone());
        let notification_repo = NotificationRepository::new(db_pool.clone());
        let activity_repo = ActivityRepository::new(db_pool.clone());
        let sequence_repo = SequenceRepository::new(db_pool.clone());
        let report_repo = ReportRepository::new(db_pool.clone());

        let auth_service =
            AuthService::new(user_repo.clone(), jwt_secret.clone(), db_pool.clone());
        let user_service = UserService::new(user_repo, db_pool.clone());
        let catalog_service = CatalogService::new(catalog_repo, db_pool.clone());
        let warehouse_service = WarehouseService::new(warehouse_repo, db_pool.clone());
        let inventory_service = InventoryService::new(inventory_repo, db_pool.clone());
        let customer_service = CustomerService::new(customer_repo, db_pool.clone());
        let supplier_service = SupplierService::new(supplier_repo, db_pool.clone());
        let order_service =
            OrderService::new(order_repo, sequence_repo.clone(), db_pool.clone());
        let purchase_service =
            PurchaseService::new(purchase_repo, sequence_repo.clone(), db_pool.clone());
        let finance_service =
            FinanceService::new(finance_repo, sequence_repo, db_pool.clone());
        let notification_service = NotificationService::new(notification_repo, db_pool.clone());
        let activity_service = ActivityService::new(activity_repo, db_pool.clone());
        let report_service = ReportService::new(report_repo);

        Ok(Self {
            db_pool,
            jwt_secret,
            auth_service,
            user_service,
            catalog_service,
            warehouse_service,
            inventory_service,
            customer_service,
            supplier_service,
            order_service,
            purchase_service,
            finance_service,
            notification_service,
            activity_service,
            report_service,
        })
    }
}
