// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas (sem token)
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    // Tudo abaixo exige Bearer token válido (401 sem ele)
    let protected_routes = Router::new()
        .route("/auth/me", get(handlers::auth::me))
        .route(
            "/users",
            get(handlers::users::list_users)
                .post(handlers::users::create_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        .route(
            "/categories",
            get(handlers::products::list_categories).post(handlers::products::create_category),
        )
        .route(
            "/products",
            get(handlers::products::list_products)
                .post(handlers::products::create_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route(
            "/warehouses",
            get(handlers::warehouses::list_warehouses)
                .post(handlers::warehouses::create_warehouse)
                .put(handlers::warehouses::update_warehouse),
        )
        .route(
            "/inventory",
            get(handlers::inventory::list_inventory)
                .post(handlers::inventory::adjust_inventory)
                .put(handlers::inventory::update_inventory)
                .delete(handlers::inventory::delete_inventory),
        )
        .route(
            "/customers",
            get(handlers::customers::list_customers)
                .post(handlers::customers::create_customer)
                .put(handlers::customers::update_customer)
                .delete(handlers::customers::delete_customer),
        )
        .route(
            "/suppliers",
            get(handlers::suppliers::list_suppliers)
                .post(handlers::suppliers::create_supplier)
                .put(handlers::suppliers::update_supplier)
                .delete(handlers::suppliers::delete_supplier),
        )
        .route(
            "/orders",
            get(handlers::orders::list_orders)
                .post(handlers::orders::create_order)
                .put(handlers::orders::update_order)
                .delete(handlers::orders::delete_order),
        )
        .route(
            "/purchases",
            get(handlers::purchases::list_purchases)
                .post(handlers::purchases::create_purchase)
                .put(handlers::purchases::update_purchase)
                .delete(handlers::purchases::delete_purchase),
        )
        .route(
            "/accounts",
            get(handlers::finance::list_accounts).post(handlers::finance::create_account),
        )
        .route(
            "/transactions",
            get(handlers::finance::list_transactions)
                .post(handlers::finance::create_transaction),
        )
        .route(
            "/notifications",
            get(handlers::notifications::list_notifications)
                .post(handlers::notifications::create_notification)
                .put(handlers::notifications::mark_notifications_read),
        )
        .route("/activities", get(handlers::activities::list_activities))
        .route("/reports/sales", get(handlers::reports::sales_report))
        .route(
            "/reports/inventory",
            get(handlers::reports::inventory_report),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected_routes)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
