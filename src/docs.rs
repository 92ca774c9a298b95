// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::me,

        // --- Inventory ---
        handlers::inventory::list_inventory,
        handlers::inventory::adjust_inventory,
        handlers::inventory::update_inventory,
        handlers::inventory::delete_inventory,

        // --- Orders ---
        handlers::orders::list_orders,
        handlers::orders::create_order,
        handlers::orders::update_order,
        handlers::orders::delete_order,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::LoginPayload,
            models::auth::AuthResponse,

            // --- Inventory ---
            models::inventory::Warehouse,
            models::inventory::InventoryRecord,
            models::inventory::MovementType,
            models::inventory::InventoryMovement,
            models::inventory::InventoryDetail,
            handlers::inventory::AdjustInventoryPayload,
            handlers::inventory::UpdateInventoryPayload,

            // --- Orders ---
            models::orders::OrderStatus,
            models::orders::Order,
            models::orders::OrderItem,
            models::orders::OrderSummary,
            models::orders::OrderDetail,
            handlers::orders::OrderLinePayload,
            handlers::orders::CreateOrderPayload,
            handlers::orders::UpdateOrderPayload,

            // --- Catalog ---
            models::catalog::Category,
            models::catalog::Product,

            // --- Finance ---
            models::finance::AccountType,
            models::finance::Account,
            models::finance::TransactionType,
            models::finance::TransactionDirection,
            models::finance::Transaction,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e sessão"),
        (name = "Inventory", description = "Saldos de estoque e movimentações"),
        (name = "Orders", description = "Pedidos de venda"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
