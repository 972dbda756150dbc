//! OpenAPI documentation.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::middleware::API_KEY_HEADER;

/// OpenAPI document for the Tally API.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::controllers::transaction_controller::add_transaction,
        crate::controllers::transaction_controller::update_transaction,
        crate::controllers::transaction_controller::list_transactions,
        crate::controllers::transaction_controller::transaction_overview,
        crate::controllers::health_controller::health_check,
    ),
    components(schemas(
        tally_core::TransactionId,
        tally_core::CategoryCode,
        tally_core::KindCode,
        tally_core::CurrencyCode,
        tally_core::ErrorBody,
        tally_service::AddTransactionRequest,
        tally_service::UpdateTransactionRequest,
        tally_service::TransactionEntry,
        tally_service::TypeSummary,
        crate::responses::Ack,
        crate::responses::ListingBody,
        crate::responses::OverviewBody,
        crate::controllers::health_controller::HealthResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "transaction", description = "Transaction recording and reporting"),
        (name = "health", description = "Service health")
    ),
    info(
        title = "Tally API",
        description = "Minimal HTTP JSON API for recording and summarizing monetary transactions"
    )
)]
pub struct ApiDoc;

/// Registers the API key header scheme referenced by the transaction paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("/transaction/add"));
        assert!(json.contains("/transaction/update"));
        assert!(json.contains("/transaction/list"));
        assert!(json.contains("/transaction/overview"));
        assert!(json.contains("/health"));
        assert!(json.contains("api_key"));
    }
}
