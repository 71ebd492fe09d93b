use std::sync::Arc;

use axum::{extract::Extension, routing::get, Json, Router};

use teller_accounts::{Account, NewAccount};

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::extract::{AccountIdPath, JsonBody};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_accounts).post(create_account))
        .route("/:id", get(get_account).delete(delete_account))
}

pub async fn list_accounts(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<Account>>, ApiError> {
    let accounts = services.store().get_accounts().await?;
    Ok(Json(accounts))
}

pub async fn get_account(
    Extension(services): Extension<Arc<AppServices>>,
    AccountIdPath(id): AccountIdPath,
) -> Result<Json<Account>, ApiError> {
    let account = services.store().get_account_by_id(id).await?;
    Ok(Json(account))
}

pub async fn create_account(
    Extension(services): Extension<Arc<AppServices>>,
    JsonBody(body): JsonBody<dto::CreateAccountRequest>,
) -> Result<Json<Account>, ApiError> {
    let account = NewAccount::new(&body.first_name, &body.last_name)?;
    let created = services.store().create_account(account).await?;

    tracing::info!(account_id = %created.id, number = %created.number, "account created");
    Ok(Json(created))
}

pub async fn delete_account(
    Extension(services): Extension<Arc<AppServices>>,
    AccountIdPath(id): AccountIdPath,
) -> Result<Json<dto::DeletedAccount>, ApiError> {
    services.store().delete_account(id).await?;

    tracing::info!(account_id = %id, "account deleted");
    Ok(Json(dto::DeletedAccount { deleted: id }))
}
