use super::API;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::error::InternalError;
use actix_web::error::QueryPayloadError;
use actix_web::web;
use billing_core::MAX_ACCOUNT_LEN;
use billing_dto::*;
use billing_ledger::*;

pub async fn health<S: Check + 'static>(api: web::Data<API<S>>) -> impl Responder {
    match api
        .ledger()
        .store()
        .ping()
        .await
        .inspect_err(|e| log::error!("health check failed: {}", e))
    {
        Ok(_) => HttpResponse::Ok().body("ok"),
        Err(_) => HttpResponse::ServiceUnavailable().body("database unavailable"),
    }
}
pub async fn debt<S: Store + 'static>(
    api: web::Data<API<S>>,
    req: web::Query<AccountQuery>,
) -> impl Responder {
    match account_number(&req.account) {
        Err(e) => HttpResponse::BadRequest().json(ErrorResponse::new("bad_request", e)),
        Ok(account) => match api.ledger().get_debt(account).await {
            Err(e) => failure(&e, api.expose()),
            Ok(debt) => HttpResponse::Ok().json(DebtResponse {
                account: account.to_string(),
                debt,
            }),
        },
    }
}
pub async fn account<S: Store + 'static>(
    api: web::Data<API<S>>,
    req: web::Query<AccountQuery>,
) -> impl Responder {
    match account_number(&req.account) {
        Err(e) => HttpResponse::BadRequest().json(ErrorResponse::new("bad_request", e)),
        Ok(account) => match api.ledger().get_account_info(account).await {
            Err(e) => failure(&e, api.expose()),
            Ok(record) => HttpResponse::Ok().json(record),
        },
    }
}

/// Maps a lookup failure onto its HTTP status and JSON error body.
pub fn failure(e: &QueryError, expose: bool) -> HttpResponse {
    let message = match e {
        QueryError::QueryFailed(_) if !expose => "internal server error".to_string(),
        e => e.to_string(),
    };
    let body = ErrorResponse::new(e.code(), message);
    match e {
        QueryError::NoSuitableTable { .. } => HttpResponse::ServiceUnavailable().json(body),
        QueryError::AccountNotFound => HttpResponse::NotFound().json(body),
        QueryError::Timeout => HttpResponse::GatewayTimeout().json(body),
        QueryError::SchemaMismatch { .. } => HttpResponse::InternalServerError().json(body),
        QueryError::SuffixOverflow { .. } => HttpResponse::InternalServerError().json(body),
        QueryError::QueryFailed(_) => HttpResponse::InternalServerError().json(body),
    }
}

/// Malformed or missing query strings get the same JSON shape as lookup errors.
pub(crate) fn rejected(e: QueryPayloadError, _: &HttpRequest) -> actix_web::Error {
    let body = ErrorResponse::new("bad_request", e.to_string());
    InternalError::from_response(e, HttpResponse::BadRequest().json(body)).into()
}

fn account_number(account: &str) -> Result<&str, String> {
    if account.trim().is_empty() {
        return Err("account must not be empty".to_string());
    }
    if account.chars().count() > MAX_ACCOUNT_LEN {
        return Err(format!("account must be at most {} characters", MAX_ACCOUNT_LEN));
    }
    if account.chars().any(char::is_control) {
        return Err("account must not contain control characters".to_string());
    }
    Ok(account)
}
