//! HTTP inbound adapter exposing the REST endpoints.

use actix_web::web;

pub mod calculator;
pub mod error;
pub mod health;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register every endpoint on `cfg`.
///
/// Callers provide `web::Data<HttpState>`, `web::Data<HealthState>` and the
/// [`validation::json_config`] extractor configuration.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use calculator_backend::inbound::http::{routes, validation::json_config};
///
/// let app = App::new().app_data(json_config()).configure(routes);
/// ```
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(users::create_user)
        .service(calculator::add)
        .service(calculator::subtract)
        .service(calculator::multiply)
        .service(calculator::divide)
        .service(health::ready)
        .service(health::live);
}
