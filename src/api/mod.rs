//! # API Module
//!
//! HTTP endpoints of the azwebapp server. Every `/api/webapp` endpoint maps
//! one route to one [`crate::management::WebAppManagementClient`] call and
//! returns the provider's result unchanged, as JSON, or as XML text for the
//! publish profile.
//!
//! ## Endpoints
//!
//! | Verb | Path | Handler |
//! |---|---|---|
//! | GET | `/api/webapp/all` | [`webapp::list_all`] |
//! | GET | `/api/webapp/all/resourcegroup/{rg}` | [`webapp::list_by_resource_group`] |
//! | GET | `/api/webapp/{rg}/{app}` | [`webapp::get_web_app`] |
//! | GET | `/api/webapp/usagequota/{rg}/{app}` | [`webapp::usage_quota`] |
//! | GET | `/api/webapp/webAppConfig/{rg}/{app}` | [`webapp::config`] |
//! | GET | `/api/webapp/appSettings/{rg}/{app}` | [`webapp::app_settings`] |
//! | GET | `/api/webapp/slots/{rg}/{app}` | [`webapp::slots`] |
//! | GET | `/api/webapp/appServicePlan/{rg}/{plan}` | [`webapp::app_service_plan`] |
//! | GET | `/api/webapp/publishProfile/{rg}/{app}` | [`webapp::publish_profile`] |
//! | PUT | `/api/webapp/{rg}/{location}/{app}` | [`webapp::create_or_update`] |
//! | DELETE | `/api/webapp/{rg}/{app}` | [`webapp::delete`] |
//! | GET | `/health` | [`health`] |
//!
//! ## Errors
//!
//! Handlers return [`ApiError`], which keeps the provider's status, code and
//! message. Provider 4xx statuses pass through; every other failure is
//! reported as `502 Bad Gateway` with a JSON [`ErrorResponse`] body.

mod error;
mod health;
pub mod webapp;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use health::health;
