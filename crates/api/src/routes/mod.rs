pub mod auth;
pub mod complaints;
pub mod front_desk;
pub mod health;
pub mod inventory;
pub mod maintenance;
pub mod meetings;
pub mod notifications;
pub mod resident_profiles;
pub mod rooms;
pub mod rules;
pub mod users;
pub mod vendors;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                  register (public)
/// /auth/login                                     login (public)
/// /auth/profile                                   decoded token (auth)
///
/// /users                                          list, create (admin only)
/// /users/search                                   keyword search
/// /users/{id}                                     get, update, delete
///
/// /asset-categories                               list, create
/// /asset-categories/search                        keyword search
/// /asset-categories/{id}                          get, update, delete
/// /asset-categories/{id}/assets                   assets in the category
///
/// /assets                                         list, create
/// /assets/search                                  keyword search
/// /assets/{id}                                    get, update, delete
/// /assets/{id}/maintenance-history                history of one asset
///
/// /vendors                                        list, create
/// /vendors/search                                 keyword search
/// /vendors/{id}                                   get, update, delete
/// /vendors/{id}/contracts                         contracts of a vendor (admin)
///
/// /contracts                                      list, create (admin only)
/// /contracts/search                               keyword search
/// /contracts/{id}                                 get, update, delete
///
/// /maintenance-plans                              list, create
/// /maintenance-plans/search                       keyword search
/// /maintenance-plans/{id}                         get, update, delete
///
/// /maintenance-history                            list, create
/// /maintenance-history/search                     keyword search
/// /maintenance-history/{id}                       get, update, delete
///
/// /emergency-maintenance                          list, report (auth)
/// /emergency-maintenance/search                   keyword search
/// /emergency-maintenance/{id}                     get, update, delete
///
/// /receptions                                     list, create (admin only)
/// /receptions/search                              keyword search
/// /receptions/{id}                                get, update, delete
/// /receptions/{id}/check-out                      stamp check-out (POST)
///
/// /visitors                                       list, create (admin only)
/// /visitors/search                                keyword search
/// /visitors/{id}                                  get, update, delete
///
/// /complaints                                     list (admin), file (auth)
/// /complaints/search                              keyword search (admin)
/// /complaints/mine                                caller's complaints
/// /complaints/{id}                                get (owner), update, delete
///
/// /rooms                                          list, create
/// /rooms/search                                   keyword search
/// /rooms/{id}                                     get, update, delete
/// /rooms/{id}/residents                           list, assign
/// /rooms/{id}/residents/{user_id}                 unassign (DELETE)
///
/// /notifications                                  list, publish
/// /notifications/search                           keyword search
/// /notifications/mine                             addressed to caller's role
/// /notifications/{id}                             get, update, delete
///
/// /meetings                                       list, create
/// /meetings/search                                keyword search
/// /meetings/{id}                                  get, update, delete
/// /meetings/{id}/register                         register, cancel (caller)
/// /meetings/{id}/registrations                    attendee list (admin)
///
/// /residence-rules                                list, create
/// /residence-rules/search                         keyword search
/// /residence-rules/{id}                           get, update, delete
///
/// /resident-profiles                              list (admin), create
/// /resident-profiles/search                       keyword search (admin)
/// /resident-profiles/me                           caller's profile
/// /resident-profiles/{id}                         get, update (owner), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        // Inventory.
        .nest("/asset-categories", inventory::category_router())
        .nest("/assets", inventory::asset_router())
        // Suppliers.
        .nest("/vendors", vendors::vendor_router())
        .nest("/contracts", vendors::contract_router())
        // Upkeep.
        .nest("/maintenance-plans", maintenance::plan_router())
        .nest("/maintenance-history", maintenance::history_router())
        .nest("/emergency-maintenance", maintenance::emergency_router())
        // Front desk.
        .nest("/receptions", front_desk::reception_router())
        .nest("/visitors", front_desk::visitor_router())
        // Residents.
        .nest("/complaints", complaints::router())
        .nest("/rooms", rooms::router())
        .nest("/notifications", notifications::router())
        .nest("/meetings", meetings::router())
        .nest("/residence-rules", rules::router())
        .nest("/resident-profiles", resident_profiles::router())
}
