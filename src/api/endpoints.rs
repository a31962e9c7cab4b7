//! Every RingPlus endpoint, declared as data.
//!
//! Each constant describes one operation; [`Api`](crate::Api) exposes a
//! typed method per constant, and [`Api::execute`](crate::Api::execute)
//! accepts any of them directly.
//!
//! | Constant | Method | Path | Payload |
//! |----------|--------|------|---------|
//! | [`USER_ACCOUNTS`] | GET | `/users/{user_id}/accounts` | list of [`Account`](crate::Account) |
//! | [`ACCOUNTS`] | GET | `/accounts` | list of [`Account`](crate::Account) |
//! | [`GET_ACCOUNT`] | GET | `/accounts/{account_id}` | [`Account`](crate::Account) |
//! | [`UPDATE_ACCOUNT`] | PUT | `/accounts/{account_id}` | none |
//! | [`REGISTER_ACCOUNT`] | POST | `/users/{user_id}/account_registration_requests` | [`Request`](crate::Request) |
//! | [`REGISTER_ACCOUNT_STATUS`] | GET | `/account_registration_requests/{request_id}` | [`Request`](crate::Request) |
//! | [`CHANGE_DEVICE`] | POST | `/accounts/{account_id}/device_change_requests` | [`Request`](crate::Request) |
//! | [`CHANGE_DEVICE_STATUS`] | GET | `/device_change_requests/{request_id}` | [`Request`](crate::Request) |
//! | [`CHANGE_PHONE_NUMBER`] | POST | `/accounts/{account_id}/phone_number_change_requests` | [`Request`](crate::Request) |
//! | [`CHANGE_PHONE_NUMBER_STATUS`] | GET | `/phone_number_change_requests/{request_id}` | [`Request`](crate::Request) |
//! | [`ENFORCED_CARRIER_SERVICES`] | GET | `/accounts/{account_id}/enforced_carrier_services` | list of [`CarrierService`](crate::CarrierService) |
//! | [`FLUID_CALL_CREDENTIALS`] | GET | `/accounts/{account_id}/fluidcall_credentials` | list of [`FluidCallCredential`](crate::FluidCallCredential) |
//! | [`CALLS`] | GET | `/accounts/{account_id}/phone_calls` | list of [`Call`](crate::Call) |
//! | [`TEXTS`] | GET | `/accounts/{account_id}/phone_texts` | list of [`Text`](crate::Text) |
//! | [`DATA`] | GET | `/accounts/{account_id}/phone_data` | list of [`Data`](crate::Data) |
//! | [`GET_USER`] | GET | `/users/{user_id}` | [`User`](crate::User) |
//! | [`USERS`] | GET | `/users` | list of [`User`](crate::User) |
//! | [`UPDATE_USER`] | PUT | `/users/{user_id}` | none |
//! | [`VOICEMAIL`] | GET | `/voicemail_boxes/{voicemail_box_id}/voicemail_messages` | list of [`Voicemail`](crate::Voicemail) |
//! | [`DELETE_VOICEMAIL`] | DELETE | `/voicemail_messages/{voicemail_message_id}` | none |

use crate::rest::{Endpoint, ModelKind, PayloadType};

const ACCOUNT_FILTERS: &[&str] = &[
    "name",
    "email_address",
    "phone_number",
    "device_esn",
    "device_iccid",
    "page",
    "per_page",
];

const USAGE_FILTERS: &[&str] = &["start_date", "end_date", "per_page", "page"];

const PAGING: &[&str] = &["page", "per_page"];

/// Accounts belonging to a user.
pub const USER_ACCOUNTS: Endpoint = Endpoint::get("/users/{user_id}/accounts")
    .payload(PayloadType::Model(ModelKind::Account))
    .list()
    .allowed_param(ACCOUNT_FILTERS);

/// Every account the token has access to.
pub const ACCOUNTS: Endpoint = Endpoint::get("/accounts")
    .payload(PayloadType::Model(ModelKind::Account))
    .list()
    .allowed_param(ACCOUNT_FILTERS);

/// One account, with its services, device and voicemail box.
pub const GET_ACCOUNT: Endpoint =
    Endpoint::get("/accounts/{account_id}").payload(PayloadType::Model(ModelKind::Account));

/// Renames an account. No content is returned.
pub const UPDATE_ACCOUNT: Endpoint = Endpoint::put("/accounts/{account_id}")
    .post_container("account")
    .allowed_param(&["name"]);

/// Requests registration of a device to a user as a new account.
pub const REGISTER_ACCOUNT: Endpoint = Endpoint::post("/users/{user_id}/account_registration_requests")
    .payload(PayloadType::Model(ModelKind::Request))
    .post_container("account_registration_request")
    .allowed_param(&[
        "name",
        "billing_plan_id",
        "device_esn",
        "device_iccid",
        "credit_card_id",
    ]);

/// The state of an account registration request.
pub const REGISTER_ACCOUNT_STATUS: Endpoint = Endpoint::get("/account_registration_requests/{request_id}")
    .payload(PayloadType::Model(ModelKind::Request));

/// Requests moving an account to a different physical device.
pub const CHANGE_DEVICE: Endpoint = Endpoint::post("/accounts/{account_id}/device_change_requests")
    .payload(PayloadType::Model(ModelKind::Request))
    .post_container("device_change_request")
    .allowed_param(&["device_esn", "device_iccid"]);

/// The state of a device change request.
pub const CHANGE_DEVICE_STATUS: Endpoint = Endpoint::get("/device_change_requests/{request_id}")
    .payload(PayloadType::Model(ModelKind::Request));

/// Requests a new phone number for an account.
pub const CHANGE_PHONE_NUMBER: Endpoint =
    Endpoint::post("/accounts/{account_id}/phone_number_change_requests")
        .payload(PayloadType::Model(ModelKind::Request));

/// The state of a phone number change request.
pub const CHANGE_PHONE_NUMBER_STATUS: Endpoint =
    Endpoint::get("/phone_number_change_requests/{request_id}")
        .payload(PayloadType::Model(ModelKind::Request));

/// Carrier services enforced on an account.
pub const ENFORCED_CARRIER_SERVICES: Endpoint =
    Endpoint::get("/accounts/{account_id}/enforced_carrier_services")
        .payload(PayloadType::Model(ModelKind::CarrierService))
        .list()
        .allowed_param(PAGING);

/// FluidCall SIP credentials of an account.
pub const FLUID_CALL_CREDENTIALS: Endpoint = Endpoint::get("/accounts/{account_id}/fluidcall_credentials")
    .payload(PayloadType::Model(ModelKind::FluidCallCredential))
    .list()
    .allowed_param(PAGING);

/// Paged phone call records of an account.
pub const CALLS: Endpoint = Endpoint::get("/accounts/{account_id}/phone_calls")
    .payload(PayloadType::Model(ModelKind::Call))
    .list()
    .allowed_param(USAGE_FILTERS);

/// Paged text message records of an account.
pub const TEXTS: Endpoint = Endpoint::get("/accounts/{account_id}/phone_texts")
    .payload(PayloadType::Model(ModelKind::Text))
    .list()
    .allowed_param(USAGE_FILTERS);

/// Paged data usage records of an account.
pub const DATA: Endpoint = Endpoint::get("/accounts/{account_id}/phone_data")
    .payload(PayloadType::Model(ModelKind::Data))
    .list()
    .allowed_param(USAGE_FILTERS);

/// One user, with their accounts.
pub const GET_USER: Endpoint =
    Endpoint::get("/users/{user_id}").payload(PayloadType::Model(ModelKind::User));

/// Every user the token has access to.
pub const USERS: Endpoint = Endpoint::get("/users")
    .payload(PayloadType::Model(ModelKind::User))
    .list()
    .allowed_param(&["email_address", "per_page", "page"]);

/// Changes a user's email or password. No content is returned.
pub const UPDATE_USER: Endpoint = Endpoint::put("/users/{user_id}")
    .post_container("user")
    .allowed_param(&["email", "password"]);

/// Paged messages of a voicemail box.
pub const VOICEMAIL: Endpoint = Endpoint::get("/voicemail_boxes/{voicemail_box_id}/voicemail_messages")
    .payload(PayloadType::Model(ModelKind::Voicemail))
    .list()
    .allowed_param(&["only_new", "per_page", "page"]);

/// Deletes a voicemail message. No content is returned.
pub const DELETE_VOICEMAIL: Endpoint = Endpoint::delete("/voicemail_messages/{voicemail_message_id}");

/// Every endpoint, for iteration.
pub const ALL: [&Endpoint; 20] = [
    &USER_ACCOUNTS,
    &ACCOUNTS,
    &GET_ACCOUNT,
    &UPDATE_ACCOUNT,
    &REGISTER_ACCOUNT,
    &REGISTER_ACCOUNT_STATUS,
    &CHANGE_DEVICE,
    &CHANGE_DEVICE_STATUS,
    &CHANGE_PHONE_NUMBER,
    &CHANGE_PHONE_NUMBER_STATUS,
    &ENFORCED_CARRIER_SERVICES,
    &FLUID_CALL_CREDENTIALS,
    &CALLS,
    &TEXTS,
    &DATA,
    &GET_USER,
    &USERS,
    &UPDATE_USER,
    &VOICEMAIL,
    &DELETE_VOICEMAIL,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpMethod;

    #[test]
    fn test_only_get_endpoints_declare_lists() {
        for endpoint in ALL {
            if endpoint.payload_list {
                assert_eq!(endpoint.method, HttpMethod::Get, "{}", endpoint.path);
            }
        }
    }

    #[test]
    fn test_mutations_declare_containers() {
        assert_eq!(UPDATE_ACCOUNT.post_container, Some("account"));
        assert_eq!(UPDATE_USER.post_container, Some("user"));
        assert_eq!(REGISTER_ACCOUNT.post_container, Some("account_registration_request"));
        assert_eq!(CHANGE_DEVICE.post_container, Some("device_change_request"));
        assert!(DELETE_VOICEMAIL.payload_type.is_none());
    }

    #[test]
    fn test_every_path_placeholder_is_named_id() {
        for endpoint in ALL {
            for name in endpoint.placeholders() {
                assert!(name.ends_with("_id"), "{} has placeholder {name}", endpoint.path);
            }
        }
    }

    #[test]
    fn test_allowed_params_do_not_repeat_placeholders() {
        for endpoint in ALL {
            for name in endpoint.placeholders() {
                assert!(!endpoint.allowed_param.contains(&name), "{}", endpoint.path);
            }
        }
    }
}
