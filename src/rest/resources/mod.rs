//! RingPlus entity types.
//!
//! Every entity is a serde struct with explicit optional fields, a flattened
//! `extra` map for keys it does not name, the raw JSON it was parsed from and
//! an [`ApiRef`](crate::rest::ApiRef) back-reference. Entities are created by
//! [`Model::parse`](crate::rest::Model::parse) and never mutated afterwards.
//!
//! # Entities
//!
//! | Type | Envelope key | Collection key |
//! |------|--------------|----------------|
//! | [`Account`] | `account` | `accounts` |
//! | [`AccountService`] | `account_service` | `account_services` |
//! | [`ActiveDevice`] | `active_device` | `active_devices` |
//! | [`User`] | `user` | `users` |
//! | [`Call`] | `call` | `phone_calls` |
//! | [`Text`] | `text` | `phone_texts` |
//! | [`Data`] | `data` | `phone_data` |
//! | [`VoicemailBox`] | `voicemail_box` | `voicemail_boxes` |
//! | [`Voicemail`] | `voicemail` | `voicemail_messages` |
//! | [`Request`] | `request` | `requests` |
//! | [`CarrierService`] | `carrier_service` | `enforced_carrier_services` |
//! | [`FluidCallCredential`] | `fluidcall` | `fluidcall_credentials` |

/// Implements [`Model`](crate::rest::Model) and
/// [`Identified`](crate::rest::Identified) for an entity struct.
///
/// `nested` lists `Option<Model>` fields and `lists` lists `Vec<Model>` fields
/// that must receive the back-reference too. Each field name must match the
/// JSON key it is read from.
macro_rules! impl_model {
    ($ty:ident $(, nested: [$($nested:ident),*])? $(, lists: [$($list:ident),*])?) => {
        impl $crate::rest::Identified for $ty {
            fn id(&self) -> Option<i64> {
                self.id
            }
        }

        impl $crate::rest::Model for $ty {
            const KIND: $crate::rest::ModelKind = $crate::rest::ModelKind::$ty;

            fn raw(&self) -> &serde_json::Value {
                &self.raw
            }

            fn extra(&self) -> &serde_json::Map<String, serde_json::Value> {
                &self.extra
            }

            fn api(&self) -> &$crate::rest::ApiRef {
                &self.api
            }

            fn set_raw(&mut self, raw: serde_json::Value) {
                self.raw = raw;
            }

            fn attach(&mut self, api: &$crate::rest::ApiRef) {
                self.api = api.clone();
                $($(
                    if let Some(nested) = self.$nested.as_mut() {
                        nested.attach(api);
                    }
                )*)?
                $($(
                    for item in &mut self.$list {
                        item.attach(api);
                    }
                )*)?
            }

            fn resolve_nested(
                &mut self,
                factory: &$crate::rest::ModelFactory,
                api: &$crate::rest::ApiRef,
            ) -> Result<(), $crate::rest::ParseError> {
                $($(
                    if let Some(value) = self.raw.get(stringify!($nested)) {
                        self.$nested = if value.is_null() {
                            None
                        } else {
                            Some(factory.parse_as(api, value)?)
                        };
                    }
                )*)?
                $($(
                    if let Some(value) = self.raw.get(stringify!($list)) {
                        self.$list = if value.is_null() {
                            Vec::new()
                        } else {
                            factory.parse_list_as(api, value)?.into_vec()
                        };
                    }
                )*)?
                let _ = (factory, api);
                Ok(())
            }

            fn into_entity(self) -> $crate::rest::Entity {
                $crate::rest::Entity::$ty(self)
            }

            fn from_entity(entity: $crate::rest::Entity) -> Option<Self> {
                match entity {
                    $crate::rest::Entity::$ty(model) => Some(model),
                    _ => None,
                }
            }
        }
    };
}

mod account;
mod carrier_service;
mod fluidcall;
mod request;
mod usage;
mod user;
mod voicemail;

pub use account::{Account, AccountService, ActiveDevice};
pub use carrier_service::CarrierService;
pub use fluidcall::FluidCallCredential;
pub use request::Request;
pub use usage::{Call, Data, Text};
pub use user::User;
pub use voicemail::{Voicemail, VoicemailBox};

use crate::api::Api;
use crate::rest::errors::{ArgumentError, RingPlusError};
use crate::rest::model::Model;

/// Resolves the client and id an entity needs for a follow-up call.
fn follow_up<M: Model>(model: &M, id_name: &'static str) -> Result<(Api, i64), RingPlusError> {
    let api = model.api().upgrade().ok_or(RingPlusError::Detached {
        model: M::KIND.name(),
    })?;
    let id = model.id().ok_or_else(|| ArgumentError::Missing {
        endpoint: M::KIND.name(),
        name: id_name.to_string(),
    })?;
    Ok((api, id))
}
