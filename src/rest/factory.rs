//! The model factory: table-driven dispatch from payload kind to parser.
//!
//! Endpoints declare what their response contains with a [`PayloadType`].
//! For model payloads the binder looks the [`ModelKind`] up in a
//! [`ModelFactory`] and calls the registered [`ModelParser`]. Every kind has a
//! default parser; [`ModelFactory::register`] replaces one without touching
//! the binder or the endpoint table.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use ringplus::rest::{ApiRef, Entity, ModelFactory, ModelKind, ModelParser, ParseError, ResultSet};
//! use serde_json::{json, Value};
//!
//! /// Rejects accounts without a phone number.
//! #[derive(Debug)]
//! struct StrictAccounts;
//!
//! impl ModelParser for StrictAccounts {
//!     fn parse(&self, api: &ApiRef, json: &Value) -> Result<Entity, ParseError> {
//!         let entity = ModelKind::Account.default_parser().parse(api, json)?;
//!         match &entity {
//!             Entity::Account(a) if a.phone_number.is_none() => {
//!                 Err(ParseError::new("account", "missing phone number"))
//!             }
//!             _ => Ok(entity),
//!         }
//!     }
//!
//!     fn parse_list(&self, api: &ApiRef, json: &Value) -> Result<ResultSet<Entity>, ParseError> {
//!         ModelKind::Account.default_parser().parse_list(api, json)
//!     }
//! }
//!
//! let factory = ModelFactory::default().register(ModelKind::Account, Arc::new(StrictAccounts));
//! let parser = factory.parser(ModelKind::Account);
//! assert!(parser.parse(&ApiRef::detached(), &json!({"id": 1})).is_err());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;

use crate::rest::errors::ParseError;
use crate::rest::model::{ApiRef, Model};
use crate::rest::resources::{
    Account, AccountService, ActiveDevice, Call, CarrierService, Data, FluidCallCredential,
    Request, Text, User, Voicemail, VoicemailBox,
};
use crate::rest::result_set::{Identified, ResultSet};

/// The entity types the API returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelKind {
    /// [`Account`]
    Account,
    /// [`AccountService`]
    AccountService,
    /// [`ActiveDevice`]
    ActiveDevice,
    /// [`User`]
    User,
    /// [`Call`]
    Call,
    /// [`Text`]
    Text,
    /// [`Data`]
    Data,
    /// [`VoicemailBox`]
    VoicemailBox,
    /// [`Voicemail`]
    Voicemail,
    /// [`Request`]
    Request,
    /// [`CarrierService`]
    CarrierService,
    /// [`FluidCallCredential`]
    FluidCallCredential,
}

impl ModelKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Account,
        Self::AccountService,
        Self::ActiveDevice,
        Self::User,
        Self::Call,
        Self::Text,
        Self::Data,
        Self::VoicemailBox,
        Self::Voicemail,
        Self::Request,
        Self::CarrierService,
        Self::FluidCallCredential,
    ];

    /// The singular envelope key, e.g. `account` in `{"account": {...}}`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::AccountService => "account_service",
            Self::ActiveDevice => "active_device",
            Self::User => "user",
            Self::Call => "call",
            Self::Text => "text",
            Self::Data => "data",
            Self::VoicemailBox => "voicemail_box",
            Self::Voicemail => "voicemail",
            Self::Request => "request",
            Self::CarrierService => "carrier_service",
            Self::FluidCallCredential => "fluidcall",
        }
    }

    /// The plural key a list of this kind is returned under.
    #[must_use]
    pub const fn collection(&self) -> &'static str {
        match self {
            Self::Account => "accounts",
            Self::AccountService => "account_services",
            Self::ActiveDevice => "active_devices",
            Self::User => "users",
            Self::Call => "phone_calls",
            Self::Text => "phone_texts",
            Self::Data => "phone_data",
            Self::VoicemailBox => "voicemail_boxes",
            Self::Voicemail => "voicemail_messages",
            Self::Request => "requests",
            Self::CarrierService => "enforced_carrier_services",
            Self::FluidCallCredential => "fluidcall_credentials",
        }
    }

    /// Returns the built-in parser for this kind.
    #[must_use]
    pub fn default_parser(&self) -> Arc<dyn ModelParser> {
        match self {
            Self::Account => Arc::new(DefaultParser::<Account>::new()),
            Self::AccountService => Arc::new(DefaultParser::<AccountService>::new()),
            Self::ActiveDevice => Arc::new(DefaultParser::<ActiveDevice>::new()),
            Self::User => Arc::new(DefaultParser::<User>::new()),
            Self::Call => Arc::new(DefaultParser::<Call>::new()),
            Self::Text => Arc::new(DefaultParser::<Text>::new()),
            Self::Data => Arc::new(DefaultParser::<Data>::new()),
            Self::VoicemailBox => Arc::new(DefaultParser::<VoicemailBox>::new()),
            Self::Voicemail => Arc::new(DefaultParser::<Voicemail>::new()),
            Self::Request => Arc::new(DefaultParser::<Request>::new()),
            Self::CarrierService => Arc::new(DefaultParser::<CarrierService>::new()),
            Self::FluidCallCredential => Arc::new(DefaultParser::<FluidCallCredential>::new()),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How an endpoint's response body is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PayloadType {
    /// Decoded JSON, returned as-is.
    Json,
    /// A bare list of ids, or an object with an `ids` field.
    Ids,
    /// An entity (or list of entities) parsed through the model factory.
    Model(ModelKind),
}

impl PayloadType {
    /// The name used in parse errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Ids => "ids",
            Self::Model(kind) => kind.name(),
        }
    }
}

/// A parsed entity of any kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Entity {
    /// An account.
    Account(Account),
    /// A service attached to an account.
    AccountService(AccountService),
    /// The device active on an account.
    ActiveDevice(ActiveDevice),
    /// A user.
    User(User),
    /// A phone call record.
    Call(Call),
    /// A text message record.
    Text(Text),
    /// A data usage record.
    Data(Data),
    /// A voicemail box.
    VoicemailBox(VoicemailBox),
    /// A voicemail message.
    Voicemail(Voicemail),
    /// An asynchronous change request.
    Request(Request),
    /// An enforced carrier service.
    CarrierService(CarrierService),
    /// A FluidCall credential.
    FluidCallCredential(FluidCallCredential),
}

impl Entity {
    /// Returns the kind of the wrapped entity.
    #[must_use]
    pub const fn kind(&self) -> ModelKind {
        match self {
            Self::Account(_) => ModelKind::Account,
            Self::AccountService(_) => ModelKind::AccountService,
            Self::ActiveDevice(_) => ModelKind::ActiveDevice,
            Self::User(_) => ModelKind::User,
            Self::Call(_) => ModelKind::Call,
            Self::Text(_) => ModelKind::Text,
            Self::Data(_) => ModelKind::Data,
            Self::VoicemailBox(_) => ModelKind::VoicemailBox,
            Self::Voicemail(_) => ModelKind::Voicemail,
            Self::Request(_) => ModelKind::Request,
            Self::CarrierService(_) => ModelKind::CarrierService,
            Self::FluidCallCredential(_) => ModelKind::FluidCallCredential,
        }
    }

    /// Returns the raw JSON the entity was parsed from.
    #[must_use]
    pub fn raw(&self) -> &Value {
        match self {
            Self::Account(m) => m.raw(),
            Self::AccountService(m) => m.raw(),
            Self::ActiveDevice(m) => m.raw(),
            Self::User(m) => m.raw(),
            Self::Call(m) => m.raw(),
            Self::Text(m) => m.raw(),
            Self::Data(m) => m.raw(),
            Self::VoicemailBox(m) => m.raw(),
            Self::Voicemail(m) => m.raw(),
            Self::Request(m) => m.raw(),
            Self::CarrierService(m) => m.raw(),
            Self::FluidCallCredential(m) => m.raw(),
        }
    }

    /// Re-parses the entity's nested entities through `factory`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] a nested parser reports.
    pub fn resolve_nested(&mut self, factory: &ModelFactory, api: &ApiRef) -> Result<(), ParseError> {
        match self {
            Self::Account(m) => m.resolve_nested(factory, api),
            Self::AccountService(m) => m.resolve_nested(factory, api),
            Self::ActiveDevice(m) => m.resolve_nested(factory, api),
            Self::User(m) => m.resolve_nested(factory, api),
            Self::Call(m) => m.resolve_nested(factory, api),
            Self::Text(m) => m.resolve_nested(factory, api),
            Self::Data(m) => m.resolve_nested(factory, api),
            Self::VoicemailBox(m) => m.resolve_nested(factory, api),
            Self::Voicemail(m) => m.resolve_nested(factory, api),
            Self::Request(m) => m.resolve_nested(factory, api),
            Self::CarrierService(m) => m.resolve_nested(factory, api),
            Self::FluidCallCredential(m) => m.resolve_nested(factory, api),
        }
    }

    /// Unwraps the entity as a concrete model type.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the entity is of a different kind.
    pub fn into_model<T: Model>(self) -> Result<T, ParseError> {
        let kind = self.kind();
        T::from_entity(self).ok_or_else(|| {
            ParseError::new(
                T::KIND.name(),
                format!("factory produced a {kind} entity"),
            )
        })
    }
}

impl Identified for Entity {
    fn id(&self) -> Option<i64> {
        match self {
            Self::Account(m) => m.id(),
            Self::AccountService(m) => m.id(),
            Self::ActiveDevice(m) => m.id(),
            Self::User(m) => m.id(),
            Self::Call(m) => m.id(),
            Self::Text(m) => m.id(),
            Self::Data(m) => m.id(),
            Self::VoicemailBox(m) => m.id(),
            Self::Voicemail(m) => m.id(),
            Self::Request(m) => m.id(),
            Self::CarrierService(m) => m.id(),
            Self::FluidCallCredential(m) => m.id(),
        }
    }
}

/// Parses JSON into entities of one kind.
pub trait ModelParser: Send + Sync + fmt::Debug {
    /// Parses a single (possibly enveloped) object.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the JSON does not describe the entity.
    fn parse(&self, api: &ApiRef, json: &Value) -> Result<Entity, ParseError>;

    /// Parses a bare array or an object keyed by the collection name.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the JSON is neither shape.
    fn parse_list(&self, api: &ApiRef, json: &Value) -> Result<ResultSet<Entity>, ParseError>;
}

/// The built-in parser for a model type, delegating to [`Model::parse`] and
/// [`Model::parse_list`].
pub struct DefaultParser<T>(PhantomData<fn() -> T>);

impl<T> DefaultParser<T> {
    /// Creates the parser.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for DefaultParser<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Model> fmt::Debug for DefaultParser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DefaultParser<{}>", T::KIND.name())
    }
}

impl<T: Model> ModelParser for DefaultParser<T> {
    fn parse(&self, api: &ApiRef, json: &Value) -> Result<Entity, ParseError> {
        T::parse(api, json).map(Model::into_entity)
    }

    fn parse_list(&self, api: &ApiRef, json: &Value) -> Result<ResultSet<Entity>, ParseError> {
        Ok(T::parse_list(api, json)?.map(Model::into_entity))
    }
}

/// Registry of parsers, one per [`ModelKind`].
///
/// Cloning is cheap; parsers are shared.
#[derive(Clone)]
pub struct ModelFactory {
    parsers: HashMap<ModelKind, Arc<dyn ModelParser>>,
}

impl ModelFactory {
    /// Creates a factory with the built-in parser for every kind.
    #[must_use]
    pub fn new() -> Self {
        let parsers = ModelKind::ALL
            .iter()
            .map(|kind| (*kind, kind.default_parser()))
            .collect();
        Self { parsers }
    }

    /// Replaces the parser for `kind`.
    #[must_use]
    pub fn register(mut self, kind: ModelKind, parser: Arc<dyn ModelParser>) -> Self {
        self.parsers.insert(kind, parser);
        self
    }

    /// Returns the parser registered for `kind`.
    #[must_use]
    pub fn parser(&self, kind: ModelKind) -> Arc<dyn ModelParser> {
        self.parsers
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| kind.default_parser())
    }

    /// Parses one entity of `kind` with the registered parser, then parses
    /// every entity nested inside it the same way.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] any parser reports.
    pub fn parse(&self, kind: ModelKind, api: &ApiRef, json: &Value) -> Result<Entity, ParseError> {
        let mut entity = self.parser(kind).parse(api, json)?;
        entity.resolve_nested(self, api)?;
        Ok(entity)
    }

    /// Parses a list of `kind` with the registered parser, resolving nested
    /// entities in every element.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] any parser reports.
    pub fn parse_list(
        &self,
        kind: ModelKind,
        api: &ApiRef,
        json: &Value,
    ) -> Result<ResultSet<Entity>, ParseError> {
        self.parser(kind).parse_list(api, json)?.try_map(|mut entity| {
            entity.resolve_nested(self, api)?;
            Ok(entity)
        })
    }

    /// [`parse`](Self::parse) for a concrete model type.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if parsing fails or the registered parser
    /// produced a different kind.
    pub fn parse_as<T: Model>(&self, api: &ApiRef, json: &Value) -> Result<T, ParseError> {
        self.parse(T::KIND, api, json)?.into_model()
    }

    /// [`parse_list`](Self::parse_list) for a concrete model type.
    ///
    /// # Errors
    ///
    /// See [`parse_as`](Self::parse_as).
    pub fn parse_list_as<T: Model>(
        &self,
        api: &ApiRef,
        json: &Value,
    ) -> Result<ResultSet<T>, ParseError> {
        self.parse_list(T::KIND, api, json)?.try_map(Entity::into_model)
    }
}

impl Default for ModelFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ModelFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.parsers.keys().collect();
        kinds.sort();
        f.debug_struct("ModelFactory").field("kinds", &kinds).finish()
    }
}

// Verify factory types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ModelFactory>();
    assert_send_sync::<Entity>();
};
