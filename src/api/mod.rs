//! Endpoint index and section services
//!
//! Every endpoint of the member data service is declared once, in a table per
//! section. Each table produces:
//!
//! - `descriptors`: one `const` [`Endpoint`] per endpoint (path, response
//!   kind, parameter schema), collected into `ENDPOINTS`
//! - a service type with one async method per endpoint
//!
//! Parameters are validated against the descriptor before any request is
//! sent: unknown names, missing required values, and values of the wrong kind
//! are rejected with [`ApiError::Validation`].
//!
//! ```rust,no_run
//! use pitwall_data::{Credentials, DataClient, QueryParams};
//!
//! # #[tokio::main]
//! # async fn main() -> pitwall_data::Result<()> {
//! let client = DataClient::new(Credentials::from_env()?)?;
//! let me = client.member().info().await?;
//! let results = client
//!     .results()
//!     .get(QueryParams::new().with("subsession_id", 12345678))
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::payload::ResponseKind;
use crate::query::{QueryParams, QueryValue};
use crate::{ApiError, DataClient, Result};

/// Maps `required` / `optional` markers in endpoint tables to flags.
macro_rules! required {
    (required) => {
        true
    };
    (optional) => {
        false
    };
}

/// Emits one service method, taking parameters only when the endpoint has any.
macro_rules! endpoint_method {
    ($(#[$meta:meta])* $method:ident, $endpoint:path, []) => {
        $(#[$meta])*
        pub async fn $method(&self) -> $crate::Result<$crate::Payload> {
            self.client.call(&$endpoint, $crate::QueryParams::new()).await
        }
    };
    ($(#[$meta:meta])* $method:ident, $endpoint:path, [$($param:literal),+]) => {
        $(#[$meta])*
        pub async fn $method(
            &self,
            params: $crate::QueryParams,
        ) -> $crate::Result<$crate::Payload> {
            self.client.call(&$endpoint, params).await
        }
    };
}

/// Declares a section's endpoint descriptors and its service type.
macro_rules! section {
    (
        $(#[$service_meta:meta])*
        $service:ident => $section:literal {
            $(
                $(#[$method_meta:meta])*
                $method:ident: $kind:ident {
                    $($param:literal: $param_kind:ident $presence:ident),* $(,)?
                }
            ),* $(,)?
        }
    ) => {
        /// One descriptor per endpoint, named after its service method.
        #[allow(non_upper_case_globals)]
        pub mod descriptors {
            $(
                pub const $method: $crate::api::Endpoint = $crate::api::Endpoint {
                    section: $section,
                    name: stringify!($method),
                    path: concat!("/data/", $section, "/", stringify!($method)),
                    response: $crate::payload::ResponseKind::$kind,
                    params: &[$(
                        $crate::api::ParamSpec {
                            name: $param,
                            kind: $crate::api::ParamKind::$param_kind,
                            required: required!($presence),
                        }
                    ),*],
                };
            )*
        }

        /// Endpoint descriptors of this section.
        pub const ENDPOINTS: &[$crate::api::Endpoint] = &[$(descriptors::$method),*];

        $(#[$service_meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $service<'a> {
            client: &'a $crate::DataClient,
        }

        impl<'a> $service<'a> {
            pub(crate) fn new(client: &'a $crate::DataClient) -> Self {
                Self { client }
            }

            $(
                endpoint_method! {
                    $(#[$method_meta])*
                    $method,
                    descriptors::$method,
                    [$($param),*]
                }
            )*
        }
    };
}

pub mod car;
pub mod carclass;
pub mod constants;
pub mod hosted;
pub mod league;
pub mod lookup;
pub mod member;
pub mod results;
pub mod season;
pub mod series;
pub mod stats;
pub mod team;
pub mod time_attack;
pub mod track;

/// Primitive type tag of an endpoint parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum ParamKind {
    /// Free-form text (also used for ISO-8601 timestamps)
    String,
    /// Integer or decimal number
    Number,
    /// `true` / `false`
    Boolean,
    /// Comma-joined list of numbers
    NumberArray,
}

impl ParamKind {
    /// Whether a value has the right shape for this kind. `Null` always fits.
    pub fn accepts(self, value: &QueryValue) -> bool {
        match (self, value) {
            (_, QueryValue::Null) => true,
            (ParamKind::String, QueryValue::Text(_)) => true,
            (ParamKind::Number, QueryValue::Number(_)) => true,
            (ParamKind::Boolean, QueryValue::Bool(_)) => true,
            (ParamKind::NumberArray, QueryValue::Numbers(_) | QueryValue::Number(_)) => true,
            _ => false,
        }
    }

    /// Name used in validation messages.
    pub fn as_str(self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Number => "number",
            ParamKind::Boolean => "boolean",
            ParamKind::NumberArray => "number[]",
        }
    }
}

/// Schema of a single endpoint parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct ParamSpec {
    /// Query parameter name
    pub name: &'static str,
    /// Expected value kind
    pub kind: ParamKind,
    /// Whether a non-null value must be supplied
    pub required: bool,
}

/// Descriptor of one data endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    /// Section name (`member`, `results`, ...)
    pub section: &'static str,
    /// Endpoint name within the section
    pub name: &'static str,
    /// Path relative to the base URL
    pub path: &'static str,
    /// Whether the endpoint answers inline or with a presigned link
    pub response: ResponseKind,
    /// Accepted parameters
    pub params: &'static [ParamSpec],
}

impl Endpoint {
    /// `section.name` identifier used in logs and errors.
    pub fn id(&self) -> String {
        format!("{}.{}", self.section, self.name)
    }

    /// Schema of a parameter, by name.
    pub fn param(&self, name: &str) -> Option<&'static ParamSpec> {
        self.params.iter().find(|spec| spec.name == name)
    }

    /// Check parameters against this endpoint's schema.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] naming the first offending parameter.
    pub fn validate(&self, params: &QueryParams) -> Result<()> {
        for (name, value) in params.iter() {
            let Some(spec) = self.param(name) else {
                return Err(ApiError::validation(self.id(), format!("unknown parameter '{}'", name)));
            };
            if !spec.kind.accepts(value) {
                return Err(ApiError::validation(
                    self.id(),
                    format!("parameter '{}' must be a {}", name, spec.kind.as_str()),
                ));
            }
        }

        for spec in self.params.iter().filter(|spec| spec.required) {
            let present = params.get(spec.name).is_some_and(|value| !value.is_null());
            if !present {
                return Err(ApiError::validation(
                    self.id(),
                    format!("missing required parameter '{}'", spec.name),
                ));
            }
        }

        Ok(())
    }
}

/// Every section's endpoint table.
pub const SECTIONS: &[&[Endpoint]] = &[
    car::ENDPOINTS,
    carclass::ENDPOINTS,
    constants::ENDPOINTS,
    hosted::ENDPOINTS,
    league::ENDPOINTS,
    lookup::ENDPOINTS,
    member::ENDPOINTS,
    results::ENDPOINTS,
    season::ENDPOINTS,
    series::ENDPOINTS,
    stats::ENDPOINTS,
    team::ENDPOINTS,
    time_attack::ENDPOINTS,
    track::ENDPOINTS,
];

/// Iterate over all known endpoints.
pub fn endpoints() -> impl Iterator<Item = &'static Endpoint> {
    SECTIONS.iter().flat_map(|section| section.iter())
}

/// Look up an endpoint by section and name.
pub fn find_endpoint(section: &str, name: &str) -> Option<&'static Endpoint> {
    endpoints().find(|endpoint| endpoint.section == section && endpoint.name == name)
}

impl DataClient {
    /// Car endpoints.
    pub fn car(&self) -> car::CarService<'_> {
        car::CarService::new(self)
    }

    /// Car class endpoints.
    pub fn carclass(&self) -> carclass::CarClassService<'_> {
        carclass::CarClassService::new(self)
    }

    /// Constant lookup tables.
    pub fn constants(&self) -> constants::ConstantsService<'_> {
        constants::ConstantsService::new(self)
    }

    /// Hosted session endpoints.
    pub fn hosted(&self) -> hosted::HostedService<'_> {
        hosted::HostedService::new(self)
    }

    /// League endpoints.
    pub fn league(&self) -> league::LeagueService<'_> {
        league::LeagueService::new(self)
    }

    /// Lookup endpoints.
    pub fn lookup(&self) -> lookup::LookupService<'_> {
        lookup::LookupService::new(self)
    }

    /// Member endpoints.
    pub fn member(&self) -> member::MemberService<'_> {
        member::MemberService::new(self)
    }

    /// Results endpoints.
    pub fn results(&self) -> results::ResultsService<'_> {
        results::ResultsService::new(self)
    }

    /// Season endpoints.
    pub fn season(&self) -> season::SeasonService<'_> {
        season::SeasonService::new(self)
    }

    /// Series endpoints.
    pub fn series(&self) -> series::SeriesService<'_> {
        series::SeriesService::new(self)
    }

    /// Stats endpoints.
    pub fn stats(&self) -> stats::StatsService<'_> {
        stats::StatsService::new(self)
    }

    /// Team endpoints.
    pub fn team(&self) -> team::TeamService<'_> {
        team::TeamService::new(self)
    }

    /// Time attack endpoints.
    pub fn time_attack(&self) -> time_attack::TimeAttackService<'_> {
        time_attack::TimeAttackService::new(self)
    }

    /// Track endpoints.
    pub fn track(&self) -> track::TrackService<'_> {
        track::TrackService::new(self)
    }
}
