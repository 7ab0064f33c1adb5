//! Typed groups of API operations
//!
//! Each service borrows a [`Client`](crate::Client) and maps one family of
//! endpoints onto methods that build the request, dispatch it and decode the
//! result. Services hold no state of their own.

mod account;
mod certificates;
mod client_services;
mod clients;
mod geo_restrictions;
mod origin_groups;
mod resources;
mod rules;

pub use account::{ACCOUNT_DETAILS_PATH, Account, AccountService, Group, User};
pub use certificates::{AddCertBody, CERTIFICATES_PATH, CertService, CertSsl};
pub use client_services::{Service, ServicesService, UpdateServiceBody};
pub use clients::{
    CLIENTS_PATH, ClientAccount, ClientsService, CreateClientBody, ListOpts, PaidService,
    USERS_PATH, UpdateClientBody,
};
pub use geo_restrictions::{BILLING_REGIONS_PATH, GeoRestrictions, GeoRestrictionsService, Region};
pub use origin_groups::{
    CreateOriginGroupBody, ORIGIN_GROUPS_PATH, Origin, OriginGroup, OriginGroupsService,
    UpdateOriginGroupBody,
};
pub use resources::{CreateResourceBody, RESOURCES_PATH, Resource, ResourcesService, UpdateResourceBody};
pub use rules::{
    AclOption, CreateRuleBody, FlagOption, ForceReturn, HostHeader, ListOption, Options, Rewrite,
    Rule, RulesService, SecureKey, TtlOption,
};
