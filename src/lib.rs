//! Date-based archive routing for configurable content types.
//!
//! The crate is embedded by a host: construct [`DateArchivesPlugin`] from a
//! set of [`HostBindings`] and call the lifecycle hooks at the matching
//! points of the host's own lifecycle. Everything behind the facade is laid
//! out in hexagonal layers: `domain` holds the models and repository
//! contracts, `application` the services, `infrastructure` the repository
//! implementations, and `presentation` the admin screen.

pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use app::{DateArchivesPlugin, HostBindings};
pub use domain::models::rewrite::{RewriteRule, RouteMatch, RulePriority};
pub use domain::models::settings::{ArchiveSettings, SETTINGS_GROUP, SETTINGS_OPTION_KEY};
