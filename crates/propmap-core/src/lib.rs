pub mod app_config;
pub mod catalog;
pub mod compose;
pub mod config;
pub mod error;
pub mod format;
pub mod image;
pub mod map;
pub mod pagination;
pub mod property;
pub mod view_state;

pub use app_config::{AppConfig, Environment, MapSettings};
pub use catalog::{load_catalog, Catalog};
pub use compose::{compose, ListPage, MapPage, PageModel};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{CatalogError, ConfigError};
pub use pagination::{PageItem, PageWindow, WINDOW_SIZE};
pub use property::{PropertyId, PropertyRecord, PropertyStatus};
pub use view_state::{ViewMode, ViewQuery, ViewState, ITEMS_PER_PAGE};
